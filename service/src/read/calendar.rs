//! [`Calendar`] definitions.

use std::collections::BTreeMap;

use common::Date;
use serde::Serialize;
use tracing as log;

use crate::{
    domain::{
        auction::{
            Address, AuctionDateTime, City, Id, Price, PropertyType, Surface,
        },
        Auction,
    },
    read::auction::Scope,
};

/// Visits of [`Auction`]s grouped by day.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Calendar {
    /// Number of [`Visit`]s across all the [`Day`]s.
    pub total: usize,

    /// Number of distinct [`Day`]s.
    pub days: usize,

    /// [`Day`]s in ascending order.
    pub calendar: Vec<Day>,
}

impl Calendar {
    /// Builds a [`Calendar`] out of the visit dates of the provided
    /// [`Auction`]s.
    ///
    /// Visit dates are truncated to their day. Days outside the
    /// `from..=to` window are omitted, and so are the visit dates not
    /// starting with a valid `YYYY-MM-DD` date. [`Visit`]s within a [`Day`]
    /// keep the order they were met in, with no deduplication.
    #[must_use]
    pub fn build<'a>(
        auctions: impl IntoIterator<Item = &'a Auction>,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Self {
        let mut buckets = BTreeMap::<Date, Vec<Visit>>::new();
        for auction in auctions {
            for raw in &auction.visit_dates {
                let Some(day) = Date::truncating(raw) else {
                    log::warn!(
                        "skipping invalid visit date `{raw}` of `Auction(id: \
                         {})`",
                        auction.id,
                    );
                    continue;
                };
                if from.is_some_and(|from| day < from)
                    || to.is_some_and(|to| day > to)
                {
                    continue;
                }
                buckets.entry(day).or_default().push(Visit::of(auction));
            }
        }

        let calendar = buckets
            .into_iter()
            .map(|(date, visits)| Day {
                date,
                count: visits.len(),
                visits,
            })
            .collect::<Vec<_>>();
        Self {
            total: calendar.iter().map(|d| d.count).sum(),
            days: calendar.len(),
            calendar,
        }
    }
}

/// Single day of a [`Calendar`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Day {
    /// [`Date`] of this [`Day`].
    pub date: Date,

    /// Number of [`Visit`]s on this [`Day`].
    pub count: usize,

    /// [`Visit`]s on this [`Day`].
    pub visits: Vec<Visit>,
}

/// Lightweight projection of an [`Auction`] being visited.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// [`Id`] of the visited [`Auction`].
    pub id: Id,

    /// [`City`] of the visited [`Auction`].
    ///
    /// Falls back to its postal code, or `?` if neither is known.
    pub city: City,

    /// [`Address`] of the visited [`Auction`].
    pub address: Address,

    /// Starting [`Price`] of the visited [`Auction`].
    pub price: Option<Price>,

    /// [`Surface`] of the visited [`Auction`].
    pub surface: Option<Surface>,

    /// [`PropertyType`] of the visited [`Auction`].
    pub property_type: PropertyType,

    /// Sale date of the visited [`Auction`].
    pub auction_date: Option<AuctionDateTime>,

    /// Link to the visited [`Auction`] listing.
    pub url: String,
}

impl Visit {
    /// Projects the provided [`Auction`].
    fn of(auction: &Auction) -> Self {
        let city = [auction.city.as_str(), auction.postal_code.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or_else(|| City::new("?"), City::new);
        Self {
            id: auction.id.clone(),
            city,
            address: auction.address.clone(),
            price: auction.starting_price,
            surface: auction.surface,
            property_type: auction.property_type,
            auction_date: auction.auction_date,
            url: auction.url.clone(),
        }
    }
}

/// [`Calendar`] selector.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    /// [`Scope`] to select [`Auction`]s within.
    pub scope: Scope,

    /// Earliest [`Day`] to include.
    pub from: Option<Date>,

    /// Latest [`Day`] to include.
    pub to: Option<Date>,
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::domain::Auction;

    use super::Calendar;

    fn auctions(values: serde_json::Value) -> Vec<Auction> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn buckets_by_day() {
        let records = auctions(json!([
            {"id": "a", "visitDates": ["2025-03-01", "2025-03-01T14:00:00"]},
        ]));

        let calendar = Calendar::build(&records, None, None);

        assert_eq!(calendar.total, 2);
        assert_eq!(calendar.days, 1);
        assert_eq!(calendar.calendar[0].date.to_string(), "2025-03-01");
        assert_eq!(calendar.calendar[0].count, 2);
    }

    #[test]
    fn sorts_days_and_keeps_visit_order() {
        let records = auctions(json!([
            {"id": "a", "city": "Paris", "visitDates": ["2025-03-05", "2025-03-01"]},
            {"id": "b", "visitDates": []},
            {"id": "c", "visitDates": ["2025-03-05 09:30"]},
        ]));

        let calendar = Calendar::build(&records, None, None);

        let days = calendar
            .calendar
            .iter()
            .map(|d| d.date.to_string())
            .collect::<Vec<_>>();
        assert_eq!(days, ["2025-03-01", "2025-03-05"]);
        assert_eq!(calendar.total, 3);

        let visits = calendar.calendar[1]
            .visits
            .iter()
            .map(|v| v.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visits, ["a", "c"]);
        assert_eq!(calendar.calendar[0].visits[0].city.as_str(), "Paris");
    }

    #[test]
    fn labels_visits_without_city() {
        let records = auctions(json!([
            {"id": "a", "city": "Lyon", "postalCode": "69001", "visitDates": ["2025-03-01"]},
            {"id": "b", "postalCode": "75011", "visitDates": ["2025-03-01"]},
            {"id": "c", "city": "", "visitDates": ["2025-03-01"]},
        ]));

        let calendar = Calendar::build(&records, None, None);

        let cities = calendar.calendar[0]
            .visits
            .iter()
            .map(|v| v.city.as_str())
            .collect::<Vec<_>>();
        assert_eq!(cities, ["Lyon", "75011", "?"]);
    }

    #[test]
    fn skips_invalid_dates() {
        let records = auctions(json!([
            {"id": "a", "visitDates": ["soon", "2025-02-30", "2025-04-02"]},
        ]));

        let calendar = Calendar::build(&records, None, None);

        assert_eq!(calendar.total, 1);
        assert_eq!(calendar.calendar[0].date.to_string(), "2025-04-02");
    }

    #[test]
    fn applies_window() {
        let records = auctions(json!([
            {"id": "a", "visitDates": ["2025-03-01", "2025-03-10", "2025-03-20"]},
        ]));

        let calendar = Calendar::build(
            &records,
            Some("2025-03-01".parse().unwrap()),
            Some("2025-03-10".parse().unwrap()),
        );

        assert_eq!(calendar.days, 2);
        assert_eq!(calendar.total, 2);
    }

    #[test]
    fn empty_calendar() {
        let calendar = Calendar::build(std::iter::empty(), None, None);

        assert_eq!(calendar, Calendar::default());
        assert_eq!(
            serde_json::to_value(&calendar).unwrap(),
            json!({"total": 0, "days": 0, "calendar": []}),
        );
    }
}
