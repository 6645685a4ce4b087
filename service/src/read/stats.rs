//! [`Stats`] definitions.

use std::collections::BTreeMap;

use common::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{auction::Status, Auction};

/// Summary of a collection of [`Auction`]s.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    /// [`DateTime`] when these [`Stats`] were exported, if precomputed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime>,

    /// Number of [`Auction`]s.
    pub total: usize,

    /// Number of upcoming [`Auction`]s.
    pub upcoming: usize,

    /// Number of [`Auction`]s being opportunities.
    pub opportunities: usize,

    /// Average positive discount, rounded to one decimal place.
    pub average_discount: Decimal,

    /// Average positive price per square meter, rounded to a unit.
    pub average_price_per_sqm: Decimal,

    /// Number of [`Auction`]s per city.
    pub by_city: BTreeMap<String, usize>,

    /// Number of [`Auction`]s per property type.
    pub by_property_type: BTreeMap<String, usize>,
}

impl Stats {
    /// Name of the bucket counting [`Auction`]s with no city.
    pub const UNKNOWN_CITY: &'static str = "Unknown";

    /// Computes [`Stats`] of the provided [`Auction`]s.
    #[must_use]
    pub fn compute<'a>(auctions: impl IntoIterator<Item = &'a Auction>) -> Self {
        let mut stats = Self::default();
        let mut discounts = Vec::new();
        let mut prices = Vec::new();

        for a in auctions {
            stats.total += 1;
            if a.status == Status::Upcoming {
                stats.upcoming += 1;
            }
            if a.opportunity_level().is_opportunity() {
                stats.opportunities += 1;
            }
            if let Some(d) = a.discount_percent.filter(|d| d.is_positive()) {
                discounts.push(d.get());
            }
            if let Some(p) = a
                .price_per_sqm
                .map(Decimal::from)
                .filter(|p| *p > Decimal::ZERO)
            {
                prices.push(p);
            }

            let city = if a.city.as_str().is_empty() {
                Self::UNKNOWN_CITY.to_owned()
            } else {
                a.city.to_string()
            };
            *stats.by_city.entry(city).or_default() += 1;
            *stats
                .by_property_type
                .entry(a.property_type.to_string())
                .or_default() += 1;
        }

        stats.average_discount = average(&discounts).round_dp(1);
        stats.average_price_per_sqm = average(&prices).round_dp(0);
        stats
    }
}

/// Averages the provided values, giving zero for none.
fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}
