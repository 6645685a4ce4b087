//! [`Filter`] definitions.

use common::{Date, Percent};

use crate::domain::auction::{
    Auction, City, Court, Department, OpportunityLevel, Price, PropertyType,
    Rooms, Status, Surface,
};

/// Structured filter over [`Auction`]s.
///
/// Every dimension is optional and they all compose with logical AND. An
/// absent (or empty) dimension doesn't constrain anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    /// Case-insensitive substring to look for in the address, city,
    /// description and court. Blank text is ignored.
    pub search: Option<String>,

    /// Allowed [`Status`]es.
    pub status: Vec<Status>,

    /// Allowed [`City`]s.
    pub city: Vec<City>,

    /// Allowed [`Department`]s.
    pub department: Vec<Department>,

    /// Allowed [`Court`]s.
    pub court: Vec<Court>,

    /// Allowed [`PropertyType`]s.
    pub property_type: Vec<PropertyType>,

    /// Allowed [`OpportunityLevel`]s.
    pub opportunity_level: Vec<OpportunityLevel>,

    /// Bounds of the starting [`Price`].
    pub price: Range<Price>,

    /// Bounds of the [`Surface`].
    pub surface: Range<Surface>,

    /// Bounds of the number of [`Rooms`].
    pub rooms: Range<Rooms>,

    /// Bounds of the discount.
    pub discount: Range<Percent>,

    /// Earliest day of the sale (inclusive).
    pub date_from: Option<Date>,

    /// Latest day of the sale (inclusive).
    pub date_to: Option<Date>,

    /// Whether at least one visit date is required.
    pub has_visit_date: bool,
}

impl Filter {
    /// Checks whether the provided [`Auction`] satisfies this [`Filter`].
    #[must_use]
    pub fn matches(&self, auction: &Auction) -> bool {
        self.matches_search(auction)
            && allows(&self.status, &auction.status)
            && allows(&self.city, &auction.city)
            && allows(&self.department, &auction.department)
            && allows(&self.court, &auction.court)
            && allows(&self.property_type, &auction.property_type)
            && allows(&self.opportunity_level, &auction.opportunity_level())
            && self.price.contains(auction.starting_price)
            && self.surface.contains(auction.surface)
            && self.rooms.contains(auction.rooms)
            && self.discount.contains(auction.discount_percent)
            && self.matches_date(auction)
            && (!self.has_visit_date || auction.has_visit_date())
    }

    /// Checks the free-text search dimension.
    fn matches_search(&self, auction: &Auction) -> bool {
        let Some(needle) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if needle.is_empty() {
            return true;
        }
        auction
            .search_text()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Checks the sale date dimension.
    ///
    /// An [`Auction`] without a sale date is exempt from both bounds.
    fn matches_date(&self, auction: &Auction) -> bool {
        let Some(day) = auction.auction_date.map(|dt| dt.date()) else {
            return true;
        };
        self.date_from.map_or(true, |from| day >= from)
            && self.date_to.map_or(true, |to| day <= to)
    }
}

/// Checks a multi-select dimension: an empty `allowed` list allows anything.
fn allows<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

/// Inclusive numeric bounds.
///
/// A missing value is compared as zero against both bounds, so it fails any
/// positive `min` and passes any non-negative `max`. Inverted bounds
/// (`min > max`) aren't corrected and simply match nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Range<T> {
    /// Lower bound, if any.
    pub min: Option<T>,

    /// Upper bound, if any.
    pub max: Option<T>,
}

impl<T> Range<T> {
    /// Creates a new [`Range`] out of the provided bounds.
    #[must_use]
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    /// Checks whether the provided `value` lies within this [`Range`].
    #[must_use]
    pub fn contains(&self, value: Option<T>) -> bool
    where
        T: Copy + Default + PartialOrd,
    {
        let value = value.unwrap_or_default();
        self.min.map_or(true, |min| value >= min)
            && self.max.map_or(true, |max| value <= max)
    }
}
