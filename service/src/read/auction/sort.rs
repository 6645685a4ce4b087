//! Ordering of [`Auction`]s.

use std::{cmp::Ordering, convert::Infallible, str::FromStr};

use common::{pagination::Order, DateTime};
use itertools::Itertools as _;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value as Json;

use crate::domain::Auction;

/// Key to order [`Auction`]s by.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SortBy {
    /// Sale date. Unknown dates always go last.
    #[default]
    AuctionDate,

    /// Starting price.
    StartingPrice,

    /// Discount against the estimated market value.
    DiscountPercent,

    /// Surface.
    Surface,

    /// Opportunity score.
    OpportunityScore,

    /// Price per square meter.
    PricePerSqm,

    /// Number of rooms.
    Rooms,

    /// City, lexicographically.
    City,

    /// Creation date. Unknown dates are the oldest ones.
    CreatedAt,

    /// Any other attribute of the exported record, looked up by its wire
    /// name.
    ///
    /// Numbers compare numerically, text lexicographically, and a missing
    /// attribute is zero.
    Field(String),
}

impl SortBy {
    /// Extracts the [`Comparable`] key of the provided [`Auction`].
    #[must_use]
    pub fn key(&self, auction: &Auction) -> Comparable {
        match self {
            Self::AuctionDate => auction
                .auction_date
                .map_or(Comparable::Unknown, |dt| Comparable::Moment(dt.coerce())),
            Self::CreatedAt => Comparable::Moment(
                auction
                    .created_at
                    .map_or(DateTime::UNIX_EPOCH, |dt| dt.coerce()),
            ),
            Self::StartingPrice => number(auction.starting_price.map(Into::into)),
            Self::DiscountPercent => {
                number(auction.discount_percent.map(|p| p.get()))
            }
            Self::Surface => number(auction.surface.map(Into::into)),
            Self::OpportunityScore => number(auction.opportunity_score),
            Self::PricePerSqm => number(auction.price_per_sqm.map(Into::into)),
            Self::Rooms => number(auction.rooms.map(Decimal::from)),
            Self::City => Comparable::Text(auction.city.to_string()),
            Self::Field(name) => field(auction, name),
        }
    }
}

impl FromStr for SortBy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "auctionDate" | "auction_date" => Self::AuctionDate,
            "startingPrice" | "starting_price" | "price" => Self::StartingPrice,
            "discountPercent" | "discount_percent" | "discount" => {
                Self::DiscountPercent
            }
            "surface" => Self::Surface,
            "opportunityScore" | "opportunity_score" => Self::OpportunityScore,
            "pricePerSqm" | "price_per_sqm" => Self::PricePerSqm,
            "rooms" => Self::Rooms,
            "city" => Self::City,
            "createdAt" | "created_at" => Self::CreatedAt,
            other => Self::Field(other.to_owned()),
        })
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(match raw.parse() {
            Ok(by) => by,
            Err(never) => match never {},
        })
    }
}

/// Coerced sort key of an [`Auction`].
///
/// Variants of different kinds never meet for the known [`SortBy`] keys,
/// only [`SortBy::Field`] may mix them.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Comparable {
    /// Numeric key.
    Number(Decimal),

    /// Textual key.
    Text(String),

    /// Point in time.
    Moment(DateTime),

    /// Unknown point in time, placed after every other key in both
    /// [`Order`]s.
    Unknown,
}

impl Comparable {
    /// Compares two [`Comparable`]s in the provided [`Order`].
    ///
    /// [`Comparable::Unknown`] isn't affected by the [`Order`] and always
    /// compares as the greatest.
    #[must_use]
    pub fn compare(&self, other: &Self, order: Order) -> Ordering {
        match (self, other) {
            (Self::Unknown, Self::Unknown) => Ordering::Equal,
            (Self::Unknown, _) => Ordering::Greater,
            (_, Self::Unknown) => Ordering::Less,
            (a, b) => order.apply(a.cmp(b)),
        }
    }
}

/// Coerces a missing number to zero.
fn number(value: Option<Decimal>) -> Comparable {
    Comparable::Number(value.unwrap_or_default())
}

/// Looks up an arbitrary attribute of the provided [`Auction`] by its wire
/// name.
///
/// Uninterpreted attributes are read directly, the rest requires
/// serializing the whole record.
fn field(auction: &Auction, name: &str) -> Comparable {
    if let Some(value) = auction.extra.get(name) {
        return coerce(value);
    }
    match serde_json::to_value(auction) {
        Ok(Json::Object(record)) => {
            record.get(name).map_or(Comparable::Number(Decimal::ZERO), coerce)
        }
        Ok(_) | Err(_) => Comparable::Number(Decimal::ZERO),
    }
}

/// Coerces a JSON value into a [`Comparable`].
fn coerce(value: &Json) -> Comparable {
    match value {
        Json::String(s) => Comparable::Text(s.clone()),
        Json::Number(n) => {
            let n = n.to_string();
            Comparable::Number(
                n.parse()
                    .or_else(|_| Decimal::from_scientific(&n))
                    .unwrap_or_default(),
            )
        }
        Json::Bool(b) => Comparable::Number(Decimal::from(u8::from(*b))),
        Json::Null | Json::Array(_) | Json::Object(_) => {
            Comparable::Number(Decimal::ZERO)
        }
    }
}

/// Sorts the provided [`Auction`]s by the provided [`SortBy`] key in the
/// provided [`Order`].
///
/// The sort is stable: [`Auction`]s with equal keys keep their relative
/// order in both [`Order`]s. The input isn't touched.
pub fn sort<'a>(
    auctions: impl IntoIterator<Item = &'a Auction>,
    by: &SortBy,
    order: Order,
) -> Vec<&'a Auction> {
    auctions
        .into_iter()
        .map(|a| (by.key(a), a))
        .sorted_by(|(a, _), (b, _)| a.compare(b, order))
        .map(|(_, a)| a)
        .collect()
}
