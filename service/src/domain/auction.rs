//! [`Auction`] definitions.

use common::{define_kind, unit, DateTimeOf, Percent};
#[cfg(doc)]
use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;
use tracing as log;

/// Judicial auction of a real-estate property.
///
/// Records are produced by an external enrichment pipeline: derived fields
/// (`price_per_sqm`, `discount_percent`, `opportunity_level`) are trusted
/// as-is and never recomputed here.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    /// ID of this [`Auction`], unique within one loaded snapshot.
    pub id: Id,

    /// Link to the original listing of this [`Auction`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// [`Status`] of this [`Auction`].
    #[serde(default)]
    pub status: Status,

    /// [`PropertyType`] being auctioned.
    #[serde(default, alias = "category")]
    pub property_type: PropertyType,

    /// [`Address`] of the property.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Address,

    /// [`PostalCode`] of the property.
    #[serde(default, deserialize_with = "null_as_default")]
    pub postal_code: PostalCode,

    /// [`City`] the property is located in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: City,

    /// [`Department`] the property is located in.
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: Department,

    /// Latitude of the property, if geocoded.
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude of the property, if geocoded.
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Starting (reserve) [`Price`], if known.
    #[serde(default)]
    pub starting_price: Option<Price>,

    /// [`Surface`] of the property, if known.
    #[serde(default)]
    pub surface: Option<Surface>,

    /// Number of rooms, if known.
    #[serde(default, deserialize_with = "lenient_rooms")]
    pub rooms: Option<Rooms>,

    /// [`Price`] per square meter, if both inputs are known.
    #[serde(default)]
    pub price_per_sqm: Option<Price>,

    /// Discount of the starting price against the estimated market value.
    #[serde(default)]
    pub discount_percent: Option<Percent>,

    /// Opportunity score computed by the enrichment pipeline.
    #[serde(default)]
    pub opportunity_score: Option<Decimal>,

    /// [`OpportunityLevel`] as provided by the source, if any.
    ///
    /// Use [`Auction::opportunity_level()`] to read it.
    #[serde(default, rename = "opportunityLevel")]
    pub provided_opportunity_level: Option<OpportunityLevel>,

    /// [`DateTime`] when the sale takes place, if scheduled.
    ///
    /// Unparsable values are read as unscheduled.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub auction_date: Option<AuctionDateTime>,

    /// [`DateTime`] when this [`Auction`] was first recorded.
    ///
    /// Unparsable values are read as unknown.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<CreationDateTime>,

    /// Visit dates (ISO dates or date-times), in the source order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub visit_dates: Vec<String>,

    /// Free-text description of the property.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// [`Court`] conducting the sale.
    #[serde(default, deserialize_with = "null_as_default")]
    pub court: Court,

    /// Remaining attributes the engine doesn't interpret, kept for
    /// passthrough and dynamic sorting.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Auction {
    /// Returns [`OpportunityLevel`] of this [`Auction`].
    ///
    /// Falls back to bucketing the [`Auction::discount_percent`] when the
    /// source omitted the level.
    #[must_use]
    pub fn opportunity_level(&self) -> OpportunityLevel {
        self.provided_opportunity_level.unwrap_or_else(|| {
            OpportunityLevel::from_discount(self.discount_percent)
        })
    }

    /// Returns coordinates of this [`Auction`] as `(latitude, longitude)`,
    /// if both are known.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Indicates whether this [`Auction`] has at least one visit date.
    #[must_use]
    pub fn has_visit_date(&self) -> bool {
        !self.visit_dates.is_empty()
    }

    /// Returns the text searched by free-text queries: address, city,
    /// description and court, space-joined.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.address.as_str(),
            self.city.as_str(),
            self.description.as_str(),
            self.court.as_str(),
        ]
        .join(" ")
    }
}

/// Deserializes `null` as the [`Default`] value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes a [`DateTime`], reading anything that isn't a recognizable
/// ISO 8601 string as [`None`].
fn lenient_datetime<'de, D, Of>(
    deserializer: D,
) -> Result<Option<DateTimeOf<Of>>, D::Error>
where
    D: Deserializer<'de>,
    Of: ?Sized,
{
    Ok(match Option::<Json>::deserialize(deserializer)? {
        Some(Json::String(raw)) => DateTimeOf::<Of>::from_iso8601(&raw)
            .map_err(|e| log::debug!("ignoring date `{raw}`: {e}"))
            .ok(),
        Some(other) => {
            log::debug!("ignoring date `{other}`");
            None
        }
        None => None,
    })
}

/// Deserializes a number of [`Rooms`], accepting integral floats (`3.0`) and
/// reading anything else as [`None`].
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "integral and non-negative by the filter"
)]
fn lenient_rooms<'de, D>(deserializer: D) -> Result<Option<Rooms>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Json::Number(n)) = Option::<Json>::deserialize(deserializer)?
    else {
        return Ok(None);
    };
    let integral = n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64)
    });
    Ok(integral.and_then(|n| Rooms::try_from(n).ok()))
}

/// Defines a transparent text attribute of an [`Auction`].
macro_rules! define_text {
    ($(#[doc = $doc:literal] $name:ident),* $(,)?) => {$(
        #[doc = $doc]
        #[derive(
            AsRef,
            Clone,
            Debug,
            Default,
            Deserialize,
            Display,
            Eq,
            From,
            Hash,
            Into,
            Ord,
            PartialEq,
            PartialOrd,
            Serialize,
        )]
        #[as_ref(forward)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`].")]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[doc = concat!("Returns this [`", stringify!($name), "`] as a string slice.")]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    )*};
}

define_text! {
    #[doc = "ID of an [`Auction`]."]
    Id,

    #[doc = "Street address of an [`Auction`]."]
    Address,

    #[doc = "Postal code of an [`Auction`]."]
    PostalCode,

    #[doc = "City of an [`Auction`]."]
    City,

    #[doc = "Administrative department (two- or three-character code) of an \
             [`Auction`]."]
    Department,

    #[doc = "Court conducting an [`Auction`]."]
    Court,
}

/// Amount of money, in euros.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

/// Surface of a property, in square meters.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Surface(Decimal);

/// Number of rooms of a property.
pub type Rooms = u16;

define_kind! {
    #[doc = "Lifecycle status of an [`Auction`]."]
    enum Status {
        #[doc = "The sale is scheduled in the future."]
        Upcoming = 1,

        #[doc = "The sale takes place today."]
        Active = 2,

        #[doc = "The sale took place."]
        Completed = 3,

        #[doc = "The sale was called off."]
        Cancelled = 4,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Upcoming
    }
}

define_kind! {
    #[doc = "Type of property being auctioned."]
    enum PropertyType {
        #[doc = "An apartment."]
        Apartment = 1,

        #[doc = "A house."]
        House = 2,

        #[doc = "Commercial premises or a whole building."]
        Commercial = 3,

        #[doc = "A plot of land."]
        Land = 4,

        #[doc = "A parking space or a box."]
        Parking = 5,

        #[doc = "Anything else (cellars, shares, etc)."]
        Other = 6,
    }
}

impl Default for PropertyType {
    fn default() -> Self {
        Self::Other
    }
}

define_kind! {
    #[doc = "Ordinal bucket of an [`Auction`] discount."]
    enum OpportunityLevel {
        #[doc = "Not an opportunity."]
        None = 0,

        #[doc = "Discount of at least 20%."]
        Good = 1,

        #[doc = "Discount of at least 30%."]
        Excellent = 2,

        #[doc = "Discount of at least 40%."]
        Exceptional = 3,
    }
}

impl OpportunityLevel {
    /// Buckets the provided discount the way the enrichment pipeline does.
    #[must_use]
    pub fn from_discount(discount: Option<Percent>) -> Self {
        let Some(discount) = discount.map(Percent::get) else {
            return Self::None;
        };
        if discount >= Decimal::from(40) {
            Self::Exceptional
        } else if discount >= Decimal::from(30) {
            Self::Excellent
        } else if discount >= Decimal::from(20) {
            Self::Good
        } else {
            Self::None
        }
    }

    /// Indicates whether this [`OpportunityLevel`] denotes an opportunity.
    #[must_use]
    pub fn is_opportunity(self) -> bool {
        self > Self::None
    }
}

/// [`DateTime`] when an [`Auction`] sale takes place.
pub type AuctionDateTime = DateTimeOf<(Auction, unit::Sale)>;

/// [`DateTime`] when an [`Auction`] was created.
pub type CreationDateTime = DateTimeOf<(Auction, unit::Creation)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Percent;
    use serde_json::json;

    use super::{Auction, OpportunityLevel, PropertyType, Status};

    #[test]
    fn deserializes_exported_record() {
        let auction: Auction = serde_json::from_value(json!({
            "id": "42",
            "source": "licitor",
            "url": "https://example.com/42",
            "auctionDate": "2025-04-10T14:00:00",
            "startingPrice": 50000,
            "finalPrice": null,
            "discountPercent": 35.5,
            "opportunityLevel": "excellent",
            "status": "upcoming",
            "createdAt": "2025-01-02T10:00:00",
            "address": "12 rue de la Paix",
            "postalCode": "75002",
            "city": "Paris",
            "department": "75",
            "latitude": 48.86,
            "longitude": 2.33,
            "propertyType": "apartment",
            "surface": 42.5,
            "rooms": 2,
            "description": "Appartement",
            "court": "TJ Paris",
            "visitDates": ["2025-03-01", "2025-03-01T14:00:00"],
            "pricePerSqm": 1176.47,
        }))
        .unwrap();

        assert_eq!(auction.id.as_str(), "42");
        assert_eq!(auction.status, Status::Upcoming);
        assert_eq!(auction.property_type, PropertyType::Apartment);
        assert_eq!(auction.opportunity_level(), OpportunityLevel::Excellent);
        assert_eq!(auction.coordinates(), Some((48.86, 2.33)));
        assert_eq!(auction.visit_dates.len(), 2);
        assert_eq!(
            auction.auction_date.unwrap().to_rfc3339(),
            "2025-04-10T14:00:00Z",
        );
        assert_eq!(auction.extra.get("source"), Some(&json!("licitor")));
        assert!(auction.extra.contains_key("finalPrice"));
    }

    #[test]
    fn tolerates_sparse_record() {
        let auction: Auction = serde_json::from_value(json!({
            "id": "a",
            "city": null,
            "court": null,
            "visitDates": null,
            "category": "house",
        }))
        .unwrap();

        assert_eq!(auction.status, Status::Upcoming);
        assert_eq!(auction.property_type, PropertyType::House);
        assert_eq!(auction.city.as_str(), "");
        assert!(!auction.has_visit_date());
        assert!(auction.auction_date.is_none());
        assert!(auction.created_at.is_none());
        assert_eq!(auction.opportunity_level(), OpportunityLevel::None);
    }

    #[test]
    fn reads_unparsable_dates_as_unknown() {
        let auction: Auction = serde_json::from_value(json!({
            "id": "a",
            "auctionDate": "15 mars 2025",
            "createdAt": 1_735_812_000,
        }))
        .unwrap();

        assert!(auction.auction_date.is_none());
        assert!(auction.created_at.is_none());
    }

    #[test]
    fn reads_sql_style_dates() {
        let auction: Auction = serde_json::from_value(json!({
            "id": "a",
            "createdAt": "2025-01-02 10:00:00",
        }))
        .unwrap();

        assert_eq!(
            auction.created_at.unwrap().to_rfc3339(),
            "2025-01-02T10:00:00Z",
        );
    }

    #[test]
    fn accepts_integral_float_rooms() {
        let rooms = |v: serde_json::Value| {
            serde_json::from_value::<Auction>(json!({"id": "a", "rooms": v}))
                .unwrap()
                .rooms
        };

        assert_eq!(rooms(json!(3)), Some(3));
        assert_eq!(rooms(json!(3.0)), Some(3));
        assert_eq!(rooms(json!(2.5)), None);
        assert_eq!(rooms(json!(-1)), None);
        assert_eq!(rooms(json!("three")), None);
        assert_eq!(rooms(json!(null)), None);
    }

    #[test]
    fn derives_missing_opportunity_level_from_discount() {
        let level = |d: &str| {
            OpportunityLevel::from_discount(Some(Percent::from_str(d).unwrap()))
        };

        assert_eq!(OpportunityLevel::from_discount(None), OpportunityLevel::None);
        assert_eq!(level("-5"), OpportunityLevel::None);
        assert_eq!(level("19.9"), OpportunityLevel::None);
        assert_eq!(level("20"), OpportunityLevel::Good);
        assert_eq!(level("35"), OpportunityLevel::Excellent);
        assert_eq!(level("40"), OpportunityLevel::Exceptional);

        assert!(!OpportunityLevel::None.is_opportunity());
        assert!(OpportunityLevel::Good.is_opportunity());
    }

    #[test]
    fn provided_opportunity_level_is_trusted() {
        let auction: Auction = serde_json::from_value(json!({
            "id": "a",
            "discountPercent": 50,
            "opportunityLevel": "good",
        }))
        .unwrap();

        assert_eq!(auction.opportunity_level(), OpportunityLevel::Good);
    }

    #[test]
    fn search_text_joins_searchable_fields() {
        let auction: Auction = serde_json::from_value(json!({
            "id": "a",
            "address": "1 Quai",
            "city": "Lyon",
            "description": "Loft",
            "court": "TJ Lyon",
        }))
        .unwrap();

        assert_eq!(auction.search_text(), "1 Quai Lyon Loft TJ Lyon");
    }
}
