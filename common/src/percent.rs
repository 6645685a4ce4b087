//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Signed floating-point percentage.
///
/// Negative values are meaningful: a discount of `-12` means the asking
/// price is 12% above the estimated market value.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] out of the provided value.
    #[must_use]
    pub const fn new(val: Decimal) -> Self {
        Self(val)
    }

    /// Returns the underlying [`Decimal`] value.
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Percent`] is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Percent {
    fn from(val: Decimal) -> Self {
        Self(val)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim_end_matches('%'))
            .map(Self)
            .map_err(|_| "invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Percent::from_str("35").unwrap(),
            Percent::new(decimal("35")),
        );
        assert_eq!(
            Percent::from_str("35.5%").unwrap(),
            Percent::new(decimal("35.5")),
        );
        assert_eq!(
            Percent::from_str("-12.3").unwrap(),
            Percent::new(decimal("-12.3")),
        );

        assert!(Percent::from_str("").is_err());
        assert!(Percent::from_str("abc").is_err());
    }

    #[test]
    fn ordering_is_signed() {
        let negative = Percent::from_str("-5").unwrap();
        let positive = Percent::from_str("5").unwrap();

        assert!(negative < Percent::ZERO);
        assert!(Percent::ZERO < positive);
        assert!(!negative.is_positive());
        assert!(!Percent::ZERO.is_positive());
        assert!(positive.is_positive());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_json_number() {
        let p: Percent = serde_json::from_str("35.5").unwrap();
        assert_eq!(p, Percent::new(decimal("35.5")));

        let p: Percent = serde_json::from_str("-10").unwrap();
        assert_eq!(p, Percent::new(decimal("-10")));
    }
}
