//! Date and time utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::well_known::Rfc3339, macros::format_description,
    PrimitiveDateTime, UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Parses a [`DateTime`] out of an [ISO 8601] string.
    ///
    /// Accepts, in order:
    /// - a full [RFC 3339] date and time with an offset;
    /// - a date and time without an offset (`2025-03-01T14:00:00`), which is
    ///   read as UTC (a space in place of `T` is accepted too);
    /// - a date and time without seconds (`2025-03-01T14:00`);
    /// - a bare date (`2025-03-01`), which is read as UTC midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if the string matches none of the formats above, or
    /// if its year (in UTC) falls outside `0..=9999`.
    ///
    /// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        let input = input.trim();
        if let Ok(dt) = time::OffsetDateTime::parse(input, &Rfc3339) {
            return dt.try_into();
        }
        let spaced;
        let input = match (input.get(..10), input.get(10..)) {
            (Some(date), Some(rest)) if rest.starts_with(' ') => {
                spaced = format!("{date}T{}", rest.trim_start_matches(' '));
                spaced.as_str()
            }
            _ => input,
        };

        let naive = PrimitiveDateTime::parse(
            input,
            format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
        )
        .or_else(|_| {
            PrimitiveDateTime::parse(
                input,
                format_description!("[year]-[month]-[day]T[hour]:[minute]"),
            )
        })
        .or_else(|_| {
            time::Date::parse(input, format_description!("[year]-[month]-[day]"))
                .map(time::Date::midnight)
        })
        .map_err(E::Parse)?;

        naive.assume_utc().try_into()
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        // Years are kept within `0..=9999` on construction, which is all
        // RFC 3339 requires to format.
        self.inner
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.inner.to_string())
    }

    /// Returns the calendar [`Date`] (in UTC) of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.inner.date())
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] or [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string.
    Parse(time::error::Parse),

    /// Parsed value has an out of range component.
    ComponentRange(time::error::ComponentRange),

    /// Parsed year (in UTC) is not representable in [RFC 3339].
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[display("year {_0} is out of `0..=9999` range")]
    YearOutOfRange(#[error(not(source))] i32),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl<Of: ?Sized> FromStr for DateTimeOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso8601(s)
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = ParseError;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        let inner = dt
            .checked_to_offset(UtcOffset::UTC)
            .ok_or_else(|| {
                // Shifting to UTC overflows only across the edges of the
                // supported range, so the UTC year is a step past them.
                let step = if dt.offset().is_negative() { 1 } else { -1 };
                ParseError::YearOutOfRange(dt.year() + step)
            })?
            .replace_microsecond(dt.microsecond())
            .map_err(ParseError::ComponentRange)?;
        if !(0..=9999).contains(&inner.year()) {
            return Err(ParseError::YearOutOfRange(inner.year()));
        }
        Ok(Self {
            inner,
            _of: PhantomData,
        })
    }
}

/// Calendar day, formatted as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Parses a [`Date`] out of the date part of an [ISO 8601] date or
    /// date and time, ignoring any time component.
    ///
    /// `2025-03-01` and `2025-03-01T14:00:00` both give `2025-03-01`.
    ///
    /// [ISO 8601]: https://en.wikipedia.org/wiki/ISO_8601
    #[must_use]
    pub fn truncating(input: &str) -> Option<Self> {
        let day = input.trim().split(['T', 't', ' ']).next()?;
        day.parse().ok()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day(),
        )
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(ParseError::Parse)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Date, DateTimeOf};

    impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_rfc3339())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_iso8601(&raw).map_err(|e| {
                D::Error::custom(format!("invalid date `{raw}`: {e}"))
            })
        }
    }

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            raw.parse().map_err(|e| {
                D::Error::custom(format!("invalid date `{raw}`: {e}"))
            })
        }
    }
}
