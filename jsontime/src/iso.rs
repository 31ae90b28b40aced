//! RFC 3339 timestamp type.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Digits of sub-second precision kept by [`Iso`].
const PRECISION: u16 = 6;

/// A UTC timestamp that serializes to/from an RFC 3339 string in JSON.
///
/// Values are truncated to microseconds on construction, so printing and
/// re-parsing always yields an equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iso(DateTime<Utc>);

/// Error returned when a string is not a valid RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "jsontime: invalid RFC 3339 timestamp: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

impl Iso {
    /// Creates a new Iso from a DateTime<Utc>.
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(PRECISION))
    }

    /// Returns the current time as Iso.
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Returns the current time, or one microsecond past `prev` when the
    /// clock has not moved beyond it.
    pub fn now_after(prev: &Self) -> Self {
        let now = Self::now();
        if now.after(prev) {
            now
        } else {
            Self(prev.0 + chrono::Duration::microseconds(1))
        }
    }

    /// Returns the underlying DateTime<Utc>.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Reports whether this time is after the other.
    pub fn after(&self, other: &Self) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Iso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl FromStr for Iso {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
            .map_err(|e| ParseError(format!("{s:?}: {e}")))
    }
}

impl Serialize for Iso {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Iso {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
