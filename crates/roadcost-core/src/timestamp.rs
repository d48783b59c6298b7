//! Timestamps as the service sends them.
//!
//! The service emits ISO-8601 strings, sometimes with an offset (`Z`,
//! `+05:30`) and sometimes naive. A naive value is the service's own
//! wall-clock time, so it stays naive until it is rendered in a known zone.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A service timestamp, with or without an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceTime {
    /// Carried an explicit offset.
    Zoned(DateTime<Utc>),
    /// Wall-clock time in the service's zone.
    Local(NaiveDateTime),
}

impl ServiceTime {
    /// Parses an ISO-8601 timestamp, with or without an offset.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Zoned(parsed.with_timezone(&Utc)));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(Self::Local)
    }

    /// The instant this denotes when naive values are wall-clock time at `offset`.
    pub fn resolve(self, offset: FixedOffset) -> DateTime<Utc> {
        match self {
            Self::Zoned(instant) => instant,
            Self::Local(naive) => match offset.from_local_datetime(&naive).single() {
                Some(local) => local.with_timezone(&Utc),
                None => naive.and_utc(),
            },
        }
    }
}

impl From<DateTime<Utc>> for ServiceTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Zoned(instant)
    }
}

impl From<NaiveDateTime> for ServiceTime {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Local(naive)
    }
}

/// Values of the same kind are ordered; a zoned and a naive value are not
/// comparable without knowing the service's zone.
impl PartialOrd for ServiceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Zoned(a), Self::Zoned(b)) => Some(a.cmp(b)),
            (Self::Local(a), Self::Local(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoned(instant) => write!(f, "{}", instant.to_rfc3339()),
            Self::Local(naive) => write!(f, "{}", naive.format(NAIVE_OUTPUT_FORMAT)),
        }
    }
}

impl Serialize for ServiceTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ServiceTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Offset};

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_with_zulu() {
        let parsed = ServiceTime::parse("2024-01-01T10:00:00Z").unwrap();
        assert_eq!(parsed, ServiceTime::Zoned(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = ServiceTime::parse("2024-01-01T15:30:00+05:30").unwrap();
        assert_eq!(parsed.resolve(ist()), Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_stays_wall_clock() {
        let parsed = ServiceTime::parse("2024-01-01T10:00:00.250000").unwrap();
        let ServiceTime::Local(naive) = parsed else {
            panic!("expected a naive value, got {parsed:?}");
        };
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 250)
            .unwrap();
        assert_eq!(naive, expected);
        assert!(ServiceTime::parse("2024-01-01 10:00:00").is_some());
    }

    #[test]
    fn test_naive_resolves_at_given_offset() {
        let parsed = ServiceTime::parse("2024-01-01T10:00:00").unwrap();
        assert_eq!(parsed.resolve(ist()), Utc.with_ymd_and_hms(2024, 1, 1, 4, 30, 0).unwrap());
        assert_eq!(
            parsed.resolve(Utc.fix()),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_mixed_kinds_are_unordered() {
        let zoned = ServiceTime::parse("2024-01-01T10:00:00Z").unwrap();
        let local = ServiceTime::parse("2024-01-01T09:00:00").unwrap();
        assert_eq!(zoned.partial_cmp(&local), None);
    }

    #[test]
    fn test_serialize_keeps_kind() {
        let local = ServiceTime::parse("2024-01-01T10:00:00").unwrap();
        assert_eq!(serde_json::to_string(&local).unwrap(), r#""2024-01-01T10:00:00""#);
        let back: ServiceTime = serde_json::from_str(&serde_json::to_string(&local).unwrap()).unwrap();
        assert_eq!(back, local);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ServiceTime::parse("yesterday").is_none());
        assert!(ServiceTime::parse("").is_none());
    }
}
