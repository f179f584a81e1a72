//! Canonical instant strings
//!
//! Every instant persisted by the planner is written as
//! `YYYY-MM-DDTHH:MM:SS.mmmZ`. Parsing is lenient about the input shape
//! but never accepts something that is not a real point in time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Utc};

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Format an instant in canonical form
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(CANONICAL_FORMAT).to_string()
}

/// Drop precision below milliseconds so that instants survive a
/// format/parse round trip unchanged
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}

/// Parse an instant from user or stored input
///
/// Accepted shapes:
/// - RFC 3339 with offset or `Z` (e.g. `2025-01-27T10:00:00+09:00`)
/// - naive date-time in local time (e.g. `2025-01-27T10:00:00`, `2025-01-27 10:00`)
/// - date only, taken as UTC midnight (e.g. `2025-01-27`)
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(truncate_to_millis(parsed.with_timezone(&Utc)));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            // Nonexistent local times (DST gaps) are rejected
            let local = Local.from_local_datetime(&naive).earliest()?;
            return Some(truncate_to_millis(local.with_timezone(&Utc)));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Serde adapter for a required canonical instant
pub mod canonical {
    use super::{format_instant, parse_instant};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_instant(instant))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_instant(&raw).ok_or_else(|| D::Error::custom(format!("invalid instant '{}'", raw)))
    }
}

/// Serde adapter for an optional canonical instant (`null` when absent)
pub mod canonical_option {
    use super::format_instant;
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S>(instant: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match instant {
            Some(instant) => serializer.serialize_str(&format_instant(instant)),
            None => serializer.serialize_none(),
        }
    }
}
