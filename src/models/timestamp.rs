//! Timestamps as the backend actually sends them.
//!
//! RFC 3339 first. Date-times without an offset are taken as UTC and a bare
//! date as midnight UTC. Anything else reads as absent and is logged, so one
//! odd value cannot fail a whole list.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

pub(crate) fn parse(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at);
    }

    let naive = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    for format in naive {
        if let Ok(at) = PrimitiveDateTime::parse(raw, format) {
            return Some(at.assume_utc());
        }
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// `#[serde(with = ...)]` for optional backend timestamps. Writes RFC 3339.
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let parsed = super::parse(&raw);
        if parsed.is_none() {
            tracing::warn!(value = %raw, "Ignoring unreadable timestamp");
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn accepts_common_backend_shapes() {
        let cases = [
            ("2026-10-20T10:00:00Z", datetime!(2026-10-20 10:00 UTC)),
            ("2026-10-20T12:00:00+02:00", datetime!(2026-10-20 10:00 UTC)),
            ("2026-10-20T10:00:00", datetime!(2026-10-20 10:00 UTC)),
            ("2026-10-20T10:00:00.250", datetime!(2026-10-20 10:00:00.25 UTC)),
            ("2026-10-20 10:00:00", datetime!(2026-10-20 10:00 UTC)),
            ("2026-10-20T10:00", datetime!(2026-10-20 10:00 UTC)),
            ("2026-10-20", datetime!(2026-10-20 0:00 UTC)),
        ];
        for (raw, expected) in cases {
            assert_eq!(parse(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn rejects_nonsense() {
        assert_eq!(parse("next tuesday"), None);
        assert_eq!(parse("2026-13-40"), None);
    }
}
