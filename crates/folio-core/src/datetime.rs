//! Serde helpers for backend timestamps.
//!
//! The portfolio API emits naive ISO-8601 timestamps (`2024-03-01T09:30:00.123456`)
//! that are UTC by convention, while other deployments emit RFC 3339 with an
//! offset. Both are accepted and normalized to `DateTime<Utc>`; serialization
//! always writes RFC 3339.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Record {
//!     #[serde(with = "folio_core::datetime::utc")]
//!     pub created_at: DateTime<Utc>,
//!
//!     #[serde(default, with = "folio_core::datetime::utc_option")]
//!     pub updated_at: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp that is either RFC 3339 or naive ISO-8601 (assumed UTC).
///
/// # Errors
///
/// Returns a description of the rejected input when neither format matches.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Ok(aware.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

pub mod utc {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod utc_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_some(&dt.to_rfc3339()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
