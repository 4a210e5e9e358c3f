//! Lenient field decoding for stored records.
//!
//! Records written by earlier versions of the tracker store timestamps as
//! epoch milliseconds (`0` meaning "never"), as ISO strings, or as `null`,
//! and cadences as either numbers or numeric strings. New records are always
//! written as RFC 3339 strings and plain integers.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

fn decode<E: de::Error>(raw: RawTimestamp) -> Result<Option<DateTime<Utc>>, E> {
    let millis = match raw {
        RawTimestamp::Millis(ms) => ms,
        RawTimestamp::Float(ms) => ms as i64,
        RawTimestamp::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            match text.parse::<i64>() {
                Ok(ms) => ms,
                Err(_) => {
                    let parsed = DateTime::parse_from_rfc3339(text)
                        .map_err(|e| E::custom(format!("invalid timestamp '{text}': {e}")))?;
                    let parsed = parsed.with_timezone(&Utc);
                    return Ok((parsed > DateTime::UNIX_EPOCH).then_some(parsed));
                }
            }
        }
    };

    if millis <= 0 {
        return Ok(None);
    }
    DateTime::from_timestamp_millis(millis)
        .map(Some)
        .ok_or_else(|| E::custom(format!("timestamp out of range: {millis}")))
}

/// `Option<DateTime<Utc>>` where `None` is the "never" sentinel.
pub mod optional_timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(raw) => decode(raw),
            None => Ok(None),
        }
    }
}

/// Required `DateTime<Utc>`; a missing or sentinel value decodes as the epoch.
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(raw) => decode(raw)?,
            None => None,
        };
        Ok(value.unwrap_or(DateTime::UNIX_EPOCH))
    }
}

/// Day cadence stored as a number or a numeric string.
pub mod interval {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawInterval {
        Number(u64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = match RawInterval::deserialize(deserializer)? {
            RawInterval::Number(n) => n,
            RawInterval::Float(f) if f.is_finite() && f >= 0.0 => f as u64,
            RawInterval::Float(f) => return Err(de::Error::custom(format!("invalid interval: {f}"))),
            RawInterval::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| de::Error::custom(format!("invalid interval: '{text}'")))?,
        };
        u32::try_from(value).map_err(|_| de::Error::custom(format!("interval too large: {value}")))
    }
}
