//! Snowflake ID - 64-bit unique identifier
//!
//! Layout: 42 bits of milliseconds since the custom epoch, 10 bits of
//! worker ID, 12 bits of per-millisecond sequence.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// 64-bit unique identifier, serialized as a string for JavaScript safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the Snowflake is zero (uninitialized)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch at which this ID was generated
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> 22) + Self::EPOCH
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialize as string for JSON (JavaScript BigInt safety)
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Deserialize from either representation (clients send strings, tooling
// sometimes sends raw numbers)
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(id) => Ok(Snowflake(id)),
            Repr::Text(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Generates monotonically increasing Snowflake IDs for a single worker.
pub struct SnowflakeGenerator {
    worker_id: u16,
    /// Packed (timestamp << 12) | sequence of the last generated ID
    state: AtomicI64,
}

impl SnowflakeGenerator {
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: worker_id & 0x3FF,
            state: AtomicI64::new(0),
        }
    }

    /// Generate the next ID. Sequence rolls into the next millisecond on
    /// overflow, so IDs from one generator never collide.
    pub fn generate(&self) -> Snowflake {
        let now = Self::now_millis() - Snowflake::EPOCH;

        let mut state = now << 12;
        let _ = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                let prev_ts = prev >> 12;
                let prev_seq = prev & 0xFFF;
                state = if now > prev_ts {
                    now << 12
                } else if prev_seq < 0xFFF {
                    prev + 1
                } else {
                    (prev_ts + 1) << 12
                };
                Some(state)
            });

        let ts = state >> 12;
        let seq = state & 0xFFF;
        Snowflake::new((ts << 22) | (i64::from(self.worker_id) << 12) | seq)
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        let id = Snowflake::new(1234567890);
        assert_eq!(Snowflake::parse(&id.to_string()), Ok(id));
        assert!(Snowflake::parse("not-a-number").is_err());
    }

    #[test]
    fn serializes_as_string() {
        let id = Snowflake::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");

        let from_str: Snowflake = serde_json::from_str("\"42\"").unwrap();
        let from_num: Snowflake = serde_json::from_str("42").unwrap();
        assert_eq!(from_str, id);
        assert_eq!(from_num, id);
    }

    #[test]
    fn generator_produces_unique_increasing_ids() {
        let generator = SnowflakeGenerator::new(1);
        let mut prev = generator.generate();
        for _ in 0..4096 {
            let next = generator.generate();
            assert!(next > prev, "ids must be strictly increasing");
            prev = next;
        }
    }

    #[test]
    fn timestamp_extraction() {
        let generator = SnowflakeGenerator::new(0);
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as i64;
        let id = generator.generate();
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as i64;
        assert!(id.timestamp() >= before && id.timestamp() <= after);
    }
}
