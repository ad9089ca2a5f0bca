//! Twitter Snowflake parser.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Mutex;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

/// Default Snowflake epoch (Twitter), milliseconds since the Unix epoch.
const SNOWFLAKE_EPOCH_MS: i64 = 1_288_834_974_657;

/// Generator state for one node: the layout allows 4096 ids per millisecond.
struct NodeState {
    last_ms: i64,
    sequence: u64,
}

pub struct SnowflakeParser {
    node_id: u64,
    state: Mutex<NodeState>,
}

impl SnowflakeParser {
    pub fn new(node_id: u64) -> Self {
        Self {
            node_id: node_id & 0x3ff,
            state: Mutex::new(NodeState { last_ms: 0, sequence: 0 }),
        }
    }
}

impl Default for SnowflakeParser {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdParser for SnowflakeParser {
    fn name(&self) -> &'static str {
        "Snowflake"
    }

    fn can_parse(&self, input: &str) -> bool {
        (10..=19).contains(&input.len())
            && input.bytes().all(|b| b.is_ascii_digit())
            && input.parse::<u64>().is_ok()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !(10..=19).contains(&input.len()) {
            return Err(IdError::decode("invalid Snowflake format"));
        }
        let id: u64 = input.parse().map_err(|_| IdError::decode("not a 64-bit integer"))?;

        // Layout from the high end: 41-bit ms timestamp | 10-bit node | 12-bit sequence
        let ms = (id >> 22) as i64 + SNOWFLAKE_EPOCH_MS;
        let node = (id >> 12) & 0x3ff;
        let step = id & 0xfff;

        let epoch = DateTime::from_timestamp_millis(SNOWFLAKE_EPOCH_MS)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();

        let mut info = IdInfo::new("Snowflake", input, 64)
            .with_bytes(id.to_be_bytes().to_vec())
            .with_entropy(22)
            .with_node(node.to_string())
            .with_sequence(step as i64)
            .with_extra("epoch", epoch)
            .with_extra("timestamp_bits", "41")
            .with_extra("node_bits", "10")
            .with_extra("sequence_bits", "12")
            .with_extra("node_id", node.to_string())
            .with_extra("sequence_number", step.to_string());
        info.integer_value = Some(input.to_string());

        if let Some(dt) = DateTime::from_timestamp_millis(ms) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| IdError::generation("snowflake node state poisoned"))?;

        let mut now = Utc::now().timestamp_millis();
        if now == state.last_ms {
            state.sequence = (state.sequence + 1) & 0xfff;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond; wait out the tick
                while now <= state.last_ms {
                    now = Utc::now().timestamp_millis();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_ms = now;

        let id = ((now - SNOWFLAKE_EPOCH_MS) as u64) << 22 | self.node_id << 12 | state.sequence;
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tweet_id() {
        let p = SnowflakeParser::default();
        let input = "1541815603606036480";
        assert!(p.can_parse(input));
        let info = p.parse(input).unwrap();
        assert_eq!(info.size_bits, 64);
        assert_eq!(info.entropy_bits, Some(22));
        // 2022-06-28, well after the Snowflake epoch
        assert!(info.timestamp.unwrap().timestamp() > 1_600_000_000);
        assert!(info.sequence.is_some());
        assert_eq!(info.node_fields.len(), 1);
    }

    #[test]
    fn rejects_short_and_non_numeric() {
        let p = SnowflakeParser::default();
        assert!(!p.can_parse("123456789"));
        assert!(!p.can_parse("12345678901234567890")); // 20 digits
        assert!(!p.can_parse("1234567890a"));
    }

    #[test]
    fn generate_round_trips_with_node_id() {
        let p = SnowflakeParser::new(5);
        let id = p.generate().unwrap();
        let info = p.parse(&id).unwrap();
        assert_eq!(info.node_fields[0], "5");
        let age = (Utc::now() - info.timestamp.unwrap()).num_milliseconds().abs();
        assert!(age < 2000);
    }

    #[test]
    fn generations_are_unique() {
        let p = SnowflakeParser::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(p.generate().unwrap()));
        }
    }
}
