//! SCRU128 parser.

use chrono::DateTime;
use scru128::{Scru128Generator, Scru128Id};
use std::str::FromStr;
use std::sync::Mutex;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

/// Holds its own generator so consecutive ids stay monotonically ordered.
pub struct Scru128Parser {
    generator: Mutex<Scru128Generator>,
}

impl Default for Scru128Parser {
    fn default() -> Self {
        Self {
            generator: Mutex::new(Scru128Generator::new()),
        }
    }
}

impl IdParser for Scru128Parser {
    fn name(&self) -> &'static str {
        "SCRU128"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 25
            && input.bytes().all(|b| b.is_ascii_alphanumeric())
            && Scru128Id::from_str(input).is_ok()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        let id = Scru128Id::from_str(input).map_err(|e| IdError::decode(e.to_string()))?;

        // Field layout: 48-bit ms timestamp | 24-bit counter_hi | 24-bit
        // counter_lo | 32-bit entropy.
        let value = (id.timestamp() as u128) << 80
            | (id.counter_hi() as u128) << 56
            | (id.counter_lo() as u128) << 32
            | id.entropy() as u128;
        let counter = ((id.counter_hi() as i64) << 24) | id.counter_lo() as i64;

        let mut info = IdInfo::new(
            "SCRU128 (Sortable, Clock and Random number-based Unique identifier)",
            id.to_string(),
            128,
        )
        .with_bytes(value.to_be_bytes().to_vec())
        .with_sequence(counter)
        .with_entropy(80)
        .with_extra("encoding", "Base36")
        .with_extra("timestamp_precision", "millisecond")
        .with_extra("sortable", "true")
        .with_extra("timestamp_bits", "48")
        .with_extra("counter_bits", "48")
        .with_extra("randomness_bits", "32")
        .with_extra("counter_value", counter.to_string());

        if let Some(dt) = DateTime::from_timestamp_millis(id.timestamp() as i64) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut generator = self
            .generator
            .lock()
            .map_err(|_| IdError::generation("scru128 generator state poisoned"))?;
        Ok(generator.generate().to_string())
    }
}
