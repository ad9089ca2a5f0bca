//! Firebase PushID parser.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

/// Firebase PushID alphabet, in ascending ASCII order.
const ALPHABET: &[u8] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const YEAR_2000_MS: i64 = 946_684_800_000;
const YEAR_2100_MS: i64 = 4_102_444_800_000;

pub struct PushIdParser;

impl PushIdParser {
    /// Positional base64 decode of the 8-character timestamp prefix.
    fn extract_timestamp(prefix: &str) -> Option<i64> {
        let mut ms: i64 = 0;
        for ch in prefix.bytes() {
            let pos = ALPHABET.iter().position(|&a| a == ch)? as i64;
            ms = ms * 64 + pos;
        }
        if (YEAR_2000_MS..=YEAR_2100_MS).contains(&ms) {
            Some(ms)
        } else {
            None
        }
    }

    fn encode_timestamp(mut ms: i64) -> String {
        let mut out = Vec::new();
        while ms > 0 {
            out.push(ALPHABET[(ms % 64) as usize]);
            ms /= 64;
        }
        out.reverse();
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl IdParser for PushIdParser {
    fn name(&self) -> &'static str {
        "PushID"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 20 && input.bytes().all(|b| ALPHABET.contains(&b))
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !self.can_parse(input) {
            return Err(IdError::decode("invalid PushID format"));
        }

        let mut info = IdInfo::new("Firebase PushID", input, 120)
            .with_raw_bytes(input.as_bytes().to_vec())
            .with_entropy(120)
            .with_extra("alphabet", "Firebase PushID (64 chars)")
            .with_extra("length", "20 characters")
            .with_extra("format", "8 chars timestamp + 12 chars random")
            .with_extra("binary_approximation", "one byte per character");

        if let Some(ms) = Self::extract_timestamp(&input[..8]) {
            if let Some(dt) = DateTime::from_timestamp_millis(ms) {
                info.timestamp = Some(dt);
                info.timestamp_value = Some(ms.to_string());
                info = info
                    .with_extra("timestamp_part", &input[..8])
                    .with_extra("random_part", &input[8..]);
            }
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let now = Utc::now().timestamp_millis();

        let mut ts = Self::encode_timestamp(now);
        if ts.len() > 8 {
            ts = ts[ts.len() - 8..].to_string();
        }
        while ts.len() < 8 {
            ts.insert(0, '0');
        }
        // Avoid a leading '-' so the id is safe as a CLI argument
        if ts.starts_with('-') {
            ts.replace_range(..1, "0");
        }

        let mut rng = rand::thread_rng();
        let random: String = (0..12)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Ok(format!("{ts}{random}"))
    }
}
