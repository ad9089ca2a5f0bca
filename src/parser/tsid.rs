//! TSID parser.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Milliseconds between the Unix epoch and the default TSID epoch (2020-01-01T00:00:00Z).
const TSID_EPOCH_MS: i64 = 1_577_836_800_000;

pub struct TsidParser;

impl TsidParser {
    /// Crockford digit value with the usual I/L -> 1 and O -> 0 folding.
    fn digit(c: char) -> Option<u64> {
        let c = c.to_ascii_uppercase();
        match c {
            'I' | 'L' => Some(1),
            'O' => Some(0),
            _ => CROCKFORD
                .iter()
                .position(|&a| a as char == c)
                .map(|v| v as u64),
        }
    }

    fn decode(input: &str) -> Option<u64> {
        let mut acc: u128 = 0;
        for c in input.chars() {
            acc = acc << 5 | Self::digit(c)? as u128;
        }
        u64::try_from(acc).ok()
    }

    fn encode(mut value: u64) -> String {
        let mut out = [b'0'; 13];
        for slot in out.iter_mut().rev() {
            *slot = CROCKFORD[(value & 0x1f) as usize];
            value >>= 5;
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl IdParser for TsidParser {
    fn name(&self) -> &'static str {
        "TSID"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 13 && Self::decode(input).is_some()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if input.len() != 13 {
            return Err(IdError::decode("invalid TSID format"));
        }
        let number =
            Self::decode(input).ok_or_else(|| IdError::decode("invalid TSID format"))?;

        // 42-bit millisecond offset from the TSID epoch | 22-bit random
        let ms = (number >> 22) as i64 + TSID_EPOCH_MS;
        let random = number & 0x3f_ffff;

        let mut info = IdInfo::new("TSID (Time-Sorted Unique Identifier)", input.to_uppercase(), 64)
            .with_bytes(number.to_be_bytes().to_vec())
            .with_entropy(22)
            .with_node(random.to_string())
            .with_extra("encoding", "Crockford Base32")
            .with_extra("length", "13 characters")
            .with_extra("timestamp_precision", "millisecond")
            .with_extra("epoch", "2020-01-01T00:00:00Z (default)")
            .with_extra("sortable", "Yes (by generation time)")
            .with_extra("structure", "42-bit timestamp + 22-bit random")
            .with_extra("timestamp_bits", "42")
            .with_extra("random_bits", "22")
            .with_extra("random_value", random.to_string())
            .with_extra("time_component", (number >> 22).to_string())
            .with_extra("url_safe", "Yes")
            .with_extra("case_insensitive", "Yes")
            .with_extra("collision_resistant", "Up to 4M IDs per millisecond")
            .with_extra("storage_efficiency", "64-bit integer or 13-char string");

        if let Some(dt) = DateTime::from_timestamp_millis(ms) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let ms = (Utc::now().timestamp_millis() - TSID_EPOCH_MS) as u64;
        let random: u64 = rand::thread_rng().gen_range(0..1 << 22);
        Ok(Self::encode(ms << 22 | random))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_round_trips() {
        let p = TsidParser;
        let id = p.generate().unwrap();
        assert_eq!(id.len(), 13);
        let info = p.parse(&id).unwrap();
        assert_eq!(info.size_bits, 64);
        let age = (Utc::now() - info.timestamp.unwrap()).num_milliseconds().abs();
        assert!(age < 2000);
    }

    #[test]
    fn folds_ambiguous_characters() {
        assert_eq!(TsidParser::digit('O'), Some(0));
        assert_eq!(TsidParser::digit('i'), Some(1));
        assert_eq!(TsidParser::digit('l'), Some(1));
    }

    #[test]
    fn rejects_wrong_length_and_overflow() {
        let p = TsidParser;
        assert!(!p.can_parse("0123456789AB"));
        assert!(!p.can_parse("ZZZZZZZZZZZZZ")); // exceeds 64 bits
        assert!(!p.can_parse("0123456789ABU")); // U not in alphabet
    }

    #[test]
    fn canonical_form_is_uppercase() {
        let p = TsidParser;
        let id = p.generate().unwrap().to_lowercase();
        let info = p.parse(&id).unwrap();
        assert_eq!(info.canonical_string, id.to_uppercase());
    }

    #[test]
    fn generated_ids_sort_by_time() {
        let p = TsidParser;
        let a = p.generate().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = p.generate().unwrap();
        let ta = p.parse(&a).unwrap().timestamp.unwrap();
        let tb = p.parse(&b).unwrap().timestamp.unwrap();
        assert!(ta < tb);
        assert!(a < b);
    }
}
