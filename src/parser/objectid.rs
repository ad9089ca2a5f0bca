//! MongoDB ObjectId parser.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::IdParser;
use crate::error::IdError;
use crate::model::{hex_string, IdInfo};

pub struct ObjectIdParser;

impl IdParser for ObjectIdParser {
    fn name(&self) -> &'static str {
        "ObjectID"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 24 && input.chars().all(|c| c.is_ascii_hexdigit())
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !self.can_parse(input) {
            return Err(IdError::decode("invalid ObjectId format"));
        }
        let bytes = decode_hex(input).ok_or_else(|| IdError::decode("invalid hex"))?;

        // Layout: 4-byte seconds timestamp | 3-byte machine | 2-byte pid | 3-byte counter
        let secs = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64;
        let machine = hex_string(&bytes[4..7]);
        let process = hex_string(&bytes[7..9]);
        let counter =
            (bytes[9] as i64) << 16 | (bytes[10] as i64) << 8 | bytes[11] as i64;

        let mut info = IdInfo::new("MongoDB ObjectId", input.to_lowercase(), 96)
            .with_bytes(bytes)
            .with_entropy(40)
            .with_node(machine.clone())
            .with_node(process.clone())
            .with_sequence(counter)
            .with_extra("timestamp_precision", "second")
            .with_extra("machine_bytes", machine)
            .with_extra("process_bytes", process)
            .with_extra("counter_value", counter.to_string());

        if let Some(dt) = DateTime::from_timestamp(secs, 0) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; 12];
        let secs = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..]);
        Ok(hex_string(&bytes))
    }
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn parses_known_objectid() {
        let p = ObjectIdParser;
        assert!(p.can_parse(SAMPLE));
        let info = p.parse(SAMPLE).unwrap();
        assert_eq!(info.size_bits, 96);
        assert_eq!(info.node_fields.len(), 2);
        assert!(info.sequence.is_some());
        // 0x507f1f77 = 1350508407 seconds
        assert_eq!(info.timestamp.unwrap().timestamp(), 1350508407);
    }

    #[test]
    fn rejects_non_hex_and_wrong_length() {
        let p = ObjectIdParser;
        assert!(!p.can_parse("507f1f77bcf86cd79943901"));
        assert!(!p.can_parse("507f1f77bcf86cd79943901g"));
    }

    #[test]
    fn generate_round_trips() {
        let p = ObjectIdParser;
        let id = p.generate().unwrap();
        assert_eq!(id.len(), 24);
        let info = p.parse(&id).unwrap();
        assert_eq!(info.binary_bytes.len(), 12);
    }
}
