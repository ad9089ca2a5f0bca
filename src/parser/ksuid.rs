//! KSUID parser.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{baseconv, IdParser};
use crate::error::IdError;
use crate::model::IdInfo;

const BASE62: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Seconds between the Unix epoch and the KSUID epoch (2014-05-13T16:53:20Z).
const KSUID_EPOCH: i64 = 1_400_000_000;

pub struct KsuidParser;

impl IdParser for KsuidParser {
    fn name(&self) -> &'static str {
        "KSUID"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 27
            && input.bytes().all(|b| b.is_ascii_alphanumeric())
            && baseconv::decode_fixed(input, BASE62, 20).is_some()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if input.len() != 27 || !input.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(IdError::decode("invalid KSUID format"));
        }
        let bytes = baseconv::decode_fixed(input, BASE62, 20)
            .ok_or_else(|| IdError::decode("KSUID value exceeds 160 bits"))?;

        // 4-byte offset from the KSUID epoch, then a 16-byte random payload
        let offset = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64;

        let mut info = IdInfo::new("KSUID (K-Sortable Unique Identifier)", input, 160)
            .with_bytes(bytes)
            .with_entropy(128)
            .with_extra("encoding", "Base62")
            .with_extra("timestamp_precision", "second")
            .with_extra("epoch", "2014-05-13T16:53:20Z")
            .with_extra("sortable", "true")
            .with_extra("payload_bytes", "16");

        if let Some(dt) = DateTime::from_timestamp(KSUID_EPOCH + offset, 0) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; 20];
        let offset = (Utc::now().timestamp() - KSUID_EPOCH) as u32;
        bytes[..4].copy_from_slice(&offset.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..]);
        Ok(baseconv::encode_fixed(&bytes, BASE62, 27))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ksuid() {
        let p = KsuidParser;
        let input = "0ujtsYcgvSTl8PAuAdqWYSMnLOv";
        assert!(p.can_parse(input));
        let info = p.parse(input).unwrap();
        assert_eq!(info.size_bits, 160);
        assert_eq!(info.binary_bytes.len(), 20);
        assert_eq!(info.entropy_bits, Some(128));
        assert!(info.timestamp.unwrap().timestamp() >= KSUID_EPOCH);
    }

    #[test]
    fn rejects_wrong_length_and_alphabet() {
        let p = KsuidParser;
        assert!(!p.can_parse("0ujtsYcgvSTl8PAuAdqWYSMnLO"));
        assert!(!p.can_parse("0ujtsYcgvSTl8PAuAdqWYSMnL@v"));
    }

    #[test]
    fn rejects_overflow() {
        // All-'z' exceeds the 160-bit value range
        let p = KsuidParser;
        assert!(!p.can_parse(&"z".repeat(27)));
    }

    #[test]
    fn generate_round_trips_with_recent_timestamp() {
        let p = KsuidParser;
        let id = p.generate().unwrap();
        assert_eq!(id.len(), 27);
        let info = p.parse(&id).unwrap();
        let age = (Utc::now() - info.timestamp.unwrap()).num_seconds().abs();
        assert!(age < 5);
    }
}
