//! ShortUUID parser (base57-compressed UUID).

use uuid::Uuid;

use super::{baseconv, IdParser};
use crate::error::IdError;
use crate::model::IdInfo;

/// The 57-character alphabet: ambiguous 0, O, 1, I, l removed.
const BASE57: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub struct ShortUuidParser;

impl ShortUuidParser {
    fn decode(input: &str) -> Option<Uuid> {
        let bytes = baseconv::decode_fixed(input, BASE57, 16)?;
        let mut raw = [0u8; 16];
        raw.copy_from_slice(&bytes);
        Some(Uuid::from_bytes(raw))
    }
}

impl IdParser for ShortUuidParser {
    fn name(&self) -> &'static str {
        "ShortUUID"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 22 && Self::decode(input).is_some()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if input.len() != 22 {
            return Err(IdError::decode("invalid ShortUUID format"));
        }
        let uuid =
            Self::decode(input).ok_or_else(|| IdError::decode("invalid ShortUUID format"))?;

        let info = IdInfo::new("ShortUUID", input, 128)
            .with_bytes(uuid.as_bytes().to_vec())
            .with_entropy(122)
            .with_extra("alphabet", "Base57 (no ambiguous chars)")
            .with_extra("length", "22 characters")
            .with_extra("format", "Shortened UUID representation")
            .with_extra("reversible", "Yes (to UUID)")
            .with_extra("original_uuid", uuid.to_string())
            .with_extra("specification", "https://github.com/lithammer/shortuuid")
            .with_extra("url_safe", "Yes")
            .with_extra("case_sensitive", "Yes");

        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let uuid = Uuid::new_v4();
        Ok(baseconv::encode_fixed(uuid.as_bytes(), BASE57, 22))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_round_trips_to_same_uuid() {
        let p = ShortUuidParser;
        let id = p.generate().unwrap();
        assert_eq!(id.len(), 22);
        assert!(p.can_parse(&id));
        let info = p.parse(&id).unwrap();
        assert_eq!(info.size_bits, 128);
        assert_eq!(info.binary_bytes.len(), 16);
        // Re-encoding the embedded UUID reproduces the input
        let uuid = Uuid::parse_str(&info.extra_attributes["original_uuid"]).unwrap();
        assert_eq!(baseconv::encode_fixed(uuid.as_bytes(), BASE57, 22), id);
    }

    #[test]
    fn rejects_ambiguous_characters() {
        let p = ShortUuidParser;
        assert!(!p.can_parse("0BCDEFGHJKLMNPQRSTUVWX")); // '0' not in alphabet
        assert!(!p.can_parse("lBCDEFGHJKLMNPQRSTUVWX")); // 'l' not in alphabet
    }

    #[test]
    fn rejects_wrong_length() {
        let p = ShortUuidParser;
        assert!(!p.can_parse("BCDEFGHJKLMNPQRSTUVWX"));
    }

    #[test]
    fn consecutive_generations_differ() {
        let p = ShortUuidParser;
        assert_ne!(p.generate().unwrap(), p.generate().unwrap());
    }
}
