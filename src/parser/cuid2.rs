//! CUID2 parser.

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

pub struct Cuid2Parser;

impl Cuid2Parser {
    /// CUID2 shape: 4-32 chars, lowercase base36, leading letter.
    fn is_cuid2_shaped(input: &str) -> bool {
        if input.len() < 4 || input.len() > 32 {
            return false;
        }
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    }
}

impl IdParser for Cuid2Parser {
    fn name(&self) -> &'static str {
        "CUID"
    }

    fn can_parse(&self, input: &str) -> bool {
        Self::is_cuid2_shaped(input)
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !Self::is_cuid2_shaped(input) {
            return Err(IdError::decode("invalid CUID format"));
        }

        // No binary layout exists; map each char to its base36 digit value.
        let bytes: Vec<u8> = input
            .bytes()
            .map(|b| if b.is_ascii_digit() { b - b'0' } else { b - b'a' + 10 })
            .collect();

        let entropy = (input.len() as f64 * 5.2) as u32;
        let info = IdInfo::new(
            "CUID v2 (Collision-resistant Unique Identifier)",
            input,
            input.len() * 6,
        )
        .with_raw_bytes(bytes)
        .with_entropy(entropy)
        .with_extra("version", "2")
        .with_extra("encoding", "Base36 (lowercase)")
        .with_extra("collision_resistant", "Yes")
        .with_extra("cryptographically_secure", "Yes")
        .with_extra("url_safe", "Yes")
        .with_extra("length", input.len().to_string())
        .with_extra("alphabet", ALPHABET)
        .with_extra("alphabet_size", "36")
        .with_extra("binary_approximation", "one base36 digit value per character");

        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        Ok(cuid2::create_id())
    }
}
