//! NanoID parser.

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

/// Default NanoID alphabet, in library index order.
const ALPHABET: &str = "_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub struct NanoIdParser;

/// Hyphen-grouped hex is a UUID, not a NanoID, even though every character
/// sits inside the NanoID alphabet.
fn is_uuid_shaped(input: &str) -> bool {
    input.len() == 36
        && input.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}

impl IdParser for NanoIdParser {
    fn name(&self) -> &'static str {
        "NanoID"
    }

    fn can_parse(&self, input: &str) -> bool {
        (6..=255).contains(&input.len())
            && input.chars().all(|c| ALPHABET.contains(c))
            && !is_uuid_shaped(input)
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !self.can_parse(input) {
            return Err(IdError::decode(format!("invalid NanoID format: {input}")));
        }

        // Approximate binary form: one alphabet index per character
        let bytes: Vec<u8> = input
            .chars()
            .map(|c| ALPHABET.find(c).unwrap_or(0) as u8)
            .collect();

        let entropy = (input.len() as f64 * 64f64.log2()).ceil() as u32;
        let mut info = IdInfo::new("Nano ID", input, input.len() * 8)
            .with_raw_bytes(bytes)
            .with_entropy(entropy)
            .with_extra("alphabet", ALPHABET)
            .with_extra("alphabet_size", "64")
            .with_extra("length", input.len().to_string())
            .with_extra("url_safe", "true")
            .with_extra("collision_resistant", "true")
            .with_extra("binary_approximation", "one alphabet index per character");

        if input.len() == 21 {
            info = info.with_extra("collision_probability", "~1% in 4 years (1 ID/hour)");
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        Ok(nanoid::nanoid!())
    }
}
