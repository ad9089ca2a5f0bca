//! Sqids parser (Hashids successor).

use sqids::Sqids;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

pub struct SqidsParser;

impl IdParser for SqidsParser {
    fn name(&self) -> &'static str {
        "Sqids"
    }

    fn can_parse(&self, input: &str) -> bool {
        !input.is_empty() && !Sqids::default().decode(input).is_empty()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        let sqids = Sqids::default();
        let numbers = sqids.decode(input);
        if numbers.is_empty() {
            return Err(IdError::decode("invalid Sqids format"));
        }

        let entropy = (input.len() as f64 * 62f64.log2()) as u32;
        let mut info = IdInfo::new("Sqids", input, input.len() * 6)
            .with_raw_bytes(input.as_bytes().to_vec())
            .with_entropy(entropy)
            .with_extra("alphabet", "URL-safe (no profanity)")
            .with_extra("numbers", format!("{numbers:?}"))
            .with_extra("reversible", "Yes (to number array)")
            .with_extra("format", "Sqids (Hashids successor)")
            .with_extra("anti_profanity", "Yes")
            .with_extra("url_safe", "Yes")
            .with_extra("binary_approximation", "one byte per character");

        // Re-encode to check whether the input is the canonical rendering
        match sqids.encode(&numbers) {
            Ok(canonical) => {
                let is_canonical = canonical == input;
                info = info
                    .with_extra("canonical", canonical)
                    .with_extra("is_canonical", if is_canonical { "Yes" } else { "No" });
            }
            Err(_) => {
                info = info
                    .with_extra("canonical", input)
                    .with_extra("is_canonical", "Yes");
            }
        }

        let max = numbers.iter().copied().max().unwrap_or(0);
        let range = if max < 1_000 {
            "Small (< 1K)"
        } else if max < 1_000_000 {
            "Medium (< 1M)"
        } else {
            "Large (>= 1M)"
        };
        Ok(info.with_extra("number_range", range))
    }

    fn generate(&self) -> Result<String, IdError> {
        // Fixed demo vector; Sqids encoding is a deterministic formula
        Sqids::default()
            .encode(&[42, 123, 7890])
            .map_err(|e| IdError::generation(e.to_string()))
    }
}
