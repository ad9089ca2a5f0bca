//! Hex-encoded hash parser.
//!
//! Classifies by length only; this is a heuristic label, not verification.

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

/// Hex length to probable algorithm.
const KNOWN_LENGTHS: &[(usize, &str)] = &[
    (32, "MD5"),
    (40, "SHA-1"),
    (56, "SHA-224"),
    (64, "SHA-256"),
    (96, "SHA-384"),
    (128, "SHA-512"),
];

pub struct HashHexParser;

impl IdParser for HashHexParser {
    fn name(&self) -> &'static str {
        "HashHex"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() >= 8
            && input.len() % 2 == 0
            && input.chars().all(|c| c.is_ascii_hexdigit())
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !self.can_parse(input) {
            return Err(IdError::decode("invalid hex string"));
        }
        let lower = input.to_lowercase();
        let bytes: Vec<u8> = (0..lower.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&lower[i..i + 2], 16))
            .collect::<Result<_, _>>()
            .map_err(|e| IdError::decode(e.to_string()))?;

        let known = KNOWN_LENGTHS
            .iter()
            .find(|(len, _)| *len == lower.len())
            .map(|(_, name)| *name);
        let hash_type = known
            .map(str::to_string)
            .unwrap_or_else(|| format!("Hash ({} bits)", bytes.len() * 8));

        let mut info = IdInfo::new(
            format!("Hex-encoded {hash_type}"),
            lower.to_uppercase(),
            bytes.len() * 8,
        )
        .with_entropy((bytes.len() * 8) as u32)
        .with_bytes(bytes.clone())
        .with_extra("encoding", "hexadecimal")
        .with_extra("byte_length", bytes.len().to_string())
        .with_extra("deterministic", "depends on hash function");

        if let Some(algo) = known {
            info = info.with_extra("probable_algorithm", algo);
            let (strength, recommended) = match algo {
                "MD5" => ("broken (collisions found)", "checksums only"),
                "SHA-1" => ("weak (collisions found)", "deprecated for security"),
                "SHA-224" | "SHA-256" => ("strong", "cryptographic applications"),
                _ => ("very strong", "high-security applications"),
            };
            info = info
                .with_extra("cryptographic_strength", strength)
                .with_extra("recommended_use", recommended);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        // Deterministic demo pattern, not a real digest
        let bytes: Vec<u8> = (0..32u32).map(|i| (i * 7 % 256) as u8).collect();
        Ok(crate::model::hex_string(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sha256_by_length() {
        let p = HashHexParser;
        let input = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert!(p.can_parse(input));
        let info = p.parse(input).unwrap();
        assert_eq!(info.format_name, "Hex-encoded SHA-256");
        assert_eq!(info.size_bits, 256);
        assert_eq!(info.extra_attributes["probable_algorithm"], "SHA-256");
    }

    #[test]
    fn unknown_lengths_get_generic_label() {
        let p = HashHexParser;
        let info = p.parse(&"ab".repeat(9)).unwrap();
        assert_eq!(info.format_name, "Hex-encoded Hash (72 bits)");
        assert!(!info.extra_attributes.contains_key("probable_algorithm"));
    }

    #[test]
    fn rejects_odd_and_short_input() {
        let p = HashHexParser;
        assert!(!p.can_parse("abcdef1")); // too short
        assert!(!p.can_parse("abcdef123")); // odd length
        assert!(!p.can_parse("xyzxyzxy"));
    }

    #[test]
    fn generate_is_deterministic_and_round_trips() {
        let p = HashHexParser;
        let a = p.generate().unwrap();
        assert_eq!(a, p.generate().unwrap());
        assert_eq!(p.parse(&a).unwrap().size_bits, 256);
    }
}
