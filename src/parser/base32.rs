//! Base32 (RFC 4648) parser.

use data_encoding::{BASE32, BASE32_NOPAD};
use rand::Rng;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

pub struct Base32Parser;

impl Base32Parser {
    fn decode(upper: &str) -> Option<Vec<u8>> {
        BASE32
            .decode(upper.as_bytes())
            .or_else(|_| BASE32_NOPAD.decode(upper.trim_end_matches('=').as_bytes()))
            .ok()
    }
}

impl IdParser for Base32Parser {
    fn name(&self) -> &'static str {
        "Base32"
    }

    fn can_parse(&self, input: &str) -> bool {
        if input.len() < 8 || input.len() > 64 {
            return false;
        }
        let upper = input.to_uppercase();
        if !upper
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b) || b == b'=')
        {
            return false;
        }
        Self::decode(&upper).is_some()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        let upper = input.trim().to_uppercase();
        if !self.can_parse(&upper) {
            return Err(IdError::decode("invalid Base32 format"));
        }
        let decoded =
            Self::decode(&upper).ok_or_else(|| IdError::decode("failed to decode Base32"))?;

        let unpadded_len = upper.trim_end_matches('=').len();
        let mut info = IdInfo::new("Base32", upper.clone(), decoded.len() * 8)
            .with_entropy((unpadded_len * 5) as u32)
            .with_extra("alphabet", "Base32 (A-Z, 2-7)")
            .with_extra("decoded_size", format!("{} bytes", decoded.len()))
            .with_extra(
                "padding",
                format!("{} characters", upper.matches('=').count()),
            )
            .with_extra("encoding", "RFC 4648 Base32");

        let possible = match decoded.len() {
            16 => Some("128-bit identifier (UUID size)"),
            20 => Some("160-bit hash (SHA-1 size)"),
            32 => Some("256-bit hash (SHA-256 size)"),
            48 => Some("384-bit hash (SHA-384 size)"),
            64 => Some("512-bit hash (SHA-512 size)"),
            8..=12 => Some("Short identifier"),
            _ => None,
        };
        if let Some(p) = possible {
            info = info.with_extra("possible_type", p);
        }
        Ok(info.with_bytes(decoded))
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; 20];
        rand::thread_rng().fill(&mut bytes[..]);
        Ok(BASE32.encode(&bytes))
    }
}
