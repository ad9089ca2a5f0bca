//! Base58 (Bitcoin alphabet) parser.

use rand::Rng;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

pub struct Base58Parser;

const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

impl IdParser for Base58Parser {
    fn name(&self) -> &'static str {
        "Base58"
    }

    fn can_parse(&self, input: &str) -> bool {
        if input.len() < 8 || input.len() > 60 {
            return false;
        }
        if !input.chars().all(|c| ALPHABET.contains(c)) {
            return false;
        }
        // Heuristics against plain numbers and plain words
        let all_digits = input.bytes().all(|b| b.is_ascii_digit());
        if all_digits && input.len() < 15 {
            return false;
        }
        let all_letters = input.bytes().all(|b| b.is_ascii_alphabetic());
        if all_letters && input.len() < 10 {
            return false;
        }
        true
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !self.can_parse(input) {
            return Err(IdError::decode("invalid Base58 format"));
        }
        let decoded = bs58::decode(input)
            .into_vec()
            .map_err(|e| IdError::decode(e.to_string()))?;

        let entropy = (input.len() as f64 * 5.858) as u32;
        let mut info = IdInfo::new("Base58", input, decoded.len() * 8)
            .with_entropy(entropy)
            .with_extra("alphabet", "Base58 (Bitcoin style)")
            .with_extra("decoded_size", format!("{} bytes", decoded.len()))
            .with_extra("encoding", "Base58");

        if decoded.len() == 25 && decoded[0] == 0x00 {
            info = info.with_extra("possible_type", "Bitcoin P2PKH Address");
        } else if decoded.len() == 25 && decoded[0] == 0x05 {
            info = info.with_extra("possible_type", "Bitcoin P2SH Address");
        } else if decoded.len() >= 32 {
            info = info.with_extra("possible_type", "Hash or Key");
        }
        Ok(info.with_bytes(decoded))
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill(&mut bytes[..]);
        Ok(bs58::encode(&bytes).into_string())
    }
}
