//! ULID parser.

use chrono::DateTime;
use regex::Regex;
use std::sync::LazyLock;
use ulid::Ulid;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

static ULID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-7][0-9A-HJKMNP-TV-Z]{25}$").expect("valid regex"));

pub struct UlidParser;

impl IdParser for UlidParser {
    fn name(&self) -> &'static str {
        "ULID"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 26 && ULID_RE.is_match(input)
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        let u = Ulid::from_string(input).map_err(|e| IdError::decode(e.to_string()))?;

        let mut info = IdInfo::new(
            "ULID (Universally Unique Lexicographically Sortable Identifier)",
            u.to_string(),
            128,
        )
        .with_bytes(u.to_bytes().to_vec())
        .with_entropy(80)
        .with_extra("encoding", "Crockford Base32")
        .with_extra("timestamp_precision", "millisecond")
        .with_extra("sortable", "true");

        // First 48 bits are milliseconds since the Unix epoch
        if let Some(dt) = DateTime::from_timestamp_millis(u.timestamp_ms() as i64) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        Ok(Ulid::new().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ulid() {
        let p = UlidParser;
        let input = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
        assert!(p.can_parse(input));
        let info = p.parse(input).unwrap();
        assert_eq!(info.size_bits, 128);
        assert_eq!(info.entropy_bits, Some(80));
        assert!(info.timestamp.is_some());
        assert_eq!(info.binary_bytes.len(), 16);
    }

    #[test]
    fn rejects_wrong_length() {
        let p = UlidParser;
        assert!(!p.can_parse("01ARZ3NDEKTSV4RRFFQ69G5FA"));
        assert!(!p.can_parse("01ARZ3NDEKTSV4RRFFQ69G5FAVX"));
    }

    #[test]
    fn rejects_excluded_letters() {
        // I, L, O, U are not in the Crockford alphabet
        let p = UlidParser;
        assert!(!p.can_parse("01ARZ3NDEKTSV4RRFFQ69G5FIL"));
    }

    #[test]
    fn generated_ulids_sort_by_time() {
        let p = UlidParser;
        let a = p.generate().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = p.generate().unwrap();
        assert!(a < b);
        let ta = p.parse(&a).unwrap().timestamp.unwrap();
        let tb = p.parse(&b).unwrap().timestamp.unwrap();
        assert!(ta <= tb);
    }
}
