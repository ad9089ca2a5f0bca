//! TypeID parser (type prefix + Crockford-encoded UUID suffix).

use ulid::Ulid;
use uuid::Uuid;

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

pub struct TypeIdParser;

impl TypeIdParser {
    /// Split into (prefix, suffix) and validate both halves structurally.
    fn split(input: &str) -> Option<(&str, &str)> {
        let sep = input.rfind('_')?;
        let (prefix, suffix) = (&input[..sep], &input[sep + 1..]);
        if prefix.is_empty()
            || !prefix.chars().all(|c| c.is_ascii_lowercase() || c == '_')
            || prefix.starts_with('_')
            || prefix.ends_with('_')
        {
            return None;
        }
        if suffix.len() != 26
            || !suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            || !('0'..='7').contains(&suffix.chars().next()?)
        {
            return None;
        }
        Some((prefix, suffix))
    }

    fn decode_suffix(suffix: &str) -> Option<Uuid> {
        // The suffix is the same Crockford base32 that ULID uses
        let ulid = Ulid::from_string(&suffix.to_uppercase()).ok()?;
        Some(Uuid::from_bytes(ulid.to_bytes()))
    }
}

const COMMON_PREFIXES: &[(&str, &str)] = &[
    ("user", "User Account"),
    ("org", "Organization"),
    ("post", "Post/Article"),
    ("comment", "Comment"),
    ("product", "Product"),
    ("order", "Order"),
    ("payment", "Payment"),
    ("invoice", "Invoice"),
    ("session", "Session"),
    ("token", "Token"),
    ("file", "File Upload"),
    ("event", "Event"),
    ("task", "Task"),
    ("project", "Project"),
    ("customer", "Customer"),
    ("account", "Account"),
    ("document", "Document"),
    ("message", "Message"),
];

impl IdParser for TypeIdParser {
    fn name(&self) -> &'static str {
        "TypeID"
    }

    fn can_parse(&self, input: &str) -> bool {
        if input.len() < 27 {
            return false;
        }
        match Self::split(input) {
            Some((_, suffix)) => Self::decode_suffix(suffix).is_some(),
            None => false,
        }
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        let (prefix, suffix) =
            Self::split(input).ok_or_else(|| IdError::decode("invalid TypeID format"))?;
        let uuid = Self::decode_suffix(suffix)
            .ok_or_else(|| IdError::decode("invalid TypeID suffix"))?;

        let mut info = IdInfo::new("TypeID", input, 128)
            .with_bytes(uuid.as_bytes().to_vec())
            .with_entropy(128)
            .with_extra("type_prefix", prefix)
            .with_extra("suffix", suffix)
            .with_extra("uuid", uuid.to_string())
            .with_extra("format", "TypeID (type prefix + ULID)")
            .with_extra("specification", "https://github.com/jetify-com/typeid")
            .with_extra("alphabet", "Crockford Base32")
            .with_extra("sortable", "Yes (chronologically sortable)")
            .with_extra("url_safe", "Yes");

        // A v7 suffix carries a real millisecond timestamp in its top 48 bits
        if uuid.get_version_num() == 7 {
            let b = uuid.as_bytes();
            let ms = b[..6].iter().fold(0u64, |acc, &x| acc << 8 | x as u64);
            info = info.with_extra("timestamp_ms", ms.to_string());
            if let Some(dt) = chrono::DateTime::from_timestamp_millis(ms as i64) {
                info = info.with_timestamp(dt);
            }
        } else {
            info = info.with_extra("timestamp_ms", "N/A");
        }

        if let Some((_, desc)) = COMMON_PREFIXES.iter().find(|(p, _)| *p == prefix) {
            info = info.with_extra("type_description", *desc);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let uuid = Uuid::now_v7();
        let suffix = Ulid::from_bytes(*uuid.as_bytes()).to_string().to_lowercase();
        Ok(format!("demo_{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_round_trips() {
        let p = TypeIdParser;
        let id = p.generate().unwrap();
        assert!(id.starts_with("demo_"));
        assert!(p.can_parse(&id));
        let info = p.parse(&id).unwrap();
        assert_eq!(info.extra_attributes["type_prefix"], "demo");
        assert!(info.timestamp.is_some());
    }

    #[test]
    fn known_prefix_gets_description() {
        let p = TypeIdParser;
        let id = p.generate().unwrap();
        let user_id = format!("user_{}", &id[5..]);
        let info = p.parse(&user_id).unwrap();
        assert_eq!(info.extra_attributes["type_description"], "User Account");
    }

    #[test]
    fn rejects_missing_or_empty_prefix() {
        let p = TypeIdParser;
        assert!(!p.can_parse("01h455vb4pex5vsknk084sn02q"));
        assert!(!p.can_parse("_01h455vb4pex5vsknk084sn02q"));
    }

    #[test]
    fn rejects_bad_suffix() {
        let p = TypeIdParser;
        // First suffix char must be 0-7
        assert!(!p.can_parse("user_81h455vb4pex5vsknk084sn02q"));
        // Uppercase suffix is not canonical
        assert!(!p.can_parse("user_01H455VB4PEX5VSKNK084SN02Q"));
        assert!(!p.can_parse("user_01h455vb4p"));
    }
}
