//! UUID (RFC-9562) parser, all versions.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::DateTime;
use rand::Rng;
use uuid::{Uuid, Variant};

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

pub struct UuidParser;

impl IdParser for UuidParser {
    fn name(&self) -> &'static str {
        "UUID"
    }

    fn can_parse(&self, input: &str) -> bool {
        let cleaned: String = input.chars().filter(|&c| c != '-').collect();
        if cleaned.len() != 32 || !cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
        Uuid::parse_str(input).is_ok()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        let u = Uuid::parse_str(input).map_err(|e| IdError::decode(e.to_string()))?;
        let bytes = u.as_bytes().to_vec();

        let mut info = IdInfo::new("UUID (RFC-9562)", u.to_string(), 128)
            .with_bytes(bytes.clone())
            .with_extra("base64", BASE64.encode(&bytes));

        info = match u.get_version_num() {
            1 => {
                let mut v = info.with_version("1 (timestamp and MAC address)").with_entropy(14);
                if let Some(ts) = u.get_timestamp() {
                    let (secs, nanos) = ts.to_unix();
                    if let Some(dt) = DateTime::from_timestamp(secs as i64, nanos) {
                        v = v.with_timestamp(dt);
                    }
                    v = v.with_sequence(ts.to_gregorian().1 as i64);
                }
                v.with_node(crate::model::hex_string(&bytes[10..16]))
            }
            2 => info.with_version("2 (DCE security)").with_entropy(62),
            3 => info
                .with_version("3 (namespace name based with MD5)")
                .with_entropy(122),
            4 => info.with_version("4 (random)").with_entropy(122),
            5 => info
                .with_version("5 (namespace name based with SHA-1)")
                .with_entropy(122),
            6 => info
                .with_version("6 (reordered timestamp and MAC address)")
                .with_entropy(14),
            7 => {
                let mut v = info
                    .with_version("7 (sortable timestamp and random)")
                    .with_entropy(74);
                // First 48 bits are a millisecond Unix timestamp
                let ms = bytes[..6].iter().fold(0u64, |acc, &b| acc << 8 | b as u64);
                if let Some(dt) = DateTime::from_timestamp_millis(ms as i64) {
                    v = v.with_timestamp(dt);
                }
                v
            }
            8 => info.with_version("8 (custom)").with_entropy(122),
            v => {
                let label = if u.is_nil() {
                    "Nil UUID".to_string()
                } else if u.is_max() {
                    "Max UUID".to_string()
                } else {
                    format!("Unknown version {v}")
                };
                info.with_version(label)
            }
        };

        let variant = match u.get_variant() {
            Variant::NCS => "NCS (Network Computing System)",
            Variant::RFC4122 => "RFC 4122",
            Variant::Microsoft => "Microsoft GUID",
            Variant::Future => "Future",
            _ => "Unknown",
        };
        Ok(info.with_extra("variant", variant))
    }

    fn generate(&self) -> Result<String, IdError> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Generate a UUID of a specific version, for the `uuid:vN` generate selector.
///
/// v3/v5 hash a fixed name under the DNS namespace, so their output is
/// deterministic by design.
pub fn generate_with_version(version: &str) -> Result<String, IdError> {
    let u = match version {
        "v1" => Uuid::now_v1(&random_node()),
        "v3" => Uuid::new_v3(&Uuid::NAMESPACE_DNS, b"idprobe-generated"),
        "v4" => Uuid::new_v4(),
        "v5" => Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"idprobe-generated"),
        "v6" => Uuid::now_v6(&random_node()),
        "v7" => Uuid::now_v7(),
        other => {
            return Err(IdError::generation(format!(
                "unsupported UUID version '{other}' (expected v1, v3, v4, v5, v6, or v7)"
            )))
        }
    };
    Ok(u.to_string())
}

fn random_node() -> [u8; 6] {
    let mut node = [0u8; 6];
    rand::thread_rng().fill(&mut node[..]);
    // Multicast bit marks the node id as not a real MAC
    node[0] |= 0x01;
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn parses_v4_sample() {
        let p = UuidParser;
        assert!(p.can_parse(SAMPLE));
        let info = p.parse(SAMPLE).unwrap();
        assert_eq!(info.size_bits, 128);
        assert_eq!(info.version.as_deref(), Some("4 (random)"));
        assert_eq!(info.entropy_bits, Some(122));
        assert_eq!(info.canonical_string, SAMPLE);
        assert_eq!(
            info.integer_value.as_deref(),
            Some("113059749145936325402354257176981405696")
        );
        assert_eq!(info.extra_attributes["variant"], "RFC 4122");
    }

    #[test]
    fn parses_v1_sample_with_clock_sequence() {
        // RFC 9562 appendix vector: 2022-02-22T19:22:22Z, clock seq 0x33c8
        let p = UuidParser;
        let info = p.parse("c232ab00-9414-11ec-b3c8-9f6bdeced846").unwrap();
        assert_eq!(info.version.as_deref(), Some("1 (timestamp and MAC address)"));
        assert_eq!(info.timestamp.unwrap().timestamp(), 1_645_557_742);
        assert_eq!(info.sequence, Some(0x33c8));
        assert_eq!(info.node_fields, vec!["9f6bdeced846".to_string()]);
    }

    #[test]
    fn parses_unhyphenated_form() {
        let p = UuidParser;
        assert!(p.can_parse("550e8400e29b41d4a716446655440000"));
    }

    #[test]
    fn rejects_wrong_length_and_alphabet() {
        let p = UuidParser;
        assert!(!p.can_parse("550e8400-e29b-41d4-a716"));
        assert!(!p.can_parse("zzze8400-e29b-41d4-a716-446655440000"));
        assert!(!p.can_parse("has@sign"));
    }

    #[test]
    fn v7_carries_timestamp() {
        let p = UuidParser;
        let id = generate_with_version("v7").unwrap();
        let info = p.parse(&id).unwrap();
        assert_eq!(info.version.as_deref(), Some("7 (sortable timestamp and random)"));
        assert!(info.timestamp.is_some());
    }

    #[test]
    fn v5_is_deterministic() {
        assert_eq!(
            generate_with_version("v5").unwrap(),
            generate_with_version("v5").unwrap()
        );
    }

    #[test]
    fn generate_round_trips() {
        let p = UuidParser;
        let id = p.generate().unwrap();
        let info = p.parse(&id).unwrap();
        assert!(p.can_parse(&info.canonical_string));
    }
}
