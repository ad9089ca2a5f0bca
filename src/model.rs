//! Decoded identifier record shared by every format parser.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything a parser could extract from an identifier.
///
/// Created fresh per decode call and immutable after construction; parsers
/// fill in only the fields their format actually carries. Optional fields are
/// omitted from JSON output when absent.
#[derive(Debug, Clone, Serialize)]
pub struct IdInfo {
    /// Stable label of the matched format, e.g. "UUID (RFC-9562)".
    pub format_name: String,
    /// Sub-variant label, e.g. "4 (random)" for a UUIDv4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Normalized textual form as this format would render the input.
    pub canonical_string: String,
    /// Decimal big-integer value of the raw bytes, for fixed-width formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<String>,
    /// Total bit width of the decoded binary form.
    pub size_bits: usize,
    /// Estimated count of unpredictable bits (0 for deterministic formats).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entropy_bits: Option<u32>,
    /// Extracted point in time, if the format embeds one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Raw numeric rendering of the timestamp (seconds, three decimals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,
    /// Monotonic counter/step value, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,
    /// Generator identity fields (machine id, process id, shard id); 0-2 entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_fields: Vec<String>,
    /// Lowercase hex of the raw bytes.
    pub hex_representation: String,
    /// Raw byte sequence. For string-native formats this is a best-effort
    /// byte-per-character approximation, documented in extra_attributes.
    #[serde(skip)]
    pub binary_bytes: Vec<u8>,
    /// Open mapping of format-specific named facts.
    pub extra_attributes: BTreeMap<String, String>,
}

impl IdInfo {
    pub fn new(format_name: impl Into<String>, canonical: impl Into<String>, size_bits: usize) -> Self {
        Self {
            format_name: format_name.into(),
            version: None,
            canonical_string: canonical.into(),
            integer_value: None,
            size_bits,
            entropy_bits: None,
            timestamp: None,
            timestamp_value: None,
            sequence: None,
            node_fields: Vec::new(),
            hex_representation: String::new(),
            binary_bytes: Vec::new(),
            extra_attributes: BTreeMap::new(),
        }
    }

    /// Store the raw bytes along with their hex and big-integer renderings.
    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.hex_representation = hex_string(&bytes);
        self.integer_value = Some(BigUint::from_bytes_be(&bytes).to_str_radix(10));
        self.binary_bytes = bytes;
        self
    }

    /// Store raw bytes without deriving an integer value (string-native formats).
    pub fn with_raw_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.hex_representation = hex_string(&bytes);
        self.binary_bytes = bytes;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_entropy(mut self, bits: u32) -> Self {
        self.entropy_bits = Some(bits);
        self
    }

    /// Record an extracted timestamp plus its "seconds.millis" rendering.
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp_value = Some(format!("{:.3}", ts.timestamp_millis() as f64 / 1000.0));
        self.timestamp = Some(ts);
        self
    }

    pub fn with_sequence(mut self, seq: i64) -> Self {
        self.sequence = Some(seq);
        self
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node_fields.push(node.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attributes.insert(key.into(), value.into());
        self
    }
}

/// Lowercase hex rendering of a byte slice.
pub fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_derive_hex_and_integer() {
        let info = IdInfo::new("Test", "ff00", 16).with_bytes(vec![0xff, 0x00]);
        assert_eq!(info.hex_representation, "ff00");
        assert_eq!(info.integer_value.as_deref(), Some("65280"));
        assert_eq!(info.size_bits, 8 * info.binary_bytes.len());
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let info = IdInfo::new("Test", "x", 8);
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("version").is_none());
        assert!(json.get("timestamp").is_none());
        assert!(json.get("node_fields").is_none());
        assert!(json.get("extra_attributes").is_some());
    }

    #[test]
    fn timestamp_value_uses_millisecond_precision() {
        let ts = chrono::DateTime::from_timestamp(1609459200, 500_000_000).unwrap();
        let info = IdInfo::new("Test", "x", 8).with_timestamp(ts);
        assert_eq!(info.timestamp_value.as_deref(), Some("1609459200.500"));
    }
}
