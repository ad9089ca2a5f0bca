//! Xid parser (rs/xid wire format).

use chrono::{DateTime, Utc};
use data_encoding::{Encoding, Specification};
use rand::Rng;
use std::sync::LazyLock;

use super::IdParser;
use crate::error::IdError;
use crate::model::{hex_string, IdInfo};

// Xid uses base32hex with a lowercase 0-9a-v alphabet and no padding.
static BASE32HEX: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str("0123456789abcdefghijklmnopqrstuv");
    spec.encoding().expect("valid base32hex spec")
});

pub struct XidParser;

impl IdParser for XidParser {
    fn name(&self) -> &'static str {
        "Xid"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.len() == 20
            && input.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'v').contains(&b))
            && BASE32HEX.decode(input.as_bytes()).is_ok()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if input.len() != 20 {
            return Err(IdError::decode("invalid Xid format"));
        }
        let bytes = BASE32HEX
            .decode(input.as_bytes())
            .map_err(|e| IdError::decode(e.to_string()))?;
        if bytes.len() != 12 {
            return Err(IdError::decode("invalid Xid length"));
        }

        // Layout: 4-byte seconds timestamp | 3-byte machine | 2-byte pid | 3-byte counter
        let secs = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64;
        let machine = hex_string(&bytes[4..7]);
        let process = hex_string(&bytes[7..9]);
        let counter =
            (bytes[9] as i64) << 16 | (bytes[10] as i64) << 8 | bytes[11] as i64;

        let mut info = IdInfo::new("Xid (globally unique sortable id)", input, 96)
            .with_bytes(bytes)
            .with_entropy(56)
            .with_node(machine.clone())
            .with_node(process.clone())
            .with_sequence(counter)
            .with_extra("encoding", "Base32 (hex alphabet)")
            .with_extra("timestamp_precision", "second")
            .with_extra("machine_bytes", machine)
            .with_extra("process_bytes", process)
            .with_extra("counter_value", counter.to_string())
            .with_extra("sortable", "true");

        if let Some(dt) = DateTime::from_timestamp(secs, 0) {
            info = info.with_timestamp(dt);
        }
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        let mut bytes = [0u8; 12];
        let secs = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..]);
        Ok(BASE32HEX.encode(&bytes))
    }
}
