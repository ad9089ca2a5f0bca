//! Unix timestamp parser with unit disambiguation.

use chrono::{DateTime, Datelike, Utc};

use super::IdParser;
use crate::error::IdError;
use crate::model::IdInfo;

pub struct UnixTimeParser;

impl IdParser for UnixTimeParser {
    fn name(&self) -> &'static str {
        "UnixTime"
    }

    fn can_parse(&self, input: &str) -> bool {
        if input == "0" {
            return true;
        }
        (10..=19).contains(&input.len())
            && input.bytes().all(|b| b.is_ascii_digit())
            && input.parse::<u64>().is_ok()
    }

    fn parse(&self, input: &str) -> Result<IdInfo, IdError> {
        if !self.can_parse(input) {
            return Err(IdError::decode("invalid Unix timestamp"));
        }
        let raw: u64 = input.parse().map_err(|_| IdError::decode("not a 64-bit integer"))?;
        // Values above i64::MAX would wrap negative; mask the sign bit so the
        // unit interpretations below still see a usable magnitude
        let value = (raw & 0x7fff_ffff_ffff_ffff) as i64;

        // Try seconds, milliseconds, microseconds, nanoseconds; keep the
        // interpretation landing in [1970, 2100] closest to now. This
        // heuristic is a fixed policy, kept for compatibility.
        let candidates: [(Option<DateTime<Utc>>, &str, &str); 4] = [
            (DateTime::from_timestamp(value, 0), "seconds", "second"),
            (DateTime::from_timestamp_millis(value), "milliseconds", "millisecond"),
            (DateTime::from_timestamp_micros(value), "microseconds", "microsecond"),
            (Some(DateTime::from_timestamp_nanos(value)), "nanoseconds", "nanosecond"),
        ];

        let now = Utc::now().timestamp();
        let mut best: Option<(DateTime<Utc>, &str, &str)> = None;
        let mut min_diff = i64::MAX;
        for (dt, unit, precision) in candidates {
            let Some(dt) = dt else { continue };
            if !(1970..=2100).contains(&dt.year()) {
                continue;
            }
            let diff = (dt.timestamp() - now).abs();
            if diff < min_diff {
                min_diff = diff;
                best = Some((dt, unit, precision));
            }
        }
        // Default to seconds when nothing lands in range; a value chrono
        // cannot represent as a date gets no timestamp at all
        let chosen = best.or_else(|| {
            DateTime::from_timestamp(value, 0).map(|dt| (dt, "seconds", "second"))
        });
        let (unit, precision) = chosen
            .map(|(_, unit, precision)| (unit, precision))
            .unwrap_or(("seconds", "second"));

        let mut info = IdInfo::new(format!("Unix timestamp ({unit})"), input, 64)
            .with_bytes(raw.to_be_bytes().to_vec())
            .with_entropy(0)
            .with_extra("unit", unit)
            .with_extra("precision", precision)
            .with_extra("epoch", "1970-01-01T00:00:00Z")
            .with_extra("deterministic", "true");
        if let Some((dt, _, _)) = chosen {
            info = info.with_timestamp(dt);
        }
        info.integer_value = Some(input.to_string());
        Ok(info)
    }

    fn generate(&self) -> Result<String, IdError> {
        Ok(Utc::now().timestamp().to_string())
    }
}
