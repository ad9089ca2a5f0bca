//! Terminal renderers for decoded identifiers.
//!
//! Everything renders to a `String` so the CLI layer decides where it goes
//! and tests can assert on exact output. The colored variant uses raw ANSI
//! sequences gated by a single flag; `--no-color` and non-tty stdout turn
//! them off upstream.

use crate::model::IdInfo;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

const VALUE_WIDTH: usize = 43;

const TOP: &str = "┏━━━━━━━━━━━┯━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓";
const MID: &str = "┠───────────┼─────────────────────────────────────────────┨";
const BOTTOM: &str = "┗━━━━━━━━━━━┷━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛";

const RESET: &str = "\x1b[0m";
const BOLD_WHITE: &str = "\x1b[1;37m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[90m";

/// ANSI palette for one render pass. `plain()` keeps every code empty so the
/// same row-building code serves both variants.
struct Palette {
    label: &'static str,
    value: &'static str,
    binary: &'static str,
    border: &'static str,
    hex: &'static str,
    dim: &'static str,
    reset: &'static str,
}

impl Palette {
    fn plain() -> Self {
        Palette {
            label: "",
            value: "",
            binary: "",
            border: "",
            hex: "",
            dim: "",
            reset: "",
        }
    }

    fn colored() -> Self {
        Palette {
            label: BOLD_WHITE,
            value: GREEN,
            binary: YELLOW,
            border: BLUE,
            hex: CYAN,
            dim: DIM,
            reset: RESET,
        }
    }

    fn for_mode(color: bool) -> Self {
        if color {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

/// Box-drawing card with the identifier's decoded fields, one per row.
pub fn render_card(info: &IdInfo, color: bool) -> String {
    let p = Palette::for_mode(color);
    let mut out = String::new();

    let _ = writeln!(out, "{}{TOP}{}", p.border, p.reset);
    row(&mut out, &p, "ID Type", &info.format_name, p.value);
    if let Some(version) = &info.version {
        row(&mut out, &p, "Version", version, p.value);
    }

    let _ = writeln!(out, "{}{MID}{}", p.border, p.reset);
    row(&mut out, &p, "String", &info.canonical_string, p.value);
    if let Some(integer) = &info.integer_value {
        row(&mut out, &p, "Integer", &truncate(integer), p.value);
    }
    if let Some(uuid) = info.extra_attributes.get("original_uuid") {
        row(&mut out, &p, "UUID", uuid, p.value);
    }
    if let Some(b64) = info.extra_attributes.get("base64") {
        row(&mut out, &p, "Base64", b64, p.value);
    }

    let _ = writeln!(out, "{}{MID}{}", p.border, p.reset);
    row(&mut out, &p, "Size", &format!("{} bits", info.size_bits), p.value);
    if let Some(entropy) = info.entropy_bits {
        row(&mut out, &p, "Entropy", &format!("{entropy} bits"), p.value);
    }
    if let Some(ts) = info.timestamp {
        let rfc = ts.to_rfc3339_opts(SecondsFormat::Secs, true);
        let rendered = match &info.timestamp_value {
            Some(raw) => format!("{raw} ({rfc})"),
            None => rfc,
        };
        row(&mut out, &p, "Timestamp", &truncate(&rendered), p.value);
    }
    for slot in 0..2 {
        let label = if slot == 0 { "Node 1" } else { "Node 2" };
        match info.node_fields.get(slot) {
            Some(node) => row(&mut out, &p, label, node, p.value),
            None => row(&mut out, &p, label, "-", p.dim),
        }
    }
    match info.sequence {
        Some(seq) => row(&mut out, &p, "Sequence", &seq.to_string(), p.value),
        None => row(&mut out, &p, "Sequence", "-", p.dim),
    }

    let _ = writeln!(out, "{}{MID}{}", p.border, p.reset);
    for group in hex_groups(&info.hex_representation) {
        let bits = nibble_bits(&group);
        let _ = writeln!(
            out,
            "{b}┃ {r}{h}{group:<9}{r} {b}│ {r}{y}{bits:<VALUE_WIDTH$}{r} {b}┃{r}",
            b = p.border,
            h = p.hex,
            y = p.binary,
            r = p.reset,
        );
    }
    let _ = writeln!(out, "{}{BOTTOM}{}", p.border, p.reset);
    out
}

fn row(out: &mut String, p: &Palette, label: &str, value: &str, value_style: &str) {
    let _ = writeln!(
        out,
        "{b}┃ {r}{l}{label:<9}{r} {b}│ {r}{v}{value:<VALUE_WIDTH$}{r} {b}┃{r}",
        b = p.border,
        l = p.label,
        v = value_style,
        r = p.reset,
    );
}

fn truncate(value: &str) -> String {
    if value.len() > VALUE_WIDTH {
        format!("{}...", &value[..40])
    } else {
        value.to_string()
    }
}

/// Hex split into 8-digit rows, each rendered as two 4-digit halves.
fn hex_groups(hex: &str) -> Vec<String> {
    hex.as_bytes()
        .chunks(8)
        .map(|chunk| {
            chunk
                .chunks(4)
                .map(|sub| String::from_utf8_lossy(sub).into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Per-nibble binary rendering of one hex row ("dead" -> "1101 1110 ...").
fn nibble_bits(group: &str) -> String {
    group
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|v| format!("{v:04b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line summary, e.g. `ID Type: UUID (RFC-9562), version: 4 (random).`
pub fn render_short(info: &IdInfo) -> String {
    match &info.version {
        Some(version) => format!("ID Type: {}, version: {}.\n", info.format_name, version),
        None => format!("ID Type: {}.\n", info.format_name),
    }
}

/// Every successful parse, each under a numbered header.
pub fn render_everything(results: &[IdInfo], color: bool) -> String {
    let mut out = format!(
        "Successfully parsed as {} different formats:\n\n",
        results.len()
    );
    for (i, info) in results.iter().enumerate() {
        let _ = writeln!(out, "=== Format {}: {} ===", i + 1, info.format_name);
        out.push_str(&render_card(info, color));
        out.push('\n');
    }
    out
}

/// Embedded timestamps from every match, sorted ascending.
pub fn render_compare(results: &[IdInfo]) -> String {
    compare_at(results, Utc::now())
}

fn compare_at(results: &[IdInfo], now: DateTime<Utc>) -> String {
    let mut stamps: Vec<(&str, DateTime<Utc>)> = results
        .iter()
        .filter_map(|info| info.timestamp.map(|ts| (info.format_name.as_str(), ts)))
        .collect();
    stamps.sort_by_key(|&(_, ts)| ts);

    let mut out = String::from("Date/times of the valid IDs parsed as:\n");
    for (format, ts) in stamps {
        let suffix = if (now - ts).num_seconds().abs() < 60 {
            " --- Now ---"
        } else if ts > now {
            " (future)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "- {} {format}{suffix}",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> IdInfo {
        IdInfo::new("Test Format", "abcd1234", 32)
            .with_bytes(vec![0xab, 0xcd, 0x12, 0x34])
            .with_version("1")
            .with_entropy(16)
    }

    #[test]
    fn card_has_borders_and_required_rows() {
        let card = render_card(&sample(), false);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines.first(), Some(&TOP));
        assert_eq!(lines.last(), Some(&BOTTOM));
        assert!(card.contains("┃ ID Type   │ Test Format"));
        assert!(card.contains("┃ Version   │ 1"));
        assert!(card.contains("┃ Size      │ 32 bits"));
        assert!(card.contains("┃ Entropy   │ 16 bits"));
        assert!(card.contains("┃ Node 1    │ -"));
        assert!(card.contains("┃ Sequence  │ -"));
        assert!(!card.contains('\x1b'));
    }

    #[test]
    fn card_hex_rows_carry_nibble_binary() {
        let card = render_card(&sample(), false);
        assert!(card.contains("┃ abcd 1234 │ 1010 1011 1100 1101 0001 0010 0011 0100"));
    }

    #[test]
    fn colored_card_uses_ansi_and_resets() {
        let card = render_card(&sample(), true);
        assert!(card.contains(GREEN));
        assert!(card.contains(BLUE));
        assert!(card.ends_with(&format!("{BLUE}{BOTTOM}{RESET}\n")));
    }

    #[test]
    fn long_integer_is_truncated() {
        let long = "9".repeat(50);
        let info = IdInfo::new("Test", "x", 8).with_raw_bytes(vec![0]);
        let info = IdInfo {
            integer_value: Some(long),
            ..info
        };
        let card = render_card(&info, false);
        assert!(card.contains(&format!("{}...", "9".repeat(40))));
    }

    #[test]
    fn short_summary_with_and_without_version() {
        assert_eq!(
            render_short(&sample()),
            "ID Type: Test Format, version: 1.\n"
        );
        let no_version = IdInfo::new("Plain", "x", 8);
        assert_eq!(render_short(&no_version), "ID Type: Plain.\n");
    }

    #[test]
    fn everything_counts_and_numbers_results() {
        let out = render_everything(&[sample(), sample()], false);
        assert!(out.starts_with("Successfully parsed as 2 different formats:\n"));
        assert!(out.contains("=== Format 1: Test Format ==="));
        assert!(out.contains("=== Format 2: Test Format ==="));
    }

    #[test]
    fn compare_sorts_and_annotates_timestamps() {
        let now = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mk = |name: &str, secs: i64| {
            IdInfo::new(name, "x", 8)
                .with_timestamp(chrono::DateTime::from_timestamp(secs, 0).unwrap())
        };
        let results = vec![
            mk("Future", 1_700_000_500),
            mk("Old", 1_600_000_000),
            mk("Current", 1_700_000_010),
        ];
        let out = compare_at(&results, now);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Date/times of the valid IDs parsed as:");
        assert!(lines[1].contains("Old"));
        assert!(lines[2].contains("Current --- Now ---"));
        assert!(lines[3].contains("Future (future)"));
    }

    #[test]
    fn formats_without_timestamps_are_skipped_in_compare() {
        let out = compare_at(&[IdInfo::new("NoTs", "x", 8)], Utc::now());
        assert_eq!(out, "Date/times of the valid IDs parsed as:\n");
    }
}
