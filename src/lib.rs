//! idprobe - identifier inspection library
//!
//! Detects which unique-ID format a string belongs to (UUID, ULID, KSUID,
//! Snowflake, ...), decodes the structural fields the format embeds, and
//! generates fresh identifiers. The CLI in `main.rs` is a thin layer over
//! [`parser::registry`].

pub mod error;
pub mod model;
pub mod output;
pub mod parser;
