//! Format parser system.
//!
//! Each supported identifier family gets one parser implementing [`IdParser`].
//! Parsers are self-contained; the registry composes them into an ordered list
//! and runs the detection policy over it.

mod base32;
mod base58;
mod baseconv;
mod cuid2;
mod hashhex;
mod ksuid;
mod nanoid;
mod nuid;
mod objectid;
mod pushid;
mod registry;
mod scru128;
mod shortuuid;
mod snowflake;
mod sqids;
mod tsid;
mod typeid;
mod ulid;
mod unixtime;
pub mod uuid;
mod xid;

pub use base32::Base32Parser;
pub use base58::Base58Parser;
pub use cuid2::Cuid2Parser;
pub use hashhex::HashHexParser;
pub use ksuid::KsuidParser;
pub use nanoid::NanoIdParser;
pub use nuid::NuidParser;
pub use objectid::ObjectIdParser;
pub use pushid::PushIdParser;
pub use registry::{registry, Registry};
pub use scru128::Scru128Parser;
pub use shortuuid::ShortUuidParser;
pub use snowflake::SnowflakeParser;
pub use sqids::SqidsParser;
pub use tsid::TsidParser;
pub use typeid::TypeIdParser;
pub use ulid::UlidParser;
pub use unixtime::UnixTimeParser;
pub use uuid::UuidParser;
pub use xid::XidParser;

use crate::error::IdError;
use crate::model::IdInfo;

/// Trait implemented by every format parser.
///
/// `can_parse` is a cheap structural gate and must never panic; `parse` is the
/// authoritative check and re-validates regardless of any prior `can_parse`
/// call. `generate` output must round-trip through `parse`.
pub trait IdParser: Send + Sync {
    /// Stable machine-readable format label.
    fn name(&self) -> &'static str;

    /// Fast structural admissibility check.
    fn can_parse(&self, input: &str) -> bool;

    /// Full structural decode.
    fn parse(&self, input: &str) -> Result<IdInfo, IdError>;

    /// Produce a fresh, valid instance of the format.
    fn generate(&self) -> Result<String, IdError>;
}
