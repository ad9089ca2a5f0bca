//! Parser registry and detection engine.

use std::sync::LazyLock;
use tracing::debug;

use super::*;
use crate::error::IdError;
use crate::model::IdInfo;

/// Ordered collection of all format parsers.
///
/// Order is the tie-break for ambiguous detection: the first parser to accept
/// an input becomes the best guess. TypeID, NUID, ShortUUID and Sqids sit
/// ahead of NanoID because a valid instance of each also satisfies NanoID's
/// looser character rules.
pub struct Registry {
    parsers: Vec<Box<dyn IdParser>>,
}

/// Canonical name (lowercase) to accepted aliases.
const ALIASES: &[(&str, &[&str])] = &[
    ("uuid", &["uuid", "guid"]),
    ("ulid", &["ulid"]),
    ("objectid", &["objectid", "mongodb", "bson"]),
    ("ksuid", &["ksuid"]),
    ("xid", &["xid"]),
    ("cuid", &["cuid", "cuid2"]),
    ("scru128", &["scru128", "scru"]),
    ("tsid", &["tsid"]),
    ("nuid", &["nuid", "nats-uid", "nats-id"]),
    ("nanoid", &["nanoid", "nano-id", "nano_id"]),
    (
        "snowflake",
        &["snowflake", "sf", "sf-twitter", "sf-discord", "twitter", "discord"],
    ),
    ("unixtime", &["unixtime", "unix", "timestamp"]),
    ("hashhex", &["hashhex", "hash", "hex"]),
    ("base58", &["base58", "b58", "bitcoin"]),
    ("pushid", &["pushid", "push-id", "firebase"]),
    ("base32", &["base32", "b32"]),
    ("shortuuid", &["shortuuid", "short-uuid", "suuid"]),
    ("sqids", &["sqids", "sqid"]),
    ("typeid", &["typeid", "type-id"]),
];

fn matches_name(parser_name: &str, requested: &str) -> bool {
    let parser_name = parser_name.to_lowercase();
    let requested = requested.to_lowercase();
    if parser_name == requested {
        return true;
    }
    ALIASES
        .iter()
        .any(|(canonical, aliases)| *canonical == parser_name && aliases.contains(&requested.as_str()))
}

impl Registry {
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(UuidParser),
                Box::new(UlidParser),
                Box::new(ObjectIdParser),
                Box::new(KsuidParser),
                Box::new(XidParser),
                Box::new(Cuid2Parser),
                Box::new(Scru128Parser::default()),
                Box::new(TsidParser),
                Box::new(TypeIdParser),
                Box::new(NuidParser),
                Box::new(ShortUuidParser),
                Box::new(SqidsParser),
                Box::new(NanoIdParser),
                Box::new(SnowflakeParser::default()),
                Box::new(UnixTimeParser),
                Box::new(HashHexParser),
                Box::new(Base58Parser),
                Box::new(PushIdParser),
                Box::new(Base32Parser),
            ],
        }
    }

    /// Resolve a format name or alias to its parser. Case-insensitive, no
    /// fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&dyn IdParser> {
        self.parsers
            .iter()
            .find(|p| matches_name(p.name(), name))
            .map(|p| p.as_ref())
    }

    /// Canonical names of all registered parsers, in registry order.
    pub fn all_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }

    /// Run every parser against the input and collect all successful decodes,
    /// in registry order. A parser whose `can_parse` accepts but whose `parse`
    /// then fails is skipped, not an error.
    pub fn detect(&self, input: &str) -> Vec<IdInfo> {
        let input = input.trim();
        let mut results = Vec::new();
        for parser in &self.parsers {
            if !parser.can_parse(input) {
                continue;
            }
            match parser.parse(input) {
                Ok(info) => {
                    debug!(format = parser.name(), "parser accepted input");
                    results.push(info);
                }
                Err(e) => {
                    debug!(format = parser.name(), error = %e, "admitted but failed decode");
                }
            }
        }
        results
    }

    /// Detection entry point. With `force`, only the named parser runs and
    /// its failure is reported; otherwise all matches are returned in
    /// registry order, the first being the best guess.
    pub fn parse(&self, input: &str, force: Option<&str>) -> Result<Vec<IdInfo>, IdError> {
        let input = input.trim();
        match force {
            Some(name) => {
                let parser = self
                    .lookup(name)
                    .ok_or_else(|| IdError::UnknownFormatName(name.to_string()))?;
                match parser.parse(input) {
                    Ok(info) => Ok(vec![info]),
                    Err(_) => Err(IdError::ForcedFormatMismatch(name.to_string())),
                }
            }
            None => {
                let results = self.detect(input);
                if results.is_empty() {
                    return Err(IdError::UnrecognizedFormat(input.to_string()));
                }
                Ok(results)
            }
        }
    }

    /// Generate a fresh id in the named format.
    pub fn generate(&self, name: &str) -> Result<String, IdError> {
        let parser = self
            .lookup(name)
            .ok_or_else(|| IdError::UnknownFormatName(name.to_string()))?;
        parser.generate()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Shared registry instance; construction is one-time and thread-safe.
pub fn registry() -> &'static Registry {
    &GLOBAL_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn registers_all_nineteen_formats() {
        let names = registry().all_names();
        assert_eq!(names.len(), 19);
        assert_eq!(names[0], "UUID");
        // Priority formats sit ahead of NanoID
        let pos = |n: &str| names.iter().position(|&x| x == n).unwrap();
        assert!(pos("TypeID") < pos("NanoID"));
        assert!(pos("NUID") < pos("ShortUUID"));
        assert!(pos("ShortUUID") < pos("Sqids"));
        assert!(pos("Sqids") < pos("NanoID"));
    }

    #[test]
    fn lookup_resolves_aliases_case_insensitively() {
        let r = registry();
        assert_eq!(r.lookup("guid").unwrap().name(), "UUID");
        assert_eq!(r.lookup("BSON").unwrap().name(), "ObjectID");
        assert_eq!(r.lookup("b58").unwrap().name(), "Base58");
        assert_eq!(r.lookup("Firebase").unwrap().name(), "PushID");
        assert!(r.lookup("nope").is_none());
    }

    #[test]
    fn forced_unknown_name_is_reported() {
        let err = registry().parse("whatever", Some("nope")).unwrap_err();
        assert!(matches!(err, IdError::UnknownFormatName(_)));
    }

    #[test]
    fn forced_mismatch_is_reported() {
        let err = registry()
            .parse("not-a-uuid-at-all", Some("uuid"))
            .unwrap_err();
        assert!(matches!(err, IdError::ForcedFormatMismatch(_)));
    }

    #[test]
    fn unrecognized_input_yields_error() {
        let err = registry().parse("!!!", None).unwrap_err();
        assert!(matches!(err, IdError::UnrecognizedFormat(_)));
    }

    #[test]
    fn detect_returns_matches_in_registry_order() {
        let results = registry().detect("507f1f77bcf86cd799439011");
        assert!(results.len() >= 2);
        assert_eq!(results[0].format_name, "MongoDB ObjectId");
    }

    #[test]
    fn input_is_trimmed() {
        let results = registry()
            .parse("  550e8400-e29b-41d4-a716-446655440000  ", None)
            .unwrap();
        assert_eq!(results[0].format_name, "UUID (RFC-9562)");
    }
}
