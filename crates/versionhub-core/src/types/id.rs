//! Identifier newtypes for users and file versions.
//!
//! Using distinct types prevents accidentally passing a raw version token
//! where a validated [`VersionId`] is expected.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error returned when an identifier string is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// The identifier was empty.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier contains characters that cannot appear in a storage path.
    #[error("identifier contains invalid characters: {0}")]
    InvalidCharacters(String),
    /// The version token is not a decimal timestamp.
    #[error("version token is not a timestamp: {0}")]
    NotATimestamp(String),
}

/// Identifier of a user owning a file tree.
///
/// User identifiers double as the name of the user's directory in storage,
/// so they may not contain path separators or parent references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse and validate a user identifier.
    pub fn parse(raw: &str) -> Result<Self, IdParseError> {
        if raw.is_empty() {
            return Err(IdParseError::Empty);
        }
        if raw == "."
            || raw == ".."
            || raw.chars().any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(IdParseError::InvalidCharacters(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Timestamp (seconds since the Unix epoch) identifying one stored version
/// of a file. Unique only per (user, file) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(i64);

impl VersionId {
    /// Return the timestamp as a UTC date, if it is in range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VersionId {
    type Err = IdParseError;

    /// Only the canonical decimal form is accepted: no sign, no whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdParseError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdParseError::NotATimestamp(s.to_string()));
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| IdParseError::NotATimestamp(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parse() {
        assert_eq!(UserId::parse("alice").unwrap().as_str(), "alice");
        assert_eq!(UserId::parse(""), Err(IdParseError::Empty));
        assert!(UserId::parse("..").is_err());
        assert!(UserId::parse("a/b").is_err());
        assert!(UserId::parse("a\\b").is_err());
    }

    #[test]
    fn test_version_id_from_str() {
        let id: VersionId = "42".parse().expect("should parse");
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.to_datetime().unwrap().timestamp(), 42);
    }

    #[test]
    fn test_version_id_rejects_non_canonical() {
        assert!("".parse::<VersionId>().is_err());
        assert!("-1".parse::<VersionId>().is_err());
        assert!("+1".parse::<VersionId>().is_err());
        assert!(" 42".parse::<VersionId>().is_err());
        assert!("4.2".parse::<VersionId>().is_err());
        assert!("abc".parse::<VersionId>().is_err());
        assert!("99999999999999999999999".parse::<VersionId>().is_err());
    }

    #[test]
    fn test_version_id_datetime() {
        let id: VersionId = "1700000000".parse().unwrap();
        assert_eq!(id.to_datetime().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = UserId::parse("bob").unwrap();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"bob\"");
        let parsed: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, parsed);
    }
}
