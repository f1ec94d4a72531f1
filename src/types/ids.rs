// src/types/ids.rs
//! Identifiers for Prismic documents.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The human-readable unique identifier of a document within its custom type.
///
/// UIDs end up in URLs and on-disk paths (`post/<uid>/index.html`), so they
/// must be non-empty and free of whitespace and path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentUid(String);

impl DocumentUid {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::InvalidUid(
                "UID cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().any(|c| c.is_whitespace()) {
            return Err(ValidationError::InvalidUid(format!(
                "UID must not contain whitespace: {:?}",
                trimmed
            )));
        }

        if trimmed.contains('/') || trimmed.contains('\\') || trimmed == ".." || trimmed == "." {
            return Err(ValidationError::InvalidUid(format!(
                "UID must not be a path: {}",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentUid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        DocumentUid::parse(&value).map_err(serde::de::Error::custom)
    }
}
