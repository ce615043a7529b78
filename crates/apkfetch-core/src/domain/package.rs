//! Package identifier value object.
//!
//! Android package names follow a reverse-domain grammar: two or more
//! dot-separated segments, each starting with a letter and continuing with
//! letters, digits or underscores.
//! See <https://developer.android.com/guide/topics/manifest/manifest-element#package>.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)+$").expect("package name regex is valid")
});

/// Check whether `input` is a well-formed package identifier.
pub fn validate(input: &str) -> bool {
    PACKAGE_NAME_RE.is_match(input)
}

/// Rejected package identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Not valid package: '{input}'")]
pub struct InvalidPackageId {
    /// The raw input that failed validation.
    pub input: String,
}

/// A validated package identifier such as `com.example.app`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(String);

impl PackageId {
    /// Parse and validate a package identifier.
    pub fn parse(input: impl Into<String>) -> Result<Self, InvalidPackageId> {
        let input = input.into();
        if validate(&input) {
            Ok(Self(input))
        } else {
            Err(InvalidPackageId { input })
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PackageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
