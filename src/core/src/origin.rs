//! Origin reference parsing.
//!
//! Splits the value of a `FROM` command, like `ubuntu:20.04`, into the
//! distribution and release the image resolver fetches.

use crate::error::{ForgeError, Result};

/// Release used when none is specified.
const DEFAULT_RELEASE: &str = "latest";

/// Parsed base image reference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OriginReference {
    /// Distribution name (e.g., "ubuntu", "debian")
    pub distribution: String,
    /// Release (e.g., "20.04", "bookworm", "latest")
    pub release: String,
}

impl OriginReference {
    /// Parse an origin value.
    ///
    /// Supports formats:
    /// - `ubuntu` → ubuntu:latest
    /// - `ubuntu:20.04` → ubuntu:20.04
    /// - `images.example.com/ubuntu:22.04` → distribution `images.example.com/ubuntu`
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid(value, "empty origin"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(invalid(value, "origin must be a single word"));
        }

        // Split release on the last colon after the last slash, so a
        // host:port prefix is not mistaken for a release
        let name_start = value.rfind('/').map(|pos| pos + 1).unwrap_or(0);
        let (distribution, release) = match value[name_start..].rfind(':') {
            Some(colon_pos) => {
                let colon_pos = name_start + colon_pos;
                (&value[..colon_pos], &value[colon_pos + 1..])
            }
            None => (value, DEFAULT_RELEASE),
        };

        if distribution.is_empty() || distribution.ends_with('/') {
            return Err(invalid(value, "missing distribution name"));
        }
        if release.is_empty() {
            return Err(invalid(value, "missing release after ':'"));
        }

        Ok(OriginReference {
            distribution: distribution.to_string(),
            release: release.to_string(),
        })
    }
}

impl std::fmt::Display for OriginReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.distribution, self.release)
    }
}

fn invalid(value: &str, message: &str) -> ForgeError {
    ForgeError::InvalidOrigin {
        value: value.to_string(),
        message: message.to_string(),
    }
}
