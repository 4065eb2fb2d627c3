//! Semantic version parsing

use crate::domain::SemanticVersion;
use crate::error::VersionError;
use std::str::FromStr;

/// Parse a semantic version string (major.minor.patch[-prerelease][+build])
///
/// Surrounding whitespace and a single leading `v` or `=` are tolerated, the way npm
/// accepts them in package.json. Everything else must follow the SemVer 2.0 grammar.
pub fn parse(raw: &str) -> Result<SemanticVersion, VersionError> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);

    if stripped.is_empty() {
        return Err(VersionError::invalid(raw, "empty version string"));
    }

    let parsed =
        semver::Version::parse(stripped).map_err(|e| VersionError::invalid(raw, e.to_string()))?;

    Ok(SemanticVersion {
        major: parsed.major,
        minor: parsed.minor,
        patch: parsed.patch,
        prerelease: split_identifiers(parsed.pre.as_str()),
        build_metadata: split_identifiers(parsed.build.as_str()),
    })
}

fn split_identifiers(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split('.').map(str::to_string).collect()
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
