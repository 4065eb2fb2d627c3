//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: Issues with the input version or its platform derivation
//! - PatchError: Issues with a single target file (local to that file)
//! - ConfigError: Issues with CLI configuration and package.json

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version parsing and derivation errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Target file errors
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to the source version and the values derived from it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Input is not a semantic version
    #[error("invalid version '{raw}': {message}")]
    InvalidVersion { raw: String, message: String },

    /// Derived Android version code is above the platform maximum
    #[error("version code {code} for {version} exceeds the maximum of {max}")]
    VersionCodeOverflow { version: String, code: u64, max: u64 },

    /// A component does not fit its positional weight in the version code
    #[error("{component} version {value} of {version} must be below {max} to derive a version code")]
    ComponentOutOfRange {
        version: String,
        component: &'static str,
        value: u64,
        max: u64,
    },
}

/// Errors related to a single target file
#[derive(Error, Debug)]
pub enum PatchError {
    /// Target file does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read target file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write target file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A version field the patcher must update is absent
    #[error("field '{field}' not found in {path}")]
    FieldNotFound { path: PathBuf, field: String },

    /// File is not a well-formed XML property list
    #[error("malformed plist {path}: {message}")]
    MalformedPlist { path: PathBuf, message: String },

    /// File is not a well-formed Xcode project descriptor
    #[error("malformed project file {path}: {message}")]
    MalformedProject { path: PathBuf, message: String },

    /// Field exists but holds a value the patcher cannot rewrite
    #[error("unexpected value for '{field}' in {path}: {message}")]
    UnexpectedValue {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// File format has no patcher in the platform being synced
    #[error("cannot patch {path}: {kind} files are not part of the {platform} project")]
    UnsupportedTarget {
        path: PathBuf,
        kind: String,
        platform: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// package.json missing from the project root
    #[error("package.json not found in {path}")]
    PackageJsonNotFound { path: PathBuf },

    /// package.json could not be read or parsed
    #[error("failed to parse {path}: {message}")]
    PackageJsonParse { path: PathBuf, message: String },

    /// package.json has no usable version field
    #[error("no \"version\" field in {path}")]
    MissingVersion { path: PathBuf },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

impl VersionError {
    /// Creates a new InvalidVersion error
    pub fn invalid(raw: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            raw: raw.into(),
            message: message.into(),
        }
    }
}

impl PatchError {
    /// Creates a new FileNotFound error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        PatchError::FileNotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new FieldNotFound error
    pub fn field_not_found(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        PatchError::FieldNotFound {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Creates a new MalformedPlist error
    pub fn malformed_plist(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PatchError::MalformedPlist {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MalformedProject error
    pub fn malformed_project(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PatchError::MalformedProject {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnsupportedTarget error
    pub fn unsupported_target(
        path: impl Into<PathBuf>,
        kind: impl fmt::Display,
        platform: impl fmt::Display,
    ) -> Self {
        PatchError::UnsupportedTarget {
            path: path.into(),
            kind: kind.to_string(),
            platform: platform.to_string(),
        }
    }

    /// Returns true for the missing-field case
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, PatchError::FieldNotFound { .. })
    }
}
