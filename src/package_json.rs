//! package.json reader
//!
//! The package version is the source of truth every native project is synced to.

use crate::error::ConfigError;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name of the npm manifest
pub const PACKAGE_JSON: &str = "package.json";

/// The fields of package.json a sync run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Path the manifest was read from
    pub path: PathBuf,
    /// Raw version string, not yet validated
    pub version: String,
}

/// Read package.json from the project root
pub fn read_package(root: &Path) -> Result<PackageInfo, ConfigError> {
    let path = root.join(PACKAGE_JSON);
    if !path.is_file() {
        return Err(ConfigError::PackageJsonNotFound {
            path: root.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::PackageJsonParse {
        path: path.clone(),
        message: e.to_string(),
    })?;

    parse_package(&path, &content)
}

/// Parse package.json content; `path` is only used for error reporting
pub fn parse_package(path: &Path, content: &str) -> Result<PackageInfo, ConfigError> {
    let json: Value = serde_json::from_str(content).map_err(|e| ConfigError::PackageJsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if !json.is_object() {
        return Err(ConfigError::PackageJsonParse {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        });
    }

    let version = json
        .get("version")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingVersion {
            path: path.to_path_buf(),
        })?;

    Ok(PackageInfo {
        path: path.to_path_buf(),
        version: version.to_string(),
    })
}
