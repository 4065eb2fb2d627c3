//! iOS marketing / build version derivation

use super::android::version_code;
use crate::domain::{IosVersionDescriptor, SemanticVersion};
use crate::error::VersionError;
use clap::ValueEnum;
use serde::Serialize;

/// How CFBundleVersion / CURRENT_PROJECT_VERSION is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildNumberPolicy {
    /// Same string as the marketing version
    #[default]
    Marketing,
    /// The Android versionCode, giving a monotonic integer build number
    VersionCode,
}

/// Derive the iOS version fields
pub fn derive_ios(
    version: &SemanticVersion,
    policy: BuildNumberPolicy,
) -> Result<IosVersionDescriptor, VersionError> {
    let marketing_version = version.release_string();
    let build_version = match policy {
        BuildNumberPolicy::Marketing => marketing_version.clone(),
        BuildNumberPolicy::VersionCode => version_code(version)?.to_string(),
    };

    Ok(IosVersionDescriptor {
        marketing_version,
        build_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parse;

    #[test]
    fn test_derive_mirrors_marketing_version() {
        let descriptor = derive_ios(&parse("2.3.10").unwrap(), BuildNumberPolicy::Marketing).unwrap();
        assert_eq!(descriptor.marketing_version, "2.3.10");
        assert_eq!(descriptor.build_version, "2.3.10");
    }

    #[test]
    fn test_prerelease_dropped() {
        let descriptor =
            derive_ios(&parse("1.0.0-beta.1+exp.sha").unwrap(), BuildNumberPolicy::default())
                .unwrap();
        assert_eq!(descriptor.marketing_version, "1.0.0");
        assert_eq!(descriptor.build_version, "1.0.0");
    }

    #[test]
    fn test_version_code_policy() {
        let descriptor =
            derive_ios(&parse("1.2.3").unwrap(), BuildNumberPolicy::VersionCode).unwrap();
        assert_eq!(descriptor.marketing_version, "1.2.3");
        assert_eq!(descriptor.build_version, "1002003");
    }

    #[test]
    fn test_version_code_policy_propagates_range_error() {
        let result = derive_ios(
            &SemanticVersion::new(1, 0, 1000),
            BuildNumberPolicy::VersionCode,
        );
        assert!(result.is_err());
        // the default policy has no such limit
        assert!(derive_ios(&SemanticVersion::new(1, 0, 1000), BuildNumberPolicy::Marketing).is_ok());
    }

    #[test]
    fn test_derive_is_deterministic() {
        let version = parse("4.0.1").unwrap();
        assert_eq!(
            derive_ios(&version, BuildNumberPolicy::Marketing).unwrap(),
            derive_ios(&version, BuildNumberPolicy::Marketing).unwrap()
        );
    }
}
