//! Android versionName / versionCode derivation
//!
//! The version code is a positional encoding of the release triple:
//! `major * 1_000_000 + minor * 1_000 + patch`. Prerelease and build metadata never
//! contribute, so two builds of the same release share a code and any later release
//! always gets a larger one.

use crate::domain::{AndroidVersionDescriptor, SemanticVersion};
use crate::error::VersionError;

/// Weight of the major component
pub const MAJOR_WEIGHT: u64 = 1_000_000;

/// Weight of the minor component
pub const MINOR_WEIGHT: u64 = 1_000;

/// Largest versionCode Google Play accepts
pub const MAX_VERSION_CODE: u64 = 2_100_000_000;

/// Compute the versionCode for a version
pub fn version_code(version: &SemanticVersion) -> Result<u64, VersionError> {
    let out_of_range = |component: &'static str, value: u64, max: u64| {
        VersionError::ComponentOutOfRange {
            version: version.to_string(),
            component,
            value,
            max,
        }
    };

    if version.minor >= MAJOR_WEIGHT / MINOR_WEIGHT {
        return Err(out_of_range(
            "minor",
            version.minor,
            MAJOR_WEIGHT / MINOR_WEIGHT,
        ));
    }
    if version.patch >= MINOR_WEIGHT {
        return Err(out_of_range("patch", version.patch, MINOR_WEIGHT));
    }

    let code = version
        .major
        .saturating_mul(MAJOR_WEIGHT)
        .saturating_add(version.minor * MINOR_WEIGHT)
        .saturating_add(version.patch);

    if code > MAX_VERSION_CODE {
        return Err(VersionError::VersionCodeOverflow {
            version: version.to_string(),
            code,
            max: MAX_VERSION_CODE,
        });
    }

    Ok(code)
}

/// Derive the Android version fields
pub fn derive_android(version: &SemanticVersion) -> Result<AndroidVersionDescriptor, VersionError> {
    Ok(AndroidVersionDescriptor {
        version_name: version.release_string(),
        version_code: version_code(version)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parse;
    use proptest::prelude::*;

    #[test]
    fn test_derive_release() {
        let descriptor = derive_android(&parse("2.3.10").unwrap()).unwrap();
        assert_eq!(descriptor.version_name, "2.3.10");
        assert_eq!(descriptor.version_code, 2_003_010);
    }

    #[test]
    fn test_later_patch_gets_larger_code() {
        let previous = derive_android(&parse("2.3.9").unwrap()).unwrap();
        let next = derive_android(&parse("2.3.10").unwrap()).unwrap();
        assert!(next.version_code > previous.version_code);
    }

    #[test]
    fn test_prerelease_dropped() {
        let descriptor = derive_android(&parse("1.0.0-beta.1").unwrap()).unwrap();
        assert_eq!(descriptor.version_name, "1.0.0");
        assert_eq!(descriptor.version_code, 1_000_000);
    }

    #[test]
    fn test_prerelease_and_release_share_code() {
        let beta = version_code(&parse("1.4.0-beta.3+ci.99").unwrap()).unwrap();
        let release = version_code(&parse("1.4.0").unwrap()).unwrap();
        assert_eq!(beta, release);
    }

    #[test]
    fn test_zero_version() {
        assert_eq!(version_code(&SemanticVersion::new(0, 0, 0)).unwrap(), 0);
        assert_eq!(version_code(&SemanticVersion::new(0, 0, 1)).unwrap(), 1);
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(
            version_code(&SemanticVersion::new(2100, 0, 0)).unwrap(),
            MAX_VERSION_CODE
        );
        assert!(matches!(
            version_code(&SemanticVersion::new(2100, 0, 1)),
            Err(VersionError::VersionCodeOverflow { .. })
        ));
    }

    #[test]
    fn test_huge_major_does_not_wrap() {
        let err = version_code(&SemanticVersion::new(u64::MAX, 0, 0)).unwrap_err();
        assert!(matches!(err, VersionError::VersionCodeOverflow { .. }));
    }

    #[test]
    fn test_component_out_of_range() {
        let err = version_code(&SemanticVersion::new(1, 1000, 0)).unwrap_err();
        assert!(matches!(
            err,
            VersionError::ComponentOutOfRange {
                component: "minor",
                ..
            }
        ));

        let err = version_code(&SemanticVersion::new(1, 0, 1000)).unwrap_err();
        assert!(matches!(
            err,
            VersionError::ComponentOutOfRange {
                component: "patch",
                ..
            }
        ));
    }

    #[test]
    fn test_derive_is_deterministic() {
        let version = parse("7.8.9-rc.1").unwrap();
        assert_eq!(
            derive_android(&version).unwrap(),
            derive_android(&version).unwrap()
        );
    }

    fn release() -> impl Strategy<Value = (u64, u64, u64)> {
        (0u64..=2099, 0u64..1000, 0u64..1000)
    }

    proptest! {
        #[test]
        fn prop_version_code_is_monotonic(a in release(), b in release()) {
            prop_assume!(a != b);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let lo_code = version_code(&SemanticVersion::new(lo.0, lo.1, lo.2)).unwrap();
            let hi_code = version_code(&SemanticVersion::new(hi.0, hi.1, hi.2)).unwrap();
            prop_assert!(lo_code < hi_code);
        }

        #[test]
        fn prop_prerelease_never_changes_code(
            (major, minor, patch) in release(),
            tag in "[a-z]{1,8}",
            n in 0u32..100,
        ) {
            let mut version = SemanticVersion::new(major, minor, patch);
            let release_code = version_code(&version).unwrap();
            version.prerelease = vec![tag, n.to_string()];
            prop_assert_eq!(version_code(&version).unwrap(), release_code);
        }
    }
}
