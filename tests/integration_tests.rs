//! Integration tests for versync
//!
//! These tests verify:
//! - Version derivation for both platforms
//! - File patching format preservation on real project layouts
//! - Sync runs across platforms with per-file error collection

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use versync::domain::{Platform, PlatformStatus};
use versync::error::{PatchError, VersionError};
use versync::orchestrator::{sync, SyncOptions};
use versync::targets::{TargetOverrides, GRADLE_FILE, INFO_PLIST, PBXPROJ_FILE};

const BUILD_GRADLE: &str = r#"apply plugin: 'com.android.application'

android {
    namespace "io.ionic.starter"
    compileSdk rootProject.ext.compileSdkVersion
    defaultConfig {
        applicationId "io.ionic.starter"
        minSdkVersion rootProject.ext.minSdkVersion
        targetSdkVersion rootProject.ext.targetSdkVersion
        versionCode 1
        versionName "1.0"
        testInstrumentationRunner "androidx.test.runner.AndroidJUnitRunner"
    }
    buildTypes {
        release {
            minifyEnabled false
            proguardFiles getDefaultProguardFile('proguard-android.txt'), 'proguard-rules.pro'
        }
    }
}

apply from: 'capacitor.build.gradle'
"#;

const INFO_PLIST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleDevelopmentRegion</key>
	<string>en</string>
	<key>CFBundleDisplayName</key>
	<string>starter</string>
	<key>CFBundleShortVersionString</key>
	<string>$(MARKETING_VERSION)</string>
	<key>CFBundleVersion</key>
	<string>$(CURRENT_PROJECT_VERSION)</string>
	<key>UIRequiredDeviceCapabilities</key>
	<array>
		<string>armv7</string>
	</array>
</dict>
</plist>
"#;

const PROJECT_PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 48;
	objects = {

/* Begin XCBuildConfiguration section */
		504EC3171FED79650016851F /* Debug */ = {
			isa = XCBuildConfiguration;
			baseConfigurationReference = FC68EB0AF532CFC21C3344DD /* Pods-App.debug.xcconfig */;
			buildSettings = {
				ASSETCATALOG_COMPILER_APPICON_NAME = AppIcon;
				CODE_SIGN_STYLE = Automatic;
				CURRENT_PROJECT_VERSION = 1;
				INFOPLIST_FILE = App/Info.plist;
				MARKETING_VERSION = 1.0;
				PRODUCT_BUNDLE_IDENTIFIER = io.ionic.starter;
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Debug;
		};
		504EC3181FED79650016851F /* Release */ = {
			isa = XCBuildConfiguration;
			baseConfigurationReference = AF51FD2D460BCFE21FA515B2 /* Pods-App.release.xcconfig */;
			buildSettings = {
				ASSETCATALOG_COMPILER_APPICON_NAME = AppIcon;
				CODE_SIGN_STYLE = Automatic;
				CURRENT_PROJECT_VERSION = 1;
				INFOPLIST_FILE = App/Info.plist;
				MARKETING_VERSION = 1.0;
				PRODUCT_BUNDLE_IDENTIFIER = io.ionic.starter;
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Release;
		};
		7A2B3C4D5E6F708192A3B4C5 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				CURRENT_PROJECT_VERSION = "1";
				MARKETING_VERSION = "1.0";
				PRODUCT_NAME = "$(TARGET_NAME)";
			};
			name = Debug;
		};
/* End XCBuildConfiguration section */
	};
	rootObject = 504EC2FC1FED79650016851F /* Project object */;
}
"#;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A Capacitor app with both native projects
fn create_capacitor_project(version: &str) -> TempDir {
    let temp_dir = create_test_dir();
    write_file(
        temp_dir.path(),
        "package.json",
        &format!(r#"{{"name": "starter", "version": "{}"}}"#, version),
    );
    write_file(temp_dir.path(), GRADLE_FILE, BUILD_GRADLE);
    write_file(temp_dir.path(), INFO_PLIST, INFO_PLIST_XML);
    write_file(temp_dir.path(), PBXPROJ_FILE, PROJECT_PBXPROJ);
    temp_dir
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Lines that differ between two versions of a file
fn changed_lines<'a>(before: &'a str, after: &'a str) -> Vec<(&'a str, &'a str)> {
    assert_eq!(before.lines().count(), after.lines().count());
    before
        .lines()
        .zip(after.lines())
        .filter(|(a, b)| a != b)
        .collect()
}

mod version_derivation {
    use versync::version::{derive_android, derive_ios, parse, version_code, BuildNumberPolicy};

    #[test]
    fn test_release_version() {
        let version = parse("2.3.10").unwrap();

        let android = derive_android(&version).unwrap();
        assert_eq!(android.version_name, "2.3.10");
        assert!(android.version_code > version_code(&parse("2.3.9").unwrap()).unwrap());

        let ios = derive_ios(&version, BuildNumberPolicy::default()).unwrap();
        assert_eq!(ios.marketing_version, "2.3.10");
        assert_eq!(ios.build_version, "2.3.10");
    }

    #[test]
    fn test_prerelease_is_dropped() {
        let version = parse("1.0.0-beta.1").unwrap();
        assert_eq!(derive_android(&version).unwrap().version_name, "1.0.0");
        assert_eq!(
            derive_ios(&version, BuildNumberPolicy::default())
                .unwrap()
                .marketing_version,
            "1.0.0"
        );
        assert_eq!(
            version_code(&version).unwrap(),
            version_code(&parse("1.0.0").unwrap()).unwrap()
        );
    }

    #[test]
    fn test_ordering_across_components() {
        let versions = ["0.0.1", "0.1.0", "0.999.999", "1.0.0", "1.0.1", "1.2.0", "10.0.0"];
        let codes: Vec<u64> = versions
            .iter()
            .map(|v| version_code(&parse(v).unwrap()).unwrap())
            .collect();
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_inputs() {
        for raw in ["", "1", "1.2", "1.2.x", "01.2.3", "1.2.3-", "latest"] {
            assert!(parse(raw).is_err(), "{} should be rejected", raw);
        }
    }
}

mod file_patching {
    use super::*;
    use versync::domain::{AndroidVersionDescriptor, IosVersionDescriptor};
    use versync::patcher::{patch_gradle, patch_plist, patch_project_descriptor};

    fn ios_descriptor() -> IosVersionDescriptor {
        IosVersionDescriptor {
            marketing_version: "2.3.10".to_string(),
            build_version: "2.3.10".to_string(),
        }
    }

    #[test]
    fn test_gradle_only_version_lines_change() {
        let project = create_capacitor_project("2.3.10");
        let path = project.path().join(GRADLE_FILE);

        let result = patch_gradle(
            &path,
            &AndroidVersionDescriptor {
                version_name: "2.3.10".to_string(),
                version_code: 2_003_010,
            },
        )
        .unwrap();

        assert!(result.written);
        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(
            changed_lines(BUILD_GRADLE, &after),
            vec![
                ("        versionCode 1", "        versionCode 2003010"),
                ("        versionName \"1.0\"", "        versionName \"2.3.10\""),
            ]
        );
    }

    #[test]
    fn test_plist_only_version_values_change() {
        let project = create_capacitor_project("2.3.10");
        let path = project.path().join(INFO_PLIST);

        let result = patch_plist(&path, &ios_descriptor()).unwrap();
        assert_eq!(result.change_count(), 2);

        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(
            changed_lines(INFO_PLIST_XML, &after),
            vec![
                (
                    "\t<string>$(MARKETING_VERSION)</string>",
                    "\t<string>2.3.10</string>"
                ),
                (
                    "\t<string>$(CURRENT_PROJECT_VERSION)</string>",
                    "\t<string>2.3.10</string>"
                ),
            ]
        );
    }

    #[test]
    fn test_project_descriptor_updates_all_occurrences() {
        let project = create_capacitor_project("2.3.10");
        let path = project.path().join(PBXPROJ_FILE);

        let result = patch_project_descriptor(&path, &ios_descriptor()).unwrap();
        assert_eq!(result.field("MARKETING_VERSION").unwrap().occurrences, 3);
        assert_eq!(result.field("CURRENT_PROJECT_VERSION").unwrap().occurrences, 3);

        let after = fs::read_to_string(&path).unwrap();
        let diff = changed_lines(PROJECT_PBXPROJ, &after);
        assert_eq!(diff.len(), 6);
        assert!(diff
            .iter()
            .all(|(_, b)| b.contains("= 2.3.10;") || b.contains("= \"2.3.10\";")));
    }

    #[test]
    fn test_patching_twice_is_noop() {
        let project = create_capacitor_project("2.3.10");
        let path = project.path().join(PBXPROJ_FILE);

        patch_project_descriptor(&path, &ios_descriptor()).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        let second = patch_project_descriptor(&path, &ios_descriptor()).unwrap();
        assert!(!second.has_changes());
        assert!(!second.written);
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_malformed_plist() {
        let temp_dir = create_test_dir();
        write_file(temp_dir.path(), "Info.plist", "<plist><dict><key>CFBundleVersion</key>");

        let result = patch_plist(&temp_dir.path().join("Info.plist"), &ios_descriptor());
        assert!(matches!(result, Err(PatchError::MalformedPlist { .. })));
    }
}

mod sync_runs {
    use super::*;

    #[tokio::test]
    async fn test_sync_updates_every_target() {
        let project = create_capacitor_project("2.3.10");
        let report = sync(project.path(), "2.3.10", SyncOptions::default())
            .await
            .unwrap();

        assert!(!report.has_failures());
        assert_eq!(report.files_changed(), 3);
        assert!(read(project.path(), GRADLE_FILE).contains("versionCode 2003010"));
        assert!(read(project.path(), INFO_PLIST).contains("<string>2.3.10</string>"));
        assert!(!read(project.path(), PBXPROJ_FILE).contains("= 1.0;"));
    }

    #[tokio::test]
    async fn test_second_run_reports_zero_changes() {
        let project = create_capacitor_project("1.2.3");
        sync(project.path(), "1.2.3", SyncOptions::default())
            .await
            .unwrap();
        let snapshot = (
            read(project.path(), GRADLE_FILE),
            read(project.path(), INFO_PLIST),
            read(project.path(), PBXPROJ_FILE),
        );

        let second = sync(project.path(), "1.2.3", SyncOptions::default())
            .await
            .unwrap();
        assert_eq!(second.total_changes(), 0);
        assert_eq!(second.files_changed(), 0);
        assert_eq!(
            snapshot,
            (
                read(project.path(), GRADLE_FILE),
                read(project.path(), INFO_PLIST),
                read(project.path(), PBXPROJ_FILE),
            )
        );
    }

    #[tokio::test]
    async fn test_missing_key_in_sibling_plist() {
        let project = create_capacitor_project("1.2.3");
        let without_bundle_version = INFO_PLIST_XML.replace(
            "\t<key>CFBundleVersion</key>\n\t<string>$(CURRENT_PROJECT_VERSION)</string>\n",
            "",
        );
        write_file(
            project.path(),
            "ios/App/Share/Info.plist",
            &without_bundle_version,
        );
        write_file(project.path(), "ios/App/Widget/Info.plist", INFO_PLIST_XML);

        let options = SyncOptions {
            targets: TargetOverrides {
                extra_plists: vec![
                    "ios/App/Share/Info.plist".into(),
                    "ios/App/Widget/Info.plist".into(),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let report = sync(project.path(), "1.2.3", options).await.unwrap();

        let ios = report.platform(Platform::Ios).unwrap();
        let share = &ios.files[1];
        match share.error() {
            Some(PatchError::FieldNotFound { field, .. }) => assert_eq!(field, "CFBundleVersion"),
            other => panic!("Expected FieldNotFound, got {:?}", other),
        }
        assert!(ios.files[2].has_changes());
        assert!(read(project.path(), "ios/App/Widget/Info.plist").contains("<string>1.2.3</string>"));
        // the failing file is left untouched
        assert_eq!(
            read(project.path(), "ios/App/Share/Info.plist"),
            without_bundle_version
        );
        assert!(report.platform(Platform::Android).unwrap().files[0].has_changes());
    }

    #[tokio::test]
    async fn test_prerelease_version() {
        let project = create_capacitor_project("1.0.0-beta.1");
        let report = sync(project.path(), "1.0.0-beta.1", SyncOptions::default())
            .await
            .unwrap();

        assert!(report.version.is_prerelease());
        assert!(read(project.path(), GRADLE_FILE).contains("versionName \"1.0.0\""));
        assert!(read(project.path(), GRADLE_FILE).contains("versionCode 1000000"));
        assert!(read(project.path(), PBXPROJ_FILE).contains("MARKETING_VERSION = 1.0.0;"));
    }

    #[tokio::test]
    async fn test_overflow_is_fatal_for_android_only() {
        let project = create_capacitor_project("3000.0.0");
        let report = sync(project.path(), "3000.0.0", SyncOptions::default())
            .await
            .unwrap();

        let android = report.platform(Platform::Android).unwrap();
        assert!(matches!(
            android.status,
            PlatformStatus::Failed(VersionError::VersionCodeOverflow { .. })
        ));
        assert_eq!(read(project.path(), GRADLE_FILE), BUILD_GRADLE);
        assert!(read(project.path(), INFO_PLIST).contains("<string>3000.0.0</string>"));
    }
}
