//! versync - Package version sync for Capacitor native projects
//!
//! This library keeps the version of a package.json in sync with:
//! - Android (build.gradle / build.gradle.kts: versionName, versionCode)
//! - iOS Info.plist and extra plists (CFBundleShortVersionString, CFBundleVersion)
//! - Xcode project.pbxproj (MARKETING_VERSION, CURRENT_PROJECT_VERSION)

pub mod cli;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod package_json;
pub mod patcher;
pub mod targets;
pub mod version;
