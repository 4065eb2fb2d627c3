//! CLI argument parsing module for versync

use crate::version::BuildNumberPolicy;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Sync the package.json version into Capacitor Android and iOS projects
#[derive(Parser, Debug, Clone)]
#[command(
    name = "versync",
    version,
    about = "Sync the package.json version into Capacitor Android and iOS projects",
    after_help = "Without --android or --ios both platforms are synced, skipping any whose project directory is missing."
)]
pub struct CliArgs {
    /// Project root holding package.json, android/ and ios/ (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Platform selection
    /// Sync the Android project (iOS is skipped unless --ios is also given)
    #[arg(short, long)]
    pub android: bool,

    /// Sync the iOS project (Android is skipped unless --android is also given)
    #[arg(short, long)]
    pub ios: bool,

    /// Additional plists to update, comma separated or repeated (iOS only)
    #[arg(long, value_name = "FILES", action = ArgAction::Append)]
    pub plist: Vec<String>,

    /// Ignored: prerelease identifiers never take part in the version code
    #[arg(short = 'p', long)]
    pub android_allow_prerelease: bool,

    // Version source
    /// Sync this version instead of the package.json version
    #[arg(long, value_name = "SEMVER")]
    pub set_version: Option<String>,

    /// How the iOS build number is derived
    #[arg(long, value_enum, value_name = "POLICY", default_value_t = BuildNumberPolicy::Marketing)]
    pub ios_build_number: BuildNumberPolicy,

    // Target paths
    /// Android build file (default: android/app/build.gradle or build.gradle.kts)
    #[arg(long, value_name = "FILE")]
    pub gradle_file: Option<PathBuf>,

    /// iOS Info.plist (default: ios/App/App/Info.plist)
    #[arg(long, value_name = "FILE")]
    pub info_plist: Option<PathBuf>,

    /// Xcode project file (default: ios/App/App.xcodeproj/project.pbxproj)
    #[arg(long, value_name = "FILE")]
    pub pbxproj: Option<PathBuf>,

    // General options
    /// Dry run mode - show what would change without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long, conflicts_with = "diff")]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}
