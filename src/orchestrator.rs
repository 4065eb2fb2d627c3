//! Sync orchestrator for coordinating one version sync run
//!
//! This module provides:
//! - Workflow coordination: read version → parse → derive → patch
//! - Android and iOS synced concurrently on the blocking pool
//! - Dry-run mode support
//! - Per-file error collection; one file's failure never stops its siblings

use crate::cli::CliArgs;
use crate::domain::{
    Derived, FileOutcome, Platform, PlatformReport, PlatformSelection, SemanticVersion,
    SyncReport, TargetFile,
};
use crate::error::{AppError, ConfigError, PatchError, VersionError};
use crate::package_json::read_package;
use crate::patcher::{FilePatcher, GradlePatcher, PatchWriter, PlistPatcher, ProjectPatcher};
use crate::targets::{split_plist_list, TargetOverrides, TargetResolver};
use crate::version::{self, derive_android, derive_ios, BuildNumberPolicy};
use std::path::{Path, PathBuf};

/// Options of a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Platforms to sync
    pub platforms: PlatformSelection,
    /// Target path overrides and extra plists
    pub targets: TargetOverrides,
    /// How the iOS build number is derived
    pub build_number: BuildNumberPolicy,
    /// Version to sync instead of the package.json one
    pub version: Option<String>,
    /// Report changes without writing
    pub dry_run: bool,
}

impl SyncOptions {
    /// Create options from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            platforms: PlatformSelection::from_flags(args.android, args.ios),
            targets: TargetOverrides {
                gradle_file: args.gradle_file.clone(),
                info_plist: args.info_plist.clone(),
                pbxproj: args.pbxproj.clone(),
                extra_plists: split_plist_list(&args.plist),
            },
            build_number: args.ios_build_number,
            version: args.set_version.clone(),
            dry_run: args.dry_run,
        }
    }
}

/// Orchestrator for syncing a version into the native projects of one package
pub struct Orchestrator {
    resolver: TargetResolver,
    options: SyncOptions,
}

impl Orchestrator {
    /// Create an orchestrator for the project at `root`
    pub fn new(root: impl Into<PathBuf>, options: SyncOptions) -> Self {
        Self {
            resolver: TargetResolver::new(root, options.targets.clone()),
            options,
        }
    }

    /// Create an orchestrator from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self::new(&args.path, SyncOptions::from_cli(args))
    }

    /// Returns the project root
    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// Returns the run options
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Returns the files that will be patched for a platform
    pub fn targets(&self, platform: Platform) -> Vec<TargetFile> {
        self.resolver.targets(platform)
    }

    /// Returns the raw version to sync: the override, or the package.json version
    pub fn resolve_version(&self) -> Result<String, ConfigError> {
        if !self.root().is_dir() {
            return Err(ConfigError::InvalidPath {
                path: self.root().to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        match &self.options.version {
            Some(version) => Ok(version.trim().to_string()),
            None => Ok(read_package(self.root())?.version),
        }
    }

    /// Read the version and sync it
    pub async fn run(&self) -> Result<SyncReport, AppError> {
        let raw = self.resolve_version()?;
        Ok(self.sync(&raw).await?)
    }

    /// Sync `raw_version` into the selected platforms
    ///
    /// An invalid version fails the whole run before any file is touched. Everything
    /// after that is reported per platform and per file in the returned report.
    pub async fn sync(&self, raw_version: &str) -> Result<SyncReport, VersionError> {
        let version = version::parse(raw_version)?;
        let mut report = SyncReport::new(version.clone(), self.options.dry_run);

        let tasks: Vec<_> = self
            .options
            .platforms
            .platforms()
            .into_iter()
            .map(|platform| {
                let resolver = self.resolver.clone();
                let options = self.options.clone();
                let version = version.clone();
                tokio::task::spawn_blocking(move || {
                    sync_platform(&resolver, platform, &version, &options)
                })
            })
            .collect();

        for task in tasks {
            let platform_report = task
                .await
                .unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()));
            report.add_platform(platform_report);
        }

        Ok(report)
    }
}

/// Sync `version` into the project at `root`
pub async fn sync(
    root: impl Into<PathBuf>,
    version: &str,
    options: SyncOptions,
) -> Result<SyncReport, VersionError> {
    Orchestrator::new(root, options).sync(version).await
}

/// Derive and patch one platform
fn sync_platform(
    resolver: &TargetResolver,
    platform: Platform,
    version: &SemanticVersion,
    options: &SyncOptions,
) -> PlatformReport {
    if !options.platforms.explicit && !resolver.has_project_dir(platform) {
        return PlatformReport::skipped(
            platform,
            format!(
                "no {}/ directory in {}",
                platform.project_dir(),
                resolver.root().display()
            ),
        );
    }

    let writer = PatchWriter::new(options.dry_run);

    match platform {
        Platform::Android => match derive_android(version) {
            Ok(descriptor) => {
                let gradle = GradlePatcher::new(&descriptor);
                let patchers: [&dyn FilePatcher; 1] = [&gradle];
                let mut report = PlatformReport::derived(platform, Derived::Android(descriptor));
                for target in resolver.targets(platform) {
                    report.add_file(patch_target(&writer, platform, target, &patchers));
                }
                report
            }
            Err(e) => PlatformReport::failed(platform, e),
        },
        Platform::Ios => match derive_ios(version, options.build_number) {
            Ok(descriptor) => {
                let plist = PlistPatcher::new(&descriptor);
                let project = ProjectPatcher::new(&descriptor);
                let patchers: [&dyn FilePatcher; 2] = [&plist, &project];
                let mut report = PlatformReport::derived(platform, Derived::Ios(descriptor));
                for target in resolver.targets(platform) {
                    report.add_file(patch_target(&writer, platform, target, &patchers));
                }
                report
            }
            Err(e) => PlatformReport::failed(platform, e),
        },
    }
}

/// Patch one file with the platform patcher handling its kind
fn patch_target(
    writer: &PatchWriter,
    platform: Platform,
    target: TargetFile,
    patchers: &[&dyn FilePatcher],
) -> FileOutcome {
    let Some(patcher) = patchers.iter().find(|p| p.kind() == target.kind) else {
        let error = PatchError::unsupported_target(&target.path, target.kind, platform);
        return FileOutcome::failed(target, error);
    };
    match writer.apply(&target.path, *patcher) {
        Ok(result) => FileOutcome::patched(target, result),
        Err(e) => FileOutcome::failed(target, e),
    }
}
