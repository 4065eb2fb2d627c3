//! Target file resolution for a Capacitor project
//!
//! Resolves the concrete files each platform patches:
//! - Android: android/app/build.gradle (falls back to build.gradle.kts)
//! - iOS: ios/App/App/Info.plist, any extra plists, ios/App/App.xcodeproj/project.pbxproj
//!
//! Every path can be overridden; relative paths are resolved against the project root.

use crate::domain::{Platform, TargetFile, TargetKind};
use std::path::{Path, PathBuf};

/// Default Android build descriptor (Groovy DSL)
pub const GRADLE_FILE: &str = "android/app/build.gradle";

/// Default Android build descriptor (Kotlin DSL)
pub const GRADLE_KTS_FILE: &str = "android/app/build.gradle.kts";

/// Default iOS Info.plist
pub const INFO_PLIST: &str = "ios/App/App/Info.plist";

/// Default Xcode project descriptor
pub const PBXPROJ_FILE: &str = "ios/App/App.xcodeproj/project.pbxproj";

/// Caller supplied target paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOverrides {
    pub gradle_file: Option<PathBuf>,
    pub info_plist: Option<PathBuf>,
    pub pbxproj: Option<PathBuf>,
    /// Additional plists patched after Info.plist, in order
    pub extra_plists: Vec<PathBuf>,
}

/// Resolves target files relative to a project root
#[derive(Debug, Clone)]
pub struct TargetResolver {
    root: PathBuf,
    overrides: TargetOverrides,
}

impl TargetResolver {
    /// Create a resolver for the project at `root`
    pub fn new(root: impl Into<PathBuf>, overrides: TargetOverrides) -> Self {
        Self {
            root: root.into(),
            overrides,
        }
    }

    /// Returns the project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the platform's project directory (android/ or ios/) exists
    pub fn has_project_dir(&self, platform: Platform) -> bool {
        self.root.join(platform.project_dir()).is_dir()
    }

    /// Returns the files to patch for a platform, in patch order
    pub fn targets(&self, platform: Platform) -> Vec<TargetFile> {
        match platform {
            Platform::Android => vec![self.gradle_target()],
            Platform::Ios => self.ios_targets(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        // join keeps absolute paths as they are
        self.root.join(path)
    }

    fn gradle_target(&self) -> TargetFile {
        let path = match &self.overrides.gradle_file {
            Some(path) => self.resolve(path),
            None => {
                let groovy = self.root.join(GRADLE_FILE);
                let kotlin = self.root.join(GRADLE_KTS_FILE);
                if !groovy.is_file() && kotlin.is_file() {
                    kotlin
                } else {
                    groovy
                }
            }
        };
        TargetFile::new(path, TargetKind::Gradle)
    }

    fn ios_targets(&self) -> Vec<TargetFile> {
        let info_plist = match &self.overrides.info_plist {
            Some(path) => self.resolve(path),
            None => self.root.join(INFO_PLIST),
        };

        let pbxproj = match &self.overrides.pbxproj {
            Some(path) => self.resolve(path),
            None => self.root.join(PBXPROJ_FILE),
        };

        let mut targets = vec![TargetFile::new(info_plist, TargetKind::Plist)];
        for extra in &self.overrides.extra_plists {
            let path = self.resolve(extra);
            if path == pbxproj || targets.iter().any(|t| t.path == path) {
                continue;
            }
            // extras without a recognised extension are taken as plists
            let target = TargetFile::detect(path.clone())
                .unwrap_or_else(|| TargetFile::new(path, TargetKind::Plist));
            targets.push(target);
        }

        targets.push(TargetFile::new(pbxproj, TargetKind::ProjectDescriptor));
        targets
    }
}

/// Split `--plist` values on commas, trimming whitespace and dropping empty entries
pub fn split_plist_list<S: AsRef<str>>(values: &[S]) -> Vec<PathBuf> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
