//! Native platform definitions for a Capacitor project

use serde::Serialize;
use std::fmt;

/// Native platforms a package version is synced into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android project (Gradle)
    Android,
    /// iOS project (Info.plist + Xcode project)
    Ios,
}

impl Platform {
    /// Returns the project directory name relative to the package root
    pub fn project_dir(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }

    /// Returns the display name for this platform
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Android => "Android",
            Platform::Ios => "iOS",
        }
    }

    /// Returns all supported platforms
    pub fn all() -> &'static [Platform] {
        &[Platform::Android, Platform::Ios]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which platforms a sync run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSelection {
    /// Sync the Android project
    pub android: bool,
    /// Sync the iOS project
    pub ios: bool,
    /// True when the user named the platforms; false when both were implied
    pub explicit: bool,
}

impl PlatformSelection {
    /// Builds a selection from the two flags; neither flag selects both platforms
    pub fn from_flags(android: bool, ios: bool) -> Self {
        if !android && !ios {
            Self::both()
        } else {
            Self {
                android,
                ios,
                explicit: true,
            }
        }
    }

    /// Both platforms, implicitly selected
    pub fn both() -> Self {
        Self {
            android: true,
            ios: true,
            explicit: false,
        }
    }

    /// Returns true if the platform is part of this run
    pub fn includes(&self, platform: Platform) -> bool {
        match platform {
            Platform::Android => self.android,
            Platform::Ios => self.ios,
        }
    }

    /// Returns the selected platforms in a fixed order
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::all()
            .iter()
            .copied()
            .filter(|p| self.includes(*p))
            .collect()
    }
}

impl Default for PlatformSelection {
    fn default() -> Self {
        Self::both()
    }
}
