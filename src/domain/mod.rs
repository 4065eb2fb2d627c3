//! Core domain models for versync
//!
//! This module contains the fundamental types used throughout the application:
//! - Platform types and platform selection
//! - The source semantic version and the per-platform version descriptors
//! - Target file references
//! - Per-file patch results and the overall sync report

mod patch_result;
mod platform;
mod summary;
mod target;
mod version;

pub use patch_result::{FieldChange, FileOutcome, PatchResult};
pub use platform::{Platform, PlatformSelection};
pub use summary::{Derived, PlatformReport, PlatformStatus, SyncReport};
pub use target::{TargetFile, TargetKind};
pub use version::{AndroidVersionDescriptor, IosVersionDescriptor, SemanticVersion};
