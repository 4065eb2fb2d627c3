//! Version interpretation and per-platform derivation
//!
//! - `interpreter`: parses the package version string into a `SemanticVersion`
//! - `android`: derives versionName / versionCode
//! - `ios`: derives the marketing and build versions

mod android;
mod interpreter;
mod ios;

pub use android::{derive_android, version_code, MAJOR_WEIGHT, MAX_VERSION_CODE, MINOR_WEIGHT};
pub use interpreter::parse;
pub use ios::{derive_ios, BuildNumberPolicy};
