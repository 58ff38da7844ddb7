//! WordPress plugin release packager
//!
//! Builds `<plugin>.zip` holding `<plugin>/<file>`, then copies it to
//! `<plugin>-<version>.zip` using the version from the plugin header.

pub mod config;
pub mod packager;
pub mod version_header;

pub use config::PluginPackagerConfig;
pub use packager::{PackageReport, run};
pub use version_header::{PluginVersion, extract_version, read_version};
