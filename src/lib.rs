//! wpkit - release helpers for a WordPress catalog
//!
//! Two independent tools share this crate: a PNG batch optimizer that
//! bundles its output into a flat zip, and a plugin packager that builds
//! versioned release archives from a plugin's header comment.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::type_complexity,

    // Best practices
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod api;
pub mod archive;
pub mod checksums;
pub mod defaults;
pub mod exceptions;
pub mod exit_codes;
pub mod images;
pub mod logger;
pub mod plugin;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{optimize_images, package_plugin};
pub use exceptions::{Result, WpkitError};
pub use images::{ImageOptimizerConfig, OptimizeReport};
pub use plugin::{PackageReport, PluginPackagerConfig};
