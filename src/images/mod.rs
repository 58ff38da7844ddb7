//! PNG batch optimizer
//!
//! Re-encodes every `*.png` in a source directory into an output directory,
//! then bundles the output directory into a flat zip.

pub mod batch;
pub mod config;
pub mod transform;

pub use batch::{OptimizeReport, Progress, SizeTotals, build_archive, collect_pngs, run};
pub use config::ImageOptimizerConfig;
pub use transform::{ImageOutcome, OutputLayout, is_alpha_opaque, optimize_image, output_layout};
