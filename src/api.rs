//! High-level API for wpkit operations

use crate::exceptions::Result;
use crate::images::{self, ImageOptimizerConfig, OptimizeReport, Progress};
use crate::plugin::{self, PackageReport, PluginPackagerConfig};
use std::time::Instant;

/// Optimize a directory of PNGs and bundle them into a zip
pub fn optimize_images<F>(config: &ImageOptimizerConfig, on_progress: F) -> Result<OptimizeReport>
where
    F: FnMut(Progress),
{
    log::debug!("🚀 Image optimizer starting: {:?}", config);
    let started = Instant::now();

    let report = images::run(config, on_progress)?;

    log::info!(
        "✅ Optimized {} images into {:?} in {:.2?}",
        report.images.len(),
        report.archive_path,
        started.elapsed()
    );
    Ok(report)
}

/// Package a plugin source file into its release archives
pub fn package_plugin(config: &PluginPackagerConfig) -> Result<PackageReport> {
    log::debug!("🚀 Plugin packager starting: {:?}", config);
    let started = Instant::now();

    let report = plugin::run(config)?;

    log::info!(
        "✅ Packaged {} {} in {:.2?}",
        report.plugin_name,
        report.version,
        started.elapsed()
    );
    Ok(report)
}
