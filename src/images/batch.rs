//! Whole-directory optimizer run and image archive

use super::config::ImageOptimizerConfig;
use super::transform::{ImageOutcome, optimize_image};
use crate::archive::{ArchiveEntry, ArchiveListing, inspect_archive, write_archive};
use crate::defaults::IMAGE_EXTENSION;
use crate::exceptions::{Result, WpkitError};
use crate::utils::{is_progress_tick, percent_saved};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Progress events handed to the caller's callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Source directory listed; fired once before any file is touched
    Found { total: usize },
    /// `processed` of `total` files written
    Processed { processed: usize, total: usize },
}

/// Cumulative byte counts across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeTotals {
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

impl SizeTotals {
    pub fn add(&mut self, outcome: &ImageOutcome) {
        self.original_bytes += outcome.original_bytes;
        self.optimized_bytes += outcome.optimized_bytes;
    }

    /// Bytes saved; negative if the output grew
    pub fn saved_bytes(&self) -> i64 {
        self.original_bytes as i64 - self.optimized_bytes as i64
    }

    /// Percentage saved, `None` when nothing was processed
    pub fn percent_saved(&self) -> Option<f64> {
        percent_saved(self.original_bytes, self.optimized_bytes)
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeReport {
    pub images: Vec<ImageOutcome>,
    pub totals: SizeTotals,
    /// PNGs from earlier runs deleted before this one
    pub stale_removed: usize,
    pub output_dir: PathBuf,
    pub archive_path: PathBuf,
    pub archive: ArchiveListing,
}

/// `*.png` files directly inside `dir`, sorted by path
pub fn collect_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(WpkitError::MissingSource(dir.to_path_buf()));
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        IMAGE_EXTENSION
    );
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Delete every `*.png` already in `dir`; returns how many were removed
fn purge_stale(dir: &Path) -> Result<usize> {
    let stale = collect_pngs(dir)?;
    for path in &stale {
        debug!("🧹 Removing stale output {:?}", path);
        fs::remove_file(path)?;
    }
    Ok(stale.len())
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Zip every `*.png` currently in `dir` as flat entries, then read the archive back.
///
/// Membership comes from a fresh listing of the directory, not from what the
/// current run wrote.
pub fn build_archive(dir: &Path, archive_path: &Path) -> Result<ArchiveListing> {
    let entries = collect_pngs(dir)?
        .iter()
        .map(|path| ArchiveEntry::flat(path))
        .collect::<Result<Vec<_>>>()?;

    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_archive(archive_path, &entries)?;
    inspect_archive(archive_path)
}

/// Optimize every PNG in the source directory and build the archive.
///
/// The first failing file aborts the run. `on_progress` gets one `Found`
/// event after the source listing, then `Processed` every
/// `progress_interval` files and on the last one.
pub fn run<F>(config: &ImageOptimizerConfig, mut on_progress: F) -> Result<OptimizeReport>
where
    F: FnMut(Progress),
{
    let sources = collect_pngs(&config.source_dir)?;
    info!(
        "🔍 Found {} images in {:?}",
        sources.len(),
        config.source_dir
    );
    on_progress(Progress::Found {
        total: sources.len(),
    });

    fs::create_dir_all(&config.output_dir)?;
    if same_directory(&config.source_dir, &config.output_dir) {
        return Err(WpkitError::Generic(format!(
            "Output directory {} must differ from the source directory",
            config.output_dir.display()
        )));
    }

    let stale_removed = if config.clean_output {
        purge_stale(&config.output_dir)?
    } else {
        0
    };
    if stale_removed > 0 {
        info!("🧹 Removed {} stale images from {:?}", stale_removed, config.output_dir);
    }

    let total = sources.len();
    let mut totals = SizeTotals::default();
    let mut images = Vec::with_capacity(total);

    for (i, src) in sources.iter().enumerate() {
        let processed = i + 1;
        let file_name = src
            .file_name()
            .ok_or_else(|| WpkitError::Generic(format!("No file name in {}", src.display())))?;
        let dst = config.output_dir.join(file_name);

        let outcome = optimize_image(src, &dst)?;
        totals.add(&outcome);
        images.push(outcome);

        if is_progress_tick(processed, total, config.progress_interval) {
            on_progress(Progress::Processed { processed, total });
        }
    }

    info!(
        "📊 Totals: {} -> {} bytes",
        totals.original_bytes, totals.optimized_bytes
    );

    let archive = build_archive(&config.output_dir, &config.archive_path)?;

    Ok(OptimizeReport {
        images,
        totals,
        stale_removed,
        output_dir: config.output_dir.clone(),
        archive_path: config.archive_path.clone(),
        archive,
    })
}
