//! Image optimizer configuration

use crate::defaults::{
    DEFAULT_IMAGE_ARCHIVE, DEFAULT_IMAGE_OUTPUT_DIR, DEFAULT_IMAGE_SOURCE_DIR,
    DEFAULT_PROGRESS_INTERVAL,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where the optimizer reads, writes and archives
#[derive(Debug, Clone, Serialize)]
pub struct ImageOptimizerConfig {
    /// Directory scanned for `*.png`
    pub source_dir: PathBuf,
    /// Directory receiving the re-encoded files
    pub output_dir: PathBuf,
    /// Zip written from the output directory
    pub archive_path: PathBuf,
    /// Report progress every N files (the last file is always reported)
    pub progress_interval: usize,
    /// Delete PNGs left in the output directory by earlier runs
    pub clean_output: bool,
}

impl Default for ImageOptimizerConfig {
    fn default() -> Self {
        Self::in_dir(Path::new(""))
    }
}

impl ImageOptimizerConfig {
    /// Default layout rooted at `base`
    pub fn in_dir(base: &Path) -> Self {
        Self {
            source_dir: base.join(DEFAULT_IMAGE_SOURCE_DIR),
            output_dir: base.join(DEFAULT_IMAGE_OUTPUT_DIR),
            archive_path: base.join(DEFAULT_IMAGE_ARCHIVE),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            clean_output: true,
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_archive_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_path = path.into();
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Keep PNGs from earlier runs; they end up in the archive too
    pub fn keep_stale_output(mut self) -> Self {
        self.clean_output = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = ImageOptimizerConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("images"));
        assert_eq!(config.output_dir, PathBuf::from("images-optimized"));
        assert_eq!(config.archive_path, PathBuf::from("images.zip"));
        assert_eq!(config.progress_interval, 20);
        assert!(config.clean_output);
    }

    #[test]
    fn test_in_dir_and_overrides() {
        let config = ImageOptimizerConfig::in_dir(Path::new("/srv/catalog"))
            .with_archive_path("/tmp/out.zip")
            .with_progress_interval(5)
            .keep_stale_output();
        assert_eq!(config.source_dir, PathBuf::from("/srv/catalog/images"));
        assert_eq!(config.archive_path, PathBuf::from("/tmp/out.zip"));
        assert_eq!(config.progress_interval, 5);
        assert!(!config.clean_output);
    }
}
