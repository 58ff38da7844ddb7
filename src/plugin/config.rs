//! Plugin packager configuration

use crate::defaults::{
    ARCHIVE_EXTENSION, DEFAULT_PLUGIN_NAME, DEFAULT_RELEASE_DIR, PLUGIN_FILE_EXTENSION,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What to package and where the release archives go
#[derive(Debug, Clone, Serialize)]
pub struct PluginPackagerConfig {
    /// Plugin slug; also the folder name inside the archive
    pub plugin_name: String,
    /// Main plugin file name, relative to `source_dir`
    pub plugin_file: String,
    /// Directory holding the plugin file
    pub source_dir: PathBuf,
    /// Directory receiving the archives
    pub release_dir: PathBuf,
}

impl Default for PluginPackagerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PLUGIN_NAME, Path::new(""))
    }
}

impl PluginPackagerConfig {
    /// `<name>.php` in `source_dir`, released into `source_dir/releases`
    pub fn new(plugin_name: impl Into<String>, source_dir: &Path) -> Self {
        let plugin_name = plugin_name.into();
        Self {
            plugin_file: format!("{plugin_name}.{PLUGIN_FILE_EXTENSION}"),
            plugin_name,
            source_dir: source_dir.to_path_buf(),
            release_dir: source_dir.join(DEFAULT_RELEASE_DIR),
        }
    }

    pub fn with_plugin_file(mut self, file: impl Into<String>) -> Self {
        self.plugin_file = file.into();
        self
    }

    pub fn with_release_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.release_dir = dir.into();
        self
    }

    /// Full path of the plugin source file
    pub fn plugin_path(&self) -> PathBuf {
        self.source_dir.join(&self.plugin_file)
    }

    /// `<release_dir>/<plugin>.zip`
    pub fn base_archive_path(&self) -> PathBuf {
        self.release_dir
            .join(format!("{}.{}", self.plugin_name, ARCHIVE_EXTENSION))
    }

    /// `<release_dir>/<plugin>-<version>.zip`, version verbatim
    pub fn versioned_archive_path(&self, version: &str) -> PathBuf {
        self.release_dir
            .join(format!("{}-{}.{}", self.plugin_name, version, ARCHIVE_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PluginPackagerConfig::default();
        assert_eq!(config.plugin_name, "ml-wc-practitioners");
        assert_eq!(config.plugin_file, "ml-wc-practitioners.php");
        assert_eq!(config.plugin_path(), PathBuf::from("ml-wc-practitioners.php"));
        assert_eq!(
            config.base_archive_path(),
            PathBuf::from("releases").join("ml-wc-practitioners.zip")
        );
    }

    #[test]
    fn test_versioned_name_has_no_prefix() {
        let config = PluginPackagerConfig::new("shop-tools", Path::new("/work"));
        assert_eq!(
            config.versioned_archive_path("1.2.0"),
            PathBuf::from("/work/releases/shop-tools-1.2.0.zip")
        );
    }

    #[test]
    fn test_overrides() {
        let config = PluginPackagerConfig::new("shop-tools", Path::new("/work"))
            .with_plugin_file("main.php")
            .with_release_dir("/dist");
        assert_eq!(config.plugin_path(), PathBuf::from("/work/main.php"));
        assert_eq!(config.base_archive_path(), PathBuf::from("/dist/shop-tools.zip"));
    }
}
