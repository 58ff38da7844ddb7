//! Release archive creation for a single-file plugin

use super::config::PluginPackagerConfig;
use super::version_header::{PluginVersion, read_version};
use crate::archive::{ArchiveEntry, ArchiveListing, inspect_archive, join_entry_path, write_archive};
use crate::checksums::sha256_file;
use crate::exceptions::{Result, WpkitError};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Outcome of a packaging run
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub plugin_name: String,
    pub version: PluginVersion,
    /// Entry path of the plugin file inside the archive
    pub entry_name: String,
    pub base_archive: PathBuf,
    pub versioned_archive: PathBuf,
    pub listing: ArchiveListing,
    /// SHA-256 of the base archive; the versioned copy is byte-identical
    pub checksum: String,
}

impl PackageReport {
    /// Entry names that contain a backslash
    pub fn backslash_entries(&self) -> Vec<&str> {
        self.listing.backslash_entries()
    }
}

/// Package the plugin file into `<plugin>.zip` and `<plugin>-<version>.zip`.
///
/// Both preconditions (plugin file present, version header present) are
/// checked before the release directory is touched, so a failure leaves any
/// existing archives as they were.
pub fn run(config: &PluginPackagerConfig) -> Result<PackageReport> {
    let plugin_path = config.plugin_path();
    if !plugin_path.is_file() {
        return Err(WpkitError::MissingSource(plugin_path));
    }

    let version = read_version(&plugin_path)?;
    info!("🔖 Plugin {} version {}", config.plugin_name, version);

    fs::create_dir_all(&config.release_dir)?;

    let base_archive = config.base_archive_path();
    if base_archive.exists() {
        debug!("🧹 Removing previous archive {:?}", base_archive);
        fs::remove_file(&base_archive)?;
    }

    let file_name = plugin_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| WpkitError::Generic(format!("No file name in {}", plugin_path.display())))?;
    let entry_name = join_entry_path(&[config.plugin_name.as_str(), file_name.as_str()]);

    write_archive(&base_archive, &[ArchiveEntry::new(entry_name.as_str(), &plugin_path)])?;
    info!("📦 Created {:?} with entry {}", base_archive, entry_name);

    let listing = inspect_archive(&base_archive)?;
    for name in listing.backslash_entries() {
        warn!("⚠️ Backslash in entry {:?}; WordPress may reject the upload", name);
    }

    let versioned_archive = config.versioned_archive_path(version.as_str());
    fs::copy(&base_archive, &versioned_archive)?;
    info!("📋 Copied to {:?}", versioned_archive);

    let checksum = sha256_file(&base_archive)?;
    debug!("🔐 {} {:?}", checksum, base_archive);

    Ok(PackageReport {
        plugin_name: config.plugin_name.clone(),
        version,
        entry_name,
        base_archive,
        versioned_archive,
        listing,
        checksum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::ZipArchive;

    const PLUGIN_SOURCE: &str =
        "<?php\n/**\n * Plugin Name: Shop Tools\n * Version: 2.3.1\n */\necho 'shop';\n";

    fn plugin_dir(source: &str) -> (TempDir, PluginPackagerConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config = PluginPackagerConfig::new("shop-tools", temp_dir.path());
        fs::write(config.plugin_path(), source).unwrap();
        (temp_dir, config)
    }

    fn read_entry(zip_path: &Path, name: &str) -> String {
        let mut archive = ZipArchive::new(File::open(zip_path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn test_creates_both_archives() {
        let (temp_dir, config) = plugin_dir(PLUGIN_SOURCE);

        let report = run(&config).unwrap();

        let releases = temp_dir.path().join("releases");
        assert_eq!(report.version.as_str(), "2.3.1");
        assert_eq!(report.base_archive, releases.join("shop-tools.zip"));
        assert_eq!(report.versioned_archive, releases.join("shop-tools-2.3.1.zip"));
        assert!(report.base_archive.exists());
        assert!(report.versioned_archive.exists());

        assert_eq!(report.entry_name, "shop-tools/shop-tools.php");
        assert_eq!(report.listing.entry_names, vec!["shop-tools/shop-tools.php"]);
        assert!(report.backslash_entries().is_empty());
        assert_eq!(
            read_entry(&report.base_archive, "shop-tools/shop-tools.php"),
            PLUGIN_SOURCE
        );
    }

    #[test]
    fn test_archives_are_byte_identical() {
        let (_temp_dir, config) = plugin_dir(PLUGIN_SOURCE);

        let report = run(&config).unwrap();

        let base = fs::read(&report.base_archive).unwrap();
        let versioned = fs::read(&report.versioned_archive).unwrap();
        assert_eq!(base, versioned);
        assert_eq!(sha256_file(&report.versioned_archive).unwrap(), report.checksum);
    }

    #[test]
    fn test_stale_base_archive_is_replaced() {
        let (temp_dir, config) = plugin_dir(PLUGIN_SOURCE);
        let releases = temp_dir.path().join("releases");
        fs::create_dir_all(&releases).unwrap();
        fs::write(releases.join("shop-tools.zip"), b"stale bytes").unwrap();

        let report = run(&config).unwrap();

        assert_eq!(report.listing.len(), 1);
        assert_ne!(fs::read(&report.base_archive).unwrap(), b"stale bytes");
    }

    #[test]
    fn test_missing_version_writes_nothing() {
        let (temp_dir, config) = plugin_dir("<?php\n/**\n * Plugin Name: Shop Tools\n */\n");
        let releases = temp_dir.path().join("releases");
        fs::create_dir_all(&releases).unwrap();
        fs::write(releases.join("shop-tools.zip"), b"previous release").unwrap();

        let err = run(&config).unwrap_err();

        assert!(matches!(err, WpkitError::VersionNotFound(_)));
        assert_ne!(err.exit_code(), 0);
        assert_eq!(
            fs::read(releases.join("shop-tools.zip")).unwrap(),
            b"previous release"
        );
        assert_eq!(fs::read_dir(&releases).unwrap().count(), 1);
    }

    #[test]
    fn test_version_with_separator_writes_nothing() {
        let (temp_dir, config) = plugin_dir("<?php\n/**\n * Version: 1.0/beta\n */\n");

        let err = run(&config).unwrap_err();

        assert!(matches!(err, WpkitError::InvalidVersion { .. }));
        assert_eq!(err.exit_code(), crate::exit_codes::EXIT_CONFIG_ERROR);
        assert!(!config.base_archive_path().exists());
        assert!(!temp_dir.path().join("releases").exists());
    }

    #[test]
    fn test_missing_plugin_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = PluginPackagerConfig::new("shop-tools", temp_dir.path());

        let err = run(&config).unwrap_err();

        assert!(matches!(err, WpkitError::MissingSource(_)));
        assert_ne!(err.exit_code(), 0);
        assert!(!temp_dir.path().join("releases").exists());
    }

    #[test]
    fn test_custom_plugin_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = PluginPackagerConfig::new("shop-tools", temp_dir.path())
            .with_plugin_file("main.php")
            .with_release_dir(temp_dir.path().join("dist"));
        fs::write(config.plugin_path(), PLUGIN_SOURCE).unwrap();

        let report = run(&config).unwrap();

        assert_eq!(report.entry_name, "shop-tools/main.php");
        assert!(temp_dir.path().join("dist").join("shop-tools-2.3.1.zip").exists());
    }
}
