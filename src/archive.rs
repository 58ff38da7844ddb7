//! Zip archive writing and read-back inspection
//!
//! Entry names are built here and nowhere else, so both tools get the same
//! guarantee: names are `/`-delimited whatever the host separator is.

use crate::defaults::ENTRY_SEPARATOR;
use crate::exceptions::{Result, WpkitError};
use log::{debug, trace, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// One file on disk to be stored in an archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Entry path inside the archive
    pub name: String,
    /// File whose contents are stored
    pub source: PathBuf,
}

impl ArchiveEntry {
    /// Store `source` under `name`
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Store `source` under its bare file name
    pub fn flat(source: &Path) -> Result<Self> {
        Ok(Self::new(archive_entry_name(source)?, source))
    }
}

/// Entry names and size of an archive, as read back from disk
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveListing {
    pub entry_names: Vec<String>,
    pub size_bytes: u64,
}

impl ArchiveListing {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.entry_names.len()
    }

    /// True when the archive holds no entries
    pub fn is_empty(&self) -> bool {
        self.entry_names.is_empty()
    }

    /// First `count` entry names in archive order
    pub fn preview(&self, count: usize) -> &[String] {
        &self.entry_names[..count.min(self.entry_names.len())]
    }

    /// Entry names containing a backslash
    pub fn backslash_entries(&self) -> Vec<&str> {
        self.entry_names
            .iter()
            .filter(|name| name.contains('\\'))
            .map(String::as_str)
            .collect()
    }
}

/// Stands in for separator characters inside a single flat name
const FLAT_NAME_REPLACEMENT: &str = "_";

/// Flat entry name for a file: its bare file name with no directory part.
///
/// The result never contains a separator. A backslash in the file name
/// itself (legal on Unix) becomes `_` instead of opening a subfolder.
pub fn archive_entry_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| WpkitError::Generic(format!("No file name in {}", path.display())))?;
    Ok(name.replace(['/', '\\'], FLAT_NAME_REPLACEMENT))
}

/// Join path components into an archive entry path using `/`.
///
/// Backslashes inside a component are treated as separators too, so a name
/// that came from a Windows-style path cannot leak one into the archive.
pub fn join_entry_path(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split(['/', '\\']))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Create (or truncate) a deflate-compressed zip at `path` holding `entries` in order
pub fn write_archive(path: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    debug!("📦 Writing archive {:?} with {} entries", path, entries.len());

    let file = File::create(path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        trace!("📝 Adding entry {} from {:?}", entry.name, entry.source);
        let mut source = File::open(&entry.source)?;
        writer.start_file(entry.name.as_str(), options)?;
        io::copy(&mut source, &mut writer)?;
    }

    let mut file = writer.finish()?;
    file.flush()?;
    Ok(())
}

/// Reopen an archive read-only and list its entries
pub fn inspect_archive(path: &Path) -> Result<ArchiveListing> {
    let file = File::open(path)?;
    let size_bytes = file.metadata()?.len();
    let mut archive = ZipArchive::new(file)?;

    let mut entry_names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        entry_names.push(entry.name().to_string());
    }

    let listing = ArchiveListing {
        entry_names,
        size_bytes,
    };
    for name in listing.backslash_entries() {
        warn!("⚠️ Backslash found in archive entry {:?} of {:?}", name, path);
    }
    debug!(
        "🔍 Archive {:?}: {} entries, {} bytes",
        path,
        listing.len(),
        listing.size_bytes
    );
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    fn write_source(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_join_entry_path_uses_forward_slashes() {
        assert_eq!(join_entry_path(&["plugin", "plugin.php"]), "plugin/plugin.php");
        assert_eq!(join_entry_path(&["plugin", "sub\\file.php"]), "plugin/sub/file.php");
        assert_eq!(join_entry_path(&["/plugin/", "file.php"]), "plugin/file.php");
    }

    #[test]
    fn test_archive_entry_name_strips_directories() {
        let path = PathBuf::from("images-optimized").join("a.png");
        assert_eq!(archive_entry_name(&path).unwrap(), "a.png");
        assert!(archive_entry_name(Path::new("/")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_entry_name_never_nests() {
        let path = PathBuf::from("out").join("sub\\a.png");
        assert_eq!(archive_entry_name(&path).unwrap(), "sub_a.png");
    }

    #[test]
    fn test_write_and_inspect_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");

        let b = write_source(temp_dir.path(), "b.png", b"bbbb");
        let a = write_source(temp_dir.path(), "a.txt", b"hello");
        let entries = vec![
            ArchiveEntry::flat(&b).unwrap(),
            ArchiveEntry::new("dir/a.txt", &a),
        ];
        write_archive(&zip_path, &entries).unwrap();

        let listing = inspect_archive(&zip_path).unwrap();
        assert_eq!(listing.entry_names, vec!["b.png", "dir/a.txt"]);
        assert_eq!(listing.preview(1), ["b.png".to_string()]);
        assert_eq!(listing.preview(10).len(), 2);
        assert!(listing.backslash_entries().is_empty());
        assert_eq!(listing.size_bytes, fs::metadata(&zip_path).unwrap().len());

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut entry = archive.by_name("dir/a.txt").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello");
    }

    #[test]
    fn test_write_truncates_existing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let source = write_source(temp_dir.path(), "data.bin", &[1, 2, 3]);
        let entry = |name: &str| ArchiveEntry::new(name, &source);

        write_archive(&zip_path, &[entry("old.png"), entry("older.png")]).unwrap();
        write_archive(&zip_path, &[entry("new.png")]).unwrap();

        let listing = inspect_archive(&zip_path).unwrap();
        assert_eq!(listing.entry_names, vec!["new.png"]);
    }

    #[test]
    fn test_empty_archive_is_readable() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("empty.zip");

        write_archive(&zip_path, &[]).unwrap();

        let listing = inspect_archive(&zip_path).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_backslash_entries_detected() {
        let listing = ArchiveListing {
            entry_names: vec!["ok/file.php".to_string(), "bad\\file.php".to_string()],
            size_bytes: 0,
        };
        assert_eq!(listing.backslash_entries(), vec!["bad\\file.php"]);
    }
}
