//! Version lookup in a plugin file's header comment

use crate::defaults::{VERSION_FIELD, VERSION_MARKER};
use crate::exceptions::{Result, WpkitError};
use log::trace;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Non-empty version string taken from a `* Version:` header line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PluginVersion(String);

impl PluginVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scan `reader` for the first line containing `* Version:`.
///
/// Everything after `Version:` on that line, trimmed, is the version. Only
/// the first marker line counts: an empty value there yields `None` rather
/// than falling through to later lines.
pub fn extract_version<R: BufRead>(reader: R) -> io::Result<Option<PluginVersion>> {
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.contains(VERSION_MARKER) {
            continue;
        }
        trace!("🔖 Version header on line {}: {}", number + 1, line.trim());
        let value = line
            .split_once(VERSION_FIELD)
            .map(|(_, rest)| rest.trim())
            .unwrap_or_default();
        if value.is_empty() {
            return Ok(None);
        }
        return Ok(Some(PluginVersion(value.to_string())));
    }
    Ok(None)
}

/// Read the version from the plugin file at `path`.
///
/// The version ends up in a release file name, so separators are rejected.
pub fn read_version(path: &Path) -> Result<PluginVersion> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => WpkitError::MissingSource(path.to_path_buf()),
        _ => WpkitError::IoError(e),
    })?;
    let version = extract_version(BufReader::new(file))?
        .ok_or_else(|| WpkitError::VersionNotFound(path.to_path_buf()))?;
    if version.as_str().contains(['/', '\\']) {
        return Err(WpkitError::InvalidVersion {
            path: path.to_path_buf(),
            version: version.0,
        });
    }
    Ok(version)
}
