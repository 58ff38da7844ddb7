//! Error types for wpkit

use crate::exit_codes::{
    EXIT_ARCHIVE_ERROR, EXIT_CONFIG_ERROR, EXIT_ERROR, EXIT_IMAGE_ERROR, EXIT_IO_ERROR,
};
use std::fmt;
use std::path::PathBuf;

/// Main error type for wpkit operations
#[derive(Debug)]
pub enum WpkitError {
    /// A required input file or directory does not exist
    MissingSource(PathBuf),

    /// No usable `* Version:` line in the plugin header
    VersionNotFound(PathBuf),

    /// Header version cannot be used in a release file name
    InvalidVersion { path: PathBuf, version: String },

    /// Image could not be decoded
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Image could not be re-encoded or written
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Zip archive error
    Archive(zip::result::ZipError),

    /// Invalid glob pattern built from a configured directory
    Pattern(glob::PatternError),

    /// IO error
    IoError(std::io::Error),

    /// JSON serialization error
    JsonError(serde_json::Error),

    /// Generic error with message
    Generic(String),
}

impl WpkitError {
    /// Process exit code for this error class
    pub fn exit_code(&self) -> i32 {
        match self {
            WpkitError::MissingSource(_)
            | WpkitError::VersionNotFound(_)
            | WpkitError::InvalidVersion { .. } => EXIT_CONFIG_ERROR,
            WpkitError::Decode { .. } | WpkitError::Encode { .. } => EXIT_IMAGE_ERROR,
            WpkitError::Archive(_) => EXIT_ARCHIVE_ERROR,
            WpkitError::IoError(_) => EXIT_IO_ERROR,
            WpkitError::Pattern(_) | WpkitError::JsonError(_) | WpkitError::Generic(_) => {
                EXIT_ERROR
            }
        }
    }
}

impl fmt::Display for WpkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WpkitError::MissingSource(path) => write!(f, "{} not found!", path.display()),
            WpkitError::VersionNotFound(path) => {
                write!(f, "Could not find version in {}!", path.display())
            }
            WpkitError::InvalidVersion { path, version } => write!(
                f,
                "Version '{version}' in {} contains a path separator",
                path.display()
            ),
            WpkitError::Decode { path, source } => {
                write!(f, "Failed to decode {}: {source}", path.display())
            }
            WpkitError::Encode { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
            WpkitError::Archive(err) => write!(f, "Archive error: {err}"),
            WpkitError::Pattern(err) => write!(f, "Invalid file pattern: {err}"),
            WpkitError::IoError(err) => write!(f, "IO error: {err}"),
            WpkitError::JsonError(err) => write!(f, "JSON error: {err}"),
            WpkitError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for WpkitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WpkitError::Decode { source, .. } | WpkitError::Encode { source, .. } => Some(source),
            WpkitError::Archive(err) => Some(err),
            WpkitError::Pattern(err) => Some(err),
            WpkitError::IoError(err) => Some(err),
            WpkitError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WpkitError {
    fn from(err: std::io::Error) -> Self {
        WpkitError::IoError(err)
    }
}

impl From<zip::result::ZipError> for WpkitError {
    fn from(err: zip::result::ZipError) -> Self {
        WpkitError::Archive(err)
    }
}

impl From<glob::PatternError> for WpkitError {
    fn from(err: glob::PatternError) -> Self {
        WpkitError::Pattern(err)
    }
}

impl From<glob::GlobError> for WpkitError {
    fn from(err: glob::GlobError) -> Self {
        WpkitError::IoError(err.into())
    }
}

impl From<serde_json::Error> for WpkitError {
    fn from(err: serde_json::Error) -> Self {
        WpkitError::JsonError(err)
    }
}

/// Result type for wpkit operations
pub type Result<T> = std::result::Result<T, WpkitError>;
