// Centralized default values for both release tools

// =================================
// Image optimizer defaults
// =================================
pub const DEFAULT_IMAGE_SOURCE_DIR: &str = "images";
pub const DEFAULT_IMAGE_OUTPUT_DIR: &str = "images-optimized";
pub const DEFAULT_IMAGE_ARCHIVE: &str = "images.zip";
pub const DEFAULT_PROGRESS_INTERVAL: usize = 20; // Report every N files plus the last one
pub const IMAGE_EXTENSION: &str = "png"; // Matched case-sensitively, like a shell glob
pub const ARCHIVE_PREVIEW_ENTRIES: usize = 3; // Entry names echoed after the read-back

// =================================
// Plugin packager defaults
// =================================
pub const DEFAULT_PLUGIN_NAME: &str = "ml-wc-practitioners";
pub const DEFAULT_RELEASE_DIR: &str = "releases";
pub const PLUGIN_FILE_EXTENSION: &str = "php";
pub const VERSION_MARKER: &str = "* Version:";
pub const VERSION_FIELD: &str = "Version:";

// =================================
// Archive conventions
// =================================
pub const ARCHIVE_EXTENSION: &str = "zip";
pub const ENTRY_SEPARATOR: &str = "/";
