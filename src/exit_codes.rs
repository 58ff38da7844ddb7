//! Standard exit codes for wpkit binaries
//!
//! Both the image optimizer and the plugin packager report failures through
//! these codes so scripts wrapping them can tell failure classes apart.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Invalid command-line arguments
pub const EXIT_INVALID_ARGS: i32 = 105;

/// I/O error (file not found, permission denied, disk error)
pub const EXIT_IO_ERROR: i32 = 106;

/// Configuration error (missing plugin source, missing version header)
pub const EXIT_CONFIG_ERROR: i32 = 109;

/// Image decode or encode failure
pub const EXIT_IMAGE_ERROR: i32 = 111;

/// Zip archive could not be written or read back
pub const EXIT_ARCHIVE_ERROR: i32 = 112;
