//! Utility functions for wpkit

use std::env;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Check if an environment variable is set to a truthy value
/// Accepts: "1", "true", "on", "yes", "t" (case insensitive)
pub fn is_env_true(key: &str) -> bool {
    match env::var(key) {
        Ok(val) => {
            let val_lower = val.to_lowercase();
            matches!(val_lower.as_str(), "1" | "true" | "on" | "yes" | "t")
        }
        Err(_) => false,
    }
}

/// Byte count as megabytes
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Percentage saved going from `original` to `optimized` bytes.
///
/// `None` when there is nothing to compare against (zero original bytes).
/// Negative when the output grew.
pub fn percent_saved(original: u64, optimized: u64) -> Option<f64> {
    if original == 0 {
        return None;
    }
    Some((original as f64 - optimized as f64) / original as f64 * 100.0)
}

/// Whether progress should be reported after the `index`-th (1-based) of `total` items
pub fn is_progress_tick(index: usize, total: usize, interval: usize) -> bool {
    index == total || (interval > 0 && index % interval == 0)
}
