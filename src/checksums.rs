//! Checksum utilities with prefixed format.
//!
//! Format: "algorithm:hexvalue" (e.g., "sha256:cafe8008...")

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// Streaming SHA-256 of everything `reader` yields
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut hasher = Sha256::new();
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

/// SHA-256 of a file on disk
pub fn sha256_file(path: &Path) -> io::Result<String> {
    sha256_reader(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sha256_known_value() {
        let digest = sha256_reader(&b"abc"[..]).unwrap();
        assert_eq!(
            digest,
            "sha256:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_file_matches_reader() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        std::fs::write(&path, vec![7u8; BUFFER_SIZE * 2 + 5]).unwrap();

        let from_file = sha256_file(&path).unwrap();
        let from_reader = sha256_reader(&vec![7u8; BUFFER_SIZE * 2 + 5][..]).unwrap();
        assert_eq!(from_file, from_reader);
    }
}
