//! MD5 checksum computation for dataset archives.
//!
//! Archives are tens of gigabytes, so files are streamed through the hasher
//! with a fixed-size buffer.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use md5::{Digest, Md5};
use tracing::debug;

/// Buffer size for reading files during checksum computation.
const BUFFER_SIZE: usize = 65536; // 64 KB

/// Compute the lower-case hex MD5 digest of a file.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn compute_file_md5(path: &Path) -> io::Result<String> {
    debug!("Computing MD5 for: {}", path.display());

    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    let hex_hash = hex::encode(hasher.finalize());
    debug!("MD5: {}", hex_hash);
    Ok(hex_hash)
}

/// Normalize a hex digest for comparison.
pub fn normalize_digest(digest: &str) -> String {
    digest.trim().to_ascii_lowercase()
}

/// Returns true if `digest` looks like an MD5 hex digest.
pub fn is_md5_hex(digest: &str) -> bool {
    let digest = digest.trim();
    digest.len() == 32 && digest.chars().all(|c| c.is_ascii_hexdigit())
}
