//! Streaming content checksums for asset identity
//!
//! The checksum is an opaque identity field on the output record; nothing
//! downstream interprets it beyond equality.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, VerifyError};

const BLOCK_SIZE: usize = 8192;

/// Compute the SHA-256 digest of a file, hex-encoded lowercase.
///
/// Reads in fixed-size blocks so arbitrarily large media files never load
/// into memory at once.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).map_err(|e| VerifyError::input_read(path, "cannot open file", e))?;

    let mut hasher = Sha256::new();
    let mut block = [0u8; BLOCK_SIZE];
    loop {
        let n = file
            .read(&mut block)
            .map_err(|e| VerifyError::input_read(path, "read failed", e))?;
        if n == 0 {
            break;
        }
        hasher.update(&block[..n]);
    }

    Ok(hex_lower(hasher.finalize().as_slice()))
}

/// Compute the SHA-256 digest of an in-memory buffer, hex-encoded lowercase
pub fn sha256_bytes(bytes: &[u8]) -> String {
    hex_lower(Sha256::digest(bytes).as_slice())
}

fn hex_lower(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_known_digest_of_empty_input() {
        assert_eq!(
            sha256_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_digest_of_abc() {
        assert_eq!(
            sha256_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_file_digest_matches_buffer_digest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // span several read blocks
        let payload = vec![0xA5u8; BLOCK_SIZE * 3 + 17];
        file.write_all(&payload).unwrap();

        let from_file = sha256_file(file.path()).unwrap();
        assert_eq!(from_file, sha256_bytes(&payload));
    }

    #[test]
    fn test_missing_file_is_input_read_error() {
        let err = sha256_file(Path::new("does/not/exist.mov")).unwrap_err();
        assert!(matches!(err, VerifyError::InputReadError { .. }));
        assert!(err.is_fatal());
    }
}
