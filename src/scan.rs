//! Media asset discovery
//!
//! Scans an input directory for media files by extension. The scan is
//! non-recursive and the result is sorted, so repeated runs over the same
//! tree enumerate assets in the same order.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, VerifyError};

/// Default media extensions considered for verification
pub fn default_extensions() -> Vec<String> {
    vec!["mov".to_string()]
}

/// Collect media files under `input`, filtered by lowercase extension.
///
/// A single-file `input` passes through unchanged regardless of its
/// extension; a directory is scanned one level deep.
pub fn scan_media(input: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(VerifyError::InputReadError {
            path: input.to_path_buf(),
            message: "not a file or directory".to_string(),
            source: None,
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| VerifyError::InputReadError {
            path: input.to_path_buf(),
            message: format!("directory walk failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if has_matching_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn has_matching_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|wanted| *wanted == ext)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_filters_by_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mov"), b"x").unwrap();
        fs::write(dir.path().join("b.MOV"), b"x").unwrap();
        fs::write(dir.path().join("c.mp4"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let files = scan_media(dir.path(), &default_extensions()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["a.mov", "b.MOV"]);
    }

    #[test]
    fn test_scan_is_sorted_and_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.mov"), b"x").unwrap();
        fs::write(dir.path().join("a.mov"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.mov"), b"x").unwrap();

        let files = scan_media(dir.path(), &default_extensions()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0] < files[1]);
    }

    #[test]
    fn test_single_file_passes_through() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let files = scan_media(file.path(), &default_extensions()).unwrap();
        assert_eq!(files, vec![file.path().to_path_buf()]);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let err = scan_media(Path::new("no/such/dir"), &default_extensions()).unwrap_err();
        assert!(err.is_fatal());
    }
}
