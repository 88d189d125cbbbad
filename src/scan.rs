//! Directory scanning for template uploads.
//!
//! Collects candidate template filenames from a directory so they can be
//! parsed and grouped. Only names leave this module; the parser never touches
//! the filesystem.
//!
//! ```text
//! uploads/
//! ├── girl_young_hhhh5_n.jpg   ✓
//! ├── girl_young_hhhh5_w.jpg   ✓
//! ├── notes.txt                ✗ (extension not configured)
//! └── batch-2/
//!     └── man_elder_q1w2e.png  ✓ (only with scan.recursive)
//! ```
//!
//! Files are matched on extension alone, case-insensitively. Whether the name
//! follows the template grammar is decided later by the parser, so a
//! misnamed `IMG_0001.JPG` is collected and then reported as invalid.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Collect template file names under `root`, sorted.
///
/// Returns bare file names (`girl_young_hhhh5_n.jpg`), not paths: the template
/// grammar covers the name only, and subdirectories carry no meaning.
pub fn collect_template_names(root: &Path, config: &ScanConfig) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(max_depth) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_template_extension(path, &config.extensions) {
            tracing::debug!(path = %path.display(), "skipping non-template file");
            continue;
        }
        names.push(entry.file_name().to_string_lossy().to_string());
    }

    names.sort();
    tracing::debug!(root = %root.display(), count = names.len(), "collected template names");
    Ok(names)
}

fn has_template_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| {
            let ext = e.to_string_lossy();
            extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::setup_template_dir;

    #[test]
    fn collects_matching_extensions_sorted() {
        let tmp = setup_template_dir(&[
            "girl_young_hhhh5_w.jpg",
            "girl_young_hhhh5_n.JPG",
            "notes.txt",
            "README",
        ]);
        let names = collect_template_names(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(names, vec!["girl_young_hhhh5_n.JPG", "girl_young_hhhh5_w.jpg"]);
    }

    #[test]
    fn recursive_scan_descends() {
        let tmp = setup_template_dir(&["a_aaaaa.png", "batch-2/b_bbbbb.png"]);
        let names = collect_template_names(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(names, vec!["a_aaaaa.png", "b_bbbbb.png"]);
    }

    #[test]
    fn flat_scan_stays_at_top_level() {
        let tmp = setup_template_dir(&["a_aaaaa.png", "batch-2/b_bbbbb.png"]);
        let config = ScanConfig {
            recursive: false,
            ..ScanConfig::default()
        };
        let names = collect_template_names(tmp.path(), &config).unwrap();
        assert_eq!(names, vec!["a_aaaaa.png"]);
    }

    #[test]
    fn misnamed_images_are_still_collected() {
        let tmp = setup_template_dir(&["IMG_0001.JPG"]);
        let names = collect_template_names(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(names, vec!["IMG_0001.JPG"]);
    }

    #[test]
    fn configured_extensions_only() {
        let tmp = setup_template_dir(&["a_aaaaa.png", "a_aaaaa.webp"]);
        let config = ScanConfig {
            extensions: vec!["WEBP".into()],
            ..ScanConfig::default()
        };
        let names = collect_template_names(tmp.path(), &config).unwrap();
        assert_eq!(names, vec!["a_aaaaa.webp"]);
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = setup_template_dir(&[]);
        let result = collect_template_names(&tmp.path().join("nope"), &ScanConfig::default());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }
}
