//! Directory scan
//!
//! Resolves every file below a root. Parent directory names act as tags, so
//! `case-42/field notes/day1.txt` resolves to `field_notes` even though
//! `.txt` has no default category.

use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Result, TaxonomyError};
use crate::resolve::{ResolveQuery, Resolution};
use crate::taxonomy::Registry;

/// Hidden files and anything below a hidden directory
pub const DEFAULT_EXCLUDES: &[&str] = &[".*", "**/.*"];

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Glob patterns matched against root-relative paths
    pub exclude: Vec<String>,
    /// Only report files whose category matched
    pub matched_only: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            matched_only: false,
        }
    }
}

/// A scanned file and how it resolved
#[derive(Debug, Clone, Serialize)]
pub struct ScannedFile {
    /// Path relative to the scan root
    pub path: PathBuf,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// Walk `root` and resolve every file against `registry`
pub fn scan_directory(
    root: &Path,
    registry: &Registry,
    options: &ScanOptions,
) -> Result<Vec<ScannedFile>> {
    if !root.is_dir() {
        return Err(TaxonomyError::ScanRootNotFound {
            path: root.to_path_buf(),
        });
    }

    let excludes = options
        .exclude
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(r) => r.to_path_buf(),
            Err(_) => continue,
        };

        let relative_str = relative.to_string_lossy();
        if excludes.iter().any(|p| p.matches(&relative_str)) {
            tracing::debug!("Excluded from scan: {}", relative.display());
            continue;
        }

        let resolution = registry.resolve(&query_for(&relative));
        if options.matched_only && !resolution.is_match() {
            continue;
        }

        files.push(ScannedFile {
            path: relative,
            resolution,
        });
    }

    Ok(files)
}

/// Query for a root-relative path: parent directory names as tags
fn query_for(relative: &Path) -> ResolveQuery {
    let dirs = relative
        .parent()
        .into_iter()
        .flat_map(|parent| parent.components())
        .filter_map(|c| c.as_os_str().to_str())
        .map(str::to_string);

    ResolveQuery::new().tags(dirs).file_path(relative)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::resolve::MatchSource;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("case-42/Field Notes")).unwrap();
        fs::create_dir_all(root.join("case-42/misc")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("case-42/Field Notes/day1.txt"), "notes").unwrap();
        fs::write(root.join("case-42/door.jpg"), "jpg").unwrap();
        fs::write(root.join("case-42/scan.pdf"), "pdf").unwrap();
        fs::write(root.join(".git/config"), "git").unwrap();
        dir
    }

    fn find<'a>(files: &'a [ScannedFile], path: &str) -> Option<&'a ScannedFile> {
        files.iter().find(|f| f.path == Path::new(path))
    }

    #[test]
    fn test_directory_names_act_as_tags() {
        let dir = fixture();
        let files = scan_directory(dir.path(), &Registry::builtin(), &ScanOptions::default())
            .unwrap();

        let notes = find(&files, "case-42/Field Notes/day1.txt").unwrap();
        assert_eq!(notes.resolution.category.as_deref(), Some("field_notes"));
        assert_eq!(notes.resolution.matched_by, Some(MatchSource::Tag));
    }

    #[test]
    fn test_extension_fallback_and_unmatched() {
        let dir = fixture();
        let files = scan_directory(dir.path(), &Registry::builtin(), &ScanOptions::default())
            .unwrap();

        let photo = find(&files, "case-42/door.jpg").unwrap();
        assert_eq!(photo.resolution.category.as_deref(), Some("media_photo"));

        let pdf = find(&files, "case-42/scan.pdf").unwrap();
        assert!(!pdf.resolution.is_match());
        assert_eq!(pdf.resolution.tags, vec!["case_42"]);
    }

    #[test]
    fn test_default_excludes_hidden_dirs() {
        let dir = fixture();
        let files = scan_directory(dir.path(), &Registry::builtin(), &ScanOptions::default())
            .unwrap();
        assert!(find(&files, ".git/config").is_none());
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_matched_only_and_custom_excludes() {
        let dir = fixture();
        let options = ScanOptions {
            exclude: vec!["**/*.jpg".to_string(), ".git/**".to_string()],
            matched_only: true,
        };
        let files = scan_directory(dir.path(), &Registry::builtin(), &options).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("case-42/Field Notes/day1.txt")]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan_directory(
            &dir.path().join("nope"),
            &Registry::builtin(),
            &ScanOptions::default(),
        );
        assert!(matches!(result, Err(TaxonomyError::ScanRootNotFound { .. })));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = fixture();
        let options = ScanOptions {
            exclude: vec!["[".to_string()],
            matched_only: false,
        };
        let result = scan_directory(dir.path(), &Registry::builtin(), &options);
        assert!(matches!(result, Err(TaxonomyError::Pattern(_))));
    }
}
