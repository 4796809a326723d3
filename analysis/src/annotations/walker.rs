//! Source Walker: eligible-file discovery using the `ignore` crate
//!
//! The scanner only sees paths handed to it by a [`SourceWalker`], so tests
//! and embedders can feed it any file set.

use crate::config::LintConfig;
use crate::error::AnalysisResult;
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::Path;

/// Capability to enumerate source files under a root.
pub trait SourceWalker {
    /// Call `visit` once per eligible file, in a stable order. An error from
    /// `visit` or from the traversal stops the walk and is returned.
    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(&Path) -> AnalysisResult<()>,
    ) -> AnalysisResult<()>;
}

/// Walks the filesystem in file-name order.
///
/// Skips hidden directories and configured directory names (the root itself
/// is never skipped), and yields only files with the source suffix that do
/// not also carry the test suffix. Ignore files are not consulted.
#[derive(Debug, Clone)]
pub struct FsWalker {
    source_suffix: String,
    test_suffix: String,
    skip_dirs: Vec<String>,
}

impl FsWalker {
    pub fn new(config: &LintConfig) -> Self {
        Self {
            source_suffix: config.source_suffix.clone(),
            test_suffix: config.test_suffix.clone(),
            skip_dirs: config.skip_dirs.clone(),
        }
    }

    /// Whether a file with this name should be scanned.
    pub fn is_source_file(&self, name: &str) -> bool {
        name.ends_with(&self.source_suffix)
            && (self.test_suffix.is_empty() || !name.ends_with(&self.test_suffix))
    }

    /// Whether a non-root directory with this name should be pruned.
    pub fn is_skipped_dir(&self, name: &OsStr) -> bool {
        is_skipped_dir(&self.skip_dirs, name)
    }
}

impl Default for FsWalker {
    fn default() -> Self {
        Self::new(&LintConfig::default())
    }
}

fn is_skipped_dir(skip_dirs: &[String], name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || skip_dirs.iter().any(|d| *d == name)
}

impl SourceWalker for FsWalker {
    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(&Path) -> AnalysisResult<()>,
    ) -> AnalysisResult<()> {
        let skip_dirs = self.skip_dirs.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                entry.depth() == 0 || !is_dir || !is_skipped_dir(&skip_dirs, entry.file_name())
            })
            .build();

        for entry in walker {
            let entry = entry?;

            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if self.is_source_file(name) {
                visit(entry.path())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use std::fs;
    use std::path::PathBuf;

    fn collect(walker: &FsWalker, root: &Path) -> Vec<PathBuf> {
        let mut seen = Vec::new();
        walker
            .walk(root, &mut |path| {
                seen.push(path.strip_prefix(root).unwrap().to_path_buf());
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_is_source_file() {
        let walker = FsWalker::default();
        assert!(walker.is_source_file("main.go"));
        assert!(!walker.is_source_file("main_test.go"));
        assert!(!walker.is_source_file("main.go.txt"));
        assert!(!walker.is_source_file("README.md"));
    }

    #[test]
    fn test_is_skipped_dir() {
        let walker = FsWalker::default();
        assert!(walker.is_skipped_dir(OsStr::new("vendor")));
        assert!(walker.is_skipped_dir(OsStr::new(".git")));
        assert!(!walker.is_skipped_dir(OsStr::new("vendored")));
        assert!(!walker.is_skipped_dir(OsStr::new("pkg")));
    }

    #[test]
    fn test_walk_applies_skip_rules_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("sub/.cache")).unwrap();
        fs::create_dir_all(root.join("vendor/lib")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();

        fs::write(root.join("main.go"), "package main").unwrap();
        fs::write(root.join("main_test.go"), "package main").unwrap();
        fs::write(root.join("a.go"), "package main").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".gen.go"), "package main").unwrap();
        fs::write(root.join("sub/z.go"), "package sub").unwrap();
        fs::write(root.join("sub/.cache/c.go"), "package c").unwrap();
        fs::write(root.join("vendor/lib/v.go"), "package lib").unwrap();
        fs::write(root.join(".git/h.go"), "package h").unwrap();

        let seen = collect(&FsWalker::default(), root);
        assert_eq!(
            seen,
            vec![
                PathBuf::from(".gen.go"),
                PathBuf::from("a.go"),
                PathBuf::from("main.go"),
                PathBuf::from("sub/z.go"),
            ]
        );
    }

    #[test]
    fn test_hidden_root_is_walked() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".work");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("main.go"), "package main").unwrap();

        let seen = collect(&FsWalker::default(), &root);
        assert_eq!(seen, vec![PathBuf::from("main.go")]);
    }

    #[test]
    fn test_custom_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.c"), "").unwrap();
        fs::write(root.join("a_test.c"), "").unwrap();
        fs::write(root.join("a.go"), "").unwrap();

        let config = LintConfig {
            source_suffix: ".c".to_string(),
            test_suffix: "_test.c".to_string(),
            ..Default::default()
        };
        let seen = collect(&FsWalker::new(&config), root);
        assert_eq!(seen, vec![PathBuf::from("a.c")]);
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FsWalker::default().walk(&dir.path().join("absent"), &mut |_| Ok(()));
        assert!(matches!(result, Err(AnalysisError::Walk(_))));
    }

    #[test]
    fn test_visit_error_stops_walk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "").unwrap();
        fs::write(dir.path().join("b.go"), "").unwrap();

        let mut visited = 0;
        let result = FsWalker::default().walk(dir.path(), &mut |path| {
            visited += 1;
            Err(AnalysisError::OpenSource {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            })
        });
        assert!(result.is_err());
        assert_eq!(visited, 1);
    }
}
