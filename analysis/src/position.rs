//! Position keys shared by the hint and annotation indices
//!
//! A diagnostic document and a source tree name the same file through
//! independently rooted paths. Both sides run their paths through
//! [`clean_path`] so equal files produce byte-equal keys, provided the two
//! roots are consistent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// A (file, line) key. Ordered by file, then line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Canonical path string, see [`clean_path`]
    pub file: String,
    /// 1-based physical line number
    pub line: usize,
}

impl Position {
    /// Build a position from an already-canonical file string.
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Build a position for `file` as seen from `base`, canonicalizing the
    /// joined path.
    pub fn resolve(base: &Path, file: &str, line: usize) -> Self {
        Self::new(clean_path(&base.join(file)), line)
    }

    /// Build a position for a path produced by the source walker.
    pub fn from_path(path: &Path, line: usize) -> Self {
        Self::new(clean_path(path), line)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Lexically normalize a path: drop `.` segments, collapse `name/..`, and
/// remove duplicate separators. Never touches the filesystem, so symlinks
/// are not resolved. An empty result becomes `"."`.
pub fn clean_path(path: &Path) -> String {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ".".to_string();
    }

    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

/// Ordered multimap from [`Position`] to the facts recorded there.
///
/// Items keep insertion order per position and duplicates are retained.
/// A position is only present once something has been pushed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionIndex<T> {
    entries: BTreeMap<Position, Vec<T>>,
}

impl<T> Default for PositionIndex<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> PositionIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the sequence at `position`.
    pub fn push(&mut self, position: Position, item: T) {
        self.entries.entry(position).or_default().push(item);
    }

    /// Facts recorded at `position`; empty when the position is absent.
    pub fn get(&self, position: &Position) -> &[T] {
        self.entries
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.entries.contains_key(position)
    }

    /// Iterate positions in (file, line) order.
    pub fn iter(&self) -> impl Iterator<Item = (&Position, &[T])> {
        self.entries.iter().map(|(pos, items)| (pos, items.as_slice()))
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.entries.keys()
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of facts across all positions.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<T> FromIterator<(Position, T)> for PositionIndex<T> {
    fn from_iter<I: IntoIterator<Item = (Position, T)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (position, item) in iter {
            index.push(position, item);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_removes_redundant_segments() {
        assert_eq!(clean_path(Path::new("./pkg/main.go")), "pkg/main.go");
        assert_eq!(clean_path(Path::new("pkg/./sub/../main.go")), "pkg/main.go");
        assert_eq!(clean_path(Path::new("pkg//main.go")), "pkg/main.go");
        assert_eq!(clean_path(Path::new("/tmp/x/../y.go")), "/tmp/y.go");
    }

    #[test]
    fn test_clean_path_edge_cases() {
        assert_eq!(clean_path(Path::new("")), ".");
        assert_eq!(clean_path(Path::new(".")), ".");
        assert_eq!(clean_path(Path::new("a/..")), ".");
        assert_eq!(clean_path(Path::new("../main.go")), "../main.go");
        assert_eq!(clean_path(Path::new("../../a/b")), "../../a/b");
        assert_eq!(clean_path(Path::new("/..")), "/");
    }

    #[test]
    fn test_resolve_joins_against_base() {
        let pos = Position::resolve(Path::new(""), "main.go", 10);
        assert_eq!(pos, Position::new("main.go", 10));

        let pos = Position::resolve(Path::new("build/out"), "../../pkg/main.go", 3);
        assert_eq!(pos.file, "pkg/main.go");

        // Two differently rooted spellings meet at the same key
        let from_log = Position::resolve(Path::new("."), "pkg/main.go", 5);
        let from_scan = Position::from_path(Path::new("./pkg/main.go"), 5);
        assert_eq!(from_log, from_scan);
    }

    #[test]
    fn test_resolve_keeps_absolute_file() {
        let pos = Position::resolve(Path::new("/work"), "/src/main.go", 1);
        assert_eq!(pos.file, "/src/main.go");
    }

    #[test]
    fn test_index_keeps_duplicates_and_order() {
        let mut index = PositionIndex::new();
        let pos = Position::new("a.go", 1);
        index.push(pos.clone(), "second");
        index.push(pos.clone(), "first");
        index.push(pos.clone(), "second");

        assert_eq!(index.get(&pos), &["second", "first", "second"]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.total(), 3);
    }

    #[test]
    fn test_index_absent_position_is_empty() {
        let index: PositionIndex<u8> = PositionIndex::new();
        let pos = Position::new("a.go", 1);
        assert!(index.get(&pos).is_empty());
        assert!(!index.contains(&pos));
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_iterates_by_file_then_line() {
        let index: PositionIndex<u8> = [
            (Position::new("b.go", 1), 0),
            (Position::new("a.go", 20), 0),
            (Position::new("a.go", 3), 0),
        ]
        .into_iter()
        .collect();

        let order: Vec<String> = index.positions().map(|p| p.to_string()).collect();
        assert_eq!(order, vec!["a.go:3", "a.go:20", "b.go:1"]);
    }
}
