use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug)]
pub enum ScanError {
    RootNotFound(PathBuf),
    IoError(std::io::Error),
    WalkError(walkdir::Error),
    InvalidPath(PathBuf),
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::IoError(err)
    }
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        ScanError::WalkError(err)
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::RootNotFound(p) => write!(f, "Root directory not found: {}", p.display()),
            ScanError::IoError(e) => write!(f, "IO error: {}", e),
            ScanError::WalkError(e) => write!(f, "Walk error: {}", e),
            ScanError::InvalidPath(p) => write!(f, "Invalid path: {}", p.display()),
        }
    }
}

impl std::error::Error for ScanError {}

/// One relative path under a scanned root. Paths are forward-slash
/// separated and case-sensitive regardless of platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    rel_path: String,
    modified: Option<SystemTime>,
}

impl PathEntry {
    pub fn new<S: Into<String>>(rel_path: S) -> Self {
        Self {
            rel_path: rel_path.into(),
            modified: None,
        }
    }

    pub fn with_modified<S: Into<String>>(rel_path: S, modified: Option<SystemTime>) -> Self {
        Self {
            rel_path: rel_path.into(),
            modified,
        }
    }

    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// The path with its final extension stripped. Used to match a source
    /// document against its generated artifact (`a/b.md` vs `a/b.leaf`).
    pub fn identity_key(&self) -> &str {
        let start = self.rel_path.rfind('/').map(|i| i + 1).unwrap_or(0);
        match self.rel_path[start..].rfind('.') {
            Some(dot) => &self.rel_path[..start + dot],
            None => &self.rel_path,
        }
    }

    /// File name without directory or extension.
    pub fn file_stem(&self) -> &str {
        let key = self.identity_key();
        match key.rfind('/') {
            Some(i) => &key[i + 1..],
            None => key,
        }
    }
}

/// Sorted, deduplicated collection of relative paths under one root,
/// filtered by extension. Immutable once built.
#[derive(Debug, Clone)]
pub struct PathSet {
    entries: Vec<PathEntry>,
}

impl PathSet {
    /// Recursively scan `root` for files whose name ends with `suffix`.
    /// An unreadable or missing root is an error, never an empty set.
    pub fn scan<P: AsRef<Path>>(root: P, suffix: &str) -> Result<Self, ScanError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !entry.file_name().to_string_lossy().ends_with(suffix) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| ScanError::InvalidPath(entry.path().to_path_buf()))?;
            let rel_path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());

            entries.push(PathEntry { rel_path, modified });
        }

        debug!(
            "scanned {}: {} {} file(s)",
            root.display(),
            entries.len(),
            suffix
        );

        Ok(Self::from_entries(entries))
    }

    /// Build a set from already-known entries. Sorts by full relative path
    /// (ordinal byte order, not locale-aware) and drops duplicates.
    pub fn from_entries(mut entries: Vec<PathEntry>) -> Self {
        entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        entries.dedup_by(|a, b| a.rel_path == b.rel_path);
        Self { entries }
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.entries.iter()
    }
}
