use std::cmp::Ordering;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::SyncConfig;
use crate::convert::{ConvertError, MarkupConverter};
use crate::escape::escape_leaf_syntax;
use crate::pathset::{PathEntry, PathSet, ScanError};
use crate::template::{write_artifact, RenderError};
use crate::text::h1_text;

/// Outcome of comparing one pair of cursor positions during the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// Source document has no artifact yet.
    Add(PathEntry),
    /// Matching pair, artifact treated as current.
    Skip { source: PathEntry, target: PathEntry },
    /// Artifact has no matching source document.
    Drop(PathEntry),
}

/// Reconcile two sorted path sets into add/skip/drop decisions with a
/// single linear two-cursor merge over identity keys. O(n + m), no
/// backtracking; ties inside one set are impossible because each set is
/// deduplicated.
///
/// Each set is sorted by full relative path, so the merge relies on file
/// names carrying a single extension: keys then appear in path order.
/// A stem with extra dots (`a.b.md` next to `a.md`) would let key order
/// diverge from path order and mis-pair a match. Dots in directory
/// segments are fine.
pub fn diff(source: &PathSet, target: &PathSet) -> Vec<SyncDecision> {
    let src = source.entries();
    let tgt = target.entries();
    let mut decisions = Vec::with_capacity(src.len() + tgt.len());

    let mut i = 0;
    let mut j = 0;
    while i < src.len() && j < tgt.len() {
        match src[i].identity_key().cmp(tgt[j].identity_key()) {
            Ordering::Equal => {
                // TODO: compare modification dates and re-render when the
                // source is newer. For now an existing artifact is always
                // treated as current.
                decisions.push(SyncDecision::Skip {
                    source: src[i].clone(),
                    target: tgt[j].clone(),
                });
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                decisions.push(SyncDecision::Add(src[i].clone()));
                i += 1;
            }
            Ordering::Greater => {
                decisions.push(SyncDecision::Drop(tgt[j].clone()));
                j += 1;
            }
        }
    }
    while i < src.len() {
        decisions.push(SyncDecision::Add(src[i].clone()));
        i += 1;
    }
    while j < tgt.len() {
        decisions.push(SyncDecision::Drop(tgt[j].clone()));
        j += 1;
    }

    decisions
}

#[derive(Debug)]
pub enum SyncError {
    Convert(ConvertError),
    Render(RenderError),
    Delete(PathBuf, std::io::Error),
}

impl From<ConvertError> for SyncError {
    fn from(err: ConvertError) -> Self {
        SyncError::Convert(err)
    }
}

impl From<RenderError> for SyncError {
    fn from(err: RenderError) -> Self {
        SyncError::Render(err)
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Convert(e) => write!(f, "Conversion failed: {}", e),
            SyncError::Render(e) => write!(f, "Render failed: {}", e),
            SyncError::Delete(p, e) => write!(f, "Failed to delete {}: {}", p.display(), e),
        }
    }
}

impl std::error::Error for SyncError {}

/// One entry that failed during a run. The run itself continues.
#[derive(Debug)]
pub struct SyncFailure {
    pub rel_path: String,
    pub error: SyncError,
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub added: usize,
    pub skipped: usize,
    pub dropped: usize,
    pub failures: Vec<SyncFailure>,
}

/// Report plus the source set, which the recent-index builder consumes
/// after the merge.
#[derive(Debug)]
pub struct SyncOutcome {
    pub report: SyncReport,
    pub sources: PathSet,
}

pub struct Syncer<'a> {
    config: &'a SyncConfig,
    converter: &'a dyn MarkupConverter,
}

impl<'a> Syncer<'a> {
    pub fn new(config: &'a SyncConfig, converter: &'a dyn MarkupConverter) -> Self {
        Self { config, converter }
    }

    /// Run one full synchronization pass. Only path-set construction is
    /// fatal; per-entry convert/render/delete failures are recorded in
    /// the report and the merge moves on to the next entry.
    pub fn run(&self) -> Result<SyncOutcome, ScanError> {
        let source_root = self.config.source_root();
        let target_root = self.config.leaf_root();

        let sources = PathSet::scan(&source_root, &self.config.source_ext)?;

        // First run against a fresh processed dir: create the target
        // root so the scan sees an actual (empty) directory.
        std::fs::create_dir_all(&target_root)?;
        let targets = PathSet::scan(&target_root, &self.config.target_ext)?;

        let mut report = SyncReport::default();
        for decision in diff(&sources, &targets) {
            match decision {
                SyncDecision::Add(entry) => {
                    debug!("ADD: {}", entry.rel_path());
                    match self.add_entry(&entry) {
                        Ok(()) => report.added += 1,
                        Err(error) => {
                            warn!("{}: {}", entry.rel_path(), error);
                            report.failures.push(SyncFailure {
                                rel_path: entry.rel_path().to_string(),
                                error,
                            });
                        }
                    }
                }
                SyncDecision::Skip { source, target } => {
                    debug!("SKIP: {} and {}", source.rel_path(), target.rel_path());
                    report.skipped += 1;
                }
                SyncDecision::Drop(entry) => {
                    debug!("DROP: {}", entry.rel_path());
                    match self.drop_entry(&entry) {
                        Ok(()) => report.dropped += 1,
                        Err(error) => {
                            warn!("{}: {}", entry.rel_path(), error);
                            report.failures.push(SyncFailure {
                                rel_path: entry.rel_path().to_string(),
                                error,
                            });
                        }
                    }
                }
            }
        }

        Ok(SyncOutcome { report, sources })
    }

    fn add_entry(&self, entry: &PathEntry) -> Result<(), SyncError> {
        let from = self.config.source_root().join(entry.rel_path());
        let dest = self
            .config
            .leaf_root()
            .join(format!("{}{}", entry.identity_key(), self.config.target_ext));

        let html = self.converter.convert(&from)?;

        let title = h1_text(&html).unwrap_or_else(|| entry.file_stem().to_string());
        let title = escape_leaf_syntax(&title);
        let body = escape_leaf_syntax(&html);

        write_artifact(&dest, &title, &body)?;
        Ok(())
    }

    fn drop_entry(&self, entry: &PathEntry) -> Result<(), SyncError> {
        let dest = self.config.leaf_root().join(entry.rel_path());
        std::fs::remove_file(&dest).map_err(|e| SyncError::Delete(dest, e))?;
        Ok(())
    }
}
