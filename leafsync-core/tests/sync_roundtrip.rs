use std::path::Path;

use leafsync_core::config::SyncConfig;
use leafsync_core::{
    recent_items, render_recent_fragment, ConvertError, MarkupConverter, ScanError, Syncer,
};

/// Canned converter so tests never shell out to pandoc.
struct CannedConverter;

impl MarkupConverter for CannedConverter {
    fn convert(&self, source: &Path) -> Result<String, ConvertError> {
        let markdown = std::fs::read_to_string(source).map_err(|e| {
            ConvertError::Launch(source.to_path_buf(), e)
        })?;
        // First "# " line becomes the h1, rest passes through as-is.
        match markdown.lines().next().and_then(|l| l.strip_prefix("# ")) {
            Some(title) => Ok(format!("<h1>{}</h1>\n<p>{}</p>\n", title, markdown)),
            None => Ok(format!("<p>{}</p>\n", markdown)),
        }
    }
}

/// Converter that always fails, for partial-failure semantics.
struct BrokenConverter;

impl MarkupConverter for BrokenConverter {
    fn convert(&self, source: &Path) -> Result<String, ConvertError> {
        Err(ConvertError::Failed {
            program: source.to_path_buf(),
            status: Some(1),
            stderr: "boom".to_string(),
        })
    }
}

fn test_config(root: &Path) -> SyncConfig {
    SyncConfig {
        original_dir: root.join("original"),
        processed_dir: root.join("processed"),
        ..SyncConfig::default()
    }
}

fn write_source(config: &SyncConfig, rel: &str, content: &str) {
    let path = config.source_root().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn write_target(config: &SyncConfig, rel: &str, content: &str) {
    let path = config.leaf_root().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn fresh_run_renders_every_source() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "2019/03/20190311-first.md", "# First Post\nhello");
    write_source(&config, "2019/03/20190312-second.md", "plain body");

    let outcome = Syncer::new(&config, &CannedConverter).run().unwrap();

    assert_eq!(outcome.report.added, 2);
    assert_eq!(outcome.report.skipped, 0);
    assert_eq!(outcome.report.dropped, 0);
    assert!(outcome.report.failures.is_empty());

    let first = std::fs::read_to_string(
        config.leaf_root().join("2019/03/20190311-first.leaf"),
    )
    .unwrap();
    assert!(first.starts_with("#set(\"title\") {First Post}"));
    assert!(first.contains("<div class=\"blogpage\">"));
    assert!(first.ends_with("#embed(\"Base\")"));

    // no h1 in the body: title falls back to the file stem
    let second = std::fs::read_to_string(
        config.leaf_root().join("2019/03/20190312-second.leaf"),
    )
    .unwrap();
    assert!(second.starts_with("#set(\"title\") {20190312-second}"));
}

#[test]
fn matched_artifact_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "a/b/c.md", "# C");
    write_source(&config, "a/b/d.md", "# D");
    write_target(&config, "a/b/c.leaf", "stale but matched");

    let outcome = Syncer::new(&config, &CannedConverter).run().unwrap();

    assert_eq!(outcome.report.added, 1);
    assert_eq!(outcome.report.skipped, 1);

    // skip policy never re-renders an existing artifact
    let untouched = std::fs::read_to_string(config.leaf_root().join("a/b/c.leaf")).unwrap();
    assert_eq!(untouched, "stale but matched");
    assert!(config.leaf_root().join("a/b/d.leaf").is_file());
}

#[test]
fn orphaned_artifact_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "x/y.md", "# Y");
    write_target(&config, "x/y.leaf", "kept");
    write_target(&config, "x/z.leaf", "orphan");

    let outcome = Syncer::new(&config, &CannedConverter).run().unwrap();

    assert_eq!(outcome.report.skipped, 1);
    assert_eq!(outcome.report.dropped, 1);
    assert!(config.leaf_root().join("x/y.leaf").is_file());
    assert!(!config.leaf_root().join("x/z.leaf").exists());
}

#[test]
fn converter_failure_does_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "a.md", "# A");
    write_source(&config, "b.md", "# B");

    let outcome = Syncer::new(&config, &BrokenConverter).run().unwrap();

    assert_eq!(outcome.report.added, 0);
    assert_eq!(outcome.report.failures.len(), 2);
    assert!(!config.leaf_root().join("a.leaf").exists());
}

#[test]
fn missing_source_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    // no original/markdown directory at all

    match Syncer::new(&config, &CannedConverter).run() {
        Err(ScanError::RootNotFound(p)) => assert_eq!(p, config.source_root()),
        other => panic!("expected RootNotFound, got {:?}", other),
    }
}

#[test]
fn missing_target_root_is_created_and_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "a.md", "# A");
    assert!(!config.leaf_root().exists());

    let outcome = Syncer::new(&config, &CannedConverter).run().unwrap();
    assert_eq!(outcome.report.added, 1);
    assert!(config.leaf_root().join("a.leaf").is_file());
}

#[test]
fn leaf_syntax_in_converted_output_is_neutralized() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "a.md", "# A\n#if(x) { y }");

    Syncer::new(&config, &CannedConverter).run().unwrap();

    let leaf = std::fs::read_to_string(config.leaf_root().join("a.leaf")).unwrap();
    assert!(leaf.contains("&num;if(x) { y \\}"));
    // the only raw #set/#embed occurrences belong to the envelope itself
    assert_eq!(leaf.matches("#set(").count(), 2);
    assert_eq!(leaf.matches("#embed(").count(), 1);
}

#[test]
fn recent_fragment_reflects_synchronized_sources() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    for day in 10..20 {
        write_source(
            &config,
            &format!("2019/03/201903{}-post.md", day),
            "# Post",
        );
    }

    let outcome = Syncer::new(&config, &CannedConverter).run().unwrap();
    let items = recent_items(&outcome.sources, config.recent_max);

    assert_eq!(items.len(), 8);
    assert_eq!(items[0].link, "/post/2019/03/20190312-post");
    assert_eq!(items[7].link, "/post/2019/03/20190319-post");

    let fragment = render_recent_fragment(&items);
    assert_eq!(fragment.matches("dropdown-item").count(), 9); // 8 posts + Archives
}

#[test]
fn rerun_after_sync_is_all_skips() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    write_source(&config, "a.md", "# A");
    write_source(&config, "b.md", "# B");

    Syncer::new(&config, &CannedConverter).run().unwrap();
    let second = Syncer::new(&config, &CannedConverter).run().unwrap();

    assert_eq!(second.report.added, 0);
    assert_eq!(second.report.skipped, 2);
    assert_eq!(second.report.dropped, 0);
}
