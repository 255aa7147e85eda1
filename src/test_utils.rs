//! Shared test utilities for ezlinks.
//!
//! This module provides common helpers used across multiple test modules.
//! It is only compiled when running tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Once;

use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, nothing is
/// installed and the replacer's debug output stays silent.
///
/// ```bash
/// RUST_LOG=ezlinks=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Creates a temporary docs directory for testing.
///
/// Returns a tuple of (TempDir, PathBuf) where:
/// - TempDir: The temp directory handle (must be kept alive for the test duration)
/// - PathBuf: The path to the `docs` subdirectory
pub fn create_test_docs_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let docs_dir = temp_dir.path().join("docs");
    fs::create_dir(&docs_dir).expect("Failed to create docs subdirectory");
    (temp_dir, docs_dir)
}

/// Creates a small site with front matter for end-to-end tests.
///
/// # Site Structure
///
/// ```text
/// docs/
/// ├── guides/
/// │   ├── getting-started.md   (title, summary)
/// │   └── installation.md      (title, icon)
/// ├── reference/
/// │   └── options.md           (no front matter)
/// └── index.md                 (title)
/// ```
///
/// Returns the temp directory handle, the docs directory and the document
/// paths relative to it.
pub fn create_docs_fixture() -> (TempDir, PathBuf, Vec<PathBuf>) {
    let (temp_dir, docs_dir) = create_test_docs_dir();

    fs::create_dir(docs_dir.join("guides")).expect("Failed to create guides/");
    fs::create_dir(docs_dir.join("reference")).expect("Failed to create reference/");

    let files = [
        (
            "guides/getting-started.md",
            "---\ntitle: Getting Started\nsummary: First steps\n---\n# Getting Started\n",
        ),
        (
            "guides/installation.md",
            "---\ntitle: Installation\nicon: material/download\n---\n# Installation\n",
        ),
        ("reference/options.md", "# Options\n\nNo front matter here.\n"),
        ("index.md", "---\ntitle: Home\n---\n# Home\n"),
    ];

    for (path, content) in files {
        fs::write(docs_dir.join(path), content)
            .unwrap_or_else(|err| panic!("Failed to write {path}: {err}"));
    }

    let paths = files.iter().map(|(path, _)| PathBuf::from(path)).collect();
    (temp_dir, docs_dir, paths)
}
