//! ezlinks: shorthand link resolution for Markdown documentation builds
//!
//! This crate rewrites the links of a Markdown document during a site build,
//! turning wiki-style and shorthand links into complete, relative Markdown
//! links enriched with the target document's front matter.
//!
//! # Overview
//!
//! - **Scanning**: one regex pass per document that skips fenced and inline
//!   code, with a pluggable set of link syntaxes
//! - **Resolution**: link targets are looked up through a [`FileResolver`]
//! - **Enrichment**: title, summary and icon come from a [`MetadataReader`]
//! - **Rendering**: links are written back relative to the current document,
//!   with `attr_list` attributes
//!
//! Links that cannot be resolved are left exactly as written so the build's
//! own link checker can report them.
//!
//! # Architecture
//!
//! - [`link`]: the [`Link`] being rewritten and its rendering
//! - [`scanner`]: the [`LinkScanner`] trait and the Markdown, wiki and
//!   reference definition syntaxes
//! - [`tokenizer`]: the combined pattern with code suppression
//! - [`replacer`]: the per-match resolution pipeline
//! - [`file_mapper`] and [`metadata`]: the collaborators and their default
//!   implementations
//! - [`config`]: options and settings loading
//!
//! # Usage
//!
//! ```
//! use std::path::Path;
//! use ezlinks::{BuildConfig, EzLinksOptions, FileMapper, FrontMatterReader, LinkReplacer};
//!
//! let files = ["index.md", "guide/setup.md"];
//! let replacer = LinkReplacer::new(
//!     FileMapper::new(files, false),
//!     FrontMatterReader,
//!     EzLinksOptions::default(),
//! )?;
//!
//! let config = BuildConfig::new("/nonexistent/docs", true);
//! let output = replacer.replace(Path::new("index.md"), "See [[setup]].", &config);
//! assert_eq!(output, "See [setup](guide/setup.md).");
//! # Ok::<(), regex::Error>(())
//! ```

// Link model and syntaxes
pub mod error;
pub mod link;
pub mod scanner;
pub mod tokenizer;

// Resolution
pub mod file_mapper;
pub mod metadata;
pub mod replacer;

// Configuration
pub mod config;

pub use config::{BuildConfig, EzLinksOptions, Settings};
pub use error::BrokenLink;
pub use file_mapper::{FileMapper, FileResolver};
pub use link::Link;
pub use metadata::{FrontMatterReader, MetadataReader, PageMeta};
pub use replacer::LinkReplacer;
pub use scanner::LinkScanner;

// Test utilities (only available in test builds)
#[cfg(test)]
pub mod test_utils;
