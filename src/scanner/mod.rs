//! Link syntax recognizers.
//!
//! Every scanner contributes one regex fragment to the combined pattern the
//! [`Tokenizer`](crate::tokenizer::Tokenizer) compiles. Group names carry a
//! scanner specific prefix (`md_`, `wiki_`, `ref_`) so the fragments can be
//! joined into a single alternation without clashing.

mod md_link;
mod reference_link;
mod wiki_link;

pub use md_link::MdLinkScanner;
pub use reference_link::ReferenceLinkScanner;
pub use wiki_link::WikiLinkScanner;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::EzLinksOptions;
use crate::error::BrokenLink;
use crate::link::Link;

pub trait LinkScanner: Send + Sync {
    /// Capturing sub-pattern for this syntax. Must not use group names
    /// outside of the scanner's own prefix.
    fn pattern(&self) -> &'static str;

    /// Whether this scanner's fragment produced the match.
    fn owns(&self, captures: &Captures) -> bool;

    fn extract(&self, captures: &Captures) -> Result<Link, BrokenLink>;
}

/// Scanners for the given options, in the order they are consulted.
pub fn default_scanners(options: &EzLinksOptions) -> Vec<Box<dyn LinkScanner>> {
    let mut scanners: Vec<Box<dyn LinkScanner>> =
        vec![Box::new(MdLinkScanner), Box::new(ReferenceLinkScanner)];
    if options.wikilinks {
        scanners.push(Box::new(WikiLinkScanner));
    }
    scanners
}

/// Text of a named group, or `""` when it did not participate.
fn group<'t>(captures: &Captures<'t>, name: &str) -> &'t str {
    captures.name(name).map(|m| m.as_str()).unwrap_or_default()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Titles are written with `\\` and `\"` escapes; store them unescaped.
/// Any other backslash is kept as written.
fn unescape_title(title: &str) -> Option<String> {
    static ESCAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\\([\\"])"#).unwrap());

    non_empty(&ESCAPE_RE.replace_all(title, "$1"))
}

/// Targets such as `https://…` or `mailto:…` are not documents.
fn is_external(target: &str) -> bool {
    static SCHEME_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.\-]*:\S|//)").unwrap());

    SCHEME_RE.is_match(target)
}
