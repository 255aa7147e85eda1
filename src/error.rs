//! Recoverable failures raised while rewriting a single link.
//!
//! None of these abort a document. The replacer logs them at debug level and
//! leaves the matched text exactly as the author wrote it, so the build's own
//! link checker can report it.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BrokenLink {
    /// The matched token does not describe a link to another document.
    #[error("could not extract link from '{0}'")]
    Extraction(String),

    /// Neither a target nor an anchor was given.
    #[error("no target for link '{0}'")]
    NoTarget(String),

    /// The file resolver has no document for the target.
    #[error("'{0}' not found")]
    NotFound(String),
}
