//! Single pass scanning of a document for link candidates.
//!
//! All scanner fragments are compiled into one alternation behind a `code`
//! branch that swallows fenced blocks and inline code spans. The regex engine
//! tries alternatives left to right at each position, so any span that starts
//! code is consumed whole before a link fragment gets a chance to match inside
//! it.

use std::borrow::Cow;

use itertools::Itertools;
use regex::{Captures, Match, Regex};

use crate::scanner::LinkScanner;

/// Fenced blocks end at a closing fence on its own line end, or at the end of
/// the document when never closed. Inline code may span lines.
const CODE_PATTERN: &str = r"(?P<code>`{3}[\s\S]*?(?:`{3}$|\z)|`[\s\S]*?`)";

#[derive(Debug)]
pub enum Token<'t> {
    /// Fenced or inline code, always kept verbatim.
    Code(Match<'t>),
    Candidate(Captures<'t>),
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    regex: Regex,
}

impl Tokenizer {
    pub fn compile(scanners: &[Box<dyn LinkScanner>]) -> Result<Tokenizer, regex::Error> {
        let patterns = scanners.iter().map(|scanner| scanner.pattern()).join("|");

        let pattern = match patterns.is_empty() {
            true => format!("(?mR){CODE_PATTERN}"),
            false => format!("(?mR){CODE_PATTERN}|(?:{patterns})"),
        };

        Ok(Tokenizer {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Every code span and link candidate in `text`, in document order.
    pub fn tokens<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = Token<'t>> + 'r
    where
        't: 'r,
    {
        self.regex
            .captures_iter(text)
            .map(|captures| match captures.name("code") {
                Some(code) => Token::Code(code),
                None => Token::Candidate(captures),
            })
    }

    /// Replace every link candidate with the output of `on_candidate`,
    /// leaving code and all unmatched text untouched.
    pub fn replace_all<'t>(
        &self,
        text: &'t str,
        mut on_candidate: impl FnMut(&Captures) -> String,
    ) -> Cow<'t, str> {
        self.regex
            .replace_all(text, |captures: &Captures| match captures.name("code") {
                Some(code) => code.as_str().to_string(),
                None => on_candidate(captures),
            })
    }
}
