use regex::Captures;

use super::{group, is_external, non_empty, unescape_title, LinkScanner};
use crate::error::BrokenLink;
use crate::link::Link;

/// Reference definitions at the start of a line: `[label]: target#anchor "title"`.
///
/// Footnote definitions (`[^1]: ...`) are left alone.
pub struct ReferenceLinkScanner;

impl LinkScanner for ReferenceLinkScanner {
    fn pattern(&self) -> &'static str {
        concat!(
            r"(?P<ref_link>",
            r"^\[(?P<ref_label>[^\[\]^\n][^\[\]\n]*)\]:",
            r#"[ \t]*(?P<ref_target>[^\s#"]*)"#,
            r#"(?:#(?P<ref_anchor>[^\s"]*))?"#,
            r#"(?:[ \t]+"(?P<ref_title>(?:[^"\\\n]|\\.)*)")?"#,
            r"[ \t]*$",
            r")"
        )
    }

    fn owns(&self, captures: &Captures) -> bool {
        captures.name("ref_link").is_some()
    }

    fn extract(&self, captures: &Captures) -> Result<Link, BrokenLink> {
        let target = group(captures, "ref_target");
        if is_external(target) {
            return Err(BrokenLink::Extraction(group(captures, "ref_link").into()));
        }

        Ok(Link {
            target: target.to_string(),
            anchor: non_empty(group(captures, "ref_anchor")),
            title: unescape_title(group(captures, "ref_title")),
            reference: Some(group(captures, "ref_label").to_string()),
            ..Default::default()
        })
    }
}
