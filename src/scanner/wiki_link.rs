use regex::Captures;

use super::{group, is_external, non_empty, LinkScanner};
use crate::error::BrokenLink;
use crate::link::Link;

/// `[[target#anchor|text]]`, optionally an image (`![[...]]`) and followed by
/// an attribute block.
pub struct WikiLinkScanner;

impl LinkScanner for WikiLinkScanner {
    fn pattern(&self) -> &'static str {
        concat!(
            r"(?P<wiki_link>",
            r"(?P<wiki_is_image>!?)",
            r"\[\[",
            r"(?P<wiki_target>[^\[\]#|\n]*)",
            r"(?:#(?P<wiki_anchor>[^\[\]|\n]*))?",
            r"(?:\|(?P<wiki_text>[^\[\]\n]*))?",
            r"\]\]",
            r"(?:\{:[ \t]*(?P<wiki_style>[^{}\n]*?)[ \t]*\})?",
            r")"
        )
    }

    fn owns(&self, captures: &Captures) -> bool {
        captures.name("wiki_link").is_some()
    }

    fn extract(&self, captures: &Captures) -> Result<Link, BrokenLink> {
        let target = group(captures, "wiki_target").trim();
        if is_external(target) {
            return Err(BrokenLink::Extraction(group(captures, "wiki_link").into()));
        }

        let anchor = non_empty(group(captures, "wiki_anchor"));
        // [[#Section]] has nothing else to show
        let text = match non_empty(group(captures, "wiki_text")) {
            Some(text) => text,
            None if target.is_empty() => anchor.clone().unwrap_or_default(),
            None => String::new(),
        };

        Ok(Link {
            is_image: !group(captures, "wiki_is_image").is_empty(),
            text,
            target: target.to_string(),
            anchor,
            style: group(captures, "wiki_style").to_string(),
            ..Default::default()
        })
    }
}
