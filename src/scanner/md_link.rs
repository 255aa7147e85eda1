use regex::Captures;

use super::{group, is_external, non_empty, unescape_title, LinkScanner};
use crate::error::BrokenLink;
use crate::link::Link;

/// Inline Markdown links and images: `![:icon: text](target#anchor "title"){: style}`
pub struct MdLinkScanner;

impl LinkScanner for MdLinkScanner {
    fn pattern(&self) -> &'static str {
        concat!(
            r"(?P<md_link>",
            r"(?P<md_is_image>!?)",
            r"\[(?::(?P<md_icon>[^:\s\[\]]+):[ \t]+)?(?P<md_text>[^\[\]]*)\]",
            r"\(",
            r#"(?P<md_target>[^()#\s"]*)"#,
            r#"(?:#(?P<md_anchor>[^()\s"]*))?"#,
            r#"(?:[ \t]+"(?P<md_title>(?:[^"\\]|\\.)*)")?"#,
            r"[ \t]*\)",
            r"(?:\{:[ \t]*(?P<md_style>[^{}\n]*?)[ \t]*\})?",
            r")"
        )
    }

    fn owns(&self, captures: &Captures) -> bool {
        captures.name("md_link").is_some()
    }

    fn extract(&self, captures: &Captures) -> Result<Link, BrokenLink> {
        let target = group(captures, "md_target");
        if is_external(target) {
            return Err(BrokenLink::Extraction(group(captures, "md_link").into()));
        }

        Ok(Link {
            is_image: !group(captures, "md_is_image").is_empty(),
            text: group(captures, "md_text").trim().to_string(),
            target: target.to_string(),
            anchor: non_empty(group(captures, "md_anchor")),
            title: unescape_title(group(captures, "md_title")),
            style: group(captures, "md_style").to_string(),
            icon: non_empty(group(captures, "md_icon")),
            ..Default::default()
        })
    }
}
