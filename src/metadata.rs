//! Front matter lookup for link targets.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;
use tracing::debug;

/// Supplies the front matter of a target document.
pub trait MetadataReader {
    /// `None` when the document cannot be read or carries no front matter.
    fn read_front_matter(&self, path: &Path) -> Option<PageMeta>;
}

impl<F> MetadataReader for F
where
    F: Fn(&Path) -> Option<PageMeta>,
{
    fn read_front_matter(&self, path: &Path) -> Option<PageMeta> {
        self(path)
    }
}

/// Reads YAML front matter from documents on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontMatterReader;

impl MetadataReader for FrontMatterReader {
    fn read_front_matter(&self, path: &Path) -> Option<PageMeta> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                debug!("Unable to read front matter of {}: {}", path.display(), err);
                return None;
            }
        };

        PageMeta::new(text.trim_start_matches('\u{feff}'))
    }
}

/// Key/value annotations from the top of a document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageMeta(BTreeMap<String, Value>);

impl PageMeta {
    /// Parse the `---` delimited YAML block at the start of `text`.
    ///
    /// Returns `None` if there is no block, it is not a mapping with string
    /// keys, or it is empty.
    pub fn new(text: &str) -> Option<PageMeta> {
        static RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\A---[ \t]*\r?\n(?P<metadata>[\s\S]*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap()
        });

        let metadata_match = RE.captures(text)?.name("metadata")?;

        let values: BTreeMap<String, Value> = match serde_yaml::from_str(metadata_match.as_str()) {
            Ok(values) => values,
            Err(err) => {
                debug!("Ignoring malformed front matter: {}", err);
                return None;
            }
        };

        (!values.is_empty()).then_some(PageMeta(values))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A scalar value as text. Empty strings, sequences and mappings give `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        let value = match self.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!value.is_empty()).then_some(value)
    }

    pub fn title(&self) -> Option<String> {
        self.get_str("title")
    }

    pub fn summary(&self) -> Option<String> {
        self.get_str("summary")
    }

    pub fn icon(&self) -> Option<String> {
        self.get_str("icon")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PageMeta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PageMeta(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
