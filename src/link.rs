//! The in-flight representation of one link being rewritten.

use itertools::Itertools;

/// Everything needed to render a complete Markdown link.
///
/// A scanner creates one per match, the replacer fills in the resolved target
/// and front matter details, and [`Link::render`] turns it back into text.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Link {
    pub is_image: bool,
    /// Display text; may stay empty until front matter fills it.
    pub text: String,
    /// Raw target as written, later the resolved path, finally a path
    /// relative to the directory of the document being processed.
    pub target: String,
    pub anchor: Option<String>,
    pub title: Option<String>,
    /// Attribute tokens supplied by the scanner, e.g. `icon-only`.
    pub style: String,
    /// Icon identifier with `/` already replaced by `-`.
    pub icon: Option<String>,
    pub class_name: Option<String>,
    pub source_not_found: bool,
    /// Label of a reference definition (`[label]: target`). Such links keep
    /// their definition form when rendered.
    pub reference: Option<String>,
}

impl Link {
    pub fn is_icon_only(&self) -> bool {
        self.style.contains("icon-only")
    }

    fn destination(&self) -> String {
        let anchor = self
            .anchor
            .as_deref()
            .filter(|anchor| !anchor.is_empty())
            .map(|anchor| format!("#{anchor}"))
            .unwrap_or_default();
        let title = self
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .map(|title| format!(" \"{}\"", escape_title(title)))
            .unwrap_or_default();

        format!("{}{anchor}{title}", self.target)
    }

    fn attributes(&self) -> String {
        let mut tokens = self.style.split_whitespace().map(String::from).collect_vec();
        if let Some(class_name) = self.class_name.as_deref().filter(|c| !c.is_empty()) {
            let class_token = format!(".{class_name}");
            if !tokens.contains(&class_token) {
                tokens.push(class_token);
            }
        }

        match tokens.is_empty() {
            true => String::new(),
            false => format!("{{:{}}}", tokens.join(" ")),
        }
    }

    /// Render as Markdown understood by the `attr_list` extension.
    pub fn render(&self) -> String {
        if let Some(reference) = &self.reference {
            return format!("[{reference}]: {}", self.destination());
        }

        let img = if self.is_image { "!" } else { "" };
        let icon = self
            .icon
            .as_deref()
            .filter(|icon| !icon.is_empty())
            .map(|icon| format!(":{icon}: "))
            .unwrap_or_default();

        format!(
            "{img}[{icon}{}]({}){}",
            self.text,
            self.destination(),
            self.attributes()
        )
    }
}

/// Backslashes go first so the quote escapes are not escaped again.
fn escape_title(title: &str) -> String {
    title.replace('\\', r"\\").replace('"', r#"\""#)
}
