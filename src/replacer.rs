//! Rewrites shorthand links of a document into resolved Markdown links.
//!
//! For every link candidate found by the [`Tokenizer`] the replacer
//!
//! 1. asks the scanners, in registration order, which one owns the match,
//! 2. extracts a [`Link`] from it,
//! 3. resolves the target through the [`FileResolver`] (or points a bare
//!    `#anchor` at the current document),
//! 4. fills text, title and icon from the target's front matter,
//! 5. applies the configured CSS class,
//! 6. makes the target relative to the current document and renders it.
//!
//! Any [`BrokenLink`] along the way is logged at debug level and the original
//! text is kept, so the build's own link validation reports it.

use std::path::{Component, Path, PathBuf};

use itertools::Itertools;
use pathdiff::diff_paths;
use regex::Captures;
use tracing::debug;

use crate::config::{BuildConfig, EzLinksOptions};
use crate::error::BrokenLink;
use crate::file_mapper::FileResolver;
use crate::link::Link;
use crate::metadata::MetadataReader;
use crate::scanner::{default_scanners, LinkScanner};
use crate::tokenizer::Tokenizer;

/// The document currently being rewritten.
struct Page<'a> {
    /// Relative to the docs directory
    path: &'a Path,
    abs_path: PathBuf,
    abs_dir: PathBuf,
    config: &'a BuildConfig,
}

impl<'a> Page<'a> {
    fn new(path: &'a Path, config: &'a BuildConfig) -> Page<'a> {
        let abs_path = config.docs_dir.join(path);
        let abs_dir = abs_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.docs_dir.clone());

        Page {
            path,
            abs_path,
            abs_dir,
            config,
        }
    }
}

pub struct LinkReplacer<R, M> {
    file_map: R,
    meta_reader: M,
    options: EzLinksOptions,
    scanners: Vec<Box<dyn LinkScanner>>,
    tokenizer: Tokenizer,
}

impl<R: FileResolver, M: MetadataReader> LinkReplacer<R, M> {
    /// A replacer with the scanners enabled by `options`.
    pub fn new(file_map: R, meta_reader: M, options: EzLinksOptions) -> Result<Self, regex::Error> {
        let scanners = default_scanners(&options);
        Self::with_scanners(file_map, meta_reader, options, scanners)
    }

    pub fn with_scanners(
        file_map: R,
        meta_reader: M,
        options: EzLinksOptions,
        scanners: Vec<Box<dyn LinkScanner>>,
    ) -> Result<Self, regex::Error> {
        let tokenizer = Tokenizer::compile(&scanners)?;
        Ok(LinkReplacer {
            file_map,
            meta_reader,
            options,
            scanners,
            tokenizer,
        })
    }

    /// Register another syntax. It is consulted after the existing scanners.
    pub fn add_scanner(&mut self, scanner: Box<dyn LinkScanner>) -> Result<(), regex::Error> {
        self.scanners.push(scanner);
        match Tokenizer::compile(&self.scanners) {
            Ok(tokenizer) => {
                self.tokenizer = tokenizer;
                Ok(())
            }
            Err(err) => {
                self.scanners.pop();
                Err(err)
            }
        }
    }

    pub fn options(&self) -> &EzLinksOptions {
        &self.options
    }

    /// Rewrite every resolvable link of the document at `path` (relative to
    /// `config.docs_dir`). Text without links, code spans and links that
    /// cannot be resolved come back unchanged.
    pub fn replace(&self, path: &Path, markdown: &str, config: &BuildConfig) -> String {
        let page = Page::new(path, config);

        self.tokenizer
            .replace_all(markdown, |captures| {
                let original = &captures[0];
                match self.replace_match(captures, &page) {
                    Ok(Some(rendered)) => rendered,
                    Ok(None) => original.to_string(),
                    Err(err) => {
                        debug!("Leaving link in {} unchanged: {}", path.display(), err);
                        original.to_string()
                    }
                }
            })
            .into_owned()
    }

    /// `Ok(None)` when no scanner claims the match.
    fn replace_match(
        &self,
        captures: &Captures,
        page: &Page,
    ) -> Result<Option<String>, BrokenLink> {
        let Some(scanner) = self.scanners.iter().find(|scanner| scanner.owns(captures)) else {
            return Ok(None);
        };

        let mut link = scanner.extract(captures)?;
        self.resolve(&mut link, &captures[0], page)?;

        if let Some(class_name) = &self.options.wiki_html_class {
            link.class_name = Some(class_name.clone());
        }

        let self_reference =
            link.anchor.is_some() && link.target == page.abs_path.to_string_lossy();
        link.target = match self_reference {
            // `[[#Section]]` and links to the page itself stay in-page
            true => String::new(),
            false => relative_target(&link.target, &page.abs_dir),
        };

        Ok(Some(link.render()))
    }

    /// Point `link.target` at an absolute document path and enrich the link
    /// from that document's front matter.
    ///
    /// Without front matter the raw target only stands in for an empty
    /// label. Text the author wrote is never replaced.
    fn resolve(&self, link: &mut Link, raw: &str, page: &Page) -> Result<(), BrokenLink> {
        if link.target.is_empty() {
            if link.anchor.is_none() {
                return Err(BrokenLink::NoTarget(raw.to_string()));
            }
            link.target = page.abs_path.to_string_lossy().into_owned();
            return Ok(());
        }

        let Some(mut resolved) = self.file_map.search(page.path, &link.target) else {
            link.source_not_found = true;
            return Err(BrokenLink::NotFound(link.target.clone()));
        };
        if !page.config.use_directory_urls && resolved.extension().is_none() {
            resolved.set_extension("md");
        }
        let abs_target = page.config.docs_dir.join(&resolved);

        match self.meta_reader.read_front_matter(&abs_target) {
            Some(meta) => {
                if link.text.is_empty() {
                    if let Some(title) = meta.title() {
                        link.text = title;
                    }
                }
                if link.is_icon_only() {
                    if let Some(title) = meta.title() {
                        link.title = Some(title);
                    }
                } else if link.title.is_none() {
                    link.title = meta.summary();
                }
                if let Some(icon) = meta.icon() {
                    link.icon = Some(icon_shortcode(&icon));
                }
            }
            None => {
                if link.text.is_empty() {
                    link.text = link.target.clone();
                }
            }
        }

        link.target = abs_target.to_string_lossy().into_owned();
        Ok(())
    }
}

/// Icon as written between colons in a label: `material/star` becomes
/// `material-star`. Characters that would end the shortcode become `-` too.
fn icon_shortcode(icon: &str) -> String {
    icon.chars()
        .map(|c| match c {
            '/' | ':' | '[' | ']' => '-',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect()
}

/// `target` relative to `from_dir`, with `/` separators and spaces encoded
/// so the destination stays a single Markdown token.
fn relative_target(target: &str, from_dir: &Path) -> String {
    let target = Path::new(target);
    let relative = diff_paths(target, from_dir).unwrap_or_else(|| target.to_path_buf());

    relative
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy())
        .join("/")
        .replace(' ', "%20")
}
