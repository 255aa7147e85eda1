use std::path::{Path, PathBuf};

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;

/// Options of the link rewriter itself.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EzLinksOptions {
    /// Recognize `[[wiki links]]`
    pub wikilinks: bool,
    /// CSS class added to every rendered link
    pub wiki_html_class: Option<String>,
    /// Handed to the file resolver; warn when a target matches several documents
    pub warn_ambiguities: bool,
}

impl Default for EzLinksOptions {
    fn default() -> Self {
        EzLinksOptions {
            wikilinks: true,
            wiki_html_class: None,
            warn_ambiguities: false,
        }
    }
}

/// Site-level settings the rewriter needs from the surrounding build.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub docs_dir: PathBuf,
    /// Pages are served as `page/` rather than `page.md`
    pub use_directory_urls: bool,
}

impl BuildConfig {
    pub fn new(docs_dir: impl Into<PathBuf>, use_directory_urls: bool) -> BuildConfig {
        BuildConfig {
            docs_dir: docs_dir.into(),
            use_directory_urls,
        }
    }
}

/// Everything read from the settings files, split into [`EzLinksOptions`]
/// and [`BuildConfig`] once loaded.
#[derive(Deserialize, Debug, Clone)]
struct RawSettings {
    wikilinks: bool,
    wiki_html_class: Option<String>,
    warn_ambiguities: bool,
    docs_dir: PathBuf,
    use_directory_urls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: EzLinksOptions,
    pub build: BuildConfig,
}

impl Settings {
    pub fn new(root_dir: &Path) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/ezlinks/settings");
        let root = root_dir
            .to_str()
            .ok_or(anyhow!("Can't convert root_dir to str"))?;
        let settings = Config::builder()
            .add_source(File::with_name(&expanded).required(false))
            .add_source(File::with_name(&format!("{root}/.ezlinks")).required(false))
            .set_default("wikilinks", true)?
            .set_default("warn_ambiguities", false)?
            .set_default("docs_dir", "docs")?
            .set_default("use_directory_urls", true)?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let raw = settings.try_deserialize::<RawSettings>()?;
        let wiki_html_class = raw.wiki_html_class.filter(|class| !class.is_empty());

        anyhow::Ok(Settings {
            options: EzLinksOptions {
                wikilinks: raw.wikilinks,
                wiki_html_class,
                warn_ambiguities: raw.warn_ambiguities,
            },
            build: BuildConfig::new(root_dir.join(raw.docs_dir), raw.use_directory_urls),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            options: EzLinksOptions::default(),
            build: BuildConfig::new("docs", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::new(temp_dir.path()).unwrap();

        assert_eq!(settings.options, EzLinksOptions::default());
        assert_eq!(settings.build.docs_dir, temp_dir.path().join("docs"));
        assert!(settings.build.use_directory_urls);
    }

    #[test]
    fn project_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".ezlinks.toml"),
            r#"
wikilinks = false
wiki_html_class = "ezlink"
warn_ambiguities = true
docs_dir = "site-src"
use_directory_urls = false
"#,
        )
        .unwrap();

        let settings = Settings::new(temp_dir.path()).unwrap();

        assert_eq!(
            settings.options,
            EzLinksOptions {
                wikilinks: false,
                wiki_html_class: Some("ezlink".into()),
                warn_ambiguities: true,
            }
        );
        assert_eq!(settings.build.docs_dir, temp_dir.path().join("site-src"));
        assert!(!settings.build.use_directory_urls);
    }

    #[test]
    fn absolute_docs_dir_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("elsewhere");
        fs::write(
            temp_dir.path().join(".ezlinks.yaml"),
            format!("docs_dir: {}\n", docs.display()),
        )
        .unwrap();

        let settings = Settings::new(temp_dir.path()).unwrap();
        assert_eq!(settings.build.docs_dir, docs);
    }
}
