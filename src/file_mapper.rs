//! Mapping of link targets to documents of the site.

use std::path::{Component, Path, PathBuf};

use itertools::Itertools;
use tracing::warn;

/// Finds the document a link target refers to.
///
/// Paths handed in and returned are relative to the docs directory. A
/// resolver may also return an absolute path.
pub trait FileResolver {
    fn search(&self, from_file: &Path, target: &str) -> Option<PathBuf>;
}

impl<F> FileResolver for F
where
    F: Fn(&Path, &str) -> Option<PathBuf>,
{
    fn search(&self, from_file: &Path, target: &str) -> Option<PathBuf> {
        self(from_file, target)
    }
}

/// In-memory index over every document of a site.
///
/// The list of files comes from whoever discovered the site; the mapper never
/// touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileMapper {
    /// Normalized, sorted, unique.
    files: Vec<PathBuf>,
    warn_ambiguities: bool,
}

impl FileMapper {
    pub fn new<P: AsRef<Path>>(
        files: impl IntoIterator<Item = P>,
        warn_ambiguities: bool,
    ) -> FileMapper {
        let files = files
            .into_iter()
            .filter_map(|file| normalize(file.as_ref()))
            .sorted()
            .dedup()
            .collect();

        FileMapper {
            files,
            warn_ambiguities,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    fn contains(&self, path: &Path) -> bool {
        self.files.binary_search_by(|file| file.as_path().cmp(path)).is_ok()
    }

    /// A document at exactly `target`, trying the `.md` and `index.md` forms first.
    fn exact(&self, base: &Path, target: &str) -> Option<PathBuf> {
        let joined = base.join(target.trim_end_matches('/'));
        [with_md(&joined), joined.join("index.md"), joined]
            .into_iter()
            .filter_map(|candidate| normalize(&candidate))
            .find(|candidate| self.contains(candidate))
    }

    /// Documents whose trailing components match the target.
    fn by_suffix(&self, target: &str) -> Vec<&PathBuf> {
        let wanted: PathBuf = Path::new(target.trim_end_matches('/'))
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect();
        if wanted.as_os_str().is_empty() {
            return vec![];
        }
        let wanted_md = with_md(&wanted);

        let matches = self
            .files
            .iter()
            .filter(|file| file.ends_with(&wanted) || file.ends_with(&wanted_md))
            .collect_vec();
        if !matches.is_empty() || wanted.extension().is_some() {
            return matches;
        }

        // `![[diagram]]` for `img/diagram.png`
        self.files
            .iter()
            .filter(|file| file.with_extension("").ends_with(&wanted))
            .collect()
    }

    /// Pick the candidate sharing the longest directory prefix with the
    /// linking document; earlier paths win ties.
    fn closest<'a>(
        &self,
        from_file: &Path,
        target: &str,
        candidates: Vec<&'a PathBuf>,
    ) -> Option<&'a PathBuf> {
        if candidates.len() > 1 && self.warn_ambiguities {
            warn!(
                "Link target '{}' in {} is ambiguous, candidates: {}",
                target,
                from_file.display(),
                candidates.iter().map(|c| c.display()).join(", ")
            );
        }

        let from_dir = from_file.parent().unwrap_or(Path::new(""));
        candidates
            .into_iter()
            .rev()
            .max_by_key(|candidate| common_prefix_len(from_dir, candidate))
    }
}

impl FileResolver for FileMapper {
    fn search(&self, from_file: &Path, target: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(target)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| target.to_string());
        let target = decoded.trim();
        if target.is_empty() {
            return None;
        }

        let from_dir = from_file.parent().unwrap_or(Path::new(""));
        let exact = match target.strip_prefix('/') {
            Some(rooted) => self.exact(Path::new(""), rooted),
            None => self.exact(from_dir, target),
        };
        if exact.is_some() {
            return exact;
        }

        let candidates = self.by_suffix(target);
        self.closest(from_file, target, candidates).cloned()
    }
}

fn with_md(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".md");
    PathBuf::from(name)
}

/// Resolve `.` and `..` lexically. `None` when the path climbs above its root.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::Normal(part) => normalized.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!normalized.as_os_str().is_empty()).then_some(normalized)
}

fn common_prefix_len(a: &Path, b: &Path) -> usize {
    a.components()
        .zip(b.components())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn mapper() -> FileMapper {
        FileMapper::new(
            [
                "index.md",
                "guide/index.md",
                "guide/setup.md",
                "guide/usage.md",
                "reference/setup.md",
                "reference/api/client.md",
                "img/diagram.png",
                "my page.md",
                "./guide/../about.md",
            ],
            false,
        )
    }

    #[rstest]
    #[case("index.md", "guide/setup", Some("guide/setup.md"))]
    #[case("index.md", "guide/setup.md", Some("guide/setup.md"))]
    #[case("guide/usage.md", "setup", Some("guide/setup.md"))]
    #[case("guide/usage.md", "./setup.md", Some("guide/setup.md"))]
    #[case("guide/usage.md", "../index", Some("index.md"))]
    #[case("guide/usage.md", "/reference/setup", Some("reference/setup.md"))]
    #[case("reference/api/client.md", "setup", Some("reference/setup.md"))]
    #[case("index.md", "client", Some("reference/api/client.md"))]
    #[case("index.md", "api/client", Some("reference/api/client.md"))]
    #[case("index.md", "guide/", Some("guide/index.md"))]
    #[case("index.md", "diagram", Some("img/diagram.png"))]
    #[case("index.md", "diagram.png", Some("img/diagram.png"))]
    #[case("index.md", "my%20page", Some("my page.md"))]
    #[case("index.md", "about", Some("about.md"))]
    #[case("index.md", "missing", None)]
    #[case("index.md", "", None)]
    #[case("index.md", "../../outside", None)]
    fn search(#[case] from: &str, #[case] target: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            mapper().search(Path::new(from), target),
            expected.map(PathBuf::from)
        );
    }

    #[test]
    fn ambiguous_prefers_first_path_without_context() {
        // index.md shares no directory with either setup.md
        assert_eq!(
            mapper().search(Path::new("index.md"), "setup"),
            Some(PathBuf::from("guide/setup.md"))
        );
    }

    #[test]
    fn files_are_normalized_and_unique() {
        let mapper = FileMapper::new(["b.md", "./a.md", "a.md", "x/../c.md", "../escape.md"], true);
        assert_eq!(
            mapper.files(),
            &[PathBuf::from("a.md"), PathBuf::from("b.md"), PathBuf::from("c.md")]
        );
    }

    #[test]
    fn closures_resolve_too() {
        let resolver = |_: &Path, target: &str| Some(PathBuf::from(target));
        assert_eq!(
            resolver.search(Path::new("a.md"), "b"),
            Some(PathBuf::from("b"))
        );
    }
}
