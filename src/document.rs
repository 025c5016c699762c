//! Defines the [`Document`] record and the registries the pipeline reads
//! from and writes to: [`Content`] (source documents), [`Rendered`] (rendered
//! bodies), and [`Templates`] (raw template text).

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

/// A source document known to the generator. Articles, the listing document,
/// and synthesized listing pages are all [`Document`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// The source text. For articles this is the body with the leading
    /// heading stripped.
    pub content: String,

    /// The title extracted from the source.
    pub title: String,

    /// The excerpt extracted from the source.
    pub excerpt: String,

    /// The identifier of the template the document is rendered with.
    pub template: String,

    /// Free-form metadata (`date`, `permalink`, `active-menu` for articles).
    pub meta: BTreeMap<String, String>,

    /// Whether the document is an article.
    pub is_article: bool,

    /// Whether the document's content is already HTML and must not be passed
    /// through the markdown renderer.
    pub skip_markdown: bool,
}

/// The shared content registry: document identity to [`Document`].
#[derive(Debug, Default)]
pub struct Content(BTreeMap<String, Document>);

impl Content {
    pub fn new() -> Content {
        Content::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, document: Document) {
        self.0.insert(identity.into(), document);
    }

    pub fn get(&self, identity: &str) -> Result<&Document> {
        self.0
            .get(identity)
            .ok_or_else(|| LookupError::UnknownDocument(identity.to_owned()))
    }

    pub fn get_mut(&mut self, identity: &str) -> Result<&mut Document> {
        self.0
            .get_mut(identity)
            .ok_or_else(|| LookupError::UnknownDocument(identity.to_owned()))
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.0.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates documents in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Rendered (post-markdown) bodies by document identity. Read-only to the
/// listing pipeline.
#[derive(Debug, Default)]
pub struct Rendered(BTreeMap<String, String>);

impl Rendered {
    pub fn new() -> Rendered {
        Rendered::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, html: String) {
        self.0.insert(identity.into(), html);
    }

    pub fn get(&self, identity: &str) -> Result<&str> {
        self.0
            .get(identity)
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownRendered(identity.to_owned()))
    }
}

/// Raw template text by template identifier.
#[derive(Debug, Default)]
pub struct Templates(BTreeMap<String, String>);

impl Templates {
    pub fn new() -> Templates {
        Templates::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.0.insert(name.into(), text.into());
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| LookupError::UnknownTemplate(name.to_owned()))
    }

    /// Loads every `*.html` file under `dir`, keyed by its path relative to
    /// `dir` with `/` separators (e.g., `page.html`, `partials/nav.html`).
    pub fn from_directory(dir: &Path) -> std::result::Result<Templates, TemplateError> {
        use walkdir::WalkDir;

        let mut templates = Templates::new();
        for result in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = result?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map_or(true, |ext| ext != "html")
            {
                continue;
            }
            // strip_prefix shouldn't fail since `dir` is always an ancestor
            // of `path`
            let name = match path.strip_prefix(dir) {
                Ok(relative) => relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"),
                Err(_) => continue,
            };
            let text = read_to_string(path).map_err(|err| TemplateError::Read {
                path: path.to_owned(),
                err,
            })?;
            templates.insert(name, text);
        }
        Ok(templates)
    }
}

/// Returned when templates can't be loaded from disk.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Returned when the template directory can't be walked.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// Returned when a template file can't be read.
    #[error("reading template '{}': {err}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

/// The result of a registry lookup.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Returned when the pipeline references something that does not exist.
/// These indicate a broken invariant (e.g., a page count mismatch between
/// synthesis and filling) rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No document is registered under the identity.
    #[error("unknown document `{0}`")]
    UnknownDocument(String),

    /// No rendered body is registered under the identity.
    #[error("no rendered body for `{0}`")]
    UnknownRendered(String),

    /// No template is registered under the identifier.
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    /// The page index is beyond the paginated article list.
    #[error("unknown page index {0}")]
    UnknownPage(usize),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lookup_errors_name_the_identity() {
        let content = Content::new();
        assert_eq!(
            LookupError::UnknownDocument("missing.md".to_owned()),
            content.get("missing.md").unwrap_err()
        );
        assert_eq!(
            "unknown template `articles-loop.html`",
            Templates::new()
                .get("articles-loop.html")
                .unwrap_err()
                .to_string()
        );
    }

    #[test]
    fn test_templates_from_directory() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("page.html"), "<main>{{content}}</main>")?;
        std::fs::write(dir.path().join("notes.txt"), "ignored")?;
        std::fs::create_dir(dir.path().join("partials"))?;
        std::fs::write(dir.path().join("partials").join("nav.html"), "<nav/>")?;
        let templates = Templates::from_directory(dir.path())?;
        assert_eq!("<main>{{content}}</main>", templates.get("page.html")?);
        assert_eq!("<nav/>", templates.get("partials/nav.html")?);
        assert!(templates.get("notes.txt").is_err());
        Ok(())
    }
}
