//! Defines the [`Ingestor`] and its [`Error`] type: the logic for turning
//! article source files into [`Document`]s and the ordered article list that
//! the rest of the pipeline paginates.

use std::fs::{read_dir, read_to_string};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::config::ArticlesConfig;
use crate::date::{self, date_prefix, format_date};
use crate::document::{Content, Document};
use crate::hooks::{Extract, Hook, Hooks};
use crate::paginate::paginate;
use crate::state::RunState;
use crate::token::html_path;

/// The template assigned to every article.
pub const SINGLE_TEMPLATE: &str = "articles-single.html";

const MARKDOWN_EXTENSION: &str = ".md";

static LEADING_HEADING: OnceLock<Regex> = OnceLock::new();

/// Removes the first markdown heading line from `body`. Only the line's text
/// is removed; its line break stays.
fn strip_heading(body: &str) -> String {
    LEADING_HEADING
        .get_or_init(|| Regex::new(r"(?m)^#+[ \t]*.*$").unwrap()) // literal pattern
        .replacen(body, 1, "")
        .into_owned()
}

/// Parses articles into the shared [`Content`] registry.
pub struct Ingestor<'a> {
    /// The `articles:` configuration section.
    config: &'a ArticlesConfig,

    /// Extracts titles and excerpts from article sources.
    extract: &'a dyn Extract,

    /// Runs [`Hook::Excerpt`] filters on every excerpt.
    hooks: &'a Hooks,
}

impl<'a> Ingestor<'a> {
    /// Constructs a new ingestor. See fields on [`Ingestor`] for argument
    /// descriptions.
    pub fn new(config: &'a ArticlesConfig, extract: &'a dyn Extract, hooks: &'a Hooks) -> Self {
        Ingestor {
            config,
            extract,
            hooks,
        }
    }

    /// Reads every `.md` file directly inside `dir` and ingests it. See
    /// [`Ingestor::ingest_sources`].
    pub fn ingest_directory(&self, dir: &Path, content: &mut Content) -> Result<RunState> {
        let mut sources = Vec::new();
        for result in read_dir(dir).map_err(|err| Error::Io {
            path: dir.to_owned(),
            err,
        })? {
            let entry = result.map_err(|err| Error::Io {
                path: dir.to_owned(),
                err,
            })?;
            let os_file_name = entry.file_name();
            let file_name = os_file_name.to_string_lossy();
            if file_name.ends_with(MARKDOWN_EXTENSION) {
                let path = entry.path();
                let body = read_to_string(&path).map_err(|err| Error::Io { path, err })?;
                sources.push((file_name.into_owned(), body));
            }
        }
        self.ingest_sources(sources, content)
    }

    /// Ingests `(file_name, body)` pairs. Every article is registered in
    /// `content` under its file name, and the returned [`RunState`] holds the
    /// article identities sorted newest first (descending file name order)
    /// along with their pages.
    ///
    /// Fails on the first file name that doesn't begin with a valid
    /// `YYYY-MM-DD` date.
    pub fn ingest_sources<I>(&self, sources: I, content: &mut Content) -> Result<RunState>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut articles = Vec::new();
        for (file_name, body) in sources {
            let article = self
                .article(&file_name, &body)
                .map_err(|e| Error::Annotated(format!("ingesting `{}`", file_name), Box::new(e)))?;
            debug!(article = %file_name, date = %article.meta["date"], "ingested article");
            content.insert(file_name.clone(), article);
            articles.push(file_name);
        }

        articles.sort_by(|a, b| b.cmp(a));
        let pages = paginate(&articles, self.config.articles_per_page);
        info!(
            articles = articles.len(),
            pages = pages.len(),
            location = %self.config.location,
            "ingested articles"
        );

        Ok(RunState {
            location: self.config.location.clone(),
            articles_per_page: self.config.articles_per_page,
            articles,
            pages,
            pagination_links: Vec::new(),
        })
    }

    fn article(&self, file_name: &str, body: &str) -> Result<Document> {
        let date = date_prefix(file_name)
            .ok_or_else(|| Error::MissingDatePrefix(file_name.to_owned()))?;

        let excerpt = self.extract.excerpt(body);
        let excerpt = self.hooks.apply(Hook::Excerpt, excerpt, file_name);

        let mut article = Document {
            title: self.extract.title(body),
            content: strip_heading(body),
            excerpt,
            template: SINGLE_TEMPLATE.to_owned(),
            is_article: true,
            ..Document::default()
        };
        article
            .meta
            .insert("date".to_owned(), format_date(date, &self.config.date_format)?);
        article
            .meta
            .insert("permalink".to_owned(), html_path(file_name));
        article
            .meta
            .insert("active-menu".to_owned(), self.config.active_menu.clone());
        Ok(article)
    }
}

/// Represents the result of an ingestion.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error ingesting articles. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when an article's file name doesn't start with `YYYY-MM-DD`.
    #[error("file name `{0}` does not begin with a YYYY-MM-DD date")]
    MissingDatePrefix(String),

    /// Returned when the date prefix is not a real date.
    #[error(transparent)]
    Date(#[from] date::Error),

    /// Returned when the articles directory or a file in it can't be read.
    #[error("reading `{}`: {err}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// An error with an annotation.
    #[error("{0}: {1}")]
    Annotated(String, #[source] Box<Error>),
}

impl Error {
    /// Strips annotations, returning the underlying error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Annotated(_, err) => err.root(),
            err => err,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hooks::MarkdownExtract;
    use std::num::NonZeroUsize;

    fn sources(names: &[&str]) -> Vec<(String, String)> {
        names
            .iter()
            .map(|n| (n.to_string(), format!("# Title of {}\n\nExcerpt of {}.\n\nMore.", n, n)))
            .collect()
    }

    #[test]
    fn test_articles_sorted_newest_first() -> Result<()> {
        let config = ArticlesConfig::default();
        let hooks = Hooks::new();
        let mut content = Content::new();
        let state = Ingestor::new(&config, &MarkdownExtract, &hooks).ingest_sources(
            sources(&["2024-01-01-a.md", "2024-03-01-b.md", "2023-12-31-c.md"]),
            &mut content,
        )?;
        assert_eq!(
            vec!["2024-03-01-b.md", "2024-01-01-a.md", "2023-12-31-c.md"],
            state.articles
        );
        assert_eq!(3, content.len());
        Ok(())
    }

    #[test]
    fn test_article_metadata() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let config = ArticlesConfig {
            active_menu: "blog".to_owned(),
            date_format: "d/m/Y".to_owned(),
            ..ArticlesConfig::default()
        };
        let mut hooks = Hooks::new();
        hooks.add(Hook::Excerpt, |excerpt, id| format!("{} ({})", excerpt, id));
        let mut content = Content::new();
        Ingestor::new(&config, &MarkdownExtract, &hooks).ingest_sources(
            vec![(
                "2024-03-07-hello.md".to_owned(),
                "# Hello\nFirst paragraph.\n\n## Sub\n\nRest.".to_owned(),
            )],
            &mut content,
        )?;

        let article = content.get("2024-03-07-hello.md")?;
        assert_eq!("Hello", article.title);
        assert_eq!("First paragraph. (2024-03-07-hello.md)", article.excerpt);
        assert_eq!("\nFirst paragraph.\n\n## Sub\n\nRest.", article.content);
        assert_eq!(SINGLE_TEMPLATE, article.template);
        assert!(article.is_article);
        assert!(!article.skip_markdown);
        assert_eq!("07/03/2024", article.meta["date"]);
        assert_eq!("2024-03-07-hello.html", article.meta["permalink"]);
        assert_eq!("blog", article.meta["active-menu"]);
        Ok(())
    }

    #[test]
    fn test_pages_follow_config() -> Result<()> {
        let config = ArticlesConfig {
            articles_per_page: NonZeroUsize::new(2).unwrap(),
            ..ArticlesConfig::default()
        };
        let hooks = Hooks::new();
        let mut content = Content::new();
        let state = Ingestor::new(&config, &MarkdownExtract, &hooks).ingest_sources(
            sources(&["2020-01-01.md", "2020-01-02.md", "2020-01-03.md"]),
            &mut content,
        )?;
        assert_eq!(
            vec![
                vec!["2020-01-03.md".to_owned(), "2020-01-02.md".to_owned()],
                vec!["2020-01-01.md".to_owned()],
            ],
            state.pages
        );
        assert!(state.pagination_links.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_date_prefix_names_file() {
        let config = ArticlesConfig::default();
        let hooks = Hooks::new();
        let mut content = Content::new();
        let err = Ingestor::new(&config, &MarkdownExtract, &hooks)
            .ingest_sources(sources(&["2024-01-01-a.md", "hello.md"]), &mut content)
            .unwrap_err();
        match err.root() {
            Error::MissingDatePrefix(name) => assert_eq!("hello.md", name),
            other => panic!("wanted MissingDatePrefix, got {:?}", other),
        }
        assert!(err.to_string().contains("hello.md"));
    }

    #[test]
    fn test_ingest_directory_skips_non_markdown() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("2024-05-05-x.md"), "# X\n\nx")?;
        std::fs::write(dir.path().join("cover.png"), [0u8; 4])?;
        let config = ArticlesConfig::default();
        let hooks = Hooks::new();
        let mut content = Content::new();
        let state = Ingestor::new(&config, &MarkdownExtract, &hooks)
            .ingest_directory(dir.path(), &mut content)?;
        assert_eq!(vec!["2024-05-05-x.md"], state.articles);
        Ok(())
    }
}
