//! Project configuration. A project is a directory containing a `folio.yaml`
//! file; the article options live under its `articles:` key.

use serde::Deserialize;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const PROJECT_FILE: &str = "folio.yaml";

#[derive(Deserialize)]
struct PageSize(i64);
impl Default for PageSize {
    fn default() -> Self {
        PageSize(10)
    }
}

fn default_index() -> String {
    String::from("index")
}

fn default_date_format() -> String {
    String::from("Y-m-d")
}

#[derive(Deserialize)]
struct RawArticles {
    #[serde(default = "default_index")]
    active_menu: String,

    #[serde(default = "default_date_format")]
    date_format: String,

    #[serde(default = "default_index")]
    location: String,

    #[serde(default)]
    articles_per_page: PageSize,
}

impl Default for RawArticles {
    fn default() -> Self {
        RawArticles {
            active_menu: default_index(),
            date_format: default_date_format(),
            location: default_index(),
            articles_per_page: PageSize::default(),
        }
    }
}

/// The validated `articles:` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticlesConfig {
    /// Stored in every article's metadata as `active-menu`.
    pub active_menu: String,

    /// The display date format (`Y`, `m`, and `d` tokens, see
    /// [`crate::date::format_date`]).
    pub date_format: String,

    /// The base name of the listing document (`{location}.md`).
    pub location: String,

    /// The number of articles per listing page.
    pub articles_per_page: NonZeroUsize,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        // the defaults are always valid
        RawArticles::default()
            .validate()
            .unwrap_or_else(|_| unreachable!("default page size is positive"))
    }
}

impl RawArticles {
    fn validate(self) -> Result<ArticlesConfig> {
        let articles_per_page = usize::try_from(self.articles_per_page.0)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(Error::InvalidPageSize(self.articles_per_page.0))?;
        Ok(ArticlesConfig {
            active_menu: self.active_menu,
            date_format: self.date_format,
            location: self.location,
            articles_per_page,
        })
    }
}

impl ArticlesConfig {
    /// Parses an `articles:` section from YAML.
    pub fn from_yaml(input: &str) -> Result<ArticlesConfig> {
        let raw: RawArticles = serde_yaml::from_str(input)?;
        raw.validate()
    }
}

#[derive(Deserialize)]
struct Project {
    #[serde(default)]
    articles: Option<RawArticles>,

    content_directory: Option<PathBuf>,

    templates_directory: Option<PathBuf>,

    default_template: Option<String>,
}

/// Everything a build needs to know about a project.
#[derive(Clone, Debug)]
pub struct Config {
    pub articles: ArticlesConfig,

    /// The directory containing the project file.
    pub root_directory: PathBuf,

    /// The directory holding top-level pages and the `articles/` directory.
    pub content_directory: PathBuf,

    /// The directory holding `*.html` templates.
    pub templates_directory: PathBuf,

    /// The template applied to plain pages.
    pub default_template: String,
}

impl Config {
    /// Looks for `folio.yaml` in `dir` and then in each of its parents.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(dir) = current {
            let path = dir.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
            current = dir.parent();
        }
        Err(Error::ProjectNotFound(dir.to_owned()))
    }

    /// Loads a project file. Relative directories are resolved against the
    /// file's parent directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Config {
            articles: project.articles.unwrap_or_default().validate()?,
            root_directory: root.to_owned(),
            content_directory: root.join(
                project
                    .content_directory
                    .unwrap_or_else(|| PathBuf::from("content")),
            ),
            templates_directory: root.join(
                project
                    .templates_directory
                    .unwrap_or_else(|| PathBuf::from("templates")),
            ),
            default_template: project
                .default_template
                .unwrap_or_else(|| String::from("page.html")),
        })
    }
}

/// The result of loading configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a configuration error. All of these abort the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when `articles_per_page` is zero or negative.
    #[error("articles_per_page must be a positive integer, got {0}")]
    InvalidPageSize(i64),

    /// Returned when no project file exists in the directory or its parents.
    #[error("could not find `folio.yaml` in `{}` or any parent directory", .0.display())]
    ProjectNotFound(PathBuf),

    /// Returned when the project file can't be opened.
    #[error("opening project file `{}`: {err}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned when the project file isn't valid YAML for a project.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() -> Result<()> {
        let config = ArticlesConfig::from_yaml("{}")?;
        assert_eq!(ArticlesConfig::default(), config);
        assert_eq!("index", config.active_menu);
        assert_eq!("Y-m-d", config.date_format);
        assert_eq!("index", config.location);
        assert_eq!(10, config.articles_per_page.get());
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let config = ArticlesConfig::from_yaml(
            "active_menu: blog\ndate_format: d.m.Y\nlocation: blog\narticles_per_page: 3\n",
        )?;
        assert_eq!("blog", config.active_menu);
        assert_eq!("d.m.Y", config.date_format);
        assert_eq!("blog", config.location);
        assert_eq!(3, config.articles_per_page.get());
        Ok(())
    }

    #[test]
    fn test_non_positive_page_size() {
        for size in &["0", "-4"] {
            match ArticlesConfig::from_yaml(&format!("articles_per_page: {}", size)) {
                Err(Error::InvalidPageSize(n)) => assert_eq!(size.parse::<i64>().unwrap(), n),
                other => panic!("wanted InvalidPageSize, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_directory_searches_parents() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        std::fs::write(
            root.path().join(PROJECT_FILE),
            "articles:\n  location: blog\ntemplates_directory: theme\n",
        )?;
        let nested = root.path().join("content").join("articles");
        std::fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!("blog", config.articles.location);
        assert_eq!(root.path(), config.root_directory);
        assert_eq!(root.path().join("content"), config.content_directory);
        assert_eq!(root.path().join("theme"), config.templates_directory);
        assert_eq!("page.html", config.default_template);
        Ok(())
    }

    #[test]
    fn test_missing_articles_section_uses_defaults() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let root = tempfile::tempdir()?;
        std::fs::write(root.path().join(PROJECT_FILE), "default_template: base.html\n")?;
        let config = Config::from_directory(root.path())?;
        assert_eq!(ArticlesConfig::default(), config.articles);
        assert_eq!("base.html", config.default_template);
        Ok(())
    }
}
