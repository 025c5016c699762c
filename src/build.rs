//! Exports the [`build_site`] function which stitches together the steps of
//! building the output site: loading templates and pages, ingesting articles
//! ([`crate::ingest`]), preparing listing pages ([`crate::synthesize`]),
//! rendering markdown, filling listing pages ([`crate::fill`]), and writing
//! every document to disk.

use crate::config::Config;
use crate::document::{Content, Document, LookupError, Rendered, TemplateError, Templates};
use crate::fill::Filler;
use crate::hooks::{Extract, Hooks, MarkdownExtract};
use crate::ingest::{Error as IngestError, Ingestor};
use crate::markdown;
use crate::state::RunState;
use crate::synthesize::synthesize;
use crate::token::{html_path, CONTENT, EXCERPT, TITLE};
use std::fs::{read_dir, read_to_string};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const ARTICLES_DIRECTORY: &str = "articles";

/// Builds the site described by `config` into `output_directory` with the
/// default extractor and no hooks. See [`Site`].
pub fn build_site(config: &Config, output_directory: &Path) -> Result<usize> {
    let hooks = Hooks::new();
    Site {
        config,
        extract: &MarkdownExtract,
        hooks: &hooks,
    }
    .build(output_directory)
}

/// A site build with caller-provided extension points.
pub struct Site<'a> {
    pub config: &'a Config,
    pub extract: &'a dyn Extract,
    pub hooks: &'a Hooks,
}

impl Site<'_> {
    /// Builds the site into `output_directory` and returns the number of
    /// pages written. The output directory is deleted first.
    pub fn build(&self, output_directory: &Path) -> Result<usize> {
        let templates = Templates::from_directory(&self.config.templates_directory)?;
        let mut content = self.load_pages()?;

        // The article feature is only active when there are articles.
        let articles_directory = self.config.content_directory.join(ARTICLES_DIRECTORY);
        let state = match articles_directory.is_dir() {
            false => {
                info!(directory = %articles_directory.display(), "no articles directory");
                None
            }
            true => {
                let mut state = Ingestor::new(&self.config.articles, self.extract, self.hooks)
                    .ingest_directory(&articles_directory, &mut content)?;
                synthesize(&mut state, &mut content)?;
                Some(state)
            }
        };

        let mut rendered = Rendered::new();
        for (identity, document) in content.iter() {
            rendered.insert(
                identity,
                match document.skip_markdown {
                    true => document.content.clone(),
                    false => markdown::to_html(&document.content),
                },
            );
        }

        rmdir(output_directory)?;
        create_dir(output_directory)?;

        let mut written = 0;
        for (identity, document) in content.iter() {
            let body = rendered.get(identity)?.to_owned();
            let body = match &state {
                None => body,
                Some(state) => self.filler(state, &content, &rendered, &templates).fill(identity, body)?,
            };
            let page = apply_template(&templates, document, &body)?;
            let path = output_directory.join(html_path(identity));
            std::fs::write(&path, page).map_err(|err| Error::Write { path, err })?;
            written += 1;
        }

        info!(pages = written, output = %output_directory.display(), "built site");
        Ok(written)
    }

    fn filler<'s>(
        &'s self,
        state: &'s RunState,
        content: &'s Content,
        rendered: &'s Rendered,
        templates: &'s Templates,
    ) -> Filler<'s> {
        Filler {
            state,
            content,
            rendered,
            templates,
            hooks: self.hooks,
        }
    }

    /// Loads the `.md` files directly inside the content directory.
    fn load_pages(&self) -> Result<Content> {
        let dir = &self.config.content_directory;
        let read_error = |err| Error::Read {
            path: dir.clone(),
            err,
        };

        let mut content = Content::new();
        for result in read_dir(dir).map_err(read_error)? {
            let entry = result.map_err(read_error)?;
            let os_file_name = entry.file_name();
            let file_name = os_file_name.to_string_lossy();
            if !file_name.ends_with(".md") || !entry.path().is_file() {
                continue;
            }
            let path = entry.path();
            let body = read_to_string(&path).map_err(|err| Error::Read { path, err })?;
            content.insert(
                file_name.into_owned(),
                Document {
                    title: self.extract.title(&body),
                    content: body,
                    template: self.config.default_template.clone(),
                    ..Document::default()
                },
            );
        }

        if content.is_empty() {
            warn!(directory = %dir.display(), "no pages found");
        }
        Ok(content)
    }
}

/// Wraps `body` in the document's template, replacing `{{content}}`,
/// `{{title}}`, `{{excerpt}}`, and `{{key}}` for every metadata entry.
fn apply_template(templates: &Templates, document: &Document, body: &str) -> Result<String> {
    let mut page = templates
        .get(&document.template)?
        .replace(CONTENT, body)
        .replace(TITLE, &document.title)
        .replace(EXCERPT, &document.excerpt);
    for (key, value) in &document.meta {
        page = page.replace(&format!("{{{{{}}}}}", key), value);
    }
    Ok(page)
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| Error::Write {
        path: dir.to_owned(),
        err,
    })
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during ingestion,
/// registry lookups, cleaning the output directory, and other I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned for errors ingesting articles.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Returned when the templates can't be loaded.
    #[error(transparent)]
    Templates(#[from] TemplateError),

    /// Returned when a document, template, or page is missing.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Returned for I/O problems while cleaning the output directory.
    #[error("Cleaning directory '{}': {err}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned for I/O problems reading pages.
    #[error("Reading '{}': {err}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned for I/O problems writing output files.
    #[error("Writing '{}': {err}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
