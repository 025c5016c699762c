//! Resolves listing-page placeholders while listing documents are rendered.

use tracing::debug;

use crate::document::{Content, Rendered, Result, Templates};
use crate::hooks::{Hook, Hooks};
use crate::ingest::SINGLE_TEMPLATE;
use crate::state::RunState;
use crate::token::{self, articles_token, excerpts_token, html_path, page_index, PageRef};

/// The fragment template used when the listing shows excerpts.
pub const EXCERPT_TEMPLATE: &str = "articles-excerpt.html";

/// Fills listing pages from the state of a single run. Everything it holds
/// is read-only.
pub struct Filler<'a> {
    pub state: &'a RunState,

    /// Source documents, including the listing document and the articles.
    pub content: &'a Content,

    /// Rendered article bodies.
    pub rendered: &'a Rendered,

    pub templates: &'a Templates,

    /// Runs [`Hook::SingleContent`] on every article fragment.
    pub hooks: &'a Hooks,
}

impl Filler<'_> {
    /// Fills the rendered content of the document `identity`. For listing
    /// pages, the page's `{{articles}}`/`{{excerpts}}` placeholders (or their
    /// numbered forms) are replaced with the page's article fragments and
    /// `{{pagination}}` with the prev/next links. Any other document is
    /// returned unchanged.
    ///
    /// Substitution order is: articles placeholder, excerpts placeholder,
    /// then `{{pagination}}`. Article text containing a later placeholder
    /// literally is substituted too.
    pub fn fill(&self, identity: &str, rendered_content: String) -> Result<String> {
        let n = match page_index(&self.state.location, identity) {
            PageRef::Unrelated => return Ok(rendered_content),
            PageRef::Root => 0,
            PageRef::Numbered(n) => n,
        };

        let articles = self.articles(n)?;
        let template = self.fragment_template()?;

        let mut fragments = String::new();
        for article in articles {
            fragments.push_str(&self.fragment(template, article)?);
        }
        debug!(
            page = n,
            identity,
            articles = articles.len(),
            "filled listing page"
        );

        Ok(rendered_content
            .replace(&*articles_token(n), &fragments)
            .replace(&*excerpts_token(n), &fragments)
            .replace(token::PAGINATION, &self.pagination(identity)))
    }

    /// The article identities of page `n`. A run without articles still has
    /// a page 0 listing document; it lists nothing.
    fn articles(&self, n: usize) -> Result<&[String]> {
        match (n, self.state.page_count()) {
            (0, 0) => Ok(&[]),
            (n, _) => self.state.page(n),
        }
    }

    /// Every listing page uses the excerpt template when the listing
    /// document asks for `{{excerpts}}`, and the single-article template
    /// otherwise.
    fn fragment_template(&self) -> Result<&str> {
        let root = self
            .content
            .get(&token::page_identity(&self.state.location, 0))?;
        self.templates.get(match root.content.contains(token::EXCERPTS) {
            true => EXCERPT_TEMPLATE,
            false => SINGLE_TEMPLATE,
        })
    }

    fn fragment(&self, template: &str, article: &str) -> Result<String> {
        let document = self.content.get(article)?;
        let fragment = template
            .replace(token::TITLE, &document.title)
            .replace(token::CONTENT, self.rendered.get(article)?)
            .replace(token::EXCERPT, &document.excerpt);
        Ok(self.hooks.apply(Hook::SingleContent, fragment, article))
    }

    /// Renders the prev/next links block for the document `identity`. Links
    /// that don't exist are left out; the wrapping `div` is always present.
    pub fn pagination(&self, identity: &str) -> String {
        let (previous, next) = self.state.neighbors(&html_path(identity));
        let mut out = String::from("<div class='pagination'>");
        if let Some(previous) = previous {
            out.push_str(&format!(
                "<span class='previous-page'><a href='{}'>&laquo; Previous Page</a></span>",
                previous
            ));
        }
        if let Some(next) = next {
            out.push_str(&format!(
                "<span class='next-page'><a href='{}'>Next Page &raquo;</a></span>",
                next
            ));
        }
        out.push_str("</div>");
        out
    }
}
