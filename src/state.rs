//! The per-run state shared by ingestion, synthesis, and filling.

use crate::document::{LookupError, Result};
use std::num::NonZeroUsize;

/// Created once by [`crate::ingest::Ingestor`] at the end of ingestion and
/// dropped at the end of the run. [`crate::synthesize::synthesize`] fills in
/// `pagination_links`; everything after that only reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    /// The base name of the listing document.
    pub location: String,

    /// The number of articles per page.
    pub articles_per_page: NonZeroUsize,

    /// All article identities, newest first.
    pub articles: Vec<String>,

    /// `articles` split into pages.
    pub pages: Vec<Vec<String>>,

    /// The output URL of every page, in page order.
    pub pagination_links: Vec<String>,
}

impl RunState {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The article identities on page `n`.
    pub fn page(&self, n: usize) -> Result<&[String]> {
        self.pages
            .get(n)
            .map(Vec::as_slice)
            .ok_or(LookupError::UnknownPage(n))
    }

    /// The pages before and after the page whose output URL is `url`.
    pub fn neighbors(&self, url: &str) -> (Option<&str>, Option<&str>) {
        match self.pagination_links.iter().position(|link| link == url) {
            None => (None, None),
            Some(i) => (
                i.checked_sub(1)
                    .and_then(|p| self.pagination_links.get(p))
                    .map(String::as_str),
                self.pagination_links.get(i + 1).map(String::as_str),
            ),
        }
    }
}
