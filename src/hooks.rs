//! Extension points. [`Extract`] pulls titles and excerpts out of article
//! sources; [`Hooks`] lets callers post-process excerpts and article
//! fragments.

use std::collections::HashMap;
use std::fmt;

/// Extracts the title and excerpt from an article's raw markdown source.
pub trait Extract {
    fn title(&self, body: &str) -> String;
    fn excerpt(&self, body: &str) -> String;
}

/// The default [`Extract`]: the title is the text of the first `#` heading
/// and the excerpt is the first paragraph that isn't a heading.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownExtract;

impl Extract for MarkdownExtract {
    fn title(&self, body: &str) -> String {
        body.lines()
            .map(str::trim_start)
            .find(|line| line.starts_with('#'))
            .map(|line| line.trim_start_matches('#').trim().to_owned())
            .unwrap_or_default()
    }

    fn excerpt(&self, body: &str) -> String {
        let mut paragraph: Vec<&str> = Vec::new();
        for line in body.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                if !paragraph.is_empty() {
                    break;
                }
                continue;
            }
            paragraph.push(line);
        }
        paragraph.join(" ")
    }
}

/// The named points at which [`Hooks`] filters run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Runs on each article's excerpt during ingestion.
    Excerpt,

    /// Runs on each rendered article fragment while a listing page is
    /// filled.
    SingleContent,
}

type Filter = Box<dyn Fn(String, &str) -> String>;

/// Filter chains keyed by [`Hook`]. Each filter receives the current value
/// and the identity of the article it belongs to and returns the new value.
#[derive(Default)]
pub struct Hooks {
    filters: HashMap<Hook, Vec<Filter>>,
}

impl Hooks {
    pub fn new() -> Hooks {
        Hooks::default()
    }

    /// Appends `filter` to the chain for `hook`. Filters run in the order
    /// they were added.
    pub fn add<F>(&mut self, hook: Hook, filter: F)
    where
        F: Fn(String, &str) -> String + 'static,
    {
        self.filters.entry(hook).or_default().push(Box::new(filter));
    }

    /// Passes `value` through every filter registered for `hook`.
    pub fn apply(&self, hook: Hook, value: String, identity: &str) -> String {
        match self.filters.get(&hook) {
            None => value,
            Some(filters) => filters
                .iter()
                .fold(value, |value, filter| filter(value, identity)),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.filters.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}
