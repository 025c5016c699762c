//! Placeholder and page naming shared by [`crate::synthesize`] and
//! [`crate::fill`]. The two passes run at different times and must agree on
//! every name, so neither formats these strings itself.

use std::borrow::Cow;

const MARKDOWN_EXTENSION: &str = ".md";
const HTML_EXTENSION: &str = ".html";

/// Aggregate placeholder for full article bodies on the first page.
pub const ARTICLES: &str = "{{articles}}";

/// Aggregate placeholder for article excerpts on the first page.
pub const EXCERPTS: &str = "{{excerpts}}";

/// Placeholder for the prev/next links block.
pub const PAGINATION: &str = "{{pagination}}";

/// Fragment template placeholders.
pub const TITLE: &str = "{{title}}";
pub const CONTENT: &str = "{{content}}";
pub const EXCERPT: &str = "{{excerpt}}";

/// The `{{articles}}` placeholder for page `n`.
pub fn articles_token(n: usize) -> Cow<'static, str> {
    match n {
        0 => Cow::Borrowed(ARTICLES),
        n => Cow::Owned(format!("{{{{articles_{}}}}}", n)),
    }
}

/// The `{{excerpts}}` placeholder for page `n`.
pub fn excerpts_token(n: usize) -> Cow<'static, str> {
    match n {
        0 => Cow::Borrowed(EXCERPTS),
        n => Cow::Owned(format!("{{{{excerpts_{}}}}}", n)),
    }
}

/// The document identity of page `n` of the listing at `location`.
pub fn page_identity(location: &str, n: usize) -> String {
    match n {
        0 => format!("{}{}", location, MARKDOWN_EXTENSION),
        n => format!("{}_{}{}", location, n, MARKDOWN_EXTENSION),
    }
}

/// Maps a source identity to its output path (`.md` becomes `.html`).
pub fn html_path(identity: &str) -> String {
    match identity.strip_suffix(MARKDOWN_EXTENSION) {
        Some(stem) => format!("{}{}", stem, HTML_EXTENSION),
        None => identity.to_owned(),
    }
}

/// Where a document sits relative to the listing pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRef {
    /// The listing document itself (page 0).
    Root,

    /// A synthesized listing document (`{location}_{n}.md`, n >= 1).
    Numbered(usize),

    /// Any other document.
    Unrelated,
}

/// Classifies `identity` against the listing `location`.
pub fn page_index(location: &str, identity: &str) -> PageRef {
    let rest = match identity.strip_prefix(location) {
        Some(rest) => rest,
        None => return PageRef::Unrelated,
    };
    if rest == MARKDOWN_EXTENSION {
        return PageRef::Root;
    }
    let digits = rest
        .strip_prefix('_')
        .and_then(|r| r.strip_suffix(MARKDOWN_EXTENSION));
    match digits {
        Some(d) if !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()) => {
            match d.parse::<usize>() {
                Ok(0) | Err(_) => PageRef::Unrelated,
                Ok(n) => PageRef::Numbered(n),
            }
        }
        _ => PageRef::Unrelated,
    }
}
