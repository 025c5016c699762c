//! Creates the listing documents for every page after the first.

use tracing::{debug, info};

use crate::document::{Content, Result};
use crate::state::RunState;
use crate::token::{articles_token, excerpts_token, html_path, page_identity, ARTICLES, EXCERPTS};

/// The template assigned to every listing page.
pub const LOOP_TEMPLATE: &str = "articles-loop.html";

/// Prepares the listing pages. The listing document (`{location}.md`) becomes
/// page 0; for every further page a copy of it is registered as
/// `{location}_{n}.md` with its `{{articles}}` and `{{excerpts}}`
/// placeholders renamed to that page's placeholders. All listing pages get
/// [`LOOP_TEMPLATE`] and skip markdown rendering.
///
/// Rebuilds `state.pagination_links` so that it holds one output URL per page
/// in page order. Returns the number of documents created.
pub fn synthesize(state: &mut RunState, content: &mut Content) -> Result<usize> {
    let root_identity = page_identity(&state.location, 0);
    let root = content.get_mut(&root_identity)?;
    root.template = LOOP_TEMPLATE.to_owned();
    root.skip_markdown = true;
    let root = root.clone();

    state.pagination_links.clear();
    state.pagination_links.push(html_path(&root_identity));

    for n in 1..state.page_count() {
        let mut page = root.clone();
        page.content = page
            .content
            .replace(ARTICLES, &articles_token(n))
            .replace(EXCERPTS, &excerpts_token(n));

        let identity = page_identity(&state.location, n);
        debug!(page = n, identity = %identity, "synthesized listing page");
        state.pagination_links.push(html_path(&identity));
        content.insert(identity, page);
    }

    let created = state.page_count().saturating_sub(1);
    info!(
        location = %state.location,
        pages = state.pagination_links.len(),
        created,
        "prepared listing pages"
    );
    Ok(created)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::{Document, LookupError};
    use crate::paginate::paginate;
    use std::num::NonZeroUsize;

    fn run_state(total: usize, per_page: usize) -> RunState {
        let articles: Vec<String> = (0..total).map(|i| format!("2024-01-{:02}.md", i)).collect();
        let articles_per_page = NonZeroUsize::new(per_page).unwrap();
        RunState {
            location: "index".to_owned(),
            articles_per_page,
            pages: paginate(&articles, articles_per_page),
            articles,
            pagination_links: Vec::new(),
        }
    }

    fn listing(content: &str) -> Content {
        let mut c = Content::new();
        c.insert(
            "index.md",
            Document {
                content: content.to_owned(),
                template: "page.html".to_owned(),
                ..Document::default()
            },
        );
        c
    }

    #[test]
    fn test_synthesize_three_pages() -> Result<()> {
        let mut state = run_state(25, 10);
        let mut content = listing("<h1>Blog</h1>{{excerpts}}{{articles}}{{pagination}}");
        assert_eq!(2, synthesize(&mut state, &mut content)?);

        assert_eq!(
            vec!["index.html", "index_1.html", "index_2.html"],
            state.pagination_links
        );

        let root = content.get("index.md")?;
        assert_eq!("<h1>Blog</h1>{{excerpts}}{{articles}}{{pagination}}", root.content);
        assert_eq!(LOOP_TEMPLATE, root.template);
        assert!(root.skip_markdown);

        for n in 1..3 {
            let page = content.get(&format!("index_{}.md", n))?;
            assert_eq!(
                format!(
                    "<h1>Blog</h1>{{{{excerpts_{n}}}}}{{{{articles_{n}}}}}{{{{pagination}}}}",
                    n = n
                ),
                page.content
            );
            assert_eq!(LOOP_TEMPLATE, page.template);
            assert!(page.skip_markdown);
        }
        assert!(!content.contains("index_3.md"));
        Ok(())
    }

    #[test]
    fn test_synthesize_single_page() -> Result<()> {
        let mut state = run_state(4, 10);
        let mut content = listing("{{articles}}");
        assert_eq!(0, synthesize(&mut state, &mut content)?);
        assert_eq!(vec!["index.html"], state.pagination_links);
        assert_eq!(1, content.len());
        Ok(())
    }

    #[test]
    fn test_synthesize_no_articles() -> Result<()> {
        let mut state = run_state(0, 10);
        let mut content = listing("{{articles}}");
        assert_eq!(0, synthesize(&mut state, &mut content)?);
        assert_eq!(vec!["index.html"], state.pagination_links);
        Ok(())
    }

    #[test]
    fn test_links_match_page_count() -> Result<()> {
        for total in 1..30 {
            let mut state = run_state(total, 7);
            let mut content = listing("{{articles}}");
            synthesize(&mut state, &mut content)?;
            assert_eq!(state.page_count(), state.pagination_links.len());
        }
        Ok(())
    }

    #[test]
    fn test_missing_listing_document() {
        let mut state = run_state(3, 1);
        let mut content = Content::new();
        assert_eq!(
            Err(LookupError::UnknownDocument("index.md".to_owned())),
            synthesize(&mut state, &mut content)
        );
    }
}
