use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::token::html_path;

/// Converts markdown to HTML. Links to other source documents (relative
/// links ending in `.md`) are rewritten to point at their `.html` output.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(markdown, options).map(convert));
    out
}

fn is_local_source(url: &str) -> bool {
    !url.contains("://") && !url.starts_with('/') && url.ends_with(".md")
}

fn convert_tag(tag: Tag) -> Tag {
    match tag {
        Tag::Link(kind, url, title) if is_local_source(&url) => {
            Tag::Link(kind, CowStr::Boxed(html_path(&url).into_boxed_str()), title)
        }
        _ => tag,
    }
}

fn convert(ev: Event) -> Event {
    match ev {
        Event::Start(tag) => Event::Start(convert_tag(tag)),
        Event::End(tag) => Event::End(convert_tag(tag)),
        _ => ev,
    }
}
