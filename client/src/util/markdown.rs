//! Markdown rendering for advisory text returned by the inference API.
//!
//! Model output is untrusted. Raw HTML is dropped, and link or image
//! destinations are kept only when they are relative or use `http`, `https`
//! or `mailto`; anything else renders with an empty destination.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render `markdown` to HTML suitable for `inner_html`.
#[must_use]
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: sanitize_destination(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: sanitize_destination(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&dest) { dest } else { CowStr::Borrowed("") }
}

/// Browsers ignore whitespace and control characters inside a scheme, so
/// they are stripped before the scheme is compared.
fn is_safe_destination(dest: &str) -> bool {
    let compact: String = dest.chars().filter(|c| !c.is_whitespace() && !c.is_control()).collect();
    let Some(colon) = compact.find(':') else {
        return true;
    };
    if compact[..colon].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = compact[..colon].to_ascii_lowercase();
    ALLOWED_SCHEMES.contains(&scheme.as_str())
}
