//! Markdown-to-HTML conversion for module bodies and the index document.

use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Converts `markdown` to HTML and appends the result to `out`.
pub fn to_html(out: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(markdown, options).map(demote_heading);
    html::push_html(out, events);
}

// The headings in a module document need to be demoted twice to be
// subordinate to both the site title (h1) and the module name (h2). So `#`
// becomes h3 instead of h1.
fn demote_heading(event: Event) -> Event {
    match event {
        Event::Start(Tag::Heading(size)) => Event::Start(Tag::Heading(size + 2)),
        Event::End(Tag::Heading(size)) => Event::End(Tag::Heading(size + 2)),
        _ => event,
    }
}
