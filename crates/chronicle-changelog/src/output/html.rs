//! HTML conversion

use pulldown_cmark::{html, Options, Parser};

/// Markdown extensions enabled for every conversion
pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Convert a Markdown document to HTML.
///
/// Soft line breaks stay soft, quotes are left alone and raw HTML passes
/// through unchanged.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
