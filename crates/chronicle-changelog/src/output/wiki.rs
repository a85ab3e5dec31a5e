//! Confluence wiki markup conversion

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use regex::Regex;

use super::html::markdown_options;

/// Markup tags inside raw HTML
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("Invalid regex"));

/// Convert a Markdown document to wiki markup.
///
/// Raw HTML in the document is reduced to its text; tags are dropped.
pub fn to_wiki(markdown: &str) -> String {
    let mut writer = WikiWriter::default();
    for event in Parser::new_ext(markdown, markdown_options()) {
        writer.event(event);
    }

    format!("{}\n", writer.out.trim_end())
}

#[derive(Default)]
struct WikiWriter {
    out: String,
    /// Bullet character of each open list, innermost last
    lists: Vec<char>,
    /// Destination of the link being written
    link: Option<String>,
    in_table_head: bool,
}

impl WikiWriter {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.out.push_str(&text),
            Event::Code(code) => {
                self.out.push_str("{{");
                self.out.push_str(&code);
                self.out.push_str("}}");
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.out.push_str(&TAG_REGEX.replace_all(&html, ""));
            }
            Event::SoftBreak => self.out.push(' '),
            Event::HardBreak => self.out.push_str("\\\\\n"),
            Event::Rule => self.out.push_str("----\n\n"),
            Event::TaskListMarker(done) => self.out.push_str(if done { "(/) " } else { "(x) " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.out.push_str(&format!("h{}. ", level as usize));
            }
            Tag::Strong => self.out.push('*'),
            Tag::Emphasis => self.out.push('_'),
            Tag::Strikethrough => self.out.push('-'),
            Tag::Link { dest_url, .. } => {
                self.out.push('[');
                self.link = Some(dest_url.to_string());
            }
            Tag::List(start) => {
                if !self.lists.is_empty() && !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
                self.lists.push(if start.is_some() { '#' } else { '*' });
            }
            Tag::Item => {
                let bullets: String = self.lists.iter().collect();
                self.out.push_str(&bullets);
                self.out.push(' ');
            }
            Tag::CodeBlock(kind) => {
                match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                        self.out.push_str(&format!("{{code:language={}}}\n", lang));
                    }
                    _ => self.out.push_str("{code}\n"),
                }
            }
            Tag::TableHead => self.in_table_head = true,
            Tag::TableCell => self.out.push_str(if self.in_table_head { "||" } else { "|" }),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) | TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.out.push_str("\n\n");
                }
            }
            TagEnd::Strong => self.out.push('*'),
            TagEnd::Emphasis => self.out.push('_'),
            TagEnd::Strikethrough => self.out.push('-'),
            TagEnd::Link => {
                if let Some(url) = self.link.take() {
                    self.out.push('|');
                    self.out.push_str(&url);
                }
                self.out.push(']');
            }
            TagEnd::Item => {
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            TagEnd::CodeBlock => {
                if !self.out.ends_with('\n') {
                    self.out.push('\n');
                }
                self.out.push_str("{code}\n\n");
            }
            TagEnd::TableHead => {
                self.out.push_str("||\n");
                self.in_table_head = false;
            }
            TagEnd::TableRow => self.out.push_str("|\n"),
            TagEnd::Table => self.out.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASE: &str = "## [v1.1.0](https://example.com/compare/v1.0.0...v1.1.0) (2024-03-01)

### Features

* **api:** add search ([abc1234](https://example.com/commit/abc1234))
* add export

### BREAKING CHANGES

* **api:** drops the `/v1` routes
";

    #[test]
    fn test_release_fragment() {
        let out = to_wiki(RELEASE);

        assert!(out.starts_with(
            "h2. [v1.1.0|https://example.com/compare/v1.0.0...v1.1.0] (2024-03-01)\n\n"
        ));
        assert!(out.contains("h3. Features\n\n"));
        assert!(out.contains("* *api:* add search ([abc1234|https://example.com/commit/abc1234])\n"));
        assert!(out.contains("* add export\n"));
        assert!(out.contains("* *api:* drops the {{/v1}} routes\n"));
    }

    #[test]
    fn test_nested_and_ordered_lists() {
        let out = to_wiki("1. first\n2. second\n   * inner\n");
        assert!(out.contains("# first\n"));
        assert!(out.contains("# second\n#* inner\n"));
    }

    #[test]
    fn test_emphasis_and_strike() {
        let out = to_wiki("_soft_ and ~~gone~~\n");
        assert_eq!(out, "_soft_ and -gone-\n");
    }

    #[test]
    fn test_code_block() {
        let out = to_wiki("```rust\nfn main() {}\n```\n");
        assert_eq!(out, "{code:language=rust}\nfn main() {}\n{code}\n");
    }

    #[test]
    fn test_table() {
        let out = to_wiki("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(out.contains("||a||b||\n"));
        assert!(out.contains("|1|2|\n"));
    }

    #[test]
    fn test_strips_leftover_tags() {
        let out = to_wiki("text with <span class=\"x\">inline</span> html\n\n<div>block</div>\n");
        assert!(out.contains("text with inline html"));
        assert!(out.contains("block"));
        assert!(!out.contains('<'));
    }

    #[test]
    fn test_escaped_angle_bracket_in_text_kept() {
        let out = to_wiki("* support &lt;details> blocks\n");
        assert_eq!(out, "* support <details> blocks\n");
    }
}
