// file: src/parser/markdown.rs
// description: renders generated answers from markdown to html with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        Self { options }
    }

    /// Raw HTML in the model output is emitted as escaped text, and link or
    /// image targets outside http, https, mailto and relative paths are blanked.
    pub fn render_html(&self, content: &str) -> String {
        let parser = Parser::new_ext(content, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_destination(dest_url),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_destination(dest_url),
                title,
                id,
            }),
            other => other,
        });

        let mut output = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_destination(&dest) {
        dest
    } else {
        CowStr::Borrowed("")
    }
}

// Browsers drop control characters and whitespace inside a scheme.
fn is_safe_destination(dest: &str) -> bool {
    let normalized = dest
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find(':') {
        Some(colon) if !normalized[..colon].contains(['/', '?', '#']) => {
            matches!(&normalized[..colon], "http" | "https" | "mailto")
        }
        _ => true,
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
