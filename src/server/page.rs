// file: src/server/page.rs
// description: html rendering of the question form and answer view

use crate::models::Document;

pub const PAGE_TITLE: &str = "HealthCare chatbot for keyword and answer generation";

const EXAMPLE_QUESTIONS: [&str; 5] = [
    "How are mRNA vaccines being used for cancer treatment?",
    "Suggest me some Case Studies related to Pneumonia.",
    "Tell me about HIV AIDS.",
    "Suggest some case studies related to Auto Immune Disorders.",
    "How to treat a COVID infected Patient?",
];

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 24px; }
h1 { margin-bottom: 4px; }
.subtitle { font-size: 22px; text-align: center; }
form { display: flex; flex-direction: column; gap: 8px; margin: 16px 0; }
input[type=text] { font-size: 16px; padding: 8px; }
button { align-self: flex-start; font-size: 16px; padding: 6px 18px; }
.answer { border-left: 4px solid #4a90d9; padding: 4px 16px; }
.notice { background: #fff4d6; padding: 8px 12px; }
.error { background: #fde2e2; padding: 8px 12px; }
"#;

/// Values for one render of the page. `answer_html` must already be safe.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub question: Option<&'a str>,
    pub answer_html: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub sources: &'a [Document],
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));
    body.push_str("<p class=\"subtitle\">Powered by PubMed and Mixtral 8x7B</p>\n");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"question\">Ask a question about BioMedical and get an answer from a friendly AI assistant.</label>\n\
         <input type=\"text\" id=\"question\" name=\"question\" value=\"{}\">\n\
         <button type=\"submit\">Submit</button>\n\
         </form>\n",
        escape_html(view.question.unwrap_or(""))
    ));

    if let Some(error) = &view.error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
    }

    if let Some(notice) = &view.notice {
        body.push_str(&format!("<p class=\"notice\">{}</p>\n", escape_html(notice)));
    }

    if let Some(answer) = &view.answer_html {
        body.push_str(&format!("<div class=\"answer\">\n{}</div>\n", answer));
    }

    if !view.sources.is_empty() {
        body.push_str("<h3>Sources</h3>\n<ol>\n");
        for doc in view.sources {
            let title = if doc.title().is_empty() {
                "Untitled article"
            } else {
                doc.title()
            };
            match doc.source_url() {
                Some(url) => body.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>\n",
                    escape_html(&url),
                    escape_html(title)
                )),
                None => body.push_str(&format!("<li>{}</li>\n", escape_html(title))),
            }
        }
        body.push_str("</ol>\n");
    }

    body.push_str("<p>Example Questions:</p>\n<ol>\n");
    for example in EXAMPLE_QUESTIONS {
        body.push_str(&format!("<li>{}</li>\n", escape_html(example)));
    }
    body.push_str("</ol>\n");

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        PAGE_TITLE, STYLE, body
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_form_and_examples() {
        let html = render_page(&PageView::default());

        assert!(html.contains(PAGE_TITLE));
        assert!(html.contains("Powered by PubMed and Mixtral 8x7B"));
        assert!(html.contains("name=\"question\""));
        assert!(html.contains("Suggest me some Case Studies related to Pneumonia."));
        assert!(!html.contains("class=\"answer\""));
    }

    #[test]
    fn test_question_is_escaped() {
        let html = render_page(&PageView {
            question: Some("\"><script>"),
            ..PageView::default()
        });

        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_sources_listed_with_links() {
        let mut linked = Document::new(String::new(), "mRNA & cancer".to_string(), vec![]);
        linked.metadata.pubmed_id = Some("38000001".to_string());
        let untitled = Document::default();
        let sources = vec![linked, untitled];

        let html = render_page(&PageView {
            answer_html: Some("<p>ok</p>".to_string()),
            sources: &sources,
            ..PageView::default()
        });

        assert!(html.contains("<a href=\"https://pubmed.ncbi.nlm.nih.gov/38000001/\">mRNA &amp; cancer</a>"));
        assert!(html.contains("<li>Untitled article</li>"));
        assert!(html.contains("<div class=\"answer\">\n<p>ok</p>"));
    }
}
