// file: src/parser/pubmed_xml.rs
// description: extracts article records from efetch PubmedArticleSet xml
// reference: https://www.nlm.nih.gov/bsd/licensee/elements_descriptions.html

use crate::error::{PipelineError, Result};
use crate::models::Article;
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

pub struct PubMedXmlParser;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Pmid,
    Title,
    AbstractPart,
    Keyword,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"PMID" => Some(Field::Pmid),
            b"ArticleTitle" => Some(Field::Title),
            b"AbstractText" => Some(Field::AbstractPart),
            b"Keyword" => Some(Field::Keyword),
            _ => None,
        }
    }

    fn tag(&self) -> &'static [u8] {
        match self {
            Field::Pmid => b"PMID",
            Field::Title => b"ArticleTitle",
            Field::AbstractPart => b"AbstractText",
            Field::Keyword => b"Keyword",
        }
    }
}

#[derive(Debug, Default)]
struct ArticleBuilder {
    pubmed_id: Option<String>,
    title: Option<String>,
    abstract_parts: Vec<String>,
    keywords: Vec<String>,
}

impl ArticleBuilder {
    fn commit(&mut self, field: Field, text: String) {
        match field {
            // CommentsCorrections carry their own PMID elements after the citation's
            Field::Pmid => {
                if self.pubmed_id.is_none() {
                    self.pubmed_id = non_empty(collapse_whitespace(&text));
                }
            }
            Field::Title => {
                if self.title.is_none() {
                    self.title = non_empty(collapse_whitespace(&text));
                }
            }
            Field::AbstractPart => {
                let part = text.trim();
                if !part.is_empty() {
                    self.abstract_parts.push(part.to_string());
                }
            }
            Field::Keyword => {
                if let Some(keyword) = non_empty(collapse_whitespace(&text)) {
                    self.keywords.push(keyword);
                }
            }
        }
    }

    fn build(self) -> Article {
        Article {
            pubmed_id: self.pubmed_id,
            title: self.title,
            abstract_text: if self.abstract_parts.is_empty() {
                None
            } else {
                Some(self.abstract_parts.join("\n"))
            },
            keywords: self.keywords,
        }
    }
}

impl PubMedXmlParser {
    /// Parses every `PubmedArticle` and Bookshelf `PubmedBookArticle` in
    /// document order. Inline markup inside
    /// titles and abstracts is flattened to its text.
    pub fn parse_articles(xml: &str) -> Result<Vec<Article>> {
        let mut reader = Reader::from_str(xml);
        let mut articles = Vec::new();
        let mut current: Option<ArticleBuilder> = None;
        let mut capture: Option<(Field, String)> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"PubmedArticle" | b"PubmedBookArticle" => {
                        current = Some(ArticleBuilder::default());
                        capture = None;
                    }
                    name => {
                        if current.is_some() && capture.is_none() {
                            if let Some(field) = Field::from_tag(name) {
                                capture = Some((field, String::new()));
                            }
                        }
                    }
                },
                Ok(Event::Text(t)) => {
                    if let Some((_, buf)) = capture.as_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| PipelineError::Parse(format!("Invalid XML text: {}", e)))?;
                        buf.push_str(&text);
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some((_, buf)) = capture.as_mut() {
                        buf.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Ok(Event::End(e)) => {
                    let name = e.name();
                    if matches!(name.as_ref(), b"PubmedArticle" | b"PubmedBookArticle") {
                        if let Some(builder) = current.take() {
                            articles.push(builder.build());
                        }
                        capture = None;
                    } else if let Some((field, text)) =
                        capture.take_if(|(field, _)| field.tag() == name.as_ref())
                        && let Some(builder) = current.as_mut()
                    {
                        builder.commit(field, text);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(PipelineError::Parse(format!(
                        "Malformed efetch XML at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
        }

        debug!("Parsed {} articles from efetch response", articles.len());
        Ok(articles)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
