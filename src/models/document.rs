// file: src/models/document.rs
// description: normalized abstract document passed to the answer prompt
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubmed_id: Option<String>,
}

/// Abstract text plus title and keyword metadata for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(content: String, title: String, keywords: Vec<String>) -> Self {
        Self {
            content,
            metadata: DocumentMetadata {
                title,
                keywords,
                pubmed_id: None,
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn keywords(&self) -> &[String] {
        &self.metadata.keywords
    }

    pub fn source_url(&self) -> Option<String> {
        self.metadata
            .pubmed_id
            .as_ref()
            .map(|id| format!("https://pubmed.ncbi.nlm.nih.gov/{}/", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(
            "Abstract text".to_string(),
            "A title".to_string(),
            vec!["mRNA".to_string()],
        );

        assert_eq!(doc.title(), "A title");
        assert_eq!(doc.keywords(), &["mRNA".to_string()]);
        assert!(doc.source_url().is_none());
    }

    #[test]
    fn test_source_url_from_pubmed_id() {
        let mut doc = Document::default();
        doc.metadata.pubmed_id = Some("12345".to_string());
        assert_eq!(
            doc.source_url().as_deref(),
            Some("https://pubmed.ncbi.nlm.nih.gov/12345/")
        );
    }

    #[test]
    fn test_pubmed_id_omitted_when_absent() {
        let doc = Document::new(String::new(), String::new(), vec![]);
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["metadata"].get("pubmed_id").is_none());
        assert_eq!(json["content"], "");
    }
}
