// file: src/models/article.rs
// description: raw article record as returned by a literature search client
// reference: https://www.ncbi.nlm.nih.gov/books/NBK25499/

use serde::{Deserialize, Serialize};

/// One record from the literature database. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub pubmed_id: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Article {
    pub fn new(title: &str, abstract_text: &str, keywords: &[&str]) -> Self {
        Self {
            pubmed_id: None,
            title: Some(title.to_string()),
            abstract_text: Some(abstract_text.to_string()),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn with_pubmed_id(mut self, pubmed_id: &str) -> Self {
        self.pubmed_id = Some(pubmed_id.to_string());
        self
    }
}
