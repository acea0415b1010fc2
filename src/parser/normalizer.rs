// file: src/parser/normalizer.rs
// description: maps raw search records onto documents
// reference: internal data structures

use crate::models::{Article, Document, DocumentMetadata};

pub struct ArticleNormalizer;

impl ArticleNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Total over every record shape: missing fields become empty values.
    pub fn normalize(&self, article: &Article) -> Document {
        Document {
            content: article.abstract_text.clone().unwrap_or_default(),
            metadata: DocumentMetadata {
                title: article.title.clone().unwrap_or_default(),
                keywords: article.keywords.clone(),
                pubmed_id: article.pubmed_id.clone(),
            },
        }
    }

    pub fn normalize_all<'a, I>(&self, articles: I) -> Vec<Document>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        articles.into_iter().map(|a| self.normalize(a)).collect()
    }
}

impl Default for ArticleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
