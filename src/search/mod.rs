// file: src/search/mod.rs
// description: literature search client abstraction and implementations
// reference: https://www.ncbi.nlm.nih.gov/books/NBK25500/

pub mod mock;
pub mod pubmed;

use crate::error::Result;
use crate::models::Article;
use async_trait::async_trait;

pub use pubmed::PubMedClient;

/// One network-backed lookup per call, capped at `max_results` records.
#[async_trait]
pub trait LiteratureSearch: Send + Sync {
    async fn query(&self, query: &str, max_results: usize) -> Result<Vec<Article>>;

    fn name(&self) -> &str;
}
