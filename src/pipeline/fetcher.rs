// file: src/pipeline/fetcher.rs
// description: query fetch step turning a keyword batch into documents
// reference: one search call per query line, first failure ends the run

use crate::config::FetchConfig;
use crate::error::PipelineError;
use crate::models::{Document, FetchStatus, QueryBatch};
use crate::parser::ArticleNormalizer;
use crate::search::LiteratureSearch;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum FetchOutcome {
    Complete(Vec<Document>),
    /// The search client failed; `documents` holds what was collected first.
    Partial {
        documents: Vec<Document>,
        cause: PipelineError,
    },
}

impl FetchOutcome {
    pub fn documents(&self) -> &[Document] {
        match self {
            FetchOutcome::Complete(documents) => documents,
            FetchOutcome::Partial { documents, .. } => documents,
        }
    }

    pub fn into_documents(self) -> Vec<Document> {
        match self {
            FetchOutcome::Complete(documents) => documents,
            FetchOutcome::Partial { documents, .. } => documents,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, FetchOutcome::Complete(_))
    }

    pub fn status(&self) -> FetchStatus {
        match self {
            FetchOutcome::Complete(_) => FetchStatus::Complete,
            FetchOutcome::Partial { cause, .. } => FetchStatus::Partial {
                cause: cause.to_string(),
            },
        }
    }
}

#[derive(Debug)]
pub struct FetchRun {
    pub outcome: FetchOutcome,
    pub search_calls: usize,
}

pub struct QueryFetcher {
    search: Arc<dyn LiteratureSearch>,
    normalizer: ArticleNormalizer,
    config: FetchConfig,
}

impl QueryFetcher {
    pub fn new(search: Arc<dyn LiteratureSearch>, config: FetchConfig) -> Self {
        Self {
            search,
            normalizer: ArticleNormalizer::new(),
            config,
        }
    }

    /// Only the first batch is read; there is a single upstream producer.
    pub async fn run(&self, queries: &[QueryBatch]) -> FetchRun {
        match queries.first() {
            Some(batch) => self.run_batch(batch).await,
            None => FetchRun {
                outcome: FetchOutcome::Complete(Vec::new()),
                search_calls: 0,
            },
        }
    }

    pub async fn run_batch(&self, batch: &QueryBatch) -> FetchRun {
        let fragments = if self.config.skip_blank_queries {
            batch.non_blank_fragments()
        } else {
            batch.fragments()
        };

        let mut documents = Vec::new();
        let mut search_calls = 0;

        for query in fragments {
            search_calls += 1;
            match self
                .search
                .query(query, self.config.max_results_per_query)
                .await
            {
                Ok(articles) => {
                    debug!("{} article(s) for query {:?}", articles.len(), query);
                    documents.extend(self.normalizer.normalize_all(&articles));
                }
                Err(e) => {
                    warn!("{}", e);
                    warn!(
                        "Couldn't fetch articles for queries: {:?} (kept {} document(s))",
                        batch.as_str(),
                        documents.len()
                    );
                    return FetchRun {
                        outcome: FetchOutcome::Partial {
                            documents,
                            cause: e,
                        },
                        search_calls,
                    };
                }
            }
        }

        FetchRun {
            outcome: FetchOutcome::Complete(documents),
            search_calls,
        }
    }
}
