// file: src/models/report.rs
// description: per-request trace of one ask invocation
// reference: internal data structures

use crate::models::{Document, QueryBatch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    Complete,
    Partial { cause: String },
}

impl FetchStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, FetchStatus::Partial { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskStats {
    pub search_calls: usize,
    pub documents_fetched: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskReport {
    pub request_id: Uuid,
    pub question: String,
    pub query_batch: QueryBatch,
    pub documents: Vec<Document>,
    pub fetch_status: FetchStatus,
    pub answer: String,
    pub stats: AskStats,
}
