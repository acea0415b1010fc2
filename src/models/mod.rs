// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod article;
pub mod document;
pub mod query_batch;
pub mod report;

pub use article::Article;
pub use document::{Document, DocumentMetadata};
pub use query_batch::QueryBatch;
pub use report::{AskReport, AskStats, FetchStatus};
