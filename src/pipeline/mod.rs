// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod fetcher;
mod orchestrator;
mod progress;

pub use fetcher::{FetchOutcome, FetchRun, QueryFetcher};
pub use orchestrator::{AskPipeline, AskStage};
pub use progress::ProgressTracker;
