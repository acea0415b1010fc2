// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod generation;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod search;
pub mod server;
pub mod utils;

pub use config::{Config, FetchConfig, GenerationConfig, PubMedConfig, ServerConfig};
pub use error::{PipelineError, Result};
pub use exporter::{ExportedReport, JsonExporter};
pub use generation::{GenerationOptions, GenerationOutput, HuggingFaceClient, TextGenerator};
pub use models::{Article, AskReport, AskStats, Document, DocumentMetadata, FetchStatus, QueryBatch};
pub use parser::{ArticleNormalizer, MarkdownRenderer, PubMedXmlParser};
pub use pipeline::{AskPipeline, AskStage, FetchOutcome, FetchRun, ProgressTracker, QueryFetcher};
pub use prompts::{AnswerPrompt, KeywordPrompt};
pub use search::{LiteratureSearch, PubMedClient};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, PromptTemplate, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _normalizer = ArticleNormalizer::new();
        let _template = PromptTemplate::new("{{ question }}");
    }
}
