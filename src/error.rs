// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation failed ({endpoint}): {message}")]
    Generation { endpoint: String, message: String },

    #[error("Literature search failed for query {query:?}: {message}")]
    Search { query: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl PipelineError {
    pub fn generation(endpoint: &str, message: impl Into<String>) -> Self {
        Self::Generation {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    pub fn search(query: &str, message: impl Into<String>) -> Self {
        Self::Search {
            query: query.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display_quotes_query() {
        let err = PipelineError::search("", "empty term");
        assert_eq!(
            err.to_string(),
            "Literature search failed for query \"\": empty term"
        );
    }

    #[test]
    fn test_generation_error_display() {
        let err = PipelineError::generation("keyword_llm", "no replies");
        assert!(err.to_string().contains("keyword_llm"));
        assert!(err.to_string().contains("no replies"));
    }
}
