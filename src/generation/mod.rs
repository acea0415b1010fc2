// file: src/generation/mod.rs
// description: hosted text-generation endpoint abstraction
// reference: https://huggingface.co/docs/text-generation-inference

pub mod huggingface;
pub mod mock;

use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use huggingface::HuggingFaceClient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationOptions {
    pub fn with_max_new_tokens(max_new_tokens: u32) -> Self {
        Self {
            max_new_tokens: Some(max_new_tokens),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub replies: Vec<String>,
}

impl GenerationOutput {
    /// Callers only ever read the first reply.
    pub fn into_first_reply(self, endpoint: &str) -> Result<String> {
        self.replies
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::generation(endpoint, "endpoint returned no replies"))
    }
}

/// A text-completion model. Implementations hold no per-request state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
    -> Result<GenerationOutput>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reply() {
        let output = GenerationOutput {
            replies: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(output.into_first_reply("llm").unwrap(), "first");
    }

    #[test]
    fn test_no_replies_is_error() {
        let result = GenerationOutput::default().into_first_reply("llm");
        assert!(matches!(result, Err(PipelineError::Generation { .. })));
    }

    #[test]
    fn test_options_serialization_skips_unset() {
        let json = serde_json::to_value(GenerationOptions::with_max_new_tokens(1000)).unwrap();
        assert_eq!(json["max_new_tokens"], 1000);
        assert!(json.get("temperature").is_none());
    }
}
