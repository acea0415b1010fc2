// file: src/generation/huggingface.rs
// description: Hugging Face inference / TGI text-generation client
// reference: https://huggingface.co/docs/api-inference/tasks/text-generation

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{GenerationOptions, GenerationOutput, TextGenerator};

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

// Serverless inference answers with a list; a bare TGI server with one object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Error { error: String },
}

pub struct HuggingFaceClient {
    client: Client,
    name: String,
    url: String,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(
        name: &str,
        base_url: &str,
        model: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            name: name.to_string(),
            url: format!("{}/{}", Validator::trim_base_url(base_url), model),
            api_key,
        })
    }

    fn parse_output(&self, response: TextGenerationResponse) -> Result<GenerationOutput> {
        match response {
            TextGenerationResponse::Batch(items) => Ok(GenerationOutput {
                replies: items.into_iter().map(|i| i.generated_text).collect(),
            }),
            TextGenerationResponse::Single(item) => Ok(GenerationOutput {
                replies: vec![item.generated_text],
            }),
            TextGenerationResponse::Error { error } => {
                Err(PipelineError::generation(&self.name, error))
            }
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutput> {
        let request = TextGenerationRequest {
            inputs: prompt,
            parameters: TextGenerationParameters {
                max_new_tokens: options.max_new_tokens,
                temperature: options.temperature,
                return_full_text: false,
            },
        };

        debug!(
            "Requesting generation from {} for {} chars (max_new_tokens={:?})",
            self.name,
            prompt.len(),
            options.max_new_tokens
        );

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::generation(&self.name, format!("Failed to send request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::generation(
                &self.name,
                format!("request failed with status {}: {}", status, error_text),
            ));
        }

        let body: TextGenerationResponse = response.json().await.map_err(|e| {
            PipelineError::generation(&self.name, format!("Failed to parse response: {}", e))
        })?;

        let output = self.parse_output(body)?;
        debug!("{} returned {} reply(ies)", self.name, output.replies.len());
        Ok(output)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
