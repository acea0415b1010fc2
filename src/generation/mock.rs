// file: src/generation/mock.rs
// description: scripted text generator for tests

use crate::error::{PipelineError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

use super::{GenerationOptions, GenerationOutput, TextGenerator};

/// Returns pre-defined outputs in order and records every prompt it saw.
pub struct ScriptedGenerator {
    name: String,
    outputs: Vec<GenerationOutput>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedGenerator {
    pub fn new(name: &str, replies: Vec<&str>) -> Self {
        let outputs = replies
            .into_iter()
            .map(|reply| GenerationOutput {
                replies: vec![reply.to_string()],
            })
            .collect();
        Self::with_outputs(name, outputs)
    }

    pub fn with_outputs(name: &str, outputs: Vec<GenerationOutput>) -> Self {
        Self {
            name: name.to_string(),
            outputs,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(prompt, _)| prompt).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutput> {
        let index = {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            calls.push((prompt.to_string(), options.clone()));
            calls.len() - 1
        };

        self.outputs.get(index).cloned().ok_or_else(|| {
            PipelineError::generation(
                &self.name,
                format!("no more scripted outputs (called {} times)", index + 1),
            )
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
