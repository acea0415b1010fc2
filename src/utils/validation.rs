// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(PipelineError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    /// Questions are not validated for content; this only caps pathological
    /// form submissions before they reach the generation endpoint.
    pub fn validate_question_length(question: &str, max_chars: usize) -> Result<()> {
        let count = question.chars().count();
        if count > max_chars {
            return Err(PipelineError::Validation(format!(
                "Question too long ({} characters, max {})",
                count, max_chars
            )));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }

    pub fn trim_base_url(url: &str) -> String {
        url.trim().trim_end_matches('/').to_string()
    }
}
