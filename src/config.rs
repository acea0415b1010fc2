// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const HUGGINGFACE_API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";
pub const NCBI_API_KEY_VAR: &str = "NCBI_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub generation: GenerationConfig,
    pub pubmed: PubMedConfig,
    pub fetch: FetchConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub keyword_model: String,
    pub answer_model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub keyword_max_new_tokens: u32,
    pub answer_max_new_tokens: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PubMedConfig {
    pub base_url: String,
    pub tool: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub max_results_per_query: usize,
    pub skip_blank_queries: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Loads built-in defaults, then the TOML file, then `PUBMED_RAG__*`
    /// overrides, then the API keys from the process environment.
    ///
    /// Fails when `HUGGINGFACE_API_KEY` is not set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let config = Self::from_sources(path)?;
        config.with_credentials(
            std::env::var(HUGGINGFACE_API_KEY_VAR).ok(),
            std::env::var(NCBI_API_KEY_VAR).ok(),
        )
    }

    /// Layers the file and environment overrides on top of the defaults
    /// without touching credentials.
    pub fn from_sources(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder
                .add_source(config::File::from(Path::new("config/default.toml")).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix("PUBMED_RAG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn with_credentials(
        mut self,
        huggingface_api_key: Option<String>,
        ncbi_api_key: Option<String>,
    ) -> Result<Self> {
        if let Some(key) = huggingface_api_key.filter(|k| !k.trim().is_empty()) {
            self.generation.api_key = Some(key);
        }
        if let Some(key) = ncbi_api_key.filter(|k| !k.trim().is_empty()) {
            self.pubmed.api_key = Some(key);
        }

        if self.generation.api_key.is_none() {
            return Err(PipelineError::Config(format!(
                "{} must be set in the environment or .env file",
                HUGGINGFACE_API_KEY_VAR
            )));
        }

        Ok(self)
    }

    pub fn default_config() -> Self {
        Self {
            generation: GenerationConfig {
                base_url: "https://api-inference.huggingface.co/models".to_string(),
                keyword_model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
                answer_model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
                api_key: None,
                keyword_max_new_tokens: 100,
                answer_max_new_tokens: 1000,
                request_timeout_secs: 120,
            },
            pubmed: PubMedConfig {
                base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
                tool: "pubmed_rag".to_string(),
                email: "pubmed_rag@example.com".to_string(),
                api_key: None,
                request_timeout_secs: 30,
            },
            fetch: FetchConfig {
                max_results_per_query: 1,
                skip_blank_queries: true,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8501,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.generation.base_url)?;
        Validator::validate_url(&self.pubmed.base_url)?;
        Validator::validate_port(self.server.port)?;

        if self.fetch.max_results_per_query == 0 {
            return Err(PipelineError::Config(
                "max_results_per_query must be greater than 0".to_string(),
            ));
        }

        if self.generation.answer_max_new_tokens == 0 || self.generation.keyword_max_new_tokens == 0
        {
            return Err(PipelineError::Config(
                "max_new_tokens must be greater than 0".to_string(),
            ));
        }

        if self.generation.keyword_model.trim().is_empty()
            || self.generation.answer_model.trim().is_empty()
        {
            return Err(PipelineError::Config(
                "generation model names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.generation.answer_max_new_tokens, 1000);
        assert_eq!(config.fetch.max_results_per_query, 1);
    }

    #[test]
    fn test_missing_huggingface_key_fails() {
        let result = Config::default_config().with_credentials(None, None);
        assert!(matches!(result, Err(PipelineError::Config(_))));

        let result = Config::default_config().with_credentials(Some("   ".to_string()), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_applied() {
        let config = Config::default_config()
            .with_credentials(Some("hf_abc".to_string()), Some("ncbi_xyz".to_string()))
            .unwrap();

        assert_eq!(config.generation.api_key.as_deref(), Some("hf_abc"));
        assert_eq!(config.pubmed.api_key.as_deref(), Some("ncbi_xyz"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(
            &path,
            "[server]\nport = 9000\n\n[fetch]\nskip_blank_queries = false\n",
        )
        .unwrap();

        let config = Config::from_sources(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(!config.fetch.skip_blank_queries);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.fetch.max_results_per_query, 1);
    }

    #[test]
    fn test_invalid_file_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "[fetch]\nmax_results_per_query = 0\n").unwrap();

        assert!(Config::from_sources(Some(&path)).is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = Config::default_config()
            .with_credentials(Some("hf_secret".to_string()), None)
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hf_secret"));
    }
}
