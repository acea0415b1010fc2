// file: src/search/pubmed.rs
// description: NCBI E-utilities client (esearch for ids, efetch for records)
// reference: https://www.ncbi.nlm.nih.gov/books/NBK25499/

use crate::config::PubMedConfig;
use crate::error::{PipelineError, Result};
use crate::models::Article;
use crate::parser::PubMedXmlParser;
use crate::utils::validation::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::LiteratureSearch;

#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

#[derive(Debug, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: PubMedConfig,
}

impl PubMedClient {
    pub fn new(config: PubMedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: Validator::trim_base_url(&config.base_url),
            config,
        })
    }

    fn common_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("tool", self.config.tool.clone()),
            ("email", self.config.email.clone()),
        ];
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    fn endpoint(&self, utility: &str) -> String {
        format!("{}/{}", self.base_url, utility)
    }

    pub async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let mut params = self.common_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", max_results.to_string()));
        params.push(("retmode", "json".to_string()));

        debug!("esearch term={:?} retmax={}", query, max_results);

        let response = self
            .client
            .get(self.endpoint("esearch.fcgi"))
            .query(&params)
            .send()
            .await
            .map_err(|e| PipelineError::search(query, format!("esearch request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::search(
                query,
                format!("esearch failed with status {}: {}", status, error_text),
            ));
        }

        let body: EsearchResponse = response.json().await.map_err(|e| {
            PipelineError::search(query, format!("Failed to parse esearch response: {}", e))
        })?;

        if let Some(error) = body.esearchresult.error {
            return Err(PipelineError::search(query, error));
        }

        let mut ids = body.esearchresult.idlist;
        ids.truncate(max_results);
        Ok(ids)
    }

    pub async fn fetch_articles(&self, ids: &[String]) -> Result<Vec<Article>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let mut params = self.common_params();
        params.push(("id", joined.clone()));
        params.push(("retmode", "xml".to_string()));

        let response = self
            .client
            .get(self.endpoint("efetch.fcgi"))
            .query(&params)
            .send()
            .await
            .map_err(|e| PipelineError::search(&joined, format!("efetch request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::search(
                &joined,
                format!("efetch failed with status {}: {}", status, error_text),
            ));
        }

        let xml = response.text().await?;
        PubMedXmlParser::parse_articles(&xml)
    }
}

#[async_trait]
impl LiteratureSearch for PubMedClient {
    async fn query(&self, query: &str, max_results: usize) -> Result<Vec<Article>> {
        let ids = self.search_ids(query, max_results).await?;
        if ids.is_empty() {
            info!("No PubMed results for {:?}", query);
            return Ok(Vec::new());
        }

        let articles = self.fetch_articles(&ids).await?;
        info!(
            "PubMed returned {} article(s) for {:?}",
            articles.len(),
            query
        );
        Ok(articles)
    }

    fn name(&self) -> &str {
        "pubmed"
    }
}
