// file: src/pipeline/orchestrator.rs
// description: wires keyword generation, literature fetch and answer generation
// reference: fixed linear graph, each step awaits the previous one

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::generation::{GenerationOptions, HuggingFaceClient, TextGenerator};
use crate::models::{AskReport, AskStats, QueryBatch};
use crate::pipeline::fetcher::{FetchRun, QueryFetcher};
use crate::pipeline::progress::ProgressTracker;
use crate::prompts::{AnswerPrompt, KeywordPrompt};
use crate::search::{LiteratureSearch, PubMedClient};
use crate::utils::telemetry::{HealthCheck, HealthReport, OperationTimer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskStage {
    KeywordPrompt,
    KeywordGeneration,
    Fetch,
    AnswerPrompt,
    AnswerGeneration,
}

impl AskStage {
    pub const ALL: [AskStage; 5] = [
        AskStage::KeywordPrompt,
        AskStage::KeywordGeneration,
        AskStage::Fetch,
        AskStage::AnswerPrompt,
        AskStage::AnswerGeneration,
    ];

    pub fn index(&self) -> usize {
        match self {
            AskStage::KeywordPrompt => 0,
            AskStage::KeywordGeneration => 1,
            AskStage::Fetch => 2,
            AskStage::AnswerPrompt => 3,
            AskStage::AnswerGeneration => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AskStage::KeywordPrompt => "Building keyword prompt",
            AskStage::KeywordGeneration => "Generating search keywords",
            AskStage::Fetch => "Fetching PubMed abstracts",
            AskStage::AnswerPrompt => "Building answer prompt",
            AskStage::AnswerGeneration => "Generating answer",
        }
    }
}

pub struct AskPipeline {
    keyword_llm: Arc<dyn TextGenerator>,
    llm: Arc<dyn TextGenerator>,
    search: Arc<dyn LiteratureSearch>,
    fetcher: QueryFetcher,
    keyword_options: GenerationOptions,
    answer_options: GenerationOptions,
}

impl AskPipeline {
    pub fn new(
        keyword_llm: Arc<dyn TextGenerator>,
        llm: Arc<dyn TextGenerator>,
        search: Arc<dyn LiteratureSearch>,
        config: &Config,
    ) -> Self {
        Self {
            keyword_llm,
            llm,
            fetcher: QueryFetcher::new(search.clone(), config.fetch.clone()),
            search,
            keyword_options: GenerationOptions::with_max_new_tokens(
                config.generation.keyword_max_new_tokens,
            ),
            answer_options: GenerationOptions::with_max_new_tokens(
                config.generation.answer_max_new_tokens,
            ),
        }
    }

    /// Builds both Hugging Face clients and the PubMed client once; they are
    /// shared read-only by every request afterwards.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.generation.api_key.clone().ok_or_else(|| {
            PipelineError::Config("Hugging Face API key is not configured".to_string())
        })?;
        let timeout = Duration::from_secs(config.generation.request_timeout_secs);

        let keyword_llm = HuggingFaceClient::new(
            "keyword_llm",
            &config.generation.base_url,
            &config.generation.keyword_model,
            api_key.clone(),
            timeout,
        )?;
        let llm = HuggingFaceClient::new(
            "llm",
            &config.generation.base_url,
            &config.generation.answer_model,
            api_key,
            timeout,
        )?;
        let search = PubMedClient::new(config.pubmed.clone())?;

        info!(
            "Pipeline ready (keyword model: {}, answer model: {})",
            config.generation.keyword_model, config.generation.answer_model
        );

        Ok(Self::new(
            Arc::new(keyword_llm),
            Arc::new(llm),
            Arc::new(search),
            config,
        ))
    }

    pub async fn ask(&self, question: &str) -> Result<String> {
        Ok(self.ask_detailed(question).await?.answer)
    }

    pub async fn ask_detailed(&self, question: &str) -> Result<AskReport> {
        self.ask_with_progress(question, None).await
    }

    pub async fn ask_with_progress(
        &self,
        question: &str,
        progress: Option<&ProgressTracker>,
    ) -> Result<AskReport> {
        let request_id = Uuid::new_v4();
        let span = info_span!("ask", %request_id);
        self.run(request_id, question, progress)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        request_id: Uuid,
        question: &str,
        progress: Option<&ProgressTracker>,
    ) -> Result<AskReport> {
        let started = Instant::now();
        let mark = |stage: AskStage| {
            debug!("{}", stage.label());
            if let Some(tracker) = progress {
                tracker.stage(stage);
            }
        };

        info!("Question: {:?}", question);

        mark(AskStage::KeywordPrompt);
        let keyword_prompt = KeywordPrompt::new(question).render();

        mark(AskStage::KeywordGeneration);
        let query_batch = self.generate_keywords(&keyword_prompt).await?;
        info!("Keywords: {:?}", query_batch.as_str());

        mark(AskStage::Fetch);
        let FetchRun {
            outcome,
            search_calls,
        } = self.fetcher.run(std::slice::from_ref(&query_batch)).await;
        let fetch_status = outcome.status();
        if fetch_status.is_degraded() {
            warn!(
                "Answering from a partial article set ({} document(s))",
                outcome.documents().len()
            );
        }
        let documents = outcome.into_documents();

        mark(AskStage::AnswerPrompt);
        let answer_prompt = AnswerPrompt::new(question, &documents).render();

        mark(AskStage::AnswerGeneration);
        let answer = self
            .llm
            .generate(&answer_prompt, &self.answer_options)
            .await?
            .into_first_reply(self.llm.name())?;

        if let Some(tracker) = progress {
            tracker.finish();
        }

        let stats = AskStats {
            search_calls,
            documents_fetched: documents.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            "Answered in {}ms using {} document(s) from {} search call(s)",
            stats.duration_ms, stats.documents_fetched, stats.search_calls
        );

        Ok(AskReport {
            request_id,
            question: question.to_string(),
            query_batch,
            documents,
            fetch_status,
            answer,
            stats,
        })
    }

    async fn generate_keywords(&self, keyword_prompt: &str) -> Result<QueryBatch> {
        let reply = self
            .keyword_llm
            .generate(keyword_prompt, &self.keyword_options)
            .await?
            .into_first_reply(self.keyword_llm.name())?;
        Ok(QueryBatch::new(reply))
    }

    /// Runs only the keyword half of the pipeline.
    pub async fn keywords(&self, question: &str) -> Result<QueryBatch> {
        self.generate_keywords(&KeywordPrompt::new(question).render())
            .await
    }

    /// Runs only the fetch step over an explicit batch.
    pub async fn fetch(&self, batch: &QueryBatch) -> FetchRun {
        self.fetcher.run_batch(batch).await
    }

    /// Probes each external collaborator once with a minimal request.
    pub async fn health(&self, probe_generation: bool) -> HealthReport {
        let mut checks = Vec::new();

        let timer = OperationTimer::new("search probe");
        match self.search.query("pneumonia", 1).await {
            Ok(_) => checks.push(HealthCheck::healthy(self.search.name(), timer.finish())),
            Err(e) => checks.push(HealthCheck::unhealthy(
                self.search.name(),
                e.to_string(),
                timer.finish(),
            )),
        }

        if probe_generation {
            let probe_options = GenerationOptions::with_max_new_tokens(1);
            for generator in [&self.keyword_llm, &self.llm] {
                let timer = OperationTimer::new("generation probe");
                match generator.generate("ping", &probe_options).await {
                    Ok(output) if !output.replies.is_empty() => {
                        checks.push(HealthCheck::healthy(generator.name(), timer.finish()))
                    }
                    Ok(_) => checks.push(HealthCheck::degraded(
                        generator.name(),
                        "endpoint returned no replies".to_string(),
                        timer.finish(),
                    )),
                    Err(e) => checks.push(HealthCheck::unhealthy(
                        generator.name(),
                        e.to_string(),
                        timer.finish(),
                    )),
                }
            }
        }

        HealthReport::new(checks, env!("CARGO_PKG_VERSION").to_string())
    }
}
