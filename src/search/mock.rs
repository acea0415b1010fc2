// file: src/search/mock.rs
// description: scripted literature search for tests and offline runs

use crate::error::{PipelineError, Result};
use crate::models::Article;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::LiteratureSearch;

/// Answers every query with one synthetic article unless a response was
/// registered for it. Can be told to fail on the k-th call (1-based).
pub struct ScriptedSearch {
    responses: HashMap<String, Vec<Article>>,
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedSearch {
    pub fn echo() -> Self {
        Self {
            responses: HashMap::new(),
            fail_on_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, query: &str, articles: Vec<Article>) -> Self {
        self.responses.insert(query.to_string(), articles);
        self
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// Every `(query, max_results)` pair received so far, in order.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn article_for(query: &str) -> Article {
        Article {
            pubmed_id: None,
            title: Some(format!("Study of {}", query)),
            abstract_text: Some(format!("Abstract about {}.", query)),
            keywords: vec![query.to_string()],
        }
    }
}

#[async_trait]
impl LiteratureSearch for ScriptedSearch {
    async fn query(&self, query: &str, max_results: usize) -> Result<Vec<Article>> {
        let call = {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            calls.push((query.to_string(), max_results));
            calls.len()
        };

        if self.fail_on_call == Some(call) {
            return Err(PipelineError::search(query, "scripted failure"));
        }

        let articles = match self.responses.get(query) {
            Some(articles) => articles.clone(),
            None => vec![Self::article_for(query)],
        };

        Ok(articles.into_iter().take(max_results).collect())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_records_calls() {
        let search = ScriptedSearch::echo();
        let articles = search.query("Neoplasms", 1).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Study of Neoplasms"));
        assert_eq!(search.calls(), vec![("Neoplasms".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_failing_call() {
        let search = ScriptedSearch::echo().failing_on(2);

        assert!(search.query("a", 1).await.is_ok());
        assert!(search.query("b", 1).await.is_err());
        assert!(search.query("c", 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_registered_response_is_capped() {
        let search = ScriptedSearch::echo().with_response(
            "HIV",
            vec![Article::new("one", "", &[]), Article::new("two", "", &[])],
        );

        assert_eq!(search.query("HIV", 1).await.unwrap().len(), 1);
        assert!(
            ScriptedSearch::echo()
                .with_response("none", vec![])
                .query("none", 1)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
