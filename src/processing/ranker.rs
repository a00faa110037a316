//! Score aggregation: keyword overlap plus semantic similarity

use crate::config::Config;
use crate::error::Result;
use crate::processing::keywords::KeywordMatcher;
use crate::processing::model_provider::ModelProvider;
use crate::processing::semantic::SemanticScorer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub semantic_score: f32,
    pub keyword_overlap_score: f32,
    pub matched_keywords: Vec<String>,
}

/// Scores a resume against a job description.
///
/// Holds no per-request state, so one instance can serve concurrent calls.
pub struct ResumeRanker {
    keywords: KeywordMatcher,
    semantic: SemanticScorer,
    provider: Arc<ModelProvider>,
}

impl ResumeRanker {
    pub fn new(provider: Arc<ModelProvider>, top_n_keywords: usize) -> Self {
        Self {
            keywords: KeywordMatcher::new(top_n_keywords),
            semantic: SemanticScorer::new(Arc::clone(&provider)),
            provider,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = Arc::new(ModelProvider::from_config(config));
        Self::new(provider, config.scoring.top_n_keywords)
    }

    /// Load the embedding model now rather than on the first request
    pub async fn preload_model(&self) -> Result<()> {
        self.provider.preload().await
    }

    pub fn provider(&self) -> &Arc<ModelProvider> {
        &self.provider
    }

    /// Semantic errors propagate; keyword scoring cannot fail
    pub async fn calculate_scores(&self, description: &str, document: &str) -> Result<ScoreResult> {
        let semantic_score = self.semantic.semantic_similarity(description, document).await?;
        let keyword_result = self.keywords.keyword_overlap(description, document);

        debug!(
            "semantic={:.3} keywords={:.3} matched={}/{}",
            semantic_score,
            keyword_result.score,
            keyword_result.matched.len(),
            self.keywords.top_n()
        );

        Ok(ScoreResult {
            semantic_score,
            keyword_overlap_score: keyword_result.score,
            matched_keywords: keyword_result.matched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankerError;
    use crate::processing::test_support::{CountingLoader, FailingLoader};
    use std::time::Duration;

    fn ranker() -> ResumeRanker {
        let provider = ModelProvider::new(CountingLoader::with_delay(Duration::ZERO));
        ResumeRanker::new(Arc::new(provider), 30)
    }

    #[tokio::test]
    async fn test_scores_are_merged() {
        let ranker = ranker();

        let result = ranker
            .calculate_scores(
                "Looking for a Python developer with Flask and REST API experience",
                "Experienced Python engineer skilled in Flask, REST APIs, and PostgreSQL",
            )
            .await
            .unwrap();

        assert_eq!(result.matched_keywords, vec!["flask", "python", "rest"]);
        assert!((result.keyword_overlap_score - 3.0 / 7.0).abs() < 1e-6);
        assert!(result.semantic_score > 0.5 && result.semantic_score <= 1.0);
    }

    #[tokio::test]
    async fn test_empty_document_scores_zero() {
        let ranker = ranker();

        let result = ranker.calculate_scores("Rust developer", "").await.unwrap();

        assert_eq!(
            result,
            ScoreResult {
                semantic_score: 0.0,
                keyword_overlap_score: 0.0,
                matched_keywords: Vec::new(),
            }
        );
        assert!(!ranker.provider().is_loaded());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let ranker = ResumeRanker::new(Arc::new(ModelProvider::new(FailingLoader::default())), 30);

        let result = ranker.calculate_scores("Rust developer", "Rust engineer").await;

        assert!(matches!(result, Err(RankerError::ModelLoading(_))));
    }

    #[test]
    fn test_score_result_field_names() {
        let result = ScoreResult {
            semantic_score: 0.75,
            keyword_overlap_score: 0.5,
            matched_keywords: vec!["rust".to_string()],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["semantic_score"], 0.75);
        assert_eq!(json["keyword_overlap_score"], 0.5);
        assert_eq!(json["matched_keywords"][0], "rust");
    }
}
