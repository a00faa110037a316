//! Report produced for one ranked resume

use crate::processing::ranker::ScoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    pub filename: String,
    pub semantic_score: f32,
    pub keyword_overlap_score: f32,
    pub matched_keywords: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub embedding_model: String,
    pub top_n_keywords: usize,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl RankReport {
    pub fn new(filename: impl Into<String>, scores: ScoreResult, metadata: ReportMetadata) -> Self {
        Self {
            filename: filename.into(),
            semantic_score: scores.semantic_score,
            keyword_overlap_score: scores.keyword_overlap_score,
            matched_keywords: scores.matched_keywords,
            metadata,
        }
    }
}
