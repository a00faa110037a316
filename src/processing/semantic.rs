//! Semantic similarity between two texts via their embeddings

use crate::error::Result;
use crate::processing::embeddings::cosine_similarity;
use crate::processing::model_provider::ModelProvider;
use std::sync::Arc;

pub struct SemanticScorer {
    provider: Arc<ModelProvider>,
}

impl SemanticScorer {
    pub fn new(provider: Arc<ModelProvider>) -> Self {
        Self { provider }
    }

    /// Cosine similarity of the raw texts' embeddings, rescaled to [0, 1].
    ///
    /// Returns 0.0 for an empty text without touching the model.
    pub async fn semantic_similarity(&self, description: &str, document: &str) -> Result<f32> {
        if description.is_empty() || document.is_empty() {
            return Ok(0.0);
        }

        let model = self.provider.get_model().await?;

        let description_embedding = model.encode(description)?;
        let document_embedding = model.encode(document)?;

        let similarity = cosine_similarity(&description_embedding, &document_embedding)?;
        Ok(rescale(similarity))
    }
}

/// Map a cosine in [-1, 1] linearly onto [0, 1]
pub fn rescale(cosine: f32) -> f32 {
    ((cosine + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::test_support::CountingLoader;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    const DESCRIPTIONS: [&str; 4] = [
        "Looking for a Python developer with Flask and REST API experience",
        "Seeking a chef with culinary arts background",
        "Rust, C++ and embedded Linux; must enjoy debugging",
        "!!!",
    ];

    fn scorer() -> (SemanticScorer, Arc<std::sync::atomic::AtomicUsize>) {
        let loader = CountingLoader::with_delay(Duration::ZERO);
        let loads = loader.loads();
        (SemanticScorer::new(Arc::new(ModelProvider::new(loader))), loads)
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale(-1.0), 0.0);
        assert_eq!(rescale(0.0), 0.5);
        assert_eq!(rescale(1.0), 1.0);
        assert_eq!(rescale(1.000_001), 1.0);
    }

    #[tokio::test]
    async fn test_empty_text_skips_model() {
        let (scorer, loads) = scorer();

        assert_eq!(scorer.semantic_similarity("", "Python").await.unwrap(), 0.0);
        assert_eq!(scorer.semantic_similarity("Python", "").await.unwrap(), 0.0);
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scores_stay_in_unit_range() {
        let (scorer, _) = scorer();

        for a in DESCRIPTIONS {
            for b in DESCRIPTIONS {
                let score = scorer.semantic_similarity(a, b).await.unwrap();
                assert!((0.0..=1.0).contains(&score), "{} out of range", score);
            }
        }
    }

    #[tokio::test]
    async fn test_self_similarity_and_symmetry() {
        let (scorer, loads) = scorer();

        for a in &DESCRIPTIONS[..3] {
            let same = scorer.semantic_similarity(a, a).await.unwrap();
            assert!((same - 1.0).abs() < 1e-5);
        }

        let ab = scorer.semantic_similarity(DESCRIPTIONS[0], DESCRIPTIONS[2]).await.unwrap();
        let ba = scorer.semantic_similarity(DESCRIPTIONS[2], DESCRIPTIONS[0]).await.unwrap();
        assert_eq!(ab, ba);

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_related_texts_score_higher_than_unrelated() {
        let (scorer, _) = scorer();

        let related = scorer
            .semantic_similarity(
                "Looking for a Python developer with Flask and REST API experience",
                "Experienced Python engineer skilled in Flask, REST APIs, and PostgreSQL",
            )
            .await
            .unwrap();
        let unrelated = scorer
            .semantic_similarity(
                "Seeking a chef with culinary arts background",
                "Senior software engineer, 10 years backend systems",
            )
            .await
            .unwrap();

        assert!(related > 0.5);
        assert!(related - unrelated > 0.05, "{} vs {}", related, unrelated);
    }
}
