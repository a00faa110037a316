//! Embeddings generation using Model2Vec

use crate::error::{Result, RankerError};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Maps text to a dense vector. Implementations are shared read-only across
/// concurrent scoring calls.
pub trait Embedder: Send + Sync {
    fn model_name(&self) -> &str;

    fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

pub struct EmbeddingEngine {
    model: StaticModel,
    model_name: String,
}

impl EmbeddingEngine {
    /// Blocking: reads and materializes the model weights
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();

        log::info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| RankerError::ModelLoading(format!("Failed to load model '{}': {}", model_name, e)))?;

        log::info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }
}

impl Embedder for EmbeddingEngine {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(RankerError::Embedding(format!(
                "Model '{}' produced an empty embedding",
                self.model_name
            )));
        }
        Ok(embedding)
    }
}

/// Cosine similarity in [-1, 1]; a zero vector has similarity 0.0 with anything
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RankerError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
