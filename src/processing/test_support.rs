//! Deterministic stand-ins for the embedding model, shared by unit and
//! integration tests

use crate::error::{Result, RankerError};
use crate::processing::embeddings::Embedder;
use crate::processing::model_provider::ModelLoader;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Signed feature hashing of lowercase words
pub struct HashingEmbedder {
    dimensions: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self { dimensions: 1024 }
    }
}

impl Embedder for HashingEmbedder {
    fn model_name(&self) -> &str {
        "hashing-test-embedder"
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0; self.dimensions];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let hash = hasher.finish();
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[(hash % self.dimensions as u64) as usize] += sign;
        }
        Ok(vector)
    }
}

pub struct CountingLoader {
    delay: Duration,
    loads: Arc<AtomicUsize>,
}

impl CountingLoader {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn loads(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.loads)
    }
}

#[async_trait]
impl ModelLoader for CountingLoader {
    fn describe(&self) -> String {
        "counting-loader".to_string()
    }

    async fn load(&self) -> Result<Arc<dyn Embedder>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(Arc::new(HashingEmbedder::default()))
    }
}

#[derive(Default)]
pub struct FailingLoader {
    attempts: Arc<AtomicUsize>,
}

impl FailingLoader {
    pub fn attempts(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }
}

#[async_trait]
impl ModelLoader for FailingLoader {
    fn describe(&self) -> String {
        "failing-loader".to_string()
    }

    async fn load(&self) -> Result<Arc<dyn Embedder>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(RankerError::Network("hub unreachable".to_string()))
    }
}
