//! Lazily loaded, process-wide embedding model handle
//!
//! The composition root owns one [`ModelProvider`] and hands it to every
//! scorer. The first `get_model` (or an explicit `preload`) runs the loader;
//! concurrent callers arriving meanwhile wait for that same load instead of
//! starting their own. Once loaded the model is shared read-only forever.

use crate::config::Config;
use crate::error::{Result, RankerError};
use crate::processing::embeddings::{Embedder, EmbeddingEngine};
use crate::processing::model_store::ModelStore;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// Produces the embedding model. Called at most once per successful load.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Name used in log lines before the model exists
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Arc<dyn Embedder>>;
}

/// Loads a Model2Vec model through the [`ModelStore`], downloading on first use
pub struct Model2VecLoader {
    store: ModelStore,
    reference: String,
}

impl Model2VecLoader {
    pub fn new(store: ModelStore, reference: impl Into<String>) -> Self {
        Self {
            store,
            reference: reference.into(),
        }
    }
}

#[async_trait]
impl ModelLoader for Model2VecLoader {
    fn describe(&self) -> String {
        self.reference.clone()
    }

    async fn load(&self) -> Result<Arc<dyn Embedder>> {
        let (model_path, model_name) = self.store.ensure_model_available(&self.reference).await?;

        let engine = tokio::task::spawn_blocking(move || EmbeddingEngine::load(&model_path, &model_name))
            .await
            .map_err(|e| RankerError::ModelLoading(format!("Model loading task failed: {}", e)))??;

        Ok(Arc::new(engine))
    }
}

pub struct ModelProvider {
    loader: Box<dyn ModelLoader>,
    model: OnceCell<Arc<dyn Embedder>>,
}

impl ModelProvider {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            model: OnceCell::new(),
        }
    }

    /// Provider for the model named in the configuration
    pub fn from_config(config: &Config) -> Self {
        let store = ModelStore::new(config.models_dir().clone());
        Self::new(Model2VecLoader::new(store, config.models.embedding_model.clone()))
    }

    /// The shared model, loading it on first use.
    ///
    /// A failed load is not cached; the next caller starts a fresh attempt.
    pub async fn get_model(&self) -> Result<Arc<dyn Embedder>> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let start_time = Instant::now();
                info!("Loading embedding model {}", self.loader.describe());

                let model = self.loader.load().await.map_err(|e| match e {
                    RankerError::ModelLoading(_) => e,
                    other => RankerError::ModelLoading(other.to_string()),
                })?;

                info!(
                    "Embedding model {} ready in {:.2?}",
                    model.model_name(),
                    start_time.elapsed()
                );
                Ok::<_, RankerError>(model)
            })
            .await?;

        Ok(Arc::clone(model))
    }

    /// Pay the load cost up front, before any scoring request
    pub async fn preload(&self) -> Result<()> {
        self.get_model().await.map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    pub fn model_name(&self) -> Option<String> {
        self.model.get().map(|model| model.model_name().to_string())
    }
}
