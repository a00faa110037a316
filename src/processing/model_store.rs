//! Local store for Model2Vec embedding models: catalogue lookup, download
//! from the Hugging Face Hub, and resolution to an on-disk directory

use crate::error::{Result, RankerError};
use hf_hub::api::tokio::Api;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Files `StaticModel::from_pretrained` needs in a local model directory
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

/// Information about a known embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub id: String,
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub dimensions: u32,
    pub description: String,
}

/// Where a model reference points to
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    /// An existing directory given directly by the user
    Local(PathBuf),
    /// A Hub repository, stored under `<models_dir>/<id>`
    Hub { id: String, repo_id: String },
}

pub struct ModelStore {
    models_dir: PathBuf,
    catalogue: HashMap<String, EmbeddingModelInfo>,
}

impl ModelStore {
    pub fn new(models_dir: PathBuf) -> Self {
        let mut store = Self {
            models_dir,
            catalogue: HashMap::new(),
        };
        store.init_catalogue();
        store
    }

    fn init_catalogue(&mut self) {
        let known = [
            EmbeddingModelInfo {
                id: "potion-base-8M".to_string(),
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 30,
                dimensions: 256,
                description: "Small, fast static embeddings; the default".to_string(),
            },
            EmbeddingModelInfo {
                id: "potion-base-32M".to_string(),
                name: "Potion Base 32M".to_string(),
                repo_id: "minishlab/potion-base-32M".to_string(),
                size_mb: 130,
                dimensions: 512,
                description: "Larger static embeddings with better semantic recall".to_string(),
            },
            EmbeddingModelInfo {
                id: "m2v-base".to_string(),
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                dimensions: 256,
                description: "Legacy Model2Vec base embeddings".to_string(),
            },
        ];

        for info in known {
            self.catalogue.insert(info.id.clone(), info);
        }
    }

    /// Catalogue entries sorted by id
    pub fn list_available_models(&self) -> Vec<&EmbeddingModelInfo> {
        let mut models: Vec<_> = self.catalogue.values().collect();
        models.sort_by(|a, b| a.id.cmp(&b.id));
        models
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.catalogue.get(model_id)
    }

    /// Resolve a catalogue id, repo id or display name (case-insensitive)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.catalogue.contains_key(input) {
            return Some(input.to_string());
        }

        if let Some(info) = self.catalogue.values().find(|info| info.repo_id == input) {
            return Some(info.id.clone());
        }

        let input_lower = input.to_lowercase();
        self.catalogue
            .values()
            .find(|info| info.name.to_lowercase() == input_lower)
            .map(|info| info.id.clone())
    }

    /// Classify a model reference without touching the network
    pub fn resolve(&self, reference: &str) -> Result<ModelSource> {
        let as_path = Path::new(reference);
        if as_path.is_dir() {
            return Ok(ModelSource::Local(as_path.to_path_buf()));
        }

        if let Some(id) = self.resolve_model_id(reference) {
            let repo_id = self.catalogue[&id].repo_id.clone();
            return Ok(ModelSource::Hub { id, repo_id });
        }

        // Any other "owner/name" is treated as a Hub repository
        if let Some((owner, name)) = reference.split_once('/') {
            if !owner.is_empty() && !name.is_empty() && !name.contains('/') {
                return Ok(ModelSource::Hub {
                    id: format!("{}--{}", owner, name),
                    repo_id: reference.to_string(),
                });
            }
        }

        Err(RankerError::ModelNotFound(reference.to_string()))
    }

    pub fn model_dir(&self, model_id: &str) -> PathBuf {
        self.models_dir.join(model_id)
    }

    pub async fn is_model_downloaded(&self, model_id: &str) -> bool {
        has_required_files(&self.model_dir(model_id)).await
    }

    /// Download the model's files from the Hub into `<models_dir>/<id>`
    pub async fn download_model(&self, model_id: &str, repo_id: &str, force: bool) -> Result<PathBuf> {
        let model_dir = self.model_dir(model_id);

        if !force && has_required_files(&model_dir).await {
            debug!("Model {} already present at {}", model_id, model_dir.display());
            return Ok(model_dir);
        }

        info!("Downloading embedding model {} from {}", model_id, repo_id);

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            RankerError::ModelLoading(format!("Failed to create model directory: {}", e))
        })?;

        let api = Api::new()
            .map_err(|e| RankerError::Network(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(repo_id.to_string());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));

        for file in REQUIRED_FILES.iter().chain(OPTIONAL_FILES.iter()) {
            spinner.set_message(format!("{}: {}", repo_id, file));

            match repo.get(file).await {
                Ok(cached_path) => {
                    fs::copy(&cached_path, model_dir.join(file)).await.map_err(|e| {
                        RankerError::ModelLoading(format!("Failed to copy {}: {}", file, e))
                    })?;
                    debug!("Downloaded {}", file);
                }
                Err(e) if OPTIONAL_FILES.contains(file) => {
                    debug!("Optional file {} not available: {}", file, e);
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(RankerError::Network(format!(
                        "Failed to download required file {} from {}: {}",
                        file, repo_id, e
                    )));
                }
            }
        }

        spinner.finish_and_clear();
        info!("Embedding model {} stored at {}", model_id, model_dir.display());
        Ok(model_dir)
    }

    /// Local directory and display name for a model reference, downloading it if needed
    pub async fn ensure_model_available(&self, reference: &str) -> Result<(PathBuf, String)> {
        match self.resolve(reference)? {
            ModelSource::Local(path) => {
                if !has_required_files(&path).await {
                    return Err(RankerError::ModelLoading(format!(
                        "Local model directory {} is missing one of: {}",
                        path.display(),
                        REQUIRED_FILES.join(", ")
                    )));
                }
                Ok((path, reference.to_string()))
            }
            ModelSource::Hub { id, repo_id } => {
                let path = self.download_model(&id, &repo_id, false).await?;
                Ok((path, repo_id))
            }
        }
    }

    /// Delete a downloaded model. Returns false if it was not present.
    pub async fn remove_model(&self, model_id: &str) -> Result<bool> {
        let model_dir = self.model_dir(model_id);
        if fs::metadata(&model_dir).await.is_err() {
            return Ok(false);
        }
        fs::remove_dir_all(&model_dir).await?;
        Ok(true)
    }
}

async fn has_required_files(dir: &Path) -> bool {
    for file in REQUIRED_FILES {
        if fs::metadata(dir.join(file)).await.is_err() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_model_files(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(dir.join(file), b"{}").unwrap();
        }
    }

    #[test]
    fn test_resolve_model_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModelStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.resolve_model_id("potion-base-8M"), Some("potion-base-8M".to_string()));
        assert_eq!(
            store.resolve_model_id("minishlab/potion-base-8M"),
            Some("potion-base-8M".to_string())
        );
        assert_eq!(store.resolve_model_id("potion base 8m"), Some("potion-base-8M".to_string()));
        assert_eq!(store.resolve_model_id("no-such-model"), None);
    }

    #[test]
    fn test_resolve_sources() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModelStore::new(temp_dir.path().join("models"));

        assert_eq!(
            store.resolve("potion-base-8M").unwrap(),
            ModelSource::Hub {
                id: "potion-base-8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
            }
        );
        assert_eq!(
            store.resolve("someone/custom-m2v").unwrap(),
            ModelSource::Hub {
                id: "someone--custom-m2v".to_string(),
                repo_id: "someone/custom-m2v".to_string(),
            }
        );

        let local = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(
            store.resolve(&local).unwrap(),
            ModelSource::Local(temp_dir.path().to_path_buf())
        );

        assert!(matches!(store.resolve("unknown"), Err(RankerError::ModelNotFound(_))));
    }

    #[test]
    fn test_catalogue_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModelStore::new(temp_dir.path().to_path_buf());

        let ids: Vec<_> = store.list_available_models().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["m2v-base", "potion-base-32M", "potion-base-8M"]);
    }

    #[tokio::test]
    async fn test_downloaded_model_detection() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModelStore::new(temp_dir.path().to_path_buf());

        assert!(!store.is_model_downloaded("potion-base-8M").await);

        write_model_files(&store.model_dir("potion-base-8M"));
        assert!(store.is_model_downloaded("potion-base-8M").await);

        // Present models resolve without any network access
        let (path, name) = store.ensure_model_available("potion-base-8M").await.unwrap();
        assert_eq!(path, store.model_dir("potion-base-8M"));
        assert_eq!(name, "minishlab/potion-base-8M");
    }

    #[tokio::test]
    async fn test_incomplete_local_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModelStore::new(temp_dir.path().join("models"));
        let local = temp_dir.path().join("my-model");
        std::fs::create_dir_all(&local).unwrap();
        std::fs::write(local.join("tokenizer.json"), b"{}").unwrap();

        let result = store.ensure_model_available(&local.to_string_lossy()).await;
        assert!(matches!(result, Err(RankerError::ModelLoading(_))));
    }

    #[tokio::test]
    async fn test_remove_model() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModelStore::new(temp_dir.path().to_path_buf());
        write_model_files(&store.model_dir("m2v-base"));

        assert!(store.remove_model("m2v-base").await.unwrap());
        assert!(!store.is_model_downloaded("m2v-base").await);
        assert!(!store.remove_model("m2v-base").await.unwrap());
    }
}
