//! Resume ranker: score a resume against a job description

use clap::Parser;
use log::{error, info, warn};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::input;
use resume_ranker::input::validate::{load_description, validate_upload, EXTRACTION_FAILED};
use resume_ranker::output::formatter::{formatter_for, save_report_to_file};
use resume_ranker::output::report::{RankReport, ReportMetadata};
use resume_ranker::processing::model_provider::ModelProvider;
use resume_ranker::processing::model_store::{ModelSource, ModelStore};
use resume_ranker::processing::ranker::ResumeRanker;
use resume_ranker::{RankerError, Result};
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank {
            resume,
            job,
            job_text,
            output,
            save,
            top_n,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(RankerError::InvalidInput)?,
                None => config.output.format,
            };
            let top_n = top_n.unwrap_or(config.scoring.top_n_keywords);
            if top_n == 0 {
                return Err(RankerError::InvalidInput("--top-n must be at least 1".to_string()));
            }

            validate_upload(&resume, "Resume", &config)?;
            let description =
                load_description(job.as_deref(), job_text.as_deref(), &config).await?;

            let provider = Arc::new(ModelProvider::from_config(&config));
            let ranker = ResumeRanker::new(Arc::clone(&provider), top_n);

            // A model that cannot load is fatal before any scoring happens
            info!("Loading AI model... (this may take a moment on the first run)");
            ranker.preload_model().await?;

            let start_time = Instant::now();
            let resume_text = input::extract_text_from_file(&resume).await;
            if resume_text.trim().is_empty() {
                return Err(RankerError::InvalidInput(EXTRACTION_FAILED.to_string()));
            }

            let scores = ranker
                .calculate_scores(&description, &resume_text)
                .await
                .map_err(|e| {
                    error!("An error occurred during ranking of {}: {}", resume.display(), e);
                    RankerError::Scoring(
                        "An internal error occurred. Please check the logs.".to_string(),
                    )
                })?;

            let elapsed_ms = start_time.elapsed().as_millis();
            let filename = resume
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| resume.display().to_string());

            let report = RankReport::new(
                filename,
                scores,
                ReportMetadata {
                    embedding_model: provider
                        .model_name()
                        .unwrap_or_else(|| config.models.embedding_model.clone()),
                    top_n_keywords: top_n,
                    generated_at: chrono::Utc::now(),
                    processing_time_ms: u64::try_from(elapsed_ms).unwrap_or(u64::MAX),
                },
            );

            let use_colors = config.output.color_output && save.is_none();
            let formatter = formatter_for(output_format, use_colors, config.output.pretty_json);
            let rendered = formatter.format_report(&report)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Models { action } => {
            let store = ModelStore::new(config.models_dir().clone());

            match action {
                ModelAction::List => {
                    println!("📚 Available Embedding Models\n");
                    let default_id = store.resolve_model_id(&config.models.embedding_model);
                    for model in store.list_available_models() {
                        let status = if store.is_model_downloaded(&model.id).await {
                            "✅ Downloaded"
                        } else {
                            "⬇️  Available"
                        };
                        let is_default = default_id.as_deref() == Some(model.id.as_str());
                        let default_marker = if is_default { " (default)" } else { "" };
                        println!(
                            "  • {}{} ({}) - {} MB, {} dims [{}]",
                            model.id,
                            default_marker,
                            model.repo_id,
                            model.size_mb,
                            model.dimensions,
                            status
                        );
                        println!("    {}", model.description);
                    }
                }

                ModelAction::Download { model, force } => {
                    let reference = model.unwrap_or_else(|| config.models.embedding_model.clone());
                    match store.resolve(&reference)? {
                        ModelSource::Local(path) => {
                            println!("📁 '{}' is a local model directory; nothing to download", path.display());
                        }
                        ModelSource::Hub { id, repo_id } => {
                            println!("⬇️  Downloading model: {}", repo_id);
                            let path = store.download_model(&id, &repo_id, force).await?;
                            println!("✅ Model '{}' ready", id);
                            println!("📁 Location: {}", path.display());
                        }
                    }
                }

                ModelAction::Remove { model } => {
                    let id = match store.resolve(&model) {
                        Ok(ModelSource::Hub { id, .. }) => id,
                        _ => model,
                    };
                    if store.remove_model(&id).await? {
                        println!("✅ Model '{}' removed", id);
                    } else {
                        warn!("Model '{}' is not downloaded", id);
                    }
                }

                ModelAction::Info { model } => {
                    let id = store
                        .resolve_model_id(&model)
                        .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;
                    let info = store
                        .get_model_info(&id)
                        .ok_or_else(|| RankerError::ModelNotFound(model.clone()))?;

                    println!("📋 Model Information for '{}'\n", info.id);
                    println!("Name: {}", info.name);
                    println!("Repository: {}", info.repo_id);
                    println!("Size: {} MB", info.size_mb);
                    println!("Dimensions: {}", info.dimensions);
                    println!("Description: {}", info.description);

                    if store.is_model_downloaded(&id).await {
                        println!("Status: ✅ Downloaded");
                        println!("Location: {}", store.model_dir(&id).display());
                    } else {
                        println!("Status: ⬇️  Available for download");
                        println!("\n💡 To download this model, run:");
                        println!("   resume-ranker models download {}", id);
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Models Directory: {}", config.models_dir().display());
                println!("Embedding Model: {}", config.models.embedding_model);
                println!("Top-N Keywords: {}", config.scoring.top_n_keywords);
                println!("Max Upload Size: {} MB", config.input.max_file_size_mb);
                println!(
                    "Output: {} (colors: {})",
                    match config.output.format {
                        OutputFormat::Console => "console",
                        OutputFormat::Json => "json",
                    },
                    config.output.color_output
                );
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
