//! Resume ranker library
//!
//! Scores a resume against a job description along two axes: overlap with the
//! description's most frequent keywords, and cosine similarity of the two
//! texts' embeddings.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, RankerError};
pub use input::extract_text_from_file;
pub use processing::ranker::{ResumeRanker, ScoreResult};
