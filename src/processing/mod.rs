//! Text processing and scoring module

pub mod text_processor;
pub mod keywords;
pub mod embeddings;
pub mod model_store;
pub mod model_provider;
pub mod semantic;
pub mod ranker;

#[doc(hidden)]
pub mod test_support;
