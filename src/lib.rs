pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod scrape;

pub use extractor::{ArticleExtractor, ArticleRequest, ExtractOptions, ExtractionOutcome};
