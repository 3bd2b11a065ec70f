use crate::config::Config;
use crate::extractor::ArticleExtractor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<ArticleExtractor>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: Arc::new(ArticleExtractor::new(config)),
        }
    }
}
