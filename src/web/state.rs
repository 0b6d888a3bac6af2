use std::sync::Arc;

use crate::cache::ResultCache;
use crate::snapshot::{FetchError, HttpSource};

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<HttpSource>,
    pub cache: Arc<ResultCache>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let source = HttpSource::new(&config.source.base_url, config.source.timeout)?;
        let cache = ResultCache::new(config.cache.ttl);
        Ok(AppState {
            source: Arc::new(source),
            cache: Arc::new(cache),
        })
    }
}
