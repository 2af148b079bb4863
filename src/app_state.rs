use std::sync::Arc;

use crate::config::ProcessingConfig;
use crate::services::{
    image_fetcher::ImageFetcher, processor::JobProcessor, registry::JobRegistry,
    store_directory::StoreDirectory,
};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<JobRegistry>,
    pub directory: Arc<StoreDirectory>,
    pub processor: JobProcessor,
}

impl AppState {
    pub fn new(
        directory: StoreDirectory,
        fetcher: Arc<dyn ImageFetcher>,
        processing: ProcessingConfig,
    ) -> Self {
        let directory = Arc::new(directory);
        Self {
            registry: Arc::new(JobRegistry::new()),
            processor: JobProcessor::new(Arc::clone(&directory), fetcher, processing),
            directory,
        }
    }
}
