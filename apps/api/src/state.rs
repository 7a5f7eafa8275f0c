use std::sync::Arc;

use crate::config::Config;
use crate::parsing::DocumentParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Document parser. Loaders are swappable, see `DocumentParser::with_loaders`.
    pub parser: Arc<DocumentParser>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let parser = Arc::new(DocumentParser::new(config.parser_limits()));
        Self { config, parser }
    }
}
