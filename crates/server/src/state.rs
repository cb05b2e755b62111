use std::sync::Arc;

use filler::DocumentFiller;

use crate::store::OutputStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Template and font table; shared with blocking fill tasks
    pub filler: Arc<DocumentFiller>,
    pub store: Arc<dyn OutputStore>,
}

impl AppState {
    pub fn new(filler: DocumentFiller, store: impl OutputStore + 'static) -> Self {
        Self {
            filler: Arc::new(filler),
            store: Arc::new(store),
        }
    }
}
