use std::path::PathBuf;
use std::sync::Arc;

use library::Catalog;
use serde::Serialize;

/// Shared by every request. Set once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub web_root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(catalog: Catalog, web_root: PathBuf) -> Self {
        Self {
            catalog: Arc::new(catalog),
            web_root: Arc::new(web_root),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
