use crate::domain::ActivityDirectory;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub directory: ActivityDirectory,
}

impl AppState {
    pub fn new(directory: ActivityDirectory) -> Self {
        Self { directory }
    }
}
