//! Application state management

use crate::model::ModelHandle;

use super::metadata::ServiceMetadata;

/// Application state shared across handlers.
///
/// Built once after the model has loaded; handlers only read from it.
pub struct AppState {
    pub model: ModelHandle,
    pub metadata: ServiceMetadata,
}

impl AppState {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            metadata: ServiceMetadata::default(),
        }
    }
}
