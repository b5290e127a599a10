//! Application state management

use upiguard::service::ClassificationService;

use crate::config::ServerConfig;

/// Application state shared across all handlers. The classification service
/// is stateless, so no synchronization is needed beyond the outer `Arc`.
#[derive(Debug)]
pub struct AppState {
    /// Classification pipeline
    pub service: ClassificationService,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(service: ClassificationService, config: ServerConfig) -> Self {
        Self { service, config }
    }
}
