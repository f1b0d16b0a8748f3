//! Application state
//!
//! Shared state for the Axum application: the service context and
//! configuration.

use std::sync::Arc;

use skillswap_common::{AppConfig, JwtService};
use skillswap_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Shared handle to the service context (for the realtime hub state)
    pub fn service_context_arc(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.service_context)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
