#![cfg(feature = "server")]

use crate::backend::BackendClient;
use crate::config::AdminConfig;
use crate::model::PushEndpoint;
use lazy_static::lazy_static;
use std::sync::Arc;

/// Process-wide state of the dashboard server
#[derive(Debug)]
pub struct AdminState {
    pub config: AdminConfig,
    pub backend: BackendClient,
}

impl AdminState {
    pub fn new(config: AdminConfig) -> Self {
        let backend = BackendClient::new(config.backend_origin());
        Self { config, backend }
    }

    pub fn push_endpoint(&self) -> PushEndpoint {
        self.config.push_endpoint()
    }
}

// Singleton
lazy_static! {
    pub static ref ADMIN_STATE: Arc<tokio::sync::RwLock<AdminState>> =
        Arc::new(tokio::sync::RwLock::new(AdminState::new(AdminConfig::default())));
}

/// Replaces the configuration used by the server functions
pub async fn install(config: AdminConfig) {
    let mut state = ADMIN_STATE.write().await;
    *state = AdminState::new(config);
    log::debug!("Admin state configured: {:?}", state.config);
}

pub async fn backend() -> BackendClient {
    ADMIN_STATE.read().await.backend.clone()
}
