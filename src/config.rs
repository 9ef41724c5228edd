//! Command line and environment configuration of the dashboard server

#![cfg(feature = "server")]

use crate::error::ConfigError;
use crate::model::PushEndpoint;
use std::net::SocketAddr;

pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:9090";
pub const DEFAULT_NAMESPACE: &str = "/ws";

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Origin of the messaging server admin API
    #[arg(long, env = "JABBER_ADMIN_BACKEND", default_value = DEFAULT_BACKEND_ORIGIN)]
    pub backend: String,
    /// Socket.IO namespace emitting `log` events
    #[arg(long, env = "JABBER_ADMIN_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
    /// Address to serve the dashboard on
    #[arg(long, env = "JABBER_ADMIN_ADDR")]
    pub addr: Option<SocketAddr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    backend_origin: String,
    namespace: String,
}

impl AdminConfig {
    pub fn new(backend_origin: &str, namespace: &str) -> Result<Self, ConfigError> {
        let backend_origin = backend_origin.trim().trim_end_matches('/');
        if !backend_origin.starts_with("http://") && !backend_origin.starts_with("https://") {
            return Err(ConfigError::InvalidOrigin(backend_origin.to_string()));
        }
        if !namespace.starts_with('/') {
            return Err(ConfigError::InvalidNamespace(namespace.to_string()));
        }
        Ok(Self {
            backend_origin: backend_origin.to_string(),
            namespace: namespace.to_string(),
        })
    }

    pub fn backend_origin(&self) -> &str {
        &self.backend_origin
    }

    /// Socket.IO endpoint on the backend, over `ws://` or `wss://`
    pub fn push_endpoint(&self) -> PushEndpoint {
        let url = match self.backend_origin.strip_prefix("https://") {
            Some(host) => format!("wss://{host}"),
            None => format!(
                "ws://{}",
                self.backend_origin.trim_start_matches("http://")
            ),
        };
        PushEndpoint {
            url: format!("{url}/socket.io/?EIO=4&transport=websocket"),
            namespace: self.namespace.clone(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            backend_origin: DEFAULT_BACKEND_ORIGIN.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl TryFrom<&Args> for AdminConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        AdminConfig::new(&args.backend, &args.namespace)
    }
}
