use std::sync::Arc;

use tracing::info;

use crate::clients::{CustomerClient, ProductClient, RefundClient};
use crate::config::{ClientConfig, CredentialSource};
use crate::credentials::{CredentialProvider, EnvCredentials, FileCredentialStore};
use crate::error::SetupError;
use crate::lifecycle::EventSink;
use crate::request_framework::ApiClient;
use crate::transport::{ReqwestTransport, Transport};

/// The three resource clients, sharing one transport and credential source.
#[derive(Clone)]
pub struct PosSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub refund_client: RefundClient,
}

impl PosSystem {
    /// Builds the reqwest transport and credential provider `config` names.
    pub fn new(config: &ClientConfig) -> Result<Self, SetupError> {
        Self::build(config, None)
    }

    /// Like [`PosSystem::new`], also publishing lifecycle events to `events`.
    pub fn with_events(config: &ClientConfig, events: EventSink) -> Result<Self, SetupError> {
        Self::build(config, Some(events))
    }

    fn build(config: &ClientConfig, events: Option<EventSink>) -> Result<Self, SetupError> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.base_url)?);
        let credentials: Arc<dyn CredentialProvider> = match &config.credentials {
            CredentialSource::Env(var) => Arc::new(EnvCredentials::new(var.clone())),
            CredentialSource::File(path) => Arc::new(FileCredentialStore::new(path.clone())),
        };
        info!(base_url = %config.base_url, credentials = ?config.credentials, "Starting POS clients");

        let mut api = ApiClient::new(transport, credentials);
        if let Some(events) = events {
            api = api.with_event_sink(events);
        }
        Ok(Self::from_api(api))
    }

    /// Wires the clients over an existing request wrapper.
    pub fn from_api(api: ApiClient) -> Self {
        Self {
            customer_client: CustomerClient::new(api.clone()),
            product_client: ProductClient::new(api.clone()),
            refund_client: RefundClient::new(api),
        }
    }
}
