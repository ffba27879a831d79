//! # POS Actions
//!
//! Async actions for the customer, product and refund endpoints of a
//! point-of-sale backend.
//!
//! Every action has the same shape: resolve the bearer token, build the
//! headers, send one request, log the outcome, and hand back either the
//! payload or a short failure message.
//!
//! ## Ingredients
//!
//! - **Domain types** - Pass-through payloads with typed getters → [`Customer`], [`Product`], [`Refund`], [`Listing`]
//! - **Request wrapper** - One generic executor for every action → [`ApiClient`]
//! - **Resource clients** - Typed methods per endpoint → [`CustomerClient`], [`ProductClient`], [`RefundClient`]
//! - **Credentials** - Injected token source with an explicit absent case → [`CredentialProvider`]
//! - **Lifecycle events** - `pending` / `fulfilled` / `rejected` for a state store → [`ActionEvent`]
//! - **System wiring** - Configuration to ready clients → [`PosSystem`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pos_actions::{ClientConfig, CustomerInput, PosSystem};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let system = PosSystem::new(&ClientConfig::from_env()?)?;
//!
//! let customer = system
//!     .customer_client
//!     .create_customer(&CustomerInput::new("Alice", "alice@example.com"))
//!     .await?;
//!
//! let deleted = system.product_client.delete_product(42).await?;
//! assert_eq!(deleted, 42);
//! # let _ = customer;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure values
//!
//! A failed action returns [`ActionError`]. Its [`message`](ActionError::message)
//! is the server's `message` field when present, the action's fixed fallback
//! (e.g. `"Customer not found"`) otherwise. A missing token fails with
//! [`ActionError::Unauthenticated`] before anything is sent.

pub mod app_system;
pub mod clients;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod request_framework;
pub mod transport;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, PosSystem};
pub use clients::{CustomerClient, ProductClient, RefundClient};
pub use config::{ClientConfig, CredentialSource};
pub use credentials::{CredentialProvider, EnvCredentials, FileCredentialStore, StaticToken};
pub use domain::*;
pub use error::{ActionError, Rejection, SetupError, TransportError};
pub use lifecycle::{ActionEvent, EventPayload, EventSink, Phase};
pub use request_framework::{ApiClient, LogSummary, Operation, Resource, ResourceClient, Updatable};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
