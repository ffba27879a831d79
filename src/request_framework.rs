use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::credentials::CredentialProvider;
use crate::domain::Listing;
use crate::error::{ActionError, Rejection};
use crate::lifecycle::{next_request_id, EventPayload, EventSink, Phase};
use crate::transport::{HttpRequest, HttpResponse, Transport};

// =============================================================================
// 1. THE ABSTRACTION (Resources and their success summaries)
// =============================================================================

/// Structured log record emitted when an action succeeds.
pub trait LogSummary {
    fn log_success(&self, action: &str);
}

/// A REST resource family served under one collection path.
///
/// Records are built from the response body with `From<Value>`, so whatever
/// a 2xx response carries is handed back as sent.
pub trait Resource: From<Value> + LogSummary + Send + Sync + 'static {
    type Id: Display + Debug + Clone + Serialize + Send + Sync;
    type Create: Serialize + Debug + Send + Sync;

    /// Lowercase name used in action types, e.g. `customer`.
    const NAME: &'static str;
    /// Capitalized name used in messages, e.g. `Customer`.
    const LABEL: &'static str;
    /// Collection path, e.g. `/api/customers`.
    const COLLECTION: &'static str;
}

/// Resources the backend lets callers edit.
///
/// Resources without an edit endpoint do not implement this, so
/// [`ResourceClient::update`] does not exist for them:
///
/// ```compile_fail
/// use pos_actions::{Refund, ResourceClient};
///
/// async fn edit(refunds: ResourceClient<Refund>) {
///     let _ = refunds.update(1, &()).await;
/// }
/// ```
pub trait Updatable: Resource {
    type Update: Serialize + Debug + Send + Sync;

    /// `PUT` for full replacement, `PATCH` for partial updates.
    const UPDATE_METHOD: Method;
}

// =============================================================================
// 2. THE OPERATION DESCRIPTOR
// =============================================================================

/// One concrete call: which action it is, where it goes and what to report
/// when the server gives no message of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub action: String,
    pub method: Method,
    pub path: String,
    pub fallback: String,
}

impl Operation {
    pub fn new(
        action: impl Into<String>,
        method: Method,
        path: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            method,
            path: path.into(),
            fallback: fallback.into(),
        }
    }

    fn reject(&self) -> Rejection {
        Rejection::new(&self.action, &self.fallback)
    }
}

/// `Authorization: Bearer <token>` plus `Content-Type: application/json`.
pub fn auth_headers(token: &str) -> Result<HeaderMap, ActionError> {
    let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ActionError::InvalidCredential)?;
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Serializes a request payload; a payload that cannot be represented as JSON
/// is rejected with the operation's fallback message.
pub fn to_body<B: Serialize + ?Sized>(op: &Operation, payload: &B) -> Result<Value, ActionError> {
    serde_json::to_value(payload).map_err(|e| {
        error!(action = %op.action, error = %e, "Request payload could not be serialized");
        ActionError::Rejected(op.reject().with_detail(e.to_string()))
    })
}

// =============================================================================
// 3. THE GENERIC EXECUTOR
// =============================================================================

/// Authenticated request wrapper shared by every resource client.
///
/// Each call resolves the token, builds the headers, issues exactly one
/// request and normalizes the outcome. Nothing is retained between calls.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    events: Option<EventSink>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            transport,
            credentials,
            events: None,
        }
    }

    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        self.events = Some(sink);
        self
    }

    /// Runs `op` and hands back a 2xx body as `R`, unchanged. An empty body
    /// is passed on as `null`.
    pub async fn execute<R>(&self, op: Operation, body: Option<Value>) -> Result<R, ActionError>
    where
        R: From<Value> + LogSummary,
    {
        let request_id = next_request_id();
        self.publish(&op, request_id, Phase::Pending, EventPayload::None);

        match self.dispatch(&op, body).await {
            Ok(resp) => {
                let raw = resp.body.unwrap_or(Value::Null);
                debug!(action = %op.action, status = resp.status, response = %raw, "Response payload");
                self.publish(&op, request_id, Phase::Fulfilled, EventPayload::Value(raw.clone()));
                let value = R::from(raw);
                value.log_success(&op.action);
                Ok(value)
            }
            Err(e) => {
                self.publish(&op, request_id, Phase::Rejected, EventPayload::Message(e.message().to_string()));
                Err(e)
            }
        }
    }

    /// Runs a delete; resolves to `id` whatever the response body holds.
    pub async fn execute_delete<I>(&self, op: Operation, id: I) -> Result<I, ActionError>
    where
        I: Display + Serialize,
    {
        let request_id = next_request_id();
        self.publish(&op, request_id, Phase::Pending, EventPayload::None);

        match self.dispatch(&op, None).await {
            Ok(_) => {
                info!(action = %op.action, id = %id, "Deleted successfully");
                let payload = serde_json::to_value(&id).unwrap_or_default();
                self.publish(&op, request_id, Phase::Fulfilled, EventPayload::Value(payload));
                Ok(id)
            }
            Err(e) => {
                self.publish(&op, request_id, Phase::Rejected, EventPayload::Message(e.message().to_string()));
                Err(e)
            }
        }
    }

    async fn dispatch(&self, op: &Operation, body: Option<Value>) -> Result<HttpResponse, ActionError> {
        let Some(token) = self.credentials.bearer_token() else {
            error!(action = %op.action, "No JWT token found");
            return Err(ActionError::Unauthenticated);
        };
        let headers = auth_headers(&token).inspect_err(|_| {
            error!(action = %op.action, "Bearer token is not a valid header value");
        })?;

        debug!(action = %op.action, method = %op.method, path = %op.path, "Sending request");
        let request = HttpRequest {
            method: op.method.clone(),
            path: op.path.clone(),
            headers,
            body: body.clone(),
        };

        let resp = match self.transport.send(request).await {
            Ok(resp) => resp,
            Err(e) => {
                error!(
                    action = %op.action,
                    method = %op.method,
                    path = %op.path,
                    error = %e,
                    "Request failed before a response was received"
                );
                log_request_payload(op, body.as_ref());
                return Err(ActionError::Rejected(op.reject().with_detail(e.to_string())));
            }
        };

        if !resp.is_success() {
            let rejection = op
                .reject()
                .with_response(resp.status, resp.status_text, resp.body);
            error!(
                action = %op.action,
                method = %op.method,
                path = %op.path,
                status = resp.status,
                status_text = rejection.status_text.as_deref().unwrap_or(""),
                server_message = rejection.server_message.as_deref().unwrap_or(""),
                error = ?rejection.detail,
                "Request rejected"
            );
            log_request_payload(op, body.as_ref());
            return Err(ActionError::Rejected(rejection));
        }

        Ok(resp)
    }

    fn publish(&self, op: &Operation, request_id: u64, phase: Phase, payload: EventPayload) {
        if let Some(events) = &self.events {
            events.publish(&op.action, request_id, phase, payload);
        }
    }
}

fn log_request_payload(op: &Operation, body: Option<&Value>) {
    if let Some(body) = body {
        debug!(action = %op.action, request = %body, "Request payload");
    }
}

// =============================================================================
// 4. THE GENERIC RESOURCE CLIENT
// =============================================================================

/// Create / get / update / delete / list over one [`Resource`].
pub struct ResourceClient<T: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `customer/getById` style action type.
    pub fn action(op: &str) -> String {
        format!("{}/{}", T::NAME, op)
    }

    pub fn item_path(id: &T::Id) -> String {
        format!("{}/{}", T::COLLECTION, id)
    }

    pub async fn create(&self, payload: &T::Create) -> Result<T, ActionError> {
        let op = Operation::new(
            Self::action("create"),
            Method::POST,
            T::COLLECTION,
            format!("Failed to create {}", T::NAME),
        );
        let body = to_body(&op, payload)?;
        self.api.execute(op, Some(body)).await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, ActionError> {
        let op = Operation::new(
            Self::action("getById"),
            Method::GET,
            Self::item_path(&id),
            format!("{} not found", T::LABEL),
        );
        self.api.execute(op, None).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T::Id, ActionError> {
        let op = Operation::new(
            Self::action("delete"),
            Method::DELETE,
            Self::item_path(&id),
            format!("Failed to delete {}", T::NAME),
        );
        self.api.execute_delete(op, id).await
    }

    pub async fn list(&self) -> Result<Listing<T>, ActionError>
    where
        Listing<T>: LogSummary,
    {
        let op = Operation::new(
            Self::action("getAll"),
            Method::GET,
            T::COLLECTION,
            format!("Failed to fetch {}s", T::NAME),
        );
        self.api.execute(op, None).await
    }
}

impl<T: Updatable> ResourceClient<T> {
    pub async fn update(&self, id: T::Id, patch: &T::Update) -> Result<T, ActionError> {
        let op = Operation::new(
            Self::action("update"),
            T::UPDATE_METHOD,
            Self::item_path(&id),
            format!("Failed to update {}", T::NAME),
        );
        let body = to_body(&op, patch)?;
        self.api.execute(op, Some(body)).await
    }
}
