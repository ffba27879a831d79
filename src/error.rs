use serde_json::Value;
use thiserror::Error;

/// Message reported when no bearer token is available.
pub const MISSING_TOKEN_MESSAGE: &str = "No JWT token found";

/// Failure outcome of a single action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("{}", MISSING_TOKEN_MESSAGE)]
    Unauthenticated,
    #[error("Bearer token cannot be sent as a header value")]
    InvalidCredential,
    #[error("{0}")]
    Rejected(Rejection),
}

impl ActionError {
    /// The short human-readable value handed to the caller on failure.
    pub fn message(&self) -> &str {
        match self {
            ActionError::Unauthenticated => MISSING_TOKEN_MESSAGE,
            ActionError::InvalidCredential => "Bearer token cannot be sent as a header value",
            ActionError::Rejected(rejection) => &rejection.message,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ActionError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.rejection().and_then(|r| r.status)
    }
}

/// A failed request, normalized.
///
/// `message` is resolved as: server-provided `message` field, then the
/// operation's fallback string. The remaining fields keep the context the
/// failure was observed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub action: String,
    pub message: String,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub server_message: Option<String>,
    pub detail: Option<Value>,
}

impl Rejection {
    pub fn new(action: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            message: fallback.into(),
            status: None,
            status_text: None,
            server_message: None,
            detail: None,
        }
    }

    /// Attaches an HTTP error response and re-resolves the message from it.
    pub fn with_response(mut self, status: u16, status_text: Option<String>, body: Option<Value>) -> Self {
        self.status = Some(status);
        self.status_text = status_text;
        self.server_message = body.as_ref().and_then(server_message);
        if let Some(message) = &self.server_message {
            self.message = message.clone();
        }
        self.detail = body;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Reads a usable `message` out of an error body. Empty and non-string
/// values fall through to the fallback.
pub fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

/// Failure of the outbound call itself: no HTTP response was received.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("Transport closed")]
    Closed,
}

/// Errors raised while assembling the client stack.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Could not determine config directory")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_message_wins_over_fallback() {
        let rejection = Rejection::new("customer/create", "Failed to create customer")
            .with_response(409, Some("Conflict".into()), Some(json!({ "message": "Email already used" })));

        assert_eq!(rejection.message, "Email already used");
        assert_eq!(rejection.server_message.as_deref(), Some("Email already used"));
        assert_eq!(rejection.status, Some(409));
    }

    #[test]
    fn fallback_used_without_message_field() {
        let rejection = Rejection::new("customer/getById", "Customer not found")
            .with_response(404, Some("Not Found".into()), Some(json!({ "error": "nope" })));

        assert_eq!(rejection.message, "Customer not found");
        assert!(rejection.server_message.is_none());
        assert_eq!(rejection.detail, Some(json!({ "error": "nope" })));
    }

    #[test]
    fn empty_or_non_string_message_falls_back() {
        assert_eq!(server_message(&json!({ "message": "" })), None);
        assert_eq!(server_message(&json!({ "message": 12 })), None);
        assert_eq!(server_message(&json!("plain text body")), None);
    }

    #[test]
    fn action_error_display_is_the_message() {
        let error = ActionError::Rejected(Rejection::new("product/search", "Search failed"));
        assert_eq!(error.to_string(), "Search failed");
        assert_eq!(error.message(), "Search failed");
        assert_eq!(ActionError::Unauthenticated.to_string(), MISSING_TOKEN_MESSAGE);
    }
}
