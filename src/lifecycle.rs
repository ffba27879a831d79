//! Lifecycle events for state stores.
//!
//! Every action publishes `pending` before it starts and exactly one of
//! `fulfilled` / `rejected` when it settles. Events for one call share a
//! request id; events of different calls may interleave.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pending => "pending",
            Phase::Fulfilled => "fulfilled",
            Phase::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Value(Value),
    Message(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
    pub action: String,
    pub request_id: u64,
    pub phase: Phase,
    pub payload: EventPayload,
}

impl ActionEvent {
    /// `customer/create/fulfilled` style event type.
    pub fn event_type(&self) -> String {
        format!("{}/{}", self.action, self.phase)
    }
}

/// Publishes events into an unbounded channel; a dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: mpsc::UnboundedSender<ActionEvent>,
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

pub fn next_request_id() -> u64 {
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

impl EventSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ActionEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn publish(&self, action: &str, request_id: u64, phase: Phase, payload: EventPayload) {
        let event = ActionEvent {
            action: action.to_string(),
            request_id,
            phase,
            payload,
        };
        if self.sender.send(event).is_err() {
            tracing::trace!(action, "Lifecycle receiver dropped");
        }
    }
}
