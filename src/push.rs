//! Push notification correlation.
//!
//! HelpLane targets pushes at the external id `contact_{uuid}`. This module
//! tracks the current contact, tells the host when to log its push provider
//! in or out, and classifies inbound payloads. It never talks to a push
//! network itself.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub const EXTERNAL_ID_PREFIX: &str = "contact_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name")]
pub enum PushEvent {
    #[serde(rename = "PushLogin", rename_all = "camelCase")]
    Login { external_id: String },
    #[serde(rename = "PushLogout")]
    Logout,
}

impl PushEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PushEvent::Login { .. } => "PushLogin",
            PushEvent::Logout => "PushLogout",
        }
    }
}

/// Receives login/logout events so the host can drive its push provider.
pub trait PushEventSink: Send + Sync {
    fn emit(&self, event: PushEvent);
}

/// Forwards events into a channel the host drains.
pub struct ChannelPushSink {
    tx: mpsc::UnboundedSender<PushEvent>,
}

impl ChannelPushSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PushEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PushEventSink for ChannelPushSink {
    fn emit(&self, event: PushEvent) {
        if self.tx.send(event).is_err() {
            warn!("push event receiver dropped; event discarded");
        }
    }
}

/// Logs events and does nothing else.
#[derive(Clone, Default)]
pub struct TracingPushSink;

impl PushEventSink for TracingPushSink {
    fn emit(&self, event: PushEvent) {
        let payload = serde_json::to_value(&event).unwrap_or(serde_json::Value::Null);
        info!(
            target: "helplane_sdk.push",
            event = event.name(),
            %payload,
            "push event"
        );
    }
}

pub struct PushCorrelation {
    contact_id: Option<String>,
    sink: Arc<dyn PushEventSink>,
}

impl Default for PushCorrelation {
    fn default() -> Self {
        Self::new(Arc::new(TracingPushSink))
    }
}

impl PushCorrelation {
    pub fn new(sink: Arc<dyn PushEventSink>) -> Self {
        Self {
            contact_id: None,
            sink,
        }
    }

    /// Record the contact once a chat session exists. The host should log its
    /// push provider in with the emitted external id.
    pub fn login(&mut self, contact_uuid: impl Into<String>) {
        let contact_uuid = contact_uuid.into();
        let external_id = format!("{EXTERNAL_ID_PREFIX}{contact_uuid}");
        self.contact_id = Some(contact_uuid);
        self.sink.emit(PushEvent::Login {
            external_id: external_id.clone(),
        });
        info!(%external_id, "push login; log the push provider in with this external id");
    }

    pub fn logout(&mut self) {
        self.contact_id = None;
        self.sink.emit(PushEvent::Logout);
        info!("push logout; log the push provider out");
    }

    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }

    pub fn external_id(&self) -> Option<String> {
        self.contact_id
            .as_ref()
            .map(|uuid| format!("{EXTERNAL_ID_PREFIX}{uuid}"))
    }
}

/// True when the payload came from HelpLane. `helplane` must be the string
/// `"true"`; a JSON boolean does not match.
pub fn is_helplane_notification(payload: &Value) -> bool {
    string_field(payload, "helplane") == Some("true")
        || string_field(payload, "type") == Some("new_message")
}

pub fn conversation_id(payload: &Value) -> Option<&str> {
    string_field(payload, "conversation_id")
}

pub fn message_id(payload: &Value) -> Option<&str> {
    string_field(payload, "message_id")
}

fn string_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}
