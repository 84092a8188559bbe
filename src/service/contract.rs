//! Versioned command/response/signal envelopes for the service boundary.
//!
//! Every envelope is one line of JSON. Clients send [`CommandEnvelope`]s; the
//! service answers each with a [`ResponseEnvelope`] carrying the same
//! `request_id` and broadcasts [`SignalEnvelope`]s to every connected client.

use serde::{Deserialize, Serialize};

/// Contract version for all envelopes.
pub const CONTRACT_VERSION: u32 = 1;

/// Name of the status-change signal.
pub const STATUS_CHANGED: &str = "StatusChanged";

/// Method surface of the service interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    GetStatus,
    Start,
    Stop,
}

impl Method {
    /// Render method name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetStatus => "GetStatus",
            Self::Start => "Start",
            Self::Stop => "Stop",
        }
    }

    /// Parse a method name from wire format.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "GetStatus" => Some(Self::GetStatus),
            "Start" => Some(Self::Start),
            "Stop" => Some(Self::Stop),
            _ => None,
        }
    }
}

/// A command envelope from client -> service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub v: u32,
    pub request_id: String,
    pub method: Method,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl CommandEnvelope {
    /// Build a v1 command envelope with an empty payload.
    #[must_use]
    pub fn new(request_id: impl Into<String>, method: Method) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            method,
            payload: serde_json::json!({}),
        }
    }

    /// Validate envelope version and required identifiers.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.v != CONTRACT_VERSION {
            return Err(ContractError::new(
                ContractErrorKind::UnsupportedVersion,
                format!(
                    "unsupported contract version {}; expected {}",
                    self.v, CONTRACT_VERSION
                ),
            ));
        }
        if self.request_id.trim().is_empty() {
            return Err(ContractError::new(
                ContractErrorKind::InvalidEnvelope,
                "request_id cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A response envelope from service -> client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub v: u32,
    pub request_id: String,
    pub ok: bool,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Build a successful response envelope.
    #[must_use]
    pub fn ok(request_id: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: true,
            payload,
            error: None,
        }
    }

    /// Build an error response envelope.
    #[must_use]
    pub fn error(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            v: CONTRACT_VERSION,
            request_id: request_id.into(),
            ok: false,
            payload: serde_json::Value::Null,
            error: Some(message.into()),
        }
    }
}

/// A broadcast signal envelope from service -> every client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEnvelope {
    pub v: u32,
    pub event_id: String,
    pub signal: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl SignalEnvelope {
    /// Build a `StatusChanged` signal.
    #[must_use]
    pub fn status_changed(event_id: impl Into<String>, status: &str) -> Self {
        Self {
            v: CONTRACT_VERSION,
            event_id: event_id.into(),
            signal: STATUS_CHANGED.to_owned(),
            payload: serde_json::json!({ "status": status }),
        }
    }

    /// The new status carried by a `StatusChanged` signal.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        if self.signal != STATUS_CHANGED {
            return None;
        }
        self.payload.get("status").and_then(serde_json::Value::as_str)
    }
}

/// Anything the service may write to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceMessage {
    Response(ResponseEnvelope),
    Signal(SignalEnvelope),
}

/// Contract validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractErrorKind {
    UnsupportedVersion,
    InvalidEnvelope,
    UnknownMethod,
}

/// Contract validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    pub kind: ContractErrorKind,
    pub message: String,
}

impl ContractError {
    #[must_use]
    pub fn new(kind: ContractErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ContractError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_match_wire_format() {
        for method in [Method::GetStatus, Method::Start, Method::Stop] {
            assert_eq!(Method::parse(method.as_str()), Some(method));
            let json = serde_json::to_string(&method).expect("serialize method");
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
        assert_eq!(Method::parse("Restart"), None);
    }

    #[test]
    fn validate_rejects_wrong_version() {
        let mut envelope = CommandEnvelope::new("req-1", Method::GetStatus);
        envelope.v = 7;
        let err = envelope.validate().expect_err("version 7 must be rejected");
        assert_eq!(err.kind, ContractErrorKind::UnsupportedVersion);
    }

    #[test]
    fn validate_rejects_blank_request_id() {
        let envelope = CommandEnvelope::new("   ", Method::Start);
        let err = envelope.validate().expect_err("blank id must be rejected");
        assert_eq!(err.kind, ContractErrorKind::InvalidEnvelope);
    }

    #[test]
    fn service_message_distinguishes_responses_from_signals() {
        let response = r#"{"v":1,"request_id":"a","ok":true,"payload":{"status":"running"}}"#;
        let signal = r#"{"v":1,"event_id":"e","signal":"StatusChanged","payload":{"status":"stopped"}}"#;

        match serde_json::from_str::<ServiceMessage>(response).expect("parse response") {
            ServiceMessage::Response(resp) => {
                assert!(resp.ok);
                assert_eq!(resp.error, None);
            }
            other => panic!("expected response, got {other:?}"),
        }
        match serde_json::from_str::<ServiceMessage>(signal).expect("parse signal") {
            ServiceMessage::Signal(sig) => assert_eq!(sig.status(), Some("stopped")),
            other => panic!("expected signal, got {other:?}"),
        }
    }

    #[test]
    fn status_is_none_for_other_signals() {
        let mut signal = SignalEnvelope::status_changed("e-1", "running");
        signal.signal = "Heartbeat".to_owned();
        assert_eq!(signal.status(), None);
    }
}
