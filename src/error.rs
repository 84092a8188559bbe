//! Error types for the service client and the consent helper.

use std::fmt;

/// The channel to the background service could not be established.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Nothing is listening on the configured endpoint.
    #[error("service unreachable at {endpoint}: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The endpoint string is malformed or not supported on this platform.
    #[error("unsupported endpoint `{0}`")]
    UnsupportedEndpoint(String),

    /// Binding or accepting on the endpoint failed (service side).
    #[error("endpoint I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single RPC failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcFailure {
    /// No reply arrived within the call timeout.
    Timeout,
    /// The service replied with a fault.
    Fault(String),
    /// The connection dropped before the reply arrived.
    ConnectionLost,
    /// The reply could not be decoded into the expected result.
    Protocol(String),
}

impl fmt::Display for RpcFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("call timed out"),
            Self::Fault(message) => write!(f, "service fault: {message}"),
            Self::ConnectionLost => f.write_str("connection lost"),
            Self::Protocol(message) => write!(f, "protocol error: {message}"),
        }
    }
}

/// An issued call failed. Reported on the call's own `PendingCall` only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{method} failed: {reason}")]
pub struct RpcError {
    pub method: &'static str,
    pub reason: RpcFailure,
}

impl RpcError {
    #[must_use]
    pub fn new(method: &'static str, reason: RpcFailure) -> Self {
        Self { method, reason }
    }
}

/// The host UI toolkit could not be initialised; no prompt was shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("UI initialisation failed: {0}")]
pub struct UiInitError(pub String);

/// Reading or writing the TOML configuration failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialise error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum FireBoxError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    UiInit(#[from] UiInitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A service handler refused or failed a request.
    #[error("service error: {0}")]
    Service(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FireBoxError>;
