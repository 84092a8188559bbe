//! FireBox: desktop integration for the local AI capability service.
//!
//! # Architecture
//!
//! Two independent pieces share this crate:
//! - **Service client** ([`service::ServiceClient`]): async RPC facade over the
//!   background service (`GetStatus`, `Start`, `Stop`, and the
//!   `StatusChanged` signal), plus a reference service implementation.
//! - **Consent helper** ([`consent`]): the standalone process that asks the
//!   user whether another application may use AI capabilities and reports the
//!   answer through its exit status.

pub mod config;
pub mod consent;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use consent::{Decision, Outcome};
pub use error::{ConnectionError, FireBoxError, Result, RpcError, RpcFailure, UiInitError};
pub use service::{PendingCall, ServiceClient, StatusEvent, Subscription};
