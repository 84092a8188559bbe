//! RPC boundary to the background AI capability service.

pub mod client;
pub mod contract;
pub mod server;
pub mod transport;

pub use client::{PendingCall, ServiceClient, StatusEvent, Subscription};
pub use server::{LifecycleHandler, ServiceHandler, ServiceServer, StatusEmitter};
pub use transport::{Endpoint, Listener};
