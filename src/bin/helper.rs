//! Consent helper: `firebox-helper [requester-name]`.
//!
//! Shows one modal asking whether the requester may use AI capabilities and
//! exits with 0 (approved), 1 (denied or dismissed) or 2 (no UI available).
//! Diagnostics go to stderr; the decision is carried by the exit status only.

use firebox::consent::{DialogHost, authorize};
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("firebox=info")),
        )
        .init();

    let mut host = DialogHost;
    let outcome = authorize(&mut host, std::env::args_os().skip(1));
    tracing::info!(outcome = outcome.as_str(), "consent decision reached");
    outcome.into()
}
