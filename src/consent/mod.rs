//! Consent helper: one modal prompt per process, answered through the exit
//! status.
//!
//! | Outcome | Exit code | When |
//! |---------|-----------|------|
//! | Approved | 0 | the affirmative button was pressed |
//! | Denied | 1 | the negative button was pressed, or the window was dismissed |
//! | Error | 2 | the UI toolkit could not be brought up; nothing was shown |
//!
//! The requester name is untrusted display text. It is only ever placed into
//! labels, never into a format string or a command.

pub mod host;
pub mod prompt;
pub mod state;

/// Application id of the helper process.
pub const HELPER_APP_ID: &str = "com.firebox.helper";

pub use host::{DecisionSink, DialogHost, PromptHost, authorize, authorize_with, run_prompt};
pub use prompt::{
    PromptSpec, SourceCatalog, Translator, build_prompt, build_prompt_with, parse_requester_name,
    parse_requester_name_with,
};
pub use state::{ConsentRequest, ConsentState, Decision, Outcome, Trigger};
