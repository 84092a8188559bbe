//! Driving the host UI toolkit through one consent prompt.
//!
//! The toolkit is behind [`PromptHost`]: bring it up, then show one modal with
//! two actions and report whichever UI event ends it through the
//! [`DecisionSink`]. [`DialogHost`] is the native-dialog implementation used
//! by the `firebox-helper` binary.

use crate::consent::prompt::{
    PromptSpec, SourceCatalog, Translator, build_prompt_with, parse_requester_name_with,
};
use crate::consent::state::{ConsentRequest, ConsentState, Decision, Outcome, Trigger};
use crate::error::UiInitError;
use std::ffi::OsStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The host UI toolkit, as far as the consent flow needs it.
pub trait PromptHost {
    /// Bring the toolkit up. Failing here means no window is ever shown.
    fn initialize(&mut self) -> Result<(), UiInitError>;

    /// Show `prompt` as a single modal window and run the event loop until a
    /// trigger has been sent to `sink` or the window is gone. Implementations
    /// must stop the loop as soon as [`DecisionSink::fire`] returns `true`.
    fn present(&mut self, prompt: &PromptSpec, sink: &DecisionSink);
}

/// Where UI callbacks report triggers. Cloneable so each toolkit callback can
/// hold its own handle; all clones share one [`ConsentRequest`].
#[derive(Debug, Clone)]
pub struct DecisionSink {
    request: Arc<Mutex<ConsentRequest>>,
}

impl DecisionSink {
    fn new(request: ConsentRequest) -> Self {
        Self {
            request: Arc::new(Mutex::new(request)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConsentRequest> {
        self.request.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report a UI event. Returns `true` if it decided the prompt, `false` if a
    /// decision had already been made.
    pub fn fire(&self, trigger: Trigger) -> bool {
        self.lock().apply(trigger)
    }

    /// Whether a trigger has already decided the prompt.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self.lock().state(), ConsentState::Decided(_))
    }

    fn decision(&self) -> Decision {
        self.lock().decision()
    }
}

/// Show `prompt` on `host` and wait for the decision. An event loop that ends
/// without any trigger counts as a denial.
pub fn run_prompt<H: PromptHost + ?Sized>(host: &mut H, prompt: &PromptSpec) -> Decision {
    let sink = DecisionSink::new(ConsentRequest::new(prompt.requester.clone()));
    host.present(prompt, &sink);
    let decision = sink.decision();
    if !sink.is_decided() {
        tracing::debug!("prompt ended without a trigger; denying");
    }
    decision
}

/// The whole helper flow: parse the requester from `args` (the arguments
/// after the program name), bring the UI up, prompt once.
pub fn authorize<H, I, S>(host: &mut H, args: I) -> Outcome
where
    H: PromptHost + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    authorize_with(host, &SourceCatalog, args)
}

/// [`authorize`] with prompt text and fallback name taken from `translator`.
pub fn authorize_with<H, T, I, S>(host: &mut H, translator: &T, args: I) -> Outcome
where
    H: PromptHost + ?Sized,
    T: Translator + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let requester = parse_requester_name_with(translator, args);
    tracing::debug!(requester = %requester, "consent requested");
    let prompt = build_prompt_with(translator, &requester);

    if let Err(e) = host.initialize() {
        tracing::warn!(error = %e, "cannot show consent prompt");
        return Outcome::Error;
    }

    Outcome::from(run_prompt(host, &prompt))
}

/// Native modal dialog via `rfd`.
#[derive(Debug, Default)]
pub struct DialogHost;

impl PromptHost for DialogHost {
    fn initialize(&mut self) -> Result<(), UiInitError> {
        #[cfg(all(unix, not(target_os = "macos")))]
        if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none()
        {
            return Err(UiInitError(
                "no graphical session (DISPLAY and WAYLAND_DISPLAY are unset)".to_owned(),
            ));
        }
        Ok(())
    }

    fn present(&mut self, prompt: &PromptSpec, sink: &DecisionSink) {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(prompt.title.as_str())
            .set_description(format!("{}\n\n{}", prompt.instruction, prompt.body))
            .set_buttons(rfd::MessageButtons::OkCancelCustom(
                prompt.allow_label.clone(),
                prompt.deny_label.clone(),
            ))
            .show();
        sink.fire(trigger_for(&result, prompt));
    }
}

fn trigger_for(result: &rfd::MessageDialogResult, prompt: &PromptSpec) -> Trigger {
    match result {
        rfd::MessageDialogResult::Ok | rfd::MessageDialogResult::Yes => Trigger::Allow,
        rfd::MessageDialogResult::Custom(label) if *label == prompt.allow_label => Trigger::Allow,
        rfd::MessageDialogResult::Custom(label) if *label == prompt.deny_label => Trigger::Cancel,
        rfd::MessageDialogResult::Cancel | rfd::MessageDialogResult::No => Trigger::Cancel,
        _ => Trigger::Close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::prompt::build_prompt;

    #[test]
    fn dialog_results_map_to_triggers() {
        let prompt = build_prompt("PhotoEditor");
        let allow = rfd::MessageDialogResult::Custom("Allow".to_owned());
        let cancel = rfd::MessageDialogResult::Custom("Cancel".to_owned());
        let other = rfd::MessageDialogResult::Custom("Something else".to_owned());

        assert_eq!(trigger_for(&allow, &prompt), Trigger::Allow);
        assert_eq!(trigger_for(&cancel, &prompt), Trigger::Cancel);
        assert_eq!(trigger_for(&other, &prompt), Trigger::Close);
        assert_eq!(
            trigger_for(&rfd::MessageDialogResult::Cancel, &prompt),
            Trigger::Cancel
        );
    }

    #[test]
    fn late_fire_is_ignored() {
        let sink = DecisionSink::new(ConsentRequest::new("a"));
        let clone = sink.clone();
        assert!(sink.fire(Trigger::Allow));
        assert!(!clone.fire(Trigger::Close));
        assert_eq!(sink.decision(), Decision::Approved);
    }
}
