//! The consent decision state machine and its process exit codes.

use std::process::ExitCode;

/// A UI event that can end the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The affirmative button.
    Allow,
    /// The negative button.
    Cancel,
    /// The window was dismissed without a choice.
    Close,
}

/// Outcome of a shown prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Denied,
}

/// Where a [`ConsentRequest`] stands. `Error` is not representable here: it can
/// only happen before a prompt exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Presented,
    Decided(Decision),
}

/// One authorization decision in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRequest {
    requester: String,
    state: ConsentState,
}

impl ConsentRequest {
    #[must_use]
    pub fn new(requester: impl Into<String>) -> Self {
        Self {
            requester: requester.into(),
            state: ConsentState::Presented,
        }
    }

    #[must_use]
    pub fn requester(&self) -> &str {
        &self.requester
    }

    #[must_use]
    pub fn state(&self) -> ConsentState {
        self.state
    }

    /// Apply a trigger. Only the first one has an effect; returns whether this
    /// one did.
    pub fn apply(&mut self, trigger: Trigger) -> bool {
        if self.state != ConsentState::Presented {
            tracing::debug!(?trigger, "ignoring trigger after decision");
            return false;
        }
        let decision = match trigger {
            Trigger::Allow => Decision::Approved,
            Trigger::Cancel | Trigger::Close => Decision::Denied,
        };
        self.state = ConsentState::Decided(decision);
        true
    }

    /// The authoritative decision. Still `Presented` means nothing fired, which
    /// is a denial.
    #[must_use]
    pub fn decision(&self) -> Decision {
        match self.state {
            ConsentState::Decided(decision) => decision,
            ConsentState::Presented => Decision::Denied,
        }
    }
}

/// Terminal result reported to whatever spawned the helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Outcome {
    Approved = 0,
    Denied = 1,
    Error = 2,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::Error => "error",
        }
    }

    /// Map an observed exit status back to an outcome. Any other value is a
    /// helper fault, not a fourth outcome.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Approved),
            1 => Some(Self::Denied),
            2 => Some(Self::Error),
            _ => None,
        }
    }
}

impl From<Decision> for Outcome {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Denied => Self::Denied,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_presented_and_denies_by_default() {
        let request = ConsentRequest::new("PhotoEditor");
        assert_eq!(request.state(), ConsentState::Presented);
        assert_eq!(request.decision(), Decision::Denied);
    }

    #[test]
    fn allow_approves() {
        let mut request = ConsentRequest::new("PhotoEditor");
        assert!(request.apply(Trigger::Allow));
        assert_eq!(request.decision(), Decision::Approved);
    }

    #[test]
    fn close_and_cancel_are_equivalent() {
        let mut closed = ConsentRequest::new("a");
        let mut cancelled = ConsentRequest::new("a");
        closed.apply(Trigger::Close);
        cancelled.apply(Trigger::Cancel);
        assert_eq!(closed, cancelled);
        assert_eq!(closed.decision(), Decision::Denied);
    }

    #[test]
    fn only_first_trigger_counts() {
        let mut request = ConsentRequest::new("a");
        assert!(request.apply(Trigger::Cancel));
        assert!(!request.apply(Trigger::Allow));
        assert!(!request.apply(Trigger::Close));
        assert_eq!(request.decision(), Decision::Denied);

        let mut request = ConsentRequest::new("a");
        assert!(request.apply(Trigger::Allow));
        assert!(!request.apply(Trigger::Close));
        assert_eq!(request.decision(), Decision::Approved);
    }

    #[test]
    fn exit_codes_are_fixed() {
        assert_eq!(Outcome::Approved.code(), 0);
        assert_eq!(Outcome::Denied.code(), 1);
        assert_eq!(Outcome::Error.code(), 2);
        assert_eq!(Outcome::from(Decision::Approved), Outcome::Approved);
        assert_eq!(Outcome::from(Decision::Denied), Outcome::Denied);
    }

    #[test]
    fn unknown_codes_are_not_outcomes() {
        for code in 0..3 {
            let outcome = Outcome::from_code(code).expect("known code");
            assert_eq!(i32::from(outcome.code()), code);
        }
        assert_eq!(Outcome::from_code(3), None);
        assert_eq!(Outcome::from_code(-1), None);
        assert_eq!(Outcome::from_code(101), None);
    }
}
