//! Session lifecycle state machine.
//!
//! Valid transitions:
//! - AwaitingInput -> NewUpload (artwork uploaded)
//! - NewUpload -> AwaitingInput (upload bound, ready for questions)
//! - AwaitingInput -> ModelInvocation (question sent to the model)
//! - ModelInvocation -> Reconciled (answer written back)
//! - AwaitingInput -> Reconciled (answered without the model)
//! - Reconciled -> AwaitingInput (next question)
//! - Reconciled -> NewUpload (different artwork)
//! - AwaitingInput | NewUpload | Reconciled -> Reset, Reset -> AwaitingInput

use std::fmt;

use crate::error::ChatError;

/// Lifecycle state of one conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// A new artwork is being bound to the session.
    NewUpload,
    /// Waiting for the next user message.
    AwaitingInput,
    /// Waiting on the model client.
    ModelInvocation,
    /// The latest turn has been written back to the transcript.
    Reconciled,
    /// All session state is being cleared.
    Reset,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NewUpload => write!(f, "NewUpload"),
            SessionState::AwaitingInput => write!(f, "AwaitingInput"),
            SessionState::ModelInvocation => write!(f, "ModelInvocation"),
            SessionState::Reconciled => write!(f, "Reconciled"),
            SessionState::Reset => write!(f, "Reset"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::AwaitingInput, SessionState::NewUpload)
                | (SessionState::AwaitingInput, SessionState::ModelInvocation)
                | (SessionState::AwaitingInput, SessionState::Reconciled)
                | (SessionState::NewUpload, SessionState::AwaitingInput)
                | (SessionState::ModelInvocation, SessionState::Reconciled)
                | (SessionState::Reconciled, SessionState::AwaitingInput)
                | (SessionState::Reconciled, SessionState::NewUpload)
                | (SessionState::Reset, SessionState::AwaitingInput)
                // A turn dropped while the model call was pending
                | (SessionState::ModelInvocation, SessionState::AwaitingInput)
                | (SessionState::ModelInvocation, SessionState::Reset)
                | (SessionState::AwaitingInput, SessionState::Reset)
                | (SessionState::NewUpload, SessionState::Reset)
                | (SessionState::Reconciled, SessionState::Reset)
        )
    }
}

/// Validating state holder for one session.
///
/// Owned by the session and mutated through `&mut`, so no locking.
#[derive(Debug, Clone)]
pub struct SessionStateMachine {
    state: SessionState,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStateMachine {
    /// Create a state machine waiting for input.
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingInput,
        }
    }

    pub fn current(&self) -> SessionState {
        self.state
    }

    /// Attempt to transition to `target`, leaving the state unchanged on error.
    pub fn transition(&mut self, target: SessionState) -> Result<(), ChatError> {
        if self.state.can_transition_to(&target) {
            tracing::debug!("Session state: {} -> {}", self.state, target);
            self.state = target;
            Ok(())
        } else {
            Err(ChatError::InvalidTransition {
                from: self.state,
                to: target,
            })
        }
    }

    /// Move back to AwaitingInput if a turn was abandoned mid-call.
    ///
    /// Returns whether the session was stuck in ModelInvocation.
    pub fn recover_interrupted(&mut self) -> Result<bool, ChatError> {
        if self.state != SessionState::ModelInvocation {
            return Ok(false);
        }
        self.transition(SessionState::AwaitingInput)?;
        Ok(true)
    }

    /// Move to AwaitingInput if a finished turn is still showing.
    pub fn ready_for_input(&mut self) -> Result<(), ChatError> {
        if self.state == SessionState::Reconciled {
            self.transition(SessionState::AwaitingInput)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::NewUpload.to_string(), "NewUpload");
        assert_eq!(SessionState::AwaitingInput.to_string(), "AwaitingInput");
        assert_eq!(SessionState::ModelInvocation.to_string(), "ModelInvocation");
        assert_eq!(SessionState::Reconciled.to_string(), "Reconciled");
        assert_eq!(SessionState::Reset.to_string(), "Reset");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SessionState::AwaitingInput.can_transition_to(&SessionState::NewUpload));
        assert!(SessionState::NewUpload.can_transition_to(&SessionState::AwaitingInput));
        assert!(SessionState::AwaitingInput.can_transition_to(&SessionState::ModelInvocation));
        assert!(SessionState::ModelInvocation.can_transition_to(&SessionState::Reconciled));
        assert!(SessionState::AwaitingInput.can_transition_to(&SessionState::Reconciled));
        assert!(SessionState::Reconciled.can_transition_to(&SessionState::AwaitingInput));
        assert!(SessionState::Reconciled.can_transition_to(&SessionState::NewUpload));
        assert!(SessionState::Reset.can_transition_to(&SessionState::AwaitingInput));
    }

    #[test]
    fn test_invalid_transitions() {
        // No upload while the model call is in flight
        assert!(!SessionState::ModelInvocation.can_transition_to(&SessionState::NewUpload));

        // A new upload must settle before a question is answered
        assert!(!SessionState::NewUpload.can_transition_to(&SessionState::ModelInvocation));
        assert!(!SessionState::Reset.can_transition_to(&SessionState::NewUpload));

        // No self transitions
        for s in [
            SessionState::NewUpload,
            SessionState::AwaitingInput,
            SessionState::ModelInvocation,
            SessionState::Reconciled,
            SessionState::Reset,
        ] {
            assert!(!s.can_transition_to(&s), "{} -> {} allowed", s, s);
        }
    }

    #[test]
    fn test_state_machine_turn_cycle() {
        let mut sm = SessionStateMachine::new();
        assert_eq!(sm.current(), SessionState::AwaitingInput);

        sm.transition(SessionState::NewUpload).unwrap();
        sm.transition(SessionState::AwaitingInput).unwrap();
        sm.transition(SessionState::ModelInvocation).unwrap();
        sm.transition(SessionState::Reconciled).unwrap();
        assert_eq!(sm.current(), SessionState::Reconciled);

        sm.ready_for_input().unwrap();
        assert_eq!(sm.current(), SessionState::AwaitingInput);
    }

    #[test]
    fn test_ready_for_input_is_noop_when_waiting() {
        let mut sm = SessionStateMachine::new();
        sm.ready_for_input().unwrap();
        assert_eq!(sm.current(), SessionState::AwaitingInput);
    }

    #[test]
    fn test_invalid_transition_keeps_state() {
        let mut sm = SessionStateMachine::new();
        sm.transition(SessionState::ModelInvocation).unwrap();
        let err = sm.transition(SessionState::NewUpload).unwrap_err();
        assert!(matches!(
            err,
            ChatError::InvalidTransition {
                from: SessionState::ModelInvocation,
                to: SessionState::NewUpload
            }
        ));
        assert_eq!(sm.current(), SessionState::ModelInvocation);
    }

    #[test]
    fn test_recover_interrupted_call() {
        let mut sm = SessionStateMachine::new();
        assert!(!sm.recover_interrupted().unwrap());

        sm.transition(SessionState::ModelInvocation).unwrap();
        assert!(sm.recover_interrupted().unwrap());
        assert_eq!(sm.current(), SessionState::AwaitingInput);
    }

    #[test]
    fn test_reset_allowed_from_pending_call() {
        let mut sm = SessionStateMachine::new();
        sm.transition(SessionState::ModelInvocation).unwrap();
        sm.transition(SessionState::Reset).unwrap();
        sm.transition(SessionState::AwaitingInput).unwrap();
        assert_eq!(sm.current(), SessionState::AwaitingInput);
    }
}
