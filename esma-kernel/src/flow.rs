//! Submission state machine.

use esma_config::SessionId;
use thiserror::Error;
use tracing::debug;

/// States one submission can occupy.
///
/// No state is terminal; every submission ends back at [`Self::Idle`]
/// awaiting the next trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Awaiting a submission trigger.
    Idle,
    /// Checking the prompt invariant.
    Validating,
    /// A completion call is in flight. At most one per session.
    Generating,
    /// Output or an error notification has been routed to the surface.
    Displaying,
    /// The submission was rejected without any downstream call.
    Rejected,
}

impl SubmissionState {
    /// Returns `true` when a new submission can be accepted.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Events that drive submission transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// The submission trigger fired.
    Submit,
    /// Validation passed; begin generating.
    Accept,
    /// Validation failed; surface a warning.
    Reject,
    /// The completion call resolved, successfully or not.
    Complete,
    /// Return to idle for the next submission.
    Reset,
}

/// Per-session submission flow.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionFlow {
    session_id: SessionId,
    state: SubmissionState,
}

impl SubmissionFlow {
    /// Constructs an idle flow for the given session.
    #[must_use]
    pub const fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            state: SubmissionState::Idle,
        }
    }

    /// Returns the owning session identifier.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Applies a submission event, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] when the supplied event is
    /// not allowed from the current state.
    pub fn transition(&mut self, event: SubmissionEvent) -> FlowResult<SubmissionState> {
        let next = match (self.state, event) {
            (SubmissionState::Idle, SubmissionEvent::Submit) => Some(SubmissionState::Validating),
            (SubmissionState::Validating, SubmissionEvent::Accept) => {
                Some(SubmissionState::Generating)
            }
            (SubmissionState::Validating, SubmissionEvent::Reject) => {
                Some(SubmissionState::Rejected)
            }
            (SubmissionState::Generating, SubmissionEvent::Complete) => {
                Some(SubmissionState::Displaying)
            }
            (
                SubmissionState::Displaying | SubmissionState::Rejected,
                SubmissionEvent::Reset,
            ) => Some(SubmissionState::Idle),
            _ => None,
        };

        let Some(next_state) = next else {
            return Err(FlowError::InvalidTransition {
                session_id: self.session_id,
                from: self.state,
                event,
            });
        };

        debug!(
            session_id = %self.session_id,
            ?self.state,
            ?next_state,
            ?event,
            "submission transition"
        );
        self.state = next_state;

        Ok(self.state)
    }
}

/// Errors emitted by the submission flow.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Transition was not permitted from the current state.
    #[error("invalid submission transition from {from:?} via {event:?} for session {session_id}")]
    InvalidTransition {
        /// Session whose flow rejected the event.
        session_id: SessionId,
        /// State prior to the attempted transition.
        from: SubmissionState,
        /// Event that triggered the failure.
        event: SubmissionEvent,
    },
}

/// Result alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;
