//! Interaction kernel for EsMa.
//!
//! Owns the submission state machine and the controller that takes a form
//! draft through validation, prompt compilation, and the completion call.

#![warn(missing_docs, clippy::pedantic)]

mod controller;
mod flow;

/// The interaction controller and per-submission outcome.
pub use controller::{InteractionController, SubmissionOutcome};
/// Submission state machine types.
pub use flow::{FlowError, FlowResult, SubmissionEvent, SubmissionFlow, SubmissionState};
