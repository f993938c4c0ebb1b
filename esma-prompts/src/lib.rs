//! Prompt compilation for EsMa.
//!
//! Turns a validated [`esma_params::EssayParameters`] into the single
//! instruction string sent as the user turn of a completion request.

#![warn(missing_docs, clippy::pedantic)]

mod compiler;
mod system;

/// Deterministic instruction compilation.
pub use compiler::compile;
/// Fixed system instruction applied to every completion call.
pub use system::ESSAY_SYSTEM_INSTRUCTION;
