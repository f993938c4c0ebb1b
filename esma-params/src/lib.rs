//! Essay parameter model shared across the EsMa workspace.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod essay;

/// Validation error and result alias shared across the workspace.
pub use error::{ParamResult, ValidationError};
/// Essay parameter enums, the word target, and the validated aggregate.
pub use essay::{
    AcademicLevel, EssayParameters, EssayParametersBuilder, EssayType, PointOfView, SpeechRegister,
    WordTarget, RESERVED_PROMPT,
};
