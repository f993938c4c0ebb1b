//! Validation errors for essay submissions.

use thiserror::Error;

/// Result alias used by parameter constructors.
pub type ParamResult<T> = std::result::Result<T, ValidationError>;

/// Errors raised while validating a submission.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The essay prompt was empty after trimming.
    #[error("please enter a valid prompt")]
    EmptyPrompt,

    /// The essay prompt was left at the reserved placeholder value.
    #[error("please enter a valid prompt (got the placeholder `{placeholder}`)")]
    PlaceholderPrompt {
        /// The reserved placeholder that was submitted verbatim.
        placeholder: String,
    },

    /// The requested word count fell outside the accepted range.
    #[error("word target {value} is outside the accepted range 0..={max}")]
    WordTargetOutOfRange {
        /// The rejected word count.
        value: u16,
        /// Upper bound of the accepted range.
        max: u16,
    },

    /// The requested word count was not aligned to the slider step.
    #[error("word target {value} is not a multiple of {step}")]
    WordTargetStep {
        /// The rejected word count.
        value: u16,
        /// Required step between accepted values.
        step: u16,
    },

    /// A selector value could not be parsed from its label.
    #[error("unknown {field} value `{label}`")]
    UnknownLabel {
        /// Name of the selector being parsed.
        field: &'static str,
        /// The label that failed to match any variant.
        label: String,
    },
}
