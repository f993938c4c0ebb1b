//! Essay parameter types and the validated submission aggregate.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParamResult, ValidationError};

/// Reserved placeholder value rejected at submission time, exactly like an
/// empty prompt.
pub const RESERVED_PROMPT: &str = "Generated prompt";

/// Rhetorical form of the requested essay.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EssayType {
    /// Argues a position with evidence.
    Argumentative,
    /// Convinces the reader to adopt a view.
    Persuasive,
    /// Explains a topic without taking sides.
    Explanatory,
    /// Paints a detailed picture of a subject.
    Descriptive,
    /// Tells a story.
    Narrative,
    /// Traces causes to their effects.
    CauseAndEffect,
    /// Walks through how something is done.
    ProcessAnalysis,
    /// Weighs similarities and differences.
    CompareContrast,
    /// Evaluates a work critically.
    Critique,
    /// Defines a concept at length.
    Definition,
    /// No particular form.
    General,
}

impl EssayType {
    /// All selectable essay types, in form order.
    pub const ALL: [Self; 11] = [
        Self::Argumentative,
        Self::Persuasive,
        Self::Explanatory,
        Self::Descriptive,
        Self::Narrative,
        Self::CauseAndEffect,
        Self::ProcessAnalysis,
        Self::CompareContrast,
        Self::Critique,
        Self::Definition,
        Self::General,
    ];

    /// Returns the human-readable label interpolated into instructions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Argumentative => "Argumentative",
            Self::Persuasive => "Persuasive",
            Self::Explanatory => "Explanatory",
            Self::Descriptive => "Descriptive",
            Self::Narrative => "Narrative",
            Self::CauseAndEffect => "Cause and Effect",
            Self::ProcessAnalysis => "Process Analysis",
            Self::CompareContrast => "Compare/Contrast",
            Self::Critique => "Critique",
            Self::Definition => "Definition",
            Self::General => "General",
        }
    }
}

impl Display for EssayType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EssayType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownLabel {
                field: "essay type",
                label: s.to_owned(),
            })
    }
}

/// Education level the essay should be pitched at.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AcademicLevel {
    /// Elementary school.
    Elementary,
    /// Junior high school.
    JuniorHigh,
    /// Senior high school.
    SeniorHigh,
    /// Undergraduate study.
    Undergraduate,
    /// Graduate study.
    Graduate,
    /// Postgraduate study.
    Postgraduate,
    /// Doctoral candidate.
    PhD,
    /// Masters degree.
    Masters,
    /// Doctorate degree.
    Doctorate,
}

impl AcademicLevel {
    /// All selectable levels, in form order.
    pub const ALL: [Self; 9] = [
        Self::Elementary,
        Self::JuniorHigh,
        Self::SeniorHigh,
        Self::Undergraduate,
        Self::Graduate,
        Self::Postgraduate,
        Self::PhD,
        Self::Masters,
        Self::Doctorate,
    ];

    /// Returns the human-readable label interpolated into instructions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Elementary => "Elementary",
            Self::JuniorHigh => "Junior High",
            Self::SeniorHigh => "Senior High",
            Self::Undergraduate => "Undergraduate",
            Self::Graduate => "Graduate",
            Self::Postgraduate => "Postgraduate",
            Self::PhD => "PhD",
            Self::Masters => "Masters",
            Self::Doctorate => "Doctorate",
        }
    }
}

impl Display for AcademicLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AcademicLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownLabel {
                field: "academic level",
                label: s.to_owned(),
            })
    }
}

/// Register of speech the essay should be written in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SpeechRegister {
    /// Everyday conversational tone.
    Casual,
    /// Close, personal tone.
    Intimate,
    /// Formal academic tone.
    Formal,
    /// Fixed ceremonial language.
    Frozen,
    /// Semi-formal advisory tone.
    Consultative,
}

impl SpeechRegister {
    /// All selectable registers, in form order.
    pub const ALL: [Self; 5] = [
        Self::Casual,
        Self::Intimate,
        Self::Formal,
        Self::Frozen,
        Self::Consultative,
    ];

    /// Returns the human-readable label interpolated into instructions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Intimate => "Intimate",
            Self::Formal => "Formal",
            Self::Frozen => "Frozen",
            Self::Consultative => "Consultative",
        }
    }
}

impl Display for SpeechRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeechRegister {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownLabel {
                field: "speech register",
                label: s.to_owned(),
            })
    }
}

/// Narrative point of view. Optional in a submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PointOfView {
    /// First person.
    First,
    /// Second person.
    Second,
    /// Third person.
    Third,
}

impl PointOfView {
    /// Returns the human-readable label interpolated into instructions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Third => "Third",
        }
    }
}

impl Display for PointOfView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PointOfView {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("first") => Ok(Self::First),
            v if v.eq_ignore_ascii_case("second") => Ok(Self::Second),
            v if v.eq_ignore_ascii_case("third") => Ok(Self::Third),
            _ => Err(ValidationError::UnknownLabel {
                field: "point of view",
                label: s.to_owned(),
            }),
        }
    }
}

/// Minimum word count requested for the essay.
///
/// Mirrors the form slider: `0..=1500` in steps of 100. Zero is a valid
/// target and interpolates literally into the compiled instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordTarget(u16);

impl WordTarget {
    /// Largest accepted word count.
    pub const MAX: u16 = 1500;

    /// Step between accepted word counts.
    pub const STEP: u16 = 100;

    /// Creates a word target, enforcing the slider range and step.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::WordTargetOutOfRange`] above [`Self::MAX`]
    /// and [`ValidationError::WordTargetStep`] for values off the step grid.
    pub fn new(value: u16) -> ParamResult<Self> {
        if value > Self::MAX {
            return Err(ValidationError::WordTargetOutOfRange {
                value,
                max: Self::MAX,
            });
        }
        if value % Self::STEP != 0 {
            return Err(ValidationError::WordTargetStep {
                value,
                step: Self::STEP,
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw word count.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Display for WordTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for WordTarget {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u16>()
            .map_err(|_| ValidationError::UnknownLabel {
                field: "word target",
                label: s.to_owned(),
            })?;
        Self::new(value)
    }
}

/// A validated essay submission.
///
/// Constructed through [`EssayParametersBuilder`]; `build()` is the single
/// validation point for the prompt invariant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EssayParameters {
    essay_type: EssayType,
    level: AcademicLevel,
    register: SpeechRegister,
    word_target: WordTarget,
    point_of_view: Option<PointOfView>,
    prompt: String,
    extra_instructions: Option<String>,
}

impl EssayParameters {
    /// Returns a builder seeded with the form defaults.
    #[must_use]
    pub fn builder() -> EssayParametersBuilder {
        EssayParametersBuilder::new()
    }

    /// Returns the requested essay type.
    #[must_use]
    pub const fn essay_type(&self) -> EssayType {
        self.essay_type
    }

    /// Returns the requested education level.
    #[must_use]
    pub const fn level(&self) -> AcademicLevel {
        self.level
    }

    /// Returns the requested speech register.
    #[must_use]
    pub const fn register(&self) -> SpeechRegister {
        self.register
    }

    /// Returns the requested minimum word count.
    #[must_use]
    pub const fn word_target(&self) -> WordTarget {
        self.word_target
    }

    /// Returns the requested point of view, if one was selected.
    #[must_use]
    pub const fn point_of_view(&self) -> Option<PointOfView> {
        self.point_of_view
    }

    /// Returns the essay topic, trimmed.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the extra instructions, or an empty string when none were
    /// given. Always interpolated into the trailing clause of the compiled
    /// instruction.
    #[must_use]
    pub fn extra_instructions(&self) -> &str {
        self.extra_instructions.as_deref().unwrap_or_default()
    }
}

/// Builder mirroring the submission form; one instance per submission.
#[derive(Clone, Debug)]
pub struct EssayParametersBuilder {
    essay_type: EssayType,
    level: AcademicLevel,
    register: SpeechRegister,
    word_target: WordTarget,
    point_of_view: Option<PointOfView>,
    prompt: String,
    extra_instructions: Option<String>,
}

impl EssayParametersBuilder {
    /// Creates a builder with the form defaults and an empty prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            essay_type: EssayType::General,
            level: AcademicLevel::Undergraduate,
            register: SpeechRegister::Formal,
            word_target: WordTarget(500),
            point_of_view: None,
            prompt: String::new(),
            extra_instructions: None,
        }
    }

    /// Sets the essay type.
    #[must_use]
    pub const fn with_essay_type(mut self, essay_type: EssayType) -> Self {
        self.essay_type = essay_type;
        self
    }

    /// Sets the education level.
    #[must_use]
    pub const fn with_level(mut self, level: AcademicLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the speech register.
    #[must_use]
    pub const fn with_register(mut self, register: SpeechRegister) -> Self {
        self.register = register;
        self
    }

    /// Sets the minimum word count.
    #[must_use]
    pub const fn with_word_target(mut self, word_target: WordTarget) -> Self {
        self.word_target = word_target;
        self
    }

    /// Selects a point of view.
    #[must_use]
    pub const fn with_point_of_view(mut self, point_of_view: PointOfView) -> Self {
        self.point_of_view = Some(point_of_view);
        self
    }

    /// Sets the essay topic.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the optional extra instructions.
    #[must_use]
    pub fn with_extra_instructions(mut self, extra: impl Into<String>) -> Self {
        self.extra_instructions = Some(extra.into());
        self
    }

    /// Validates the submission.
    ///
    /// The prompt must be non-empty after trimming and must not equal the
    /// reserved placeholder [`RESERVED_PROMPT`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPrompt`] or
    /// [`ValidationError::PlaceholderPrompt`] on an invalid prompt.
    pub fn build(self) -> ParamResult<EssayParameters> {
        let prompt = self.prompt.trim().to_owned();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        if prompt == RESERVED_PROMPT {
            return Err(ValidationError::PlaceholderPrompt {
                placeholder: RESERVED_PROMPT.to_owned(),
            });
        }

        Ok(EssayParameters {
            essay_type: self.essay_type,
            level: self.level,
            register: self.register,
            word_target: self.word_target,
            point_of_view: self.point_of_view,
            prompt,
            extra_instructions: self.extra_instructions,
        })
    }
}

impl Default for EssayParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        let parsed = "cause and effect".parse::<EssayType>().expect("parse");
        assert_eq!(parsed, EssayType::CauseAndEffect);

        let parsed = "JUNIOR HIGH".parse::<AcademicLevel>().expect("parse");
        assert_eq!(parsed, AcademicLevel::JuniorHigh);

        let parsed = "frozen".parse::<SpeechRegister>().expect("parse");
        assert_eq!(parsed, SpeechRegister::Frozen);
    }

    #[test]
    fn unknown_label_errors() {
        let err = "Villanelle".parse::<EssayType>().expect_err("no such type");
        assert!(matches!(err, ValidationError::UnknownLabel { .. }));
    }

    #[test]
    fn selector_variant_counts_match_form() {
        assert_eq!(EssayType::ALL.len(), 11);
        assert_eq!(AcademicLevel::ALL.len(), 9);
        assert_eq!(SpeechRegister::ALL.len(), 5);
    }

    #[test]
    fn word_target_accepts_bounds() {
        assert_eq!(WordTarget::new(0).expect("zero is valid").get(), 0);
        assert_eq!(WordTarget::new(1500).expect("max is valid").get(), 1500);
    }

    #[test]
    fn word_target_rejects_out_of_range_and_off_step() {
        let err = WordTarget::new(1600).expect_err("above max");
        assert!(matches!(err, ValidationError::WordTargetOutOfRange { .. }));

        let err = WordTarget::new(250).expect_err("off the step grid");
        assert!(matches!(err, ValidationError::WordTargetStep { .. }));
    }

    #[test]
    fn build_rejects_empty_prompt() {
        let err = EssayParameters::builder()
            .with_prompt("   ")
            .build()
            .expect_err("whitespace prompt");
        assert!(matches!(err, ValidationError::EmptyPrompt));
    }

    #[test]
    fn build_rejects_placeholder_prompt() {
        let err = EssayParameters::builder()
            .with_prompt(RESERVED_PROMPT)
            .build()
            .expect_err("placeholder prompt");
        assert!(matches!(err, ValidationError::PlaceholderPrompt { .. }));
    }

    #[test]
    fn build_trims_prompt() {
        let params = EssayParameters::builder()
            .with_prompt("  a trip to the mountains  ")
            .build()
            .expect("valid prompt");
        assert_eq!(params.prompt(), "a trip to the mountains");
    }

    #[test]
    fn defaults_have_no_point_of_view() {
        let params = EssayParameters::builder()
            .with_prompt("topic")
            .build()
            .expect("valid");
        assert!(params.point_of_view().is_none());
        assert_eq!(params.extra_instructions(), "");
    }
}
