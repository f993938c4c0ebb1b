//! Compilation of essay parameters into one instruction string.

use esma_params::EssayParameters;

/// Compiles a validated submission into the user-turn instruction.
///
/// Pure and deterministic: the same parameters always yield the same
/// string. Clause order is fixed: essay type, point of view (clause
/// omitted entirely when unset), education level, speech register,
/// minimum word count, topic, trailing extra-task clause. The trailing
/// clause is always present, even when no extra instructions were given,
/// and a zero word target interpolates literally.
#[must_use]
pub fn compile(params: &EssayParameters) -> String {
    let point_of_view = params
        .point_of_view()
        .map(|pov| format!("point of view: {pov} point of view, "))
        .unwrap_or_default();

    format!(
        "Write a comprehensive {essay_type}, {point_of_view}education level: {level}, \
         type of speech: {register}, number of minimum words: {words}, \
         essay about: {topic}. With extra task {extra}",
        essay_type = params.essay_type(),
        level = params.level(),
        register = params.register(),
        words = params.word_target(),
        topic = params.prompt(),
        extra = params.extra_instructions(),
    )
}
