//! The interaction controller: one submission at a time, end to end.

use esma_adapters::CompletionBackend;
use esma_config::Session;
use esma_params::EssayParametersBuilder;
use esma_prompts::compile;
use tracing::{debug, warn};

use crate::flow::{FlowResult, SubmissionEvent, SubmissionFlow, SubmissionState};

/// How a submission ended. Every variant leaves the controller idle again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed; no completion call was made.
    Rejected {
        /// User-visible warning text.
        warning: String,
    },
    /// The provider returned generated text; the output area was updated.
    Generated {
        /// Generated essay text, verbatim from the provider.
        essay: String,
    },
    /// The completion call failed; the output area keeps its prior content.
    Failed {
        /// User-visible error notification.
        notification: String,
    },
}

/// Drives a form draft through validation, compilation, and the completion
/// call.
///
/// Holds `&mut self` across the completion await, so a session can never
/// have two generation requests in flight.
#[derive(Debug)]
pub struct InteractionController<'a, B: CompletionBackend + ?Sized> {
    session: &'a Session,
    backend: &'a B,
    flow: SubmissionFlow,
    output: String,
}

impl<'a, B: CompletionBackend + ?Sized> InteractionController<'a, B> {
    /// Creates an idle controller bound to one session and backend.
    #[must_use]
    pub fn new(session: &'a Session, backend: &'a B) -> Self {
        Self {
            session,
            backend,
            flow: SubmissionFlow::new(session.id()),
            output: String::new(),
        }
    }

    /// Returns the session this controller serves.
    #[must_use]
    pub const fn session(&self) -> &Session {
        self.session
    }

    /// Returns the current submission state.
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    /// Returns the output area content: the most recently generated essay,
    /// or empty before the first success. Failures leave it untouched.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Runs one submission to completion.
    ///
    /// Blocks (from the caller's point of view) until the completion call
    /// resolves or fails; no retries, no cancellation.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::FlowError`] only if the state machine itself is
    /// driven out of order, which does not happen through this method.
    pub async fn submit(
        &mut self,
        draft: EssayParametersBuilder,
    ) -> FlowResult<SubmissionOutcome> {
        self.flow.transition(SubmissionEvent::Submit)?;

        let params = match draft.build() {
            Ok(params) => {
                self.flow.transition(SubmissionEvent::Accept)?;
                params
            }
            Err(err) => {
                self.flow.transition(SubmissionEvent::Reject)?;
                self.flow.transition(SubmissionEvent::Reset)?;
                warn!(session_id = %self.session.id(), %err, "submission rejected");
                return Ok(SubmissionOutcome::Rejected {
                    warning: err.to_string(),
                });
            }
        };

        let instruction = compile(&params);
        debug!(
            session_id = %self.session.id(),
            instruction_len = instruction.len(),
            "compiled essay instruction"
        );

        let outcome = match self.backend.generate(&instruction).await {
            Ok(essay) => {
                self.output.clone_from(&essay);
                SubmissionOutcome::Generated { essay }
            }
            Err(err) => {
                warn!(session_id = %self.session.id(), %err, "generation failed");
                SubmissionOutcome::Failed {
                    notification: format!("Failed to generate essay: {err}"),
                }
            }
        };

        // Both success and failure display something, then return to idle.
        self.flow.transition(SubmissionEvent::Complete)?;
        self.flow.transition(SubmissionEvent::Reset)?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use esma_adapters::{BackendMetadata, BackendResult, CompletionError};
    use esma_config::ProviderCredentials;
    use esma_params::{
        AcademicLevel, EssayParameters, EssayType, PointOfView, SpeechRegister, WordTarget,
        RESERVED_PROMPT,
    };

    use super::*;

    struct StubBackend {
        metadata: BackendMetadata,
        calls: AtomicUsize,
        scripted: Mutex<VecDeque<Result<String, String>>>,
    }

    impl StubBackend {
        fn scripted(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                metadata: BackendMetadata::new("stub", "stub-model"),
                calls: AtomicUsize::new(0),
                scripted: Mutex::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(str::to_owned).map_err(str::to_owned))
                        .collect(),
                ),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        fn metadata(&self) -> &BackendMetadata {
            &self.metadata
        }

        async fn generate(&self, _instruction: &str) -> BackendResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .scripted
                .lock()
                .expect("lock")
                .pop_front()
                .expect("scripted response available");
            next.map_err(CompletionError::generation)
        }

        async fn probe(&self) -> BackendResult<()> {
            Ok(())
        }
    }

    fn session() -> Session {
        Session::new(
            "Elley",
            ProviderCredentials::new("key", "https://openrouter.ai/api/v1"),
        )
    }

    fn valid_draft() -> EssayParametersBuilder {
        EssayParameters::builder()
            .with_essay_type(EssayType::Narrative)
            .with_level(AcademicLevel::Undergraduate)
            .with_register(SpeechRegister::Formal)
            .with_word_target(WordTarget::new(500).expect("valid"))
            .with_point_of_view(PointOfView::First)
            .with_prompt("a trip to the mountains")
            .with_extra_instructions("")
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_a_backend_call() {
        let session = session();
        let backend = StubBackend::scripted(vec![]);
        let mut controller = InteractionController::new(&session, &backend);

        let outcome = controller
            .submit(EssayParameters::builder().with_prompt(""))
            .await
            .expect("flow stays legal");

        assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
        assert_eq!(backend.calls(), 0);
        assert!(controller.state().is_idle());
    }

    #[tokio::test]
    async fn placeholder_prompt_is_rejected_without_a_backend_call() {
        let session = session();
        let backend = StubBackend::scripted(vec![]);
        let mut controller = InteractionController::new(&session, &backend);

        let outcome = controller
            .submit(EssayParameters::builder().with_prompt(RESERVED_PROMPT))
            .await
            .expect("flow stays legal");

        assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn successful_generation_updates_the_output_area() {
        let session = session();
        let backend = StubBackend::scripted(vec![Ok("Example essay text.")]);
        let mut controller = InteractionController::new(&session, &backend);

        let outcome = controller
            .submit(valid_draft())
            .await
            .expect("flow stays legal");

        assert_eq!(
            outcome,
            SubmissionOutcome::Generated {
                essay: "Example essay text.".to_owned()
            }
        );
        assert_eq!(controller.output(), "Example essay text.");
        assert_eq!(backend.calls(), 1);
        assert!(controller.state().is_idle());
    }

    #[tokio::test]
    async fn failed_generation_preserves_the_previous_output() {
        let session = session();
        let backend =
            StubBackend::scripted(vec![Ok("First essay."), Err("rate limited")]);
        let mut controller = InteractionController::new(&session, &backend);

        controller
            .submit(valid_draft())
            .await
            .expect("first submission");
        assert_eq!(controller.output(), "First essay.");

        let outcome = controller
            .submit(valid_draft())
            .await
            .expect("second submission");

        match outcome {
            SubmissionOutcome::Failed { notification } => {
                assert!(notification.contains("Failed to generate essay"));
                assert!(notification.contains("rate limited"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(controller.output(), "First essay.");
        assert_eq!(backend.calls(), 2);
        assert!(controller.state().is_idle());
    }

    #[tokio::test]
    async fn controller_can_run_repeated_submissions() {
        let session = session();
        let backend = StubBackend::scripted(vec![Ok("one"), Ok("two")]);
        let mut controller = InteractionController::new(&session, &backend);

        controller.submit(valid_draft()).await.expect("first");
        controller.submit(valid_draft()).await.expect("second");
        assert_eq!(controller.output(), "two");
    }
}
