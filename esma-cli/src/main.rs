//! EsMa command-line front end.
//!
//! Resolves credentials, probes the provider, establishes the session, and
//! runs a single essay submission through the interaction controller.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use esma_adapters::{CompletionBackend, OpenRouterClient, OpenRouterConfig};
use esma_config::{default_secrets_path, SecretStore, Session};
use esma_kernel::{InteractionController, SubmissionOutcome};
use esma_params::{
    AcademicLevel, EssayParameters, EssayType, PointOfView, SpeechRegister, WordTarget,
};

/// EsMa, your free essay maker tool.
#[derive(Debug, Parser)]
#[command(name = "esma", version, about)]
struct Cli {
    /// Path to the TOML secret store (defaults to ~/.esma/secrets.toml).
    #[arg(long)]
    secrets: Option<PathBuf>,

    /// Display name used in the greeting; defaults to $USER.
    #[arg(long)]
    user: Option<String>,

    /// Essay type (e.g. "Narrative", "Cause and Effect").
    #[arg(long, default_value = "General")]
    essay_type: EssayType,

    /// Education level the essay is pitched at.
    #[arg(long, default_value = "Undergraduate")]
    level: AcademicLevel,

    /// Register of speech.
    #[arg(long, default_value = "Formal")]
    register: SpeechRegister,

    /// Minimum word count (0..=1500 in steps of 100).
    #[arg(long, default_value = "500")]
    words: WordTarget,

    /// Narrative point of view (First/Second/Third).
    #[arg(long)]
    point_of_view: Option<PointOfView>,

    /// Essay topic.
    #[arg(long)]
    prompt: String,

    /// Extra instructions appended to the compiled request.
    #[arg(long)]
    extra: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();

    // Credential resolution and the connectivity probe are both fatal:
    // the form is never reachable without them.
    let secrets_path = cli.secrets.unwrap_or_else(default_secrets_path);
    let credentials = SecretStore::load(&secrets_path)?;

    let config = OpenRouterConfig::new()
        .with_api_key(credentials.api_key())
        .with_base_url(credentials.base_url())?;
    let client = OpenRouterClient::new(config)?;
    client
        .probe()
        .await
        .context("halting before any interaction")?;

    let user = cli
        .user
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "there".to_owned());
    let session = Session::new(user, credentials);
    info!("Hi {}, your free essay maker tool", session.user_name());

    let mut draft = EssayParameters::builder()
        .with_essay_type(cli.essay_type)
        .with_level(cli.level)
        .with_register(cli.register)
        .with_word_target(cli.words)
        .with_prompt(cli.prompt);
    if let Some(point_of_view) = cli.point_of_view {
        draft = draft.with_point_of_view(point_of_view);
    }
    if let Some(extra) = cli.extra {
        draft = draft.with_extra_instructions(extra);
    }

    let mut controller = InteractionController::new(&session, &client);
    info!("Generating your essay...");

    match controller.submit(draft).await? {
        SubmissionOutcome::Generated { essay } => {
            println!("{essay}");
            Ok(ExitCode::SUCCESS)
        }
        SubmissionOutcome::Rejected { warning } => {
            warn!("{warning}");
            Ok(ExitCode::FAILURE)
        }
        SubmissionOutcome::Failed { notification } => {
            error!("{notification}");
            Ok(ExitCode::FAILURE)
        }
    }
}
