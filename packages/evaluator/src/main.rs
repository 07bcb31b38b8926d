use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::problem::TomlProblemStore;
use common::{EvaluationOutcome, EvaluationRequest, Language, ResourceLimits};
use evaluator::handlers::generate_output::generate_expected_outputs;
use evaluator::{Evaluator, EvaluatorAppConfig, ProfileName};
use judge_client::JudgeClient;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "evaluator", version, about = "Run code on the remote execution judge")]
struct Cli {
    /// Evaluation profile, overriding `evaluator.profile`.
    #[arg(long, global = true)]
    profile: Option<ProfileName>,

    /// Cancel outstanding evaluations after this many seconds.
    #[arg(long, global = true)]
    deadline_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single source file.
    Run {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        language: Language,
        /// File fed to the program on stdin. Empty when omitted.
        #[arg(long)]
        stdin: Option<PathBuf>,
        /// CPU time limit in seconds.
        #[arg(long, default_value_t = 2.0)]
        cpu_time: f64,
        /// Memory limit in kilobytes.
        #[arg(long, default_value_t = 128_000)]
        memory: u64,
    },
    /// Produce expected outputs for test inputs from a problem's reference solution.
    Generate {
        #[arg(long)]
        problem: String,
        #[arg(long = "input", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
        /// Overrides `evaluator.problems_dir`.
        #[arg(long)]
        problems_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(outcomes) if outcomes.iter().all(|o| o.ok) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Evaluation failed");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Vec<EvaluationOutcome>> {
    let config = EvaluatorAppConfig::load().context("Failed to load config")?;
    let profile_name = cli.profile.unwrap_or(config.evaluator.profile);
    let profile = config.evaluator.profile(profile_name).clone();
    info!(
        judge_url = %config.judge.url,
        profile = %profile_name,
        max_attempts = profile.max_attempts,
        poll_interval_ms = profile.poll_interval_ms,
        "Evaluator starting"
    );

    let client = JudgeClient::new(&config.judge).context("Failed to create judge client")?;
    let evaluator = Evaluator::new(Arc::new(client), profile);
    let cancel = cancellation(cli.deadline_secs);

    let outcomes = match cli.command {
        Command::Run {
            source,
            language,
            stdin,
            cpu_time,
            memory,
        } => {
            let source_code = read_file(&source).await?;
            let input = match stdin {
                Some(path) => read_file(&path).await?,
                None => String::new(),
            };
            let request = EvaluationRequest::new(
                source_code,
                input,
                language,
                ResourceLimits::new(cpu_time, memory),
            );
            vec![evaluator.evaluate(&request, &cancel).await?]
        }
        Command::Generate {
            problem,
            inputs,
            problems_dir,
        } => {
            let problems_dir =
                problems_dir.unwrap_or_else(|| PathBuf::from(&config.evaluator.problems_dir));
            let store = TomlProblemStore::new(problems_dir);

            let mut contents = Vec::with_capacity(inputs.len());
            for path in &inputs {
                contents.push(read_file(path).await?);
            }
            generate_expected_outputs(&store, &evaluator, &problem, &contents, &cancel).await?
        }
    };

    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }
    Ok(outcomes)
}

async fn read_file(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Token cancelled on Ctrl-C or once the optional deadline passes.
fn cancellation(deadline_secs: Option<u64>) -> CancellationToken {
    let cancel = CancellationToken::new();

    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling evaluations");
            on_signal.cancel();
        }
    });

    if let Some(secs) = deadline_secs {
        let on_deadline = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            warn!(deadline_secs = secs, "Deadline reached, cancelling evaluations");
            on_deadline.cancel();
        });
    }

    cancel
}
