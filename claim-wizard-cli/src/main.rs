mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use claim_wizard::{
    ClaimRecord, EXPORT_FILE_NAME, ExecutionStatus, InMemorySessionStorage,
    ProcessingClaimGenerator, SampleClaimGenerator, SimulatedProcessing, UploadPolicy,
    WizardCommand, WizardRunner, WizardStep, intake::DEFAULT_MAX_FILE_SIZE, read_attachments,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{CliCommand, HELP};

#[derive(Parser, Debug)]
#[command(name = "claim-wizard")]
#[command(about = "Step-by-step insurance claim intake in the terminal")]
struct Args {
    /// Directory the claim export is written to
    #[arg(long, env = "CLAIM_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Largest accepted attachment, in bytes
    #[arg(long, env = "CLAIM_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Length of the simulated processing run, in milliseconds
    #[arg(long, env = "CLAIM_PROCESSING_MS", default_value_t = 5_000)]
    processing_ms: u64,

    /// Log output: json or pretty
    #[arg(long, env = "LOG_FORMAT", default_value = "json")]
    log_format: String,
}

/// Initialize tracing on stderr so it never interleaves with the wizard prompts
fn init_tracing(log_format: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "claim_wizard=debug,claim_wizard_cli=info".into());

    match log_format {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

struct App {
    runner: WizardRunner,
    generator: Arc<ProcessingClaimGenerator<SampleClaimGenerator>>,
    policy: UploadPolicy,
    output_dir: PathBuf,
}

/// What the prompt loop should do after a command.
enum Flow {
    Continue,
    Generated(ClaimRecord),
    Quit,
}

impl App {
    async fn handle(&self, session_id: &str, command: CliCommand) -> Result<Flow> {
        let command = match command {
            CliCommand::Help => {
                println!("{HELP}");
                return Ok(Flow::Continue);
            }
            CliCommand::Quit => return Ok(Flow::Quit),
            CliCommand::Status { json } => {
                let session = self.runner.session(session_id).await?;
                if json {
                    let value = render::status_json(&session.id, &session.controller);
                    println!("{}", serde_json::to_string_pretty(&value)?);
                } else {
                    println!("{}", render::status(&session.controller));
                }
                return Ok(Flow::Continue);
            }
            CliCommand::Show | CliCommand::Edit(..) | CliCommand::Download => {
                println!("The claim is available once the wizard is complete.");
                return Ok(Flow::Continue);
            }
            CliCommand::Add(paths) => {
                WizardCommand::AddFiles(read_attachments(&paths, &self.policy).await?)
            }
            CliCommand::Remove(index) => WizardCommand::RemoveFile(index),
            CliCommand::Set(name, value) => WizardCommand::SetField(name, value),
            CliCommand::Next => WizardCommand::Advance,
            CliCommand::Back => WizardCommand::Retreat,
        };

        let was = self.runner.session(session_id).await?.controller.step();
        let watcher = (was == WizardStep::Review && matches!(command, WizardCommand::Advance))
            .then(|| self.spawn_progress_printer());

        let result = self.runner.apply(session_id, command).await;
        if let Some(watcher) = watcher {
            // A completed run always publishes 100 %, which ends the printer
            if matches!(&result, Ok(r) if r.status == ExecutionStatus::Completed) {
                let _ = watcher.await;
            } else {
                watcher.abort();
            }
        }
        let result = result?;

        match result.status {
            ExecutionStatus::Completed => {
                return Ok(match result.claim {
                    Some(claim) => Flow::Generated(claim),
                    None => Flow::Quit,
                });
            }
            ExecutionStatus::Blocked => {
                let session = self.runner.session(session_id).await?;
                println!(
                    "Cannot continue yet. Still needed: {}",
                    render::missing_requirements(&session.controller).join(", ")
                );
            }
            ExecutionStatus::WaitingForInput => {
                let session = self.runner.session(session_id).await?;
                if result.step != was {
                    println!("{}", render::status(&session.controller));
                } else if result.can_advance {
                    println!("OK. Ready to continue ('next').");
                } else {
                    println!("OK.");
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn spawn_progress_printer(&self) -> tokio::task::JoinHandle<()> {
        let mut progress = self.generator.subscribe();
        let script = self.generator.simulation().clone();
        println!("\n== Processing Your Claim ==");
        tokio::spawn(async move {
            let mut last_phase = usize::MAX;
            while progress.changed().await.is_ok() {
                let snapshot = *progress.borrow_and_update();
                if snapshot.phase != last_phase || snapshot.is_finished() {
                    println!("{}", render::processing_line(&script, snapshot));
                    last_phase = snapshot.phase;
                }
                if snapshot.is_finished() {
                    break;
                }
            }
        })
    }

    async fn review(&self, claim: &mut ClaimRecord, command: CliCommand) -> Result<Flow> {
        match command {
            CliCommand::Help => println!("{HELP}"),
            CliCommand::Quit => return Ok(Flow::Quit),
            CliCommand::Show | CliCommand::Status { .. } => println!("{}", render::claim(claim)),
            CliCommand::Edit(section, text) => {
                claim.update_section(section, text);
                info!(section = section.as_str(), "Claim section edited");
                println!("Saved {}.", section.heading());
            }
            CliCommand::Download => {
                let path = self.output_dir.join(EXPORT_FILE_NAME);
                tokio::fs::write(&path, claim.to_plain_text()).await?;
                info!(path = %path.display(), "Claim exported");
                println!("Claim written to {}", path.display());
            }
            _ => println!("The wizard is complete; use show, edit, download or quit."),
        }
        Ok(Flow::Continue)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_format);

    let simulation =
        SimulatedProcessing::default().with_duration(Duration::from_millis(args.processing_ms));
    let generator = Arc::new(ProcessingClaimGenerator::new(SampleClaimGenerator, simulation));
    let app = App {
        runner: WizardRunner::new(Arc::new(InMemorySessionStorage::new()), generator.clone()),
        generator,
        policy: UploadPolicy::default().with_max_file_size(args.max_file_size),
        output_dir: args.output_dir,
    };

    let session = app.runner.start().await?;
    info!(session_id = %session.id, "Claim wizard ready");
    println!("{}", render::status(&session.controller));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut claim: Option<ClaimRecord> = None;

    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e:#}");
                continue;
            }
        };

        let flow = match claim.as_mut() {
            Some(claim) => app.review(claim, command).await,
            None => app.handle(&session.id, command).await,
        };

        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Generated(generated)) => {
                println!("{}", render::claim(&generated));
                println!("\nUse edit, download or quit.");
                claim = Some(generated);
            }
            Ok(Flow::Quit) => break,
            Err(e) => {
                error!(error = %e, "Command failed");
                println!("Error: {e:#}");
            }
        }
    }

    info!("Claim wizard finished");
    Ok(())
}
