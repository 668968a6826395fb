// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Arguments are parsed
// with `clap`; everything else is delegated to Layer 2.
//
//   1. `session` — interactive form (console.rs)
//   2. `predict` — one-shot prediction from --value flags
//   3. `check`   — load the artifact bundle and print the schema
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod console;

use std::io;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{CheckArgs, Commands, PredictArgs, SessionArgs};

use crate::application::advise_use_case::{AdviseUseCase, AdvisorConfig};
use crate::application::session::{Message, Severity};
use crate::domain::error::SubmitError;
use console::{print_message, render_view, Console};

#[derive(Parser, Debug)]
#[command(
    name = "crop-advisor",
    version = "0.1.0",
    about = "Recommend a crop, its expected yield and a fertilizer from soil and weather readings."
)]
pub struct Cli {
    /// The subcommand to run (session, predict or check)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the handler for the chosen subcommand.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Session(args) => run_session(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Check(args)   => run_check(args),
        }
    }
}

fn run_session(args: SessionArgs) -> Result<()> {
    let config: AdvisorConfig = args.artifacts.into();
    tracing::info!("Loading artifacts from: {}", config.artifacts_dir);

    let mut use_case = AdviseUseCase::new(&config)?;
    let stdin  = io::stdin();
    let stdout = io::stdout();
    Console::new(use_case.controller(), stdin.lock(), stdout.lock()).run()
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let config: AdvisorConfig = args.artifacts.into();
    let mut use_case = AdviseUseCase::new(&config)?;
    let controller = use_case.controller();

    for (name, raw) in &args.values {
        controller.input(name, raw.as_str())?;
    }

    let mut out = io::stdout().lock();
    match controller.submit() {
        Ok(_) => render_view(&mut out, &controller.view()),
        Err(SubmitError::Invalid(errors)) => {
            for e in &errors {
                eprintln!("  {e}");
            }
            bail!(SubmitError::Invalid(errors))
        }
        Err(e) => {
            print_message(&mut out, &Message::new(Severity::Error, e.to_string()))?;
            Err(e.into())
        }
    }
}

fn run_check(args: CheckArgs) -> Result<()> {
    let config: AdvisorConfig = args.artifacts.into();
    let use_case = AdviseUseCase::new(&config)?;
    let schema   = use_case.schema();

    println!("Artifacts in '{}' are consistent.", config.artifacts_dir);
    println!("\nFeatures ({}):", schema.len());
    for spec in schema.features() {
        let mark = if spec.defaulted { "  (default bound)" } else { "" };
        println!("  {:<16} [{}, {}]{mark}", spec.name, spec.bound.min, spec.bound.max);
    }

    let defaulted: Vec<&str> = schema.defaulted().map(|s| s.name.as_str()).collect();
    if !defaulted.is_empty() {
        println!("\nNo bounds given for: {}", defaulted.join(", "));
    }
    Ok(())
}
