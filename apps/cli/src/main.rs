//! hoog: generate a multicast hook for a single-method Go interface
//!
//! Usage:
//!   hoog -src ./internal/instance.Callback -dst ./internal/cbhook [-safe] [-fmt gofmt|goimports|noop]

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use hoog_codegen::{generate_hook, plan_hook};
use tracing::debug;

use cli::Args;

fn main() -> ExitCode {
    let args = match Args::parse_go_style(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if args.version {
        println!("hoog version: {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", report(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.generation_config();
    debug!(?config, "Parsed arguments");

    if args.plan {
        let template = plan_hook(&config)?;
        let json = serde_json::to_string_pretty(&template).context("serializing plan")?;
        println!("{json}");
        return Ok(());
    }

    let path = generate_hook(&config)?;
    debug!(path = %path.display(), "Done");

    Ok(())
}

/// Join the error chain, skipping causes whose text the previous messages
/// already include
fn report(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,hoog=debug,hoog_codegen=debug,hoog_types=debug,hoog_format=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
