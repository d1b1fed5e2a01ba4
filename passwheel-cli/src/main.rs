//! Passwheel CLI - offline token generator for rolling-window secrets.
//!
//! Prints the current token for a shared secret, suitable for command
//! substitution against a gated endpoint:
//!
//! curl -H "token: $(passwheel $SECRET)" http://localhost:8080/demo

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use passwheel_auth::{DEFAULT_INTERVAL, Passkey, Secret, SecretSpec};

/// Passwheel - rolling shared-secret token generator
#[derive(Parser)]
#[command(name = "passwheel", version, about)]
struct Cli {
    /// Shared secret (32-character base32, A-Z 2-7)
    #[arg(env = "PASSWHEEL_SECRET")]
    secret: Option<String>,

    /// Rotation interval in seconds (default 60)
    interval: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let Some(secret) = cli.secret else {
        print_usage();
        return Ok(());
    };

    let interval = cli
        .interval
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_INTERVAL);
    let passkey = Passkey::with_interval(SecretSpec::Encoded(secret), interval)
        .context("secret must be a 32-character base32 encoded string (A-Z, 2-7)")?;

    println!("{}", passkey.current());

    Ok(())
}

/// The no-argument invocation doubles as a secret generator; the printed
/// secret is fresh on every call.
fn print_usage() {
    println!();
    println!("usage: passwheel <SECRET> [INTERVAL]");
    println!(
        "  SECRET    32-character base32 shared secret, e.g. {}",
        Secret::generate().encode()
    );
    println!("  INTERVAL  rotation interval in seconds (default 60)");
    println!();
}
