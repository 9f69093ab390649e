//! JCPAO directory CLI - database migrations and roster export.
//!
//! # Usage
//!
//! ```bash
//! # Create the access log and session tables
//! jcpao-cli migrate
//!
//! # Print every attorney
//! jcpao-cli roster
//!
//! # Print Special Victims Unit trial team leaders named Smith
//! jcpao-cli roster --position TTL --unit SVU --search smith
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `roster` - Print the (optionally filtered) roster as tab-separated text

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jcpao-cli")]
#[command(author, version, about = "JCPAO directory CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (access logs and session store)
    Migrate,
    /// Print the roster, filtered like the directory sidebar
    Roster(commands::roster::RosterArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jcpao_cli=info,jcpao_directory=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Roster(args) => commands::roster::run(&args).await,
    }
}
