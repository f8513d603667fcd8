// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: No subcommand means hook mode; git invokes the binary bare.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slipway")]
#[command(about = "Pre-receive hook that ships pushed commits to a remote deploy API")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit JSON lines instead of human output
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate environment configuration and print the effective settings
    Check,
}
