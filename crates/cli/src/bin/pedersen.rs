//! Pedersen CLI Tool
//!
//! Generator tables and interactive sigma-protocol sessions.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pedersen_cli::{common::init_tracing, generators::*, prove::*};

#[derive(Parser)]
#[command(name = "pedersen")]
#[command(about = "Pedersen commitment sigma protocols over secp256k1")]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first points of the value and blinding generator families
    Generators(GeneratorsArgs),
    /// Run batched vector-opening proofs
    Open(OpenArgs),
    /// Run the blinded inner-product argument
    InnerProduct(InnerProductArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generators(args) => {
            handle_generators_command(args).context("failed to derive generator tables")?;
        }
        Command::Open(args) => {
            handle_open_command(args).context("vector opening session failed")?;
        }
        Command::InnerProduct(args) => {
            handle_inner_product_command(args).context("inner product session failed")?;
        }
    }
    Ok(())
}
