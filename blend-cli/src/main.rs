//! CLI to deploy and operate Blend Protocol contracts

use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Account cursor lookup
pub mod account;

/// Address book access
pub mod address;

/// Address book storage
pub mod address_book;

/// Classic operation submission
pub mod classic;

/// Network configuration
pub mod config;

/// Shared state of a command run
pub mod context;

/// Soroban operation invocation
pub mod invoke;

/// Account key generation
pub mod keygen;

/// Pre-signed envelope submission
pub mod submit;


/// CLI commands available
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prints the current sequence of an account
    Account(account::Args),

    /// Simulates, signs and submits a soroban operation, printing its
    /// return value as hex
    Invoke(invoke::Args),

    /// Signs and submits a classic operation
    Classic(classic::Args),

    /// Submits an already signed envelope and waits for its result
    Submit(submit::Args),

    /// Reads or writes address book entries
    #[command(subcommand)]
    Address(address::Command),

    /// Generates a new account secret
    Keygen,
}

#[derive(Debug, Parser)]
#[clap(name = "blend")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
#[clap(about = "Deploy and operate Blend Protocol contracts on Soroban")]
#[clap(long_about = None)]
/// Cli command data type
pub struct Cli {
    /// JSON network config; testnet defaults when absent
    #[arg(long, global = true, value_name = "FILE", env = "BLEND_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides the rpc url of the network config
    #[arg(long, global = true, env = "BLEND_RPC_URL")]
    rpc_url: Option<String>,

    /// Overrides the network passphrase of the network config
    #[arg(long, global = true, env = "BLEND_NETWORK_PASSPHRASE")]
    passphrase: Option<String>,

    /// JSON file holding named contract ids and wasm hashes
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "BLEND_ADDRESS_BOOK",
        default_value = "address-book.json"
    )]
    address_book: PathBuf,

    /// Raises log verbosity, repeat for more
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// main function of blend cli binary
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    init_tracing(args.verbose);

    let ctx = context::Context::new(
        args.config.as_deref(),
        args.rpc_url,
        args.passphrase,
        args.address_book,
    )?;

    match args.command {
        Command::Account(args) => account::run(&ctx, args).await,
        Command::Invoke(args) => invoke::run(&ctx, args).await,
        Command::Classic(args) => classic::run(&ctx, args).await,
        Command::Submit(args) => submit::run(&ctx, args).await,
        Command::Address(cmd) => address::run(&ctx, cmd),
        Command::Keygen => keygen::run(),
    }
}
