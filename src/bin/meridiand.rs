//! meridiand — Meridian ledger daemon.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meridian::chain::NetworkKind;
use meridian::init::{run_init, InitOptions};

#[derive(Parser, Debug)]
#[command(name = "meridiand", version, about = "Meridian ledger daemon")]
struct Cli {
    /// Node home directory
    #[arg(long, global = true, env = "MERIDIAN_HOME", default_value = "./.meridian")]
    home: PathBuf,

    /// Use the test network profile instead of mainnet
    #[arg(short = 't', long, global = true)]
    testnet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize validator and node configuration files
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Human-readable name for this node
    moniker: String,

    /// Genesis file chain-id; randomly created when left blank
    #[arg(long)]
    chain_id: Option<String>,

    /// Interactive key recovery from a BIP-39 mnemonic
    #[arg(short = 'r', long)]
    recover: bool,

    /// Overwrite the genesis.json file
    #[arg(short = 'o', long)]
    overwrite: bool,

    /// Custom bond/fee denom, optional
    #[arg(long)]
    denom: Option<String>,

    /// The consensus timeout-commit value to start with (default is 5s for
    /// mainnet or testnet chain ids, 1s otherwise)
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout_commit: Option<Duration>,
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let network = if cli.testnet { NetworkKind::Testnet } else { NetworkKind::Mainnet };

    match cli.command {
        Command::Init(args) => {
            let opts = InitOptions {
                home: cli.home,
                moniker: args.moniker,
                network,
                chain_id: args.chain_id,
                recover: args.recover,
                overwrite: args.overwrite,
                denom: args.denom,
                timeout_commit: args.timeout_commit,
            };
            let stdin = io::stdin();
            let outcome = run_init(&opts, &mut stdin.lock())?;

            println!("chain id: {}", outcome.chain_id);
            println!("node id: {}", outcome.node_id);
            println!("genesis file created: {}", outcome.genesis_path.display());
        }
    }

    Ok(())
}
