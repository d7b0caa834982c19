use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use bridge_types::{AccountId, NetworkPassphrase};

#[derive(Parser)]
#[command(
    name = "bridge",
    about = "Bridge transaction builder: assemble, sign, and inspect transactions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the builder HTTP server
    Serve(ServeArgs),
    /// Build a signed envelope from a JSON request file
    Build(BuildArgs),
    /// Decode a base64 envelope
    Decode(DecodeArgs),
    /// Generate a signing key
    Keygen,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the configured listen address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Request file, or `-` for stdin
    pub file: PathBuf,
    /// `testnet`, `public`, or a literal passphrase
    #[arg(long, default_value = "testnet", value_parser = parse_network)]
    pub network: NetworkPassphrase,
    /// Look sequence numbers up on this Horizon server
    #[arg(long, conflicts_with = "sequence_from")]
    pub horizon: Option<String>,
    /// Offline sequence number for an account, as ACCOUNT=SEQUENCE
    #[arg(long = "sequence-from", value_parser = parse_sequence_entry)]
    pub sequence_from: Vec<(AccountId, String)>,
    /// Horizon request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Base64 envelope
    pub envelope: String,
}

pub fn parse_network(s: &str) -> Result<NetworkPassphrase, String> {
    match s {
        "testnet" => Ok(NetworkPassphrase::testnet()),
        "public" => Ok(NetworkPassphrase::public()),
        other => NetworkPassphrase::new(other).map_err(|e| e.to_string()),
    }
}

pub fn parse_sequence_entry(s: &str) -> Result<(AccountId, String), String> {
    let (account, sequence) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ACCOUNT=SEQUENCE, got {s:?}"))?;
    let account = AccountId::parse(account.trim()).map_err(|e| e.to_string())?;
    Ok((account, sequence.trim().to_owned()))
}
