use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;

use bridge_builder::{BuilderConfig, TransactionBuilder};
use bridge_crypto::SigningKey;
use bridge_horizon::{AccountLoader, HorizonClient, StaticAccountLoader};
use bridge_server::{BridgeServer, ServerConfig};
use bridge_tx::TransactionEnvelope;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Build(args) => cmd_build(args, &cli.format).await,
        Command::Decode(args) => cmd_decode(args, &cli.format),
        Command::Keygen => cmd_keygen(&cli.format),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    println!(
        "{} bridge server on {} (horizon: {})",
        "▶".green().bold(),
        config.bind_addr.to_string().bold(),
        config.horizon_url.blue()
    );
    BridgeServer::new(config)?.serve().await?;
    Ok(())
}

async fn cmd_build(args: BuildArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let body = read_input(&args.file)?;

    let loader: Arc<dyn AccountLoader> = match &args.horizon {
        Some(url) => Arc::new(HorizonClient::new(
            url.clone(),
            Duration::from_secs(args.timeout),
        )?),
        None => Arc::new(
            args.sequence_from
                .into_iter()
                .fold(StaticAccountLoader::new(), |loader, (account, sequence)| {
                    loader.with_account(account, sequence)
                }),
        ),
    };
    let builder = TransactionBuilder::new(BuilderConfig::new(args.network), loader);

    match builder.build_json(&body).await {
        Ok(response) => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
                OutputFormat::Text => println!("{}", response.transaction_envelope),
            }
            Ok(())
        }
        Err(e) => {
            let response = e.to_response();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
                OutputFormat::Text => {
                    eprintln!("{} {}", "✗".red().bold(), response.message);
                    if let Some(data) = &response.data {
                        eprintln!("  field: {}", data.name.yellow());
                        if !data.value.is_empty() {
                            eprintln!("  value: {}", data.value);
                        }
                    }
                }
            }
            Err(e.into())
        }
    }
}

fn cmd_decode(args: DecodeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let envelope =
        TransactionEnvelope::from_base64(&args.envelope).context("decoding envelope")?;
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    let tx = &envelope.tx;
    println!("Transaction {}", tx.hash_hex()?.yellow().bold());
    println!("  Source:   {}", tx.source.to_string().cyan());
    println!("  Sequence: {}", tx.sequence);
    println!("  Fee:      {} stroops", tx.fee);
    println!("  Network:  {}", hex::encode(tx.network_id).dimmed());
    println!("  Operations ({}):", tx.operations.len());
    for (i, op) in tx.operations.iter().enumerate() {
        let source = op
            .source
            .as_ref()
            .map(|s| format!(" [source {s}]"))
            .unwrap_or_default();
        println!("    {i}. {}{}", op.body.kind().green(), source.dimmed());
    }
    println!("  Signatures ({}):", envelope.signatures.len());
    for sig in &envelope.signatures {
        println!("    hint {}", hex::encode(sig.hint.0).blue());
    }
    Ok(())
}

fn cmd_keygen(format: &OutputFormat) -> anyhow::Result<()> {
    let key = SigningKey::generate();
    let public = key.verifying_key().to_hex();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "seed": key.to_hex(),
                "public_key": public,
            }))?
        ),
        OutputFormat::Text => {
            println!("{} Generated signing key", "✓".green().bold());
            println!("  Seed:       {}", key.to_hex().red());
            println!("  Public key: {}", public.cyan());
        }
    }
    Ok(())
}

fn read_input(path: &std::path::Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .context("reading request from stdin")?;
        return Ok(body);
    }
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}
