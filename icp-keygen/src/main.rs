//! Keypair and principal generator CLI
//!
//! Prints JSON on stdout; logs go to stderr and follow `RUST_LOG`.

mod config;

use std::io::{self, BufRead};

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use icp_identity::principal::{codec, Principal};
use icp_identity::{Algorithm, KeypairGenerator, KeypairRecord};

#[derive(Parser)]
#[command(name = "icp-keygen")]
#[command(about = "Derive keypairs and self-authenticating principals from seed phrases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new seed phrase and derive a keypair from it
    Generate {
        /// ed25519 or secp256k1
        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        #[arg(short, long)]
        label: Option<String>,
    },

    /// Derive the keypair for an existing seed phrase
    Derive {
        /// Seed phrase; read from the first line of stdin when omitted
        #[arg(short, long)]
        mnemonic: Option<String>,

        #[arg(short, long)]
        algorithm: Option<Algorithm>,

        #[arg(short, long)]
        label: Option<String>,
    },

    /// Compute the principal text of a raw public key
    Principal {
        #[arg(short, long)]
        algorithm: Algorithm,

        /// Hex-encoded raw public key
        public_key: String,
    },

    /// Validate principal text and show its bytes
    Decode {
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::from_env()?;
    if !config.is_reference() {
        warn!("passphrase or derivation path differ from the reference tooling");
    }
    let default_algorithm = config.default_algorithm;
    let generator = KeypairGenerator::new(config);

    let output = match cli.command {
        Commands::Generate { algorithm, label } => {
            let record = generator.generate(algorithm.unwrap_or(default_algorithm), label.as_deref())?;
            info!(id = %record.id(), "generated new seed phrase; store it safely");
            record_json(&record)?
        }
        Commands::Derive { mnemonic, algorithm, label } => {
            let mnemonic = match mnemonic {
                Some(mnemonic) => mnemonic,
                None => read_line()?,
            };
            let record = generator.derive_from_mnemonic(algorithm.unwrap_or(default_algorithm), &mnemonic, label.as_deref())?;
            record_json(&record)?
        }
        Commands::Principal { algorithm, public_key } => {
            let public_key = hex::decode(public_key.trim())?;
            let text = icp_identity::principal_text(algorithm, &public_key)?;
            json!({ "algorithm": algorithm, "principal": text })
        }
        Commands::Decode { text } => {
            let bytes = codec::decode_text(&text)?;
            let kind = Principal::from_slice(&bytes).map(|principal| principal.kind()).ok();
            json!({
                "principal": codec::encode_text(&bytes),
                "bytes": hex::encode(&bytes),
                "length": bytes.len(),
                "kind": kind,
            })
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

fn record_json(record: &KeypairRecord) -> anyhow::Result<serde_json::Value> {
    let mut value = serde_json::to_value(record)?;
    value["principal"] = json!(record.principal_text()?);
    Ok(value)
}

fn read_line() -> anyhow::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    if line.trim().is_empty() {
        anyhow::bail!("no seed phrase given on stdin");
    }
    Ok(line)
}
