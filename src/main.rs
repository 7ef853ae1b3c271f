//! frontier CLI - Command line interface for frontier_set
//!
//! Excludes the chunks of input files from a frontier and prints Merkle
//! roots, checks and inclusion proofs as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use frontier_set::{exclude_file, ChunkMode, Config, Frontier, HashAlgorithm};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "frontier")]
#[command(about = "Frontier sets and Merkle commitments over excluded data")]
#[command(version)]
struct Cli {
    /// Path to a JSON config file (default: ~/.config/frontier/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Bytes per excluded chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Exclude the leaf hash of each chunk instead of the raw chunk
    #[arg(long)]
    hash_chunks: bool,

    /// Hash primitive for Merkle trees and chunk hashing
    #[arg(short, long)]
    algorithm: Option<HashAlgorithm>,

    /// Log more (repeat for more detail); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Merkle root of the frontier
    Root {
        /// Files whose chunks are excluded
        files: Vec<PathBuf>,
    },

    /// Find where a string leaves the frontier trie
    Check {
        /// Files whose chunks are excluded
        files: Vec<PathBuf>,
        /// The string to check, as UTF-8
        #[arg(short, long, conflicts_with = "hex", required_unless_present = "hex")]
        string: Option<String>,
        /// The string to check, hex encoded
        #[arg(long)]
        hex: Option<String>,
    },

    /// List the frontier's leaves in walk order
    Leaves {
        /// Files whose chunks are excluded
        files: Vec<PathBuf>,
        /// Maximum number of leaves to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Prove that a leaf is part of the frontier's Merkle tree
    Prove {
        /// Files whose chunks are excluded
        files: Vec<PathBuf>,
        /// The leaf to prove, hex encoded
        #[arg(short, long)]
        reference_hex: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(chunk_size) = cli.chunk_size {
        config.chunk_size = chunk_size;
    }
    if cli.hash_chunks {
        config.hash_chunks = true;
    }
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    config.validate()?;
    tracing::debug!(?config, "resolved config");

    match &cli.command {
        Commands::Root { files } => {
            let (frontier, excluded) = build_frontier(&config, files)?;
            let root = config.algorithm.merkle_root(&frontier);
            output(
                cli.format,
                &serde_json::json!({
                    "algorithm": config.algorithm.name(),
                    "excluded": excluded,
                    "leaves": frontier.leaf_count(),
                    "root": root.to_hex()
                }),
            )?;
        }

        Commands::Check {
            files,
            string,
            hex: hex_input,
        } => {
            let input = match (string, hex_input) {
                (Some(s), _) => s.as_bytes().to_vec(),
                (None, Some(h)) => hex::decode(h).context("invalid --hex value")?,
                (None, None) => anyhow::bail!("either --string or --hex is required"),
            };
            let (frontier, _) = build_frontier(&config, files)?;
            let (prefix, matched) = frontier.check(&input);
            output(
                cli.format,
                &serde_json::json!({
                    "matched": matched,
                    "prefix": hex::encode(prefix),
                    "prefix_len": prefix.len()
                }),
            )?;
        }

        Commands::Leaves { files, limit } => {
            let (frontier, _) = build_frontier(&config, files)?;
            let limit = limit.unwrap_or(usize::MAX);
            let mut count = 0;
            let mut items = Vec::new();
            frontier.walk(|leaf| {
                if count < limit {
                    items.push(hex::encode(leaf));
                }
                count += 1;
            });
            output(
                cli.format,
                &serde_json::json!({
                    "count": count,
                    "leaves": items
                }),
            )?;
        }

        Commands::Prove {
            files,
            reference_hex,
        } => {
            let reference = hex::decode(reference_hex).context("invalid --reference-hex value")?;
            let (frontier, _) = build_frontier(&config, files)?;
            let (root, proof) = config.algorithm.merkle_proof(&frontier, &reference);
            match proof {
                Some(proof) => {
                    output(
                        cli.format,
                        &serde_json::json!({
                            "algorithm": config.algorithm.name(),
                            "root": root.to_hex(),
                            "reference": reference_hex,
                            "proof": proof
                        }),
                    )?;
                }
                None => {
                    output(
                        cli.format,
                        &serde_json::json!({
                            "status": "error",
                            "message": format!("Not a frontier leaf: {}", reference_hex)
                        }),
                    )?;
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("frontier={},frontier_set={}", level, level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_frontier(config: &Config, files: &[PathBuf]) -> anyhow::Result<(Frontier, usize)> {
    let mode = if config.hash_chunks {
        ChunkMode::LeafHash(config.algorithm)
    } else {
        ChunkMode::Raw
    };
    let mut frontier = Frontier::new();
    let mut excluded = 0;
    for path in files {
        excluded += exclude_file(&mut frontier, path, config.chunk_size, mode)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    tracing::info!(files = files.len(), excluded, "built frontier");
    Ok((frontier, excluded))
}

fn output(format: OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Text => serde_json::to_string_pretty(value)?,
    };
    println!("{}", text);
    Ok(())
}
