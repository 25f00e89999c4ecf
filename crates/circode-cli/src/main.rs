//! circode CLI — decode circular optical codes from still images.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use circode::{DecodeConfig, Decoder};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "circode")]
#[command(about = "Decode circular optical codes (concentric binary data rings around dark anchor dots)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a circular code from a still image.
    Decode(CliDecodeArgs),

    /// Validate and decode a raw 48-bit wire word.
    DecodeWord {
        /// Wire word as 12 hex digits (40 payload bits + 8 checksum bits),
        /// e.g. 0x48454c4c4f42.
        #[arg(long)]
        word: String,
    },
}

#[derive(Debug, Clone, Args)]
struct CliDecodeArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the decode result (JSON). Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Luminance threshold separating anchor-dot pixels from background.
    #[arg(long, default_value = "120.0")]
    dark_threshold: f32,

    /// Luminance threshold separating dark ring segments from bright ones.
    #[arg(long, default_value = "128.0")]
    bit_threshold: f32,

    /// Maximum number of anchor dots kept for geometry estimation.
    #[arg(long, default_value = "7")]
    max_anchors: usize,
}

impl CliDecodeArgs {
    fn to_config(&self) -> DecodeConfig {
        let mut config = DecodeConfig::default();
        config.anchor.dark_threshold = self.dark_threshold;
        config.anchor.max_anchors = self.max_anchors;
        config.extract.bit_threshold = self.bit_threshold;
        config
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Decode(args) => run_decode(&args),
        Commands::DecodeWord { word } => run_decode_word(&word),
    }
}

fn run_decode(args: &CliDecodeArgs) -> CliResult<()> {
    let img = image::open(&args.image)?.to_rgba8();
    let decoder = Decoder::with_config(args.to_config());

    match decoder.decode_image(&img) {
        Some(result) => {
            let json = serde_json::to_string_pretty(&result)?;
            match &args.out {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        // Absence of a code is a normal outcome, not an error.
        None => println!("no circular code detected"),
    }
    Ok(())
}

fn run_decode_word(word: &str) -> CliResult<()> {
    let hex = word.trim().trim_start_matches("0x");
    if hex.len() != 12 {
        return Err("expected a 48-bit wire word as 12 hex digits".into());
    }
    let value = u64::from_str_radix(hex, 16)?;
    let bits: Vec<bool> = (0..48).rev().map(|i| (value >> i) & 1 == 1).collect();
    let (data, checksum) = bits.split_at(40);

    if !circode::verify_checksum(data, checksum) {
        println!("checksum mismatch");
        return Ok(());
    }
    println!("checksum ok, payload: {:?}", circode::decode_text(data));
    Ok(())
}
