use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use simplect::analysis::{key_avalanche, reference_keys, round_trip};
use simplect::{bytes_from_hex, Mode, Simplect, SimplectConfig, Width, Word};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simplect", about = "Simplect block transform diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct Instance {
    /// Key and block size: 64, 256 or 512.
    #[arg(long, default_value = "64")]
    width: Width,
    /// Construction: feedback or keyed.
    #[arg(long, default_value = "feedback")]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode one block and print the result.
    Encode {
        #[command(flatten)]
        instance: Instance,
        /// Key as hex.
        #[arg(long)]
        key: String,
        /// Block as hex.
        #[arg(long)]
        block: String,
    },
    /// Encode the zero block under the reference keys and check each round trip.
    Vectors {
        #[command(flatten)]
        instance: Instance,
    },
    /// Flip each key bit in turn and report how many output bits change.
    Avalanche {
        #[command(flatten)]
        instance: Instance,
        /// Base key as hex (default: all zero).
        #[arg(long)]
        key: Option<String>,
        /// Print every trial, not just the summary.
        #[arg(long)]
        verbose: bool,
    },
}

/// Monomorphise a generic runner for the selected width.
macro_rules! dispatch {
    ($width:expr, $runner:ident($($arg:expr),*)) => {
        match $width {
            Width::W64 => $runner::<u8>($($arg),*),
            Width::W256 => $runner::<u32>($($arg),*),
            Width::W512 => $runner::<u64>($($arg),*),
        }
    };
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    simplect::init();

    match cli.command {
        Commands::Encode {
            instance,
            key,
            block,
        } => dispatch!(instance.width, run_encode(instance.mode, &key, &block)),
        Commands::Vectors { instance } => dispatch!(instance.width, run_vectors(instance.mode)),
        Commands::Avalanche {
            instance,
            key,
            verbose,
        } => dispatch!(
            instance.width,
            run_avalanche(instance.mode, key.as_deref(), verbose)
        ),
    }
}

fn run_encode<W: Word>(mode: Mode, key_hex: &str, block_hex: &str) -> Result<()> {
    let mut key = bytes_from_hex::<W>("key", key_hex).context("failed to parse key")?;
    let mut block = bytes_from_hex::<W>("block", block_hex).context("failed to parse block")?;

    let cipher = Simplect::<W>::new(SimplectConfig { mode });
    cipher.encode_block(&mut key, &mut block);

    println!("block\t{}", hex::encode(block.as_ref()));
    if cipher.config().mode == Mode::Feedback {
        println!("key\t{}", hex::encode(key.as_ref()));
    }
    Ok(())
}

fn run_vectors<W: Word>(mode: Mode) -> Result<()> {
    let cipher = Simplect::<W>::new(SimplectConfig { mode });
    let zero = W::zero_bytes();
    let mut failures = 0usize;

    for key in reference_keys::<W>() {
        let result = round_trip(&cipher, &key, &zero);
        println!(
            "key={}\tblock={}\treversed={}\t{}",
            hex::encode(key.as_ref()),
            hex::encode(result.ciphertext.as_ref()),
            hex::encode(result.recovered.as_ref()),
            if result.is_restored() { "ok" } else { "MISMATCH" }
        );
        if !result.is_restored() {
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} round trips failed", failures, reference_keys::<W>().len());
    }
    Ok(())
}

fn run_avalanche<W: Word>(mode: Mode, key_hex: Option<&str>, verbose: bool) -> Result<()> {
    let key = match key_hex {
        Some(digits) => bytes_from_hex::<W>("key", digits).context("failed to parse key")?,
        None => W::zero_bytes(),
    };
    let cipher = Simplect::<W>::new(SimplectConfig { mode });
    let block = W::zero_bytes();

    let report = key_avalanche(&cipher, &key, &block);
    if verbose {
        for (bit, distance) in report.per_trial.iter().enumerate() {
            println!("bit {}\tdiffers in {} bits", bit, distance);
        }
    }
    println!(
        "{:.2} of {} bits differ on average (min {}, max {}, {:.1}%)",
        report.mean(),
        report.block_bits,
        report.min(),
        report.max(),
        report.fraction() * 100.0
    );
    Ok(())
}
