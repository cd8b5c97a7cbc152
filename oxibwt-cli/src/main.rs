//! OxiBWT CLI - Burrows-Wheeler and Move-to-Front transforms
//!
//! Each transform reads the whole input, applies one direction, and writes
//! the whole output, so commands compose with shell pipes.

mod commands;
mod utils;

use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{cmd_stats, cmd_transform, cmd_verify};
use oxibwt_core::{Direction, OxiBwtError};
use std::error::Error;
use oxibwt_transform::{BurrowsWheeler, MoveToFrontCodec, Pipeline, PipelineOptions};
use std::path::PathBuf;

const USAGE: &str = "Usage: '-' encoding, '+' decoding";

/// Exit status for a decode input that could not have come from an encoder.
const EXIT_CORRUPT: i32 = 2;

#[derive(Parser)]
#[command(name = "oxibwt")]
#[command(
    author,
    version,
    about = "Burrows-Wheeler and Move-to-Front transforms"
)]
#[command(long_about = "
OxiBWT applies the Burrows-Wheeler Transform (BWT) and the Move-to-Front
transform (MTF) to whole files. '-' encodes, '+' decodes.

Examples:
  oxibwt bwt - < abra.txt > abra.bwt
  oxibwt bwt + < abra.bwt
  oxibwt bwt - < abra.txt | oxibwt mtf - > abra.mtf
  oxibwt pipeline - -i abra.txt -o abra.mtf
  oxibwt pipeline + -i abra.mtf
  oxibwt verify abra.txt
  oxibwt stats --json abra.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log nothing, not even warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Input and output of a streaming command.
#[derive(Args)]
struct IoArgs {
    /// Read from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Burrows-Wheeler transform
    Bwt {
        /// '-' to encode, '+' to decode
        #[arg(value_parser = parse_direction)]
        direction: Direction,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Move-to-front transform
    Mtf {
        /// '-' to encode, '+' to decode
        #[arg(value_parser = parse_direction)]
        direction: Direction,

        #[command(flatten)]
        io: IoArgs,
    },

    /// BWT followed by MTF
    #[command(alias = "p")]
    Pipeline {
        /// '-' to encode, '+' to decode
        #[arg(value_parser = parse_direction)]
        direction: Direction,

        /// Skip the MTF stage
        #[arg(long)]
        no_mtf: bool,

        #[command(flatten)]
        io: IoArgs,
    },

    /// Check that a file survives an encode/decode round trip
    #[command(alias = "t")]
    Verify {
        /// File to verify
        file: PathBuf,

        /// Skip the MTF stage
        #[arg(long)]
        no_mtf: bool,
    },

    /// Show how much structure BWT and MTF expose in a file
    Stats {
        /// File to analyze
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    s.parse().map_err(|_| USAGE.to_string())
}

/// Exit status for a failed command.
fn exit_code(err: &(dyn Error + 'static)) -> i32 {
    match err.downcast_ref::<OxiBwtError>() {
        Some(e) if e.is_corruption() => EXIT_CORRUPT,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Bwt { direction, io } => cmd_transform(
            &BurrowsWheeler,
            direction,
            io.input.as_deref(),
            io.output.as_deref(),
        ),
        Commands::Mtf { direction, io } => cmd_transform(
            &MoveToFrontCodec,
            direction,
            io.input.as_deref(),
            io.output.as_deref(),
        ),
        Commands::Pipeline {
            direction,
            no_mtf,
            io,
        } => cmd_transform(
            &Pipeline::standard(PipelineOptions {
                move_to_front: !no_mtf,
            }),
            direction,
            io.input.as_deref(),
            io.output.as_deref(),
        ),
        Commands::Verify { file, no_mtf } => cmd_verify(
            &file,
            PipelineOptions {
                move_to_front: !no_mtf,
            },
        ),
        Commands::Stats { file, json } => cmd_stats(&file, json),
    };

    if let Err(e) = result {
        let code = exit_code(&*e);
        if code == EXIT_CORRUPT {
            eprintln!("Error: corrupt input: {}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(code);
    }
}
