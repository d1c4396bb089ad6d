//! bmpturn - rotate a 24-bit bitmap by 90 degrees, then Gaussian-blur it.
//!
//! `bmpturn run` reads the input, writes the rotated image, reads that file
//! back and writes the blurred result. `rotate` and `blur` run a single step;
//! `info` prints the decoded header.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use bmpturn_core::bitmap::{Bitmap, BitmapError, BitmapHeader};
use bmpturn_core::pipeline::{blur_file, rotate_file, run_pipeline, PipelineError};
use clap::{ArgAction, Parser, Subcommand};
use log::{error, info, LevelFilter};
use thiserror::Error;

use crate::config::{resolve_config, ConfigError, PathOverrides};

/// Anything that makes a command fail.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// `info` could not read or decode its input.
    #[error("{path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: BitmapError,
    },
}

#[derive(Parser)]
#[command(
    name = "bmpturn",
    version,
    about = "Rotate a 24-bit bitmap by 90 degrees and apply a 5x5 Gaussian blur"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rotate, write, reload, blur, write
    Run {
        /// JSON file with `input`, `rotated_output` and `blurred_output`
        #[arg(long)]
        config: Option<PathBuf>,

        /// Bitmap to read (default: bmp02.bmp)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output for the rotated image (default: finish.bmp)
        #[arg(long)]
        rotated: Option<PathBuf>,

        /// Output for the blurred image (default: finishG.bmp)
        #[arg(long)]
        blurred: Option<PathBuf>,
    },

    /// Rotate a bitmap by 90 degrees
    Rotate {
        /// Bitmap to read
        input: PathBuf,
        /// Where to write the rotated bitmap
        output: PathBuf,
    },

    /// Apply the 5x5 Gaussian blur to a bitmap
    Blur {
        /// Bitmap to read
        input: PathBuf,
        /// Where to write the blurred bitmap
        output: PathBuf,
    },

    /// Print the header of a bitmap
    Info {
        /// Bitmap to inspect
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Install `env_logger`. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run {
            config,
            input,
            rotated,
            blurred,
        } => {
            let overrides = PathOverrides {
                input,
                rotated_output: rotated,
                blurred_output: blurred,
            };
            let config = resolve_config(config.as_deref(), overrides)?;
            let report = run_pipeline(&config)?;
            info!(
                "Done: {}x{} -> {}x{}, wrote {} + {} bytes",
                report.source_dimensions.0,
                report.source_dimensions.1,
                report.rotated_dimensions.0,
                report.rotated_dimensions.1,
                report.rotated_bytes,
                report.blurred_bytes
            );
        }
        Commands::Rotate { input, output } => {
            rotate_file(&input, &output)?;
        }
        Commands::Blur { input, output } => {
            blur_file(&input, &output)?;
        }
        Commands::Info { input } => {
            let inspect = |source: BitmapError| CliError::Inspect {
                path: input.clone(),
                source,
            };
            let bytes = std::fs::read(&input).map_err(|e| inspect(e.into()))?;
            let header = BitmapHeader::parse_fields(&bytes).map_err(inspect)?;
            print!("{}", describe_header(&header));
            Bitmap::from_bytes(&bytes).map_err(inspect)?;
        }
    }
    Ok(())
}

/// Human-readable listing of every header field.
fn describe_header(header: &BitmapHeader) -> String {
    let rows = [
        ("signature", header.signature_str()),
        ("file size", header.file_size.to_string()),
        ("reserved", format!("{} {}", header.reserved1, header.reserved2)),
        ("data offset", header.data_offset.to_string()),
        ("info header size", header.header_size.to_string()),
        ("width", header.width.to_string()),
        ("height", header.height.to_string()),
        ("planes", header.planes.to_string()),
        ("bits per pixel", header.bits_per_pixel.to_string()),
        ("compression", header.compression.to_string()),
        ("data size", header.data_size.to_string()),
        (
            "resolution",
            format!("{} x {} px/m", header.horizontal_res, header.vertical_res),
        ),
        (
            "colors",
            format!("{} ({} important)", header.colors, header.important_colors),
        ),
        ("row size", header.row_size().to_string()),
    ];
    rows.iter()
        .map(|(name, value)| format!("{name:>16}: {value}\n"))
        .collect()
}
