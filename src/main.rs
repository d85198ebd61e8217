use canopy::batch::BatchRunner;
use canopy::config::Config;
use canopy::inspect::inspect_path;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::{info, warn};
use std::path::PathBuf;

/// Convert class-partitioned hyperspectral TIFFs into NDVI arrays.
///
/// Without arguments, reads `data/raw/train` and writes 64x64 arrays to
/// `data/processed`. The output directory is wiped on every run.
#[derive(Debug, Parser)]
#[command(name = "canopy", version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root of the raw per-class image directories
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Root for the generated arrays (destroyed and recreated)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Side length of the square output arrays, in pixels
    #[arg(short = 's', long)]
    img_size: Option<usize>,

    /// Process the images of a class in parallel
    #[arg(short, long)]
    parallel: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print shape, dtype and size of raw images and generated arrays
    Inspect {
        /// Files, or directories searched recursively
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(input_dir) = &cli.input_dir {
        config = config.with_input_dir(input_dir);
    }
    if let Some(output_dir) = &cli.output_dir {
        config = config.with_output_dir(output_dir);
    }
    if let Some(img_size) = cli.img_size {
        config = config.with_img_size(img_size)?;
    }
    if cli.parallel {
        config = config.with_parallel(true);
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_secs();
    builder.init();

    let cli = Cli::parse();

    if let Some(Command::Inspect { paths }) = &cli.command {
        for path in paths {
            for inspection in inspect_path(path) {
                println!("{}", inspection);
            }
        }
        return Ok(());
    }

    let config = build_config(&cli)?;
    info!("Sensor: {}", config.sensor());

    let summary = BatchRunner::new(config).process()?;

    if summary.total_failed() > 0 {
        warn!(
            "{} image(s) could not be processed, see the log above",
            summary.total_failed()
        );
    }

    Ok(())
}
