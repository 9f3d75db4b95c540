use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use perlin2d::render::{self, DEFAULT_SCALE};
use perlin2d::{console, Dimensions, GradientGrid, NoiseError, Scale};

/// 2D gradient noise over a random lattice.
#[derive(Parser)]
#[command(name = "perlin2d")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the gradient lattice. Defaults to the current time.
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a grid size and sample points from stdin (the default).
    Sample,
    /// Render the colour-mapped field to a PNG file.
    Export {
        #[arg(long, allow_negative_numbers = true)]
        width: i64,

        #[arg(long, allow_negative_numbers = true)]
        height: i64,

        /// Pixels per grid cell.
        #[arg(long, default_value_t = i64::from(DEFAULT_SCALE), allow_negative_numbers = true)]
        scale: i64,

        #[arg(short, long, default_value = "noise.png")]
        output: PathBuf,
    },
}

fn export(
    seed: Option<u64>,
    width: i64,
    height: i64,
    scale: i64,
    output: &Path,
) -> Result<(), NoiseError> {
    let dims = Dimensions::new(width, height)?;
    let scale = Scale::new(scale)?;
    let grid = match seed {
        Some(seed) => GradientGrid::with_seed(dims, seed),
        None => GradientGrid::build(dims),
    };
    render::export_png(&grid, scale, output)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Sample) {
        Commands::Sample => {
            let stdin = io::stdin();
            console::run(stdin.lock(), io::stdout(), io::stderr(), cli.seed).map(|summary| {
                log::info!(
                    "answered {} points, rejected {}",
                    summary.answered,
                    summary.rejected
                );
            })
        }
        Commands::Export {
            width,
            height,
            scale,
            output,
        } => export(cli.seed, width, height, scale, &output).map_err(|e| {
            eprintln!("Error: {e}");
            e
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
