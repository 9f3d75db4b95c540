//! Shows a noise field in an SDL2 window.
//!
//! Reads width, height and scale from stdin, draws every pixel once and
//! holds the frame before exiting.

use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use sdl2::{event::Event, keyboard::Keycode, pixels::Color, rect::Point};

use perlin2d::console::{Tokens, DIMENSION_ERROR};
use perlin2d::render::{self, Scale};
use perlin2d::{Dimensions, GradientGrid, NoiseError};

const HOLD_DURATION: Duration = Duration::from_millis(5000);
const FRAME_SLEEP: Duration = Duration::from_millis(16);
const SIZE_PROMPT: &str =
    "Enter three positive integers representing the width, height, and scale of the noise grid: ";

#[derive(Parser, Debug)]
#[command(name = "perlin2d_viewer")]
#[command(about = "Draws a 2D gradient noise field in a window")]
struct Args {
    /// Seed for the gradient lattice. Defaults to the current time.
    #[arg(short, long)]
    seed: Option<u64>,

    /// How long to keep the frame on screen, in milliseconds.
    #[arg(long)]
    hold_ms: Option<u64>,
}

fn read_setup() -> Result<(Dimensions, Scale), NoiseError> {
    print!("{SIZE_PROMPT}");
    io::Write::flush(&mut io::stdout())?;
    let mut tokens = Tokens::new(io::stdin().lock());
    let width = tokens.next_value::<i64>()?.unwrap_or(-1);
    let height = tokens.next_value::<i64>()?.unwrap_or(-1);
    let scale = tokens.next_value::<i64>()?.unwrap_or(-1);
    Ok((Dimensions::new(width, height)?, Scale::new(scale)?))
}

fn backend(e: impl ToString) -> NoiseError {
    NoiseError::Backend(e.to_string())
}

fn show(
    sdl_context: &sdl2::Sdl,
    video_subsystem: &sdl2::VideoSubsystem,
    grid: &GradientGrid,
    scale: Scale,
    hold: Duration,
) -> Result<(), NoiseError> {
    let (width, height) = render::surface_size(grid, scale)?;
    let window = video_subsystem
        .window("Perlin Noise", width, height)
        .position_centered()
        .build()
        .map_err(backend)?;
    let mut canvas = window.into_canvas().accelerated().build().map_err(backend)?;
    let mut event_pump = sdl_context.event_pump().map_err(backend)?;

    canvas.set_draw_color(Color::RGB(0, 0, 0));
    canvas.clear();
    let image = render::render_field(grid, scale)?;
    for (i, j, pixel) in image.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        canvas.set_draw_color(Color::RGB(r, g, b));
        canvas
            .draw_point(Point::new(i as i32, j as i32))
            .map_err(backend)?;
    }
    canvas.present();
    log::info!("presented {width}x{height} frame, holding for {hold:?}");

    let deadline = Instant::now() + hold;
    'running: while Instant::now() < deadline {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }
        thread::sleep(FRAME_SLEEP);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    // SDL comes up before the prompt so backend failures surface first.
    let sdl_context = match sdl2::init() {
        Ok(sdl) => sdl,
        Err(e) => {
            eprintln!("SDL could not initialize! SDL_Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let video_subsystem = match sdl_context.video() {
        Ok(video) => video,
        Err(e) => {
            eprintln!("SDL could not initialize! SDL_Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (dims, scale) = match read_setup() {
        Ok(setup) => setup,
        Err(NoiseError::InvalidDimension { .. } | NoiseError::InvalidScale(_)) => {
            eprintln!("{DIMENSION_ERROR}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let grid = match args.seed {
        Some(seed) => GradientGrid::with_seed(dims, seed),
        None => GradientGrid::build(dims),
    };
    let hold = args.hold_ms.map_or(HOLD_DURATION, Duration::from_millis);

    match show(&sdl_context, &video_subsystem, &grid, scale, hold) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
