use docopt::Docopt;
#[cfg(not(feature = "sdl"))]
use error_chain::bail;
use mazerun::{
    cells::Position,
    generators,
    geometry::{Geometry, DEFAULT_CELL_PIXELS, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH},
    grid::Grid,
    grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay},
    pathing,
    renderers,
    units::{CellPixels, PixelHeight, PixelWidth},
};
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use serde_derive::Deserialize;
use std::{path::Path, rc::Rc};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Mazerun

Usage:
    mazerun_driver -h | --help
    mazerun_driver text [--seed=<n>] [--window-width=<w> --window-height=<h>] [--cell-pixels=<n>] [--show-path]
    mazerun_driver play [--seed=<n>] [--window-width=<w> --window-height=<h>] [--cell-pixels=<n>] [--font=<path>]
    mazerun_driver hello [--window-width=<w> --window-height=<h>] [--font=<path>]

Options:
    -h --help              Show this screen.
    --seed=<n>             Seed for the maze generator. A random seed is used if not given.
    --window-width=<w>     Window width in pixels [default: 800].
    --window-height=<h>    Window height in pixels [default: 600].
    --cell-pixels=<n>      Pixel length of one side of a maze cell [default: 40].
    --show-path            Show the shortest path from the start to the goal instead of the start and end markers.
    --font=<path>          TrueType font used for the time display and the retry button.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    cmd_text: bool,
    cmd_play: bool,
    cmd_hello: bool,
    flag_seed: Option<u64>,
    flag_window_width: u32,
    flag_window_height: u32,
    flag_cell_pixels: u32,
    flag_show_path: bool,
    flag_font: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Game(::mazerun::errors::Error, ::mazerun::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    // -h and --help are not failures, docopt prints the usage and exits.
    let args: DriverArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .or_else(|e| if e.fatal() { Err(e) } else { e.exit() })?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "parsed arguments");

    let geometry = geometry_from_args(&args)?;
    let font = if args.flag_font.is_empty() {
        None
    } else {
        Some(Path::new(&args.flag_font))
    };
    let render_options = renderers::RenderOptionsBuilder::new().font(font).build();

    if args.cmd_text {
        print_text_maze(&geometry, args.flag_seed, args.flag_show_path)
    } else if args.cmd_play {
        play(geometry, args.flag_seed, &render_options)
    } else if args.cmd_hello {
        hello(geometry, &render_options)
    } else {
        Ok(())
    }
}

fn geometry_from_args(args: &DriverArgs) -> Result<Geometry> {
    let geometry = Geometry::new(PixelWidth(args.flag_window_width),
                                 PixelHeight(args.flag_window_height),
                                 CellPixels(args.flag_cell_pixels))
        .chain_err(|| {
            format!("Invalid window settings, the defaults are {}x{} with {} pixel cells",
                    DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT, DEFAULT_CELL_PIXELS)
        })?;
    Ok(geometry)
}

fn print_text_maze(geometry: &Geometry, seed: Option<u64>, show_path: bool) -> Result<()> {

    let (mut maze_grid, goal) = if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        generators::maze_with_goal(geometry.columns(), geometry.rows(), &mut rng)
    } else {
        generators::maze_with_goal(geometry.columns(), geometry.rows(), &mut thread_rng())
    };
    info!(columns = geometry.columns().0, rows = geometry.rows().0, %goal, "generated maze");

    set_maze_griddisplay(&mut maze_grid, goal, show_path)?;
    println!("{}", maze_grid);
    Ok(())
}

/// Markers for the start and goal, or the route between them when asked for the path.
fn set_maze_griddisplay(maze_grid: &mut Grid, goal: Position, show_path: bool) -> Result<()> {

    let display: Rc<dyn GridDisplay> = if show_path {
        let distances = pathing::Distances::new(maze_grid, Position::ORIGIN)
            .ok_or("The maze start is not a passage.")?;
        let path = pathing::shortest_path(maze_grid, &distances, goal)
            .ok_or("The maze goal cannot be reached from the start.")?;
        Rc::new(PathDisplay::new(&path))
    } else {
        Rc::new(StartEndPointsDisplay::new(Position::ORIGIN, goal))
    };
    maze_grid.set_grid_display(Some(display));
    Ok(())
}

#[cfg(feature = "sdl")]
fn play(geometry: Geometry, seed: Option<u64>, options: &renderers::RenderOptions) -> Result<()> {
    renderers::play(geometry, seed, options)?;
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn play(_: Geometry, _: Option<u64>, _: &renderers::RenderOptions) -> Result<()> {
    bail!("The play command requires the sdl feature: rebuild with `--features sdl`")
}

#[cfg(feature = "sdl")]
fn hello(geometry: Geometry, options: &renderers::RenderOptions) -> Result<()> {
    renderers::hello_world(geometry, options)?;
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn hello(_: Geometry, _: &renderers::RenderOptions) -> Result<()> {
    bail!("The hello command requires the sdl feature: rebuild with `--features sdl`")
}
