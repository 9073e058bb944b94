use docopt::Docopt;
use qmaze::{
    cells::{Cartesian2DCoordinate, CompassPrimary},
    circuit,
    generators,
    grid::Grid,
    renderers,
};
use rand::{self, SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "QMaze

Usage:
    qmaze_driver -h | --help
    qmaze_driver [--grid-size=<n>] [--seed=<s>]
    qmaze_driver render [text --text-out=<path>] [image --image-out=<path> --cell-pixels=<n> --screen-view --mark-start-end] [circuit --steps=<k>] [--start-point-x=<x> --start-point-y=<y>] [--end-point-x=<e1> --end-point-y=<e2>] [--grid-size=<n>] [--seed=<s>]

Options:
    -h --help            Show this screen.
    --grid-size=<n>      The grid size is n * n, minimum 2 [default: 20].
    --seed=<s>           Seed the random generator for a reproducible maze.
    --text-out=<path>    Output file path for a textual rendering of a maze.
    --image-out=<path>   Output file path for an image rendering of a maze. Always PNG format.
    --cell-pixels=<n>    Pixel count to render one cell wall in a maze [default: 10] max 255.
    --screen-view        When rendering to an image file, also show the maze in a window.
    --mark-start-end     Colour the start (green) and end (red) cells and add a legend.
    --start-point-x=<x>  x coordinate of the start cell, the origin corner if unset.
    --start-point-y=<y>  y coordinate of the start cell.
    --end-point-x=<e1>   x coordinate of the end cell, the far corner if unset.
    --end-point-y=<e2>   y coordinate of the end cell.
    --steps=<k>          Number of walk steps to encode into the circuit [default: 4].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: usize,
    flag_seed: Option<u32>,
    cmd_render: bool,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_screen_view: bool,
    flag_mark_start_end: bool,
    cmd_circuit: bool,
    flag_steps: usize,
    flag_start_point_x: Option<u32>,
    flag_start_point_y: Option<u32>,
    flag_end_point_x: Option<u32>,
    flag_end_point_y: Option<u32>,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            GridCreationFailure(::qmaze::grid::InvalidDimension);
            IoFailure(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let any_render_option = args.cmd_text || args.cmd_image || args.cmd_circuit;
    // Plain text to stdout when not asked for anything more specific.
    let do_text_render = args.cmd_text || !any_render_option;

    let mut maze_grid = Grid::new(args.flag_grid_size)?;
    let mut rng = maze_rng(args.flag_seed);
    generators::recursive_backtracker(&mut maze_grid, &mut rng);

    let start_opt = validated_point(&maze_grid, get_start_point(&args))?;
    let end_opt = validated_point(&maze_grid, get_end_point(&args, &maze_grid))?;

    if do_text_render {
        if args.flag_text_out.is_empty() {
            println!("{}", maze_grid);
        } else {
            write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if args.cmd_image {
        let is_image_path_set = !args.flag_image_out.is_empty();
        let out_image_path = if is_image_path_set {
            Some(Path::new(&args.flag_image_out))
        } else {
            None
        };

        let render_options = renderers::RenderOptionsBuilder::new()
            .show_on_screen(args.flag_screen_view || !is_image_path_set)
            .mark_start_end(args.flag_mark_start_end)
            .start(start_opt)
            .end(end_opt)
            .output_file(out_image_path)
            .cell_side_pixels_length(args.flag_cell_pixels)
            .build();
        renderers::render_maze(&maze_grid, &render_options)
            .chain_err(|| "Failed to render the maze image")?;
    }

    if args.cmd_circuit {
        let walk_start = start_opt.unwrap_or_else(|| Cartesian2DCoordinate::new(0, 0));
        let walk = circuit::encode_walk(&maze_grid,
                                        walk_start,
                                        first_step_incoming_direction(&maze_grid, walk_start),
                                        args.flag_steps);
        println!("{} step walk from ({}, {}): {}",
                 args.flag_steps,
                 walk_start.x,
                 walk_start.y,
                 walk);
        println!("{}", circuit::Circuit::from_walk(&walk, args.flag_steps));
    }

    Ok(())
}

fn maze_rng(seed: Option<u32>) -> XorShiftRng {
    match seed {
        // Xorshift cannot take an all zeroes seed.
        Some(seed) => {
            XorShiftRng::from_seed([seed.wrapping_add(1), 0x9e37_79b9, 0x85eb_ca6b, 0xc2b2_ae35])
        }
        None => rand::weak_rng(),
    }
}

fn get_start_point(maze_args: &MazeArgs) -> Option<Cartesian2DCoordinate> {

    if let (Some(start_x), Some(start_y)) =
        (maze_args.flag_start_point_x, maze_args.flag_start_point_y) {
        Some(Cartesian2DCoordinate::new(start_x, start_y))
    } else if maze_args.flag_mark_start_end || maze_args.cmd_circuit {
        // We do not have a start so make one up.
        Some(Cartesian2DCoordinate::new(0, 0))
    } else {
        None
    }
}

fn get_end_point(maze_args: &MazeArgs, maze_grid: &Grid) -> Option<Cartesian2DCoordinate> {

    if let (Some(end_x), Some(end_y)) = (maze_args.flag_end_point_x, maze_args.flag_end_point_y) {
        Some(Cartesian2DCoordinate::new(end_x, end_y))
    } else if maze_args.flag_mark_start_end {
        // We do not have an end but we need to make one up.
        let far = (maze_grid.dimension() - 1) as u32;
        Some(Cartesian2DCoordinate::new(far, far))
    } else {
        None
    }
}

fn validated_point(maze_grid: &Grid,
                   point: Option<Cartesian2DCoordinate>)
                   -> Result<Option<Cartesian2DCoordinate>> {
    match point {
        Some(coord) if !maze_grid.is_valid_coordinate(coord) => {
            Err(format!("Point ({}, {}) is outside the {} x {} maze grid",
                        coord.x,
                        coord.y,
                        maze_grid.dimension(),
                        maze_grid.dimension())
                .into())
        }
        _ => Ok(point),
    }
}

/// An incoming direction for the first walk step such that no open passage
/// out of the start cell is dropped as the reverse move. Any closed wall's
/// direction serves. A cell with all four passages open has no such wall and
/// loses its South branch on step one.
fn first_step_incoming_direction(maze_grid: &Grid, start: Cartesian2DCoordinate) -> CompassPrimary {
    CompassPrimary::ALL
        .iter()
        .cloned()
        .find(|&dir| maze_grid.is_wall_closed(start, dir.opposite()))
        .unwrap_or(CompassPrimary::North)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
