//! Graphical maze rendering.
//!
//! The maze is drawn as axis aligned wall segments on a white background,
//! either into a PNG image file or (with the `screen` feature) a live window.
//! Both backends share the same wall segment geometry. The marker legend
//! strip only appears in the image output, where no interactive context
//! explains the colours.

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid::Grid;

use image::{ImageBuffer, Rgb, RgbImage};
use std::cmp;
use std::io;
use std::path::Path;

const WHITE: Rgb<u8> = Rgb { data: [0xff, 0xff, 0xff] };
const BLACK: Rgb<u8> = Rgb { data: [0, 0, 0] };
const GREEN: Rgb<u8> = Rgb { data: [0, 0xff, 0] };
const RED: Rgb<u8> = Rgb { data: [0xff, 0, 0] };

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions<'path> {
    show_on_screen: bool,
    mark_start_end: bool,
    start: Option<Cartesian2DCoordinate>,
    end: Option<Cartesian2DCoordinate>,
    output_file: Option<&'path Path>,
    cell_side_pixels_length: u8,
}

impl<'path> RenderOptions<'path> {
    #[inline]
    pub fn cell_side_pixels(&self) -> u32 {
        u32::from(cmp::max(self.cell_side_pixels_length, 2))
    }

    #[inline]
    pub fn mark_start_end(&self) -> bool {
        self.mark_start_end
    }

    #[inline]
    pub fn start(&self) -> Option<Cartesian2DCoordinate> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Cartesian2DCoordinate> {
        self.end
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                show_on_screen: false,
                mark_start_end: false,
                start: None,
                end: None,
                output_file: None,
                cell_side_pixels_length: 10,
            },
        }
    }

    pub fn show_on_screen(mut self, on: bool) -> RenderOptionsBuilder<'path> {
        self.options.show_on_screen = on;
        self
    }

    pub fn mark_start_end(mut self, on: bool) -> RenderOptionsBuilder<'path> {
        self.options.mark_start_end = on;
        self
    }

    pub fn start(mut self, start: Option<Cartesian2DCoordinate>) -> RenderOptionsBuilder<'path> {
        self.options.start = start;
        self
    }

    pub fn end(mut self, end: Option<Cartesian2DCoordinate>) -> RenderOptionsBuilder<'path> {
        self.options.end = end;
        self
    }

    pub fn output_file(mut self, path: Option<&'path Path>) -> RenderOptionsBuilder<'path> {
        self.options.output_file = path;
        self
    }

    pub fn cell_side_pixels_length(mut self, length: u8) -> RenderOptionsBuilder<'path> {
        self.options.cell_side_pixels_length = length;
        self
    }

    pub fn build(self) -> RenderOptions<'path> {
        self.options
    }
}

/// An axis aligned line in image pixel space, endpoints inclusive.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineSegment {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl LineSegment {
    fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> LineSegment {
        LineSegment { x1, y1, x2, y2 }
    }
}

/// The closed walls of the grid as drawable line segments, one segment per
/// standing wall-pair plus the outer boundary.
///
/// North and west walls are special cased to the grid boundary rows: any
/// interior wall is emitted once, as the south or east wall of the cell
/// nearer the origin.
pub fn wall_segments(grid: &Grid, cell_side: u32) -> Vec<LineSegment> {
    let mut segments = Vec::with_capacity(2 * grid.size() + 2 * grid.dimension());

    for coord in grid.iter() {
        let x1 = coord.x * cell_side;
        let y1 = coord.y * cell_side;
        let x2 = (coord.x + 1) * cell_side;
        let y2 = (coord.y + 1) * cell_side;

        if grid.neighbour_at_direction(coord, CompassPrimary::North).is_none() {
            segments.push(LineSegment::new(x1, y1, x2, y1));
        }
        if grid.neighbour_at_direction(coord, CompassPrimary::West).is_none() {
            segments.push(LineSegment::new(x1, y1, x1, y2));
        }
        if grid.is_wall_closed(coord, CompassPrimary::East) {
            segments.push(LineSegment::new(x2, y1, x2, y2));
        }
        if grid.is_wall_closed(coord, CompassPrimary::South) {
            segments.push(LineSegment::new(x1, y2, x2, y2));
        }
    }

    segments
}

/// Render the maze per the options: written as a PNG when an output file is
/// given, shown in a window when requested. Requesting the screen view on a
/// build without the `screen` feature is an error rather than a silent no-op.
pub fn render_maze(grid: &Grid, options: &RenderOptions) -> io::Result<()> {
    if let Some(path) = options.output_file {
        let image = draw_maze_image(grid, options);
        image.save(path)?;
    }

    if options.show_on_screen {
        show_maze_on_screen(grid, options)?;
    }

    Ok(())
}

#[cfg(feature = "screen")]
fn show_maze_on_screen(grid: &Grid, options: &RenderOptions) -> io::Result<()> {
    crate::sdl::show_maze_window(grid, options);
    Ok(())
}

#[cfg(not(feature = "screen"))]
fn show_maze_on_screen(_grid: &Grid, _options: &RenderOptions) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Other,
                       "the screen view needs a build with the 'screen' feature enabled"))
}

pub(crate) fn maze_side_pixels(grid: &Grid, options: &RenderOptions) -> u32 {
    grid.dimension() as u32 * options.cell_side_pixels() + 1
}

pub(crate) fn legend_height_pixels(options: &RenderOptions) -> u32 {
    if options.mark_start_end {
        let cell_side = options.cell_side_pixels();
        let unit = glyph_unit(cell_side);
        // Half-cell margins around the taller of swatch and glyph strokes,
        // the strokes drawn with inclusive endpoints.
        cell_side / 2 + cmp::max(cell_side, 4 * unit + 1) + cell_side / 2
    } else {
        0
    }
}

pub(crate) fn legend_width_pixels(options: &RenderOptions) -> u32 {
    if options.mark_start_end {
        let cell_side = options.cell_side_pixels();
        // Margin, the S entry, a cell of spacing, the E entry.
        cell_side / 2 + 2 * legend_entry_width(cell_side) + cell_side
    } else {
        0
    }
}

fn glyph_unit(cell_side: u32) -> u32 {
    cmp::max(1, cell_side / 4)
}

fn legend_entry_width(cell_side: u32) -> u32 {
    // Swatch, gap, then 2 units of glyph strokes with inclusive endpoints.
    cell_side + 3 * glyph_unit(cell_side) + 1
}

fn draw_maze_image(grid: &Grid, options: &RenderOptions) -> RgbImage {
    let cell_side = options.cell_side_pixels();
    let maze_px = maze_side_pixels(grid, options);
    // A small maze can be narrower than its own legend strip.
    let width = cmp::max(maze_px, legend_width_pixels(options));
    let mut image = ImageBuffer::from_pixel(width, maze_px + legend_height_pixels(options), WHITE);

    if options.mark_start_end {
        if let Some(start_coord) = options.start {
            fill_cell(&mut image, start_coord, cell_side, GREEN);
        }
        if let Some(end_coord) = options.end {
            fill_cell(&mut image, end_coord, cell_side, RED);
        }
        draw_legend(&mut image, maze_px, cell_side);
    }

    for segment in wall_segments(grid, cell_side) {
        draw_segment(&mut image, segment, BLACK);
    }

    image
}

fn draw_segment(image: &mut RgbImage, segment: LineSegment, colour: Rgb<u8>) {
    // One axis is always degenerate.
    for x in segment.x1..segment.x2 + 1 {
        for y in segment.y1..segment.y2 + 1 {
            image.put_pixel(x, y, colour);
        }
    }
}

fn fill_cell(image: &mut RgbImage, coord: Cartesian2DCoordinate, cell_side: u32, colour: Rgb<u8>) {
    let x1 = coord.x * cell_side;
    let y1 = coord.y * cell_side;
    for x in x1 + 1..x1 + cell_side {
        for y in y1 + 1..y1 + cell_side {
            image.put_pixel(x, y, colour);
        }
    }
}

// Letter strokes on a 2 wide, 4 tall unit box. No font rasterisation needed
// for a two letter legend.
const S_GLYPH: [(u32, u32, u32, u32); 5] =
    [(0, 0, 2, 0), (0, 0, 0, 2), (0, 2, 2, 2), (2, 2, 2, 4), (0, 4, 2, 4)];
const E_GLYPH: [(u32, u32, u32, u32); 4] = [(0, 0, 2, 0), (0, 0, 0, 4), (0, 2, 1, 2), (0, 4, 2, 4)];

/// A strip below the maze explaining the start and end markers: a coloured
/// swatch followed by an S or E letter drawn from line strokes. The strip's
/// pixel budget comes from `legend_height_pixels`/`legend_width_pixels`, so
/// every stroke lands inside the image whatever the cell size.
fn draw_legend(image: &mut RgbImage, maze_px: u32, cell_side: u32) {
    let unit = glyph_unit(cell_side);
    let top = maze_px + cell_side / 2;

    let mut entry = |swatch_x: u32, colour: Rgb<u8>, glyph: &[(u32, u32, u32, u32)]| {
        for x in swatch_x..swatch_x + cell_side {
            for y in top..top + cell_side {
                image.put_pixel(x, y, colour);
            }
        }
        let glyph_x = swatch_x + cell_side + unit;
        for &(x1, y1, x2, y2) in glyph {
            draw_segment(image,
                         LineSegment::new(glyph_x + x1 * unit,
                                          top + y1 * unit,
                                          glyph_x + x2 * unit,
                                          top + y2 * unit),
                         BLACK);
        }
    };

    entry(cell_side / 2, GREEN, &S_GLYPH);
    entry(cell_side / 2 + legend_entry_width(cell_side) + cell_side, RED, &E_GLYPH);
}
