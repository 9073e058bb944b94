//! Live window display of a rendered maze, compiled in with the `screen`
//! feature only so the default build has no system SDL dependency.

use crate::grid::Grid;
use crate::renderers::{self, RenderOptions};

use sdl2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
}

pub fn init() -> SdlSetup {
    let sdl_context: sdl2::Sdl = sdl2::init().unwrap();
    let video_subsystem: sdl2::VideoSubsystem = sdl_context.video().unwrap();

    SdlSetup {
        sdl_context,
        video_subsystem,
    }
}

/// Show the maze in a window until it is closed or Q/Escape is pressed.
///
/// The same wall segments drive the window and the image file output. The
/// scene is static, so it is drawn to the canvas once and merely re-presented
/// each vsync tick of the event loop.
pub fn show_maze_window(grid: &Grid, options: &RenderOptions) {
    let sdl_setup = init();

    let cell_side = options.cell_side_pixels();
    let window_side = renderers::maze_side_pixels(grid, options);
    let window = sdl_setup.video_subsystem
                          .window("qmaze", window_side, window_side)
                          .position_centered()
                          .build()
                          .unwrap();
    let mut canvas = window.into_canvas()
                           .present_vsync()
                           .accelerated()
                           .build()
                           .unwrap();

    let white = Color::RGB(0xff, 0xff, 0xff);
    let black = Color::RGB(0, 0, 0);
    let green = Color::RGB(0, 0xff, 0);
    let red = Color::RGB(0xff, 0, 0);

    let mut drawn = false;
    let mut events = sdl_setup.sdl_context.event_pump().unwrap();
    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Q), .. } |
                Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'event,
                _ => continue,
            }
        }

        if !drawn {
            canvas.set_draw_color(white);
            canvas.clear();

            if options.mark_start_end() {
                if let Some(start_coord) = options.start() {
                    canvas.set_draw_color(green);
                    canvas.fill_rect(cell_rect(start_coord.x, start_coord.y, cell_side))
                          .expect("SDL rect fill");
                }
                if let Some(end_coord) = options.end() {
                    canvas.set_draw_color(red);
                    canvas.fill_rect(cell_rect(end_coord.x, end_coord.y, cell_side))
                          .expect("SDL rect fill");
                }
            }

            canvas.set_draw_color(black);
            for segment in renderers::wall_segments(grid, cell_side) {
                canvas.draw_line(Point::new(segment.x1 as i32, segment.y1 as i32),
                                 Point::new(segment.x2 as i32, segment.y2 as i32))
                      .expect("SDL line draw");
            }

            drawn = true;
        }
        canvas.present();
    }
}

fn cell_rect(x: u32, y: u32, cell_side: u32) -> Rect {
    Rect::new((x * cell_side) as i32 + 1,
              (y * cell_side) as i32 + 1,
              cell_side - 1,
              cell_side - 1)
}
