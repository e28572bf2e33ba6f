//! Drawing the game. The layout arithmetic is always available; the SDL window loop needs
//! the `sdl` feature.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::clock::Timestamp;
use crate::geometry::Rect;
use crate::session::GameSession;
use crate::units::PixelPoint;

pub const DEFAULT_FRAMES_PER_SECOND: u32 = 30;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    font_path: Option<PathBuf>,
    frames_per_second: u32,
}

impl RenderOptions {
    #[inline]
    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_ref().map(|p| p.as_path())
    }

    #[inline]
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn new() -> RenderOptionsBuilder {
        RenderOptionsBuilder {
            options: RenderOptions {
                font_path: None,
                frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            },
        }
    }
    /// TrueType font for the timer and button labels. Without one the times only
    /// show in the window title.
    pub fn font(mut self, font_path: Option<&Path>) -> RenderOptionsBuilder {
        self.options.font_path = font_path.map(Path::to_path_buf);
        self
    }
    pub fn frames_per_second(mut self, fps: u32) -> RenderOptionsBuilder {
        self.options.frames_per_second = fps.max(1);
        self
    }
    pub fn build(self) -> RenderOptions {
        self.options
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }
}

/// Heads up display text: the clock, and the record once there is one.
pub fn hud_lines(session: &GameSession, now: Timestamp) -> (String, Option<String>) {
    let time = format!("TIME: {}", format_seconds(session.current_elapsed(now)));
    let best = session.best_time().map(|best| format!("BEST: {}", format_seconds(best)));
    (time, best)
}

/// Tenths of a second, e.g. `12.3s`.
pub fn format_seconds(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

/// How long to wait at the end of a frame that started at `frame_start_ms` so that
/// frames come at most `frames_per_second` times a second.
pub fn frame_delay_ms(frame_start_ms: u32, now_ms: u32, frames_per_second: u32) -> u32 {
    let budget = 1000 / frames_per_second.max(1);
    budget.saturating_sub(now_ms.wrapping_sub(frame_start_ms))
}

/// One pixel high horizontal strips that together fill a disc.
pub fn disc_spans(centre: PixelPoint, radius: u32) -> Vec<Rect> {
    let r = i64::from(radius);
    (-r..=r)
        .map(|dy| {
            let half = ((r * r - dy * dy) as f64).sqrt() as i64;
            Rect::new((i64::from(centre.x) - half) as i32,
                      (i64::from(centre.y) + dy) as i32,
                      (2 * half + 1) as u32,
                      1)
        })
        .collect()
}

/// Top-left corner that centres content of the given size inside `area`.
pub fn centred_in(area: Rect, width: u32, height: u32) -> PixelPoint {
    let centre = area.centre();
    PixelPoint::new(centre.x - (width / 2) as i32, centre.y - (height / 2) as i32)
}

#[cfg(feature = "sdl")]
pub use self::window::{hello_world, play};

#[cfg(feature = "sdl")]
mod window {
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::Color;
    use sdl2::rect::Rect as SdlRect;
    use sdl2::render::{Canvas, TextureCreator};
    use sdl2::ttf::Font;
    use sdl2::video::{Window, WindowContext};
    use sdl2::TimerSubsystem;
    use tracing::{info, warn};

    use super::*;
    use crate::clock::{Clock, MonotonicClock};
    use crate::errors::*;
    use crate::geometry::Geometry;
    use crate::input::{self, Flow, GameEvent, Key};
    use crate::sdl::{self, sdl_error};

    const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    const RED: Color = Color { r: 220, g: 60, b: 60, a: 255 };
    const BLUE: Color = Color { r: 80, g: 80, b: 255, a: 255 };
    const GRAY: Color = Color { r: 200, g: 200, b: 200, a: 255 };
    const GOLD: Color = Color { r: 255, g: 215, b: 0, a: 255 };

    const FONT_POINT_SIZE: u16 = 28;
    const RETRY_LABEL: &str = "Retry";
    const HELLO_TEXT: &str = "Hello, world!";

    const HUD_LEFT: i32 = 10;
    const HUD_TIME_TOP: i32 = 10;
    const HUD_BEST_TOP: i32 = 40;

    fn sdl_rect(rect: Rect) -> SdlRect {
        SdlRect::new(rect.x, rect.y, rect.width, rect.height)
    }

    fn to_game_event(event: Event) -> Option<GameEvent> {
        match event {
            Event::Quit { .. } => Some(GameEvent::Quit),
            Event::KeyDown { repeat: false, keycode, .. } => {
                let key = match keycode {
                    Some(Keycode::Up) => Key::Up,
                    Some(Keycode::Down) => Key::Down,
                    Some(Keycode::Left) => Key::Left,
                    Some(Keycode::Right) => Key::Right,
                    _ => Key::Other,
                };
                Some(GameEvent::KeyDown(key))
            }
            Event::MouseButtonDown { x, y, .. } => {
                Some(GameEvent::MouseButtonDown(PixelPoint::new(x, y)))
            }
            _ => None,
        }
    }

    /// Sleep out the rest of the frame that started at `frame_start` ticks.
    pub(super) fn pace_frame(timer: &mut TimerSubsystem, frame_start: u32, frames_per_second: u32) {
        let delay = frame_delay_ms(frame_start, timer.ticks(), frames_per_second);
        timer.delay(delay);
    }

    fn open_canvas(setup: &sdl::SdlSetup, title: &str, geometry: &Geometry) -> Result<Canvas<Window>> {
        let window = setup.video_subsystem
            .window(title, geometry.window_width().0, geometry.window_height().0)
            .position_centered()
            .build()
            .map_err(sdl_error)?;
        window.into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(sdl_error)
    }

    fn draw_text(canvas: &mut Canvas<Window>,
                 textures: &TextureCreator<WindowContext>,
                 font: &Font,
                 text: &str,
                 colour: Color,
                 top_left: PixelPoint)
                 -> Result<()> {
        let surface = font.render(text).blended(colour).map_err(sdl_error)?;
        let texture = textures.create_texture_from_surface(&surface).map_err(sdl_error)?;
        let query = texture.query();
        canvas.copy(&texture,
                  None,
                  Some(SdlRect::new(top_left.x, top_left.y, query.width, query.height)))
            .map_err(sdl_error)
    }

    fn text_size(font: &Font, text: &str) -> Result<(u32, u32)> {
        font.size_of(text).map_err(sdl_error)
    }

    fn draw_session(canvas: &mut Canvas<Window>,
                    textures: &TextureCreator<WindowContext>,
                    font: Option<&Font>,
                    session: &GameSession,
                    now: Timestamp)
                    -> Result<()> {
        let geometry = session.geometry();

        canvas.set_draw_color(WHITE);
        canvas.clear();

        canvas.set_draw_color(BLACK);
        let walls = session.grid()
            .iter()
            .filter(|coord| !session.grid().is_passage(*coord))
            .map(|coord| sdl_rect(geometry.cell_rect(coord)))
            .collect::<Vec<SdlRect>>();
        canvas.fill_rects(&walls).map_err(sdl_error)?;

        canvas.set_draw_color(RED);
        canvas.fill_rect(sdl_rect(geometry.cell_rect(session.goal()))).map_err(sdl_error)?;

        canvas.set_draw_color(BLUE);
        let disc = disc_spans(geometry.cell_centre(session.player()), geometry.player_radius())
            .into_iter()
            .map(sdl_rect)
            .collect::<Vec<SdlRect>>();
        canvas.fill_rects(&disc).map_err(sdl_error)?;

        let (time_line, best_line) = hud_lines(session, now);
        let title = match best_line {
            Some(ref best) => format!("Maze Game - {} {}", time_line, best),
            None => format!("Maze Game - {}", time_line),
        };
        if let Err(e) = canvas.window_mut().set_title(&title) {
            warn!(error = %e, "could not update window title");
        }

        if let Some(font) = font {
            draw_text(canvas, textures, font, &time_line, BLACK, PixelPoint::new(HUD_LEFT, HUD_TIME_TOP))?;
            if let Some(ref best) = best_line {
                draw_text(canvas, textures, font, best, GOLD, PixelPoint::new(HUD_LEFT, HUD_BEST_TOP))?;
            }
        }

        if session.is_finished() {
            let button = session.retry_region();
            canvas.set_draw_color(GRAY);
            canvas.fill_rect(sdl_rect(button)).map_err(sdl_error)?;
            canvas.set_draw_color(BLACK);
            // 2px border
            canvas.draw_rect(sdl_rect(button)).map_err(sdl_error)?;
            canvas.draw_rect(SdlRect::new(button.x + 1, button.y + 1, button.width - 2, button.height - 2))
                .map_err(sdl_error)?;
            if let Some(font) = font {
                let (w, h) = text_size(font, RETRY_LABEL)?;
                draw_text(canvas, textures, font, RETRY_LABEL, BLACK, centred_in(button, w, h))?;
            }
        }

        canvas.present();
        Ok(())
    }

    /// Run the maze game until the window is closed.
    pub fn play(geometry: Geometry, seed: Option<u64>, options: &RenderOptions) -> Result<()> {
        let mut setup = sdl::init()?;
        let mut canvas = open_canvas(&setup, "Maze Game", &geometry)?;
        let textures = canvas.texture_creator();
        let font = match options.font_path() {
            Some(path) => Some(setup.ttf_context
                .load_font(path, FONT_POINT_SIZE)
                .map_err(sdl_error)
                .chain_err(|| format!("Failed to load font {}", path.display()))?),
            None => None,
        };
        let mut events = setup.sdl_context.event_pump().map_err(sdl_error)?;

        let mut session = match seed {
            Some(s) => GameSession::with_seed(geometry, s),
            None => GameSession::new(geometry),
        };
        let clock = MonotonicClock::new();
        info!(columns = geometry.columns().0, rows = geometry.rows().0, "starting game loop");

        loop {
            let frame_start = setup.timer_subsystem.ticks();
            let now = clock.now();

            let frame_events = events.poll_iter().filter_map(to_game_event).collect::<Vec<_>>();
            if input::run_frame(&mut session, frame_events, now) == Flow::Quit {
                break;
            }

            draw_session(&mut canvas, &textures, font.as_ref(), &session, now)?;

            // hand control back to the OS until the next frame is due
            pace_frame(&mut setup.timer_subsystem, frame_start, options.frames_per_second());
        }

        info!(best = ?session.best_time(), "game closed");
        Ok(())
    }

    /// Smoke test for the graphics stack: a window with a greeting until it is closed.
    pub fn hello_world(geometry: Geometry, options: &RenderOptions) -> Result<()> {
        let mut setup = sdl::init()?;
        let mut canvas = open_canvas(&setup, "Hello World", &geometry)?;
        let textures = canvas.texture_creator();
        let font = match options.font_path() {
            Some(path) => Some(setup.ttf_context.load_font(path, FONT_POINT_SIZE).map_err(sdl_error)?),
            None => None,
        };
        let mut events = setup.sdl_context.event_pump().map_err(sdl_error)?;
        let window_area = Rect::new(0, 0, geometry.window_width().0, geometry.window_height().0);

        'event: loop {
            let frame_start = setup.timer_subsystem.ticks();
            for event in events.poll_iter() {
                if let Event::Quit { .. } = event {
                    break 'event;
                }
            }

            canvas.set_draw_color(WHITE);
            canvas.clear();
            if let Some(ref font) = font {
                let (w, h) = text_size(font, HELLO_TEXT)?;
                draw_text(&mut canvas, &textures, font, HELLO_TEXT, BLACK, centred_in(window_area, w, h))?;
            } else {
                canvas.set_draw_color(BLUE);
                let disc = disc_spans(window_area.centre(), geometry.cell_pixels().0)
                    .into_iter()
                    .map(sdl_rect)
                    .collect::<Vec<SdlRect>>();
                canvas.fill_rects(&disc).map_err(sdl_error)?;
            }
            canvas.present();

            pace_frame(&mut setup.timer_subsystem, frame_start, options.frames_per_second());
        }

        info!("hello world closed");
        Ok(())
    }
}
