//! Terminal application driving a tessellation session.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use polytension_canvas::{RasterCanvas, raster_size};
use polytension_config::Config;
use polytension_core::{SeedLocation, Session};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
};

use crate::frame_clock::FrameClock;

/// Poll timeout while no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Animated tessellation.
    session: Session,
    /// Location carrying the current seed.
    location: SeedLocation,
    /// Scheduler for animation frames.
    clock: FrameClock,
    /// Pixel surface the session paints into.
    canvas: RasterCanvas,
    /// Whether the status line is visible.
    show_status: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(location: SeedLocation, config: &Config) -> Self {
        Self {
            running: false,
            session: Session::new(),
            location,
            clock: FrameClock::new(config.frame_interval()),
            canvas: RasterCanvas::new(0, 0),
            show_status: config.show_status,
        }
    }

    /// Run the application's main loop and return the final location.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<SeedLocation> {
        self.running = true;
        self.start(false);
        while self.running {
            let timeout = self
                .clock
                .time_until_due(Instant::now())
                .unwrap_or(IDLE_POLL);
            self.handle_crossterm_events(timeout)?;

            if let Some(handle) = self.clock.take_due(Instant::now()) {
                let size = terminal.size()?;
                let (canvas_area, _) = self.layout(Rect::new(0, 0, size.width, size.height));
                let (width, height) = raster_size(canvas_area);
                self.canvas.resize(width, height);

                if self.session.frame(handle, &mut self.canvas, &mut self.clock) {
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }
        Ok(self.location)
    }

    /// Start a run, optionally with a fresh seed.
    fn start(&mut self, force_new_seed: bool) {
        self.session
            .run(&mut self.location, force_new_seed, &mut self.clock);
    }

    /// Split the screen into the canvas and the optional status line.
    fn layout(&self, area: Rect) -> (Rect, Option<Rect>) {
        if !self.show_status {
            return (area, None);
        }
        let [canvas, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        (canvas, Some(status))
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let (canvas_area, status_area) = self.layout(frame.area());
        frame.render_widget(&self.canvas, canvas_area);

        if let Some(area) = status_area {
            let status = Line::from(vec![
                Span::raw(self.location.to_string()).white(),
                "  n".bold().white(),
                " new  ".dark_gray(),
                "r".bold().white(),
                " replay  ".dark_gray(),
                "s".bold().white(),
                " status  ".dark_gray(),
                "q".bold().white(),
                " quit".dark_gray(),
            ]);
            frame.render_widget(status, area);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('n')) => self.start(true),
            (_, KeyCode::Char('r')) => self.start(false),
            (_, KeyCode::Char('s')) => self.show_status = !self.show_status,
            _ => {}
        }
    }

    /// A left click starts over with a new seed.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            self.start(true);
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(url: &str) -> App {
        let location = SeedLocation::parse(url).unwrap();
        App::new(location, &Config::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_start_keeps_url_seed() {
        let mut app = app("https://polytension.local/?s=test");
        app.start(false);
        assert_eq!(app.session.tessellation().unwrap().seed(), "test");
        assert!(app.clock.time_until_due(Instant::now()).is_some());
    }

    #[test]
    fn test_new_seed_key_replaces_seed() {
        let mut app = app("https://polytension.local/?s=test");
        app.start(false);
        app.on_key_event(key(KeyCode::Char('n')));
        let seed = app.location.seed().unwrap();
        assert_ne!(seed, "test");
        assert_eq!(app.session.tessellation().unwrap().seed(), seed);
    }

    #[test]
    fn test_click_replaces_seed() {
        let mut app = app("https://polytension.local/?s=test");
        app.start(false);
        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_ne!(app.location.seed().as_deref(), Some("test"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app("https://polytension.local/");
        app.running = true;
        app.on_key_event(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_layout_reserves_status_line() {
        let mut app = app("https://polytension.local/");
        let (canvas, status) = app.layout(Rect::new(0, 0, 80, 24));
        assert_eq!(canvas.height, 23);
        assert_eq!(status.map(|r| r.y), Some(23));

        app.on_key_event(key(KeyCode::Char('s')));
        let (canvas, status) = app.layout(Rect::new(0, 0, 80, 24));
        assert_eq!(canvas.height, 24);
        assert!(status.is_none());
    }
}
