//! The viewer application: transcript underneath, floating windows above,
//! a dock along the bottom row.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use crate::components::{Component, ComponentContext, Dock, TranscriptView};
use crate::config::CellMetrics;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::layout::rect_contains;
use crate::overlay::WindowOverlay;
use crate::transcript::Transcript;
use crate::ui::UiFrame;
use crate::window::WindowRegistry;

pub struct App {
    registry: WindowRegistry,
    overlay: WindowOverlay,
    transcript: TranscriptView,
    dock: Dock,
    dock_area: Rect,
}

impl App {
    pub fn new(transcript: Transcript, metrics: CellMetrics) -> Self {
        let registry = WindowRegistry::new();
        Self {
            overlay: WindowOverlay::new(registry.clone(), metrics),
            registry,
            transcript: TranscriptView::new(transcript),
            dock: Dock::new(),
            dock_area: Rect::default(),
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> &WindowOverlay {
        &self.overlay
    }

    pub fn transcript(&self) -> &TranscriptView {
        &self.transcript
    }

    fn context(&self) -> ComponentContext {
        ComponentContext::new(true).with_windows(self.registry.clone())
    }

    /// Split `area` into the main region and the one-row dock.
    fn split(area: Rect) -> (Rect, Rect) {
        let dock_height = 1.min(area.height);
        let main = Rect {
            height: area.height - dock_height,
            ..area
        };
        let dock = Rect {
            y: area.y + main.height,
            height: dock_height,
            ..area
        };
        (main, dock)
    }

    /// Lay out the regions without drawing, so events can be routed before
    /// the first frame.
    pub fn resize(&mut self, area: Rect) {
        let (main, dock) = Self::split(area);
        let ctx = self.context();
        self.transcript.resize(main, &ctx);
        self.overlay.set_area(main);
        self.dock_area = dock;
    }

    pub fn draw(&mut self, frame: &mut UiFrame<'_>) {
        let (main, dock) = Self::split(frame.area());
        let ctx = self.context();
        self.dock_area = dock;
        self.transcript.render(frame, main, &ctx);
        self.overlay.render(frame, main);
        self.dock.render(frame, dock, &ctx);
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        let ctx = self.context();
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => return ControlFlow::Quit,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return ControlFlow::Quit;
                }
                KeyCode::Tab => {
                    self.overlay.cycle_front();
                }
                _ => {
                    self.transcript.handle_event(event, &ctx);
                }
            },
            Event::Mouse(mouse) => {
                if self.overlay.handle_event(event) {
                    return ControlFlow::Continue;
                }
                if rect_contains(self.dock_area, mouse.column, mouse.row) {
                    self.dock.handle_event(event, &ctx);
                } else {
                    self.transcript.handle_event(event, &ctx);
                }
            }
            Event::Resize(width, height) => self.resize(Rect::new(0, 0, *width, *height)),
            _ => {}
        }
        ControlFlow::Continue
    }
}

/// Run `app` until the user quits, drawing once per loop iteration.
pub fn run_app<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    app: &mut App,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    tracing::debug!("event loop started");
    event_loop.run(|_, event| match event {
        None => {
            terminal
                .draw(|frame| app.draw(&mut UiFrame::new(frame)))
                .map_err(|err| io::Error::other(err.to_string()))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(app.handle_event(&event)),
    })?;
    tracing::debug!(windows = app.registry().len(), "event loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use serde_json::json;

    fn app() -> App {
        let transcript: Transcript = serde_json::from_value(json!({"messages": [
            {"role": "assistant", "parts": [
                {"type": "tool", "tool_call_id": "1", "tool_name": "package_search_grep",
                 "input": {"pattern": "x"}}
            ]}
        ]}))
        .unwrap();
        let mut app = App::new(transcript, CellMetrics::default());
        app.resize(Rect::new(0, 0, 120, 40));
        app
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn split_reserves_bottom_row_for_dock() {
        let (main, dock) = App::split(Rect::new(0, 0, 80, 24));
        assert_eq!(main, Rect::new(0, 0, 80, 23));
        assert_eq!(dock, Rect::new(0, 23, 80, 1));
        let (main, dock) = App::split(Rect::new(0, 0, 80, 0));
        assert_eq!(main.height + dock.height, 0);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert_eq!(
            app.handle_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            ControlFlow::Quit
        );
        assert_eq!(
            app.handle_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ControlFlow::Quit
        );
        assert_eq!(
            app.handle_event(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            ControlFlow::Continue
        );
    }

    #[test]
    fn enter_opens_and_tab_cycles() {
        let mut app = app();
        app.handle_event(&key(KeyCode::Enter, KeyModifiers::NONE));
        app.handle_event(&key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.registry().len(), 2);
        let windows = app.registry().windows();
        let (first, second) = (windows[0].id(), windows[1].id());
        assert_eq!(app.registry().topmost(), Some(second));
        app.handle_event(&key(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!(app.registry().topmost(), Some(first));
    }
}
