//! One-row bar listing every open window, minimized ones included.

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::rect_contains;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::window::WindowId;

const MAX_LABEL_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy)]
struct DockHit {
    id: WindowId,
    rect: Rect,
}

#[derive(Debug, Default)]
pub struct Dock {
    hits: Vec<DockHit>,
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<WindowId> {
        self.hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| hit.id)
    }
}

impl Component for Dock {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let windows = ctx.windows();
        let topmost = windows.topmost();
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        for x in bounds.x..bounds.x.saturating_add(bounds.width) {
            if let Some(cell) = buffer.cell_mut((x, area.y)) {
                cell.set_symbol(" ");
                cell.set_style(Style::default().bg(theme::dock_bg()).fg(theme::dock_fg()));
            }
        }
        let max_x = area.x.saturating_add(area.width);
        let mut x = area.x;
        let y = area.y;
        let snapshot = windows.windows();
        if snapshot.is_empty() {
            let hint = truncate_to_width(
                "no windows - select a tool call and press Enter",
                area.width as usize,
            );
            let style = Style::default().bg(theme::dock_bg()).fg(theme::dock_minimized_fg());
            safe_set_string(buffer, bounds, x, y, &hint, style);
            return;
        }
        for window in snapshot.iter() {
            let marker = if window.is_minimized() { "_" } else { "▪" };
            let label = truncate_to_width(window.title(), MAX_LABEL_WIDTH);
            let chunk = format!(" {marker} {label} ");
            let chunk_width = chunk.chars().count() as u16;
            if x.saturating_add(chunk_width) > max_x {
                break;
            }
            let style = if Some(window.id()) == topmost {
                Style::default()
                    .bg(theme::dock_focused_bg())
                    .fg(theme::dock_focused_fg())
                    .add_modifier(Modifier::BOLD)
            } else if window.is_minimized() {
                Style::default()
                    .bg(theme::dock_bg())
                    .fg(theme::dock_minimized_fg())
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default().bg(theme::dock_bg()).fg(theme::dock_fg())
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.hits.push(DockHit {
                id: window.id(),
                rect: Rect {
                    x,
                    y,
                    width: chunk_width,
                    height: 1,
                },
            });
            x = x.saturating_add(chunk_width);
        }
    }

    /// Clicking a minimized entry restores it; clicking any other entry
    /// raises it.
    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        let Some(id) = self.hit_test(mouse.column, mouse.row) else {
            return false;
        };
        let windows = ctx.windows();
        match windows.get(id) {
            Some(window) if window.is_minimized() => {
                windows.minimize_window(id);
                windows.bring_to_front(id);
            }
            Some(_) => windows.bring_to_front(id),
            None => {}
        }
        true
    }
}
