//! Paints the floating windows above the host view and routes pointer input
//! to them.
//!
//! The overlay owns no window state of its own beyond per-window scroll
//! offsets and the active gesture; everything else is read from the
//! registry snapshot at the start of each frame or event.

use std::collections::BTreeMap;
use std::sync::Arc;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::{Clear, Paragraph};

use crate::config::CellMetrics;
use crate::layout::floating::{ResizeEdge, resize_handles_for_region};
use crate::layout::{Point, rect_contains};
use crate::ui::UiFrame;
use crate::window::decorator::{ChromeState, DefaultDecorator, HeaderAction, WindowDecorator};
use crate::window::{GestureController, GestureState, WindowId, WindowRecord, WindowRegistry};

const SCROLL_STEP: isize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
    pending: isize,
}

impl ScrollState {
    pub fn bump(&mut self, delta: isize) {
        self.pending = self.pending.saturating_add(delta);
    }

    /// Fold pending scroll into the offset and clamp it to the content.
    pub fn apply(&mut self, total: usize, view: usize) {
        let max_offset = total.saturating_sub(view);
        if self.pending != 0 {
            let delta = self.pending;
            self.pending = 0;
            let next = if delta.is_negative() {
                self.offset.saturating_sub(delta.unsigned_abs())
            } else {
                self.offset.saturating_add(delta as usize)
            };
            self.offset = next.min(max_offset);
        } else if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

/// One window as it will be painted this frame.
#[derive(Debug, Clone)]
pub struct WindowDraw {
    pub window: WindowRecord,
    /// Whole window, chrome included, in cells. May extend past the
    /// viewport.
    pub surface: Rect,
    /// Content area inside the chrome.
    pub inner: Rect,
    pub focused: bool,
}

impl WindowDraw {
    pub fn id(&self) -> WindowId {
        self.window.id()
    }
}

/// Which part of a window a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Control(HeaderAction),
    Resize(ResizeEdge),
    Header,
    Body,
}

#[derive(Debug)]
pub struct WindowOverlay {
    registry: WindowRegistry,
    gestures: GestureController,
    metrics: CellMetrics,
    decorator: Arc<dyn WindowDecorator>,
    area: Rect,
    scroll: BTreeMap<WindowId, ScrollState>,
}

impl WindowOverlay {
    pub fn new(registry: WindowRegistry, metrics: CellMetrics) -> Self {
        Self {
            registry,
            gestures: GestureController::new(),
            metrics,
            decorator: Arc::new(DefaultDecorator),
            area: Rect::default(),
            scroll: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    /// Viewport the windows are laid out in. Set by `render`; hosts that
    /// route events before the first frame set it directly.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn scroll_offset(&self, id: WindowId) -> usize {
        self.scroll.get(&id).map_or(0, |state| state.offset)
    }

    /// Visible windows bottom to top with their cell geometry.
    pub fn draw_plan(&self) -> Vec<WindowDraw> {
        let order = self.registry.stacking_order();
        let topmost = order.last().map(WindowRecord::id);
        order
            .into_iter()
            .filter_map(|window| {
                let surface = self.surface_for(&window);
                if clamp_rect(surface, self.area).width == 0 {
                    return None;
                }
                let inner = self.decorator.content_area(surface);
                let focused = Some(window.id()) == topmost;
                Some(WindowDraw {
                    window,
                    surface,
                    inner,
                    focused,
                })
            })
            .collect()
    }

    fn surface_for(&self, window: &WindowRecord) -> Rect {
        if window.is_maximized() {
            self.area
        } else {
            self.metrics.rect_to_cells(window.geometry(), self.area)
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.area = area;
        let plan = self.draw_plan();
        self.scroll
            .retain(|id, _| plan.iter().any(|draw| draw.id() == *id));
        for draw in plan {
            let visible = clamp_rect(draw.surface, area);
            frame.render_widget(Clear, visible);
            self.decorator.render_window(
                frame.buffer_mut(),
                draw.surface,
                visible,
                draw.window.title(),
                ChromeState {
                    focused: draw.focused,
                    maximized: draw.window.is_maximized(),
                },
            );
            if draw.inner.width == 0 || draw.inner.height == 0 {
                continue;
            }
            let lines = draw.window.content().to_lines();
            let scroll = self.scroll.entry(draw.id()).or_default();
            scroll.apply(lines.len(), draw.inner.height as usize);
            let offset = u16::try_from(scroll.offset).unwrap_or(u16::MAX);
            let inner = clamp_rect(draw.inner, area);
            frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
        }
    }

    /// Topmost visible window under the cell, with the part that was hit.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(WindowRecord, Hit)> {
        self.draw_plan().into_iter().rev().find_map(|draw| {
            let visible = clamp_rect(draw.surface, self.area);
            if !rect_contains(visible, column, row) {
                return None;
            }
            let hit = self.classify(&draw, column, row);
            Some((draw.window, hit))
        })
    }

    fn classify(&self, draw: &WindowDraw, column: u16, row: u16) -> Hit {
        let header = self.decorator.hit_test(draw.surface, column, row);
        if matches!(
            header,
            HeaderAction::Close | HeaderAction::Minimize | HeaderAction::Maximize
        ) {
            return Hit::Control(header);
        }
        if !draw.window.is_maximized()
            && let Some(handle) = resize_handles_for_region(draw.surface)
                .into_iter()
                .find(|handle| rect_contains(handle.rect, column, row))
        {
            return Hit::Resize(handle.edge);
        }
        if header == HeaderAction::Drag {
            Hit::Header
        } else {
            Hit::Body
        }
    }

    fn pointer(&self, mouse: &MouseEvent) -> Point {
        self.metrics.pointer_to_px(mouse.column, mouse.row, self.area)
    }

    /// Route one input event. Returns true when the overlay consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(mouse),
            MouseEventKind::Drag(_) | MouseEventKind::Moved if self.gestures.is_capturing() => {
                let pointer = self.pointer(mouse);
                self.gestures.pointer_move(&self.registry, pointer)
            }
            MouseEventKind::Up(_) => self.gestures.pointer_up(),
            MouseEventKind::ScrollDown => self.scroll_at(mouse.column, mouse.row, SCROLL_STEP),
            MouseEventKind::ScrollUp => self.scroll_at(mouse.column, mouse.row, -SCROLL_STEP),
            _ => false,
        }
    }

    fn pointer_down(&mut self, mouse: &MouseEvent) -> bool {
        self.gestures.pointer_up();
        let Some((window, hit)) = self.hit_test(mouse.column, mouse.row) else {
            return false;
        };
        let id = window.id();
        let pointer = self.pointer(mouse);
        match hit {
            Hit::Control(HeaderAction::Close) => self.registry.close_window(id),
            Hit::Control(HeaderAction::Minimize) => {
                self.registry.bring_to_front(id);
                self.registry.minimize_window(id);
            }
            Hit::Control(HeaderAction::Maximize) => {
                self.registry.bring_to_front(id);
                self.registry.maximize_window(id);
            }
            Hit::Control(_) | Hit::Body => self.registry.bring_to_front(id),
            Hit::Resize(edge) => {
                self.gestures
                    .begin_resize(&self.registry, id, edge, pointer);
            }
            Hit::Header if window.is_maximized() => self.registry.bring_to_front(id),
            Hit::Header => {
                self.gestures.begin_drag(&self.registry, id, pointer);
            }
        }
        true
    }

    fn scroll_at(&mut self, column: u16, row: u16, delta: isize) -> bool {
        let Some((window, hit)) = self.hit_test(column, row) else {
            return false;
        };
        if hit == Hit::Body {
            self.scroll.entry(window.id()).or_default().bump(delta);
        }
        true
    }

    /// Bring the lowest visible window to the top. Repeated calls walk
    /// through every visible window.
    pub fn cycle_front(&mut self) -> bool {
        let Some(bottom) = self.registry.stacking_order().first().map(WindowRecord::id) else {
            return false;
        };
        self.registry.bring_to_front(bottom);
        true
    }
}

fn clamp_rect(area: Rect, bounds: Rect) -> Rect {
    let x0 = area.x.max(bounds.x);
    let y0 = area.y.max(bounds.y);
    let x1 = area
        .x
        .saturating_add(area.width)
        .min(bounds.x.saturating_add(bounds.width));
    let y1 = area
        .y
        .saturating_add(area.height)
        .min(bounds.y.saturating_add(bounds.height));
    if x1 <= x0 || y1 <= y0 {
        return Rect::default();
    }
    Rect {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}
