//! Pointer gesture state machine for moving and resizing windows.
//!
//! A gesture lives from pointer-down to pointer-up. It snapshots the pointer
//! position and the window geometry when it starts; every later move is
//! computed from that snapshot, never from the previous frame, so rounding
//! never accumulates.

use super::{FloatRect, WindowId, WindowPatch, WindowRegistry};
use crate::layout::Point;
use crate::layout::floating::{ResizeEdge, apply_move_drag, apply_resize_drag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
    Resizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Drag {
        id: WindowId,
        start: Point,
        origin: FloatRect,
    },
    Resize {
        id: WindowId,
        edge: ResizeEdge,
        start: Point,
        origin: FloatRect,
    },
}

impl Gesture {
    pub fn window(&self) -> WindowId {
        match *self {
            Gesture::Drag { id, .. } | Gesture::Resize { id, .. } => id,
        }
    }

    /// Geometry for the window with the pointer at `pointer`.
    pub fn frame(&self, pointer: Point) -> FloatRect {
        match *self {
            Gesture::Drag { start, origin, .. } => {
                apply_move_drag(origin, pointer.delta_from(start))
            }
            Gesture::Resize {
                edge,
                start,
                origin,
                ..
            } => apply_resize_drag(origin, edge, pointer.delta_from(start)),
        }
    }
}

/// Owns the single active gesture, if any.
///
/// While a gesture is active the controller captures the pointer: moves and
/// releases are routed here no matter where they happen. When idle it
/// consumes nothing.
#[derive(Debug, Default)]
pub struct GestureController {
    active: Option<Gesture>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        match self.active {
            None => GestureState::Idle,
            Some(Gesture::Drag { .. }) => GestureState::Dragging,
            Some(Gesture::Resize { .. }) => GestureState::Resizing,
        }
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    pub fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin_drag(&mut self, registry: &WindowRegistry, id: WindowId, pointer: Point) -> bool {
        let Some(origin) = Self::movable_origin(registry, id) else {
            return false;
        };
        registry.bring_to_front(id);
        tracing::trace!(window_id = %id, "drag started");
        self.active = Some(Gesture::Drag {
            id,
            start: pointer,
            origin,
        });
        true
    }

    pub fn begin_resize(
        &mut self,
        registry: &WindowRegistry,
        id: WindowId,
        edge: ResizeEdge,
        pointer: Point,
    ) -> bool {
        let Some(origin) = Self::movable_origin(registry, id) else {
            return false;
        };
        registry.bring_to_front(id);
        tracing::trace!(window_id = %id, %edge, "resize started");
        self.active = Some(Gesture::Resize {
            id,
            edge,
            start: pointer,
            origin,
        });
        true
    }

    /// Push one geometry frame for the active gesture.
    ///
    /// A window closed mid-gesture silently ends it.
    pub fn pointer_move(&mut self, registry: &WindowRegistry, pointer: Point) -> bool {
        let Some(gesture) = self.active else {
            return false;
        };
        let id = gesture.window();
        if !registry.contains(id) {
            self.active = None;
            return true;
        }
        let patch = match gesture {
            Gesture::Drag { .. } => {
                let frame = gesture.frame(pointer);
                WindowPatch::new().position(frame.x, frame.y)
            }
            Gesture::Resize { .. } => WindowPatch::new().geometry(gesture.frame(pointer)),
        };
        registry.update_window(id, patch);
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        match self.active.take() {
            Some(gesture) => {
                tracing::trace!(window_id = %gesture.window(), "gesture ended");
                true
            }
            None => false,
        }
    }

    fn movable_origin(registry: &WindowRegistry, id: WindowId) -> Option<FloatRect> {
        let window = registry.get(id)?;
        if window.is_maximized() || window.is_minimized() {
            return None;
        }
        Some(window.geometry())
    }
}
