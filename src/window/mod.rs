//! Floating window records and the registry that owns them.
//!
//! Records are immutable from the outside: every field is read through a
//! getter and every change goes through [`WindowRegistry`].

pub mod decorator;
pub mod gesture;

mod registry;
mod store;

use std::fmt;
use std::rc::Rc;

use crate::content::WindowContent;

pub use gesture::{Gesture, GestureController, GestureState};
pub use registry::WindowRegistry;
pub use store::WindowStore;

/// Signed rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FloatRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Opaque window identifier. Never reused within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) const fn from_seq(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct WindowRecord {
    id: WindowId,
    title: String,
    content: Rc<WindowContent>,
    geometry: FloatRect,
    z_index: u64,
    minimized: bool,
    maximized: bool,
}

impl WindowRecord {
    fn from_spec(id: WindowId, z_index: u64, spec: WindowSpec) -> Self {
        Self {
            id,
            title: spec.title,
            content: Rc::new(spec.content),
            geometry: spec.geometry,
            z_index,
            minimized: spec.minimized,
            maximized: spec.maximized,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &WindowContent {
        &self.content
    }

    /// Stored geometry. For maximized windows this is the geometry that
    /// un-maximizing restores, not what is on screen.
    pub fn geometry(&self) -> FloatRect {
        self.geometry
    }

    pub fn x(&self) -> i32 {
        self.geometry.x
    }

    pub fn y(&self) -> i32 {
        self.geometry.y
    }

    pub fn width(&self) -> i32 {
        self.geometry.width
    }

    pub fn height(&self) -> i32 {
        self.geometry.height
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    fn apply(&mut self, patch: WindowPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = Rc::new(content);
        }
        if let Some(x) = patch.x {
            self.geometry.x = x;
        }
        if let Some(y) = patch.y {
            self.geometry.y = y;
        }
        if let Some(width) = patch.width {
            self.geometry.width = width;
        }
        if let Some(height) = patch.height {
            self.geometry.height = height;
        }
        if let Some(minimized) = patch.minimized {
            self.minimized = minimized;
        }
        if let Some(maximized) = patch.maximized {
            self.maximized = maximized;
        }
    }
}

/// Everything a caller supplies when opening a window. The store assigns the
/// id and stacking order.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub title: String,
    pub content: WindowContent,
    pub geometry: FloatRect,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, content: WindowContent, geometry: FloatRect) -> Self {
        Self {
            title: title.into(),
            content,
            geometry,
            minimized: false,
            maximized: false,
        }
    }

    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = minimized;
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }
}

/// Partial update merged into a record by `update_window`. Unset fields are
/// left alone.
#[derive(Debug, Clone, Default)]
pub struct WindowPatch {
    title: Option<String>,
    content: Option<WindowContent>,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
    minimized: Option<bool>,
    maximized: Option<bool>,
}

impl WindowPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: WindowContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn geometry(self, rect: FloatRect) -> Self {
        self.position(rect.x, rect.y).size(rect.width, rect.height)
    }

    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = Some(minimized);
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.maximized = Some(maximized);
        self
    }
}
