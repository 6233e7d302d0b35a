//! Shared crate-wide constants.

/// Smallest width (in pixels) a window may be resized to.
pub const MIN_WINDOW_WIDTH: i32 = 200;

/// Smallest height (in pixels) a window may be resized to.
pub const MIN_WINDOW_HEIGHT: i32 = 150;

/// First stacking value handed out by a fresh store.
///
/// Starts high so floating windows always paint above regular page content
/// that uses small or default stacking values.
pub const BASE_Z_INDEX: u64 = 1000;

/// Default terminal cell size in pixels. Pointer positions arrive in cells
/// and are scaled by these factors so window geometry stays in pixels.
pub const DEFAULT_CELL_WIDTH_PX: u16 = 8;
pub const DEFAULT_CELL_HEIGHT_PX: u16 = 16;

/// Number of grouped search results listed under a tool call before the
/// "and N more..." expander.
pub const MAX_VISIBLE_RESULTS: usize = 6;

/// Offset (in pixels) between consecutive search-result windows so a batch
/// of them cascades instead of stacking exactly on top of each other.
pub const SEARCH_WINDOW_CASCADE: i32 = 30;
