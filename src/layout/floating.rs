use std::fmt;
use std::str::FromStr;

use ratatui::prelude::Rect;

use super::Point;
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::window::FloatRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::Left,
        ResizeEdge::Right,
    ];

    /// Compass name of the handle (`n`, `se`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeEdge::Left => "w",
            ResizeEdge::Right => "e",
            ResizeEdge::Top => "n",
            ResizeEdge::Bottom => "s",
            ResizeEdge::TopLeft => "nw",
            ResizeEdge::TopRight => "ne",
            ResizeEdge::BottomLeft => "sw",
            ResizeEdge::BottomRight => "se",
        }
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }
}

impl fmt::Display for ResizeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resize edge `{0}`")]
pub struct UnknownEdge(pub String);

impl FromStr for ResizeEdge {
    type Err = UnknownEdge;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeEdge::ALL
            .into_iter()
            .find(|edge| edge.as_str() == s)
            .ok_or_else(|| UnknownEdge(s.to_string()))
    }
}

/// A hit area (in cells) that starts a resize along `edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHandle {
    pub rect: Rect,
    pub edge: ResizeEdge,
}

/// Corner cells plus the border runs between them.
///
/// Edge runs skip the corners so every cell maps to exactly one handle.
pub fn resize_handles_for_region(rect: Rect) -> Vec<ResizeHandle> {
    let mut handles = Vec::new();
    if rect.width == 0 || rect.height == 0 {
        return handles;
    }
    let right = rect.x.saturating_add(rect.width.saturating_sub(1));
    let bottom = rect.y.saturating_add(rect.height.saturating_sub(1));
    let cell = |x: u16, y: u16| Rect {
        x,
        y,
        width: 1,
        height: 1,
    };
    handles.push(ResizeHandle {
        rect: cell(rect.x, rect.y),
        edge: ResizeEdge::TopLeft,
    });
    handles.push(ResizeHandle {
        rect: cell(right, rect.y),
        edge: ResizeEdge::TopRight,
    });
    handles.push(ResizeHandle {
        rect: cell(rect.x, bottom),
        edge: ResizeEdge::BottomLeft,
    });
    handles.push(ResizeHandle {
        rect: cell(right, bottom),
        edge: ResizeEdge::BottomRight,
    });
    if rect.width > 2 {
        handles.push(ResizeHandle {
            rect: Rect {
                x: rect.x.saturating_add(1),
                y: rect.y,
                width: rect.width.saturating_sub(2),
                height: 1,
            },
            edge: ResizeEdge::Top,
        });
        handles.push(ResizeHandle {
            rect: Rect {
                x: rect.x.saturating_add(1),
                y: bottom,
                width: rect.width.saturating_sub(2),
                height: 1,
            },
            edge: ResizeEdge::Bottom,
        });
    }
    if rect.height > 2 {
        handles.push(ResizeHandle {
            rect: Rect {
                x: rect.x,
                y: rect.y.saturating_add(1),
                width: 1,
                height: rect.height.saturating_sub(2),
            },
            edge: ResizeEdge::Left,
        });
        handles.push(ResizeHandle {
            rect: Rect {
                x: right,
                y: rect.y.saturating_add(1),
                width: 1,
                height: rect.height.saturating_sub(2),
            },
            edge: ResizeEdge::Right,
        });
    }
    handles
}

/// The draggable title row, one below the top border and inside the side
/// borders.
pub fn floating_header_for_region(rect: Rect) -> Option<Rect> {
    if rect.width < 3 || rect.height < 3 {
        return None;
    }
    Some(Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: 1,
    })
}

/// Translate `origin` by the pointer delta, keeping the top-left corner on
/// the non-negative quadrant. Size is untouched.
pub fn apply_move_drag(origin: FloatRect, delta: Point) -> FloatRect {
    FloatRect {
        x: (origin.x + delta.x).max(0),
        y: (origin.y + delta.y).max(0),
        ..origin
    }
}

/// Resize `origin` by dragging `edge` through `delta`.
///
/// Dimensions floor at the minimum window size. When a west or north handle
/// drives its dimension into the floor, the opposite edge stays where it was
/// and the dragged edge stops.
pub fn apply_resize_drag(origin: FloatRect, edge: ResizeEdge, delta: Point) -> FloatRect {
    let mut x = origin.x;
    let mut y = origin.y;
    let mut width = origin.width;
    let mut height = origin.height;

    if edge.moves_top() {
        y = origin.y + delta.y;
        height = origin.height - delta.y;
    }
    if edge.moves_bottom() {
        height = origin.height + delta.y;
    }
    if edge.moves_left() {
        x = origin.x + delta.x;
        width = origin.width - delta.x;
    }
    if edge.moves_right() {
        width = origin.width + delta.x;
    }

    width = width.max(MIN_WINDOW_WIDTH);
    height = height.max(MIN_WINDOW_HEIGHT);

    if width == MIN_WINDOW_WIDTH && edge.moves_left() {
        x = origin.x + origin.width - MIN_WINDOW_WIDTH;
    }
    if height == MIN_WINDOW_HEIGHT && edge.moves_top() {
        y = origin.y + origin.height - MIN_WINDOW_HEIGHT;
    }

    FloatRect {
        x: x.max(0),
        y: y.max(0),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> FloatRect {
        FloatRect::new(100, 100, 300, 300)
    }

    #[test]
    fn west_handle_moves_left_edge() {
        let res = apply_resize_drag(origin(), ResizeEdge::Left, Point::new(50, 0));
        assert_eq!(res, FloatRect::new(150, 100, 250, 300));
    }

    #[test]
    fn west_handle_anchors_right_edge_at_minimum() {
        for dx in [100, 150, 200, 1000] {
            let res = apply_resize_drag(origin(), ResizeEdge::Left, Point::new(dx, 0));
            assert_eq!(res.width, MIN_WINDOW_WIDTH, "dx={dx}");
            assert_eq!(res.x, 200, "dx={dx}");
            assert_eq!(res.right(), 400);
        }
    }

    #[test]
    fn north_handle_anchors_bottom_edge_at_minimum() {
        let res = apply_resize_drag(origin(), ResizeEdge::Top, Point::new(0, 500));
        assert_eq!(res.height, MIN_WINDOW_HEIGHT);
        assert_eq!(res.bottom(), 400);
    }

    #[test]
    fn south_east_handle_grows_without_moving() {
        let res = apply_resize_drag(origin(), ResizeEdge::BottomRight, Point::new(40, 25));
        assert_eq!(res, FloatRect::new(100, 100, 340, 325));
    }

    #[test]
    fn east_handle_shrink_stops_at_minimum_without_moving() {
        let res = apply_resize_drag(origin(), ResizeEdge::Right, Point::new(-250, 0));
        assert_eq!(res, FloatRect::new(100, 100, MIN_WINDOW_WIDTH, 300));
    }

    #[test]
    fn north_west_growth_is_clamped_at_origin() {
        let start = FloatRect::new(20, 10, 300, 300);
        let res = apply_resize_drag(start, ResizeEdge::TopLeft, Point::new(-50, -50));
        assert_eq!(res.x, 0);
        assert_eq!(res.y, 0);
        assert_eq!(res.width, 350);
        assert_eq!(res.height, 350);
    }

    #[test]
    fn corner_handles_compose_axis_rules() {
        let ne = apply_resize_drag(origin(), ResizeEdge::TopRight, Point::new(10, 20));
        assert_eq!(ne, FloatRect::new(100, 120, 310, 280));
        let sw = apply_resize_drag(origin(), ResizeEdge::BottomLeft, Point::new(10, 20));
        assert_eq!(sw, FloatRect::new(110, 100, 290, 320));
    }

    #[test]
    fn move_drag_clamps_to_origin() {
        let start = FloatRect::new(30, 40, 200, 150);
        assert_eq!(
            apply_move_drag(start, Point::new(15, -10)),
            FloatRect::new(45, 30, 200, 150)
        );
        assert_eq!(
            apply_move_drag(start, Point::new(-100, -100)),
            FloatRect::new(0, 0, 200, 150)
        );
    }

    #[test]
    fn edge_names_round_trip() {
        for edge in ResizeEdge::ALL {
            assert_eq!(edge.as_str().parse::<ResizeEdge>(), Ok(edge));
        }
        let err = "north".parse::<ResizeEdge>().unwrap_err();
        assert_eq!(err, UnknownEdge("north".into()));
        assert_eq!(err.to_string(), "unknown resize edge `north`");
    }

    #[test]
    fn handles_cover_border_cells_once() {
        let rect = Rect::new(2, 3, 10, 6);
        let handles = resize_handles_for_region(rect);
        assert_eq!(handles.len(), 8);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                let hits = handles
                    .iter()
                    .filter(|h| super::super::rect_contains(h.rect, x, y))
                    .count();
                let on_border = x == rect.x
                    || y == rect.y
                    || x == rect.x + rect.width - 1
                    || y == rect.y + rect.height - 1;
                assert_eq!(hits, usize::from(on_border), "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn header_sits_inside_borders() {
        let header = floating_header_for_region(Rect::new(0, 0, 10, 5)).unwrap();
        assert_eq!(header, Rect::new(1, 1, 8, 1));
        assert!(floating_header_for_region(Rect::new(0, 0, 2, 2)).is_none());
    }
}
