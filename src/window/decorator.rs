use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::layout::rect_contains;
use crate::theme;
use crate::ui::{safe_set_string, truncate_to_width};

/// What a pointer-down on the window chrome asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Minimize,
    Maximize,
    Drag,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeState {
    pub focused: bool,
    pub maximized: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        rect: Rect,
        bounds: Rect,
        title: &str,
        chrome: ChromeState,
    );

    fn hit_test(&self, rect: Rect, column: u16, row: u16) -> HeaderAction;

    /// Area left for window content once the chrome is drawn.
    fn content_area(&self, rect: Rect) -> Rect;
}

/// Box border with a title row; close/minimize/maximize dots sit on the
/// left of the title row, the title is centred in what remains.
#[derive(Debug, Default)]
pub struct DefaultDecorator;

const CONTROL_OFFSETS: [(u16, HeaderAction); 3] = [
    (2, HeaderAction::Close),
    (4, HeaderAction::Minimize),
    (6, HeaderAction::Maximize),
];
const CONTROLS_WIDTH: u16 = 8;

impl DefaultDecorator {
    fn controls_visible(rect: Rect) -> bool {
        rect.width > CONTROLS_WIDTH + 1 && rect.height >= 3
    }

    fn control_style(action: HeaderAction) -> Style {
        let color = match action {
            HeaderAction::Close => Color::Red,
            HeaderAction::Minimize => Color::Yellow,
            HeaderAction::Maximize => Color::Green,
            HeaderAction::Drag | HeaderAction::None => Color::Reset,
        };
        Style::default().fg(color)
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        rect: Rect,
        bounds: Rect,
        title: &str,
        chrome: ChromeState,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let visible = |x: u16, y: u16| rect_contains(bounds, x, y);
        let header_style = if chrome.focused {
            Style::default()
                .bg(theme::header_focused_bg())
                .fg(theme::header_focused_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::header_bg())
                .fg(theme::header_fg())
        };
        let border_style = Style::default().fg(theme::border_fg());

        let left = rect.x;
        let top = rect.y;
        let right = rect.x.saturating_add(rect.width).saturating_sub(1);
        let bottom = rect.y.saturating_add(rect.height).saturating_sub(1);
        let header_y = top.saturating_add(1);

        for x in left..=right {
            for (y, first, last) in [(top, "┌", "┐"), (bottom, "└", "┘")] {
                if visible(x, y)
                    && let Some(cell) = buffer.cell_mut((x, y))
                {
                    let symbol = if x == left {
                        first
                    } else if x == right {
                        last
                    } else {
                        "─"
                    };
                    cell.set_symbol(symbol);
                    cell.set_style(border_style);
                }
            }
        }
        for y in top.saturating_add(1)..bottom {
            for x in [left, right] {
                if visible(x, y)
                    && let Some(cell) = buffer.cell_mut((x, y))
                {
                    cell.set_symbol("│");
                    cell.set_style(border_style);
                }
            }
        }

        if header_y >= bottom {
            return;
        }
        for x in left.saturating_add(1)..right {
            if visible(x, header_y)
                && let Some(cell) = buffer.cell_mut((x, header_y))
            {
                cell.set_symbol(" ");
                cell.set_style(header_style);
            }
        }

        let mut title_left = left.saturating_add(1);
        if Self::controls_visible(rect) {
            for (offset, action) in CONTROL_OFFSETS {
                let symbol = if action == HeaderAction::Maximize && chrome.maximized {
                    "◉"
                } else {
                    "●"
                };
                let style = header_style.patch(Self::control_style(action));
                safe_set_string(buffer, bounds, left + offset, header_y, symbol, style);
            }
            title_left = left.saturating_add(CONTROLS_WIDTH);
        }
        let header_width = right.saturating_sub(title_left) as usize;
        if header_width == 0 {
            return;
        }
        let title = truncate_to_width(title, header_width);
        let title_len = title.chars().count();
        let start_x = title_left + ((header_width - title_len) / 2) as u16;
        safe_set_string(buffer, bounds, start_x, header_y, &title, header_style);
    }

    fn hit_test(&self, rect: Rect, column: u16, row: u16) -> HeaderAction {
        let Some(header) = crate::layout::floating::floating_header_for_region(rect) else {
            return HeaderAction::None;
        };
        if !rect_contains(header, column, row) {
            return HeaderAction::None;
        }
        if Self::controls_visible(rect) {
            for (offset, action) in CONTROL_OFFSETS {
                if column == rect.x + offset {
                    return action;
                }
            }
        }
        HeaderAction::Drag
    }

    fn content_area(&self, rect: Rect) -> Rect {
        if rect.width < 3 || rect.height < 4 {
            return Rect::default();
        }
        Rect {
            x: rect.x + 1,
            y: rect.y + 2,
            width: rect.width - 2,
            height: rect.height - 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buffer: &Buffer, y: u16, from: u16, to: u16) -> String {
        (from..to)
            .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn hit_test_maps_controls_and_header() {
        let deco = DefaultDecorator;
        let rect = Rect::new(10, 5, 30, 10);
        assert_eq!(deco.hit_test(rect, 12, 6), HeaderAction::Close);
        assert_eq!(deco.hit_test(rect, 14, 6), HeaderAction::Minimize);
        assert_eq!(deco.hit_test(rect, 16, 6), HeaderAction::Maximize);
        assert_eq!(deco.hit_test(rect, 13, 6), HeaderAction::Drag);
        assert_eq!(deco.hit_test(rect, 25, 6), HeaderAction::Drag);
        // top border and body are not header
        assert_eq!(deco.hit_test(rect, 25, 5), HeaderAction::None);
        assert_eq!(deco.hit_test(rect, 25, 8), HeaderAction::None);
    }

    #[test]
    fn renders_border_controls_and_title() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buffer = Buffer::empty(area);
        let deco = DefaultDecorator;
        deco.render_window(
            &mut buffer,
            Rect::new(0, 0, 30, 6),
            area,
            "grep",
            ChromeState::default(),
        );
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "┌");
        assert_eq!(buffer.cell((29, 5)).unwrap().symbol(), "┘");
        assert_eq!(buffer.cell((0, 3)).unwrap().symbol(), "│");
        assert_eq!(buffer.cell((2, 1)).unwrap().symbol(), "●");
        assert!(row_text(&buffer, 1, 8, 29).contains("grep"));
    }

    #[test]
    fn content_area_excludes_chrome() {
        let deco = DefaultDecorator;
        assert_eq!(
            deco.content_area(Rect::new(4, 4, 20, 10)),
            Rect::new(5, 6, 18, 7)
        );
        assert_eq!(deco.content_area(Rect::new(0, 0, 2, 2)), Rect::default());
    }
}
