use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so every widget picks the
// same palette.

pub fn header_bg() -> Color {
    Color::DarkGray
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn header_focused_bg() -> Color {
    Color::Blue
}
pub fn header_focused_fg() -> Color {
    Color::White
}
pub fn border_fg() -> Color {
    Color::DarkGray
}

// Window content
pub fn muted_fg() -> Color {
    Color::DarkGray
}
pub fn heading_fg() -> Color {
    Color::Cyan
}
pub fn label_fg() -> Color {
    Color::Green
}
pub fn line_number_fg() -> Color {
    Color::DarkGray
}

// Transcript
pub fn user_fg() -> Color {
    Color::Yellow
}
pub fn link_fg() -> Color {
    Color::Cyan
}
pub fn selected_bg() -> Color {
    Color::Gray
}
pub fn selected_fg() -> Color {
    Color::Black
}

// Dock
pub fn dock_bg() -> Color {
    Color::Black
}
pub fn dock_fg() -> Color {
    Color::Gray
}
pub fn dock_minimized_fg() -> Color {
    Color::DarkGray
}
pub fn dock_focused_bg() -> Color {
    Color::Gray
}
pub fn dock_focused_fg() -> Color {
    Color::Black
}
