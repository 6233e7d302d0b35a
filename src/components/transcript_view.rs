//! The conversation pane: messages, tool-call signatures and the result
//! lines under them. Activating a tool line opens a floating window.

use std::collections::BTreeSet;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::components::{Component, ComponentContext};
use crate::constants::MAX_VISIBLE_RESULTS;
use crate::layout::rect_contains;
use crate::theme;
use crate::tools::format::is_truthy;
use crate::tools::{
    GroupedSearchResult, ToolInvocation, ToolOutput, group_search_results, parse_tool_output,
    read_file_window, search_result_window, tool_call_signature, tool_call_window,
};
use crate::transcript::{MessagePart, Role, Transcript};
use crate::ui::UiFrame;
use crate::window::WindowId;

/// What activating a transcript row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    OpenToolCall { call: usize },
    OpenSearchResult { call: usize, group: usize },
    ShowAllResults { call: usize },
    OpenReadFile { call: usize },
}

#[derive(Debug, Clone)]
struct Row {
    line: Line<'static>,
    action: Option<RowAction>,
}

impl Row {
    fn plain(line: Line<'static>) -> Self {
        Self { line, action: None }
    }

    fn action(line: Line<'static>, action: RowAction) -> Self {
        Self {
            line,
            action: Some(action),
        }
    }
}

#[derive(Debug)]
struct ToolEntry {
    invocation: ToolInvocation,
    output: ToolOutput,
    groups: Vec<GroupedSearchResult>,
}

#[derive(Debug)]
pub struct TranscriptView {
    transcript: Transcript,
    calls: Vec<ToolEntry>,
    expanded: BTreeSet<usize>,
    rows: Vec<Row>,
    selected: Option<usize>,
    offset: usize,
    follow_selection: bool,
    area: Rect,
}

impl TranscriptView {
    pub fn new(transcript: Transcript) -> Self {
        let calls = transcript
            .tool_invocations()
            .map(|invocation| {
                let output = parse_tool_output(invocation.output.as_ref(), &invocation.tool_name);
                let groups = match &output {
                    ToolOutput::Search(data) => group_search_results(&data.results),
                    _ => Vec::new(),
                };
                ToolEntry {
                    invocation: invocation.clone(),
                    output,
                    groups,
                }
            })
            .collect();
        let mut view = Self {
            transcript,
            calls,
            expanded: BTreeSet::new(),
            rows: Vec::new(),
            selected: None,
            offset: 0,
            follow_selection: true,
            area: Rect::default(),
        };
        view.rebuild_rows();
        let first = view.actionable().next();
        view.selected = first;
        view
    }

    pub fn selected_action(&self) -> Option<RowAction> {
        self.selected
            .and_then(|row| self.rows.get(row))
            .and_then(|row| row.action)
    }

    /// Actions in display order.
    pub fn actions(&self) -> Vec<RowAction> {
        self.rows.iter().filter_map(|row| row.action).collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.line.to_string()).collect()
    }

    fn actionable(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.action.is_some())
            .map(|(index, _)| index)
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        let mut call = 0;
        for message in &self.transcript.messages {
            if !rows.is_empty() {
                rows.push(Row::plain(Line::default()));
            }
            for part in &message.parts {
                match part {
                    MessagePart::Text { text } => {
                        let style = match message.role {
                            Role::User => Style::default().fg(theme::user_fg()),
                            Role::Assistant | Role::System => Style::default(),
                        };
                        let prefix = if message.role == Role::User { "> " } else { "" };
                        rows.extend(text.lines().map(|line| {
                            Row::plain(Line::styled(format!("{prefix}{line}"), style))
                        }));
                    }
                    MessagePart::Reasoning { text } => {
                        let first = text.lines().next().unwrap_or_default();
                        rows.push(Row::plain(Line::styled(
                            format!("∴ {first}"),
                            Style::default()
                                .fg(theme::muted_fg())
                                .add_modifier(Modifier::ITALIC),
                        )));
                    }
                    MessagePart::Tool(_) => {
                        if let Some(entry) = self.calls.get(call) {
                            tool_rows(&mut rows, call, entry, self.expanded.contains(&call));
                        }
                        call += 1;
                    }
                    MessagePart::Unknown => {}
                }
            }
        }
        self.rows = rows;
    }

    fn move_selection(&mut self, forward: bool) {
        self.follow_selection = true;
        let actionable: Vec<usize> = self.actionable().collect();
        let Some(current) = self.selected else {
            self.selected = actionable.first().copied();
            return;
        };
        let next = if forward {
            actionable.iter().copied().find(|&row| row > current)
        } else {
            actionable.iter().rev().copied().find(|&row| row < current)
        };
        if let Some(next) = next {
            self.selected = Some(next);
        }
    }

    /// Run `action` against the registry in `ctx`. Returns the window it
    /// opened, if any.
    pub fn activate(&mut self, action: RowAction, ctx: &ComponentContext) -> Option<WindowId> {
        let spec = match action {
            RowAction::OpenToolCall { call } => tool_call_window(&self.calls.get(call)?.invocation),
            RowAction::OpenSearchResult { call, group } => {
                search_result_window(self.calls.get(call)?.groups.get(group)?, group)
            }
            RowAction::OpenReadFile { call } => match &self.calls.get(call)?.output {
                ToolOutput::ReadFile(result) => read_file_window(result),
                _ => return None,
            },
            RowAction::ShowAllResults { call } => {
                self.expanded.insert(call);
                self.rebuild_rows();
                return None;
            }
        };
        let title = spec.title.clone();
        let kind = spec.content.kind();
        let id = ctx.windows().open_window(spec);
        tracing::info!(window_id = %id, %title, kind, "opened tool window");
        Some(id)
    }

    fn activate_selected(&mut self, ctx: &ComponentContext) -> bool {
        match self.selected_action() {
            Some(action) => {
                self.activate(action, ctx);
                true
            }
            None => false,
        }
    }

    fn keep_selected_in_view(&mut self, view: usize) {
        let Some(selected) = self.selected else {
            return;
        };
        if view == 0 {
            self.offset = 0;
        } else if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + view {
            self.offset = selected + 1 - view;
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.follow_selection = false;
        let max_offset = self.rows.len().saturating_sub(self.area.height as usize);
        self.offset = if delta.is_negative() {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as usize).min(max_offset)
        };
    }
}

fn tool_rows(rows: &mut Vec<Row>, call: usize, entry: &ToolEntry, show_all: bool) {
    let invocation = &entry.invocation;
    if is_truthy(&invocation.input) {
        let signature = tool_call_signature(&invocation.tool_name, &invocation.input);
        rows.push(Row::action(
            Line::styled(
                signature,
                Style::default()
                    .fg(theme::link_fg())
                    .add_modifier(Modifier::UNDERLINED),
            ),
            RowAction::OpenToolCall { call },
        ));
    }
    let branch = |first: bool| if first { "  ⎿ " } else { "    " };
    match &entry.output {
        ToolOutput::Search(_) if entry.groups.is_empty() => {
            rows.push(Row::plain(Line::raw("  ⎿ No search results found")));
        }
        ToolOutput::Search(_) => {
            let visible = if show_all {
                entry.groups.len()
            } else {
                entry.groups.len().min(MAX_VISIBLE_RESULTS)
            };
            for (group, result) in entry.groups.iter().take(visible).enumerate() {
                rows.push(Row::action(
                    Line::from(vec![
                        Span::raw(branch(group == 0)),
                        Span::raw(result.file_path.clone()),
                    ]),
                    RowAction::OpenSearchResult { call, group },
                ));
            }
            let hidden = entry.groups.len().saturating_sub(MAX_VISIBLE_RESULTS);
            if !show_all && hidden > 0 {
                rows.push(Row::action(
                    Line::styled(
                        format!("    and {hidden} more..."),
                        Style::default().fg(theme::muted_fg()),
                    ),
                    RowAction::ShowAllResults { call },
                ));
            }
        }
        ToolOutput::ReadFile(result) => {
            rows.push(Row::action(
                Line::raw(format!("{}{}", branch(true), result.summary())),
                RowAction::OpenReadFile { call },
            ));
        }
        ToolOutput::None => {}
    }
}

impl Component for TranscriptView {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let view = area.height as usize;
        if self.follow_selection {
            self.keep_selected_in_view(view);
        }
        self.offset = self.offset.min(self.rows.len().saturating_sub(view));
        let lines: Vec<Line<'static>> = self
            .rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(view)
            .map(|(index, row)| {
                if Some(index) == self.selected {
                    row.line.clone().patch_style(
                        Style::default()
                            .bg(theme::selected_bg())
                            .fg(theme::selected_fg()),
                    )
                } else {
                    row.line.clone()
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection(false);
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection(true);
                    true
                }
                KeyCode::Enter => self.activate_selected(ctx),
                _ => false,
            },
            Event::Mouse(mouse) => {
                if !rect_contains(self.area, mouse.column, mouse.row) {
                    return false;
                }
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let row = self.offset + (mouse.row - self.area.y) as usize;
                        let Some(action) = self.rows.get(row).and_then(|row| row.action) else {
                            return false;
                        };
                        self.selected = Some(row);
                        self.activate(action, ctx);
                        true
                    }
                    MouseEventKind::ScrollDown => {
                        self.scroll_by(3);
                        true
                    }
                    MouseEventKind::ScrollUp => {
                        self.scroll_by(-3);
                        true
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }
}
