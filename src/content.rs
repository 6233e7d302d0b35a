//! Payloads a floating window can carry, and how each one becomes text.
//!
//! The window core never looks inside a [`WindowContent`]; the overlay asks
//! it for styled lines once per frame and scrolls over them.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;

use crate::theme;
use crate::tools::format::tool_config;
use crate::tools::{GroupedSearchResult, ReadFileResult, ToolInvocation};

#[derive(Debug, Clone, PartialEq)]
pub enum WindowContent {
    Text(String),
    ToolCall(ToolCallView),
    SearchResult(GroupedSearchResult),
    ReadFile(ReadFileResult),
}

/// Input and output of one tool call, shown in a details window.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallView {
    pub tool_name: String,
    pub input: Value,
    pub output: Option<Value>,
}

impl From<&ToolInvocation> for ToolCallView {
    fn from(invocation: &ToolInvocation) -> Self {
        Self {
            tool_name: invocation.tool_name.clone(),
            input: invocation.input.clone(),
            output: invocation.output.clone(),
        }
    }
}

impl WindowContent {
    pub fn kind(&self) -> &'static str {
        match self {
            WindowContent::Text(_) => "text",
            WindowContent::ToolCall(_) => "tool-call",
            WindowContent::SearchResult(_) => "search-result",
            WindowContent::ReadFile(_) => "read-file",
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'static>> {
        match self {
            WindowContent::Text(text) => text
                .lines()
                .map(|line| Line::raw(line.to_string()))
                .collect(),
            WindowContent::ToolCall(view) => tool_call_lines(view),
            WindowContent::SearchResult(group) => search_result_lines(group),
            WindowContent::ReadFile(result) => read_file_lines(result),
        }
    }
}

fn heading(text: String) -> Line<'static> {
    Line::styled(
        text,
        Style::default()
            .fg(theme::heading_fg())
            .add_modifier(Modifier::BOLD),
    )
}

fn label(text: String) -> Line<'static> {
    Line::styled(
        text,
        Style::default()
            .fg(theme::label_fg())
            .add_modifier(Modifier::BOLD),
    )
}

fn muted(text: String) -> Line<'static> {
    Line::styled(text, Style::default().fg(theme::muted_fg()))
}

fn tool_call_lines(view: &ToolCallView) -> Vec<Line<'static>> {
    let Some(config) = tool_config(&view.tool_name) else {
        let mut lines = vec![
            heading(format!("# {}", view.tool_name)),
            muted("# Tool call details and parameters".to_string()),
            Line::default(),
            label("input:".to_string()),
        ];
        let pretty = serde_json::to_string_pretty(&view.input)
            .unwrap_or_else(|_| view.input.to_string());
        lines.extend(pretty.lines().map(|line| Line::raw(format!("  {line}"))));
        return lines;
    };
    let mut lines = vec![
        heading(config.title()),
        Line::raw(config.description.to_string()),
        Line::default(),
    ];
    for detail in config.details(&view.input) {
        lines.push(label(format!("{}:", detail.label)));
        lines.extend(
            detail
                .lines
                .into_iter()
                .map(|value| Line::raw(format!("  {value}"))),
        );
    }
    lines
}

/// Code lines prefixed with right-aligned line numbers.
fn numbered(content: &str, first_line: u32, gutter: usize) -> Vec<Line<'static>> {
    content
        .lines()
        .enumerate()
        .map(|(offset, code)| {
            let number = u64::from(first_line) + offset as u64;
            Line::from(vec![
                Span::styled(
                    format!("{number:>gutter$} │ "),
                    Style::default().fg(theme::line_number_fg()),
                ),
                Span::raw(code.to_string()),
            ])
        })
        .collect()
}

fn search_result_lines(group: &GroupedSearchResult) -> Vec<Line<'static>> {
    let snippets = group.merged_snippets();
    let gutter = snippets
        .iter()
        .map(|snippet| snippet.end_line.to_string().len())
        .max()
        .unwrap_or(1);
    let mut lines = vec![heading(group.file_path.clone()), Line::default()];
    for (index, snippet) in snippets.iter().enumerate() {
        if index > 0 {
            lines.push(muted("⋯".to_string()));
        }
        lines.extend(numbered(&snippet.content, snippet.start_line, gutter));
    }
    lines.push(Line::default());
    lines.push(label("Language:".to_string()));
    lines.push(Line::raw(format!("  {}", group.language)));
    lines.push(label("File Hash:".to_string()));
    lines.push(Line::raw(format!("  {}", group.filename_sha256)));
    lines
}

fn read_file_lines(result: &ReadFileResult) -> Vec<Line<'static>> {
    let gutter = result.end_line.to_string().len();
    let mut lines = vec![muted(result.file_path.clone()), Line::default()];
    lines.extend(numbered(&result.content, result.start_line, gutter));
    lines
}
