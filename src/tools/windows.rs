//! Window specs for the three kinds of tool window the transcript opens.

use super::{GroupedSearchResult, ReadFileResult, ToolInvocation};
use crate::constants::SEARCH_WINDOW_CASCADE;
use crate::content::{ToolCallView, WindowContent};
use crate::window::{FloatRect, WindowSpec};

const TOOL_CALL_GEOMETRY: FloatRect = FloatRect::new(650, 100, 400, 600);
const SEARCH_RESULT_ORIGIN: (i32, i32) = (550, 50);
const SEARCH_RESULT_SIZE: (i32, i32) = (350, 600);
const READ_FILE_GEOMETRY: FloatRect = FloatRect::new(550, 50, 350, 500);

pub fn tool_call_window(invocation: &ToolInvocation) -> WindowSpec {
    WindowSpec::new(
        format!("{} - Tool Call Details", invocation.tool_name),
        WindowContent::ToolCall(ToolCallView::from(invocation)),
        TOOL_CALL_GEOMETRY,
    )
}

/// Window for the `index`-th file of a result list. Successive files
/// cascade down and to the right so they do not stack exactly.
pub fn search_result_window(group: &GroupedSearchResult, index: usize) -> WindowSpec {
    let count = group.snippets.len();
    let noun = if count == 1 { "snippet" } else { "snippets" };
    let offset = i32::try_from(index)
        .unwrap_or(i32::MAX)
        .saturating_mul(SEARCH_WINDOW_CASCADE);
    let (x, y) = SEARCH_RESULT_ORIGIN;
    let (width, height) = SEARCH_RESULT_SIZE;
    WindowSpec::new(
        format!("{} ({count} {noun})", group.file_name()),
        WindowContent::SearchResult(group.clone()),
        FloatRect::new(
            x.saturating_add(offset),
            y.saturating_add(offset),
            width,
            height,
        ),
    )
}

pub fn read_file_window(result: &ReadFileResult) -> WindowSpec {
    WindowSpec::new(
        result.file_name(),
        WindowContent::ReadFile(result.clone()),
        READ_FILE_GEOMETRY,
    )
}
