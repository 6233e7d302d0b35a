//! Code-search tool results: wire models, parsing, and grouping.
//!
//! The search service answers tool calls with MCP-style output whose first
//! text block holds a JSON document. These types mirror those documents;
//! everything here is tolerant of missing or malformed output because a
//! half-finished tool call is an ordinary sight in a streaming chat.

pub mod format;
pub mod windows;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use format::{PARAMETER_ORDER, ToolConfig, format_parameter_value, tool_call_signature};
pub use windows::{read_file_window, search_result_window, tool_call_window};

pub const READ_FILE_TOOL: &str = "package_search_read_file";

/// One tool call made by the assistant, as recorded in a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    #[serde(default)]
    pub tool_call_id: String,
    pub tool_name: String,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub content: String,
    pub filename_sha256: String,
    pub file_path: String,
    pub language: String,
    pub start_line: u32,
    pub end_line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub output_mode: String,
    pub result: SearchHit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultsData {
    #[serde(default)]
    pub version_used: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub truncation_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileResult {
    #[serde(default)]
    pub version_used: String,
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub content: String,
    #[serde(default)]
    pub total_lines: u32,
}

impl ReadFileResult {
    pub fn line_count(&self) -> u32 {
        self.end_line
            .checked_sub(self.start_line)
            .map_or(0, |span| span.saturating_add(1))
    }

    pub fn file_name(&self) -> &str {
        file_name(&self.file_path)
    }

    /// One-line description shown under the tool call.
    pub fn summary(&self) -> String {
        format!("Read {} lines of {}", self.line_count(), self.file_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub content: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// All hits that landed in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedSearchResult {
    pub filename_sha256: String,
    pub file_path: String,
    pub language: String,
    pub snippets: Vec<CodeSnippet>,
}

impl GroupedSearchResult {
    pub fn file_name(&self) -> &str {
        file_name(&self.file_path)
    }

    pub fn merged_snippets(&self) -> Vec<CodeSnippet> {
        merge_snippets(&self.snippets)
    }
}

/// Decoded tool output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    Search(SearchResultsData),
    ReadFile(ReadFileResult),
    None,
}

/// Last path segment, or `"Unknown File"` for an empty path.
pub fn file_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "Unknown File",
    }
}

/// Decode the JSON document carried in `output.content[0].text`.
///
/// The read-file tool produces a single file slice; every other tool
/// produces a search result list. Anything that does not decode yields
/// `ToolOutput::None`.
pub fn parse_tool_output(output: Option<&Value>, tool_name: &str) -> ToolOutput {
    let Some(text) = output
        .and_then(|output| output.get("content"))
        .and_then(|content| content.get(0))
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str)
    else {
        return ToolOutput::None;
    };
    let parsed = if tool_name == READ_FILE_TOOL {
        serde_json::from_str::<ReadFileResult>(text).map(ToolOutput::ReadFile)
    } else {
        serde_json::from_str::<SearchResultsData>(text).map(ToolOutput::Search)
    };
    match parsed {
        Ok(output) => output,
        Err(err) => {
            tracing::debug!(tool = tool_name, error = %err, "undecodable tool output");
            ToolOutput::None
        }
    }
}

/// Group hits by file hash, keeping files in first-seen order and hits in
/// their original order within a file.
pub fn group_search_results(results: &[SearchResult]) -> Vec<GroupedSearchResult> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupedSearchResult> = Vec::new();
    for item in results {
        let hit = &item.result;
        let slot = *index.entry(hit.filename_sha256.as_str()).or_insert_with(|| {
            groups.push(GroupedSearchResult {
                filename_sha256: hit.filename_sha256.clone(),
                file_path: hit.file_path.clone(),
                language: hit.language.clone(),
                snippets: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].snippets.push(CodeSnippet {
            content: hit.content.clone(),
            start_line: hit.start_line,
            end_line: hit.end_line,
        });
    }
    groups
}

/// Sort snippets by start line and fuse those that touch or overlap.
///
/// Where two snippets overlap, the lines already covered by the earlier one
/// are dropped from the later one so line numbering stays exact.
pub fn merge_snippets(snippets: &[CodeSnippet]) -> Vec<CodeSnippet> {
    let mut sorted = snippets.to_vec();
    sorted.sort_by_key(|snippet| snippet.start_line);
    let mut merged: Vec<CodeSnippet> = Vec::with_capacity(sorted.len());
    for snippet in sorted {
        let Some(last) = merged.last_mut() else {
            merged.push(snippet);
            continue;
        };
        if snippet.start_line > last.end_line.saturating_add(1) {
            merged.push(snippet);
            continue;
        }
        let overlap = last
            .end_line
            .checked_sub(snippet.start_line)
            .map_or(0, |covered| covered as usize + 1);
        let fresh: Vec<&str> = snippet.content.lines().skip(overlap).collect();
        if !fresh.is_empty() {
            last.content.push('\n');
            last.content.push_str(&fresh.join("\n"));
        }
        last.end_line = last.end_line.max(snippet.end_line);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(sha: &str, path: &str, start: u32, end: u32, content: &str) -> SearchResult {
        SearchResult {
            output_mode: "content".into(),
            result: SearchHit {
                content: content.into(),
                filename_sha256: sha.into(),
                file_path: path.into(),
                language: "Rust".into(),
                start_line: start,
                end_line: end,
            },
        }
    }

    fn snippet(start: u32, end: u32, content: &str) -> CodeSnippet {
        CodeSnippet {
            content: content.into(),
            start_line: start,
            end_line: end,
        }
    }

    #[test]
    fn grouping_keeps_first_seen_file_order() {
        let results = vec![
            hit("b", "src/b.rs", 10, 12, "b1"),
            hit("a", "src/a.rs", 1, 2, "a1"),
            hit("b", "src/b.rs", 1, 3, "b2"),
        ];
        let groups = group_search_results(&results);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].file_path, "src/b.rs");
        assert_eq!(groups[0].snippets.len(), 2);
        assert_eq!(groups[0].snippets[0].content, "b1");
        assert_eq!(groups[1].file_name(), "a.rs");
    }

    #[test]
    fn merge_fuses_adjacent_and_keeps_gaps() {
        let merged = merge_snippets(&[
            snippet(20, 21, "t\nu"),
            snippet(1, 2, "a\nb"),
            snippet(3, 4, "c\nd"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], snippet(1, 4, "a\nb\nc\nd"));
        assert_eq!(merged[1], snippet(20, 21, "t\nu"));
    }

    #[test]
    fn merge_drops_overlapping_lines() {
        let merged = merge_snippets(&[snippet(1, 3, "a\nb\nc"), snippet(2, 5, "b\nc\nd\ne")]);
        assert_eq!(merged, vec![snippet(1, 5, "a\nb\nc\nd\ne")]);
        let contained = merge_snippets(&[snippet(1, 10, "x"), snippet(2, 3, "y\nz")]);
        assert_eq!(contained, vec![snippet(1, 10, "x")]);
    }

    #[test]
    fn last_representable_line_does_not_overflow() {
        let merged = merge_snippets(&[
            snippet(u32::MAX - 1, u32::MAX, "y\nz"),
            snippet(u32::MAX, u32::MAX, "z"),
        ]);
        assert_eq!(merged, vec![snippet(u32::MAX - 1, u32::MAX, "y\nz")]);

        let read = ReadFileResult {
            version_used: String::new(),
            file_path: "big.txt".into(),
            start_line: 1,
            end_line: u32::MAX,
            content: String::new(),
            total_lines: 0,
        };
        assert_eq!(read.line_count(), u32::MAX);
    }

    #[test]
    fn parses_search_and_read_file_output() {
        let search = json!({
            "content": [{"type": "text", "text": json!({
                "version_used": "1.0.0",
                "results": [{"output_mode": "content", "result": {
                    "content": "fn main() {}", "filename_sha256": "abc",
                    "file_path": "src/main.rs", "language": "Rust",
                    "start_line": 1, "end_line": 1
                }}]
            }).to_string()}]
        });
        match parse_tool_output(Some(&search), "package_search_grep") {
            ToolOutput::Search(data) => {
                assert_eq!(data.version_used, "1.0.0");
                assert_eq!(data.results[0].result.file_path, "src/main.rs");
            }
            other => panic!("expected search output, got {other:?}"),
        }

        let read = json!({
            "content": [{"type": "text", "text": json!({
                "version_used": "1.0.0", "file_path": "lib/x.py",
                "start_line": 5, "end_line": 9, "content": "...", "total_lines": 100
            }).to_string()}]
        });
        match parse_tool_output(Some(&read), READ_FILE_TOOL) {
            ToolOutput::ReadFile(result) => {
                assert_eq!(result.line_count(), 5);
                assert_eq!(result.summary(), "Read 5 lines of lib/x.py");
            }
            other => panic!("expected read-file output, got {other:?}"),
        }
    }

    #[test]
    fn malformed_output_is_none() {
        assert_eq!(parse_tool_output(None, "x"), ToolOutput::None);
        let not_json = json!({"content": [{"type": "text", "text": "oops"}]});
        assert_eq!(parse_tool_output(Some(&not_json), "x"), ToolOutput::None);
        let empty = json!({"content": []});
        assert_eq!(parse_tool_output(Some(&empty), "x"), ToolOutput::None);
    }

    #[test]
    fn file_name_falls_back() {
        assert_eq!(file_name("a/b/c.rs"), "c.rs");
        assert_eq!(file_name("c.rs"), "c.rs");
        assert_eq!(file_name("dir/"), "Unknown File");
        assert_eq!(file_name(""), "Unknown File");
    }
}
