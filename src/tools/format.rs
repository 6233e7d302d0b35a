//! How tool-call parameters are shown: the compact one-line signature in the
//! transcript and the per-tool detail layout inside a tool-call window.

use serde_json::Value;

/// Parameters shown in the one-line signature, in this order.
pub const PARAMETER_ORDER: [&str; 5] = [
    "registry_name",
    "package_name",
    "pattern",
    "semantic_queries",
    "filename_sha256",
];

const PATTERN_PREVIEW_CHARS: usize = 10;
const HASH_PREVIEW_CHARS: usize = 5;

/// Text of a JSON value the way a person would write it: bare strings,
/// compact JSON for everything else.
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// JavaScript-style truthiness: null, false, 0 and "" are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Short form of one parameter for the signature line.
pub fn format_parameter_value(key: &str, value: &Value) -> String {
    match key {
        "pattern" => {
            let pattern = plain_text(value);
            let preview = take_chars(&pattern, PATTERN_PREVIEW_CHARS);
            if preview.len() < pattern.len() {
                format!("/{preview}.../g")
            } else {
                format!("/{pattern}/g")
            }
        }
        "filename_sha256" => {
            let hash = plain_text(value);
            format!("\"{}...\"", take_chars(&hash, HASH_PREVIEW_CHARS))
        }
        _ => format!("\"{}\"", plain_text(value)),
    }
}

/// `tool_name(param, param, ...)` using the parameters in [`PARAMETER_ORDER`]
/// that the input carries.
pub fn tool_call_signature(tool_name: &str, input: &Value) -> String {
    let params: Vec<String> = PARAMETER_ORDER
        .iter()
        .filter_map(|key| {
            input
                .get(key)
                .map(|value| format_parameter_value(key, value))
        })
        .collect();
    format!("{tool_name}({})", params.join(", "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    /// The value as text, `N/A` when falsy.
    Plain,
    /// `/value/g`, never truncated.
    Pattern,
    /// One `- query` line per array element.
    QueryList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolParam {
    pub key: &'static str,
    pub label: Option<&'static str>,
    pub format: ParamFormat,
    /// Skip the parameter unless its value is truthy.
    pub only_if_set: bool,
}

impl ToolParam {
    const fn plain(key: &'static str) -> Self {
        Self {
            key,
            label: None,
            format: ParamFormat::Plain,
            only_if_set: false,
        }
    }

    const fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    const fn formatted(mut self, format: ParamFormat) -> Self {
        self.format = format;
        self
    }

    const fn if_set(mut self) -> Self {
        self.only_if_set = true;
        self
    }

    pub fn label(&self) -> &'static str {
        self.label.unwrap_or(self.key)
    }

    fn render(&self, value: &Value) -> Vec<String> {
        match self.format {
            ParamFormat::Plain if is_truthy(value) => vec![plain_text(value)],
            ParamFormat::Plain => vec!["N/A".to_string()],
            ParamFormat::Pattern => vec![format!("/{}/g", plain_text(value))],
            ParamFormat::QueryList => match value {
                Value::Array(queries) => queries
                    .iter()
                    .map(|query| format!("- {}", plain_text(query)))
                    .collect(),
                other => vec![plain_text(other)],
            },
        }
    }
}

/// Detail layout for a known search tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ToolParam],
}

/// One labelled parameter of a tool-call detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDetail {
    pub label: &'static str,
    pub lines: Vec<String>,
}

impl ToolConfig {
    pub fn title(&self) -> String {
        format!("# {}", self.name)
    }

    /// Parameters to show for `input`, in table order. Absent keys and
    /// conditional keys with falsy values are skipped.
    pub fn details(&self, input: &Value) -> Vec<ParamDetail> {
        self.params
            .iter()
            .filter_map(|param| {
                let value = input.get(param.key)?;
                if param.only_if_set && !is_truthy(value) {
                    return None;
                }
                Some(ParamDetail {
                    label: param.label(),
                    lines: param.render(value),
                })
            })
            .collect()
    }
}

const TOOL_CONFIGS: &[ToolConfig] = &[
    ToolConfig {
        name: "package_search_grep",
        description: "Searches for exact pattern matches within package code using regular expressions.",
        params: &[
            ToolParam::plain("registry_name"),
            ToolParam::plain("package_name"),
            ToolParam::plain("pattern").formatted(ParamFormat::Pattern),
            ToolParam::plain("head_limit").if_set(),
        ],
    },
    ToolConfig {
        name: "package_search_hybrid",
        description: "Combines semantic search with pattern matching for more intelligent code discovery",
        params: &[
            ToolParam::plain("registry_name"),
            ToolParam::plain("package_name"),
            ToolParam::plain("semantic_queries")
                .formatted(ParamFormat::QueryList)
                .if_set(),
            ToolParam::plain("pattern")
                .formatted(ParamFormat::Pattern)
                .if_set(),
            ToolParam::plain("head_limit").if_set(),
        ],
    },
    ToolConfig {
        name: "package_search_read_file",
        description: "Reads specific lines from a file in a package using its SHA256 hash",
        params: &[
            ToolParam::plain("registry_name"),
            ToolParam::plain("package_name"),
            ToolParam::plain("filename_sha256").labelled("File SHA256"),
            ToolParam::plain("start_line").if_set(),
            ToolParam::plain("end_line").if_set(),
        ],
    },
];

pub fn tool_config(tool_name: &str) -> Option<&'static ToolConfig> {
    TOOL_CONFIGS.iter().find(|config| config.name == tool_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pattern_is_truncated_after_ten_chars() {
        assert_eq!(format_parameter_value("pattern", &json!("useState")), "/useState/g");
        assert_eq!(
            format_parameter_value("pattern", &json!("0123456789")),
            "/0123456789/g"
        );
        assert_eq!(
            format_parameter_value("pattern", &json!("fn\\s+handle_event")),
            "/fn\\s+handl.../g"
        );
    }

    #[test]
    fn hash_and_other_values() {
        assert_eq!(
            format_parameter_value("filename_sha256", &json!("abcdef0123")),
            "\"abcde...\""
        );
        assert_eq!(
            format_parameter_value("semantic_queries", &json!(["a", "b"])),
            "\"[\"a\",\"b\"]\""
        );
        assert_eq!(format_parameter_value("registry_name", &json!("npm")), "\"npm\"");
    }

    #[test]
    fn signature_follows_parameter_order() {
        let input = json!({
            "pattern": "x",
            "head_limit": 5,
            "registry_name": "crates_io",
            "package_name": "serde",
        });
        assert_eq!(
            tool_call_signature("package_search_grep", &input),
            "package_search_grep(\"crates_io\", \"serde\", /x/g)"
        );
        assert_eq!(tool_call_signature("t", &json!({})), "t()");
    }

    #[test]
    fn hybrid_details_skip_unset_optionals() {
        let config = tool_config("package_search_hybrid").unwrap();
        assert_eq!(config.title(), "# package_search_hybrid");
        let details = config.details(&json!({
            "registry_name": "npm",
            "package_name": "react",
            "semantic_queries": ["state hooks", "effects"],
            "pattern": "",
        }));
        let labels: Vec<&str> = details.iter().map(|d| d.label).collect();
        assert_eq!(labels, vec!["registry_name", "package_name", "semantic_queries"]);
        assert_eq!(details[2].lines, vec!["- state hooks", "- effects"]);
    }

    #[test]
    fn read_file_details_use_label_and_na() {
        let config = tool_config("package_search_read_file").unwrap();
        let details = config.details(&json!({
            "registry_name": "",
            "filename_sha256": "deadbeef",
            "start_line": 0,
            "end_line": 40,
        }));
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].lines, vec!["N/A"]);
        assert_eq!(details[1].label, "File SHA256");
        assert_eq!(details[2].label, "end_line");
        assert_eq!(details[2].lines, vec!["40"]);
    }

    #[test]
    fn unknown_tool_has_no_config() {
        assert!(tool_config("web_search").is_none());
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(3)));
    }
}
