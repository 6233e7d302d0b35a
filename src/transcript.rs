//! Recorded conversations: the messages and tool calls the viewer replays.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tools::ToolInvocation;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid transcript: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
    Text { text: String },
    Reasoning { text: String },
    #[serde(alias = "dynamic-tool")]
    Tool(ToolInvocation),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Transcript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let transcript = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            messages = transcript.messages.len(),
            "loaded transcript"
        );
        Ok(transcript)
    }

    pub fn from_json(raw: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Every tool call in conversation order.
    pub fn tool_invocations(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.messages
            .iter()
            .flat_map(|message| message.parts.iter())
            .filter_map(|part| match part {
                MessagePart::Tool(invocation) => Some(invocation),
                _ => None,
            })
    }
}
