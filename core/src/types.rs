use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of raw NASA characters shown under the analysis
pub const DEFAULT_SNIPPET_LENGTH: usize = 500;

/// Marker appended after the raw data snippet
pub const SNIPPET_ELLIPSIS: &str = "...";

/// Payload of `GET /api/mars/analyze`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub gpt_analysis: String,
    pub nasa_raw_data: String,
}

impl AnalysisResult {
    /// First `length` characters of the raw NASA payload followed by `...`.
    ///
    /// The ellipsis is always appended, even when the payload is shorter
    /// than `length`.
    pub fn raw_data_snippet(&self, length: usize) -> String {
        let mut snippet: String = self.nasa_raw_data.chars().take(length).collect();
        snippet.push_str(SNIPPET_ELLIPSIS);
        snippet
    }
}

/// Body of `POST /api/mars/chat`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub question: String,
}

/// Response of `POST /api/mars/chat`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
}

/// Author of a chat message
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Bot => write!(f, "bot"),
        }
    }
}

/// One entry of the chat history
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    pub fn bot(content: String) -> Self {
        Self {
            role: Role::Bot,
            content,
        }
    }
}
