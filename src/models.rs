//! Core data models used throughout the chatbot.
//!
//! These types represent the documents, ranked excerpts, and chat turns that
//! flow through the answer pipeline.

use serde::{Deserialize, Serialize};

/// A document loaded from one configured path.
///
/// Created once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// The path or URL the document was read from.
    pub path: String,
    /// Raw text body.
    pub content: String,
}

/// A document that matched at least one query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredDocument {
    pub path: String,
    pub content: String,
    /// Number of query tokens found in the content. Always `>= 1`.
    pub score: u32,
}

/// Speaker of a [`ChatTurn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Which path of the pipeline produced an [`Answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Generated by the completion service.
    Completion,
    /// Looked up in the canned-response table.
    Canned,
    /// The completion call failed and the fixed apology was returned.
    Apology,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Completion => "completion",
            Origin::Canned => "canned",
            Origin::Apology => "apology",
        }
    }
}

/// Text handed back to the visitor, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub text: String,
    pub origin: Origin,
}

impl Answer {
    pub fn new(text: impl Into<String>, origin: Origin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}
