//! Conversation document model and assembly
//!
//! A [`ConversationDocument`] is fully materialized in memory before any
//! sink sees it; assembly is a literal concatenation with no trailing
//! trimming.

use serde::{Deserialize, Serialize};

/// Who authored a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Fixed heading label for this role
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One conversation turn with its converted Markdown body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the turn
    pub role: Role,

    /// Converted Markdown text of the turn
    pub markdown: String,
}

impl Turn {
    /// Create a new turn
    pub fn new(role: Role, markdown: impl Into<String>) -> Self {
        Self {
            role,
            markdown: markdown.into(),
        }
    }
}

/// A complete extracted conversation, ordered as on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDocument {
    /// Conversation title (defaulted when the page carries none)
    pub title: String,

    /// Turns in document order
    pub turns: Vec<Turn>,
}

impl ConversationDocument {
    /// Create a new document
    pub fn new(title: impl Into<String>, turns: Vec<Turn>) -> Self {
        Self {
            title: title.into(),
            turns,
        }
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the document has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Assemble the final Markdown document
    ///
    /// Emits `# {title}` then, per turn, `## {RoleLabel}`, the body, and a
    /// `---` separator. The output is the literal concatenation; nothing
    /// after the final separator is trimmed or altered.
    pub fn assemble(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        for turn in &self.turns {
            out.push_str(&format!(
                "## {}\n\n{}\n\n---\n\n",
                turn.role.label(),
                turn.markdown
            ));
        }
        out
    }
}
