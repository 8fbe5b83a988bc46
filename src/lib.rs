//! # chat2md
//!
//! A Rust library for extracting chat-style conversations from rendered
//! web-page markup and converting them to Markdown documents.
//!
//! ## Features
//!
//! - **Markup Conversion**: Rule-table-driven HTML-to-Markdown reduction
//!   (headings, lists, code blocks, emphasis, links, tables, blockquotes)
//! - **Conversation Segmentation**: Turn user/assistant page elements into
//!   a labeled, ordered document
//! - **Delivery Sinks**: Save as a dated Markdown file or copy to the
//!   system clipboard (with a command-line fallback)
//! - **MCP Server**: Model Context Protocol server exposing the export
//!   tools to AI agents
//!
//! ## MCP Server
//!
//! The server accepts captured page HTML and returns, saves, or copies the
//! assembled Markdown document:
//!
//! ```bash
//! cargo run --bin mcp-server
//! ```
//!
//! ## Library Usage
//!
//! ### Converting a page
//!
//! ```rust
//! use chat2md::dom::parse_markup;
//! use chat2md::extract::{self, PageSelectors};
//!
//! # fn main() -> chat2md::Result<()> {
//! let html = r#"
//!     <user-query><div class="query-text">Write a haiku</div></user-query>
//!     <model-response><div class="markdown"><p>Sure!</p></div></model-response>
//! "#;
//!
//! let page = parse_markup(html)?;
//! let document = extract::extract(&page, &PageSelectors::default())?;
//! let markdown = document.assemble();
//! assert!(markdown.starts_with("# Conversation\n\n## User\n\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Converting arbitrary markup
//!
//! ```rust
//! use chat2md::dom::parse_markup;
//! use chat2md::markdown;
//!
//! # fn main() -> chat2md::Result<()> {
//! let tree = parse_markup("<h1>Title</h1><p><strong>bold</strong></p>")?;
//! assert_eq!(markdown::convert(&tree), "# Title\n\n**bold**");
//! # Ok(())
//! # }
//! ```
//!
//! ### Using the command system
//!
//! ```rust,no_run
//! use chat2md::commands::{CommandContext, CommandRegistry};
//! use chat2md::dom::parse_markup;
//! use chat2md::extract::PageSelectors;
//! use serde_json::json;
//!
//! # fn main() -> chat2md::Result<()> {
//! let page = parse_markup("<user-query>…</user-query>")?;
//! let selectors = PageSelectors::default();
//! let registry = CommandRegistry::with_defaults();
//! let mut context = CommandContext::new(&page, &selectors);
//!
//! // Save the conversation as a dated .md file
//! registry.execute("download_markdown", json!({}), &mut context)?;
//!
//! // Or place it on the clipboard
//! registry.execute("copy_markdown", json!({}), &mut context)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Model
//!
//! Conversion itself never fails: unrecognized or malformed markup degrades
//! to pass-through text. The surfaced failures are a page with no
//! conversation turns ([`ExportError::NoConversation`]) and sink delivery
//! problems ([`ExportError::SinkFailed`]).
//!
//! ## Module Overview
//!
//! - [`dom`]: markup tree, HTML parsing, selector queries
//! - [`markdown`]: the conversion rule table and reduction driver
//! - [`extract`]: conversation segmentation
//! - [`document`]: roles, turns, and document assembly
//! - [`sink`]: download and clipboard delivery
//! - [`commands`]: named export commands behind a registry
//! - [`error`]: error types and result alias
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler`
//!   feature) - **Start here for AI integration**

pub mod commands;
pub mod document;
pub mod dom;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod sink;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use commands::{Command, CommandContext, CommandOutcome, CommandRegistry};
pub use document::{ConversationDocument, Role, Turn};
pub use dom::{parse_markup, ElementNode, MarkupNode, Selector};
pub use error::{ExportError, Result};
pub use extract::{extract, PageSelectors};

#[cfg(feature = "mcp-handler")]
pub use mcp::ExportServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
