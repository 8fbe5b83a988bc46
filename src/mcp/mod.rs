//! MCP (Model Context Protocol) server implementation for conversation export
//!
//! This module provides rmcp-compatible tools by wrapping the command
//! registry. Each tool accepts the page's serialized HTML, so agents can
//! feed captured markup straight in.

pub mod handler;
pub use handler::ExportServer;

use crate::commands::{CommandContext, CommandOutcome};
use rmcp::{
    tool_router, tool,
    ErrorData as McpError,
    model::{CallToolResult, Content},
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Convert tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConvertParams {
    /// Serialized HTML of the conversation page
    pub html: String,
}

/// Download tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DownloadParams {
    /// Serialized HTML of the conversation page
    pub html: String,
    /// Directory the Markdown file is written into (default: current directory)
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Copy tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CopyParams {
    /// Serialized HTML of the conversation page
    pub html: String,
}

/// Convert a command outcome to an MCP CallToolResult
fn convert_result(
    result: crate::error::Result<CommandOutcome>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(outcome) if outcome.success => {
            let text = match outcome.data {
                Some(data) => {
                    serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
                }
                None => outcome.status,
            };
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Ok(outcome) => Err(McpError::internal_error(outcome.status, None)),
        Err(e) => Err(McpError::internal_error(e.to_string(), None)),
    }
}

/// Parse the page payload shared by every tool
fn parse_page(html: &str) -> Result<crate::dom::MarkupNode, McpError> {
    crate::dom::parse_markup(html).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

#[tool_router]
impl ExportServer {
    /// Convert a conversation page to Markdown
    #[tool(description = "Convert a chat conversation page (HTML) to a Markdown document")]
    fn convert_markdown(
        &self,
        params: Parameters<ConvertParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = parse_page(&params.0.html)?;
        let mut context = CommandContext::new(&page, self.selectors());

        let result = self
            .registry()
            .execute("convert_markdown", serde_json::json!({}), &mut context);

        convert_result(result)
    }

    /// Save a conversation page as a Markdown file
    #[tool(
        description = "Convert a chat conversation page (HTML) and save it as a dated Markdown file"
    )]
    fn download_markdown(
        &self,
        params: Parameters<DownloadParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = parse_page(&params.0.html)?;
        let mut context = CommandContext::new(&page, self.selectors());
        if let Some(dir) = params.0.output_dir {
            context = context.with_output_dir(dir);
        }

        let result = self
            .registry()
            .execute("download_markdown", serde_json::json!({}), &mut context);

        convert_result(result)
    }

    /// Copy a conversation page to the clipboard as Markdown
    #[tool(
        description = "Convert a chat conversation page (HTML) and copy it to the system clipboard"
    )]
    fn copy_markdown(&self, params: Parameters<CopyParams>) -> Result<CallToolResult, McpError> {
        let page = parse_page(&params.0.html)?;
        let mut context = CommandContext::new(&page, self.selectors());

        let result = self
            .registry()
            .execute("copy_markdown", serde_json::json!({}), &mut context);

        convert_result(result)
    }
}
