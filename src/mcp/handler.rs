//! MCP server handler wrapping the export command registry

use crate::commands::CommandRegistry;
use crate::extract::PageSelectors;
use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler, ServerHandler,
};
use std::sync::Arc;

/// MCP server exposing the conversation export tools
#[derive(Clone)]
pub struct ExportServer {
    registry: Arc<CommandRegistry>,
    selectors: Arc<PageSelectors>,
    tool_router: ToolRouter<Self>,
}

impl ExportServer {
    /// Create a server with the default commands and page selectors
    pub fn new() -> Self {
        Self::with_selectors(PageSelectors::default())
    }

    /// Create a server for a custom page shape
    pub fn with_selectors(selectors: PageSelectors) -> Self {
        Self {
            registry: Arc::new(CommandRegistry::with_defaults()),
            selectors: Arc::new(selectors),
            tool_router: Self::tool_router(),
        }
    }

    /// The command registry backing the tools
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The page selectors used for extraction
    pub fn selectors(&self) -> &PageSelectors {
        &self.selectors
    }
}

impl Default for ExportServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for ExportServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Convert chat conversation pages (HTML) to Markdown documents. \
                 Tools: convert_markdown returns the document, download_markdown \
                 saves it as a dated .md file, copy_markdown places it on the \
                 system clipboard."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = ExportServer::new();
        assert_eq!(server.registry().len(), 3);
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let server = ExportServer::new();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
