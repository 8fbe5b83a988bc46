use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::error::Result;
use crate::extract;
use crate::sink;
use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for copying the conversation (none needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CopyMarkdownParams {}

/// Command that extracts the conversation and places the assembled
/// document on the system clipboard
#[derive(Default)]
pub struct CopyMarkdownCommand;

impl Command for CopyMarkdownCommand {
    type Params = CopyMarkdownParams;

    fn name(&self) -> &str {
        "copy_markdown"
    }

    fn description(&self) -> &str {
        "Extract the conversation and copy it to the clipboard"
    }

    fn execute_typed(
        &self,
        _params: CopyMarkdownParams,
        context: &mut CommandContext,
    ) -> Result<CommandOutcome> {
        let document = extract::extract(context.page, context.selectors)?;
        let markdown = document.assemble();

        sink::copy_to_clipboard(&markdown)?;
        info!("copied {} characters to clipboard", markdown.len());

        Ok(CommandOutcome::success_with(
            "Copied conversation to clipboard.",
            serde_json::json!({
                "title": document.title,
                "length": markdown.len(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_markup;
    use crate::extract::PageSelectors;

    #[test]
    fn test_copy_command_metadata() {
        let command = CopyMarkdownCommand;
        assert_eq!(command.name(), "copy_markdown");
        assert!(command.parameters_schema().is_object());
    }

    #[test]
    fn test_copy_command_surfaces_not_found() {
        let page = parse_markup("<p>nothing</p>").unwrap();
        let selectors = PageSelectors::default();
        let mut ctx = CommandContext::new(&page, &selectors);

        let err = CopyMarkdownCommand
            .execute_typed(CopyMarkdownParams {}, &mut ctx)
            .unwrap_err();
        assert!(matches!(err, crate::error::ExportError::NoConversation));
    }

    #[test]
    #[ignore] // Requires a clipboard-capable environment
    fn test_copy_command_places_document_on_clipboard() {
        let page = parse_markup(
            r#"<user-query><div class="query-text">hi</div></user-query>"#,
        )
        .unwrap();
        let selectors = PageSelectors::default();
        let mut ctx = CommandContext::new(&page, &selectors);

        let outcome = CopyMarkdownCommand
            .execute_typed(CopyMarkdownParams {}, &mut ctx)
            .unwrap();
        assert!(outcome.success);
    }
}
