use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::error::Result;
use crate::extract;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for converting a conversation (none needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConvertMarkdownParams {}

/// Command that extracts the conversation and returns the assembled
/// Markdown document without delivering it anywhere
#[derive(Default)]
pub struct ConvertMarkdownCommand;

impl Command for ConvertMarkdownCommand {
    type Params = ConvertMarkdownParams;

    fn name(&self) -> &str {
        "convert_markdown"
    }

    fn description(&self) -> &str {
        "Extract the conversation and return it as a Markdown document"
    }

    fn execute_typed(
        &self,
        _params: ConvertMarkdownParams,
        context: &mut CommandContext,
    ) -> Result<CommandOutcome> {
        let document = extract::extract(context.page, context.selectors)?;
        let markdown = document.assemble();

        Ok(CommandOutcome::success_with(
            "Conversation converted.",
            serde_json::json!({
                "title": document.title,
                "turns": document.len(),
                "markdown": markdown,
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
    fn test_convert_command_metadata() {
        let command = ConvertMarkdownCommand;
        assert_eq!(command.name(), "convert_markdown");
        assert!(command.parameters_schema().is_object());
    }

    #[test]
    fn test_convert_command_produces_document() {
        let page = parse_markup(
            r#"<user-query><div class="query-text">hi</div></user-query>
               <model-response><div class="markdown"><p>hello</p></div></model-response>"#,
        )
        .unwrap();
        let selectors = PageSelectors::default();
        let mut ctx = CommandContext::new(&page, &selectors);

        let outcome = ConvertMarkdownCommand
            .execute_typed(ConvertMarkdownParams {}, &mut ctx)
            .unwrap();

        assert!(outcome.success);
        let data = outcome.data.unwrap();
        let markdown = data["markdown"].as_str().unwrap();
        assert!(markdown.contains("## User\n\nhi"));
        assert!(markdown.contains("## Assistant\n\nhello"));
        assert_eq!(data["turns"], 2);
    }

    #[test]
    fn test_convert_command_surfaces_not_found() {
        let page = parse_markup("<p>nothing</p>").unwrap();
        let selectors = PageSelectors::default();
        let mut ctx = CommandContext::new(&page, &selectors);

        let err = ConvertMarkdownCommand
            .execute_typed(ConvertMarkdownParams {}, &mut ctx)
            .unwrap_err();
        assert!(matches!(err, crate::error::ExportError::NoConversation));
    }
}
