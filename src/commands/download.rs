use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::error::Result;
use crate::extract;
use crate::sink::DownloadPayload;
use log::info;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for downloading the conversation (none needed)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DownloadMarkdownParams {}

/// Command that extracts the conversation and writes it to a dated
/// Markdown file in the context's output directory
#[derive(Default)]
pub struct DownloadMarkdownCommand;

impl Command for DownloadMarkdownCommand {
    type Params = DownloadMarkdownParams;

    fn name(&self) -> &str {
        "download_markdown"
    }

    fn description(&self) -> &str {
        "Extract the conversation and save it as a Markdown file"
    }

    fn execute_typed(
        &self,
        _params: DownloadMarkdownParams,
        context: &mut CommandContext,
    ) -> Result<CommandOutcome> {
        let document = extract::extract(context.page, context.selectors)?;
        let markdown = document.assemble();

        let payload = DownloadPayload::new(&document.title, &markdown);
        let path = payload.save_to(&context.output_dir)?;
        info!("download complete: {}", path.display());

        Ok(CommandOutcome::success_with(
            "Download complete.",
            serde_json::json!({
                "filename": payload.filename,
                "path": path.display().to_string(),
                "media_type": payload.media_type,
                "bytes": payload.bytes.len(),
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
    fn test_download_command_metadata() {
        let command = DownloadMarkdownCommand;
        assert_eq!(command.name(), "download_markdown");
        assert!(command.parameters_schema().is_object());
    }

    #[test]
    fn test_download_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let page = parse_markup(
            r#"<div class="conversation-title">Notes</div>
               <user-query><div class="query-text">hi</div></user-query>"#,
        )
        .unwrap();
        let selectors = PageSelectors::default();
        let mut ctx = CommandContext::new(&page, &selectors).with_output_dir(dir.path());

        let outcome = DownloadMarkdownCommand
            .execute_typed(DownloadMarkdownParams {}, &mut ctx)
            .unwrap();

        assert!(outcome.success);
        let data = outcome.data.unwrap();
        let path = data["path"].as_str().unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("# Notes\n\n"));
        assert!(data["filename"].as_str().unwrap().starts_with("Notes-"));
    }
}
