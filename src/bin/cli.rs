//! chat2md command-line interface
//!
//! Reads a conversation page's HTML from a file or stdin, extracts the
//! conversation, and converts it to Markdown — printed, saved as a dated
//! file, or placed on the clipboard.

use anyhow::{bail, Context};
use chat2md::commands::{CommandContext, CommandRegistry};
use chat2md::dom::parse_markup;
use chat2md::extract::PageSelectors;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chat2md")]
#[command(version)]
#[command(about = "Convert chat conversation pages to Markdown", long_about = None)]
struct Cli {
    /// HTML file to read (default: stdin)
    #[arg(long, short = 'i', value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Convert and print the Markdown document to stdout
    Convert,
    /// Convert and save as a dated .md file
    Download {
        /// Directory to write the file into
        #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,
    },
    /// Convert and place the document on the clipboard
    Copy,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let html = read_input(cli.input.as_ref())?;
    let page = parse_markup(&html)?;

    let selectors = PageSelectors::default();
    let registry = CommandRegistry::with_defaults();
    let mut context = CommandContext::new(&page, &selectors);

    let (name, print_markdown) = match &cli.action {
        Action::Convert => ("convert_markdown", true),
        Action::Download { output_dir } => {
            context = context.with_output_dir(output_dir.clone());
            ("download_markdown", false)
        }
        Action::Copy => ("copy_markdown", false),
    };

    let outcome = registry.execute(name, serde_json::json!({}), &mut context)?;

    if !outcome.success {
        bail!("{}", outcome.status);
    }

    if print_markdown {
        let markdown = outcome
            .data
            .as_ref()
            .and_then(|d| d["markdown"].as_str())
            .unwrap_or_default();
        print!("{}", markdown);
    } else {
        eprintln!("{}", outcome.status);
        if let Some(path) = outcome.data.as_ref().and_then(|d| d["path"].as_str()) {
            eprintln!("{}", path);
        }
    }

    Ok(())
}
