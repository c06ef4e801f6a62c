//! One-way exports of the prompt library
//!
//! - Markdown: headings per prompt, fenced code blocks for bodies, bullet
//!   lists for variables
//! - Print HTML: a standalone document styled for paper that opens the print
//!   dialog once loaded

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::entry::PromptEntry;
use crate::error::Result;
use crate::library::PromptLibrary;

/// Handlebars template for the print document
pub const PRINT_TEMPLATE: &str = include_str!("../templates/print.hbs");

/// File name offered for the Markdown download
pub const MARKDOWN_FILE_NAME: &str = "prompt-library.md";

/// File name offered for the print download
pub const PRINT_FILE_NAME: &str = "prompt-library.html";

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Structured text document
    Markdown,
    /// Print-ready HTML document
    Html,
}

impl ExportFormat {
    /// Suggested file name for this format
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Markdown => MARKDOWN_FILE_NAME,
            Self::Html => PRINT_FILE_NAME,
        }
    }

    /// MIME type for this format
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

/// Render the library in the given format
pub fn export(library: &PromptLibrary, title: &str, format: ExportFormat) -> Result<String> {
    debug!(?format, %title, "export: called");
    match format {
        ExportFormat::Markdown => Ok(to_markdown(library, title)),
        ExportFormat::Html => to_print_html(library, title),
    }
}

/// Longest run of backticks in `text`
fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn write_entry_markdown(out: &mut String, entry: &PromptEntry) {
    out.push_str(&format!("## {}\n", entry.title));
    out.push('\n');
    out.push_str(&format!("- **ID:** `{}`\n", entry.id));
    out.push_str(&format!("- **Channel:** {}\n", entry.channel.label()));
    if !entry.tags.is_empty() {
        out.push_str(&format!("- **Tags:** {}\n", entry.tags.join(", ")));
    }
    if let Some(max) = entry.max_chars {
        out.push_str(&format!("- **Max characters:** {}\n", max));
    }
    out.push('\n');

    // Fence must be longer than any backtick run inside the body
    let fence = "`".repeat(longest_backtick_run(&entry.body).max(2) + 1);
    out.push_str(&format!("{}text\n", fence));
    out.push_str(&entry.body);
    out.push('\n');
    out.push_str(&format!("{}\n", fence));

    if entry.has_variables() {
        out.push('\n');
        out.push_str("### Variables\n\n");
        for var in &entry.variables {
            out.push_str(&format!("- `[{}]`\n", var));
        }
    }
    out.push('\n');
}

/// Serialize the whole library as Markdown
pub fn to_markdown(library: &PromptLibrary, title: &str) -> String {
    debug!(count = library.len(), "to_markdown: called");
    let mut out = String::new();
    out.push_str(&format!("# {}\n", title));
    out.push('\n');
    out.push_str(&format!("{} prompts.\n", library.len()));
    out.push('\n');
    for entry in library.entries() {
        write_entry_markdown(&mut out, entry);
    }
    out
}

#[derive(Serialize)]
struct PrintContext<'a> {
    title: &'a str,
    count: usize,
    prompts: &'a [PromptEntry],
}

/// Render the print-ready HTML document
pub fn to_print_html(library: &PromptLibrary, title: &str) -> Result<String> {
    debug!(count = library.len(), "to_print_html: called");
    let mut hbs = Handlebars::new();
    hbs.set_strict_mode(false);
    hbs.register_template_string("print", PRINT_TEMPLATE)?;
    let ctx = PrintContext {
        title,
        count: library.len(),
        prompts: library.entries(),
    };
    Ok(hbs.render("print", &ctx)?)
}
