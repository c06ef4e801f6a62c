//! Prompt rendering
//!
//! Fills `[Placeholder]` tokens, appends the SMS opt-out line and reports the
//! character budget that decides whether the copy button is enabled.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::entry::{Channel, PromptEntry};

/// Suffix appended to SMS prompts when the opt-out option is on
pub const OPT_OUT_SUFFIX: &str = " Reply STOP to opt out.";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]\n]+)\]").expect("valid placeholder regex"));

/// Placeholder names in first-appearance order, without duplicates
pub fn placeholders(body: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in PLACEHOLDER.captures_iter(body) {
        let name = cap[1].trim().to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    debug!(count = names.len(), "placeholders: found");
    names
}

/// Replace `[Name]` tokens with supplied values
///
/// Tokens with no value, or an empty value, are left as written.
pub fn fill(body: &str, values: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(body, |cap: &regex::Captures<'_>| match values.get(cap[1].trim()) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => cap[0].to_string(),
        })
        .into_owned()
}

/// Options the reader controls on a prompt card
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Values for placeholders, keyed by placeholder name
    pub values: BTreeMap<String, String>,

    /// Append [`OPT_OUT_SUFFIX`] (SMS only)
    pub append_opt_out: bool,
}

/// A prompt ready for display and copying
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPrompt {
    /// Final text
    pub text: String,

    /// Length of `text` in characters
    pub char_count: usize,

    /// Declared limit, if any
    pub max_chars: Option<usize>,

    /// True when a limit exists and `char_count` exceeds it
    pub over_limit: bool,

    /// Whether the copy action is available
    pub copy_enabled: bool,

    /// Whether the variable replacement form is shown
    pub show_variables: bool,

    /// Whether the opt-out toggle applies to this entry
    pub supports_opt_out: bool,
}

/// Render an entry with the given options
pub fn render(entry: &PromptEntry, options: &RenderOptions) -> RenderedPrompt {
    debug!(id = %entry.id, append_opt_out = options.append_opt_out, "render: called");
    let mut text = fill(&entry.body, &options.values);
    let supports_opt_out = entry.channel == Channel::Sms;
    if supports_opt_out && options.append_opt_out {
        text.push_str(OPT_OUT_SUFFIX);
    }

    let char_count = text.chars().count();
    let over_limit = entry.max_chars.is_some_and(|max| char_count > max);

    RenderedPrompt {
        text,
        char_count,
        max_chars: entry.max_chars,
        over_limit,
        copy_enabled: !over_limit,
        show_variables: entry.has_variables(),
        supports_opt_out,
    }
}
