//! Prompt entry data model

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Delivery medium of a prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Text message
    Sms,
    /// Email
    Email,
    /// Spreadsheet instruction
    Sheet,
    /// Internal report for the business owner
    OwnerReport,
}

impl Channel {
    /// All channels, in display order
    pub const ALL: [Channel; 4] = [Channel::Sms, Channel::Email, Channel::Sheet, Channel::OwnerReport];

    /// The identifier used in data files, filters and URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Email => "email",
            Self::Sheet => "sheet",
            Self::OwnerReport => "owner-report",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Email => "Email",
            Self::Sheet => "Spreadsheet",
            Self::OwnerReport => "Owner report",
        }
    }

    /// Parse a channel identifier
    pub fn parse(s: &str) -> Option<Self> {
        debug!(%s, "Channel::parse: called");
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single prompt template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Unique identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Template text with `[Placeholder]` tokens
    pub body: String,

    /// Delivery channel
    pub channel: Channel,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Character limit for the rendered text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,

    /// Placeholder names the reader fills in, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
}

impl PromptEntry {
    /// Channel identifier followed by tags
    ///
    /// This is the set tag and category filters match against.
    pub fn facets(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.channel.as_str()).chain(self.tags.iter().map(String::as_str))
    }

    /// Whether the entry carries the given tag or channel
    pub fn has_facet(&self, facet: &str) -> bool {
        self.facets().any(|f| f == facet)
    }

    /// Case-insensitive substring match against title, body and tags
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.body.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Whether the reader has anything to fill in
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }
}
