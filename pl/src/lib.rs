//! PromptLib - static prompt template library
//!
//! Holds the message and report templates shown on the prompt library page,
//! and the logic that drives it: search and tag/category filtering,
//! placeholder filling with character budgets, and Markdown / print exports.
//!
//! # Example
//!
//! ```ignore
//! use promptlib::{FilterState, PromptLibrary};
//!
//! let library = PromptLibrary::embedded()?;
//! let mut state = FilterState::new();
//! state.toggle_tag("sms");
//! for entry in library.filter(&state) {
//!     println!("{}", entry.title);
//! }
//! ```

pub mod cli;
pub mod config;
mod entry;
mod error;
pub mod export;
mod filter;
mod library;
pub mod render;

pub use entry::{Channel, PromptEntry};
pub use error::{LibraryError, Result};
pub use export::ExportFormat;
pub use filter::{Category, FilterState, filter_entries};
pub use library::{EMBEDDED_LIBRARY, PromptLibrary};
pub use render::{OPT_OUT_SUFFIX, RenderOptions, RenderedPrompt};

/// Title used for exported documents
pub const DEFAULT_EXPORT_TITLE: &str = "Prompt Library";
