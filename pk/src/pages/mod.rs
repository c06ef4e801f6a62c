//! Page rendering with handlebars

mod context;
mod embedded;
mod loader;

pub use context::{
    BodyContext, Chip, LayoutContext, NavItem, PageParams, PromptCard, PromptsView, RoiView, TierRow, nav_items,
};
pub use embedded::{TEMPLATE_NAMES, get_embedded};
pub use loader::PageRenderer;
