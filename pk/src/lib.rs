//! PitchKit - sales-collateral site for an AI-enablement pitch
//!
//! Serves the pitch overview, solution pages, pricing, contact page, a
//! searchable prompt library and an ROI calculator, each with a
//! print-friendly variant where it makes sense.
//!
//! # Modules
//!
//! - [`roi`] - No-show recovery ROI and payback calculation
//! - [`routes`] - Page paths, print variants and redirects
//! - [`toc`] - Heading outline and scroll-spy model
//! - [`pages`] - Handlebars page rendering
//! - [`analytics`] - Fire-and-forget event tracking
//! - [`server`] - Axum HTTP server
//! - [`render_site`] - Static build
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod analytics;
pub mod assets;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod pages;
pub mod render_site;
pub mod roi;
pub mod routes;
pub mod server;
pub mod site;
pub mod toc;

pub use analytics::Analytics;
pub use config::Config;
pub use content::SiteContent;
pub use error::SiteError;
pub use pages::PageRenderer;
pub use roi::{Payback, RoiInputs, RoiResult, Tier, calculate_roi};
pub use routes::{Page, Resolution, RouteTable};
pub use server::{AppState, SharedState, router};
pub use site::Site;
