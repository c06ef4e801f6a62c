//! Static files served under `/assets`

use tracing::debug;

/// A compiled-in static file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub name: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

const CSS: &str = "text/css; charset=utf-8";
const JS: &str = "text/javascript; charset=utf-8";

/// Every asset, by file name
pub static ASSETS: [Asset; 4] = [
    Asset {
        name: "site.css",
        content_type: CSS,
        body: include_str!("../assets/site.css"),
    },
    Asset {
        name: "toc.js",
        content_type: JS,
        body: include_str!("../assets/toc.js"),
    },
    Asset {
        name: "prompts.js",
        content_type: JS,
        body: include_str!("../assets/prompts.js"),
    },
    Asset {
        name: "roi.js",
        content_type: JS,
        body: include_str!("../assets/roi.js"),
    },
];

/// Look up an asset by file name
pub fn get(name: &str) -> Option<&'static Asset> {
    debug!(%name, "assets::get: called");
    ASSETS.iter().find(|a| a.name == name)
}
