//! Static build of the whole site
//!
//! Writes each page and print variant as `index.html` under its path, a
//! meta-refresh stub for each redirect, the assets and both prompt exports,
//! so the output directory can be served by any static file host.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use promptlib::ExportFormat;
use tracing::{debug, info};

use crate::assets::ASSETS;
use crate::pages::{PageParams, PageRenderer};
use crate::site::Site;

/// What a static build wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub pages: usize,
    pub redirects: usize,
    pub assets: usize,
    pub exports: usize,
}

impl RenderReport {
    pub fn total(&self) -> usize {
        self.pages + self.redirects + self.assets + self.exports
    }
}

/// Output file for a site path: `/` is `index.html`, `/a/b` is `a/b/index.html`
pub fn output_path(out: &Path, path: &str) -> PathBuf {
    let rel = path.trim_matches('/');
    if rel.is_empty() {
        out.join("index.html")
    } else {
        out.join(rel).join("index.html")
    }
}

/// HTML stub forwarding the browser to `to`
pub fn redirect_stub(to: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  \
         <meta http-equiv=\"refresh\" content=\"0; url={to}\">\n  <link rel=\"canonical\" href=\"{to}\">\n  \
         <title>Moved</title>\n</head>\n<body>\n  <p>This page moved to <a href=\"{to}\">{to}</a>.</p>\n</body>\n</html>\n"
    )
}

fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context(format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).context(format!("Failed to write {}", path.display()))
}

/// Render the site into `out`
pub fn render_site(site: &Site, pages: &PageRenderer, out: &Path) -> Result<RenderReport> {
    debug!(?out, "render_site: called");
    let mut report = RenderReport::default();
    let params = PageParams::default();

    for (path, page, print) in site.routes.paths() {
        let html = pages
            .render_page(site, &page, print, &params)
            .context(format!("Failed to render {}", path))?;
        write(&output_path(out, &path), &html)?;
        report.pages += 1;
    }

    for rule in site.routes.redirects() {
        write(&output_path(out, &rule.from), &redirect_stub(&rule.to))?;
        report.redirects += 1;
    }

    let not_found = pages
        .render_not_found(site, "/404.html")
        .context("Failed to render not-found page")?;
    write(&out.join("404.html"), &not_found)?;
    report.pages += 1;

    for asset in &ASSETS {
        write(&out.join("assets").join(asset.name), asset.body)?;
        report.assets += 1;
    }

    let title = site.export_title();
    for (format, name) in [
        (ExportFormat::Markdown, "download.md"),
        (ExportFormat::Html, "download.html"),
    ] {
        let body = promptlib::export::export(&site.library, &title, format)
            .context(format!("Failed to export prompts as {:?}", format))?;
        write(&out.join("prompts").join(name), &body)?;
        report.exports += 1;
    }

    info!(
        "Rendered {} pages, {} redirects, {} assets, {} exports to {}",
        report.pages,
        report.redirects,
        report.assets,
        report.exports,
        out.display()
    );
    Ok(report)
}
