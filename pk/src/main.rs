//! PitchKit - sales-collateral site
//!
//! CLI entry point for serving, rendering and the ROI calculator.

use std::fs;
use std::path::Path;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use pitchkit::cli::{Cli, Command, OutputFormat, get_log_path};
use pitchkit::config::Config;
use pitchkit::roi::{RoiInputs, calculate_roi, format_currency, parse_number};
use pitchkit::routes::Page;
use pitchkit::server::{self, AppState};
use pitchkit::{Site, render_site};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            cmd_serve(&config, &bind).await
        }
        Command::Render { out } => cmd_render(&config, &out),
        Command::Roi {
            daily_no_shows,
            show_rate,
            rebook_rate,
            avg_ticket,
            days,
            format,
        } => {
            let site = Site::load(&config.content)?;
            let mut inputs = site.content.roi;
            let overrides = [
                (daily_no_shows, &mut inputs.daily_no_shows),
                (show_rate, &mut inputs.show_rate_percent),
                (rebook_rate, &mut inputs.rebook_rate_percent),
                (avg_ticket, &mut inputs.avg_ticket),
                (days, &mut inputs.days_per_month),
            ];
            for (raw, slot) in overrides {
                if let Some(raw) = raw {
                    *slot = parse_number(&raw);
                }
            }
            cmd_roi(&site, inputs.clamped(), format)
        }
        Command::Routes => cmd_routes(&config),
    }
}

async fn cmd_serve(config: &Config, bind: &str) -> Result<()> {
    debug!(%bind, "cmd_serve: called");
    let state = AppState::from_config(config)?;
    if state.analytics.is_enabled() {
        info!("Analytics enabled");
    }
    server::serve(state.shared(), bind).await
}

fn cmd_render(config: &Config, out: &Path) -> Result<()> {
    debug!(?out, "cmd_render: called");
    let state = AppState::from_config(config)?;
    let report = render_site::render_site(&state.site, &state.pages, out)?;
    println!(
        "{} {} files to {}",
        "Rendered".green().bold(),
        report.total(),
        out.display()
    );
    println!(
        "  {} pages, {} redirects, {} assets, {} exports",
        report.pages, report.redirects, report.assets, report.exports
    );
    Ok(())
}

fn cmd_roi(site: &Site, inputs: RoiInputs, format: OutputFormat) -> Result<()> {
    debug!(?inputs, ?format, "cmd_roi: called");
    let tiers = site.tiers();
    let result = calculate_roi(&inputs, &tiers);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            println!("{} {}", "ROI for".bold(), site.content.client.name.bold());
            println!("  {:<32} {}", "Missed appointments per month", result.no_shows_per_month);
            println!("  {:<32} {:.1}", "Recovered bookings per month", result.recovered_bookings);
            println!(
                "  {:<32} {}",
                "Recovered revenue per month",
                format_currency(result.recovered_revenue).green()
            );
            println!();
            println!("{}", "Payback".bold());
            for (tier, payback) in tiers.iter().zip(&result.payback) {
                let months = if payback.months.is_infinite() {
                    payback.months.to_string().red()
                } else {
                    payback.months.to_string().normal()
                };
                println!(
                    "  {:<14} {:>9}  {}",
                    tier.name,
                    format_currency(tier.cost.round() as i64),
                    months
                );
            }
        }
    }
    Ok(())
}

fn cmd_routes(config: &Config) -> Result<()> {
    debug!("cmd_routes: called");
    let site = Site::load(&config.content)?;

    println!("{}", "Pages".bold());
    for page in site.routes.pages() {
        let print = page.print_path().unwrap_or_else(|| "-".to_string());
        let label = match page {
            Page::Solution(slug) => site
                .content
                .solution(slug)
                .map(|s| s.title.as_str())
                .unwrap_or(page.nav_label()),
            _ => page.nav_label(),
        };
        println!("  {:<34} {:<42} {}", page.path().cyan(), print, label);
    }

    println!();
    println!("{}", "Redirects (308)".bold());
    for rule in site.routes.redirects() {
        println!("  {:<34} -> {}", rule.from.yellow(), rule.to);
    }
    Ok(())
}
