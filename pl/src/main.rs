use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use promptlib::cli::{Cli, Command, OutputFormat};
use promptlib::config::Config;
use promptlib::render::{self, RenderOptions};
use promptlib::{FilterState, PromptLibrary, export};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let library =
        PromptLibrary::load_or_embedded(config.library_path.as_deref()).context("Failed to load prompt library")?;

    info!("promptlib loaded {} prompts", library.len());

    match cli.command {
        Command::List {
            search,
            tags,
            category,
            format,
        } => {
            let mut state = FilterState::new();
            state.set_search(search.unwrap_or_default());
            for tag in tags {
                state.toggle_tag(tag);
            }
            state.set_category(category);

            let visible = library.filter(&state);
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&visible)?);
                }
                OutputFormat::Text => {
                    if visible.is_empty() {
                        println!("No prompts match");
                    }
                    for entry in visible {
                        println!(
                            "{} {} {}",
                            entry.id.yellow(),
                            format!("[{}]", entry.channel).dimmed(),
                            entry.title
                        );
                    }
                }
            }
        }
        Command::Show { id, vars, opt_out } => {
            let entry = library.get(&id).ok_or_else(|| eyre!("Prompt not found: {}", id))?;
            let options = RenderOptions {
                values: vars.into_iter().collect(),
                append_opt_out: opt_out,
            };
            let rendered = render::render(entry, &options);

            println!("{}", entry.title.bold());
            println!("{}", rendered.text);
            println!();
            let count = match rendered.max_chars {
                Some(max) => format!("{}/{} characters", rendered.char_count, max),
                None => format!("{} characters", rendered.char_count),
            };
            if rendered.over_limit {
                println!("{} {}", "✗".red(), count.red());
            } else {
                println!("{} {}", "✓".green(), count);
            }
            if rendered.show_variables {
                println!("Variables: {}", entry.variables.join(", ").cyan());
            }
        }
        Command::Tags => {
            for facet in library.facets() {
                println!("{}", facet);
            }
        }
        Command::Export { format, output } => {
            let document = export::export(&library, &config.export_title, format)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, document).context(format!("Failed to write {}", path.display()))?;
                    println!("{} Exported to {}", "✓".green(), path.display().to_string().cyan());
                }
                None => print!("{}", document),
            }
        }
    }

    Ok(())
}
