mod args;
mod config;
mod dirs;
mod logger;

use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;

use carbon_app::{
    AppPaths, AppState, DEFAULT_EXPORT_FILE, ReportFormat, Tracker, ensure_app_data_dir, listen,
};
use carbon_core::{AiModel, ModelProvider, PROVIDERS, Region, TextChange, models_by_provider};
use clap::Parser;

use crate::args::{Cli, Command};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = config::load_or_create().map_err(io::Error::other)?;
    logger::init_logging(&config.config.log_level);
    if config.created {
        tracing::info!(path = %config.paths.file.display(), "created default config");
    }

    let data_dir = dirs::resolve_data_dir(cli.data_dir.or(config.config.data_dir.clone()))
        .map_err(io::Error::other)?;
    if data_dir.matched_existing {
        tracing::debug!(dir = %data_dir.dir.display(), "using existing data dir");
    } else {
        tracing::info!(dir = %data_dir.dir.display(), "using new data dir");
    }

    let paths = AppPaths::new(data_dir.dir);
    ensure_app_data_dir(&paths)?;
    let app_state = AppState::new(paths.db_path, config.config.template_dir.clone());
    let mut tracker = app_state.initialize()?;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => print_status(&tracker),
        Command::Record { text, replaced } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let change = TextChange {
                text,
                range_length: replaced,
            };
            if tracker.track_text_change(std::slice::from_ref(&change))? == 0 {
                println!("Change not counted as an AI suggestion.");
            }
            print_status(&tracker);
        }
        Command::Shown => {
            tracker.track_suggestion_shown()?;
            println!(
                "Suggestions shown: {} (acceptance {:.1}%)",
                tracker.metrics().suggestions_shown,
                tracker.acceptance_rate()
            );
        }
        Command::Report { html } => {
            let format = if html {
                ReportFormat::Html
            } else {
                ReportFormat::Text
            };
            println!("{}", app_state.render_report(&tracker, format)?);
        }
        Command::Models { provider, feature } => {
            let provider = provider.map(|value| value.parse::<ModelProvider>()).transpose()?;
            print_models(tracker.model(), provider, feature.as_deref());
        }
        Command::Regions => print_regions(tracker.region()),
        Command::Model { id } => {
            let model = id.parse::<AiModel>()?;
            tracker.set_model(model)?;
            println!("Active model: {} ({})", model, model.spec().description);
        }
        Command::Region { code } => {
            let region = code.parse::<Region>()?;
            tracker.set_region(region)?;
            println!(
                "Active region: {} ({} kg CO2e/kWh)",
                region,
                region.carbon_intensity()
            );
        }
        Command::Reset { yes } => {
            if !yes {
                eprintln!(
                    "Reset clears all carbon tracking data and cannot be undone. Re-run with --yes to confirm."
                );
                return Ok(());
            }
            tracker.reset()?;
            println!("Carbon tracking data has been reset.");
        }
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            tracker.export_to(&path)?;
            println!("Carbon data exported to {}", path.display());
        }
        Command::Listen => {
            tracker.increment_session()?;
            let stats = listen(&mut tracker, io::stdin().lock(), io::stdout().lock())?;
            tracing::info!(
                events = stats.events_handled,
                skipped = stats.lines_skipped,
                accepted = stats.suggestions_accepted,
                "event stream closed"
            );
        }
    }

    Ok(())
}

fn read_stdin() -> io::Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(strip_trailing_newline(text))
}

/// Drops the single line terminator a shell pipe appends.
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn print_status(tracker: &Tracker) {
    println!("{}", tracker.status_line());
    println!(
        "Model: {} | Region: {} | Suggestions: {}",
        tracker.current_model().description,
        tracker.region(),
        tracker.metrics().suggestions_accepted
    );
}

fn print_models(active: AiModel, provider: Option<ModelProvider>, feature: Option<&str>) {
    for group in PROVIDERS
        .into_iter()
        .filter(|group| provider.is_none_or(|wanted| wanted == *group))
    {
        let specs: Vec<_> = models_by_provider(group)
            .into_iter()
            .filter(|spec| feature.is_none_or(|feature| spec.has_feature(feature)))
            .collect();
        if specs.is_empty() {
            continue;
        }
        println!("{}", group.name());
        for spec in specs {
            let marker = if spec.id == active { '*' } else { ' ' };
            println!(
                "{marker} {:<22} {:<28} {:.4} kWh/1k tokens  {}",
                spec.id.id(),
                spec.name,
                spec.energy_per_1k_tokens,
                spec.description
            );
        }
    }
}

fn print_regions(active: Region) {
    for region in Region::ALL {
        let marker = if region == active { '*' } else { ' ' };
        println!(
            "{marker} {:<10} {:.3} kg CO2e/kWh",
            region.code(),
            region.carbon_intensity()
        );
    }
}
