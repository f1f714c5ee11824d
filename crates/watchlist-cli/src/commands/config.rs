use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;
use watchlist_config::Config;

pub fn run_config(cmd: ConfigCommands, config: &Config, config_file: &Path, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(config, config_file, full, output),
        ConfigCommands::Path => show_path(config_file, output),
    }
}

fn show_path(config_file: &Path, output: &Output) -> Result<()> {
    match output.format() {
        OutputFormat::Human => output.info(config_file.display().to_string()),
        _ => output.json(&json!({
            "path": config_file.display().to_string(),
            "exists": config_file.exists(),
        })),
    }
    Ok(())
}

fn show_config(config: &Config, config_file: &Path, full: bool, output: &Output) -> Result<()> {
    let config = if full { config.clone() } else { config.masked() };

    if output.format() != OutputFormat::Human {
        let value = serde_json::to_value(&config)
            .map_err(|e| eyre!("Failed to serialize config: {}", e))?;
        output.json(&json!({
            "path": config_file.display().to_string(),
            "config": value,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}, showing defaults and environment overrides",
            config_file.display()
        ));
    }
    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is incomplete: {}", e));
    }

    println!("\n{} {}\n", "Configuration".bright_cyan().bold(), config_file.display().bright_black());

    println!(
        "{}",
        section(
            "Server",
            vec![("Listen address", config.server.listen_addr.clone())]
        )
    );
    println!(
        "{}",
        section(
            "TMDb",
            vec![
                ("API key", config.tmdb.api_key.clone()),
                ("Base URL", config.tmdb.base_url.clone()),
                ("Language", config.tmdb.language.clone().unwrap_or_else(|| "-".to_string())),
                ("Timeout", format!("{}s", config.tmdb.timeout_secs)),
                ("Accept invalid certs", yes_no(config.tmdb.accept_invalid_certs)),
            ]
        )
    );
    println!(
        "{}",
        section(
            "Database",
            vec![
                ("URI", config.database.uri.clone()),
                ("Name", config.database.name.clone()),
                ("Timeout", format!("{}s", config.database.timeout_secs)),
                ("Accept invalid certs", yes_no(config.database.accept_invalid_certs)),
            ]
        )
    );
    println!(
        "{}",
        section(
            "Logging",
            vec![
                ("Level", config.logging.level.clone()),
                (
                    "JSON",
                    config.logging.json.map(yes_no).unwrap_or_else(|| "auto".to_string()),
                ),
                (
                    "File",
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".to_string()),
                ),
            ]
        )
    );

    Ok(())
}

fn section(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![Cell::new(title)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn yes_no(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}
