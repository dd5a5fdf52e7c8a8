use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{AppConfig, DEFAULT_API_BASE, StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration and the effective values.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring deskline.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt(
        &format!("Helpdesk API base URL (default {DEFAULT_API_BASE})"),
        &mut cfg.api_base,
    )?;
    apply_flag_prompt("Show the stats dashboard (y/n)", &mut cfg.show_stats)?;
    apply_flag_prompt("Color ticket badges (y/n)", &mut cfg.styled)?;
    apply_flag_prompt(
        "Confirm each submitted ticket (y/n)",
        &mut cfg.alert_on_submit,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let stored = StoredConfig::load()?;
    let path = config_file_path()?;
    let effective = AppConfig::load(None)?;

    println!("Configuration file: {}", path.display());
    println!("API base URL: {}", display_value(&stored.api_base));
    println!("Show stats: {}", display_flag(stored.show_stats));
    println!("Styled badges: {}", display_flag(stored.styled));
    println!("Confirm submissions: {}", display_flag(stored.alert_on_submit));
    println!();
    println!("Effective API base URL: {}", effective.api_base);

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    match prompt(field, target.as_deref())? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn apply_flag_prompt(field: &str, target: &mut Option<bool>) -> AppResult<()> {
    let current = target.map(|flag| if flag { "y" } else { "n" });
    loop {
        match prompt(field, current)? {
            PromptAction::Keep => return Ok(()),
            PromptAction::Clear => {
                *target = None;
                return Ok(());
            }
            PromptAction::Set(value) => match parse_flag(&value) {
                Some(flag) => {
                    *target = Some(flag);
                    return Ok(());
                }
                None => println!("Please answer y or n."),
            },
        }
    }
}

fn prompt(field: &str, current: Option<&str>) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::from_input(&input))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "on" => Some(true),
        "n" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn display_flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "<not set>",
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
