//! webshorts - inspect and exercise shortcut declaration files.
//!
//! # Usage
//!
//! ```bash
//! webshorts list webshorts.json --page /settings
//! webshorts check webshorts.json --strict
//! webshorts press --file webshorts.json --page /settings "CTRL + S" "SHIFT + ?"
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use webshorts::config::{default_config_path, load_declaration};
use webshorts::error::ResultExt;
use webshorts::logging::{self, LogOptions};
use webshorts::shortcuts::{parse_with, KeyParseError, ParseMode, TracingSink};
use webshorts::{
    Action, ActionSet, Declaration, DispatchOutcome, KeyDescriptor, KeyEvent, ShortcutProvider,
    WebShortsOptions,
};

/// Inspect and exercise WebShorts shortcut declarations.
#[derive(Debug, Parser)]
#[command(name = "webshorts", version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Also write JSONL logs to ~/.webshorts/logs
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the help overlay for a page
    List {
        /// Declaration file (default: ~/.webshorts/webshorts.json)
        file: Option<String>,

        /// Page to show
        #[arg(long, short = 'p', default_value = "/")]
        page: String,
    },

    /// Validate every key combination in a declaration
    Check {
        /// Declaration file (default: ~/.webshorts/webshorts.json)
        file: Option<String>,

        /// Reject combinations naming more than one key
        #[arg(long)]
        strict: bool,
    },

    /// Simulate key presses and print what each one does (with -v, debug notifications are logged)
    Press {
        /// Declaration file (default: ~/.webshorts/webshorts.json)
        #[arg(long, short = 'f')]
        file: Option<String>,

        /// Current page
        #[arg(long, short = 'p', default_value = "/")]
        page: String,

        /// Combinations to press, e.g. "CTRL + S"
        #[arg(required = true)]
        combos: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(LogOptions {
        verbose: cli.verbose,
        json_file: cli.log_file,
    });

    match cli.command {
        Command::List { file, page } => list(file, &page),
        Command::Check { file, strict } => check(file, strict),
        Command::Press { file, page, combos } => press(file, &page, &combos, cli.verbose),
    }
}

fn resolve_path(file: Option<String>) -> String {
    file.unwrap_or_else(|| default_config_path().display().to_string())
}

fn load(file: Option<String>) -> Result<Declaration> {
    let path = resolve_path(file);
    load_declaration(&path).with_context(|| format!("loading {}", PathBuf::from(&path).display()))
}

/// Bind every declared action name to a stub that reports it was called.
fn printing_actions(declaration: &Declaration) -> ActionSet {
    let mut actions = ActionSet::new();
    for entry in declaration.pages.values().flatten() {
        let Some(name) = &entry.action else {
            continue;
        };
        if actions.get(name).is_some() {
            continue;
        }
        let label = name.clone();
        actions.insert(Action::new(name.clone(), move || println!("  -> action `{}` invoked", label)));
    }
    if actions.is_empty() {
        warn!("Declaration names no actions");
    } else {
        debug!(count = actions.len(), "Bound printing actions");
    }
    actions
}

fn provider_for(declaration: &Declaration, page: &str) -> ShortcutProvider {
    let table = declaration.bind(&printing_actions(declaration));
    ShortcutProvider::new(page).with_config(table)
}

fn list(file: Option<String>, page: &str) -> Result<()> {
    let declaration = load(file)?;
    let provider = provider_for(&declaration, page);
    print!("{}", provider.help_overlay().render_text());
    Ok(())
}

fn check(file: Option<String>, strict: bool) -> Result<()> {
    let declaration = load(file)?;
    let mode = ParseMode::from_strict(strict || declaration.options.strict_keys);

    let mut total = 0;
    let mut invalid = 0;
    for (page, keys) in declaration.declared_keys() {
        total += 1;
        let result = parse_with(keys, mode).and_then(|d| {
            if d.is_complete() {
                Ok(d)
            } else {
                Err(KeyParseError::MissingKey)
            }
        });
        match result {
            Ok(descriptor) => debug!(page, keys, display = %descriptor, "Valid shortcut"),
            Err(e) => {
                invalid += 1;
                println!("{:<16} {:<24} {}", page, keys, e);
            }
        }
    }

    let incomplete = declaration
        .pages
        .values()
        .flatten()
        .filter(|e| e.keys.is_none() || e.action.is_none())
        .count();
    if incomplete > 0 {
        println!("{} entries are missing keys or action and will be skipped", incomplete);
    }

    if invalid > 0 {
        bail!("{} of {} shortcuts are invalid", invalid, total);
    }
    println!("OK: {} shortcuts", total);
    Ok(())
}

fn press(file: Option<String>, page: &str, combos: &[String], verbose: bool) -> Result<()> {
    let declaration = load(file)?;
    let mut provider = provider_for(&declaration, page);
    if verbose {
        let options = WebShortsOptions {
            debug: true,
            ..provider.options().clone()
        };
        provider = provider.with_sink(Box::new(TracingSink)).with_options(options);
    }

    for combo in combos {
        let Some(descriptor) = combo.parse::<KeyDescriptor>().warn_on_err() else {
            println!("{}\n  skipped: not a valid combination", combo);
            continue;
        };
        let Some(event) = KeyEvent::from_descriptor(&descriptor) else {
            continue;
        };

        println!("{}", descriptor);
        match provider.handle_key_down(&event) {
            DispatchOutcome::Ignored => println!("  ignored"),
            DispatchOutcome::HelpRequested => {
                print!("{}", provider.help_overlay().render_text());
                provider.set_help_dialog_open(false);
            }
            DispatchOutcome::Executed { id } => println!("  executed {}", id),
            DispatchOutcome::Failed { id, error } => println!("  {} failed: {}", id, error),
            DispatchOutcome::NotFound { keys } => println!("  no shortcut for {} on {}", keys, page),
        }
    }
    Ok(())
}
