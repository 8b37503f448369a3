// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Command line front end for the Haxe style service.
//!
//! Reads the style samples from a settings file, then formats snippets,
//! lists the derived slots, or generates the shell variable preferences.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use haxe_style::StyleError;
use haxe_style::style::{
    ChannelScheduler, DirCache, JsonSettings, MemoryCache, PreferenceCache, SETTINGS_FILE, Scheduler,
    StyleService, TimerQueue, render_preferences,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "haxe-style", version, about = "Derive and apply Haxe whitespace style")]
struct Cli {
    /// Settings file holding the style samples
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reformat a snippet (read from stdin when omitted)
    Format { text: Option<String> },
    /// List the derived style slots
    Slots,
    /// Print the generated preferences, or write them to a cache directory
    Prefs {
        /// Directory to write the preferences document to
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn load_settings(path: Option<PathBuf>) -> Result<JsonSettings, StyleError> {
    match path {
        Some(path) => JsonSettings::load(path),
        None => {
            let default = PathBuf::from(SETTINGS_FILE);
            if default.is_file() {
                JsonSettings::load(default)
            } else {
                Ok(JsonSettings::new())
            }
        }
    }
}

fn start_service<C: PreferenceCache, S: Scheduler>(
    settings: JsonSettings,
    cache: C,
    scheduler: S,
) -> StyleService<JsonSettings, C, S> {
    let mut service = StyleService::new(settings, cache, scheduler);
    service.initialize();
    service
}

fn run(cli: Cli) -> Result<(), StyleError> {
    let settings = load_settings(cli.settings)?;

    match cli.command {
        Command::Format { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    text
                }
            };
            let mut service = start_service(settings, MemoryCache::new(), TimerQueue::new());
            println!("{}", service.format_statement(&text));
        }
        Command::Slots => {
            let service = start_service(settings, MemoryCache::new(), TimerQueue::new());
            if let Some(map) = service.style_map() {
                for (slot, fragment) in map.sorted_entries() {
                    println!("{slot} = {fragment:?}");
                }
            }
        }
        Command::Prefs { write: None } => {
            let service = start_service(settings, MemoryCache::new(), TimerQueue::new());
            if let Some(map) = service.style_map() {
                println!("{}", render_preferences(map));
            }
        }
        Command::Prefs { write: Some(dir) } => {
            let (scheduler, tasks) = ChannelScheduler::new();
            let mut service = start_service(settings, DirCache::new(&dir), scheduler);
            let timeout = service.config().save_delay + Duration::from_secs(1);
            while service.is_save_pending() {
                let Ok(task) = tasks.recv_timeout(timeout) else {
                    break;
                };
                service.run_task(task)?;
            }
            let verb = if service.preference_writes() > 0 { "wrote" } else { "unchanged" };
            eprintln!("{verb}: {}", dir.join(&service.config().document_name).display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
