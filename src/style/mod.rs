// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Style inference for Haxe sources.
//!
//! Style samples configured by the user are matched against fixed-shape
//! patterns, the whitespace around each token is stored in a [`StyleMap`],
//! and the map is used to reformat snippets and to generate the shell
//! variable preferences the editor's snippets read.

pub mod cache;
pub mod config;
pub mod formatter;
pub mod preferences;
pub mod rules;
pub mod sample;
pub mod scheduler;
pub mod service;
pub mod settings;
pub mod slot;
pub mod style_map;


pub use cache::{DirCache, MemoryCache, PreferenceCache};
pub use config::{PREFERENCES_DOCUMENT, SETTINGS_FILE, StyleConfig};
pub use formatter::format_statement;
pub use preferences::{PreferencesWriter, parse_preferences, render_preferences};
pub use rules::{
    BRACE_STYLE2_KEY, BRACE_STYLE_KEY, BlockBrace, BraceCuddle, LoopWhitespace,
    SignatureWhitespace, StyleRule, WHITESPACE_STYLE2_KEY, WHITESPACE_STYLE_KEY, default_rules,
};
pub use sample::StyleSample;
pub use scheduler::{ChannelScheduler, Scheduler, Task, TimerQueue};
pub use service::{Lifecycle, StyleService};
pub use settings::{JsonSettings, SettingsSource, default_sample};
pub use slot::Slot;
pub use style_map::StyleMap;
