// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Tunables for style extraction and preference persistence.

use std::time::Duration;

/// Name under which the generated preferences are cached.
pub const PREFERENCES_DOCUMENT: &str = "Haxe.ShellVars.tmPreferences";

/// Name of the settings file the style samples are read from.
pub const SETTINGS_FILE: &str = "Haxe.sublime-settings";

/// Configuration for a [`StyleService`](crate::style::StyleService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    /// Delay before a pending preferences write fires.
    pub save_delay: Duration,
    /// Delay before retrying initialization while the host is not ready.
    pub init_retry_delay: Duration,
    /// Number of lazy build attempts the formatter makes before giving up.
    pub max_build_attempts: u8,
    /// Indent unit appended to block brace separators that contain a newline.
    pub indent_unit: String,
    /// Cache name of the generated preferences document.
    pub document_name: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            save_delay: Duration::from_millis(100),
            init_retry_delay: Duration::from_millis(200),
            max_build_attempts: 5,
            indent_unit: "\t".to_string(),
            document_name: PREFERENCES_DOCUMENT.to_string(),
        }
    }
}

impl StyleConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce delay for preference writes.
    pub fn save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Sets the delay between initialization attempts.
    pub fn init_retry_delay(mut self, delay: Duration) -> Self {
        self.init_retry_delay = delay;
        self
    }

    /// Sets how many lazy build attempts the formatter makes.
    pub fn max_build_attempts(mut self, attempts: u8) -> Self {
        self.max_build_attempts = attempts;
        self
    }

    /// Sets the indent unit used for indented block braces.
    pub fn indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Sets the cache name of the preferences document.
    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }
}
