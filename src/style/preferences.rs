// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The generated preferences document and its debounced writer.
//!
//! The document exposes every style slot as a shell variable scoped to Haxe
//! sources, so snippets can insert the user's whitespace. Entries are emitted
//! in sorted slot name order, which keeps the output byte-stable and lets the
//! writer skip rewriting an unchanged document.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::error::StyleError;
use crate::style::cache::PreferenceCache;
use crate::style::config::StyleConfig;
use crate::style::scheduler::{Scheduler, Task};
use crate::style::slot::Slot;
use crate::style::style_map::StyleMap;

const HEADER: &str = r#"
<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>name</key>
    <string>Globals</string>
    <key>scope</key>
    <string>source.haxe.2</string>
    <key>settings</key>
    <dict>
        <key>shellVariables</key>
        <array>"#;

const FOOTER: &str = r#"
        </array>
    </dict>
    <key>uuid</key>
    <string>0ef292cd-943a-4fb0-b43d-65959c5e6b06</string>
</dict>
</plist>"#;

static SHELL_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<dict>\s*<key>name</key>\s*<string>([^<]*)</string>\s*",
        r"<key>value</key>\s*<string><!\[CDATA\[(.*?)\]\]></string>\s*</dict>",
    ))
    .unwrap()
});

/// Renders the preferences document for a style map.
pub fn render_preferences(map: &StyleMap) -> String {
    let mut document = String::from(HEADER);
    for (slot, fragment) in map.sorted_entries() {
        // Writing into a String cannot fail.
        let _ = write!(
            document,
            "
            <dict>
                <key>name</key>
                <string>{slot}</string>
                <key>value</key>
                <string><![CDATA[{fragment}]]></string>
            </dict>"
        );
    }
    document.push_str(FOOTER);
    document
}

/// Reads a style map back out of a rendered preferences document.
pub fn parse_preferences(document: &str) -> Result<StyleMap, StyleError> {
    if !document.starts_with(HEADER) || !document.ends_with(FOOTER) {
        return Err(StyleError::MalformedDocument(
            "missing shell variable header or footer".to_string(),
        ));
    }

    let mut map = StyleMap::new();
    for caps in SHELL_VARIABLE.captures_iter(document) {
        let name = &caps[1];
        let slot = Slot::from_name(name).ok_or_else(|| StyleError::UnknownSlot(name.to_string()))?;
        map.set(slot, &caps[2]);
    }
    Ok(map)
}

/// Debounces writes of the preferences document.
///
/// `pending` is the change flag: it is raised by [`PreferencesWriter::mark`]
/// and lowered when the write runs, so a burst of changes schedules a single
/// save that observes the map as it is when the save fires.
#[derive(Debug)]
pub struct PreferencesWriter {
    document_name: String,
    pending: bool,
    writes: usize,
}

impl PreferencesWriter {
    /// Creates a writer for the configured document.
    pub fn new(config: &StyleConfig) -> Self {
        Self {
            document_name: config.document_name.clone(),
            pending: false,
            writes: 0,
        }
    }

    /// The cache name of the document.
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Returns true while a save is scheduled but has not run.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of saves that actually wrote to the cache.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Records a style change, scheduling a save unless one is pending.
    ///
    /// Returns true if a save was scheduled.
    pub fn mark(&mut self, scheduler: &mut dyn Scheduler, delay: std::time::Duration) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        scheduler.schedule(delay, Task::SavePreferences);
        true
    }

    /// Drops a pending save without writing anything.
    pub fn clear(&mut self) {
        self.pending = false;
    }

    /// Writes the document for `map` unless the cached copy is identical.
    ///
    /// Returns true if the cache was written.
    pub fn save(&mut self, map: &StyleMap, cache: &mut dyn PreferenceCache) -> Result<bool, StyleError> {
        self.pending = false;

        let document = render_preferences(map);
        if cache.get(&self.document_name).as_deref() == Some(document.as_str()) {
            debug!(document = %self.document_name, "preferences unchanged");
            return Ok(false);
        }

        cache.set(&self.document_name, &document)?;
        self.writes += 1;
        info!(document = %self.document_name, slots = map.len(), "preferences written");
        Ok(true)
    }
}
