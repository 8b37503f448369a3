// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Where style samples come from.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::StyleError;
use crate::style::rules::{
    BRACE_STYLE2_KEY, BRACE_STYLE_KEY, BlockBrace, BraceCuddle, LoopWhitespace,
    SignatureWhitespace, StyleRule, WHITESPACE_STYLE2_KEY, WHITESPACE_STYLE_KEY,
};

/// A source of style sample settings.
///
/// `None` means "leave the style alone": the service skips the setting for
/// this update rather than substituting a default.
pub trait SettingsSource {
    /// Returns the sample configured for `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// Returns the default sample for a known style setting.
pub fn default_sample(key: &str) -> Option<&'static str> {
    match key {
        WHITESPACE_STYLE_KEY => Some(SignatureWhitespace.default_sample()),
        WHITESPACE_STYLE2_KEY => Some(LoopWhitespace.default_sample()),
        BRACE_STYLE_KEY => Some(BraceCuddle.default_sample()),
        BRACE_STYLE2_KEY => Some(BlockBrace::default().default_sample()),
        _ => None,
    }
}

/// Settings read from a JSON object such as `Haxe.sublime-settings`.
///
/// A key that is missing yields the default sample. A key set to `null` or
/// to a non-string value yields `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonSettings {
    values: Map<String, Value>,
}

impl JsonSettings {
    /// Creates settings with no keys set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, StyleError> {
        match serde_json::from_str(text)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(StyleError::NotAnObject),
        }
    }

    /// Loads settings from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StyleError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets a key. `None` stores `null`.
    pub fn set(&mut self, key: impl Into<String>, value: Option<&str>) {
        let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
        self.values.insert(key.into(), value);
    }

    /// Removes a key so that its default applies again.
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }
}

impl SettingsSource for JsonSettings {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            Some(_) => None,
            None => default_sample(key).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_key_uses_default() {
        let settings = JsonSettings::new();
        assert_eq!(settings.get(BRACE_STYLE_KEY).as_deref(), Some("} else {"));
        assert_eq!(settings.get("haxe_unrelated"), None);
    }

    #[test]
    fn test_null_and_non_string_are_absent() {
        let settings = JsonSettings::from_json_str(
            r#"{ "haxe_brace_style": null, "haxe_brace_style2": 4 }"#,
        )
        .unwrap();
        assert_eq!(settings.get(BRACE_STYLE_KEY), None);
        assert_eq!(settings.get(BRACE_STYLE2_KEY), None);
    }

    #[test]
    fn test_set_and_remove() {
        let mut settings = JsonSettings::new();
        settings.set(WHITESPACE_STYLE2_KEY, Some("for(i in 0...5)"));
        assert_eq!(settings.get(WHITESPACE_STYLE2_KEY).as_deref(), Some("for(i in 0...5)"));

        settings.set(WHITESPACE_STYLE2_KEY, None);
        assert_eq!(settings.get(WHITESPACE_STYLE2_KEY), None);

        assert!(settings.remove(WHITESPACE_STYLE2_KEY));
        assert_eq!(settings.get(WHITESPACE_STYLE2_KEY).as_deref(), Some("for (i in 0 ... 5)"));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(matches!(JsonSettings::from_json_str("[1, 2]"), Err(StyleError::NotAnObject)));
        assert!(matches!(JsonSettings::from_json_str("{"), Err(StyleError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "haxe_whitespace_style": "function f(a:T<T>,b:T=null):T->T;" }}"#).unwrap();

        let settings = JsonSettings::load(file.path()).unwrap();
        assert_eq!(
            settings.get(WHITESPACE_STYLE_KEY).as_deref(),
            Some("function f(a:T<T>,b:T=null):T->T;")
        );
    }
}
