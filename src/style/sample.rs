// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! A configured style sample and the rule that reads it.

use tracing::debug;

use crate::style::rules::StyleRule;
use crate::style::slot::Slot;

/// One style setting: the value last applied and the rule that extracts it.
#[derive(Debug)]
pub struct StyleSample {
    rule: Box<dyn StyleRule>,
    current: Option<String>,
}

impl StyleSample {
    /// Creates a sample that has not been applied yet.
    pub fn new(rule: Box<dyn StyleRule>) -> Self {
        Self { rule, current: None }
    }

    /// The setting key this sample tracks.
    pub fn setting_key(&self) -> &'static str {
        self.rule.setting_key()
    }

    /// The value applied by the last extraction.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Applies a new setting value.
    ///
    /// Returns `None` when nothing changed: the value is absent, or equal to
    /// the one already applied. Otherwise returns the fragments to store,
    /// taken from the value if it matches the rule's pattern and from the
    /// default sample if it does not.
    ///
    /// # Panics
    ///
    /// Panics if the rule's default sample does not match its own pattern.
    pub fn apply(&mut self, value: Option<&str>) -> Option<Vec<(Slot, String)>> {
        let value = value?;
        if self.current.as_deref() == Some(value) {
            return None;
        }
        self.current = Some(value.to_string());

        let fragments = match self.rule.extract(value) {
            Some(fragments) => fragments,
            None => {
                debug!(
                    key = self.rule.setting_key(),
                    sample = value,
                    "style sample does not match, using default"
                );
                self.rule
                    .extract(self.rule.default_sample())
                    .unwrap_or_else(|| {
                        panic!(
                            "default sample of `{}` does not match its pattern",
                            self.rule.setting_key()
                        )
                    })
            }
        };

        debug!(key = self.rule.setting_key(), slots = fragments.len(), "style sample extracted");
        Some(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::rules::{BraceCuddle, SignatureWhitespace};

    #[test]
    fn test_absent_value_is_skipped() {
        let mut sample = StyleSample::new(Box::new(BraceCuddle));
        assert!(sample.apply(None).is_none());
        assert_eq!(sample.current(), None);
    }

    #[test]
    fn test_same_value_is_not_reextracted() {
        let mut sample = StyleSample::new(Box::new(BraceCuddle));
        assert!(sample.apply(Some("}\nelse {")).is_some());
        assert!(sample.apply(Some("}\nelse {")).is_none());
        assert!(sample.apply(Some("} else {")).is_some());
        assert_eq!(sample.current(), Some("} else {"));
    }

    #[test]
    fn test_mismatch_falls_back_to_default() {
        let mut sample = StyleSample::new(Box::new(BraceCuddle));
        let fragments = sample.apply(Some("no braces here")).unwrap();
        assert_eq!(
            fragments,
            vec![(Slot::CloseBraceWs, " ".to_string()), (Slot::WsOpenBrace, " ".to_string())]
        );
        // The raw value is still remembered, so repeating it is a no-op.
        assert_eq!(sample.current(), Some("no braces here"));
        assert!(sample.apply(Some("no braces here")).is_none());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let value = "function f( a:T<T>,b:T=null ):T -> T;";
        let mut first = StyleSample::new(Box::new(SignatureWhitespace));
        let mut second = StyleSample::new(Box::new(SignatureWhitespace));
        assert_eq!(first.apply(Some(value)), second.apply(Some(value)));
    }

    #[derive(Debug)]
    struct BrokenRule;

    impl StyleRule for BrokenRule {
        fn setting_key(&self) -> &'static str {
            "broken"
        }

        fn default_sample(&self) -> &'static str {
            "nothing to see"
        }

        fn pattern(&self) -> &regex::Regex {
            static PATTERN: once_cell::sync::Lazy<regex::Regex> =
                once_cell::sync::Lazy::new(|| regex::Regex::new(r"x(\s*)y").unwrap());
            &PATTERN
        }

        fn fragments(&self, _caps: &regex::Captures<'_>) -> Vec<(Slot, String)> {
            Vec::new()
        }
    }

    #[test]
    #[should_panic(expected = "does not match its pattern")]
    fn test_broken_default_fails_fast() {
        let mut sample = StyleSample::new(Box::new(BrokenRule));
        sample.apply(Some("also nothing"));
    }
}
