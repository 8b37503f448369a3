// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Fixed-shape patterns that read whitespace conventions out of style samples.
//!
//! Each rule owns one setting, one default sample and one pattern with a
//! capture group per whitespace location of interest. The patterns are
//! templates rather than grammars: a sample either has exactly the expected
//! shape or it is replaced by the rule's default.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::style::slot::Slot;

/// Setting key of the function signature whitespace sample.
pub const WHITESPACE_STYLE_KEY: &str = "haxe_whitespace_style";
/// Setting key of the for-loop whitespace sample.
pub const WHITESPACE_STYLE2_KEY: &str = "haxe_whitespace_style2";
/// Setting key of the `} else {` brace sample.
pub const BRACE_STYLE_KEY: &str = "haxe_brace_style";
/// Setting key of the method/class brace sample.
pub const BRACE_STYLE2_KEY: &str = "haxe_brace_style2";

static SIGNATURE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"function f(\s*)\((\s*)",
        r"a(\s*):(\s*)T(\s*)<(\s*)T(\s*)>(\s*),(\s*)",
        r"b\s*:\s*T(\s*)=(\s*)null(\s*)",
        r"\)(\s*):\s*T(\s*)->(\s*)T(\s*);",
    ))
    .unwrap()
});

static LOOP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"for(\s*)\(\s*i\s+in\s0(\s*)\.\.\.(\s*)5\)").unwrap());

static BRACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}([\s\n]*)else([\s\n]*)\{").unwrap());

static BLOCK_BRACE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"methodOrClass([\s\n]*)\{").unwrap());

/// Slots written by [`SignatureWhitespace`], in capture group order.
pub const SIGNATURE_SLOTS: [Slot; 16] = [
    Slot::WsOpenParen,
    Slot::OpenParenWs,
    Slot::WsColon,
    Slot::ColonWs,
    Slot::WsOpenAngle,
    Slot::OpenAngleWs,
    Slot::WsCloseAngle,
    Slot::WsComma,
    Slot::CommaWs,
    Slot::WsAssign,
    Slot::AssignWs,
    Slot::WsCloseParen,
    Slot::CloseParenWsColon,
    Slot::WsArrow,
    Slot::ArrowWs,
    Slot::WsSemicolon,
];

const LOOP_SLOTS: [Slot; 3] = [Slot::KeywordWsOpenParen, Slot::WsThreeDots, Slot::ThreeDotsWs];

const BRACE_SLOTS: [Slot; 2] = [Slot::CloseBraceWs, Slot::WsOpenBrace];

/// Text of capture group `index`, or the empty string.
fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Maps capture groups 1..=n onto the given slots.
fn positional(caps: &Captures<'_>, slots: &[Slot]) -> Vec<(Slot, String)> {
    slots
        .iter()
        .enumerate()
        .map(|(i, &slot)| (slot, group(caps, i + 1).to_string()))
        .collect()
}

/// A rule turning a style sample into named fragments.
pub trait StyleRule: fmt::Debug + Send {
    /// The setting this rule reads its sample from.
    fn setting_key(&self) -> &'static str;

    /// The sample used when the configured one does not match.
    /// It must always match [`StyleRule::pattern`].
    fn default_sample(&self) -> &'static str;

    /// The fixed-shape pattern samples are matched against.
    fn pattern(&self) -> &Regex;

    /// Builds the fragments from a successful match.
    fn fragments(&self, caps: &Captures<'_>) -> Vec<(Slot, String)>;

    /// Matches a sample and returns its fragments, or `None` if the sample
    /// does not have the expected shape.
    fn extract(&self, sample: &str) -> Option<Vec<(Slot, String)>> {
        self.pattern()
            .captures(sample)
            .map(|caps| self.fragments(&caps))
    }
}

/// Whitespace around the punctuation of a function signature.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignatureWhitespace;

impl StyleRule for SignatureWhitespace {
    fn setting_key(&self) -> &'static str {
        WHITESPACE_STYLE_KEY
    }

    fn default_sample(&self) -> &'static str {
        "function f(a:T<T>, b:T = null):T->T;"
    }

    fn pattern(&self) -> &Regex {
        &SIGNATURE_PATTERN
    }

    fn fragments(&self, caps: &Captures<'_>) -> Vec<(Slot, String)> {
        positional(caps, &SIGNATURE_SLOTS)
    }
}

/// Whitespace in a `for (i in 0 ... 5)` range loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopWhitespace;

impl StyleRule for LoopWhitespace {
    fn setting_key(&self) -> &'static str {
        WHITESPACE_STYLE2_KEY
    }

    fn default_sample(&self) -> &'static str {
        "for (i in 0 ... 5)"
    }

    fn pattern(&self) -> &Regex {
        &LOOP_PATTERN
    }

    fn fragments(&self, caps: &Captures<'_>) -> Vec<(Slot, String)> {
        positional(caps, &LOOP_SLOTS)
    }
}

/// Separators around `else` between a closing and an opening brace.
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceCuddle;

impl StyleRule for BraceCuddle {
    fn setting_key(&self) -> &'static str {
        BRACE_STYLE_KEY
    }

    fn default_sample(&self) -> &'static str {
        "} else {"
    }

    fn pattern(&self) -> &Regex {
        &BRACE_PATTERN
    }

    fn fragments(&self, caps: &Captures<'_>) -> Vec<(Slot, String)> {
        positional(caps, &BRACE_SLOTS)
    }
}

/// Placement of the opening brace of a method or class body.
#[derive(Debug, Clone)]
pub struct BlockBrace {
    indent_unit: String,
}

impl BlockBrace {
    /// Creates the rule with the indent unit appended after a newline.
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
        }
    }

    /// Returns the separator as it appears inside an indented block.
    pub fn indented(&self, separator: &str) -> String {
        if separator.contains('\n') {
            format!("{separator}{}", self.indent_unit)
        } else {
            separator.to_string()
        }
    }
}

impl Default for BlockBrace {
    fn default() -> Self {
        Self::new("\t")
    }
}

impl StyleRule for BlockBrace {
    fn setting_key(&self) -> &'static str {
        BRACE_STYLE2_KEY
    }

    fn default_sample(&self) -> &'static str {
        "methodOrClass\n{"
    }

    fn pattern(&self) -> &Regex {
        &BLOCK_BRACE_PATTERN
    }

    fn fragments(&self, caps: &Captures<'_>) -> Vec<(Slot, String)> {
        let separator = group(caps, 1);
        vec![
            (Slot::BlockBraceWs, separator.to_string()),
            (Slot::BlockBraceIndent, self.indented(separator)),
        ]
    }
}

/// Returns the four rules in the order a full update applies them.
pub fn default_rules(indent_unit: &str) -> Vec<Box<dyn StyleRule>> {
    vec![
        Box::new(SignatureWhitespace),
        Box::new(LoopWhitespace),
        Box::new(BraceCuddle),
        Box::new(BlockBrace::new(indent_unit)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment(fragments: &[(Slot, String)], slot: Slot) -> &str {
        fragments
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, f)| f.as_str())
            .unwrap()
    }

    #[test]
    fn test_default_samples_match_their_patterns() {
        for rule in default_rules("\t") {
            assert!(
                rule.extract(rule.default_sample()).is_some(),
                "default sample of {} does not match",
                rule.setting_key()
            );
        }
    }

    #[test]
    fn test_signature_default() {
        let fragments = SignatureWhitespace.extract(SignatureWhitespace.default_sample()).unwrap();
        assert_eq!(fragments.len(), 16);
        assert_eq!(fragment(&fragments, Slot::WsOpenParen), "");
        assert_eq!(fragment(&fragments, Slot::CommaWs), " ");
        assert_eq!(fragment(&fragments, Slot::WsAssign), " ");
        assert_eq!(fragment(&fragments, Slot::AssignWs), " ");
        assert_eq!(fragment(&fragments, Slot::WsArrow), "");
        assert_eq!(fragment(&fragments, Slot::WsSemicolon), "");
    }

    #[test]
    fn test_signature_spaced() {
        let sample = "function f ( a : T < T > , b : T = null ) : T -> T ;";
        let fragments = SignatureWhitespace.extract(sample).unwrap();
        for (slot, text) in &fragments {
            assert_eq!(text, " ", "slot {slot}");
        }
    }

    #[test]
    fn test_signature_is_searched_not_anchored() {
        let sample = "// my style:\nfunction f(a:T<T>,b:T=null):T->T;\n";
        let fragments = SignatureWhitespace.extract(sample).unwrap();
        assert_eq!(fragment(&fragments, Slot::CommaWs), "");
    }

    #[test]
    fn test_signature_mismatch() {
        assert!(SignatureWhitespace.extract("function g(x:Int):Void;").is_none());
    }

    #[test]
    fn test_loop_whitespace() {
        let fragments = LoopWhitespace.extract("for(i in 0...5)").unwrap();
        assert_eq!(fragment(&fragments, Slot::KeywordWsOpenParen), "");
        assert_eq!(fragment(&fragments, Slot::WsThreeDots), "");
        assert_eq!(fragment(&fragments, Slot::ThreeDotsWs), "");

        let fragments = LoopWhitespace.extract(LoopWhitespace.default_sample()).unwrap();
        assert_eq!(fragment(&fragments, Slot::KeywordWsOpenParen), " ");
        assert_eq!(fragment(&fragments, Slot::WsThreeDots), " ");
        assert_eq!(fragment(&fragments, Slot::ThreeDotsWs), " ");
    }

    #[test]
    fn test_brace_cuddle() {
        let fragments = BraceCuddle.extract("}\nelse\n{").unwrap();
        assert_eq!(fragment(&fragments, Slot::CloseBraceWs), "\n");
        assert_eq!(fragment(&fragments, Slot::WsOpenBrace), "\n");
    }

    #[test]
    fn test_block_brace_same_line() {
        let fragments = BlockBrace::default().extract("methodOrClass {").unwrap();
        assert_eq!(fragment(&fragments, Slot::BlockBraceWs), " ");
        assert_eq!(fragment(&fragments, Slot::BlockBraceIndent), " ");
    }

    #[test]
    fn test_block_brace_custom_indent() {
        let rule = BlockBrace::new("  ");
        let fragments = rule.extract("methodOrClass\n{").unwrap();
        assert_eq!(fragment(&fragments, Slot::BlockBraceIndent), "\n  ");
    }
}
