// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Rewrites the whitespace of a code snippet to the extracted signature style.
//!
//! The substitutions are purely textual and run in a fixed order, each one
//! on the output of the previous. The order matters: the empty paren collapse
//! has to see the result of the paren normalization, and the return type colon
//! has to come last so it wins over the general colon rule.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

use crate::style::slot::Slot;
use crate::style::style_map::StyleMap;

static OPEN_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\s*").unwrap());
static CLOSE_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\)").unwrap());
static EMPTY_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s+\)").unwrap());
// Applies to every colon, including object literal fields and ternaries.
static COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*:\s*").unwrap());
static OPEN_ANGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*<\s*").unwrap());
static CLOSE_ANGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^-\s])\s*>").unwrap());
static COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*,\s*").unwrap());
static ASSIGN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=\s*").unwrap());
static ARROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*->\s*").unwrap());
static SEMICOLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*;").unwrap());
static RETURN_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\)\s*:").unwrap());

fn surround(map: &StyleMap, before: Slot, token: &str, after: Slot) -> String {
    format!("{}{token}{}", map.fragment(before), map.fragment(after))
}

fn replace(pattern: &Regex, text: String, replacement: &str) -> String {
    pattern.replace_all(&text, NoExpand(replacement)).into_owned()
}

/// Formats `text` with the fragments in `map`.
///
/// Slots missing from the map are treated as empty.
pub fn format_statement(map: &StyleMap, text: &str) -> String {
    let mut value = text.to_string();

    value = replace(
        &OPEN_PAREN,
        value,
        &surround(map, Slot::WsOpenParen, "(", Slot::OpenParenWs),
    );
    value = replace(&CLOSE_PAREN, value, &format!("{})", map.fragment(Slot::WsCloseParen)));
    value = replace(&EMPTY_PARENS, value, "()");
    value = replace(&COLON, value, &surround(map, Slot::WsColon, ":", Slot::ColonWs));
    value = replace(
        &OPEN_ANGLE,
        value,
        &surround(map, Slot::WsOpenAngle, "<", Slot::OpenAngleWs),
    );

    let close_angle = map.fragment(Slot::WsCloseAngle);
    value = CLOSE_ANGLE
        .replace_all(&value, |caps: &Captures<'_>| format!("{}{close_angle}>", &caps[1]))
        .into_owned();

    value = replace(&COMMA, value, &surround(map, Slot::WsComma, ",", Slot::CommaWs));
    value = replace(&ASSIGN, value, &surround(map, Slot::WsAssign, "=", Slot::AssignWs));
    value = replace(&ARROW, value, &surround(map, Slot::WsArrow, "->", Slot::ArrowWs));
    value = replace(&SEMICOLON, value, &format!("{};", map.fragment(Slot::WsSemicolon)));
    value = replace(
        &RETURN_COLON,
        value,
        &format!("){}:", map.fragment(Slot::CloseParenWsColon)),
    );

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::rules::{SignatureWhitespace, StyleRule};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn map_from(sample: &str) -> StyleMap {
        let mut map = StyleMap::new();
        map.apply(SignatureWhitespace.extract(sample).unwrap());
        map
    }

    #[test]
    fn test_tight_style() {
        let map = map_from("function f(a:T<T>,b:T=null):T->T;");
        assert_eq!(
            format_statement(&map, "function f(a : T < T >, b:T=null) : T -> T;"),
            "function f(a:T<T>,b:T=null):T->T;"
        );
    }

    #[test]
    fn test_default_style() {
        let map = map_from(SignatureWhitespace.default_sample());
        assert_eq!(
            format_statement(&map, "function f( a : T<T> ,b : T=null ) : T->T ;"),
            "function f(a:T<T>, b:T = null):T->T;"
        );
    }

    #[test]
    fn test_spaced_style() {
        let map = map_from("function f ( a : T < T > , b : T = null ) : T -> T ;");
        assert_eq!(
            format_statement(&map, "function f(a:T<T>,b:T=null):T->T;"),
            "function f ( a : T < T > , b : T = null ) : T -> T ;"
        );
    }

    #[test]
    fn test_empty_parens_collapse() {
        let map = map_from("function f ( a:T<T>, b:T = null ):T->T;");
        assert_eq!(format_statement(&map, "foo(    )"), "foo ()");
        assert_eq!(format_statement(&StyleMap::new(), "foo(    )"), "foo()");
    }

    #[test]
    fn test_arrow_is_not_a_close_angle() {
        let map = map_from("function f(a:T<T >, b:T = null):T->T;");
        assert_eq!(format_statement(&map, "Int->Void"), "Int->Void");
        assert_eq!(format_statement(&map, "Array<Int>"), "Array<Int >");
    }

    #[test]
    fn test_colon_rule_is_global() {
        let map = map_from("function f(a : T<T>, b:T = null) : T->T;");
        assert_eq!(format_statement(&map, "{x:1}"), "{x : 1}");
    }

    #[test]
    fn test_return_colon_overrides_colon() {
        let map = map_from("function f(a : T<T>, b:T = null):T->T;");
        assert_eq!(format_statement(&map, "f(a:Int) : Void"), "f(a : Int): Void");
    }

    #[test]
    fn test_fragments_are_literal() {
        let mut map = StyleMap::new();
        map.set(Slot::WsComma, "$1");
        assert_eq!(format_statement(&map, "a , b"), "a$1,b");
    }

    proptest! {
        #[test]
        fn prop_deterministic(text in "[a-z(),:<>=;\\- ]{0,40}") {
            let map = map_from(SignatureWhitespace.default_sample());
            prop_assert_eq!(format_statement(&map, &text), format_statement(&map, &text));
        }
    }
}
