// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Symbolic names for the whitespace fragments a style sample can encode.

use std::fmt;

/// A named whitespace/punctuation fragment extracted from a style sample.
///
/// The names are the shell variable names the generated preferences expose
/// to snippets, so they are part of the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Before `(`
    WsOpenParen,
    /// After `(`
    OpenParenWs,
    /// Before `:`
    WsColon,
    /// After `:`
    ColonWs,
    /// Before `<`
    WsOpenAngle,
    /// After `<`
    OpenAngleWs,
    /// Before `>`
    WsCloseAngle,
    /// Before `,`
    WsComma,
    /// After `,`
    CommaWs,
    /// Before `=`
    WsAssign,
    /// After `=`
    AssignWs,
    /// Before `)`
    WsCloseParen,
    /// Between `)` and a return type `:`
    CloseParenWsColon,
    /// Before `->`
    WsArrow,
    /// After `->`
    ArrowWs,
    /// Before `;`
    WsSemicolon,
    /// Between a keyword such as `for` and `(`
    KeywordWsOpenParen,
    /// Before `...`
    WsThreeDots,
    /// After `...`
    ThreeDotsWs,
    /// Between `}` and `else`
    CloseBraceWs,
    /// Between `else` and `{`
    WsOpenBrace,
    /// Between a method or class header and its `{`
    BlockBraceWs,
    /// [`Slot::BlockBraceWs`] with one indent unit added after a newline
    BlockBraceIndent,
}

impl Slot {
    /// Every slot, in declaration order.
    pub const ALL: [Slot; 23] = [
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
        Slot::KeywordWsOpenParen,
        Slot::WsThreeDots,
        Slot::ThreeDotsWs,
        Slot::CloseBraceWs,
        Slot::WsOpenBrace,
        Slot::BlockBraceWs,
        Slot::BlockBraceIndent,
    ];

    /// Returns the shell variable name of this slot.
    pub fn name(self) -> &'static str {
        match self {
            Slot::WsOpenParen => "HX_W_ORB",
            Slot::OpenParenWs => "HX_ORB_W",
            Slot::WsColon => "HX_W_C",
            Slot::ColonWs => "HX_C_W",
            Slot::WsOpenAngle => "HX_W_OAB",
            Slot::OpenAngleWs => "HX_OAB_W",
            Slot::WsCloseAngle => "HX_W_CAB",
            Slot::WsComma => "HX_W_CM",
            Slot::CommaWs => "HX_CM_W",
            Slot::WsAssign => "HX_W_A",
            Slot::AssignWs => "HX_A_W",
            Slot::WsCloseParen => "HX_W_CRB",
            Slot::CloseParenWsColon => "HX_CRB_W_C",
            Slot::WsArrow => "HX_W_AR",
            Slot::ArrowWs => "HX_AR_W",
            Slot::WsSemicolon => "HX_W_SC",
            Slot::KeywordWsOpenParen => "HX_K_W_ORB",
            Slot::WsThreeDots => "HX_W_TD",
            Slot::ThreeDotsWs => "HX_TD_W",
            Slot::CloseBraceWs => "HX_CCB_W",
            Slot::WsOpenBrace => "HX_W_OCB",
            Slot::BlockBraceWs => "HX_CCB_W2",
            Slot::BlockBraceIndent => "HX_CCB_I",
        }
    }

    /// Looks up a slot by its shell variable name.
    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.iter().copied().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Slot::ALL.iter().map(|slot| slot.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Slot::ALL.len());
    }

    #[test]
    fn test_name_lookup() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_name(slot.name()), Some(slot));
        }
        assert_eq!(Slot::from_name("HX_NOPE"), None);
        assert_eq!(Slot::WsArrow.to_string(), "HX_W_AR");
    }
}
