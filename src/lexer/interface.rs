// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::borrow::Cow;

use string_cache::DefaultAtom;

use crate::tendril::StrTendril;

pub use self::TagKind::{EndTag, StartTag};
pub use self::Token::{CharRefToken, CommentToken, DataToken, DeclarationToken, EntityRefToken};
pub use self::Token::{Limitation, NamedCharRefToken, ParseError, PiToken, TagToken};

/// An interned tag or attribute name.
pub type LocalName = DefaultAtom;

/// An attribute of a start tag.
///
/// Quoted values have their quotes removed.  A valueless attribute such as
/// `<option selected>` has a value of `None`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Attribute {
    pub name: LocalName,
    pub value: Option<StrTendril>,
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TagKind {
    StartTag,
    EndTag,
}

/// A tag token.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Tag {
    pub kind: TagKind,
    pub name: LocalName,
    pub attrs: Vec<Attribute>,
}

impl Tag {
    /// Are the tags equivalent when we don't care about attribute order?
    pub fn equiv_modulo_attr_order(&self, other: &Tag) -> bool {
        if (self.kind != other.kind) || (self.name != other.name) {
            return false;
        }

        let mut self_attrs = self.attrs.clone();
        let mut other_attrs = other.attrs.clone();
        self_attrs.sort_by(|a, b| (*a.name).cmp(&*b.name));
        other_attrs.sort_by(|a, b| (*a.name).cmp(&*b.name));

        self_attrs == other_attrs
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| &*a.name == name)
    }
}

/// The delimiter that ended a reference, if one was consumed.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Terminator {
    /// `&amp;`
    Semicolon,
    /// A reference ended by a line break, which the reference consumed.
    Newline,
    /// Nothing was consumed: the reference ended at some other character,
    /// or at the end of the input.
    Empty,
}

impl Terminator {
    /// The consumed text, for callers reconstructing the source.
    pub fn as_str(self) -> &'static str {
        match self {
            Terminator::Semicolon => ";",
            Terminator::Newline => "\n",
            Terminator::Empty => "",
        }
    }
}

/// One token of a markup declaration such as `<!DOCTYPE ...>`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum DeclToken {
    /// A name or name token, normalized like tag names.
    Name(StrTendril),
    /// A name token made up of digits (with an optional sign).
    Number(i64),
    /// A quoted literal, quotation marks included.
    Literal(StrTendril),
    /// An embedded comment, `--` delimiters included.
    Comment(StrTendril),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Token {
    /// Character data.  A run of data may be split across several tokens.
    DataToken(StrTendril),
    TagToken(Tag),
    /// A numeric character reference: `&#233;`.
    CharRefToken(u32, Terminator),
    /// A named character reference: `&#re;`.  Strict mode only.
    NamedCharRefToken(StrTendril, Terminator),
    /// A general entity reference: `&amp;`.  Resolving the name is up to
    /// the sink.
    EntityRefToken(StrTendril, Terminator),
    /// The body of a processing instruction, between `<?` and `>`.
    PiToken(StrTendril),
    /// The text of one comment, without delimiters.
    CommentToken(StrTendril),
    /// A markup declaration other than a comment.  `<!>` gives an empty
    /// list.
    DeclarationToken(Vec<DeclToken>),
    /// A lexical error in the input.
    ParseError(Cow<'static, str>),
    /// A construct that was recognized but is not supported in the current
    /// mode.
    Limitation(Cow<'static, str>),
}

/// What the lexer should do after a token was processed.
#[derive(PartialEq, Eq, Clone, Debug)]
#[must_use]
pub enum TokenSinkResult {
    Continue,
    /// Treat everything up to `</name>` as data.
    Literal(LocalName),
    /// Treat all further input as data.
    Plaintext,
}

/// Types which can receive tokens from the lexer.
pub trait TokenSink {
    /// Process a token.  `line_number` is the line on which the construct
    /// that produced the token starts.
    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult;

    /// Signal sink that lexing reached the end.
    fn end(&self) {}
}

#[cfg(test)]
mod test {
    use super::{Attribute, StartTag, Tag, Terminator};
    use crate::tendril::SliceExt;

    fn attr(name: &str, value: Option<&str>) -> Attribute {
        Attribute {
            name: name.into(),
            value: value.map(|v| v.to_tendril()),
        }
    }

    #[test]
    fn attr_order_is_ignored() {
        let a = Tag {
            kind: StartTag,
            name: "img".into(),
            attrs: vec![attr("src", Some("x.gif")), attr("ismap", None)],
        };
        let mut b = a.clone();
        b.attrs.reverse();
        assert!(a.equiv_modulo_attr_order(&b));
        assert!(a != b);

        b.attrs[0].value = Some("".to_tendril());
        assert!(!a.equiv_modulo_attr_order(&b));
    }

    #[test]
    fn attribute_lookup() {
        let tag = Tag {
            kind: StartTag,
            name: "a".into(),
            attrs: vec![attr("href", Some("/"))],
        };
        assert_eq!(
            tag.get_attribute("href").and_then(|a| a.value.as_deref()),
            Some("/")
        );
        assert!(tag.get_attribute("name").is_none());
    }

    #[test]
    fn terminator_text() {
        assert_eq!(Terminator::Semicolon.as_str(), ";");
        assert_eq!(Terminator::Newline.as_str(), "\n");
        assert_eq!(Terminator::Empty.as_str(), "");
    }
}
