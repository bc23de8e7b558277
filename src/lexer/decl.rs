// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Markup declarations other than comments, and processing instructions.

use std::borrow::Cow::Borrowed;

use memchr::{memchr, memmem};

use super::comment::{match_comment, CommentMatch};
use super::interface::{DeclToken, DeclarationToken, Limitation, ParseError, PiToken};
use super::interface::TokenSink;
use super::{Lexer, Status};
use crate::syntax::MDO;
use crate::tendril::StrTendril;
use crate::util::str::{is_decl_name_char, run_len, skip_whitespace};

const DSC_MDC: &[u8] = b"]>";

impl<Sink: TokenSink> Lexer<Sink> {
    /// Lex markup at `i`, which starts with `<!`.
    pub(super) fn parse_markup_declaration(
        &self,
        buf: &StrTendril,
        i: usize,
        at_eof: bool,
    ) -> Status {
        let bytes = buf.as_bytes();
        assert!(
            bytes[i..].starts_with(MDO.as_bytes()),
            "declaration parsing started at {:?}",
            &buf[i..]
        );
        if bytes[i..].starts_with(b"<!--") {
            return self.parse_comment(buf, i, at_eof);
        }
        let close = match memchr(b'>', &bytes[i + 2..]) {
            Some(off) => i + 2 + off,
            None => return Status::Incomplete,
        };
        if close == i + MDO.len() {
            self.process_token(DeclarationToken(vec![]));
            return Status::Done(close + 1);
        }
        if !self.strict.get() {
            // Declarations are not lexed in lenient mode; pass them through.
            self.emit_data(buf, i, close + 1);
            return Status::Done(close + 1);
        }
        if bytes[i + 2].is_ascii_alphabetic() {
            self.parse_declaration(buf, i, at_eof)
        } else {
            self.emit_data(buf, i, i + 2);
            Status::Done(i + 2)
        }
    }

    /// Lex a declaration such as `<!DOCTYPE html PUBLIC "...">` at `i`.
    /// Strict mode only.
    fn parse_declaration(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        let mut tokens = vec![];

        let name_start = i + 2;
        let name_end = name_start + run_len(bytes, name_start, is_decl_name_char);
        tokens.push(DeclToken::Name(self.normalized(buf, name_start..name_end)));
        let mut pos = skip_whitespace(bytes, name_end);

        let mut subset = false;
        loop {
            let c = match bytes.get(pos) {
                Some(&c) => c,
                None => return self.unterminated_declaration(buf, i, at_eof),
            };
            match c {
                b'>' => break,
                b'[' => {
                    subset = true;
                    break;
                },
                b'"' | b'\'' => {
                    let close = match memchr(c, &bytes[pos + 1..]) {
                        Some(off) => pos + 1 + off,
                        None => return self.unterminated_declaration(buf, i, at_eof),
                    };
                    tokens.push(DeclToken::Literal(
                        buf.subtendril(pos as u32, (close + 1 - pos) as u32),
                    ));
                    pos = skip_whitespace(bytes, close + 1);
                    continue;
                },
                _ => (),
            }
            match match_comment(bytes, pos) {
                CommentMatch::Found { text, end } => {
                    let with_delims = pos..text.end + 2;
                    tokens.push(DeclToken::Comment(buf.subtendril(
                        with_delims.start as u32,
                        with_delims.len() as u32,
                    )));
                    pos = end;
                    continue;
                },
                CommentMatch::Incomplete => {
                    return self.unterminated_declaration(buf, i, at_eof)
                },
                CommentMatch::NoMatch => (),
            }
            let end = pos + run_len(bytes, pos, is_decl_name_char);
            let token = &buf[pos..end];
            tokens.push(match number(token) {
                Some(n) => DeclToken::Number(n),
                None => DeclToken::Name(self.normalized(buf, pos..end)),
            });
            pos = skip_whitespace(bytes, end);
        }

        let close = if subset {
            match memmem::find(&bytes[pos..], DSC_MDC) {
                Some(off) => pos + off + 1,
                None if !at_eof => return Status::Incomplete,
                None => match memchr(b'>', &bytes[pos..]) {
                    Some(off) => pos + off,
                    None => return self.unterminated_declaration(buf, i, at_eof),
                },
            }
        } else {
            pos
        };

        if subset {
            self.process_token(Limitation(Borrowed("declaration subset not supported")));
        }
        self.process_token(DeclarationToken(tokens));
        Status::Done(close + 1)
    }

    fn unterminated_declaration(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        if !at_eof {
            return Status::Incomplete;
        }
        self.process_token(ParseError(Borrowed(
            "unexpected end of data in markup declaration",
        )));
        self.emit_data(buf, i, buf.len());
        Status::Done(buf.len())
    }

    /// Lex a processing instruction at `i`, which starts with `<?`.
    pub(super) fn parse_processing_instruction(&self, buf: &StrTendril, i: usize) -> Status {
        let bytes = buf.as_bytes();
        assert!(
            bytes[i..].starts_with(b"<?"),
            "processing instruction parsing started at {:?}",
            &buf[i..]
        );
        let close = match memchr(b'>', &bytes[i + 2..]) {
            Some(off) => i + 2 + off,
            None => return Status::Incomplete,
        };
        if self.strict.get() {
            self.process_token(PiToken(
                buf.subtendril((i + 2) as u32, (close - i - 2) as u32),
            ));
            Status::Done(close + 1)
        } else {
            // Only the `<` is data; the rest is lexed as content.
            self.emit_data(buf, i, i + 1);
            Status::Done(i + 1)
        }
    }
}

/// A name token that is all digits, with an optional sign, is a number.
fn number(token: &str) -> Option<i64> {
    let digits = token.strip_prefix(|c| c == '+' || c == '-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
