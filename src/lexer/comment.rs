// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Comment declarations: `<!-- one -- -- two -->`.

use std::borrow::Cow::Borrowed;
use std::ops::Range;

use memchr::memchr;

use super::interface::{CommentToken, ParseError, TokenSink};
use super::{Lexer, Status};
use crate::syntax::{COM, MDO};
use crate::tendril::StrTendril;
use crate::util::str::skip_whitespace;

#[derive(PartialEq, Eq, Clone, Debug)]
pub(super) enum CommentMatch {
    Found {
        /// The comment text, without delimiters.
        text: Range<usize>,
        /// Index past the closing `--` and any whitespace after it.
        end: usize,
    },
    /// An open comment that is not closed in the input seen so far.
    Incomplete,
    /// No comment starts here.
    NoMatch,
}

/// Match one `--text--` comment at `start`, followed by optional
/// whitespace.  The search for the closing delimiter only ever looks at
/// hyphens, so a long comment costs one pass over its text.
pub(super) fn match_comment(bytes: &[u8], start: usize) -> CommentMatch {
    match (bytes.get(start), bytes.get(start + 1)) {
        (Some(b'-'), Some(b'-')) => (),
        (Some(b'-'), None) => return CommentMatch::Incomplete,
        _ => return CommentMatch::NoMatch,
    }
    let mut pos = start + 2;
    loop {
        let hyphen = match memchr(b'-', &bytes[pos..]) {
            Some(off) => pos + off,
            None => return CommentMatch::Incomplete,
        };
        match bytes.get(hyphen + 1) {
            None => return CommentMatch::Incomplete,
            Some(b'-') => {
                return CommentMatch::Found {
                    text: start + 2..hyphen,
                    end: skip_whitespace(bytes, hyphen + 2),
                };
            },
            // A lone hyphen and the character after it belong to the text.
            Some(_) => pos = hyphen + 2,
        }
    }
}

/// Find the lenient comment close, `--` then optional whitespace then `>`,
/// at or after `from`.  Returns the index of the `--` and the index past
/// the `>`.
fn find_lenient_close(bytes: &[u8], mut from: usize) -> Option<(usize, usize)> {
    while let Some(off) = memchr(b'-', &bytes[from..]) {
        let hyphen = from + off;
        if bytes.get(hyphen + 1) == Some(&b'-') {
            let close = skip_whitespace(bytes, hyphen + 2);
            if bytes.get(close) == Some(&b'>') {
                return Some((hyphen, close + 1));
            }
        }
        from = hyphen + 1;
    }
    None
}

impl<Sink: TokenSink> Lexer<Sink> {
    /// Lex a comment declaration at `i`, which starts with `<!--`.
    pub(super) fn parse_comment(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        assert!(
            bytes[i..].starts_with(b"<!--"),
            "comment parsing started at {:?}",
            &buf[i..]
        );
        if self.strict.get() {
            self.parse_strict_comment(buf, i, at_eof)
        } else {
            self.parse_lenient_comment(buf, i, at_eof)
        }
    }

    fn parse_lenient_comment(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        let text_start = i + MDO.len() + COM.len();
        let (text_end, next) = match find_lenient_close(bytes, text_start) {
            Some(close) => close,
            None if !at_eof => return Status::Incomplete,
            // Unterminated at end of input: settle for the first `>`.
            None => match memchr(b'>', &bytes[text_start..]) {
                Some(off) => (text_start + off, text_start + off + 1),
                None => (bytes.len(), bytes.len()),
            },
        };
        self.emit_comment(buf, text_start..text_end);
        Status::Done(next)
    }

    fn parse_strict_comment(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        let n = bytes.len();
        let mut comments = vec![];
        let mut errors = vec![];
        let mut pos = i + MDO.len();
        loop {
            if pos >= n {
                if !at_eof {
                    return Status::Incomplete;
                }
                errors.push(Borrowed("unexpected end of data in markup declaration"));
                break;
            }
            if bytes[pos] == b'>' {
                pos += 1;
                break;
            }
            match match_comment(bytes, pos) {
                CommentMatch::Found { text, end } => {
                    comments.push(text);
                    pos = end;
                },
                CommentMatch::Incomplete if at_eof => {
                    errors.push(Borrowed("unexpected end of data in comment"));
                    comments.push((pos + 2).min(n)..n);
                    pos = n;
                    break;
                },
                CommentMatch::Incomplete => return Status::Incomplete,
                CommentMatch::NoMatch => {
                    let c = buf[pos..].chars().next().unwrap_or('\u{fffd}');
                    errors.push(
                        format!("illegal character in markup declaration: {:?}", c).into(),
                    );
                    pos += c.len_utf8();
                },
            }
        }
        for error in errors {
            self.process_token(ParseError(error));
        }
        for text in comments {
            self.emit_comment(buf, text);
        }
        Status::Done(pos)
    }

    fn emit_comment(&self, buf: &StrTendril, text: Range<usize>) {
        self.process_token(CommentToken(
            buf.subtendril(text.start as u32, text.len() as u32),
        ));
    }
}

#[cfg(test)]
mod test {
    use super::{find_lenient_close, match_comment, CommentMatch};
    use crate::lexer::test::discarding_lexer;
    use crate::tendril::SliceExt;

    #[test]
    fn simple_comment() {
        assert_eq!(
            match_comment(b"-- hi --  >", 0),
            CommentMatch::Found {
                text: 2..6,
                end: 10,
            }
        );
    }

    #[test]
    fn lone_hyphens_are_text() {
        assert_eq!(
            match_comment(b"--a-b-c-->", 0),
            CommentMatch::Found {
                text: 2..7,
                end: 9,
            }
        );
    }

    #[test]
    fn open_comments_are_incomplete() {
        assert_eq!(match_comment(b"-- hi", 0), CommentMatch::Incomplete);
        assert_eq!(match_comment(b"-- hi -", 0), CommentMatch::Incomplete);
        assert_eq!(match_comment(b"-", 0), CommentMatch::Incomplete);
    }

    #[test]
    fn other_text_is_no_comment() {
        assert_eq!(match_comment(b"-x--", 0), CommentMatch::NoMatch);
        assert_eq!(match_comment(b"x", 0), CommentMatch::NoMatch);
        assert_eq!(match_comment(b"", 0), CommentMatch::NoMatch);
    }

    #[test]
    fn lenient_close() {
        assert_eq!(find_lenient_close(b" a -- b -- >x", 0), Some((8, 12)));
        assert_eq!(find_lenient_close(b" a --->", 0), Some((4, 7)));
        assert_eq!(find_lenient_close(b" a -- ", 0), None);
    }

    #[test]
    #[should_panic(expected = "comment parsing started at")]
    fn comment_must_start_at_its_delimiter() {
        let buf = "<!x>".to_tendril();
        let _ = discarding_lexer(true).parse_comment(&buf, 0, false);
    }
}
