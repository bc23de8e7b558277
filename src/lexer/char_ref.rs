// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Character and entity references in content.

use std::ops::Range;

use log::trace;

use super::interface::{CharRefToken, DataToken, EntityRefToken, NamedCharRefToken};
use super::interface::{Terminator, TokenSink};
use super::{Lexer, Status};
use crate::syntax::CRO;
use crate::tendril::StrTendril;
use crate::util::str::{is_char_ref_name_char, is_name_char, run_len};

#[derive(PartialEq, Eq, Clone, Debug)]
pub(super) enum RefScan {
    Match {
        name: Range<usize>,
        terminator: Terminator,
        /// Index just past the reference and its consumed terminator.
        next: usize,
    },
    /// The reference may continue in input not yet seen.
    Pending,
    NoMatch,
}

/// Scan a reference name at `from`: one byte satisfying `first`, then any
/// number satisfying `rest`, then an optional terminator.  When `at_eof`
/// is set, a name running to the end of the input is complete.
pub(super) fn scan_name(
    bytes: &[u8],
    from: usize,
    first: fn(u8) -> bool,
    rest: fn(u8) -> bool,
    at_eof: bool,
) -> RefScan {
    match bytes.get(from) {
        None if at_eof => return RefScan::NoMatch,
        None => return RefScan::Pending,
        Some(&b) if !first(b) => return RefScan::NoMatch,
        Some(_) => (),
    }
    let end = from + 1 + run_len(bytes, from + 1, rest);
    let (terminator, next) = match bytes.get(end) {
        None if !at_eof => return RefScan::Pending,
        Some(b';') => (Terminator::Semicolon, end + 1),
        Some(b'\n') => (Terminator::Newline, end + 1),
        _ => (Terminator::Empty, end),
    };
    RefScan::Match {
        name: from..end,
        terminator,
        next,
    }
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_entity_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

impl<Sink: TokenSink> Lexer<Sink> {
    /// Lex a reference at `i`, which holds a `&`.
    pub(super) fn step_reference(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        assert!(
            bytes.get(i) == Some(&b'&'),
            "reference parsing started at {:?}",
            &buf[i..]
        );

        if bytes.get(i + 1) == Some(&b'#') {
            let scan = match bytes.get(i + 2) {
                Some(b) if b.is_ascii_digit() => {
                    scan_name(bytes, i + 2, is_digit, is_digit, at_eof)
                },
                _ if self.strict.get() => scan_name(
                    bytes,
                    i + 2,
                    is_char_ref_name_char,
                    is_char_ref_name_char,
                    at_eof,
                ),
                _ => scan_name(bytes, i + 2, is_digit, is_digit, at_eof),
            };
            match scan {
                RefScan::Match {
                    name,
                    terminator,
                    next,
                } => return self.emit_char_ref(buf, name, terminator, next),
                RefScan::Pending => return Status::Incomplete,
                RefScan::NoMatch => (),
            }
        }

        match scan_name(bytes, i + 1, is_entity_name_start, is_name_char, at_eof) {
            RefScan::Match {
                name,
                terminator,
                next,
            } => {
                let (terminator, newline) = self.newline_terminator(terminator);
                trace!("entity reference {:?}", &buf[name.clone()]);
                self.process_token(EntityRefToken(
                    buf.subtendril(name.start as u32, name.len() as u32),
                    terminator,
                ));
                self.emit_newline(buf, newline, next);
                Status::Done(next)
            },
            RefScan::Pending => Status::Incomplete,
            RefScan::NoMatch => Status::NoMatch,
        }
    }

    fn emit_char_ref(
        &self,
        buf: &StrTendril,
        name: Range<usize>,
        terminator: Terminator,
        next: usize,
    ) -> Status {
        let (terminator, newline) = self.newline_terminator(terminator);
        let text = &buf[name.clone()];
        if text.as_bytes()[0].is_ascii_digit() {
            match text.parse::<u32>() {
                Ok(n) => self.process_token(CharRefToken(n, terminator)),
                Err(_) => {
                    // Too large to be a character number; hand it back as text.
                    let mut data = StrTendril::from_slice(CRO);
                    data.push_slice(text);
                    data.push_slice(terminator.as_str());
                    self.process_token(DataToken(data));
                },
            }
        } else {
            let name = self.normalized(buf, name);
            self.process_token(NamedCharRefToken(name, terminator));
        }
        self.emit_newline(buf, newline, next);
        Status::Done(next)
    }

    /// Lenient mode does not let a reference swallow a line break.  Returns
    /// the terminator to report and whether the newline goes out as data.
    fn newline_terminator(&self, terminator: Terminator) -> (Terminator, bool) {
        if terminator == Terminator::Newline && !self.strict.get() {
            (Terminator::Empty, true)
        } else {
            (terminator, false)
        }
    }

    fn emit_newline(&self, buf: &StrTendril, newline: bool, next: usize) {
        if newline {
            self.emit_data(buf, next - 1, next);
        }
    }
}

#[cfg(test)]
mod test {
    use super::{is_digit, is_entity_name_start, scan_name, RefScan};
    use crate::lexer::interface::Terminator;
    use crate::lexer::test::discarding_lexer;
    use crate::tendril::SliceExt;
    use crate::util::str::is_name_char;

    fn entity(s: &str, at_eof: bool) -> RefScan {
        scan_name(s.as_bytes(), 1, is_entity_name_start, is_name_char, at_eof)
    }

    #[test]
    fn terminated_by_semicolon() {
        assert_eq!(
            entity("&amp; x", false),
            RefScan::Match {
                name: 1..4,
                terminator: Terminator::Semicolon,
                next: 5,
            }
        );
    }

    #[test]
    fn terminated_by_newline() {
        assert_eq!(
            entity("&a.b\nx", false),
            RefScan::Match {
                name: 1..4,
                terminator: Terminator::Newline,
                next: 5,
            }
        );
    }

    #[test]
    fn other_characters_are_not_consumed() {
        assert_eq!(
            entity("&amp x", false),
            RefScan::Match {
                name: 1..4,
                terminator: Terminator::Empty,
                next: 4,
            }
        );
    }

    #[test]
    fn end_of_buffer_waits_for_more() {
        assert_eq!(entity("&", false), RefScan::Pending);
        assert_eq!(entity("&am", false), RefScan::Pending);
        assert_eq!(
            entity("&am", true),
            RefScan::Match {
                name: 1..3,
                terminator: Terminator::Empty,
                next: 3,
            }
        );
        assert_eq!(entity("&", true), RefScan::NoMatch);
    }

    #[test]
    fn must_start_with_the_right_class() {
        assert_eq!(entity("&1x;", false), RefScan::NoMatch);
        assert_eq!(entity("& x", false), RefScan::NoMatch);
        assert_eq!(
            scan_name(b"&#65;", 2, is_digit, is_digit, false),
            RefScan::Match {
                name: 2..4,
                terminator: Terminator::Semicolon,
                next: 5,
            }
        );
    }

    #[test]
    #[should_panic(expected = "reference parsing started at")]
    fn reference_must_start_at_an_ampersand() {
        let buf = "a&b;".to_tendril();
        let _ = discarding_lexer(false).step_reference(&buf, 0, false);
    }
}
