// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Start and end tags.

use std::borrow::Cow::{self, Borrowed};
use std::ops::Range;

use log::trace;
use memchr::{memchr, memchr2, memchr3};

use super::interface::{Attribute, EndTag, Limitation, LocalName, ParseError, StartTag};
use super::interface::{Tag, TagKind, TagToken, TokenSink};
use super::{Lexer, Status};
use crate::replace::replace;
use crate::syntax::ETAGO;
use crate::tendril::StrTendril;
use crate::util::str::{is_attr_name_char, is_attr_name_start, is_name_char, is_sgml_whitespace};
use crate::util::str::{is_tag_name_char, is_unquoted_value_char, run_len, skip_whitespace};

#[derive(PartialEq, Eq, Clone, Debug)]
enum AttrValue {
    /// Quoted; the range excludes the quotes.
    Quoted(Range<usize>),
    Unquoted(Range<usize>),
}

#[derive(PartialEq, Eq, Clone, Debug)]
struct AttrMatch {
    name: Range<usize>,
    value: Option<AttrValue>,
    end: usize,
}

/// Match one attribute specification at `from`: separators (whitespace or
/// commas), a name, and an optional `= value`.
fn match_attribute(bytes: &[u8], from: usize) -> Option<AttrMatch> {
    let start = from + run_len(bytes, from, |b| is_sgml_whitespace(b) || b == b',');
    if !is_attr_name_start(*bytes.get(start)?) {
        return None;
    }
    let name = start..start + 1 + run_len(bytes, start + 1, is_attr_name_char);

    let eq = skip_whitespace(bytes, name.end);
    if bytes.get(eq) != Some(&b'=') {
        return Some(AttrMatch {
            end: name.end,
            name,
            value: None,
        });
    }

    let v = skip_whitespace(bytes, eq + 1);
    if let Some(&quote) = bytes.get(v).filter(|&&b| b == b'"' || b == b'\'') {
        if let Some(off) = memchr(quote, &bytes[v + 1..]) {
            let close = v + 1 + off;
            return Some(AttrMatch {
                name,
                value: Some(AttrValue::Quoted(v + 1..close)),
                end: close + 1,
            });
        }
    }
    // An unclosed quote leaves an empty unquoted value behind it.
    let value = v..v + run_len(bytes, v, is_unquoted_value_char);
    Some(AttrMatch {
        name,
        end: value.end,
        value: Some(AttrValue::Unquoted(value)),
    })
}

/// Find the `<` or `>` that can end the tag whose name starts at `from`.
/// Quoted attribute values are skipped, so `<a title="x>y">` ends at the
/// last `>`.  `None` means the tag is not complete in `bytes`.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let off = memchr3(b'<', b'>', b'=', &bytes[pos..])?;
        let hit = pos + off;
        if bytes[hit] != b'=' {
            return Some(hit);
        }
        let v = skip_whitespace(bytes, hit + 1);
        pos = match bytes.get(v) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                v + 1 + memchr(quote, &bytes[v + 1..])? + 1
            },
            _ => v,
        };
    }
}

impl<Sink: TokenSink> Lexer<Sink> {
    pub(super) fn emit_tag(&self, kind: TagKind, name: LocalName, attrs: Vec<Attribute>) {
        trace!("{:?} {}", kind, name);
        // An element closed by its own shorthand has no literal content.
        let closes_literal = kind == EndTag &&
            self.literal.borrow().as_ref().map_or(false, |l| l.ends(&name));
        if closes_literal {
            self.clear_literal();
        }
        self.process_token(TagToken(Tag { kind, name, attrs }));
    }

    /// A tag is still open at the end of the input.  Report it and hand the
    /// rest of the input back as data.
    fn unterminated_tag(
        &self,
        buf: &StrTendril,
        i: usize,
        at_eof: bool,
        msg: &'static str,
    ) -> Status {
        if !at_eof {
            return Status::Incomplete;
        }
        if self.strict.get() {
            self.process_token(ParseError(Borrowed(msg)));
        } else {
            self.process_token(Limitation(Borrowed(msg)));
        }
        self.emit_data(buf, i, buf.len());
        Status::Done(buf.len())
    }

    /// Lex a start tag at `i`, which is `<` followed by a letter or `>`.
    pub(super) fn parse_starttag(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        assert!(
            bytes[i] == b'<' &&
                bytes
                    .get(i + 1)
                    .map_or(false, |&b| b == b'>' || b.is_ascii_alphabetic()),
            "start tag parsing started at {:?}",
            &buf[i..]
        );
        let strict = self.strict.get();

        if strict && bytes[i + 1] != b'>' {
            if let Some(status) = self.parse_shorttag(buf, i, at_eof) {
                return status;
            }
        }

        let end = match find_tag_end(bytes, i + 1) {
            Some(end) => Some(end),
            // No closing quote is coming; take the first bracket after all.
            None if at_eof => memchr2(b'<', b'>', &bytes[i + 1..]).map(|off| i + 1 + off),
            None => None,
        };
        let end = unwrap_or_return!(
            end,
            self.unterminated_tag(buf, i, at_eof, "unclosed start tag at end of data")
        );

        if bytes[i + 1] == b'>' {
            if strict {
                self.emit_tag(StartTag, LocalName::from(""), vec![]);
            } else {
                self.emit_data(buf, i, i + 2);
            }
            return Status::Done(i + 2);
        }

        let name_end = i + 1 + run_len(bytes, i + 1, is_tag_name_char);
        let name = self.name_atom(&buf[i + 1..name_end]);

        let mut attrs: Vec<Attribute> = vec![];
        let mut pos = name_end;
        while pos < end {
            let attr = match match_attribute(bytes, pos) {
                Some(attr) => attr,
                None => break,
            };
            let attr_name = self.name_atom(&buf[attr.name.clone()]);
            let value = attr.value.map(|value| self.attr_value(buf, value));
            match attrs.iter_mut().find(|a| a.name == attr_name) {
                Some(existing) => existing.value = value,
                None => attrs.push(Attribute {
                    name: attr_name,
                    value,
                }),
            }
            pos = attr.end;
        }

        let mut errors: Vec<Cow<'static, str>> = vec![];
        let mut limitation = None;
        let mut close = skip_whitespace(bytes, pos);
        match bytes.get(close) {
            None => {
                return self.unterminated_tag(buf, i, at_eof, "unclosed start tag at end of data")
            },
            Some(b'<') | Some(b'>') | Some(b'/') => (),
            Some(_) => {
                // Junk before the end of the tag: skip it a character at a
                // time, complaining about each.
                loop {
                    close = skip_whitespace(bytes, close);
                    let c = match bytes.get(close) {
                        Some(&c) => c,
                        None => {
                            return self.unterminated_tag(
                                buf,
                                i,
                                at_eof,
                                "unclosed start tag at end of data",
                            )
                        },
                    };
                    if c == b'<' || c == b'>' || (strict && c == b'/') {
                        break;
                    }
                    errors.push(Borrowed("bad character in tag"));
                    close += buf[close..].chars().next().map_or(1, char::len_utf8);
                }
                if !strict && bytes[close] == b'<' {
                    limitation = Some(Borrowed("unclosed start tag not supported"));
                }
            },
        }

        for error in errors {
            self.process_token(ParseError(error));
        }
        if let Some(limitation) = limitation {
            self.process_token(Limitation(limitation));
        }

        match bytes[close] {
            b'/' if !strict => {
                self.emit_tag(StartTag, name.clone(), attrs);
                if bytes.get(close + 1) == Some(&b'>') {
                    self.emit_tag(EndTag, name, vec![]);
                    Status::Done(close + 2)
                } else {
                    Status::Done(close + 1)
                }
            },
            b'<' => {
                self.emit_tag(StartTag, name, attrs);
                Status::Done(close)
            },
            _ => {
                self.emit_tag(StartTag, name, attrs);
                Status::Done(close + 1)
            },
        }
    }

    /// Strict mode's shorthand `<name/data/`.  `None` means this is not a
    /// shorthand tag.
    fn parse_shorttag(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Option<Status> {
        let bytes = buf.as_bytes();
        let name_end = i + 1 + run_len(bytes, i + 1, is_name_char);
        let slash = skip_whitespace(bytes, name_end);
        if bytes.get(slash) != Some(&b'/') {
            return None;
        }
        let close = match memchr(b'/', &bytes[slash + 1..]) {
            Some(off) => slash + 1 + off,
            // Never closed: the `<` is just data.
            None if at_eof => return Some(Status::NoMatch),
            None => return Some(Status::Incomplete),
        };
        let name = self.name_atom(&buf[i + 1..name_end]);
        self.emit_tag(StartTag, name.clone(), vec![]);
        self.emit_data(buf, slash + 1, close);
        self.emit_tag(EndTag, name, vec![]);
        Some(Status::Done(close + 1))
    }

    fn attr_value(&self, buf: &StrTendril, value: AttrValue) -> StrTendril {
        match value {
            AttrValue::Quoted(range) if buf[range.clone()].contains('&') => {
                StrTendril::from(replace(&buf[range], &self.entities.borrow()))
            },
            AttrValue::Quoted(range) | AttrValue::Unquoted(range) => {
                buf.subtendril(range.start as u32, range.len() as u32)
            },
        }
    }

    /// Lex an end tag at `i`, which is `</` followed by a letter, `<` or `>`.
    pub(super) fn parse_endtag(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        assert!(
            bytes[i..].starts_with(b"</") && bytes.len() > i + 2,
            "end tag parsing started at {:?}",
            &buf[i..]
        );
        match bytes[i + 2] {
            b'>' => {
                self.emit_tag(EndTag, LocalName::from(""), vec![]);
                Status::Done(i + 3)
            },
            b'<' if self.strict.get() => {
                self.emit_tag(EndTag, LocalName::from(""), vec![]);
                Status::Done(i + ETAGO.len())
            },
            b'<' => {
                self.process_token(Limitation(Borrowed("unclosed end tags not supported")));
                self.emit_data(buf, i, i + ETAGO.len());
                Status::Done(i + ETAGO.len())
            },
            _ => {
                let name_end = i + 2 + run_len(bytes, i + 2, is_name_char);
                let close = match memchr2(b'<', b'>', &bytes[name_end..]) {
                    Some(off) => name_end + off,
                    None => {
                        return self.unterminated_tag(
                            buf,
                            i,
                            at_eof,
                            "unclosed end tag at end of data",
                        )
                    },
                };
                let name = self.name_atom(&buf[i + 2..name_end]);
                self.emit_tag(EndTag, name, vec![]);
                if bytes[close] == b'>' {
                    Status::Done(close + 1)
                } else {
                    Status::Done(close)
                }
            },
        }
    }
}
