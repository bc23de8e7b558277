// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reference replacement inside attribute values.
//!
//! This handles only what is allowed in a literal attribute value: the
//! value has already been isolated by the tag parser, so there is no markup
//! to recognize, only `&name;` and `&#name;` references.

use std::ops::Range;

use memchr::memchr;

use crate::entities::EntityTable;
use crate::util::str::{is_name_char, is_sgml_whitespace};

struct Reference {
    /// The whole reference, from `&` through the optional `;`.
    span: Range<usize>,
    /// The name, including a leading `#` if present.
    name: Range<usize>,
}

// Find the next `&#?[a-zA-Z0-9][-.a-zA-Z0-9]*;?` at or after `from`.
fn find_reference(data: &str, mut from: usize) -> Option<Reference> {
    let bytes = data.as_bytes();
    loop {
        let amp = from + memchr(b'&', &bytes[from..])?;
        let name_start = amp + 1;
        let mut p = name_start;
        if bytes.get(p) == Some(&b'#') {
            p += 1;
        }
        match bytes.get(p) {
            Some(b) if b.is_ascii_alphanumeric() => (),
            _ => {
                from = name_start;
                continue;
            },
        }
        p += 1;
        while p < bytes.len() && is_name_char(bytes[p]) {
            p += 1;
        }
        let name = name_start..p;
        if bytes.get(p) == Some(&b';') {
            p += 1;
        }
        return Some(Reference {
            span: amp..p,
            name,
        });
    }
}

/// Perform general entity replacement on an attribute value.
///
/// Whitespace characters are first mapped to spaces.  Each reference is
/// then looked up in `entities`, falling back to the built-in character
/// aliases; a resolved reference is replaced by its text and scanning
/// resumes after the inserted text, while an unresolved one is left as is.
pub fn replace(data: &str, entities: &EntityTable) -> String {
    let mut data: String = data
        .chars()
        .map(|c| {
            if c.is_ascii() && is_sgml_whitespace(c as u8) {
                ' '
            } else {
                c
            }
        })
        .collect();

    let mut pos = 0;
    while let Some(reference) = find_reference(&data, pos) {
        let value = entities
            .resolve(&data[reference.name.clone()])
            .map(|v| v.into_owned());
        match value {
            Some(value) => {
                let start = reference.span.start;
                data.replace_range(reference.span, &value);
                pos = start + value.len();
            },
            None => pos = reference.span.end,
        }
    }
    data
}

#[cfg(test)]
mod test {
    use super::{find_reference, replace};
    use crate::entities::EntityTable;

    fn table() -> EntityTable {
        vec![("amp", "&"), ("lt", "<"), ("me", "&amp;")].into_iter().collect()
    }

    #[test]
    fn finds_reference_spans() {
        let r = find_reference("a &#re; b", 0).unwrap();
        assert_eq!(r.span, 2..7);
        assert_eq!(r.name, 3..6);

        let r = find_reference("&x.y-z", 0).unwrap();
        assert_eq!(r.span, 0..6);

        assert!(find_reference("& &# &;", 0).is_none());
    }

    #[test]
    fn whitespace_becomes_space() {
        assert_eq!(replace("a\tb\nc\r\x0Bd\x0Ce", &table()), "a b c  d e");
    }

    #[test]
    fn no_references_is_identity() {
        assert_eq!(replace("plain text", &table()), "plain text");
    }

    #[test]
    fn caller_and_builtin_references() {
        assert_eq!(replace("a &amp; b", &table()), "a & b");
        assert_eq!(replace("&lt&#65;&#RE;", &table()), "<A\r");
        assert_eq!(replace("x&#space;y", &table()), "x y");
    }

    #[test]
    fn unresolved_references_stay() {
        assert_eq!(replace("&nbsp; &#300; &", &table()), "&nbsp; &#300; &");
    }

    #[test]
    fn replacement_text_is_not_rescanned() {
        assert_eq!(replace("&me;", &table()), "&amp;");
    }

    #[test]
    fn non_ascii_text_survives() {
        assert_eq!(replace("caf\u{e9} &#233;", &table()), "caf\u{e9} \u{e9}");
    }
}
