// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Byte classes of the concrete syntax.
//!
//! Every delimiter and name character the lexer cares about is ASCII, so
//! scanning works on bytes and only ever stops on character boundaries.

/// SGML whitespace: tab, newline, vertical tab, form feed, carriage return, space.
pub fn is_sgml_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r' | b' ')
}

/// May this byte continue a generic identifier in a start tag?
pub fn is_tag_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')
}

/// May this byte continue an end tag, shorthand tag or entity name?
pub fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.')
}

/// May this byte start an attribute name?
pub fn is_attr_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// May this byte continue an attribute name?
pub fn is_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'_')
}

/// May this byte appear in an unquoted attribute value?
pub fn is_unquoted_value_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'~' | b',' | b'.' | b'/' | b':' | b'+' | b'*' | b'%' | b'?' | b'!' | b'('
                | b')' | b'_' | b'#' | b'='
        )
}

/// May this byte appear in a character reference name (`&#re;`)?
pub fn is_char_ref_name_char(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'.' | b'-')
}

/// May this byte appear in a name token of a markup declaration?
pub fn is_decl_name_char(b: u8) -> bool {
    !is_sgml_whitespace(b) && !matches!(b, b'>' | b'"' | b'\'')
}

/// Length of the run of bytes at `from` satisfying `pred`.
pub fn run_len(bytes: &[u8], from: usize, pred: fn(u8) -> bool) -> usize {
    match bytes.get(from..) {
        Some(rest) => rest.iter().take_while(|&&b| pred(b)).count(),
        None => 0,
    }
}

/// Skip SGML whitespace starting at `from`, returning the first other index.
pub fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    from + run_len(bytes, from, is_sgml_whitespace)
}

#[cfg(test)]
#[allow(non_snake_case)]
mod test {
    use super::{is_attr_name_start, is_decl_name_char, is_name_char};
    use super::{is_sgml_whitespace, is_tag_name_char};
    use super::{is_unquoted_value_char, run_len, skip_whitespace};

    test_eq!(whitespace_vt, is_sgml_whitespace(b'\x0B'), true);
    test_eq!(whitespace_letter, is_sgml_whitespace(b'x'), false);

    test_eq!(tag_name_underscore, is_tag_name_char(b'_'), true);
    test_eq!(end_tag_name_underscore, is_name_char(b'_'), false);
    test_eq!(name_dot, is_name_char(b'.'), true);

    test_eq!(attr_start_underscore, is_attr_name_start(b'_'), true);
    test_eq!(attr_start_digit, is_attr_name_start(b'1'), false);

    test_eq!(unquoted_slash, is_unquoted_value_char(b'/'), true);
    test_eq!(unquoted_quote, is_unquoted_value_char(b'"'), false);
    test_eq!(unquoted_gt, is_unquoted_value_char(b'>'), false);

    test_eq!(decl_name_bracket, is_decl_name_char(b'['), true);
    test_eq!(decl_name_quote, is_decl_name_char(b'\''), false);

    test_eq!(run_of_names, run_len(b"ab-c d", 0, is_name_char), 4);
    test_eq!(run_past_end, run_len(b"ab", 3, is_name_char), 0);
    test_eq!(run_from_middle, run_len(b"ab cd", 3, is_name_char), 2);
    test_eq!(skip_mixed_ws, skip_whitespace(b"x \t\r\ny", 1), 5);
    test_eq!(skip_at_end, skip_whitespace(b"x  ", 1), 3);
}
