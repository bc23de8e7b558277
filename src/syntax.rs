// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The SGML concrete syntax recognized by the lexer.
//!
//! Higher layers can use these to reconstruct markup from tokens.

/// Comment start or end.
pub const COM: &str = "--";
/// Character reference open.
pub const CRO: &str = "&#";
/// Reference close.
pub const REFC: &str = ";";
/// Declaration subset open.
pub const DSO: &str = "[";
/// Declaration subset close.
pub const DSC: &str = "]";
/// Entity reference open.
pub const ERO: &str = "&";
/// Literal start or end.
pub const LIT: &str = "\"";
/// Literal start or end (alternative).
pub const LITA: &str = "'";
/// Markup declaration open.
pub const MDO: &str = "<!";
/// Markup declaration close.
pub const MDC: &str = ">";
/// Marked section close.
pub const MSC: &str = "]]";
/// Null end tag.
pub const NET: &str = "/";
/// Processing instruction open.
pub const PIO: &str = "<?";
/// Processing instruction close.
pub const PIC: &str = ">";
/// Start tag open.
pub const STAGO: &str = "<";
/// End tag open.
pub const ETAGO: &str = "</";
/// Tag close.
pub const TAGC: &str = ">";
/// Value indicator.
pub const VI: &str = "=";
