// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An incremental lexer for SGML and legacy HTML.
//!
//! Text is pushed into a [`Lexer`](lexer::Lexer) in chunks of any size; the
//! lexer reports tags, references, comments, declarations and data runs to a
//! [`TokenSink`](lexer::TokenSink) as soon as they can be recognized, holding
//! back only the text that might still turn out to be part of an unfinished
//! construct.

#[macro_use]
extern crate mac;

pub use entities::EntityTable;
pub use lexer::{Attribute, Lexer, LexerOpts, LocalName, Token, TokenSink, TokenSinkResult};
pub use replace::replace;

mod util {
    pub mod str;
}

pub mod entities;
pub mod lexer;
pub mod replace;
pub mod syntax;

/// Re-export the tendril crate.
pub mod tendril {
    pub use ::tendril::*;
}
