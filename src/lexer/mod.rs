// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The SGML lexer.

pub use self::interface::{Attribute, DeclToken, EndTag, StartTag, Tag, TagKind, Terminator};
pub use self::interface::{CharRefToken, CommentToken, DataToken, DeclarationToken, EntityRefToken};
pub use self::interface::{Limitation, NamedCharRefToken, ParseError, PiToken, TagToken};
pub use self::interface::{LocalName, Token, TokenSink, TokenSinkResult};
pub use self::states::ScanPhase;

use self::states::LiteralEnd;

use crate::entities::EntityTable;
use crate::tendril::StrTendril;

use log::{debug, trace, warn};
use memchr::{memchr2, memchr_iter, memrchr};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::ops::Range;

mod char_ref;
mod comment;
mod decl;
mod interface;
mod states;
mod tag;

/// The result of one step of a scan pass.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
enum ProcessResult {
    /// Go on from this index.
    Continue(usize),
    /// Stop the pass; input from this index on is kept for later.
    Suspend(usize),
}

/// The outcome of lexing one construct.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
enum Status {
    /// Tokens were emitted; go on from this index.
    Done(usize),
    /// The construct may continue in input not yet seen.
    Incomplete,
    /// Not a construct after all; the first character is data.
    NoMatch,
}

/// Lexer options, with an impl for `Default`.
#[derive(Clone, Debug)]
pub struct LexerOpts {
    /// Fold tag, attribute and declaration names to lower case?
    /// Default: true
    pub normalize: bool,

    /// Lex the full SGML concrete syntax rather than what legacy HTML
    /// needs?  Default: false
    pub strict: bool,

    /// General entities for references inside attribute values.
    pub entities: EntityTable,

    /// Start out treating input as literal data up to this end tag.
    pub literal: Option<String>,
}

impl Default for LexerOpts {
    fn default() -> LexerOpts {
        LexerOpts {
            normalize: true,
            strict: false,
            entities: EntityTable::new(),
            literal: None,
        }
    }
}

/// The SGML lexer.
pub struct Lexer<Sink> {
    /// Destination for tokens we emit.
    pub sink: Sink,

    /// Input not yet consumed.  The front of it is the start of a construct
    /// that could not be finished yet.
    input: RefCell<StrTendril>,

    phase: Cell<ScanPhase>,

    normalize: Cell<bool>,

    strict: Cell<bool>,

    /// The end tag of the literal element we are in, if any.
    literal: RefCell<Option<LiteralEnd>>,

    /// Everything from here on is data.
    plaintext: Cell<bool>,

    entities: RefCell<EntityTable>,

    /// Line number at `line_pos`.
    current_line: Cell<u64>,

    /// How far into `input` lines have been counted.
    line_pos: Cell<usize>,
}

impl<Sink: TokenSink> Lexer<Sink> {
    /// Create a new lexer which feeds tokens to a particular `TokenSink`.
    pub fn new(sink: Sink, opts: LexerOpts) -> Lexer<Sink> {
        let lexer = Lexer {
            sink,
            input: RefCell::new(StrTendril::new()),
            phase: Cell::new(ScanPhase::Idle),
            normalize: Cell::new(opts.normalize),
            strict: Cell::new(opts.strict),
            literal: RefCell::new(None),
            plaintext: Cell::new(false),
            entities: RefCell::new(opts.entities),
            current_line: Cell::new(1),
            line_pos: Cell::new(0),
        };
        if let Some(name) = opts.literal {
            lexer.set_literal(&name);
        }
        lexer
    }

    /// Feed a chunk of input.  An empty chunk signals the end of input, like
    /// `end()`.
    ///
    /// May be called from within the sink: the text is queued and lexed by
    /// the scan already in progress.
    pub fn feed(&self, input: &str) {
        if input.is_empty() {
            return self.end();
        }
        if self.phase.get() == ScanPhase::Finished {
            warn!("ignoring {} bytes fed after the end of input", input.len());
            return;
        }
        self.input.borrow_mut().push_slice(input);
        let (phase, run) = self.phase.get().on_feed();
        self.phase.set(phase);
        if run {
            self.scan(false);
        }
    }

    /// Signal the end of input.  Everything still held back is lexed as
    /// well as it can be, then the sink's `end` is called.
    pub fn end(&self) {
        let (phase, run) = self.phase.get().on_finish();
        self.phase.set(phase);
        if run {
            self.scan(true);
        } else {
            debug!("end of input deferred, phase {:?}", phase);
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase.get()
    }

    /// Line of the next unconsumed character, counting from 1.
    pub fn line(&self) -> u64 {
        self.current_line.get()
    }

    /// Turn name normalization on or off.  Returns the previous setting.
    pub fn normalize(&self, normalize: bool) -> bool {
        self.normalize.replace(normalize)
    }

    /// Switch between strict and lenient lexing.  Returns the previous
    /// setting.  Takes effect at the next construct.
    pub fn set_strict(&self, strict: bool) -> bool {
        self.strict.replace(strict)
    }

    pub fn is_strict(&self) -> bool {
        self.strict.get()
    }

    /// Treat input as data up to `</name>`.  The name is compared without
    /// regard to case if normalization is on.
    pub fn set_literal(&self, name: &str) {
        let name = self.name_atom(name);
        debug!("literal data until </{}>", name);
        *self.literal.borrow_mut() = Some(LiteralEnd {
            name,
            ignore_case: self.normalize.get(),
        });
    }

    pub fn clear_literal(&self) {
        *self.literal.borrow_mut() = None;
    }

    /// Treat all remaining input as data.
    pub fn set_plaintext_state(&self) {
        debug!("switching to plaintext");
        self.plaintext.set(true);
    }

    /// Define a general entity for attribute value replacement.
    pub fn define_entity(&self, name: &str, text: &str) {
        self.entities.borrow_mut().insert(name, text);
    }

    fn scan(&self, forced: bool) {
        self.run(forced);
        let (phase, finish) = self.phase.get().on_pass_done(forced);
        self.phase.set(phase);
        if finish {
            self.scan(true);
        } else if phase == ScanPhase::Finished {
            debug!("end of input, line {}", self.current_line.get());
            self.sink.end();
        }
    }

    /// One scan pass over the buffered input.
    fn run(&self, at_eof: bool) {
        trace!("scan pass, at end of input: {}", at_eof);
        let mut i = 0;
        loop {
            // The sink may have fed more input; pick it up.
            let buf = self.input.borrow().clone();
            if i >= buf.len() {
                break;
            }
            self.count_lines(&buf, i);
            match self.step(&buf, i, at_eof) {
                ProcessResult::Continue(next) => i = next,
                ProcessResult::Suspend(next) => {
                    i = next;
                    break;
                },
            }
        }

        let buf = self.input.borrow().clone();
        if at_eof && i < buf.len() {
            self.count_lines(&buf, i);
            self.emit_data(&buf, i, buf.len());
            i = buf.len();
        }
        self.count_lines(&buf, i);
        self.line_pos.set(0);
        self.input.borrow_mut().pop_front(i as u32);
        trace!("holding back {} bytes", self.input.borrow().len());
    }

    fn step(&self, buf: &StrTendril, i: usize, at_eof: bool) -> ProcessResult {
        let bytes = buf.as_bytes();
        let n = bytes.len();

        if self.plaintext.get() {
            self.emit_data(buf, i, n);
            return ProcessResult::Continue(n);
        }

        let literal = self.literal.borrow().clone();
        if let Some(literal) = literal {
            return self.step_literal(buf, i, at_eof, &literal);
        }

        let j = memchr2(b'<', b'&', &bytes[i..]).map_or(n, |off| i + off);
        if j > i {
            self.emit_data(buf, i, j);
            return ProcessResult::Continue(j);
        }

        let status = match bytes[i] {
            b'<' => self.step_markup(buf, i, at_eof),
            _ => self.step_reference(buf, i, at_eof),
        };
        match status {
            Status::Done(next) => ProcessResult::Continue(next),
            Status::Incomplete if at_eof => {
                self.emit_data(buf, i, n);
                ProcessResult::Continue(n)
            },
            Status::Incomplete => ProcessResult::Suspend(i),
            Status::NoMatch => {
                self.emit_data(buf, i, i + 1);
                ProcessResult::Continue(i + 1)
            },
        }
    }

    fn step_literal(
        &self,
        buf: &StrTendril,
        i: usize,
        at_eof: bool,
        literal: &LiteralEnd,
    ) -> ProcessResult {
        let bytes = buf.as_bytes();
        let n = bytes.len();
        if let Some((start, next)) = literal.find(bytes, i) {
            self.emit_data(buf, i, start);
            self.count_lines(buf, start);
            self.clear_literal();
            self.emit_tag(EndTag, literal.name.clone(), vec![]);
            return ProcessResult::Continue(next);
        }
        if at_eof {
            self.emit_data(buf, i, n);
            return ProcessResult::Continue(n);
        }
        // The end tag may be split across chunks; hold back from the last `<`.
        let hold = memrchr(b'<', &bytes[i..]).map_or(n, |off| i + off);
        self.emit_data(buf, i, hold);
        ProcessResult::Suspend(hold)
    }

    /// Lex markup at `i`, which holds a `<`.
    fn step_markup(&self, buf: &StrTendril, i: usize, at_eof: bool) -> Status {
        let bytes = buf.as_bytes();
        match bytes.get(i + 1) {
            None => Status::Incomplete,
            Some(&b) if b == b'>' || b.is_ascii_alphabetic() => {
                self.parse_starttag(buf, i, at_eof)
            },
            Some(b'/') => match bytes.get(i + 2) {
                None => Status::Incomplete,
                Some(&b) if b == b'<' || b == b'>' || b.is_ascii_alphabetic() => {
                    self.parse_endtag(buf, i, at_eof)
                },
                Some(_) => Status::NoMatch,
            },
            Some(b'!') => self.parse_markup_declaration(buf, i, at_eof),
            Some(b'?') => self.parse_processing_instruction(buf, i),
            Some(_) => Status::NoMatch,
        }
    }

    fn process_token(&self, token: Token) {
        match self.sink.process_token(token, self.current_line.get()) {
            TokenSinkResult::Continue => (),
            TokenSinkResult::Literal(name) => self.set_literal(&name),
            TokenSinkResult::Plaintext => self.set_plaintext_state(),
        }
    }

    fn emit_data(&self, buf: &StrTendril, from: usize, to: usize) {
        if from < to {
            self.process_token(DataToken(buf.subtendril(from as u32, (to - from) as u32)));
        }
    }

    /// Advance the line count to `pos`.
    fn count_lines(&self, buf: &StrTendril, pos: usize) {
        let from = self.line_pos.get();
        if pos > from {
            let lines = memchr_iter(b'\n', &buf.as_bytes()[from..pos]).count();
            self.current_line.set(self.current_line.get() + lines as u64);
            self.line_pos.set(pos);
        }
    }

    fn normalize_str<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.normalize.get() && name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        }
    }

    fn name_atom(&self, name: &str) -> LocalName {
        LocalName::from(self.normalize_str(name))
    }

    /// A name from the input, normalized if normalization is on.
    fn normalized(&self, buf: &StrTendril, range: Range<usize>) -> StrTendril {
        match self.normalize_str(&buf[range.clone()]) {
            Cow::Borrowed(_) => buf.subtendril(range.start as u32, range.len() as u32),
            Cow::Owned(name) => StrTendril::from(name),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Lexer, LexerOpts, ScanPhase, Token, TokenSink, TokenSinkResult};
    use super::{CommentToken, DataToken, EndTag, StartTag, TagToken};
    use std::cell::RefCell;

    #[derive(Default)]
    struct LinesMatch {
        tokens: RefCell<Vec<(Token, u64)>>,
        ended: RefCell<bool>,
    }

    impl TokenSink for LinesMatch {
        fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult {
            self.tokens.borrow_mut().push((token, line_number));
            TokenSinkResult::Continue
        }

        fn end(&self) {
            *self.ended.borrow_mut() = true;
        }
    }

    pub(super) struct Discard;

    impl TokenSink for Discard {
        fn process_token(&self, _: Token, _: u64) -> TokenSinkResult {
            TokenSinkResult::Continue
        }
    }

    /// A lexer for driving the construct parsers directly.
    pub(super) fn discarding_lexer(strict: bool) -> Lexer<Discard> {
        Lexer::new(
            Discard,
            LexerOpts {
                strict,
                ..LexerOpts::default()
            },
        )
    }

    fn lex(chunks: &[&str], opts: LexerOpts) -> Vec<(Token, u64)> {
        let lexer = Lexer::new(LinesMatch::default(), opts);
        for chunk in chunks {
            lexer.feed(chunk);
        }
        lexer.end();
        assert!(*lexer.sink.ended.borrow());
        assert_eq!(lexer.phase(), ScanPhase::Finished);
        lexer.sink.tokens.into_inner()
    }

    fn names(tokens: &[(Token, u64)]) -> Vec<(String, u64)> {
        tokens
            .iter()
            .filter_map(|(token, line)| match token {
                TagToken(tag) => Some((format!("{:?} {}", tag.kind, tag.name), *line)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn tags_carry_their_line() {
        let tokens = lex(&["<a>\n<b>\n\n</b", ">\n</a>"], LexerOpts::default());
        assert_eq!(
            names(&tokens),
            vec![
                ("StartTag a".to_string(), 1),
                ("StartTag b".to_string(), 2),
                ("EndTag b".to_string(), 4),
                ("EndTag a".to_string(), 5),
            ]
        );
    }

    #[test]
    fn multiline_comment_starts_on_its_first_line() {
        let tokens = lex(&["x\n<!-- a\nb -->\n<p>"], LexerOpts::default());
        assert!(tokens.contains(&(CommentToken(" a\nb ".into()), 2)));
        assert_eq!(names(&tokens), vec![("StartTag p".to_string(), 4)]);
    }

    #[test]
    fn line_survives_held_back_input() {
        let lexer = Lexer::new(LinesMatch::default(), LexerOpts::default());
        lexer.feed("a\nb\n<x");
        assert_eq!(lexer.line(), 3);
        lexer.feed("\ny>");
        assert_eq!(lexer.line(), 4);
        lexer.end();
    }

    #[test]
    fn literal_end_tag_line() {
        let opts = LexerOpts {
            literal: Some("XMP".to_string()),
            ..LexerOpts::default()
        };
        let tokens = lex(&["<b>\n</xmp\n>"], opts);
        assert_eq!(tokens[0], (DataToken("<b>\n".into()), 1));
        assert_eq!(names(&tokens), vec![("EndTag xmp".to_string(), 2)]);
        assert!(matches!(&tokens[1].0, TagToken(t) if t.kind == EndTag));
    }

    #[test]
    fn options_round_trip() {
        let lexer = Lexer::new(LinesMatch::default(), LexerOpts::default());
        assert!(lexer.normalize(false));
        assert!(!lexer.normalize(true));
        assert!(!lexer.set_strict(true));
        assert!(lexer.is_strict());
        lexer.feed("<A>");
        lexer.end();
        assert!(matches!(
            &lexer.sink.tokens.borrow()[0].0,
            TagToken(t) if t.kind == StartTag && &*t.name == "a"
        ));
    }
}
