// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lexer states.
//!
//! `ScanPhase` guards against re-entrant scanning: a sink may call back into
//! the lexer while a scan pass is running, and such calls must only record
//! what is wanted, never start a second pass.

use memchr::memchr;

use super::interface::LocalName;
use crate::util::str::skip_whitespace;

pub use self::ScanPhase::*;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum ScanPhase {
    /// No pass is running; more input is welcome.
    Idle,
    /// A pass is running.
    Scanning,
    /// A pass is running and end of input was requested during it.
    ScanningWithPendingFinish,
    /// End of input was processed.  Nothing more happens.
    Finished,
}

impl ScanPhase {
    /// Input was appended.  Returns the next phase and whether a normal
    /// pass should run now.
    pub fn on_feed(self) -> (ScanPhase, bool) {
        match self {
            Idle => (Scanning, true),
            Scanning | ScanningWithPendingFinish | Finished => (self, false),
        }
    }

    /// End of input was requested.  Returns the next phase and whether a
    /// forced pass should run now.
    pub fn on_finish(self) -> (ScanPhase, bool) {
        match self {
            Idle => (Scanning, true),
            Scanning | ScanningWithPendingFinish => (ScanningWithPendingFinish, false),
            Finished => (Finished, false),
        }
    }

    /// A pass returned.  Returns the next phase and whether a forced pass
    /// must follow.
    pub fn on_pass_done(self, forced: bool) -> (ScanPhase, bool) {
        match (self, forced) {
            (Scanning, true) | (ScanningWithPendingFinish, true) => (Finished, false),
            (Scanning, false) => (Idle, false),
            (ScanningWithPendingFinish, false) => (Scanning, true),
            (Idle, _) | (Finished, _) => panic!("scan pass returned in phase {:?}", self),
        }
    }
}

/// The end of a literal (CDATA-like) element: `</name`, optional
/// whitespace, `>`.
#[derive(Clone, Debug)]
pub(super) struct LiteralEnd {
    pub(super) name: LocalName,
    pub(super) ignore_case: bool,
}

impl LiteralEnd {
    fn same_name(&self, candidate: &[u8]) -> bool {
        if self.ignore_case {
            candidate.eq_ignore_ascii_case(self.name.as_bytes())
        } else {
            candidate == self.name.as_bytes()
        }
    }

    /// Whether an end tag named `name` closes this element.
    pub(super) fn ends(&self, name: &str) -> bool {
        self.same_name(name.as_bytes())
    }

    /// Find the end tag at or after `from`.  Returns its start and the
    /// index just past its `>`.
    pub(super) fn find(&self, bytes: &[u8], mut from: usize) -> Option<(usize, usize)> {
        let name = self.name.as_bytes();
        while let Some(off) = memchr(b'<', &bytes[from..]) {
            let start = from + off;
            let name_end = start + 2 + name.len();
            if bytes.get(start + 1) == Some(&b'/') && name_end <= bytes.len() {
                if self.same_name(&bytes[start + 2..name_end]) {
                    let close = skip_whitespace(bytes, name_end);
                    if bytes.get(close) == Some(&b'>') {
                        return Some((start, close + 1));
                    }
                }
            }
            from = start + 1;
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn feed_starts_a_pass_only_when_idle() {
        assert_eq!(Idle.on_feed(), (Scanning, true));
        assert_eq!(Scanning.on_feed(), (Scanning, false));
        assert_eq!(
            ScanningWithPendingFinish.on_feed(),
            (ScanningWithPendingFinish, false)
        );
        assert_eq!(Finished.on_feed(), (Finished, false));
    }

    #[test]
    fn finish_during_a_pass_is_deferred() {
        assert_eq!(Idle.on_finish(), (Scanning, true));
        assert_eq!(Scanning.on_finish(), (ScanningWithPendingFinish, false));
        assert_eq!(
            ScanningWithPendingFinish.on_finish(),
            (ScanningWithPendingFinish, false)
        );
        assert_eq!(Finished.on_finish(), (Finished, false));
    }

    #[test]
    fn pass_completion() {
        assert_eq!(Scanning.on_pass_done(false), (Idle, false));
        assert_eq!(ScanningWithPendingFinish.on_pass_done(false), (Scanning, true));
        assert_eq!(Scanning.on_pass_done(true), (Finished, false));
        assert_eq!(ScanningWithPendingFinish.on_pass_done(true), (Finished, false));
    }

    #[test]
    #[should_panic]
    fn pass_cannot_complete_when_idle() {
        let _ = Idle.on_pass_done(false);
    }

    fn literal(name: &str, ignore_case: bool) -> LiteralEnd {
        LiteralEnd {
            name: LocalName::from(name),
            ignore_case,
        }
    }

    #[test]
    fn literal_end_tag() {
        let end = literal("script", true);
        assert_eq!(end.find(b"a < b </script >", 0), Some((6, 16)));
        assert_eq!(end.find(b"</SCRIPT>x", 0), Some((0, 9)));
        assert_eq!(end.find(b"</scripts></script>", 0), Some((10, 19)));
        assert_eq!(end.find(b"</script", 0), None);
        assert_eq!(end.find(b"</script  ", 0), None);
    }

    #[test]
    fn literal_end_tag_exact_case() {
        let end = literal("xmp", false);
        assert_eq!(end.find(b"</XMP></xmp>", 0), Some((6, 12)));
    }

    #[test]
    fn literal_ended_by_name() {
        assert!(literal("script", true).ends("SCRIPT"));
        assert!(!literal("script", false).ends("SCRIPT"));
        assert!(!literal("script", true).ends("scripts"));
    }
}
