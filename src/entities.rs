// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reference tables.
//!
//! The built-in table maps the numeric escape names usable in attribute
//! values (`#re`, `#rs`, `#space` and `#0` through `#255`) to characters.
//! It is generated by the build script and shared read-only by all lexers.
//! The general entity table is supplied by the caller.

use std::borrow::Cow;
use std::collections::HashMap;
use std::iter::FromIterator;

include!(concat!(env!("OUT_DIR"), "/char_aliases.rs"));

/// Look up a built-in character alias.  `name` includes the leading `#`
/// and is matched case-insensitively.
pub fn char_alias(name: &str) -> Option<char> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        CHAR_ALIASES.get(&*name.to_ascii_lowercase()).cloned()
    } else {
        CHAR_ALIASES.get(name).cloned()
    }
}

/// Replacement text for general entities, keyed by entity name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityTable {
    map: HashMap<String, String>,
}

impl EntityTable {
    pub fn new() -> EntityTable {
        EntityTable::default()
    }

    /// Define (or redefine) an entity.  Returns the previous replacement
    /// text, if any.
    pub fn insert<N, T>(&mut self, name: N, text: T) -> Option<String>
    where
        N: Into<String>,
        T: Into<String>,
    {
        self.map.insert(name.into(), text.into())
    }

    /// Replacement text of a caller-defined entity.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(|s| &**s)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Resolve a reference name the way attribute values do: the caller's
    /// definitions first, then the built-in character aliases.
    pub fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        if let Some(text) = self.get(name) {
            return Some(Cow::Borrowed(text));
        }
        char_alias(name).map(|c| Cow::Owned(c.to_string()))
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for EntityTable {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> EntityTable {
        EntityTable {
            map: iter
                .into_iter()
                .map(|(name, text)| (name.into(), text.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{char_alias, EntityTable};

    #[test]
    fn whitespace_aliases() {
        assert_eq!(char_alias("#re"), Some('\r'));
        assert_eq!(char_alias("#rs"), Some('\n'));
        assert_eq!(char_alias("#SPACE"), Some(' '));
    }

    #[test]
    fn numeric_aliases() {
        assert_eq!(char_alias("#0"), Some('\0'));
        assert_eq!(char_alias("#65"), Some('A'));
        assert_eq!(char_alias("#233"), Some('\u{e9}'));
        assert_eq!(char_alias("#255"), Some('\u{ff}'));
        assert_eq!(char_alias("#256"), None);
        assert_eq!(char_alias("65"), None);
    }

    #[test]
    fn caller_definitions_win() {
        let table: EntityTable = vec![("#re", "<cr>"), ("amp", "&")].into_iter().collect();
        assert_eq!(table.resolve("#re").as_deref(), Some("<cr>"));
        assert_eq!(table.resolve("amp").as_deref(), Some("&"));
        assert_eq!(table.resolve("#32").as_deref(), Some(" "));
        assert_eq!(table.resolve("nbsp"), None);
    }

    #[test]
    fn caller_names_are_exact() {
        let mut table = EntityTable::new();
        assert!(table.is_empty());
        assert_eq!(table.insert("Amp", "&"), None);
        assert_eq!(table.insert("Amp", "+"), Some("&".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Amp"), Some("+"));
        assert_eq!(table.get("amp"), None);
    }
}
