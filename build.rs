// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Whitespace aliases understood in attribute values, beside `#0` .. `#255`.
const WHITESPACE_ALIASES: &[(&str, char)] = &[("#re", '\r'), ("#rs", '\n'), ("#space", ' ')];

fn main() {
    let map = build_map();

    let mut phf_map = phf_codegen::Map::new();
    for (key, value) in map.iter() {
        phf_map.entry(&**key, &format!("{:?}", value));
    }

    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("char_aliases.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());
    writeln!(
        &mut file,
        "/// Built-in character aliases, keyed by lower-case name.\n\
         pub static CHAR_ALIASES: phf::Map<&'static str, char> = {};",
        phf_map.build()
    )
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}

// Build the list of alias names and the characters they stand for.
fn build_map() -> Vec<(String, char)> {
    let mut map: Vec<(String, char)> = WHITESPACE_ALIASES
        .iter()
        .map(|&(name, c)| (name.to_string(), c))
        .collect();

    // Every Latin-1 code point has a synthetic `#n` alias.
    for n in 0..=255u8 {
        map.push((format!("#{n}"), char::from(n)));
    }

    map
}
