// canvas-kit/src/family_name.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A possible value for the `font-family` CSS property.

/// A possible value for the `font-family` CSS property.
///
/// These descriptions are taken from CSS Fonts Level 3 § 3.1:
/// <https://drafts.csswg.org/css-fonts-3/#font-family-prop>.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FamilyName {
    /// A specific font family, specified by name: e.g. "Arial", "times".
    Title(String),
    /// Serif fonts represent the formal text style for a script.
    Serif,
    /// Glyphs in sans-serif fonts are generally low contrast and have plain stroke endings.
    SansSerif,
    /// The sole criterion of a monospace font is that all glyphs have the same fixed width.
    Monospace,
    /// Glyphs in cursive fonts generally use a more informal script style.
    Cursive,
    /// Fantasy fonts are primarily decorative or expressive fonts.
    Fantasy,
}

impl FamilyName {
    /// Parses one entry of a CSS family list, recognizing the generic keywords.
    pub fn parse(name: &str) -> FamilyName {
        let name = name.trim().trim_matches(|c| c == '\'' || c == '"');
        match &*name.to_ascii_lowercase() {
            "serif" => FamilyName::Serif,
            "sans-serif" => FamilyName::SansSerif,
            "monospace" => FamilyName::Monospace,
            "cursive" => FamilyName::Cursive,
            "fantasy" => FamilyName::Fantasy,
            _ => FamilyName::Title(name.to_owned()),
        }
    }

    /// The concrete families tried, in order, for a generic family.
    pub(crate) fn generic_candidates(&self) -> &'static [&'static str] {
        match *self {
            FamilyName::Title(_) => &[],
            FamilyName::Serif => &["DejaVu Serif", "Liberation Serif", "Times New Roman", "Times"],
            FamilyName::SansSerif => &["DejaVu Sans", "Liberation Sans", "Arial", "Helvetica"],
            FamilyName::Monospace => &[
                "DejaVu Sans Mono",
                "Liberation Mono",
                "Consolas",
                "Courier New",
                "Menlo",
            ],
            FamilyName::Cursive => &["Comic Sans MS", "Apple Chancery"],
            FamilyName::Fantasy => &["Papyrus", "Impact"],
        }
    }
}
