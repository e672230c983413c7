// canvas-kit/src/font_style.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Which face in a family to use: weight, width, and slant.
//!
//! Weights and widths use the OpenType `OS/2` scales: `usWeightClass` (1 to 1000, 400 normal) and
//! `usWidthClass` (1 to 9, 5 normal).

use std::fmt::{self, Debug, Display, Formatter};

/// The weight, width, and slant of a typeface.
///
/// This object supports a method chaining style for idiomatic initialization; e.g.
///
///     # use canvas_kit::font_style::{FontStyle, Slant, Weight};
///     println!("{:?}", FontStyle::normal().weight(Weight::BOLD).slant(Slant::Italic));
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontStyle {
    pub weight: Weight,
    pub width: Width,
    pub slant: Slant,
}

impl FontStyle {
    #[inline]
    pub fn new(weight: Weight, width: Width, slant: Slant) -> FontStyle {
        FontStyle {
            weight,
            width,
            slant,
        }
    }

    /// Normal weight, normal width, upright.
    #[inline]
    pub fn normal() -> FontStyle {
        FontStyle::default()
    }

    #[inline]
    pub fn bold() -> FontStyle {
        FontStyle::new(Weight::BOLD, Width::NORMAL, Slant::Upright)
    }

    #[inline]
    pub fn italic() -> FontStyle {
        FontStyle::new(Weight::NORMAL, Width::NORMAL, Slant::Italic)
    }

    #[inline]
    pub fn bold_italic() -> FontStyle {
        FontStyle::new(Weight::BOLD, Width::NORMAL, Slant::Italic)
    }

    #[inline]
    pub fn weight(mut self, weight: Weight) -> FontStyle {
        self.weight = weight;
        self
    }

    #[inline]
    pub fn width(mut self, width: Width) -> FontStyle {
        self.width = width;
        self
    }

    #[inline]
    pub fn slant(mut self, slant: Slant) -> FontStyle {
        self.slant = slant;
        self
    }

    /// Clamps weight to 0..=1000 and width to 1..=9.
    pub fn clamped(self) -> FontStyle {
        FontStyle {
            weight: Weight(self.weight.0.max(Weight::INVISIBLE.0).min(Weight::EXTRA_BLACK.0)),
            width: Width(self.width.0.max(Width::ULTRA_CONDENSED.0).min(Width::ULTRA_EXPANDED.0)),
            slant: self.slant,
        }
    }
}

/// The degree of blackness or stroke thickness of a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weight(pub i32);

impl Default for Weight {
    #[inline]
    fn default() -> Weight {
        Weight::NORMAL
    }
}

impl Weight {
    pub const INVISIBLE: Weight = Weight(0);
    pub const THIN: Weight = Weight(100);
    pub const EXTRA_LIGHT: Weight = Weight(200);
    pub const LIGHT: Weight = Weight(300);
    pub const NORMAL: Weight = Weight(400);
    pub const MEDIUM: Weight = Weight(500);
    pub const SEMIBOLD: Weight = Weight(600);
    pub const BOLD: Weight = Weight(700);
    pub const EXTRA_BOLD: Weight = Weight(800);
    pub const BLACK: Weight = Weight(900);
    pub const EXTRA_BLACK: Weight = Weight(1000);
}

/// The width of a face on the `usWidthClass` scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Width(pub i32);

impl Default for Width {
    #[inline]
    fn default() -> Width {
        Width::NORMAL
    }
}

impl Width {
    pub const ULTRA_CONDENSED: Width = Width(1);
    pub const EXTRA_CONDENSED: Width = Width(2);
    pub const CONDENSED: Width = Width(3);
    pub const SEMI_CONDENSED: Width = Width(4);
    pub const NORMAL: Width = Width(5);
    pub const SEMI_EXPANDED: Width = Width(6);
    pub const EXPANDED: Width = Width(7);
    pub const EXTRA_EXPANDED: Width = Width(8);
    pub const ULTRA_EXPANDED: Width = Width(9);

    // `usWidthClass` to the CSS `font-stretch` fraction of normal width.
    const STRETCH: [f32; 9] = [0.5, 0.625, 0.75, 0.875, 1.0, 1.125, 1.25, 1.5, 2.0];

    /// Returns the width as a fraction of normal, as CSS `font-stretch` does.
    pub fn to_stretch(self) -> f32 {
        let index = self.0.max(1).min(9) - 1;
        Width::STRETCH[index as usize]
    }
}

/// Allows italic or oblique faces to be selected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Slant {
    /// A face that is neither italic not obliqued.
    Upright,
    /// A form that is generally cursive in nature.
    Italic,
    /// A typically-sloped version of the regular face.
    Oblique,
}

impl Default for Slant {
    fn default() -> Slant {
        Slant::Upright
    }
}

impl Display for Slant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stretch_mapping() {
        assert_eq!(Width::NORMAL.to_stretch(), 1.0);
        assert_eq!(Width::ULTRA_CONDENSED.to_stretch(), 0.5);
        assert_eq!(Width(42).to_stretch(), 2.0);
    }

    #[test]
    fn clamping() {
        let style = FontStyle::new(Weight(5000), Width(0), Slant::Oblique).clamped();
        assert_eq!(style.weight, Weight::EXTRA_BLACK);
        assert_eq!(style.width, Width::ULTRA_CONDENSED);
        assert_eq!(style.slant, Slant::Oblique);
    }
}
