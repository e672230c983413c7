// canvas-kit/src/hinting.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Specifies how glyphs are grid fitted and how their edges are antialiased.
//!
//! These settings travel with a `Font`; the raster backends that honor them are out of this
//! crate's scope.

/// Specifies how hinting (grid fitting) is to be performed (or not performed) for a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FontHinting {
    /// No hinting is performed unless absolutely necessary to assemble the glyph.
    None = 0,
    /// Hinting is performed only in the vertical direction.
    Slight = 1,
    /// Hinting is performed in both directions, preserving the outline's shape where possible.
    Normal = 2,
    /// Hinting is performed in both directions at maximum strength.
    Full = 3,
}

impl Default for FontHinting {
    #[inline]
    fn default() -> FontHinting {
        FontHinting::Normal
    }
}

impl FontHinting {
    /// Converts a `CK_FONT_HINTING_*` value.
    pub fn from_u32(value: u32) -> Option<FontHinting> {
        match value {
            0 => Some(FontHinting::None),
            1 => Some(FontHinting::Slight),
            2 => Some(FontHinting::Normal),
            3 => Some(FontHinting::Full),
            _ => None,
        }
    }
}

/// How glyph edges are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FontEdging {
    /// "Black-and-white" rendering. Each pixel is either entirely on or off.
    Alias = 0,
    /// Grayscale antialiasing. Only one channel is used.
    AntiAlias = 1,
    /// Subpixel RGB antialiasing, for LCD screens.
    SubpixelAntiAlias = 2,
}

impl Default for FontEdging {
    #[inline]
    fn default() -> FontEdging {
        FontEdging::AntiAlias
    }
}

impl FontEdging {
    /// Converts a `CK_FONT_EDGING_*` value.
    pub fn from_u32(value: u32) -> Option<FontEdging> {
        match value {
            0 => Some(FontEdging::Alias),
            1 => Some(FontEdging::AntiAlias),
            2 => Some(FontEdging::SubpixelAntiAlias),
            _ => None,
        }
    }
}
