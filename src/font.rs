// canvas-kit/src/font.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fonts: a typeface at a particular size, with rendering settings.
//!
//! A `Font` is a plain value. It is usually built on the stack or, across a C boundary, directly
//! in caller storage with `placement::construct_at`. Cloning it takes a new reference to its
//! typeface; dropping it releases that reference.

use std::sync::Arc;

use crate::error::TextBlobError;
use crate::hinting::{FontEdging, FontHinting};
use crate::text_blob::TextEncoding;
use crate::typeface::Typeface;

bitflags! {
    /// Boolean rendering settings of a font.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FontFlags: u32 {
        const FORCE_AUTO_HINTING = 1 << 0;
        const EMBEDDED_BITMAPS = 1 << 1;
        const SUBPIXEL = 1 << 2;
        const LINEAR_METRICS = 1 << 3;
        const EMBOLDEN = 1 << 4;
        const BASELINE_SNAP = 1 << 5;
    }
}

/// Line metrics at a font's size, in pixels. `ascent` is negative (above the baseline) and
/// `descent` positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl FontMetrics {
    /// The recommended distance between consecutive baselines.
    #[inline]
    pub fn line_spacing(&self) -> f32 {
        self.descent - self.ascent + self.leading
    }
}

/// A typeface at a size, plus rendering settings.
#[derive(Clone, Debug)]
pub struct Font {
    typeface: Option<Arc<Typeface>>,
    size: f32,
    scale_x: f32,
    skew_x: f32,
    flags: FontFlags,
    hinting: FontHinting,
    edging: FontEdging,
}

impl Font {
    pub const DEFAULT_SIZE: f32 = 12.0;

    /// Creates a font that holds a new reference to `typeface`. Without a typeface, the default
    /// typeface is used for glyph lookups. Negative and NaN sizes become 0.
    pub fn new(typeface: Option<Arc<Typeface>>, size: f32) -> Font {
        Font {
            typeface,
            size: valid_size(size),
            scale_x: 1.0,
            skew_x: 0.0,
            flags: FontFlags::BASELINE_SNAP,
            hinting: FontHinting::default(),
            edging: FontEdging::default(),
        }
    }

    /// The typeface this font was given, if any.
    #[inline]
    pub fn typeface(&self) -> Option<&Arc<Typeface>> {
        self.typeface.as_ref()
    }

    /// Returns a new reference to the typeface glyphs come from.
    pub fn typeface_or_default(&self) -> Arc<Typeface> {
        match self.typeface {
            Some(ref typeface) => typeface.clone(),
            None => Typeface::make_default(),
        }
    }

    /// Replaces the typeface, releasing the previous one.
    #[inline]
    pub fn set_typeface(&mut self, typeface: Option<Arc<Typeface>>) {
        self.typeface = typeface;
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn set_size(&mut self, size: f32) {
        self.size = valid_size(size)
    }

    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    #[inline]
    pub fn set_scale_x(&mut self, scale_x: f32) {
        self.scale_x = scale_x
    }

    #[inline]
    pub fn skew_x(&self) -> f32 {
        self.skew_x
    }

    #[inline]
    pub fn set_skew_x(&mut self, skew_x: f32) {
        self.skew_x = skew_x
    }

    #[inline]
    pub fn flags(&self) -> FontFlags {
        self.flags
    }

    #[inline]
    pub fn set_flags(&mut self, flags: FontFlags) {
        self.flags = flags
    }

    #[inline]
    pub fn hinting(&self) -> FontHinting {
        self.hinting
    }

    #[inline]
    pub fn set_hinting(&mut self, hinting: FontHinting) {
        self.hinting = hinting
    }

    #[inline]
    pub fn edging(&self) -> FontEdging {
        self.edging
    }

    #[inline]
    pub fn set_edging(&mut self, edging: FontEdging) {
        self.edging = edging
    }

    /// Converts encoded text to glyph IDs. `TextEncoding::GlyphId` text is passed through.
    pub fn text_to_glyphs(
        &self,
        text: &[u8],
        encoding: TextEncoding,
    ) -> Result<Vec<u16>, TextBlobError> {
        match encoding {
            TextEncoding::GlyphId => encoding.decode_glyphs(text),
            _ => {
                let chars = encoding.decode_chars(text)?;
                Ok(self.typeface_or_default().chars_to_glyphs(chars))
            }
        }
    }

    /// Horizontal advances of `glyphs` at this font's size and horizontal scale.
    pub fn glyph_widths(&self, glyphs: &[u16]) -> Vec<f32> {
        let typeface = self.typeface_or_default();
        let scale = self.design_unit_scale(&typeface) * self.scale_x;
        typeface
            .glyph_advances(glyphs)
            .into_iter()
            .map(|advance| advance * scale)
            .collect()
    }

    /// The total advance of `text`. Empty text measures 0.
    pub fn measure_text(&self, text: &[u8], encoding: TextEncoding) -> Result<f32, TextBlobError> {
        let glyphs = self.text_to_glyphs(text, encoding)?;
        Ok(self.glyph_widths(&glyphs).into_iter().sum())
    }

    /// Line metrics at this font's size; all zero for an empty typeface.
    pub fn metrics(&self) -> FontMetrics {
        let typeface = self.typeface_or_default();
        let scale = self.design_unit_scale(&typeface);
        let metrics = typeface.metrics();
        FontMetrics {
            ascent: -(metrics.ascender as f32) * scale,
            descent: -(metrics.descender as f32) * scale,
            leading: metrics.line_gap as f32 * scale,
        }
    }

    fn design_unit_scale(&self, typeface: &Typeface) -> f32 {
        match typeface.units_per_em() {
            0 => 0.0,
            units_per_em => self.size / units_per_em as f32,
        }
    }
}

impl Default for Font {
    #[inline]
    fn default() -> Font {
        Font::new(None, Font::DEFAULT_SIZE)
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Font) -> bool {
        let same_typeface = match (&self.typeface, &other.typeface) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_typeface
            && self.size == other.size
            && self.scale_x == other.scale_x
            && self.skew_x == other.skew_x
            && self.flags == other.flags
            && self.hinting == other.hinting
            && self.edging == other.edging
    }
}

#[inline]
fn valid_size(size: f32) -> f32 {
    if size >= 0.0 {
        size
    } else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::font_style::FontStyle;

    #[test]
    fn sizes_are_clamped() {
        let mut font = Font::new(None, -3.0);
        assert_eq!(font.size(), 0.0);
        font.set_size(f32::NAN);
        assert_eq!(font.size(), 0.0);
        font.set_size(18.5);
        assert_eq!(font.size(), 18.5);
        assert_eq!(Font::default().size(), Font::DEFAULT_SIZE);
    }

    #[test]
    fn clone_retains_typeface() {
        let typeface = Typeface::new_empty("Retained", FontStyle::normal());
        let font = Font::new(Some(typeface.clone()), 10.0);
        assert_eq!(Arc::strong_count(&typeface), 2);
        let copy = font.clone();
        assert_eq!(Arc::strong_count(&typeface), 3);
        assert_eq!(copy, font);
        drop(copy);
        drop(font);
        assert_eq!(Arc::strong_count(&typeface), 1);
    }

    #[test]
    fn empty_typeface_measures_zero() {
        let font = Font::new(Some(Typeface::new_empty("Empty", FontStyle::normal())), 16.0);
        assert_eq!(font.text_to_glyphs(b"hi", TextEncoding::Utf8).unwrap(), vec![0, 0]);
        assert_eq!(font.measure_text(b"hi", TextEncoding::Utf8).unwrap(), 0.0);
        assert_eq!(font.measure_text(b"", TextEncoding::Utf8).unwrap(), 0.0);
        assert_eq!(font.metrics(), FontMetrics::default());
    }

    #[test]
    fn glyph_ids_pass_through() {
        let font = Font::new(Some(Typeface::new_empty("Empty", FontStyle::normal())), 16.0);
        let mut text = vec![];
        for glyph in &[7u16, 300] {
            text.extend_from_slice(&glyph.to_ne_bytes());
        }
        assert_eq!(
            font.text_to_glyphs(&text, TextEncoding::GlyphId).unwrap(),
            vec![7, 300]
        );
        assert_eq!(
            font.text_to_glyphs(&text[..3], TextEncoding::GlyphId),
            Err(TextBlobError::InvalidEncoding)
        );
    }

    #[test]
    fn settings_round_trip() {
        let mut font = Font::default();
        assert!(font.flags().contains(FontFlags::BASELINE_SNAP));
        font.set_flags(FontFlags::EMBOLDEN | FontFlags::SUBPIXEL);
        font.set_hinting(FontHinting::Slight);
        font.set_edging(FontEdging::SubpixelAntiAlias);
        font.set_scale_x(1.5);
        font.set_skew_x(-0.25);
        assert!(font.flags().contains(FontFlags::EMBOLDEN));
        assert_eq!(font.hinting(), FontHinting::Slight);
        assert_eq!(font.edging(), FontEdging::SubpixelAntiAlias);
        assert_eq!((font.scale_x(), font.skew_x()), (1.5, -0.25));
        assert!(font.typeface().is_none());
    }
}
