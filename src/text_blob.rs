// canvas-kit/src/text_blob.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Immutable runs of positioned glyphs.

use byteorder::{ByteOrder, NativeEndian};
use log::debug;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::Vector2F;
use std::char;
use std::str;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::TextBlobError;
use crate::font::Font;
use crate::typeface::Typeface;

static NEXT_UNIQUE_ID: AtomicU32 = AtomicU32::new(1);

/// How text bytes are to be interpreted. Multi-byte code units are in native byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextEncoding {
    Utf8 = 0,
    Utf16 = 1,
    Utf32 = 2,
    /// 16-bit glyph IDs, bypassing character mapping.
    GlyphId = 3,
}

impl TextEncoding {
    /// Converts a raw value, as passed across a C boundary.
    pub fn from_u32(value: u32) -> Option<TextEncoding> {
        match value {
            0 => Some(TextEncoding::Utf8),
            1 => Some(TextEncoding::Utf16),
            2 => Some(TextEncoding::Utf32),
            3 => Some(TextEncoding::GlyphId),
            _ => None,
        }
    }

    /// The size of one code unit in bytes.
    #[inline]
    pub fn code_unit_size(self) -> usize {
        match self {
            TextEncoding::Utf8 => 1,
            TextEncoding::Utf16 | TextEncoding::GlyphId => 2,
            TextEncoding::Utf32 => 4,
        }
    }

    /// Decodes text to characters. Glyph ID "text" has no characters and is rejected.
    pub fn decode_chars(self, text: &[u8]) -> Result<Vec<char>, TextBlobError> {
        if text.len() % self.code_unit_size() != 0 {
            return Err(TextBlobError::InvalidEncoding);
        }
        match self {
            TextEncoding::Utf8 => str::from_utf8(text)
                .map(|text| text.chars().collect())
                .map_err(|_| TextBlobError::InvalidEncoding),
            TextEncoding::Utf16 => {
                let units = text.chunks_exact(2).map(NativeEndian::read_u16);
                char::decode_utf16(units)
                    .collect::<Result<Vec<char>, _>>()
                    .map_err(|_| TextBlobError::InvalidEncoding)
            }
            TextEncoding::Utf32 => text
                .chunks_exact(4)
                .map(|unit| char::from_u32(NativeEndian::read_u32(unit)))
                .collect::<Option<Vec<char>>>()
                .ok_or(TextBlobError::InvalidEncoding),
            TextEncoding::GlyphId => Err(TextBlobError::InvalidEncoding),
        }
    }

    /// Reads 16-bit glyph IDs.
    pub fn decode_glyphs(self, text: &[u8]) -> Result<Vec<u16>, TextBlobError> {
        if self != TextEncoding::GlyphId || text.len() % 2 != 0 {
            return Err(TextBlobError::InvalidEncoding);
        }
        Ok(text.chunks_exact(2).map(NativeEndian::read_u16).collect())
    }
}

/// Glyphs laid out along a baseline starting at the origin, with the font they came from.
///
/// A blob holds a reference to its typeface for as long as it lives.
#[derive(Debug)]
pub struct TextBlob {
    unique_id: u32,
    font: Font,
    glyphs: Vec<u16>,
    positions: Vec<Vector2F>,
    bounds: RectF,
}

impl TextBlob {
    /// Lays out `text` in a single run. If `font` has no typeface, the blob's font is given the
    /// default typeface.
    ///
    /// Fails if the text is malformed for `encoding` or yields no glyphs.
    pub fn from_text(
        text: &[u8],
        font: &Font,
        encoding: TextEncoding,
    ) -> Result<Arc<TextBlob>, TextBlobError> {
        let mut font = font.clone();
        font.set_typeface(Some(font.typeface_or_default()));

        let glyphs = font.text_to_glyphs(text, encoding)?;
        if glyphs.is_empty() {
            debug!("refusing to build an empty text blob");
            return Err(TextBlobError::Empty);
        }

        let mut positions = Vec::with_capacity(glyphs.len());
        let mut advance = 0.0;
        for width in font.glyph_widths(&glyphs) {
            positions.push(Vector2F::new(advance, 0.0));
            advance += width;
        }

        let metrics = font.metrics();
        let bounds = RectF::from_points(
            Vector2F::new(0.0, metrics.ascent),
            Vector2F::new(advance, metrics.descent),
        );

        Ok(Arc::new(TextBlob {
            unique_id: NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed),
            font,
            glyphs,
            positions,
            bounds,
        }))
    }

    /// Lays out UTF-8 text.
    #[inline]
    pub fn from_str(text: &str, font: &Font) -> Result<Arc<TextBlob>, TextBlobError> {
        TextBlob::from_text(text.as_bytes(), font, TextEncoding::Utf8)
    }

    #[inline]
    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The typeface the glyphs index into.
    pub fn typeface(&self) -> Option<&Arc<Typeface>> {
        self.font.typeface()
    }

    #[inline]
    pub fn glyphs(&self) -> &[u16] {
        &self.glyphs
    }

    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Origin of each glyph relative to the start of the baseline.
    #[inline]
    pub fn positions(&self) -> &[Vector2F] {
        &self.positions
    }

    /// A box containing every glyph: horizontally the total advance, vertically the font's ascent
    /// to its descent.
    #[inline]
    pub fn bounds(&self) -> RectF {
        self.bounds
    }
}
