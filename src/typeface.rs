// canvas-kit/src/typeface.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Typefaces: a reference-counted face of a font family, optionally backed by OpenType data.
//!
//! A typeface without data is *empty*: it maps every character to glyph 0 and every glyph to a
//! zero advance. The last-resort default typeface is empty when no fonts can be found.

use log::{debug, warn};
use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use ttf_parser::{name_id, Face, GlyphId};

use crate::error::FontLoadingError;
use crate::family_name::FamilyName;
use crate::font_mgr::FontMgr;
use crate::font_style::{FontStyle, Slant, Weight, Width};

static NEXT_UNIQUE_ID: AtomicU32 = AtomicU32::new(1);

lazy_static! {
    static ref EMPTY: Arc<Typeface> = Typeface::new_empty("", FontStyle::normal());
    static ref DEFAULT: Arc<Typeface> = {
        let matched = FontMgr::default_mgr()
            .match_family_style(Some(&FamilyName::SansSerif), &FontStyle::normal());
        match matched {
            Some(typeface) => typeface,
            None => {
                debug!("no sans-serif typeface found; the default typeface is empty");
                EMPTY.clone()
            }
        }
    };
}

/// Global vertical metrics of a face, in design units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TypefaceMetrics {
    /// Design units per em; zero for an empty typeface.
    pub units_per_em: u16,
    /// Distance above the baseline (positive).
    pub ascender: i16,
    /// Distance below the baseline (negative).
    pub descender: i16,
    /// Recommended gap between lines.
    pub line_gap: i16,
}

// Where a face's bytes live. File-backed faces are read on first query.
enum FontBytes {
    Memory(Arc<Vec<u8>>),
    File {
        path: PathBuf,
        loaded: OnceLock<Option<Vec<u8>>>,
    },
}

// Faces are re-parsed per query; parsing only validates headers.
struct FontData {
    bytes: FontBytes,
    index: u32,
    metrics: TypefaceMetrics,
}

impl FontData {
    fn bytes(&self) -> Option<&[u8]> {
        match self.bytes {
            FontBytes::Memory(ref bytes) => Some(bytes.as_slice()),
            FontBytes::File {
                ref path,
                ref loaded,
            } => loaded
                .get_or_init(|| match fs::read(path) {
                    Ok(bytes) => Some(bytes),
                    Err(error) => {
                        warn!("could not reload {}: {}", path.display(), error);
                        None
                    }
                })
                .as_deref(),
        }
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(self.bytes()?, self.index).ok()
    }

    #[cfg(test)]
    fn is_resident(&self) -> bool {
        match self.bytes {
            FontBytes::Memory(_) => true,
            FontBytes::File { ref loaded, .. } => loaded.get().is_some(),
        }
    }
}

// Everything read from a face's tables at load time.
struct FaceInfo {
    family_name: String,
    postscript_name: Option<String>,
    style: FontStyle,
    fixed_pitch: bool,
    metrics: TypefaceMetrics,
}

/// A reference-counted typeface.
pub struct Typeface {
    unique_id: u32,
    family_name: String,
    postscript_name: Option<String>,
    style: FontStyle,
    fixed_pitch: bool,
    data: Option<FontData>,
}

impl Typeface {
    /// Returns the process-wide default typeface: the best sans-serif match of the default font
    /// manager, or an empty typeface if there is none.
    ///
    /// Every call returns a new reference to the same object.
    #[inline]
    pub fn make_default() -> Arc<Typeface> {
        DEFAULT.clone()
    }

    /// Returns a new reference to the shared empty typeface.
    #[inline]
    pub fn make_empty() -> Arc<Typeface> {
        EMPTY.clone()
    }

    /// Resolves a family name through the default font manager. `None` means the default
    /// typeface; a name that matches nothing returns `None`.
    pub fn make_from_name(family_name: Option<&str>, style: &FontStyle) -> Option<Arc<Typeface>> {
        match family_name {
            None => Some(Typeface::make_default()),
            Some(name) => FontMgr::default_mgr().legacy_make_typeface(Some(name), style),
        }
    }

    /// Creates a typeface with a name and style but no glyph data.
    pub fn new_empty(family_name: &str, style: FontStyle) -> Arc<Typeface> {
        Arc::new(Typeface {
            unique_id: NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed),
            family_name: family_name.to_owned(),
            postscript_name: None,
            style: style.clamped(),
            fixed_pitch: false,
            data: None,
        })
    }

    /// Loads a typeface from raw font data (the contents of a `.ttf`/`.otf`/etc. file).
    ///
    /// If the data represents a collection (`.ttc`/`.otc`/etc.), `font_index` specifies the index
    /// of the face to load from it. If the data represents a single font, pass 0.
    pub fn from_data(
        bytes: Arc<Vec<u8>>,
        font_index: u32,
    ) -> Result<Arc<Typeface>, FontLoadingError> {
        let info = read_face_info(&bytes, font_index)?;
        Ok(Typeface::with_info(info, FontBytes::Memory(bytes), font_index))
    }

    /// Loads a typeface from the path to a `.ttf`/`.otf`/etc. file.
    ///
    /// Only the path is kept; the file is read again the first time glyphs are looked up.
    pub fn from_path<P>(path: P, font_index: u32) -> Result<Arc<Typeface>, FontLoadingError>
    where
        P: AsRef<Path>,
    {
        let bytes = fs::read(path.as_ref())?;
        Typeface::from_file_bytes(path.as_ref(), &bytes, font_index)
    }

    /// Like `from_path`, for a caller that has already read the file (to count its faces, say).
    /// `bytes` is not retained.
    pub fn from_file_bytes(
        path: &Path,
        bytes: &[u8],
        font_index: u32,
    ) -> Result<Arc<Typeface>, FontLoadingError> {
        let info = read_face_info(bytes, font_index)?;
        let bytes = FontBytes::File {
            path: path.to_owned(),
            loaded: OnceLock::new(),
        };
        Ok(Typeface::with_info(info, bytes, font_index))
    }

    fn with_info(info: FaceInfo, bytes: FontBytes, font_index: u32) -> Arc<Typeface> {
        Arc::new(Typeface {
            unique_id: NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed),
            family_name: info.family_name,
            postscript_name: info.postscript_name,
            style: info.style.clamped(),
            fixed_pitch: info.fixed_pitch,
            data: Some(FontData {
                bytes,
                index: font_index,
                metrics: info.metrics,
            }),
        })
    }

    /// Returns the number of faces in the data: 1 for a single font, the face count for a
    /// collection, or `None` if the data isn't a font.
    pub fn count_faces(bytes: &[u8]) -> Option<u32> {
        match ttf_parser::fonts_in_collection(bytes) {
            Some(count) => Some(count),
            None => Face::parse(bytes, 0).ok().map(|_| 1),
        }
    }

    /// A process-unique identifier.
    #[inline]
    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    #[inline]
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    #[inline]
    pub fn postscript_name(&self) -> Option<&str> {
        self.postscript_name.as_deref()
    }

    #[inline]
    pub fn style(&self) -> FontStyle {
        self.style
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.style.weight >= Weight::SEMIBOLD
    }

    #[inline]
    pub fn is_italic(&self) -> bool {
        self.style.slant != Slant::Upright
    }

    /// Whether every glyph has the same advance.
    #[inline]
    pub fn is_fixed_pitch(&self) -> bool {
        self.fixed_pitch
    }

    /// The file this typeface was loaded from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        match self.data.as_ref()?.bytes {
            FontBytes::File { ref path, .. } => Some(path.as_path()),
            FontBytes::Memory(_) => None,
        }
    }

    /// Returns true if this typeface has no glyph data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Global metrics; all zero for an empty typeface.
    #[inline]
    pub fn metrics(&self) -> TypefaceMetrics {
        self.data.as_ref().map(|data| data.metrics).unwrap_or_default()
    }

    #[inline]
    pub fn units_per_em(&self) -> u16 {
        self.metrics().units_per_em
    }

    /// Maps characters to glyph IDs, using 0 for characters the face doesn't cover.
    pub fn chars_to_glyphs<I>(&self, chars: I) -> Vec<u16>
    where
        I: IntoIterator<Item = char>,
    {
        match self.data.as_ref().and_then(FontData::face) {
            Some(face) => chars
                .into_iter()
                .map(|c| face.glyph_index(c).map_or(0, |glyph| glyph.0))
                .collect(),
            None => chars.into_iter().map(|_| 0).collect(),
        }
    }

    /// Returns the glyph ID for one character, or 0.
    #[inline]
    pub fn char_to_glyph(&self, character: char) -> u16 {
        self.chars_to_glyphs(Some(character))[0]
    }

    /// Returns horizontal advances in design units, zero for unknown glyphs.
    pub fn glyph_advances(&self, glyphs: &[u16]) -> Vec<f32> {
        match self.data.as_ref().and_then(FontData::face) {
            Some(face) => glyphs
                .iter()
                .map(|&glyph| face.glyph_hor_advance(GlyphId(glyph)).unwrap_or(0) as f32)
                .collect(),
            None => vec![0.0; glyphs.len()],
        }
    }
}

impl Debug for Typeface {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeface")
            .field("unique_id", &self.unique_id)
            .field("family_name", &self.family_name)
            .field("style", &self.style)
            .field("empty", &self.is_empty())
            .finish()
    }
}

fn read_face_info(bytes: &[u8], font_index: u32) -> Result<FaceInfo, FontLoadingError> {
    let font_count = ttf_parser::fonts_in_collection(bytes).unwrap_or(1);
    if font_index >= font_count {
        return Err(FontLoadingError::NoSuchFontInCollection);
    }

    let face = Face::parse(bytes, font_index).map_err(|error| {
        debug!("failed to parse font data: {}", error);
        FontLoadingError::Parse
    })?;
    // The typographic family groups every weight of a family; the legacy one splits off
    // weights beyond regular and bold ("DejaVu Sans Light").
    let family_name = find_name(&face, name_id::TYPOGRAPHIC_FAMILY)
        .or_else(|| find_name(&face, name_id::FAMILY))
        .unwrap_or_default();
    let slant = if face.is_italic() {
        Slant::Italic
    } else if face.is_oblique() {
        Slant::Oblique
    } else {
        Slant::Upright
    };
    Ok(FaceInfo {
        family_name,
        postscript_name: find_name(&face, name_id::POST_SCRIPT_NAME),
        style: FontStyle::new(
            Weight(face.weight().to_number() as i32),
            Width(face.width().to_number() as i32),
            slant,
        ),
        fixed_pitch: face.is_monospaced(),
        metrics: TypefaceMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        },
    })
}

fn find_name(face: &Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == id && name.is_unicode())
        .find_map(|name| name.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    static TEST_FONT_FILE_PATH: &'static str = "resources/tests/dejavu/DejaVuSans.ttf";
    static TEST_LIGHT_FONT_FILE_PATH: &'static str =
        "resources/tests/dejavu/DejaVuSans-ExtraLight.ttf";

    #[test]
    fn load_from_data() {
        let bytes = Arc::new(fs::read(TEST_FONT_FILE_PATH).unwrap());
        assert_eq!(Typeface::count_faces(&bytes), Some(1));
        let typeface = Typeface::from_data(bytes, 0).unwrap();
        assert!(!typeface.is_empty());
        assert!(typeface.path().is_none());
        assert_eq!(typeface.family_name(), "DejaVu Sans");
        assert_eq!(typeface.postscript_name(), Some("DejaVuSans"));
        assert_eq!(typeface.style(), FontStyle::normal());
        assert!(!typeface.is_fixed_pitch());
        assert_eq!(
            typeface.metrics(),
            TypefaceMetrics {
                units_per_em: 2048,
                ascender: 1901,
                descender: -483,
                line_gap: 0,
            }
        );
        assert_eq!(typeface.chars_to_glyphs("Hello".chars()), vec![43, 72, 79, 79, 82]);
        assert_eq!(typeface.char_to_glyph('\u{10fffd}'), 0);
        assert_eq!(
            typeface.glyph_advances(&[43, 72, 79, 82]),
            vec![1540.0, 1260.0, 569.0, 1253.0]
        );
    }

    #[test]
    fn file_backed_typeface_loads_lazily() {
        let typeface = Typeface::from_path(TEST_FONT_FILE_PATH, 0).unwrap();
        assert_eq!(typeface.path(), Some(Path::new(TEST_FONT_FILE_PATH)));
        assert_eq!(typeface.units_per_em(), 2048);
        let data = typeface.data.as_ref().unwrap();
        assert!(!data.is_resident());
        assert_eq!(typeface.char_to_glyph('H'), 43);
        assert!(data.is_resident());
    }

    #[test]
    fn typographic_family_groups_weights() {
        let typeface = Typeface::from_path(TEST_LIGHT_FONT_FILE_PATH, 0).unwrap();
        assert_eq!(typeface.family_name(), "DejaVu Sans");
        assert_eq!(typeface.style().weight, Weight::EXTRA_LIGHT);
        assert_eq!(typeface.postscript_name(), Some("DejaVuSans-ExtraLight"));
    }

    #[test]
    fn empty_typeface_maps_to_notdef() {
        let typeface = Typeface::new_empty("Nothing", FontStyle::bold());
        assert!(typeface.is_empty());
        assert!(typeface.is_bold());
        assert_eq!(typeface.chars_to_glyphs("abc".chars()), vec![0, 0, 0]);
        assert_eq!(typeface.glyph_advances(&[0, 1]), vec![0.0, 0.0]);
        assert_eq!(typeface.units_per_em(), 0);
    }

    #[test]
    fn unique_ids_differ() {
        let a = Typeface::new_empty("A", FontStyle::normal());
        let b = Typeface::new_empty("A", FontStyle::normal());
        assert_ne!(a.unique_id(), b.unique_id());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let bytes = Arc::new(vec![0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0]);
        match Typeface::from_data(bytes, 0) {
            Err(FontLoadingError::Parse) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(Typeface::count_faces(&[1, 2, 3]), None);
    }

    #[test]
    fn index_past_single_font_is_rejected() {
        match Typeface::from_data(Arc::new(vec![0; 4]), 3) {
            Err(FontLoadingError::NoSuchFontInCollection) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn default_is_shared() {
        let a = Typeface::make_default();
        let b = Typeface::make_default();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
