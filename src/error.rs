// canvas-kit/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `canvas-kit` factories can return.

use std::borrow::Cow;
use std::convert::From;
use std::error::Error;
use std::fmt;
use std::io;

macro_rules! impl_display {
    ($enum:ident, {$($variant:pat => $fmt_string:expr),+$(,)* }) => {

        impl fmt::Display for $enum {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                use self::$enum::*;
                match &self {
                    $(
                        $variant => write!(f, "{}", $fmt_string),
                    )+
                }
            }
        }
    };
}

/// Reasons why a surface could not be created over a pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceError {
    /// The width or height was zero, negative, or beyond the supported maximum.
    InvalidDimensions,
    /// The color type was `ColorType::Unknown`.
    UnknownColorType,
    /// The alpha type was unknown or incompatible with the color type.
    InvalidAlphaType,
    /// The row stride is smaller than one row of pixels.
    RowBytesTooSmall,
    /// The row stride is not a whole number of pixels.
    MisalignedRowBytes,
    /// The total pixel storage would exceed the supported maximum.
    TooLarge,
    /// No pixel buffer was supplied.
    NullPixels,
}

impl Error for SurfaceError {}

impl_display! { SurfaceError, {
        InvalidDimensions => "invalid surface dimensions",
        UnknownColorType => "unknown color type",
        InvalidAlphaType => "alpha type incompatible with color type",
        RowBytesTooSmall => "row bytes smaller than one row of pixels",
        MisalignedRowBytes => "row bytes not a multiple of the pixel size",
        TooLarge => "pixel storage too large",
        NullPixels => "null pixel buffer",
    }
}

/// Reasons why a typeface might fail to load from font data.
#[derive(Debug)]
pub enum FontLoadingError {
    /// The data was of a format the parser didn't recognize, or was malformed.
    Parse,

    /// Attempted to load an invalid index in a TrueType or OpenType font collection.
    ///
    /// For example, if a `.ttc` file has 2 fonts in it, and you ask for the 5th one, you'll get
    /// this error.
    NoSuchFontInCollection,

    /// A disk or similar I/O error occurred while attempting to load the font.
    Io(io::Error),
}

impl Error for FontLoadingError {}

impl_display! { FontLoadingError, {
        Parse => "parse error",
        NoSuchFontInCollection => "no such font in the collection",
        Io(e) => format!("I/O error: {}", e),
    }
}

impl From<io::Error> for FontLoadingError {
    fn from(error: io::Error) -> FontLoadingError {
        FontLoadingError::Io(error)
    }
}

/// Reasons why a source might fail to look up a typeface or typefaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// No typeface matching the given query was found.
    NotFound,
    /// The source was inaccessible because of an I/O or similar error.
    CannotAccessSource {
        /// Additional diagnostic information may include file name
        reason: Option<Cow<'static, str>>,
    },
}

impl Error for SelectionError {}

impl_display! { SelectionError, {
        NotFound => "no typeface found",
        CannotAccessSource { reason: ref maybe_cow } => {
            maybe_cow.as_deref().unwrap_or("failed to access source")
        }
    }
}

/// Reasons why text could not be turned into a text blob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextBlobError {
    /// The text produced no glyphs.
    Empty,
    /// The bytes are not valid in the declared text encoding.
    InvalidEncoding,
}

impl Error for TextBlobError {}

impl_display! { TextBlobError, {
        Empty => "text produced no glyphs",
        InvalidEncoding => "text is not valid in the declared encoding",
    }
}
