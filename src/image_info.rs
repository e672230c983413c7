// canvas-kit/src/image_info.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Describes the layout of a block of pixels: dimensions, pixel format, and color space.

use std::sync::Arc;

use crate::color_space::ColorSpace;

/// The memory format of a single pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorType {
    /// Uninitialized or unsupported.
    Unknown,
    /// A8: alpha only.
    Alpha8,
    /// R5G6B5, packed into a native-endian 16-bit word.
    Rgb565,
    /// R8G8B8A8, in byte order.
    Rgba8888,
    /// R8G8B8 followed by an ignored byte.
    Rgb888x,
    /// B8G8R8A8, in byte order.
    Bgra8888,
    /// Single-channel luminance.
    Gray8,
}

impl Default for ColorType {
    fn default() -> ColorType {
        ColorType::Unknown
    }
}

impl ColorType {
    /// The 32-bit color type this platform prefers.
    #[cfg(target_os = "android")]
    pub const N32: ColorType = ColorType::Rgba8888;
    /// The 32-bit color type this platform prefers.
    #[cfg(not(target_os = "android"))]
    pub const N32: ColorType = ColorType::Bgra8888;

    /// Returns the number of bytes per pixel; zero for `Unknown`.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorType::Unknown => 0,
            ColorType::Alpha8 | ColorType::Gray8 => 1,
            ColorType::Rgb565 => 2,
            ColorType::Rgba8888 | ColorType::Rgb888x | ColorType::Bgra8888 => 4,
        }
    }

    /// Returns true if pixels of this type cannot express transparency.
    #[inline]
    pub fn is_always_opaque(self) -> bool {
        match self {
            ColorType::Rgb565 | ColorType::Rgb888x | ColorType::Gray8 => true,
            _ => false,
        }
    }

    /// Checks `alpha_type` against this color type, returning the alpha type that pixels of this
    /// type actually carry, or `None` if the combination is meaningless.
    pub fn validate_alpha_type(self, alpha_type: AlphaType) -> Option<AlphaType> {
        match self {
            ColorType::Unknown => Some(AlphaType::Unknown),
            ColorType::Alpha8 => match alpha_type {
                AlphaType::Unknown => None,
                AlphaType::Unpremul => Some(AlphaType::Premul),
                other => Some(other),
            },
            ColorType::Rgba8888 | ColorType::Bgra8888 => match alpha_type {
                AlphaType::Unknown => None,
                other => Some(other),
            },
            ColorType::Rgb565 | ColorType::Rgb888x | ColorType::Gray8 => Some(AlphaType::Opaque),
        }
    }
}

/// How the alpha channel of a pixel relates to its color channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlphaType {
    /// Uninitialized.
    Unknown,
    /// Every pixel is fully opaque.
    Opaque,
    /// Color channels are premultiplied by alpha.
    Premul,
    /// Color channels are independent of alpha.
    Unpremul,
}

impl Default for AlphaType {
    fn default() -> AlphaType {
        AlphaType::Unknown
    }
}

/// Describes the dimensions, pixel format, and color space of a block of pixels.
///
/// An `ImageInfo` keeps its color space alive: cloning the descriptor clones the `Arc`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Pixel memory format.
    pub color_type: ColorType,
    /// Alpha interpretation.
    pub alpha_type: AlphaType,
    /// The color space, or `None` for "untagged".
    pub color_space: Option<Arc<ColorSpace>>,
}

impl ImageInfo {
    /// Creates a descriptor. Nothing is validated here; consumers such as surfaces validate.
    #[inline]
    pub fn new(
        width: i32,
        height: i32,
        color_type: ColorType,
        alpha_type: AlphaType,
        color_space: Option<Arc<ColorSpace>>,
    ) -> ImageInfo {
        ImageInfo {
            width,
            height,
            color_type,
            alpha_type,
            color_space,
        }
    }

    /// Creates a descriptor for the platform's native 32-bit premultiplied format, untagged.
    #[inline]
    pub fn new_n32_premul(width: i32, height: i32) -> ImageInfo {
        ImageInfo::new(width, height, ColorType::N32, AlphaType::Premul, None)
    }

    /// Returns a copy of this descriptor with different dimensions.
    pub fn with_dimensions(&self, width: i32, height: i32) -> ImageInfo {
        ImageInfo {
            width,
            height,
            ..self.clone()
        }
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.color_type.bytes_per_pixel()
    }

    /// Returns true if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns true if the alpha type says every pixel is opaque, or the color type forces it.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha_type == AlphaType::Opaque || self.color_type.is_always_opaque()
    }

    /// The smallest row stride that holds one row of pixels.
    #[inline]
    pub fn min_row_bytes(&self) -> usize {
        if self.width <= 0 {
            return 0;
        }
        self.width as usize * self.bytes_per_pixel()
    }

    /// Returns true if `row_bytes` can hold a row and is a whole number of pixels.
    pub fn valid_row_bytes(&self, row_bytes: usize) -> bool {
        if row_bytes < self.min_row_bytes() {
            return false;
        }
        let bytes_per_pixel = self.bytes_per_pixel();
        bytes_per_pixel == 0 || row_bytes % bytes_per_pixel == 0
    }

    /// Returns the number of bytes needed for the pixels given a row stride, or `None` on
    /// overflow. The last row only needs `min_row_bytes`.
    pub fn compute_byte_size(&self, row_bytes: usize) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        (self.height as usize - 1)
            .checked_mul(row_bytes)?
            .checked_add(self.min_row_bytes())
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn compute_offset(&self, x: i32, y: i32, row_bytes: usize) -> usize {
        y as usize * row_bytes + x as usize * self.bytes_per_pixel()
    }
}
