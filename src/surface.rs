// canvas-kit/src/surface.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A raster surface: a block of pixels described by an `ImageInfo`.
//!
//! The pixels either belong to the surface or are borrowed from whoever created it. In the
//! borrowed case the surface writes straight into the caller's memory and never frees it.

use byteorder::{ByteOrder, NativeEndian};
use log::debug;
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use std::cell::Cell;
use std::cmp;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ptr::NonNull;
use std::slice;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::error::SurfaceError;
use crate::image_info::{AlphaType, ColorType, ImageInfo};
use crate::surface_props::SurfaceProps;

const MAX_DIMENSION: i32 = 1 << 29;
const MAX_TOTAL_SIZE: usize = (std::i32::MAX >> 2) as usize;

static NEXT_GENERATION_ID: AtomicU32 = AtomicU32::new(1);

fn next_generation_id() -> u32 {
    NEXT_GENERATION_ID.fetch_add(1, Ordering::Relaxed)
}

/// A 32-bit unpremultiplied ARGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xff00_0000);
    pub const WHITE: Color = Color(0xffff_ffff);
    pub const RED: Color = Color(0xffff_0000);
    pub const GREEN: Color = Color(0xff00_ff00);
    pub const BLUE: Color = Color(0xff00_00ff);

    #[inline]
    pub fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    #[inline]
    pub fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0 as u8
    }
}

#[inline]
fn mul_div_255(value: u8, alpha: u8) -> u8 {
    ((value as u32 * alpha as u32 + 127) / 255) as u8
}

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 54 + g as u32 * 183 + b as u32 * 19) >> 8) as u8
}

/// Encodes `color` as one pixel of `info`'s format. Returns the bytes and how many are used.
fn encode_pixel(color: Color, info: &ImageInfo) -> ([u8; 4], usize) {
    let opaque = info.is_opaque();
    let a = if opaque { 0xff } else { color.a() };
    let (r, g, b) = if info.alpha_type == AlphaType::Premul && !opaque {
        (mul_div_255(color.r(), a), mul_div_255(color.g(), a), mul_div_255(color.b(), a))
    } else {
        (color.r(), color.g(), color.b())
    };

    let mut pixel = [0; 4];
    match info.color_type {
        ColorType::Unknown => return (pixel, 0),
        ColorType::Alpha8 => pixel[0] = color.a(),
        ColorType::Gray8 => pixel[0] = luminance(r, g, b),
        ColorType::Rgb565 => {
            let packed = ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3);
            NativeEndian::write_u16(&mut pixel[0..2], packed);
        }
        ColorType::Rgba8888 => pixel = [r, g, b, a],
        ColorType::Rgb888x => pixel = [r, g, b, 0xff],
        ColorType::Bgra8888 => pixel = [b, g, r, a],
    }
    (pixel, info.bytes_per_pixel())
}

/// Checks that `info` and `row_bytes` describe pixels a raster surface can address.
pub fn validate_raster_info(info: &ImageInfo, row_bytes: usize) -> Result<(), SurfaceError> {
    if info.is_empty() || info.width > MAX_DIMENSION || info.height > MAX_DIMENSION {
        return Err(SurfaceError::InvalidDimensions);
    }
    if info.color_type == ColorType::Unknown {
        return Err(SurfaceError::UnknownColorType);
    }
    if info.alpha_type == AlphaType::Unknown
        || info.color_type.validate_alpha_type(info.alpha_type).is_none()
    {
        return Err(SurfaceError::InvalidAlphaType);
    }
    if row_bytes < info.min_row_bytes() {
        return Err(SurfaceError::RowBytesTooSmall);
    }
    if !info.valid_row_bytes(row_bytes) {
        return Err(SurfaceError::MisalignedRowBytes);
    }
    match info.compute_byte_size(row_bytes) {
        Some(size) if size <= MAX_TOTAL_SIZE => Ok(()),
        _ => Err(SurfaceError::TooLarge),
    }
}

// Allocation parts of a `Vec<u8>` the surface owns.
struct OwnedPixels {
    len: usize,
    capacity: usize,
}

/// A raster surface.
///
/// Surfaces are shared through `Arc` but are confined to one thread: drawing goes through a raw
/// pointer, so `Surface` is neither `Send` nor `Sync`.
pub struct Surface {
    info: ImageInfo,
    row_bytes: usize,
    props: SurfaceProps,
    pixels: NonNull<u8>,
    owned: Option<OwnedPixels>,
    generation_id: Cell<u32>,
}

impl Surface {
    /// Wraps pixels that the caller owns. The surface never frees them.
    ///
    /// `props` is copied; `None` means default properties. The color space in `info`, if any, is
    /// kept alive by the surface.
    ///
    /// # Safety
    ///
    /// `pixels` must be valid for reads and writes of `info.compute_byte_size(row_bytes)` bytes
    /// for as long as the surface lives. The buffer length cannot be checked here.
    pub unsafe fn from_raw_pixels(
        info: ImageInfo,
        pixels: *mut u8,
        row_bytes: usize,
        props: Option<&SurfaceProps>,
    ) -> Result<Arc<Surface>, SurfaceError> {
        validate_raster_info(&info, row_bytes)?;
        let pixels = NonNull::new(pixels).ok_or(SurfaceError::NullPixels)?;
        Ok(Arc::new(Surface {
            info,
            row_bytes,
            props: props.copied().unwrap_or_default(),
            pixels,
            owned: None,
            generation_id: Cell::new(next_generation_id()),
        }))
    }

    /// Creates a surface that allocates and owns zeroed pixels. A `row_bytes` of zero picks the
    /// minimum.
    pub fn new_raster(
        info: ImageInfo,
        row_bytes: usize,
        props: Option<&SurfaceProps>,
    ) -> Result<Arc<Surface>, SurfaceError> {
        let row_bytes = if row_bytes == 0 {
            info.min_row_bytes()
        } else {
            row_bytes
        };
        validate_raster_info(&info, row_bytes)?;
        let size = info.compute_byte_size(row_bytes).ok_or(SurfaceError::TooLarge)?;
        debug!("allocating {} bytes for a {}x{} raster surface", size, info.width, info.height);

        let mut storage = mem::ManuallyDrop::new(vec![0u8; size]);
        let owned = OwnedPixels {
            len: storage.len(),
            capacity: storage.capacity(),
        };
        let pixels = NonNull::new(storage.as_mut_ptr()).ok_or(SurfaceError::NullPixels)?;
        Ok(Arc::new(Surface {
            info,
            row_bytes,
            props: props.copied().unwrap_or_default(),
            pixels,
            owned: Some(owned),
            generation_id: Cell::new(next_generation_id()),
        }))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.info.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.info.height
    }

    #[inline]
    pub fn image_info(&self) -> &ImageInfo {
        &self.info
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    #[inline]
    pub fn props(&self) -> &SurfaceProps {
        &self.props
    }

    /// Returns true if the surface allocated its own pixels.
    #[inline]
    pub fn owns_pixels(&self) -> bool {
        self.owned.is_some()
    }

    /// Changes every time the pixels are written.
    #[inline]
    pub fn generation_id(&self) -> u32 {
        self.generation_id.get()
    }

    /// Returns the address of the first pixel.
    #[inline]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    /// Fills every pixel with `color`.
    pub fn clear(&self, color: Color) {
        let bounds = RectI::new(Vector2I::zero(), Vector2I::new(self.width(), self.height()));
        self.fill_rect(bounds, color)
    }

    /// Fills `rect`, clipped to the surface bounds, with `color`.
    pub fn fill_rect(&self, rect: RectI, color: Color) {
        let left = cmp::max(rect.min_x(), 0);
        let top = cmp::max(rect.min_y(), 0);
        let right = cmp::min(rect.max_x(), self.width());
        let bottom = cmp::min(rect.max_y(), self.height());
        if left >= right || top >= bottom {
            return;
        }

        let (pixel, bytes_per_pixel) = encode_pixel(color, &self.info);
        let pixel = &pixel[0..bytes_per_pixel];
        for y in top..bottom {
            let start = self.info.compute_offset(left, y, self.row_bytes);
            let len = (right - left) as usize * bytes_per_pixel;
            let row = unsafe { slice::from_raw_parts_mut(self.pixels.as_ptr().add(start), len) };
            for dest in row.chunks_mut(bytes_per_pixel) {
                dest.copy_from_slice(pixel);
            }
        }
        self.notify_pixels_changed();
    }

    /// Copies the rectangle at `(src_x, src_y)` of size `dst_info` into `dst`, converting the
    /// pixel format if supported. Returns false if nothing could be copied.
    pub fn read_pixels(
        &self,
        dst_info: &ImageInfo,
        dst: &mut [u8],
        dst_row_bytes: usize,
        src_x: i32,
        src_y: i32,
    ) -> bool {
        if dst_info.is_empty() || !dst_info.valid_row_bytes(dst_row_bytes) {
            return false;
        }
        match dst_info.compute_byte_size(dst_row_bytes) {
            Some(size) if size <= dst.len() => {}
            _ => return false,
        }

        let left = cmp::max(src_x, 0);
        let top = cmp::max(src_y, 0);
        let right = cmp::min(src_x.saturating_add(dst_info.width), self.width());
        let bottom = cmp::min(src_y.saturating_add(dst_info.height), self.height());
        if left >= right || top >= bottom {
            return false;
        }
        let width = (right - left) as usize;

        let blit: fn(&mut [u8], &[u8]) = match (dst_info.color_type, self.info.color_type) {
            (dst, src) if dst == src => BlitMemcpy::blit,
            (ColorType::Rgba8888, ColorType::Bgra8888)
            | (ColorType::Bgra8888, ColorType::Rgba8888) => BlitSwapRedBlue::blit,
            (ColorType::Alpha8, ColorType::Rgba8888) | (ColorType::Alpha8, ColorType::Bgra8888) => {
                BlitRgba32ToA8::blit
            }
            (ColorType::Alpha8, ColorType::Rgb888x) => BlitOpaqueToA8::blit,
            (ColorType::Gray8, ColorType::Rgba8888) | (ColorType::Gray8, ColorType::Rgb888x) => {
                BlitRgba32ToGray8::blit
            }
            (ColorType::Gray8, ColorType::Bgra8888) => BlitBgra32ToGray8::blit,
            (ColorType::Rgba8888, ColorType::Alpha8) | (ColorType::Bgra8888, ColorType::Alpha8) => {
                BlitA8ToRgba32::blit
            }
            _ => return false,
        };

        let src_bytes_per_pixel = self.info.bytes_per_pixel();
        let dst_bytes_per_pixel = dst_info.bytes_per_pixel();
        for y in top..bottom {
            let src_start = self.info.compute_offset(left, y, self.row_bytes);
            let src_row = unsafe {
                slice::from_raw_parts(
                    self.pixels.as_ptr().add(src_start),
                    width * src_bytes_per_pixel,
                )
            };
            let dst_start = dst_info.compute_offset(left - src_x, y - src_y, dst_row_bytes);
            let dst_row = &mut dst[dst_start..(dst_start + width * dst_bytes_per_pixel)];
            blit(dst_row, src_row)
        }
        true
    }

    /// Marks the pixels as changed.
    #[inline]
    pub fn notify_pixels_changed(&self) {
        self.generation_id.set(next_generation_id())
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if let Some(ref owned) = self.owned {
            unsafe { drop(Vec::from_raw_parts(self.pixels.as_ptr(), owned.len, owned.capacity)) }
        }
    }
}

impl Debug for Surface {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("info", &self.info)
            .field("row_bytes", &self.row_bytes)
            .field("props", &self.props)
            .field("owns_pixels", &self.owns_pixels())
            .finish()
    }
}

trait Blit {
    fn blit(dest: &mut [u8], src: &[u8]);
}

struct BlitMemcpy;

impl Blit for BlitMemcpy {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        dest.clone_from_slice(src)
    }
}

struct BlitSwapRedBlue;

impl Blit for BlitSwapRedBlue {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(4).zip(src.chunks(4)) {
            dest.copy_from_slice(&[src[2], src[1], src[0], src[3]])
        }
    }
}

struct BlitRgba32ToA8;

impl Blit for BlitRgba32ToA8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(4)) {
            *dest = src[3]
        }
    }
}

struct BlitOpaqueToA8;

impl Blit for BlitOpaqueToA8 {
    #[inline]
    fn blit(dest: &mut [u8], _: &[u8]) {
        for dest in dest.iter_mut() {
            *dest = 0xff
        }
    }
}

struct BlitRgba32ToGray8;

impl Blit for BlitRgba32ToGray8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(4)) {
            *dest = luminance(src[0], src[1], src[2])
        }
    }
}

struct BlitBgra32ToGray8;

impl Blit for BlitBgra32ToGray8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(4)) {
            *dest = luminance(src[2], src[1], src[0])
        }
    }
}

struct BlitA8ToRgba32;

impl Blit for BlitA8ToRgba32 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(4).zip(src.iter()) {
            dest.copy_from_slice(&[0, 0, 0, *src])
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rgba(width: i32, height: i32) -> ImageInfo {
        ImageInfo::new(width, height, ColorType::Rgba8888, AlphaType::Premul, None)
    }

    #[test]
    fn validation() {
        assert_eq!(validate_raster_info(&rgba(0, 4), 0), Err(SurfaceError::InvalidDimensions));
        assert_eq!(validate_raster_info(&rgba(4, 4), 15), Err(SurfaceError::RowBytesTooSmall));
        assert_eq!(validate_raster_info(&rgba(4, 4), 18), Err(SurfaceError::MisalignedRowBytes));
        assert_eq!(validate_raster_info(&rgba(4, 4), 16), Ok(()));
        let unknown = ImageInfo::new(4, 4, ColorType::Unknown, AlphaType::Premul, None);
        assert_eq!(validate_raster_info(&unknown, 16), Err(SurfaceError::UnknownColorType));
        let no_alpha = ImageInfo::new(4, 4, ColorType::Rgba8888, AlphaType::Unknown, None);
        assert_eq!(validate_raster_info(&no_alpha, 16), Err(SurfaceError::InvalidAlphaType));
        let huge = rgba(MAX_DIMENSION, MAX_DIMENSION);
        assert_eq!(
            validate_raster_info(&huge, huge.min_row_bytes()),
            Err(SurfaceError::TooLarge)
        );
    }

    #[test]
    fn clear_writes_borrowed_pixels() {
        let mut pixels = vec![0u8; 2 * 2 * 4];
        let surface = unsafe {
            Surface::from_raw_pixels(rgba(2, 2), pixels.as_mut_ptr(), 8, None).unwrap()
        };
        let generation = surface.generation_id();
        surface.clear(Color::from_argb(0x80, 0xff, 0x00, 0x00));
        assert_ne!(surface.generation_id(), generation);
        drop(surface);
        assert_eq!(&pixels[0..4], &[0x80, 0x00, 0x00, 0x80]);
        assert_eq!(&pixels[12..16], &[0x80, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn null_pixels_rejected() {
        let result = unsafe { Surface::from_raw_pixels(rgba(2, 2), std::ptr::null_mut(), 8, None) };
        assert_eq!(result.unwrap_err(), SurfaceError::NullPixels);
    }

    #[test]
    fn fill_rect_is_clipped() {
        let info = ImageInfo::new(4, 4, ColorType::Alpha8, AlphaType::Premul, None);
        let surface = Surface::new_raster(info.clone(), 0, None).unwrap();
        assert!(surface.owns_pixels());
        surface.fill_rect(RectI::new(Vector2I::new(2, 2), Vector2I::new(10, 10)), Color::WHITE);

        let mut out = vec![0u8; 16];
        assert!(surface.read_pixels(&info, &mut out, 4, 0, 0));
        assert_eq!(
            out,
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 0, 0, 0xff, 0xff]
        );
    }

    #[test]
    fn read_pixels_converts() {
        let surface = Surface::new_raster(rgba(2, 1), 0, None).unwrap();
        surface.clear(Color::from_argb(0xff, 0x10, 0x20, 0x30));

        let bgra = ImageInfo::new(2, 1, ColorType::Bgra8888, AlphaType::Premul, None);
        let mut out = vec![0u8; 8];
        assert!(surface.read_pixels(&bgra, &mut out, 8, 0, 0));
        assert_eq!(&out[0..4], &[0x30, 0x20, 0x10, 0xff]);

        let alpha = ImageInfo::new(2, 1, ColorType::Alpha8, AlphaType::Premul, None);
        let mut out = vec![0u8; 2];
        assert!(surface.read_pixels(&alpha, &mut out, 2, 0, 0));
        assert_eq!(out, vec![0xff, 0xff]);

        let rgb565 = ImageInfo::new(2, 1, ColorType::Rgb565, AlphaType::Opaque, None);
        let mut out = vec![0u8; 4];
        assert!(!surface.read_pixels(&rgb565, &mut out, 4, 0, 0));
    }

    #[test]
    fn read_pixels_rejects_short_destination() {
        let surface = Surface::new_raster(rgba(4, 4), 0, None).unwrap();
        let mut out = vec![0u8; 8];
        assert!(!surface.read_pixels(&rgba(4, 4), &mut out, 16, 0, 0));
    }

    #[test]
    fn opaque_surfaces_ignore_alpha() {
        let info = ImageInfo::new(1, 1, ColorType::Rgb888x, AlphaType::Opaque, None);
        let surface = Surface::new_raster(info.clone(), 0, None).unwrap();
        surface.clear(Color::from_argb(0x00, 0x11, 0x22, 0x33));
        let mut out = vec![0u8; 4];
        assert!(surface.read_pixels(&info, &mut out, 4, 0, 0));
        assert_eq!(out, vec![0x11, 0x22, 0x33, 0xff]);
    }
}
