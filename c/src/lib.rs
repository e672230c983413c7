// canvas-kit/c/src/lib.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! C bindings to `canvas-kit`.
//!
//! Pointer parameters and returns are one of:
//!
//! * *owning*: the holder must release it exactly once with the matching `ck_*_unref` (or
//!   `ck_imageinfo_destroy` for the color space inside a `CKImageInfo`);
//! * *borrowed*: valid for the duration of the call only, never released through this pointer;
//! * *placement*: storage the caller allocated, at least `ck_font_sizeof()` bytes aligned to
//!   `ck_font_alignof()`.
//!
//! Factories report failure by returning null. Nothing here logs or keeps error state.

use canvas_kit::color_space::ColorSpace;
use canvas_kit::family_name::FamilyName;
use canvas_kit::font::{Font, FontFlags};
use canvas_kit::font_mgr::FontMgr;
use canvas_kit::font_style::{FontStyle, Slant, Weight, Width};
use canvas_kit::hinting::{FontEdging, FontHinting};
use canvas_kit::image_info::{AlphaType, ColorType, ImageInfo};
use canvas_kit::ownership;
use canvas_kit::placement;
use canvas_kit::surface::{Color, Surface};
use canvas_kit::surface_props::{PixelGeometry, SurfaceProps, SurfacePropsFlags};
use canvas_kit::text_blob::{TextBlob, TextEncoding};
use canvas_kit::typeface::Typeface;
use libc::{c_char, c_void};
use pathfinder_geometry::rect::RectI;
use pathfinder_geometry::vector::Vector2I;
use std::cmp;
use std::ffi::CStr;
use std::mem;
use std::ptr;
use std::slice;
use std::sync::Arc;

pub type CKColorSpaceRef = *const ColorSpace;
pub type CKSurfaceRef = *const Surface;
pub type CKTypefaceRef = *const Typeface;
pub type CKFontMgrRef = *const FontMgr;
pub type CKTextBlobRef = *const TextBlob;
pub type CKFontRef = *mut Font;

pub const CK_COLOR_TYPE_UNKNOWN: u32 = 0;
pub const CK_COLOR_TYPE_ALPHA_8: u32 = 1;
pub const CK_COLOR_TYPE_RGB_565: u32 = 2;
pub const CK_COLOR_TYPE_RGBA_8888: u32 = 3;
pub const CK_COLOR_TYPE_RGB_888X: u32 = 4;
pub const CK_COLOR_TYPE_BGRA_8888: u32 = 5;
pub const CK_COLOR_TYPE_GRAY_8: u32 = 6;

pub const CK_ALPHA_TYPE_UNKNOWN: u32 = 0;
pub const CK_ALPHA_TYPE_OPAQUE: u32 = 1;
pub const CK_ALPHA_TYPE_PREMUL: u32 = 2;
pub const CK_ALPHA_TYPE_UNPREMUL: u32 = 3;

pub const CK_PIXEL_GEOMETRY_UNKNOWN: u32 = 0;
pub const CK_PIXEL_GEOMETRY_RGB_H: u32 = 1;
pub const CK_PIXEL_GEOMETRY_BGR_H: u32 = 2;
pub const CK_PIXEL_GEOMETRY_RGB_V: u32 = 3;
pub const CK_PIXEL_GEOMETRY_BGR_V: u32 = 4;

pub const CK_SLANT_UPRIGHT: u32 = 0;
pub const CK_SLANT_ITALIC: u32 = 1;
pub const CK_SLANT_OBLIQUE: u32 = 2;

pub const CK_TEXT_ENCODING_UTF8: u32 = 0;
pub const CK_TEXT_ENCODING_UTF16: u32 = 1;
pub const CK_TEXT_ENCODING_UTF32: u32 = 2;
pub const CK_TEXT_ENCODING_GLYPH_ID: u32 = 3;

pub const CK_FONT_HINTING_NONE: u32 = 0;
pub const CK_FONT_HINTING_SLIGHT: u32 = 1;
pub const CK_FONT_HINTING_NORMAL: u32 = 2;
pub const CK_FONT_HINTING_FULL: u32 = 3;

pub const CK_FONT_EDGING_ALIAS: u32 = 0;
pub const CK_FONT_EDGING_ANTI_ALIAS: u32 = 1;
pub const CK_FONT_EDGING_SUBPIXEL_ANTI_ALIAS: u32 = 2;

pub const CK_FONT_FLAG_FORCE_AUTO_HINTING: u32 = 1 << 0;
pub const CK_FONT_FLAG_EMBEDDED_BITMAPS: u32 = 1 << 1;
pub const CK_FONT_FLAG_SUBPIXEL: u32 = 1 << 2;
pub const CK_FONT_FLAG_LINEAR_METRICS: u32 = 1 << 3;
pub const CK_FONT_FLAG_EMBOLDEN: u32 = 1 << 4;
pub const CK_FONT_FLAG_BASELINE_SNAP: u32 = 1 << 5;

/// An image descriptor. `color_space` is owning (or null) and is released by
/// `ck_imageinfo_destroy`.
#[repr(C)]
#[derive(Debug)]
pub struct CKImageInfo {
    pub color_space: CKColorSpaceRef,
    pub width: i32,
    pub height: i32,
    pub color_type: u32,
    pub alpha_type: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CKSurfaceProps {
    pub flags: u32,
    pub pixel_geometry: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CKFontStyle {
    pub weight: i32,
    pub width: i32,
    pub slant: u32,
}

/// An integer rectangle; `right` and `bottom` are exclusive.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CKIRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CKRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

// Color spaces

/// Returns an owning pointer to the sRGB color space.
#[no_mangle]
pub extern "C" fn ck_colorspace_make_srgb() -> CKColorSpaceRef {
    ownership::into_owning(ColorSpace::srgb())
}

/// Returns an owning pointer to the linear-transfer sRGB color space.
#[no_mangle]
pub extern "C" fn ck_colorspace_make_srgb_linear() -> CKColorSpaceRef {
    ownership::into_owning(ColorSpace::srgb_linear())
}

/// Takes a new reference. Returns `color_space` itself, now also owning.
#[no_mangle]
pub unsafe extern "C" fn ck_colorspace_ref(color_space: CKColorSpaceRef) -> CKColorSpaceRef {
    ownership::option_into_owning(ownership::retain_borrowed(color_space))
}

/// Consumes an owning pointer.
#[no_mangle]
pub unsafe extern "C" fn ck_colorspace_unref(color_space: CKColorSpaceRef) {
    ownership::release(color_space)
}

#[no_mangle]
pub unsafe extern "C" fn ck_colorspace_ref_count(color_space: CKColorSpaceRef) -> usize {
    ownership::ref_count(color_space)
}

#[no_mangle]
pub unsafe extern "C" fn ck_colorspace_is_srgb(color_space: CKColorSpaceRef) -> bool {
    ownership::borrow(color_space).map_or(false, ColorSpace::is_srgb)
}

// Image descriptors

/// Builds a descriptor by value. Does not take ownership of `color_space`: the descriptor takes
/// its own reference, released by `ck_imageinfo_destroy`. `color_space` may be null.
#[no_mangle]
pub unsafe extern "C" fn ck_imageinfo_make(
    width: i32,
    height: i32,
    color_type: u32,
    alpha_type: u32,
    color_space: CKColorSpaceRef,
) -> CKImageInfo {
    CKImageInfo {
        color_space: ownership::option_into_owning(ownership::retain_borrowed(color_space)),
        width,
        height,
        color_type,
        alpha_type,
    }
}

/// Builds an untagged descriptor for the native 32-bit premultiplied format.
#[no_mangle]
pub extern "C" fn ck_imageinfo_make_n32_premul(width: i32, height: i32) -> CKImageInfo {
    image_info_into_c(ImageInfo::new_n32_premul(width, height))
}

#[no_mangle]
pub unsafe extern "C" fn ck_imageinfo_min_row_bytes(info: *const CKImageInfo) -> usize {
    match image_info_from_c(info) {
        Some(info) => info.min_row_bytes(),
        None => 0,
    }
}

/// Returns 0 if the size overflows.
#[no_mangle]
pub unsafe extern "C" fn ck_imageinfo_compute_byte_size(
    info: *const CKImageInfo,
    row_bytes: usize,
) -> usize {
    image_info_from_c(info)
        .and_then(|info| info.compute_byte_size(row_bytes))
        .unwrap_or(0)
}

/// Releases the descriptor's color space and nulls the field. The descriptor storage itself
/// belongs to the caller.
#[no_mangle]
pub unsafe extern "C" fn ck_imageinfo_destroy(info: *mut CKImageInfo) {
    if let Some(info) = info.as_mut() {
        ownership::release(mem::replace(&mut info.color_space, ptr::null()))
    }
}

// Surface properties

#[no_mangle]
pub extern "C" fn ck_surfaceprops_make(flags: u32, pixel_geometry: u32) -> CKSurfaceProps {
    surface_props_into_c(&surface_props_from_c(&CKSurfaceProps {
        flags,
        pixel_geometry,
    }))
}

// Surfaces

/// Wraps caller-owned pixels. Does not take ownership of `pixels`, which must stay valid for
/// `ck_imageinfo_compute_byte_size(info, row_bytes)` bytes until the surface is released; the
/// buffer length is not checked. `info` is borrowed; the surface takes its own reference to the
/// color space. `props` may be null. Returns an owning pointer, or null if the descriptor is
/// unusable.
#[no_mangle]
pub unsafe extern "C" fn ck_surface_make_raster_direct(
    info: *const CKImageInfo,
    pixels: *mut c_void,
    row_bytes: usize,
    props: *const CKSurfaceProps,
) -> CKSurfaceRef {
    let info = match image_info_from_c(info) {
        Some(info) => info,
        None => return ptr::null(),
    };
    let props = ownership::borrow(props).map(surface_props_from_c);
    ownership::option_into_owning(
        Surface::from_raw_pixels(info, pixels as *mut u8, row_bytes, props.as_ref()).ok(),
    )
}

/// Creates a surface with its own zeroed pixels. A `row_bytes` of 0 picks the minimum.
#[no_mangle]
pub unsafe extern "C" fn ck_surface_make_raster(
    info: *const CKImageInfo,
    row_bytes: usize,
    props: *const CKSurfaceProps,
) -> CKSurfaceRef {
    let info = match image_info_from_c(info) {
        Some(info) => info,
        None => return ptr::null(),
    };
    let props = ownership::borrow(props).map(surface_props_from_c);
    ownership::option_into_owning(Surface::new_raster(info, row_bytes, props.as_ref()).ok())
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_unref(surface: CKSurfaceRef) {
    ownership::release(surface)
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_ref_count(surface: CKSurfaceRef) -> usize {
    ownership::ref_count(surface)
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_width(surface: CKSurfaceRef) -> i32 {
    ownership::borrow(surface).map_or(0, Surface::width)
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_height(surface: CKSurfaceRef) -> i32 {
    ownership::borrow(surface).map_or(0, Surface::height)
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_row_bytes(surface: CKSurfaceRef) -> usize {
    ownership::borrow(surface).map_or(0, Surface::row_bytes)
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_get_props(surface: CKSurfaceRef) -> CKSurfaceProps {
    let props = ownership::borrow(surface).map(|surface| *surface.props()).unwrap_or_default();
    surface_props_into_c(&props)
}

/// The returned descriptor owns a new reference to the color space; pass it to
/// `ck_imageinfo_destroy`.
#[no_mangle]
pub unsafe extern "C" fn ck_surface_get_image_info(surface: CKSurfaceRef) -> CKImageInfo {
    let info = ownership::borrow(surface)
        .map(|surface| surface.image_info().clone())
        .unwrap_or_default();
    image_info_into_c(info)
}

/// `color` is 32-bit ARGB.
#[no_mangle]
pub unsafe extern "C" fn ck_surface_clear(surface: CKSurfaceRef, color: u32) {
    if let Some(surface) = ownership::borrow(surface) {
        surface.clear(Color(color))
    }
}

#[no_mangle]
pub unsafe extern "C" fn ck_surface_fill_rect(
    surface: CKSurfaceRef,
    rect: *const CKIRect,
    color: u32,
) {
    if let (Some(surface), Some(rect)) = (ownership::borrow(surface), ownership::borrow(rect)) {
        let origin = Vector2I::new(rect.left, rect.top);
        let lower_right = Vector2I::new(
            cmp::max(rect.left, rect.right),
            cmp::max(rect.top, rect.bottom),
        );
        surface.fill_rect(RectI::from_points(origin, lower_right), Color(color))
    }
}

/// Copies pixels starting at `(x, y)` into `dst`, which must hold
/// `ck_imageinfo_compute_byte_size(dst_info, dst_row_bytes)` bytes.
#[no_mangle]
pub unsafe extern "C" fn ck_surface_read_pixels(
    surface: CKSurfaceRef,
    dst_info: *const CKImageInfo,
    dst: *mut c_void,
    dst_row_bytes: usize,
    x: i32,
    y: i32,
) -> bool {
    let (surface, dst_info) = match (ownership::borrow(surface), image_info_from_c(dst_info)) {
        (Some(surface), Some(dst_info)) => (surface, dst_info),
        _ => return false,
    };
    let len = match dst_info.compute_byte_size(dst_row_bytes) {
        Some(len) if !dst.is_null() => len,
        _ => return false,
    };
    let dst = slice::from_raw_parts_mut(dst as *mut u8, len);
    surface.read_pixels(&dst_info, dst, dst_row_bytes, x, y)
}

// Typefaces

/// Returns an owning pointer to the default typeface. Every call returns a new reference; the
/// pointers may be equal and each must be released.
#[no_mangle]
pub extern "C" fn ck_typeface_make_default() -> CKTypefaceRef {
    ownership::into_owning(Typeface::make_default())
}

/// Looks up a typeface by family name in the default font manager. A null `family_name` gives the
/// default typeface; an unknown name gives null.
#[no_mangle]
pub unsafe extern "C" fn ck_typeface_make_from_name(
    family_name: *const c_char,
    style: CKFontStyle,
) -> CKTypefaceRef {
    let family_name = if family_name.is_null() {
        None
    } else {
        match CStr::from_ptr(family_name).to_str() {
            Ok(family_name) => Some(family_name),
            Err(_) => return ptr::null(),
        }
    };
    ownership::option_into_owning(Typeface::make_from_name(family_name, &font_style_from_c(style)))
}

/// Copies `bytes`; does not take ownership of them.
#[no_mangle]
pub unsafe extern "C" fn ck_typeface_make_from_data(
    bytes: *const u8,
    len: usize,
    font_index: u32,
) -> CKTypefaceRef {
    if bytes.is_null() {
        return ptr::null();
    }
    let bytes = Arc::new(slice::from_raw_parts(bytes, len).to_vec());
    ownership::option_into_owning(Typeface::from_data(bytes, font_index).ok())
}

#[no_mangle]
pub unsafe extern "C" fn ck_typeface_unref(typeface: CKTypefaceRef) {
    ownership::release(typeface)
}

#[no_mangle]
pub unsafe extern "C" fn ck_typeface_ref_count(typeface: CKTypefaceRef) -> usize {
    ownership::ref_count(typeface)
}

#[no_mangle]
pub unsafe extern "C" fn ck_typeface_unique_id(typeface: CKTypefaceRef) -> u32 {
    ownership::borrow(typeface).map_or(0, Typeface::unique_id)
}

/// Writes the NUL-terminated UTF-8 family name into `buffer`, truncating to `capacity - 1` bytes.
/// Returns the full name length in bytes, excluding the terminator.
#[no_mangle]
pub unsafe extern "C" fn ck_typeface_get_family_name(
    typeface: CKTypefaceRef,
    buffer: *mut c_char,
    capacity: usize,
) -> usize {
    let family_name = match ownership::borrow(typeface) {
        Some(typeface) => typeface.family_name().as_bytes(),
        None => return 0,
    };
    if !buffer.is_null() && capacity > 0 {
        let len = cmp::min(family_name.len(), capacity - 1);
        ptr::copy_nonoverlapping(family_name.as_ptr(), buffer as *mut u8, len);
        *buffer.add(len) = 0;
    }
    family_name.len()
}

#[no_mangle]
pub unsafe extern "C" fn ck_typeface_get_style(typeface: CKTypefaceRef) -> CKFontStyle {
    let style = ownership::borrow(typeface).map(Typeface::style).unwrap_or_default();
    font_style_into_c(style)
}

// Font managers

/// Returns an owning pointer to the process-wide font manager.
#[no_mangle]
pub extern "C" fn ck_fontmgr_ref_default() -> CKFontMgrRef {
    ownership::into_owning(FontMgr::default_mgr())
}

/// Creates a manager over `count` borrowed typefaces, taking a new reference to each. Null
/// entries are skipped.
#[no_mangle]
pub unsafe extern "C" fn ck_fontmgr_make_from_typefaces(
    typefaces: *const CKTypefaceRef,
    count: usize,
) -> CKFontMgrRef {
    let typefaces: &[CKTypefaceRef] = if count == 0 {
        &[]
    } else if typefaces.is_null() {
        return ptr::null();
    } else {
        slice::from_raw_parts(typefaces, count)
    };
    let typefaces: Vec<_> = typefaces
        .iter()
        .filter_map(|&typeface| ownership::retain_borrowed(typeface))
        .collect();
    ownership::into_owning(FontMgr::from_typefaces(typefaces))
}

/// Returns an owning pointer to the closest member of the family, or null. A null `family_name`
/// means sans-serif.
#[no_mangle]
pub unsafe extern "C" fn ck_fontmgr_match_family_style(
    font_mgr: CKFontMgrRef,
    family_name: *const c_char,
    style: CKFontStyle,
) -> CKTypefaceRef {
    let font_mgr = match ownership::borrow(font_mgr) {
        Some(font_mgr) => font_mgr,
        None => return ptr::null(),
    };
    let family_name = if family_name.is_null() {
        None
    } else {
        match CStr::from_ptr(family_name).to_str() {
            Ok(family_name) => Some(FamilyName::parse(family_name)),
            Err(_) => return ptr::null(),
        }
    };
    let style = font_style_from_c(style);
    ownership::option_into_owning(font_mgr.match_family_style(family_name.as_ref(), &style))
}

#[no_mangle]
pub unsafe extern "C" fn ck_fontmgr_count_families(font_mgr: CKFontMgrRef) -> usize {
    ownership::borrow(font_mgr).map_or(0, FontMgr::count_families)
}

#[no_mangle]
pub unsafe extern "C" fn ck_fontmgr_unref(font_mgr: CKFontMgrRef) {
    ownership::release(font_mgr)
}

#[no_mangle]
pub unsafe extern "C" fn ck_fontmgr_ref_count(font_mgr: CKFontMgrRef) -> usize {
    ownership::ref_count(font_mgr)
}

// Fonts

/// Constructs a font in the caller's storage at `dst` and returns `dst`. Does not take ownership
/// of `typeface` (which may be null): the font takes its own reference, released by
/// `ck_font_destroy`. Returns null if `dst` is null.
#[no_mangle]
pub unsafe extern "C" fn ck_font_init(
    dst: CKFontRef,
    typeface: CKTypefaceRef,
    size: f32,
) -> CKFontRef {
    if dst.is_null() {
        return ptr::null_mut();
    }
    placement::construct_at(dst, Font::new(ownership::retain_borrowed(typeface), size))
}

/// Tears down a font built by `ck_font_init`, leaving the storage to the caller. Destroying twice
/// is undefined behavior.
#[no_mangle]
pub unsafe extern "C" fn ck_font_destroy(font: CKFontRef) {
    if !font.is_null() {
        placement::destroy_at(font)
    }
}

#[no_mangle]
pub extern "C" fn ck_font_sizeof() -> usize {
    mem::size_of::<Font>()
}

#[no_mangle]
pub extern "C" fn ck_font_alignof() -> usize {
    mem::align_of::<Font>()
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_get_size(font: *const Font) -> f32 {
    ownership::borrow(font).map_or(0.0, Font::size)
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_set_size(font: CKFontRef, size: f32) {
    if let Some(font) = font.as_mut() {
        font.set_size(size)
    }
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_get_scale_x(font: *const Font) -> f32 {
    ownership::borrow(font).map_or(0.0, Font::scale_x)
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_set_scale_x(font: CKFontRef, scale_x: f32) {
    if let Some(font) = font.as_mut() {
        font.set_scale_x(scale_x)
    }
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_get_skew_x(font: *const Font) -> f32 {
    ownership::borrow(font).map_or(0.0, Font::skew_x)
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_set_skew_x(font: CKFontRef, skew_x: f32) {
    if let Some(font) = font.as_mut() {
        font.set_skew_x(skew_x)
    }
}

/// Returns the `CK_FONT_FLAG_*` bits of the font.
#[no_mangle]
pub unsafe extern "C" fn ck_font_get_flags(font: *const Font) -> u32 {
    ownership::borrow(font).map_or(0, |font| font.flags().bits())
}

/// Replaces the font's flags. Unknown bits are dropped.
#[no_mangle]
pub unsafe extern "C" fn ck_font_set_flags(font: CKFontRef, flags: u32) {
    if let Some(font) = font.as_mut() {
        font.set_flags(FontFlags::from_bits_truncate(flags))
    }
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_get_hinting(font: *const Font) -> u32 {
    ownership::borrow(font).map_or(CK_FONT_HINTING_NONE, |font| font.hinting() as u32)
}

/// Sets one of the `CK_FONT_HINTING_*` values. Returns false, leaving the font unchanged, if the
/// value is unknown or `font` is null.
#[no_mangle]
pub unsafe extern "C" fn ck_font_set_hinting(font: CKFontRef, hinting: u32) -> bool {
    match (font.as_mut(), FontHinting::from_u32(hinting)) {
        (Some(font), Some(hinting)) => {
            font.set_hinting(hinting);
            true
        }
        _ => false,
    }
}

#[no_mangle]
pub unsafe extern "C" fn ck_font_get_edging(font: *const Font) -> u32 {
    ownership::borrow(font).map_or(CK_FONT_EDGING_ALIAS, |font| font.edging() as u32)
}

/// Sets one of the `CK_FONT_EDGING_*` values. Returns false, leaving the font unchanged, if the
/// value is unknown or `font` is null.
#[no_mangle]
pub unsafe extern "C" fn ck_font_set_edging(font: CKFontRef, edging: u32) -> bool {
    match (font.as_mut(), FontEdging::from_u32(edging)) {
        (Some(font), Some(edging)) => {
            font.set_edging(edging);
            true
        }
        _ => false,
    }
}

/// Returns a borrowed pointer to the font's typeface, or null if it has none.
#[no_mangle]
pub unsafe extern "C" fn ck_font_get_typeface(font: *const Font) -> CKTypefaceRef {
    ownership::borrow(font)
        .and_then(Font::typeface)
        .map_or(ptr::null(), ownership::borrow_raw)
}

/// Returns the advance of the text, or 0 if it is malformed for `encoding`.
#[no_mangle]
pub unsafe extern "C" fn ck_font_measure_text(
    font: *const Font,
    text: *const c_void,
    len: usize,
    encoding: u32,
) -> f32 {
    let (font, text, encoding) = match (
        ownership::borrow(font),
        text_bytes(text, len),
        TextEncoding::from_u32(encoding),
    ) {
        (Some(font), Some(text), Some(encoding)) => (font, text, encoding),
        _ => return 0.0,
    };
    font.measure_text(text, encoding).unwrap_or(0.0)
}

// Text blobs

/// Lays out `len` bytes of `text` with `font`; neither is retained past the call, but the blob
/// takes its own reference to the typeface. Returns an owning pointer, or null if `text` or
/// `font` is null or the text is empty or malformed.
#[no_mangle]
pub unsafe extern "C" fn ck_textblob_make_from_text(
    text: *const c_void,
    len: usize,
    font: *const Font,
    encoding: u32,
) -> CKTextBlobRef {
    if text.is_null() {
        return ptr::null();
    }
    match (
        ownership::borrow(font),
        text_bytes(text, len),
        TextEncoding::from_u32(encoding),
    ) {
        (Some(font), Some(text), Some(encoding)) => {
            ownership::option_into_owning(TextBlob::from_text(text, font, encoding).ok())
        }
        _ => ptr::null(),
    }
}

#[no_mangle]
pub unsafe extern "C" fn ck_textblob_unref(text_blob: CKTextBlobRef) {
    ownership::release(text_blob)
}

#[no_mangle]
pub unsafe extern "C" fn ck_textblob_ref_count(text_blob: CKTextBlobRef) -> usize {
    ownership::ref_count(text_blob)
}

#[no_mangle]
pub unsafe extern "C" fn ck_textblob_unique_id(text_blob: CKTextBlobRef) -> u32 {
    ownership::borrow(text_blob).map_or(0, TextBlob::unique_id)
}

#[no_mangle]
pub unsafe extern "C" fn ck_textblob_glyph_count(text_blob: CKTextBlobRef) -> usize {
    ownership::borrow(text_blob).map_or(0, TextBlob::glyph_count)
}

#[no_mangle]
pub unsafe extern "C" fn ck_textblob_get_bounds(text_blob: CKTextBlobRef) -> CKRect {
    match ownership::borrow(text_blob) {
        Some(text_blob) => {
            let bounds = text_blob.bounds();
            CKRect {
                left: bounds.min_x(),
                top: bounds.min_y(),
                right: bounds.max_x(),
                bottom: bounds.max_y(),
            }
        }
        None => CKRect {
            left: 0.0,
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
        },
    }
}

/// Returns a borrowed pointer to the typeface the blob holds.
#[no_mangle]
pub unsafe extern "C" fn ck_textblob_get_typeface(text_blob: CKTextBlobRef) -> CKTypefaceRef {
    ownership::borrow(text_blob)
        .and_then(TextBlob::typeface)
        .map_or(ptr::null(), ownership::borrow_raw)
}

// Conversions

// The returned descriptor holds a new reference to the color space for the duration of the call.
unsafe fn image_info_from_c(info: *const CKImageInfo) -> Option<ImageInfo> {
    let info = ownership::borrow(info)?;
    Some(ImageInfo::new(
        info.width,
        info.height,
        color_type_from_c(info.color_type),
        alpha_type_from_c(info.alpha_type),
        ownership::retain_borrowed(info.color_space),
    ))
}

fn image_info_into_c(info: ImageInfo) -> CKImageInfo {
    CKImageInfo {
        width: info.width,
        height: info.height,
        color_type: color_type_into_c(info.color_type),
        alpha_type: alpha_type_into_c(info.alpha_type),
        color_space: ownership::option_into_owning(info.color_space),
    }
}

fn color_type_from_c(color_type: u32) -> ColorType {
    match color_type {
        CK_COLOR_TYPE_ALPHA_8 => ColorType::Alpha8,
        CK_COLOR_TYPE_RGB_565 => ColorType::Rgb565,
        CK_COLOR_TYPE_RGBA_8888 => ColorType::Rgba8888,
        CK_COLOR_TYPE_RGB_888X => ColorType::Rgb888x,
        CK_COLOR_TYPE_BGRA_8888 => ColorType::Bgra8888,
        CK_COLOR_TYPE_GRAY_8 => ColorType::Gray8,
        _ => ColorType::Unknown,
    }
}

fn color_type_into_c(color_type: ColorType) -> u32 {
    match color_type {
        ColorType::Unknown => CK_COLOR_TYPE_UNKNOWN,
        ColorType::Alpha8 => CK_COLOR_TYPE_ALPHA_8,
        ColorType::Rgb565 => CK_COLOR_TYPE_RGB_565,
        ColorType::Rgba8888 => CK_COLOR_TYPE_RGBA_8888,
        ColorType::Rgb888x => CK_COLOR_TYPE_RGB_888X,
        ColorType::Bgra8888 => CK_COLOR_TYPE_BGRA_8888,
        ColorType::Gray8 => CK_COLOR_TYPE_GRAY_8,
    }
}

fn alpha_type_from_c(alpha_type: u32) -> AlphaType {
    match alpha_type {
        CK_ALPHA_TYPE_OPAQUE => AlphaType::Opaque,
        CK_ALPHA_TYPE_PREMUL => AlphaType::Premul,
        CK_ALPHA_TYPE_UNPREMUL => AlphaType::Unpremul,
        _ => AlphaType::Unknown,
    }
}

fn alpha_type_into_c(alpha_type: AlphaType) -> u32 {
    match alpha_type {
        AlphaType::Unknown => CK_ALPHA_TYPE_UNKNOWN,
        AlphaType::Opaque => CK_ALPHA_TYPE_OPAQUE,
        AlphaType::Premul => CK_ALPHA_TYPE_PREMUL,
        AlphaType::Unpremul => CK_ALPHA_TYPE_UNPREMUL,
    }
}

// Unknown flag bits are dropped.
fn surface_props_from_c(props: &CKSurfaceProps) -> SurfaceProps {
    let pixel_geometry = match props.pixel_geometry {
        CK_PIXEL_GEOMETRY_RGB_H => PixelGeometry::RgbH,
        CK_PIXEL_GEOMETRY_BGR_H => PixelGeometry::BgrH,
        CK_PIXEL_GEOMETRY_RGB_V => PixelGeometry::RgbV,
        CK_PIXEL_GEOMETRY_BGR_V => PixelGeometry::BgrV,
        _ => PixelGeometry::Unknown,
    };
    SurfaceProps::new(SurfacePropsFlags::from_bits_truncate(props.flags), pixel_geometry)
}

fn surface_props_into_c(props: &SurfaceProps) -> CKSurfaceProps {
    CKSurfaceProps {
        flags: props.flags.bits(),
        pixel_geometry: match props.pixel_geometry {
            PixelGeometry::Unknown => CK_PIXEL_GEOMETRY_UNKNOWN,
            PixelGeometry::RgbH => CK_PIXEL_GEOMETRY_RGB_H,
            PixelGeometry::BgrH => CK_PIXEL_GEOMETRY_BGR_H,
            PixelGeometry::RgbV => CK_PIXEL_GEOMETRY_RGB_V,
            PixelGeometry::BgrV => CK_PIXEL_GEOMETRY_BGR_V,
        },
    }
}

fn font_style_from_c(style: CKFontStyle) -> FontStyle {
    let slant = match style.slant {
        CK_SLANT_ITALIC => Slant::Italic,
        CK_SLANT_OBLIQUE => Slant::Oblique,
        _ => Slant::Upright,
    };
    FontStyle::new(Weight(style.weight), Width(style.width), slant).clamped()
}

fn font_style_into_c(style: FontStyle) -> CKFontStyle {
    CKFontStyle {
        weight: style.weight.0,
        width: style.width.0,
        slant: match style.slant {
            Slant::Upright => CK_SLANT_UPRIGHT,
            Slant::Italic => CK_SLANT_ITALIC,
            Slant::Oblique => CK_SLANT_OBLIQUE,
        },
    }
}

unsafe fn text_bytes<'a>(text: *const c_void, len: usize) -> Option<&'a [u8]> {
    if len == 0 {
        Some(&[])
    } else if text.is_null() {
        None
    } else {
        Some(slice::from_raw_parts(text as *const u8, len))
    }
}
