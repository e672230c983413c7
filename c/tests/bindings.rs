// canvas-kit/c/tests/bindings.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Reference counting across the C boundary.
//
// Every test builds its own color spaces and typefaces so that counts aren't disturbed by tests
// running in parallel against the shared singletons. Releasing an owning pointer twice is
// undefined behavior and is never attempted here.

use canvas_kit::color_space::{ColorSpace, TransferFunction, SRGB_GAMUT};
use canvas_kit::font::Font;
use canvas_kit::font_style::FontStyle;
use canvas_kit::ownership;
use canvas_kit::typeface::Typeface;
use canvas_kit_c::*;
use std::ffi::CString;
use std::fs;
use std::mem::{self, MaybeUninit};
use std::ptr;

static TEST_FONT_FILE_PATH: &'static str = "../resources/tests/dejavu/DejaVuSans.ttf";

fn private_color_space() -> CKColorSpaceRef {
    let transfer_fn = TransferFunction {
        g: 2.2,
        ..TransferFunction::LINEAR
    };
    ownership::option_into_owning(ColorSpace::make_rgb(transfer_fn, SRGB_GAMUT))
}

fn private_typeface(family_name: &str) -> CKTypefaceRef {
    ownership::into_owning(Typeface::new_empty(family_name, FontStyle::normal()))
}

fn normal_style() -> CKFontStyle {
    CKFontStyle {
        weight: 400,
        width: 5,
        slant: CK_SLANT_UPRIGHT,
    }
}

#[test]
fn image_info_without_color_space() {
    unsafe {
        let mut info = ck_imageinfo_make(
            100,
            50,
            CK_COLOR_TYPE_RGBA_8888,
            CK_ALPHA_TYPE_PREMUL,
            ptr::null(),
        );
        assert_eq!(info.width, 100);
        assert_eq!(info.height, 50);
        assert!(info.color_space.is_null());
        assert_eq!(ck_imageinfo_min_row_bytes(&info), 400);
        assert_eq!(ck_imageinfo_compute_byte_size(&info, 400), 20_000);
        ck_imageinfo_destroy(&mut info);
        assert!(info.color_space.is_null());
    }
}

#[test]
fn image_info_retains_color_space() {
    unsafe {
        let color_space = private_color_space();
        assert_eq!(ck_colorspace_ref_count(color_space), 1);
        assert!(!ck_colorspace_is_srgb(color_space));

        let mut info = ck_imageinfo_make(
            8,
            8,
            CK_COLOR_TYPE_RGBA_8888,
            CK_ALPHA_TYPE_PREMUL,
            color_space,
        );
        assert_eq!(info.color_space, color_space);
        assert_eq!(ck_colorspace_ref_count(color_space), 2);

        ck_imageinfo_destroy(&mut info);
        assert_eq!(ck_colorspace_ref_count(color_space), 1);
        ck_colorspace_unref(color_space);
    }
}

#[test]
fn color_space_ref_returns_same_pointer() {
    unsafe {
        let color_space = private_color_space();
        let again = ck_colorspace_ref(color_space);
        assert_eq!(again, color_space);
        assert_eq!(ck_colorspace_ref_count(color_space), 2);
        ck_colorspace_unref(again);
        assert_eq!(ck_colorspace_ref_count(color_space), 1);
        ck_colorspace_unref(color_space);

        assert!(ck_colorspace_ref(ptr::null()).is_null());
        assert_eq!(ck_colorspace_ref_count(ptr::null()), 0);
    }
}

#[test]
fn srgb_is_srgb() {
    unsafe {
        let srgb = ck_colorspace_make_srgb();
        let linear = ck_colorspace_make_srgb_linear();
        assert!(ck_colorspace_is_srgb(srgb));
        assert!(!ck_colorspace_is_srgb(linear));
        ck_colorspace_unref(linear);
        ck_colorspace_unref(srgb);
    }
}

#[test]
fn raster_direct_writes_caller_pixels() {
    unsafe {
        let color_space = private_color_space();
        let mut info = ck_imageinfo_make(
            4,
            2,
            CK_COLOR_TYPE_RGBA_8888,
            CK_ALPHA_TYPE_PREMUL,
            color_space,
        );
        let mut pixels = vec![0u8; 32];
        let surface =
            ck_surface_make_raster_direct(&info, pixels.as_mut_ptr() as *mut _, 16, ptr::null());
        assert!(!surface.is_null());
        assert_eq!(ck_surface_ref_count(surface), 1);
        assert_eq!(ck_surface_width(surface), 4);
        assert_eq!(ck_surface_height(surface), 2);
        assert_eq!(ck_surface_row_bytes(surface), 16);
        assert_eq!(ck_surfaceprops_make(0, 0), ck_surface_get_props(surface));

        // The descriptor and the surface each hold a reference.
        assert_eq!(ck_colorspace_ref_count(color_space), 3);
        ck_imageinfo_destroy(&mut info);
        assert_eq!(ck_colorspace_ref_count(color_space), 2);

        ck_surface_clear(surface, 0xff11_2233);
        let rect = CKIRect {
            left: 1,
            top: 1,
            right: 2,
            bottom: 2,
        };
        ck_surface_fill_rect(surface, &rect, 0xff00_0000);
        assert_eq!(&pixels[0..4], &[0x11, 0x22, 0x33, 0xff]);
        assert_eq!(&pixels[20..24], &[0x00, 0x00, 0x00, 0xff]);

        ck_surface_unref(surface);
        assert_eq!(ck_colorspace_ref_count(color_space), 1);
        ck_colorspace_unref(color_space);
    }
}

#[test]
fn raster_direct_optional_and_required_inputs() {
    unsafe {
        let info = ck_imageinfo_make(2, 2, CK_COLOR_TYPE_GRAY_8, CK_ALPHA_TYPE_OPAQUE, ptr::null());
        let mut pixels = [0u8; 4];
        let props = ck_surfaceprops_make(1, CK_PIXEL_GEOMETRY_RGB_H);

        let surface =
            ck_surface_make_raster_direct(&info, pixels.as_mut_ptr() as *mut _, 2, &props);
        assert!(!surface.is_null());
        assert_eq!(ck_surface_get_props(surface), props);
        ck_surface_unref(surface);

        let no_pixels = ck_surface_make_raster_direct(&info, ptr::null_mut(), 2, ptr::null());
        assert!(no_pixels.is_null());
        let pixels = pixels.as_mut_ptr() as *mut _;
        assert!(ck_surface_make_raster_direct(ptr::null(), pixels, 2, ptr::null()).is_null());
        assert!(ck_surface_make_raster_direct(&info, pixels, 1, ptr::null()).is_null());

        // A buffer smaller than `row_bytes * height` can't be detected: a 100x50 RGBA descriptor
        // with `row_bytes` 400 over a short buffer is accepted, and drawing into it is undefined
        // behavior. Callers own that guarantee, so the case is never exercised here.
    }
}

#[test]
fn raster_surface_reads_back() {
    unsafe {
        let info = ck_imageinfo_make(
            3,
            3,
            CK_COLOR_TYPE_BGRA_8888,
            CK_ALPHA_TYPE_PREMUL,
            ptr::null(),
        );
        let surface = ck_surface_make_raster(&info, 0, ptr::null());
        assert!(!surface.is_null());
        assert_eq!(ck_surface_row_bytes(surface), 12);
        ck_surface_clear(surface, 0x80ff_0000);

        let mut image_info = ck_surface_get_image_info(surface);
        assert_eq!(image_info.color_type, CK_COLOR_TYPE_BGRA_8888);
        assert_eq!(image_info.width, 3);
        ck_imageinfo_destroy(&mut image_info);

        let dst_info =
            ck_imageinfo_make(2, 2, CK_COLOR_TYPE_ALPHA_8, CK_ALPHA_TYPE_PREMUL, ptr::null());
        let mut alpha = [0u8; 4];
        assert!(ck_surface_read_pixels(
            surface,
            &dst_info,
            alpha.as_mut_ptr() as *mut _,
            2,
            1,
            1
        ));
        assert_eq!(alpha, [0x80; 4]);
        assert!(!ck_surface_read_pixels(
            surface,
            &dst_info,
            ptr::null_mut(),
            2,
            0,
            0
        ));
        ck_surface_unref(surface);
    }
}

#[test]
fn default_typeface_twice() {
    let first = ck_typeface_make_default();
    let second = ck_typeface_make_default();
    assert!(!first.is_null());
    assert_eq!(first, second);
    unsafe {
        assert!(ck_typeface_ref_count(first) >= 3);
        ck_typeface_unref(first);
        ck_typeface_unref(second);

        let third = ck_typeface_make_default();
        assert!(ck_typeface_ref_count(third) >= 2);
        ck_typeface_unref(third);
    }
}

#[test]
fn typeface_from_name() {
    unsafe {
        let default = ck_typeface_make_from_name(ptr::null(), normal_style());
        assert!(!default.is_null());
        ck_typeface_unref(default);

        let name = CString::new("No Such Family 9b1c").unwrap();
        assert!(ck_typeface_make_from_name(name.as_ptr(), normal_style()).is_null());
        assert!(ck_typeface_make_from_data(ptr::null(), 0, 0).is_null());
        let garbage = [0u8; 16];
        assert!(ck_typeface_make_from_data(garbage.as_ptr(), garbage.len(), 0).is_null());
    }
}

#[test]
fn typeface_family_name_is_truncated() {
    unsafe {
        let typeface = private_typeface("Alpha");
        let mut buffer = [0x7f as libc::c_char; 4];
        assert_eq!(ck_typeface_get_family_name(typeface, buffer.as_mut_ptr(), 4), 5);
        let expected = [b'A', b'l', b'p', 0].map(|byte| byte as libc::c_char);
        assert_eq!(buffer, expected);
        assert_eq!(ck_typeface_get_family_name(typeface, ptr::null_mut(), 0), 5);
        assert_eq!(ck_typeface_get_style(typeface), normal_style());
        assert_ne!(ck_typeface_unique_id(typeface), 0);
        ck_typeface_unref(typeface);
    }
}

#[test]
fn font_placement_round_trip() {
    assert_eq!(ck_font_sizeof(), mem::size_of::<Font>());
    assert_eq!(ck_font_alignof(), mem::align_of::<Font>());
    unsafe {
        let typeface = private_typeface("Placed");
        let mut storage = MaybeUninit::<Font>::uninit();

        let font = ck_font_init(storage.as_mut_ptr(), typeface, 14.0);
        assert_eq!(font, storage.as_mut_ptr());
        assert_eq!(ck_typeface_ref_count(typeface), 2);
        assert_eq!(ck_font_get_typeface(font), typeface);
        assert_eq!(ck_font_get_size(font), 14.0);
        ck_font_set_size(font, -1.0);
        assert_eq!(ck_font_get_size(font), 0.0);

        ck_font_destroy(font);
        assert_eq!(ck_typeface_ref_count(typeface), 1);

        // The storage can take another font.
        let font = ck_font_init(storage.as_mut_ptr(), typeface, 9.0);
        assert_eq!(ck_typeface_ref_count(typeface), 2);
        ck_font_destroy(font);
        assert_eq!(ck_typeface_ref_count(typeface), 1);
        ck_typeface_unref(typeface);
    }
}

#[test]
fn font_without_typeface() {
    unsafe {
        let mut storage = MaybeUninit::<Font>::uninit();
        let font = ck_font_init(storage.as_mut_ptr(), ptr::null(), 12.0);
        assert!(!font.is_null());
        assert!(ck_font_get_typeface(font).is_null());
        assert_eq!(ck_font_get_size(font), 12.0);
        ck_font_destroy(font);

        assert!(ck_font_init(ptr::null_mut(), ptr::null(), 12.0).is_null());
    }
}

#[test]
fn text_blob_retains_typeface() {
    unsafe {
        let typeface = private_typeface("Blob");
        let mut storage = MaybeUninit::<Font>::uninit();
        let font = ck_font_init(storage.as_mut_ptr(), typeface, 12.0);

        let text = "hello";
        let blob = ck_textblob_make_from_text(
            text.as_ptr() as *const _,
            text.len(),
            font,
            CK_TEXT_ENCODING_UTF8,
        );
        assert!(!blob.is_null());
        assert_eq!(ck_textblob_ref_count(blob), 1);
        assert_eq!(ck_typeface_ref_count(typeface), 3);
        assert_eq!(ck_textblob_get_typeface(blob), typeface);
        assert_eq!(ck_textblob_glyph_count(blob), 5);
        assert_ne!(ck_textblob_unique_id(blob), 0);
        let width = ck_font_measure_text(
            font,
            text.as_ptr() as *const _,
            text.len(),
            CK_TEXT_ENCODING_UTF8,
        );
        assert_eq!(width, 0.0);

        ck_font_destroy(font);
        assert_eq!(ck_typeface_ref_count(typeface), 2);
        let bounds = ck_textblob_get_bounds(blob);
        assert_eq!(bounds.left, 0.0);
        ck_textblob_unref(blob);
        assert_eq!(ck_typeface_ref_count(typeface), 1);
        ck_typeface_unref(typeface);
    }
}

#[test]
fn text_blob_with_font_data() {
    unsafe {
        let bytes = fs::read(TEST_FONT_FILE_PATH).unwrap();
        let typeface = ck_typeface_make_from_data(bytes.as_ptr(), bytes.len(), 0);
        assert!(!typeface.is_null());
        drop(bytes);
        assert_eq!(ck_typeface_get_style(typeface), normal_style());
        let mut name = [0 as libc::c_char; 32];
        assert_eq!(ck_typeface_get_family_name(typeface, name.as_mut_ptr(), name.len()), 11);

        let mut storage = MaybeUninit::<Font>::uninit();
        let font = ck_font_init(storage.as_mut_ptr(), typeface, 20.0);
        let text = "Hello";
        let width = ck_font_measure_text(
            font,
            text.as_ptr() as *const _,
            text.len(),
            CK_TEXT_ENCODING_UTF8,
        );
        // 5191 design units at 20 / 2048 pixels each.
        assert_eq!(width, 5191.0 * 20.0 / 2048.0);

        let blob = ck_textblob_make_from_text(
            text.as_ptr() as *const _,
            text.len(),
            font,
            CK_TEXT_ENCODING_UTF8,
        );
        ck_font_destroy(font);
        assert_eq!(ck_textblob_glyph_count(blob), 5);
        let bounds = ck_textblob_get_bounds(blob);
        assert_eq!(bounds.left, 0.0);
        assert_eq!(bounds.right, width);
        assert_eq!(bounds.top, -1901.0 * 20.0 / 2048.0);
        assert_eq!(bounds.bottom, 483.0 * 20.0 / 2048.0);

        ck_textblob_unref(blob);
        assert_eq!(ck_typeface_ref_count(typeface), 1);
        ck_typeface_unref(typeface);
    }
}

#[test]
fn font_rendering_settings() {
    unsafe {
        let mut storage = MaybeUninit::<Font>::uninit();
        let font = ck_font_init(storage.as_mut_ptr(), ptr::null(), 12.0);
        assert_eq!(ck_font_get_hinting(font), CK_FONT_HINTING_NORMAL);
        assert_eq!(ck_font_get_edging(font), CK_FONT_EDGING_ANTI_ALIAS);
        assert_eq!(ck_font_get_flags(font), CK_FONT_FLAG_BASELINE_SNAP);
        assert_eq!((ck_font_get_scale_x(font), ck_font_get_skew_x(font)), (1.0, 0.0));

        assert!(ck_font_set_hinting(font, CK_FONT_HINTING_SLIGHT));
        assert!(!ck_font_set_hinting(font, 4));
        assert_eq!(ck_font_get_hinting(font), CK_FONT_HINTING_SLIGHT);
        assert!(ck_font_set_edging(font, CK_FONT_EDGING_SUBPIXEL_ANTI_ALIAS));
        assert!(!ck_font_set_edging(font, 3));
        assert_eq!(ck_font_get_edging(font), CK_FONT_EDGING_SUBPIXEL_ANTI_ALIAS);

        ck_font_set_flags(font, CK_FONT_FLAG_EMBOLDEN | CK_FONT_FLAG_SUBPIXEL | 1 << 31);
        assert_eq!(ck_font_get_flags(font), CK_FONT_FLAG_EMBOLDEN | CK_FONT_FLAG_SUBPIXEL);
        ck_font_set_scale_x(font, 1.5);
        ck_font_set_skew_x(font, -0.25);
        assert_eq!((ck_font_get_scale_x(font), ck_font_get_skew_x(font)), (1.5, -0.25));

        ck_font_destroy(font);
        assert!(!ck_font_set_hinting(ptr::null_mut(), CK_FONT_HINTING_NONE));
    }
}

#[test]
fn text_blob_requires_text_and_font() {
    unsafe {
        let typeface = private_typeface("Required");
        let mut storage = MaybeUninit::<Font>::uninit();
        let font = ck_font_init(storage.as_mut_ptr(), typeface, 12.0);
        let text = "x".as_ptr() as *const _;
        let utf8 = CK_TEXT_ENCODING_UTF8;

        assert!(ck_textblob_make_from_text(text, 1, ptr::null(), utf8).is_null());
        assert!(ck_textblob_make_from_text(ptr::null(), 0, font, utf8).is_null());
        assert!(ck_textblob_make_from_text(text, 0, font, utf8).is_null());
        assert!(ck_textblob_make_from_text(text, 1, font, 99).is_null());
        let odd = [0u8; 3];
        let odd = odd.as_ptr() as *const _;
        assert!(ck_textblob_make_from_text(odd, 3, font, CK_TEXT_ENCODING_UTF16).is_null());
        assert_eq!(ck_typeface_ref_count(typeface), 2);

        ck_font_destroy(font);
        ck_typeface_unref(typeface);
    }
}

#[test]
fn font_manager_retains_typefaces() {
    unsafe {
        let alpha = private_typeface("Alpha");
        let beta = private_typeface("Beta");
        let typefaces = [alpha, beta, ptr::null()];

        let font_mgr = ck_fontmgr_make_from_typefaces(typefaces.as_ptr(), typefaces.len());
        assert!(!font_mgr.is_null());
        assert_eq!(ck_fontmgr_ref_count(font_mgr), 1);
        assert_eq!(ck_fontmgr_count_families(font_mgr), 2);
        assert_eq!(ck_typeface_ref_count(alpha), 2);
        assert_eq!(ck_typeface_ref_count(beta), 2);

        let name = CString::new("alpha").unwrap();
        let matched = ck_fontmgr_match_family_style(font_mgr, name.as_ptr(), normal_style());
        assert_eq!(matched, alpha);
        assert_eq!(ck_typeface_ref_count(alpha), 3);
        ck_typeface_unref(matched);

        let missing = CString::new("Gamma").unwrap();
        let unmatched = ck_fontmgr_match_family_style(font_mgr, missing.as_ptr(), normal_style());
        assert!(unmatched.is_null());

        ck_fontmgr_unref(font_mgr);
        assert_eq!(ck_typeface_ref_count(alpha), 1);
        assert_eq!(ck_typeface_ref_count(beta), 1);
        ck_typeface_unref(alpha);
        ck_typeface_unref(beta);

        let empty = ck_fontmgr_make_from_typefaces(ptr::null(), 0);
        assert_eq!(ck_fontmgr_count_families(empty), 0);
        ck_fontmgr_unref(empty);
        assert!(ck_fontmgr_make_from_typefaces(ptr::null(), 1).is_null());
    }
}

#[test]
fn default_font_manager_is_shared() {
    let first = ck_fontmgr_ref_default();
    let second = ck_fontmgr_ref_default();
    assert_eq!(first, second);
    unsafe {
        ck_fontmgr_unref(first);
        ck_fontmgr_unref(second);
    }
}
