// canvas-kit/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `canvas-kit` is a small 2D graphics object model built for exposure through a flat C interface.
//!
//! Objects fall into three groups:
//!
//! * Reference-counted entities, shared through `Arc`: `ColorSpace`, `Surface`, `Typeface`,
//!   `FontMgr` and `TextBlob`.
//!
//! * Value descriptors, copied or moved freely: `ImageInfo`, `SurfaceProps` and `FontStyle`.
//!
//! * Inline value objects, which may live in storage owned by somebody else: `Font`.
//!
//! The `ownership` and `placement` modules contain the raw-pointer conversions a foreign caller
//! needs for each group; the `canvas-kit-c` crate builds the C interface on top of them.
//!
//! Typefaces are discovered on disk by the default font manager when the `source-fs` feature is
//! enabled (the default). Set `CANVAS_KIT_FONT_DIRS` to a path list to choose the directories.

#![warn(missing_debug_implementations)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;

pub mod color_space;
pub mod error;
pub mod family;
pub mod family_name;
pub mod font;
pub mod font_mgr;
pub mod font_style;
pub mod hinting;
pub mod image_info;
pub mod matching;
pub mod ownership;
pub mod placement;
pub mod source;
pub mod sources;
pub mod surface;
pub mod surface_props;
pub mod text_blob;
pub mod typeface;
