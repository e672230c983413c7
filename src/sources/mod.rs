// canvas-kit/src/sources/mod.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Databases of typefaces that can be queried.
//!
//! `fs` indexes font files found on disk (enabled by the `source-fs` feature); `mem` and `multi`
//! hold application-supplied typefaces and combine sources.

#[cfg(feature = "source-fs")]
pub mod fs;
#[cfg(feature = "source-fs")]
pub use self::fs::FsSource;

pub mod mem;
pub mod multi;

pub use self::mem::MemSource;
pub use self::multi::MultiSource;
