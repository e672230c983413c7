// canvas-kit/src/surface_props.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Display properties that influence how a surface renders text and edges.

bitflags! {
    /// Behavior switches for a surface.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SurfacePropsFlags: u32 {
        /// Lay text out with device-independent metrics.
        const USE_DEVICE_INDEPENDENT_FONTS = 0x01;
        /// Allow multisampling to be turned on and off per draw.
        const DYNAMIC_MSAA = 0x02;
        /// Dither every gradient and image draw.
        const ALWAYS_DITHER = 0x04;
    }
}

/// The physical arrangement of subpixels on the display the surface targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelGeometry {
    /// Unknown or not applicable; subpixel antialiasing is disabled.
    Unknown,
    /// Horizontal stripes, red first.
    RgbH,
    /// Horizontal stripes, blue first.
    BgrH,
    /// Vertical stripes, red first.
    RgbV,
    /// Vertical stripes, blue first.
    BgrV,
}

impl Default for PixelGeometry {
    fn default() -> PixelGeometry {
        PixelGeometry::Unknown
    }
}

impl PixelGeometry {
    /// Returns true if the subpixels run horizontally.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self == PixelGeometry::RgbH || self == PixelGeometry::BgrH
    }
}

/// Display properties of a surface.
///
/// This is a plain value; surfaces copy it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceProps {
    /// Behavior switches.
    pub flags: SurfacePropsFlags,
    /// Subpixel layout.
    pub pixel_geometry: PixelGeometry,
}

impl SurfaceProps {
    #[inline]
    pub fn new(flags: SurfacePropsFlags, pixel_geometry: PixelGeometry) -> SurfaceProps {
        SurfaceProps {
            flags,
            pixel_geometry,
        }
    }

    /// Returns true if text should use device-independent metrics.
    #[inline]
    pub fn is_use_device_independent_fonts(&self) -> bool {
        self.flags.contains(SurfacePropsFlags::USE_DEVICE_INDEPENDENT_FONTS)
    }
}
