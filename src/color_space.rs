// canvas-kit/src/color_space.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Color spaces: a transfer function plus a gamut expressed as a matrix to XYZ D50.

use log::debug;
use std::sync::Arc;

/// A parametric transfer function:
///
/// ```text
/// y = (c * x + f)          for x < d
/// y = (a * x + b)^g + e    for x >= d
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransferFunction {
    pub g: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl TransferFunction {
    /// The sRGB curve.
    pub const SRGB: TransferFunction = TransferFunction {
        g: 2.4,
        a: 1.0 / 1.055,
        b: 0.055 / 1.055,
        c: 1.0 / 12.92,
        d: 0.04045,
        e: 0.0,
        f: 0.0,
    };

    /// The identity curve.
    pub const LINEAR: TransferFunction = TransferFunction {
        g: 1.0,
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 0.0,
        f: 0.0,
    };

    /// Evaluates the curve at `x`.
    pub fn eval(&self, x: f32) -> f32 {
        let sign = if x < 0.0 { -1.0 } else { 1.0 };
        let x = x.abs();
        let y = if x < self.d {
            self.c * x + self.f
        } else {
            (self.a * x + self.b).powf(self.g) + self.e
        };
        sign * y
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        *self == TransferFunction::LINEAR
    }
}

/// A row-major 3x3 matrix mapping linear RGB to XYZ D50.
pub type Matrix3x3 = [[f32; 3]; 3];

/// The sRGB primaries adapted to D50.
pub const SRGB_GAMUT: Matrix3x3 = [
    [0.436_065_7, 0.385_151_5, 0.143_078_8],
    [0.222_493_2, 0.716_887_0, 0.060_619_8],
    [0.013_923_9, 0.097_081_1, 0.714_185_2],
];

lazy_static! {
    static ref SRGB: Arc<ColorSpace> = Arc::new(ColorSpace {
        transfer_fn: TransferFunction::SRGB,
        to_xyz_d50: SRGB_GAMUT,
    });
    static ref SRGB_LINEAR: Arc<ColorSpace> = Arc::new(ColorSpace {
        transfer_fn: TransferFunction::LINEAR,
        to_xyz_d50: SRGB_GAMUT,
    });
}

/// A reference-counted description of how pixel values map to colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorSpace {
    transfer_fn: TransferFunction,
    to_xyz_d50: Matrix3x3,
}

impl ColorSpace {
    /// Returns a new reference to the shared sRGB color space.
    #[inline]
    pub fn srgb() -> Arc<ColorSpace> {
        SRGB.clone()
    }

    /// Returns a new reference to the shared linear-sRGB color space.
    #[inline]
    pub fn srgb_linear() -> Arc<ColorSpace> {
        SRGB_LINEAR.clone()
    }

    /// Creates a color space from a transfer function and a gamut.
    ///
    /// Values that describe sRGB or linear sRGB resolve to the shared instances. Returns `None`
    /// if any coefficient is not finite.
    pub fn make_rgb(
        transfer_fn: TransferFunction,
        to_xyz_d50: Matrix3x3,
    ) -> Option<Arc<ColorSpace>> {
        let coefficients = [
            transfer_fn.g,
            transfer_fn.a,
            transfer_fn.b,
            transfer_fn.c,
            transfer_fn.d,
            transfer_fn.e,
            transfer_fn.f,
        ];
        if !coefficients.iter().chain(to_xyz_d50.iter().flatten()).all(|v| v.is_finite()) {
            debug!("rejecting color space with non-finite coefficients");
            return None;
        }
        if to_xyz_d50 == SRGB_GAMUT {
            if transfer_fn == TransferFunction::SRGB {
                return Some(ColorSpace::srgb());
            }
            if transfer_fn.is_linear() {
                return Some(ColorSpace::srgb_linear());
            }
        }
        Some(Arc::new(ColorSpace { transfer_fn, to_xyz_d50 }))
    }

    #[inline]
    pub fn transfer_fn(&self) -> &TransferFunction {
        &self.transfer_fn
    }

    #[inline]
    pub fn to_xyz_d50(&self) -> &Matrix3x3 {
        &self.to_xyz_d50
    }

    /// Returns true if this is exactly sRGB.
    #[inline]
    pub fn is_srgb(&self) -> bool {
        self.transfer_fn == TransferFunction::SRGB && self.to_xyz_d50 == SRGB_GAMUT
    }

    /// Returns true if the transfer function is the identity.
    #[inline]
    pub fn gamma_is_linear(&self) -> bool {
        self.transfer_fn.is_linear()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn srgb_is_shared() {
        let a = ColorSpace::srgb();
        let b = ColorSpace::srgb();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is_srgb());
        assert!(!a.gamma_is_linear());
        assert!(ColorSpace::srgb_linear().gamma_is_linear());
    }

    #[test]
    fn make_rgb_resolves_known_spaces() {
        let space = ColorSpace::make_rgb(TransferFunction::SRGB, SRGB_GAMUT).unwrap();
        assert!(Arc::ptr_eq(&space, &ColorSpace::srgb()));

        let mut gamma = TransferFunction::LINEAR;
        gamma.g = 2.2;
        let custom = ColorSpace::make_rgb(gamma, SRGB_GAMUT).unwrap();
        assert!(!custom.is_srgb());
        assert_eq!(Arc::strong_count(&custom), 1);
    }

    #[test]
    fn make_rgb_rejects_nan() {
        let mut bad = TransferFunction::SRGB;
        bad.a = std::f32::NAN;
        assert!(ColorSpace::make_rgb(bad, SRGB_GAMUT).is_none());
    }

    #[test]
    fn srgb_curve_endpoints() {
        let f = TransferFunction::SRGB;
        assert!(f.eval(0.0).abs() < 1e-6);
        assert!((f.eval(1.0) - 1.0).abs() < 1e-4);
        assert!((TransferFunction::LINEAR.eval(0.25) - 0.25).abs() < 1e-6);
    }
}
