// canvas-kit/src/family.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Defines a set of typefaces that vary in weight, width or slant.

use std::sync::Arc;

use crate::error::SelectionError;
use crate::font_style::FontStyle;
use crate::matching;
use crate::typeface::Typeface;

/// Defines a set of typefaces that vary in weight, width or slant.
#[derive(Clone, Debug, Default)]
pub struct Family {
    typefaces: Vec<Arc<Typeface>>,
}

impl Family {
    /// Creates an empty family.
    #[inline]
    pub fn new() -> Family {
        Family::default()
    }

    #[inline]
    pub fn from_typefaces<I>(typefaces: I) -> Family
    where
        I: IntoIterator<Item = Arc<Typeface>>,
    {
        Family {
            typefaces: typefaces.into_iter().collect(),
        }
    }

    /// Adds a typeface to this family.
    #[inline]
    pub fn push(&mut self, typeface: Arc<Typeface>) {
        self.typefaces.push(typeface)
    }

    /// Returns the individual typefaces in this family.
    #[inline]
    pub fn typefaces(&self) -> &[Arc<Typeface>] {
        &self.typefaces
    }

    /// Returns true if and only if this family is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.typefaces.is_empty()
    }

    /// Returns a new reference to the member closest to `style`.
    pub fn find(&self, style: &FontStyle) -> Result<Arc<Typeface>, SelectionError> {
        let candidates: Vec<FontStyle> = self
            .typefaces
            .iter()
            .map(|typeface| typeface.style())
            .collect();
        let index = matching::find_best_match(&candidates, style)?;
        Ok(self.typefaces[index].clone())
    }
}
