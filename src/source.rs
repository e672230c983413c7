// canvas-kit/src/source.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A database of typefaces that can be queried by family name and style.

use std::sync::Arc;

use crate::error::SelectionError;
use crate::family::Family;
use crate::family_name::FamilyName;
use crate::font_style::FontStyle;
use crate::typeface::Typeface;

/// A database of typefaces.
pub trait Source: Send + Sync {
    /// Returns every typeface in this source.
    fn all_typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError>;

    /// Returns the names of all families, sorted and without duplicates.
    fn all_families(&self) -> Result<Vec<String>, SelectionError>;

    /// Looks up a family by name, ignoring ASCII case.
    fn select_family_by_name(&self, family_name: &str) -> Result<Family, SelectionError>;

    /// Looks up a family, expanding generic names to the usual concrete families.
    fn select_family_by_generic_name(
        &self,
        family_name: &FamilyName,
    ) -> Result<Family, SelectionError> {
        match *family_name {
            FamilyName::Title(ref title) => self.select_family_by_name(title),
            ref generic => {
                for candidate in generic.generic_candidates() {
                    match self.select_family_by_name(candidate) {
                        Ok(family) => return Ok(family),
                        Err(SelectionError::NotFound) => {}
                        Err(error) => return Err(error),
                    }
                }
                Err(SelectionError::NotFound)
            }
        }
    }

    /// Performs font matching according to the CSS Fonts Level 3 specification and returns a new
    /// reference to the winner.
    fn select_best_match(
        &self,
        family_names: &[FamilyName],
        style: &FontStyle,
    ) -> Result<Arc<Typeface>, SelectionError> {
        for family_name in family_names {
            if let Ok(family) = self.select_family_by_generic_name(family_name) {
                if let Ok(typeface) = family.find(style) {
                    return Ok(typeface);
                }
            }
        }
        Err(SelectionError::NotFound)
    }
}
