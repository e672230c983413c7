// canvas-kit/src/sources/multi.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A source that encapsulates multiple sources and allows them to be queried as a group.
//!
//! This is useful when an application wants the installed typefaces plus some
//! application-supplied ones, with the application's taking precedence.

use std::sync::Arc;

use crate::error::SelectionError;
use crate::family::Family;
use crate::source::Source;
use crate::typeface::Typeface;

/// A source that encapsulates multiple sources and allows them to be queried as a group.
///
/// Earlier subsources shadow later ones for family lookups.
#[allow(missing_debug_implementations)]
pub struct MultiSource {
    subsources: Vec<Box<dyn Source>>,
}

impl MultiSource {
    /// Creates a new source that contains all the typefaces in the supplied sources.
    pub fn from_sources(subsources: Vec<Box<dyn Source>>) -> MultiSource {
        MultiSource { subsources }
    }

    pub fn all_typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError> {
        let mut typefaces = vec![];
        for subsource in &self.subsources {
            typefaces.extend(subsource.all_typefaces()?.into_iter())
        }
        Ok(typefaces)
    }

    pub fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        let mut families = vec![];
        for subsource in &self.subsources {
            families.extend(subsource.all_families()?.into_iter())
        }
        families.sort_by_key(|name| name.to_ascii_lowercase());
        families.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        Ok(families)
    }

    pub fn select_family_by_name(&self, family_name: &str) -> Result<Family, SelectionError> {
        for subsource in &self.subsources {
            match subsource.select_family_by_name(family_name) {
                Ok(family) => return Ok(family),
                Err(SelectionError::NotFound) => {}
                Err(err) => return Err(err),
            }
        }
        Err(SelectionError::NotFound)
    }
}

impl Source for MultiSource {
    #[inline]
    fn all_typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError> {
        self.all_typefaces()
    }

    #[inline]
    fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        self.all_families()
    }

    #[inline]
    fn select_family_by_name(&self, family_name: &str) -> Result<Family, SelectionError> {
        self.select_family_by_name(family_name)
    }
}
