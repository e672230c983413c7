// canvas-kit/src/font_mgr.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Font managers: reference-counted front ends to a typeface source.

use log::debug;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::error::SelectionError;
use crate::family_name::FamilyName;
use crate::font_style::FontStyle;
use crate::source::Source;
use crate::sources::mem::MemSource;
use crate::typeface::Typeface;

lazy_static! {
    static ref DEFAULT_MGR: Arc<FontMgr> = {
        let mgr = FontMgr::system();
        debug!("default font manager has {} families", mgr.count_families());
        mgr
    };
}

/// Resolves family names and styles to typefaces.
pub struct FontMgr {
    source: Box<dyn Source>,
}

impl FontMgr {
    /// Returns a new reference to the process-wide font manager.
    ///
    /// The first call indexes the configured font directories; without the `source-fs` feature the
    /// default manager is empty.
    #[inline]
    pub fn default_mgr() -> Arc<FontMgr> {
        DEFAULT_MGR.clone()
    }

    #[cfg(feature = "source-fs")]
    fn system() -> Arc<FontMgr> {
        FontMgr::from_source(Box::new(crate::sources::fs::FsSource::new()))
    }

    #[cfg(not(feature = "source-fs"))]
    fn system() -> Arc<FontMgr> {
        FontMgr::from_source(Box::new(MemSource::empty()))
    }

    /// Creates a manager over any source.
    pub fn from_source(source: Box<dyn Source>) -> Arc<FontMgr> {
        Arc::new(FontMgr { source })
    }

    /// Creates a manager that holds a new reference to each of `typefaces`.
    pub fn from_typefaces<I>(typefaces: I) -> Arc<FontMgr>
    where
        I: IntoIterator<Item = Arc<Typeface>>,
    {
        FontMgr::from_source(Box::new(MemSource::from_typefaces(typefaces)))
    }

    /// The number of distinct family names.
    pub fn count_families(&self) -> usize {
        self.family_names().len()
    }

    /// Family names, sorted, or empty if the source can't be read.
    pub fn family_names(&self) -> Vec<String> {
        match self.source.all_families() {
            Ok(families) => families,
            Err(error) => {
                debug!("failed to list families: {}", error);
                vec![]
            }
        }
    }

    /// Returns every typeface this manager knows about.
    pub fn typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError> {
        self.source.all_typefaces()
    }

    /// Returns a new reference to the member of `family_name` closest to `style`, or `None` if the
    /// family isn't present. `None` as the family means sans-serif.
    pub fn match_family_style(
        &self,
        family_name: Option<&FamilyName>,
        style: &FontStyle,
    ) -> Option<Arc<Typeface>> {
        let family_name = family_name.unwrap_or(&FamilyName::SansSerif);
        let family = self.source.select_family_by_generic_name(family_name).ok()?;
        family.find(style).ok()
    }

    /// Resolves a CSS-style family name string. Without a name, falls back from sans-serif to any
    /// typeface at all; an unknown name returns `None`.
    pub fn legacy_make_typeface(
        &self,
        family_name: Option<&str>,
        style: &FontStyle,
    ) -> Option<Arc<Typeface>> {
        match family_name {
            Some(name) => self.match_family_style(Some(&FamilyName::parse(name)), style),
            None => self
                .match_family_style(None, style)
                .or_else(|| self.first_typeface()),
        }
    }

    fn first_typeface(&self) -> Option<Arc<Typeface>> {
        self.source.all_typefaces().ok()?.into_iter().next()
    }
}

impl Debug for FontMgr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMgr")
            .field("families", &self.count_families())
            .finish()
    }
}
