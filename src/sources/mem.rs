// canvas-kit/src/sources/mem.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A source that keeps typefaces in memory.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::SelectionError;
use crate::family::Family;
use crate::source::Source;
use crate::typeface::Typeface;

/// A source that keeps typefaces in memory, sorted by family name.
#[derive(Clone, Debug, Default)]
pub struct MemSource {
    families: Vec<FamilyEntry>,
}

impl MemSource {
    /// Creates an empty source.
    #[inline]
    pub fn empty() -> MemSource {
        MemSource::default()
    }

    /// Creates a source holding a new reference to each typeface.
    pub fn from_typefaces<I>(typefaces: I) -> MemSource
    where
        I: IntoIterator<Item = Arc<Typeface>>,
    {
        let mut families: Vec<FamilyEntry> = typefaces
            .into_iter()
            .map(|typeface| FamilyEntry {
                folded_name: typeface.family_name().to_ascii_lowercase(),
                typeface,
            })
            .collect();
        families.sort_by(|a, b| a.folded_name.cmp(&b.folded_name));
        MemSource { families }
    }

    /// Adds a typeface, keeping the families sorted.
    pub fn add_typeface(&mut self, typeface: Arc<Typeface>) {
        let folded_name = typeface.family_name().to_ascii_lowercase();
        let index = match self
            .families
            .binary_search_by(|family| family.folded_name.cmp(&folded_name).then(Ordering::Less))
        {
            Ok(index) | Err(index) => index,
        };
        self.families.insert(
            index,
            FamilyEntry {
                folded_name,
                typeface,
            },
        );
    }

    /// Returns the number of typefaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn all_typefaces(&self) -> Result<Vec<Arc<Typeface>>, SelectionError> {
        Ok(self.families.iter().map(|family| family.typeface.clone()).collect())
    }

    pub fn all_families(&self) -> Result<Vec<String>, SelectionError> {
        let mut names: Vec<String> = Vec::new();
        let mut previous: Option<&str> = None;
        for family in &self.families {
            if previous != Some(family.folded_name.as_str()) {
                names.push(family.typeface.family_name().to_owned());
                previous = Some(family.folded_name.as_str());
            }
        }
        Ok(names)
    }

    pub fn select_family_by_name(&self, family_name: &str) -> Result<Family, SelectionError> {
        let folded_name = family_name.to_ascii_lowercase();
        let mut first_family_index = self
            .families
            .binary_search_by(|family| family.folded_name.cmp(&folded_name))
            .map_err(|_| SelectionError::NotFound)?;

        while first_family_index > 0
            && self.families[first_family_index - 1].folded_name == folded_name
        {
            first_family_index -= 1
        }
        let mut last_family_index = first_family_index;
        while last_family_index + 1 < self.families.len()
            && self.families[last_family_index + 1].folded_name == folded_name
        {
            last_family_index += 1
        }

        let families = &self.families[first_family_index..(last_family_index + 1)];
        Ok(Family::from_typefaces(
            families.iter().map(|family| family.typeface.clone()),
        ))
    }
}

impl Source for MemSource {
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

#[derive(Clone, Debug)]
struct FamilyEntry {
    folded_name: String,
    typeface: Arc<Typeface>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::font_style::FontStyle;

    #[test]
    fn families_are_case_insensitive_and_grouped() {
        let source = MemSource::from_typefaces(vec![
            Typeface::new_empty("Beta", FontStyle::normal()),
            Typeface::new_empty("alpha", FontStyle::normal()),
            Typeface::new_empty("Alpha", FontStyle::bold()),
        ]);
        assert_eq!(source.all_families().unwrap().len(), 2);
        let family = source.select_family_by_name("ALPHA").unwrap();
        assert_eq!(family.typefaces().len(), 2);
        assert_eq!(
            source.select_family_by_name("Gamma").unwrap_err(),
            SelectionError::NotFound
        );
    }

    #[test]
    fn holds_a_reference() {
        let typeface = Typeface::new_empty("Held", FontStyle::normal());
        let mut source = MemSource::empty();
        source.add_typeface(typeface.clone());
        assert_eq!(Arc::strong_count(&typeface), 2);
        drop(source);
        assert_eq!(Arc::strong_count(&typeface), 1);
    }

    #[test]
    fn add_keeps_order() {
        let mut source = MemSource::empty();
        for name in &["c", "a", "b", "a"] {
            source.add_typeface(Typeface::new_empty(name, FontStyle::normal()));
        }
        assert_eq!(source.all_families().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(source.select_family_by_name("a").unwrap().typefaces().len(), 2);
    }
}
