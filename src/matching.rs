// canvas-kit/src/matching.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Picks the face in a family closest to a requested style per CSS Fonts Level 3 § 5.2.
//!
//! https://drafts.csswg.org/css-fonts-3/#font-style-matching

use float_ord::FloatOrd;

use crate::error::SelectionError;
use crate::font_style::{FontStyle, Slant, Weight};

/// Returns the index into `candidates` of the best match for `query`.
pub fn find_best_match(
    candidates: &[FontStyle],
    query: &FontStyle,
) -> Result<usize, SelectionError> {
    let mut matching_set: Vec<usize> = (0..candidates.len()).collect();
    if matching_set.is_empty() {
        return Err(SelectionError::NotFound);
    }

    // Step 4a (`font-stretch`). Narrower first at or below normal, wider first above it.
    let query_stretch = query.width.to_stretch();
    let stretch_of = |index: usize| candidates[index].width.to_stretch();
    let matching_stretch = closest(
        &matching_set,
        query_stretch,
        stretch_of,
        query_stretch <= 1.0,
    );
    matching_set.retain(|&index| stretch_of(index) == matching_stretch);

    // Step 4b (`font-style`).
    let style_preference = match query.slant {
        Slant::Italic => [Slant::Italic, Slant::Oblique, Slant::Upright],
        Slant::Oblique => [Slant::Oblique, Slant::Italic, Slant::Upright],
        Slant::Upright => [Slant::Upright, Slant::Oblique, Slant::Italic],
    };
    let matching_slant = style_preference
        .iter()
        .copied()
        .find(|&slant| matching_set.iter().any(|&index| candidates[index].slant == slant))
        .ok_or(SelectionError::NotFound)?;
    matching_set.retain(|&index| candidates[index].slant == matching_slant);

    // Step 4c (`font-weight`). Between 400 and 500 the other of the pair is tried first; 450 is
    // the cutoff since CSS leaves that range open.
    let has_weight = |weight: Weight| {
        matching_set
            .iter()
            .any(|&index| candidates[index].weight == weight)
    };
    let query_weight = query.weight;
    let matching_weight = if has_weight(query_weight) {
        query_weight
    } else if query_weight >= Weight::NORMAL
        && query_weight < Weight(450)
        && has_weight(Weight::MEDIUM)
    {
        Weight::MEDIUM
    } else if query_weight >= Weight(450)
        && query_weight <= Weight::MEDIUM
        && has_weight(Weight::NORMAL)
    {
        Weight::NORMAL
    } else {
        let weight = closest(
            &matching_set,
            query_weight.0 as f32,
            |index| candidates[index].weight.0 as f32,
            query_weight <= Weight::MEDIUM,
        );
        Weight(weight as i32)
    };
    matching_set.retain(|&index| candidates[index].weight == matching_weight);

    // Step 4d concerns `font-size`; typefaces are unsized.
    matching_set
        .into_iter()
        .next()
        .ok_or(SelectionError::NotFound)
}

// Finds the candidate value nearest `target`, looking first on the preferred side (below the
// target when `prefer_lower`, above otherwise) and then on the other side.
fn closest<F>(set: &[usize], target: f32, value_of: F, prefer_lower: bool) -> f32
where
    F: Fn(usize) -> f32,
{
    if let Some(&index) = set.iter().find(|&&index| value_of(index) == target) {
        return value_of(index);
    }
    let distance = |index: &&usize| FloatOrd((value_of(**index) - target).abs());
    let preferred = set
        .iter()
        .filter(|&&index| (value_of(index) < target) == prefer_lower)
        .min_by_key(distance);
    match preferred.or_else(|| set.iter().min_by_key(distance)) {
        Some(&index) => value_of(index),
        None => target,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::font_style::Width;

    fn style(weight: i32, width: i32, slant: Slant) -> FontStyle {
        FontStyle::new(Weight(weight), Width(width), slant)
    }

    #[test]
    fn empty_is_not_found() {
        assert_eq!(find_best_match(&[], &FontStyle::normal()), Err(SelectionError::NotFound));
    }

    #[test]
    fn exact_match_wins() {
        let family = [
            style(400, 5, Slant::Upright),
            style(700, 5, Slant::Upright),
            style(400, 5, Slant::Italic),
        ];
        assert_eq!(find_best_match(&family, &FontStyle::bold()), Ok(1));
        assert_eq!(find_best_match(&family, &FontStyle::italic()), Ok(2));
    }

    #[test]
    fn oblique_falls_back_to_italic() {
        let family = [style(400, 5, Slant::Upright), style(400, 5, Slant::Italic)];
        let query = FontStyle::normal().slant(Slant::Oblique);
        assert_eq!(find_best_match(&family, &query), Ok(1));
    }

    #[test]
    fn light_weights_look_thinner_first() {
        let family = [
            style(100, 5, Slant::Upright),
            style(400, 5, Slant::Upright),
            style(900, 5, Slant::Upright),
        ];
        assert_eq!(find_best_match(&family, &FontStyle::normal().weight(Weight(300))), Ok(0));
        assert_eq!(find_best_match(&family, &FontStyle::normal().weight(Weight(600))), Ok(2));
    }

    #[test]
    fn weight_400_prefers_500() {
        let family = [style(300, 5, Slant::Upright), style(500, 5, Slant::Upright)];
        assert_eq!(find_best_match(&family, &FontStyle::normal()), Ok(1));
    }

    #[test]
    fn condensed_query_prefers_narrower() {
        let family = [
            style(400, 2, Slant::Upright),
            style(400, 4, Slant::Upright),
            style(400, 7, Slant::Upright),
        ];
        let query = FontStyle::normal().width(Width::CONDENSED);
        assert_eq!(find_best_match(&family, &query), Ok(0));
        let query = FontStyle::normal().width(Width::EXTRA_EXPANDED);
        assert_eq!(find_best_match(&family, &query), Ok(2));
    }
}
