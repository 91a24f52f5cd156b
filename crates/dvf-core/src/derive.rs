//! Price-per-area derivation.
//!
//! Works on a copy of the dataset frame. Rows whose price cannot be derived
//! are kept with a null price and flagged in the `price_undefined` column.

use dvf_ingest::Dataset;
use dvf_ingest::polars_utils::{float_values, has_column, string_values};
use dvf_model::columns::{CODE_POSTAL, PRICE_UNDEFINED, SURFACE_REELLE_BATI, TYPE_LOCAL, VALEUR_FONCIERE};
use polars::prelude::*;

use crate::error::Result;

/// Apply the price toggle to a working copy of `dataset`.
///
/// With `by_area`, `valeur_fonciere` becomes price ÷ `surface_reelle_bati`,
/// null when the area is missing or not positive. Without it the price is
/// left as is. Both modes add the `price_undefined` flag column.
pub fn normalize(dataset: &Dataset, by_area: bool) -> Result<DataFrame> {
    normalize_frame(dataset.frame(), by_area)
}

/// [`normalize`] on a bare frame. The input frame is not modified.
pub fn normalize_frame(frame: &DataFrame, by_area: bool) -> Result<DataFrame> {
    let prices = float_values(frame, VALEUR_FONCIERE)?;

    let (values, undefined): (Vec<Option<f64>>, Vec<bool>) = if by_area {
        let areas = float_values(frame, SURFACE_REELLE_BATI)?;
        prices
            .into_iter()
            .zip(areas)
            .map(|(price, area)| match (price, area) {
                (Some(price), Some(area)) if area > 0.0 => (Some(price / area), false),
                _ => (None, true),
            })
            .unzip()
    } else {
        prices.into_iter().map(|price| (price, price.is_none())).unzip()
    };

    let mut working = frame.clone();
    working.with_column(Series::new(VALEUR_FONCIERE.into(), values))?;
    working.with_column(Series::new(PRICE_UNDEFINED.into(), undefined))?;
    Ok(working)
}

/// Number of rows flagged `price_undefined`.
pub fn undefined_count(frame: &DataFrame) -> Result<usize> {
    if !has_column(frame, PRICE_UNDEFINED) {
        return Ok(0);
    }
    let flags = frame.column(PRICE_UNDEFINED)?.bool()?;
    Ok(flags.into_iter().filter(|flag| *flag == Some(true)).count())
}

/// Rows matching the chosen property type and, if any, postcode.
pub fn filter_selection(
    frame: &DataFrame,
    property_type: Option<&str>,
    postcode: Option<&str>,
) -> Result<DataFrame> {
    let types = string_values(frame, TYPE_LOCAL)?;
    let codes = string_values(frame, CODE_POSTAL)?;
    let mask: Vec<bool> = types
        .iter()
        .zip(&codes)
        .map(|(kind, code)| {
            let type_matches = property_type.is_none_or(|wanted| kind.as_deref() == Some(wanted));
            let code_matches = postcode.is_none_or(|wanted| code.as_deref() == Some(wanted));
            type_matches && code_matches
        })
        .collect();
    let mask = BooleanChunked::from_slice("mask".into(), &mask);
    Ok(frame.filter(&mask)?)
}
