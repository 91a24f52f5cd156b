//! Validated transaction dataset for one (department, year) key.

use std::collections::{BTreeMap, BTreeSet};

use dvf_model::columns::{
    CODE_POSTAL, LATITUDE, LONGITUDE, NOM_COMMUNE, NUMERIC, REQUIRED, SURFACE_REELLE_BATI,
    TYPE_LOCAL, VALEUR_FONCIERE,
};
use dvf_model::{DatasetKey, PostcodeOption, TransactionRecord};
use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::polars_utils::{float_values, has_column, string_values};

/// Transactions of one department for one year.
///
/// Immutable once built: the cache shares it behind an `Arc`, and derived
/// fields are computed on a copy of [`frame`](Self::frame).
#[derive(Debug, Clone)]
pub struct Dataset {
    key: DatasetKey,
    frame: DataFrame,
}

impl Dataset {
    /// Validate a decoded frame and cast its numeric columns to `Float64`.
    ///
    /// Cells that do not parse as numbers become null.
    pub fn from_frame(key: DatasetKey, mut frame: DataFrame) -> Result<Self> {
        for column in REQUIRED {
            if !has_column(&frame, column) {
                return Err(IngestError::MissingColumn {
                    column: (*column).to_string(),
                    origin: key.to_string(),
                });
            }
        }
        for name in NUMERIC {
            if !has_column(&frame, name) {
                continue;
            }
            let cast = frame.column(name)?.cast(&DataType::Float64)?;
            frame.with_column(cast)?;
        }
        Ok(Self { key, frame })
    }

    pub fn key(&self) -> &DatasetKey {
        &self.key
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Sorted distinct property types, ignoring null and blank cells.
    pub fn property_types(&self) -> Result<Vec<String>> {
        let distinct: BTreeSet<String> = string_values(&self.frame, TYPE_LOCAL)?
            .into_iter()
            .flatten()
            .collect();
        Ok(distinct.into_iter().collect())
    }

    /// Postcode selector entries, sorted by code, each titled with its communes.
    pub fn postcodes(&self) -> Result<Vec<PostcodeOption>> {
        let codes = string_values(&self.frame, CODE_POSTAL)?;
        let communes = if has_column(&self.frame, NOM_COMMUNE) {
            string_values(&self.frame, NOM_COMMUNE)?
        } else {
            vec![None; codes.len()]
        };

        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (code, commune) in codes.into_iter().zip(communes) {
            let Some(code) = code else { continue };
            let entry = grouped.entry(code).or_default();
            if let Some(commune) = commune {
                entry.insert(commune);
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(code, communes)| {
                let communes: Vec<String> = communes.into_iter().collect();
                PostcodeOption::new(code, &communes)
            })
            .collect())
    }

    /// Rows as typed records.
    pub fn records(&self) -> Result<Vec<TransactionRecord>> {
        records_from_frame(&self.frame)
    }
}

/// Read typed records out of any frame with the dataset columns.
///
/// Used both on cached datasets and on normalized working copies.
pub fn records_from_frame(frame: &DataFrame) -> Result<Vec<TransactionRecord>> {
    let height = frame.height();
    let optional_strings = |name: &str| -> Result<Vec<Option<String>>> {
        if has_column(frame, name) {
            Ok(string_values(frame, name)?)
        } else {
            Ok(vec![None; height])
        }
    };
    let optional_floats = |name: &str| -> Result<Vec<Option<f64>>> {
        if has_column(frame, name) {
            Ok(float_values(frame, name)?)
        } else {
            Ok(vec![None; height])
        }
    };

    let types = optional_strings(TYPE_LOCAL)?;
    let prices = optional_floats(VALEUR_FONCIERE)?;
    let areas = optional_floats(SURFACE_REELLE_BATI)?;
    let postcodes = optional_strings(CODE_POSTAL)?;
    let communes = optional_strings(NOM_COMMUNE)?;
    let longitudes = optional_floats(LONGITUDE)?;
    let latitudes = optional_floats(LATITUDE)?;

    let mut records = Vec::with_capacity(height);
    for idx in 0..height {
        let coordinates = match (longitudes[idx], latitudes[idx]) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        };
        records.push(TransactionRecord {
            property_type: types[idx].clone(),
            price: prices[idx],
            built_area: areas[idx],
            postcode: postcodes[idx].clone(),
            commune: communes[idx].clone(),
            coordinates,
        });
    }
    Ok(records)
}
