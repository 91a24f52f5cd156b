//! Selection cascade: department → year → property type → postcode.
//!
//! Two pure steps. [`handle_selection_change`] applies one user input to the
//! previous state. [`reconcile`] checks the result against the dataset of the
//! selected key and produces the view handed to the rendering layer.

use std::collections::BTreeSet;

use dvf_ingest::{DatasetLookup, UnavailableReason};
use dvf_model::{ChartId, DatasetKey, PostcodeOption, SelectionChange, SelectionState};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::derive::{filter_selection, normalize, undefined_count};
use crate::error::Result;

/// Apply one selection change.
///
/// A department different from the previously recorded one clears the
/// postcode and its title, then becomes the recorded department.
pub fn handle_selection_change(mut state: SelectionState, change: SelectionChange) -> SelectionState {
    debug!(field = %change.field(), "selection change");
    match change {
        SelectionChange::Department(department) => {
            if state.previous_department.as_ref() != Some(&department) {
                state.clear_postcode();
            }
            state.previous_department = Some(department.clone());
            state.department = department;
        }
        SelectionChange::Year(year) => state.year = year,
        SelectionChange::PropertyType(property_type) => state.property_type = Some(property_type),
        SelectionChange::Postcode(Some(postcode)) => {
            if state.postcode.as_deref() != Some(postcode.as_str()) {
                state.postcode_title = None;
            }
            state.postcode = Some(postcode);
        }
        SelectionChange::Postcode(None) => state.clear_postcode(),
        SelectionChange::NormalizeByArea(enabled) => state.normalize_by_area = enabled,
        SelectionChange::Charts(charts) => state.charts = charts,
    }
    state
}

/// What the rendering layer receives.
#[derive(Debug, Clone)]
pub enum SelectionView {
    /// The key has no dataset: no selector options, nothing to plot.
    NoData {
        key: DatasetKey,
        reason: UnavailableReason,
        year_options: Vec<String>,
    },
    Ready(ReadyView),
}

/// Prepared dataset and selector options for an available key.
#[derive(Debug, Clone)]
pub struct ReadyView {
    pub key: DatasetKey,
    /// Whole dataset with the price toggle applied.
    pub frame: DataFrame,
    pub year_options: Vec<String>,
    pub property_types: Vec<String>,
    pub property_type: String,
    pub postcodes: Vec<PostcodeOption>,
    pub postcode: Option<PostcodeOption>,
    pub normalize_by_area: bool,
    pub charts: BTreeSet<ChartId>,
    /// Rows whose price could not be derived.
    pub undefined_prices: usize,
}

impl ReadyView {
    /// Rows of the selected property type and postcode.
    pub fn selection_frame(&self) -> Result<DataFrame> {
        filter_selection(
            &self.frame,
            Some(self.property_type.as_str()),
            self.postcode.as_ref().map(|option| option.code.as_str()),
        )
    }
}

impl SelectionView {
    pub fn key(&self) -> &DatasetKey {
        match self {
            Self::NoData { key, .. } => key,
            Self::Ready(view) => &view.key,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            Self::Ready(view) => Some(view),
            Self::NoData { .. } => None,
        }
    }

    pub fn property_type_options(&self) -> &[String] {
        match self {
            Self::Ready(view) => &view.property_types,
            Self::NoData { .. } => &[],
        }
    }

    pub fn postcode_options(&self) -> &[PostcodeOption] {
        match self {
            Self::Ready(view) => &view.postcodes,
            Self::NoData { .. } => &[],
        }
    }

    /// Plain summary of the view, for logs and JSON output.
    pub fn summary(&self) -> ViewSummary {
        match self {
            Self::NoData { key, reason, .. } => ViewSummary {
                key: key.to_string(),
                available: false,
                message: Some(reason.to_string()),
                rows: 0,
                property_types: Vec::new(),
                property_type: None,
                postcodes: Vec::new(),
                postcode: None,
                normalize_by_area: None,
                charts: Vec::new(),
                undefined_prices: 0,
            },
            Self::Ready(view) => ViewSummary {
                key: view.key.to_string(),
                available: true,
                message: None,
                rows: view.frame.height(),
                property_types: view.property_types.clone(),
                property_type: Some(view.property_type.clone()),
                postcodes: view.postcodes.clone(),
                postcode: view.postcode.clone(),
                normalize_by_area: Some(view.normalize_by_area),
                charts: view.charts.iter().map(|chart| chart.label().to_string()).collect(),
                undefined_prices: view.undefined_prices,
            },
        }
    }
}

/// Serializable digest of a [`SelectionView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    pub key: String,
    pub available: bool,
    pub message: Option<String>,
    pub rows: usize,
    pub property_types: Vec<String>,
    pub property_type: Option<String>,
    pub postcodes: Vec<PostcodeOption>,
    pub postcode: Option<PostcodeOption>,
    pub normalize_by_area: Option<bool>,
    pub charts: Vec<String>,
    pub undefined_prices: usize,
}

/// Check `state` against the lookup of its key and build the view.
///
/// - Property type options are the sorted distinct types of the dataset; a
///   type not among them falls back to the first option.
/// - A postcode absent from the dataset is dropped; a kept postcode gets its
///   title from the options.
/// - An unavailable key clears the property type and yields
///   [`SelectionView::NoData`]. The postcode is kept for the next available
///   key of the same department; the department transition already clears it.
pub fn reconcile(
    mut state: SelectionState,
    lookup: &DatasetLookup,
    config: &DashboardConfig,
) -> Result<(SelectionState, SelectionView)> {
    let key = state.key();
    let year_options = config.year_labels();

    let dataset = match lookup {
        DatasetLookup::Found(dataset) => dataset,
        DatasetLookup::Unavailable(reason) => {
            state.property_type = None;
            let view = SelectionView::NoData {
                key,
                reason: reason.clone(),
                year_options,
            };
            return Ok((state, view));
        }
    };

    let property_types = dataset.property_types()?;
    let property_type = match state.property_type.take() {
        Some(current) if property_types.contains(&current) => Some(current),
        _ => property_types.first().cloned(),
    };
    let Some(property_type) = property_type else {
        // Rows exist but none carries a property type.
        state.clear_postcode();
        let view = SelectionView::NoData {
            key,
            reason: UnavailableReason::NoData,
            year_options,
        };
        return Ok((state, view));
    };
    state.property_type = Some(property_type.clone());

    let postcodes = dataset.postcodes()?;
    let postcode = state
        .postcode
        .as_deref()
        .and_then(|code| postcodes.iter().find(|option| option.code == code))
        .cloned();
    match &postcode {
        Some(option) => state.postcode_title = Some(option.title.clone()),
        None => {
            if let Some(stale) = &state.postcode {
                debug!(postcode = %stale, %key, "postcode not in dataset, dropped");
            }
            state.clear_postcode();
        }
    }

    let frame = normalize(dataset, state.normalize_by_area)?;
    let undefined_prices = undefined_count(&frame)?;
    let view = SelectionView::Ready(ReadyView {
        key,
        frame,
        year_options,
        property_types,
        property_type,
        postcodes,
        postcode,
        normalize_by_area: state.normalize_by_area,
        charts: state.charts.clone(),
        undefined_prices,
    });
    Ok((state, view))
}
