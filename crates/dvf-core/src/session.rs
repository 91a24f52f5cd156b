//! One dashboard session.
//!
//! Owns the dataset cache, the selection state and the summary. Events are
//! handled one at a time; a cache miss blocks the event that caused it.

use std::sync::Arc;

use dvf_ingest::{DatasetCache, DatasetProvider, SummaryDataset, SummaryLoader};
use dvf_model::{SelectionChange, SelectionState};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::{Result, SessionError};
use crate::reconcile::{SelectionView, handle_selection_change, reconcile};

pub struct DashboardSession<P> {
    config: DashboardConfig,
    cache: DatasetCache<P>,
    summary_loader: SummaryLoader,
    summary: Arc<SummaryDataset>,
    state: SelectionState,
    view: SelectionView,
}

impl<P: DatasetProvider> DashboardSession<P> {
    /// Load the summary and reconcile the initial selections.
    ///
    /// A summary failure aborts the session: no selector is presented.
    pub fn open(config: DashboardConfig, provider: P, summary_loader: SummaryLoader) -> Result<Self> {
        let initial = config.initial_state();
        Self::open_with(config, provider, summary_loader, initial)
    }

    /// Like [`open`](Self::open), starting from `initial` instead of the
    /// configured defaults. Only the key of `initial` is fetched.
    pub fn open_with(
        config: DashboardConfig,
        provider: P,
        mut summary_loader: SummaryLoader,
        initial: SelectionState,
    ) -> Result<Self> {
        config.validate()?;
        if !config.offers(initial.year) {
            return Err(SessionError::YearNotOffered(initial.year));
        }
        let summary = summary_loader.load().map_err(SessionError::Summary)?;

        let mut cache = DatasetCache::new(provider);
        let lookup = cache.get(&initial.key());
        let (state, view) = reconcile(initial, &lookup, &config)?;
        info!(key = %state.key(), ready = view.is_ready(), "session opened");

        Ok(Self {
            config,
            cache,
            summary_loader,
            summary,
            state,
            view,
        })
    }

    /// Apply one selection change and return the refreshed view.
    pub fn apply(&mut self, change: SelectionChange) -> Result<&SelectionView> {
        if let SelectionChange::Year(year) = &change
            && !self.config.offers(*year)
        {
            return Err(SessionError::YearNotOffered(*year));
        }

        let state = handle_selection_change(self.state.clone(), change);
        self.refresh_with(state)
    }

    /// Apply several changes in order; stops at the first error.
    pub fn apply_all(
        &mut self,
        changes: impl IntoIterator<Item = SelectionChange>,
    ) -> Result<&SelectionView> {
        for change in changes {
            self.apply(change)?;
        }
        Ok(&self.view)
    }

    /// Forget cached answers and reload the current key.
    pub fn reset_cache(&mut self) -> Result<&SelectionView> {
        self.cache.clear();
        let state = self.state.clone();
        self.refresh_with(state)
    }

    fn refresh_with(&mut self, state: SelectionState) -> Result<&SelectionView> {
        let key = state.key();
        let lookup = self.cache.get(&key);
        let (state, view) = reconcile(state, &lookup, &self.config)?;
        debug!(%key, ready = view.is_ready(), "selection reconciled");
        self.state = state;
        self.view = view;
        Ok(&self.view)
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn view(&self) -> &SelectionView {
        &self.view
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn summary(&self) -> &Arc<SummaryDataset> {
        &self.summary
    }

    pub fn summary_loader(&self) -> &SummaryLoader {
        &self.summary_loader
    }

    pub fn cache(&self) -> &DatasetCache<P> {
        &self.cache
    }
}
