//! Per-session dataset cache.
//!
//! Memoizes provider answers by (department, year). Both found datasets and
//! "unavailable" answers are stored, so a key touches the provider at most
//! once per session. There is no eviction: the key space is the department
//! catalogue times the configured years.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dvf_model::DatasetKey;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::IngestError;
use crate::provider::DatasetProvider;

/// Why a key has no dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The provider answered and has nothing for this key.
    NoData,
    /// The provider could not be reached or sent an unreadable payload.
    Transport {
        /// Short text for the user.
        message: String,
        /// Full error, for logs.
        detail: String,
    },
}

impl UnavailableReason {
    fn transport(error: &IngestError) -> Self {
        Self::Transport {
            message: error.user_message().to_string(),
            detail: error.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Underlying error of a transport failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::NoData => None,
            Self::Transport { detail, .. } => Some(detail),
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => f.write_str("no data for this selection"),
            Self::Transport { message, .. } => f.write_str(message),
        }
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone)]
pub enum DatasetLookup {
    Found(Arc<Dataset>),
    Unavailable(UnavailableReason),
}

impl DatasetLookup {
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            Self::Found(dataset) => Some(dataset),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Dataset cache owned by one session.
pub struct DatasetCache<P> {
    provider: P,
    entries: HashMap<DatasetKey, DatasetLookup>,
}

impl<P: DatasetProvider> DatasetCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: HashMap::new(),
        }
    }

    /// Return the stored answer for `key`, fetching it on the first request.
    pub fn get(&mut self, key: &DatasetKey) -> DatasetLookup {
        if let Some(entry) = self.entries.get(key) {
            debug!(%key, found = entry.is_found(), "dataset cache hit");
            return entry.clone();
        }

        info!(%key, provider = self.provider.name(), "fetching dataset");
        let lookup = self.fetch(key);
        self.entries.insert(key.clone(), lookup.clone());
        lookup
    }

    fn fetch(&self, key: &DatasetKey) -> DatasetLookup {
        let frame = match self.provider.fetch(key) {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!(%key, "no data for dataset key");
                return DatasetLookup::Unavailable(UnavailableReason::NoData);
            }
            Err(error) => {
                warn!(%key, %error, "dataset fetch failed");
                return DatasetLookup::Unavailable(UnavailableReason::transport(&error));
            }
        };

        match Dataset::from_frame(key.clone(), frame) {
            Ok(dataset) if dataset.is_empty() => {
                DatasetLookup::Unavailable(UnavailableReason::NoData)
            }
            Ok(dataset) => {
                info!(%key, rows = dataset.height(), "dataset loaded");
                DatasetLookup::Found(Arc::new(dataset))
            }
            Err(error) => {
                warn!(%key, %error, "malformed dataset payload");
                DatasetLookup::Unavailable(UnavailableReason::transport(&error))
            }
        }
    }

    /// Stored answer for `key` without fetching.
    pub fn peek(&self, key: &DatasetKey) -> Option<&DatasetLookup> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &DatasetKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every stored answer, allowing unavailable keys to be retried.
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "dataset cache cleared");
        self.entries.clear();
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
