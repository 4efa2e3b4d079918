use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::deflate::DeflateFilter;
use crate::error::{FilterError, Result};
use crate::filter::Filter;
use crate::vbz::VbzFilter;

/// Filters available to a pipeline, keyed by ID.
///
/// Built once, then shared read-only (typically behind an `Arc`).
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<u16, Arc<dyn Filter>>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the VBZ and deflate filters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for filter in [
            Arc::new(VbzFilter) as Arc<dyn Filter>,
            Arc::new(DeflateFilter) as Arc<dyn Filter>,
        ] {
            // IDs are distinct constants; the insert cannot collide.
            registry.filters.insert(filter.id(), filter);
        }
        registry
    }

    pub fn register(&mut self, filter: Arc<dyn Filter>) -> Result<()> {
        let id = filter.id();
        if self.filters.contains_key(&id) {
            return Err(FilterError::Duplicate(id));
        }
        self.filters.insert(id, filter);
        Ok(())
    }

    pub fn get(&self, id: u16) -> Result<Arc<dyn Filter>> {
        self.filters
            .get(&id)
            .cloned()
            .ok_or(FilterError::UnknownFilter(id))
    }

    /// Registered IDs, ascending.
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.filters.keys().copied()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.filters.iter().map(|(id, filter)| (id, filter.name())))
            .finish()
    }
}
