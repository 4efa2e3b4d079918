use serde::{Deserialize, Serialize};
use vbz_core::Options;

use crate::error::Result;
use crate::filter::{DEFLATE_FILTER_ID, VBZ_FILTER_ID};
use crate::registry::FilterRegistry;
use crate::vbz::FilterParams;

/// One filter application: which filter, and the words stored with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub id: u16,
    pub params: Vec<u32>,
}

impl FilterSpec {
    pub fn vbz(options: Options) -> Self {
        Self {
            id: VBZ_FILTER_ID,
            params: FilterParams::from(options).to_words(),
        }
    }

    pub fn deflate(level: u32) -> Self {
        Self {
            id: DEFLATE_FILTER_ID,
            params: vec![level],
        }
    }
}

/// Ordered filter chain applied to every chunk of a dataset.
///
/// An empty pipeline stores chunks unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPipeline {
    pub filters: Vec<FilterSpec>,
}

impl FilterPipeline {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(spec: FilterSpec) -> Self {
        Self { filters: vec![spec] }
    }

    pub fn then(mut self, spec: FilterSpec) -> Self {
        self.filters.push(spec);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply each filter in order.
    pub fn encode(&self, registry: &FilterRegistry, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut data = chunk.to_vec();
        for spec in &self.filters {
            data = registry.get(spec.id)?.encode(&data, &spec.params)?;
        }
        Ok(data)
    }

    /// Undo [`Self::encode`], last filter first.
    pub fn decode(&self, registry: &FilterRegistry, payload: &[u8]) -> Result<Vec<u8>> {
        let mut data = payload.to_vec();
        for spec in self.filters.iter().rev() {
            data = registry.get(spec.id)?.decode(&data, &spec.params)?;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    fn chunk() -> Vec<u8> {
        (0..512i16).flat_map(|v| (v % 50 - 25).to_le_bytes()).collect()
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let registry = FilterRegistry::with_defaults();
        let pipeline = FilterPipeline::none();
        assert_eq!(pipeline.encode(&registry, &chunk()).unwrap(), chunk());
        assert_eq!(pipeline.decode(&registry, &chunk()).unwrap(), chunk());
    }

    #[test]
    fn test_chained_filters_decode_in_reverse() {
        let registry = FilterRegistry::with_defaults();
        let pipeline =
            FilterPipeline::single(FilterSpec::vbz(Options::new(2))).then(FilterSpec::deflate(9));
        let encoded = pipeline.encode(&registry, &chunk()).unwrap();
        assert_eq!(pipeline.decode(&registry, &encoded).unwrap(), chunk());
    }

    #[test]
    fn test_unregistered_filter() {
        let pipeline = FilterPipeline::single(FilterSpec { id: 307, params: vec![] });
        assert!(matches!(
            pipeline.encode(&FilterRegistry::with_defaults(), b"xy"),
            Err(FilterError::UnknownFilter(307))
        ));
    }

    #[test]
    fn test_vbz_spec_words() {
        let spec = FilterSpec::vbz(Options::new(1).with_version(1).with_zstd_level(3));
        assert_eq!(spec.id, 32020);
        assert_eq!(spec.params, vec![1, 1, 1, 3]);
    }
}
