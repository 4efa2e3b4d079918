mod deflate;
mod error;
mod filter;
mod pipeline;
mod recode;
mod registry;
mod vbz;

pub use deflate::{DeflateFilter, DEFAULT_DEFLATE_LEVEL};
pub use error::{FilterError, Result};
pub use filter::{Filter, DEFLATE_FILTER_ID, VBZ_FILTER_ID};
pub use pipeline::{FilterPipeline, FilterSpec};
pub use recode::{recode, recode_all, RecodeReport};
pub use registry::FilterRegistry;
pub use vbz::{FilterParams, VbzFilter};

/// Resolve a pipeline from a short name: `none`, `deflate` or `vbz`.
///
/// `vbz_options` configures the VBZ filter when `name` selects it.
pub fn pipeline_by_name(name: &str, vbz_options: vbz_core::Options) -> Result<FilterPipeline> {
    match name {
        "none" | "raw" => Ok(FilterPipeline::none()),
        "deflate" | "gzip" => Ok(FilterPipeline::single(FilterSpec::deflate(
            DEFAULT_DEFLATE_LEVEL,
        ))),
        "vbz" => Ok(FilterPipeline::single(FilterSpec::vbz(vbz_options))),
        other => Err(FilterError::InvalidParams {
            filter: "pipeline",
            reason: format!("unknown pipeline '{other}'; expected none, deflate or vbz"),
        }),
    }
}
