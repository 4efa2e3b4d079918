use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::FilterPipeline;
use crate::registry::FilterRegistry;

/// Decode `payload` under `from` and encode the samples under `to`.
pub fn recode(
    registry: &FilterRegistry,
    from: &FilterPipeline,
    to: &FilterPipeline,
    payload: &[u8],
) -> Result<Vec<u8>> {
    let raw = from.decode(registry, payload)?;
    to.encode(registry, &raw)
}

/// Summary of a [`recode_all`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecodeReport {
    pub chunks: usize,
    pub succeeded: usize,
    /// Index and message of every chunk that failed.
    pub failed: Vec<(usize, String)>,
    /// Input bytes of the chunks that succeeded.
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl RecodeReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Recode every chunk in parallel.
///
/// Each chunk gets its own result, in input order. A failing chunk is logged
/// and listed in the report; the others are unaffected.
pub fn recode_all<C>(
    registry: &FilterRegistry,
    from: &FilterPipeline,
    to: &FilterPipeline,
    chunks: &[C],
) -> (Vec<Result<Vec<u8>>>, RecodeReport)
where
    C: AsRef<[u8]> + Sync,
{
    let results: Vec<Result<Vec<u8>>> = chunks
        .par_iter()
        .map(|chunk| recode(registry, from, to, chunk.as_ref()))
        .collect();

    let mut report = RecodeReport {
        chunks: chunks.len(),
        ..RecodeReport::default()
    };
    for (index, (chunk, result)) in chunks.iter().zip(&results).enumerate() {
        match result {
            Ok(out) => {
                report.succeeded += 1;
                report.bytes_in += chunk.as_ref().len() as u64;
                report.bytes_out += out.len() as u64;
            }
            Err(e) => {
                warn!(chunk = index, error = %e, "recode failed");
                report.failed.push((index, e.to_string()));
            }
        }
    }
    debug!(
        chunks = report.chunks,
        failed = report.failed.len(),
        bytes_in = report.bytes_in,
        bytes_out = report.bytes_out,
        "recode finished"
    );
    (results, report)
}
