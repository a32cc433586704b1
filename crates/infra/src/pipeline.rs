//! Single-shot export run: source → deriver → sink.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, instrument};

use attrforge_core::{DomainError, verify_alignment};
use attrforge_products::derive_all;

use crate::sink::{CsvSink, SinkError};
use crate::source::{ProductSource, SourceError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("reading products failed")]
    Source(#[from] SourceError),

    #[error("derived rows do not line up with source rows")]
    Alignment(#[from] DomainError),

    #[error("writing product attributes failed")]
    Sink(#[from] SinkError),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
}

/// Fetch every product, derive its attributes and write them out.
///
/// With `sink = None` the run stops after derivation (dry run). Any error
/// aborts the run; nothing is written unless every step before the write
/// succeeded.
#[instrument(skip_all, fields(dry_run = sink.is_none()), err)]
pub async fn run<S>(source: &S, sink: Option<&CsvSink>) -> Result<RunSummary, PipelineError>
where
    S: ProductSource + ?Sized,
{
    let products = source.fetch_products().await?;
    let attributes = derive_all(&products);
    verify_alignment(&products, &attributes)?;
    info!(rows = attributes.len(), "derived product attributes");

    let output = match sink {
        Some(sink) => {
            sink.write_all(&attributes)?;
            Some(sink.path().to_path_buf())
        }
        None => {
            info!("dry run; skipping output");
            None
        }
    };

    Ok(RunSummary {
        rows: attributes.len(),
        output,
    })
}
