//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use callscope_graph::GraphError;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("analysis failed: {0}")]
    Analyse(#[from] GraphError),
    #[error("failed to serialise graph payload: {0}")]
    SerialisePayload(serde_json::Error),
    #[error("failed to write graph payload to {path}: {source}")]
    WritePayload { path: Utf8PathBuf, source: io::Error },
    #[error("failed to write output: {0}")]
    Emit(io::Error),
}
