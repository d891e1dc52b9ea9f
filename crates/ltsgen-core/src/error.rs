//! Error types for the generation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run.
///
/// Every variant is fatal: the pipeline stops at the first one and the
/// operator reruns after fixing the offending case. Cases that were already
/// archived are skipped on the rerun.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The case's entry point does not exist.
    #[error("case {case}: generation contract not found at {}", path.display())]
    MissingContract { case: String, path: PathBuf },

    /// The contract could not be launched at all.
    #[error("case {case}: failed to launch {}: {source}", program.display())]
    Spawn {
        case: String,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contract ran but exited unsuccessfully (-1 when killed by a signal).
    #[error("case {case}: generation contract exited with code {exit_code}")]
    ContractExecution { case: String, exit_code: i32 },

    /// The contract reported success but left no artifact behind.
    #[error("case {case}: expected artifact {} was not produced", path.display())]
    MissingArtifact { case: String, path: PathBuf },

    /// Moving, scanning or compressing the artifact failed.
    #[error("case {case}: failed to archive {artifact}: {source}")]
    Finalize {
        case: String,
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    /// A blocking finalization task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, GenerationError>;
