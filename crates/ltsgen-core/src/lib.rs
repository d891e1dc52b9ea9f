//! ltsgen Core Library
//!
//! Generates the mCRL2 LTS benchmark set: every catalog case runs its
//! generation script with the toolchain on `PATH`, and the resulting `.aut`
//! file is archived as `<name>.bz2` in a shared output directory with one
//! JSON line appended to `summary.jsonl`.
//!
//! Reruns are cheap: a case whose archive already exists is skipped.

pub mod catalog;
pub mod config;
pub mod error;
pub mod finalize;
pub mod metrics;
pub mod obs;
pub mod pipeline;
pub mod runner;
pub mod summary;
pub mod telemetry;

pub use catalog::{BenchmarkCase, CatalogEntry, CATALOG};
pub use config::{GeneratorConfig, Launcher};
pub use error::{GenerationError, Result};
pub use finalize::{ArtifactFinalizer, FinalizedArtifact, TAU_MARKER};
pub use metrics::{parse_metrics, Metrics};
pub use obs::{
    emit_case_failed, emit_case_finalized, emit_case_generated, emit_case_metrics,
    emit_case_recorded, emit_case_skipped, emit_case_started, emit_pipeline_finished, CaseSpan,
};
pub use pipeline::{CaseOutcome, GenerationPipeline, PipelineReport};
pub use runner::{CaseRunner, LineEcho, RunOutcome, StdoutEcho};
pub use summary::{GenerationResult, SummaryRecorder};
pub use telemetry::{init_tracing, init_tracing_from_env, LogFormat};
