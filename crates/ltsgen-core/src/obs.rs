//! Structured lifecycle events for generation runs.
//!
//! Every event carries an `event` field (`case.started`, `case.skipped`,
//! ...) so JSON logs can be filtered without parsing messages.

use tracing::info;

/// Span covering the processing of one case.
pub fn case_span(case: &str, artifact: &str) -> tracing::Span {
    tracing::info_span!("ltsgen.case", case = %case, artifact = %artifact)
}

/// RAII guard that enters [`case_span`] for synchronous work.
///
/// Async code should use `Instrument::instrument` with [`case_span`] instead.
pub struct CaseSpan {
    _span: tracing::span::EnteredSpan,
}

impl CaseSpan {
    pub fn enter(case: &str, artifact: &str) -> Self {
        Self {
            _span: case_span(case, artifact).entered(),
        }
    }
}

/// A case is about to run its contract.
pub fn emit_case_started(case: &str, artifact: &str) {
    info!(
        event = "case.started",
        case = %case,
        artifact = %artifact,
        "Generating {artifact} from {case}"
    );
}

/// A case was skipped because its archive already exists.
pub fn emit_case_skipped(case: &str, compressed: &str) {
    info!(
        event = "case.skipped",
        case = %case,
        compressed = %compressed,
        "Skipping {case}: {compressed} already exists"
    );
}

/// The contract printed a metrics line.
pub fn emit_case_metrics(case: &str, states: u64, transitions: u64) {
    tracing::debug!(
        event = "case.metrics",
        case = %case,
        states = states,
        transitions = transitions,
    );
}

/// The contract finished successfully.
pub fn emit_case_generated(case: &str, lines: usize, duration_ms: u64) {
    info!(
        event = "case.generated",
        case = %case,
        lines = lines,
        duration_ms = duration_ms,
    );
}

/// The artifact was archived.
pub fn emit_case_finalized(case: &str, raw_bytes: u64, compressed_bytes: u64, contains_tau: bool) {
    info!(
        event = "case.finalized",
        case = %case,
        raw_bytes = raw_bytes,
        compressed_bytes = compressed_bytes,
        contains_tau = contains_tau,
    );
}

/// The summary record was appended.
pub fn emit_case_recorded(case: &str, artifact: &str) {
    info!(event = "case.recorded", case = %case, artifact = %artifact);
}

/// The whole catalog has been walked.
pub fn emit_pipeline_finished(processed: usize, skipped: usize, duration_ms: u64) {
    info!(
        event = "pipeline.finished",
        processed = processed,
        skipped = skipped,
        duration_ms = duration_ms,
    );
}

/// A case failed and the run is aborting.
pub fn emit_case_failed(case: &str, error: &dyn std::fmt::Display) {
    tracing::error!(event = "case.failed", case = %case, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_span_create() {
        let _span = CaseSpan::enter("academic/onebit", "onebit.aut");
    }
}
