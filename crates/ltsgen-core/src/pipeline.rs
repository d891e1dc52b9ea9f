//! Sequencing of the catalog: run, finalize, record.

use std::time::Instant;

use tracing::Instrument;

use crate::catalog::{self, BenchmarkCase};
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, Result};
use crate::finalize::{ArtifactFinalizer, FinalizedArtifact};
use crate::obs;
use crate::runner::{CaseRunner, LineEcho};
use crate::summary::{GenerationResult, SummaryRecorder};

/// What happened to a single case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// The archive already existed; nothing was run.
    Skipped { compressed_name: String },

    /// The contract ran and its record was appended.
    Generated(GenerationResult),
}

/// Result of walking the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Records appended during this run, in catalog order.
    pub generated: Vec<GenerationResult>,

    /// Archive names of the cases that were skipped.
    pub skipped: Vec<String>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl PipelineReport {
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Drives every case of the catalog through the generation steps.
#[derive(Debug, Clone)]
pub struct GenerationPipeline {
    cases: Vec<BenchmarkCase>,
    runner: CaseRunner,
    finalizer: ArtifactFinalizer,
    recorder: SummaryRecorder,
}

impl GenerationPipeline {
    /// Pipeline over the standard catalog.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            catalog::default_cases(&config.cases_root),
            CaseRunner::new(&config.toolchain_path, config.launcher.clone()),
            ArtifactFinalizer::new(&config.output_dir),
            SummaryRecorder::new(&config.summary_file),
        )
    }

    pub fn new(
        cases: Vec<BenchmarkCase>,
        runner: CaseRunner,
        finalizer: ArtifactFinalizer,
        recorder: SummaryRecorder,
    ) -> Self {
        Self {
            cases,
            runner,
            finalizer,
            recorder,
        }
    }

    /// Replace the case list.
    pub fn with_cases(mut self, cases: Vec<BenchmarkCase>) -> Self {
        self.cases = cases;
        self
    }

    pub fn cases(&self) -> &[BenchmarkCase] {
        &self.cases
    }

    /// Process every case in order, stopping at the first error.
    ///
    /// Cases finished before the error keep their archive and summary
    /// record, so a rerun picks up where this one stopped.
    pub async fn run(&self, echo: &mut dyn LineEcho) -> Result<PipelineReport> {
        let start = Instant::now();
        std::fs::create_dir_all(self.finalizer.output_dir())?;

        let mut report = PipelineReport::default();
        for case in &self.cases {
            let span = obs::case_span(&case.label(), &case.expected_artifact_name);
            match self.process_case(case, echo).instrument(span).await {
                Ok(CaseOutcome::Skipped { compressed_name }) => {
                    report.skipped.push(compressed_name)
                }
                Ok(CaseOutcome::Generated(record)) => report.generated.push(record),
                Err(e) => {
                    obs::emit_case_failed(&case.label(), &e);
                    return Err(e);
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        obs::emit_pipeline_finished(
            report.generated_count(),
            report.skipped_count(),
            report.duration_ms,
        );
        Ok(report)
    }

    /// Process one case: skip it if archived, otherwise run, finalize, record.
    pub async fn process_case(
        &self,
        case: &BenchmarkCase,
        echo: &mut dyn LineEcho,
    ) -> Result<CaseOutcome> {
        let label = case.label();
        let compressed_name = case.compressed_name();

        if case
            .compressed_path(self.finalizer.output_dir())
            .try_exists()?
        {
            obs::emit_case_skipped(&label, &compressed_name);
            return Ok(CaseOutcome::Skipped { compressed_name });
        }

        obs::emit_case_started(&label, &case.expected_artifact_name);
        let outcome = self.runner.run(case, echo).await?;
        obs::emit_case_generated(&label, outcome.lines, outcome.duration_ms);

        let finalized = self.finalize(case).await?;
        obs::emit_case_finalized(
            &label,
            finalized.raw_bytes,
            finalized.compressed_bytes,
            finalized.contains_marker,
        );

        let record = GenerationResult::new(
            case.expected_artifact_name.clone(),
            outcome.metrics,
            finalized.contains_marker,
        );
        self.recorder.append(&record)?;
        obs::emit_case_recorded(&label, &record.artifact_name);

        Ok(CaseOutcome::Generated(record))
    }

    async fn finalize(&self, case: &BenchmarkCase) -> Result<FinalizedArtifact> {
        let finalizer = self.finalizer.clone();
        let case = case.clone();
        tokio::task::spawn_blocking(move || {
            let _span = obs::CaseSpan::enter(&case.label(), &case.expected_artifact_name);
            finalizer.finalize(&case)
        })
        .await
        .map_err(|e| GenerationError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_report_counts() {
        let report = PipelineReport {
            generated: vec![
                GenerationResult::new("a.aut", None, false),
                GenerationResult::new("b.aut", None, true),
            ],
            skipped: vec!["c.aut.bz2".to_string()],
            duration_ms: 300,
        };

        assert_eq!(report.generated_count(), 2);
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn from_config_uses_standard_catalog() {
        let config = GeneratorConfig::new("/opt/mcrl2/bin", "/cases", "/out");
        let pipeline = GenerationPipeline::from_config(&config);
        assert_eq!(pipeline.cases().len(), catalog::CATALOG.len());
        assert_eq!(
            pipeline.cases()[0].case_directory,
            std::path::PathBuf::from("/cases/academic/dining")
        );
    }
}
