//! Observability tests for generation lifecycle tracing.

use ltsgen_core::{
    emit_case_failed, emit_case_finalized, emit_case_generated, emit_case_metrics,
    emit_case_recorded, emit_case_skipped, emit_case_started, emit_pipeline_finished, CaseSpan,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_emit_case_started_logs_notice() {
    emit_case_started("academic/dining", "dining_10.aut");
    assert!(logs_contain("case.started"));
    assert!(logs_contain("Generating dining_10.aut from academic/dining"));
}

#[traced_test]
#[test]
fn test_emit_case_skipped_logs_archive() {
    emit_case_skipped("academic/onebit", "onebit.aut.bz2");
    assert!(logs_contain("case.skipped"));
    assert!(logs_contain("onebit.aut.bz2"));
}

#[traced_test]
#[test]
fn test_emit_case_metrics_at_debug() {
    emit_case_metrics("games/clobber", 1234, 5678);
    assert!(logs_contain("states=1234"));
    assert!(logs_contain("transitions=5678"));
}

#[traced_test]
#[test]
fn test_emit_case_progress_events() {
    emit_case_generated("industrial/1394", 42, 1500);
    emit_case_finalized("industrial/1394", 4096, 512, true);
    emit_case_recorded("industrial/1394", "1394-fin.aut");
    emit_pipeline_finished(1, 6, 1600);

    assert!(logs_contain("case.generated"));
    assert!(logs_contain("contains_tau=true"));
    assert!(logs_contain("case.recorded"));
    assert!(logs_contain("pipeline.finished"));
}

#[traced_test]
#[test]
fn test_emit_case_failed_logs_error() {
    emit_case_failed("academic/hopcroft", &"generation contract exited with code 1");
    assert!(logs_contain("case.failed"));
    assert!(logs_contain("exited with code 1"));
}

#[traced_test]
#[test]
fn test_case_span_enter() {
    let span = CaseSpan::enter("academic/goback", "goback.aut");
    tracing::info!("inside case");
    drop(span);
    assert!(logs_contain("inside case"));
}
