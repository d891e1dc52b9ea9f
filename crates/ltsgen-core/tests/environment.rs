//! Environment handed to generation contracts.
//!
//! Kept in its own test binary: it sets a process-wide variable, which must
//! not race with other tests.
#![cfg(unix)]

use std::ffi::OsString;
use std::path::PathBuf;

use ltsgen_core::{BenchmarkCase, CaseRunner, Launcher};

const SENTINEL: &str = "LTSGEN_TEST_SENTINEL";
const SENTINEL_VALUE: &str = "kept as-is: a b:c/d";

/// Test: ambient variables reach the child unchanged; PATH gains the toolchain
#[tokio::test]
async fn test_ambient_environment_passes_through() {
    std::env::set_var(SENTINEL, SENTINEL_VALUE);

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("run.py"),
        format!("echo \"${SENTINEL}\"\necho \"$PATH\"\n"),
    )
    .unwrap();
    let case = BenchmarkCase::new(dir.path(), "x.aut");

    let runner = CaseRunner::with_ambient_path(
        "/opt/mcrl2/bin",
        Launcher::Interpreter(PathBuf::from("sh")),
        Some(OsString::from("/usr/bin:/bin")),
    );

    let mut echoed: Vec<String> = Vec::new();
    runner.run(&case, &mut echoed).await.expect("contract failed");

    assert_eq!(echoed.len(), 2);
    assert_eq!(echoed[0], SENTINEL_VALUE);
    assert_eq!(echoed[1], "/opt/mcrl2/bin:/usr/bin:/bin");
}
