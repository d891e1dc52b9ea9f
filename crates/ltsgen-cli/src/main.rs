//! ltsgen - mCRL2 LTS benchmark generator
//!
//! Runs every case of the benchmark catalog with the given mCRL2
//! installation on `PATH` and archives the generated `.aut` files.
//!
//! ```text
//! ltsgen <MCRL2_PATH> <CASES_PATH> <OUTPUT_PATH>
//! ```
//!
//! Environment:
//!
//! - `LTSGEN_INTERPRETER`: program used to start each case's `run.py`
//!   (default `python3`, `direct` executes it as-is).
//! - `LTSGEN_LOG_FORMAT=json`: JSON log lines on stderr.
//! - `RUST_LOG`: log filter (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use ltsgen_core::{GenerationPipeline, GeneratorConfig, Launcher, StdoutEcho};

#[derive(Parser, Debug)]
#[command(name = "ltsgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate the compressed .aut files of the benchmark cases", long_about = None)]
struct Cli {
    /// Path to the mCRL2 installation (its binaries are put first on PATH)
    mcrl2_path: PathBuf,

    /// Path to the cases directory
    cases_path: PathBuf,

    /// Path to the output directory
    output_path: PathBuf,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(&self.mcrl2_path, &self.cases_path, &self.output_path)
            .with_launcher(Launcher::from_env())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ltsgen_core::init_tracing_from_env(Level::INFO);

    let config = cli.config();
    let pipeline = GenerationPipeline::from_config(&config);

    let report = pipeline
        .run(&mut StdoutEcho)
        .await
        .context("Benchmark generation failed")?;

    println!(
        "Generated {} artifact(s), skipped {} already present; summary in {}",
        report.generated_count(),
        report.skipped_count(),
        config.summary_file.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_three_positionals() {
        let cli = Cli::try_parse_from(["ltsgen", "/opt/mcrl2/bin", "cases", "out"]).unwrap();
        assert_eq!(cli.mcrl2_path, PathBuf::from("/opt/mcrl2/bin"));

        let config = cli.config();
        assert_eq!(config.cases_root, PathBuf::from("cases"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.summary_file, PathBuf::from("out").join("summary.jsonl"));
    }

    #[test]
    fn rejects_missing_positionals() {
        assert!(Cli::try_parse_from(["ltsgen", "/opt/mcrl2/bin"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["ltsgen", "--verbose", "a", "b", "c"]).is_err());
    }
}
