//! The fixed set of benchmark cases.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Entry point every case directory provides.
pub const CONTRACT_FILE_NAME: &str = "run.py";

/// Suffix appended to an artifact name once it is compressed.
pub const COMPRESSED_SUFFIX: &str = ".bz2";

/// One catalog row: a case directory relative to the cases root and the LTS
/// its script leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub directory: &'static str,
    pub artifact: &'static str,
}

/// Cases in processing order.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        directory: "academic/dining",
        artifact: "dining_10.aut",
    },
    CatalogEntry {
        directory: "academic/food_distribution",
        artifact: "food_distribution.aut",
    },
    CatalogEntry {
        directory: "academic/goback",
        artifact: "goback.aut",
    },
    CatalogEntry {
        directory: "academic/hopcroft",
        artifact: "hopcroft.aut",
    },
    CatalogEntry {
        directory: "academic/onebit",
        artifact: "onebit.aut",
    },
    CatalogEntry {
        directory: "games/clobber",
        artifact: "clobber.aut",
    },
    CatalogEntry {
        directory: "industrial/1394",
        artifact: "1394-fin.aut",
    },
];

/// A case resolved against a concrete cases root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BenchmarkCase {
    /// Working directory of the contract.
    pub case_directory: PathBuf,

    /// Entry point executed for this case.
    pub generation_contract: PathBuf,

    /// File name the contract leaves in `case_directory`.
    pub expected_artifact_name: String,
}

impl BenchmarkCase {
    /// A case whose contract is the standard `run.py` in `case_directory`.
    pub fn new(
        case_directory: impl Into<PathBuf>,
        expected_artifact_name: impl Into<String>,
    ) -> Self {
        let case_directory = case_directory.into();
        Self {
            generation_contract: case_directory.join(CONTRACT_FILE_NAME),
            case_directory,
            expected_artifact_name: expected_artifact_name.into(),
        }
    }

    /// Override the entry point.
    pub fn with_contract(mut self, contract: impl Into<PathBuf>) -> Self {
        self.generation_contract = contract.into();
        self
    }

    /// Short label used in logs and error messages.
    pub fn label(&self) -> String {
        self.case_directory.display().to_string()
    }

    /// Where the artifact is expected once the contract has run.
    pub fn artifact_path(&self) -> PathBuf {
        self.case_directory.join(&self.expected_artifact_name)
    }

    /// File name of the archived artifact.
    pub fn compressed_name(&self) -> String {
        format!("{}{}", self.expected_artifact_name, COMPRESSED_SUFFIX)
    }

    /// Location of the archived artifact in `output_dir`.
    pub fn compressed_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.compressed_name())
    }
}

/// Resolve `entries` against `cases_root`, preserving order.
pub fn resolve(cases_root: &Path, entries: &[CatalogEntry]) -> Vec<BenchmarkCase> {
    entries
        .iter()
        .map(|entry| BenchmarkCase::new(cases_root.join(entry.directory), entry.artifact))
        .collect()
}

/// The standard catalog resolved against `cases_root`.
pub fn default_cases(cases_root: &Path) -> Vec<BenchmarkCase> {
    resolve(cases_root, CATALOG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_artifacts_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|e| e.artifact).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn resolve_preserves_order() {
        let cases = default_cases(Path::new("/cases"));
        assert_eq!(cases.len(), CATALOG.len());
        assert_eq!(cases[0].case_directory, PathBuf::from("/cases/academic/dining"));
        assert_eq!(cases[0].expected_artifact_name, "dining_10.aut");
        assert_eq!(
            cases.last().map(|c| c.expected_artifact_name.as_str()),
            Some("1394-fin.aut")
        );
    }

    #[test]
    fn case_paths() {
        let case = BenchmarkCase::new("/cases/academic/onebit", "onebit.aut");
        assert_eq!(
            case.generation_contract,
            PathBuf::from("/cases/academic/onebit/run.py")
        );
        assert_eq!(
            case.artifact_path(),
            PathBuf::from("/cases/academic/onebit/onebit.aut")
        );
        assert_eq!(case.compressed_name(), "onebit.aut.bz2");
        assert_eq!(
            case.compressed_path(Path::new("/out")),
            PathBuf::from("/out/onebit.aut.bz2")
        );
    }

    #[test]
    fn contract_override() {
        let case = BenchmarkCase::new("/c", "x.aut").with_contract("/c/generate.sh");
        assert_eq!(case.generation_contract, PathBuf::from("/c/generate.sh"));
    }
}
