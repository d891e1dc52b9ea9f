//! Runtime configuration for a generation run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable selecting how contracts are launched.
pub const INTERPRETER_ENV: &str = "LTSGEN_INTERPRETER";

/// Interpreter used for `run.py` contracts when nothing else is configured.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Name of the summary log inside the output directory.
pub const SUMMARY_FILE_NAME: &str = "summary.jsonl";

/// How a case's entry point is started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Launcher {
    /// Execute the entry point itself (it must be executable).
    Direct,

    /// Run `<program> <entry point>`.
    Interpreter(PathBuf),
}

impl Launcher {
    /// Resolve the launcher from `LTSGEN_INTERPRETER`.
    ///
    /// Unset or empty selects the default interpreter; `direct` executes the
    /// entry point without an interpreter.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var_os(INTERPRETER_ENV).as_deref().map(Path::new))
    }

    fn from_value(value: Option<&Path>) -> Self {
        match value {
            None => Self::default(),
            Some(v) if v.as_os_str().is_empty() => Self::default(),
            Some(v) if v == Path::new("direct") => Launcher::Direct,
            Some(v) => Launcher::Interpreter(v.to_path_buf()),
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Launcher::Interpreter(PathBuf::from(DEFAULT_INTERPRETER))
    }
}

/// Paths and launch settings shared by every case in a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// mCRL2 installation directory, prepended to the children's `PATH`.
    pub toolchain_path: PathBuf,

    /// Root under which the catalog's case directories live.
    pub cases_root: PathBuf,

    /// Directory receiving the compressed artifacts.
    pub output_dir: PathBuf,

    /// Append-only JSON-lines summary.
    pub summary_file: PathBuf,

    /// How entry points are started.
    pub launcher: Launcher,
}

impl GeneratorConfig {
    /// Build a configuration from the three CLI paths, with the summary log
    /// placed in the output directory and the default launcher.
    pub fn new(
        toolchain_path: impl Into<PathBuf>,
        cases_root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let output_dir = output_dir.into();
        Self {
            toolchain_path: toolchain_path.into(),
            cases_root: cases_root.into(),
            summary_file: output_dir.join(SUMMARY_FILE_NAME),
            output_dir,
            launcher: Launcher::default(),
        }
    }

    /// Replace the launcher.
    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// Replace the summary log location.
    pub fn with_summary_file(mut self, summary_file: impl Into<PathBuf>) -> Self {
        self.summary_file = summary_file.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_defaults_into_output_dir() {
        let config = GeneratorConfig::new("/opt/mcrl2/bin", "cases", "out");
        assert_eq!(config.summary_file, PathBuf::from("out").join("summary.jsonl"));
        assert_eq!(config.launcher, Launcher::default());
    }

    #[test]
    fn builder_overrides() {
        let config = GeneratorConfig::new("t", "c", "o")
            .with_launcher(Launcher::Direct)
            .with_summary_file("elsewhere.jsonl");
        assert_eq!(config.launcher, Launcher::Direct);
        assert_eq!(config.summary_file, PathBuf::from("elsewhere.jsonl"));
    }

    #[test]
    fn launcher_from_value() {
        assert_eq!(
            Launcher::from_value(None),
            Launcher::Interpreter(PathBuf::from("python3"))
        );
        assert_eq!(Launcher::from_value(Some(Path::new(""))), Launcher::default());
        assert_eq!(Launcher::from_value(Some(Path::new("direct"))), Launcher::Direct);
        assert_eq!(
            Launcher::from_value(Some(Path::new("/usr/bin/python3.12"))),
            Launcher::Interpreter(PathBuf::from("/usr/bin/python3.12"))
        );
    }
}
