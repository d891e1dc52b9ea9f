//! Execution of a case's generation contract.

use std::ffi::OsString;
use std::io::{BufRead, BufReader, PipeReader, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

use crate::catalog::BenchmarkCase;
use crate::config::Launcher;
use crate::error::{GenerationError, Result};
use crate::metrics::{parse_metrics, Metrics};
use crate::obs;

/// Sink for the contract's output, called once per line in emission order.
pub trait LineEcho: Send {
    fn echo(&mut self, line: &str);
}

/// Echoes every line to the process's stdout as soon as it arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutEcho;

impl LineEcho for StdoutEcho {
    fn echo(&mut self, line: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout must not abort a long generation.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

impl LineEcho for Vec<String> {
    fn echo(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// What a successful contract run reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Last metrics line seen, if any.
    pub metrics: Option<Metrics>,

    /// Number of output lines echoed.
    pub lines: usize,

    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Runs generation contracts with the toolchain on the search path.
#[derive(Debug, Clone)]
pub struct CaseRunner {
    toolchain_path: PathBuf,
    launcher: Launcher,
    ambient_path: Option<OsString>,
}

impl CaseRunner {
    /// Create a runner; the ambient `PATH` is captured here, once.
    pub fn new(toolchain_path: impl Into<PathBuf>, launcher: Launcher) -> Self {
        Self::with_ambient_path(toolchain_path, launcher, std::env::var_os("PATH"))
    }

    /// Create a runner with an explicit base search path.
    pub fn with_ambient_path(
        toolchain_path: impl Into<PathBuf>,
        launcher: Launcher,
        ambient_path: Option<OsString>,
    ) -> Self {
        Self {
            toolchain_path: toolchain_path.into(),
            launcher,
            ambient_path,
        }
    }

    /// The `PATH` handed to every child: toolchain first, then the ambient entries.
    pub fn search_path(&self) -> Result<OsString> {
        let ambient = self
            .ambient_path
            .as_deref()
            .map(|p| std::env::split_paths(p).collect::<Vec<_>>())
            .unwrap_or_default();
        std::env::join_paths(std::iter::once(self.toolchain_path.clone()).chain(ambient))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e).into())
    }

    /// Run the case's contract to completion.
    ///
    /// Stdout and stderr share one pipe, so lines are seen in exactly the
    /// order the child wrote them. Each line is passed to `echo` and to the
    /// metrics parser, with the latest match kept. Fails before spawning when
    /// the entry point is missing, and with
    /// [`GenerationError::ContractExecution`] on a non-zero exit.
    pub async fn run(
        &self,
        case: &BenchmarkCase,
        echo: &mut dyn LineEcho,
    ) -> Result<RunOutcome> {
        let label = case.label();
        if !case.generation_contract.is_file() {
            return Err(GenerationError::MissingContract {
                case: label,
                path: case.generation_contract.clone(),
            });
        }

        let start = Instant::now();
        let contract = std::fs::canonicalize(&case.generation_contract)?;
        let (reader, writer) = std::io::pipe()?;
        let mut command = self.command(&contract)?;
        command
            .current_dir(&case.case_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::from(writer.try_clone()?))
            .stderr(Stdio::from(writer));

        debug!(case = %label, contract = %contract.display(), "Spawning generation contract");
        let spawned = command.spawn();
        // The command holds the parent's write ends; EOF only arrives once they are gone.
        drop(command);
        let mut child = spawned.map_err(|source| GenerationError::Spawn {
            case: label.clone(),
            program: self.program(&contract).to_path_buf(),
            source,
        })?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let pump = tokio::task::spawn_blocking(move || pump_lines(reader, tx));

        let mut metrics = None;
        let mut lines = 0usize;
        while let Some(line) = rx.recv().await {
            echo.echo(&line);
            lines += 1;
            if let Some(found) = parse_metrics(&line) {
                obs::emit_case_metrics(&label, found.states, found.transitions);
                metrics = Some(found);
            }
        }
        pump.await.map_err(|e| GenerationError::Task(e.to_string()))??;

        let status = child.wait().await?;
        let duration_ms = start.elapsed().as_millis() as u64;
        if !status.success() {
            return Err(GenerationError::ContractExecution {
                case: label,
                exit_code: status.code().unwrap_or(-1),
            });
        }

        Ok(RunOutcome {
            metrics,
            lines,
            duration_ms,
        })
    }

    fn program<'a>(&'a self, contract: &'a Path) -> &'a Path {
        match &self.launcher {
            Launcher::Direct => contract,
            Launcher::Interpreter(program) => program,
        }
    }

    fn command(&self, contract: &Path) -> Result<Command> {
        let mut command = Command::new(self.program(contract));
        if let Launcher::Interpreter(_) = self.launcher {
            command.arg(contract);
        }
        command.env("PATH", self.search_path()?);
        Ok(command)
    }
}

/// Forward `reader` line by line until EOF or until the receiver goes away.
///
/// Invalid UTF-8 is replaced rather than treated as an error; trailing
/// `\n` / `\r\n` is stripped.
fn pump_lines(reader: PipeReader, tx: mpsc::UnboundedSender<String>) -> std::io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if tx.send(String::from_utf8_lossy(&buf).into_owned()).is_err() {
            return Ok(());
        }
    }
}
