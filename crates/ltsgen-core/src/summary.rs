//! Append-only JSON-lines log of generated artifacts.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

use crate::error::Result;
use crate::metrics::Metrics;

/// One summary record, written after a case is archived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationResult {
    /// Artifact file name (without the compression suffix).
    #[serde(rename = "lts")]
    pub artifact_name: String,

    /// Whether the LTS contains an internal action.
    #[serde(rename = "contains_tau")]
    pub contains_marker: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<u64>,
}

impl GenerationResult {
    pub fn new(
        artifact_name: impl Into<String>,
        metrics: Option<Metrics>,
        contains_marker: bool,
    ) -> Self {
        Self {
            artifact_name: artifact_name.into(),
            contains_marker,
            states: metrics.map(|m| m.states),
            transitions: metrics.map(|m| m.transitions),
        }
    }

    /// Serialize as a single line (no trailing newline).
    ///
    /// Separators follow the `", "` / `": "` convention of the existing
    /// summary files, e.g. `{"lts": "x.aut", "contains_tau": false}`.
    pub fn to_line(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Compact JSON with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Appends [`GenerationResult`]s to the summary file.
#[derive(Debug, Clone)]
pub struct SummaryRecorder {
    path: PathBuf,
}

impl SummaryRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line.
    ///
    /// The file is opened in append mode for every call and the line is
    /// written with one `write_all`, so earlier records are never touched.
    pub fn append(&self, record: &GenerationResult) -> Result<()> {
        let mut line = record.to_line()?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Read back every record. A missing file is an empty log.
    pub fn load(&self) -> Result<Vec<GenerationResult>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}
