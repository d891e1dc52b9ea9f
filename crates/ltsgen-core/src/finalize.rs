//! Post-processing of a generated LTS: relocate, scan, compress.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use bzip2::Compression;
use tempfile::NamedTempFile;

use crate::catalog::BenchmarkCase;
use crate::error::{GenerationError, Result};

/// Label of the internal, unobservable action in `.aut` files.
pub const TAU_MARKER: &str = "tau";

/// Outcome of finalizing one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedArtifact {
    /// The retained `.bz2` file.
    pub compressed_path: PathBuf,

    /// Whether any line of the artifact mentions [`TAU_MARKER`].
    pub contains_marker: bool,

    /// Size of the uncompressed artifact.
    pub raw_bytes: u64,

    /// Size of the compressed artifact.
    pub compressed_bytes: u64,
}

/// Moves generated artifacts into the output directory and archives them.
#[derive(Debug, Clone)]
pub struct ArtifactFinalizer {
    output_dir: PathBuf,
}

impl ArtifactFinalizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finalize the artifact `case` just produced.
    ///
    /// Layout afterwards: the case directory no longer holds the artifact,
    /// and `<output_dir>/<artifact>.bz2` is the only copy left.
    pub fn finalize(&self, case: &BenchmarkCase) -> Result<FinalizedArtifact> {
        let generated = case.artifact_path();
        if !generated.is_file() {
            return Err(GenerationError::MissingArtifact {
                case: case.label(),
                path: generated,
            });
        }

        self.archive(case, &generated)
            .map_err(|source| GenerationError::Finalize {
                case: case.label(),
                artifact: case.expected_artifact_name.clone(),
                source,
            })
    }

    fn archive(&self, case: &BenchmarkCase, generated: &Path) -> io::Result<FinalizedArtifact> {
        let relocated = self.output_dir.join(&case.expected_artifact_name);
        relocate(generated, &relocated)?;

        let contains_marker = scan_for_marker(&relocated, TAU_MARKER)?;
        let raw_bytes = fs::metadata(&relocated)?.len();

        let compressed_path = case.compressed_path(&self.output_dir);
        let compressed_bytes = compress_file(&relocated, &compressed_path)?;
        fs::remove_file(&relocated)?;

        Ok(FinalizedArtifact {
            compressed_path,
            contains_marker,
            raw_bytes,
            compressed_bytes,
        })
    }
}

/// Move `from` to `to`, copying across filesystems when a rename is refused.
///
/// A failed copy never leaves a partial `to` behind.
pub fn relocate(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if fs::copy(from, to).is_err() {
                match fs::remove_file(to) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e),
                }
                return Err(rename_err);
            }
            fs::remove_file(from)
        }
    }
}

/// True when any line of `path` contains `marker`. Stops at the first hit.
///
/// Plain substring match: a label such as `tautology` also counts.
pub fn scan_for_marker(path: &Path, marker: &str) -> io::Result<bool> {
    let needle = marker.as_bytes();
    if needle.is_empty() {
        return Ok(true);
    }
    let reader = BufReader::new(File::open(path)?);
    for line in reader.split(b'\n') {
        if line?.windows(needle.len()).any(|w| w == needle) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Bzip2-compress `src` into `dest`, returning the compressed size.
///
/// Written to a temp file beside `dest` and renamed into place, so `dest`
/// only ever exists complete.
pub fn compress_file(src: &Path, dest: &Path) -> io::Result<u64> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    let mut encoder = BzEncoder::new(BufWriter::new(tmp), Compression::best());
    io::copy(&mut BufReader::new(File::open(src)?), &mut encoder)?;
    let mut writer = encoder.finish()?;
    writer.flush()?;
    let tmp = writer.into_inner().map_err(|e| e.into_error())?;

    let file = tmp.persist(dest).map_err(|e| e.error)?;
    Ok(file.metadata()?.len())
}
