//! Pluggable diagnostic sink for the optional debug CSV dump (§7, §9).
//!
//! The engine never touches a filesystem directly; it writes through this
//! narrow trait so the core stays testable without I/O, matching the
//! teacher's own style of wrapping a side-effecting primitive behind a small
//! dedicated interface (`record::CondVarSpinlock` wraps a condvar/mutex pair
//! behind `is_stopped`/`block_until_stopped`/`stop_work` rather than exposing
//! them raw).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives one header row (bin center frequencies) and then one row per
/// emitted averaged spectrum (§4.2, §6 "Debug CSV").
pub trait DebugSink: std::fmt::Debug {
    fn write_header(&mut self, bin_frequencies_hz: &[f64]);
    fn write_row(&mut self, normalized_magnitudes_db: &[f32]);
}

/// No-op sink, used whenever `EngineConfig::write_debug_csv` is `false` or
/// the CSV file could not be opened.
#[derive(Debug, Default)]
pub struct NullDebugSink;

impl DebugSink for NullDebugSink {
    fn write_header(&mut self, _bin_frequencies_hz: &[f64]) {}
    fn write_row(&mut self, _normalized_magnitudes_db: &[f32]) {}
}

/// Writes one semicolon-separated row per call to the given file, matching
/// the format described in §6: header row of `"<freq> Hz;"` cells, then one
/// row of magnitudes per emitted averaged spectrum.
#[derive(Debug)]
pub struct CsvDebugSink {
    writer: BufWriter<File>,
}

impl CsvDebugSink {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Opens a [`CsvDebugSink`], falling back to [`NullDebugSink`] and
    /// logging a warning on failure, per §7's "Debug file open failure"
    /// error kind (logged, never fatal).
    pub fn open_or_null<P: AsRef<Path>>(path: P) -> Box<dyn DebugSink> {
        match Self::open(path.as_ref()) {
            Ok(sink) => Box::new(sink),
            Err(err) => {
                log::warn!(
                    "could not open debug CSV sink at {:?}: {err}; continuing without it",
                    path.as_ref()
                );
                Box::new(NullDebugSink)
            }
        }
    }
}

impl DebugSink for CsvDebugSink {
    fn write_header(&mut self, bin_frequencies_hz: &[f64]) {
        for freq in bin_frequencies_hz {
            if write!(self.writer, "{freq} Hz;").is_err() {
                log::warn!("failed writing debug CSV header");
                return;
            }
        }
        let _ = writeln!(self.writer);
    }

    fn write_row(&mut self, normalized_magnitudes_db: &[f32]) {
        for mag in normalized_magnitudes_db {
            if write!(self.writer, "{mag};").is_err() {
                log::warn!("failed writing debug CSV row");
                return;
            }
        }
        let _ = writeln!(self.writer);
    }
}

/// Resolves a debug CSV path the way a caller would typically want it:
/// `fft.csv` in the current working directory, matching the original
/// plug-in's hardcoded filename.
pub fn default_debug_csv_path() -> PathBuf {
    PathBuf::from("fft.csv")
}
