// Reads and writes two-column time series as delimited text
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::boxed::Box;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::string::{String, ToString};
use std::vec::Vec;

/// The row count of the furnace recordings this loader was written for.
pub const FURNACE_RECORDING_ROWS: usize = 1847;

/// Errors raised while reading a series.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The underlying reader failed.
    #[error("I/O error while reading a series")]
    Io(#[from] io::Error),

    /// A data line holds fewer than two columns.
    #[error("Line {line}: expected a time and a value column")]
    MissingColumn {
        /// 1-based line number.
        line: usize,
    },

    /// A column is not a number.
    #[error("Line {line}: '{text}' is not a number")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending column.
        text: String,
    },

    /// Reading a file failed.
    #[error("Failed to load series from {}", .path.display())]
    File {
        /// The file being read.
        path: PathBuf,
        /// Why reading failed.
        #[source]
        source: Box<DataError>,
    },
}

/// One `(time, value)` sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Time of the sample.
    pub time: f64,
    /// Recorded value.
    pub value: f64,
}

/// An ordered sequence of samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// The samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample times.
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// Sample values.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Keeps the first `len` samples.
    pub fn truncate(&mut self, len: usize) {
        self.samples.truncate(len);
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

fn parse_column(line: usize, column: Option<&str>) -> Result<f64, DataError> {
    let text = column.ok_or(DataError::MissingColumn { line })?;
    text.parse().map_err(|_| DataError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

/// Parses a series from text holding a time and a value column per line.
///
/// Columns are separated by tabs or spaces and extra columns are ignored. Blank lines and lines
/// starting with `#` are skipped.
pub fn parse_series<R: BufRead>(reader: R) -> Result<Series, DataError> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut columns = trimmed.split_whitespace();
        let time = parse_column(index + 1, columns.next())?;
        let value = parse_column(index + 1, columns.next())?;
        samples.push(Sample { time, value });
    }
    Ok(Series { samples })
}

/// Loads a series from a file, see `parse_series`.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<Series, DataError> {
    let path = path.as_ref();
    let wrap = |source: DataError| DataError::File {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let file = File::open(path).map_err(|e| wrap(e.into()))?;
    let series = parse_series(BufReader::new(file)).map_err(wrap)?;
    tracing::debug!(path = %path.display(), samples = series.len(), "loaded series");
    Ok(series)
}

/// A recorded run: the measured process variable and the setpoint it was tracking.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRun {
    /// The measured process variable.
    pub measured: Series,
    /// The setpoint trajectory.
    pub target: Series,
}

impl RecordedRun {
    /// Pairs two series, truncating both to the shorter one and then to `limit` samples.
    pub fn new(mut measured: Series, mut target: Series, limit: Option<usize>) -> Self {
        if measured.len() != target.len() {
            tracing::warn!(
                measured = measured.len(),
                target = target.len(),
                "recorded series differ in length, truncating to the shorter one"
            );
        }
        let len = measured
            .len()
            .min(target.len())
            .min(limit.unwrap_or(usize::MAX));
        measured.truncate(len);
        target.truncate(len);
        Self { measured, target }
    }

    /// Loads the measured and target series from two files, see `RecordedRun::new`.
    pub fn load<P, Q>(measured: P, target: Q, limit: Option<usize>) -> Result<Self, DataError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Ok(Self::new(load_series(measured)?, load_series(target)?, limit))
    }

    /// Number of paired samples.
    pub fn len(&self) -> usize {
        self.measured.len()
    }

    /// Whether the run holds no samples.
    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }
}

/// Writes a `#`-prefixed header line, then one tab-separated line per row.
///
/// The output reads back with `parse_series`, which keeps the first two columns.
pub fn write_series<W, R>(mut writer: W, header: &[&str], rows: R) -> io::Result<()>
where
    W: Write,
    R: IntoIterator,
    R::Item: AsRef<[f64]>,
{
    writeln!(writer, "# {}", header.join("\t"))?;
    for row in rows {
        let line = row
            .as_ref()
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}
