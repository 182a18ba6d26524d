//! CSV output backed by the `csv` crate.

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::Utf8Path;

use crate::error::ExportError;

use super::emitter::RowSink;
use super::row::ExportRow;

/// Writes a header followed by width-checked rows.
///
/// Rows go through [`ExportRow::checked`] again before serialisation so a
/// ragged row can never reach the file.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
    width: usize,
}

impl CsvOutput<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the header.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the file cannot be created or the
    /// header cannot be written.
    pub fn create(path: &Utf8Path, header: &[String]) -> Result<Self, ExportError> {
        let file = File::create(path).map_err(|error| ExportError::Io {
            message: format!("failed to create {path}: {error}"),
        })?;
        Self::from_writer(BufWriter::new(file), header)
    }
}

impl<W: Write> CsvOutput<W> {
    /// Wraps an arbitrary writer and writes the header.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the header cannot be written.
    pub fn from_writer(inner: W, header: &[String]) -> Result<Self, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer
            .write_record(header)
            .map_err(|error| csv_error(&error))?;
        Ok(Self {
            writer,
            width: header.len(),
        })
    }

    /// Flushes all buffered output and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when flushing fails.
    pub fn finish(self) -> Result<W, ExportError> {
        self.writer.into_inner().map_err(|error| ExportError::Io {
            message: format!("failed to flush CSV output: {}", error.error()),
        })
    }
}

impl<W: Write> RowSink for CsvOutput<W> {
    fn write_row(&mut self, row: &ExportRow) -> Result<(), ExportError> {
        let checked = row.clone().checked(self.width)?;
        self.writer
            .write_record(checked.cells())
            .map_err(|error| csv_error(&error))?;
        Ok(())
    }
}

fn csv_error(error: &csv::Error) -> ExportError {
    ExportError::Io {
        message: format!("CSV write failed: {error}"),
    }
}
