// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing flat tables.
//!
//! The layout (preamble, header lines and column descriptors) is written as
//! soon as a [`TableWriter`] is created, then each record is formatted and
//! written in turn. Nothing is ever rewritten, so any [`std::io::Write`] (or a
//! closure wrapped in [`FnSink`]) can be a destination.

mod error;

pub use error::{FieldFormatError, WriteTableError};

use std::{
    fs::File,
    io::{LineWriter, Write},
    path::Path,
};

use itertools::Itertools;
use log::debug;

use crate::{
    column::Column,
    constants::*,
    pad::{pad, pad_display},
    record::FieldSource,
};

/// Anything that tables can be written to.
pub trait WriteChunk {
    /// Write all of `data`.
    fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()>;

    /// Called once everything has been written.
    fn flush_chunks(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<W: Write> WriteChunk for W {
    fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.write_all(data)
    }

    fn flush_chunks(&mut self) -> std::io::Result<()> {
        self.flush()
    }
}

/// Write a table through a closure. Each call gets either the whole table
/// layout or one whole record.
pub struct FnSink<F>(pub F);

impl<F> WriteChunk for FnSink<F>
where
    F: FnMut(&[u8]) -> std::io::Result<()>,
{
    fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        (self.0)(data)
    }
}

/// Writes the records of a single table.
pub struct TableWriter<W> {
    dest: W,
    cols: Vec<Column>,
    num_records: usize,
    line: String,
}

impl<W: WriteChunk> TableWriter<W> {
    /// Check the columns and write everything that comes before the records.
    pub fn new<H: AsRef<str>>(
        mut dest: W,
        headers: &[H],
        cols: &[Column],
    ) -> Result<TableWriter<W>, WriteTableError> {
        let cols = check_columns(cols)?;
        let header_text = header_block(headers)?;

        let ncols = cols.len();
        let ciofs = PREAMBLE_LEN + header_text.len();
        if ciofs >= MAX_OFFSET {
            return Err(WriteTableError::HeaderTooLarge(header_text.len()));
        }
        let dofs = ciofs + ncols * DESCRIPTOR_LEN + 1;
        debug!("Writing a table with {ncols} columns; column info at {ciofs}, data at {dofs}");

        let mut layout = String::with_capacity(dofs);
        layout.push_str(&pad_display(ncols, W_HEADER_INT)?);
        layout.push(FIELD_SEP as char);
        layout.push_str(&pad_display(ciofs, W_HEADER_INT)?);
        layout.push(FIELD_SEP as char);
        layout.push_str(&pad_display(dofs, W_HEADER_INT)?);
        layout.push('\n');
        layout.push_str(&header_text);
        for col in &cols {
            layout.push_str(&pad(col.name(), W_HEADER_NAME)?);
            layout.push(DESCRIPTOR_SEP as char);
            layout.push_str(&pad_display(col.width(), W_HEADER_INT)?);
            layout.push(DESCRIPTOR_SEP as char);
            layout.push_str(&pad_display(col.kind().type_code(), W_HEADER_INT)?);
            layout.push(FIELD_SEP as char);
        }
        layout.push('\n');
        debug_assert_eq!(layout.len(), dofs);
        dest.write_chunk(layout.as_bytes())?;

        let recsz = cols.iter().map(|c| c.width() + 1).sum::<usize>() + 1;
        Ok(TableWriter {
            dest,
            cols,
            num_records: 0,
            line: String::with_capacity(recsz),
        })
    }

    /// Format and write one record. Empty fields are written for `None`
    /// values without consulting the column's format function.
    pub fn write_record<R: FieldSource + ?Sized>(&mut self, rec: &R) -> Result<(), WriteTableError> {
        let recno = self.num_records;
        self.line.clear();
        for col in &self.cols {
            let value = rec
                .field(col.name())
                .map_err(|source| WriteTableError::MissingField { recno, source })?;
            let text = match value {
                None => String::new(),
                Some(value) => {
                    let format = col
                        .formatter()
                        .ok_or_else(|| WriteTableError::NoFormatter(col.name().to_string()))?;
                    format(&value).map_err(|e| format_error(recno, col, e))?
                }
            };
            let field = pad(&text, col.width()).map_err(|e| format_error(recno, col, e))?;
            self.line.push_str(&field);
            self.line.push(FIELD_SEP as char);
        }
        self.line.push('\n');
        self.dest.write_chunk(self.line.as_bytes())?;
        self.num_records += 1;
        Ok(())
    }

    /// Write a record from already-formatted field texts, in column order.
    pub(crate) fn write_raw<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), WriteTableError> {
        let recno = self.num_records;
        if fields.len() != self.cols.len() {
            return Err(WriteTableError::WrongFieldCount {
                recno,
                expected: self.cols.len(),
                got: fields.len(),
            });
        }
        self.line.clear();
        for (col, text) in self.cols.iter().zip(fields) {
            let field = pad(text.as_ref(), col.width()).map_err(|e| format_error(recno, col, e))?;
            self.line.push_str(&field);
            self.line.push(FIELD_SEP as char);
        }
        self.line.push('\n');
        self.dest.write_chunk(self.line.as_bytes())?;
        self.num_records += 1;
        Ok(())
    }

    /// The number of records written so far.
    pub fn num_records(&self) -> usize {
        self.num_records
    }

    /// Flush the destination, returning the number of records written.
    pub fn finish(mut self) -> Result<usize, WriteTableError> {
        self.dest.flush_chunks()?;
        debug!("Wrote {} records", self.num_records);
        Ok(self.num_records)
    }
}

/// Write a whole table, returning the number of records written.
pub fn write_table<W, H, I>(
    dest: W,
    headers: &[H],
    cols: &[Column],
    records: I,
) -> Result<usize, WriteTableError>
where
    W: WriteChunk,
    H: AsRef<str>,
    I: IntoIterator,
    I::Item: FieldSource,
{
    let mut writer = TableWriter::new(dest, headers, cols)?;
    for rec in records {
        writer.write_record(&rec)?;
    }
    writer.finish()
}

/// Create (or truncate) `file` and [`write_table`] to it.
pub fn write_table_file<P, H, I>(
    file: P,
    headers: &[H],
    cols: &[Column],
    records: I,
) -> Result<usize, WriteTableError>
where
    P: AsRef<Path>,
    H: AsRef<str>,
    I: IntoIterator,
    I::Item: FieldSource,
{
    let file = file.as_ref();
    debug!("Writing table {}", file.display());
    let f = File::create(file).map_err(|err| WriteTableError::Create {
        file: file.to_path_buf(),
        err,
    })?;
    write_table(LineWriter::new(f), headers, cols, records)
}

/// Validate the columns and make sure they all have format functions.
fn check_columns(cols: &[Column]) -> Result<Vec<Column>, WriteTableError> {
    if cols.is_empty() {
        return Err(WriteTableError::NoColumns);
    }
    if cols.len() >= MAX_NCOLS {
        return Err(WriteTableError::TooManyColumns(cols.len()));
    }
    if let Some(name) = cols.iter().map(|c| c.name()).duplicates().next() {
        return Err(WriteTableError::DuplicateColumn(name.to_string()));
    }

    cols.iter()
        .map(|col| {
            let mut col = col.clone();
            col.fixup()?;
            match col.formatter() {
                Some(_) => Ok(col),
                None => Err(WriteTableError::NoFormatter(col.name().to_string())),
            }
        })
        .collect()
}

fn header_block<H: AsRef<str>>(headers: &[H]) -> Result<String, WriteTableError> {
    let mut text = String::new();
    for (i, header) in headers.iter().enumerate() {
        let header = header.as_ref();
        if header.contains(['\n', '\r']) {
            return Err(WriteTableError::HeaderContainsNewline(i));
        }
        text.push_str(header);
        text.push('\n');
    }
    Ok(text)
}

fn format_error<E: Into<FieldFormatError>>(recno: usize, col: &Column, e: E) -> WriteTableError {
    WriteTableError::Format {
        recno,
        colname: col.name().to_string(),
        source: e.into(),
    }
}
