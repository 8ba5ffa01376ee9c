// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    column::{ColumnError, ConvertError},
    constants::{MAX_NCOLS, MAX_OFFSET},
    pad::PadError,
    record::RecordError,
};

/// Errors associated with writing a flat table.
#[derive(Error, Debug)]
pub enum WriteTableError {
    #[error("Can't write a table without any columns")]
    NoColumns,

    #[error("Can't write a table with {0} columns; tables must have fewer than {MAX_NCOLS}")]
    TooManyColumns(usize),

    #[error("Column '{0}' was given more than once")]
    DuplicateColumn(String),

    #[error("Header line {0} contains a newline")]
    HeaderContainsNewline(usize),

    #[error("The header lines take {0} bytes; they must finish before byte {MAX_OFFSET} of the table")]
    HeaderTooLarge(usize),

    #[error("Column '{0}' has no format function; generic columns need custom conversions")]
    NoFormatter(String),

    #[error("Couldn't write the descriptor for a column: {0}")]
    Descriptor(#[from] PadError),

    #[error("Couldn't format row {recno} in column {colname}: {source}")]
    Format {
        recno: usize,
        colname: String,
        source: FieldFormatError,
    },

    #[error("Row {recno} can't be written: {source}")]
    MissingField {
        recno: usize,
        source: RecordError,
    },

    #[error("Row {recno} has {got} fields, but the table has {expected} columns")]
    WrongFieldCount {
        recno: usize,
        expected: usize,
        got: usize,
    },

    #[error("Couldn't create table '{file}': {err}")]
    Create { file: PathBuf, err: std::io::Error },

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Why a single field couldn't be written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldFormatError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Pad(#[from] PadError),
}
