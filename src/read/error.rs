// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    column::{ColumnError, ColumnKind, ConvertError},
    constants::{MAX_COL_WIDTH, MAX_NCOLS, MAX_OFFSET, PREAMBLE_LEN},
};

/// Errors associated with reading a flat table.
#[derive(Error, Debug)]
pub enum ReadTableError {
    #[error("Couldn't parse the table's {field} from '{text}'; is this a flat table?")]
    MalformedPreamble { field: &'static str, text: String },

    #[error("Table claims to have {0} columns (must be 0 < ncols < {MAX_NCOLS})")]
    InvalidNcols(i64),

    #[error("Table's column info offset {0} is invalid (must be {PREAMBLE_LEN} <= offset < {MAX_OFFSET})")]
    InvalidColumnInfoOffset(i64),

    #[error("Table's data offset {dofs} is invalid; the column info ends at {current} and the gap must be smaller than {MAX_OFFSET}")]
    InvalidDataOffset { dofs: i64, current: usize },

    #[error("Column descriptor {index}: couldn't parse a width from '{text}'")]
    MalformedWidth { index: usize, text: String },

    #[error("Column '{name}' has an on-disk width of {width} (must be 0 < width < {MAX_COL_WIDTH})")]
    InvalidColumnWidth { name: String, width: i64 },

    #[error("Column '{name}' has an unrecognised type code '{code}'")]
    UnknownTypeCode { name: String, code: String },

    #[error("Column '{name}' is stored as {on_disk}, but the mapping says it is {mapping}")]
    KindMismatch {
        name: String,
        on_disk: ColumnKind,
        mapping: ColumnKind,
    },

    #[error("Column '{0}' has no parse function; generic columns need custom conversions")]
    NoParser(String),

    #[error("Table ended unexpectedly while reading the {0}")]
    UnexpectedEof(&'static str),

    #[error("The table's {0} is not valid UTF-8")]
    NonUtf8(&'static str),

    #[error("Exception while parsing value \"{value}\" of row {recno} in column {colname}: {source} ({})", .source.class())]
    Parse {
        recno: usize,
        colname: String,
        value: String,
        source: ConvertError,
    },

    #[error("Row {recno} is truncated: expected {expected} bytes, but only {got} remain")]
    TruncatedRecord {
        recno: usize,
        expected: usize,
        got: usize,
    },

    #[error("Row {recno} doesn't end with a newline; the column widths don't match the data")]
    MissingNewline { recno: usize },

    #[error("Row {recno}, column {colname}: field is not valid UTF-8")]
    InvalidUtf8 { recno: usize, colname: String },

    #[error("Couldn't open table '{file}': {err}")]
    Open { file: PathBuf, err: std::io::Error },

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
