// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all errors of the `flatdb` binary. This should be the *only*
//! error enum that the binary sees.

use thiserror::Error;

use crate::{
    column::ColumnError,
    mapping::MappingFileError,
    read::ReadTableError,
    recolumn::RecolumnError,
    write::WriteTableError,
};

/// The *only* error that the `flatdb` binary reports. Library errors are
/// flattened into the category that best describes them.
#[derive(Error, Debug)]
pub enum FlatdbError {
    /// A table couldn't be read.
    #[error("{0}")]
    TableRead(String),

    /// A table couldn't be written.
    #[error("{0}")]
    TableWrite(String),

    /// A mapping file couldn't be used.
    #[error("{0}\n\nMapping files are TOML; each [[column]] needs a name, a kind (int, float, str, bool or generic) and a width.")]
    Mapping(String),

    /// A column was badly specified, e.g. on the command line.
    #[error("{0}")]
    Column(String),

    /// Not all of the tables given to `verify` could be read.
    #[error("{0}")]
    Verify(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<ReadTableError> for FlatdbError {
    fn from(e: ReadTableError) -> Self {
        let s = e.to_string();
        match e {
            ReadTableError::IO(_) => Self::Generic(s),
            ReadTableError::Column(_) => Self::Column(s),
            _ => Self::TableRead(s),
        }
    }
}

impl From<WriteTableError> for FlatdbError {
    fn from(e: WriteTableError) -> Self {
        let s = e.to_string();
        match e {
            WriteTableError::IO(_) => Self::Generic(s),
            WriteTableError::Column(_)
            | WriteTableError::NoColumns
            | WriteTableError::TooManyColumns(_)
            | WriteTableError::DuplicateColumn(_)
            | WriteTableError::NoFormatter(_) => Self::Column(s),
            _ => Self::TableWrite(s),
        }
    }
}

impl From<RecolumnError> for FlatdbError {
    fn from(e: RecolumnError) -> Self {
        match e {
            RecolumnError::Read(e) => Self::from(e),
            RecolumnError::Write(e) => Self::from(e),
            RecolumnError::Replace { .. } => Self::Generic(e.to_string()),
        }
    }
}

impl From<MappingFileError> for FlatdbError {
    fn from(e: MappingFileError) -> Self {
        Self::Mapping(e.to_string())
    }
}

impl From<ColumnError> for FlatdbError {
    fn from(e: ColumnError) -> Self {
        Self::Column(e.to_string())
    }
}

impl From<serde_json::Error> for FlatdbError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for FlatdbError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
