// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::{
    constants::{MAX_COL_WIDTH, W_HEADER_NAME},
    coord::SexagesimalError,
};

/// Errors associated with defining columns and mappings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Column name '{0}' is longer than {W_HEADER_NAME} bytes")]
    NameTooLong(String),

    #[error("Column name '{0}' is reserved")]
    ReservedName(String),

    #[error("Column '{name}': width {width} is out of range (0 < width < {MAX_COL_WIDTH})")]
    InvalidWidth { name: String, width: usize },

    #[error("Column '{0}' is already defined")]
    Duplicate(String),

    #[error("No column named '{0}' has been defined")]
    Unknown(String),

    #[error("Invalid float format '{0}'; expected something like '%.3f', '%+e' or '%9.5g'")]
    InvalidFloatFormat(String),
}

/// Errors associated with converting a single value to or from its text
/// representation.
#[derive(Error, Debug, Clone, PartialEq, strum_macros::IntoStaticStr)]
pub enum ConvertError {
    #[error("Couldn't parse '{text}' as an integer: {source}")]
    Int {
        text: String,
        source: ParseIntError,
    },

    #[error("Couldn't parse '{text}' as a float: {source}")]
    Float {
        text: String,
        source: ParseFloatError,
    },

    #[error("'{0}' is not a boolean (expected one of '+', 'T', 'Y', '.', 'F', 'N')")]
    Bool(String),

    #[error("Can't format a {got} value in a {expected} column")]
    WrongVariant {
        expected: &'static str,
        got: &'static str,
    },

    #[error(transparent)]
    Sexagesimal(#[from] SexagesimalError),

    #[error("{0}")]
    Custom(String),
}

impl ConvertError {
    /// The name of this kind of error, e.g. "Int" or "Sexagesimal".
    pub fn class(&self) -> &'static str {
        self.into()
    }
}
