// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::column::ColumnError;

/// Errors associated with reading a mapping file.
#[derive(Error, Debug)]
pub enum MappingFileError {
    #[error("Couldn't read mapping file '{file}': {err}")]
    Read { file: PathBuf, err: std::io::Error },

    #[error("Couldn't parse mapping file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Mapping file column '{0}': 'format' and 'scale' only apply to float columns")]
    FloatOptionsOnNonFloat(String),

    #[error("Mapping file column '{0}': 'coord' columns must have kind 'generic'")]
    CoordOnNonGeneric(String),

    #[error("Mapping file column '{0}': generic columns need a 'coord'")]
    GenericWithoutCoord(String),

    #[error(transparent)]
    Column(#[from] ColumnError),
}
