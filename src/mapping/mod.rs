// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code surrounding the [`IndexMap`] used to contain reusable column
//! definitions.

mod error;

pub use error::MappingFileError;

use std::{collections::HashSet, ops::Deref, path::Path};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::{
    column::{Column, ColumnError, ColumnKind},
    coord::CoordKind,
    srctable::STANDARD_COLUMNS,
};

/// A registry of [`Column`]s, keyed by name.
///
/// Readers use a mapping to find richer conversions for the columns they
/// encounter; writers usually get their column lists from one with
/// [`Mapping::cols`].
#[derive(Debug, Clone, Default)]
pub struct Mapping(IndexMap<String, Column>);

impl Mapping {
    /// Create an empty [`Mapping`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-built column. Fails if the name is taken, unless
    /// `existing_ok`, in which case the old definition is replaced.
    pub fn add_column(&mut self, col: Column, existing_ok: bool) -> Result<(), ColumnError> {
        if !existing_ok && self.0.contains_key(col.name()) {
            return Err(ColumnError::Duplicate(col.name().to_string()));
        }
        self.0.insert(col.name().to_string(), col);
        Ok(())
    }

    /// Register a column with the built-in conversions for its kind.
    pub fn add(
        &mut self,
        name: &str,
        kind: ColumnKind,
        width: usize,
        existing_ok: bool,
    ) -> Result<(), ColumnError> {
        self.add_column(Column::new(name, kind, width)?, existing_ok)
    }

    /// Register a scaled float column. On disk the value is divided by `scale`
    /// and formatted with the printf-style `fmt`; when read it is multiplied by
    /// `scale`.
    pub fn add_float(
        &mut self,
        name: &str,
        fmt: &str,
        width: usize,
        scale: f64,
        existing_ok: bool,
    ) -> Result<(), ColumnError> {
        self.add_column(Column::scaled_float(name, fmt, width, scale)?, existing_ok)
    }

    /// Copy all of the columns in `other` into this mapping, silently
    /// replacing any with the same names.
    pub fn include(&mut self, other: &Mapping) {
        for (name, col) in other.iter() {
            self.0.insert(name.clone(), col.clone());
        }
    }

    /// Get the columns with the given names, in order. Each item may contain
    /// several space-separated names.
    pub fn cols<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Column>, ColumnError> {
        names
            .iter()
            .flat_map(|s| s.as_ref().split_whitespace())
            .map(|name| {
                self.0
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ColumnError::Unknown(name.to_string()))
            })
            .collect()
    }

    /// Parse a TOML mapping file's contents.
    pub fn from_toml_str(s: &str) -> Result<Mapping, MappingFileError> {
        let file: MappingFile = toml::from_str(s)?;

        let mut mapping = Mapping::new();
        if file.include_standard {
            mapping.include(&STANDARD_COLUMNS);
        }
        let mut seen = HashSet::new();
        for spec in file.columns {
            let col = spec.into_column()?;
            // Explicit columns may refine the standard ones, but not each
            // other.
            if !seen.insert(col.name().to_string()) {
                return Err(ColumnError::Duplicate(col.name().to_string()).into());
            }
            let existing_ok = file.include_standard && STANDARD_COLUMNS.contains_key(col.name());
            mapping.add_column(col, existing_ok)?;
        }
        debug!("Mapping file defines {} columns", mapping.len());
        Ok(mapping)
    }

    /// Read a TOML mapping file.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Mapping, MappingFileError> {
        let file = file.as_ref();
        let contents = std::fs::read_to_string(file).map_err(|err| MappingFileError::Read {
            file: file.to_path_buf(),
            err,
        })?;
        Self::from_toml_str(&contents)
    }
}

impl Deref for Mapping {
    type Target = IndexMap<String, Column>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Column> for Mapping {
    /// Later columns replace earlier ones with the same name.
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Mapping(iter.into_iter().map(|c| (c.name().to_string(), c)).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingFile {
    #[serde(default)]
    include_standard: bool,

    #[serde(default, rename = "column")]
    columns: Vec<ColumnSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnSpec {
    name: String,
    kind: ColumnKind,
    width: usize,
    format: Option<String>,
    scale: Option<f64>,
    coord: Option<CoordKind>,
}

impl ColumnSpec {
    fn into_column(self) -> Result<Column, MappingFileError> {
        let ColumnSpec {
            name,
            kind,
            width,
            format,
            scale,
            coord,
        } = self;

        if (format.is_some() || scale.is_some()) && kind != ColumnKind::Float {
            return Err(MappingFileError::FloatOptionsOnNonFloat(name));
        }

        let col = match (kind, coord) {
            (ColumnKind::Generic, Some(coord)) => Column::sexagesimal(name, coord, width)?,
            (ColumnKind::Generic, None) => return Err(MappingFileError::GenericWithoutCoord(name)),
            (_, Some(_)) => return Err(MappingFileError::CoordOnNonGeneric(name)),
            (ColumnKind::Float, None) if format.is_some() || scale.is_some() => {
                Column::scaled_float(
                    name,
                    format.as_deref().unwrap_or("%e"),
                    width,
                    scale.unwrap_or(1.0),
                )?
            }
            (kind, None) => Column::new(name, kind, width)?,
        };
        Ok(col)
    }
}
