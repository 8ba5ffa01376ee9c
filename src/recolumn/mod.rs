// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rewriting a table with a different set of columns.
//!
//! Tables are never modified in place; a new table is always written. Fields
//! are copied as text, so values survive even if no conversions are known for
//! them. Columns that weren't in the old table are left blank, and deleted
//! records are dropped.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use log::{debug, info, trace};
use thiserror::Error;

use crate::{
    column::Column,
    read::{read_table_raw, ReadChunk, ReadTableError},
    write::{TableWriter, WriteChunk, WriteTableError},
};

#[derive(Error, Debug)]
pub enum RecolumnError {
    #[error(transparent)]
    Read(#[from] ReadTableError),

    #[error(transparent)]
    Write(#[from] WriteTableError),

    #[error("Couldn't replace '{file}': {err}")]
    Replace { file: PathBuf, err: std::io::Error },
}

/// What [`recolumn_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recolumned {
    /// The table already had exactly these columns.
    Unchanged,

    /// The table was rewritten with this many records.
    Rewritten(usize),
}

/// Copy the table in `source` to `dest`, changing its columns to `cols`. The
/// header lines are kept. Returns the number of records written.
pub fn recolumn<S: ReadChunk, W: WriteChunk>(
    source: S,
    dest: W,
    cols: &[Column],
) -> Result<usize, RecolumnError> {
    let table = read_table_raw(source)?;

    // For each new column, where its text comes from in the old records.
    let sources: Vec<Option<usize>> = cols
        .iter()
        .map(|col| {
            let old = table.cols.iter().position(|c| c.name() == col.name());
            match old {
                Some(i) => trace!("Column '{}': copied from old column {i}", col.name()),
                None => trace!("Column '{}': new; left blank", col.name()),
            }
            old
        })
        .collect();
    for old in table.cols.iter() {
        if !cols.iter().any(|c| c.name() == old.name()) {
            debug!("Dropping column '{}'", old.name());
        }
    }

    let mut writer = TableWriter::new(dest, &table.headers, cols)?;
    for rec in table.records {
        let rec = rec?;
        let fields: Vec<&str> = sources
            .iter()
            .map(|s| s.map(|i| rec.fields[i].as_str()).unwrap_or(""))
            .collect();
        writer.write_raw(&fields)?;
    }
    Ok(writer.finish()?)
}

/// Change the columns of the table at `file`. The new table is written next to
/// the old one (with a `.new` suffix) and then renamed over it. Nothing is
/// written if the columns already match.
///
/// Columns match when their names, widths and kinds are all equal. A change of
/// kind alone still rewrites the table, so that its type codes agree with
/// `cols` and a mapping built from them can read it back.
pub fn recolumn_file<P: AsRef<Path>>(
    file: P,
    cols: &[Column],
) -> Result<Recolumned, RecolumnError> {
    let file = file.as_ref();
    let old = crate::read::read_table_file(file, None)?;
    let same = old.cols.len() == cols.len()
        && old
            .cols
            .iter()
            .zip(cols)
            .all(|(a, b)| a.name() == b.name() && a.width() == b.width() && a.kind() == b.kind());
    drop(old);
    if same {
        debug!("{} already has the requested columns", file.display());
        return Ok(Recolumned::Unchanged);
    }

    let mut new_file = file.as_os_str().to_owned();
    new_file.push(".new");
    let new_file = PathBuf::from(new_file);

    let source = std::fs::File::open(file).map_err(|err| ReadTableError::Open {
        file: file.to_path_buf(),
        err,
    })?;
    let dest = std::fs::File::create(&new_file).map_err(|err| WriteTableError::Create {
        file: new_file.clone(),
        err,
    })?;
    let n = match recolumn(
        std::io::BufReader::new(source),
        std::io::BufWriter::new(dest),
        cols,
    ) {
        Ok(n) => n,
        Err(e) => {
            // Don't leave a half-written table lying around.
            let _ = std::fs::remove_file(&new_file);
            return Err(e);
        }
    };

    std::fs::rename(&new_file, file).map_err(|err| RecolumnError::Replace {
        file: file.to_path_buf(),
        err,
    })?;
    info!("Rewrote {} with {} columns", file.display(), cols.len());
    Ok(Recolumned::Rewritten(n))
}
