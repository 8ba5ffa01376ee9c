// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to change the columns of flat tables.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use clap::Parser;
use log::info;

use super::{load_mapping, FlatdbError};
use crate::{
    mapping::Mapping,
    read::{read_table_file, ReadTableError},
    recolumn::{recolumn, recolumn_file, Recolumned},
    write::WriteTableError,
};

/// Rewrite a flat table with a different set of columns.
///
/// Existing columns keep their text (re-padded to their new widths), new
/// columns are left blank and deleted records are dropped.
#[derive(Parser, Debug)]
pub struct RecolumnArgs {
    /// Path to the table to be rewritten.
    #[clap(name = "INPUT_TABLE", parse(from_os_str))]
    input: PathBuf,

    /// Where to write the new table. If not given, the input table is
    /// replaced.
    #[clap(name = "OUTPUT_TABLE", parse(from_os_str))]
    output: Option<PathBuf>,

    /// A TOML mapping file defining the new columns. Columns it doesn't
    /// define are taken from the input table.
    #[clap(short, long, parse(from_os_str))]
    mapping: Option<PathBuf>,

    /// Use the standard source-table columns.
    #[clap(long)]
    standard: bool,

    /// The columns of the new table, in order. Names may be given as separate
    /// arguments or space-separated in one argument.
    #[clap(short, long, multiple_values(true), required = true)]
    columns: Vec<String>,
}

impl RecolumnArgs {
    pub fn run(&self) -> Result<(), FlatdbError> {
        // The input's own columns can be reused; the mapping overrides them.
        let mut known: Mapping = read_table_file(&self.input, None)?.cols.into_iter().collect();
        if let Some(mapping) = load_mapping(self.mapping.as_deref(), self.standard)? {
            known.include(&mapping);
        }
        let cols = known.cols(&self.columns)?;

        match &self.output {
            Some(output) => {
                let source = File::open(&self.input).map_err(|err| ReadTableError::Open {
                    file: self.input.clone(),
                    err,
                })?;
                let dest = File::create(output).map_err(|err| WriteTableError::Create {
                    file: output.clone(),
                    err,
                })?;
                let n = recolumn(BufReader::new(source), BufWriter::new(dest), &cols)?;
                info!("Wrote {n} records to {}", output.display());
            }

            None => match recolumn_file(&self.input, &cols)? {
                Recolumned::Unchanged => {
                    info!("{} already has these columns", self.input.display())
                }
                Recolumned::Rewritten(n) => {
                    info!("Rewrote {} with {n} records", self.input.display())
                }
            },
        }
        Ok(())
    }
}
