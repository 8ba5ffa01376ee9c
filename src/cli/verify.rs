// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to verify flat tables.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use super::{load_mapping, FlatdbError};
use crate::{
    mapping::Mapping,
    read::{read_table_file, ReadTableError},
};

/// Verify that flat tables can be read, and print a summary of each.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path to the table(s) to be verified.
    #[clap(name = "TABLES", parse(from_os_str), required = true)]
    tables: Vec<PathBuf>,

    /// A TOML mapping file describing the columns. Without one, every field is
    /// parsed with the built-in conversions for its column's type.
    #[clap(short, long, parse(from_os_str))]
    mapping: Option<PathBuf>,

    /// Use the standard source-table columns.
    #[clap(long)]
    standard: bool,
}

impl VerifyArgs {
    pub fn run(&self) -> Result<(), FlatdbError> {
        let mapping = load_mapping(self.mapping.as_deref(), self.standard)?;
        let num_bad = verify(&self.tables, mapping.as_ref());
        if num_bad > 0 {
            return Err(FlatdbError::Verify(format!(
                "{num_bad} of {} tables couldn't be read",
                self.tables.len()
            )));
        }
        Ok(())
    }
}

/// Read and print stats out for each table. If a table couldn't be read, print
/// the error, and continue trying to read the other tables. Returns the number
/// of tables that couldn't be read.
fn verify<P: AsRef<Path>>(tables: &[P], mapping: Option<&Mapping>) -> usize {
    let mut num_bad = 0;
    for table in tables {
        let table = table.as_ref();
        info!("{}:", table.display());
        if let Err(e) = verify_one(table, mapping) {
            info!("    {}", e);
            num_bad += 1;
        }
        info!("");
    }
    num_bad
}

fn verify_one(file: &Path, mapping: Option<&Mapping>) -> Result<(), ReadTableError> {
    let table = read_table_file(file, mapping)?;
    let num_headers = table.headers.len();
    let cols = table.cols;
    let mut num_records = 0;
    for rec in table.records {
        rec?;
        num_records += 1;
    }

    info!(
        "    {num_headers} header lines, {} columns, {num_records} records",
        cols.len()
    );
    for col in &cols {
        info!(
            "    {:<15} {:>3} {}",
            col.name(),
            col.width(),
            col.kind()
        );
    }
    Ok(())
}
