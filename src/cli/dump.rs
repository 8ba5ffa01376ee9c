// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to print the contents of flat tables.

use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use itertools::Itertools;

use super::{load_mapping, FlatdbError};
use crate::{column::ColumnError, read::read_table_file, record::Record};

/// Print the header lines and records of a flat table.
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Path to the table.
    #[clap(name = "TABLE", parse(from_os_str))]
    table: PathBuf,

    /// A TOML mapping file describing the columns.
    #[clap(short, long, parse(from_os_str))]
    mapping: Option<PathBuf>,

    /// Use the standard source-table columns.
    #[clap(long)]
    standard: bool,

    /// Only print these columns, in this order. Names may be given as separate
    /// arguments or space-separated in one argument.
    #[clap(short, long, multiple_values(true))]
    columns: Vec<String>,

    /// Print each record as a JSON object on its own line.
    #[clap(long)]
    json: bool,

    /// Don't print the header lines or column names.
    #[clap(long)]
    no_headers: bool,
}

impl DumpArgs {
    pub fn run(&self) -> Result<(), FlatdbError> {
        let mapping = load_mapping(self.mapping.as_deref(), self.standard)?;
        let table = read_table_file(&self.table, mapping.as_ref())?;

        let names: Vec<String> = if self.columns.is_empty() {
            table.cols.iter().map(|c| c.name().to_string()).collect()
        } else {
            self.columns
                .iter()
                .flat_map(|s| s.split_whitespace())
                .map(|name| match table.cols.iter().find(|c| c.name() == name) {
                    Some(_) => Ok(name.to_string()),
                    None => Err(ColumnError::Unknown(name.to_string())),
                })
                .collect::<Result<_, _>>()?
        };

        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        if !self.no_headers && !self.json {
            for header in &table.headers {
                writeln!(out, "# {header}")?;
            }
            writeln!(out, "recno|{}", names.iter().join("|"))?;
        }

        for rec in table.records {
            let rec = rec?;
            if self.json {
                serde_json::to_writer(&mut out, &select(&rec, &names))?;
                writeln!(out)?;
            } else {
                let fields = names.iter().map(|name| match rec.get(name) {
                    Ok(Some(v)) => v.to_string(),
                    _ => String::new(),
                });
                writeln!(out, "{}|{}", rec.recno, fields.format("|"))?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

/// A copy of `rec` with only the named fields, in that order.
fn select(rec: &Record, names: &[String]) -> Record {
    let mut selected = Record::new();
    selected.recno = rec.recno;
    for name in names {
        selected.set(name.as_str(), rec.get(name).ok().flatten().cloned());
    }
    selected
}
