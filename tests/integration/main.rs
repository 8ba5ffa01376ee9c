// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod dump;
mod recolumn;
mod verify;

use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use assert_cmd::{output::OutputError, Command};
use tempfile::TempDir;

use flatdb::{write_table_file, Column, ColumnKind, Record};

fn flatdb() -> Command {
    Command::cargo_bin("flatdb").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write the two-record "x"/"y" table into `dir`.
fn make_xy_table<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    let path = dir.as_ref().join(name);
    let cols = [
        Column::new("x", ColumnKind::Int, 5).unwrap(),
        Column::new("y", ColumnKind::Float, 8).unwrap(),
    ];
    let recs = [
        Record::new().with("x", 1).with("y", 2.5),
        Record::new().with("x", -3).with("y", 0.125),
    ];
    write_table_file(&path, &["note"], &cols, &recs).unwrap();
    path
}

fn tmp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}
