// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::*;

#[test]
fn test_verify_good_table() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb().arg("verify").arg(&table).ok();
    assert!(cmd.is_ok(), "verify failed on a good table: {:?}", cmd.as_ref().err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("1 header lines, 2 columns, 2 records"),
        "{stderr}"
    );
}

#[test]
fn test_verify_bad_table() {
    let dir = tmp_dir();
    let good = make_xy_table(&dir, "xy.tbl");
    let bad = dir.path().join("bad.tbl");
    std::fs::write(&bad, "this is not a flat table\n").unwrap();

    let cmd = flatdb().arg("verify").arg(&bad).arg(&good).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    // The good table was still verified.
    assert!(stderr.contains("2 columns, 2 records"), "{stderr}");
    assert!(
        stderr.contains("Error: 1 of 2 tables couldn't be read"),
        "{stderr}"
    );
}

#[test]
fn test_verify_needs_tables() {
    let cmd = flatdb().arg("verify").ok();
    assert!(cmd.is_err());
}
