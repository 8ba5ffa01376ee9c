// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;

use crate::*;
use flatdb::read_table_file;

#[test]
fn test_recolumn_to_new_file() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let output = dir.path().join("new.tbl");
    let mapping = dir.path().join("mapping.toml");
    std::fs::write(
        &mapping,
        indoc! {r#"
            [[column]]
            name = "flag"
            kind = "bool"
            width = 1
        "#},
    )
    .unwrap();

    let cmd = flatdb()
        .arg("recolumn")
        .arg(&table)
        .arg(&output)
        .arg("-m")
        .arg(&mapping)
        .args(["-c", "y flag x"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.as_ref().err());

    let new = read_table_file(&output, None).unwrap();
    assert_eq!(new.headers, ["note"]);
    let names: Vec<&str> = new.cols.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["y", "flag", "x"]);
    let recs = new.records.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[1].get_int("x").unwrap(), Some(-3));
    assert_eq!(recs[1].get_bool("flag").unwrap(), None);

    // The input is untouched.
    assert_eq!(read_table_file(&table, None).unwrap().cols.len(), 2);
}

#[test]
fn test_recolumn_in_place() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb().arg("recolumn").arg(&table).args(["-c", "x"]).ok();
    assert!(cmd.is_ok(), "{:?}", cmd.as_ref().err());

    let new = read_table_file(&table, None).unwrap();
    assert_eq!(new.cols.len(), 1);
    assert_eq!(new.records.count(), 2);
}

#[test]
fn test_recolumn_unknown_column() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb().arg("recolumn").arg(&table).args(["-c", "z"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No column named 'z'"), "{stderr}");
}

#[test]
fn test_recolumn_needs_columns() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb().arg("recolumn").arg(&table).ok();
    assert!(cmd.is_err());
}
