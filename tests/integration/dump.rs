// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indoc::indoc;

use crate::*;

#[test]
fn test_dump_text() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb().arg("dump").arg(&table).ok();
    assert!(cmd.is_ok(), "{:?}", cmd.as_ref().err());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(
        stdout,
        indoc! {"
            # note
            recno|x|y
            0|1|2.5
            1|-3|0.125
        "}
    );
}

#[test]
fn test_dump_json_columns() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb()
        .arg("dump")
        .arg(&table)
        .arg("--json")
        .args(["-c", "y x"])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.as_ref().err());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(
        stdout,
        indoc! {r#"
            {"recno":0,"y":2.5,"x":1}
            {"recno":1,"y":0.125,"x":-3}
        "#}
    );
}

#[test]
fn test_dump_with_mapping() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let mapping = dir.path().join("mapping.toml");
    std::fs::write(
        &mapping,
        indoc! {r#"
            [[column]]
            name = "y"
            kind = "float"
            width = 8
            format = "%.3f"
            scale = 2.0
        "#},
    )
    .unwrap();

    let cmd = flatdb()
        .arg("dump")
        .arg(&table)
        .arg("-m")
        .arg(&mapping)
        .arg("--no-headers")
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.as_ref().err());
    let (stdout, _) = get_cmd_output(cmd);
    assert_eq!(stdout, "0|1|5\n1|-3|0.25\n");
}

#[test]
fn test_dump_unknown_column() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let cmd = flatdb().arg("dump").arg(&table).args(["-c", "nope"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No column named 'nope'"), "{stderr}");
}

#[test]
fn test_dump_bad_mapping() {
    let dir = tmp_dir();
    let table = make_xy_table(&dir, "xy.tbl");
    let mapping = dir.path().join("mapping.toml");
    std::fs::write(&mapping, "[[column]]\nname = \"y\"\n").unwrap();
    let cmd = flatdb().arg("dump").arg(&table).arg("-m").arg(&mapping).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Mapping files are TOML"), "{stderr}");
}
