// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::tempdir;

use super::*;
use crate::{
    column::{ColumnKind, Value},
    read::{read_table, read_table_file},
    record::Record,
    write::{write_table, write_table_file, FieldFormatError},
};

fn old_cols() -> Vec<Column> {
    vec![
        Column::new("x", ColumnKind::Int, 5).unwrap(),
        Column::new("y", ColumnKind::Float, 8).unwrap(),
        Column::new("name", ColumnKind::Str, 6).unwrap(),
    ]
}

fn old_records() -> Vec<Record> {
    vec![
        Record::new().with("x", 1).with("y", 2.5).with("name", "a"),
        Record::new().with("x", 2).with("y", 3.5).with("name", "b"),
        Record::new().with("x", 3).with_null("y").with("name", "c"),
    ]
}

/// A table of the old records, with the middle one deleted.
fn old_table() -> Vec<u8> {
    let mut buf: Vec<u8> = vec![];
    write_table(&mut buf, &["kept"], &old_cols(), &old_records()).unwrap();
    let recsz = 5 + 8 + 6 + 3 + 1;
    let second_record = buf.len() - 2 * recsz;
    for b in &mut buf[second_record..second_record + recsz - 1] {
        *b = b'-';
    }
    buf
}

#[test]
fn test_recolumn() {
    let new_cols = vec![
        Column::new("name", ColumnKind::Str, 12).unwrap(),
        Column::new("x", ColumnKind::Int, 3).unwrap(),
        Column::new("flag", ColumnKind::Bool, 1).unwrap(),
    ];
    let mut out: Vec<u8> = vec![];
    let n = recolumn(old_table().as_slice(), &mut out, &new_cols).unwrap();
    assert_eq!(n, 2);

    let table = read_table(out.as_slice(), None).unwrap();
    assert_eq!(table.headers, ["kept"]);
    let layout: Vec<(&str, usize)> = table.cols.iter().map(|c| (c.name(), c.width())).collect();
    assert_eq!(layout, [("name", 12), ("x", 3), ("flag", 1)]);

    let recs = table.records.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].recno, 0);
    assert_eq!(recs[0].get_str("name"), Ok(Some("a")));
    assert_eq!(recs[0].get_int("x"), Ok(Some(1)));
    assert_eq!(recs[0].get("flag"), Ok(None));
    assert!(!recs[0].contains("y"));
    // The deleted record is gone.
    assert_eq!(recs[1].recno, 1);
    assert_eq!(recs[1].get_str("name"), Ok(Some("c")));
    assert_eq!(recs[1].get_int("x"), Ok(Some(3)));
}

#[test]
fn test_recolumn_copies_text() {
    // x's text is kept even though its kind changes.
    let new_cols = vec![Column::new("x", ColumnKind::Str, 5).unwrap()];
    let mut out: Vec<u8> = vec![];
    recolumn(old_table().as_slice(), &mut out, &new_cols).unwrap();
    let recs = read_table(out.as_slice(), None)
        .unwrap()
        .records
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(recs[0].get("x"), Ok(Some(&Value::from("1"))));
}

#[test]
fn test_recolumn_too_narrow() {
    let new_cols = vec![Column::new("y", ColumnKind::Float, 2).unwrap()];
    let result = recolumn(old_table().as_slice(), Vec::<u8>::new(), &new_cols);
    assert!(matches!(
        result,
        Err(RecolumnError::Write(WriteTableError::Format {
            recno: 0,
            source: FieldFormatError::Pad(_),
            ..
        }))
    ));
}

#[test]
fn test_recolumn_bad_input() {
    let result = recolumn(&b"not a table"[..], Vec::<u8>::new(), &old_cols());
    assert!(matches!(result, Err(RecolumnError::Read(_))));
}

#[test]
fn test_recolumn_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("srcs.tbl");
    write_table_file(&path, &["kept"], &old_cols(), &old_records()).unwrap();

    let result = recolumn_file(&path, &old_cols()).unwrap();
    assert_eq!(result, Recolumned::Unchanged);

    let mut new_cols = old_cols();
    new_cols.push(Column::new("extra", ColumnKind::Int, 4).unwrap());
    let result = recolumn_file(&path, &new_cols).unwrap();
    assert_eq!(result, Recolumned::Rewritten(3));
    assert!(!dir.path().join("srcs.tbl.new").exists());

    let table = read_table_file(&path, None).unwrap();
    assert_eq!(table.cols.len(), 4);
    let recs = table.records.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[2].get("y"), Ok(None));
    assert_eq!(recs[2].get("extra"), Ok(None));

    // A failed rewrite leaves the original alone.
    let narrow = vec![Column::new("y", ColumnKind::Float, 2).unwrap()];
    assert!(recolumn_file(&path, &narrow).is_err());
    assert!(!dir.path().join("srcs.tbl.new").exists());
    assert_eq!(read_table_file(&path, None).unwrap().cols.len(), 4);
}

#[test]
fn test_recolumn_file_kind_change_rewrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("srcs.tbl");
    write_table_file(&path, &["kept"], &old_cols(), &old_records()).unwrap();

    // Same names and widths; only x's kind differs.
    let mut new_cols = old_cols();
    new_cols[0] = Column::new("x", ColumnKind::Str, 5).unwrap();
    let result = recolumn_file(&path, &new_cols).unwrap();
    assert_eq!(result, Recolumned::Rewritten(3));

    let table = read_table_file(&path, None).unwrap();
    assert_eq!(table.cols[0].kind(), ColumnKind::Str);
    let recs = table.records.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(recs[0].get("x"), Ok(Some(&Value::from("1"))));

    // Now it matches.
    let result = recolumn_file(&path, &new_cols).unwrap();
    assert_eq!(result, Recolumned::Unchanged);
}
