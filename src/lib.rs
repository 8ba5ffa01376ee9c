// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
A very quick flat-text database.

A flat table is a text file of fixed-width records. It starts with a small
preamble, some free-text header lines and a description of each column (name,
width and type), so any table can be read without knowing its schema. Records
are read lazily, one at a time, and written in a single forward pass.

```
use flatdb::{read_table, write_table, Column, ColumnKind, Record};

let cols = [
    Column::new("x", ColumnKind::Int, 5).unwrap(),
    Column::new("y", ColumnKind::Float, 8).unwrap(),
];
let recs = [Record::new().with("x", 1).with("y", 2.5)];
let mut buf: Vec<u8> = vec![];
write_table(&mut buf, &["a header line"], &cols, &recs).unwrap();

let table = read_table(buf.as_slice(), None).unwrap();
assert_eq!(table.headers, ["a header line"]);
for rec in table.records {
    let rec = rec.unwrap();
    assert_eq!(rec.get_int("x").unwrap(), Some(1));
}
```
 */

mod cli;
pub mod column;
pub mod constants;
pub mod coord;
pub mod mapping;
pub mod pad;
pub mod read;
pub mod recolumn;
pub mod record;
pub mod srctable;
pub mod write;

// Re-exports.
pub use cli::{Flatdb, FlatdbError};
pub use column::{Column, ColumnError, ColumnKind, ColumnOverrides, ConvertError, Value};
pub use mapping::{Mapping, MappingFileError};
pub use pad::{pad, unpad, PadError};
pub use read::{read_table, read_table_file, read_table_with, ReadTableError};
pub use recolumn::{recolumn, recolumn_file, RecolumnError};
pub use record::{FieldSource, FillRecord, Record};
pub use write::{write_table, write_table_file, TableWriter, WriteTableError};
