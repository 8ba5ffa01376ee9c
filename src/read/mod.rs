// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading flat tables.
//!
//! A table is read in one forward pass. The preamble, header lines and column
//! descriptors are decoded eagerly; the records are decoded lazily as the
//! returned iterator is consumed. Nothing ever seeks, so any [`std::io::Read`]
//! (or a closure wrapped in [`FnSource`]) can be a source.

mod error;

pub use error::ReadTableError;

use std::{
    fs::File,
    io::{BufReader, Read},
    marker::PhantomData,
    path::Path,
};

use log::{debug, trace, warn};

use crate::{
    column::{Column, ColumnKind, ColumnOverrides},
    constants::*,
    mapping::Mapping,
    pad::unpad,
    record::{FillRecord, Record},
};

/// Anything that tables can be read from.
pub trait ReadChunk {
    /// Read up to `n` bytes. Fewer than `n` bytes may only be returned at the
    /// end of the stream, and an empty result means the stream is exhausted.
    fn read_chunk(&mut self, n: usize) -> std::io::Result<Vec<u8>>;
}

impl<R: Read> ReadChunk for R {
    fn read_chunk(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(n);
        self.by_ref().take(n as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Read a table from a closure with the same contract as
/// [`ReadChunk::read_chunk`].
pub struct FnSource<F>(pub F);

impl<F> ReadChunk for FnSource<F>
where
    F: FnMut(usize) -> std::io::Result<Vec<u8>>,
{
    fn read_chunk(&mut self, n: usize) -> std::io::Result<Vec<u8>> {
        (self.0)(n)
    }
}

/// A table whose layout has been read, but whose records are still in the
/// stream.
#[derive(Debug)]
pub struct StreamedTable<I> {
    /// The free-text header lines, without their newlines.
    pub headers: Vec<String>,

    /// The columns in on-disk order, resolved against the mapping (if any).
    pub cols: Vec<Column>,

    /// The records. These can only be iterated over once.
    pub records: I,
}

/// The default record iterator, producing [`Record`]s.
pub type RecordIter<S> = Records<S, Record, fn() -> Record>;

/// Read a table into [`Record`]s. Columns are given richer conversions by
/// `mapping` when it has a column of the same name; other columns get the
/// built-in conversions for their on-disk kind.
pub fn read_table<S: ReadChunk>(
    source: S,
    mapping: Option<&Mapping>,
) -> Result<StreamedTable<RecordIter<S>>, ReadTableError> {
    read_table_with(source, mapping, Record::new as fn() -> Record)
}

/// Like [`read_table`], but each record is a fresh value from `new_record`.
pub fn read_table_with<S, R, F>(
    mut source: S,
    mapping: Option<&Mapping>,
    new_record: F,
) -> Result<StreamedTable<Records<S, R, F>>, ReadTableError>
where
    S: ReadChunk,
    R: FillRecord,
    F: FnMut() -> R,
{
    let (headers, cols) = read_layout(&mut source, mapping)?;
    let records = Records {
        rows: RowReader::new(source, &cols),
        cols: cols.clone(),
        new_record,
        _record: PhantomData,
    };
    Ok(StreamedTable {
        headers,
        cols,
        records,
    })
}

/// Open the table at `file` and read it with [`read_table`].
pub fn read_table_file<P: AsRef<Path>>(
    file: P,
    mapping: Option<&Mapping>,
) -> Result<StreamedTable<RecordIter<BufReader<File>>>, ReadTableError> {
    let file = file.as_ref();
    debug!("Reading table {}", file.display());
    let f = File::open(file).map_err(|err| ReadTableError::Open {
        file: file.to_path_buf(),
        err,
    })?;
    read_table(BufReader::new(f), mapping)
}

/// Read a table without converting any fields. Each record is just the
/// unpadded text of its fields.
pub fn read_table_raw<S: ReadChunk>(
    mut source: S,
) -> Result<StreamedTable<RawRecords<S>>, ReadTableError> {
    let (headers, cols) = read_layout(&mut source, None)?;
    let records = RawRecords {
        rows: RowReader::new(source, &cols),
        cols: cols.clone(),
    };
    Ok(StreamedTable {
        headers,
        cols,
        records,
    })
}

/// Decoded records of a table.
pub struct Records<S, R, F> {
    rows: RowReader<S>,
    cols: Vec<Column>,
    new_record: F,
    _record: PhantomData<fn() -> R>,
}

impl<S, R, F> Records<S, R, F> {
    fn decode(&mut self, recno: usize, chunk: &[u8]) -> Result<R, ReadTableError>
    where
        R: FillRecord,
        F: FnMut() -> R,
    {
        let mut rec = (self.new_record)();
        rec.set_recno(recno);
        for (col, field) in split_fields(chunk, &self.cols) {
            let text = std::str::from_utf8(field).map_err(|_| ReadTableError::InvalidUtf8 {
                recno,
                colname: col.name().to_string(),
            })?;
            let value = match unpad(text) {
                "" => None,
                unpadded => {
                    let parse = col
                        .parser()
                        .ok_or_else(|| ReadTableError::NoParser(col.name().to_string()))?;
                    let value = parse(unpadded).map_err(|source| ReadTableError::Parse {
                        recno,
                        colname: col.name().to_string(),
                        value: text.to_string(),
                        source,
                    })?;
                    Some(value)
                }
            };
            rec.set_field(col.name(), value);
        }
        Ok(rec)
    }
}

impl<S, R, F> Iterator for Records<S, R, F>
where
    S: ReadChunk,
    R: FillRecord,
    F: FnMut() -> R,
{
    type Item = Result<R, ReadTableError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (recno, chunk) = match self.rows.next_row()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };
        let result = self.decode(recno, &chunk);
        if result.is_err() {
            self.rows.done = true;
        }
        Some(result)
    }
}

/// The unconverted fields of a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub recno: usize,

    /// The unpadded text of each field, in column order. Empty fields are
    /// empty strings.
    pub fields: Vec<String>,
}

/// Unconverted records of a table.
pub struct RawRecords<S> {
    rows: RowReader<S>,
    cols: Vec<Column>,
}

impl<S: ReadChunk> Iterator for RawRecords<S> {
    type Item = Result<RawRecord, ReadTableError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (recno, chunk) = match self.rows.next_row()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e)),
        };
        let fields = split_fields(&chunk, &self.cols)
            .map(|(col, field)| match std::str::from_utf8(field) {
                Ok(text) => Ok(unpad(text).to_string()),
                Err(_) => Err(ReadTableError::InvalidUtf8 {
                    recno,
                    colname: col.name().to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>();
        match fields {
            Ok(fields) => Some(Ok(RawRecord { recno, fields })),
            Err(e) => {
                self.rows.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Pulls whole records out of the data section, skipping deleted ones.
struct RowReader<S> {
    source: S,
    /// The offset of the first separator in each record.
    first_sep: usize,
    recsz: usize,
    recno: usize,
    num_deleted: usize,
    done: bool,
}

impl<S: ReadChunk> RowReader<S> {
    fn new(source: S, cols: &[Column]) -> Self {
        let recsz = cols.iter().map(|c| c.width() + 1).sum::<usize>() + 1;
        trace!("Records are {recsz} bytes long");
        RowReader {
            source,
            first_sep: cols.first().map(|c| c.width()).unwrap_or(0),
            recsz,
            recno: 0,
            num_deleted: 0,
            done: false,
        }
    }

    /// The next live record and its 0-based number.
    fn next_row(&mut self) -> Option<Result<(usize, Vec<u8>), ReadTableError>> {
        while !self.done {
            let chunk = match self.source.read_chunk(self.recsz) {
                Ok(c) => c,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            if chunk.is_empty() {
                self.done = true;
                debug!("Table had {} records", self.recno);
                if self.num_deleted > 0 {
                    warn!("Skipped {} deleted records", self.num_deleted);
                }
                return None;
            }

            let recno = self.recno;
            self.recno += 1;
            if chunk.len() < self.recsz {
                self.done = true;
                return Some(Err(ReadTableError::TruncatedRecord {
                    recno,
                    expected: self.recsz,
                    got: chunk.len(),
                }));
            }
            if chunk[self.recsz - 1] != b'\n' {
                self.done = true;
                return Some(Err(ReadTableError::MissingNewline { recno }));
            }
            if chunk[self.first_sep] == DELETED_MARKER {
                trace!("Record {recno} is deleted");
                self.num_deleted += 1;
                continue;
            }

            return Some(Ok((recno, chunk)));
        }
        None
    }
}

fn split_fields<'a>(
    chunk: &'a [u8],
    cols: &'a [Column],
) -> impl Iterator<Item = (&'a Column, &'a [u8])> + 'a {
    let mut offset = 0;
    cols.iter().map(move |col| {
        let field = &chunk[offset..offset + col.width()];
        offset += col.width() + 1;
        (col, field)
    })
}

/// Read everything before the records: the preamble, the header lines and the
/// column descriptors. The source is left at the start of the data section.
fn read_layout<S: ReadChunk>(
    source: &mut S,
    mapping: Option<&Mapping>,
) -> Result<(Vec<String>, Vec<Column>), ReadTableError> {
    let ncols = read_preamble_int(source, "number of columns")?;
    let ciofs = read_preamble_int(source, "column info offset")?;
    let dofs = read_preamble_int(source, "data offset")?;
    debug!("Table has {ncols} columns; column info at {ciofs}, data at {dofs}");

    if ncols <= 0 || ncols >= MAX_NCOLS as i64 {
        return Err(ReadTableError::InvalidNcols(ncols));
    }
    if ciofs < PREAMBLE_LEN as i64 || ciofs >= MAX_OFFSET as i64 {
        return Err(ReadTableError::InvalidColumnInfoOffset(ciofs));
    }
    let ncols = ncols as usize;
    let ciofs = ciofs as usize;

    let headers = if ciofs == PREAMBLE_LEN {
        vec![]
    } else {
        read_text(source, ciofs - PREAMBLE_LEN, "header lines")?
            .lines()
            .map(|l| l.to_string())
            .collect()
    };
    trace!("Table has {} header lines", headers.len());

    let mut cols = Vec::with_capacity(ncols);
    for index in 0..ncols {
        cols.push(read_descriptor(source, index, mapping)?);
    }

    let current = ciofs + ncols * DESCRIPTOR_LEN;
    if dofs < current as i64 || dofs - current as i64 >= MAX_OFFSET as i64 {
        return Err(ReadTableError::InvalidDataOffset { dofs, current });
    }
    // This includes the newline after the descriptors.
    let gap = dofs as usize - current;
    if source.read_chunk(gap)?.len() < gap {
        return Err(ReadTableError::UnexpectedEof("column info"));
    }

    Ok((headers, cols))
}

fn read_descriptor<S: ReadChunk>(
    source: &mut S,
    index: usize,
    mapping: Option<&Mapping>,
) -> Result<Column, ReadTableError> {
    let name = read_text(source, W_HEADER_NAME, "column descriptors")?;
    let name = unpad(&name).to_string();
    skip_sep(source)?;

    let text = read_text(source, W_HEADER_INT, "column descriptors")?;
    let width: i64 = text
        .trim()
        .parse()
        .map_err(|_| ReadTableError::MalformedWidth { index, text })?;
    skip_sep(source)?;

    let code = read_text(source, W_HEADER_INT, "column descriptors")?;
    let code = unpad(&code).trim_start();
    skip_sep(source)?;

    let kind = ColumnKind::from_type_code(code).ok_or_else(|| ReadTableError::UnknownTypeCode {
        name: name.clone(),
        code: code.to_string(),
    })?;
    if width <= 0 || width >= MAX_COL_WIDTH as i64 {
        return Err(ReadTableError::InvalidColumnWidth { name, width });
    }
    let width = width as usize;

    let col = match mapping.and_then(|m| m.get(&name)) {
        Some(known) => {
            if known.kind() != kind {
                return Err(ReadTableError::KindMismatch {
                    name,
                    on_disk: kind,
                    mapping: known.kind(),
                });
            }
            if known.width() != width {
                trace!(
                    "Column '{name}': using on-disk width {width} rather than {}",
                    known.width()
                );
            } else {
                trace!("Column '{name}': found in mapping");
            }
            known.clone_with(ColumnOverrides {
                width: Some(width),
                ..Default::default()
            })?
        }
        None => {
            trace!("Column '{name}': not in mapping; using built-in {kind} conversions");
            Column::fallback(name, kind, width)?
        }
    };

    if col.parser().is_none() {
        return Err(ReadTableError::NoParser(col.name().to_string()));
    }
    Ok(col)
}

fn read_text<S: ReadChunk>(
    source: &mut S,
    n: usize,
    what: &'static str,
) -> Result<String, ReadTableError> {
    let bytes = source.read_chunk(n)?;
    if bytes.len() < n {
        return Err(ReadTableError::UnexpectedEof(what));
    }
    String::from_utf8(bytes).map_err(|_| ReadTableError::NonUtf8(what))
}

/// Read one integer of the preamble, and the separator after it.
fn read_preamble_int<S: ReadChunk>(
    source: &mut S,
    field: &'static str,
) -> Result<i64, ReadTableError> {
    let text = read_text(source, W_HEADER_INT, "preamble")?;
    let i = text
        .trim()
        .parse()
        .map_err(|_| ReadTableError::MalformedPreamble { field, text })?;
    skip_sep(source)?;
    Ok(i)
}

fn skip_sep<S: ReadChunk>(source: &mut S) -> Result<(), ReadTableError> {
    match source.read_chunk(1)?.len() {
        1 => Ok(()),
        _ => Err(ReadTableError::UnexpectedEof("table layout")),
    }
}
