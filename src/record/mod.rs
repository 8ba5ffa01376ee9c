// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Records: one decoded row of a table.
//!
//! [`Record`] works for any schema. Code that knows its schema can instead
//! implement [`FillRecord`] (for reading) and [`FieldSource`] (for writing) on
//! its own types.


use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::column::Value;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record has no field named '{0}'")]
    UnknownField(String),

    #[error("Field '{name}' holds a {got} value, not a {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        got: &'static str,
    },
}

/// Something a table reader can fill in, one field at a time.
pub trait FillRecord {
    /// Set the 0-based position of this record in its table.
    fn set_recno(&mut self, recno: usize);

    /// Set a field. `None` means the field was empty.
    fn set_field(&mut self, name: &str, value: Option<Value>);
}

/// Something a table writer can take field values from.
pub trait FieldSource {
    /// Get the value of a field. `Ok(None)` writes an empty field; an error
    /// means the record doesn't have this field at all.
    fn field(&self, name: &str) -> Result<Option<Value>, RecordError>;
}

/// A generic record: a 0-based record number and a value (or null) for each
/// column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub recno: usize,

    #[serde(flatten)]
    fields: IndexMap<String, Option<Value>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    pub fn with<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.set(name, Some(value.into()));
        self
    }

    /// Builder-style way of adding an empty field.
    pub fn with_null<S: Into<String>>(mut self, name: S) -> Self {
        self.set(name, None);
        self
    }

    pub fn set<S: Into<String>>(&mut self, name: S, value: Option<Value>) {
        self.fields.insert(name.into(), value);
    }

    /// Get a field's value. `Ok(None)` means the field is present but empty.
    pub fn get(&self, name: &str) -> Result<Option<&Value>, RecordError> {
        self.fields
            .get(name)
            .map(Option::as_ref)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate over the field names and values, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i64>, RecordError> {
        match self.get(name)? {
            None => Ok(None),
            Some(Value::Int(i)) => Ok(Some(*i)),
            Some(v) => Err(self.wrong_type(name, "int", v)),
        }
    }

    /// Ints are promoted to floats.
    pub fn get_float(&self, name: &str) -> Result<Option<f64>, RecordError> {
        match self.get(name)? {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(name, "float", v)),
        }
    }

    pub fn get_str(&self, name: &str) -> Result<Option<&str>, RecordError> {
        match self.get(name)? {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            Some(v) => Err(self.wrong_type(name, "str", v)),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, RecordError> {
        match self.get(name)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(v) => Err(self.wrong_type(name, "bool", v)),
        }
    }

    fn wrong_type(&self, name: &str, expected: &'static str, got: &Value) -> RecordError {
        RecordError::WrongType {
            name: name.to_string(),
            expected,
            got: got.variant_name(),
        }
    }
}

impl FillRecord for Record {
    fn set_recno(&mut self, recno: usize) {
        self.recno = recno;
    }

    fn set_field(&mut self, name: &str, value: Option<Value>) {
        self.set(name, value);
    }
}

impl FieldSource for Record {
    fn field(&self, name: &str) -> Result<Option<Value>, RecordError> {
        self.get(name).map(|v| v.cloned())
    }
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, name: &str) -> Result<Option<Value>, RecordError> {
        (**self).field(name)
    }
}

impl<S: std::hash::BuildHasher> FieldSource for std::collections::HashMap<String, Option<Value>, S> {
    fn field(&self, name: &str) -> Result<Option<Value>, RecordError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))
    }
}

impl fmt::Display for Record {
    /// Fields sorted by name, e.g. `{recno=0, x=1, y=2.5}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.fields.keys().collect();
        names.sort();
        write!(f, "{{recno={}", self.recno)?;
        for name in names {
            match &self.fields[name] {
                Some(v) => write!(f, ", {name}={v}")?,
                None => write!(f, ", {name}=None")?,
            }
        }
        write!(f, "}}")
    }
}
