// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Table columns: a name, an on-disk width, a kind, and the functions that
//! convert between a field's text and its [`Value`].

mod error;
mod float_format;
#[cfg(test)]
mod tests;

pub use error::*;
pub use float_format::FloatFormat;

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{MAX_COL_WIDTH, RESERVED_COLUMN_NAMES, W_HEADER_NAME},
    coord::CoordKind,
};

/// Converts the (unpadded, non-empty) text of a field into a value.
pub type ParseFn = Arc<dyn Fn(&str) -> Result<Value, ConvertError> + Send + Sync>;

/// Converts a value into the text of a field. The result is padded afterwards.
pub type FormatFn = Arc<dyn Fn(&Value) -> Result<String, ConvertError> + Send + Sync>;

/// The logical type of a column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnKind {
    Int,
    Float,
    Str,
    Bool,
    /// Anything else. There are no built-in conversions for these columns;
    /// they must be supplied.
    Generic,
}

/// Each kind's type code, and the digit that older tables used instead.
const TYPE_CODES: [(ColumnKind, char, char); 5] = [
    (ColumnKind::Int, 'i', '0'),
    (ColumnKind::Float, 'f', '1'),
    (ColumnKind::Str, 's', '2'),
    (ColumnKind::Bool, 'b', '3'),
    (ColumnKind::Generic, 'g', '4'),
];

impl ColumnKind {
    /// The character written into column descriptors.
    pub fn type_code(self) -> char {
        TYPE_CODES
            .iter()
            .find(|(kind, _, _)| *kind == self)
            .map(|(_, code, _)| *code)
            .unwrap_or('g')
    }

    /// Look up a type code from a column descriptor. Legacy digit codes are
    /// accepted too.
    pub fn from_type_code(code: &str) -> Option<ColumnKind> {
        let mut chars = code.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        TYPE_CODES
            .iter()
            .find(|(_, letter, digit)| c == *letter || c == *digit)
            .map(|(kind, _, _)| *kind)
    }
}

/// A decoded field. Empty fields are represented by `None` rather than a
/// variant here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
        }
    }

    /// Get a float out of this value. Integers are promoted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{}", format_float_shortest(*x)),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{}", if *b { "+" } else { "." }),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Changes to apply in [`Column::clone_with`].
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    pub name: Option<String>,
    pub width: Option<usize>,
    pub kind: Option<ColumnKind>,
}

/// A named, typed, fixed-width field definition.
#[derive(Clone)]
pub struct Column {
    name: String,
    width: usize,
    kind: ColumnKind,
    parse: Option<ParseFn>,
    format: Option<FormatFn>,
}

impl Column {
    /// Create a column with the built-in conversions for its kind.
    pub fn new<S: Into<String>>(
        name: S,
        kind: ColumnKind,
        width: usize,
    ) -> Result<Column, ColumnError> {
        let mut col = Column {
            name: name.into(),
            width,
            kind,
            parse: None,
            format: None,
        };
        col.fixup()?;
        Ok(col)
    }

    /// Create a float column whose values are scaled on the way in and out,
    /// e.g. arcseconds on disk and radians in memory. `fmt` is a printf-style
    /// format like "%.3f".
    pub fn scaled_float<S: Into<String>>(
        name: S,
        fmt: &str,
        width: usize,
        scale: f64,
    ) -> Result<Column, ColumnError> {
        let fmt: FloatFormat = fmt.parse()?;
        let col = Column::new(name, ColumnKind::Float, width)?
            .with_parse(move |text| Ok(Value::Float(parse_f64(text)? * scale)))
            .with_format(move |value| match value.as_f64() {
                Some(f) => Ok(fmt.format(f / scale)),
                None => Err(ConvertError::WrongVariant {
                    expected: "float",
                    got: value.variant_name(),
                }),
            });
        Ok(col)
    }

    /// Create a column holding a sexagesimal coordinate (in radians).
    pub fn sexagesimal<S: Into<String>>(
        name: S,
        coord: CoordKind,
        width: usize,
    ) -> Result<Column, ColumnError> {
        let col = Column::new(name, ColumnKind::Generic, width)?
            .with_parse(move |text| Ok(Value::Float(coord.parse(text.trim())?)))
            .with_format(move |value| match value.as_f64() {
                Some(f) => Ok(coord.format(f)?),
                None => Err(ConvertError::WrongVariant {
                    expected: "coordinate",
                    got: value.variant_name(),
                }),
            });
        Ok(col)
    }

    /// Replace this column's parse function.
    pub fn with_parse<F>(mut self, parse: F) -> Column
    where
        F: Fn(&str) -> Result<Value, ConvertError> + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(parse));
        self
    }

    /// Replace this column's format function.
    pub fn with_format<F>(mut self, format: F) -> Column
    where
        F: Fn(&Value) -> Result<String, ConvertError> + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(format));
        self
    }

    /// Validate the name and width, and fill in any missing conversions with
    /// the built-in ones for this column's kind.
    pub fn fixup(&mut self) -> Result<(), ColumnError> {
        if self.name.len() > W_HEADER_NAME {
            return Err(ColumnError::NameTooLong(self.name.clone()));
        }
        if RESERVED_COLUMN_NAMES.contains(&self.name.as_str()) {
            return Err(ColumnError::ReservedName(self.name.clone()));
        }
        if self.width == 0 || self.width >= MAX_COL_WIDTH {
            return Err(ColumnError::InvalidWidth {
                name: self.name.clone(),
                width: self.width,
            });
        }

        if self.parse.is_none() {
            self.parse = builtin_parser(self.kind);
        }
        if self.format.is_none() {
            self.format = builtin_formatter(self.kind);
        }
        Ok(())
    }

    /// A copy of this column with some attributes changed. The conversions are
    /// kept.
    pub fn clone_with(&self, overrides: ColumnOverrides) -> Result<Column, ColumnError> {
        let mut col = self.clone();
        if let Some(name) = overrides.name {
            col.name = name;
        }
        if let Some(width) = overrides.width {
            col.width = width;
        }
        if let Some(kind) = overrides.kind {
            col.kind = kind;
        }
        col.fixup()?;
        Ok(col)
    }

    /// A column for a field that a mapping knows nothing about. Generic columns
    /// get a parser that guesses between ints, floats and strings.
    pub(crate) fn fallback<S: Into<String>>(
        name: S,
        kind: ColumnKind,
        width: usize,
    ) -> Result<Column, ColumnError> {
        let col = Column::new(name, kind, width)?;
        Ok(match kind {
            ColumnKind::Generic => col.with_parse(parse_guess).with_format(format_display),
            _ => col,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn parser(&self) -> Option<&ParseFn> {
        self.parse.as_ref()
    }

    pub fn formatter(&self) -> Option<&FormatFn> {
        self.format.as_ref()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("kind", &self.kind)
            .field("has_parse", &self.parse.is_some())
            .field("has_format", &self.format.is_some())
            .finish()
    }
}

fn builtin_parser(kind: ColumnKind) -> Option<ParseFn> {
    match kind {
        ColumnKind::Int => Some(Arc::new(parse_int)),
        ColumnKind::Float => Some(Arc::new(|text: &str| Ok(Value::Float(parse_f64(text)?)))),
        ColumnKind::Str => Some(Arc::new(|text: &str| Ok(Value::Str(text.to_string())))),
        ColumnKind::Bool => Some(Arc::new(parse_bool)),
        ColumnKind::Generic => None,
    }
}

fn builtin_formatter(kind: ColumnKind) -> Option<FormatFn> {
    match kind {
        ColumnKind::Int => Some(Arc::new(|value: &Value| match value {
            Value::Int(i) => Ok(i.to_string()),
            _ => Err(wrong_variant("int", value)),
        })),
        ColumnKind::Float => Some(Arc::new(|value: &Value| match value.as_f64() {
            Some(f) => Ok(format_float_shortest(f)),
            None => Err(wrong_variant("float", value)),
        })),
        ColumnKind::Str => Some(Arc::new(|value: &Value| match value {
            Value::Str(s) => Ok(s.clone()),
            _ => Err(wrong_variant("str", value)),
        })),
        ColumnKind::Bool => Some(Arc::new(|value: &Value| match value {
            Value::Bool(true) => Ok("+".to_string()),
            Value::Bool(false) => Ok(".".to_string()),
            _ => Err(wrong_variant("bool", value)),
        })),
        ColumnKind::Generic => None,
    }
}

fn wrong_variant(expected: &'static str, value: &Value) -> ConvertError {
    ConvertError::WrongVariant {
        expected,
        got: value.variant_name(),
    }
}

fn parse_int(text: &str) -> Result<Value, ConvertError> {
    text.trim()
        .parse()
        .map(Value::Int)
        .map_err(|source| ConvertError::Int {
            text: text.to_string(),
            source,
        })
}

fn parse_f64(text: &str) -> Result<f64, ConvertError> {
    text.trim().parse().map_err(|source| ConvertError::Float {
        text: text.to_string(),
        source,
    })
}

fn parse_bool(text: &str) -> Result<Value, ConvertError> {
    match text {
        "+" | "T" | "Y" => Ok(Value::Bool(true)),
        "." | "F" | "N" => Ok(Value::Bool(false)),
        _ => Err(ConvertError::Bool(text.to_string())),
    }
}

fn parse_guess(text: &str) -> Result<Value, ConvertError> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse() {
        return Ok(Value::Int(i));
    }
    if let Ok(f) = trimmed.parse() {
        return Ok(Value::Float(f));
    }
    Ok(Value::Str(text.to_string()))
}

fn format_display(value: &Value) -> Result<String, ConvertError> {
    Ok(value.to_string())
}

/// The shorter of Rust's plain and exponential representations. Both parse
/// back to exactly the same float.
pub(crate) fn format_float_shortest(f: f64) -> String {
    let plain = format!("{f}");
    let exp = format!("{f:e}");
    if exp.len() < plain.len() {
        exp
    } else {
        plain
    }
}
