// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use strum::IntoEnumIterator;

use super::*;
use crate::constants::A2R;

fn parse(col: &Column, text: &str) -> Result<Value, ConvertError> {
    (col.parser().unwrap())(text)
}

fn format(col: &Column, value: &Value) -> Result<String, ConvertError> {
    (col.formatter().unwrap())(value)
}

#[test]
fn test_type_codes() {
    for kind in ColumnKind::iter() {
        let code = kind.type_code().to_string();
        assert_eq!(ColumnKind::from_type_code(&code), Some(kind));
    }
    assert_eq!(ColumnKind::from_type_code("0"), Some(ColumnKind::Int));
    assert_eq!(ColumnKind::from_type_code("1"), Some(ColumnKind::Float));
    assert_eq!(ColumnKind::from_type_code("2"), Some(ColumnKind::Str));
    assert_eq!(ColumnKind::from_type_code("3"), Some(ColumnKind::Bool));
    assert_eq!(ColumnKind::from_type_code("4"), Some(ColumnKind::Generic));
    assert_eq!(ColumnKind::from_type_code("5"), None);
    assert_eq!(ColumnKind::from_type_code("x"), None);
    assert_eq!(ColumnKind::from_type_code("if"), None);
    assert_eq!(ColumnKind::from_type_code(""), None);
}

#[test]
fn test_column_fixup_validation() {
    let result = Column::new("x", ColumnKind::Int, 5);
    assert!(result.is_ok(), "{:?}", result.unwrap_err());

    let result = Column::new("a_very_long_column_name", ColumnKind::Int, 5);
    assert!(matches!(result, Err(ColumnError::NameTooLong(_))));

    // Exactly 15 bytes is fine.
    assert!(Column::new("abcdefghijklmno", ColumnKind::Int, 5).is_ok());

    let result = Column::new("recno", ColumnKind::Int, 5);
    assert!(matches!(result, Err(ColumnError::ReservedName(_))));

    let result = Column::new("x", ColumnKind::Int, 0);
    assert!(matches!(result, Err(ColumnError::InvalidWidth { .. })));
    let result = Column::new("x", ColumnKind::Int, 512);
    assert!(matches!(result, Err(ColumnError::InvalidWidth { .. })));
    assert!(Column::new("x", ColumnKind::Int, 511).is_ok());
}

#[test]
fn test_builtin_conversions_are_assigned() {
    for kind in ColumnKind::iter() {
        let col = Column::new("x", kind, 5).unwrap();
        match kind {
            ColumnKind::Generic => {
                assert!(col.parser().is_none());
                assert!(col.formatter().is_none());
            }
            _ => {
                assert!(col.parser().is_some());
                assert!(col.formatter().is_some());
            }
        }
    }
}

#[test]
fn test_int_conversions() {
    let col = Column::new("x", ColumnKind::Int, 5).unwrap();
    assert_eq!(parse(&col, "-3").unwrap(), Value::Int(-3));
    assert_eq!(parse(&col, "+7").unwrap(), Value::Int(7));
    assert_eq!(format(&col, &Value::Int(-3)).unwrap(), "-3");

    let err = parse(&col, "1.5").unwrap_err();
    assert!(matches!(err, ConvertError::Int { .. }));
    assert_eq!(err.class(), "Int");

    let err = format(&col, &Value::Float(1.5)).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::WrongVariant {
            expected: "int",
            got: "float"
        }
    ));
}

#[test]
fn test_float_conversions() {
    let col = Column::new("y", ColumnKind::Float, 8).unwrap();
    assert_eq!(format(&col, &Value::Float(2.5)).unwrap(), "2.5");
    assert_eq!(format(&col, &Value::Float(0.125)).unwrap(), "0.125");
    assert_eq!(format(&col, &Value::Float(1e20)).unwrap(), "1e20");
    assert_eq!(format(&col, &Value::Float(-1e-7)).unwrap(), "-1e-7");
    // Ints are promoted.
    assert_eq!(format(&col, &Value::Int(3)).unwrap(), "3");

    for text in ["2.5", "1e20", "-1e-7", "1.500000e+00", "3"] {
        let v = parse(&col, text).unwrap();
        assert_eq!(v, Value::Float(text.parse().unwrap()));
    }
    let err = parse(&col, "abc").unwrap_err();
    assert_eq!(err.class(), "Float");
}

#[test]
fn test_bool_conversions() {
    let col = Column::new("flag", ColumnKind::Bool, 1).unwrap();
    for text in ["+", "T", "Y"] {
        assert_eq!(parse(&col, text).unwrap(), Value::Bool(true));
    }
    for text in [".", "F", "N"] {
        assert_eq!(parse(&col, text).unwrap(), Value::Bool(false));
    }
    assert!(matches!(parse(&col, "t"), Err(ConvertError::Bool(_))));

    for b in [true, false] {
        let text = format(&col, &Value::Bool(b)).unwrap();
        assert_eq!(parse(&col, &text).unwrap(), Value::Bool(b));
    }
    assert_eq!(format(&col, &Value::Bool(true)).unwrap(), "+");
    assert_eq!(format(&col, &Value::Bool(false)).unwrap(), ".");
}

#[test]
fn test_str_conversions() {
    let col = Column::new("ident", ColumnKind::Str, 20).unwrap();
    assert_eq!(
        parse(&col, "  3C 273").unwrap(),
        Value::Str("  3C 273".to_string())
    );
    assert_eq!(format(&col, &Value::from("3C 273")).unwrap(), "3C 273");
    assert!(format(&col, &Value::Int(1)).is_err());
}

#[test]
fn test_fallback_generic_guesses() {
    let col = Column::fallback("misc", ColumnKind::Generic, 10).unwrap();
    assert_eq!(parse(&col, "12").unwrap(), Value::Int(12));
    assert_eq!(parse(&col, "1.5").unwrap(), Value::Float(1.5));
    assert_eq!(parse(&col, "abc").unwrap(), Value::from("abc"));
    assert_eq!(format(&col, &Value::Float(1.5)).unwrap(), "1.5");

    // Other kinds keep their built-ins.
    let col = Column::fallback("n", ColumnKind::Int, 10).unwrap();
    assert!(parse(&col, "abc").is_err());
}

#[test]
fn test_clone_with() {
    let col = Column::scaled_float("major", "%.2f", 7, A2R).unwrap();
    let wider = col
        .clone_with(ColumnOverrides {
            width: Some(10),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(wider.width(), 10);
    assert_eq!(wider.name(), "major");
    assert_eq!(col.width(), 7);
    // The custom conversions survive the clone.
    assert_eq!(format(&wider, &Value::Float(1.5 * A2R)).unwrap(), "1.50");

    let result = col.clone_with(ColumnOverrides {
        width: Some(0),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_scaled_float() {
    let col = Column::scaled_float("ra_uc", "%.3f", 8, A2R).unwrap();
    let text = format(&col, &Value::Float(0.25 * A2R)).unwrap();
    assert_eq!(text, "0.250");
    let v = parse(&col, &text).unwrap();
    assert_abs_diff_eq!(v.as_f64().unwrap(), 0.25 * A2R, epsilon = 1e-15);

    // Precision is limited by the format.
    let text = format(&col, &Value::Float(1.23456 * A2R)).unwrap();
    assert_eq!(text, "1.235");
    let v = parse(&col, &text).unwrap();
    assert_abs_diff_eq!(v.as_f64().unwrap(), 1.23456 * A2R, epsilon = 0.0005 * A2R);

    let result = Column::scaled_float("x", "3f", 8, 1.0);
    assert!(matches!(result, Err(ColumnError::InvalidFloatFormat(_))));
}

#[test]
fn test_float_formats() {
    let f = |fmt: &str, v: f64| fmt.parse::<FloatFormat>().unwrap().format(v);

    assert_eq!(f("%.3f", 1.0), "1.000");
    assert_eq!(f("%.2f", -0.004), "-0.00");
    assert_eq!(f("%+.2f", 45.0), "+45.00");
    assert_eq!(f("%+.2f", -45.0), "-45.00");
    assert_eq!(f("%9.5f", 1.5), "  1.50000");
    assert_eq!(f("%09.2f", -1.5), "-00001.50");
    assert_eq!(f("%-6.1f", 1.5), "1.5   ");
    assert_eq!(f("% .1f", 1.5), " 1.5");
    assert_eq!(f("%.f", 2.7), "3");
    assert_eq!(f("%e", 1500.0), "1.500000e+03");
    assert_eq!(f("%.2e", 0.000123), "1.23e-04");
    assert_eq!(f("%.1E", -2.0e100), "-2.0E+100");
    assert_eq!(f("%g", 0.0001), "0.0001");
    assert_eq!(f("%g", 1234567.0), "1.23457e+06");
    assert_eq!(f("%g", 100.0), "100");
    assert_eq!(f("%.3g", 0.00001234), "1.23e-05");
    assert_eq!(f("%g", 0.0), "0");
    assert_eq!(f("%.2f", f64::INFINITY), "inf");
    assert_eq!(f("%.2f", f64::NEG_INFINITY), "-inf");

    for bad in ["", ".3f", "%", "%.3", "%.3d", "%3.2fx"] {
        assert!(bad.parse::<FloatFormat>().is_err(), "{bad}");
    }
}
