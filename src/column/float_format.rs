// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! printf-style float formats, e.g. "%.3f" and "%+.2e".
//!
//! Only what's needed for table columns is supported: the `+`, `-`, `0` and
//! space flags, a minimum width, a precision and the `f`, `e`, `E`, `g` and `G`
//! conversions. Exponents are written with a sign and at least two digits
//! (`1.500e+03`).

use std::str::FromStr;

use super::ColumnError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed,
    Exp { upper: bool },
    General { upper: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatFormat {
    plus: bool,
    space: bool,
    zero: bool,
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: Conversion,
}

impl FromStr for FloatFormat {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColumnError::InvalidFloatFormat(s.to_string());
        let mut rest = s.strip_prefix('%').ok_or_else(invalid)?;

        let mut fmt = FloatFormat {
            plus: false,
            space: false,
            zero: false,
            left: false,
            width: None,
            precision: None,
            conversion: Conversion::Fixed,
        };

        // Flags.
        loop {
            match rest.chars().next() {
                Some('+') => fmt.plus = true,
                Some(' ') => fmt.space = true,
                Some('0') => fmt.zero = true,
                Some('-') => fmt.left = true,
                _ => break,
            }
            rest = &rest[1..];
        }

        let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();

        let n = digits(rest);
        if n > 0 {
            fmt.width = Some(rest[..n].parse().map_err(|_| invalid())?);
            rest = &rest[n..];
        }

        if let Some(after_dot) = rest.strip_prefix('.') {
            let n = digits(after_dot);
            // "%.f" means a precision of 0.
            fmt.precision = Some(if n == 0 {
                0
            } else {
                after_dot[..n].parse().map_err(|_| invalid())?
            });
            rest = &after_dot[n..];
        }

        fmt.conversion = match rest {
            "f" | "F" => Conversion::Fixed,
            "e" => Conversion::Exp { upper: false },
            "E" => Conversion::Exp { upper: true },
            "g" => Conversion::General { upper: false },
            "G" => Conversion::General { upper: true },
            _ => return Err(invalid()),
        };

        Ok(fmt)
    }
}

/// Format `value` in exponential notation with `precision` decimal places,
/// using a signed, two-or-more digit exponent.
fn exp_notation(value: f64, precision: usize, upper: bool) -> String {
    let s = format!("{value:.precision$e}");
    let (mantissa, exponent) = s.split_once('e').unwrap_or((&s, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{sign}{:02}", exponent.abs())
}

/// The "general" conversion: fixed or exponential depending on the magnitude,
/// with trailing zeros removed.
fn general_notation(value: f64, precision: usize, upper: bool) -> String {
    let precision = precision.max(1);
    if value == 0.0 {
        return "0".to_string();
    }

    // Work out the exponent after rounding to the requested number of
    // significant figures.
    let rounded = format!("{value:.*e}", precision - 1);
    let exponent: i32 = rounded
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exponent >= -4 && exponent < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        let s = format!("{value:.decimals$}");
        strip_trailing_zeros(&s).to_string()
    } else {
        let s = exp_notation(value, precision - 1, upper);
        let (mantissa, exponent) = s.split_at(s.find(['e', 'E']).unwrap_or(s.len()));
        format!("{}{exponent}", strip_trailing_zeros(mantissa))
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl FloatFormat {
    pub fn format(&self, value: f64) -> String {
        let precision = self.precision.unwrap_or(6);

        let body = if value.is_nan() {
            "nan".to_string()
        } else if value.is_infinite() {
            "inf".to_string()
        } else {
            let magnitude = value.abs();
            match self.conversion {
                Conversion::Fixed => format!("{magnitude:.precision$}"),
                Conversion::Exp { upper } => exp_notation(magnitude, precision, upper),
                Conversion::General { upper } => general_notation(magnitude, precision, upper),
            }
        };

        let sign = if value.is_sign_negative() && !value.is_nan() {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };

        let width = self.width.unwrap_or(0);
        let len = sign.len() + body.len();
        if len >= width {
            format!("{sign}{body}")
        } else if self.left {
            format!("{sign}{body}{}", " ".repeat(width - len))
        } else if self.zero && value.is_finite() {
            format!("{sign}{}{body}", "0".repeat(width - len))
        } else {
            format!("{}{sign}{body}", " ".repeat(width - len))
        }
    }
}
