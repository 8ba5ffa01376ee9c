// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Formatting and parsing of sexagesimal coordinates.
//!
//! All angles are in radians. Hours are formatted as `HH:MM:SS.sss`, longitudes
//! as `DDD:MM:SS.ss` and latitudes as `+DD:MM:SS.ss`.

mod error;

pub use error::SexagesimalError;

use serde::Deserialize;

use crate::constants::{D2R, FRAC_PI_2, H2R, PI, R2D, R2H, TAU};

/// What to do with a coordinate that is outside of its natural range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalisation {
    /// Format it as-is.
    None,

    /// Fail.
    Raise,

    /// Wrap it into range.
    Wrap,
}

/// The sexagesimal flavours a table column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CoordKind {
    /// Right ascension-like hours.
    Hours,

    /// Declination-like latitudes.
    DegLat,

    /// Longitudes in degrees.
    DegLon,
}

impl CoordKind {
    pub fn format(self, radians: f64) -> Result<String, SexagesimalError> {
        match self {
            CoordKind::Hours => fmt_hours(radians, Normalisation::Wrap, 3),
            CoordKind::DegLat => fmt_deglat(radians, Normalisation::Raise, 2),
            CoordKind::DegLon => fmt_deglon(radians, Normalisation::Wrap, 2),
        }
    }

    pub fn parse(self, text: &str) -> Result<f64, SexagesimalError> {
        match self {
            CoordKind::Hours => parse_hours(text),
            CoordKind::DegLat => parse_deglat(text),
            CoordKind::DegLon => parse_deglon(text),
        }
    }
}

fn round_to(x: f64, precision: usize) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (x * factor).round() / factor
}

/// Split a non-negative value into whole units, minutes and (rounded) seconds,
/// carrying any seconds that rounded up to 60.
fn split_sexagesimal(value: f64, precision: usize) -> (u64, u64, f64) {
    let mut whole = value.floor() as u64;
    let mut minutes = ((value - whole as f64) * 60.0).floor() as u64;
    let mut seconds = round_to(
        3600.0 * (value - whole as f64 - minutes as f64 / 60.0),
        precision,
    );

    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1;
        if minutes >= 60 {
            minutes -= 60;
            whole += 1;
        }
    }
    (whole, minutes, seconds)
}

fn seconds_width(precision: usize) -> usize {
    if precision == 0 {
        2
    } else {
        precision + 3
    }
}

fn fmt_sexagesimal(
    base: f64,
    norm: Normalisation,
    basemax: u64,
    precision: usize,
) -> Result<String, SexagesimalError> {
    let base = match norm {
        Normalisation::None => base,
        Normalisation::Raise => {
            if base > basemax as f64 || base < 0.0 {
                return Err(SexagesimalError::IllegalCoordinate(base));
            }
            base
        }
        Normalisation::Wrap => base.rem_euclid(basemax as f64),
    };

    let (mut whole, minutes, seconds) = split_sexagesimal(base, precision);
    if whole >= basemax {
        whole -= basemax;
    }

    let base_width = basemax.to_string().len();
    let sec_width = seconds_width(precision);
    Ok(format!(
        "{whole:0base_width$}:{minutes:02}:{seconds:0sec_width$.precision$}"
    ))
}

/// Format an angle in radians as hours.
pub fn fmt_hours(
    radians: f64,
    norm: Normalisation,
    precision: usize,
) -> Result<String, SexagesimalError> {
    fmt_sexagesimal(radians * R2H, norm, 24, precision)
}

/// Format an angle in radians as a longitude in degrees.
pub fn fmt_deglon(
    radians: f64,
    norm: Normalisation,
    precision: usize,
) -> Result<String, SexagesimalError> {
    fmt_sexagesimal(radians * R2D, norm, 360, precision)
}

/// Format an angle in radians as a signed latitude in degrees.
pub fn fmt_deglat(
    radians: f64,
    norm: Normalisation,
    precision: usize,
) -> Result<String, SexagesimalError> {
    let radians = match norm {
        Normalisation::None => radians,
        Normalisation::Raise => {
            if !(-FRAC_PI_2..=FRAC_PI_2).contains(&radians) {
                return Err(SexagesimalError::IllegalLatitude(radians));
            }
            radians
        }
        Normalisation::Wrap => {
            let r = (radians + PI).rem_euclid(TAU) - PI;
            if r > FRAC_PI_2 {
                PI - r
            } else if r < -FRAC_PI_2 {
                -PI - r
            } else {
                r
            }
        }
    };

    let degrees = radians * R2D;
    let sign = if degrees >= 0.0 { '+' } else { '-' };
    let (whole, minutes, seconds) = split_sexagesimal(degrees.abs(), precision);
    let sec_width = seconds_width(precision);
    Ok(format!(
        "{sign}{whole:02}:{minutes:02}:{seconds:0sec_width$.precision$}"
    ))
}

fn parse_sexagesimal(
    text: &str,
    desc: &'static str,
    negative_ok: bool,
) -> Result<f64, SexagesimalError> {
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) if negative_ok => (-1.0, rest),
        Some(_) => {
            return Err(SexagesimalError::Negative {
                text: text.to_string(),
                desc,
            })
        }
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };

    let unparseable = || SexagesimalError::Unparseable {
        text: text.to_string(),
        desc,
    };
    let mut parts = body.split(':');
    let (whole, minutes, seconds) = match (parts.next(), parts.next(), parts.next(), parts.next())
    {
        (Some(w), Some(m), Some(s), None) => (
            w.trim().parse::<i64>().map_err(|_| unparseable())?,
            m.trim().parse::<i64>().map_err(|_| unparseable())?,
            s.trim().parse::<f64>().map_err(|_| unparseable())?,
        ),
        _ => return Err(unparseable()),
    };

    if whole < 0 {
        // Two minus signs, or something.
        return Err(SexagesimalError::Negative {
            text: text.to_string(),
            desc,
        });
    }
    if !(0..=59).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return Err(SexagesimalError::OutOfRange {
            text: text.to_string(),
            desc,
        });
    }

    Ok(sign * (whole as f64 + minutes as f64 / 60.0 + seconds / 3600.0))
}

/// Parse `HH:MM:SS.sss` into radians.
pub fn parse_hours(text: &str) -> Result<f64, SexagesimalError> {
    let hours = parse_sexagesimal(text, "hours", false)?;
    if hours >= 24.0 {
        return Err(SexagesimalError::OutOfRange {
            text: text.to_string(),
            desc: "hours",
        });
    }
    Ok(hours * H2R)
}

/// Parse `[+-]DD:MM:SS.ss` into radians.
pub fn parse_deglat(text: &str) -> Result<f64, SexagesimalError> {
    let degrees = parse_sexagesimal(text, "latitude", true)?;
    if degrees.abs() > 90.0 {
        return Err(SexagesimalError::OutOfRange {
            text: text.to_string(),
            desc: "latitude",
        });
    }
    Ok(degrees * D2R)
}

/// Parse `[+-]DDD:MM:SS.ss` into radians.
pub fn parse_deglon(text: &str) -> Result<f64, SexagesimalError> {
    Ok(parse_sexagesimal(text, "longitude", true)? * D2R)
}
