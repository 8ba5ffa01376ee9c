// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Standard columns for tables of astronomical sources.
//!
//! Positions and sizes are stored in radians in memory. On disk, RA and Dec are
//! sexagesimal, uncertainties and sizes are in arcseconds, position angles are
//! in degrees and flux densities are in Jy.


use crate::{
    column::{Column, ColumnError, ColumnKind},
    constants::{A2R, D2R},
    coord::CoordKind,
    mapping::Mapping,
};

lazy_static::lazy_static! {
    /// The standard source-table columns.
    pub static ref STANDARD_COLUMNS: Mapping =
        standard_columns().expect("standard source columns are valid");

    /// The columns written for MIRIAD `sfind` output, in order.
    pub static ref SFIND_COLUMN_NAMES: Vec<&'static str> = vec![
        "ra", "ra_uc", "dec", "dec_uc", "pkflux", "pkflux_uc", "totflux", "totflux_uc",
        "major", "minor", "pa", "bgrms", "sfind_fitrms",
    ];
}

fn standard_columns() -> Result<Mapping, ColumnError> {
    let mut m = Mapping::new();

    m.add("ident", ColumnKind::Str, 20, false)?;
    m.add_column(Column::sexagesimal("ra", CoordKind::Hours, 12)?, false)?;
    m.add_float("ra_uc", "%.3f", 8, A2R, false)?;
    m.add_column(Column::sexagesimal("dec", CoordKind::DegLat, 12)?, false)?;
    m.add_float("dec_uc", "%.2f", 8, A2R, false)?;

    m.add_float("totflux", "%.5f", 12, 1.0, false)?;
    m.add_float("totflux_uc", "%.7f", 12, 1.0, false)?;
    m.add("totflux_is_ul", ColumnKind::Bool, 1, false)?;
    m.add_float("pkflux", "%.5f", 12, 1.0, false)?;
    m.add_float("pkflux_uc", "%.7f", 12, 1.0, false)?;
    m.add("pkflux_is_ul", ColumnKind::Bool, 1, false)?;
    m.add_float("bgrms", "%.5f", 12, 1.0, false)?;

    m.add_float("major", "%.2f", 7, A2R, false)?;
    m.add_float("major_uc", "%.2f", 12, A2R, false)?;
    m.add("major_is_ul", ColumnKind::Bool, 1, false)?;
    m.add_float("minor", "%.2f", 7, A2R, false)?;
    m.add_float("minor_uc", "%.2f", 12, A2R, false)?;
    m.add("minor_is_ul", ColumnKind::Bool, 1, false)?;
    m.add_float("pa", "%+.2f", 7, D2R, false)?;
    m.add_float("pa_uc", "%.2f", 12, D2R, false)?;

    m.add_float("sfind_fitrms", "%9.5f", 12, 1.0, false)?;

    Ok(m)
}
