// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

The on-disk layout of a flat table is entirely determined by the widths here;
changing any of them makes existing tables unreadable.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The width of each integer in the preamble and column descriptors.
pub const W_HEADER_INT: usize = 7;

/// The width of a column name inside a column descriptor. This is also the
/// longest name a [`crate::Column`] may have.
pub const W_HEADER_NAME: usize = 15;

/// The size of the preamble: three integers, two pipes and a newline.
pub const PREAMBLE_LEN: usize = W_HEADER_INT * 3 + 3;

/// The size of a single column descriptor: name, width and type code, each
/// followed by a one-byte separator.
pub const DESCRIPTOR_LEN: usize = W_HEADER_NAME + W_HEADER_INT * 2 + 3;

/// Columns must be strictly narrower than this.
pub const MAX_COL_WIDTH: usize = 512;

/// Tables must have strictly fewer columns than this.
pub const MAX_NCOLS: usize = 128;

/// Offsets (and the gap between the column info and the data) must be strictly
/// smaller than this.
pub const MAX_OFFSET: usize = 32768;

/// Column names that can't be used, because records already use them.
pub const RESERVED_COLUMN_NAMES: &[&str] = &["recno"];

/// The separator between fields of a record, and between column descriptors.
pub const FIELD_SEP: u8 = b'|';

/// The separator between the parts of a single column descriptor.
pub const DESCRIPTOR_SEP: u8 = b'/';

/// A record with this byte in its first separator position has been deleted.
pub const DELETED_MARKER: u8 = b'-';

/// Arcseconds to radians.
pub const A2R: f64 = PI / (3600.0 * 180.0);
/// Radians to arcseconds.
pub const R2A: f64 = 3600.0 * 180.0 / PI;
/// Degrees to radians.
pub const D2R: f64 = PI / 180.0;
/// Radians to degrees.
pub const R2D: f64 = 180.0 / PI;
/// Hours to radians.
pub const H2R: f64 = PI / 12.0;
/// Radians to hours.
pub const R2H: f64 = 12.0 / PI;
