// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fixed-width text fields.
//!
//! Every value in a flat table occupies an exact number of bytes, right-padded
//! with spaces. Unpadding only strips trailing spaces, so a value must never end
//! in a space itself; [`pad`] refuses to produce such a field.


use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PadError {
    #[error("String too wide for its column ({width} bytes): '{text}'")]
    TooWide { text: String, width: usize },

    #[error("String not safely paddable (trailing space): >{text}<")]
    TrailingSpace { text: String, width: usize },
}

impl PadError {
    /// The text that couldn't be padded.
    pub fn text(&self) -> &str {
        match self {
            PadError::TooWide { text, .. } | PadError::TrailingSpace { text, .. } => text,
        }
    }

    /// The width that the text was being padded to.
    pub fn width(&self) -> usize {
        match self {
            PadError::TooWide { width, .. } | PadError::TrailingSpace { width, .. } => *width,
        }
    }
}

/// Right-pad `text` with spaces so that it is exactly `width` bytes long.
pub fn pad(text: &str, width: usize) -> Result<String, PadError> {
    if text.len() > width {
        return Err(PadError::TooWide {
            text: text.to_string(),
            width,
        });
    }
    if text.ends_with(' ') {
        return Err(PadError::TrailingSpace {
            text: text.to_string(),
            width,
        });
    }

    let mut padded = String::with_capacity(width);
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width - text.len()));
    Ok(padded)
}

/// Stringify `value` and then [`pad`] it. Used for the integers in the preamble
/// and column descriptors.
pub fn pad_display<T: Display>(value: T, width: usize) -> Result<String, PadError> {
    pad(&value.to_string(), width)
}

/// Strip trailing spaces (and only spaces) from a field.
pub fn unpad(field: &str) -> &str {
    field.trim_end_matches(' ')
}
