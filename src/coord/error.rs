// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SexagesimalError {
    #[error("Unable to parse '{text}' as {desc}")]
    Unparseable { text: String, desc: &'static str },

    #[error("Illegal negative {desc} expression: '{text}'")]
    Negative { text: String, desc: &'static str },

    #[error("Illegal sexagesimal {desc} expression: '{text}'")]
    OutOfRange { text: String, desc: &'static str },

    #[error("Illegal coordinate of {0}")]
    IllegalCoordinate(f64),

    #[error("Illegal latitude of {0} radians")]
    IllegalLatitude(f64),
}
