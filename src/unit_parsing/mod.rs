// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into frequencies with an optional unit attached.

mod error;
#[cfg(test)]
mod tests;

pub(crate) use error::*;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, EnumString, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub(crate) enum FreqFormat {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// MegaHertz
    MHz,

    /// GigaHertz
    GHz,

    NoUnit,
}

impl FreqFormat {
    /// The multiplier to get from this unit to Hz. Numbers without a unit are
    /// treated as MHz, because that's what CST filenames use.
    pub(crate) fn to_hz(self) -> f64 {
        match self {
            FreqFormat::Hz => 1.0,
            FreqFormat::kHz => 1e3,
            FreqFormat::MHz | FreqFormat::NoUnit => 1e6,
            FreqFormat::GHz => 1e9,
        }
    }
}

/// Parse a string that may have a unit of frequency attached to it.
pub(crate) fn parse_freq(s: &str) -> Result<(f64, FreqFormat), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, FreqFormat::NoUnit));
    };

    // That didn't work; let's search over our supported formats.
    for freq_format in FreqFormat::iter().filter(|&ff| ff != FreqFormat::NoUnit) {
        let freq_format_str: &'static str = freq_format.into();
        let suffix = s
            .trim()
            .trim_start_matches(|c| char::is_numeric(c) || c == '.')
            .trim();
        // Comparing case-insensitively means "mhz" is MHz, not millihertz.
        if suffix.to_uppercase() == freq_format_str.to_uppercase() {
            let prefix = s.trim().trim_end_matches(char::is_alphabetic).trim();
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotFreqUnitButCantParse {
                        input: s.to_string(),
                        unit: freq_format_str,
                    })
                }
            };
            return Ok((number, freq_format));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
    })
}

/// Parse a frequency string straight into Hz.
pub(crate) fn parse_freq_hz(s: &str) -> Result<f64, UnitParseError> {
    let (number, unit) = parse_freq(s)?;
    Ok(number * unit.to_hz())
}
