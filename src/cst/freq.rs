// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

use crate::normalise::NameConvention;

lazy_static::lazy_static! {
    // The last number before "Hz", with an optional SI prefix, e.g. "150MHz",
    // "150.5 MHz", "150000000Hz".
    static ref RE_FREQ: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*([kMG]?)Hz").unwrap();
}

/// Get the frequency [Hz] of a CST file from its file name. Names like
/// "HERA_E-pattern_150MHz.txt" are preferred; if there's no "Hz" in the name,
/// the frequency marker of `convention` is tried (e.g.
/// "HERA_farfield__(f=150)[1].txt"; these frequencies are in MHz).
pub fn freq_from_filename(
    path: &Path,
    convention: &NameConvention,
) -> Result<f64, FreqFromNameError> {
    let name = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| FreqFromNameError::NoFreq(path.to_path_buf()))?;

    if let Some(caps) = RE_FREQ.captures_iter(name).last() {
        // The regex guarantees this is a number.
        let number: f64 = caps[1]
            .parse()
            .map_err(|_| FreqFromNameError::NoFreq(path.to_path_buf()))?;
        let multiplier = match &caps[2] {
            "k" => 1e3,
            "M" => 1e6,
            "G" => 1e9,
            _ => 1.0,
        };
        return Ok(number * multiplier);
    }

    convention
        .extract_freq_mhz(name)
        .map(|f| f * 1e6)
        .map_err(|_| FreqFromNameError::NoFreq(path.to_path_buf()))
}

#[derive(Error, Debug)]
pub enum FreqFromNameError {
    #[error("Couldn't find a frequency in the file name of '{0}'")]
    NoFreq(PathBuf),
}
