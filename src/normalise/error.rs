// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormaliseError {
    #[error("The filename '{name}' doesn't follow the expected naming convention: {reason}")]
    MalformedName { name: String, reason: String },

    #[error("Could not parse '{freq}' as a frequency (from the filename '{name}')")]
    InvalidFrequency { name: String, freq: String },

    #[error("The path '{0}' doesn't have a UTF-8 file name")]
    NonUtf8Name(PathBuf),

    #[error("Both '{first}' and '{second}' would be written to '{output}'")]
    DuplicateOutput {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },

    #[error("Couldn't read '{file}': {err}")]
    Read {
        file: PathBuf,
        err: std::io::Error,
    },

    #[error("Couldn't write '{file}': {err}")]
    Write {
        file: PathBuf,
        err: std::io::Error,
    },
}
