// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all cstbeam-related errors. This should be the *only* error
//! enum that is publicly visible from the CLI.

use thiserror::Error;

use super::{beam_settings::BeamSettingsArgsError, normalise_names::NormaliseNamesArgsError};
use crate::{
    cst::{FreqFromNameError, HealpixError, SettingsError},
    io::{FileWriteError, GlobError},
    normalise::NormaliseError,
    params::{BeamSettingsError, NormaliseNamesError},
    unit_parsing::UnitParseError,
};

const NAMING_HINT: &str = "CST filenames are expected to look like 'HERA_farfield__(f=150)[1].txt'. The --marker, --terminator, --trailing-trim and --prefix-trim options change how names are cut up.";

/// The *only* publicly visible error from cstbeam. Where it helps, messages
/// include a hint on how to fix the problem.
#[derive(Error, Debug)]
pub enum CstBeamError {
    /// An error related to normalising CST file names and headers.
    #[error("{0}\n\n{NAMING_HINT}")]
    Normalise(String),

    /// An error related to the beam-settings subcommand.
    #[error("{0}")]
    BeamSettings(String),

    /// An error related to getting frequencies out of CST file names.
    #[error("{0}\n\nFile names need a frequency like '150MHz' (or follow the normalise-names convention).")]
    Freq(String),

    /// An error related to finding files.
    #[error("{0}\n\nIf you're using a glob, make sure it's quoted so your shell doesn't expand it.")]
    Glob(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files must be toml or json; the keys are the same as the long CLI options, with underscores instead of hyphens.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<NormaliseNamesArgsError> for CstBeamError {
    fn from(e: NormaliseNamesArgsError) -> Self {
        let s = e.to_string();
        match e {
            NormaliseNamesArgsError::NoFiles | NormaliseNamesArgsError::ErrorPolicy(_) => {
                Self::Generic(s)
            }
            NormaliseNamesArgsError::Glob(e) => Self::from(e),
            NormaliseNamesArgsError::Convention(_) => Self::Normalise(s),
        }
    }
}

impl From<BeamSettingsArgsError> for CstBeamError {
    fn from(e: BeamSettingsArgsError) -> Self {
        let s = e.to_string();
        match e {
            BeamSettingsArgsError::Glob(e) => Self::from(e),
            BeamSettingsArgsError::Freq(e) => Self::from(e),
            BeamSettingsArgsError::UnitParse(e) => Self::from(e),
            BeamSettingsArgsError::Healpix(e) => Self::from(e),
            BeamSettingsArgsError::NoFilesForGlob { .. } => Self::Glob(s),
            BeamSettingsArgsError::NoDataDir
            | BeamSettingsArgsError::DataDirNotADirectory(_)
            | BeamSettingsArgsError::NoFilesInRange { .. }
            | BeamSettingsArgsError::BadFreqRange { .. }
            | BeamSettingsArgsError::HealpixConflict
            | BeamSettingsArgsError::BadEnum { .. } => Self::BeamSettings(s),
        }
    }
}

// Library code errors.

impl From<NormaliseError> for CstBeamError {
    fn from(e: NormaliseError) -> Self {
        let s = e.to_string();
        match e {
            NormaliseError::MalformedName { .. } | NormaliseError::InvalidFrequency { .. } => {
                Self::Normalise(s)
            }
            NormaliseError::NonUtf8Name(_)
            | NormaliseError::DuplicateOutput { .. }
            | NormaliseError::Read { .. }
            | NormaliseError::Write { .. } => Self::Generic(s),
        }
    }
}

impl From<NormaliseNamesError> for CstBeamError {
    fn from(e: NormaliseNamesError) -> Self {
        match e {
            NormaliseNamesError::Normalise(e) => Self::from(e),
            NormaliseNamesError::SomeFailed { .. } => Self::Generic(e.to_string()),
        }
    }
}

impl From<BeamSettingsError> for CstBeamError {
    fn from(e: BeamSettingsError) -> Self {
        match e {
            BeamSettingsError::Settings(e) => Self::from(e),
            BeamSettingsError::FileWrite(e) => Self::from(e),
        }
    }
}

impl From<FreqFromNameError> for CstBeamError {
    fn from(e: FreqFromNameError) -> Self {
        Self::Freq(e.to_string())
    }
}

impl From<HealpixError> for CstBeamError {
    fn from(e: HealpixError) -> Self {
        Self::BeamSettings(e.to_string())
    }
}

impl From<SettingsError> for CstBeamError {
    fn from(e: SettingsError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<GlobError> for CstBeamError {
    fn from(e: GlobError) -> Self {
        Self::Glob(e.to_string())
    }
}

impl From<UnitParseError> for CstBeamError {
    fn from(e: UnitParseError) -> Self {
        Self::BeamSettings(e.to_string())
    }
}

impl From<FileWriteError> for CstBeamError {
    fn from(e: FileWriteError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for CstBeamError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
