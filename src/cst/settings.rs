// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! CST settings files. These YAML files describe a set of CST simulation text
//! files (one per frequency) and the metadata that goes with them, and can be
//! handed straight to UVBeam's CST reader.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::{HealpixParams, OutputPreset, PlannedOutput};

#[derive(
    Debug,
    Display,
    EnumIter,
    EnumString,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
)]
pub enum SimBeamType {
    #[default]
    #[strum(serialize = "E-farfield")]
    #[serde(rename = "E-farfield")]
    EFarfield,

    #[strum(serialize = "power")]
    #[serde(rename = "power")]
    Power,
}

#[derive(
    Debug,
    Display,
    EnumIter,
    EnumString,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
)]
pub enum FeedPol {
    #[default]
    #[strum(serialize = "x")]
    #[serde(rename = "x")]
    X,

    #[strum(serialize = "y")]
    #[serde(rename = "y")]
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstSettings {
    pub telescope_name: String,
    pub feed_name: String,
    pub feed_version: String,
    pub model_name: String,
    pub model_version: String,
    pub history: String,
    pub sim_beam_type: SimBeamType,
    pub feed_pol: FeedPol,

    /// One per file [Hz].
    pub frequencies: Vec<f64>,

    /// Relative to the directory containing the settings file, if possible.
    pub filenames: Vec<String>,

    /// The beam library keeps unknown keys as extra keywords, so the planned
    /// beam files travel with the settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionPlan>,
}

/// The beam files to make from a set of CST files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPlan {
    pub preset: OutputPreset,
    pub outputs: Vec<PlannedOutput>,

    /// Only present if a HEALPix beam is planned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healpix: Option<HealpixParams>,
}

impl CstSettings {
    /// Set the files (and their frequencies [Hz]) described by these
    /// settings. Filenames are made relative to `settings_dir` where possible,
    /// because that's where the beam library looks for them.
    pub fn set_files(&mut self, files: &[(PathBuf, f64)], settings_dir: &Path) {
        let settings_dir = settings_dir.canonicalize().ok();
        self.frequencies = files.iter().map(|(_, f)| *f).collect();
        self.filenames = files
            .iter()
            .map(|(file, _)| {
                let abs = file.canonicalize().unwrap_or_else(|_| file.clone());
                settings_dir
                    .as_ref()
                    .and_then(|d| abs.strip_prefix(d).ok())
                    .unwrap_or(&abs)
                    .display()
                    .to_string()
            })
            .collect();
    }

    pub fn write_yaml(&self, file: &Path) -> Result<(), SettingsError> {
        debug!("Writing CST settings to {}", file.display());
        let mut f = BufWriter::new(File::create(file)?);
        serde_yaml::to_writer(&mut f, self)?;
        f.flush()?;
        Ok(())
    }

    pub fn read_yaml(file: &Path) -> Result<CstSettings, SettingsError> {
        let f = BufReader::new(File::open(file)?);
        let settings: CstSettings = serde_yaml::from_reader(f)?;
        if settings.frequencies.len() != settings.filenames.len() {
            return Err(SettingsError::Mismatch {
                freqs: settings.frequencies.len(),
                files: settings.filenames.len(),
            });
        }
        Ok(settings)
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("The number of frequencies ({freqs}) doesn't match the number of files ({files})")]
    Mismatch { freqs: usize, files: usize },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
