// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Which beam files a conversion should produce, and what they're called.
//!
//! The historical conversion scripts disagree on what is produced by default,
//! so the defaults are named presets; individual products can be toggled on
//! top of a preset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use vec1::Vec1;

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
pub enum OutputPreset {
    /// E-field, power and HEALPix power beams.
    #[default]
    #[strum(serialize = "original")]
    #[serde(rename = "original")]
    Original,

    /// E-field and power beams; HEALPix must be asked for.
    #[strum(serialize = "efield-power")]
    #[serde(rename = "efield-power")]
    EfieldPower,
}

impl OutputPreset {
    pub fn products(self) -> OutputProducts {
        match self {
            OutputPreset::Original => OutputProducts {
                power: true,
                healpix: true,
                peak_normalise: false,
            },
            OutputPreset::EfieldPower => OutputProducts {
                power: true,
                healpix: false,
                peak_normalise: false,
            },
        }
    }
}

/// The E-field beam is always produced; everything else is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputProducts {
    pub power: bool,
    pub healpix: bool,
    pub peak_normalise: bool,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamKind {
    #[strum(serialize = "E-field")]
    #[serde(rename = "efield")]
    Efield,

    #[strum(serialize = "power")]
    #[serde(rename = "power")]
    Power,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedOutput {
    pub kind: BeamKind,
    pub healpix: bool,
    pub peak_normalised: bool,
    pub path: PathBuf,
}

impl PlannedOutput {
    fn new(dir: &Path, prefix: &str, kind: BeamKind, healpix: bool, peak_normalise: bool) -> Self {
        let peak_normalised = peak_normalise && kind == BeamKind::Power;
        let mut stem = match kind {
            BeamKind::Efield => format!("{prefix}_efield_beam"),
            BeamKind::Power => format!("{prefix}_power_beam"),
        };
        if healpix {
            stem.push_str("_healpix");
        }
        if peak_normalised {
            stem.push_str("_peak_norm");
        }
        Self {
            kind,
            healpix,
            peak_normalised,
            path: dir.join(format!("{stem}.fits")),
        }
    }

    /// A one-line description, e.g. "power beam (HEALPix, peak normalised)".
    pub fn describe(&self) -> String {
        let mut extras = vec![];
        if self.healpix {
            extras.push("HEALPix");
        }
        if self.peak_normalised {
            extras.push("peak normalised");
        }
        if extras.is_empty() {
            format!("{} beam", self.kind)
        } else {
            format!("{} beam ({})", self.kind, extras.join(", "))
        }
    }
}

/// Get all of the beam files that a conversion produces, in the order they'd
/// be made.
pub fn plan_outputs(dir: &Path, prefix: &str, products: OutputProducts) -> Vec1<PlannedOutput> {
    let OutputProducts {
        power,
        healpix,
        peak_normalise,
    } = products;
    let mut outputs = Vec1::new(PlannedOutput::new(
        dir,
        prefix,
        BeamKind::Efield,
        false,
        peak_normalise,
    ));
    if power {
        outputs.push(PlannedOutput::new(
            dir,
            prefix,
            BeamKind::Power,
            false,
            peak_normalise,
        ));
        if healpix {
            outputs.push(PlannedOutput::new(
                dir,
                prefix,
                BeamKind::Power,
                true,
                peak_normalise,
            ));
        }
    } else if healpix {
        outputs.push(PlannedOutput::new(
            dir,
            prefix,
            BeamKind::Efield,
            true,
            peak_normalise,
        ));
    }
    outputs
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
pub enum HealpixInterp {
    #[default]
    #[strum(serialize = "az_za_simple")]
    #[serde(rename = "az_za_simple")]
    AzZaSimple,

    #[strum(serialize = "az_za_map_coordinates")]
    #[serde(rename = "az_za_map_coordinates")]
    AzZaMapCoordinates,
}

/// How to resample onto HEALPix. No nside means the beam library picks one
/// from the input resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealpixParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nside: Option<u32>,
    pub interp: HealpixInterp,
}

impl HealpixParams {
    pub fn new(nside: Option<u32>, interp: HealpixInterp) -> Result<Self, HealpixError> {
        if let Some(n) = nside {
            if !n.is_power_of_two() {
                return Err(HealpixError::BadNside(n));
            }
        }
        Ok(Self { nside, interp })
    }
}

#[derive(Error, Debug)]
pub enum HealpixError {
    #[error("HEALPix nside must be a power of 2; got {0}")]
    BadNside(u32),
}
