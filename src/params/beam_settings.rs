// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;
use vec1::Vec1;

use crate::{
    cli::{display_warnings, InfoPrinter},
    cst::{ConversionPlan, CstSettings, HealpixParams, OutputPreset, PlannedOutput, SettingsError},
    io::{can_write_to_file, FileWriteError},
    provenance::ProvenanceInfo,
};

/// Everything needed to describe a set of CST files to the beam library.
pub(crate) struct BeamSettingsParams {
    pub(crate) data_dir: PathBuf,

    /// The CST files and their frequencies [Hz], sorted by frequency.
    pub(crate) files: Vec1<(PathBuf, f64)>,

    /// Everything but the files.
    pub(crate) settings: CstSettings,

    pub(crate) settings_file: PathBuf,

    pub(crate) provenance: ProvenanceInfo,

    pub(crate) preset: OutputPreset,

    /// The beam files that the beam library should produce from the settings.
    pub(crate) outputs: Vec1<PlannedOutput>,

    /// Only populated if a HEALPix output is planned.
    pub(crate) healpix: Option<HealpixParams>,
}

impl BeamSettingsParams {
    pub(crate) fn display(&self) {
        let s = &self.settings;
        let mut printer = InfoPrinter::new("CST beam settings".into());
        printer.push_block(vec![
            format!("Data directory: {}", self.data_dir.display()).into(),
            format!("Telescope: {}, feed: {} v{}", s.telescope_name, s.feed_name, s.feed_version)
                .into(),
            format!("Model: {} v{}", s.model_name, s.model_version).into(),
            format!("Feed pol: {}, beam type: {}", s.feed_pol, s.sim_beam_type).into(),
        ]);
        if self.provenance.is_available() {
            printer.push_line(format!("Provenance:{}", self.provenance).into());
        }

        printer.push_line(
            format!(
                "{} files from {:.3} MHz to {:.3} MHz",
                self.files.len(),
                self.files.first().1 / 1e6,
                self.files.last().1 / 1e6
            )
            .into(),
        );
        printer.push_block(
            self.files
                .iter()
                .map(|(file, freq)| format!("{:>9.3} MHz: {}", freq / 1e6, file.display()).into())
                .collect(),
        );
        printer.display();

        let mut printer =
            InfoPrinter::new(format!("Beam files to produce ({} preset)", self.preset).into());
        printer.push_block(
            self.outputs
                .iter()
                .map(|o| format!("{}: {}", o.describe(), o.path.display()).into())
                .collect(),
        );
        if let Some(HealpixParams { nside, interp }) = self.healpix {
            printer.push_line(
                match nside {
                    Some(nside) => format!("HEALPix nside {nside}, interpolation {interp}"),
                    None => format!("HEALPix nside from input resolution, interpolation {interp}"),
                }
                .into(),
            );
        }
        printer.display();
        display_warnings();
    }

    pub(crate) fn run(&self) -> Result<(), BeamSettingsError> {
        can_write_to_file(&self.settings_file)?;

        // Filenames are relative to the settings file, which can only be
        // worked out once its directory exists.
        let settings_dir = match self.settings_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut settings = self.settings.clone();
        settings.set_files(&self.files, settings_dir);
        settings.conversion = Some(ConversionPlan {
            preset: self.preset,
            outputs: self.outputs.to_vec(),
            healpix: self.healpix,
        });
        settings.write_yaml(&self.settings_file)?;
        info!("CST settings written to {}", self.settings_file.display());
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(crate) enum BeamSettingsError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    FileWrite(#[from] FileWriteError),
}
