// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Describe a set of CST beam simulation files (and the beam files to make
//! from them) in a settings file that the beam library can ingest.


use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use vec1::Vec1;

use super::common::{Warn, ARG_FILE_HELP};
use crate::{
    constants::*,
    cst::{
        freq_from_filename, plan_outputs, CstSettings, FeedPol, FreqFromNameError, HealpixError,
        HealpixInterp, HealpixParams, OutputPreset, SimBeamType,
    },
    io::{expand_input_files, get_all_matches_from_glob, GlobError},
    normalise::NameConvention,
    params::BeamSettingsParams,
    provenance::{capture_provenance, GitCli, NoProvenance, ProvenanceProvider},
    unit_parsing::{parse_freq_hz, UnitParseError},
    CstBeamError,
};

lazy_static::lazy_static! {
    static ref GLOB_HELP: String =
        format!("A glob pattern, relative to the data directory, matching the CST files. Any '{{model}}' is replaced by the model name. Default: '{DEFAULT_BEAM_FILE_GLOB}'");

    static ref MODEL_NAME_HELP: String =
        format!("The name of the simulated model. Default: '{DEFAULT_MODEL_NAME}'");

    static ref TELESCOPE_NAME_HELP: String =
        format!("Default: {DEFAULT_TELESCOPE_NAME}");

    static ref FEED_NAME_HELP: String =
        format!("Default: {DEFAULT_FEED_NAME}");

    static ref FEED_VERSION_HELP: String =
        format!("Default: {DEFAULT_FEED_VERSION}");

    static ref MODEL_VERSION_HELP: String =
        format!("Default: {DEFAULT_MODEL_VERSION}");

    static ref AUTHOR_HELP: String =
        format!("Who ran the simulations; this goes into the beam history. Default: {DEFAULT_SIMULATION_AUTHOR}");

    static ref FEED_POL_HELP: String =
        format!("The polarisation of the simulated feed. Default: {}. Supported: {}", FeedPol::default(), FeedPol::iter().join(", "));

    static ref SIM_BEAM_TYPE_HELP: String =
        format!("What the CST files contain. Default: {}. Supported: {}", SimBeamType::default(), SimBeamType::iter().join(", "));

    static ref OUTPUT_PREFIX_HELP: String =
        format!("Beam files (and the settings file) are named after this. Default: {DEFAULT_OUTPUT_PREFIX}");

    static ref SETTINGS_FILE_HELP: String =
        format!("Where to write the CST settings. Default: <OUTPUT_DIR>/<OUTPUT_PREFIX>{SETTINGS_FILENAME_SUFFIX}");

    static ref PRESET_HELP: String =
        format!("Which beam files to make. 'original' makes E-field, power and HEALPix power beams; 'efield-power' doesn't make HEALPix beams. Default: {}. Supported: {}", OutputPreset::default(), OutputPreset::iter().join(", "));

    static ref HEALPIX_INTERP_HELP: String =
        format!("How to interpolate onto HEALPix. Default: {}. Supported: {}", HealpixInterp::default(), HealpixInterp::iter().join(", "));
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct BeamSettingsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The directory containing the simulations. Its git provenance is
    /// recorded in the beam history.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) data_dir: Option<PathBuf>,

    #[clap(long, help = MODEL_NAME_HELP.as_str(), help_heading = "INPUT FILES")]
    pub(super) model_name: Option<String>,

    #[clap(short, long, help = GLOB_HELP.as_str(), help_heading = "INPUT FILES")]
    pub(super) glob: Option<String>,

    /// Use these CST files (or globs) instead of searching the data
    /// directory. A glob that matches nothing is tried again with its square
    /// brackets taken literally.
    #[clap(short, long, multiple_values(true), help_heading = "INPUT FILES")]
    pub(super) files: Option<Vec<String>>,

    /// Ignore files below this frequency. Units can be Hz, kHz, MHz or GHz;
    /// without a unit, MHz is assumed.
    #[clap(long, help_heading = "INPUT FILES")]
    pub(super) min_freq: Option<String>,

    /// Ignore files above this frequency. Units can be Hz, kHz, MHz or GHz;
    /// without a unit, MHz is assumed.
    #[clap(long, help_heading = "INPUT FILES")]
    pub(super) max_freq: Option<String>,

    #[clap(long, help = TELESCOPE_NAME_HELP.as_str(), help_heading = "METADATA")]
    pub(super) telescope_name: Option<String>,

    #[clap(long, help = FEED_NAME_HELP.as_str(), help_heading = "METADATA")]
    pub(super) feed_name: Option<String>,

    #[clap(long, help = FEED_VERSION_HELP.as_str(), help_heading = "METADATA")]
    pub(super) feed_version: Option<String>,

    #[clap(long, help = MODEL_VERSION_HELP.as_str(), help_heading = "METADATA")]
    pub(super) model_version: Option<String>,

    #[clap(long, help = AUTHOR_HELP.as_str(), help_heading = "METADATA")]
    pub(super) author: Option<String>,

    #[clap(long, help = FEED_POL_HELP.as_str(), help_heading = "METADATA")]
    pub(super) feed_pol: Option<String>,

    #[clap(long, help = SIM_BEAM_TYPE_HELP.as_str(), help_heading = "METADATA")]
    pub(super) sim_beam_type: Option<String>,

    /// Don't try to get git provenance of the data directory.
    #[clap(long, help_heading = "METADATA")]
    #[serde(default)]
    pub(super) no_provenance: bool,

    /// The directory for beam files. Default: the current directory.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    #[clap(long, help = OUTPUT_PREFIX_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output_prefix: Option<String>,

    #[clap(short, long, parse(from_os_str), help = SETTINGS_FILE_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) settings_file: Option<PathBuf>,

    #[clap(short, long, help = PRESET_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) preset: Option<String>,

    /// Make a HEALPix beam, regardless of the preset.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) healpix: bool,

    /// Don't make a HEALPix beam, regardless of the preset.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) no_healpix: bool,

    /// Don't make power beams; only the E-field beam (and its HEALPix version,
    /// if asked for).
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) no_power: bool,

    /// Peak normalise the power beams.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) peak_normalise: bool,

    /// The HEALPix nside (a power of 2). The default lets the beam library
    /// pick one from the resolution of the simulations.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) nside: Option<u32>,

    #[clap(long, help = HEALPIX_INTERP_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) healpix_interp: Option<String>,
}

impl BeamSettingsArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<BeamSettingsArgs, CstBeamError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let BeamSettingsArgs {
                args_file: _,
                data_dir,
                model_name,
                glob,
                files,
                min_freq,
                max_freq,
                telescope_name,
                feed_name,
                feed_version,
                model_version,
                author,
                feed_pol,
                sim_beam_type,
                no_provenance,
                output_dir,
                output_prefix,
                settings_file,
                preset,
                healpix,
                no_healpix,
                no_power,
                peak_normalise,
                nside,
                healpix_interp,
            } = unpack_arg_file!(arg_file);

            Ok(BeamSettingsArgs {
                args_file: None,
                data_dir: cli_args.data_dir.or(data_dir),
                model_name: cli_args.model_name.or(model_name),
                glob: cli_args.glob.or(glob),
                files: cli_args.files.or(files),
                min_freq: cli_args.min_freq.or(min_freq),
                max_freq: cli_args.max_freq.or(max_freq),
                telescope_name: cli_args.telescope_name.or(telescope_name),
                feed_name: cli_args.feed_name.or(feed_name),
                feed_version: cli_args.feed_version.or(feed_version),
                model_version: cli_args.model_version.or(model_version),
                author: cli_args.author.or(author),
                feed_pol: cli_args.feed_pol.or(feed_pol),
                sim_beam_type: cli_args.sim_beam_type.or(sim_beam_type),
                no_provenance: cli_args.no_provenance || no_provenance,
                output_dir: cli_args.output_dir.or(output_dir),
                output_prefix: cli_args.output_prefix.or(output_prefix),
                settings_file: cli_args.settings_file.or(settings_file),
                preset: cli_args.preset.or(preset),
                healpix: cli_args.healpix || healpix,
                no_healpix: cli_args.no_healpix || no_healpix,
                no_power: cli_args.no_power || no_power,
                peak_normalise: cli_args.peak_normalise || peak_normalise,
                nside: cli_args.nside.or(nside),
                healpix_interp: cli_args.healpix_interp.or(healpix_interp),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<BeamSettingsParams, BeamSettingsArgsError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            data_dir,
            model_name,
            glob,
            files,
            min_freq,
            max_freq,
            telescope_name,
            feed_name,
            feed_version,
            model_version,
            author,
            feed_pol,
            sim_beam_type,
            no_provenance,
            output_dir,
            output_prefix,
            settings_file,
            preset,
            healpix,
            no_healpix,
            no_power,
            peak_normalise,
            nside,
            healpix_interp,
        } = self;

        // Check the enums first; they're cheap.
        let feed_pol = parse_enum::<FeedPol>("feed polarisation", feed_pol)?;
        let sim_beam_type = parse_enum::<SimBeamType>("simulated beam type", sim_beam_type)?;
        let preset = parse_enum::<OutputPreset>("output preset", preset)?;
        let healpix_interp = parse_enum::<HealpixInterp>("HEALPix interpolation", healpix_interp)?;

        let data_dir = data_dir.ok_or(BeamSettingsArgsError::NoDataDir)?;
        if !data_dir.is_dir() {
            return Err(BeamSettingsArgsError::DataDirNotADirectory(data_dir));
        }
        let model_name = model_name.unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());

        // Find the CST files.
        let files = match files {
            Some(files) if !files.is_empty() => {
                if glob.is_some() {
                    "Ignoring the glob, because CST files were explicitly given".warn();
                }
                expand_input_files(&files)?
            }
            _ => {
                let glob = beam_file_glob(
                    &data_dir,
                    glob.as_deref().unwrap_or(DEFAULT_BEAM_FILE_GLOB),
                    &model_name,
                );
                let files: Vec<PathBuf> = get_all_matches_from_glob(&glob)?
                    .into_iter()
                    .filter(|f| f.is_file())
                    .collect();
                if files.is_empty() {
                    return Err(BeamSettingsArgsError::NoFilesForGlob { glob });
                }
                files
            }
        };
        debug!("Found {} CST files", files.len());

        // Get their frequencies.
        let convention = NameConvention::default();
        let mut files = files
            .into_iter()
            .map(|f| freq_from_filename(&f, &convention).map(|freq| (f, freq)))
            .collect::<Result<Vec<_>, _>>()?;

        // Filter them.
        let min_freq = min_freq.as_deref().map(parse_freq_hz).transpose()?;
        let max_freq = max_freq.as_deref().map(parse_freq_hz).transpose()?;
        if let (Some(min), Some(max)) = (min_freq, max_freq) {
            if min > max {
                return Err(BeamSettingsArgsError::BadFreqRange { min, max });
            }
        }
        let num_files = files.len();
        files.retain(|(_, freq)| {
            min_freq.map(|min| *freq >= min).unwrap_or(true)
                && max_freq.map(|max| *freq <= max).unwrap_or(true)
        });
        if num_files != files.len() {
            debug!(
                "{} files were outside the frequency range",
                num_files - files.len()
            );
        }
        files.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        for ((a, fa), (b, fb)) in files.iter().tuple_windows() {
            if fa == fb {
                format!(
                    "'{}' and '{}' have the same frequency ({} MHz)",
                    a.display(),
                    b.display(),
                    fa / 1e6
                )
                .warn();
            }
        }
        let files = Vec1::try_from_vec(files).map_err(|_| BeamSettingsArgsError::NoFilesInRange {
            min: min_freq,
            max: max_freq,
        })?;

        // Where did the data come from?
        let provider: Box<dyn ProvenanceProvider> = if no_provenance {
            Box::new(NoProvenance)
        } else {
            Box::<GitCli>::default()
        };
        let provenance = capture_provenance(provider.as_ref(), &data_dir);
        let author = author.unwrap_or_else(|| DEFAULT_SIMULATION_AUTHOR.to_string());
        let history = format!("CST simulations by {author}.{provenance}");

        // What should be made?
        let mut products = preset.products();
        match (healpix, no_healpix) {
            (true, true) => return Err(BeamSettingsArgsError::HealpixConflict),
            (true, false) => products.healpix = true,
            (false, true) => products.healpix = false,
            (false, false) => (),
        }
        if no_power {
            products.power = false;
        }
        products.peak_normalise = peak_normalise;

        let output_dir = output_dir.unwrap_or_default();
        let output_prefix = output_prefix.unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string());
        let outputs = plan_outputs(&output_dir, &output_prefix, products);
        let healpix = if outputs.iter().any(|o| o.healpix) {
            Some(HealpixParams::new(nside, healpix_interp)?)
        } else {
            if nside.is_some() {
                "Ignoring the HEALPix nside, because no HEALPix beams will be made".warn();
            }
            None
        };
        let settings_file = settings_file.unwrap_or_else(|| {
            output_dir.join(format!("{output_prefix}{SETTINGS_FILENAME_SUFFIX}"))
        });

        Ok(BeamSettingsParams {
            data_dir,
            files,
            settings: CstSettings {
                telescope_name: telescope_name
                    .unwrap_or_else(|| DEFAULT_TELESCOPE_NAME.to_string()),
                feed_name: feed_name.unwrap_or_else(|| DEFAULT_FEED_NAME.to_string()),
                feed_version: feed_version.unwrap_or_else(|| DEFAULT_FEED_VERSION.to_string()),
                model_name,
                model_version: model_version.unwrap_or_else(|| DEFAULT_MODEL_VERSION.to_string()),
                history,
                sim_beam_type,
                feed_pol,
                frequencies: vec![],
                filenames: vec![],
                conversion: None,
            },
            settings_file,
            provenance,
            preset,
            outputs,
            healpix,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), CstBeamError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;
        params.display();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

/// Parse an optional string into an enum, falling back to the enum's default.
fn parse_enum<T>(what: &'static str, s: Option<String>) -> Result<T, BeamSettingsArgsError>
where
    T: FromStr + IntoEnumIterator + Display + Default,
{
    match s {
        None => Ok(T::default()),
        Some(s) => T::from_str(&s).map_err(|_| BeamSettingsArgsError::BadEnum {
            what,
            got: s,
            valid: T::iter().join(", "),
        }),
    }
}

#[derive(Error, Debug)]
pub(super) enum BeamSettingsArgsError {
    #[error("No data directory was specified")]
    NoDataDir,

    #[error("The data directory '{0}' doesn't exist or isn't a directory")]
    DataDirNotADirectory(PathBuf),

    #[error("No CST files were found with the glob '{glob}'")]
    NoFilesForGlob { glob: String },

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error(transparent)]
    Freq(#[from] FreqFromNameError),

    #[error(transparent)]
    UnitParse(#[from] UnitParseError),

    #[error("The minimum frequency ({} MHz) is bigger than the maximum frequency ({} MHz)", min / 1e6, max / 1e6)]
    BadFreqRange { min: f64, max: f64 },

    #[error("No CST files were in the frequency range {}", describe_range(*min, *max))]
    NoFilesInRange { min: Option<f64>, max: Option<f64> },

    #[error("Both --healpix and --no-healpix were given")]
    HealpixConflict,

    #[error(transparent)]
    Healpix(#[from] HealpixError),

    #[error("Unrecognised {what} '{got}'; supported: {valid}")]
    BadEnum {
        what: &'static str,
        got: String,
        valid: String,
    },
}

fn describe_range(min: Option<f64>, max: Option<f64>) -> String {
    let mhz = |f: Option<f64>| match f {
        Some(f) => format!("{} MHz", f / 1e6),
        None => "-".to_string(),
    };
    format!("[{}, {}]", mhz(min), mhz(max))
}

/// The glob used to find CST files in a data directory. Special characters in
/// the directory and model name are escaped, so only the pattern itself is
/// treated as a glob.
fn beam_file_glob(data_dir: &Path, pattern: &str, model_name: &str) -> String {
    format!(
        "{}/{}",
        glob::Pattern::escape(&data_dir.display().to_string()),
        pattern.replace("{model}", &glob::Pattern::escape(model_name))
    )
}
