// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use super::common::ARG_FILE_HELP;
use crate::{
    cli::common::display_warnings,
    io::{expand_input_files, GlobError},
    normalise::{ErrorPolicy, HeaderRewrite, NameConvention, Normaliser},
    params::NormaliseNamesParams,
    CstBeamError,
};

lazy_static::lazy_static! {
    static ref ON_ERROR_HELP: String =
        format!("What to do when a file can't be normalised. 'stop' writes nothing if any file name is bad; 'continue' normalises what it can and reports the rest. Default: {}. Supported: {}", ErrorPolicy::default(), ErrorPolicy::iter().join(", "));

    static ref NAMING_DEFAULTS: NameConvention = NameConvention::default();

    static ref MARKER_HELP: String =
        format!("The text preceding the frequency in a file name. Default: '{}'", NAMING_DEFAULTS.marker);

    static ref TERMINATOR_HELP: String =
        format!("The text after the frequency in a file name. Default: '{}'", NAMING_DEFAULTS.terminator);

    static ref TRAILING_TRIM_HELP: String =
        format!("The number of characters between the frequency and the terminator. Default: {}", NAMING_DEFAULTS.trailing_trim);

    static ref PREFIX_TRIM_HELP: String =
        format!("The number of characters before the marker that are dropped from the new name. Default: {}", NAMING_DEFAULTS.prefix_trim);

    static ref FREQ_WIDTH_HELP: String =
        format!("The frequency in the new name is zero padded to this width. Default: {}", NAMING_DEFAULTS.freq_width);

    static ref SUFFIX_HELP: String =
        format!("What comes after the frequency in the new name. Default: '{}'", NAMING_DEFAULTS.suffix);

    static ref REPLACE_FROM_HELP: String =
        format!("Replace this text in the new name. An empty string disables the replacement. Default: '{}'", NAMING_DEFAULTS.replace_from);

    static ref REPLACE_TO_HELP: String =
        format!("The replacement for --replace-from. Default: '{}'", NAMING_DEFAULTS.replace_to);

    static ref HEADER_DEFAULTS: HeaderRewrite = HeaderRewrite::default();

    static ref HEADER_FROM_HELP: String =
        format!("Replace this text in the first line of each file. An empty string leaves headers alone. Default: '{}'", HEADER_DEFAULTS.from);

    static ref HEADER_TO_HELP: String =
        format!("The replacement for --header-from. Default: '{}'", HEADER_DEFAULTS.to);
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct NormaliseNamesArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// CST output files to normalise. Globs (e.g. "sims/*f=*.txt") are
    /// expanded; remember to quote them. A glob that matches nothing is tried
    /// again with its square brackets taken literally, so
    /// "sims/*(f=*)[1].txt" works.
    #[clap(short, long, multiple_values(true), help_heading = "INPUT FILES")]
    pub(super) files: Option<Vec<String>>,

    #[clap(long, help = ON_ERROR_HELP.as_str(), help_heading = "INPUT FILES")]
    pub(super) on_error: Option<String>,

    #[clap(long, help = MARKER_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) marker: Option<String>,

    #[clap(long, help = TERMINATOR_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) terminator: Option<String>,

    #[clap(long, help = TRAILING_TRIM_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) trailing_trim: Option<usize>,

    #[clap(long, help = PREFIX_TRIM_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) prefix_trim: Option<usize>,

    #[clap(long, help = FREQ_WIDTH_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) freq_width: Option<usize>,

    #[clap(long, help = SUFFIX_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) suffix: Option<String>,

    #[clap(long, help = REPLACE_FROM_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) replace_from: Option<String>,

    #[clap(long, help = REPLACE_TO_HELP.as_str(), help_heading = "NAMING CONVENTION")]
    pub(super) replace_to: Option<String>,

    #[clap(long, help = HEADER_FROM_HELP.as_str(), help_heading = "FILE CONTENTS")]
    pub(super) header_from: Option<String>,

    #[clap(long, help = HEADER_TO_HELP.as_str(), help_heading = "FILE CONTENTS")]
    pub(super) header_to: Option<String>,
}

impl NormaliseNamesArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<NormaliseNamesArgs, CstBeamError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let NormaliseNamesArgs {
                args_file: _,
                files,
                on_error,
                marker,
                terminator,
                trailing_trim,
                prefix_trim,
                freq_width,
                suffix,
                replace_from,
                replace_to,
                header_from,
                header_to,
            } = unpack_arg_file!(arg_file);

            Ok(NormaliseNamesArgs {
                args_file: None,
                files: cli_args.files.or(files),
                on_error: cli_args.on_error.or(on_error),
                marker: cli_args.marker.or(marker),
                terminator: cli_args.terminator.or(terminator),
                trailing_trim: cli_args.trailing_trim.or(trailing_trim),
                prefix_trim: cli_args.prefix_trim.or(prefix_trim),
                freq_width: cli_args.freq_width.or(freq_width),
                suffix: cli_args.suffix.or(suffix),
                replace_from: cli_args.replace_from.or(replace_from),
                replace_to: cli_args.replace_to.or(replace_to),
                header_from: cli_args.header_from.or(header_from),
                header_to: cli_args.header_to.or(header_to),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<NormaliseNamesParams, NormaliseNamesArgsError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            files,
            on_error,
            marker,
            terminator,
            trailing_trim,
            prefix_trim,
            freq_width,
            suffix,
            replace_from,
            replace_to,
            header_from,
            header_to,
        } = self;

        let files = match files {
            Some(f) if !f.is_empty() => expand_input_files(&f)?,
            _ => return Err(NormaliseNamesArgsError::NoFiles),
        };

        let policy = match on_error {
            None => ErrorPolicy::default(),
            Some(s) => ErrorPolicy::from_str(&s.to_lowercase()).map_err(|_| {
                NormaliseNamesArgsError::ErrorPolicy(format!(
                    "Unrecognised error policy '{s}'; supported: {}",
                    ErrorPolicy::iter().join(", ")
                ))
            })?,
        };

        let default = NameConvention::default();
        let convention = NameConvention {
            marker: marker.unwrap_or(default.marker),
            terminator: terminator.unwrap_or(default.terminator),
            trailing_trim: trailing_trim.unwrap_or(default.trailing_trim),
            prefix_trim: prefix_trim.unwrap_or(default.prefix_trim),
            freq_width: freq_width.unwrap_or(default.freq_width),
            suffix: suffix.unwrap_or(default.suffix),
            replace_from: replace_from.unwrap_or(default.replace_from),
            replace_to: replace_to.unwrap_or(default.replace_to),
        };
        if convention.marker.is_empty() {
            return Err(NormaliseNamesArgsError::Convention(
                "The frequency marker can't be empty".to_string(),
            ));
        }
        if convention.terminator.is_empty() {
            return Err(NormaliseNamesArgsError::Convention(
                "The frequency terminator can't be empty".to_string(),
            ));
        }

        let default = HeaderRewrite::default();
        let header = HeaderRewrite {
            from: header_from.unwrap_or(default.from),
            to: header_to.unwrap_or(default.to),
        };

        display_warnings();

        Ok(NormaliseNamesParams {
            files,
            normaliser: Normaliser {
                convention,
                header,
                policy,
            },
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), CstBeamError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            params.display_plan();
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub(super) enum NormaliseNamesArgsError {
    #[error("No CST files were supplied")]
    NoFiles,

    #[error("{0}")]
    ErrorPolicy(String),

    #[error(transparent)]
    Glob(#[from] GlobError),

    #[error("{0}")]
    Convention(String),
}
