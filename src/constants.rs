// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Most of these describe the HERA simulations by Nicolas Fagnoni, which is what
the defaults of `cstbeam` are set up for.
 */

pub const DEFAULT_MODEL_NAME: &str = "E-field pattern - Rigging height 4.9 m";

/// Relative to the data directory. "{model}" is replaced by the model name.
pub const DEFAULT_BEAM_FILE_GLOB: &str = "Radiation patterns/{model}/*/*E-pattern*.txt";

pub const DEFAULT_TELESCOPE_NAME: &str = "HERA";
pub const DEFAULT_FEED_NAME: &str = "PAPER_dipole";
pub const DEFAULT_FEED_VERSION: &str = "0.1";
pub const DEFAULT_MODEL_VERSION: &str = "1.0";
pub const DEFAULT_SIMULATION_AUTHOR: &str = "Nicolas Fagnoni";

/// Output beam files start with this.
pub const DEFAULT_OUTPUT_PREFIX: &str = "NF_HERA";

/// The settings file is named after the output prefix, e.g.
/// "NF_HERA_cst_settings.yaml".
pub const SETTINGS_FILENAME_SUFFIX: &str = "_cst_settings.yaml";
