// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for sets of CST beam simulation files: getting their frequencies,
//! describing them to the beam library, and working out which beam files
//! should come out of a conversion.

mod freq;
mod outputs;
mod settings;

pub use freq::{freq_from_filename, FreqFromNameError};
pub use outputs::{
    plan_outputs, BeamKind, HealpixError, HealpixInterp, HealpixParams, OutputPreset,
    OutputProducts, PlannedOutput,
};
pub use settings::{ConversionPlan, CstSettings, FeedPol, SettingsError, SimBeamType};
