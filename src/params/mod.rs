// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for `cstbeam` subcommands.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

mod beam_settings;
mod normalise_names;

pub(crate) use beam_settings::{BeamSettingsError, BeamSettingsParams};
pub(crate) use normalise_names::{NormaliseNamesError, NormaliseNamesParams};
