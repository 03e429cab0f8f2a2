// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff (globs, checking inputs can be read and outputs can be written).

mod glob;
mod write;

pub(crate) use self::glob::{expand_input_files, get_all_matches_from_glob, GlobError};
pub(crate) use write::{can_write_to_file, FileWriteError};
