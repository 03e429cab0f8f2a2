// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Prepare CST-simulated antenna beams for conversion into beam FITS files.

The CST simulator writes one text file per frequency. [`normalise`] rewrites
the file names (and headers) of newer simulation runs into the older
convention, and [`cst`] describes a set of files (frequencies, metadata,
provenance, the beam files to be made from them) to the beam library.
 */

mod cli;
pub mod constants;
pub mod cst;
pub(crate) mod io;
pub mod normalise;
mod params;
pub mod provenance;
mod unit_parsing;

// Re-exports.
pub use cli::{CstBeam, CstBeamError};
pub use normalise::{
    derive_output_name, normalise_files, ErrorPolicy, HeaderRewrite, NameConvention,
    NormaliseError, NormaliseReport, Normaliser,
};
pub use provenance::{ProvenanceInfo, ProvenanceProvider};

use crossbeam_utils::atomic::AtomicCell;

lazy_static::lazy_static! {
    /// Are progress bars being drawn? This should only ever be enabled by CLI
    /// code.
    static ref PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
}
