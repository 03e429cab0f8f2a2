// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where did the simulation data come from? Provenance is attached to the
//! history of beam files, but is only ever "best effort"; a data directory that
//! isn't a git repo (or a machine without git) gets a sentinel instead of an
//! error.


use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, trace};
use thiserror::Error;

use crate::cli::Warn;

/// Version-control information on a data directory. Any of the fields may be
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvenanceInfo {
    pub origin: Option<String>,
    pub branch: Option<String>,
    pub revision: Option<String>,
}

impl ProvenanceInfo {
    /// The "no provenance available" sentinel.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.origin.is_some() || self.branch.is_some() || self.revision.is_some()
    }
}

impl Display for ProvenanceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_available() {
            return write!(f, "  Git provenance unavailable.");
        }

        let or_unknown = |s: &Option<String>| s.clone().unwrap_or_else(|| "<unknown>".to_string());
        write!(
            f,
            "  Git origin: {}.  Git branch: {}.  Git hash: {}.",
            or_unknown(&self.origin),
            or_unknown(&self.branch),
            or_unknown(&self.revision)
        )
    }
}

/// Something that can describe where the data in a directory came from.
pub trait ProvenanceProvider {
    fn provenance(&self, dir: &Path) -> Result<ProvenanceInfo, ProvenanceError>;
}

/// Get provenance by running the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    pub git: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    /// Run git in `dir` with the supplied arguments. A non-zero exit status is
    /// treated as "this information isn't available", e.g. a repo without a
    /// remote has no origin URL.
    fn query(&self, dir: &Path, args: &[&str]) -> Result<Option<String>, ProvenanceError> {
        trace!("Running {} -C {} {}", self.git.display(), dir.display(), args.join(" "));
        let output = Command::new(&self.git)
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|err| ProvenanceError::Spawn {
                git: self.git.clone(),
                err,
            })?;
        if !output.status.success() {
            debug!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(None);
        }
        let stdout = String::from_utf8(output.stdout)?;
        let stdout = stdout.trim();
        Ok(if stdout.is_empty() {
            None
        } else {
            Some(stdout.to_string())
        })
    }
}

impl ProvenanceProvider for GitCli {
    fn provenance(&self, dir: &Path) -> Result<ProvenanceInfo, ProvenanceError> {
        if !dir.is_dir() {
            return Err(ProvenanceError::NotADirectory(dir.to_path_buf()));
        }

        // If this fails, there's no point asking anything else.
        let revision = self.query(dir, &["rev-parse", "HEAD"])?;
        if revision.is_none() {
            return Err(ProvenanceError::NotARepo(dir.to_path_buf()));
        }
        let origin = self.query(dir, &["config", "--get", "remote.origin.url"])?;
        let branch = self.query(dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;

        Ok(ProvenanceInfo {
            origin,
            branch,
            revision,
        })
    }
}

/// A provider that never knows anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProvenance;

impl ProvenanceProvider for NoProvenance {
    fn provenance(&self, _dir: &Path) -> Result<ProvenanceInfo, ProvenanceError> {
        Ok(ProvenanceInfo::unavailable())
    }
}

/// Ask the provider for provenance. Problems are turned into warnings and the
/// sentinel is returned.
pub fn capture_provenance<P: ProvenanceProvider + ?Sized>(
    provider: &P,
    dir: &Path,
) -> ProvenanceInfo {
    match provider.provenance(dir) {
        Ok(p) => {
            debug!("Provenance of {}: {p:?}", dir.display());
            p
        }
        Err(e) => {
            format!("Couldn't get provenance of '{}': {e}", dir.display()).warn();
            ProvenanceInfo::unavailable()
        }
    }
}

#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("'{0}' is not inside a git repository")]
    NotARepo(PathBuf),

    #[error("Couldn't run '{git}': {err}")]
    Spawn { git: PathBuf, err: std::io::Error },

    #[error("git output wasn't valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
