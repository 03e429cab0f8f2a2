// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::{Path, PathBuf};

use glob::glob;
use itertools::Itertools;
use log::{debug, trace};
use thiserror::Error;

/// Given a glob pattern, get all of the matches from the filesystem. Matches
/// are sorted, so results are reproducible.
pub(crate) fn get_all_matches_from_glob(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let mut entries = vec![];
    for entry in glob(g)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    entries.sort_unstable();
    Ok(entries)
}

/// From an input collection of filename or glob strings, get all of the
/// files. Strings that are existing files are used as they are, otherwise they
/// are treated as globs; a glob without any file matches is an error. Only
/// files are kept from glob results (not directories). A file named more than
/// once (e.g. by overlapping globs) is only kept the first time it's seen.
pub(crate) fn expand_input_files<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>, GlobError> {
    let mut files = vec![];
    for input in inputs.iter().map(|s| s.as_ref()) {
        if Path::new(input).is_file() {
            files.push(PathBuf::from(input));
            continue;
        }

        trace!("'{input}' isn't a file; treating it as a glob");
        let mut matches = file_matches(input)?;
        // CST names carry a literal "[1]", which a glob reads as a character
        // class.
        if matches.is_empty() && input.contains('[') {
            let literal_brackets = escape_brackets(input);
            trace!("No matches for '{input}'; trying '{literal_brackets}'");
            matches = file_matches(&literal_brackets)?;
        }
        if matches.is_empty() {
            return Err(GlobError::NoMatches {
                glob: input.to_string(),
            });
        }
        files.extend(matches);
    }

    let num_files = files.len();
    let files: Vec<PathBuf> = files
        .into_iter()
        .unique_by(|f| f.canonicalize().unwrap_or_else(|_| f.clone()))
        .collect();
    if files.len() != num_files {
        debug!("Ignoring {} repeated input files", num_files - files.len());
    }
    Ok(files)
}

/// Glob matches that are files (not directories).
fn file_matches(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    Ok(get_all_matches_from_glob(g)?
        .into_iter()
        .filter(|pb| pb.is_file())
        .collect())
}

/// Make square brackets match themselves, leaving other glob characters alone.
fn escape_brackets(g: &str) -> String {
    let mut escaped = String::with_capacity(g.len());
    for c in g.chars() {
        match c {
            '[' => escaped.push_str("[[]"),
            ']' => escaped.push_str("[]]"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error("No files were found for {glob}")]
    NoMatches { glob: String },

    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}
