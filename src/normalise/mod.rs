// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rewrite CST output filenames (and their header lines) into the older
//! naming convention expected by the conversion tooling.
//!
//! Newer CST runs produce files like `HERA_farfield__(f=150)[1].txt`, whereas
//! the older convention is `HERA_pattern_150.00MHz.txt` with "V" in the
//! header rather than "E-field". The offsets used to cut up a filename are
//! tied to that example convention and live in [`NameConvention`]; filenames
//! that don't follow it produce undefined (but never panicking) results.

mod error;

pub use error::NormaliseError;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use log::{debug, trace};
use rayon::prelude::*;
use strum_macros::{Display, EnumIter, EnumString};

/// Offsets and literals describing how a CST filename is cut up.
#[derive(Debug, Clone, PartialEq)]
pub struct NameConvention {
    /// The text preceding the frequency, e.g. "f=".
    pub marker: String,

    /// The text after the frequency, e.g. "[1]".
    pub terminator: String,

    /// The number of characters between the frequency and the terminator
    /// (e.g. a closing parenthesis).
    pub trailing_trim: usize,

    /// The number of characters before the marker that are not part of the
    /// new filename's prefix (e.g. "__(").
    pub prefix_trim: usize,

    /// The minimum width of the formatted frequency, zero padded.
    pub freq_width: usize,

    /// What comes after the formatted frequency.
    pub suffix: String,

    /// Replace this text in the new filename...
    pub replace_from: String,

    /// ... with this.
    pub replace_to: String,
}

impl Default for NameConvention {
    fn default() -> Self {
        Self {
            marker: "f=".to_string(),
            terminator: "[1]".to_string(),
            trailing_trim: 1,
            prefix_trim: 3,
            freq_width: 5,
            suffix: "MHz.txt".to_string(),
            replace_from: "farfield".to_string(),
            replace_to: "pattern".to_string(),
        }
    }
}

impl NameConvention {
    /// Get the frequency [MHz] out of a filename.
    pub fn extract_freq_mhz(&self, filename: &str) -> Result<f64, NormaliseError> {
        let (_, freq) = self.split(filename)?;
        Ok(freq)
    }

    /// Split a filename into the new prefix and its frequency [MHz].
    fn split<'a>(&self, filename: &'a str) -> Result<(&'a str, f64), NormaliseError> {
        let malformed = |reason: String| NormaliseError::MalformedName {
            name: filename.to_string(),
            reason,
        };

        let p = filename
            .find(self.marker.as_str())
            .ok_or_else(|| malformed(format!("no '{}' present", self.marker)))?;
        let start = p + self.marker.len();
        let q = filename[start..]
            .find(self.terminator.as_str())
            .ok_or_else(|| {
                malformed(format!(
                    "no '{}' after '{}'",
                    self.terminator, self.marker
                ))
            })?;
        let freq_str = q
            .checked_sub(self.trailing_trim)
            .and_then(|len| filename.get(start..start + len))
            .ok_or_else(|| {
                malformed(format!(
                    "fewer than {} characters between '{}' and '{}'",
                    self.trailing_trim, self.marker, self.terminator
                ))
            })?;
        let freq: f64 = freq_str
            .trim()
            .parse()
            .map_err(|_| NormaliseError::InvalidFrequency {
                name: filename.to_string(),
                freq: freq_str.to_string(),
            })?;
        let prefix = p
            .checked_sub(self.prefix_trim)
            .and_then(|end| filename.get(..end))
            .ok_or_else(|| {
                malformed(format!(
                    "fewer than {} characters before '{}'",
                    self.prefix_trim, self.marker
                ))
            })?;

        Ok((prefix, freq))
    }

    /// Format a frequency [MHz] the way it appears in new filenames.
    pub fn format_freq(&self, freq_mhz: f64) -> String {
        format!("{freq_mhz:0width$.2}", width = self.freq_width)
    }

    /// Given a filename (not a path), get the new filename.
    pub fn derive_output_name(&self, filename: &str) -> Result<String, NormaliseError> {
        let (prefix, freq) = self.split(filename)?;
        let new_name = format!("{prefix}_{}{}", self.format_freq(freq), self.suffix);
        if self.replace_from.is_empty() {
            Ok(new_name)
        } else {
            Ok(new_name.replace(self.replace_from.as_str(), &self.replace_to))
        }
    }

    /// The same as [`NameConvention::derive_output_name`], but only the file
    /// name of the path is changed; the parent directories are kept.
    pub fn derive_output_path(&self, path: &Path) -> Result<PathBuf, NormaliseError> {
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| NormaliseError::NonUtf8Name(path.to_path_buf()))?;
        let new_name = self.derive_output_name(filename)?;
        Ok(match path.parent() {
            Some(parent) => parent.join(new_name),
            None => PathBuf::from(new_name),
        })
    }
}

/// Get the new filename of a CST file with the default [`NameConvention`].
pub fn derive_output_name(filename: &str) -> Result<String, NormaliseError> {
    NameConvention::default().derive_output_name(filename)
}

/// What to replace in the first line of each file.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRewrite {
    pub from: String,
    pub to: String,
}

impl Default for HeaderRewrite {
    fn default() -> Self {
        Self {
            from: "E-field".to_string(),
            to: "V".to_string(),
        }
    }
}

impl HeaderRewrite {
    /// Apply the rewrite to the first line of `contents`. All other lines, and
    /// all line terminators, are left alone.
    pub fn apply(&self, contents: &str) -> String {
        if self.from.is_empty() {
            return contents.to_string();
        }

        let mut lines = contents.split_inclusive('\n');
        let mut out = String::with_capacity(contents.len());
        if let Some(first) = lines.next() {
            out.push_str(&first.replace(self.from.as_str(), &self.to));
        }
        out.extend(lines);
        out
    }
}

/// What to do when a file in a batch can't be normalised.
#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the batch at the first problem.
    #[default]
    #[strum(serialize = "stop")]
    Stop,

    /// Process every file and report all problems at the end.
    #[strum(serialize = "continue")]
    Continue,
}

/// The outcome of normalising a batch of files.
#[derive(Debug, Default)]
pub struct NormaliseReport {
    /// Pairs of (input, output) files.
    pub written: Vec<(PathBuf, PathBuf)>,

    /// Input files that could not be normalised.
    pub failed: Vec<(PathBuf, NormaliseError)>,
}

#[derive(Debug, Clone, Default)]
pub struct Normaliser {
    pub convention: NameConvention,
    pub header: HeaderRewrite,
    pub policy: ErrorPolicy,
}

impl Normaliser {
    /// For each input file, work out where its normalised version will go.
    /// Inputs that would clobber the output of an earlier input are errors.
    pub fn plan<P: AsRef<Path>>(
        &self,
        files: &[P],
    ) -> Vec<(PathBuf, Result<PathBuf, NormaliseError>)> {
        let mut seen: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(files.len());
        files
            .iter()
            .map(|f| {
                let input = f.as_ref().to_path_buf();
                let output = self
                    .convention
                    .derive_output_path(&input)
                    .and_then(|output| {
                        if let Some(first) = seen.get(&output) {
                            return Err(NormaliseError::DuplicateOutput {
                                first: first.clone(),
                                second: input.clone(),
                                output,
                            });
                        }
                        seen.insert(output.clone(), input.clone());
                        Ok(output)
                    });
                (input, output)
            })
            .collect()
    }

    /// Read `input`, rewrite its header and write it to `output`.
    pub fn normalise_file(&self, input: &Path, output: &Path) -> Result<(), NormaliseError> {
        trace!("Normalising '{}' -> '{}'", input.display(), output.display());
        let contents = std::fs::read_to_string(input).map_err(|err| NormaliseError::Read {
            file: input.to_path_buf(),
            err,
        })?;
        let contents = self.header.apply(&contents);
        std::fs::write(output, contents).map_err(|err| NormaliseError::Write {
            file: output.to_path_buf(),
            err,
        })
    }

    /// Normalise all of the files. With [`ErrorPolicy::Stop`], every filename
    /// is checked before anything is written, and the first error is returned.
    /// With [`ErrorPolicy::Continue`], files are processed in parallel and
    /// failures are collected in the report.
    pub fn normalise_files<P: AsRef<Path>>(
        &self,
        files: &[P],
        progress: &ProgressBar,
    ) -> Result<NormaliseReport, NormaliseError> {
        let mut report = NormaliseReport::default();
        if files.is_empty() {
            debug!("No files to normalise");
            return Ok(report);
        }

        let plan = self.plan(files);
        match self.policy {
            ErrorPolicy::Stop => {
                let mut pairs = Vec::with_capacity(plan.len());
                for (input, output) in plan {
                    pairs.push((input, output?));
                }
                for (input, output) in pairs.into_iter().progress_with(progress.clone()) {
                    self.normalise_file(&input, &output)?;
                    report.written.push((input, output));
                }
            }

            ErrorPolicy::Continue => {
                let results: Vec<_> = plan
                    .into_par_iter()
                    .progress_with(progress.clone())
                    .map(|(input, output)| {
                        let result = output.and_then(|output| {
                            self.normalise_file(&input, &output).map(|_| output)
                        });
                        (input, result)
                    })
                    .collect();
                for (input, result) in results {
                    match result {
                        Ok(output) => report.written.push((input, output)),
                        Err(e) => report.failed.push((input, e)),
                    }
                }
            }
        }
        progress.finish();

        Ok(report)
    }
}

/// Normalise files with the default convention, stopping at the first error.
pub fn normalise_files<P: AsRef<Path>>(files: &[P]) -> Result<NormaliseReport, NormaliseError> {
    Normaliser::default().normalise_files(files, &ProgressBar::hidden())
}
