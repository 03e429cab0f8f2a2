// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Cow;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use thiserror::Error;

use crate::{
    cli::{display_warnings, InfoPrinter, Warn},
    normalise::{NormaliseError, Normaliser},
    PROGRESS_BARS,
};

pub(crate) struct NormaliseNamesParams {
    pub(crate) files: Vec<PathBuf>,
    pub(crate) normaliser: Normaliser,
}

impl NormaliseNamesParams {
    /// Report what would happen to each file, without touching anything.
    pub(crate) fn display_plan(&self) {
        let mut printer = InfoPrinter::new(
            format!("Renaming {} CST files", self.files.len()).into(),
        );
        let mut block: Vec<Cow<'static, str>> = Vec::with_capacity(self.files.len());
        for (input, output) in self.normaliser.plan(&self.files) {
            match output {
                Ok(output) => {
                    block.push(format!("{} -> {}", input.display(), output.display()).into())
                }
                Err(e) => e.to_string().warn(),
            }
        }
        printer.push_block(block);
        printer.display();
        display_warnings();
    }

    pub(crate) fn run(&self) -> Result<(), NormaliseNamesError> {
        let progress = ProgressBar::with_draw_target(
            Some(self.files.len() as u64),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:18}: [{wide_bar:.blue}] {pos:3}/{len:3} files ({elapsed_precise}<{eta_precise})")
                .unwrap()
                .progress_chars("=> "),
        )
        .with_message("Normalising");

        let report = self.normaliser.normalise_files(&self.files, &progress)?;

        let mut printer = InfoPrinter::new(
            format!("Wrote {} normalised CST files", report.written.len()).into(),
        );
        printer.push_block(
            report
                .written
                .iter()
                .map(|(_, output)| output.display().to_string().into())
                .collect(),
        );
        printer.display();

        if report.failed.is_empty() {
            return Ok(());
        }
        for (input, e) in &report.failed {
            let warning: Vec<Cow<'static, str>> = vec![
                format!("Couldn't normalise '{}':", input.display()).into(),
                e.to_string().into(),
            ];
            warning.warn();
        }
        display_warnings();
        info!(
            "{} of {} files couldn't be normalised",
            report.failed.len(),
            self.files.len()
        );
        Err(NormaliseNamesError::SomeFailed {
            failed: report.failed.len(),
            total: self.files.len(),
        })
    }
}

#[derive(Error, Debug)]
pub(crate) enum NormaliseNamesError {
    #[error("{failed} of {total} files couldn't be normalised; see the warnings above")]
    SomeFailed { failed: usize, total: usize },

    #[error(transparent)]
    Normalise(#[from] NormaliseError),
}
