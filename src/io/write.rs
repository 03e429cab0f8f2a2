// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Checks for output files, done before any real work.

use std::path::{Path, PathBuf};

use log::trace;
use thiserror::Error;

use crate::cli::Warn;

/// Test whether we can write to `file`. Directories leading up to the file are
/// created if they don't exist. A warning is emitted if the file already
/// exists (it will be overwritten).
pub(crate) fn can_write_to_file(file: &Path) -> Result<(), FileWriteError> {
    trace!("Testing whether we can write to {}", file.display());

    if file.is_dir() {
        return Err(FileWriteError::IsADirectory(file.to_path_buf()));
    }

    let exists = can_write_to_file_inner(file)?;
    if exists {
        format!("Will overwrite the existing file '{}'", file.display()).warn();
    }

    Ok(())
}

fn can_write_to_file_inner(file: &Path) -> Result<bool, FileWriteError> {
    let file_exists = file.exists();

    // Make the directories leading up to the file; if this fails, then we
    // can't write the file anyway.
    if let Some(p) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        match std::fs::DirBuilder::new()
            .recursive(true)
            .create(p)
            .map_err(|e| e.kind())
        {
            Ok(()) => (),
            Err(std::io::ErrorKind::PermissionDenied) => {
                return Err(FileWriteError::NewDirectory(p.to_path_buf()))
            }
            Err(e) => return Err(FileWriteError::IO(e.into())),
        }
    }

    // Opening with "append" means an existing file isn't truncated.
    match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(file)
        .map_err(|e| e.kind())
    {
        // File is writable.
        Ok(_) => {
            // If the file in question didn't already exist, `OpenOptions::new`
            // creates it as part of its work. We don't want to keep the 0-sized
            // file; remove it if it didn't exist before.
            if !file_exists {
                std::fs::remove_file(file).map_err(FileWriteError::IO)?;
            }
        }

        Err(std::io::ErrorKind::PermissionDenied) => {
            return Err(FileWriteError::FileNotWritable {
                file: file.display().to_string(),
            })
        }

        Err(e) => {
            return Err(FileWriteError::IO(e.into()));
        }
    }

    Ok(file_exists)
}

#[derive(Error, Debug)]
pub enum FileWriteError {
    #[error("Cannot write to the specified file '{file}'. Do you have write permissions set?")]
    FileNotWritable { file: String },

    #[error("The output '{0}' is a directory, not a file")]
    IsADirectory(PathBuf),

    #[error(
        "Couldn't create directory '{0}' for output files. Do you have write permissions set?"
    )]
    NewDirectory(PathBuf),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
