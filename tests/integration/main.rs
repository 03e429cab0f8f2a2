// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod beam_settings;
mod no_stderr;
mod normalise_names;

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

fn cstbeam() -> Command {
    Command::cargo_bin("cstbeam").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write CST files named like the newer simulation runs, one per frequency
/// [MHz].
fn make_new_style_files(dir: &Path, freqs: &[u32]) -> Vec<PathBuf> {
    freqs
        .iter()
        .map(|freq| {
            let file = dir.join(format!("HERA_farfield__(f={freq})[1].txt"));
            write(
                &file,
                "Theta [deg.]  Phi   [deg.]  Abs(E-field)[V/m]  E-field pattern\n0 0 1\n",
            )
            .unwrap();
            file
        })
        .collect()
}

/// Make a data directory laid out like the HERA simulations, with one file per
/// frequency [MHz].
fn make_data_dir(dir: &Path, freqs: &[u32]) {
    for freq in freqs {
        let sub_dir = dir
            .join("Radiation patterns")
            .join("E-field pattern - Rigging height 4.9 m")
            .join(format!("{freq} MHz"));
        create_dir_all(&sub_dir).unwrap();
        write(
            sub_dir.join(format!("HERA_4.9m_E-pattern_{freq}MHz.txt")),
            "Theta [deg.]  Phi   [deg.]  Abs(V   )[V/m]\n",
        )
        .unwrap();
    }
}

#[test]
fn test_help() {
    let cmd = cstbeam().arg("--help").ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("normalise-names"));
    assert!(stdout.contains("beam-settings"));
}

#[test]
fn test_no_subcommand_is_an_error() {
    let cmd = cstbeam().ok();
    assert!(cmd.is_err());
}
