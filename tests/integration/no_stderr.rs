// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{cstbeam, get_cmd_output, make_data_dir, make_new_style_files};

#[test]
fn test_normalise_names_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_new_style_files(tmp_dir.path(), &[150]);

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "normalise-names",
            "--files", &files[0].display().to_string(),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "normalise-names failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_beam_settings_no_stderr() {
    let data_dir = TempDir::new().expect("couldn't make tmp dir");
    make_data_dir(data_dir.path(), &[150]);
    let out_dir = TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "beam-settings",
            "--data-dir", &data_dir.path().display().to_string(),
            "--output-dir", &out_dir.path().display().to_string(),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "beam-settings failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
