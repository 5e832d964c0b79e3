// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, make_dataset, psrplot};

#[test]
fn test_query_writes_dataset() {
    let dir = TempDir::new().unwrap();
    let dataset = make_dataset(dir.path());

    let contents = std::fs::read_to_string(&dataset).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("# P0 - P1 - EDOT - XX - YY"));
    assert_eq!(lines.count(), 8);
    // Nothing is left behind besides the dataset.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_query_reports_count() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("atnf.txt");
    let cmd = psrplot()
        .args([
            "query",
            "--from-file",
            crate::ATNF_RESPONSE_FILE,
            "--dataset",
            &format!("{}", dataset.display()),
        ])
        .ok();
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "{stderr}");
    assert!(stdout.contains("Saved 8 objects"), "{stdout}");
}

#[test]
fn test_failed_query_keeps_old_dataset() {
    let dir = TempDir::new().unwrap();
    let dataset = make_dataset(dir.path());
    let before = std::fs::read_to_string(&dataset).unwrap();

    let junk = dir.path().join("junk.html");
    std::fs::write(&junk, "<html><body>Service unavailable</body></html>").unwrap();
    let cmd = psrplot()
        .args([
            "query",
            "--from-file",
            &format!("{}", junk.display()),
            "--dataset",
            &format!("{}", dataset.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("didn't contain a table"), "{stderr}");
    assert_eq!(std::fs::read_to_string(&dataset).unwrap(), before);
}
