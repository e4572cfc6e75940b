//! Help and version output

use crate::prelude::*;

#[test]
fn help_shows_usage_and_keys() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--once")
        .stdout_has("--scan")
        .stdout_has("t toggle polling");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cli().args(&["--bogus"]).fails_with(2).stderr_has("--bogus");
}
