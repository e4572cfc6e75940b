//! Interactive mode driven by key commands on stdin.

use crate::prelude::*;

#[test]
fn toggle_pauses_then_quit_exits_cleanly() {
    let server = MockServer::start();
    serve_list(&server, FINISHED_LIST);

    cli().server(&server).stdin("t\nq\n").passes().stdout_has("scanwatch paused");
}

#[test]
fn toggling_twice_resumes_polling() {
    let server = MockServer::start();
    serve_list(&server, FINISHED_LIST);

    let out = cli().server(&server).stdin("t\nt\nq\n").passes();

    let stdout = out.stdout();
    let paused = stdout.find("scanwatch paused").unwrap();
    let resumed = stdout.rfind("scanwatch polling").unwrap();
    assert!(resumed > paused, "{stdout}");
}

#[test]
fn refresh_key_fetches_again() {
    let server = MockServer::start();
    let mock = serve_list(&server, FINISHED_LIST);

    // Each `r` waits for its fetch, so both land whatever the startup fetch does.
    cli()
        .server(&server)
        .args(&["--no-auto-refresh"])
        .stdin("r\nr\nq\n")
        .passes()
        .stdout_has("scanwatch paused")
        .stdout_has("100%");

    assert!(mock.hits() >= 2);
}

#[test]
fn unknown_key_is_reported_and_ignored() {
    let server = MockServer::start();
    serve_list(&server, FINISHED_LIST);

    cli().server(&server).stdin("x\nq\n").passes().stderr_has("unknown command \"x\"");
}
