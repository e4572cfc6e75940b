//! `--once`: a single poll, printed, with no channels opened.

use crate::prelude::*;

#[test]
fn once_lists_scans_in_backend_order() {
    let server = MockServer::start();
    let mock = serve_list(&server, SCAN_LIST);

    let out = cli().server(&server).args(&["--once"]).passes();

    mock.assert();
    let stdout = out.stdout();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("ID"), "header first:\n{stdout}");
    assert!(lines[1].starts_with("7 "), "backend order kept:\n{stdout}");
    assert!(lines[2].starts_with("3 "), "backend order kept:\n{stdout}");
}

#[test]
fn once_shows_finished_scan_as_complete() {
    let server = MockServer::start();
    serve_list(&server, SCAN_LIST);

    cli().server(&server).args(&["--once"]).passes().stdout_has("100%").stdout_has("45s");
}

#[test]
fn once_with_scan_prints_one_line() {
    let server = MockServer::start();
    serve_list(&server, SCAN_LIST);

    cli()
        .server(&server)
        .args(&["--once", "--scan", "3"])
        .passes()
        .stdout_has("scan 3 completed 100% (45s) 0 files")
        .stdout_lacks("scan 7");
}

#[test]
fn once_with_unknown_scan_fails() {
    let server = MockServer::start();
    serve_list(&server, SCAN_LIST);

    cli()
        .server(&server)
        .args(&["--once", "--scan", "99"])
        .fails_with(1)
        .stderr_has("scan 99 not found");
}

#[test]
fn once_json_has_views() {
    let server = MockServer::start();
    serve_list(&server, SCAN_LIST);

    let out = cli().server(&server).args(&["--once", "--format", "json"]).passes();

    let doc: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert!(doc.get("state").is_none());
    let scans = doc["scans"].as_array().unwrap();
    assert_eq!(scans.len(), 2);
    assert_eq!(scans[0]["id"], "7");
    assert_eq!(scans[0]["label"], "12 files");
    assert_eq!(scans[1]["percent"], 100.0);
}

#[test]
fn once_sends_token_from_env() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/scan/").header("authorization", "Bearer from-env");
        then.status(200).body("[]");
    });

    cli()
        .server(&server)
        .env("SUPERVISOR_TOKEN", "from-env")
        .args(&["--once"])
        .passes()
        .stdout_has("No scans");
    mock.assert();
}

#[test]
fn once_under_ingress_uses_token_prefix() {
    const INGRESS: &str = "/api/hassio_ingress/a1b2c3d4e5f6a7b8c9d0a1b2c3d4e5f6a7b8c9d0e";
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path(format!("{INGRESS}/api/scan/"));
        then.status(200).body("[]");
    });

    let page_path = format!("{INGRESS}/scans");
    cli().server(&server).args(&["--once", "--page-path", &page_path]).passes();
    mock.assert();
}

#[test]
fn backend_error_exits_one() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/scan/");
        then.status(500).body("boom");
    });

    cli().server(&server).args(&["--once"]).fails_with(1).stderr_has("scan poll failed");
}

#[test]
fn zero_refresh_is_a_usage_error() {
    cli().args(&["--once", "--refresh-ms", "0"]).fails_with(2).stderr_has("refresh interval");
}

#[test]
fn non_http_server_is_a_usage_error() {
    cli().args(&["--once", "--server", "ftp://example.com"]).fails_with(2).stderr_has("ftp");
}
