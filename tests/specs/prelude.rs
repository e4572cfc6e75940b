//! Shared helpers for driving the binary.

#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;

pub use httpmock::prelude::*;
pub use httpmock::MockServer;

/// Variables that would leak the developer's environment into a run.
const SCRUBBED_ENV: &[&str] = &[
    "SW_SERVER",
    "SW_PAGE_PATH",
    "SW_REFRESH_MS",
    "SW_AUTO_REFRESH",
    "SW_HTTP_TIMEOUT_MS",
    "SW_EVENT_CAPACITY",
    "SUPERVISOR_TOKEN",
    "SW_LOG",
];

pub fn cli() -> Cli {
    let mut cmd =
        Command::cargo_bin("scanwatch").unwrap_or_else(|e| panic!("binary not built: {e}"));
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Feed the interactive key commands, one per line.
    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Point at a mock backend.
    pub fn server(self, server: &MockServer) -> Self {
        let url = server.base_url();
        self.args(&["--server", &url])
    }

    pub fn passes(mut self) -> Output {
        Output { assert: self.cmd.assert().success() }
    }

    pub fn fails_with(mut self, code: i32) -> Output {
        Output { assert: self.cmd.assert().code(code) }
    }
}

pub struct Output {
    assert: Assert,
}

impl Output {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}

/// One running scan started long ago, and one that finished in 45s.
pub const SCAN_LIST: &str = r#"[
    {"id": 7, "status": "running", "started_at": "2024-05-01T12:00:00", "file_count": 12},
    {"id": 3, "status": "completed", "started_at": "2024-05-01T11:00:00", "ended_at": "2024-05-01T11:00:45"}
]"#;

/// Only finished scans, so no live channel is opened.
pub const FINISHED_LIST: &str = r#"[
    {"id": 3, "status": "completed", "started_at": "2024-05-01T11:00:00", "ended_at": "2024-05-01T11:00:45"}
]"#;

pub fn serve_list<'a>(server: &'a MockServer, body: &'static str) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path("/api/scan/");
        then.status(200).header("content-type", "application/json").body(body);
    })
}
