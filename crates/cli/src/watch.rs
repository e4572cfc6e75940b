// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `scanwatch` command: one-shot listing or a live, re-rendered view.

use crate::args::Cli;
use crate::exit_error::ExitError;
use crate::output::{self, Frame, OutputFormat};
use anyhow::Result;
use std::io::{IsTerminal, Write};
use std::time::Duration;
use sw_adapters::{HttpScanRegistry, ScanRegistry, WsConnector};
use sw_core::{Clock, ScanId, SystemClock};
use sw_engine::{env, Endpoint, Monitor, MonitorConfig, ScanView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How often the "last update" readout is refreshed without any event.
const READOUT_TICK: Duration = Duration::from_secs(1);

/// Flags merged with the environment.
struct Settings {
    endpoint: Endpoint,
    token: Option<String>,
    config: MonitorConfig,
    scan: Option<ScanId>,
    format: OutputFormat,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self, ExitError> {
        let server = cli.server.clone().unwrap_or_else(env::server);
        let page_path = cli.page_path.clone().unwrap_or_else(env::page_path);
        let endpoint = Endpoint::new(&server, &page_path).map_err(ExitError::usage)?;

        let mut config = MonitorConfig::from_env().map_err(ExitError::usage)?;
        if let Some(ms) = cli.refresh_ms {
            config = config
                .with_refresh_interval(Duration::from_millis(ms))
                .map_err(ExitError::usage)?;
        }
        if cli.no_auto_refresh {
            config = config.with_auto_refresh(false);
        }

        Ok(Self {
            endpoint,
            token: cli.token.clone().or_else(env::supervisor_token),
            config,
            scan: cli.scan.as_deref().map(ScanId::from),
            format: cli.format,
        })
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(&cli)?;
    tracing::debug!(
        registry = %settings.endpoint.registry_url(),
        ingress = settings.endpoint.is_ingress(),
        "resolved backend"
    );
    let registry = HttpScanRegistry::new(
        settings.endpoint.registry_url(),
        settings.token.as_deref(),
        env::http_timeout(),
    )
    .map_err(ExitError::usage)?;

    if cli.once {
        run_once(&registry, &settings).await
    } else {
        run_interactive(registry, settings).await
    }
}

/// Single poll, printed without opening any channel.
async fn run_once(registry: &HttpScanRegistry, settings: &Settings) -> Result<()> {
    let jobs = registry
        .fetch()
        .await
        .map_err(|e| ExitError::poll_failed(format!("scan poll failed: {e}")))?;
    let now_ms = SystemClock.epoch_ms();
    let views: Vec<ScanView> = jobs.iter().map(|job| ScanView::derive(job, None, now_ms)).collect();

    if let Some(id) = &settings.scan {
        if !views.iter().any(|v| &v.id == id) {
            return Err(ExitError::poll_failed(format!("scan {id} not found")).into());
        }
    }

    let frame = Frame {
        state: None,
        since_last_update: None,
        views: &views,
        scan: settings.scan.as_ref(),
    };
    print!("{}", output::render(&frame, settings.format, crate::color::should_colorize())?);
    Ok(())
}

async fn run_interactive(registry: HttpScanRegistry, settings: Settings) -> Result<()> {
    let monitor = Monitor::new(
        registry,
        WsConnector,
        SystemClock,
        settings.endpoint.clone(),
        settings.config.clone(),
    );
    let mut events = monitor.subscribe();
    monitor.attach()?;

    let colorize = crate::color::should_colorize();
    let clear = settings.format == OutputFormat::Text && std::io::stdout().is_terminal();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut readout = tokio::time::interval(READOUT_TICK);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            _ = readout.tick() => {}
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match line.trim() {
                    "t" => {
                        let state = monitor.toggle()?;
                        tracing::info!(%state, "toggled polling");
                    }
                    "r" => tokio::select! {
                        outcome = monitor.refresh() => {
                            let outcome = outcome?;
                            tracing::info!(?outcome, "manual refresh");
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    },
                    "q" => break,
                    "" => {}
                    other => {
                        eprintln!("unknown command {other:?} (t: toggle, r: refresh, q: quit)")
                    }
                },
                Ok(None) | Err(_) => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }

        let views = monitor.views();
        let frame = Frame {
            state: Some(monitor.state()),
            since_last_update: monitor.since_last_update(),
            views: &views,
            scan: settings.scan.as_ref(),
        };
        let rendered = output::render(&frame, settings.format, colorize)?;
        let mut stdout = std::io::stdout().lock();
        if clear {
            write!(stdout, "{CLEAR_SCREEN}")?;
        }
        write!(stdout, "{rendered}")?;
        stdout.flush()?;
    }

    monitor.detach();
    Ok(())
}
