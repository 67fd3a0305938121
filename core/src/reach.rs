// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Reachability probing through the operating system's tooling.
//!
//! Both probes are plain subprocess invocations with captured output. The
//! underlying commands impose no usable total time limit of their own, so
//! every invocation runs under an explicit timeout and the child is killed
//! when it expires.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time;

use sonda_common::models::outcome::{ProbeError, ProbeOutcome};
use sonda_common::{success, warn};

use crate::pipeline::ReachabilityProbe;

#[cfg(windows)]
const PING_COUNT_FLAG: &str = "-n";
#[cfg(not(windows))]
const PING_COUNT_FLAG: &str = "-c";

#[cfg(windows)]
const TRACEROUTE_PROGRAM: &str = "tracert";
#[cfg(not(windows))]
const TRACEROUTE_PROGRAM: &str = "traceroute";

/// Number of echo requests per ping probe.
const ECHO_COUNT: &str = "4";

pub struct SystemReachability {
    timeout: Duration,
}

impl SystemReachability {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ReachabilityProbe for SystemReachability {
    async fn ping(&self, addr: Ipv4Addr) -> ProbeOutcome<String> {
        let addr_str = addr.to_string();
        run_tool("ping", &[PING_COUNT_FLAG, ECHO_COUNT, &addr_str], self.timeout).await
    }

    async fn traceroute(&self, addr: Ipv4Addr) -> ProbeOutcome<String> {
        let addr_str = addr.to_string();
        run_tool(TRACEROUTE_PROGRAM, &[&addr_str], self.timeout).await
    }
}

async fn run_tool(tool: &'static str, args: &[&str], timeout: Duration) -> ProbeOutcome<String> {
    match capture(tool, args, timeout).await {
        Ok(text) => {
            success!("{tool} finished");
            ProbeOutcome::Present(text)
        }
        Err(e) => {
            warn!("{e}");
            ProbeOutcome::absent(e.to_string())
        }
    }
}

/// Runs one external command to completion and captures its output.
async fn capture(
    tool: &'static str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, ProbeError> {
    let mut command = Command::new(tool);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match time::timeout(timeout, command.output()).await {
        Err(_) => {
            return Err(ProbeError::Tool {
                tool,
                reason: format!("gave no result within {}s", timeout.as_secs()),
            });
        }
        Ok(Err(e)) => {
            return Err(ProbeError::Tool {
                tool,
                reason: format!("could not be launched: {e}"),
            });
        }
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        return Err(ProbeError::Tool { tool, reason });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
