// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the strict schema for user input.
//!
//! It serves as the single source of truth for the application's command-line interface.
//! The *execution* logic lives in [`recon`]; the *definition* of arguments, flags, and
//! help text is centralized here.
//!
//! Via the `From<&CommandLine> for Config` implementation it decouples the external
//! interface (CLI flags) from the internal application state (`Config`), which allows
//! the core libraries to remain agnostic of the user interface layer.

pub mod recon;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use sonda_common::config::Config;

#[derive(Parser)]
#[command(name = "sonda")]
#[command(about = "Single-host reconnaissance: DNS, geolocation, reachability and link-layer probing.")]
pub struct CommandLine {
    /// Domain to investigate (prompted for interactively when omitted)
    #[arg(value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Path to a GeoLite2 City database
    #[arg(long = "geo-db", value_name = "PATH")]
    pub geo_db: Option<PathBuf>,

    /// Path to a GeoLite2 ASN database (enables ISP attribution)
    #[arg(long = "asn-db", value_name = "PATH")]
    pub asn_db: Option<PathBuf>,

    /// Upper bound in seconds for each external probe (ping, traceroute)
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 20)]
    pub timeout: u64,

    /// Reduce UI visual density (-q: drop headers and banner)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Redact sensitive info (MAC addresses) from the report
    #[arg(long = "redact")]
    pub redact: bool,

    /// Increase logging detail (-v: debug logs, -vv: probe internals)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        let defaults = Config::default();
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            redact: cmd.redact,
            geo_db: cmd.geo_db.clone().unwrap_or(defaults.geo_db),
            asn_db: cmd.asn_db.clone(),
            probe_timeout: Duration::from_secs(cmd.timeout),
        }
    }
}
