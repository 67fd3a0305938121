// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Orchestration logic for single-host reconnaissance.
//!
//! This module sequences the individual probes against one target:
//! - **Resolver**: domain to IPv4 address plus the A/MX/NS record sweep.
//! - **Geolocator**: local GeoLite2 database lookup.
//! - **Reachability**: the operating system's ping and traceroute.
//! - **Link layer**: ARP request on the local broadcast domain.
//!
//! Address resolution is the only fatal step; every probe after it runs
//! exactly once and converts its own failure into an absent report
//! section, so a run that gets past resolution always produces a full
//! [`Report`].

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sonda_common::config::Config;
use sonda_common::models::dns::RecordSet;
use sonda_common::models::geo::GeoRecord;
use sonda_common::models::outcome::{ProbeOutcome, ResolutionFailed};
use sonda_common::models::report::{LinkIdentity, Report};
use sonda_common::models::target::Target;
use sonda_common::{debug, success};

use crate::geo::MaxmindGeolocator;
use crate::link::ArpProbe;
use crate::reach::SystemReachability;
use crate::resolver::SystemResolver;

/// Stage labels in execution order, surfaced to the CLI spinner.
const STAGE_LABELS: [&str; 7] = [
    "idle",
    "resolving the address",
    "sweeping DNS records",
    "consulting the geo database",
    "pinging",
    "tracing the route",
    "probing the link layer",
];

static ACTIVE_STAGE: AtomicUsize = AtomicUsize::new(0);

fn enter_stage(stage: usize) {
    ACTIVE_STAGE.store(stage, Ordering::Relaxed);
}

/// Human-readable label of the stage the pipeline is currently in.
pub fn active_stage() -> &'static str {
    let stage = ACTIVE_STAGE.load(Ordering::Relaxed);
    STAGE_LABELS[stage.min(STAGE_LABELS.len() - 1)]
}

#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolves the target to an IPv4 address. Failure terminates the run.
    async fn resolve_address(&self, target: &Target) -> Result<Ipv4Addr, ResolutionFailed>;

    /// Sweeps A, MX and NS records. Per-type failures are logged by the
    /// implementation and show up as missing keys, never as an error.
    async fn resolve_records(&self, target: &Target) -> RecordSet;
}

pub trait GeoLookup: Send + Sync {
    fn lookup(&self, addr: Ipv4Addr) -> ProbeOutcome<GeoRecord>;
}

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn ping(&self, addr: Ipv4Addr) -> ProbeOutcome<String>;
    async fn traceroute(&self, addr: Ipv4Addr) -> ProbeOutcome<String>;
}

#[async_trait]
pub trait LinkLayerProbe: Send + Sync {
    async fn resolve_mac(&self, addr: Ipv4Addr) -> ProbeOutcome<LinkIdentity>;
}

/// The sequential host-reconnaissance pipeline.
///
/// ### Contract
/// - **Fatal resolution**: `run` returns an error only when the target has
///   no usable address.
/// - **No mid-run aborts**: once resolved, every remaining probe is
///   attempted exactly once, in fixed order, regardless of outcomes.
///
/// Components are held behind trait objects so tests can substitute fakes
/// for the raw-socket and subprocess implementations.
pub struct ReconPipeline {
    resolver: Box<dyn AddressResolver>,
    geolocator: Box<dyn GeoLookup>,
    reach: Box<dyn ReachabilityProbe>,
    link: Box<dyn LinkLayerProbe>,
}

impl ReconPipeline {
    /// Builds the pipeline with the system-backed probe implementations.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(SystemResolver::new()?),
            Box::new(MaxmindGeolocator::open(cfg)),
            Box::new(SystemReachability::new(cfg.probe_timeout)),
            Box::new(ArpProbe::new()),
        ))
    }

    pub fn new(
        resolver: Box<dyn AddressResolver>,
        geolocator: Box<dyn GeoLookup>,
        reach: Box<dyn ReachabilityProbe>,
        link: Box<dyn LinkLayerProbe>,
    ) -> Self {
        Self {
            resolver,
            geolocator,
            reach,
            link,
        }
    }

    /// Runs every probe against the target and assembles the report.
    pub async fn run(&self, target: &Target) -> Result<Report, ResolutionFailed> {
        enter_stage(1);
        let addr: Ipv4Addr = self.resolver.resolve_address(target).await?;
        success!("Resolved {target} to {addr}");

        let mut report = Report::new(target.clone(), addr);

        enter_stage(2);
        let records: RecordSet = self.resolver.resolve_records(target).await;
        report.dns = if records.is_empty() {
            ProbeOutcome::absent("no DNS information")
        } else {
            ProbeOutcome::Present(records)
        };

        enter_stage(3);
        report.geo = self.geolocator.lookup(addr);

        enter_stage(4);
        report.ping = self.reach.ping(addr).await;

        enter_stage(5);
        report.traceroute = self.reach.traceroute(addr).await;

        enter_stage(6);
        report.link = self.link.resolve_mac(addr).await;

        enter_stage(0);
        debug!(
            "Run for {target} finished with {}/5 probes answering",
            report.present_count()
        );

        Ok(report)
    }
}
