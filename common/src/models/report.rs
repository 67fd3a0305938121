// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Recon Report Model
//!
//! The [`Report`] aggregates everything a run learned about one target.
//!
//! ## Key Concepts
//! * **Address first**: A report only exists once the target resolved; the
//!   domain/address pair is the sole mandatory content.
//! * **Strictly additive**: The orchestrator fills each probe slot exactly
//!   once, in pipeline order; a slot that was never reached keeps its
//!   placeholder absence.

use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use crate::models::dns::RecordSet;
use crate::models::geo::GeoRecord;
use crate::models::outcome::ProbeOutcome;
use crate::models::target::Target;

/// Hardware identity discovered for an on-link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIdentity {
    pub mac: MacAddr,
    /// Vendor derived from the OUI database, when the prefix is registered.
    pub vendor: Option<String>,
}

/// Everything one run learned about a target, in pipeline order.
#[derive(Debug, Clone)]
pub struct Report {
    pub domain: Target,
    pub addr: Ipv4Addr,
    pub dns: ProbeOutcome<RecordSet>,
    pub geo: ProbeOutcome<GeoRecord>,
    pub ping: ProbeOutcome<String>,
    pub traceroute: ProbeOutcome<String>,
    pub link: ProbeOutcome<LinkIdentity>,
}

impl Report {
    /// Creates a report skeleton for a freshly resolved target.
    ///
    /// Every probe slot starts out absent so the report is complete even
    /// if the process dies mid-run.
    pub fn new(domain: Target, addr: Ipv4Addr) -> Self {
        Self {
            domain,
            addr,
            dns: ProbeOutcome::absent("probe was not attempted"),
            geo: ProbeOutcome::absent("probe was not attempted"),
            ping: ProbeOutcome::absent("probe was not attempted"),
            traceroute: ProbeOutcome::absent("probe was not attempted"),
            link: ProbeOutcome::absent("probe was not attempted"),
        }
    }

    /// Probe slots as (name, present) pairs, in pipeline order.
    pub fn sections(&self) -> [(&'static str, bool); 5] {
        [
            ("dns", self.dns.is_present()),
            ("geolocation", self.geo.is_present()),
            ("ping", self.ping.is_present()),
            ("traceroute", self.traceroute.is_present()),
            ("link", self.link.is_present()),
        ]
    }

    pub fn present_count(&self) -> usize {
        self.sections()
            .iter()
            .filter(|(_, present)| *present)
            .count()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
