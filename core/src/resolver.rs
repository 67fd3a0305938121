// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Forward DNS resolution through the system-configured resolver.
//!
//! The address lookup and the record sweep are deliberately separate: the
//! former gates the whole run, while each record type in the sweep fails
//! on its own and merely drops its key from the result set.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::Context;
use async_trait::async_trait;
use hickory_resolver::{Resolver, TokioResolver};

use sonda_common::models::dns::{RecordSet, RecordType};
use sonda_common::models::outcome::{ProbeError, ResolutionFailed};
use sonda_common::models::target::Target;
use sonda_common::{debug, warn};

use crate::pipeline::AddressResolver;

pub struct SystemResolver {
    inner: TokioResolver,
}

impl SystemResolver {
    /// Builds a resolver from the host's DNS configuration
    /// (`/etc/resolv.conf` or the platform equivalent).
    pub fn new() -> anyhow::Result<Self> {
        let inner: TokioResolver = Resolver::builder_tokio()
            .context("loading system DNS configuration")?
            .build();
        Ok(Self { inner })
    }
}

#[async_trait]
impl AddressResolver for SystemResolver {
    async fn resolve_address(&self, target: &Target) -> Result<Ipv4Addr, ResolutionFailed> {
        let lookup = self
            .inner
            .lookup_ip(target.as_str())
            .await
            .map_err(|e| ResolutionFailed {
                domain: target.to_string(),
                reason: e.to_string(),
            })?;

        lookup
            .iter()
            .find_map(|ip| match ip {
                IpAddr::V4(addr) => Some(addr),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| ResolutionFailed {
                domain: target.to_string(),
                reason: "answer contained no IPv4 address".to_string(),
            })
    }

    async fn resolve_records(&self, target: &Target) -> RecordSet {
        let mut set = RecordSet::new();
        let domain = target.as_str();

        match self.inner.ipv4_lookup(domain).await {
            Ok(lookup) => {
                let values: Vec<String> = lookup.iter().map(|a| a.to_string()).collect();
                debug!("{domain}: {} A record(s)", values.len());
                set.insert(RecordType::A, values);
            }
            Err(e) => log_record_miss(RecordType::A, target, &e.to_string()),
        }

        match self.inner.mx_lookup(domain).await {
            Ok(lookup) => {
                let values: Vec<String> = lookup
                    .iter()
                    .map(|mx| format!("{} {}", mx.preference(), mx.exchange()))
                    .collect();
                debug!("{domain}: {} MX record(s)", values.len());
                set.insert(RecordType::Mx, values);
            }
            Err(e) => log_record_miss(RecordType::Mx, target, &e.to_string()),
        }

        match self.inner.ns_lookup(domain).await {
            Ok(lookup) => {
                let values: Vec<String> = lookup.iter().map(|ns| ns.to_string()).collect();
                debug!("{domain}: {} NS record(s)", values.len());
                set.insert(RecordType::Ns, values);
            }
            Err(e) => log_record_miss(RecordType::Ns, target, &e.to_string()),
        }

        set
    }
}

fn log_record_miss(record: RecordType, target: &Target, reason: &str) {
    let err = ProbeError::RecordLookup {
        record,
        reason: reason.to_string(),
    };
    warn!("{target}: {err}");
}
