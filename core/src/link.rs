// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Link-layer identity discovery via ARP.
//!
//! Broadcasts a single who-has request and waits a short, fixed window for
//! the owner of the queried address to answer. Only meaningful when the
//! target shares a broadcast domain with one of the local interfaces, and
//! requires **root privileges** to open the raw Layer 2 socket — every
//! other situation resolves to an absent outcome, which is the expected
//! result for remote targets.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::{Context, bail, ensure};
use async_trait::async_trait;
use is_root::is_root;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

use sonda_common::models::outcome::{ProbeError, ProbeOutcome};
use sonda_common::models::report::LinkIdentity;
use sonda_common::utils::mac;
use sonda_common::{info, success};
use sonda_protocols::{arp, ethernet};

use crate::network::channel::{self, EthernetHandle};
use crate::pipeline::LinkLayerProbe;

/// How long to wait for the owner of the address to answer.
const ARP_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

pub struct ArpProbe {
    timeout: Duration,
}

impl ArpProbe {
    pub fn new() -> Self {
        Self {
            timeout: ARP_REPLY_TIMEOUT,
        }
    }
}

impl Default for ArpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkLayerProbe for ArpProbe {
    async fn resolve_mac(&self, addr: Ipv4Addr) -> ProbeOutcome<LinkIdentity> {
        match self.exchange(addr).await {
            Ok(identity) => {
                success!("{addr} is at {}", identity.mac);
                ProbeOutcome::Present(identity)
            }
            Err(e) => {
                let err = ProbeError::Link {
                    reason: e.to_string(),
                };
                info!(verbosity = 1, "{addr}: {err}");
                ProbeOutcome::absent(err.to_string())
            }
        }
    }
}

impl ArpProbe {
    async fn exchange(&self, target: Ipv4Addr) -> anyhow::Result<LinkIdentity> {
        ensure!(is_root(), "raw socket access requires root privileges");

        let (intf, src_net) = adjacent_interface(target).with_context(|| {
            format!("no local interface shares a broadcast domain with {target}")
        })?;
        let src_mac: MacAddr = intf
            .mac
            .with_context(|| format!("{} has no hardware address", intf.name))?;

        info!(
            verbosity = 1,
            "Sending ARP request for {target} on {}", intf.name
        );

        let request: Vec<u8> = arp::create_request(src_mac, src_net.ip(), target)?;
        let mut handle: EthernetHandle = channel::start_capture(&intf)?;
        handle.tx.send_to(&request, None);

        let deadline = tokio::time::sleep(self.timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                frame = handle.rx.recv() => {
                    match frame {
                        Some(bytes) => {
                            if let Some(mac) = match_reply(&bytes, target, src_mac) {
                                return Ok(LinkIdentity { mac, vendor: mac::vendor_of(mac) });
                            }
                        }
                        None => bail!("capture channel closed unexpectedly"),
                    }
                }

                _ = &mut deadline => {
                    bail!("no ARP reply within {}s", self.timeout.as_secs());
                }
            }
        }
    }
}

/// Finds the Layer-2-capable interface whose IPv4 network contains the target.
fn adjacent_interface(target: Ipv4Addr) -> Option<(NetworkInterface, Ipv4Network)> {
    datalink::interfaces().into_iter().find_map(|intf| {
        if !intf.is_up() || intf.is_loopback() || intf.is_point_to_point() || intf.mac.is_none() {
            return None;
        }

        let net: Ipv4Network = intf.ips.iter().find_map(|ip_net| match ip_net {
            IpNetwork::V4(v4) if v4.contains(target) => Some(*v4),
            _ => None,
        })?;

        Some((intf, net))
    })
}

/// Checks whether a captured frame is the reply we are waiting for.
fn match_reply(bytes: &[u8], target: Ipv4Addr, local_mac: MacAddr) -> Option<MacAddr> {
    let frame = ethernet::parse_frame(bytes).ok()?;
    if frame.get_source() == local_mac {
        return None;
    }
    arp::parse_reply(&frame, target).ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
