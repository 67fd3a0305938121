// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pnet::util::MacAddr;

use sonda_common::models::dns::{RecordSet, RecordType};
use sonda_common::models::geo::GeoRecord;
use sonda_common::models::outcome::{ProbeOutcome, ResolutionFailed};
use sonda_common::models::report::{LinkIdentity, Report};
use sonda_common::models::target::Target;
use sonda_core::pipeline::{
    AddressResolver, GeoLookup, LinkLayerProbe, ReachabilityProbe, ReconPipeline,
};

const EXAMPLE_ADDR: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// Counts how often each probe was attempted across one run.
#[derive(Default)]
struct ProbeCounters {
    records: AtomicUsize,
    geo: AtomicUsize,
    ping: AtomicUsize,
    traceroute: AtomicUsize,
    link: AtomicUsize,
}

struct FakeResolver {
    addr: Option<Ipv4Addr>,
    records: RecordSet,
    counters: Arc<ProbeCounters>,
}

#[async_trait]
impl AddressResolver for FakeResolver {
    async fn resolve_address(&self, target: &Target) -> Result<Ipv4Addr, ResolutionFailed> {
        self.addr.ok_or_else(|| ResolutionFailed {
            domain: target.to_string(),
            reason: "no such domain".to_string(),
        })
    }

    async fn resolve_records(&self, _target: &Target) -> RecordSet {
        self.counters.records.fetch_add(1, Ordering::Relaxed);
        self.records.clone()
    }
}

struct FakeGeo {
    outcome: ProbeOutcome<GeoRecord>,
    counters: Arc<ProbeCounters>,
}

impl GeoLookup for FakeGeo {
    fn lookup(&self, _addr: Ipv4Addr) -> ProbeOutcome<GeoRecord> {
        self.counters.geo.fetch_add(1, Ordering::Relaxed);
        self.outcome.clone()
    }
}

struct FakeReach {
    ping: ProbeOutcome<String>,
    traceroute: ProbeOutcome<String>,
    counters: Arc<ProbeCounters>,
}

#[async_trait]
impl ReachabilityProbe for FakeReach {
    async fn ping(&self, _addr: Ipv4Addr) -> ProbeOutcome<String> {
        self.counters.ping.fetch_add(1, Ordering::Relaxed);
        self.ping.clone()
    }

    async fn traceroute(&self, _addr: Ipv4Addr) -> ProbeOutcome<String> {
        self.counters.traceroute.fetch_add(1, Ordering::Relaxed);
        self.traceroute.clone()
    }
}

struct FakeLink {
    outcome: ProbeOutcome<LinkIdentity>,
    counters: Arc<ProbeCounters>,
}

#[async_trait]
impl LinkLayerProbe for FakeLink {
    async fn resolve_mac(&self, _addr: Ipv4Addr) -> ProbeOutcome<LinkIdentity> {
        self.counters.link.fetch_add(1, Ordering::Relaxed);
        self.outcome.clone()
    }
}

struct PipelineSetup {
    addr: Option<Ipv4Addr>,
    records: RecordSet,
    geo: ProbeOutcome<GeoRecord>,
    ping: ProbeOutcome<String>,
    traceroute: ProbeOutcome<String>,
    link: ProbeOutcome<LinkIdentity>,
}

impl Default for PipelineSetup {
    fn default() -> Self {
        Self {
            addr: Some(EXAMPLE_ADDR),
            records: RecordSet::new(),
            geo: ProbeOutcome::absent("database not loaded"),
            ping: ProbeOutcome::absent("ping failed"),
            traceroute: ProbeOutcome::absent("traceroute failed"),
            link: ProbeOutcome::absent("no ARP reply within 2s"),
        }
    }
}

impl PipelineSetup {
    fn build(self) -> (ReconPipeline, Arc<ProbeCounters>) {
        let counters = Arc::new(ProbeCounters::default());

        let pipeline = ReconPipeline::new(
            Box::new(FakeResolver {
                addr: self.addr,
                records: self.records,
                counters: counters.clone(),
            }),
            Box::new(FakeGeo {
                outcome: self.geo,
                counters: counters.clone(),
            }),
            Box::new(FakeReach {
                ping: self.ping,
                traceroute: self.traceroute,
                counters: counters.clone(),
            }),
            Box::new(FakeLink {
                outcome: self.link,
                counters: counters.clone(),
            }),
        );

        (pipeline, counters)
    }
}

fn example_target() -> Target {
    Target::parse("example.com").unwrap()
}

#[tokio::test]
async fn failed_resolution_terminates_before_any_probe() {
    let (pipeline, counters) = PipelineSetup {
        addr: None,
        ..PipelineSetup::default()
    }
    .build();

    let result = pipeline.run(&example_target()).await;

    let err: ResolutionFailed = result.expect_err("run should fail without an address");
    assert!(err.to_string().contains("example.com"));

    assert_eq!(counters.records.load(Ordering::Relaxed), 0);
    assert_eq!(counters.geo.load(Ordering::Relaxed), 0);
    assert_eq!(counters.ping.load(Ordering::Relaxed), 0);
    assert_eq!(counters.traceroute.load(Ordering::Relaxed), 0);
    assert_eq!(counters.link.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn resolved_target_gets_every_probe_exactly_once() {
    // All probes fail; the pipeline must still visit each of them once.
    let (pipeline, counters) = PipelineSetup::default().build();

    let report = pipeline
        .run(&example_target())
        .await
        .expect("run should survive failing probes");

    assert_eq!(counters.records.load(Ordering::Relaxed), 1);
    assert_eq!(counters.geo.load(Ordering::Relaxed), 1);
    assert_eq!(counters.ping.load(Ordering::Relaxed), 1);
    assert_eq!(counters.traceroute.load(Ordering::Relaxed), 1);
    assert_eq!(counters.link.load(Ordering::Relaxed), 1);

    assert_eq!(report.present_count(), 0);
    for (_, present) in report.sections() {
        assert!(!present);
    }
}

#[tokio::test]
async fn empty_record_set_reports_no_dns_information() {
    let (pipeline, _) = PipelineSetup::default().build();

    let report = pipeline.run(&example_target()).await.unwrap();

    assert!(!report.dns.is_present());
    assert_eq!(report.dns.reason(), Some("no DNS information"));
}

#[tokio::test]
async fn record_omission_is_independent_per_type() {
    let mut records = RecordSet::new();
    records.insert(RecordType::A, vec![EXAMPLE_ADDR.to_string()]);

    let (pipeline, _) = PipelineSetup {
        records,
        ..PipelineSetup::default()
    }
    .build();

    let report = pipeline.run(&example_target()).await.unwrap();

    let records = report.dns.as_present().expect("A key should be present");
    assert!(records.contains(RecordType::A));
    assert!(!records.contains(RecordType::Mx));
    assert!(!records.contains(RecordType::Ns));
}

#[tokio::test]
async fn absent_link_probe_still_yields_a_full_report() {
    let (pipeline, _) = PipelineSetup {
        ping: ProbeOutcome::Present("4 packets transmitted, 4 received".to_string()),
        ..PipelineSetup::default()
    }
    .build();

    let report = pipeline.run(&example_target()).await.unwrap();

    assert!(report.ping.is_present());
    assert!(!report.link.is_present());
    assert!(report.link.reason().unwrap().contains("no ARP reply"));
}

#[tokio::test]
async fn end_to_end_remote_host_scenario() {
    // example.com: A and NS resolve, MX does not; geolocation knows the
    // country; both reachability probes answer; ARP stays silent.
    let mut records = RecordSet::new();
    records.insert(RecordType::A, vec![EXAMPLE_ADDR.to_string()]);
    records.insert(
        RecordType::Ns,
        vec![
            "a.iana-servers.net.".to_string(),
            "b.iana-servers.net.".to_string(),
        ],
    );

    let geo = GeoRecord {
        country: Some("United States".to_string()),
        ..GeoRecord::default()
    };

    let (pipeline, _) = PipelineSetup {
        records,
        geo: ProbeOutcome::Present(geo),
        ping: ProbeOutcome::Present("4 packets transmitted, 4 received".to_string()),
        traceroute: ProbeOutcome::Present("1  gateway  0.3ms".to_string()),
        ..PipelineSetup::default()
    }
    .build();

    let report: Report = pipeline.run(&example_target()).await.unwrap();

    assert_eq!(report.addr, EXAMPLE_ADDR);

    let dns = report.dns.as_present().unwrap();
    assert_eq!(dns.get(RecordType::A), Some(&[EXAMPLE_ADDR.to_string()][..]));
    assert!(!dns.contains(RecordType::Mx));
    assert_eq!(dns.get(RecordType::Ns).map(<[String]>::len), Some(2));

    let geo = report.geo.as_present().unwrap();
    assert_eq!(geo.country.as_deref(), Some("United States"));

    assert!(report.ping.is_present());
    assert!(report.traceroute.is_present());
    assert!(!report.link.is_present());

    // Five probe sections plus the mandatory address: nothing missing.
    assert_eq!(report.present_count(), 4);
}

#[tokio::test]
async fn local_target_scenario_carries_the_discovered_mac() {
    let identity = LinkIdentity {
        mac: MacAddr::new(0x2c, 0xcf, 0x67, 0x01, 0x02, 0x03),
        vendor: Some("Raspberry Pi (Trading) Ltd".to_string()),
    };

    let (pipeline, _) = PipelineSetup {
        link: ProbeOutcome::Present(identity.clone()),
        ..PipelineSetup::default()
    }
    .build();

    let report = pipeline.run(&example_target()).await.unwrap();

    assert_eq!(report.link.as_present(), Some(&identity));
}
