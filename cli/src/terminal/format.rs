use colored::*;

use sonda_common::config::Config;
use sonda_common::models::dns::RecordSet;
use sonda_common::models::geo::GeoRecord;
use sonda_common::models::outcome::ProbeOutcome;
use sonda_common::models::report::{LinkIdentity, Report};
use sonda_common::utils::redact;

use crate::terminal::colors;
use crate::terminal::print::{self, GLOBAL_KEY_WIDTH, Print};

type Detail = (String, ColoredString);

/// Renders the full report in fixed section order.
///
/// Every section appears exactly once; sections whose probe produced no
/// payload are rendered with an explicit "not available" line instead of
/// being skipped.
pub fn print_report(report: &Report, cfg: &Config) {
    GLOBAL_KEY_WIDTH.set(10);

    Print::header("ip address");
    print::aligned_line("Domain", report.domain.as_str().color(colors::HOSTNAME));
    print::aligned_line("Address", report.addr.to_string().color(colors::IPV4_ADDR));

    Print::header("dns information");
    match &report.dns {
        ProbeOutcome::Present(records) => print::as_tree(record_details(records)),
        ProbeOutcome::Absent { reason } => print::unavailable(reason),
    }

    Print::header("geolocation information");
    match &report.geo {
        ProbeOutcome::Present(record) if !record.is_empty() => {
            print::as_tree(geo_details(record));
        }
        ProbeOutcome::Present(_) => print::unavailable("database entry carries no fields"),
        ProbeOutcome::Absent { reason } => print::unavailable(reason),
    }

    Print::header("ping results");
    match &report.ping {
        ProbeOutcome::Present(text) => print::raw_block(text),
        ProbeOutcome::Absent { reason } => print::unavailable(reason),
    }

    Print::header("traceroute results");
    match &report.traceroute {
        ProbeOutcome::Present(text) => print::raw_block(text),
        ProbeOutcome::Absent { reason } => print::unavailable(reason),
    }

    Print::header("mac address");
    match &report.link {
        ProbeOutcome::Present(identity) => print_link_identity(identity, cfg),
        ProbeOutcome::Absent { reason } => print::unavailable(reason),
    }
}

fn record_details(records: &RecordSet) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    for (record, values) in records.iter() {
        for value in values {
            details.push((
                record.to_string(),
                value.to_string().color(colors::SECONDARY),
            ));
        }
    }

    details
}

fn geo_details(record: &GeoRecord) -> Vec<Detail> {
    record
        .fields()
        .into_iter()
        .map(|(label, value)| (label.to_string(), value.color(colors::SECONDARY)))
        .collect()
}

fn print_link_identity(identity: &LinkIdentity, cfg: &Config) {
    let mac_str: String = if cfg.redact {
        redact::mac_addr(&identity.mac)
    } else {
        identity.mac.to_string()
    };
    print::aligned_line("MAC", mac_str.color(colors::MAC_ADDR));

    if let Some(vendor) = &identity.vendor {
        print::aligned_line("Vendor", vendor.to_string().color(colors::MAC_ADDR));
    }
}
