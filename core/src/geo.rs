// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Geolocation against local MaxMind databases.
//!
//! The City database supplies location fields; an optional ASN database
//! supplies the ISP. Both files are deployment-time artifacts: a missing
//! or unreadable database is logged once at startup and every subsequent
//! lookup degrades to an absent outcome, never an error.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use maxminddb::{MaxMindDBError, Reader, geoip2};

use sonda_common::config::Config;
use sonda_common::models::geo::GeoRecord;
use sonda_common::models::outcome::{ProbeError, ProbeOutcome};
use sonda_common::{debug, warn};

use crate::pipeline::GeoLookup;

pub struct MaxmindGeolocator {
    city: Option<Reader<Vec<u8>>>,
    asn: Option<Reader<Vec<u8>>>,
    city_path: PathBuf,
}

impl MaxmindGeolocator {
    /// Opens the configured databases.
    ///
    /// Never fails: unavailable databases leave the geolocator in a
    /// degraded state where lookups explain what is missing.
    pub fn open(cfg: &Config) -> Self {
        let city = open_reader(&cfg.geo_db, "City");
        let asn = cfg.asn_db.as_deref().and_then(|path| open_reader(path, "ASN"));

        Self {
            city,
            asn,
            city_path: cfg.geo_db.clone(),
        }
    }

    fn try_lookup(&self, addr: Ipv4Addr) -> Result<GeoRecord, ProbeError> {
        let Some(reader) = &self.city else {
            return Err(ProbeError::GeoUnavailable {
                reason: format!("database {} is not loaded", self.city_path.display()),
            });
        };

        let ip = IpAddr::V4(addr);
        let city: geoip2::City = reader.lookup(ip).map_err(|e| geo_error(addr, e))?;

        let mut record = GeoRecord {
            country: city
                .country
                .and_then(|country| english_name(country.names)),
            city: city.city.and_then(|city| english_name(city.names)),
            postal_code: city
                .postal
                .and_then(|postal| postal.code.map(str::to_string)),
            latitude: city.location.as_ref().and_then(|loc| loc.latitude),
            longitude: city.location.as_ref().and_then(|loc| loc.longitude),
            isp: None,
        };

        if let Some(asn_reader) = &self.asn {
            match asn_reader.lookup::<geoip2::Asn>(ip) {
                Ok(asn) => {
                    record.isp = asn.autonomous_system_organization.map(str::to_string);
                }
                Err(e) => debug!("ASN attribution for {addr} unavailable: {e}"),
            }
        }

        Ok(record)
    }
}

impl GeoLookup for MaxmindGeolocator {
    fn lookup(&self, addr: Ipv4Addr) -> ProbeOutcome<GeoRecord> {
        match self.try_lookup(addr) {
            Ok(record) => {
                debug!("Geolocated {addr} ({} fields)", record.fields().len());
                ProbeOutcome::Present(record)
            }
            Err(e) => {
                warn!("{addr}: {e}");
                ProbeOutcome::absent(e.to_string())
            }
        }
    }
}

fn open_reader(path: &Path, kind: &str) -> Option<Reader<Vec<u8>>> {
    match Reader::open_readfile(path) {
        Ok(reader) => {
            debug!("Loaded {kind} database from {}", path.display());
            Some(reader)
        }
        Err(e) => {
            warn!("{kind} database {} unavailable: {e}", path.display());
            None
        }
    }
}

fn geo_error(addr: Ipv4Addr, e: MaxMindDBError) -> ProbeError {
    let reason = match e {
        MaxMindDBError::AddressNotFoundError(_) => format!("no entry for {addr}"),
        other => other.to_string(),
    };
    ProbeError::GeoUnavailable { reason }
}

fn english_name(names: Option<BTreeMap<&str, &str>>) -> Option<String> {
    names.and_then(|names| names.get("en").map(|name| (*name).to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable_geolocator() -> MaxmindGeolocator {
        let cfg = Config {
            geo_db: PathBuf::from("/nonexistent/GeoLite2-City.mmdb"),
            ..Config::default()
        };
        MaxmindGeolocator::open(&cfg)
    }

    #[test]
    fn missing_database_degrades_to_absent() {
        let geolocator = unavailable_geolocator();
        let outcome = geolocator.lookup(Ipv4Addr::new(93, 184, 216, 34));

        assert!(!outcome.is_present());
        assert!(outcome.reason().unwrap().contains("not loaded"));
    }

    #[test]
    fn private_address_lookup_does_not_panic() {
        let geolocator = unavailable_geolocator();
        let outcome = geolocator.lookup(Ipv4Addr::new(10, 0, 0, 0));

        assert!(!outcome.is_present());
    }
}
