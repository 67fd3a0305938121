// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Geolocation Record Model
//!
//! Best-effort location and ownership attributes for a resolved address.
//! Every field is optional; the GeoLite2 City database frequently lacks
//! postal codes or city names for sparsely mapped ranges, and the ISP is
//! only available when a separate ASN database was supplied.

/// Location and network-ownership attributes of an IP address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoRecord {
    pub country: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub isp: Option<String>,
}

impl GeoRecord {
    /// True when the database returned an entry without any usable field.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Present fields as label/value pairs, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        if let Some(country) = &self.country {
            fields.push(("Country", country.clone()));
        }
        if let Some(city) = &self.city {
            fields.push(("City", city.clone()));
        }
        if let Some(postal_code) = &self.postal_code {
            fields.push(("Postal Code", postal_code.clone()));
        }
        if let Some(latitude) = self.latitude {
            fields.push(("Latitude", format!("{latitude:.4}")));
        }
        if let Some(longitude) = self.longitude {
            fields.push(("Longitude", format!("{longitude:.4}")));
        }
        if let Some(isp) = &self.isp {
            fields.push(("ISP", isp.clone()));
        }

        fields
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
