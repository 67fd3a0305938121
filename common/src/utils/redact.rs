// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Utilities for privacy-preserving output.
//!
//! Provides functions to mask personally identifiable information (PII) from recon
//! reports, such as hardware MAC addresses, while preserving enough structure
//! for the output to stay recognizable.

use pnet::util::MacAddr;

/// Redacts a MAC address to prevent hardware fingerprinting.
///
/// Returns a string where the last three octets are replaced by 'XX'. The
/// vendor prefix (OUI) stays visible so attribution still works.
///
/// # Examples
/// ```
/// use pnet::util::MacAddr;
/// use sonda_common::utils::redact;
///
/// let mac = MacAddr::new(0x2c, 0xcf, 0x67, 0xf2, 0x51, 0xe3);
/// assert_eq!(redact::mac_addr(&mac), "2c:cf:67:XX:XX:XX");
/// ```
pub fn mac_addr(mac: &MacAddr) -> String {
    format!("{:02x}:{:02x}:{:02x}:XX:XX:XX", mac.0, mac.1, mac.2)
}

/// Redacts a hostname or domain to protect privacy while maintaining some
/// recognizability.
///
/// It preserves the first 2 and last 2 characters, replacing the middle with a fixed
/// number of 'X's. For very short names (<= 4 chars), it redacts the entire string.
///
/// # Examples
/// ```
/// use sonda_common::utils::redact;
///
/// assert_eq!(redact::hostname("example.com"), "exXXXXXom");
/// assert_eq!(redact::hostname("pc"), "XXXXX");
/// ```
pub fn hostname(name: &str) -> String {
    let len = name.len();

    // If the name is too short to leave 2 chars on each side, just redact it fully
    if len <= 4 {
        return "XXXXX".to_string();
    }

    let first_two = &name[..2];
    let last_two = &name[len - 2..];

    format!("{}XXXXX{}", first_two, last_two)
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

    #[test]
    fn mac_redaction_standard() {
        let mac = MacAddr::new(0x2c, 0xcf, 0x67, 0xf2, 0x51, 0xe3);
        assert_eq!(mac_addr(&mac), "2c:cf:67:XX:XX:XX");
    }

    #[test]
    fn mac_redaction_leading_zeros() {
        // Tests that 0x05 becomes "05" and not "5"
        let mac = MacAddr::new(0x00, 0x05, 0x09, 0xaa, 0xbb, 0xcc);
        assert_eq!(mac_addr(&mac), "00:05:09:XX:XX:XX");
    }

    #[test]
    fn hostname_redaction_standard() {
        assert_eq!(hostname("example.com"), "exXXXXXom");
        assert_eq!(hostname("raspberrypi"), "raXXXXXpi");
    }

    #[test]
    fn hostname_redaction_short() {
        // Names 4 chars or less should be fully masked
        assert_eq!(hostname("ipad"), "XXXXX");
        assert_eq!(hostname(""), "XXXXX");
    }
}
