// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Internal recon-specific operational guidance.
const RECON_TIPS: &[&str] = &[
    "Provide --geo-db with a GeoLite2 City file for location data",
    "Pair --asn-db with an ASN database to attribute the ISP",
    "MAC discovery only answers for targets on your own subnet",
    "Running with root enables the raw-socket ARP probe",
    "Use -v to see why a failed probe was marked unavailable",
    "The '--redact' flag is your friend for output sharing",
];

/// Technical facts and networking trivia.
const TECH_TRIVIA: &[&str] = &[
    "Ping is named after the sound of a submarine's sonar",
    "Traceroute works by deliberately letting packets expire",
    "1.1.1.1 is actually owned by APNIC, not Cloudflare",
    "RFC 1149: Standard for Avian IP (actual pigeons)",
];

/// Industry jokes and developer humor.
const DEV_HUMOR: &[&str] = &[
    "UDP: I'd tell you a joke, but you might not get it",
    "TCP: I'll tell you a joke. Do you want to hear a joke?",
    "The probe works on my machine though",
    "The 'S' in IoT stands for Security",
];

/// Generates a randomized list of UI messages.
///
/// Every slot in the resulting list has a 50% probability of being an
/// operational tip and a 50% probability of being flavor text (trivia/humor),
/// provided both pools still have remaining items.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = RECON_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut flavor: Vec<&str> = TECH_TRIVIA
        .iter()
        .chain(DEV_HUMOR.iter())
        .copied()
        .collect();
    flavor.shuffle(&mut rng);

    let total_len = tips.len() + flavor.len();
    let mut output = Vec::with_capacity(total_len);

    while !tips.is_empty() && !flavor.is_empty() {
        let pick_tip = rng.random_bool(0.5);
        if pick_tip {
            output.push(tips.remove(0));
        } else {
            output.push(flavor.remove(0));
        }
    }

    output.extend(tips);
    output.extend(flavor);
    output
}
