// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Recon Target Model
//!
//! Defines the single input of a reconnaissance run.
//!
//! This module handles validating an operator-supplied domain name and
//! normalizing it into a form the resolver can consume.

use std::fmt;

use anyhow::{bail, ensure};

/// Longest domain name accepted, per RFC 1035.
const MAX_DOMAIN_LEN: usize = 253;
/// Longest individual label accepted, per RFC 1035.
const MAX_LABEL_LEN: usize = 63;

/// A validated domain name.
///
/// Immutable once captured; consumed by the resolver at the start of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    /// Parses a raw operator input into a [`Target`].
    ///
    /// Handles:
    /// * Surrounding whitespace and a trailing root dot ("example.com.")
    /// * Case folding ("EXAMPLE.com")
    ///
    /// Rejects empty input, embedded whitespace, malformed labels and
    /// characters that cannot appear in a hostname.
    pub fn parse(input: &str) -> anyhow::Result<Target> {
        let normalized = input.trim().trim_end_matches('.').to_ascii_lowercase();

        ensure!(!normalized.is_empty(), "No target domain given");
        ensure!(
            normalized.len() <= MAX_DOMAIN_LEN,
            "Domain exceeds {MAX_DOMAIN_LEN} characters: '{normalized}'"
        );

        for label in normalized.split('.') {
            validate_label(label, &normalized)?;
        }

        Ok(Target(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks a single dot-separated label.
fn validate_label(label: &str, original: &str) -> anyhow::Result<()> {
    if label.is_empty() {
        bail!("Invalid target format: '{original}' (empty label)");
    }
    if label.len() > MAX_LABEL_LEN {
        bail!("Invalid target format: '{original}' (label too long)");
    }
    if label.starts_with('-') || label.ends_with('-') {
        bail!("Invalid target format: '{original}' (label may not begin or end with '-')");
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        bail!("Invalid target format: '{original}' (unexpected character '{bad}')");
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
