// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Probe Outcomes and Error Taxonomy
//!
//! Every probe reports through [`ProbeOutcome`]: either a payload or an
//! absence carrying a human-readable reason. Failures are converted at the
//! probe boundary; the orchestrator only ever inspects outcome tags. The
//! single exception is [`ResolutionFailed`], which terminates the run
//! because no probe can operate without an address.

use thiserror::Error;

use crate::models::dns::RecordType;

/// Result of a single probe: a payload, or an explained absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome<T> {
    Present(T),
    Absent { reason: String },
}

impl<T> ProbeOutcome<T> {
    pub fn absent(reason: impl Into<String>) -> Self {
        ProbeOutcome::Absent {
            reason: reason.into(),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, ProbeOutcome::Present(_))
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            ProbeOutcome::Present(value) => Some(value),
            ProbeOutcome::Absent { .. } => None,
        }
    }

    /// The absence reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Present(_) => None,
            ProbeOutcome::Absent { reason } => Some(reason),
        }
    }
}

impl<T> From<Result<T, ProbeError>> for ProbeOutcome<T> {
    fn from(result: Result<T, ProbeError>) -> Self {
        match result {
            Ok(value) => ProbeOutcome::Present(value),
            Err(e) => ProbeOutcome::absent(e.to_string()),
        }
    }
}

/// The only run-terminating condition: the target has no usable address.
#[derive(Debug, Error)]
#[error("failed to resolve '{domain}': {reason}")]
pub struct ResolutionFailed {
    pub domain: String,
    pub reason: String,
}

/// Non-fatal probe failures.
///
/// Each variant is caught at its probe boundary, logged, and converted
/// into a [`ProbeOutcome::Absent`] that still participates in the report.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{record} record lookup failed: {reason}")]
    RecordLookup { record: RecordType, reason: String },

    #[error("geolocation unavailable: {reason}")]
    GeoUnavailable { reason: String },

    #[error("{tool} probe failed: {reason}")]
    Tool { tool: &'static str, reason: String },

    #[error("link-layer probe failed: {reason}")]
    Link { reason: String },
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
    fn present_outcome_exposes_payload() {
        let outcome = ProbeOutcome::Present("reply".to_string());
        assert!(outcome.is_present());
        assert_eq!(outcome.as_present(), Some(&"reply".to_string()));
        assert_eq!(outcome.reason(), None);
    }

    #[test]
    fn absent_outcome_carries_reason() {
        let outcome: ProbeOutcome<String> = ProbeOutcome::absent("timed out");
        assert!(!outcome.is_present());
        assert_eq!(outcome.as_present(), None);
        assert_eq!(outcome.reason(), Some("timed out"));
    }

    #[test]
    fn probe_errors_convert_to_absence() {
        let result: Result<String, ProbeError> = Err(ProbeError::Tool {
            tool: "ping",
            reason: "exit status: 1".to_string(),
        });

        let outcome = ProbeOutcome::from(result);
        assert_eq!(outcome.reason(), Some("ping probe failed: exit status: 1"));
    }

    #[test]
    fn record_lookup_error_names_the_type() {
        let err = ProbeError::RecordLookup {
            record: RecordType::Mx,
            reason: "no records found".to_string(),
        };
        assert!(err.to_string().starts_with("MX record lookup"));
    }
}
