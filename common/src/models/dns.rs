// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # DNS Record Set Model
//!
//! Holds the per-type results of the record sweep against a target.
//!
//! ## Key Concepts
//! * **Independent keys**: Each record type is queried on its own; a failed
//!   type is simply missing from the set.
//! * **No empty entries**: A type either maps to at least one value or is
//!   absent entirely, so absence always means "lookup failed" rather than
//!   "zero answers stored".

use std::collections::BTreeMap;
use std::fmt;

/// The record types swept during reconnaissance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
    /// IPv4 address records.
    A,
    /// Mail exchange records.
    Mx,
    /// Authoritative name server records.
    Ns,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::A, RecordType::Mx, RecordType::Ns];
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordType::A => "A",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
        };
        f.write_str(name)
    }
}

/// Mapping from record type to the values that resolved for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: BTreeMap<RecordType, Vec<String>>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the values resolved for a record type.
    ///
    /// Inserting an empty list is a no-op, which keeps the "absent key ==
    /// failed lookup" reading of the set intact.
    pub fn insert(&mut self, record: RecordType, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.records.insert(record, values);
    }

    pub fn get(&self, record: RecordType) -> Option<&[String]> {
        self.records.get(&record).map(Vec::as_slice)
    }

    pub fn contains(&self, record: RecordType) -> bool {
        self.records.contains_key(&record)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates entries in fixed A, MX, NS order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordType, &[String])> {
        self.records
            .iter()
            .map(|(record, values)| (*record, values.as_slice()))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_of_empty_values_is_a_noop() {
        let mut set = RecordSet::new();
        set.insert(RecordType::A, vec![]);

        assert!(!set.contains(RecordType::A));
        assert!(set.is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let mut set = RecordSet::new();
        set.insert(RecordType::A, vec!["93.184.216.34".to_string()]);

        assert!(set.contains(RecordType::A));
        assert!(!set.contains(RecordType::Mx));
        assert!(!set.contains(RecordType::Ns));
    }

    #[test]
    fn iteration_follows_fixed_order() {
        let mut set = RecordSet::new();
        set.insert(RecordType::Ns, vec!["a.iana-servers.net".to_string()]);
        set.insert(RecordType::A, vec!["93.184.216.34".to_string()]);

        let order: Vec<RecordType> = set.iter().map(|(record, _)| record).collect();
        assert_eq!(order, vec![RecordType::A, RecordType::Ns]);
    }

    #[test]
    fn get_returns_stored_values() {
        let mut set = RecordSet::new();
        set.insert(
            RecordType::Mx,
            vec!["10 mail.example.com".to_string()],
        );

        assert_eq!(
            set.get(RecordType::Mx),
            Some(&["10 mail.example.com".to_string()][..])
        );
        assert_eq!(set.get(RecordType::A), None);
    }
}
