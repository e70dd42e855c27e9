//! The live header-to-path mapping and its flat persistence form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the mapping table: a source header and its target path.
///
/// `target` is a concrete path, possibly with literal array indices
/// (`materials[2].name`). `None` means the header is unmapped, or —
/// when `approved` is set — explicitly skipped. `approved` starts
/// false on auto-suggestions and is cleared by any manual edit until
/// the user confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub header: String,
    pub target: Option<String>,
    pub approved: bool,
}

/// The set of mapping entries, one per source header.
///
/// Entry order follows the source header order, which drives display
/// order downstream. The header set is fixed by the source data;
/// edits change targets and approval, never the header list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    entries: Vec<MappingEntry>,
}

impl Mapping {
    /// One unmapped, unapproved entry per header.
    pub fn new(headers: &[String]) -> Self {
        Self {
            entries: headers
                .iter()
                .map(|header| MappingEntry {
                    header: header.clone(),
                    target: None,
                    approved: false,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn entry(&self, header: &str) -> Option<&MappingEntry> {
        self.entries.iter().find(|entry| entry.header == header)
    }

    fn entry_mut(&mut self, header: &str) -> Option<&mut MappingEntry> {
        self.entries.iter_mut().find(|entry| entry.header == header)
    }

    /// Set or clear a header's target. Clears approval; the user must
    /// confirm the edit before it counts as reviewed.
    /// Returns false for unknown headers.
    pub fn set_target(&mut self, header: &str, target: Option<String>) -> bool {
        match self.entry_mut(header) {
            Some(entry) => {
                entry.target = target;
                entry.approved = false;
                true
            }
            None => false,
        }
    }

    /// Mark a header's current state as reviewed.
    pub fn approve(&mut self, header: &str) -> bool {
        match self.entry_mut(header) {
            Some(entry) => {
                entry.approved = true;
                true
            }
            None => false,
        }
    }

    /// Explicitly skip a header: no target, but reviewed.
    pub fn skip(&mut self, header: &str) -> bool {
        match self.entry_mut(header) {
            Some(entry) => {
                entry.target = None;
                entry.approved = true;
                true
            }
            None => false,
        }
    }

    /// Drop a header's target and approval.
    pub fn clear(&mut self, header: &str) -> bool {
        match self.entry_mut(header) {
            Some(entry) => {
                entry.target = None;
                entry.approved = false;
                true
            }
            None => false,
        }
    }

    /// Entries with a target, approved or not.
    pub fn mapped_entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter().filter(|entry| entry.target.is_some())
    }

    /// Approved entries with a target; the set the record builder applies.
    pub fn approved_entries(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.approved && entry.target.is_some())
    }

    /// True once every header is approved (mapped or explicitly skipped).
    pub fn is_fully_reviewed(&self) -> bool {
        self.entries.iter().all(|entry| entry.approved)
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Flat persistence form of an approved mapping: header -> targetPath.
///
/// Loading seeds a [`Mapping`] against the current header set, marking
/// every present header approved; the caller owns the actual file I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default = "default_version")]
    pub version: String,
    pub targets: BTreeMap<String, String>,
}

/// How a saved config lines up with the current header set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    /// Headers in the config but absent from the source data.
    pub stale_headers: Vec<String>,
    /// Source headers with no saved target.
    pub new_headers: Vec<String>,
}

impl MappingConfig {
    /// Capture the approved entries of a mapping.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let targets = mapping
            .approved_entries()
            .filter_map(|entry| {
                entry
                    .target
                    .as_ref()
                    .map(|target| (entry.header.clone(), target.clone()))
            })
            .collect();
        Self {
            version: default_version(),
            targets,
        }
    }

    /// Seed a mapping for the given header set. Saved targets for
    /// present headers are applied and marked approved; headers without
    /// a saved target stay unmapped.
    pub fn seed(&self, headers: &[String]) -> Mapping {
        let mut mapping = Mapping::new(headers);
        for header in headers {
            if let Some(target) = self.targets.get(header) {
                mapping.set_target(header, Some(target.clone()));
                mapping.approve(header);
            }
        }
        mapping
    }

    /// Diff the saved header set against the current one.
    pub fn diff(&self, headers: &[String]) -> ConfigDiff {
        let stale_headers = self
            .targets
            .keys()
            .filter(|saved| !headers.iter().any(|header| header == *saved))
            .cloned()
            .collect();
        let new_headers = headers
            .iter()
            .filter(|header| !self.targets.contains_key(*header))
            .cloned()
            .collect();
        ConfigDiff {
            stale_headers,
            new_headers,
        }
    }
}
