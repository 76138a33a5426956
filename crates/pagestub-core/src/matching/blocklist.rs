//! Hostname blocklist.

use std::collections::HashSet;

/// Set of hostnames whose requests are aborted.
///
/// Matching is exact on the hostname (no subdomain or wildcard matching). Entries are
/// lowercased on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainBlocklist {
    hosts: HashSet<String>,
}

impl DomainBlocklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, host: impl AsRef<str>) {
        let host = host.as_ref().trim();
        if !host.is_empty() {
            self.hosts.insert(host.to_lowercase());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether requests to `host` must be aborted.
    pub fn blocks(&self, host: &str) -> bool {
        !self.hosts.is_empty() && self.hosts.contains(&host.to_lowercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for DomainBlocklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut blocklist = Self::new();
        for host in iter {
            blocklist.insert(host);
        }
        blocklist
    }
}
