//! Case-insensitive set of app ids eligible for rewriting.

use std::{collections::HashSet, sync::RwLock};

/// Hosts the rewriter is allowed to redirect to the sidecar.
///
/// An empty list permits every host. Comparison ignores ASCII case, so
/// `"Bank"` and `"bank"` are the same entry. The list may be changed while
/// requests are in flight; each request sees one consistent snapshot.
#[derive(Debug, Default)]
pub struct AllowList {
    hosts: RwLock<HashSet<String>>,
}

impl AllowList {
    /// Create an empty list (every host permitted).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host. Returns `true` if it was not already present.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn insert(&self, host: impl AsRef<str>) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.hosts
            .write()
            .expect("allow list write lock poisoned")
            .insert(normalize(host.as_ref()))
    }

    /// Remove a host. Returns `true` if it was present.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn remove(&self, host: impl AsRef<str>) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.hosts
            .write()
            .expect("allow list write lock poisoned")
            .remove(&normalize(host.as_ref()))
    }

    /// Remove every host, returning the list to permit-all.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn clear(&self) {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.hosts.write().expect("allow list write lock poisoned").clear();
    }

    /// Return `true` if `host` is an explicit member.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.hosts
            .read()
            .expect("allow list read lock poisoned")
            .contains(&normalize(host))
    }

    /// Number of explicit members.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.hosts.read().expect("allow list read lock poisoned").len()
    }

    /// Return `true` if the list has no members.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return `true` if requests addressed to `host` may be rewritten:
    /// the list is empty or contains `host`.
    ///
    /// Emptiness and membership are checked under one read lock.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn permits(&self, host: &str) -> bool {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let hosts = self.hosts.read().expect("allow list read lock poisoned");
        hosts.is_empty() || hosts.contains(&normalize(host))
    }
}

impl<S: AsRef<str>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let hosts = iter.into_iter().map(|h| normalize(h.as_ref())).collect();
        Self { hosts: RwLock::new(hosts) }
    }
}

fn normalize(host: &str) -> String {
    host.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_permits_every_host() {
        let list = AllowList::new();
        assert!(list.is_empty());
        assert!(list.permits("bank"), "empty list must permit all hosts");
        assert!(list.permits("anything.else"));
    }

    #[test]
    fn non_empty_list_permits_members_only() {
        let list = AllowList::new();
        assert!(list.insert("bank"));
        assert!(list.permits("bank"));
        assert!(!list.permits("shop"), "non-member must not be permitted");
    }

    #[test]
    fn membership_ignores_case() {
        let list = AllowList::new();
        list.insert("Bank");
        assert!(list.contains("bank"));
        assert!(list.permits("BANK"));
        assert!(!list.insert("bAnK"), "same host in other case must not be re-added");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_and_clear_restore_permit_all() {
        let list: AllowList = ["bank", "shop"].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(list.remove("SHOP"));
        assert!(!list.remove("shop"), "second remove must report absence");
        assert!(!list.permits("shop"));
        list.clear();
        assert!(list.permits("shop"), "cleared list must permit all hosts");
    }
}
