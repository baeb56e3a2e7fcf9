//! Memory Hygiene
//!
//! Entries whose node left the document, or whose node no longer carries the
//! entry's unique id, are dropped together with their reference count.

use stategroups_dom::Document;

use crate::{Engine, attrs};

impl Engine {
    /// Purge registry entries no longer present in `doc`. Returns how many
    /// entries were removed.
    pub fn sweep(&mut self, doc: &Document) -> usize {
        let removed = self.registry.retain(|entry| {
            doc.contains(entry.node)
                && doc.tree().get_attribute(entry.node, attrs::UID) == Some(entry.uid.as_str())
        });
        if removed > 0 {
            tracing::debug!("Swept {} stale state entries", removed);
        }
        removed
    }
}
