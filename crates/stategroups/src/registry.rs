//! Element Registry
//!
//! Node table keyed by unique id, with secondary indexes by DOM node and by
//! group id. The registry is the source of truth; DOM attributes are written
//! from it.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use stategroups_dom::{Document, NodeId};

use crate::{ElementConfig, Role};

/// Process-unique id of a set-up node (`data-state-uid`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(String);

impl Uid {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Uid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Setup state of a node (`data-state-ready`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Fully set up; receives signals
    Ready,
    /// Element whose explicit group is not registered yet
    WaitingForGroup,
}

impl Readiness {
    pub fn as_str(self) -> &'static str {
        match self {
            Readiness::Ready => "true",
            Readiness::WaitingForGroup => "waitingforgroup",
        }
    }
}

/// One node that went through setup
#[derive(Debug, Clone)]
pub struct RegisteredNode {
    pub uid: Uid,
    pub node: NodeId,
    pub role: Role,
    /// Group this node belongs to, or is
    pub group_id: String,
    pub ready: Readiness,
    /// Outstanding busy reasons
    pub ref_count: u32,
    /// Groups: aggregate status. Elements: busy presentation applied.
    pub busy: bool,
    pub config: ElementConfig,
}

impl RegisteredNode {
    pub fn is_group(&self) -> bool {
        self.role == Role::Group
    }

    pub fn is_ready(&self) -> bool {
        self.ready == Readiness::Ready
    }
}

/// Node table plus indexes
#[derive(Debug, Default)]
pub struct Registry {
    nodes: HashMap<Uid, RegisteredNode>,
    by_node: HashMap<NodeId, Uid>,
    /// Members per group id, in registration order
    by_group: HashMap<String, Vec<Uid>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn insert(&mut self, entry: RegisteredNode) {
        if let Some(previous) = self.by_node.get(&entry.node).cloned() {
            self.remove(previous.as_str());
        }
        self.by_node.insert(entry.node, entry.uid.clone());
        self.by_group
            .entry(entry.group_id.clone())
            .or_default()
            .push(entry.uid.clone());
        self.nodes.insert(entry.uid.clone(), entry);
    }

    pub(crate) fn remove(&mut self, uid: &str) -> Option<RegisteredNode> {
        let entry = self.nodes.remove(uid)?;
        if self.by_node.get(&entry.node).is_some_and(|u| u.as_str() == uid) {
            self.by_node.remove(&entry.node);
        }
        if let Some(members) = self.by_group.get_mut(&entry.group_id) {
            members.retain(|u| u.as_str() != uid);
            if members.is_empty() {
                self.by_group.remove(&entry.group_id);
            }
        }
        Some(entry)
    }

    /// Lookup by unique id
    pub fn get(&self, uid: &str) -> Option<&RegisteredNode> {
        self.nodes.get(uid)
    }

    pub(crate) fn get_mut(&mut self, uid: &str) -> Option<&mut RegisteredNode> {
        self.nodes.get_mut(uid)
    }

    /// Lookup by DOM node
    pub fn by_node(&self, node: NodeId) -> Option<&RegisteredNode> {
        self.by_node.get(&node).and_then(|uid| self.nodes.get(uid))
    }

    /// All members (ready or waiting) of `group_id`, in registration order
    pub fn by_group<'a>(
        &'a self,
        group_id: &str,
    ) -> impl Iterator<Item = &'a RegisteredNode> + use<'a> {
        self.by_group
            .get(group_id)
            .into_iter()
            .flatten()
            .filter_map(|uid| self.nodes.get(uid))
    }

    /// Ready members of `group_id` with the given role that are in the document
    pub fn by_role(&self, doc: &Document, role: Role, group_id: &str) -> Vec<&RegisteredNode> {
        self.by_group(group_id)
            .filter(|n| n.role == role && n.is_ready() && doc.contains(n.node))
            .collect()
    }

    /// First live anchor of group `group_id`
    pub fn group_anchor(&self, doc: &Document, group_id: &str) -> Option<&RegisteredNode> {
        self.by_group(group_id)
            .find(|n| n.is_group() && n.is_ready() && doc.contains(n.node))
    }

    /// Ready, live nodes a signal for `group_id` is delivered to
    pub(crate) fn signal_targets(&self, doc: &Document, group_id: &str) -> Vec<Uid> {
        self.by_group(group_id)
            .filter(|n| n.is_ready() && doc.contains(n.node))
            .map(|n| n.uid.clone())
            .collect()
    }

    /// Elements deferred until `group_id` registers
    pub(crate) fn waiting_for(&self, group_id: &str) -> Vec<(Uid, NodeId)> {
        self.by_group(group_id)
            .filter(|n| n.ready == Readiness::WaitingForGroup)
            .map(|n| (n.uid.clone(), n.node))
            .collect()
    }

    /// Every deferred element with the group it waits for
    pub fn waiting(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes
            .values()
            .filter(|n| n.ready == Readiness::WaitingForGroup)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes.values()
    }

    /// Keep only entries for which `keep` holds, returning how many went
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&RegisteredNode) -> bool) -> usize {
        let stale: Vec<Uid> = self
            .nodes
            .values()
            .filter(|n| !keep(n))
            .map(|n| n.uid.clone())
            .collect();
        for uid in &stale {
            self.remove(uid.as_str());
        }
        stale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(uid: &str, node: NodeId, role: Role, group: &str) -> RegisteredNode {
        RegisteredNode {
            uid: Uid::new(uid.to_string()),
            node,
            role,
            group_id: group.to_string(),
            ready: Readiness::Ready,
            ref_count: 0,
            busy: false,
            config: ElementConfig::default(),
        }
    }

    #[test]
    fn test_indexes_follow_insert_and_remove() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = doc.tree_mut().create_element("div");
        let b = doc.tree_mut().create_element("span");
        doc.tree_mut().append_child(body, a).unwrap();
        doc.tree_mut().append_child(a, b).unwrap();

        let mut registry = Registry::new();
        registry.insert(entry("u1", a, Role::Group, "g"));
        registry.insert(entry("u2", b, Role::Element, "g"));

        assert_eq!(registry.by_node(b).map(|n| n.uid.as_str()), Some("u2"));
        assert_eq!(registry.group_anchor(&doc, "g").map(|n| n.node), Some(a));
        assert_eq!(registry.signal_targets(&doc, "g").len(), 2);

        registry.remove("u1");
        assert!(registry.group_anchor(&doc, "g").is_none());
        assert_eq!(registry.by_group("g").count(), 1);
    }

    #[test]
    fn test_reinserting_node_replaces_entry() {
        let mut registry = Registry::new();
        let node = NodeId::ROOT;
        registry.insert(entry("old", node, Role::Element, "g"));
        registry.insert(entry("new", node, Role::Element, "h"));

        assert!(registry.get("old").is_none());
        assert_eq!(registry.by_group("g").count(), 0);
        assert_eq!(registry.len(), 1);
    }
}
