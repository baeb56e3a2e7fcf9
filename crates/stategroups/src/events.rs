//! Trigger events
//!
//! DOM events fired by the host are delivered from the target up through its
//! ancestors. Every registered trigger on that path that listens for the
//! event requests its group go busy. There is no built-in toggle back to
//! idle; idleness comes from the group's own lifecycle.

use stategroups_dom::{Document, NodeId};

use crate::{Engine, Result};

impl Engine {
    /// Fire DOM event `event` at `target`. Returns the number of triggers
    /// that requested busy.
    pub fn dispatch_event(&mut self, doc: &mut Document, target: NodeId, event: &str) -> Result<usize> {
        if !doc.contains(target) {
            return Ok(0);
        }

        let path = std::iter::once(target).chain(doc.tree().ancestors(target));
        let triggers: Vec<(NodeId, String)> = path
            .filter_map(|node| self.registry.by_node(node))
            .filter(|n| !n.is_group() && n.is_ready() && n.config.triggers_on(event))
            .map(|n| (n.node, n.group_id.clone()))
            .collect();

        for (trigger, group_id) in &triggers {
            tracing::debug!("Trigger {} fired on {}, group {} busy", trigger, event, group_id);
            self.request_group_busy(doc, Some(*trigger), group_id)?;
        }
        Ok(triggers.len())
    }
}
