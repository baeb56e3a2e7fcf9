//! Group Resolution
//!
//! Finds the group an element belongs to: by explicit id anywhere in the
//! document, or by the nearest enclosing group. Groups that are configured
//! but not set up yet are set up on the spot.

use stategroups_dom::{Document, NodeId};

use crate::{ElementConfig, Engine, Error, Result, attrs};

/// Outcome of resolving an element's group
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Group found and registered
    Bound { group_id: String, group_node: NodeId },
    /// Explicit group not in the document yet
    Deferred { group_id: String },
}

impl Engine {
    /// Resolve the group of element `node` with options `config`
    pub(crate) fn resolve_group_for(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        config: &ElementConfig,
    ) -> Result<Resolution> {
        let group_node = match &config.group_id {
            Some(group_id) => match self.find_group_by_id(doc, group_id) {
                Some(found) => found,
                None => {
                    return Ok(Resolution::Deferred {
                        group_id: group_id.clone(),
                    });
                }
            },
            None => self
                .find_enclosing_group(doc, node)
                .ok_or(Error::NoEnclosingGroup { node })?,
        };

        if self.registry.by_node(group_node).is_none_or(|n| !n.is_ready()) {
            // A group has no group of its own to resolve, so this never
            // recurses more than one level.
            self.setup_element(doc, group_node)?;
        }

        let group_id = self
            .registry
            .by_node(group_node)
            .filter(|n| n.is_group() && n.is_ready())
            .map(|n| n.group_id.clone())
            .ok_or_else(|| Error::GroupNotRegistered {
                group_id: config.group_id.clone().unwrap_or_default(),
            })?;

        Ok(Resolution::Bound { group_id, group_node })
    }

    /// First group in the document, registered or merely configured, whose
    /// id is `group_id`. Registered anchors win.
    fn find_group_by_id(&self, doc: &Document, group_id: &str) -> Option<NodeId> {
        if let Some(anchor) = self.registry.group_anchor(doc, group_id) {
            return Some(anchor.node);
        }

        doc.elements_with_attribute(attrs::OPTIONS, None)
            .into_iter()
            .filter(|&n| self.registry.by_node(n).is_none())
            .find(|&n| {
                Self::parse_options(doc, n).ok().flatten().is_some_and(|o| {
                    o.is_group() && o.group_id.as_deref() == Some(group_id)
                })
            })
    }

    /// Nearest ancestor configured as a group
    fn find_enclosing_group(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        doc.tree().ancestors(node).find(|&ancestor| {
            match self.registry.by_node(ancestor) {
                Some(entry) if entry.is_ready() => entry.is_group(),
                _ => Self::parse_options(doc, ancestor)
                    .ok()
                    .flatten()
                    .is_some_and(|o| o.is_group()),
            }
        })
    }

    /// Nearest registered group above `node`
    pub(crate) fn registered_ancestor_group(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        doc.tree().ancestors(node).find(|&ancestor| {
            self.registry
                .by_node(ancestor)
                .is_some_and(|n| n.is_group() && n.is_ready())
        })
    }
}
