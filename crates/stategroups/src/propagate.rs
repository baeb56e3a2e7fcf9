//! Propagation Engine
//!
//! Busy/idle signals are reference counted per node. Only 0 <-> 1
//! transitions change what is visible: group status attributes for group
//! anchors, configured classes and attributes for elements. Groups forward
//! every signal to the child groups that inherit from them.
//!
//! Signals are delivered by direct calls to an explicit target list; nothing
//! bubbles to ancestors.

use stategroups_dom::{Document, NodeId};

use crate::registry::Uid;
use crate::{ElementConfig, Engine, Result, Role, attrs};

/// Busy signal sender: `None` for programmatic requests, otherwise the
/// sender's trigger id (which may itself be unset)
type Sender<'a> = Option<Option<&'a str>>;

impl Engine {
    /// Send a busy signal to every node of `group_id`. `sender` is the
    /// trigger element the request originates from, if any.
    pub fn request_group_busy(
        &mut self,
        doc: &mut Document,
        sender: Option<NodeId>,
        group_id: &str,
    ) -> Result<()> {
        let sender_id = sender.map(|node| self.options_of(doc, node).and_then(|o| o.id));
        let sender = sender_id.as_ref().map(|id| id.as_deref());

        self.within_cascade(group_id, |engine| {
            for uid in engine.registry.signal_targets(doc, group_id) {
                engine.on_busy(doc, &uid, sender)?;
            }
            Ok(())
        })
    }

    /// Send an idle signal to every node of `group_id`
    pub fn request_group_idle(&mut self, doc: &mut Document, group_id: &str) -> Result<()> {
        self.within_cascade(group_id, |engine| {
            for uid in engine.registry.signal_targets(doc, group_id) {
                engine.on_idle(doc, &uid)?;
            }
            Ok(())
        })
    }

    /// Run `deliver` with `group_id` on the cascade path. A group already on
    /// the path is not entered again.
    fn within_cascade(
        &mut self,
        group_id: &str,
        deliver: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        if self.cascade_path.iter().any(|g| g == group_id) {
            tracing::warn!(
                "Group {} inherits from itself via {:?}; signal dropped",
                group_id,
                self.cascade_path
            );
            return Ok(());
        }
        if self.cascade_path.len() >= self.config.max_cascade_depth {
            tracing::warn!("Cascade depth limit reached at group {}", group_id);
            return Ok(());
        }

        self.cascade_path.push(group_id.to_string());
        let result = deliver(self);
        self.cascade_path.pop();
        result
    }

    /// Busy signal handler of one node
    pub(crate) fn on_busy(&mut self, doc: &mut Document, uid: &Uid, sender: Sender<'_>) -> Result<()> {
        let Some(entry) = self.registry.get(uid.as_str()) else {
            return Ok(());
        };
        tracing::trace!("busy -> {} ({})", entry.node, uid);
        let role = entry.role;
        match role {
            Role::Group => self.on_group_busy(doc, uid),
            Role::Element => self.on_element_busy(doc, uid, sender),
        }
    }

    /// Idle signal handler of one node
    pub(crate) fn on_idle(&mut self, doc: &mut Document, uid: &Uid) -> Result<()> {
        let Some(entry) = self.registry.get(uid.as_str()) else {
            return Ok(());
        };
        tracing::trace!("idle -> {} ({})", entry.node, uid);
        let role = entry.role;
        match role {
            Role::Group => self.on_group_idle(doc, uid),
            Role::Element => self.on_element_idle(doc, uid),
        }
    }

    fn on_group_busy(&mut self, doc: &mut Document, uid: &Uid) -> Result<()> {
        let Some(entry) = self.registry.get_mut(uid.as_str()) else {
            return Ok(());
        };
        let was_idle = entry.ref_count == 0;
        entry.ref_count += 1;
        let (node, group_id) = (entry.node, entry.group_id.clone());

        if was_idle {
            self.set_group_status(doc, &group_id, true)?;
        }
        for child in self.inheriting_children(doc, node, &group_id) {
            self.request_group_busy(doc, None, &child)?;
        }
        Ok(())
    }

    fn on_group_idle(&mut self, doc: &mut Document, uid: &Uid) -> Result<()> {
        let Some(entry) = self.registry.get_mut(uid.as_str()) else {
            return Ok(());
        };
        if entry.ref_count == 0 {
            return Ok(());
        }
        entry.ref_count -= 1;
        let now_idle = entry.ref_count == 0;
        let (node, group_id) = (entry.node, entry.group_id.clone());

        if now_idle {
            self.set_group_status(doc, &group_id, false)?;
        }
        for child in self.inheriting_children(doc, node, &group_id) {
            self.request_group_idle(doc, &child)?;
        }
        Ok(())
    }

    fn on_element_busy(&mut self, doc: &mut Document, uid: &Uid, sender: Sender<'_>) -> Result<()> {
        let Some(entry) = self.registry.get_mut(uid.as_str()) else {
            return Ok(());
        };
        if !entry.config.listens_to(sender) {
            tracing::trace!("Node {} ignores busy signal from {:?}", entry.node, sender);
            return Ok(());
        }

        entry.ref_count += 1;
        if entry.ref_count > 1 {
            return Ok(());
        }
        entry.busy = true;
        apply_presentation(doc, entry.node, &entry.config, true)
    }

    fn on_element_idle(&mut self, doc: &mut Document, uid: &Uid) -> Result<()> {
        let Some(entry) = self.registry.get_mut(uid.as_str()) else {
            return Ok(());
        };
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count > 0 {
            return Ok(());
        }
        entry.busy = false;
        apply_presentation(doc, entry.node, &entry.config, false)
    }

    /// Write the aggregate status onto every anchor of `group_id`
    fn set_group_status(&mut self, doc: &mut Document, group_id: &str, busy: bool) -> Result<()> {
        let anchors: Vec<Uid> = self
            .registry
            .by_role(doc, Role::Group, group_id)
            .into_iter()
            .map(|n| n.uid.clone())
            .collect();

        for uid in anchors {
            if let Some(anchor) = self.registry.get_mut(uid.as_str()) {
                anchor.busy = busy;
                doc.tree_mut()
                    .set_attribute(anchor.node, attrs::GROUP_STATUS, attrs::bool_value(busy))?;
            }
        }
        Ok(())
    }

    /// Group ids to cascade into from anchor `node` of `group_id`: the
    /// nearest registered group below it plus every group naming `group_id`
    /// as explicit parent, restricted to those that inherit
    fn inheriting_children(&self, doc: &Document, node: NodeId, group_id: &str) -> Vec<String> {
        let mut children: Vec<NodeId> = doc
            .tree()
            .descendants(node)
            .find(|&d| {
                self.registry
                    .by_node(d)
                    .is_some_and(|n| n.is_group() && n.is_ready())
            })
            .into_iter()
            .collect();

        let mut adopted: Vec<NodeId> = self
            .registry
            .iter()
            .filter(|n| {
                n.is_group()
                    && n.is_ready()
                    && n.config.inherit_group_state_from_parent
                    && n.config.parent_group_id.as_deref() == Some(group_id)
                    && doc.contains(n.node)
            })
            .map(|n| n.node)
            .collect();
        adopted.sort();
        for child in adopted {
            if !children.contains(&child) {
                children.push(child);
            }
        }

        children
            .into_iter()
            .filter_map(|child| self.registry.by_node(child))
            .filter(|n| n.config.inherit_group_state_from_parent)
            .map(|n| n.group_id.clone())
            .collect()
    }
}

/// Switch an element between its busy and idle presentation
fn apply_presentation(
    doc: &mut Document,
    node: NodeId,
    config: &ElementConfig,
    busy: bool,
) -> Result<()> {
    let (on_classes, off_classes, on_attrs, off_attrs) = if busy {
        (
            &config.busy_css_classes,
            &config.idle_css_classes,
            &config.busy_dom_attributes,
            &config.idle_dom_attributes,
        )
    } else {
        (
            &config.idle_css_classes,
            &config.busy_css_classes,
            &config.idle_dom_attributes,
            &config.busy_dom_attributes,
        )
    };

    let tree = doc.tree_mut();
    for class in off_classes {
        tree.remove_class(node, class)?;
    }
    for class in on_classes {
        tree.add_class(node, class)?;
    }
    for attr in off_attrs {
        tree.remove_attribute(node, &attr.key)?;
    }
    for attr in on_attrs {
        tree.set_attribute(node, &attr.key, &attr.value)?;
    }
    Ok(())
}
