//! Scan/Setup Driver
//!
//! Turns configured DOM nodes into registered groups and elements.

use stategroups_dom::{Document, NodeId};

use crate::registry::Readiness;
use crate::resolve::Resolution;
use crate::{ElementConfig, Engine, Error, Result, attrs};

/// What `setup_element` did with a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Registered as group or element
    Initialized,
    /// Marked as waiting for its group
    Deferred,
    /// Already set up, or carries no options
    Skipped,
}

/// Result of a scan over many nodes
#[derive(Debug, Default)]
pub struct ScanReport {
    pub initialized: Vec<NodeId>,
    pub deferred: Vec<NodeId>,
    pub failures: Vec<(NodeId, Error)>,
}

impl ScanReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail when any element failed setup
    pub fn into_result(self) -> Result<ScanReport> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::Scan(self.failures))
        }
    }
}

impl Engine {
    /// Set up every configured element in the document, in document order
    pub fn setup_all_elements(&mut self, doc: &mut Document) -> ScanReport {
        let candidates = doc.elements_with_attribute(attrs::OPTIONS, None);
        self.setup_each(doc, candidates)
    }

    /// Set up `root` and every configured element below it
    pub fn setup_elements_in(&mut self, doc: &mut Document, root: NodeId) -> ScanReport {
        let mut candidates = vec![root];
        candidates.extend(doc.elements_with_attribute(attrs::OPTIONS, Some(root)));
        self.setup_each(doc, candidates)
    }

    fn setup_each(&mut self, doc: &mut Document, candidates: Vec<NodeId>) -> ScanReport {
        let mut report = ScanReport::default();
        for node in candidates {
            match self.setup_element(doc, node) {
                Ok(SetupOutcome::Initialized) => report.initialized.push(node),
                Ok(SetupOutcome::Deferred) => report.deferred.push(node),
                Ok(SetupOutcome::Skipped) => {}
                Err(err) => {
                    tracing::error!("State setup failed for node {}: {}", node, err);
                    report.failures.push((node, err));
                }
            }
        }
        tracing::info!(
            "State scan: {} initialized, {} deferred, {} failed",
            report.initialized.len(),
            report.deferred.len(),
            report.failures.len()
        );
        report
    }

    /// Set up one node. A no-op for nodes that are already set up or waiting.
    pub fn setup_element(&mut self, doc: &mut Document, node: NodeId) -> Result<SetupOutcome> {
        if self.registry.by_node(node).is_some() {
            return Ok(SetupOutcome::Skipped);
        }
        let Some(config) = Self::parse_options(doc, node)? else {
            return Ok(SetupOutcome::Skipped);
        };

        if config.is_group() {
            let group_id = match &config.group_id {
                Some(id) => id.clone(),
                None => self.generate_id(),
            };
            self.register_group(doc, node, config, &group_id)?;
            return Ok(SetupOutcome::Initialized);
        }

        match self.resolve_group_for(doc, node, &config)? {
            Resolution::Bound { group_id, group_node } => {
                tracing::trace!("Node {} resolved to group {} at {}", node, group_id, group_node);
                self.register_element(doc, node, config, &group_id)?;
                Ok(SetupOutcome::Initialized)
            }
            Resolution::Deferred { group_id } => {
                self.record(doc, node, config, &group_id, Readiness::WaitingForGroup)?;
                tracing::debug!("Node {} waits for group {}", node, group_id);
                Ok(SetupOutcome::Deferred)
            }
        }
    }

    /// Register an element of group `group_id` and bring it to the group's
    /// current state
    pub(crate) fn register_element(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        config: ElementConfig,
        group_id: &str,
    ) -> Result<()> {
        let Some(group_busy) = self.group_status(doc, group_id) else {
            return Err(Error::GroupNotRegistered {
                group_id: group_id.to_string(),
            });
        };

        let uid = self.record(doc, node, config, group_id, Readiness::Ready)?;
        tracing::debug!("Registered element {} ({}) in group {}", node, uid, group_id);

        if self.config.sweep_on_register {
            self.sweep(doc);
        }

        // The element may appear while its group is already busy
        if group_busy {
            self.on_busy(doc, &uid, None)
        } else {
            self.on_idle(doc, &uid)
        }
    }

    /// Register a group anchor, release elements waiting for it and, when
    /// inheriting, mirror the parent's status
    pub(crate) fn register_group(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        config: ElementConfig,
        group_id: &str,
    ) -> Result<()> {
        let inherit = config.inherit_group_state_from_parent;
        let parent_group_id = config.parent_group_id.clone();

        let uid = self.record(doc, node, config, group_id, Readiness::Ready)?;
        doc.tree_mut()
            .set_attribute(node, attrs::GROUP_STATUS, attrs::bool_value(false))?;
        tracing::debug!("Registered group {} ({}) as {}", node, uid, group_id);

        for (waiting_uid, waiting_node) in self.registry.waiting_for(group_id) {
            self.registry.remove(waiting_uid.as_str());
            doc.tree_mut().remove_attribute(waiting_node, attrs::READY)?;
            self.setup_element(doc, waiting_node)?;
        }

        if !inherit {
            return Ok(());
        }

        let parent_busy = match &parent_group_id {
            Some(parent_id) => {
                doc.tree_mut()
                    .set_attribute(node, attrs::PARENT_GROUP_ID, parent_id)?;
                self.group_status(doc, parent_id)
            }
            None => self
                .registered_ancestor_group(doc, node)
                .and_then(|parent| self.registry.by_node(parent))
                .map(|parent| parent.busy),
        };

        if parent_busy == Some(true) {
            self.request_group_busy(doc, None, group_id)
        } else {
            self.request_group_idle(doc, group_id)
        }
    }
}
