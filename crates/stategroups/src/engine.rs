//! Engine - owns the registry and drives every state operation

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stategroups_dom::{Document, NodeId};

use crate::registry::{Readiness, RegisteredNode, Registry, Uid};
use crate::{ElementConfig, EngineConfig, Error, Result, attrs};

/// State group engine
///
/// Every operation takes the document it works on. The engine itself holds
/// no DOM references beyond [`NodeId`]s.
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) registry: Registry,
    rng: StdRng,
    /// Group ids of the busy/idle requests currently being delivered
    pub(crate) cascade_path: Vec<String>,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        tracing::debug!("State group engine {} initialized", crate::VERSION);
        Self {
            config,
            registry: Registry::new(),
            rng,
            cascade_path: Vec::new(),
        }
    }

    /// Get engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered and waiting nodes
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registry entry of a DOM node
    pub fn node(&self, node: NodeId) -> Option<&RegisteredNode> {
        self.registry.by_node(node)
    }

    /// Reference count of a unique id
    pub fn ref_count(&self, uid: &str) -> Option<u32> {
        self.registry.get(uid).map(|n| n.ref_count)
    }

    /// Aggregate status of the first live anchor of `group_id`
    pub fn group_status(&self, doc: &Document, group_id: &str) -> Option<bool> {
        self.registry.group_anchor(doc, group_id).map(|n| n.busy)
    }

    /// Elements still waiting for their group, with the awaited group id
    pub fn waiting_elements(&self) -> Vec<(NodeId, &str)> {
        let mut waiting: Vec<_> = self
            .registry
            .waiting()
            .map(|n| (n.node, n.group_id.as_str()))
            .collect();
        waiting.sort();
        waiting
    }

    /// Random alphanumeric token used for unique ids and generated group ids
    pub(crate) fn generate_id(&mut self) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(self.config.uid_length)
            .map(char::from)
            .collect()
    }

    /// Options of `node`, if it carries any
    pub(crate) fn parse_options(doc: &Document, node: NodeId) -> Result<Option<ElementConfig>> {
        let Some(json) = doc.tree().get_attribute(node, attrs::OPTIONS) else {
            return Ok(None);
        };
        ElementConfig::from_json(json)
            .map(Some)
            .map_err(|source| Error::InvalidOptions { node, source })
    }

    /// Options of `node`, preferring the registered copy
    pub(crate) fn options_of(&self, doc: &Document, node: NodeId) -> Option<ElementConfig> {
        match self.registry.by_node(node) {
            Some(entry) => Some(entry.config.clone()),
            None => Self::parse_options(doc, node).ok().flatten(),
        }
    }

    /// Insert a registry entry and write its identity attributes
    pub(crate) fn record(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        config: ElementConfig,
        group_id: &str,
        ready: Readiness,
    ) -> Result<Uid> {
        let uid = Uid::new(self.generate_id());
        let role = if ready == Readiness::WaitingForGroup {
            crate::Role::Element
        } else {
            config.role
        };

        let tree = doc.tree_mut();
        tree.set_attribute(node, attrs::UID, uid.as_str())?;
        tree.set_attribute(node, attrs::READY, ready.as_str())?;
        tree.set_attribute(node, attrs::ROLE, role.as_str())?;
        tree.set_attribute(node, attrs::GROUP_ID, group_id)?;

        self.registry.insert(RegisteredNode {
            uid: uid.clone(),
            node,
            role,
            group_id: group_id.to_string(),
            ready,
            ref_count: 0,
            busy: false,
            config,
        });
        Ok(uid)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
