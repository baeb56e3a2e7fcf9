//! Host bridge
//!
//! What host components call after rendering, and when they want a group
//! busy or idle outside of DOM trigger events.

use stategroups_dom::{Document, NodeId};
use stategroups_html::HtmlParser;

use crate::{Engine, EngineConfig, Result, ScanReport};

/// Entry points a host UI layer uses
pub trait StateGroupsService {
    /// Set up every not yet set up element in the document
    fn setup_elements(&mut self) -> Result<ScanReport>;

    /// Set up `root` and every not yet set up element below it
    fn setup_elements_in(&mut self, root: NodeId) -> Result<ScanReport>;

    /// Put group `group_id` into busy state
    fn set_busy(&mut self, group_id: &str, sender: Option<NodeId>) -> Result<()>;

    /// Release one busy reason of group `group_id`
    fn set_idle(&mut self, group_id: &str) -> Result<()>;
}

/// A document together with the engine tracking its state groups
pub struct StatePage {
    document: Document,
    engine: Engine,
}

impl StatePage {
    /// Wrap an existing document
    pub fn new(document: Document, config: EngineConfig) -> Self {
        Self {
            document,
            engine: Engine::new(config),
        }
    }

    /// Parse host markup into a page
    pub fn from_html(html: &str, config: EngineConfig) -> Result<Self> {
        let document = HtmlParser::new().parse(html)?;
        Ok(Self::new(document, config))
    }

    /// Fire a DOM event at `target`
    pub fn dispatch_event(&mut self, target: NodeId, event: &str) -> Result<usize> {
        self.engine.dispatch_event(&mut self.document, target, event)
    }

    /// Purge state of removed elements
    pub fn sweep(&mut self) -> usize {
        self.engine.sweep(&self.document)
    }

    /// Detach `node` from the document. Its state is dropped on the next sweep.
    pub fn remove(&mut self, node: NodeId) {
        self.document.tree_mut().detach(node);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access, e.g. for the host to insert new markup
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Serialized body markup
    pub fn body_html(&self) -> String {
        stategroups_dom::to_html(self.document.tree(), self.document.body())
    }
}

impl StateGroupsService for StatePage {
    fn setup_elements(&mut self) -> Result<ScanReport> {
        self.engine.setup_all_elements(&mut self.document).into_result()
    }

    fn setup_elements_in(&mut self, root: NodeId) -> Result<ScanReport> {
        self.engine
            .setup_elements_in(&mut self.document, root)
            .into_result()
    }

    fn set_busy(&mut self, group_id: &str, sender: Option<NodeId>) -> Result<()> {
        self.engine
            .request_group_busy(&mut self.document, sender, group_id)
    }

    fn set_idle(&mut self, group_id: &str) -> Result<()> {
        self.engine.request_group_idle(&mut self.document, group_id)
    }
}
