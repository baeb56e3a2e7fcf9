//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree was filled by a parser
    pub fn finalize(&mut self) {
        self.html_element = self.first_by_tag(self.tree.root(), "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self.first_by_tag(self.html_element, "head").unwrap_or(NodeId::NONE);
            self.body_element = self.first_by_tag(self.html_element, "body").unwrap_or(NodeId::NONE);
        }
    }

    fn first_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.tree
            .descendants(root)
            .find(|&id| self.tree.element(id).is_some_and(|e| e.tag == tag))
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by its `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|&n| self.tree.get_attribute(n, "id") == Some(id))
    }

    /// Elements carrying attribute `name`, in document order.
    /// When `within` is given, the search is limited to its descendants.
    pub fn elements_with_attribute(&self, name: &str, within: Option<NodeId>) -> Vec<NodeId> {
        let root = within.unwrap_or(self.tree.root());
        self.tree
            .descendants(root)
            .filter(|&n| self.tree.element(n).is_some_and(|e| e.has_attr(name)))
            .collect()
    }

    /// Whether `id` is part of the live document
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.is_connected(id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("about:blank");
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
    }

    #[test]
    fn test_elements_with_attribute_in_order() {
        let mut doc = Document::default();
        let body = doc.body();
        let tree = doc.tree_mut();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        let plain = tree.create_element("p");
        tree.append_child(body, outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        tree.append_child(body, plain).unwrap();
        tree.set_attribute(outer, "data-x", "1").unwrap();
        tree.set_attribute(inner, "data-x", "2").unwrap();

        assert_eq!(doc.elements_with_attribute("data-x", None), vec![outer, inner]);
        assert_eq!(doc.elements_with_attribute("data-x", Some(outer)), vec![inner]);
    }
}
