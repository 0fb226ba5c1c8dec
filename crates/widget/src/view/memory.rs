//! In-memory view tree.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use tracing::{debug, warn};

use super::{EventSender, NodeId, Region, ViewEvent, ViewTree};

const REGIONS: [(Region, &str); 4] = [
    (Region::Products, "section"),
    (Region::CartLines, "ol"),
    (Region::Total, "span"),
    (Region::EmptyCart, "button"),
];

#[derive(Debug)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    binding: Option<ViewEvent>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            binding: None,
        }
    }
}

/// A view tree held entirely in memory.
///
/// Used by tests and by the command-line front end. [`MemoryView::click`]
/// plays the part of a user activating a node.
#[derive(Debug)]
pub struct MemoryView {
    nodes: HashMap<NodeId, Node>,
    regions: HashMap<Region, NodeId>,
    root: NodeId,
    next_id: u64,
    events: EventSender,
}

impl MemoryView {
    /// Create a page with the widget's fixed regions; activations are sent on `events`.
    #[must_use]
    pub fn new(events: EventSender) -> Self {
        let mut view = Self {
            nodes: HashMap::new(),
            regions: HashMap::new(),
            root: NodeId::new(0),
            next_id: 0,
            events,
        };

        view.root = view.create_element("body");
        for (region, tag) in REGIONS {
            let node = view.create_element(tag);
            view.set_attribute(node, "class", region.class());
            view.append_child(view.root, node);
            view.regions.insert(region, node);
        }

        let empty_cart = view.region(Region::EmptyCart);
        view.set_text(empty_cart, "Empty cart");
        view.bind(empty_cart, ViewEvent::EmptyCart);

        view
    }

    /// Activate `node`, sending its bound event. Returns whether an event was sent.
    pub fn click(&self, node: NodeId) -> bool {
        let Some(event) = self.nodes.get(&node).and_then(|n| n.binding.clone()) else {
            return false;
        };

        debug!(?event, node = node.as_u64(), "view event");
        if self.events.send(event).is_err() {
            warn!("view event dropped: coordinator is gone");
            return false;
        }
        true
    }

    /// Every attached node whose `class` attribute contains `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_by_class(self.root, class, &mut found);
        found
    }

    fn collect_by_class(&self, node: NodeId, class: &str, found: &mut Vec<NodeId>) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        if n
            .attributes
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
        {
            found.push(node);
        }
        for child in &n.children {
            self.collect_by_class(*child, class, found);
        }
    }

    /// Number of live nodes, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Indented outline of the attached tree, one node per line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };

        let _ = write!(out, "{:indent$}<{}", "", n.tag, indent = depth * 2);
        for (name, value) in &n.attributes {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        out.push('>');
        if let Some(text) = &n.text {
            let _ = write!(out, " {text}");
        }
        out.push('\n');

        for child in &n.children {
            self.render_node(*child, depth + 1, out);
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.remove(&node) {
            for child in n.children {
                self.drop_subtree(child);
            }
        }
    }
}

impl ViewTree for MemoryView {
    fn region(&self, region: Region) -> NodeId {
        self.regions.get(&region).copied().unwrap_or(self.root)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(tag));
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.text = Some(text.to_string());
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.text.as_deref())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }

        // Re-appending moves the node, as in the DOM.
        let old_parent = self.nodes.get(&child).and_then(|n| n.parent);
        if let Some(old) = old_parent.and_then(|p| self.nodes.get_mut(&p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(n) = self.nodes.get_mut(&child) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.root || self.regions.values().any(|r| *r == node) {
            return;
        }

        let parent = self.nodes.get(&node).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != node);
        }
        self.drop_subtree(node);
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn bind(&mut self, node: NodeId, event: ViewEvent) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.binding = Some(event);
        }
    }
}
