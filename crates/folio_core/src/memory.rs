//! In-memory document
//!
//! A small element tree implementing [`ViewBinding`] without a browser. Each
//! element carries a tag, attributes, classes, text, inline styles, and a
//! document-relative vertical extent. Scrolling is a plain offset, and smooth
//! scroll requests are applied immediately and recorded for inspection.
//!
//! # Example
//!
//! ```rust
//! use folio_core::memory::{ElementSpec, MemoryDocument};
//! use folio_core::{Query, ViewBinding};
//!
//! let mut doc = MemoryDocument::new(800.0);
//! let header = doc.append(ElementSpec::new("header").id("header"));
//! doc.append_child(header, ElementSpec::new("a").class("nav__link").attr("href", "#about"));
//!
//! assert_eq!(doc.query_all(&Query::anchor_links()).len(), 1);
//! assert_eq!(doc.element_by_id("header"), Some(header));
//! ```

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::query::Query;
use crate::view::{Bounds, ScrollBehavior, ViewBinding};

new_key_type! {
    /// Handle to an element of a [`MemoryDocument`]
    pub struct NodeId;
}

/// Description of an element to insert
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: SmallVec<[String; 4]>,
    text: String,
    bounds: Bounds,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Document-relative extent
    pub fn bounds(mut self, top: f64, height: f64) -> Self {
        self.bounds = Bounds::new(top, height);
        self
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: SmallVec<[String; 4]>,
    text: String,
    styles: FxHashMap<String, String>,
    bounds: Bounds,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn matches(&self, query: &Query) -> bool {
        query.matches(
            &self.tag,
            self.classes.iter().map(String::as_str),
            |name| self.attr(name),
        )
    }
}

/// A programmatic scroll recorded by [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Element tree with a scrollable viewport
#[derive(Debug, Default)]
pub struct MemoryDocument {
    nodes: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    ids: FxHashMap<String, NodeId>,
    scroll_y: f64,
    viewport_height: f64,
    scroll_requests: Vec<ScrollRequest>,
}

impl MemoryDocument {
    /// Create an empty document with the given viewport height
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Default::default()
        }
    }

    /// Append a top-level element
    pub fn append(&mut self, spec: ElementSpec) -> NodeId {
        let id = self.insert(spec, None);
        self.roots.push(id);
        id
    }

    /// Append an element as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = self.insert(spec, Some(parent));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        id
    }

    fn insert(&mut self, spec: ElementSpec, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.insert(Node {
            tag: spec.tag,
            attrs: spec.attrs,
            classes: spec.classes,
            text: spec.text,
            styles: FxHashMap::default(),
            bounds: spec.bounds,
            parent,
            children: Vec::new(),
        });
        if let Some(element_id) = self.nodes[id].attr("id") {
            // getElementById semantics: the first element with an id wins
            self.ids.entry(element_id.to_string()).or_insert(id);
        }
        id
    }

    /// Move the viewport without going through [`ViewBinding::scroll_to`]
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Text content of an element
    pub fn text(&self, id: NodeId) -> &str {
        self.nodes.get(id).map(|n| n.text.as_str()).unwrap_or("")
    }

    /// Inline style value of an element
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    /// Classes currently set on an element
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.nodes
            .get(id)
            .map(|n| n.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Every scroll requested through the binding, oldest first
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    /// Bottom edge of the lowest element
    pub fn document_height(&self) -> f64 {
        self.nodes
            .values()
            .map(|n| n.bounds.bottom())
            .fold(0.0, f64::max)
    }

    fn preorder(&self, from: &[NodeId], out: &mut Vec<NodeId>) {
        for &id in from {
            out.push(id);
            if let Some(node) = self.nodes.get(id) {
                self.preorder(&node.children, out);
            }
        }
    }

    fn collect(&self, from: &[NodeId], query: &Query) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.preorder(from, &mut order);
        order
            .into_iter()
            .filter(|&id| self.nodes[id].matches(query))
            .collect()
    }
}

impl ViewBinding for MemoryDocument {
    type Handle = NodeId;

    fn query_all(&self, query: &Query) -> Vec<NodeId> {
        self.collect(&self.roots, query)
    }

    fn query_within(&self, root: &NodeId, query: &Query) -> Vec<NodeId> {
        match self.nodes.get(*root) {
            Some(node) => self.collect(&node.children, query),
            None => Vec::new(),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes
            .get(*element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(*element)
            .and_then(|n| n.attr(name))
            .map(str::to_string)
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            node.text.clear();
            node.text.push_str(text);
        }
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(*element) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounding_rect(&self, element: &NodeId) -> Option<Bounds> {
        self.nodes
            .get(*element)
            .map(|n| n.bounds.translate(-self.scroll_y))
    }

    fn offset_rect(&self, element: &NodeId) -> Option<Bounds> {
        self.nodes.get(*element).map(|n| n.bounds)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
        let max = (self.document_height() - self.viewport_height).max(0.0);
        self.scroll_y = top.clamp(0.0, max);
    }
}
