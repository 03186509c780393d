use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, ParseOpts, QualName, ns, parse_document};

use crate::error::{Error, Result};
use crate::style::{Style, Tag};
use crate::tree_sink::DocumentSink;

/// Attribute that marks a spacer in serialized output.
pub const SPACER_ATTR: &str = "data-spacer";

/// Index of a node in its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: attr_name(name),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    /// Attributes other than `style`.
    pub attrs: Vec<Attribute>,
    pub style: Style,
    /// Vertical-rhythm marker inserted by the spacer pass.
    pub spacer: bool,
    /// Styled inline run wrapping a block's text.
    pub run: bool,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            style: Style::default(),
            spacer: false,
            run: false,
        }
    }

    pub fn with_style(tag: Tag, css: &str) -> Self {
        Self {
            style: Style::parse(css),
            ..Self::new(tag)
        }
    }

    /// Build from parsed markup, lifting `style` into the declaration block
    /// and recognizing markers left by an earlier run.
    pub(crate) fn from_parsed(name: &QualName, attrs: Vec<Attribute>) -> Self {
        let mut element = Self::new(Tag::from_local(&name.local));
        for attr in attrs {
            element.add_attr_if_missing(attr);
        }
        element
    }

    pub(crate) fn add_attr_if_missing(&mut self, attr: Attribute) {
        let local = attr.name.local.as_ref();
        if local == "style" {
            if self.style.is_empty() {
                self.style = Style::parse(&attr.value);
                self.run = self.tag == Tag::Span && !self.style.is_empty();
            }
            return;
        }
        if self.attr(local).is_some() {
            return;
        }
        if local == SPACER_ATTR && attr.value == "true" {
            self.spacer = true;
        }
        self.attrs.push(attr);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.local.as_ref() == name)
            .map(|a| a.value.as_str())
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self
            .attrs
            .iter()
            .position(|a| a.name.local.as_ref() == name)?;
        Some(self.attrs.remove(pos).value)
    }

    pub fn qual_name(&self) -> QualName {
        QualName::new(None, ns!(html), self.tag.local_name())
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A mutable HTML tree rooted at the fragment container.
///
/// Nodes live in one vector and refer to each other by [`NodeId`]. The
/// markers the passes guard on (spacers, wrapper runs) are plain fields on
/// [`Element`].
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty tree whose root is a bare document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            root: NodeId(0),
        }
    }

    /// Parse an HTML fragment. The returned root is the fragment's container;
    /// its children are the top-level block flow.
    pub fn parse(html: &str) -> Self {
        let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
        let sink = parse_document(DocumentSink::default(), ParseOpts::default())
            .from_utf8()
            .one(wrapped.as_bytes());
        let mut doc = sink.into_document();
        if let Some(body) = doc.find_by_tag(doc.root, "body") {
            doc.root = body;
        }
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn document_node(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.get(id).data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.get_mut(id).data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).map(|e| &e.tag)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id).data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Ancestors from the parent upward.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }

    /// Whether any element above `id` satisfies `pred`.
    pub fn has_ancestor(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> bool {
        self.ancestors(id)
            .any(|a| self.element(a).is_some_and(&pred))
    }

    /// All nodes below `id` in document order, captured up front so callers
    /// can mutate the tree while iterating.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Elements below `id` in document order.
    pub fn elements(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.element(n).is_some())
            .collect()
    }

    pub fn find_by_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(id)
            .into_iter()
            .find(|&n| self.tag(n).is_some_and(|t| t.as_str() == tag))
    }

    /// Concatenated text of every text node below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.alloc(NodeData::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    pub(crate) fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Comment(text.into()))
    }

    /// Unlink `id` from its parent. The node stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.get_mut(id).parent.take() {
            self.get_mut(parent).children.retain(|&c| c != id);
        }
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    /// Append text, merging into a trailing text node when there is one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(&last) = self.children(parent).last()
            && let NodeData::Text(existing) = &mut self.get_mut(last).data
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text);
        self.append(parent, node);
    }

    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) {
        let Some(parent) = self.parent(sibling) else {
            return;
        };
        self.detach(node);
        let pos = self
            .children(parent)
            .iter()
            .position(|&c| c == sibling)
            .unwrap_or(0);
        self.get_mut(node).parent = Some(parent);
        self.get_mut(parent).children.insert(pos, node);
    }

    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        let Some(parent) = self.parent(anchor) else {
            return;
        };
        self.detach(node);
        let siblings = self.children(parent);
        let pos = siblings
            .iter()
            .position(|&c| c == anchor)
            .map_or(siblings.len(), |p| p + 1);
        self.get_mut(node).parent = Some(parent);
        self.get_mut(parent).children.insert(pos, node);
    }

    /// Unlink and return every child of `id`.
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.get_mut(id).children);
        for &child in &children {
            self.get_mut(child).parent = None;
        }
        children
    }

    /// Move all children of `parent` into `wrapper`, which becomes the only child.
    pub fn wrap_children(&mut self, parent: NodeId, wrapper: NodeId) {
        for child in self.take_children(parent) {
            self.append(wrapper, child);
        }
        self.append(parent, wrapper);
    }

    /// Serialize the root's children.
    pub fn to_html(&self) -> Result<String> {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        let node = SerializableNode {
            doc: self,
            id: self.root,
        };
        serialize(&mut bytes, &node, opts).map_err(Error::Serialize)?;
        Ok(String::from_utf8(bytes)?)
    }
}

pub(crate) fn attr_name(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

struct SerializableNode<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(self.doc, self.id, serializer),
            TraversalScope::ChildrenOnly(_) => write_children(self.doc, self.id, serializer),
        }
    }
}

fn write_children<S: Serializer>(doc: &Document, id: NodeId, serializer: &mut S) -> io::Result<()> {
    for &child in doc.children(id) {
        write_node(doc, child, serializer)?;
    }
    Ok(())
}

fn write_node<S: Serializer>(doc: &Document, id: NodeId, serializer: &mut S) -> io::Result<()> {
    match &doc.get(id).data {
        NodeData::Document => write_children(doc, id, serializer),
        NodeData::Element(element) => {
            let name = element.qual_name();
            let style_name = attr_name("style");
            let css = element.style.to_string();
            let style = (!css.is_empty()).then_some((&style_name, css.as_str()));
            let attrs = element
                .attrs
                .iter()
                .map(|a| (&a.name, a.value.as_str()))
                .chain(style);

            serializer.start_elem(name.clone(), attrs)?;
            write_children(doc, id, serializer)?;
            serializer.end_elem(name)
        }
        NodeData::Text(text) => serializer.write_text(text),
        NodeData::Comment(text) => serializer.write_comment(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fragment_under_root() {
        let doc = Document::parse("<h1>Hi</h1><p>Body</p>");
        let tags: Vec<_> = doc
            .children(doc.root())
            .iter()
            .filter_map(|&c| doc.tag(c).cloned())
            .collect();
        assert_eq!(tags, vec![Tag::H1, Tag::P]);
        assert_eq!(doc.text_content(doc.root()), "HiBody");
    }

    #[test]
    fn style_attribute_becomes_declarations() {
        let doc = Document::parse(r#"<div style="color:red;margin:0">x</div>"#);
        let div = doc.find_by_tag(doc.root(), "div").unwrap();
        let element = doc.element(div).unwrap();
        assert_eq!(element.style.get("color"), Some("red"));
        assert!(element.attr("style").is_none());
    }

    #[test]
    fn recognizes_markers_from_serialized_output() {
        let doc = Document::parse(
            r#"<div data-spacer="true" style="height: 24px;">&nbsp;</div><div><span style="font-size: 19px;">a</span></div>"#,
        );
        let top = doc.children(doc.root()).to_vec();
        assert!(doc.element(top[0]).unwrap().spacer);
        let span = doc.find_by_tag(top[1], "span").unwrap();
        assert!(doc.element(span).unwrap().run);
    }

    #[test]
    fn round_trips_through_serializer() {
        let html = r#"<div data-spacer="true" style="display: block;">&nbsp;</div><p>a &amp; b<br></p>"#;
        assert_eq!(Document::parse(html).to_html().unwrap(), html);
    }

    #[test]
    fn insert_after_and_next_sibling() {
        let mut doc = Document::parse("<p>a</p><p>b</p>");
        let first = doc.children(doc.root())[0];
        let marker = doc.create_element(Element::new(Tag::Div));
        doc.insert_after(first, marker);
        assert_eq!(doc.next_sibling(first), Some(marker));
        assert_eq!(doc.children(doc.root()).len(), 3);
        assert_eq!(
            doc.to_html().unwrap(),
            "<p>a</p><div></div><p>b</p>"
        );
    }

    #[test]
    fn wrap_children_moves_everything() {
        let mut doc = Document::parse("<li>a <em>b</em></li>");
        let li = doc.find_by_tag(doc.root(), "li").unwrap();
        let span = doc.create_element(Element::new(Tag::Span));
        doc.wrap_children(li, span);
        assert_eq!(doc.children(li), &[span]);
        assert_eq!(doc.to_html().unwrap(), "<li><span>a <em>b</em></span></li>");
    }

    #[test]
    fn ancestors_walk_upward() {
        let doc = Document::parse("<blockquote><ul><li>x</li></ul></blockquote>");
        let li = doc.find_by_tag(doc.root(), "li").unwrap();
        assert!(doc.has_ancestor(li, |e| e.tag == Tag::Blockquote));
        assert!(!doc.has_ancestor(li, |e| e.tag == Tag::Pre));
    }
}
