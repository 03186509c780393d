use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, LocalName, QualName, ns};

use crate::dom::{Attribute, Document, Element, NodeId};

/// Handle used by the tree builder. Handles carry their element name so
/// `elem_name` can borrow it straight from the handle; other nodes get an
/// empty name.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    id: NodeId,
    name: QualName,
}

impl NodeHandle {
    fn node(id: NodeId) -> Self {
        Self {
            id,
            name: QualName::new(None, ns!(), LocalName::from("")),
        }
    }
}

/// Builds a [`Document`] while html5ever parses.
///
/// The trait hands out `&self`, so the tree sits behind a `RefCell`.
#[derive(Default)]
pub struct DocumentSink {
    doc: RefCell<Document>,
}

impl DocumentSink {
    pub fn into_document(self) -> Document {
        self.doc.into_inner()
    }
}

impl TreeSink for DocumentSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        tracing::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle::node(self.doc.borrow().document_node())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        &target.name
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();
        let element = Element::from_parsed(&name, attrs);
        let id = self.doc.borrow_mut().create_element(element);
        NodeHandle { id, name }
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle::node(self.doc.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle::node(self.doc.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => doc.append(parent.id, node.id),
            NodeOrText::AppendText(text) => doc.append_text(parent.id, &text),
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.doc.borrow().parent(element.id);
        match parent {
            Some(_) => self.append_before_sibling(element, child),
            None => self.append(prev_element, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.id,
            NodeOrText::AppendText(text) => doc.create_text(text.to_string()),
        };
        doc.insert_before(sibling.id, node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut doc = self.doc.borrow_mut();
        if let Some(element) = doc.element_mut(target.id) {
            for attr in attrs {
                element.add_attr_if_missing(Attribute {
                    name: attr.name,
                    value: attr.value.to_string(),
                });
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.doc.borrow_mut().detach(target.id);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut doc = self.doc.borrow_mut();
        for child in doc.take_children(node.id) {
            doc.append(new_parent.id, child);
        }
    }
}
