use crate::dom::{Document, Element, NodeData, NodeId};
use crate::style::{RUN_STYLE, Tag};

pub fn wrap(doc: &mut Document) {
    let mut wrapped = 0;

    for id in doc.elements(doc.root()) {
        if !is_eligible(doc, id) || starts_with_run(doc, id) {
            continue;
        }
        let run = doc.create_element(Element {
            run: true,
            ..Element::with_style(Tag::Span, RUN_STYLE)
        });
        doc.wrap_children(id, run);
        wrapped += 1;
    }

    tracing::debug!(wrapped, "wrapped text runs");
}

fn is_eligible(doc: &Document, id: NodeId) -> bool {
    let Some(element) = doc.element(id) else {
        return false;
    };
    if !matches!(element.tag, Tag::Div | Tag::Li) || element.spacer {
        return false;
    }
    if is_nbsp_only(doc, id) {
        return false;
    }
    // Code fences and quotes own their run styling; content already inside a
    // run was wrapped together with its container.
    !doc.has_ancestor(id, |e| matches!(e.tag, Tag::Pre | Tag::Blockquote) || e.run)
}

fn is_nbsp_only(doc: &Document, id: NodeId) -> bool {
    match doc.children(id) {
        [only] => doc.text(*only) == Some("\u{a0}"),
        _ => false,
    }
}

fn starts_with_run(doc: &Document, id: NodeId) -> bool {
    doc.children(id)
        .first()
        .is_some_and(|&first| match &doc.get(first).data {
            NodeData::Element(e) => e.tag == Tag::Span && e.run,
            _ => false,
        })
}
