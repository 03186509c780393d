use crate::config::SpacingConfig;
use crate::dom::{Attribute, Document, Element, NodeId, SPACER_ATTR};
use crate::style::{Rhythm, Tag};

/// Insert a spacer after every top-level heading and body block.
///
/// Only direct children of the root are considered; nested content is spaced
/// by its container. A block already followed by a spacer is skipped, so the
/// pass can run any number of times.
pub fn insert(doc: &mut Document, spacing: &SpacingConfig) {
    let mut inserted = 0;

    for child in doc.children(doc.root()).to_vec() {
        let Some(element) = doc.element(child) else {
            continue;
        };
        if element.spacer {
            continue;
        }
        let height = match element.tag.rhythm() {
            Some(Rhythm::Heading) => &spacing.heading,
            Some(Rhythm::Body) => &spacing.body,
            None => continue,
        };
        if followed_by_spacer(doc, child) {
            continue;
        }

        let spacer = create_spacer(doc, height);
        doc.insert_after(child, spacer);
        inserted += 1;
    }

    tracing::debug!(inserted, "inserted spacers");
}

fn followed_by_spacer(doc: &Document, id: NodeId) -> bool {
    doc.next_sibling(id)
        .and_then(|next| doc.element(next))
        .is_some_and(|e| e.tag == Tag::Div && e.spacer)
}

/// A block holding one non-breaking space, sized to `height`.
pub fn create_spacer(doc: &mut Document, height: &str) -> NodeId {
    let css = format!(
        "display: block; height: {height}; line-height: {height}; font-size: {height}; clear: both;"
    );
    let mut element = Element::with_style(Tag::Div, &css);
    element.attrs.push(Attribute::new(SPACER_ATTR, "true"));
    element.spacer = true;

    let spacer = doc.create_element(element);
    let nbsp = doc.create_text("\u{a0}");
    doc.append(spacer, nbsp);
    spacer
}
