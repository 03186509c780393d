use crate::dom::{Document, Element};
use crate::style::{BOLD_COLOR, BOLD_WEIGHT, Tag};

/// Rewrite tags and inline styles over the whole tree.
pub fn inject(doc: &mut Document) {
    let substituted = substitute_paragraphs(doc);
    let mut styled = 0;

    for id in doc.elements(doc.root()) {
        let Some(element) = doc.element_mut(id) else {
            continue;
        };
        if let Some(decls) = element.tag.declarations() {
            element.style.append(decls);
            styled += 1;
        }
        if element.tag.is_bold() {
            element.style.set("font-weight", BOLD_WEIGHT);
            element.style.set("color", BOLD_COLOR);
        }
        if element.tag.is_cell() {
            transfer_alignment(element);
        }
    }

    tracing::debug!(substituted, styled, "injected styles");
}

/// Replace every `p` with a body container carrying the body declarations.
/// The paragraph's own attributes do not carry over.
fn substitute_paragraphs(doc: &mut Document) -> usize {
    let mut count = 0;
    for id in doc.elements(doc.root()) {
        if let Some(element) = doc.element_mut(id)
            && element.tag == Tag::P
        {
            *element = Element::with_style(Tag::Div, Tag::Div.declarations().unwrap_or_default());
            count += 1;
        }
    }
    count
}

/// Move a legacy `align` attribute into an inline `text-align` declaration.
fn transfer_alignment(cell: &mut Element) {
    if let Some(align) = cell.remove_attr("align")
        && !align.is_empty()
    {
        cell.style.set("text-align", &align);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn injected(html: &str) -> String {
        let mut doc = Document::parse(html);
        inject(&mut doc);
        doc.to_html().unwrap()
    }

    #[test]
    fn paragraph_becomes_styled_div() {
        assert_eq!(
            injected("<p>Body</p>"),
            "<div style=\"display: block; font-size: 19px; font-weight: normal; line-height: 1.8; color: #333; margin: 0; word-break: break-all;\">Body</div>"
        );
    }

    #[test]
    fn headings_get_their_declarations() {
        assert_eq!(
            injected("<h3>T</h3>"),
            "<h3 style=\"display: block; font-size: 22px; font-weight: bold; color: #000; margin: 0;\">T</h3>"
        );
    }

    #[test]
    fn appends_to_existing_style() {
        let mut doc = Document::parse("<li>x</li>");
        let li = doc.find_by_tag(doc.root(), "li").unwrap();
        doc.element_mut(li).unwrap().style.set("color", "red");
        inject(&mut doc);
        let style = &doc.element(li).unwrap().style;
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("margin-bottom"), Some("5px"));
    }

    #[test]
    fn bold_runs_forced_dark() {
        assert_eq!(
            injected("<strong>a</strong><b>c</b>"),
            "<strong style=\"font-weight: bold; color: #000;\">a</strong><b style=\"font-weight: bold; color: #000;\">c</b>"
        );
    }

    #[test]
    fn alignment_moves_into_style() {
        let mut doc = Document::parse(
            "<table><tbody><tr><td align=\"right\">1</td><th>h</th></tr></tbody></table>",
        );
        inject(&mut doc);
        let td = doc.find_by_tag(doc.root(), "td").unwrap();
        let td = doc.element(td).unwrap();
        assert_eq!(td.attr("align"), None);
        assert_eq!(td.style.get("text-align"), Some("right"));

        let th = doc.find_by_tag(doc.root(), "th").unwrap();
        assert_eq!(doc.element(th).unwrap().style.get("text-align"), Some("center"));
    }

    #[test]
    fn unknown_tags_stay_unstyled() {
        assert_eq!(injected("<em>x</em><h5>y</h5>"), "<em>x</em><h5>y</h5>");
    }
}
