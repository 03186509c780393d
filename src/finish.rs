use crate::dom::{Document, Element, NodeId};
use crate::error::Result;
use crate::highlight::Highlighter;
use crate::style::{CODE_BACKGROUND, CODE_FONT_FAMILY, Tag};

pub fn finish(doc: &mut Document, highlighter: Option<&Highlighter>) -> Result<()> {
    let mut blocks = 0;

    for id in doc.elements(doc.root()) {
        if doc.tag(id) != Some(&Tag::Code) {
            continue;
        }
        let Some(pre) = doc.ancestors(id).find(|&a| doc.tag(a) == Some(&Tag::Pre)) else {
            continue;
        };

        if let Some(highlighter) = highlighter {
            highlight_block(doc, id, highlighter)?;
        }
        if let Some(code) = doc.element_mut(id) {
            code.style.set("font-family", CODE_FONT_FAMILY);
        }
        if let Some(pre) = doc.element_mut(pre) {
            pre.style.set("background-color", CODE_BACKGROUND);
        }
        blocks += 1;
    }

    strip_classes(doc);
    tracing::debug!(blocks, "finished code blocks");
    Ok(())
}

/// Replace the code element's text with highlighted spans.
fn highlight_block(doc: &mut Document, code: NodeId, highlighter: &Highlighter) -> Result<()> {
    let language = doc
        .element(code)
        .and_then(|e| e.attr("class"))
        .and_then(language_of)
        .map(str::to_string);
    let source = doc.text_content(code);
    let tokens = highlighter.highlight(&source, language.as_deref())?;

    doc.take_children(code);
    for token in tokens {
        let span = doc.create_element(Element::with_style(Tag::Span, &token.style));
        let text = doc.create_text(token.text);
        doc.append(span, text);
        doc.append(code, span);
    }
    Ok(())
}

/// Language named by a `language-x` (or `lang-x`) class.
fn language_of(class: &str) -> Option<&str> {
    class.split_whitespace().find_map(|c| {
        c.strip_prefix("language-")
            .or_else(|| c.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
    })
}

fn strip_classes(doc: &mut Document) {
    for id in doc.elements(doc.root()) {
        if let Some(element) = doc.element_mut(id) {
            element.remove_attr("class");
        }
    }
}
