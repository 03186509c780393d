use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{Event, LinkType, Parser, Tag};
use regex::Regex;

use crate::parser;

/// `**...**` on a single line, matched lazily so concatenated runs such as
/// `**a**b**c**` split into two bold runs.
static SHORTHAND_BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").unwrap());

/// Normalize raw markdown for the renderer.
///
/// Strips a leading frontmatter block, rewrites shorthand bold into explicit
/// `<strong>` runs and escapes every `~` so strikethrough never triggers.
/// Regions the renderer keeps literal (code, raw HTML, autolinks) are copied
/// as they are, wherever they sit in the block structure. A bold run that
/// straddles one of them is left to the renderer.
pub fn preprocess(markdown: &str) -> String {
    let body = strip_frontmatter(markdown);
    let mut out = String::with_capacity(body.len() + body.len() / 8);
    let mut pos = 0;

    for range in verbatim_ranges(body) {
        normalize_prose(&body[pos..range.start], &mut out);
        out.push_str(&body[range.clone()]);
        pos = range.end;
    }
    normalize_prose(&body[pos..], &mut out);

    out
}

/// Strip frontmatter: `---` at the very start through the next `---\n`.
fn strip_frontmatter(markdown: &str) -> &str {
    if !markdown.starts_with("---") {
        return markdown;
    }
    match markdown[3..].find("---\n") {
        Some(end) => &markdown[3 + end + 4..],
        None => markdown,
    }
}

/// Sorted, disjoint byte ranges the renderer treats as literal text.
fn verbatim_ranges(markdown: &str) -> Vec<Range<usize>> {
    let mut found: Vec<Range<usize>> = Parser::new_ext(markdown, parser::options())
        .into_offset_iter()
        .filter(|(event, _)| {
            matches!(
                event,
                Event::Start(Tag::CodeBlock(_))
                    | Event::Code(_)
                    | Event::Html(_)
                    | Event::InlineHtml(_)
                    | Event::Start(Tag::Link {
                        link_type: LinkType::Autolink | LinkType::Email,
                        ..
                    })
            )
        })
        .map(|(_, range)| range)
        .collect();
    found.sort_by_key(|r| r.start);

    // Code block text events fall inside the block's own range
    let mut ranges: Vec<Range<usize>> = Vec::with_capacity(found.len());
    for range in found {
        match ranges.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => ranges.push(range),
        }
    }
    ranges
}

fn normalize_prose(text: &str, out: &mut String) {
    if text.is_empty() {
        return;
    }
    let bolded = SHORTHAND_BOLD_RE.replace_all(text, "<strong>$1</strong>");
    for ch in bolded.chars() {
        if ch == '~' {
            out.push('\\');
        }
        out.push(ch);
    }
}
