use pastemark::{
    Config, Document, SpacingConfig, insert_spacers, markdown_to_html,
    markdown_to_html_with_config, wrap_runs,
};

const RUN_OPEN: &str = r#"<span style="font-weight: normal; font-size: 19px; line-height: 1.8;">"#;

fn top_level_spacers(html: &str) -> usize {
    let doc = Document::parse(html);
    doc.children(doc.root())
        .iter()
        .filter_map(|&c| doc.element(c))
        .filter(|e| e.spacer)
        .count()
}

#[test]
fn title_and_body() {
    let html = markdown_to_html("# Title\n\nBody text.").unwrap();

    assert!(html.starts_with(
        r#"<h1 style="display: block; font-size: 30px; font-weight: bold; color: #000; letter-spacing: -1px; margin: 0;">Title</h1>"#
    ));
    assert!(html.contains(
        r#"<div data-spacer="true" style="display: block; height: 30px; line-height: 30px; font-size: 30px; clear: both;">&nbsp;</div>"#
    ));
    assert!(html.contains(&format!("{RUN_OPEN}Body text.</span></div>")));
    assert!(html.contains("height: 24px;"));
    assert!(!html.contains("<p"));
    assert!(!html.contains("class="));
}

#[test]
fn tildes_stay_literal() {
    let html = markdown_to_html("a ~~b~~ c").unwrap();
    assert!(html.contains("a ~~b~~ c"));
    assert!(!html.contains("<del"));
    assert!(!html.contains("<s>"));
}

#[test]
fn tildes_in_code_are_untouched() {
    let html = markdown_to_html("`~x~`").unwrap();
    assert!(html.contains("~x~"));
    assert!(!html.contains("\\~"));
}

#[test]
fn quoted_fence_keeps_its_text() {
    let html = markdown_to_html("> ```\n> a ~ b **c**\n> ```").unwrap();
    assert!(html.contains("<pre"));
    assert!(html.contains("a ~ b **c**"));
    assert!(!html.contains("\\~"));
    assert!(!html.contains("&lt;strong"));
}

#[test]
fn list_item_fence_keeps_its_text() {
    let html = markdown_to_html("1. item\n\n    ```\n    x ~ y **b**\n    ```").unwrap();
    assert!(html.contains("x ~ y **b**"));
    assert!(!html.contains("\\~"));
    assert!(!html.contains("&lt;strong"));
}

#[test]
fn shorthand_bold_next_to_text() {
    let html = markdown_to_html("**x**y**z**").unwrap();
    assert_eq!(html.matches("<strong").count(), 2);
    assert!(html.contains(">x</strong>y<strong"));
    assert!(html.contains(">z</strong>"));
    assert!(html.contains("font-weight: bold; color: #000;"));
    assert!(!html.contains("**"));
}

#[test]
fn frontmatter_is_removed() {
    let html = markdown_to_html("---\ntitle: hidden\n---\n# Shown").unwrap();
    assert!(!html.contains("hidden"));
    assert!(html.contains(">Shown</h1>"));
}

#[test]
fn only_top_level_blocks_get_spacers() {
    let html = markdown_to_html("> first\n>\n> second\n\n- a\n- b").unwrap();
    // one after the quote, one after the list
    assert_eq!(html.matches("data-spacer").count(), 2);
    assert_eq!(top_level_spacers(&html), 2);
}

#[test]
fn quoted_paragraphs_are_not_wrapped() {
    let html = markdown_to_html("> quote").unwrap();
    assert!(html.contains("quote"));
    assert!(!html.contains(RUN_OPEN));
}

#[test]
fn list_items_are_wrapped_once() {
    let html = markdown_to_html("- one\n  - nested").unwrap();
    assert_eq!(html.matches(RUN_OPEN).count(), 1);
}

#[test]
fn passes_are_idempotent_on_output() {
    let html = markdown_to_html("# Title\n\nBody text.\n\n- one\n- two\n\n> quote").unwrap();

    let mut doc = Document::parse(&html);
    insert_spacers(&mut doc, &SpacingConfig::default());
    wrap_runs(&mut doc);

    assert_eq!(doc.to_html().unwrap(), html);
}

#[test]
fn script_is_stripped() {
    let html = markdown_to_html("hello <script>alert(1)</script>").unwrap();
    assert!(html.contains("hello"));
    assert!(!html.contains("<script"));
    assert!(!html.contains("alert"));
}

#[test]
fn table_alignment_moves_inline() {
    let html = markdown_to_html("| a | b |\n|:--|--:|\n| 1 | 2 |").unwrap();
    assert!(html.contains("text-align: left;"));
    assert!(html.contains("text-align: right;"));
    assert!(!html.contains("align=\""));
}

#[test]
fn code_fence_is_highlighted() {
    let html = markdown_to_html("```rust\nfn main() {}\n```").unwrap();
    assert!(html.contains("<pre"));
    assert!(html.contains("background-color: #f6f8fa;"));
    assert!(html.contains("font-family: Consolas, 'Courier New', monospace;"));
    assert!(html.contains("color: #"));
    assert!(!html.contains("language-rust"));
}

#[test]
fn custom_spacing_is_used() {
    let mut config = Config::compiled_default();
    config.spacing.heading = "40px".to_string();
    config.spacing.body = "12px".to_string();

    let html = markdown_to_html_with_config("# T\n\nbody", &config).unwrap();
    assert!(html.contains("height: 40px;"));
    assert!(html.contains("height: 12px;"));
    assert!(!html.contains("height: 30px;"));
}

#[test]
fn empty_input_is_empty_fragment() {
    assert_eq!(markdown_to_html("").unwrap(), "");
}
