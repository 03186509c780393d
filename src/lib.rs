mod clipboard;
mod config;
mod dom;
mod error;
mod finish;
mod highlight;
mod inject;
mod parser;
mod pipeline;
mod preprocess;
mod preview;
mod sanitize;
mod spacer;
mod style;
mod tree_sink;
mod watch;
mod wrap;

pub use clipboard::{Clipboard, CommandClipboard};
pub use config::{ClipboardConfig, Config, HighlightConfig, SpacingConfig};
pub use dom::{Document, Element, NodeData, NodeId, SPACER_ATTR};
pub use error::{Error, Result};
pub use highlight::Highlighter;
pub use pipeline::{Converter, Sanitized, Spaced, Styled, Wrapped};
pub use preview::{Preview, preview_page};
pub use style::{ROOT_STYLE, Style, Tag};
pub use watch::InputWatcher;

/// Normalize raw markdown: strip frontmatter, expand shorthand bold, escape tildes.
pub fn preprocess(markdown: &str) -> String {
    preprocess::preprocess(markdown)
}

/// Render normalized markdown to (unsanitized) HTML.
pub fn render(markdown: &str) -> String {
    parser::render(markdown)
}

/// Strip unsafe markup from rendered HTML.
pub fn sanitize(html: &str) -> String {
    sanitize::sanitize(html)
}

/// Append canonical declarations, substitute paragraphs, force bold runs and
/// move cell alignment inline.
pub fn inject_styles(doc: &mut Document) {
    inject::inject(doc)
}

/// Insert spacer markers after top-level blocks. Safe to repeat.
pub fn insert_spacers(doc: &mut Document, spacing: &SpacingConfig) {
    spacer::insert(doc, spacing)
}

/// Wrap block and list-item content in a styled inline run. Safe to repeat.
pub fn wrap_runs(doc: &mut Document) {
    wrap::wrap(doc)
}

/// Highlight code fences and remove class attributes.
pub fn finish(doc: &mut Document, highlighter: Option<&Highlighter>) -> Result<()> {
    finish::finish(doc, highlighter)
}

/// Convert markdown to a styled HTML fragment using the default config.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_html_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to a styled HTML fragment with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> Result<String> {
    Converter::new(config)?.convert(markdown)
}
