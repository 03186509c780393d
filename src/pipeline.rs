use crate::config::{Config, SpacingConfig};
use crate::dom::Document;
use crate::error::Result;
use crate::highlight::Highlighter;
use crate::{finish, inject, parser, preprocess, sanitize, spacer, wrap};

/// Sanitized HTML parsed into a tree.
///
/// Each stage owns the tree and only produces the next one:
/// `Sanitized -> Styled -> Spaced -> Wrapped -> Document`.
pub struct Sanitized(Document);

/// After style injection.
pub struct Styled(Document);

/// After spacer insertion.
pub struct Spaced(Document);

/// After run wrapping.
pub struct Wrapped(Document);

impl Sanitized {
    /// Parse HTML that has already been through the sanitizer.
    pub fn parse(html: &str) -> Self {
        Self(Document::parse(html))
    }

    pub fn inject_styles(mut self) -> Styled {
        inject::inject(&mut self.0);
        Styled(self.0)
    }
}

impl Styled {
    pub fn insert_spacers(mut self, spacing: &SpacingConfig) -> Spaced {
        spacer::insert(&mut self.0, spacing);
        Spaced(self.0)
    }
}

impl Spaced {
    pub fn wrap_runs(mut self) -> Wrapped {
        wrap::wrap(&mut self.0);
        Wrapped(self.0)
    }
}

impl Wrapped {
    pub fn finish(mut self, highlighter: Option<&Highlighter>) -> Result<Document> {
        finish::finish(&mut self.0, highlighter)?;
        Ok(self.0)
    }
}

/// Runs the whole pipeline for one configuration.
pub struct Converter {
    spacing: SpacingConfig,
    highlighter: Option<Highlighter>,
}

impl Converter {
    pub fn new(config: &Config) -> Result<Self> {
        let highlighter = if config.highlight.enabled {
            Some(Highlighter::new(&config.highlight.theme)?)
        } else {
            None
        };
        Ok(Self {
            spacing: config.spacing.clone(),
            highlighter,
        })
    }

    /// Markdown in, styled tree out. Every call builds a fresh tree.
    pub fn convert_document(&self, markdown: &str) -> Result<Document> {
        let normalized = preprocess::preprocess(markdown);
        let rendered = parser::render(&normalized);
        let clean = sanitize::sanitize(&rendered);

        Sanitized::parse(&clean)
            .inject_styles()
            .insert_spacers(&self.spacing)
            .wrap_runs()
            .finish(self.highlighter.as_ref())
    }

    /// Markdown in, styled fragment out.
    pub fn convert(&self, markdown: &str) -> Result<String> {
        self.convert_document(markdown)?.to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_highlighting_needs_no_theme() {
        let mut config = Config::compiled_default();
        config.highlight.enabled = false;
        config.highlight.theme = "missing".to_string();
        let converter = Converter::new(&config).unwrap();
        let html = converter.convert("```rust\nfn x() {}\n```").unwrap();
        assert!(html.contains("fn x() {}"));
        assert!(!html.contains("color: #"));
    }

    #[test]
    fn unknown_theme_fails_construction() {
        let mut config = Config::compiled_default();
        config.highlight.theme = "missing".to_string();
        assert!(Converter::new(&config).is_err());
    }

    #[test]
    fn stages_compose_on_raw_html() {
        let doc = Sanitized::parse("<p>x</p>")
            .inject_styles()
            .insert_spacers(&SpacingConfig::default())
            .wrap_runs()
            .finish(None)
            .unwrap();
        let top = doc.children(doc.root());
        assert_eq!(top.len(), 2);
        assert!(doc.element(top[1]).unwrap().spacer);
    }
}
