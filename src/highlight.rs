use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::{Error, Result};

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// One highlighted token: inline declarations plus the text they cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub style: String,
    pub text: String,
}

pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    /// Look up one of syntect's bundled themes by name.
    pub fn new(theme: &str) -> Result<Self> {
        let theme = THEME_SET
            .themes
            .get(theme)
            .cloned()
            .ok_or_else(|| Error::UnknownTheme(theme.to_string()))?;
        Ok(Self { theme })
    }

    /// Highlight `code`, falling back to plain text for unknown or missing languages.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> Result<Vec<Token>> {
        let syntax = language
            .and_then(|lang| {
                let found = SYNTAX_SET.find_syntax_by_token(lang);
                if found.is_none() {
                    tracing::warn!("no syntax for language `{lang}`, using plain text");
                }
                found
            })
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut tokens: Vec<Token> = Vec::new();

        for line in LinesWithEndings::from(code) {
            for (style, text) in lines.highlight_line(line, &SYNTAX_SET)? {
                let fg = style.foreground;
                let mut css = format!("color: #{:02x}{:02x}{:02x};", fg.r, fg.g, fg.b);
                if style.font_style.contains(FontStyle::BOLD) {
                    css.push_str(" font-weight: bold;");
                }
                if style.font_style.contains(FontStyle::ITALIC) {
                    css.push_str(" font-style: italic;");
                }
                if style.font_style.contains(FontStyle::UNDERLINE) {
                    css.push_str(" text-decoration: underline;");
                }

                // Merge runs that ended up with identical styling
                match tokens.last_mut() {
                    Some(last) if last.style == css => last.text.push_str(text),
                    _ => tokens.push(Token {
                        style: css,
                        text: text.to_string(),
                    }),
                }
            }
        }

        Ok(tokens)
    }
}
