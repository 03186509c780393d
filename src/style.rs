use std::fmt;

use html5ever::LocalName;

/// Declarations for the preview container; the target editor supplies its own
/// root, so the fragment itself never carries these.
pub const ROOT_STYLE: &str = "font-family: 'Nanum Gothic', sans-serif; font-weight: normal; color: #333; font-size: 19px; line-height: 1.8;";

/// Inline run wrapped around block text so run-level paste readers keep the design.
pub const RUN_STYLE: &str = "font-weight: normal; font-size: 19px; line-height: 1.8;";

pub const BOLD_WEIGHT: &str = "bold";
pub const BOLD_COLOR: &str = "#000";

pub const CODE_FONT_FAMILY: &str = "Consolas, 'Courier New', monospace";
pub const CODE_BACKGROUND: &str = "#f6f8fa";

/// Element kinds the pipeline knows about. Anything else passes through as
/// [`Tag::Other`] and is left unstyled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    H1,
    H2,
    H3,
    H4,
    P,
    Div,
    Span,
    Blockquote,
    Ul,
    Ol,
    Li,
    Table,
    Th,
    Td,
    Pre,
    Code,
    Strong,
    B,
    Other(LocalName),
}

/// Spacer height class for a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rhythm {
    Heading,
    Body,
}

impl Tag {
    pub fn from_local(local: &LocalName) -> Self {
        match local.as_ref() {
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "p" => Tag::P,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "blockquote" => Tag::Blockquote,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "table" => Tag::Table,
            "th" => Tag::Th,
            "td" => Tag::Td,
            "pre" => Tag::Pre,
            "code" => Tag::Code,
            "strong" => Tag::Strong,
            "b" => Tag::B,
            _ => Tag::Other(local.clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::P => "p",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Blockquote => "blockquote",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Pre => "pre",
            Tag::Code => "code",
            Tag::Strong => "strong",
            Tag::B => "b",
            Tag::Other(local) => local.as_ref(),
        }
    }

    pub fn local_name(&self) -> LocalName {
        match self {
            Tag::Other(local) => local.clone(),
            known => LocalName::from(known.as_str()),
        }
    }

    /// Canonical declarations for this element kind.
    ///
    /// `P` has no entry: paragraphs are replaced by body containers before
    /// any style is applied.
    pub fn declarations(&self) -> Option<&'static str> {
        match self {
            Tag::H1 => Some(
                "display: block; font-size: 30px; font-weight: bold; color: #000; letter-spacing: -1px; margin: 0;",
            ),
            Tag::H2 => Some(
                "display: block; font-size: 26px; font-weight: bold; color: #000; letter-spacing: -1px; margin: 0;",
            ),
            Tag::H3 => {
                Some("display: block; font-size: 22px; font-weight: bold; color: #000; margin: 0;")
            }
            Tag::H4 => {
                Some("display: block; font-size: 20px; font-weight: bold; color: #000; margin: 0;")
            }
            Tag::Div => Some(
                "display: block; font-size: 19px; font-weight: normal; line-height: 1.8; color: #333; margin: 0; word-break: break-all;",
            ),
            Tag::Blockquote => Some(
                "display: block; border-left: 5px solid #00C73C; background-color: #f7f7f7; padding: 25px; margin: 0; color: #555; font-size: 19px; line-height: 1.8; font-weight: normal;",
            ),
            Tag::Ul | Tag::Ol => Some(
                "display: block; padding-left: 20px; margin: 0; color: #333; font-size: 19px; line-height: 1.8; font-weight: normal;",
            ),
            Tag::Li => Some("margin-bottom: 5px; font-weight: normal;"),
            Tag::Table => Some(
                "border-collapse: collapse; width: 100%; margin: 0; border: 1px solid #ddd; font-size: 17px; font-weight: normal;",
            ),
            Tag::Th => Some(
                "background-color: #f9f9f9; border: 1px solid #ddd; padding: 14px; font-weight: bold; text-align: center; color: #333;",
            ),
            Tag::Td => Some(
                "border: 1px solid #ddd; padding: 14px; color: #333; line-height: 1.6; font-weight: normal;",
            ),
            Tag::Pre => Some(
                "background-color: #f6f8fa; padding: 20px; border-radius: 8px; overflow-x: auto; margin: 0; border: 1px solid #e1e4e8;",
            ),
            Tag::Code => Some(
                "font-family: Consolas, 'Courier New', monospace; font-size: 15px; line-height: 1.6; font-weight: normal;",
            ),
            Tag::P | Tag::Span | Tag::Strong | Tag::B | Tag::Other(_) => None,
        }
    }

    /// Which spacer follows this element when it sits at the top level.
    pub fn rhythm(&self) -> Option<Rhythm> {
        match self {
            Tag::H1 | Tag::H2 | Tag::H3 | Tag::H4 => Some(Rhythm::Heading),
            Tag::Div | Tag::Ul | Tag::Ol | Tag::Blockquote | Tag::Pre | Tag::Table => {
                Some(Rhythm::Body)
            }
            _ => None,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Tag::Strong | Tag::B)
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Tag::Th | Tag::Td)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inline declaration block.
///
/// Setting a property that is already present replaces its value in place,
/// so appending a declaration string gives last-wins semantics without ever
/// dropping a property set earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    decls: Vec<(String, String)>,
}

impl Style {
    pub fn parse(css: &str) -> Self {
        let mut style = Self::default();
        style.append(css);
        style
    }

    /// Append every `property: value` declaration in `css`.
    pub fn append(&mut self, css: &str) {
        for decl in css.split(';') {
            if let Some((property, value)) = decl.split_once(':') {
                let property = property.trim();
                let value = value.trim();
                if !property.is_empty() && !value.is_empty() {
                    self.set(property, value);
                }
            }
        }
    }

    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        match self.decls.iter_mut().find(|(p, _)| *p == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.decls.push((property, value.to_string())),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_declarations() {
        let style = Style::parse("display:block;font-size: 30px ;");
        assert_eq!(style.to_string(), "display: block; font-size: 30px;");
    }

    #[test]
    fn later_declaration_wins_in_place() {
        let mut style = Style::parse("text-align: center; color: #333;");
        style.append("text-align: right;");
        assert_eq!(style.to_string(), "text-align: right; color: #333;");
    }

    #[test]
    fn quoted_font_families_survive() {
        let style = Style::parse("font-family: Consolas, 'Courier New', monospace;");
        assert_eq!(
            style.get("font-family"),
            Some("Consolas, 'Courier New', monospace")
        );
    }

    #[test]
    fn every_styled_tag_has_display_or_box_rules() {
        for tag in [
            Tag::H1,
            Tag::H2,
            Tag::H3,
            Tag::H4,
            Tag::Div,
            Tag::Blockquote,
            Tag::Ul,
            Tag::Ol,
            Tag::Li,
            Tag::Table,
            Tag::Th,
            Tag::Td,
            Tag::Pre,
            Tag::Code,
        ] {
            let decls = tag.declarations().expect("styled tag");
            assert!(!Style::parse(decls).is_empty(), "{tag}");
        }
        assert!(Tag::P.declarations().is_none());
    }

    #[test]
    fn unknown_tags_round_trip_their_name() {
        let tag = Tag::from_local(&LocalName::from("em"));
        assert_eq!(tag, Tag::Other(LocalName::from("em")));
        assert_eq!(tag.as_str(), "em");
        assert_eq!(Tag::from_local(&LocalName::from("h2")), Tag::H2);
    }

    #[test]
    fn rhythm_classes() {
        assert_eq!(Tag::H3.rhythm(), Some(Rhythm::Heading));
        assert_eq!(Tag::Table.rhythm(), Some(Rhythm::Body));
        assert_eq!(Tag::Li.rhythm(), None);
        assert_eq!(Tag::Other(LocalName::from("h5")).rhythm(), None);
    }
}
