use crate::error::Result;
use crate::pipeline::Converter;
use crate::style::ROOT_STYLE;

/// The most recently completed fragment.
///
/// A run that fails is logged and dropped; the previous fragment stays in
/// place, so a partial result is never shown.
pub struct Preview {
    converter: Converter,
    fragment: String,
}

impl Preview {
    pub fn new(converter: Converter) -> Self {
        Self {
            converter,
            fragment: String::new(),
        }
    }

    /// Re-run the full pipeline for `markdown`. Returns whether the displayed
    /// fragment was replaced.
    pub fn update(&mut self, markdown: &str) -> bool {
        self.update_with(markdown, Converter::convert)
    }

    /// Like [`Preview::update`], with the run supplied by the caller.
    pub fn update_with<F>(&mut self, markdown: &str, run: F) -> bool
    where
        F: FnOnce(&Converter, &str) -> Result<String>,
    {
        match run(&self.converter, markdown) {
            Ok(fragment) => {
                self.fragment = fragment;
                true
            }
            Err(e) => {
                tracing::error!("conversion failed, keeping previous output: {e}");
                false
            }
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The current fragment inside a standalone page styled like the preview pane.
    pub fn page(&self) -> String {
        preview_page(&self.fragment)
    }
}

/// Wrap a fragment in a minimal HTML page whose body carries the root style.
pub fn preview_page(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body style=\"{ROOT_STYLE}\">\n{fragment}\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;

    fn preview() -> Preview {
        Preview::new(Converter::new(&Config::compiled_default()).unwrap())
    }

    #[test]
    fn update_replaces_fragment() {
        let mut preview = preview();
        assert!(preview.update("# One"));
        let first = preview.fragment().to_string();
        assert!(first.contains("One"));
        assert!(preview.update("# Two"));
        assert_ne!(preview.fragment(), first);
    }

    #[test]
    fn failed_run_keeps_previous_fragment() {
        let mut preview = preview();
        assert!(preview.update("# Kept"));
        let before = preview.fragment().to_string();

        let replaced = preview.update_with("# Lost", |converter, markdown| {
            converter.convert(markdown)?;
            Err(Error::UnknownTheme("gone".to_string()))
        });

        assert!(!replaced);
        assert_eq!(preview.fragment(), before);
        assert!(!preview.fragment().contains("Lost"));
    }

    #[test]
    fn failure_before_any_success_leaves_empty_fragment() {
        let mut preview = preview();
        assert!(!preview.update_with("x", |_, _| Err(Error::EmptyClipboardCommand)));
        assert_eq!(preview.fragment(), "");
    }

    #[test]
    fn page_wraps_fragment_with_root_style() {
        let mut preview = preview();
        preview.update("text");
        let page = preview.page();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("font-family: 'Nanum Gothic', sans-serif;"));
        assert!(page.contains(preview.fragment()));
    }
}
