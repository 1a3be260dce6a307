//! Theme layout with `{{Title}}` and `{{Content}}` placeholders.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// A theme layout template.
///
/// Placeholders are whitespace tolerant (`{{ Title }}` also matches) and every
/// occurrence is replaced. The title is substituted before the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    source: String,
}

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*Title\s*\}\}").expect("Invalid title token regex"));

static CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*Content\s*\}\}").expect("Invalid content token regex"));

impl Layout {
    /// Create a layout from template text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a layout from disk. Invalid UTF-8 is replaced with U+FFFD.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::new(String::from_utf8_lossy(&bytes)))
    }

    /// Substitute the page title and content into the layout.
    pub fn render(&self, title: &str, content: &str) -> String {
        let with_title = TITLE_RE.replace_all(&self.source, NoExpand(title));
        CONTENT_RE
            .replace_all(&with_title, NoExpand(content))
            .into_owned()
    }
}

/// Default layout written by `theme add`.
pub const DEFAULT_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{{ Title }}</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <header><h1>{{ Title }}</h1></header>
  <main>
    {{ Content }}
  </main>
  <footer><p> 2025 My Static Site Generator</p></footer>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_all_placeholders() {
        let layout =
            Layout::new("<title>{{Title}}</title><h1>{{ Title }}</h1><main>{{  Content }}</main>");

        assert_eq!(
            layout.render("Hello", "<p>body</p>"),
            "<title>Hello</title><h1>Hello</h1><main><p>body</p></main>"
        );
    }

    #[test]
    fn does_not_expand_dollar_signs() {
        let layout = Layout::new("{{Title}}|{{Content}}");

        assert_eq!(layout.render("$1 off", "cost: $5"), "$1 off|cost: $5");
    }

    #[test]
    fn placeholder_names_are_case_sensitive() {
        let layout = Layout::new("{{title}} {{Title}}");

        assert_eq!(layout.render("T", ""), "{{title}} T");
    }

    #[test]
    fn default_layout_has_both_tokens() {
        let rendered = Layout::new(DEFAULT_LAYOUT).render("Page", "Body");

        assert!(rendered.contains("<title>Page</title>"));
        assert!(rendered.contains("<header><h1>Page</h1></header>"));
        assert!(rendered.contains("Body"));
        assert!(rendered.contains(r#"<link rel="stylesheet" href="styles.css">"#));
        assert!(!rendered.contains("{{"));
    }
}
