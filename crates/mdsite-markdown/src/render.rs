//! Document rendering: title extraction and body conversion.

use crate::rules::{hoist_list_items, transform_line};

/// Title used when a document has no line starting with `#`.
pub const UNTITLED: &str = "Untitled";

/// A rendered Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDoc {
    /// Text of the first heading line
    pub title: String,

    /// HTML fragment built from the non-heading lines
    pub html: String,
}

/// Extract the page title from the first line starting with `#`.
///
/// A single leading `#` is removed and the rest trimmed, so `## Intro` yields
/// `# Intro`.
pub fn extract_title(source: &str) -> String {
    source
        .split('\n')
        .find(|line| line.starts_with('#'))
        .map(|line| line[1..].trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Render a Markdown document into its title and HTML fragment.
///
/// Heading lines only contribute the title and are dropped from the body, so
/// the heading rules never fire on body lines. Each remaining line goes through
/// the line rules, lines are joined with `<br>`, and list items are hoisted
/// into one trailing `<ul>`.
pub fn render_markdown(source: &str) -> RenderedDoc {
    let title = extract_title(source);

    let body = source
        .split('\n')
        .filter(|line| !line.starts_with('#'))
        .map(transform_line)
        .collect::<Vec<_>>()
        .join("<br>");

    RenderedDoc {
        title,
        html: hoist_list_items(&body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_title_from_heading() {
        assert_eq!(extract_title("intro\n#   Hello World  \nbody"), "Hello World");
    }

    #[test]
    fn uses_first_heading_only() {
        assert_eq!(extract_title("# First\n# Second"), "First");
    }

    #[test]
    fn strips_a_single_hash() {
        assert_eq!(extract_title("## Section"), "# Section");
    }

    #[test]
    fn defaults_to_untitled() {
        assert_eq!(extract_title("no heading here\n- item"), "Untitled");
        assert_eq!(extract_title(""), "Untitled");
    }

    #[test]
    fn ignores_indented_hash() {
        assert_eq!(extract_title(" # not a title"), "Untitled");
    }

    #[test]
    fn renders_title_and_body() {
        let doc = render_markdown("# Hello\nSome text");

        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.html, "Some text");
    }

    #[test]
    fn never_emits_heading_tags() {
        let doc = render_markdown("# One\n## Two\n### Three\ntext\n#### Four");

        assert!(!doc.html.contains("<h1>"));
        assert!(!doc.html.contains("<h2>"));
        assert!(!doc.html.contains("<h3>"));
        assert_eq!(doc.html, "text");
    }

    #[test]
    fn joins_lines_with_breaks() {
        let doc = render_markdown("first\n\nsecond");

        assert_eq!(doc.html, "first<br><br>second");
    }

    #[test]
    fn hoists_list_items_in_order() {
        let doc = render_markdown("# T\n- a\ntext\n- b\nmore\n- c");

        assert_eq!(
            doc.html,
            "<br>text<br><br>more<br><ul><li>a</li><li>b</li><li>c</li></ul>"
        );
        assert_eq!(doc.html.matches("<ul>").count(), 1);
    }

    #[test]
    fn renders_sample_page() {
        let source = "# Welcome to My Site\n\nThis is a static site.\n\n- Easy to use\n- Super fast";
        let doc = render_markdown(source);

        assert_eq!(doc.title, "Welcome to My Site");
        assert_eq!(
            doc.html,
            "<br>This is a static site.<br><br><br><ul><li>Easy to use</li><li>Super fast</li></ul>"
        );
    }

    #[test]
    fn trims_carriage_return_from_title() {
        let doc = render_markdown("# Title\r\nline\r\n- item\r\n");

        assert_eq!(doc.title, "Title");
        assert_eq!(doc.html, "line\r<br>\r<br><ul><li>item</li></ul>");
    }

    #[test]
    fn lone_carriage_return_does_not_start_a_line() {
        let doc = render_markdown("intro\r- a\r# b");

        assert_eq!(doc.title, "Untitled");
        assert_eq!(doc.html, "intro\r- a\r# b");
    }
}
