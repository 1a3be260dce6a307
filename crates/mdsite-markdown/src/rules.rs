//! Line rules and list hoisting.

/// A rule that wraps a matching line in an HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRule {
    /// Prefix that must start the line (including the trailing space)
    pub prefix: &'static str,

    /// Tag the remainder of the line is wrapped in
    pub tag: &'static str,
}

/// Rules in application order. The first matching rule wins, since a wrapped
/// line starts with `<` and no later prefix can match it.
pub const LINE_RULES: &[LineRule] = &[
    LineRule {
        prefix: "### ",
        tag: "h3",
    },
    LineRule {
        prefix: "## ",
        tag: "h2",
    },
    LineRule {
        prefix: "# ",
        tag: "h1",
    },
    LineRule {
        prefix: "- ",
        tag: "li",
    },
];

impl LineRule {
    /// Apply this rule to a single line, returning `None` if it does not match.
    ///
    /// A trailing carriage return is kept outside the tag.
    pub fn apply(&self, line: &str) -> Option<String> {
        let rest = line.strip_prefix(self.prefix)?;
        let (text, eol) = split_line_end(rest);
        Some(format!("<{tag}>{text}</{tag}>{eol}", tag = self.tag))
    }
}

/// Transform one line with the first matching rule, or return it unchanged.
pub fn transform_line(line: &str) -> String {
    LINE_RULES
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or_else(|| line.to_string())
}

fn split_line_end(text: &str) -> (&str, &str) {
    match text.find(is_line_terminator) {
        Some(pos) => text.split_at(pos),
        None => (text, ""),
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{2028}' | '\u{2029}')
}

const LI_OPEN: &str = "<li>";
const LI_CLOSE: &str = "</li>";

/// Move every `<li>...</li>` element to a single `<ul>` appended at the end.
///
/// Items are matched shortest-first and may not span a line terminator. If the
/// fragment contains `<li>` at all, a `<ul>` is appended even when no complete
/// item was found. Fragments without `<li>` are returned unchanged.
pub fn hoist_list_items(html: &str) -> String {
    if !html.contains(LI_OPEN) {
        return html.to_string();
    }

    let mut remaining = String::with_capacity(html.len());
    let mut items = String::new();
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some(offset) = html[search_from..].find(LI_OPEN) {
        let start = search_from + offset;
        let body_start = start + LI_OPEN.len();

        match find_close(&html[body_start..]) {
            Some(close) => {
                let end = body_start + close + LI_CLOSE.len();
                remaining.push_str(&html[cursor..start]);
                items.push_str(&html[start..end]);
                cursor = end;
                search_from = end;
            }
            None => search_from = start + 1,
        }
    }

    remaining.push_str(&html[cursor..]);
    remaining.push_str("<ul>");
    remaining.push_str(&items);
    remaining.push_str("</ul>");
    remaining
}

/// Position of the first `</li>` that is not preceded by a line terminator.
fn find_close(text: &str) -> Option<usize> {
    let close = text.find(LI_CLOSE)?;
    if text[..close].contains(is_line_terminator) {
        None
    } else {
        Some(close)
    }
}
