// src/readers/html.rs
use scraper::{node::Node, ElementRef, Html};

// Elements whose boundaries end a line of text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "td", "th", "tr", "ul",
];

// Elements whose text never belongs to the manuscript body
const SKIPPED_ELEMENTS: &[&str] = &["head", "noscript", "script", "style", "template"];

/// Extracts readable text from an HTML document, one block element per line.
pub fn extract_html_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    normalize_lines(&raw)
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text_node) => push_collapsed(out, &text_node.text),
            Node::Element(child_element) => {
                let name = child_element.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }

                let is_block = BLOCK_ELEMENTS.contains(&name);
                if is_block {
                    out.push('\n');
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, out);
                }
                if is_block {
                    out.push('\n');
                }
            }
            _ => {} // Ignore comments, doctype, etc.
        }
    }
}

// Collapses whitespace runs inside a text node to single spaces.
fn push_collapsed(out: &mut String, text: &str) {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let ends_in_space = out.is_empty() || out.ends_with(char::is_whitespace);

    if collapsed.is_empty() {
        if !text.is_empty() && !ends_in_space {
            out.push(' ');
        }
        return;
    }

    if text.starts_with(char::is_whitespace) && !ends_in_space {
        out.push(' ');
    }
    out.push_str(&collapsed);
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

// Trims every line, drops leading/trailing blank lines and squeezes blank runs.
fn normalize_lines(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in raw.lines().map(str::trim) {
        if line.is_empty() && lines.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
