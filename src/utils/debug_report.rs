// src/utils/debug_report.rs
use crate::document::{SectionBoundary, SectionType};
use crate::utils::error::StorageError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn css_class(section: SectionType) -> &'static str {
    match section {
        SectionType::Abstract | SectionType::Introduction => "highlight-front",
        SectionType::LiteratureReview | SectionType::Methods => "highlight-method",
        SectionType::Results | SectionType::Discussion | SectionType::Conclusion => "highlight-body",
        SectionType::References => "highlight-refs",
        SectionType::Acknowledgments | SectionType::Appendices | SectionType::Declarations => "highlight-back",
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Renders the document as HTML with each detected heading line highlighted
pub fn render_debug_html(content: &str, boundaries: &[SectionBoundary]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str("body { font-family: monospace; white-space: pre-wrap; }\n");
    debug_html.push_str(".highlight-front { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-method { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-body { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-refs { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-back { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut boundaries = boundaries.iter().peekable();
    for (line_index, line) in content.lines().enumerate() {
        match boundaries.next_if(|b| b.line_index == line_index) {
            Some(boundary) => {
                debug_html.push_str(&format!(
                    "<span class=\"{}\" title=\"Line: {}, Section: {}\">{}</span>\n",
                    css_class(boundary.section),
                    line_index + 1,
                    boundary.section,
                    escape_html(line)
                ));
            }
            None => {
                debug_html.push_str(&escape_html(line));
                debug_html.push('\n');
            }
        }
    }

    debug_html.push_str("</body>\n</html>");
    debug_html
}

/// Writes the annotated HTML for `content` to `path`
pub fn save_debug_html(content: &str, boundaries: &[SectionBoundary], path: &Path) -> Result<(), StorageError> {
    let mut file = File::create(path)?;
    file.write_all(render_debug_html(content, boundaries).as_bytes())?;

    tracing::info!("Saved debug HTML to {}", path.display());
    Ok(())
}
