// src/readers/docx.rs
use crate::utils::error::ReadError;
use roxmltree::{Document, Node};
use std::io::{Cursor, Read};
use zip::ZipArchive;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Extracts paragraph text from a .docx archive, one line per paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ReadError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut document_xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut document_xml)?;

    document_xml_text(&document_xml)
}

fn document_xml_text(xml: &str) -> Result<String, ReadError> {
    let doc = Document::parse(xml)?;

    let paragraphs: Vec<String> = doc
        .descendants()
        .filter(|n| is_w(n, "p"))
        .map(paragraph_text)
        .collect();

    tracing::debug!("Read {} paragraphs from word/document.xml", paragraphs.len());
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants().skip(1) {
        // Paragraphs nested in text boxes are emitted on their own.
        if node.ancestors().skip(1).find(|a| is_w(a, "p")) != Some(paragraph) {
            continue;
        }
        match node.tag_name().name() {
            "t" if is_w(&node, "t") => text.push_str(node.text().unwrap_or_default()),
            "tab" if is_w(&node, "tab") => text.push('\t'),
            "br" | "cr" if node.tag_name().namespace() == Some(W_NS) => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn is_w(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(W_NS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::build_zip;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>A Study of Things</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Abstract</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">We study </w:t></w:r><w:r><w:t>things.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Col A</w:t><w:tab/><w:t>Col B</w:t><w:br/><w:t>Next</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_paragraph_text() {
        assert_eq!(
            document_xml_text(DOCUMENT_XML).unwrap(),
            "A Study of Things\nAbstract\nWe study things.\nCol A\tCol B\nNext"
        );
    }

    #[test]
    fn test_docx_archive_feeds_section_extraction() {
        let bytes = build_zip(&[("word/document.xml", DOCUMENT_XML.as_bytes())]);
        let text = extract_docx_text(&bytes).unwrap();
        let doc = crate::extractors::extract_sections(&text);
        assert_eq!(doc.title.as_deref(), Some("A Study of Things"));
        assert_eq!(doc.abstract_text.as_deref(), Some("We study things.\nCol A\tCol B\nNext"));
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = build_zip(&[("word/styles.xml", &b"<styles/>"[..])]);
        assert!(matches!(extract_docx_text(&bytes), Err(ReadError::Archive(_))));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(extract_docx_text(b"plain text pretending to be docx").is_err());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(document_xml_text("<w:document>"), Err(ReadError::Xml(_))));
    }
}
