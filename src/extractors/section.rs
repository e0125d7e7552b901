// src/extractors/section.rs

// --- Imports ---
use crate::document::{SectionBoundary, SectionType, StructuredDocument};
use crate::extractors::references::split_references;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
// The title is the first non-blank line among this many raw lines.
const TITLE_SEARCH_LINES: usize = 10;

// Keyword alternations per section type. Each is anchored to the whole
// (trimmed) line by `anchored_pattern`, with an optional trailing colon.
const DEFAULT_HEADINGS: &[(SectionType, &str)] = &[
    (SectionType::Abstract, r"abstract"),
    (SectionType::Introduction, r"introduction"),
    (SectionType::LiteratureReview, r"literature\s+review|related\s+work|background"),
    (SectionType::Methods, r"materials\s+and\s+methods|methodology|methods"),
    (SectionType::Results, r"results|findings"),
    (SectionType::Discussion, r"discussion"),
    (SectionType::Conclusion, r"conclusions?"),
    (SectionType::Acknowledgments, r"acknowledge?ments?"),
    (SectionType::References, r"references|bibliography|works\s+cited"),
    (SectionType::Appendices, r"appendix|appendices|supplementary\s+materials?"),
    (
        SectionType::Declarations,
        r"declarations?\s+(?:of|on)\s+(?:ethics|conflicts?\s+of\s+interests?|conflicting\s+interests?|competing\s+interests?|funding)",
    ),
];

// --- Regex Patterns (Lazy Static) ---
// Built once; a compile failure surfaces as an extraction error instead of a panic.
static DEFAULT_PATTERNS: Lazy<Result<Vec<SectionPattern>, ExtractError>> = Lazy::new(|| {
    DEFAULT_HEADINGS
        .iter()
        .map(|(section, keywords)| SectionPattern::compile(*section, keywords))
        .collect()
});

// "<n>[.<n>...][.] <text>", e.g. "1. Introduction", "3.2 Procedures"
static NUMBERED_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)*)\.?\s+(\S.*)$").expect("Failed to compile NUMBERED_HEADING_RE")
});

fn anchored_pattern(keywords: &str) -> String {
    format!(r"(?i)^(?:{})\s*:?$", keywords)
}

// --- Data Structures ---
#[derive(Debug, Clone)]
struct SectionPattern {
    section: SectionType,
    regex: Regex,
}

impl SectionPattern {
    fn compile(section: SectionType, keywords: &str) -> Result<Self, ExtractError> {
        let regex = Regex::new(&anchored_pattern(keywords))
            .map_err(|e| ExtractError::RegexError(format!("{} pattern: {}", section, e)))?;
        Ok(Self { section, regex })
    }
}

/// Splits unstructured manuscript text into named sections by heading lines.
///
/// The extractor is stateless apart from its pattern table and can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct SectionExtractor {
    // Checked after the built-in table.
    extra_patterns: Vec<SectionPattern>,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an extractor that also recognises the given heading phrases.
    ///
    /// Phrases are literal text; runs of whitespace match any whitespace.
    pub fn with_extra_headings(headings: &[(SectionType, String)]) -> Result<Self, ExtractError> {
        let mut extra_patterns = Vec::with_capacity(headings.len());
        for (section, phrase) in headings {
            let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
            if words.is_empty() {
                return Err(ExtractError::InvalidHeading(phrase.clone(), "heading phrase is empty".into()));
            }
            let regex = Regex::new(&anchored_pattern(&words.join(r"\s+")))
                .map_err(|e| ExtractError::InvalidHeading(phrase.clone(), e.to_string()))?;
            tracing::debug!("Registered extra heading '{}' for {}", phrase, section);
            extra_patterns.push(SectionPattern { section: *section, regex });
        }
        Ok(Self { extra_patterns })
    }

    /// Extracts named sections from `content`. Never fails: on an internal
    /// error the returned document carries only `content`, `error` and `warnings`.
    pub fn extract_sections(&self, content: &str) -> StructuredDocument {
        match self.try_extract(content) {
            Ok(document) => {
                tracing::debug!(
                    "Extracted sections [{}] from {} bytes",
                    document.populated_sections().join(", "),
                    content.len()
                );
                document
            }
            Err(e) => {
                tracing::error!("Section extraction failed: {}", e);
                failed_document(content, &e)
            }
        }
    }

    /// Heading boundaries detected in `content`, in line order.
    pub fn find_boundaries(&self, content: &str) -> Result<Vec<SectionBoundary>, ExtractError> {
        let patterns = default_patterns()?;
        let lines: Vec<&str> = content.lines().map(str::trim).collect();
        Ok(self.collect_boundaries(patterns, &lines))
    }

    fn try_extract(&self, content: &str) -> Result<StructuredDocument, ExtractError> {
        let patterns = default_patterns()?;
        let lines: Vec<&str> = content.lines().map(str::trim).collect();

        let mut document = StructuredDocument::from_content(content);
        document.title = detect_title(&lines);

        let boundaries = self.collect_boundaries(patterns, &lines);
        tracing::trace!("Found {} section boundaries", boundaries.len());

        for (i, boundary) in boundaries.iter().enumerate() {
            let end = boundaries.get(i + 1).map_or(lines.len(), |next| next.line_index);
            let body_lines = &lines[boundary.line_index + 1..end];
            let body = body_lines.join("\n");
            let body = body.trim();

            if body.is_empty() {
                tracing::debug!("Skipping empty '{}' section at line {}", boundary.heading, boundary.line_index + 1);
                continue;
            }

            assign_section(&mut document, boundary, body_lines, body);
        }

        Ok(document)
    }

    fn collect_boundaries(&self, patterns: &[SectionPattern], lines: &[&str]) -> Vec<SectionBoundary> {
        let mut boundaries: Vec<SectionBoundary> = lines
            .iter()
            .enumerate()
            .filter_map(|(line_index, line)| {
                self.detect_heading(patterns, line).map(|section| {
                    tracing::trace!("Line {} is a {} heading: '{}'", line_index + 1, section, line);
                    SectionBoundary { section, heading: line.to_string(), line_index }
                })
            })
            .collect();

        // Detection runs top to bottom already; keep the order explicit.
        boundaries.sort_by_key(|b| b.line_index);
        boundaries
    }

    /// Classifies a trimmed line as a section heading, either bare
    /// ("Methods") or with a single top-level number ("2. Methods").
    ///
    /// Sub-numbered headings such as "2.1 Methods" or "3.2 Procedures" never
    /// start a section; they stay in the body of the enclosing section.
    fn detect_heading(&self, patterns: &[SectionPattern], line: &str) -> Option<SectionType> {
        if line.is_empty() {
            return None;
        }

        if let Some(section) = self.match_keyword(patterns, line) {
            return Some(section);
        }

        // Numbered variant: only top-level numbers start a section, so
        // "1.1 Background" stays inside the enclosing section's body.
        let caps = NUMBERED_HEADING_RE.captures(line)?;
        let depth = caps.get(1)?.as_str().split('.').count();
        if depth != 1 {
            return None;
        }
        self.match_keyword(patterns, caps.get(2)?.as_str().trim())
    }

    fn match_keyword(&self, patterns: &[SectionPattern], text: &str) -> Option<SectionType> {
        patterns
            .iter()
            .chain(self.extra_patterns.iter())
            .find(|p| p.regex.is_match(text))
            .map(|p| p.section)
    }
}

/// Extracts named sections using the built-in heading table.
pub fn extract_sections(content: &str) -> StructuredDocument {
    SectionExtractor::new().extract_sections(content)
}

fn default_patterns() -> Result<&'static [SectionPattern], ExtractError> {
    match &*DEFAULT_PATTERNS {
        Ok(patterns) => Ok(patterns.as_slice()),
        Err(e) => Err(e.clone()),
    }
}

fn detect_title(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .take(TITLE_SEARCH_LINES)
        .find(|line| !line.is_empty())
        .map(|line| line.to_string())
}

fn failed_document(content: &str, error: &ExtractError) -> StructuredDocument {
    StructuredDocument {
        content: content.to_string(),
        error: Some(format!("Failed to extract document sections: {}", error)),
        warnings: vec![format!("Section extraction error: {}", error)],
        ..Default::default()
    }
}

fn duplicate_warning(label: &str, boundary: &SectionBoundary) -> String {
    format!("Duplicate {} heading at line {} replaces earlier section", label, boundary.line_index + 1)
}

/// Routes a non-empty section body into its document field. A repeated
/// heading of the same type overwrites the earlier value and is reported.
fn assign_section(document: &mut StructuredDocument, boundary: &SectionBoundary, body_lines: &[&str], body: &str) {
    match boundary.section {
        SectionType::References => {
            let references = split_references(body_lines);
            if document.references.replace(references).is_some() {
                document.warnings.push(duplicate_warning("references", boundary));
            }
        }
        SectionType::Declarations => assign_declaration(document, boundary, body),
        section => {
            let replaced = match document.text_field_mut(section) {
                Some(slot) => slot.replace(body.to_string()).is_some(),
                None => false,
            };
            if replaced {
                tracing::warn!("Heading '{}' overrides an earlier {} section", boundary.heading, section);
                document.warnings.push(duplicate_warning(section.field_name(), boundary));
            }
        }
    }
}

#[derive(Clone, Copy)]
enum DeclarationKind {
    Ethics,
    ConflictOfInterest,
    Funding,
}

fn declaration_kind(heading: &str) -> Option<DeclarationKind> {
    let heading = heading.to_lowercase();
    if !heading.contains("declaration") {
        return None;
    }
    if heading.contains("ethics") {
        Some(DeclarationKind::Ethics)
    } else if heading.contains("conflict") || heading.contains("competing") {
        Some(DeclarationKind::ConflictOfInterest)
    } else if heading.contains("fund") {
        Some(DeclarationKind::Funding)
    } else {
        None
    }
}

fn assign_declaration(document: &mut StructuredDocument, boundary: &SectionBoundary, body: &str) {
    let Some(kind) = declaration_kind(&boundary.heading) else {
        tracing::debug!("Declarations heading '{}' has no recognised subtype", boundary.heading);
        document
            .warnings
            .push(format!("Unrouted declarations section '{}' at line {}", boundary.heading, boundary.line_index + 1));
        return;
    };

    let declarations = document.declarations.get_or_insert_with(Default::default);
    let (slot, label) = match kind {
        DeclarationKind::Ethics => (&mut declarations.ethics, "ethics declaration"),
        DeclarationKind::ConflictOfInterest => (&mut declarations.conflict_of_interest, "conflict of interest declaration"),
        DeclarationKind::Funding => (&mut declarations.funding, "funding declaration"),
    };
    if slot.replace(body.to_string()).is_some() {
        document.warnings.push(duplicate_warning(label, boundary));
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAPER: &str = "\
A Study of Heading Detection in Manuscripts
Jane Researcher, University of Somewhere

Abstract
We study how headings can be detected in plain text.

Introduction
Manuscripts arrive in many shapes and sizes.

Methods
We collected one hundred papers and labelled their sections.

Results
Ninety papers were split correctly.

Discussion
Most failures came from unusual heading names.

Conclusion
Simple anchored patterns go a long way.

References
1. Smith, J. Title A.
2. Doe, J. Title B.
";

    #[test]
    fn test_sample_paper_end_to_end() {
        let doc = extract_sections(SAMPLE_PAPER);

        assert_eq!(doc.title.as_deref(), Some("A Study of Heading Detection in Manuscripts"));
        assert_eq!(doc.abstract_text.as_deref(), Some("We study how headings can be detected in plain text."));
        assert_eq!(doc.introduction.as_deref(), Some("Manuscripts arrive in many shapes and sizes."));
        assert_eq!(doc.methods.as_deref(), Some("We collected one hundred papers and labelled their sections."));
        assert_eq!(doc.results.as_deref(), Some("Ninety papers were split correctly."));
        assert_eq!(doc.discussion.as_deref(), Some("Most failures came from unusual heading names."));
        assert_eq!(doc.conclusion.as_deref(), Some("Simple anchored patterns go a long way."));
        assert_eq!(
            doc.references,
            Some(vec!["1. Smith, J. Title A.".to_string(), "2. Doe, J. Title B.".to_string()])
        );
        assert_eq!(doc.content, SAMPLE_PAPER);
        assert!(doc.error.is_none());
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let doc = extract_sections("");
        assert_eq!(doc, StructuredDocument::from_content(""));
        assert!(doc.populated_sections().is_empty());
        assert!(doc.error.is_none());
    }

    #[test]
    fn test_content_is_preserved_verbatim() {
        for input in ["", "  \n\n", "plain prose", SAMPLE_PAPER, "Abstract:\r\n  body with trailing spaces  \r\n"] {
            assert_eq!(extract_sections(input).content, input);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = SectionExtractor::new();
        assert_eq!(extractor.extract_sections(SAMPLE_PAPER), extractor.extract_sections(SAMPLE_PAPER));
    }

    #[test]
    fn test_heading_with_colon_and_anchoring() {
        let text = "Title\nAbstract:\nFirst line.\nBackground information follows the abstract\nIntroduction\nIntro.";
        let doc = extract_sections(text);
        assert_eq!(
            doc.abstract_text.as_deref(),
            Some("First line.\nBackground information follows the abstract")
        );
        assert!(doc.literature_review.is_none());
        assert_eq!(doc.introduction.as_deref(), Some("Intro."));
    }

    #[test]
    fn test_keyword_prefix_is_not_a_heading() {
        let doc = extract_sections("Abstractly speaking\nnothing here\nResults are in");
        assert!(doc.abstract_text.is_none());
        assert!(doc.results.is_none());
    }

    #[test]
    fn test_numbered_headings_keep_subsections_in_body() {
        let text = "\
Paper Title
1. Introduction
1.1 Background
Some background text.
1.2 Research Questions
What do we want to know?
2. Methods
Method text.";
        let doc = extract_sections(text);
        let intro = doc.introduction.expect("introduction should be populated");
        assert!(intro.contains("Background"));
        assert!(intro.contains("Research Questions"));
        assert!(doc.literature_review.is_none());
        assert_eq!(doc.methods.as_deref(), Some("Method text."));
    }

    #[test]
    fn test_numbered_boundary_keeps_original_heading() {
        let boundaries = SectionExtractor::new()
            .find_boundaries("Title\n3 Results\nbody\n4. Conclusion\nend")
            .unwrap();
        assert_eq!(
            boundaries,
            vec![
                SectionBoundary { section: SectionType::Results, heading: "3 Results".into(), line_index: 1 },
                SectionBoundary { section: SectionType::Conclusion, heading: "4. Conclusion".into(), line_index: 3 },
            ]
        );
    }

    #[test]
    fn test_alternative_headings_are_case_insensitive() {
        let doc = extract_sections("Title\nMETHODOLOGY\nHow.\nFINDINGS\nWhat.\nRelated Work\nWho.\nMaterials and Methods:\nAgain.");
        assert_eq!(doc.methods.as_deref(), Some("Again."));
        assert_eq!(doc.results.as_deref(), Some("What."));
        assert_eq!(doc.literature_review.as_deref(), Some("Who."));
    }

    #[test]
    fn test_repeated_heading_last_wins_and_is_flagged() {
        let doc = extract_sections("Title\nResults\nfirst\nResults\nsecond");
        assert_eq!(doc.results.as_deref(), Some("second"));
        assert_eq!(doc.warnings, vec!["Duplicate results heading at line 4 replaces earlier section"]);
    }

    #[test]
    fn test_document_without_headings() {
        let text = "Some free-form prose.\nIt has no headings at all.\nJust thoughts.";
        let doc = extract_sections(text);
        assert_eq!(doc.title.as_deref(), Some("Some free-form prose."));
        assert!(doc.populated_sections().is_empty());
        assert!(doc.error.is_none());
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_title_window_is_ten_raw_lines() {
        let blank_prefix = "\n".repeat(10);
        let doc = extract_sections(&format!("{}Late title", blank_prefix));
        assert!(doc.title.is_none());

        let doc = extract_sections(&format!("{}Early title", "\n".repeat(9)));
        assert_eq!(doc.title.as_deref(), Some("Early title"));
    }

    #[test]
    fn test_empty_section_body_is_skipped() {
        let doc = extract_sections("Title\nAbstract\n\nIntroduction\nText");
        assert!(doc.abstract_text.is_none());
        assert_eq!(doc.introduction.as_deref(), Some("Text"));
    }

    #[test]
    fn test_declarations_routed_by_heading() {
        let text = "\
Title
Declaration of Ethics
Approved by board 7.
Declaration of Conflicting Interests
None.
Declarations on Funding:
Grant 42.";
        let doc = extract_sections(text);
        let declarations = doc.declarations.clone().expect("declarations should be populated");
        assert_eq!(declarations.ethics.as_deref(), Some("Approved by board 7."));
        assert_eq!(declarations.conflict_of_interest.as_deref(), Some("None."));
        assert_eq!(declarations.funding.as_deref(), Some("Grant 42."));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_competing_interests_declaration() {
        let doc = extract_sections(
            "T\nConclusion\nWe conclude.\nDeclaration of Competing Interests\nThe authors declare none.",
        );
        assert_eq!(doc.conclusion.as_deref(), Some("We conclude."));
        let declarations = doc.declarations.expect("declarations should be populated");
        assert_eq!(declarations.conflict_of_interest.as_deref(), Some("The authors declare none."));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_bare_declarations_line_stays_in_body() {
        let doc = extract_sections("T\nConclusion\nWe conclude.\nDeclarations\nNone to report.");
        assert_eq!(doc.conclusion.as_deref(), Some("We conclude.\nDeclarations\nNone to report."));
        assert!(doc.declarations.is_none());
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_extra_declarations_heading_without_subtype_warns() {
        let extractor = SectionExtractor::with_extra_headings(&[(
            SectionType::Declarations,
            "Ethics Statement".to_string(),
        )])
        .unwrap();
        let doc = extractor.extract_sections("T\nEthics Statement\nApproved.");
        assert!(doc.declarations.is_none());
        assert_eq!(doc.warnings, vec!["Unrouted declarations section 'Ethics Statement' at line 2"]);
    }

    #[test]
    fn test_appendices_and_acknowledgements() {
        let doc = extract_sections("T\nAcknowledgements\nThanks.\nSupplementary Material\nTables.");
        assert_eq!(doc.acknowledgments.as_deref(), Some("Thanks."));
        assert_eq!(doc.appendices.as_deref(), Some("Tables."));
    }

    #[test]
    fn test_extra_headings() {
        let extractor = SectionExtractor::with_extra_headings(&[(
            SectionType::Methods,
            "Experimental   Setup".to_string(),
        )])
        .unwrap();
        let doc = extractor.extract_sections("T\nExperimental Setup:\nRig.\n2. Experimental Setup\nRig two.");
        assert_eq!(doc.methods.as_deref(), Some("Rig two."));
    }

    #[test]
    fn test_extra_heading_rejects_empty_phrase() {
        let err = SectionExtractor::with_extra_headings(&[(SectionType::Results, "   ".to_string())]).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidHeading(_, _)));
    }

    #[test]
    fn test_failed_document_shape() {
        let doc = failed_document("raw", &ExtractError::RegexError("boom".into()));
        assert_eq!(doc.content, "raw");
        assert_eq!(doc.error.as_deref(), Some("Failed to extract document sections: Regular expression error: boom"));
        assert_eq!(doc.warnings, vec!["Section extraction error: Regular expression error: boom"]);
        assert!(doc.populated_sections().is_empty());
    }

    #[test]
    fn test_default_patterns_compile() {
        assert_eq!(default_patterns().unwrap().len(), DEFAULT_HEADINGS.len());
    }

    #[test]
    fn test_extractor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SectionExtractor>();

        let extractor = std::sync::Arc::new(SectionExtractor::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let extractor = extractor.clone();
                std::thread::spawn(move || extractor.extract_sections(SAMPLE_PAPER))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().references.map(|r| r.len()), Some(2));
        }
    }
}
