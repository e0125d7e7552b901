// src/document/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named section kinds recognised by the heading pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    Abstract,
    Introduction,
    LiteratureReview,
    Methods,
    Results,
    Discussion,
    Conclusion,
    Acknowledgments,
    References,
    Appendices,
    /// Routed by heading text into one of the [`Declarations`] sub-fields.
    Declarations,
}

impl SectionType {
    pub const ALL: [SectionType; 11] = [
        SectionType::Abstract,
        SectionType::Introduction,
        SectionType::LiteratureReview,
        SectionType::Methods,
        SectionType::Results,
        SectionType::Discussion,
        SectionType::Conclusion,
        SectionType::Acknowledgments,
        SectionType::References,
        SectionType::Appendices,
        SectionType::Declarations,
    ];

    /// Field name as it appears in serialized output.
    pub fn field_name(&self) -> &'static str {
        match self {
            SectionType::Abstract => "abstract",
            SectionType::Introduction => "introduction",
            SectionType::LiteratureReview => "literatureReview",
            SectionType::Methods => "methods",
            SectionType::Results => "results",
            SectionType::Discussion => "discussion",
            SectionType::Conclusion => "conclusion",
            SectionType::Acknowledgments => "acknowledgments",
            SectionType::References => "references",
            SectionType::Appendices => "appendices",
            SectionType::Declarations => "declarations",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for SectionType {
    type Err = String;

    /// Accepts the serialized field name or its snake_case spelling, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_lowercase();
        SectionType::ALL
            .iter()
            .copied()
            .find(|t| t.field_name().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown section type '{}'", s))
    }
}

/// Where a named section starts: its type, the heading line as written, and its line index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBoundary {
    pub section: SectionType,
    pub heading: String,
    pub line_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declarations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_of_interest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<String>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        self.ethics.is_none() && self.conflict_of_interest.is_none() && self.funding.is_none()
    }
}

/// Output of section extraction. Every named field is either absent or non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literature_review: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declarations: Option<Declarations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appendices: Option<String>,
    /// Always the verbatim input text.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl StructuredDocument {
    pub fn from_content(content: &str) -> Self {
        Self { content: content.to_string(), ..Default::default() }
    }

    /// Mutable slot for a directly mapped text section.
    /// `References` and `Declarations` are not single text fields and return `None`.
    pub fn text_field_mut(&mut self, section: SectionType) -> Option<&mut Option<String>> {
        match section {
            SectionType::Abstract => Some(&mut self.abstract_text),
            SectionType::Introduction => Some(&mut self.introduction),
            SectionType::LiteratureReview => Some(&mut self.literature_review),
            SectionType::Methods => Some(&mut self.methods),
            SectionType::Results => Some(&mut self.results),
            SectionType::Discussion => Some(&mut self.discussion),
            SectionType::Conclusion => Some(&mut self.conclusion),
            SectionType::Acknowledgments => Some(&mut self.acknowledgments),
            SectionType::Appendices => Some(&mut self.appendices),
            SectionType::References | SectionType::Declarations => None,
        }
    }

    /// Names of the section fields that carry a value, in table order.
    pub fn populated_sections(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for section in SectionType::ALL {
            let present = match section {
                SectionType::Abstract => self.abstract_text.is_some(),
                SectionType::Introduction => self.introduction.is_some(),
                SectionType::LiteratureReview => self.literature_review.is_some(),
                SectionType::Methods => self.methods.is_some(),
                SectionType::Results => self.results.is_some(),
                SectionType::Discussion => self.discussion.is_some(),
                SectionType::Conclusion => self.conclusion.is_some(),
                SectionType::Acknowledgments => self.acknowledgments.is_some(),
                SectionType::References => self.references.is_some(),
                SectionType::Appendices => self.appendices.is_some(),
                SectionType::Declarations => self.declarations.as_ref().is_some_and(|d| !d.is_empty()),
            };
            if present {
                names.push(section.field_name());
            }
        }
        names
    }
}

/// AI-generated additions for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "enhancedKeywords")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub research_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedDocument {
    #[serde(flatten)]
    pub document: StructuredDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enhanced_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub research_questions: Vec<String>,
    pub ai_enhanced: bool,
}

impl EnhancedDocument {
    /// The base document unchanged, without AI fields.
    pub fn unenhanced(document: StructuredDocument) -> Self {
        Self {
            document,
            summary: None,
            enhanced_keywords: Vec::new(),
            research_questions: Vec::new(),
            ai_enhanced: false,
        }
    }

    pub fn with_enhancement(document: StructuredDocument, enhancement: Enhancement) -> Self {
        Self {
            document,
            summary: enhancement.summary.filter(|s| !s.trim().is_empty()),
            enhanced_keywords: enhancement.keywords,
            research_questions: enhancement.research_questions,
            ai_enhanced: true,
        }
    }
}
