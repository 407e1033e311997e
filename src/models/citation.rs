use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One distinct claim cited in a processed document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimUsage {
    pub claim_id: Uuid,
    pub claim_display_id: String,
    pub claim_text: String,
    /// Per-claim number, first-appearance order in the raw content.
    pub citation_number: u32,
    pub linked_references: Vec<String>,
}

/// One entry of the deduplicated reference list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceUsage {
    pub reference_id: Uuid,
    pub reference_display_id: String,
    pub citation_text: String,
    /// Position in the reference list, independent of claim citation numbers.
    pub citation_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedContent {
    pub content: String,
    pub claims_used: Vec<ClaimUsage>,
    pub references_used: Vec<ReferenceUsage>,
}

impl ProcessedContent {
    /// Content returned as-is with nothing cited.
    pub fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            claims_used: Vec::new(),
            references_used: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CitationValidation {
    pub valid: bool,
    pub expired_claims: Vec<Uuid>,
    pub scope_mismatches: Vec<Uuid>,
    pub missing_references: Vec<Uuid>,
}

/// Markup used for inline citation annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStyle {
    /// `<sup class="citation" data-claim-id="..">n</sup>`
    #[default]
    Html,
    /// `[n]`
    Bracket,
}

impl AnnotationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationStyle::Html => "html",
            AnnotationStyle::Bracket => "bracket",
        }
    }

    pub fn render(&self, claim_id: Uuid, citation_number: u32) -> String {
        match self {
            AnnotationStyle::Html => format!(
                r#"<sup class="citation" data-claim-id="{}">{}</sup>"#,
                claim_id, citation_number
            ),
            AnnotationStyle::Bracket => format!("[{}]", citation_number),
        }
    }
}

impl std::str::FromStr for AnnotationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "superscript" => Ok(AnnotationStyle::Html),
            "bracket" | "brackets" => Ok(AnnotationStyle::Bracket),
            other => Err(format!("unknown annotation style '{}'", other)),
        }
    }
}

impl std::fmt::Display for AnnotationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// API REQUEST/RESPONSE MODELS
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessContentRequest {
    pub brand_id: Uuid,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessContentResponse {
    #[serde(flatten)]
    pub processed: ProcessedContent,
    pub reference_list: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateCitationsRequest {
    pub claims_used: Vec<ClaimUsage>,
    #[validate(length(min = 1, message = "Asset type is required"))]
    pub asset_type: String,
    #[validate(length(min = 1, message = "Audience is required"))]
    pub audience: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_style_parsing() {
        assert_eq!("html".parse::<AnnotationStyle>().unwrap(), AnnotationStyle::Html);
        assert_eq!("Bracket".parse::<AnnotationStyle>().unwrap(), AnnotationStyle::Bracket);
        assert!("footnote".parse::<AnnotationStyle>().is_err());
    }

    #[test]
    fn test_annotation_rendering() {
        let id = Uuid::nil();
        assert_eq!(
            AnnotationStyle::Html.render(id, 3),
            r#"<sup class="citation" data-claim-id="00000000-0000-0000-0000-000000000000">3</sup>"#
        );
        assert_eq!(AnnotationStyle::Bracket.render(id, 12), "[12]");
    }
}
