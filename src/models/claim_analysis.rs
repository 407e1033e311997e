use serde::{Deserialize, Serialize};
use crate::models::safety::SafetyStatementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    Efficacy,
    Safety,
    Comparative,
    Dosing,
    Indication,
    Mechanism,
    Tolerability,
}

impl ClaimCategory {
    pub const ALL: [ClaimCategory; 7] = [
        ClaimCategory::Efficacy,
        ClaimCategory::Safety,
        ClaimCategory::Comparative,
        ClaimCategory::Dosing,
        ClaimCategory::Indication,
        ClaimCategory::Mechanism,
        ClaimCategory::Tolerability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Efficacy => "efficacy",
            ClaimCategory::Safety => "safety",
            ClaimCategory::Comparative => "comparative",
            ClaimCategory::Dosing => "dosing",
            ClaimCategory::Indication => "indication",
            ClaimCategory::Mechanism => "mechanism",
            ClaimCategory::Tolerability => "tolerability",
        }
    }
}

impl std::fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distinct phrases that triggered one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryMatch {
    #[serde(rename = "type")]
    pub claim_type: ClaimCategory,
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimAnalysis {
    pub detected_types: Vec<ClaimCategory>,
    /// 0..=100
    pub confidence: u8,
    pub matches: Vec<CategoryMatch>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeContentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeContentResponse {
    #[serde(flatten)]
    pub analysis: ClaimAnalysis,
    pub required_safety_types: Vec<SafetyStatementType>,
}
