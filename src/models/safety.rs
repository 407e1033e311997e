use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStatementType {
    BoxedWarning,
    Contraindication,
    Warning,
    Precaution,
    AdverseReaction,
}

impl SafetyStatementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyStatementType::BoxedWarning => "boxed_warning",
            SafetyStatementType::Contraindication => "contraindication",
            SafetyStatementType::Warning => "warning",
            SafetyStatementType::Precaution => "precaution",
            SafetyStatementType::AdverseReaction => "adverse_reaction",
        }
    }
}

impl std::str::FromStr for SafetyStatementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "boxed_warning" => Ok(SafetyStatementType::BoxedWarning),
            "contraindication" => Ok(SafetyStatementType::Contraindication),
            "warning" => Ok(SafetyStatementType::Warning),
            "precaution" => Ok(SafetyStatementType::Precaution),
            "adverse_reaction" => Ok(SafetyStatementType::AdverseReaction),
            other => Err(format!("unknown safety statement type '{}'", other)),
        }
    }
}

impl std::fmt::Display for SafetyStatementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelFilter {
    #[default]
    All,
    MissingRequired,
    Present,
}

// ============================================================================
// DATABASE MODELS
// ============================================================================

/// Regulatory statement from a brand's catalog. Type and severity are kept as
/// stored so unknown values from the catalog still flow through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct SafetyStatement {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub statement_text: String,
    pub statement_type: String,
    pub severity: String,
    pub fda_required: bool,
}

impl SafetyStatement {
    pub fn kind(&self) -> Option<SafetyStatementType> {
        self.statement_type.parse().ok()
    }

    pub fn is_critical(&self) -> bool {
        self.severity == "critical"
    }
}

// ============================================================================
// CHECK RESULTS
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresenceCheck {
    pub is_present: bool,
    pub matched_phrases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementCheck {
    #[serde(flatten)]
    pub statement: SafetyStatement,
    pub is_required: bool,
    pub is_present: bool,
    pub matched_phrases: Vec<String>,
}

impl StatementCheck {
    pub fn is_missing(&self) -> bool {
        self.is_required && !self.is_present
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetySummary {
    pub total: usize,
    pub required: usize,
    pub present: usize,
    pub missing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyPanelReport {
    pub detected_claim_types: Vec<crate::models::ClaimCategory>,
    pub summary: SafetySummary,
    pub filter: PanelFilter,
    pub statements: Vec<StatementCheck>,
}

// ============================================================================
// API REQUEST MODELS
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct PresenceCheckRequest {
    #[validate(length(min = 1, message = "Statement text is required"))]
    pub statement_text: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SafetyPanelRequest {
    pub brand_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub filter: PanelFilter,
    #[serde(default)]
    pub statement_types: Option<Vec<SafetyStatementType>>,
}
