use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Claim as resolved from an in-content marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimRecord {
    pub id: Uuid,
    pub display_id: String,
    pub claim_text: String,
    pub linked_references: Vec<Uuid>,
}

#[derive(Debug, FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub display_id: String,
    pub claim_text: Option<String>,
    pub linked_references: Option<Vec<Uuid>>,
}

impl From<ClaimRow> for ClaimRecord {
    fn from(row: ClaimRow) -> Self {
        Self {
            id: row.id,
            display_id: row.display_id,
            claim_text: row.claim_text.unwrap_or_default(),
            linked_references: row.linked_references.unwrap_or_default(),
        }
    }
}

/// Canonical expiration/scope data re-read by the citation validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimComplianceRecord {
    pub id: Uuid,
    pub display_id: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub approval_scope: Vec<String>,
    pub linked_references: Vec<Uuid>,
}

#[derive(Debug, FromRow)]
pub struct ClaimComplianceRow {
    pub id: Uuid,
    pub display_id: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub approval_scope: Option<Vec<String>>,
    pub linked_references: Option<Vec<Uuid>>,
}

impl From<ClaimComplianceRow> for ClaimComplianceRecord {
    fn from(row: ClaimComplianceRow) -> Self {
        Self {
            id: row.id,
            display_id: row.display_id,
            expiration_date: row.expiration_date,
            approval_scope: row.approval_scope.unwrap_or_default(),
            linked_references: row.linked_references.unwrap_or_default(),
        }
    }
}

/// Citable source backing one or more claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct ReferenceRecord {
    pub id: Uuid,
    pub display_id: Option<String>,
    pub formatted_citation: Option<String>,
    pub reference_text: Option<String>,
}

impl ReferenceRecord {
    /// Display id, falling back to the raw id.
    pub fn label(&self) -> String {
        match self.display_id.as_deref().map(str::trim) {
            Some(display_id) if !display_id.is_empty() => display_id.to_string(),
            _ => self.id.to_string(),
        }
    }

    /// Formatted citation, falling back to the raw reference text.
    pub fn citation_text(&self) -> String {
        self.formatted_citation
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .or(self.reference_text.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_row_defaults_missing_references() {
        let id = Uuid::new_v4();
        let record: ClaimRecord = ClaimRow {
            id,
            display_id: "CML-100".to_string(),
            claim_text: None,
            linked_references: None,
        }
        .into();

        assert_eq!(record.id, id);
        assert_eq!(record.claim_text, "");
        assert!(record.linked_references.is_empty());
    }

    #[test]
    fn test_reference_label_falls_back_to_id() {
        let id = Uuid::new_v4();
        let reference = ReferenceRecord {
            id,
            display_id: None,
            formatted_citation: None,
            reference_text: Some("Smith J. Lancet. 2021".to_string()),
        };

        assert_eq!(reference.label(), id.to_string());
        assert_eq!(reference.citation_text(), "Smith J. Lancet. 2021");
    }

    #[test]
    fn test_reference_prefers_formatted_citation() {
        let reference = ReferenceRecord {
            id: Uuid::new_v4(),
            display_id: Some("REF-7".to_string()),
            formatted_citation: Some("Doe A, et al. NEJM. 2020;382:1-10.".to_string()),
            reference_text: Some("doe 2020".to_string()),
        };

        assert_eq!(reference.label(), "REF-7");
        assert_eq!(reference.citation_text(), "Doe A, et al. NEJM. 2020;382:1-10.");
    }
}
