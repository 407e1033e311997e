//! Post-hoc validation of the claims cited in a document.
//!
//! Claim data is re-read from the store rather than trusted from the usage
//! records. Findings are reported as data; callers decide whether they block
//! publication.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{CitationValidation, ClaimComplianceRecord, ClaimUsage};
use crate::repositories::ClaimStore;

/// Scope entry that approves a claim for every asset type and audience.
const UNIVERSAL_SCOPE: &str = "all";

pub fn is_expired(claim: &ClaimComplianceRecord, now: DateTime<Utc>) -> bool {
    claim.expiration_date.map_or(false, |expires| expires < now)
}

pub fn is_out_of_scope(claim: &ClaimComplianceRecord, asset_type: &str, audience: &str) -> bool {
    !claim.approval_scope.is_empty()
        && !claim
            .approval_scope
            .iter()
            .any(|scope| scope == asset_type || scope == audience || scope == UNIVERSAL_SCOPE)
}

pub fn lacks_references(claim: &ClaimComplianceRecord) -> bool {
    claim.linked_references.is_empty()
}

pub struct CitationValidator<'a, S> {
    store: &'a S,
}

impl<'a, S: ClaimStore> CitationValidator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn validate_citations(
        &self,
        claims_used: &[ClaimUsage],
        asset_type: &str,
        audience: &str,
    ) -> Result<CitationValidation> {
        self.validate_citations_at(claims_used, asset_type, audience, Utc::now())
            .await
    }

    /// Validate against an explicit clock.
    pub async fn validate_citations_at(
        &self,
        claims_used: &[ClaimUsage],
        asset_type: &str,
        audience: &str,
        now: DateTime<Utc>,
    ) -> Result<CitationValidation> {
        let mut claim_ids: Vec<Uuid> = Vec::new();
        for usage in claims_used {
            if !claim_ids.contains(&usage.claim_id) {
                claim_ids.push(usage.claim_id);
            }
        }

        if claim_ids.is_empty() {
            return Ok(CitationValidation {
                valid: true,
                ..Default::default()
            });
        }

        let records = self.store.find_claims_by_ids(&claim_ids).await?;

        let mut report = CitationValidation::default();
        for claim_id in &claim_ids {
            let Some(claim) = records.iter().find(|r| r.id == *claim_id) else {
                tracing::warn!(claim_id = %claim_id, "Cited claim no longer in store, skipping validation");
                continue;
            };

            if is_expired(claim, now) {
                report.expired_claims.push(claim.id);
            }
            if is_out_of_scope(claim, asset_type, audience) {
                report.scope_mismatches.push(claim.id);
            }
            if lacks_references(claim) {
                report.missing_references.push(claim.id);
            }
        }

        report.valid = report.expired_claims.is_empty()
            && report.scope_mismatches.is_empty()
            && report.missing_references.is_empty();

        if !report.valid {
            tracing::info!(
                expired = report.expired_claims.len(),
                scope_mismatches = report.scope_mismatches.len(),
                missing_references = report.missing_references.len(),
                "Citation validation found issues"
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryStore, StoredClaim};
    use chrono::Duration;

    fn usage(claim: &StoredClaim, citation_number: u32) -> ClaimUsage {
        ClaimUsage {
            claim_id: claim.id,
            claim_display_id: claim.display_id.clone(),
            claim_text: claim.claim_text.clone(),
            citation_number,
            linked_references: Vec::new(),
        }
    }

    fn record(scope: &[&str]) -> ClaimComplianceRecord {
        ClaimComplianceRecord {
            id: Uuid::new_v4(),
            display_id: "CML-1".to_string(),
            expiration_date: None,
            approval_scope: scope.iter().map(|s| s.to_string()).collect(),
            linked_references: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn test_scope_rules() {
        assert!(!is_out_of_scope(&record(&[]), "email", "hcp"));
        assert!(!is_out_of_scope(&record(&["all"]), "email", "hcp"));
        assert!(!is_out_of_scope(&record(&["banner", "hcp"]), "email", "hcp"));
        assert!(!is_out_of_scope(&record(&["email"]), "email", "patient"));
        assert!(is_out_of_scope(&record(&["banner", "patient"]), "email", "hcp"));
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let mut claim = record(&[]);

        claim.expiration_date = Some(now);
        assert!(!is_expired(&claim, now));

        claim.expiration_date = Some(now - Duration::seconds(1));
        assert!(is_expired(&claim, now));

        claim.expiration_date = None;
        assert!(!is_expired(&claim, now));
    }

    #[tokio::test]
    async fn test_expired_claim_fails_validation() {
        let brand = Uuid::new_v4();
        let now = Utc::now();
        let expired = StoredClaim::new(brand, "CML-OLD", "Old claim")
            .linking(&[Uuid::new_v4()])
            .expiring(now - Duration::days(1));
        let current = StoredClaim::new(brand, "CML-NEW", "Current claim")
            .linking(&[Uuid::new_v4()])
            .expiring(now + Duration::days(30));
        let store = InMemoryStore::new()
            .with_claim(expired.clone())
            .with_claim(current.clone());

        let report = CitationValidator::new(&store)
            .validate_citations_at(&[usage(&expired, 1), usage(&current, 2)], "email", "hcp", now)
            .await
            .unwrap();

        assert!(!report.valid);
        assert_eq!(report.expired_claims, vec![expired.id]);
        assert!(report.scope_mismatches.is_empty());
        assert!(report.missing_references.is_empty());
    }

    #[tokio::test]
    async fn test_reports_scope_and_reference_problems() {
        let brand = Uuid::new_v4();
        let out_of_scope = StoredClaim::new(brand, "CML-1", "Banner only")
            .linking(&[Uuid::new_v4()])
            .scoped_to(&["banner"]);
        let unreferenced = StoredClaim::new(brand, "CML-2", "No evidence");
        let store = InMemoryStore::new()
            .with_claim(out_of_scope.clone())
            .with_claim(unreferenced.clone());

        let report = CitationValidator::new(&store)
            .validate_citations(&[usage(&out_of_scope, 1), usage(&unreferenced, 2)], "email", "hcp")
            .await
            .unwrap();

        assert!(!report.valid);
        assert_eq!(report.scope_mismatches, vec![out_of_scope.id]);
        assert_eq!(report.missing_references, vec![unreferenced.id]);
    }

    #[tokio::test]
    async fn test_clean_citations_are_valid() {
        let brand = Uuid::new_v4();
        let claim = StoredClaim::new(brand, "CML-1", "Fine")
            .linking(&[Uuid::new_v4()])
            .scoped_to(&["all"]);
        let store = InMemoryStore::new().with_claim(claim.clone());

        let report = CitationValidator::new(&store)
            .validate_citations(&[usage(&claim, 1)], "email", "hcp")
            .await
            .unwrap();

        assert_eq!(
            report,
            CitationValidation {
                valid: true,
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let claim = StoredClaim::new(Uuid::new_v4(), "CML-1", "Fine");
        let store = InMemoryStore::new().with_claim(claim.clone()).failing_claim_lookups();

        let result = CitationValidator::new(&store)
            .validate_citations(&[usage(&claim, 1)], "email", "hcp")
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_claims_is_valid() {
        let store = InMemoryStore::new().failing_claim_lookups();

        let report = CitationValidator::new(&store)
            .validate_citations(&[], "email", "hcp")
            .await
            .unwrap();

        assert!(report.valid);
    }
}
