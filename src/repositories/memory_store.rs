use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::middleware::error_handling::{AppError, Result};
use crate::models::{
    ClaimComplianceRecord, ClaimRecord, ReferenceRecord, SafetyStatement, SafetyStatementType,
};
use crate::repositories::{ClaimStore, SafetyStatementStore};

/// Claim row as held by [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct StoredClaim {
    pub brand_id: Uuid,
    pub id: Uuid,
    pub display_id: String,
    pub claim_text: String,
    pub linked_references: Vec<Uuid>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub approval_scope: Vec<String>,
}

impl StoredClaim {
    pub fn new(brand_id: Uuid, display_id: &str, claim_text: &str) -> Self {
        Self {
            brand_id,
            id: Uuid::new_v4(),
            display_id: display_id.to_string(),
            claim_text: claim_text.to_string(),
            linked_references: Vec::new(),
            expiration_date: None,
            approval_scope: Vec::new(),
        }
    }

    pub fn linking(mut self, references: &[Uuid]) -> Self {
        self.linked_references = references.to_vec();
        self
    }

    pub fn expiring(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn scoped_to(mut self, scope: &[&str]) -> Self {
        self.approval_scope = scope.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// In-process store for tests. Lookups can be switched to fail
/// to exercise degraded paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    claims: Vec<StoredClaim>,
    references: HashMap<Uuid, ReferenceRecord>,
    statements: Vec<SafetyStatement>,
    fail_claim_lookups: bool,
    fail_reference_lookups: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claim(mut self, claim: StoredClaim) -> Self {
        self.claims.push(claim);
        self
    }

    pub fn with_reference(mut self, reference: ReferenceRecord) -> Self {
        self.references.insert(reference.id, reference);
        self
    }

    pub fn with_statement(mut self, statement: SafetyStatement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn failing_claim_lookups(mut self) -> Self {
        self.fail_claim_lookups = true;
        self
    }

    pub fn failing_reference_lookups(mut self) -> Self {
        self.fail_reference_lookups = true;
        self
    }

    fn unavailable(what: &str) -> AppError {
        AppError::StoreUnavailable(format!("{} lookup failed", what))
    }
}

impl ClaimStore for InMemoryStore {
    async fn find_claims_by_display_ids(
        &self,
        brand_id: Uuid,
        display_ids: &[String],
    ) -> Result<Vec<ClaimRecord>> {
        if self.fail_claim_lookups {
            return Err(Self::unavailable("claim"));
        }

        Ok(self
            .claims
            .iter()
            .filter(|c| c.brand_id == brand_id && display_ids.contains(&c.display_id))
            .map(|c| ClaimRecord {
                id: c.id,
                display_id: c.display_id.clone(),
                claim_text: c.claim_text.clone(),
                linked_references: c.linked_references.clone(),
            })
            .collect())
    }

    async fn find_references_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ReferenceRecord>> {
        if self.fail_reference_lookups {
            return Err(Self::unavailable("reference"));
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.references.get(id).cloned())
            .collect())
    }

    async fn find_claims_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ClaimComplianceRecord>> {
        if self.fail_claim_lookups {
            return Err(Self::unavailable("claim"));
        }

        Ok(self
            .claims
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| ClaimComplianceRecord {
                id: c.id,
                display_id: c.display_id.clone(),
                expiration_date: c.expiration_date,
                approval_scope: c.approval_scope.clone(),
                linked_references: c.linked_references.clone(),
            })
            .collect())
    }
}

impl SafetyStatementStore for InMemoryStore {
    async fn find_safety_statements_by_brand(
        &self,
        brand_id: Uuid,
        statement_types: Option<&[SafetyStatementType]>,
    ) -> Result<Vec<SafetyStatement>> {
        Ok(self
            .statements
            .iter()
            .filter(|s| s.brand_id == brand_id)
            .filter(|s| match statement_types {
                Some(types) => s.kind().map_or(false, |kind| types.contains(&kind)),
                None => true,
            })
            .cloned()
            .collect())
    }
}
