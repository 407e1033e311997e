use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{
    ClaimComplianceRecord, ClaimRecord, ReferenceRecord, SafetyStatement, SafetyStatementType,
};
use crate::repositories::{
    ClaimRepository, ClaimStore, SafetyStatementRepository, SafetyStatementStore,
};

/// PostgreSQL-backed store shared by all handlers.
#[derive(Clone)]
pub struct PgStore {
    claims: ClaimRepository,
    statements: SafetyStatementRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            claims: ClaimRepository::new(pool.clone()),
            statements: SafetyStatementRepository::new(pool),
        }
    }
}

impl ClaimStore for PgStore {
    async fn find_claims_by_display_ids(
        &self,
        brand_id: Uuid,
        display_ids: &[String],
    ) -> Result<Vec<ClaimRecord>> {
        self.claims.find_claims_by_display_ids(brand_id, display_ids).await
    }

    async fn find_references_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ReferenceRecord>> {
        self.claims.find_references_by_ids(ids).await
    }

    async fn find_claims_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ClaimComplianceRecord>> {
        self.claims.find_claims_by_ids(ids).await
    }
}

impl SafetyStatementStore for PgStore {
    async fn find_safety_statements_by_brand(
        &self,
        brand_id: Uuid,
        statement_types: Option<&[SafetyStatementType]>,
    ) -> Result<Vec<SafetyStatement>> {
        self.statements
            .find_safety_statements_by_brand(brand_id, statement_types)
            .await
    }
}
