use sqlx::{query_as, PgPool};
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{
    ClaimComplianceRecord, ClaimComplianceRow, ClaimRecord, ClaimRow, ReferenceRecord,
};
use crate::repositories::ClaimStore;

#[derive(Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ClaimStore for ClaimRepository {
    async fn find_claims_by_display_ids(
        &self,
        brand_id: Uuid,
        display_ids: &[String],
    ) -> Result<Vec<ClaimRecord>> {
        if display_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = query_as::<_, ClaimRow>(
            r#"
            SELECT id, display_id, claim_text, linked_references
            FROM claims
            WHERE brand_id = $1 AND display_id = ANY($2)
            "#,
        )
        .bind(brand_id)
        .bind(display_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_references_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ReferenceRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let references = query_as::<_, ReferenceRecord>(
            r#"
            SELECT id, display_id, formatted_citation, reference_text
            FROM evidence_references
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(references)
    }

    async fn find_claims_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ClaimComplianceRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = query_as::<_, ClaimComplianceRow>(
            r#"
            SELECT id, display_id, expiration_date, approval_scope, linked_references
            FROM claims
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
