use sqlx::{query_as, PgPool};
use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{SafetyStatement, SafetyStatementType};
use crate::repositories::SafetyStatementStore;

#[derive(Clone)]
pub struct SafetyStatementRepository {
    pool: PgPool,
}

impl SafetyStatementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SafetyStatementStore for SafetyStatementRepository {
    async fn find_safety_statements_by_brand(
        &self,
        brand_id: Uuid,
        statement_types: Option<&[SafetyStatementType]>,
    ) -> Result<Vec<SafetyStatement>> {
        let statements = match statement_types {
            Some(types) => {
                let types: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
                query_as::<_, SafetyStatement>(
                    r#"
                    SELECT id, brand_id, statement_text, statement_type, severity, fda_required
                    FROM safety_statements
                    WHERE brand_id = $1 AND statement_type = ANY($2)
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(brand_id)
                .bind(types)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                query_as::<_, SafetyStatement>(
                    r#"
                    SELECT id, brand_id, statement_text, statement_type, severity, fda_required
                    FROM safety_statements
                    WHERE brand_id = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(brand_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(statements)
    }
}
