use std::future::Future;

use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{
    ClaimComplianceRecord, ClaimRecord, ReferenceRecord, SafetyStatement, SafetyStatementType,
};

/// Read-only access to a brand's claim and reference catalog.
///
/// Futures are `Send` so services generic over the store can run inside axum
/// handlers.
pub trait ClaimStore: Send + Sync {
    /// Batch lookup of claims by display id, scoped to one brand.
    fn find_claims_by_display_ids(
        &self,
        brand_id: Uuid,
        display_ids: &[String],
    ) -> impl Future<Output = Result<Vec<ClaimRecord>>> + Send;

    fn find_references_by_ids(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<ReferenceRecord>>> + Send;

    /// Fresh read of expiration, scope and linked references by internal id.
    fn find_claims_by_ids(
        &self,
        ids: &[Uuid],
    ) -> impl Future<Output = Result<Vec<ClaimComplianceRecord>>> + Send;
}

pub trait SafetyStatementStore: Send + Sync {
    /// All statements for a brand, optionally restricted to some statement types.
    fn find_safety_statements_by_brand(
        &self,
        brand_id: Uuid,
        statement_types: Option<&[SafetyStatementType]>,
    ) -> impl Future<Output = Result<Vec<SafetyStatement>>> + Send;
}
