//! Claim citation processing
//!
//! Rewrites generated content carrying `[CLAIM:CML-xxxx]` markers into content
//! with inline citation annotations, and builds the ordered claim and
//! reference lists that accompany it.
//!
//! Two numbering schemes are in play and must not be conflated:
//! - citation numbers belong to claims, in order of first appearance in the
//!   raw content;
//! - reference numbers belong to references, in the order each reference is
//!   first added while walking claims in citation order.
//!
//! Rendering is best-effort. Any store failure, or a lookup that resolves no
//! claims, returns the raw content untouched.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use uuid::Uuid;

use crate::middleware::metrics::{record_citation_outcome, record_unresolved_markers, CitationOutcome};
use crate::models::{
    AnnotationStyle, ClaimRecord, ClaimUsage, ProcessedContent, ReferenceRecord, ReferenceUsage,
};
use crate::repositories::ClaimStore;
use crate::utils::log_sanitizer::{preview_for_log, sanitize_ids_for_log};

static CLAIM_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[CLAIM:(CML-[A-Za-z0-9]+)\]").unwrap());

/// Distinct claim display ids referenced by markers, in first-appearance order.
pub fn extract_claim_markers(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut display_ids = Vec::new();

    for caps in CLAIM_MARKER_REGEX.captures_iter(content) {
        let display_id = &caps[1];
        if seen.insert(display_id.to_string()) {
            display_ids.push(display_id.to_string());
        }
    }

    display_ids
}

/// Render the reference list as numbered lines, one per reference.
pub fn format_reference_list(references: &[ReferenceUsage]) -> String {
    references
        .iter()
        .map(|r| format!("{}. {}", r.citation_number, r.citation_text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Citation numbering and list building over already-resolved claims.
///
/// `display_ids` must be in first-appearance order. Ids with no resolved
/// claim are skipped and consume no number.
fn assign_citations(
    display_ids: &[String],
    claims: &HashMap<&str, &ClaimRecord>,
    references: &HashMap<Uuid, ReferenceRecord>,
) -> (Vec<ClaimUsage>, Vec<ReferenceUsage>) {
    let mut claims_used: Vec<ClaimUsage> = Vec::new();
    let mut references_used: Vec<ReferenceUsage> = Vec::new();

    for display_id in display_ids {
        let Some(claim) = claims.get(display_id.as_str()) else {
            continue;
        };

        let citation_number = claims_used.len() as u32 + 1;
        let mut linked_references: Vec<String> = Vec::new();

        for reference_id in &claim.linked_references {
            let Some(reference) = references.get(reference_id) else {
                continue;
            };

            if !references_used.iter().any(|r| r.reference_id == reference.id) {
                let reference_number = references_used.len() as u32 + 1;
                references_used.push(ReferenceUsage {
                    reference_id: reference.id,
                    reference_display_id: reference.label(),
                    citation_text: reference.citation_text(),
                    citation_number: reference_number,
                });
            }

            let label = reference.label();
            if !linked_references.contains(&label) {
                linked_references.push(label);
            }
        }

        claims_used.push(ClaimUsage {
            claim_id: claim.id,
            claim_display_id: claim.display_id.clone(),
            claim_text: claim.claim_text.clone(),
            citation_number,
            linked_references,
        });
    }

    references_used.sort_by_key(|r| r.citation_number);

    (claims_used, references_used)
}

/// Replace every resolvable marker occurrence; leave the rest verbatim.
fn annotate(raw_content: &str, citations: &HashMap<&str, (Uuid, u32)>, style: AnnotationStyle) -> String {
    CLAIM_MARKER_REGEX
        .replace_all(raw_content, |caps: &Captures| match citations.get(&caps[1]) {
            Some((claim_id, citation_number)) => style.render(*claim_id, *citation_number),
            None => caps[0].to_string(),
        })
        .into_owned()
}

pub struct CitationProcessor<'a, S> {
    store: &'a S,
    annotation_style: AnnotationStyle,
}

impl<'a, S: ClaimStore> CitationProcessor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            annotation_style: AnnotationStyle::default(),
        }
    }

    pub fn with_annotation_style(mut self, annotation_style: AnnotationStyle) -> Self {
        self.annotation_style = annotation_style;
        self
    }

    /// Resolve claim markers in `raw_content` against a brand's claims.
    ///
    /// Never fails: store errors and empty resolutions return the content
    /// unchanged with empty claim/reference lists.
    pub async fn process_content(&self, brand_id: Uuid, raw_content: &str) -> ProcessedContent {
        let display_ids = extract_claim_markers(raw_content);
        if display_ids.is_empty() {
            record_citation_outcome(CitationOutcome::NoMarkers);
            return ProcessedContent::unchanged(raw_content);
        }

        let claims = match self
            .store
            .find_claims_by_display_ids(brand_id, &display_ids)
            .await
        {
            Ok(claims) if !claims.is_empty() => claims,
            Ok(_) => {
                tracing::warn!(
                    brand_id = %brand_id,
                    markers = %sanitize_ids_for_log(&display_ids),
                    "No claims resolved for markers, returning content unchanged"
                );
                record_citation_outcome(CitationOutcome::NoClaimsFound);
                record_unresolved_markers(display_ids.len());
                return ProcessedContent::unchanged(raw_content);
            }
            Err(e) => {
                tracing::warn!(
                    brand_id = %brand_id,
                    content = %preview_for_log(raw_content),
                    "Claim lookup failed, returning content unchanged: {}", e
                );
                record_citation_outcome(CitationOutcome::StoreError);
                return ProcessedContent::unchanged(raw_content);
            }
        };

        let claims_by_display_id: HashMap<&str, &ClaimRecord> = claims
            .iter()
            .map(|claim| (claim.display_id.as_str(), claim))
            .collect();

        let mut reference_ids: Vec<Uuid> = Vec::new();
        let mut seen_references = HashSet::new();
        for display_id in &display_ids {
            if let Some(claim) = claims_by_display_id.get(display_id.as_str()) {
                for reference_id in &claim.linked_references {
                    if seen_references.insert(*reference_id) {
                        reference_ids.push(*reference_id);
                    }
                }
            }
        }

        let references: HashMap<Uuid, ReferenceRecord> = if reference_ids.is_empty() {
            HashMap::new()
        } else {
            match self.store.find_references_by_ids(&reference_ids).await {
                Ok(references) => references.into_iter().map(|r| (r.id, r)).collect(),
                Err(e) => {
                    tracing::warn!(
                        brand_id = %brand_id,
                        reference_count = reference_ids.len(),
                        "Reference lookup failed, returning content unchanged: {}", e
                    );
                    record_citation_outcome(CitationOutcome::StoreError);
                    return ProcessedContent::unchanged(raw_content);
                }
            }
        };

        let (claims_used, references_used) =
            assign_citations(&display_ids, &claims_by_display_id, &references);

        let citations: HashMap<&str, (Uuid, u32)> = claims_used
            .iter()
            .map(|usage| (usage.claim_display_id.as_str(), (usage.claim_id, usage.citation_number)))
            .collect();

        let unresolved: Vec<&String> = display_ids
            .iter()
            .filter(|id| !citations.contains_key(id.as_str()))
            .collect();
        if !unresolved.is_empty() {
            tracing::debug!(
                brand_id = %brand_id,
                unresolved = %sanitize_ids_for_log(&unresolved),
                "Leaving unresolved claim markers in place"
            );
        }
        record_unresolved_markers(unresolved.len());

        let content = annotate(raw_content, &citations, self.annotation_style);

        tracing::info!(
            brand_id = %brand_id,
            claims = claims_used.len(),
            references = references_used.len(),
            "Claim citations applied"
        );
        record_citation_outcome(CitationOutcome::Annotated);

        ProcessedContent {
            content,
            claims_used,
            references_used,
        }
    }
}
