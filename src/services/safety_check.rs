//! Safety statement presence checking
//!
//! Regulatory statements are often paraphrased when placed into marketing
//! copy, so each clause is matched verbatim first and then by any run of three
//! significant words.

use uuid::Uuid;

use crate::middleware::error_handling::Result;
use crate::models::{
    ClaimCategory, PanelFilter, PresenceCheck, SafetyPanelReport, SafetyStatement,
    SafetyStatementType, SafetySummary, StatementCheck,
};
use crate::repositories::SafetyStatementStore;
use crate::services::claim_detection::{analyze_content, is_statement_required_for_claims};

/// Clauses must be longer than this (in chars) to be checked at all.
const MIN_PHRASE_CHARS: usize = 15;
/// Words must be longer than this to count toward a window.
const MIN_WORD_CHARS: usize = 3;
const WINDOW_WORDS: usize = 3;

const CLAUSE_SEPARATORS: [char; 5] = ['.', ',', ';', ':', '\n'];

fn candidate_phrases(statement_text: &str) -> impl Iterator<Item = &str> {
    statement_text
        .split(CLAUSE_SEPARATORS)
        .map(str::trim)
        .filter(|phrase| phrase.chars().count() > MIN_PHRASE_CHARS)
}

fn first_matching_window(phrase: &str, lowered_content: &str) -> Option<String> {
    let words: Vec<&str> = phrase
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_WORD_CHARS)
        .collect();

    if words.len() < WINDOW_WORDS {
        return None;
    }

    words
        .windows(WINDOW_WORDS)
        .map(|window| window.join(" "))
        .find(|window| lowered_content.contains(window.as_str()))
}

/// Determine whether a safety statement appears in content.
pub fn check_presence(statement_text: &str, content: &str) -> PresenceCheck {
    presence_in_lowered(statement_text, &content.to_lowercase())
}

/// `check_presence` over content that is already lowercased.
fn presence_in_lowered(statement_text: &str, lowered_content: &str) -> PresenceCheck {
    let mut matched_phrases: Vec<String> = Vec::new();

    for phrase in candidate_phrases(statement_text) {
        let lowered_phrase = phrase.to_lowercase();

        let matched = if lowered_content.contains(&lowered_phrase) {
            Some(phrase.to_string())
        } else {
            first_matching_window(&lowered_phrase, lowered_content)
        };

        if let Some(matched) = matched {
            if !matched_phrases.contains(&matched) {
                matched_phrases.push(matched);
            }
        }
    }

    PresenceCheck {
        is_present: !matched_phrases.is_empty(),
        matched_phrases,
    }
}

/// Evaluate one statement against content and the claim categories found in it.
pub fn check_statement(
    statement: SafetyStatement,
    content: &str,
    detected_categories: &[ClaimCategory],
) -> StatementCheck {
    check_statement_lowered(statement, &content.to_lowercase(), detected_categories)
}

fn check_statement_lowered(
    statement: SafetyStatement,
    lowered_content: &str,
    detected_categories: &[ClaimCategory],
) -> StatementCheck {
    let required_by_claims = statement
        .kind()
        .map_or(false, |kind| is_statement_required_for_claims(kind, detected_categories));
    let is_required = statement.fda_required || statement.is_critical() || required_by_claims;
    let presence = presence_in_lowered(&statement.statement_text, lowered_content);

    StatementCheck {
        statement,
        is_required,
        is_present: presence.is_present,
        matched_phrases: presence.matched_phrases,
    }
}

/// Build the panel for a statement catalog. The summary always covers the
/// whole catalog; only the statement list is narrowed by `filter`.
pub fn evaluate_panel(
    statements: Vec<SafetyStatement>,
    content: &str,
    filter: PanelFilter,
) -> SafetyPanelReport {
    let detected_claim_types = analyze_content(content).detected_types;
    let lowered_content = content.to_lowercase();

    let checks: Vec<StatementCheck> = statements
        .into_iter()
        .map(|statement| check_statement_lowered(statement, &lowered_content, &detected_claim_types))
        .collect();

    let summary = summarize(&checks);

    SafetyPanelReport {
        detected_claim_types,
        summary,
        filter,
        statements: checks
            .into_iter()
            .filter(|check| matches_filter(check, filter))
            .collect(),
    }
}

pub struct SafetyPanelService<'a, S> {
    store: &'a S,
}

impl<'a, S: SafetyStatementStore> SafetyPanelService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn build_panel(
        &self,
        brand_id: Uuid,
        content: &str,
        statement_types: Option<&[SafetyStatementType]>,
        filter: PanelFilter,
    ) -> Result<SafetyPanelReport> {
        let statements = self
            .store
            .find_safety_statements_by_brand(brand_id, statement_types)
            .await?;

        let report = evaluate_panel(statements, content, filter);

        tracing::info!(
            brand_id = %brand_id,
            total = report.summary.total,
            required = report.summary.required,
            missing = report.summary.missing,
            "Safety panel evaluated"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(text: &str, statement_type: &str, severity: &str, fda_required: bool) -> SafetyStatement {
        SafetyStatement {
            id: Uuid::new_v4(),
            brand_id: Uuid::nil(),
            statement_text: text.to_string(),
            statement_type: statement_type.to_string(),
            severity: severity.to_string(),
            fda_required,
        }
    }

    #[test]
    fn test_window_fallback_detects_paraphrase() {
        let check = check_presence(
            "Risk of serious adverse events including hepatotoxicity.",
            "Data show there is a risk of serious adverse events in some patients.",
        );

        assert!(check.is_present);
        assert_eq!(check.matched_phrases, vec!["serious adverse events"]);
    }

    #[test]
    fn test_exact_clause_match_is_case_insensitive() {
        let check = check_presence(
            "Do not use in patients with severe renal impairment; monitor liver enzymes.",
            "DO NOT USE IN PATIENTS WITH SEVERE RENAL IMPAIRMENT.",
        );

        assert!(check.is_present);
        assert_eq!(
            check.matched_phrases,
            vec!["Do not use in patients with severe renal impairment"]
        );
    }

    #[test]
    fn test_short_clauses_are_ignored() {
        let check = check_presence("May cause rash.", "may cause rash");

        assert!(!check.is_present);
        assert!(check.matched_phrases.is_empty());
    }

    #[test]
    fn test_window_requires_three_significant_words() {
        // "serious" and "harm" are the only words over three chars
        let check = check_presence("It is a serious harm to us all", "a serious harm");

        assert!(!check.is_present);
    }

    #[test]
    fn test_duplicate_matches_collapse() {
        let check = check_presence(
            "Contact your doctor immediately. Contact your doctor immediately.",
            "Please contact your doctor immediately if symptoms occur.",
        );

        assert_eq!(check.matched_phrases, vec!["Contact your doctor immediately"]);
    }

    #[test]
    fn test_absent_statement() {
        let check = check_presence(
            "Serious infections leading to hospitalization have occurred.",
            "Our product helps you get back to the things you love.",
        );

        assert!(!check.is_present);
    }

    #[test]
    fn test_required_by_flags_and_claims() {
        let content = "Proven effective in adults.";
        let categories = analyze_content(content).detected_types;

        let fda = check_statement(statement("Irrelevant statement text here", "other", "low", true), content, &categories);
        let critical = check_statement(statement("Irrelevant statement text here", "other", "critical", false), content, &categories);
        let by_claims = check_statement(statement("Irrelevant statement text here", "boxed_warning", "low", false), content, &categories);
        let optional = check_statement(statement("Irrelevant statement text here", "contraindication", "low", false), content, &categories);

        assert!(fda.is_required);
        assert!(critical.is_required);
        assert!(by_claims.is_required);
        assert!(!optional.is_required);
    }

    #[test]
    fn test_panel_matches_mixed_case_copy() {
        let statements = vec![statement(
            "Serious adverse events have been reported.",
            "adverse_reaction",
            "critical",
            false,
        )];
        let content = "Monitor for SERIOUS ADVERSE EVENTS during therapy.";

        let panel = evaluate_panel(statements, content, PanelFilter::Present);

        assert_eq!(panel.statements.len(), 1);
        assert!(panel.statements[0].is_required);
        assert_eq!(panel.statements[0].matched_phrases, vec!["serious adverse events"]);
        assert_eq!(
            panel.summary,
            SafetySummary { total: 1, required: 1, present: 1, missing: 0 }
        );
    }

    #[test]
    fn test_panel_summary_and_filters() {
        let statements = vec![
            statement("Serious liver injury has been reported with use of this product.", "boxed_warning", "critical", true),
            statement("Common adverse reactions include headache and mild nausea.", "adverse_reaction", "medium", false),
            statement("Avoid use during pregnancy unless clearly needed.", "precaution", "low", false),
        ];
        let content = "Proven effective. Common adverse reactions include headache and mild nausea.";

        let all = evaluate_panel(statements.clone(), content, PanelFilter::All);
        assert_eq!(
            all.summary,
            SafetySummary { total: 3, required: 3, present: 1, missing: 2 }
        );
        assert_eq!(all.statements.len(), 3);

        let missing = evaluate_panel(statements.clone(), content, PanelFilter::MissingRequired);
        assert_eq!(missing.summary, all.summary);
        assert_eq!(missing.statements.len(), 2);
        assert!(missing.statements.iter().all(|c| c.is_required && !c.is_present));

        let present = evaluate_panel(statements, content, PanelFilter::Present);
        assert_eq!(present.statements.len(), 1);
        assert_eq!(present.statements[0].statement.statement_type, "adverse_reaction");
    }
}
