//! Claim classification for promotional copy
//!
//! Sorts free text into the seven claim categories MLR review cares about and
//! maps detected categories to the safety statement types that must accompany
//! them.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::models::{CategoryMatch, ClaimAnalysis, ClaimCategory, SafetyStatementType};

/// Distinct matched phrases at which confidence saturates.
const CONFIDENCE_SATURATION: f64 = 5.0;

static CLAIM_PATTERNS: Lazy<Vec<(ClaimCategory, Vec<Regex>)>> = Lazy::new(|| {
    ClaimCategory::ALL
        .iter()
        .map(|category| {
            let patterns = pattern_sources(*category)
                .iter()
                .map(|source| {
                    RegexBuilder::new(source)
                        .case_insensitive(true)
                        .build()
                        .unwrap()
                })
                .collect();
            (*category, patterns)
        })
        .collect()
});

fn pattern_sources(category: ClaimCategory) -> &'static [&'static str] {
    match category {
        ClaimCategory::Efficacy => &[
            r"\b(?:clinically\s+)?proven\b",
            r"\beffective(?:ness)?\b",
            r"\befficacy\b",
            r"\b(?:significant(?:ly)?|meaningful(?:ly)?)\s+(?:improve(?:d|ment|s)?|reduc(?:ed|tion|es))\b",
            r"\b(?:response|remission|cure)\s+rates?\b",
            r"\b\d+(?:\.\d+)?\s*%\s+of\s+patients\b",
        ],
        ClaimCategory::Safety => &[
            r"\bside[\s-]effects?\b",
            r"\bsafety\s+profile\b",
            r"\badverse\s+(?:events?|reactions?|effects?)\b",
            r"\b(?:safe|safely|safer)\b",
            r"\b(?:low|minimal|reduced)\s+risk\b",
            r"\bno\s+(?:serious|significant)\s+(?:risks?|complications?)\b",
        ],
        ClaimCategory::Comparative => &[
            r"\b(?:better|superior|more\s+effective)\s+(?:than|to)\b",
            r"\bcompared\s+(?:to|with)\b",
            r"\bversus\b",
            r"\bvs\b",
            r"\boutperform(?:s|ed)?\b",
            r"\bhead[\s-]to[\s-]head\b",
            r"\b(?:first|only|best)[\s-]in[\s-]class\b",
        ],
        ClaimCategory::Dosing => &[
            r"\b\d+(?:\.\d+)?\s*(?:mg|mcg|ml|units?)\b",
            r"\b(?:once|twice|three\s+times)\s+(?:a\s+)?(?:daily|day|weekly|week|monthly)\b",
            r"\b(?:dose|doses|dosing|dosage)\b",
            r"\bevery\s+\d+\s+(?:hours?|days?|weeks?)\b",
        ],
        ClaimCategory::Indication => &[
            r"\bindicated\s+(?:for|in)\b",
            r"\b(?:treatment|management)\s+of\b",
            r"\b(?:approved|licensed)\s+for\b",
            r"\bpatients\s+with\b",
        ],
        ClaimCategory::Mechanism => &[
            r"\bmechanism\s+of\s+action\b",
            r"\b(?:inhibits?|inhibitor|inhibition)\b",
            r"\b(?:blocks?|blockade)\b",
            r"\b(?:agonist|antagonist)s?\b",
            r"\b(?:receptors?|pathways?)\b",
            r"\bworks\s+by\b",
        ],
        ClaimCategory::Tolerability => &[
            r"\bwell[\s-]tolerated\b",
            r"\btolerab(?:le|ility)\b",
            r"\b(?:discontinuation|dropout)\s+rates?\b",
            r"\b(?:mild|transient)\s+(?:side[\s-]effects?|adverse\s+events?)\b",
        ],
    }
}

/// Safety statement types a claim category obliges the copy to carry.
pub fn safety_types_for(category: ClaimCategory) -> &'static [SafetyStatementType] {
    use SafetyStatementType::*;

    match category {
        ClaimCategory::Efficacy => &[BoxedWarning, AdverseReaction, Warning, Precaution],
        ClaimCategory::Safety => &[Contraindication, Warning, Precaution, AdverseReaction],
        ClaimCategory::Comparative => &[BoxedWarning, AdverseReaction, Warning, Precaution, Contraindication],
        ClaimCategory::Dosing => &[Warning, Precaution, Contraindication],
        ClaimCategory::Indication => &[BoxedWarning, Contraindication, Warning, Precaution],
        ClaimCategory::Mechanism => &[Warning, Precaution],
        ClaimCategory::Tolerability => &[AdverseReaction, Warning, Precaution],
    }
}

/// Classify content into claim categories.
///
/// Each category is detected when any of its patterns matches. Confidence grows
/// linearly with the number of distinct matched phrases and saturates at 100.
pub fn analyze_content(content: &str) -> ClaimAnalysis {
    if content.trim().is_empty() {
        return ClaimAnalysis::default();
    }

    let lowered = content.to_lowercase();
    let mut matches = Vec::new();
    let mut total_phrases = 0usize;

    for (category, patterns) in CLAIM_PATTERNS.iter() {
        let mut phrases: Vec<String> = Vec::new();
        for pattern in patterns {
            for found in pattern.find_iter(&lowered) {
                let phrase = found.as_str().to_string();
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
            }
        }

        if !phrases.is_empty() {
            total_phrases += phrases.len();
            matches.push(CategoryMatch {
                claim_type: *category,
                phrases,
            });
        }
    }

    let confidence = ((total_phrases as f64 / CONFIDENCE_SATURATION) * 100.0)
        .round()
        .min(100.0) as u8;

    ClaimAnalysis {
        detected_types: matches.iter().map(|m| m.claim_type).collect(),
        confidence,
        matches,
    }
}

/// Union of required safety types across all given categories.
pub fn required_safety_types_for_claims(categories: &[ClaimCategory]) -> BTreeSet<SafetyStatementType> {
    categories
        .iter()
        .flat_map(|category| safety_types_for(*category).iter().copied())
        .collect()
}

pub fn is_statement_required_for_claims(
    statement_type: SafetyStatementType,
    categories: &[ClaimCategory],
) -> bool {
    categories
        .iter()
        .any(|category| safety_types_for(*category).contains(&statement_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases_for(analysis: &ClaimAnalysis, category: ClaimCategory) -> Vec<String> {
        analysis
            .matches
            .iter()
            .find(|m| m.claim_type == category)
            .map(|m| m.phrases.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(CLAIM_PATTERNS.len(), ClaimCategory::ALL.len());
        assert!(CLAIM_PATTERNS.iter().all(|(_, patterns)| !patterns.is_empty()));
    }

    #[test]
    fn test_detects_efficacy_and_safety() {
        let analysis = analyze_content("This drug proved effective with reduced side effects");

        assert!(analysis.detected_types.contains(&ClaimCategory::Efficacy));
        assert!(analysis.detected_types.contains(&ClaimCategory::Safety));
        assert_eq!(phrases_for(&analysis, ClaimCategory::Efficacy), vec!["effective"]);
        assert_eq!(phrases_for(&analysis, ClaimCategory::Safety), vec!["side effects"]);

        let total: usize = analysis.matches.iter().map(|m| m.phrases.len()).sum();
        assert_eq!(analysis.confidence as usize, (total * 20).min(100));
    }

    #[test]
    fn test_detects_dosing() {
        let analysis = analyze_content("Take 10 mg once daily with food.");

        assert_eq!(analysis.detected_types, vec![ClaimCategory::Dosing]);
        assert_eq!(phrases_for(&analysis, ClaimCategory::Dosing), vec!["10 mg", "once daily"]);
        assert_eq!(analysis.confidence, 40);
    }

    #[test]
    fn test_detects_mechanism() {
        let analysis = analyze_content("It inhibits the JAK pathway.");

        assert_eq!(analysis.detected_types, vec![ClaimCategory::Mechanism]);
        assert_eq!(phrases_for(&analysis, ClaimCategory::Mechanism), vec!["inhibits", "pathway"]);
        assert_eq!(analysis.confidence, 40);
    }

    #[test]
    fn test_blank_content_detects_nothing() {
        for content in ["", "   ", "\n\t"] {
            let analysis = analyze_content(content);
            assert!(analysis.detected_types.is_empty());
            assert!(analysis.matches.is_empty());
            assert_eq!(analysis.confidence, 0);
        }
    }

    #[test]
    fn test_repeated_phrase_counts_once() {
        let analysis = analyze_content("Effective. EFFECTIVE. effective!");

        assert_eq!(analysis.detected_types, vec![ClaimCategory::Efficacy]);
        assert_eq!(phrases_for(&analysis, ClaimCategory::Efficacy), vec!["effective"]);
        assert_eq!(analysis.confidence, 20);
    }

    #[test]
    fn test_confidence_saturates() {
        let analysis = analyze_content(
            "Clinically proven efficacy. Effective treatment with a favorable safety profile \
             and few side effects, indicated for adults.",
        );

        assert_eq!(analysis.confidence, 100);
        assert!(analysis.detected_types.contains(&ClaimCategory::Indication));
    }

    #[test]
    fn test_detected_types_follow_category_order() {
        let analysis = analyze_content("Well tolerated, and superior to placebo in efficacy.");

        assert_eq!(
            analysis.detected_types,
            vec![
                ClaimCategory::Efficacy,
                ClaimCategory::Comparative,
                ClaimCategory::Tolerability
            ]
        );
    }

    #[test]
    fn test_required_types_union() {
        let required = required_safety_types_for_claims(&[ClaimCategory::Mechanism, ClaimCategory::Dosing]);

        assert_eq!(
            required.into_iter().collect::<Vec<_>>(),
            vec![
                SafetyStatementType::Contraindication,
                SafetyStatementType::Warning,
                SafetyStatementType::Precaution,
            ]
        );
    }

    #[test]
    fn test_required_types_empty_input() {
        assert!(required_safety_types_for_claims(&[]).is_empty());
        assert!(!is_statement_required_for_claims(SafetyStatementType::Warning, &[]));
    }

    #[test]
    fn test_statement_required_for_claims() {
        assert!(is_statement_required_for_claims(
            SafetyStatementType::BoxedWarning,
            &[ClaimCategory::Efficacy]
        ));
        assert!(!is_statement_required_for_claims(
            SafetyStatementType::BoxedWarning,
            &[ClaimCategory::Mechanism, ClaimCategory::Tolerability]
        ));
    }
}
