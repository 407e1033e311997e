pub mod claim_detection;
pub mod safety_check;
pub mod citation_processor;
pub mod citation_validator;

pub use claim_detection::{
    analyze_content, is_statement_required_for_claims, required_safety_types_for_claims,
};
pub use safety_check::{check_presence, evaluate_panel, SafetyPanelService};
pub use citation_processor::{extract_claim_markers, format_reference_list, CitationProcessor};
pub use citation_validator::CitationValidator;
