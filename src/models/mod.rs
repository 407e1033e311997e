pub mod citation;
pub mod claim;
pub mod claim_analysis;
pub mod safety;

pub use citation::*;
pub use claim::*;
pub use claim_analysis::*;
pub use safety::*;
