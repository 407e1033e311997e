pub mod store;
pub mod claim_repo;
pub mod safety_statement_repo;
pub mod pg_store;
pub mod memory_store;

pub use store::*;
pub use claim_repo::*;
pub use safety_statement_repo::*;
pub use pg_store::*;
pub use memory_store::*;
