pub mod citations;
pub mod claims;
pub mod health;
pub mod safety;
