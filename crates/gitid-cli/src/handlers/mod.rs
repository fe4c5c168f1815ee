pub mod audit;
pub mod hook;
pub mod rule;
pub mod status;
pub mod use_identity;
