pub mod filter;
pub mod registry;
