//! CLI command implementations.

pub mod anonymise;
pub mod fields;
pub mod restore;
