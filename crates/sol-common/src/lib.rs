//! Shared vocabulary for the Solidity analysis crates.
//!
//! - [`span`]: byte-offset spans and line/column lookup
//! - [`token`]: the token vocabulary produced by `sol-lexer`
//! - [`names`]: the reserved naming scheme for built-in declarations
//! - [`error`]: lexer error types

pub mod error;
pub mod names;
pub mod span;
pub mod token;
