//! Types for Solidity semantic analysis and the built-in type registry.
//!
//! User declarations and built-ins share one representation ([`ty::Ty`]) and
//! one member resolution path ([`members`]). Built-in structs and contracts
//! are synthesized as source text in reserved `@Name` form and run through
//! the real parser; the current block namespace is a plain member table.
//!
//! Entry point: [`context::AnalysisContext`], which owns a lazily populated
//! [`registry::BuiltinRegistry`].

pub mod builtins;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod members;
pub mod registry;
pub mod synth;
pub mod ty;

pub use context::AnalysisContext;
pub use error::{BuiltinError, TypeError};
pub use registry::BuiltinRegistry;
pub use ty::{Callable, Field, Member, Primitive, Ty, Usage, Visibility};
