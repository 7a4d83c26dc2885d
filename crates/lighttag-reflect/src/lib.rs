//! Type system capability for the light type tag builder.
//!
//! The builder never talks to a concrete reflection API. It consumes the
//! [`TypeSystem`] trait defined here; hosts implement it over their own type
//! representation.
//!
//! This crate also ships [`Universe`], an in-memory host that implements the
//! trait, and [`Prelude`], a small standard hierarchy built on it.

pub mod prelude;
pub mod system;
pub mod universe;
mod universe_queries;

pub use prelude::Prelude;
pub use system::{MemberDecl, Signature, TypeHandle, TypeShape, TypeSystem};
pub use universe::{SymbolId, SymbolInfo, SymbolKind, Ty, TypeData, Universe};

#[cfg(test)]
#[path = "../tests/universe_tests.rs"]
mod universe_tests;
