//! Light type tags.
//!
//! A light type tag is a canonical, host-independent descriptor of a type plus
//! two inheritance databases that answer subtype questions without going back
//! to the host's reflection API. The workspace is split into:
//!
//! - [`lighttag_model`]: the descriptor tree, the multimap and the tag bundle
//! - [`lighttag_reflect`]: the [`TypeSystem`] capability and the in-memory
//!   [`Universe`] host
//! - [`lighttag_builder`]: the walker, reference builder, inheritance
//!   databases and cache behind [`TagBuilder`]
//!
//! This crate re-exports the public surface and hosts the `lighttag` CLI.

pub use lighttag_builder::{
    BuildError, BuilderConfig, CacheMode, CacheStats, ReferenceCache, TagBuilder,
};
pub use lighttag_model::{
    AbstractReference, Boundaries, LightTypeTag, MultiMap, NameReference, RenderStyle,
    StableBases, SymName, UnappliedInheritance, Variance,
};
pub use lighttag_reflect::{Prelude, TypeHandle, TypeSystem, Universe};

pub mod cli;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
