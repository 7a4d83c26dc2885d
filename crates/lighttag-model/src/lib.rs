//! Descriptor model for light type tags.
//!
//! This crate holds the immutable output data of the tag builder:
//! - The descriptor tree ([`AbstractReference`] and its node payloads)
//! - The ordered [`MultiMap`] backing both inheritance databases
//! - The [`LightTypeTag`] bundle
//! - Long/short text rendering
//!
//! Everything here is plain data with structural equality and serde support.

pub mod multimap;
pub mod reference;
pub mod render;
pub mod tag;

pub use multimap::MultiMap;
pub use reference::{
    AbstractReference, Boundaries, FullReference, Intersection, Lambda, LambdaParameter,
    NameReference, Refinement, RefinementDecl, SymName, TypeParam, Variance,
};
pub use render::{RenderStyle, render};
pub use tag::{LightTypeTag, StableBases, UnappliedInheritance};

#[cfg(test)]
#[path = "../tests/reference_tests.rs"]
mod reference_tests;
#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod render_tests;
#[cfg(test)]
#[path = "../tests/tag_serde_tests.rs"]
mod tag_serde_tests;
