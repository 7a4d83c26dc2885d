//! Light type tag builder.
//!
//! Turns a host type (seen through [`lighttag_reflect::TypeSystem`]) into a
//! [`LightTypeTag`](lighttag_model::LightTypeTag): a canonical descriptor of
//! the type plus the stable-bases and unapplied-inheritance databases.
//!
//! Pipeline:
//! - [`walker`] collects every type reachable from the root worth describing
//! - [`decompose`] flattens nested refinements
//! - the reference builder turns each type into an [`AbstractReference`](lighttag_model::AbstractReference)
//! - the inheritance builder derives both ancestry databases
//!
//! [`TagBuilder`] ties the stages together and owns the optional
//! [`ReferenceCache`].

mod builder;
pub mod cache;
pub mod config;
pub mod decompose;
pub mod error;
mod inheritance;
pub mod path;
pub mod tag_builder;
mod unpack;
pub mod walker;

pub use cache::{CacheStats, ReferenceCache};
pub use config::{BuilderConfig, CacheMode};
pub use decompose::{Decomposition, decompose};
pub use error::BuildError;
pub use path::ExpansionPath;
pub use tag_builder::TagBuilder;
pub use walker::walk;

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;
#[cfg(test)]
#[path = "../tests/path_tests.rs"]
mod path_tests;
#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "../tests/walker_tests.rs"]
mod walker_tests;
#[cfg(test)]
#[path = "../tests/decompose_tests.rs"]
mod decompose_tests;
#[cfg(test)]
#[path = "../tests/reference_builder_tests.rs"]
mod reference_builder_tests;
#[cfg(test)]
#[path = "../tests/inheritance_tests.rs"]
mod inheritance_tests;
#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod cache_tests;
#[cfg(test)]
#[path = "../tests/tag_builder_tests.rs"]
mod tag_builder_tests;
