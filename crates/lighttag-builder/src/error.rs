use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The host type graph violated an assumption the builder relies on,
    /// e.g. a prefix or a refinement member that is not a proper type.
    #[error("inconsistent type {ty}: {detail}")]
    Inconsistency { ty: String, detail: String },
}

impl BuildError {
    pub(crate) fn inconsistency(ty: &impl Debug, detail: impl Into<String>) -> Self {
        BuildError::Inconsistency {
            ty: format!("{ty:?}"),
            detail: detail.into(),
        }
    }
}
