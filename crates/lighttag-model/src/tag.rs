use crate::multimap::MultiMap;
use crate::reference::{AbstractReference, NameReference};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ancestors re-expressed over a type's own generic parameters.
pub type StableBases = MultiMap<AbstractReference, AbstractReference>;

/// Argument-free ancestry edges between names.
pub type UnappliedInheritance = MultiMap<NameReference, NameReference>;

/// The complete, host-independent description of one type.
///
/// Equality and hashing are structural, so tags built from the same type in
/// different processes compare equal after a serialization round-trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightTypeTag {
    pub reference: AbstractReference,
    pub stable_bases: StableBases,
    pub unapplied_inheritance: UnappliedInheritance,
}

impl LightTypeTag {
    pub fn new(
        reference: AbstractReference,
        stable_bases: StableBases,
        unapplied_inheritance: UnappliedInheritance,
    ) -> Self {
        Self {
            reference,
            stable_bases,
            unapplied_inheritance,
        }
    }

    /// Direct unapplied parents recorded for `name`.
    pub fn unapplied_parents(&self, name: &NameReference) -> impl Iterator<Item = &NameReference> {
        self.unapplied_inheritance
            .get(name)
            .into_iter()
            .flat_map(|parents| parents.iter())
    }

    /// Stable bases recorded for `child`.
    pub fn stable_parents(
        &self,
        child: &AbstractReference,
    ) -> impl Iterator<Item = &AbstractReference> {
        self.stable_bases
            .get(child)
            .into_iter()
            .flat_map(|parents| parents.iter())
    }
}

impl fmt::Display for LightTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reference, f)
    }
}
