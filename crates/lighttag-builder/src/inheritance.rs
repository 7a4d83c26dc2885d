//! Stable-bases and unapplied-inheritance databases.
//!
//! Both databases describe the walked types closed under their base types, so
//! a chain `T <: P1 <: P2` yields the `P1 -> P2` edge as well as `T -> P1`.

use crate::builder::{ReferenceBuilder, Rules};
use crate::error::BuildError;
use crate::path::ExpansionPath;
use indexmap::IndexSet;
use lighttag_model::{
    AbstractReference, Boundaries, LambdaParameter, NameReference, StableBases,
    UnappliedInheritance,
};
use lighttag_reflect::TypeSystem;
use tracing::{debug, trace};

pub(crate) struct InheritanceBuilder<'b, 'a, S: TypeSystem> {
    references: &'b ReferenceBuilder<'a, S>,
}

impl<'b, 'a, S: TypeSystem> InheritanceBuilder<'b, 'a, S> {
    pub(crate) fn new(references: &'b ReferenceBuilder<'a, S>) -> Self {
        Self { references }
    }

    /// `types` plus every base type of every member, transitively.
    pub(crate) fn close_over_bases(&self, types: &[S::Type]) -> Vec<S::Type> {
        let mut closed: IndexSet<S::Type> = IndexSet::new();
        let mut worklist: Vec<S::Type> = types.iter().rev().cloned().collect();
        while let Some(ty) = worklist.pop() {
            if !closed.insert(ty.clone()) {
                continue;
            }
            let bases = self.tpe_bases(&ty);
            worklist.extend(bases.into_iter().rev().filter(|base| !closed.contains(base)));
        }
        closed.into_iter().collect()
    }

    /// Ancestors of `ty` specialised to its arguments, excluding `ty` itself
    /// and the universal classes. Unapplied constructors are eta-expanded
    /// first, so an unapplied alias answers with its expansion's ancestors.
    pub(crate) fn tpe_bases(&self, ty: &S::Type) -> Vec<S::Type> {
        let system = self.references.system;
        let tpef = self.references.dealias_result(&system.eta_expand(ty));
        let own = system.symbol_of(&tpef);
        system
            .base_classes(&tpef)
            .into_iter()
            .filter(|base| !system.is_universal(base) && Some(base) != own.as_ref())
            .filter_map(|base| system.base_type(&tpef, &base))
            .filter(|base| *base != tpef)
            .collect()
    }

    pub(crate) fn stable_bases(&self, components: &[S::Type]) -> Result<StableBases, BuildError> {
        let system = self.references.system;
        let mut db = StableBases::new();

        for component in components {
            let poly = system.eta_expand(component);
            let params = system.type_params(&poly);
            let generic = !params.is_empty();

            let rules: Rules = params
                .iter()
                .enumerate()
                .map(|(idx, param)| (system.full_name(param), LambdaParameter::new(idx.to_string())))
                .collect();

            let own = if generic {
                self.references.dealias_result(&poly)
            } else {
                component.clone()
            };
            let child = self.references.build_with(&own, &rules, generic)?;

            for base in self.tpe_bases(&own) {
                let parent = match self.references.build_with(&base, &rules, generic)? {
                    AbstractReference::Lambda(lambda) if lambda.all_arguments_referenced() => {
                        AbstractReference::Lambda(lambda)
                    }
                    AbstractReference::Lambda(lambda) => {
                        debug!(body = %lambda.body, "stable base does not use every parameter; collapsed");
                        *lambda.body
                    }
                    other => other,
                };
                if parent != child {
                    trace!(%child, %parent, "stable base");
                    db.insert(child.clone(), parent);
                }
            }
        }
        Ok(db)
    }

    pub(crate) fn unapplied_inheritance(
        &self,
        components: &[S::Type],
    ) -> Result<UnappliedInheritance, BuildError> {
        let system = self.references.system;
        let mut db = UnappliedInheritance::new();

        for component in components {
            let tpef = self.references.dealias_result(&system.eta_expand(component));

            let declared = system.symbol_of(component);
            if declared.is_some() && declared != system.symbol_of(&tpef) {
                if let (Some(alias), Some(target)) =
                    (self.declared_name(component)?, self.declared_name(&tpef)?)
                {
                    db.insert(alias, target);
                }
            }

            let Some(child) = self.declared_name(&tpef)? else {
                continue;
            };
            for base in self.tpe_bases(component) {
                if system.takes_type_args(&base) {
                    continue;
                }
                let built = self.references.build(&base)?;
                if let Some(parent) = bare_name(&built) {
                    db.insert(child.clone(), parent);
                }
            }
        }

        db.retain(|child, parent| child != parent);
        Ok(db)
    }

    /// The argument-free name of `ty`'s own symbol.
    fn declared_name(&self, ty: &S::Type) -> Result<Option<NameReference>, BuildError> {
        let system = self.references.system;
        let Some(symbol) = system.symbol_of(ty) else {
            return Ok(None);
        };
        let mut path = ExpansionPath::new();
        let prefix = path.scope(ty, |path| {
            self.references.get_prefix(ty, path, &Rules::new())
        })?;
        Ok(Some(
            NameReference::new(self.references.sym_name(&symbol)).with_prefix(prefix),
        ))
    }
}

fn bare_name(reference: &AbstractReference) -> Option<NameReference> {
    let mut name = reference.as_name()?;
    name.boundaries = Boundaries::Empty;
    Some(name)
}
