//! Reference builder: host type to [`AbstractReference`].
//!
//! `make_ref` decides between a lambda and a proper type:
//! 1. forced lambda (inheritance database over a generic type's own params)
//! 2. explicit poly type
//! 3. unapplied generic type that is not a bound lambda parameter
//! 4. everything else is decomposed and unpacked (see `unpack.rs`)
//!
//! `rules` maps the full names of type variables bound by enclosing lambdas to
//! their placeholders. The expansion path holds the types currently being
//! built; its level scopes the placeholder names.

use crate::error::BuildError;
use crate::path::ExpansionPath;
use indexmap::IndexMap;
use lighttag_model::{AbstractReference, Lambda, LambdaParameter};
use lighttag_reflect::{TypeShape, TypeSystem};
use tracing::{trace, warn};

/// Bound type variables, by full name, in binding order.
pub(crate) type Rules = IndexMap<String, LambdaParameter>;

const STACK_RED_ZONE: usize = 32 * 1024;
const STACK_GROWTH: usize = 2 * 1024 * 1024;

pub(crate) struct ReferenceBuilder<'a, S: TypeSystem> {
    pub(crate) system: &'a S,
}

impl<'a, S: TypeSystem> ReferenceBuilder<'a, S> {
    pub(crate) fn new(system: &'a S) -> Self {
        Self { system }
    }

    /// Build `ty` as a root: fresh path, nothing bound.
    pub(crate) fn build(&self, ty: &S::Type) -> Result<AbstractReference, BuildError> {
        self.build_with(ty, &Rules::new(), false)
    }

    pub(crate) fn build_with(
        &self,
        ty: &S::Type,
        rules: &Rules,
        force_lambda: bool,
    ) -> Result<AbstractReference, BuildError> {
        let mut path = ExpansionPath::new();
        path.scope(ty, |path| self.make_ref(ty, path, rules, force_lambda))
    }

    /// Build a nested type one level down.
    ///
    /// A named type that is already being expanded, directly or through its
    /// alias expansion, is emitted as a bare name.
    pub(crate) fn sub(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        if self.is_expanding(ty, path) {
            trace!(?ty, "recursive occurrence cut");
            return self.recursive_name(ty, path, rules);
        }
        path.scope(ty, |path| self.make_ref(ty, path, rules, false))
    }

    fn is_expanding(&self, ty: &S::Type, path: &ExpansionPath<S::Type>) -> bool {
        self.system.symbol_of(ty).is_some()
            && (path.contains(ty) || path.contains(&self.system.dealias(ty)))
    }

    fn make_ref(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
        force_lambda: bool,
    ) -> Result<AbstractReference, BuildError> {
        // Deeply nested generics recurse once per level.
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.make_ref_inner(ty, path, rules, force_lambda)
        })
    }

    fn make_ref_inner(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
        force_lambda: bool,
    ) -> Result<AbstractReference, BuildError> {
        trace!(?ty, level = path.level(), force_lambda, "make_ref");

        if force_lambda {
            let params = rules.values().cloned().collect();
            let body = self.unpack_refined(ty, path, rules)?;
            return Ok(Lambda::new(params, body).into());
        }
        if let TypeShape::Poly { .. } = self.system.classify(ty) {
            return self.make_lambda(ty, path, rules);
        }
        if self.system.takes_type_args(ty) {
            if self.is_bound(ty, rules) {
                return self.unpack_refined(ty, path, rules);
            }
            return self.make_lambda(ty, path, rules);
        }
        self.unpack_refined(ty, path, rules)
    }

    fn is_bound(&self, ty: &S::Type, rules: &Rules) -> bool {
        self.system
            .symbol_of(ty)
            .is_some_and(|symbol| rules.contains_key(&self.system.full_name(&symbol)))
    }

    fn make_lambda(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        let system = self.system;
        let poly = system.eta_expand(ty);
        let level = path.level();

        let mut scoped = rules.clone();
        let params: Vec<LambdaParameter> = system
            .type_params(&poly)
            .iter()
            .enumerate()
            .map(|(idx, param)| {
                let placeholder = LambdaParameter::new(format!("{level}:{idx}"));
                scoped.insert(system.full_name(param), placeholder.clone());
                placeholder
            })
            .collect();

        let result = self.dealias_result(&poly);
        let body = if result == *ty {
            // host could not eta-expand; unpack in place instead of looping
            self.unpack_refined(&result, path, &scoped)?
        } else {
            self.sub(&result, path, &scoped)?
        };

        let lambda = Lambda::new(params, body);
        if !lambda.all_arguments_referenced() {
            let referenced = lambda.referenced();
            let unused: Vec<&str> = lambda
                .params
                .iter()
                .filter(|param| !referenced.contains(param))
                .map(|param| param.name())
                .collect();
            warn!(
                ?ty,
                lambda = %AbstractReference::Lambda(lambda.clone()),
                ?unused,
                "lambda parameters are not referenced by its body"
            );
        }
        Ok(lambda.into())
    }

    /// De-alias, then strip a poly wrapper and de-alias what it returns.
    pub(crate) fn dealias_result(&self, ty: &S::Type) -> S::Type {
        let system = self.system;
        system.dealias(&system.result_type(&system.dealias(ty)))
    }
}
