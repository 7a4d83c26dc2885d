//! Turning a proper (non-lambda) type into a named or applied reference.

use crate::builder::{ReferenceBuilder, Rules};
use crate::decompose::{Decomposition, decompose};
use crate::error::BuildError;
use crate::path::ExpansionPath;
use lighttag_model::{
    AbstractReference, Boundaries, FullReference, NameReference, Refinement, SymName, TypeParam,
};
use lighttag_reflect::{Signature, TypeShape, TypeSystem};
use tracing::debug;

impl<S: TypeSystem> ReferenceBuilder<'_, S> {
    pub(crate) fn unpack_refined(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        match decompose(self.system, ty) {
            Decomposition::Single(single) => {
                if self.system.takes_type_args(&single) {
                    self.unpack(&single, path, rules)
                } else {
                    let leaf = self.system.dealias(&single);
                    self.unpack(&leaf, path, rules)
                }
            }
            Decomposition::Compound { parts, members } => {
                let mut built = Vec::with_capacity(parts.len());
                for part in &parts {
                    built.push(self.sub(part, path, rules)?);
                }
                let parent = AbstractReference::maybe_intersection(built);
                if members.is_empty() {
                    return Ok(parent);
                }
                let decls = self.convert_members(&members, path, rules)?;
                Ok(AbstractReference::Refinement(Refinement {
                    parent: Box::new(parent),
                    decls,
                }))
            }
        }
    }

    fn unpack(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        let system = self.system;
        let tpef = self.dealias_result(ty);
        let prefix = self.get_prefix(&tpef, path, rules)?;
        let symbol = system.symbol_of(&tpef);

        let bound = symbol
            .as_ref()
            .and_then(|symbol| rules.get(&system.full_name(symbol)));
        let name = match bound {
            Some(param) => param.reference(),
            None => {
                let boundaries = self.make_boundaries(&tpef, path, rules)?;
                self.make_name_reference(&tpef, symbol.as_ref(), boundaries, prefix.clone())?
            }
        };

        let args = system.type_args(&tpef);
        if args.is_empty() {
            return Ok(name.into());
        }

        let declared = system.constructor_params(&tpef);
        let mut parameters = Vec::with_capacity(args.len());
        for (idx, arg) in args.iter().enumerate() {
            let reference = self.sub(arg, path, rules)?;
            let variance = declared
                .get(idx)
                .map(|param| system.variance(param))
                .unwrap_or_default();
            parameters.push(TypeParam::new(reference, variance));
        }
        Ok(FullReference {
            name: name.name,
            parameters,
            prefix: prefix.map(Box::new),
        }
        .into())
    }

    /// Name of a type already on the path: no arguments, no alias expansion
    /// and no bounds.
    pub(crate) fn recursive_name(
        &self,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        let system = self.system;
        let symbol = system.symbol_of(ty);
        if let Some(param) = symbol
            .as_ref()
            .and_then(|symbol| rules.get(&system.full_name(symbol)))
        {
            return Ok(param.reference().into());
        }
        let prefix = self.get_prefix(ty, path, rules)?;
        let name = self.make_name_reference(ty, symbol.as_ref(), Boundaries::Empty, prefix)?;
        Ok(name.into())
    }

    fn make_boundaries(
        &self,
        tpef: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<Boundaries, BuildError> {
        let Some(symbol) = self.system.symbol_of(tpef) else {
            return Ok(Boundaries::Empty);
        };
        match self.system.signature(&symbol) {
            Signature::Bounds { lower, upper } => self.bounds(&lower, &upper, path, rules),
            _ => Ok(Boundaries::Empty),
        }
    }

    /// Boundaries for `>: lower <: upper`; empty when unconstrained or when a
    /// bound is already being expanded.
    pub(crate) fn bounds(
        &self,
        lower: &S::Type,
        upper: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<Boundaries, BuildError> {
        if self.system.is_bottom(lower) && self.system.is_top(upper) {
            return Ok(Boundaries::Empty);
        }
        if path.contains(lower) || path.contains(upper) {
            debug!(?lower, ?upper, "self-referential bounds suppressed");
            return Ok(Boundaries::Empty);
        }
        let lower = self.sub(lower, path, rules)?;
        let upper = self.sub(upper, path, rules)?;
        Ok(Boundaries::defined(lower, upper))
    }

    fn make_name_reference(
        &self,
        tpef: &S::Type,
        symbol: Option<&S::Symbol>,
        boundaries: Boundaries,
        prefix: Option<AbstractReference>,
    ) -> Result<NameReference, BuildError> {
        let system = self.system;
        let reference = match system.classify(tpef) {
            TypeShape::Constant(value) => {
                NameReference::new(SymName::literal(value)).with_prefix(prefix)
            }
            TypeShape::Singleton { term } => {
                let term = system.dealias_singleton(&term);
                let prefix = self.term_prefix(&term)?;
                NameReference::new(self.sym_name(&term)).with_prefix(prefix)
            }
            _ => {
                let symbol = symbol.ok_or_else(|| {
                    BuildError::inconsistency(tpef, "type has neither a symbol nor a literal value")
                })?;
                NameReference::new(self.sym_name(symbol)).with_prefix(prefix)
            }
        };
        Ok(reference.with_boundaries(boundaries))
    }

    /// Simple name under a transparent owner, full name otherwise; term name
    /// for terms and singleton-typed symbols.
    pub(crate) fn sym_name(&self, symbol: &S::Symbol) -> SymName {
        let system = self.system;
        let transparent_owner = system
            .owner(symbol)
            .is_some_and(|owner| system.is_transparent(&owner));
        let base = if transparent_owner {
            system.simple_name(symbol)
        } else {
            system.full_name(symbol)
        };
        if system.is_term_symbol(symbol) || matches!(system.signature(symbol), Signature::Singleton) {
            SymName::term(base)
        } else {
            SymName::ty(base)
        }
    }

    pub(crate) fn get_prefix(
        &self,
        tpef: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<Option<AbstractReference>, BuildError> {
        let system = self.system;
        let Some(pre) = system.prefix_of(tpef) else {
            return Ok(None);
        };
        if system
            .symbol_of(&pre)
            .is_some_and(|symbol| system.is_package(&symbol))
        {
            return Ok(None);
        }
        match system.classify(&pre) {
            TypeShape::This { class } => {
                let own = system.symbol_type(&class);
                if system.is_refinement(&own) {
                    return Ok(None);
                }
                self.prefix_from_ref(tpef, &own, path, rules).map(Some)
            }
            TypeShape::Singleton { term } => {
                let term = system.dealias_singleton(&term);
                let prefix = self.term_prefix(&term)?;
                Ok(Some(
                    NameReference::new(self.sym_name(&term))
                        .with_prefix(prefix)
                        .into(),
                ))
            }
            _ => self.prefix_from_ref(tpef, &pre, path, rules).map(Some),
        }
    }

    /// Prefix of the path leading to a stable term.
    fn term_prefix(&self, term: &S::Symbol) -> Result<Option<AbstractReference>, BuildError> {
        let singleton = self.system.singleton_type(term);
        let mut path = ExpansionPath::new();
        path.scope(&singleton, |path| {
            self.get_prefix(&singleton, path, &Rules::new())
        })
    }

    fn prefix_from_ref(
        &self,
        tpef: &S::Type,
        pre: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        let built = self.sub(pre, path, rules)?;
        if built.is_applied() {
            Ok(built)
        } else {
            Err(BuildError::inconsistency(
                tpef,
                format!("prefix is not a proper type: {built}"),
            ))
        }
    }
}
