//! `TypeSystem` queries over a [`Universe`].
//!
//! Alias expansion and base-type specialisation are both parameter
//! substitution; higher-kinded arguments are applied by re-targeting the
//! argument's constructor (or by substituting into an explicit poly type).

use crate::system::{MemberDecl, Signature, TypeShape, TypeSystem};
use crate::universe::{SymbolId, SymbolKind, Ty, TypeData, Universe};
use indexmap::IndexSet;
use lighttag_model::Variance;
use rustc_hash::FxHashSet;
use std::sync::Arc;

impl Universe {
    /// Replace every occurrence of `params[i]` in `ty` with `args[i]`.
    pub fn substitute(&self, ty: &Ty, params: &[SymbolId], args: &[Ty]) -> Ty {
        if params.is_empty() || args.is_empty() {
            return ty.clone();
        }
        let sub = |inner: &Ty| self.substitute(inner, params, args);
        match &**ty {
            TypeData::Ref {
                prefix,
                symbol,
                args: own_args,
            } => {
                let own_args: Vec<Ty> = own_args.iter().map(sub).collect();
                if let Some(idx) = params.iter().position(|p| p == symbol) {
                    let Some(replacement) = args.get(idx) else {
                        return ty.clone();
                    };
                    if own_args.is_empty() {
                        return replacement.clone();
                    }
                    return self.apply_constructor(replacement, own_args);
                }
                Arc::new(TypeData::Ref {
                    prefix: prefix.as_ref().map(sub),
                    symbol: *symbol,
                    args: own_args,
                })
            }
            TypeData::Single { prefix, term } => Arc::new(TypeData::Single {
                prefix: prefix.as_ref().map(sub),
                term: *term,
            }),
            TypeData::This(_) | TypeData::Constant(_) => ty.clone(),
            TypeData::Refined { parents, decls } => Arc::new(TypeData::Refined {
                parents: parents.iter().map(sub).collect(),
                decls: decls
                    .iter()
                    .map(|decl| match decl {
                        MemberDecl::Method {
                            name,
                            param_lists,
                            result,
                        } => MemberDecl::Method {
                            name: name.clone(),
                            param_lists: param_lists
                                .iter()
                                .map(|list| list.iter().map(sub).collect())
                                .collect(),
                            result: sub(result),
                        },
                        MemberDecl::Type { name, ty } => MemberDecl::Type {
                            name: name.clone(),
                            ty: sub(ty),
                        },
                    })
                    .collect(),
            }),
            TypeData::Poly {
                params: own,
                result,
            } => Arc::new(TypeData::Poly {
                params: own.clone(),
                result: sub(result),
            }),
            TypeData::Bounds { lower, upper } => Arc::new(TypeData::Bounds {
                lower: sub(lower),
                upper: sub(upper),
            }),
        }
    }

    /// Apply a type constructor (an unapplied reference or a poly type) to
    /// arguments.
    fn apply_constructor(&self, constructor: &Ty, args: Vec<Ty>) -> Ty {
        match &**constructor {
            TypeData::Ref {
                prefix,
                symbol,
                args: existing,
            } if existing.is_empty() => Arc::new(TypeData::Ref {
                prefix: prefix.clone(),
                symbol: *symbol,
                args,
            }),
            TypeData::Poly { params, result } => self.substitute(result, params, &args),
            _ => constructor.clone(),
        }
    }

    fn upper_bound(&self, sym: SymbolId) -> Ty {
        match &self.info(sym).bounds {
            Some((_, upper)) => upper.clone(),
            None => self.any_type(),
        }
    }

    fn collect_bases(&self, ty: &Ty, out: &mut IndexSet<SymbolId>, visiting: &mut FxHashSet<SymbolId>) {
        let ty = self.dealias(ty);
        match &*ty {
            TypeData::Ref { symbol, .. } => self.linearize(*symbol, out, visiting),
            TypeData::Single { term, .. } => match self.info(*term).kind {
                SymbolKind::Module => self.linearize(*term, out, visiting),
                _ => {
                    let declared = self.term_type(term);
                    if !matches!(&*declared, TypeData::Single { .. }) {
                        self.collect_bases(&declared, out, visiting);
                    }
                }
            },
            TypeData::This(class) => self.linearize(*class, out, visiting),
            TypeData::Refined { parents, .. } => {
                for parent in parents {
                    self.collect_bases(parent, out, visiting);
                }
            }
            TypeData::Poly { result, .. } => self.collect_bases(result, out, visiting),
            TypeData::Constant(_) | TypeData::Bounds { .. } => {}
        }
    }

    fn linearize(&self, sym: SymbolId, out: &mut IndexSet<SymbolId>, visiting: &mut FxHashSet<SymbolId>) {
        if !visiting.insert(sym) {
            return;
        }
        let info = self.info(sym);
        match info.kind {
            SymbolKind::TypeParam | SymbolKind::AbstractType => {
                let upper = self.upper_bound(sym);
                self.collect_bases(&upper, out, visiting);
            }
            SymbolKind::TypeAlias => {
                if let Some(body) = &info.body {
                    self.collect_bases(body, out, visiting);
                }
            }
            SymbolKind::Class | SymbolKind::Module | SymbolKind::Refinement => {
                out.insert(sym);
                for parent in &info.parents {
                    self.collect_bases(parent, out, visiting);
                }
            }
            SymbolKind::Package | SymbolKind::Term => {}
        }
        visiting.remove(&sym);
    }

    fn find_base_type(&self, ty: &Ty, class: SymbolId, visiting: &mut FxHashSet<SymbolId>) -> Option<Ty> {
        let ty = self.dealias(ty);
        match &*ty {
            TypeData::Ref { symbol, args, .. } => {
                if *symbol == class {
                    return Some(ty.clone());
                }
                let info = self.info(*symbol);
                match info.kind {
                    SymbolKind::TypeParam | SymbolKind::AbstractType => {
                        let upper = self.upper_bound(*symbol);
                        self.find_base_type(&upper, class, visiting)
                    }
                    SymbolKind::Class | SymbolKind::Refinement => {
                        if !visiting.insert(*symbol) {
                            return None;
                        }
                        let found = info.parents.iter().find_map(|parent| {
                            let parent = if args.len() == info.type_params.len() {
                                self.substitute(parent, &info.type_params, args)
                            } else {
                                parent.clone()
                            };
                            self.find_base_type(&parent, class, visiting)
                        });
                        visiting.remove(symbol);
                        found
                    }
                    _ => None,
                }
            }
            TypeData::Single { term, .. } => {
                if *term == class {
                    return Some(ty.clone());
                }
                if self.info(*term).kind == SymbolKind::Term {
                    let declared = self.term_type(term);
                    if matches!(&*declared, TypeData::Single { .. }) {
                        return None;
                    }
                    return self.find_base_type(&declared, class, visiting);
                }
                if !visiting.insert(*term) {
                    return None;
                }
                let found = self
                    .info(*term)
                    .parents
                    .iter()
                    .find_map(|parent| self.find_base_type(parent, class, visiting));
                visiting.remove(term);
                found
            }
            TypeData::This(own) => {
                let own_type = self.symbol_type(own);
                if *own == class {
                    return Some(own_type);
                }
                self.find_base_type(&own_type, class, visiting)
            }
            TypeData::Refined { parents, .. } => parents
                .iter()
                .find_map(|parent| self.find_base_type(parent, class, visiting)),
            TypeData::Poly { result, .. } => self.find_base_type(result, class, visiting),
            TypeData::Constant(_) | TypeData::Bounds { .. } => None,
        }
    }
}

impl TypeSystem for Universe {
    type Type = Ty;
    type Symbol = SymbolId;

    fn classify(&self, ty: &Ty) -> TypeShape<Ty, SymbolId> {
        match &**ty {
            TypeData::Ref { symbol, .. } => TypeShape::Named { symbol: *symbol },
            TypeData::Single { term, .. } => TypeShape::Singleton { term: *term },
            TypeData::This(class) => TypeShape::This { class: *class },
            TypeData::Constant(value) => TypeShape::Constant(value.clone()),
            TypeData::Refined { parents, decls } => TypeShape::Refinement {
                parents: parents.clone(),
                members: decls.clone(),
            },
            TypeData::Poly { params, result } => TypeShape::Poly {
                params: params.clone(),
                result: result.clone(),
            },
            TypeData::Bounds { lower, upper } => TypeShape::Bounds {
                lower: lower.clone(),
                upper: upper.clone(),
            },
        }
    }

    fn dealias(&self, ty: &Ty) -> Ty {
        let mut current = ty.clone();
        let mut seen: FxHashSet<Ty> = FxHashSet::default();
        loop {
            let TypeData::Ref { symbol, args, .. } = &*current else {
                return current;
            };
            let info = self.info(*symbol);
            if info.kind != SymbolKind::TypeAlias {
                return current;
            }
            let Some(body) = &info.body else {
                return current;
            };
            // an unapplied generic alias stays a type constructor
            if args.len() != info.type_params.len() {
                return current;
            }
            if !seen.insert(current.clone()) {
                return current;
            }
            let expanded = self.substitute(body, &info.type_params, args);
            current = expanded;
        }
    }

    fn result_type(&self, ty: &Ty) -> Ty {
        match &**ty {
            TypeData::Poly { result, .. } => result.clone(),
            _ => ty.clone(),
        }
    }

    fn eta_expand(&self, ty: &Ty) -> Ty {
        match &**ty {
            TypeData::Ref {
                prefix,
                symbol,
                args,
            } if args.is_empty() => {
                let params = self.info(*symbol).type_params.clone();
                if params.is_empty() {
                    return ty.clone();
                }
                let applied = params.iter().map(|p| self.type_ref(*p)).collect();
                TypeData::poly(
                    params,
                    Arc::new(TypeData::Ref {
                        prefix: prefix.clone(),
                        symbol: *symbol,
                        args: applied,
                    }),
                )
            }
            _ => ty.clone(),
        }
    }

    fn type_args(&self, ty: &Ty) -> Vec<Ty> {
        match &**ty {
            TypeData::Ref { args, .. } => args.clone(),
            _ => Vec::new(),
        }
    }

    fn type_params(&self, ty: &Ty) -> Vec<SymbolId> {
        match &**ty {
            TypeData::Poly { params, .. } => params.clone(),
            TypeData::Ref { symbol, args, .. } if args.is_empty() => {
                self.info(*symbol).type_params.clone()
            }
            _ => Vec::new(),
        }
    }

    fn constructor_params(&self, ty: &Ty) -> Vec<SymbolId> {
        match &*self.dealias(ty) {
            TypeData::Ref { symbol, .. } => self.info(*symbol).type_params.clone(),
            _ => Vec::new(),
        }
    }

    fn variance(&self, param: &SymbolId) -> Variance {
        self.info(*param).variance
    }

    fn base_classes(&self, ty: &Ty) -> Vec<SymbolId> {
        let mut out = IndexSet::new();
        let mut visiting = FxHashSet::default();
        self.collect_bases(ty, &mut out, &mut visiting);

        // object root and top always close the linearization
        let (any, any_ref) = (self.any(), self.any_ref());
        if out.iter().any(|sym| !self.is_universal(sym)) {
            out.shift_remove(&any_ref);
            out.insert(any_ref);
        }
        if !out.is_empty() {
            out.shift_remove(&any);
            out.insert(any);
        }
        out.into_iter().collect()
    }

    fn base_type(&self, ty: &Ty, class: &SymbolId) -> Option<Ty> {
        let mut visiting = FxHashSet::default();
        if let Some(found) = self.find_base_type(ty, *class, &mut visiting) {
            return Some(found);
        }
        if self.is_universal(class) {
            return Some(self.type_ref(*class));
        }
        None
    }

    fn symbol_type(&self, sym: &SymbolId) -> Ty {
        let info = self.info(*sym);
        if info.kind == SymbolKind::Refinement {
            if let Some(body) = &info.body {
                return body.clone();
            }
        }
        let args = info.type_params.iter().map(|p| self.type_ref(*p)).collect();
        self.applied(*sym, args)
    }

    fn symbol_of(&self, ty: &Ty) -> Option<SymbolId> {
        match &**ty {
            TypeData::Ref { symbol, .. } => Some(*symbol),
            TypeData::Single { term, .. } => Some(*term),
            TypeData::This(class) => Some(*class),
            TypeData::Poly { result, .. } => self.symbol_of(result),
            TypeData::Constant(_) | TypeData::Refined { .. } | TypeData::Bounds { .. } => None,
        }
    }

    fn full_name(&self, sym: &SymbolId) -> String {
        self.compute_full_name(*sym)
    }

    fn simple_name(&self, sym: &SymbolId) -> String {
        self.info(*sym).name.clone()
    }

    fn owner(&self, sym: &SymbolId) -> Option<SymbolId> {
        self.info(*sym).owner
    }

    fn is_transparent(&self, sym: &SymbolId) -> bool {
        self.info(*sym).kind == SymbolKind::Refinement
    }

    fn signature(&self, sym: &SymbolId) -> Signature<Ty> {
        let info = self.info(*sym);
        match info.kind {
            SymbolKind::TypeParam | SymbolKind::AbstractType => match &info.bounds {
                Some((lower, upper)) => Signature::Bounds {
                    lower: lower.clone(),
                    upper: upper.clone(),
                },
                None => Signature::Bounds {
                    lower: self.nothing_type(),
                    upper: self.any_type(),
                },
            },
            SymbolKind::Module => Signature::Singleton,
            SymbolKind::Term => match &info.body {
                Some(declared) if !matches!(&**declared, TypeData::Single { .. }) => {
                    Signature::Concrete(declared.clone())
                }
                _ => Signature::Singleton,
            },
            SymbolKind::TypeAlias => match &info.body {
                Some(body) => Signature::Concrete(body.clone()),
                None => Signature::Concrete(self.type_ref(*sym)),
            },
            SymbolKind::Package | SymbolKind::Class | SymbolKind::Refinement => {
                Signature::Concrete(self.symbol_type(sym))
            }
        }
    }

    fn prefix_of(&self, ty: &Ty) -> Option<Ty> {
        match &**ty {
            TypeData::Ref { prefix, .. } | TypeData::Single { prefix, .. } => prefix.clone(),
            _ => None,
        }
    }

    fn is_package(&self, sym: &SymbolId) -> bool {
        self.info(*sym).kind == SymbolKind::Package
    }

    fn is_term_symbol(&self, sym: &SymbolId) -> bool {
        matches!(self.info(*sym).kind, SymbolKind::Module | SymbolKind::Term)
    }

    fn dealias_singleton(&self, term: &SymbolId) -> SymbolId {
        let mut current = *term;
        let mut seen = FxHashSet::default();
        while seen.insert(current) {
            let info = self.info(current);
            if info.kind != SymbolKind::Term {
                break;
            }
            match info.body.as_deref() {
                Some(TypeData::Single { term: next, .. }) => current = *next,
                _ => break,
            }
        }
        current
    }

    fn term_type(&self, term: &SymbolId) -> Ty {
        let info = self.info(*term);
        match (&info.kind, &info.body) {
            (SymbolKind::Term, Some(declared)) => declared.clone(),
            _ => self.single(*term),
        }
    }

    fn singleton_type(&self, term: &SymbolId) -> Ty {
        self.single(*term)
    }

    fn is_universal(&self, sym: &SymbolId) -> bool {
        *sym == self.any() || *sym == self.any_ref() || *sym == self.nothing()
    }

    fn is_top(&self, ty: &Ty) -> bool {
        matches!(&**ty, TypeData::Ref { symbol, .. } if *symbol == self.any())
    }

    fn is_bottom(&self, ty: &Ty) -> bool {
        matches!(&**ty, TypeData::Ref { symbol, .. } if *symbol == self.nothing())
    }
}
