//! Type system capability abstraction.
//!
//! This trait isolates the tag builder from the host's reflection API so the
//! builder never reaches into concrete type representations. Hosts classify
//! each type once via [`TypeSystem::classify`]; everything else is plain
//! introspection over types and symbols.

use lighttag_model::Variance;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Weak};

/// What a symbol's declared signature is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signature<T> {
    /// An abstract type or type parameter: `>: lower <: upper`.
    Bounds { lower: T, upper: T },
    /// The symbol denotes a singleton (`x.type`). `this` references are not
    /// singletons in this sense.
    Singleton,
    /// Any other concrete type.
    Concrete(T),
}

/// A member declared inside a structural refinement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberDecl<T> {
    Method {
        name: String,
        param_lists: Vec<Vec<T>>,
        result: T,
    },
    Type {
        name: String,
        ty: T,
    },
}

/// Tagged-variant classification of a type, performed once per type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeShape<T, S> {
    /// A type-level function with explicit parameters.
    Poly { params: Vec<S>, result: T },
    /// Parents intersected, plus declared members.
    Refinement {
        parents: Vec<T>,
        members: Vec<MemberDecl<T>>,
    },
    /// A literal constant type.
    Constant(String),
    /// The singleton type of a term.
    Singleton { term: S },
    /// The self type of a class.
    This { class: S },
    /// A bare bounds pair.
    Bounds { lower: T, upper: T },
    /// A nominal type, applied or not.
    Named { symbol: S },
}

/// Query interface over the host's reflective types.
pub trait TypeSystem {
    type Type: Clone + Eq + Hash + Debug;
    type Symbol: Clone + Eq + Hash + Debug;

    fn classify(&self, ty: &Self::Type) -> TypeShape<Self::Type, Self::Symbol>;

    // Normalization
    fn dealias(&self, ty: &Self::Type) -> Self::Type;
    fn result_type(&self, ty: &Self::Type) -> Self::Type;
    /// Turn an unapplied generic type into an explicit poly type; other types
    /// are returned unchanged.
    fn eta_expand(&self, ty: &Self::Type) -> Self::Type;

    // Application
    fn type_args(&self, ty: &Self::Type) -> Vec<Self::Type>;
    /// Parameters the type still takes (empty once applied).
    fn type_params(&self, ty: &Self::Type) -> Vec<Self::Symbol>;
    /// Declared parameters of the type's constructor, used to pair arguments
    /// with their variance.
    fn constructor_params(&self, ty: &Self::Type) -> Vec<Self::Symbol>;
    fn variance(&self, param: &Self::Symbol) -> Variance;

    // Hierarchy
    fn base_classes(&self, ty: &Self::Type) -> Vec<Self::Symbol>;
    /// The ancestor `class` of `ty`, specialised to `ty`'s arguments.
    fn base_type(&self, ty: &Self::Type, class: &Self::Symbol) -> Option<Self::Type>;
    /// The type a type symbol denotes, applied to its own parameters.
    fn symbol_type(&self, sym: &Self::Symbol) -> Self::Type;

    // Symbols
    fn symbol_of(&self, ty: &Self::Type) -> Option<Self::Symbol>;
    fn full_name(&self, sym: &Self::Symbol) -> String;
    fn simple_name(&self, sym: &Self::Symbol) -> String;
    fn owner(&self, sym: &Self::Symbol) -> Option<Self::Symbol>;
    /// True when the symbol's own name carries no meaning (anonymous
    /// refinement classes and similar synthetic containers).
    fn is_transparent(&self, sym: &Self::Symbol) -> bool;
    fn signature(&self, sym: &Self::Symbol) -> Signature<Self::Type>;

    // Prefixes and ownership
    fn prefix_of(&self, ty: &Self::Type) -> Option<Self::Type>;
    fn is_package(&self, sym: &Self::Symbol) -> bool;
    /// Terms and modules.
    fn is_term_symbol(&self, sym: &Self::Symbol) -> bool;
    /// Follow chains of singleton aliases (`val a: b.type = b`) to the final
    /// term.
    fn dealias_singleton(&self, term: &Self::Symbol) -> Self::Symbol {
        term.clone()
    }
    /// The final result type of a term.
    fn term_type(&self, term: &Self::Symbol) -> Self::Type;
    /// `term.type`
    fn singleton_type(&self, term: &Self::Symbol) -> Self::Type;

    // Universal types
    /// Top, object-root and bottom classes, never recorded as bases.
    fn is_universal(&self, sym: &Self::Symbol) -> bool;
    fn is_top(&self, ty: &Self::Type) -> bool;
    fn is_bottom(&self, ty: &Self::Type) -> bool;

    fn takes_type_args(&self, ty: &Self::Type) -> bool {
        !self.type_params(ty).is_empty()
    }

    fn is_refinement(&self, ty: &Self::Type) -> bool {
        matches!(self.classify(ty), TypeShape::Refinement { .. })
    }

    fn parents(&self, ty: &Self::Type) -> Vec<Self::Type> {
        match self.classify(ty) {
            TypeShape::Refinement { parents, .. } => parents,
            _ => Vec::new(),
        }
    }

    fn declared_members(&self, ty: &Self::Type) -> Vec<MemberDecl<Self::Type>> {
        match self.classify(ty) {
            TypeShape::Refinement { members, .. } => members,
            _ => Vec::new(),
        }
    }
}

/// Identity handle that can be held weakly by a cache.
pub trait TypeHandle: Clone + Eq + Hash + Debug {
    type Weak: Clone;

    fn downgrade(&self) -> Self::Weak;
    fn upgrade(weak: &Self::Weak) -> Option<Self>;
}

impl<T: Eq + Hash + Debug> TypeHandle for Arc<T> {
    type Weak = Weak<T>;

    fn downgrade(&self) -> Self::Weak {
        Arc::downgrade(self)
    }

    fn upgrade(weak: &Self::Weak) -> Option<Self> {
        weak.upgrade()
    }
}
