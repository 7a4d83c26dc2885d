//! The descriptor tree.
//!
//! An [`AbstractReference`] is the canonical, host-independent encoding of a
//! type. Every node derives `Eq`, `Ord` and `Hash` structurally, so two
//! descriptors built from the same type compare equal no matter which live
//! type object they came from. This is what lets descriptors key caches and
//! database entries directly.
//!
//! The node family is polymorphic over three capabilities:
//!
//! | Variant | applied | named | boundaries |
//! |---------|---------|-------|------------|
//! | `Name` | yes | yes | yes |
//! | `Full` | yes | yes | no |
//! | `Intersection` | yes | no | no |
//! | `Refinement` | yes | no | no |
//! | `Lambda` | no | no | no |

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Names
// =============================================================================

/// Variance of a type argument relative to its constructor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
}

impl Variance {
    /// Marker used by the renderer (`=`, `+`, `-`).
    pub const fn marker(self) -> char {
        match self {
            Variance::Invariant => '=',
            Variance::Covariant => '+',
            Variance::Contravariant => '-',
        }
    }
}

/// A symbolic name.
///
/// Term and type names live in different namespaces and can otherwise collide
/// on the same text (`object Foo` vs `class Foo`), so the kind is part of the
/// name's identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymName {
    /// A value-level name: a term, a module, or a singleton.
    Term(String),
    /// A type-level name, including lambda placeholder back-references.
    Type(String),
    /// A literal constant type.
    Literal(String),
}

impl SymName {
    pub fn term(name: impl Into<String>) -> Self {
        SymName::Term(name.into())
    }

    pub fn ty(name: impl Into<String>) -> Self {
        SymName::Type(name.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        SymName::Literal(value.into())
    }

    /// The raw text of the name, whatever its kind.
    pub fn as_str(&self) -> &str {
        match self {
            SymName::Term(name) | SymName::Type(name) | SymName::Literal(name) => name,
        }
    }

    /// Last `.`-separated segment, used for short rendering.
    pub fn short(&self) -> &str {
        match self {
            SymName::Literal(value) => value,
            SymName::Term(name) | SymName::Type(name) => {
                name.rsplit('.').next().unwrap_or(name)
            }
        }
    }
}

/// A synthetic placeholder introduced by a [`Lambda`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LambdaParameter(pub String);

impl LambdaParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// A `NameReference` pointing back at this placeholder.
    pub fn reference(&self) -> NameReference {
        NameReference::new(SymName::Type(self.0.clone()))
    }
}

// =============================================================================
// Node payloads
// =============================================================================

/// Lower/upper bound descriptors of an abstract or bounded type variable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Boundaries {
    #[default]
    Empty,
    Defined {
        lower: Box<AbstractReference>,
        upper: Box<AbstractReference>,
    },
}

impl Boundaries {
    pub fn defined(lower: AbstractReference, upper: AbstractReference) -> Self {
        Boundaries::Defined {
            lower: Box::new(lower),
            upper: Box::new(upper),
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Boundaries::Empty)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NameReference {
    pub name: SymName,
    pub boundaries: Boundaries,
    pub prefix: Option<Box<AbstractReference>>,
}

impl NameReference {
    pub fn new(name: SymName) -> Self {
        Self {
            name,
            boundaries: Boundaries::Empty,
            prefix: None,
        }
    }

    pub fn with_boundaries(mut self, boundaries: Boundaries) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn with_prefix(mut self, prefix: Option<AbstractReference>) -> Self {
        self.prefix = prefix.map(Box::new);
        self
    }
}

/// One type argument of a [`FullReference`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeParam {
    pub reference: AbstractReference,
    pub variance: Variance,
}

impl TypeParam {
    pub fn new(reference: AbstractReference, variance: Variance) -> Self {
        Self {
            reference,
            variance,
        }
    }
}

/// A generic type applied to concrete arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FullReference {
    pub name: SymName,
    pub parameters: Vec<TypeParam>,
    pub prefix: Option<Box<AbstractReference>>,
}

/// A type-level function.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<LambdaParameter>,
    pub body: Box<AbstractReference>,
}

impl Lambda {
    pub fn new(params: Vec<LambdaParameter>, body: AbstractReference) -> Self {
        Self {
            params,
            body: Box::new(body),
        }
    }

    /// The declared parameters that occur somewhere in the body.
    pub fn referenced(&self) -> BTreeSet<&LambdaParameter> {
        let mut names = BTreeSet::new();
        self.body.collect_type_names(&mut names);
        self.params
            .iter()
            .filter(|param| names.contains(param.name()))
            .collect()
    }

    pub fn all_arguments_referenced(&self) -> bool {
        self.referenced().len() == self.params.len()
    }

    pub fn some_arguments_referenced(&self) -> bool {
        !self.referenced().is_empty()
    }

    /// Drop the lambda when none of its parameters is used.
    pub fn collapse_unused(self) -> AbstractReference {
        if self.params.is_empty() || !self.some_arguments_referenced() {
            *self.body
        } else {
            AbstractReference::Lambda(self)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RefinementDecl {
    /// A method; curried methods produce one signature per parameter list.
    Signature {
        name: String,
        params: Vec<AbstractReference>,
        result: Box<AbstractReference>,
    },
    TypeMember {
        name: String,
        reference: Box<AbstractReference>,
    },
}

impl RefinementDecl {
    pub fn name(&self) -> &str {
        match self {
            RefinementDecl::Signature { name, .. } | RefinementDecl::TypeMember { name, .. } => {
                name
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Refinement {
    pub parent: Box<AbstractReference>,
    pub decls: BTreeSet<RefinementDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Intersection {
    pub parts: BTreeSet<AbstractReference>,
}

// =============================================================================
// AbstractReference
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbstractReference {
    Name(NameReference),
    Full(FullReference),
    Lambda(Lambda),
    Intersection(Intersection),
    Refinement(Refinement),
}

impl From<NameReference> for AbstractReference {
    fn from(value: NameReference) -> Self {
        AbstractReference::Name(value)
    }
}

impl From<FullReference> for AbstractReference {
    fn from(value: FullReference) -> Self {
        AbstractReference::Full(value)
    }
}

impl From<Lambda> for AbstractReference {
    fn from(value: Lambda) -> Self {
        AbstractReference::Lambda(value)
    }
}

impl AbstractReference {
    /// Shorthand for an unbounded, unprefixed type name.
    pub fn type_name(name: impl Into<String>) -> Self {
        NameReference::new(SymName::ty(name)).into()
    }

    /// Shorthand for an unbounded, unprefixed term name.
    pub fn term_name(name: impl Into<String>) -> Self {
        NameReference::new(SymName::term(name)).into()
    }

    pub fn applied(name: SymName, parameters: Vec<TypeParam>) -> Self {
        FullReference {
            name,
            parameters,
            prefix: None,
        }
        .into()
    }

    /// Combine applied parts into an intersection.
    ///
    /// A single part is returned unchanged, and nested intersections are
    /// flattened into the result.
    pub fn maybe_intersection(parts: impl IntoIterator<Item = AbstractReference>) -> Self {
        let mut flat = BTreeSet::new();
        for part in parts {
            match part {
                AbstractReference::Intersection(inner) => flat.extend(inner.parts),
                other => {
                    flat.insert(other);
                }
            }
        }
        if flat.len() == 1 {
            if let Some(single) = flat.pop_first() {
                return single;
            }
        }
        AbstractReference::Intersection(Intersection { parts: flat })
    }

    pub const fn is_applied(&self) -> bool {
        !matches!(self, AbstractReference::Lambda(_))
    }

    pub const fn is_named(&self) -> bool {
        matches!(self, AbstractReference::Name(_) | AbstractReference::Full(_))
    }

    pub fn sym_name(&self) -> Option<&SymName> {
        match self {
            AbstractReference::Name(name) => Some(&name.name),
            AbstractReference::Full(full) => Some(&full.name),
            _ => None,
        }
    }

    pub fn boundaries(&self) -> Option<&Boundaries> {
        match self {
            AbstractReference::Name(name) => Some(&name.boundaries),
            _ => None,
        }
    }

    pub fn prefix(&self) -> Option<&AbstractReference> {
        match self {
            AbstractReference::Name(name) => name.prefix.as_deref(),
            AbstractReference::Full(full) => full.prefix.as_deref(),
            _ => None,
        }
    }

    pub fn type_args(&self) -> &[TypeParam] {
        match self {
            AbstractReference::Full(full) => &full.parameters,
            _ => &[],
        }
    }

    /// The bare name of a named applied reference, argument list dropped.
    pub fn as_name(&self) -> Option<NameReference> {
        match self {
            AbstractReference::Name(name) => Some(name.clone()),
            AbstractReference::Full(full) => Some(NameReference {
                name: full.name.clone(),
                boundaries: Boundaries::Empty,
                prefix: full.prefix.clone(),
            }),
            _ => None,
        }
    }

    /// Collect the text of every type name mentioned anywhere in the tree.
    pub fn collect_type_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            AbstractReference::Name(name) => {
                if let SymName::Type(text) = &name.name {
                    out.insert(text);
                }
                name.boundaries.collect_type_names(out);
                if let Some(prefix) = &name.prefix {
                    prefix.collect_type_names(out);
                }
            }
            AbstractReference::Full(full) => {
                if let SymName::Type(text) = &full.name {
                    out.insert(text);
                }
                for param in &full.parameters {
                    param.reference.collect_type_names(out);
                }
                if let Some(prefix) = &full.prefix {
                    prefix.collect_type_names(out);
                }
            }
            AbstractReference::Lambda(lambda) => lambda.body.collect_type_names(out),
            AbstractReference::Intersection(intersection) => {
                for part in &intersection.parts {
                    part.collect_type_names(out);
                }
            }
            AbstractReference::Refinement(refinement) => {
                refinement.parent.collect_type_names(out);
                for decl in &refinement.decls {
                    match decl {
                        RefinementDecl::Signature { params, result, .. } => {
                            for param in params {
                                param.collect_type_names(out);
                            }
                            result.collect_type_names(out);
                        }
                        RefinementDecl::TypeMember { reference, .. } => {
                            reference.collect_type_names(out);
                        }
                    }
                }
            }
        }
    }
}

impl Boundaries {
    fn collect_type_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        if let Boundaries::Defined { lower, upper } = self {
            lower.collect_type_names(out);
            upper.collect_type_names(out);
        }
    }
}
