//! In-memory host type system.
//!
//! `Universe` owns a symbol table and hands out structurally shared types
//! (`Ty = Arc<TypeData>`). It implements [`TypeSystem`](crate::TypeSystem),
//! so it can stand in for a real reflection API in tests and tools.
//!
//! Symbols are created through `&mut self` constructors; types are built from
//! symbols with [`Universe::type_ref`], [`Universe::applied`] and the free
//! constructors on [`TypeData`]. Prefixes default to what the owner chain
//! implies: package members get a package prefix, members of modules a
//! singleton prefix, members of classes a `this` prefix, and type parameters
//! none.

use crate::system::MemberDecl;
use lighttag_model::Variance;
use rustc_hash::FxHashMap;
use std::sync::Arc;

pub type Ty = Arc<TypeData>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Package,
    /// Classes and traits.
    Class,
    /// A module (`object`).
    Module,
    /// A value definition.
    Term,
    TypeParam,
    AbstractType,
    TypeAlias,
    /// Anonymous class backing a structural refinement.
    Refinement,
}

#[derive(Clone, Debug)]
pub struct SymbolInfo {
    pub name: String,
    pub owner: Option<SymbolId>,
    pub kind: SymbolKind,
    pub type_params: Vec<SymbolId>,
    pub variance: Variance,
    /// Declared parents of classes and modules.
    pub parents: Vec<Ty>,
    /// `(lower, upper)` of abstract types and type parameters.
    pub bounds: Option<(Ty, Ty)>,
    /// Alias right-hand side, declared type of a term, or the refined type of
    /// a refinement class.
    pub body: Option<Ty>,
}

impl SymbolInfo {
    fn new(name: impl Into<String>, owner: Option<SymbolId>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            owner,
            kind,
            type_params: Vec::new(),
            variance: Variance::Invariant,
            parents: Vec::new(),
            bounds: None,
            body: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A nominal reference, possibly applied to arguments.
    Ref {
        prefix: Option<Ty>,
        symbol: SymbolId,
        args: Vec<Ty>,
    },
    /// `term.type`
    Single { prefix: Option<Ty>, term: SymbolId },
    /// `C.this.type`
    This(SymbolId),
    /// A literal constant type.
    Constant(String),
    /// `A with B { decls }`
    Refined {
        parents: Vec<Ty>,
        decls: Vec<MemberDecl<Ty>>,
    },
    /// `[X, Y] => result`
    Poly { params: Vec<SymbolId>, result: Ty },
    /// `>: lower <: upper`
    Bounds { lower: Ty, upper: Ty },
}

impl TypeData {
    pub fn this_type(class: SymbolId) -> Ty {
        Arc::new(TypeData::This(class))
    }

    pub fn constant(value: impl Into<String>) -> Ty {
        Arc::new(TypeData::Constant(value.into()))
    }

    pub fn refined(parents: Vec<Ty>, decls: Vec<MemberDecl<Ty>>) -> Ty {
        Arc::new(TypeData::Refined { parents, decls })
    }

    pub fn poly(params: Vec<SymbolId>, result: Ty) -> Ty {
        Arc::new(TypeData::Poly { params, result })
    }

    pub fn bounds(lower: Ty, upper: Ty) -> Ty {
        Arc::new(TypeData::Bounds { lower, upper })
    }
}

pub struct Universe {
    symbols: Vec<SymbolInfo>,
    by_full_name: FxHashMap<String, SymbolId>,
    root: SymbolId,
    any: SymbolId,
    any_ref: SymbolId,
    nothing: SymbolId,
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl Universe {
    /// Name of the root package; never part of a full name.
    pub const ROOT: &'static str = "<root>";
    /// Name given to anonymous refinement classes.
    pub const REFINEMENT_CLASS: &'static str = "<refinement>";

    /// An empty universe holding the root package and the universal classes
    /// `scala.Any`, `scala.AnyRef` and `scala.Nothing`.
    pub fn new() -> Self {
        let mut universe = Universe {
            symbols: Vec::new(),
            by_full_name: FxHashMap::default(),
            root: SymbolId(0),
            any: SymbolId(0),
            any_ref: SymbolId(0),
            nothing: SymbolId(0),
        };
        universe.root = universe.add_symbol(SymbolInfo::new(Self::ROOT, None, SymbolKind::Package));
        let scala = universe.package(None, "scala");
        universe.any = universe.class(scala, "Any");
        universe.any_ref = universe.class(scala, "AnyRef");
        universe.nothing = universe.class(scala, "Nothing");
        universe
    }

    fn add_symbol(&mut self, info: SymbolInfo) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        let anonymous = info.kind == SymbolKind::Refinement;
        self.symbols.push(info);
        if !anonymous {
            let full_name = self.compute_full_name(id);
            self.by_full_name.entry(full_name).or_insert(id);
        }
        id
    }

    pub(crate) fn compute_full_name(&self, sym: SymbolId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(sym);
        while let Some(id) = current {
            let info = self.info(id);
            if info.kind == SymbolKind::Package && info.owner.is_none() {
                break;
            }
            segments.push(info.name.as_str());
            current = info.owner;
        }
        segments.reverse();
        segments.join(".")
    }

    // =========================================================================
    // Symbol construction
    // =========================================================================

    /// Get or create a package. `owner = None` means the root package.
    pub fn package(&mut self, owner: Option<SymbolId>, name: &str) -> SymbolId {
        let owner = owner.unwrap_or(self.root);
        let full_name = match self.compute_full_name(owner) {
            prefix if prefix.is_empty() => name.to_string(),
            prefix => format!("{prefix}.{name}"),
        };
        if let Some(&existing) = self.by_full_name.get(&full_name) {
            return existing;
        }
        self.add_symbol(SymbolInfo::new(name, Some(owner), SymbolKind::Package))
    }

    pub fn class(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        self.add_symbol(SymbolInfo::new(name, Some(owner), SymbolKind::Class))
    }

    pub fn module(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        self.add_symbol(SymbolInfo::new(name, Some(owner), SymbolKind::Module))
    }

    /// A value definition. Without a declared type the term is its own
    /// singleton.
    pub fn term(&mut self, owner: SymbolId, name: &str, declared: Option<Ty>) -> SymbolId {
        let mut info = SymbolInfo::new(name, Some(owner), SymbolKind::Term);
        info.body = declared;
        self.add_symbol(info)
    }

    /// Declare a type parameter of `owner` (a class, alias, or a
    /// higher-kinded parameter).
    pub fn type_param(&mut self, owner: SymbolId, name: &str, variance: Variance) -> SymbolId {
        let mut info = SymbolInfo::new(name, Some(owner), SymbolKind::TypeParam);
        info.variance = variance;
        let id = self.add_symbol(info);
        self.symbols[owner.0 as usize].type_params.push(id);
        id
    }

    /// A type parameter that is not attached to any owner's parameter list,
    /// for building explicit poly types.
    pub fn free_type_param(&mut self, owner: SymbolId, name: &str, variance: Variance) -> SymbolId {
        let mut info = SymbolInfo::new(name, Some(owner), SymbolKind::TypeParam);
        info.variance = variance;
        self.add_symbol(info)
    }

    pub fn abstract_type(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        self.add_symbol(SymbolInfo::new(name, Some(owner), SymbolKind::AbstractType))
    }

    /// A type alias; declare its parameters with [`Universe::type_param`] and
    /// then set the right-hand side with [`Universe::set_body`].
    pub fn alias(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        self.add_symbol(SymbolInfo::new(name, Some(owner), SymbolKind::TypeAlias))
    }

    /// An anonymous class whose self type is `refined`.
    pub fn refinement_class(&mut self, owner: SymbolId, refined: Ty) -> SymbolId {
        let mut info = SymbolInfo::new(Self::REFINEMENT_CLASS, Some(owner), SymbolKind::Refinement);
        info.body = Some(refined);
        self.add_symbol(info)
    }

    pub fn set_parents(&mut self, sym: SymbolId, parents: Vec<Ty>) {
        self.symbols[sym.0 as usize].parents = parents;
    }

    pub fn set_bounds(&mut self, sym: SymbolId, lower: Ty, upper: Ty) {
        self.symbols[sym.0 as usize].bounds = Some((lower, upper));
    }

    pub fn set_body(&mut self, sym: SymbolId, body: Ty) {
        self.symbols[sym.0 as usize].body = Some(body);
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn info(&self, sym: SymbolId) -> &SymbolInfo {
        &self.symbols[sym.0 as usize]
    }

    pub fn lookup(&self, full_name: &str) -> Option<SymbolId> {
        self.by_full_name.get(full_name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub const fn root(&self) -> SymbolId {
        self.root
    }

    pub const fn any(&self) -> SymbolId {
        self.any
    }

    pub const fn any_ref(&self) -> SymbolId {
        self.any_ref
    }

    pub const fn nothing(&self) -> SymbolId {
        self.nothing
    }

    // =========================================================================
    // Type construction
    // =========================================================================

    /// The prefix implied by `sym`'s owner.
    pub fn default_prefix(&self, sym: SymbolId) -> Option<Ty> {
        let info = self.info(sym);
        if info.kind == SymbolKind::TypeParam {
            return None;
        }
        let owner = info.owner?;
        let owner_info = self.info(owner);
        match owner_info.kind {
            SymbolKind::Package => Some(Arc::new(TypeData::Ref {
                prefix: None,
                symbol: owner,
                args: Vec::new(),
            })),
            SymbolKind::Module | SymbolKind::Term => Some(self.single(owner)),
            SymbolKind::TypeParam | SymbolKind::TypeAlias => None,
            SymbolKind::Class | SymbolKind::AbstractType | SymbolKind::Refinement => {
                Some(TypeData::this_type(owner))
            }
        }
    }

    /// `sym` with no arguments.
    pub fn type_ref(&self, sym: SymbolId) -> Ty {
        self.applied(sym, Vec::new())
    }

    pub fn applied(&self, sym: SymbolId, args: Vec<Ty>) -> Ty {
        Arc::new(TypeData::Ref {
            prefix: self.default_prefix(sym),
            symbol: sym,
            args,
        })
    }

    /// A reference with an explicit prefix, e.g. a projection through an
    /// applied outer type.
    pub fn with_prefix(&self, prefix: Option<Ty>, sym: SymbolId, args: Vec<Ty>) -> Ty {
        Arc::new(TypeData::Ref {
            prefix,
            symbol: sym,
            args,
        })
    }

    pub fn single(&self, term: SymbolId) -> Ty {
        Arc::new(TypeData::Single {
            prefix: self.default_prefix(term),
            term,
        })
    }

    pub fn any_type(&self) -> Ty {
        self.type_ref(self.any)
    }

    pub fn any_ref_type(&self) -> Ty {
        self.type_ref(self.any_ref)
    }

    pub fn nothing_type(&self) -> Ty {
        self.type_ref(self.nothing)
    }
}
