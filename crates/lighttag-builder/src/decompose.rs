//! Refinement flattening.
//!
//! `A with (B with C { def f: Int }) { type T }` decomposes into the leaf
//! parents `A, B, C` and the members `f, T`. Member conversion lives here too,
//! since it is the only place refinement members are turned into descriptors.

use crate::builder::{ReferenceBuilder, Rules};
use crate::error::BuildError;
use crate::path::ExpansionPath;
use lighttag_model::{AbstractReference, NameReference, RefinementDecl, SymName};
use lighttag_reflect::{MemberDecl, TypeShape, TypeSystem};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decomposition<T> {
    /// Not a refinement, or a refinement of one parent with no members.
    Single(T),
    Compound {
        parts: Vec<T>,
        members: Vec<MemberDecl<T>>,
    },
}

pub fn decompose<S: TypeSystem>(system: &S, ty: &S::Type) -> Decomposition<S::Type> {
    let mut parts: Vec<S::Type> = Vec::new();
    let mut members = Vec::new();
    let mut stack = vec![ty.clone()];

    while let Some(current) = stack.pop() {
        match system.classify(&system.dealias(&current)) {
            TypeShape::Refinement {
                parents,
                members: declared,
            } => {
                members.extend(declared);
                stack.extend(parents.into_iter().rev());
            }
            _ => {
                if !parts.contains(&current) {
                    parts.push(current);
                }
            }
        }
    }

    if members.is_empty() && parts.len() == 1 {
        if let Some(single) = parts.pop() {
            return Decomposition::Single(single);
        }
    }
    Decomposition::Compound { parts, members }
}

impl<S: TypeSystem> ReferenceBuilder<'_, S> {
    pub(crate) fn convert_members(
        &self,
        members: &[MemberDecl<S::Type>],
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<BTreeSet<RefinementDecl>, BuildError> {
        let mut decls = BTreeSet::new();
        for member in members {
            match member {
                MemberDecl::Method {
                    name,
                    param_lists,
                    result,
                } => {
                    let result = self.applied_member(name, result, path, rules)?;
                    if param_lists.is_empty() {
                        decls.insert(RefinementDecl::Signature {
                            name: name.clone(),
                            params: Vec::new(),
                            result: Box::new(result.clone()),
                        });
                    }
                    for list in param_lists {
                        let mut params = Vec::with_capacity(list.len());
                        for param in list {
                            params.push(self.applied_member(name, param, path, rules)?);
                        }
                        decls.insert(RefinementDecl::Signature {
                            name: name.clone(),
                            params,
                            result: Box::new(result.clone()),
                        });
                    }
                }
                MemberDecl::Type { name, ty } => {
                    let reference = match self.system.classify(ty) {
                        TypeShape::Bounds { lower, upper } => {
                            let boundaries = self.bounds(&lower, &upper, path, rules)?;
                            NameReference::new(SymName::ty(name.clone()))
                                .with_boundaries(boundaries)
                                .into()
                        }
                        _ => self.sub(ty, path, rules)?,
                    };
                    decls.insert(RefinementDecl::TypeMember {
                        name: name.clone(),
                        reference: Box::new(reference),
                    });
                }
            }
        }
        Ok(decls)
    }

    fn applied_member(
        &self,
        member: &str,
        ty: &S::Type,
        path: &mut ExpansionPath<S::Type>,
        rules: &Rules,
    ) -> Result<AbstractReference, BuildError> {
        let built = self.sub(ty, path, rules)?;
        if built.is_applied() {
            Ok(built)
        } else {
            Err(BuildError::inconsistency(
                ty,
                format!("member `{member}` is not a proper type: {built}"),
            ))
        }
    }
}
