//! Reachable-type discovery.

use indexmap::IndexSet;
use lighttag_reflect::{Signature, TypeSystem};

/// Collect the root and every type reachable from it that the inheritance
/// databases should describe, in discovery order.
///
/// From each type the walk follows its de-aliased result type, the type
/// arguments of both, the declared bounds of those arguments, and the parents
/// of refinements. An unapplied constructor also contributes the arguments of
/// its expansion other than its own parameters. The visited set makes the
/// walk finite on cyclic graphs.
pub fn walk<S: TypeSystem>(system: &S, root: &S::Type) -> Vec<S::Type> {
    let mut seen: IndexSet<S::Type> = IndexSet::new();
    let mut worklist = vec![root.clone()];

    while let Some(ty) = worklist.pop() {
        if !seen.insert(ty.clone()) {
            continue;
        }

        let dealiased = system.result_type(&system.dealias(&ty));
        let mut args = system.type_args(&ty);
        args.extend(system.type_args(&dealiased));

        let own_params = system.type_params(&ty);
        if !own_params.is_empty() {
            let expanded = system.dealias(&system.result_type(&system.eta_expand(&ty)));
            args.extend(system.type_args(&expanded).into_iter().filter(|arg| {
                system
                    .symbol_of(arg)
                    .is_none_or(|symbol| !own_params.contains(&symbol))
            }));
        }

        let mut next = Vec::with_capacity(args.len() * 3 + 1);
        next.push(dealiased.clone());
        for arg in args {
            let resolved = system.result_type(&system.dealias(&arg));
            next.push(arg);
            if let Some(symbol) = system.symbol_of(&resolved) {
                if let Signature::Bounds { lower, upper } = system.signature(&symbol) {
                    next.push(lower);
                    next.push(upper);
                }
            }
        }
        next.extend(system.parents(&dealiased));

        // reversed so the stack pops in declaration order
        worklist.extend(next.into_iter().rev().filter(|t| !seen.contains(t)));
    }

    seen.into_iter().collect()
}
