use super::*;
use crate::test_support::*;
use lighttag_reflect::{Prelude, TypeData, Universe};

#[test]
fn test_walk_starts_at_root_and_visits_arguments() {
    let p = Prelude::new();
    let root = p.list_of(p.int_type());
    let types = walk(&p.universe, &root);

    assert_eq!(types.first(), Some(&root));
    assert!(types.contains(&p.int_type()));
    assert_eq!(types.len(), 2);
}

#[test]
fn test_walk_follows_dealiased_result() {
    let p = Prelude::new();
    let u = &p.universe;
    let root = u.applied(p.str_map_alias, vec![p.int_type()]);
    let types = walk(u, &root);

    assert!(types.contains(&root));
    assert!(types.contains(&p.map_of(p.string_type(), p.int_type())));
    assert!(types.contains(&p.string_type()));
    assert!(types.contains(&p.int_type()));
}

#[test]
fn test_walk_of_unapplied_alias_visits_expansion_arguments() {
    let p = Prelude::new();
    let u = &p.universe;
    let root = u.type_ref(p.str_map_alias);

    // the alias's own parameter `V` is not a reachable type
    assert_eq!(walk(u, &root), vec![root.clone(), p.string_type()]);
}

#[test]
fn test_walk_visits_argument_bounds() {
    let mut p = Prelude::new();
    let bounded = p.universe.abstract_type(p.predef, "Bounded");
    let lower = p.universe.nothing_type();
    let upper = p.universe.type_ref(p.product);
    p.universe.set_bounds(bounded, lower, upper);

    let arg = p.universe.type_ref(bounded);
    let types = walk(&p.universe, &p.list_of(arg.clone()));

    assert!(types.contains(&arg));
    assert!(types.contains(&p.universe.nothing_type()));
    assert!(types.contains(&p.universe.type_ref(p.product)));
}

#[test]
fn test_walk_visits_refinement_parents() {
    let p = Prelude::new();
    let root = p.sample("Iterable[Int] with Product").expect("sample exists");
    let types = walk(&p.universe, &root);

    let iterable = p.universe.applied(p.iterable, vec![p.int_type()]);
    assert!(types.contains(&iterable));
    assert!(types.contains(&p.universe.type_ref(p.product)));
    assert!(types.contains(&p.int_type()));
}

#[test]
fn test_walk_terminates_on_cycles() {
    let mut u = Universe::new();
    let app = u.package(None, "app");
    let alias = u.alias(app, "Loop");
    let body = u.type_ref(alias);
    u.set_body(alias, body);
    assert_eq!(walk(&u, &u.type_ref(alias)), vec![u.type_ref(alias)]);

    let fixture = f_bounded();
    let u = &fixture.universe;
    let root = u.applied(fixture.ord, vec![u.type_ref(fixture.self_type)]);
    let types = walk(u, &root);
    assert!(types.contains(&u.type_ref(fixture.self_type)));
    assert!(types.contains(&u.nothing_type()));
}

#[test]
fn test_walk_constant_is_a_leaf() {
    let p = Prelude::new();
    let root = TypeData::constant("42");
    assert_eq!(walk(&p.universe, &root), vec![root]);
}
