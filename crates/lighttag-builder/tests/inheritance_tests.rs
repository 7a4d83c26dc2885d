use super::*;
use crate::test_support::*;
use lighttag_model::{AbstractReference, LightTypeTag, NameReference, SymName, Variance};
use lighttag_reflect::Prelude;
use std::collections::BTreeSet;

use Variance::{Covariant, Invariant};

fn parents_of<'t>(tag: &'t LightTypeTag, name: &str) -> BTreeSet<&'t NameReference> {
    tag.unapplied_parents(&name_ref(name)).collect()
}

#[test]
fn test_applied_type_stable_bases() {
    let p = Prelude::new();
    let tag = builder(&p.universe)
        .make_tag(&p.list_of(p.int_type()))
        .expect("builds");

    let child = applied("scala.List", vec![(int(), Covariant)]);
    let parents: BTreeSet<_> = tag.stable_parents(&child).cloned().collect();
    let expected: BTreeSet<_> = [
        applied("scala.Seq", vec![(int(), Covariant)]),
        applied("scala.Iterable", vec![(int(), Covariant)]),
        ty_name("scala.Product"),
    ]
    .into_iter()
    .collect();
    assert_eq!(parents, expected);
    assert!(!parents.contains(&ty_name("scala.Any")));
    assert!(!parents.contains(&ty_name("scala.AnyRef")));
}

#[test]
fn test_stable_bases_are_closed_over_ancestors() {
    let p = Prelude::new();
    let tag = builder(&p.universe)
        .make_tag(&p.list_of(p.int_type()))
        .expect("builds");

    let seq = applied("scala.Seq", vec![(int(), Covariant)]);
    let iterable = applied("scala.Iterable", vec![(int(), Covariant)]);
    assert!(tag.stable_bases.contains(&seq, &iterable));
}

#[test]
fn test_generic_stable_bases_use_positional_parameters() {
    let p = Prelude::new();
    let u = &p.universe;
    let tag = builder(u).make_tag(&u.type_ref(p.list)).expect("builds");

    let child = lambda(&["0"], applied("scala.List", vec![(param("0"), Covariant)]));
    let parents: BTreeSet<_> = tag.stable_parents(&child).cloned().collect();

    assert!(parents.contains(&lambda(
        &["0"],
        applied("scala.Seq", vec![(param("0"), Covariant)])
    )));
    assert!(parents.contains(&lambda(
        &["0"],
        applied("scala.Iterable", vec![(param("0"), Covariant)])
    )));
    // a base that ignores the parameter collapses to its body
    assert!(parents.contains(&ty_name("scala.Product")));
    assert_eq!(parents.len(), 3);
}

#[test]
fn test_generic_alias_stable_bases_follow_expansion() {
    let p = Prelude::new();
    let u = &p.universe;
    let tag = builder(u)
        .make_tag(&u.type_ref(p.str_map_alias))
        .expect("builds");

    let child = lambda(
        &["0"],
        applied(
            "scala.Map",
            vec![(string(), Invariant), (param("0"), Covariant)],
        ),
    );
    let entry = applied(
        "scala.Tuple2",
        vec![(string(), Covariant), (param("0"), Covariant)],
    );
    let iterable = lambda(&["0"], applied("scala.Iterable", vec![(entry, Covariant)]));
    assert!(tag.stable_bases.contains(&child, &iterable));
}

#[test]
fn test_unapplied_inheritance_is_argument_free() {
    let p = Prelude::new();
    let tag = builder(&p.universe)
        .make_tag(&p.list_of(p.int_type()))
        .expect("builds");

    let parents = parents_of(&tag, "scala.List");
    let expected = ["scala.Seq", "scala.Iterable", "scala.Product"].map(name_ref);
    assert_eq!(parents, expected.iter().collect::<BTreeSet<_>>());
    assert!(parents_of(&tag, "scala.Seq").contains(&name_ref("scala.Iterable")));
}

#[test]
fn test_unapplied_inheritance_of_unapplied_generic() {
    let p = Prelude::new();
    let u = &p.universe;
    let tag = builder(u).make_tag(&u.type_ref(p.list)).expect("builds");

    let parents = parents_of(&tag, "scala.List");
    assert!(parents.contains(&name_ref("scala.Seq")));
    assert!(parents.contains(&name_ref("scala.Product")));
}

#[test]
fn test_alias_edge_points_at_expansion() {
    let p = Prelude::new();
    let u = &p.universe;
    let tag = builder(u).make_tag(&u.type_ref(p.str_alias)).expect("builds");

    let alias = NameReference::new(SymName::ty("scala.Predef.Str"))
        .with_prefix(Some(AbstractReference::term_name("scala.Predef")));
    let targets: Vec<_> = tag.unapplied_parents(&alias).collect();
    assert_eq!(targets, vec![&name_ref("scala.String")]);
}

#[test]
fn test_unapplied_generic_alias_inherits_through_its_expansion() {
    let p = Prelude::new();
    let u = &p.universe;
    let b = builder(u);
    let tag = b.make_tag(&u.type_ref(p.str_map_alias)).expect("builds");

    let alias = NameReference::new(SymName::ty("scala.Predef.StrMap"))
        .with_prefix(Some(AbstractReference::term_name("scala.Predef")));
    let targets: Vec<_> = tag.unapplied_parents(&alias).collect();
    assert_eq!(targets, vec![&name_ref("scala.Map")]);
    assert!(parents_of(&tag, "scala.Map").contains(&name_ref("scala.Iterable")));

    let applied_tag = b
        .make_tag(&u.applied(p.str_map_alias, vec![p.int_type()]))
        .expect("builds");
    assert_eq!(tag.unapplied_inheritance, applied_tag.unapplied_inheritance);
}

#[test]
fn test_singleton_inherits_from_module_parents() {
    let p = Prelude::new();
    let u = &p.universe;
    let tag = builder(u).make_tag(&u.single(p.none)).expect("builds");

    let none = NameReference::new(SymName::term("scala.None"));
    let parents: BTreeSet<_> = tag.unapplied_parents(&none).collect();
    assert!(parents.contains(&name_ref("scala.Option")));
    assert!(parents.contains(&name_ref("scala.Product")));
}

#[test]
fn test_no_self_edges() {
    let p = Prelude::new();
    let b = builder(&p.universe);
    for (name, ty) in p.samples() {
        let tag = b.make_tag(&ty).expect("builds");
        for (child, parents) in tag.unapplied_inheritance.iter() {
            assert!(!parents.contains(child), "sample {name}: {child} inherits itself");
        }
        for (child, parents) in tag.stable_bases.iter() {
            assert!(!parents.contains(child), "sample {name}: {child} is its own base");
        }
    }
}
