use super::*;
use std::collections::BTreeSet;

fn int() -> AbstractReference {
    AbstractReference::type_name("scala.Int")
}

fn string() -> AbstractReference {
    AbstractReference::type_name("scala.String")
}

#[test]
fn test_structural_equality_of_independently_built_references() {
    let a = AbstractReference::applied(
        SymName::ty("scala.List"),
        vec![TypeParam::new(int(), Variance::Covariant)],
    );
    let b = AbstractReference::applied(
        SymName::ty("scala.List"),
        vec![TypeParam::new(int(), Variance::Covariant)],
    );
    assert_eq!(a, b);

    let mut set = BTreeSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn test_term_and_type_names_do_not_collide() {
    assert_ne!(
        AbstractReference::term_name("app.Foo"),
        AbstractReference::type_name("app.Foo")
    );
}

#[test]
fn test_maybe_intersection_single_part_is_unwrapped() {
    let single = AbstractReference::maybe_intersection([int()]);
    assert_eq!(single, int());
}

#[test]
fn test_maybe_intersection_flattens_nested_parts() {
    let inner = AbstractReference::maybe_intersection([int(), string()]);
    let outer =
        AbstractReference::maybe_intersection([inner, AbstractReference::type_name("app.A")]);

    match outer {
        AbstractReference::Intersection(intersection) => {
            assert_eq!(intersection.parts.len(), 3);
            assert!(
                intersection
                    .parts
                    .iter()
                    .all(|part| !matches!(part, AbstractReference::Intersection(_)))
            );
        }
        other => panic!("expected intersection, got {other:?}"),
    }
}

#[test]
fn test_lambda_referenced_parameters() {
    let p0 = LambdaParameter::new("0:0");
    let p1 = LambdaParameter::new("0:1");
    let body = AbstractReference::applied(
        SymName::ty("scala.Either"),
        vec![
            TypeParam::new(p0.reference().into(), Variance::Covariant),
            TypeParam::new(int(), Variance::Covariant),
        ],
    );
    let lambda = Lambda::new(vec![p0.clone(), p1], body);

    let referenced = lambda.referenced();
    assert_eq!(referenced.len(), 1);
    assert!(referenced.contains(&p0));
    assert!(lambda.some_arguments_referenced());
    assert!(!lambda.all_arguments_referenced());
}

#[test]
fn test_lambda_collapse_unused_returns_body() {
    let lambda = Lambda::new(vec![LambdaParameter::new("0:0")], int());
    assert_eq!(lambda.collapse_unused(), int());
}

#[test]
fn test_lambda_collapse_keeps_used_lambda() {
    let param = LambdaParameter::new("0:0");
    let lambda = Lambda::new(vec![param.clone()], param.reference().into());
    assert!(matches!(
        lambda.collapse_unused(),
        AbstractReference::Lambda(_)
    ));
}

#[test]
fn test_referenced_sees_names_inside_boundaries_and_prefixes() {
    let param = LambdaParameter::new("1:0");
    let bounded = NameReference::new(SymName::ty("app.T")).with_boundaries(Boundaries::defined(
        param.reference().into(),
        AbstractReference::type_name("scala.Any"),
    ));
    let lambda = Lambda::new(vec![param], bounded.into());
    assert!(lambda.all_arguments_referenced());
}

#[test]
fn test_as_name_strips_arguments_and_keeps_prefix() {
    let full = FullReference {
        name: SymName::ty("app.Outer.Inner"),
        parameters: vec![TypeParam::new(int(), Variance::Invariant)],
        prefix: Some(Box::new(AbstractReference::term_name("app.Outer"))),
    };
    let name = AbstractReference::Full(full).as_name().expect("named reference");
    assert_eq!(name.name, SymName::ty("app.Outer.Inner"));
    assert_eq!(
        name.prefix.as_deref(),
        Some(&AbstractReference::term_name("app.Outer"))
    );

    let lambda = AbstractReference::Lambda(Lambda::new(vec![], int()));
    assert!(lambda.as_name().is_none());
}

#[test]
fn test_capability_accessors() {
    let name = AbstractReference::type_name("scala.Int");
    assert!(name.is_applied());
    assert!(name.is_named());
    assert_eq!(name.boundaries(), Some(&Boundaries::Empty));

    let lambda = AbstractReference::Lambda(Lambda::new(vec![], int()));
    assert!(!lambda.is_applied());
    assert!(lambda.sym_name().is_none());

    let intersection = AbstractReference::maybe_intersection([int(), string()]);
    assert!(intersection.is_applied());
    assert!(!intersection.is_named());
}

#[test]
fn test_multimap_drops_empty_keys_on_retain() {
    let mut map: MultiMap<String, String> = MultiMap::new();
    map.insert("a".into(), "a".into());
    map.insert("b".into(), "c".into());
    map.retain(|k, v| k != v);

    assert!(!map.contains_key(&"a".to_string()));
    assert!(map.contains(&"b".to_string(), &"c".to_string()));
    assert_eq!(map.edge_count(), 1);
}
