use super::*;

#[test]
fn test_render_applied_reference() {
    let list = AbstractReference::applied(
        SymName::ty("scala.List"),
        vec![TypeParam::new(
            AbstractReference::type_name("scala.Int"),
            Variance::Covariant,
        )],
    );
    assert_eq!(list.to_string(), "scala.List[+scala.Int]");
    assert_eq!(list.short_name(), "List[+Int]");
}

#[test]
fn test_render_lambda_with_placeholders() {
    let param = LambdaParameter::new("0:0");
    let body = AbstractReference::applied(
        SymName::ty("scala.Option"),
        vec![TypeParam::new(param.reference().into(), Variance::Covariant)],
    );
    let lambda = AbstractReference::Lambda(Lambda::new(vec![param], body));
    assert_eq!(lambda.to_string(), "λ %0:0 → scala.Option[+%0:0]");
}

#[test]
fn test_render_term_literal_and_prefix() {
    let inner = NameReference::new(SymName::ty("app.Outer.Inner"))
        .with_prefix(Some(AbstractReference::term_name("app.Outer")));
    assert_eq!(inner.to_string(), "app.Outer.type::app.Outer.Inner");

    let literal = AbstractReference::from(NameReference::new(SymName::literal("42")));
    assert_eq!(literal.to_string(), "\"42\"");
}

#[test]
fn test_render_refinement() {
    let parent = AbstractReference::maybe_intersection([
        AbstractReference::type_name("app.A"),
        AbstractReference::type_name("app.B"),
    ]);
    let mut decls = std::collections::BTreeSet::new();
    decls.insert(RefinementDecl::Signature {
        name: "size".into(),
        params: vec![],
        result: Box::new(AbstractReference::type_name("scala.Int")),
    });
    let refinement = AbstractReference::Refinement(Refinement {
        parent: Box::new(parent),
        decls,
    });
    assert_eq!(refinement.short_name(), "({A & B}){def size(): Int}");
}
