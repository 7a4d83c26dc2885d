use super::*;

fn sample_tag() -> LightTypeTag {
    let int = AbstractReference::type_name("scala.Int");
    let list = AbstractReference::applied(
        SymName::ty("scala.List"),
        vec![TypeParam::new(int.clone(), Variance::Covariant)],
    );
    let seq = AbstractReference::applied(
        SymName::ty("scala.Seq"),
        vec![TypeParam::new(int, Variance::Covariant)],
    );

    let mut stable_bases = StableBases::new();
    stable_bases.insert(list.clone(), seq);

    let mut unapplied = UnappliedInheritance::new();
    unapplied.insert(
        NameReference::new(SymName::ty("scala.List")),
        NameReference::new(SymName::ty("scala.Seq")),
    );

    LightTypeTag::new(list, stable_bases, unapplied)
}

#[test]
fn test_tag_json_round_trip() {
    let tag = sample_tag();
    let json = serde_json::to_string(&tag).expect("serialize tag");
    let decoded: LightTypeTag = serde_json::from_str(&json).expect("deserialize tag");
    assert_eq!(decoded, tag);
}

#[test]
fn test_multimap_serializes_as_entry_sequence() {
    let tag = sample_tag();
    let value = serde_json::to_value(&tag.unapplied_inheritance).expect("serialize map");
    let entries = value.as_array().expect("multimap encodes as a sequence");
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_unapplied_parents_lookup() {
    let tag = sample_tag();
    let parents: Vec<_> = tag
        .unapplied_parents(&NameReference::new(SymName::ty("scala.List")))
        .collect();
    assert_eq!(parents, vec![&NameReference::new(SymName::ty("scala.Seq"))]);
}
