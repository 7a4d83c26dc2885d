use super::reporter::{Reporter, TagReport};
use lighttag_builder::{BuilderConfig, TagBuilder};
use lighttag_model::{LightTypeTag, RenderStyle};
use lighttag_reflect::Prelude;

fn tag_for(prelude: &Prelude, sample: &str) -> LightTypeTag {
    let ty = prelude.sample(sample).expect("sample exists");
    TagBuilder::new(&prelude.universe, BuilderConfig::default())
        .make_tag(&ty)
        .expect("tag builds")
}

#[test]
fn text_report_lists_reference_and_edges() {
    let prelude = Prelude::new();
    let tag = tag_for(&prelude, "List[Int]");
    let text = Reporter::new(false, RenderStyle::Long).render_tag("List[Int]", &tag);

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("List[Int]: scala.List[+scala.Int]"));
    assert!(text.contains("  stable bases (4):"), "{text}");
    assert!(
        text.contains("    scala.List[+scala.Int] <: scala.Seq[+scala.Int]\n"),
        "{text}"
    );
    assert!(text.contains("    scala.List <: scala.Product\n"), "{text}");
}

#[test]
fn text_report_marks_empty_databases() {
    let prelude = Prelude::new();
    let tag = tag_for(&prelude, "Int");
    let text = Reporter::new(false, RenderStyle::Long).render_tag("Int", &tag);

    assert_eq!(
        text,
        "Int: scala.Int\n  stable bases (0):\n    none\n  unapplied inheritance (0):\n    none\n"
    );
}

#[test]
fn short_style_drops_qualifiers() {
    let prelude = Prelude::new();
    let tag = tag_for(&prelude, "List[Int]");
    let text = Reporter::new(false, RenderStyle::Short).render_tag("List[Int]", &tag);

    assert!(text.starts_with("List[Int]: List[+Int]\n"), "{text}");
    assert!(!text.contains("scala."), "{text}");
}

#[test]
fn json_report_embeds_the_tag() {
    let prelude = Prelude::new();
    let tag = tag_for(&prelude, "Option[String]");
    let report = TagReport::new("Option[String]", &tag, RenderStyle::Long);

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["name"], "Option[String]");
    assert_eq!(value["rendered"], "scala.Option[+scala.String]");

    let tag_json = serde_json::to_string(&value["tag"]).expect("tag value serializes");
    let decoded: LightTypeTag = serde_json::from_str(&tag_json).expect("tag deserializes");
    assert_eq!(decoded, tag);
}
