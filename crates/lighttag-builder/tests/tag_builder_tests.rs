use super::*;
use crate::test_support::*;
use lighttag_model::{LightTypeTag, Variance};
use lighttag_reflect::{MemberDecl, Prelude, TypeData};
use std::io::Write;
use std::sync::{Arc, Mutex};

#[test]
fn test_tag_displays_its_reference() {
    let p = Prelude::new();
    let tag = builder(&p.universe)
        .make_tag(&p.list_of(p.int_type()))
        .expect("builds");

    assert_eq!(
        tag.reference,
        applied("scala.List", vec![(int(), Variance::Covariant)])
    );
    assert_eq!(tag.to_string(), "scala.List[+scala.Int]");
}

#[test]
fn test_every_sample_builds() {
    let p = Prelude::new();
    let b = builder(&p.universe);
    for (name, ty) in p.samples() {
        let tag = b.make_tag(&ty);
        assert!(tag.is_ok(), "sample {name}: {:?}", tag.err());
    }
}

#[test]
fn test_tag_survives_json_round_trip() {
    let p = Prelude::new();
    let b = builder(&p.universe);
    for name in ["List", "Predef.StrMap", "Functor[List]", "None.type"] {
        let ty = p.sample(name).expect("sample exists");
        let tag = b.make_tag(&ty).expect("builds");
        let json = serde_json::to_string(&tag).expect("serializes");
        let back: LightTypeTag = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, tag, "sample {name}");
    }
}

#[test]
fn test_tags_are_equal_across_universes() {
    let first = Prelude::new();
    let second = Prelude::new();
    let (a, b) = (builder(&first.universe), builder(&second.universe));

    for (name, ty) in first.samples() {
        let other = second.sample(name).expect("same samples");
        assert_eq!(
            a.make_tag(&ty).expect("builds"),
            b.make_tag(&other).expect("builds"),
            "sample {name}"
        );
    }
}

#[test]
fn test_inconsistent_type_is_an_error_and_not_cached() {
    let p = Prelude::new();
    let u = &p.universe;
    let broken = TypeData::refined(
        vec![p.int_type()],
        vec![MemberDecl::Method {
            name: "xs".into(),
            param_lists: Vec::new(),
            result: u.type_ref(p.list),
        }],
    );

    let b = builder(u);
    let err = b.make_tag(&broken).expect_err("member is a lambda");
    assert!(err.to_string().starts_with("inconsistent type"), "{err}");
    assert!(b.cache().is_some_and(|cache| cache.is_empty()));
}

#[test]
fn test_root_reference_is_cached_by_make_tag() {
    let p = Prelude::new();
    let b = builder(&p.universe);
    let ty = p.option_of(p.string_type());

    let tag = b.make_tag(&ty).expect("builds");
    let reference = b.make_ref(&ty).expect("builds");
    assert_eq!(*reference, tag.reference);
    assert_eq!(
        b.cache().map(|cache| cache.stats()),
        Some(CacheStats { hits: 1, misses: 1 })
    );
}

#[test]
fn test_reflection_lock_recovers_from_poisoning() {
    let p = Prelude::new();
    let b = builder(&p.universe);
    let ty = p.int_type();

    let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        b.with_reflection::<()>(|| panic!("host panicked mid-reflection"))
    }));
    assert!(poisoned.is_err());
    assert_eq!(*b.make_ref(&ty).expect("builds"), int());
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut out) => out.extend_from_slice(buf),
            Err(e) => e.into_inner().extend_from_slice(buf),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        let bytes = match self.0.lock() {
            Ok(out) => out.clone(),
            Err(e) => e.into_inner().clone(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[test]
fn test_make_tag_logs_summary_and_unused_parameters() {
    let mut p = Prelude::new();
    let x = p.universe.free_type_param(p.scala, "X", Variance::Invariant);
    let constant_lambda = TypeData::poly(vec![x], p.int_type());

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let b = builder(&p.universe);
        b.make_tag(&p.list_of(p.int_type())).expect("builds");
        b.make_ref(&constant_lambda).expect("builds");
    });

    let text = logs.text();
    assert!(text.contains("built tag"), "{text}");
    assert!(text.contains("reference cache miss"), "{text}");
    assert!(text.contains("WARN"), "{text}");
}
