use super::*;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
    }
}

#[test]
fn test_defaults_cache_and_serialize() {
    let config = BuilderConfig::default();
    assert_eq!(config.cache, CacheMode::Enabled);
    assert!(config.serialize_reflection);
    assert_eq!(BuilderConfig::from_lookup(lookup(&[])), config);
}

#[test]
fn test_cache_switched_off_from_env() {
    for value in ["off", "0", "false", "No"] {
        let config = BuilderConfig::from_lookup(lookup(&[("LIGHTTAG_CACHE", value)]));
        assert_eq!(config.cache, CacheMode::Disabled, "value {value:?}");
        assert!(config.serialize_reflection);
    }
}

#[test]
fn test_reflection_lock_switched_off_from_env() {
    let config = BuilderConfig::from_lookup(lookup(&[("LIGHTTAG_SERIALIZE_REFLECTION", "0")]));
    assert!(!config.serialize_reflection);
    assert_eq!(config.cache, CacheMode::Enabled);
}

#[test]
fn test_unrecognised_values_keep_defaults() {
    let config = BuilderConfig::from_lookup(lookup(&[
        ("LIGHTTAG_CACHE", "sometimes"),
        ("LIGHTTAG_SERIALIZE_REFLECTION", ""),
    ]));
    assert_eq!(config, BuilderConfig::default());
}

#[test]
fn test_builder_methods() {
    let config = BuilderConfig::default()
        .without_cache()
        .with_serialized_reflection(false);
    assert_eq!(config.cache, CacheMode::Disabled);
    assert!(!config.serialize_reflection);
}
