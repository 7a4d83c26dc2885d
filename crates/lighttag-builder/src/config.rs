//! Builder configuration.
//!
//! Defaults cache root references and serialize access to the host's
//! reflection API. Both can be overridden from the environment:
//!
//! - `LIGHTTAG_CACHE=off|0|false|no` disables the reference cache
//! - `LIGHTTAG_SERIALIZE_REFLECTION=off|0|false|no` drops the reflection lock
//!   for hosts whose reflection is thread-safe

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheMode {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderConfig {
    pub cache: CacheMode,
    /// Hold the builder's reflection lock around every top-level build.
    pub serialize_reflection: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            cache: CacheMode::Enabled,
            serialize_reflection: true,
        }
    }
}

impl BuilderConfig {
    pub const CACHE_ENV: &'static str = "LIGHTTAG_CACHE";
    pub const SERIALIZE_REFLECTION_ENV: &'static str = "LIGHTTAG_SERIALIZE_REFLECTION";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or
    /// unrecognised values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(enabled) = lookup(Self::CACHE_ENV).as_deref().and_then(parse_switch) {
            config.cache = if enabled {
                CacheMode::Enabled
            } else {
                CacheMode::Disabled
            };
        }
        if let Some(serialize) = lookup(Self::SERIALIZE_REFLECTION_ENV)
            .as_deref()
            .and_then(parse_switch)
        {
            config.serialize_reflection = serialize;
        }
        config
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = CacheMode::Disabled;
        self
    }

    pub fn with_serialized_reflection(mut self, serialize: bool) -> Self {
        self.serialize_reflection = serialize;
        self
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
