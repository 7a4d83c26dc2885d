//! Top-level entry point.

use crate::builder::ReferenceBuilder;
use crate::cache::ReferenceCache;
use crate::config::{BuilderConfig, CacheMode};
use crate::error::BuildError;
use crate::inheritance::InheritanceBuilder;
use crate::walker::walk;
use lighttag_model::{AbstractReference, LightTypeTag};
use lighttag_reflect::{TypeHandle, TypeSystem};
use std::sync::{Arc, Mutex};
use tracing::{debug, debug_span};

/// Builds tags for types of one [`TypeSystem`].
///
/// Top-level calls run under the builder's reflection lock unless
/// [`BuilderConfig::serialize_reflection`] is off. Root references go through
/// the [`ReferenceCache`] unless caching is disabled.
pub struct TagBuilder<'a, S: TypeSystem>
where
    S::Type: TypeHandle,
{
    system: &'a S,
    config: BuilderConfig,
    cache: Option<Arc<ReferenceCache<S::Type>>>,
    reflection: Mutex<()>,
}

impl<'a, S: TypeSystem> TagBuilder<'a, S>
where
    S::Type: TypeHandle,
{
    pub fn new(system: &'a S, config: BuilderConfig) -> Self {
        Self::with_cache(system, config, Arc::new(ReferenceCache::new()))
    }

    /// Share `cache` with other builders over the same type system. Ignored
    /// when the config disables caching.
    pub fn with_cache(
        system: &'a S,
        config: BuilderConfig,
        cache: Arc<ReferenceCache<S::Type>>,
    ) -> Self {
        let cache = match config.cache {
            CacheMode::Enabled => Some(cache),
            CacheMode::Disabled => None,
        };
        Self {
            system,
            config,
            cache,
            reflection: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&Arc<ReferenceCache<S::Type>>> {
        self.cache.as_ref()
    }

    /// The full tag: root descriptor plus both inheritance databases.
    pub fn make_tag(&self, ty: &S::Type) -> Result<LightTypeTag, BuildError> {
        self.with_reflection(|| {
            let span = debug_span!("make_tag", ?ty);
            let _enter = span.enter();

            let references = ReferenceBuilder::new(self.system);
            let reference = self.root_reference(&references, ty)?;

            let inheritance = InheritanceBuilder::new(&references);
            let components = inheritance.close_over_bases(&walk(self.system, ty));
            let stable_bases = inheritance.stable_bases(&components)?;
            let unapplied_inheritance = inheritance.unapplied_inheritance(&components)?;
            debug!(
                %reference,
                components = components.len(),
                stable_bases = stable_bases.edge_count(),
                unapplied = unapplied_inheritance.edge_count(),
                "built tag"
            );

            Ok(LightTypeTag::new(
                AbstractReference::clone(&reference),
                stable_bases,
                unapplied_inheritance,
            ))
        })
    }

    /// The root descriptor only.
    pub fn make_ref(&self, ty: &S::Type) -> Result<Arc<AbstractReference>, BuildError> {
        self.with_reflection(|| {
            let references = ReferenceBuilder::new(self.system);
            self.root_reference(&references, ty)
        })
    }

    fn root_reference(
        &self,
        references: &ReferenceBuilder<'_, S>,
        ty: &S::Type,
    ) -> Result<Arc<AbstractReference>, BuildError> {
        let build = || references.build(&self.system.dealias(ty));
        match &self.cache {
            Some(cache) => cache.get_or_build(ty, build),
            None => build().map(Arc::new),
        }
    }

    pub(crate) fn with_reflection<R>(&self, f: impl FnOnce() -> R) -> R {
        if !self.config.serialize_reflection {
            return f();
        }
        let _guard = match self.reflection.lock() {
            Ok(guard) => guard,
            Err(e) => e.into_inner(),
        };
        f()
    }
}
