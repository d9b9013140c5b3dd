//! Compile time dependency injection.
//!
//! A provider (declared with [`provider!`]) owns the leaf dependencies of the
//! application, usually configuration values. Every other service derives
//! [`Build`] and is assembled recursively from the provider. Built services
//! are cached, so each type is only constructed once per provider.

extern crate self as taxai_di;

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

pub use taxai_di_derive::Build;

mod macros;

/// Services already built by a provider, keyed by their type.
#[derive(Debug, Default)]
pub struct Cache(HashMap<TypeId, Box<dyn Any>>);

impl Cache {
    fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.0.get(&TypeId::of::<T>())?.downcast_ref().cloned()
    }

    fn insert<T: 'static>(&mut self, value: T) {
        self.0.insert(TypeId::of::<T>(), Box::new(value));
    }
}

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut Cache;

    /// Return the cached instance of `T` or build and cache a new one.
    fn cached<T: Clone + 'static>(&mut self, build: impl FnOnce(&mut Self) -> T) -> T {
        if let Some(value) = self.cache().get() {
            return value;
        }

        let value = build(self);
        self.cache().insert(value.clone());
        value
    }
}

#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be built by the provider `{P}`",
    note = "add `{Self}` to `{P}` or derive `Build` for it and make sure all of its fields can be \
            built by `{P}`"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provides for P {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Secret(Arc<str>);

    #[derive(Debug, Clone, Build)]
    struct Service {
        secret: Secret,
        #[state]
        calls: Arc<()>,
    }

    #[derive(Debug, Clone, Build)]
    struct Outer {
        a: Service,
        b: Service,
    }

    #[derive(Debug, Clone, Build)]
    struct Generic<S>(S);

    crate::provider! {
        TestProvider { secret: Secret, }
    }

    fn provider() -> TestProvider {
        TestProvider {
            _cache: Default::default(),
            secret: Secret("s3cr3t".into()),
        }
    }

    #[test]
    fn provide_builds_dependencies() {
        let service: Service = provider().provide();

        assert_eq!(service.secret, Secret("s3cr3t".into()));
    }

    #[test]
    fn provide_caches_services() {
        let outer: Outer = provider().provide();

        assert!(Arc::ptr_eq(&outer.a.calls, &outer.b.calls));
    }

    #[test]
    fn provide_generic() {
        let Generic(service): Generic<Service> = provider().provide();

        assert_eq!(service.secret, Secret("s3cr3t".into()));
    }

    #[test]
    fn separate_providers_do_not_share_state() {
        let a: Service = provider().provide();
        let b: Service = provider().provide();

        assert!(!Arc::ptr_eq(&a.calls, &b.calls));
    }
}
