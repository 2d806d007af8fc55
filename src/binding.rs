//! Registered bindings
//!
//! A [`Binding`] pairs a key with a type-erased constructor and, for
//! singletons, the cell that caches the first successful result.
//!
//! Instances are stored as `Arc<dyn Any>` wrapping the caller-facing
//! `Arc<T>`, which lets `T` be unsized (`dyn Trait`) and keeps the downcast
//! checked.

use crate::Container;
use crate::error::{DiError, Result};
use crate::factory::{Factory, Parameter};
use crate::key::BindingKey;
use crate::options::Lifetime;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Type-erased instance as held by the container.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased constructor
type Construct = Box<dyn Fn(&Container, &BindingKey) -> Result<Instance> + Send + Sync>;

enum Lifecycle {
    /// Built at most once; failures are not cached
    Singleton {
        construct: Construct,
        instance: OnceCell<Instance>,
    },
    /// Built on every resolve
    Transient { construct: Construct },
}

/// One entry of the registry.
pub(crate) struct Binding {
    key: BindingKey,
    parameters: Vec<Parameter>,
    lifecycle: Lifecycle,
}

impl Binding {
    pub(crate) fn new<F, Args>(key: BindingKey, factory: F, lifetime: Lifetime) -> Self
    where
        F: Factory<Args>,
        Args: 'static,
    {
        let parameters = F::parameters();
        let construct: Construct = Box::new(move |container: &Container, key: &BindingKey| {
            factory
                .invoke(container, key)
                .map(|service| Arc::new(service) as Instance)
        });

        let lifecycle = match lifetime {
            Lifetime::Singleton => Lifecycle::Singleton {
                construct,
                instance: OnceCell::new(),
            },
            Lifetime::Transient => Lifecycle::Transient { construct },
        };

        Self {
            key,
            parameters,
            lifecycle,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &BindingKey {
        &self.key
    }

    #[inline]
    pub(crate) fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The cached singleton instance, if construction already succeeded.
    #[inline]
    pub(crate) fn cached(&self) -> Option<Instance> {
        match &self.lifecycle {
            Lifecycle::Singleton { instance, .. } => instance.get().cloned(),
            Lifecycle::Transient { .. } => None,
        }
    }

    /// Produce an instance, running the factory if needed.
    ///
    /// Concurrent callers of an uninitialised singleton block until the one
    /// running the factory finishes; if it fails, the next caller retries.
    pub(crate) fn produce(&self, container: &Container) -> Result<Instance> {
        match &self.lifecycle {
            Lifecycle::Singleton {
                construct,
                instance,
            } => instance
                .get_or_try_init(|| {
                    #[cfg(feature = "logging")]
                    debug!(
                        target: "service_locator",
                        service = self.key.type_name(),
                        name = self.key.name(),
                        "Constructing singleton"
                    );

                    construct(container, &self.key)
                })
                .cloned(),
            Lifecycle::Transient { construct } => {
                #[cfg(feature = "logging")]
                trace!(
                    target: "service_locator",
                    service = self.key.type_name(),
                    name = self.key.name(),
                    "Constructing transient instance"
                );

                construct(container, &self.key)
            }
        }
    }
}

/// Recover the caller-facing `Arc<T>` from a stored instance.
#[inline]
pub(crate) fn downcast<T: ?Sized + Send + Sync + 'static>(
    instance: &Instance,
    key: &BindingKey,
) -> Result<Arc<T>> {
    instance.downcast_ref::<Arc<T>>().cloned().ok_or_else(|| {
        DiError::Internal(format!("stored instance for {key} has an unexpected type"))
    })
}
