//! Deferred dependency handles.

use crate::Container;
use crate::error::{DiError, Result};
use crate::factory::Injectable;
use crate::storage::ServiceStorage;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Weak};

/// A handle that resolves `T` on demand.
///
/// Declaring a `Lazy<T>` factory parameter defers resolution of `T` until
/// [`resolve`](Lazy::resolve) is called, which is how two services can refer
/// to each other. Every call performs a fresh lookup, so the handle observes
/// rebinds and (for transient bindings) yields a new instance each time.
///
/// The handle keeps only a weak reference to its container; once every
/// [`Container`] clone is gone, resolving returns
/// [`DiError::ContainerDropped`].
///
/// # Examples
///
/// ```rust
/// use service_locator::{BindOptions, Container, Lazy};
/// use std::sync::Arc;
///
/// struct Parent { child: Lazy<Child> }
/// struct Child { _parent: Arc<Parent> }
///
/// let container = Container::new();
/// container.bind(|child: Lazy<Child>| Arc::new(Parent { child }), BindOptions::default()).unwrap();
/// container.bind(|parent: Arc<Parent>| Arc::new(Child { _parent: parent }), BindOptions::default()).unwrap();
///
/// let parent = container.resolve::<Parent>().unwrap();
/// let child = parent.child.resolve().unwrap();
/// assert!(Arc::ptr_eq(&child._parent, &parent));
/// ```
pub struct Lazy<T: ?Sized> {
    storage: Weak<ServiceStorage>,
    _target: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Injectable> Lazy<T> {
    pub(crate) fn new(container: &Container) -> Self {
        Self {
            storage: container.downgrade(),
            _target: PhantomData,
        }
    }

    /// Resolve the default binding of `T`.
    pub fn resolve(&self) -> Result<Arc<T>> {
        self.container()?.resolve::<T>()
    }

    /// Resolve the binding of `T` registered under `name`.
    pub fn resolve_named(&self, name: &str) -> Result<Arc<T>> {
        self.container()?.resolve_named::<T>(name)
    }

    #[inline]
    fn container(&self) -> Result<Container> {
        self.storage
            .upgrade()
            .map(Container::from_storage)
            .ok_or(DiError::ContainerDropped)
    }
}

impl<T: ?Sized> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            _target: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("target", &std::any::type_name::<T>())
            .field("attached", &(self.storage.strong_count() > 0))
            .finish()
    }
}
