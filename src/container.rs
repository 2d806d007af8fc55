//! Service-location container
//!
//! The `Container` holds the binding registry and runs resolution: look the
//! key up, then let the binding produce an instance, recursively resolving the
//! factory's parameters through the same container.

use crate::binding::{self, Binding, Instance};
use crate::error::{DiError, Result};
use crate::factory::{Factory, Injectable};
use crate::guard::ResolutionGuard;
use crate::key::BindingKey;
use crate::options::{BindOptions, Timing};
use crate::storage::ServiceStorage;
use std::any::TypeId;
use std::sync::{Arc, Weak};

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Runtime service-location container.
///
/// Cloning a `Container` is cheap and yields a handle to the same registry.
/// Every operation takes `&self` and is safe to call from many threads.
///
/// # Examples
///
/// ```rust
/// use service_locator::{BindOptions, Container};
/// use std::sync::Arc;
///
/// struct Database { url: String }
///
/// let container = Container::new();
/// container
///     .bind(|| Arc::new(Database { url: "postgres://localhost".into() }), BindOptions::default())
///     .unwrap();
///
/// let a = container.resolve::<Database>().unwrap();
/// let b = container.resolve::<Database>().unwrap();
/// assert_eq!(a.url, "postgres://localhost");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Clone)]
pub struct Container {
    storage: Arc<ServiceStorage>,
}

impl Container {
    /// Create an empty container.
    #[inline]
    pub fn new() -> Self {
        #[cfg(feature = "logging")]
        debug!(target: "service_locator", "Creating new service container");

        Self {
            storage: Arc::new(ServiceStorage::new()),
        }
    }

    #[inline]
    pub(crate) fn from_storage(storage: Arc<ServiceStorage>) -> Self {
        Self { storage }
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<ServiceStorage> {
        Arc::downgrade(&self.storage)
    }

    // =========================================================================
    // Registration Methods
    // =========================================================================

    /// Register `factory` under its output type and `options.name()`.
    ///
    /// A factory whose parameters include its own output type is rejected with
    /// [`DiError::InvalidResolver`]; take a [`Lazy`](crate::Lazy) handle instead.
    /// With [`Timing::Eager`] the factory runs before this call returns, and a
    /// construction failure is returned without storing anything.
    ///
    /// Registering the same type and name again replaces the previous binding.
    ///
    /// Calling `bind` from inside a factory is allowed; it never runs while the
    /// registry is locked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use service_locator::{BindOptions, Container};
    /// use std::sync::Arc;
    ///
    /// trait Cache: Send + Sync { fn kind(&self) -> &'static str; }
    /// struct Memory;
    /// impl Cache for Memory { fn kind(&self) -> &'static str { "memory" } }
    ///
    /// let container = Container::new();
    /// container
    ///     .bind(|| -> Arc<dyn Cache> { Arc::new(Memory) }, BindOptions::new().named("hot").eager())
    ///     .unwrap();
    ///
    /// assert_eq!(container.resolve_named::<dyn Cache>("hot").unwrap().kind(), "memory");
    /// ```
    pub fn bind<F, Args>(&self, factory: F, options: BindOptions) -> Result<()>
    where
        F: Factory<Args>,
        Args: 'static,
    {
        let key = BindingKey::named::<F::Service>(options.name());
        let binding = Binding::new(key, factory, options.lifetime());
        let key = binding.key();

        if let Some(param) = binding
            .parameters()
            .iter()
            .find(|p| !p.is_deferred() && p.type_id() == key.type_id())
        {
            #[cfg(feature = "logging")]
            debug!(
                target: "service_locator",
                service = key.type_name(),
                parameter = param.type_name(),
                "Rejecting factory that depends on its own output"
            );

            return Err(DiError::invalid_resolver(
                key,
                format!("can't depend on return type ({})", param.type_name()),
            ));
        }

        if options.timing() == Timing::Eager {
            #[cfg(feature = "logging")]
            debug!(
                target: "service_locator",
                service = key.type_name(),
                name = key.name(),
                lifetime = %options.lifetime(),
                "Constructing eager binding"
            );

            self.produce(&binding)?;
        }

        #[cfg(feature = "logging")]
        debug!(
            target: "service_locator",
            service = key.type_name(),
            name = key.name(),
            lifetime = %options.lifetime(),
            timing = %options.timing(),
            "Registering binding"
        );

        let _replaced = self.storage.insert(Arc::new(binding));

        #[cfg(feature = "logging")]
        if _replaced.is_some() {
            debug!(
                target: "service_locator",
                service = std::any::type_name::<F::Service>(),
                name = options.name(),
                "Replaced existing binding"
            );
        }

        Ok(())
    }

    /// Register a lazy transient binding under the default name.
    #[inline]
    pub fn bind_transient<F, Args>(&self, factory: F) -> Result<()>
    where
        F: Factory<Args>,
        Args: 'static,
    {
        self.bind(factory, BindOptions::new().transient())
    }

    /// Register a lazy singleton binding under `name`.
    #[inline]
    pub fn bind_named<F, Args>(&self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Factory<Args>,
        Args: 'static,
    {
        self.bind(factory, BindOptions::new().named(name))
    }

    /// Register a lazy transient binding under `name`.
    #[inline]
    pub fn bind_named_transient<F, Args>(&self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Factory<Args>,
        Args: 'static,
    {
        self.bind(factory, BindOptions::new().named(name).transient())
    }

    // =========================================================================
    // Resolution Methods
    // =========================================================================

    /// Resolve the default binding of `T`.
    ///
    /// Resolving a binding that is already being built on the same thread
    /// fails with [`DiError::CircularDependency`]. Two threads each building
    /// one side of a direct cycle can still block each other; take one side
    /// as [`Lazy`](crate::Lazy) instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use service_locator::{BindOptions, Container, DiError};
    /// use std::sync::Arc;
    ///
    /// #[derive(Debug)]
    /// struct Database;
    /// #[derive(Debug)]
    /// struct UserService { _db: Arc<Database> }
    ///
    /// let container = Container::new();
    /// container
    ///     .bind(|db: Arc<Database>| Arc::new(UserService { _db: db }), BindOptions::default())
    ///     .unwrap();
    ///
    /// // Database was never bound
    /// let err = container.resolve::<UserService>().unwrap_err();
    /// assert!(matches!(err, DiError::DependencyFailed { .. }));
    /// assert!(err.to_string().contains("Database"));
    /// ```
    #[inline]
    pub fn resolve<T: ?Sized + Injectable>(&self) -> Result<Arc<T>> {
        self.resolve_key(&BindingKey::of::<T>())
    }

    /// Resolve the binding of `T` registered under `name`.
    ///
    /// A default binding of `T` is never used as a fallback.
    #[inline]
    pub fn resolve_named<T: ?Sized + Injectable>(&self, name: &str) -> Result<Arc<T>> {
        self.resolve_key(&BindingKey::named::<T>(name))
    }

    /// Resolve every binding of `T`, one instance per name.
    ///
    /// The default binding comes first, then named bindings in name order.
    /// Each binding keeps its own lifetime. The first failure aborts the call.
    ///
    /// ```rust
    /// use service_locator::{BindOptions, Container};
    /// use std::sync::Arc;
    ///
    /// trait Plugin: Send + Sync { fn id(&self) -> u32; }
    /// struct P(u32);
    /// impl Plugin for P { fn id(&self) -> u32 { self.0 } }
    ///
    /// let container = Container::new();
    /// container.bind(|| -> Arc<dyn Plugin> { Arc::new(P(0)) }, BindOptions::default()).unwrap();
    /// container.bind_named("b", || -> Arc<dyn Plugin> { Arc::new(P(2)) }).unwrap();
    /// container.bind_named("a", || -> Arc<dyn Plugin> { Arc::new(P(1)) }).unwrap();
    ///
    /// let ids: Vec<u32> = container.resolve_all::<dyn Plugin>().unwrap().iter().map(|p| p.id()).collect();
    /// assert_eq!(ids, vec![0, 1, 2]);
    /// ```
    pub fn resolve_all<T: ?Sized + Injectable>(&self) -> Result<Vec<Arc<T>>> {
        let bindings = self.storage.get_all(TypeId::of::<T>());

        #[cfg(feature = "logging")]
        trace!(
            target: "service_locator",
            service = std::any::type_name::<T>(),
            count = bindings.len(),
            "Resolving all bindings"
        );

        bindings
            .iter()
            .map(|binding| {
                let instance = self.produce(binding)?;
                binding::downcast::<T>(&instance, binding.key())
            })
            .collect()
    }

    /// Resolve the default binding of `T`, discarding the error.
    #[inline]
    pub fn try_resolve<T: ?Sized + Injectable>(&self) -> Option<Arc<T>> {
        self.resolve::<T>().ok()
    }

    fn resolve_key<T: ?Sized + Injectable>(&self, key: &BindingKey) -> Result<Arc<T>> {
        #[cfg(feature = "logging")]
        trace!(
            target: "service_locator",
            service = key.type_name(),
            name = key.name(),
            "Resolving service"
        );

        // Lookup only; the registry is released before construction
        let Some(binding) = self.storage.get(key) else {
            #[cfg(feature = "logging")]
            debug!(
                target: "service_locator",
                service = key.type_name(),
                name = key.name(),
                "Service not found"
            );
            return Err(DiError::not_found(key));
        };

        let instance = self.produce(&binding)?;
        binding::downcast::<T>(&instance, key)
    }

    /// Return the cached singleton, or construct under the re-entrancy guard.
    fn produce(&self, binding: &Binding) -> Result<Instance> {
        if let Some(instance) = binding.cached() {
            #[cfg(feature = "logging")]
            trace!(
                target: "service_locator",
                service = binding.key().type_name(),
                name = binding.key().name(),
                "Returning cached singleton"
            );
            return Ok(instance);
        }

        let _guard = ResolutionGuard::enter(binding)?;
        binding.produce(self)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check whether a default binding of `T` exists.
    #[inline]
    pub fn contains<T: ?Sized + Injectable>(&self) -> bool {
        self.storage.contains(&BindingKey::of::<T>())
    }

    /// Check whether a binding of `T` named `name` exists.
    #[inline]
    pub fn contains_named<T: ?Sized + Injectable>(&self, name: &str) -> bool {
        self.storage.contains(&BindingKey::named::<T>(name))
    }

    /// Number of bindings across all types and names.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// True when nothing is bound.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Discard every binding.
    ///
    /// Instances already handed out stay valid; later resolutions fail with
    /// [`DiError::NotFound`] until types are bound again.
    pub fn clear(&self) {
        let _count = self.storage.clear();

        #[cfg(feature = "logging")]
        debug!(
            target: "service_locator",
            bindings_removed = _count,
            "Container cleared"
        );
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("binding_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lazy;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug)]
    struct Database {
        url: String,
    }

    #[derive(Debug)]
    struct UserService {
        db: Arc<Database>,
    }

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (calls.clone(), calls)
    }

    // =========================================================================
    // Lifetimes
    // =========================================================================

    #[test]
    fn test_singleton() {
        let container = Container::new();
        container
            .bind(
                || Arc::new(Database { url: "postgres://localhost".into() }),
                BindOptions::default(),
            )
            .unwrap();

        let a = container.resolve::<Database>().unwrap();
        let b = container.resolve::<Database>().unwrap();

        assert_eq!(a.url, "postgres://localhost");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_transient() {
        let container = Container::new();
        container
            .bind_transient(|| Arc::new(Database { url: "x".into() }))
            .unwrap();

        let a = container.resolve::<Database>().unwrap();
        let b = container.resolve::<Database>().unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_rebind_replaces_previous() {
        let container = Container::new();
        container
            .bind(|| Arc::new(Database { url: "first".into() }), BindOptions::default())
            .unwrap();
        let before = container.resolve::<Database>().unwrap();

        container
            .bind(|| Arc::new(Database { url: "second".into() }), BindOptions::default())
            .unwrap();

        assert_eq!(container.len(), 1);
        assert_eq!(container.resolve::<Database>().unwrap().url, "second");
        // Already returned instances are untouched
        assert_eq!(before.url, "first");
    }

    // =========================================================================
    // Timing
    // =========================================================================

    #[test]
    fn test_lazy_timing_defers_factory() {
        let (calls, seen) = counter();
        let container = Container::new();
        container
            .bind(
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(English)
                },
                BindOptions::default(),
            )
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 0);
        container.resolve::<English>().unwrap();
        container.resolve::<English>().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_eager_singleton_runs_once_during_bind() {
        let (calls, seen) = counter();
        let container = Container::new();
        container
            .bind(
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(English)
                },
                BindOptions::new().eager(),
            )
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        container.resolve::<English>().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_eager_transient_runs_during_bind_then_per_resolve() {
        let (calls, seen) = counter();
        let container = Container::new();
        container
            .bind(
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(English)
                },
                BindOptions::new().transient().eager(),
            )
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        container.resolve::<English>().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_eager_failure_stores_nothing() {
        let container = Container::new();
        container
            .bind(|| Arc::new(Database { url: "old".into() }), BindOptions::default())
            .unwrap();

        let err = container
            .bind(
                || -> std::result::Result<Arc<Database>, String> { Err("unreachable host".into()) },
                BindOptions::new().eager(),
            )
            .unwrap_err();

        assert!(matches!(err, DiError::CreationFailed { .. }));
        // The previous binding survives
        assert_eq!(container.resolve::<Database>().unwrap().url, "old");

        // A missing parameter fails the eager bind as well
        let err = container
            .bind(|_g: Arc<English>| Arc::new(1u8), BindOptions::new().eager())
            .unwrap_err();
        assert!(err.root_cause().is_not_found());
        assert!(!container.contains::<u8>());
    }

    // =========================================================================
    // Names
    // =========================================================================

    #[test]
    fn test_named_isolation() {
        let container = Container::new();
        container
            .bind(|| Arc::new(Database { url: "default".into() }), BindOptions::default())
            .unwrap();
        container
            .bind_named("replica", || Arc::new(Database { url: "replica".into() }))
            .unwrap();

        assert_eq!(container.resolve::<Database>().unwrap().url, "default");
        assert_eq!(
            container.resolve_named::<Database>("replica").unwrap().url,
            "replica"
        );

        let err = container.resolve_named::<Database>("missing").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("'missing'"));
    }

    #[test]
    fn test_named_transient() {
        let container = Container::new();
        container
            .bind_named_transient("scratch", || Arc::new(Database { url: "tmp".into() }))
            .unwrap();

        let a = container.resolve_named::<Database>("scratch").unwrap();
        let b = container.resolve_named::<Database>("scratch").unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!container.contains::<Database>());
        assert!(container.contains_named::<Database>("scratch"));
    }

    // =========================================================================
    // Registration checks
    // =========================================================================

    #[test]
    fn test_self_dependency_rejected_without_side_effects() {
        let (calls, seen) = counter();
        let container = Container::new();

        let err = container
            .bind(
                move |_db: Arc<Database>| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(Database { url: "loop".into() })
                },
                BindOptions::new().eager(),
            )
            .unwrap_err();

        assert!(matches!(err, DiError::InvalidResolver { .. }));
        assert!(err.to_string().contains("can't depend on return type"));
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert!(container.is_empty());
    }

    #[test]
    fn test_deferred_self_dependency_allowed() {
        struct Node {
            next: Lazy<Node>,
        }

        let container = Container::new();
        container
            .bind(|next: Lazy<Node>| Arc::new(Node { next }), BindOptions::default())
            .unwrap();

        let node = container.resolve::<Node>().unwrap();
        let next = node.next.resolve().unwrap();
        assert!(Arc::ptr_eq(&node, &next));
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    #[test]
    fn test_nested_resolution() {
        let container = Container::new();
        container
            .bind(|| Arc::new(Database { url: "db".into() }), BindOptions::default())
            .unwrap();
        container
            .bind(|db: Arc<Database>| Arc::new(UserService { db }), BindOptions::default())
            .unwrap();

        let users = container.resolve::<UserService>().unwrap();
        let db = container.resolve::<Database>().unwrap();
        assert!(Arc::ptr_eq(&users.db, &db));
    }

    #[test]
    fn test_missing_dependency_names_missing_type() {
        let container = Container::new();
        container
            .bind(|db: Arc<Database>| Arc::new(UserService { db }), BindOptions::default())
            .unwrap();

        let err = container.resolve::<UserService>().unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("UserService"));
        assert!(msg.contains("Database"));
        assert!(err.root_cause().is_not_found());
    }

    #[test]
    fn test_not_found() {
        let container = Container::new();
        let err = container.resolve::<Database>().unwrap_err();

        assert!(err.is_not_found());
        assert!(container.try_resolve::<Database>().is_none());
    }

    #[test]
    fn test_failure_is_not_cached() {
        let (calls, seen) = counter();
        let container = Container::new();
        container
            .bind(
                move || -> std::result::Result<Arc<Database>, String> {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err("connection refused".into())
                    } else {
                        Ok(Arc::new(Database { url: "db".into() }))
                    }
                },
                BindOptions::default(),
            )
            .unwrap();

        let err = container.resolve::<Database>().unwrap_err();
        assert!(err.to_string().contains("connection refused"));

        let a = container.resolve::<Database>().unwrap();
        let b = container.resolve::<Database>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_trait_object_and_concrete_resolved_independently() {
        let (calls, seen) = counter();
        let counted = calls.clone();
        let container = Container::new();

        container
            .bind(
                move || -> Arc<dyn Greeter> {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(English)
                },
                BindOptions::default(),
            )
            .unwrap();
        container
            .bind(
                move || {
                    counted.fetch_add(1, Ordering::SeqCst);
                    Arc::new(English)
                },
                BindOptions::default(),
            )
            .unwrap();

        assert_eq!(container.resolve::<dyn Greeter>().unwrap().greet(), "hello");
        container.resolve::<English>().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concrete_cycle_reported() {
        #[derive(Debug)]
        struct Left {
            _right: Arc<Right>,
        }
        #[derive(Debug)]
        struct Right {
            _left: Arc<Left>,
        }

        let container = Container::new();
        container
            .bind(|right: Arc<Right>| Arc::new(Left { _right: right }), BindOptions::default())
            .unwrap();
        container
            .bind(|left: Arc<Left>| Arc::new(Right { _left: left }), BindOptions::default())
            .unwrap();

        let err = container.resolve::<Left>().unwrap_err();
        assert!(matches!(err.root_cause(), DiError::CircularDependency { .. }));

        // The guard is released after the failure
        let err = container.resolve::<Right>().unwrap_err();
        assert!(matches!(err.root_cause(), DiError::CircularDependency { .. }));
    }

    #[test]
    fn test_bind_from_inside_factory() {
        let container = Container::new();
        let lazy = Lazy::<English>::new(&container);
        let handle = container.clone();

        container
            .bind(
                move || {
                    handle.bind(|| Arc::new(English), BindOptions::default()).unwrap();
                    Arc::new(Database { url: "db".into() })
                },
                BindOptions::default(),
            )
            .unwrap();

        container.resolve::<Database>().unwrap();
        assert!(lazy.resolve().is_ok());
        container.clear();
    }

    #[test]
    fn test_factory_replacing_its_own_binding() {
        #[derive(Debug)]
        struct Version(u8);

        let container = Container::new();
        let handle = container.clone();
        container
            .bind(
                move || {
                    handle.bind(|| Arc::new(Version(2)), BindOptions::default()).unwrap();
                    let replacement = handle.resolve::<Version>().unwrap();
                    Arc::new(Version(replacement.0 - 1))
                },
                BindOptions::default(),
            )
            .unwrap();

        // The replacement is a different binding, not a cycle
        assert_eq!(container.resolve::<Version>().unwrap().0, 1);
        assert_eq!(container.resolve::<Version>().unwrap().0, 2);
    }

    // =========================================================================
    // ResolveAll
    // =========================================================================

    #[test]
    fn test_resolve_all_honors_each_lifetime() {
        let container = Container::new();
        container
            .bind(|| -> Arc<dyn Greeter> { Arc::new(English) }, BindOptions::default())
            .unwrap();
        container
            .bind_named("a", || -> Arc<dyn Greeter> { Arc::new(English) })
            .unwrap();
        container
            .bind_named_transient("b", || -> Arc<dyn Greeter> { Arc::new(English) })
            .unwrap();

        let first = container.resolve_all::<dyn Greeter>().unwrap();
        let second = container.resolve_all::<dyn Greeter>().unwrap();

        assert_eq!(first.len(), 3);
        assert!(Arc::ptr_eq(&first[0], &second[0]));
        assert!(Arc::ptr_eq(&first[1], &second[1]));
        assert!(!Arc::ptr_eq(&first[2], &second[2]));
    }

    #[test]
    fn test_resolve_all_empty() {
        let container = Container::new();
        assert!(container.resolve_all::<dyn Greeter>().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_all_propagates_failure() {
        let container = Container::new();
        container
            .bind(|| Arc::new(Database { url: "ok".into() }), BindOptions::default())
            .unwrap();
        container
            .bind_named("broken", || -> std::result::Result<Arc<Database>, String> {
                Err("disk full".into())
            })
            .unwrap();

        let err = container.resolve_all::<Database>().unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    // =========================================================================
    // Clear
    // =========================================================================

    #[test]
    fn test_clear() {
        let container = Container::new();
        container
            .bind(|| Arc::new(Database { url: "db".into() }), BindOptions::default())
            .unwrap();
        container
            .bind_named("replica", || Arc::new(Database { url: "db2".into() }))
            .unwrap();
        let kept = container.resolve::<Database>().unwrap();

        container.clear();

        assert!(container.is_empty());
        assert!(container.resolve::<Database>().unwrap_err().is_not_found());
        assert_eq!(kept.url, "db");

        container
            .bind(|| Arc::new(Database { url: "fresh".into() }), BindOptions::default())
            .unwrap();
        assert_eq!(container.resolve::<Database>().unwrap().url, "fresh");
    }

    #[test]
    fn test_clones_share_registry() {
        let container = Container::new();
        let other = container.clone();
        other.bind(|| Arc::new(English), BindOptions::default()).unwrap();

        assert!(container.contains::<English>());
        assert_eq!(container.len(), 1);
        assert!(format!("{container:?}").contains("binding_count: 1"));
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[test]
    fn test_concurrent_first_resolve_constructs_once() {
        let (calls, seen) = counter();
        let container = Container::new();
        container
            .bind(
                move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    Arc::new(Database { url: "shared".into() })
                },
                BindOptions::default(),
            )
            .unwrap();

        let resolved: Vec<Arc<Database>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| container.resolve::<Database>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(resolved.iter().all(|db| Arc::ptr_eq(db, &resolved[0])));
    }

    #[test]
    fn test_slow_construction_does_not_block_other_bindings() {
        let container = Container::new();
        let (started, started_seen) = counter();

        container
            .bind(
                move || {
                    started.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(200));
                    Arc::new(Database { url: "slow".into() })
                },
                BindOptions::default(),
            )
            .unwrap();
        container.bind(|| Arc::new(English), BindOptions::default()).unwrap();

        std::thread::scope(|s| {
            let slow = s.spawn(|| container.resolve::<Database>().unwrap());

            while started_seen.load(Ordering::SeqCst) == 0 {
                std::thread::yield_now();
            }
            // Registry operations proceed while the slow factory runs
            container.resolve::<English>().unwrap();
            container.bind_named("late", || Arc::new(English)).unwrap();
            assert!(container.contains_named::<English>("late"));

            slow.join().unwrap();
        });
    }

    #[test]
    fn test_concurrent_bind_resolve_clear() {
        let container = Container::new();

        std::thread::scope(|s| {
            for i in 0..4 {
                let container = &container;
                s.spawn(move || {
                    for j in 0..100 {
                        let name = format!("{i}-{j}");
                        container
                            .bind_named(name.clone(), move || Arc::new(j))
                            .unwrap();
                        // A concurrent clear may have removed it already
                        match container.resolve_named::<i32>(&name) {
                            Ok(value) => assert_eq!(*value, j),
                            Err(err) => assert!(err.is_not_found()),
                        }
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..20 {
                    container.clear();
                    std::thread::yield_now();
                }
            });
        });
    }
}
