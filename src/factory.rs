//! Factory traits
//!
//! A factory is any `Fn` whose parameters are all [`Dependency`] types and
//! whose result is a [`FactoryOutput`]: either `Arc<T>` or
//! `Result<Arc<T>, E>`. The parameter list and the produced type are known
//! statically, so registration needs no runtime signature inspection.
//!
//! ```rust
//! use service_locator::{BindOptions, Container, Lazy};
//! use std::sync::Arc;
//!
//! struct Config { url: String }
//! struct Database { url: String }
//! struct Cache;
//! struct Repository { db: Arc<Database>, _cache: Lazy<Cache> }
//!
//! let container = Container::new();
//! container.bind(|| Arc::new(Config { url: "postgres://localhost".into() }), BindOptions::default()).unwrap();
//!
//! // Fallible factories return a Result
//! container
//!     .bind(
//!         |config: Arc<Config>| -> Result<Arc<Database>, String> {
//!             Ok(Arc::new(Database { url: config.url.clone() }))
//!         },
//!         BindOptions::default(),
//!     )
//!     .unwrap();
//!
//! // Parameters may mix direct and deferred dependencies
//! container
//!     .bind(
//!         |db: Arc<Database>, cache: Lazy<Cache>| Arc::new(Repository { db, _cache: cache }),
//!         BindOptions::default(),
//!     )
//!     .unwrap();
//!
//! let repo = container.resolve::<Repository>().unwrap();
//! assert_eq!(repo.db.url, "postgres://localhost");
//! ```

use crate::error::{BoxError, DiError, Result};
use crate::key::BindingKey;
use crate::lazy::Lazy;
use crate::Container;
use std::any::{TypeId, type_name};
use std::sync::Arc;

/// Marker trait for types that can be bound in the container.
///
/// This is automatically implemented for all types that are `Send + Sync + 'static`,
/// including trait objects such as `dyn Database`.
pub trait Injectable: Send + Sync + 'static {}

impl<T: ?Sized + Send + Sync + 'static> Injectable for T {}

/// One declared parameter of a factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    type_id: TypeId,
    type_name: &'static str,
    deferred: bool,
}

impl Parameter {
    /// A parameter resolved before the factory runs.
    #[inline]
    pub fn direct<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            deferred: false,
        }
    }

    /// A parameter handed over as a [`Lazy`] handle.
    #[inline]
    pub fn deferred<T: ?Sized + 'static>() -> Self {
        Self {
            deferred: true,
            ..Self::direct::<T>()
        }
    }

    /// The abstract type this parameter asks for.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of that type, for messages.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True for `Lazy<T>` parameters, which resolve nothing up front.
    #[inline]
    pub fn is_deferred(&self) -> bool {
        self.deferred
    }
}

// =============================================================================
// Dependency - factory parameters
// =============================================================================

/// A type that can appear as a factory parameter.
///
/// Implemented for:
/// - `Arc<T>` - the default binding of `T`, resolved before the factory runs
/// - [`Lazy<T>`] - a handle that resolves `T` only when asked
pub trait Dependency: Sized {
    /// Describe this parameter for registration-time checks.
    fn parameter() -> Parameter;

    /// Produce the argument value from the container.
    fn resolve(container: &Container) -> Result<Self>;
}

impl<T: ?Sized + Injectable> Dependency for Arc<T> {
    #[inline]
    fn parameter() -> Parameter {
        Parameter::direct::<T>()
    }

    #[inline]
    fn resolve(container: &Container) -> Result<Self> {
        container.resolve::<T>()
    }
}

impl<T: ?Sized + Injectable> Dependency for Lazy<T> {
    #[inline]
    fn parameter() -> Parameter {
        Parameter::deferred::<T>()
    }

    #[inline]
    fn resolve(container: &Container) -> Result<Self> {
        Ok(Lazy::new(container))
    }
}

// =============================================================================
// FactoryOutput - one result, optionally paired with a failure
// =============================================================================

/// What a factory may return.
pub trait FactoryOutput {
    /// The abstract type the factory is registered under.
    type Service: ?Sized + Injectable;

    /// Split the output into the instance or the failure.
    fn into_instance(self) -> std::result::Result<Arc<Self::Service>, BoxError>;
}

impl<T: ?Sized + Injectable> FactoryOutput for Arc<T> {
    type Service = T;

    #[inline]
    fn into_instance(self) -> std::result::Result<Arc<T>, BoxError> {
        Ok(self)
    }
}

impl<T, E> FactoryOutput for std::result::Result<Arc<T>, E>
where
    T: ?Sized + Injectable,
    E: Into<BoxError>,
{
    type Service = T;

    #[inline]
    fn into_instance(self) -> std::result::Result<Arc<T>, BoxError> {
        self.map_err(Into::into)
    }
}

// =============================================================================
// Factory
// =============================================================================

/// A callable the container can invoke to build a service.
///
/// `Args` is the tuple of parameter types; it is inferred from the closure or
/// function signature and never needs to be written out.
pub trait Factory<Args>: Send + Sync + 'static {
    /// The abstract type this factory produces.
    type Service: ?Sized + Injectable;

    /// Declared parameters, in order.
    fn parameters() -> Vec<Parameter>;

    /// Resolve every parameter through `container`, then call the factory.
    ///
    /// `key` is the binding being constructed; it is used to label failures.
    fn invoke(&self, container: &Container, key: &BindingKey) -> Result<Arc<Self::Service>>;
}

macro_rules! impl_factory {
    ($($P:ident),*) => {
        impl<Func, Out, $($P,)*> Factory<($($P,)*)> for Func
        where
            Func: Fn($($P),*) -> Out + Send + Sync + 'static,
            Out: FactoryOutput,
            $($P: Dependency,)*
        {
            type Service = Out::Service;

            #[inline]
            fn parameters() -> Vec<Parameter> {
                vec![$($P::parameter()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn invoke(&self, container: &Container, key: &BindingKey) -> Result<Arc<Out::Service>> {
                $(
                    let $P = $P::resolve(container)
                        .map_err(|source| DiError::dependency_failed(key, source))?;
                )*
                (self)($($P),*)
                    .into_instance()
                    .map_err(|source| DiError::creation_failed(key, source))
            }
        }
    };
}

impl_factory!();
impl_factory!(A);
impl_factory!(A, B);
impl_factory!(A, B, C);
impl_factory!(A, B, C, D);
impl_factory!(A, B, C, D, E);
impl_factory!(A, B, C, D, E, F);
impl_factory!(A, B, C, D, E, F, G);
impl_factory!(A, B, C, D, E, F, G, H);
impl_factory!(A, B, C, D, E, F, G, H, I);
impl_factory!(A, B, C, D, E, F, G, H, I, J);
impl_factory!(A, B, C, D, E, F, G, H, I, J, K);
impl_factory!(A, B, C, D, E, F, G, H, I, J, K, L);
