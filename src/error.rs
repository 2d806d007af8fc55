//! Error types for service location

use crate::key::BindingKey;
use thiserror::Error;

/// Boxed failure returned by a fallible factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding or resolving services
#[derive(Error, Debug)]
pub enum DiError {
    /// The factory was rejected at registration time
    #[error("invalid resolver for {type_name}: {reason}")]
    InvalidResolver {
        type_name: &'static str,
        reason: String,
    },

    /// No binding exists for the requested type and name
    #[error("no binding found for type {type_name} with name '{name}'")]
    NotFound { type_name: &'static str, name: String },

    /// The factory ran and reported a failure
    #[error("failed to create {type_name} (name '{name}'): {source}")]
    CreationFailed {
        type_name: &'static str,
        name: String,
        #[source]
        source: BoxError,
    },

    /// One of the factory's parameters could not be resolved
    #[error("failed resolving argument for {type_name} (name '{name}'): {source}")]
    DependencyFailed {
        type_name: &'static str,
        name: String,
        #[source]
        source: Box<DiError>,
    },

    /// The binding was requested again while it was still being constructed
    #[error("circular dependency detected while resolving {type_name} (name '{name}')")]
    CircularDependency { type_name: &'static str, name: String },

    /// A lazy handle outlived the container it was created from
    #[error("the owning container has been dropped")]
    ContainerDropped,

    /// Internal error
    #[error("internal service locator error: {0}")]
    Internal(String),
}

impl DiError {
    /// Create a NotFound error for a key
    #[inline]
    pub(crate) fn not_found(key: &BindingKey) -> Self {
        Self::NotFound {
            type_name: key.type_name(),
            name: key.name().to_owned(),
        }
    }

    /// Create an InvalidResolver error
    #[inline]
    pub(crate) fn invalid_resolver(key: &BindingKey, reason: impl Into<String>) -> Self {
        Self::InvalidResolver {
            type_name: key.type_name(),
            reason: reason.into(),
        }
    }

    /// Create a CreationFailed error
    #[inline]
    pub(crate) fn creation_failed(key: &BindingKey, source: BoxError) -> Self {
        Self::CreationFailed {
            type_name: key.type_name(),
            name: key.name().to_owned(),
            source,
        }
    }

    /// Wrap a nested failure with the key that was being constructed
    #[inline]
    pub(crate) fn dependency_failed(key: &BindingKey, source: DiError) -> Self {
        Self::DependencyFailed {
            type_name: key.type_name(),
            name: key.name().to_owned(),
            source: Box::new(source),
        }
    }

    /// Create a CircularDependency error
    #[inline]
    pub(crate) fn circular(key: &BindingKey) -> Self {
        Self::CircularDependency {
            type_name: key.type_name(),
            name: key.name().to_owned(),
        }
    }

    /// The bottom-most error of a `DependencyFailed` chain.
    ///
    /// ```rust
    /// use service_locator::{BindOptions, Container};
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
    /// let err = container.resolve::<UserService>().unwrap_err();
    /// assert!(err.root_cause().is_not_found());
    /// ```
    pub fn root_cause(&self) -> &DiError {
        let mut current = self;
        while let Self::DependencyFailed { source, .. } = current {
            current = source;
        }
        current
    }

    /// True if this error (not its chain) is `NotFound`.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for the failures raised while constructing an instance.
    #[inline]
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::CreationFailed { .. }
                | Self::DependencyFailed { .. }
                | Self::CircularDependency { .. }
        )
    }
}

/// Result type alias for service locator operations
pub type Result<T> = std::result::Result<T, DiError>;
