//! Registration options
//!
//! Every binding carries a name, a [`Lifetime`] and a [`Timing`]. The
//! defaults are the unnamed binding, a singleton, constructed lazily.

use std::fmt;

/// How many instances a binding produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// Single instance shared across all resolves
    #[default]
    Singleton,

    /// New instance created on every resolve
    Transient,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Singleton => write!(f, "singleton"),
            Lifetime::Transient => write!(f, "transient"),
        }
    }
}

/// When a binding first runs its factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timing {
    /// On the first resolve
    #[default]
    Lazy,

    /// Synchronously inside `bind`
    Eager,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timing::Lazy => write!(f, "lazy"),
            Timing::Eager => write!(f, "eager"),
        }
    }
}

/// Options for [`Container::bind`](crate::Container::bind).
///
/// # Examples
///
/// ```rust
/// use service_locator::{BindOptions, Lifetime, Timing};
///
/// let options = BindOptions::new().named("primary").transient().eager();
/// assert_eq!(options.name(), "primary");
/// assert_eq!(options.lifetime(), Lifetime::Transient);
/// assert_eq!(options.timing(), Timing::Eager);
///
/// let defaults = BindOptions::default();
/// assert_eq!(defaults.name(), "");
/// assert_eq!(defaults.lifetime(), Lifetime::Singleton);
/// assert_eq!(defaults.timing(), Timing::Lazy);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOptions {
    name: String,
    lifetime: Lifetime,
    timing: Timing,
}

impl BindOptions {
    /// Default options: unnamed, singleton, lazy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under `name` instead of the default binding
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set singleton or transient caching.
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Set when the factory first runs.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// One shared instance (the default)
    pub fn singleton(self) -> Self {
        self.with_lifetime(Lifetime::Singleton)
    }

    /// A fresh instance per resolve
    pub fn transient(self) -> Self {
        self.with_lifetime(Lifetime::Transient)
    }

    /// Construct on first resolve (the default)
    pub fn lazy(self) -> Self {
        self.with_timing(Timing::Lazy)
    }

    /// Construct during registration
    pub fn eager(self) -> Self {
        self.with_timing(Timing::Eager)
    }

    /// Binding name; empty for the default binding.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Singleton unless changed.
    #[inline]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Lazy unless changed.
    #[inline]
    pub fn timing(&self) -> Timing {
        self.timing
    }
}
