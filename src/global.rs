//! Process-wide default container.
//!
//! The free functions here delegate one-to-one to a single [`Container`]
//! created on first use. [`reset`] is the explicit point to discard every
//! binding, for example between test cases.
//!
//! ```rust
//! use service_locator::global;
//! use std::sync::Arc;
//!
//! struct Settings { verbose: bool }
//!
//! global::bind(|| Arc::new(Settings { verbose: true }), Default::default()).unwrap();
//! assert!(global::resolve::<Settings>().unwrap().verbose);
//!
//! global::reset();
//! assert!(global::resolve::<Settings>().is_err());
//! ```

use crate::container::Container;
use crate::error::Result;
use crate::factory::{Factory, Injectable};
use crate::options::BindOptions;
use std::sync::Arc;

static GLOBAL_CONTAINER: once_cell::sync::Lazy<Container> =
    once_cell::sync::Lazy::new(Container::new);

/// The process-wide container.
pub fn global() -> &'static Container {
    &GLOBAL_CONTAINER
}

/// See [`Container::bind`].
pub fn bind<F, Args>(factory: F, options: BindOptions) -> Result<()>
where
    F: Factory<Args>,
    Args: 'static,
{
    global().bind(factory, options)
}

/// See [`Container::bind_transient`].
pub fn bind_transient<F, Args>(factory: F) -> Result<()>
where
    F: Factory<Args>,
    Args: 'static,
{
    global().bind_transient(factory)
}

/// See [`Container::bind_named`].
pub fn bind_named<F, Args>(name: impl Into<String>, factory: F) -> Result<()>
where
    F: Factory<Args>,
    Args: 'static,
{
    global().bind_named(name, factory)
}

/// See [`Container::bind_named_transient`].
pub fn bind_named_transient<F, Args>(name: impl Into<String>, factory: F) -> Result<()>
where
    F: Factory<Args>,
    Args: 'static,
{
    global().bind_named_transient(name, factory)
}

/// See [`Container::resolve`].
pub fn resolve<T: ?Sized + Injectable>() -> Result<Arc<T>> {
    global().resolve::<T>()
}

/// See [`Container::resolve_named`].
pub fn resolve_named<T: ?Sized + Injectable>(name: &str) -> Result<Arc<T>> {
    global().resolve_named::<T>(name)
}

/// See [`Container::resolve_all`].
pub fn resolve_all<T: ?Sized + Injectable>() -> Result<Vec<Arc<T>>> {
    global().resolve_all::<T>()
}

/// See [`Container::clear`].
pub fn clear() {
    global().clear();
}

/// Return the process-wide container to its initial, empty state.
pub fn reset() {
    clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Mailer;
    struct Queue;

    // One test only: every test in this binary shares the global container
    #[test]
    fn test_global_delegates_to_one_container() {
        reset();

        bind(|| Arc::new(Mailer), BindOptions::default()).unwrap();
        bind_named("smtp", || Arc::new(Mailer)).unwrap();
        bind_transient(|| Arc::new(Queue)).unwrap();
        bind_named_transient("jobs", || Arc::new(Queue)).unwrap();

        let a = resolve::<Mailer>().unwrap();
        let b = global().resolve::<Mailer>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(resolve_named::<Mailer>("smtp").is_ok());
        assert_eq!(resolve_all::<Mailer>().unwrap().len(), 2);

        let q1 = resolve::<Queue>().unwrap();
        let q2 = resolve_named::<Queue>("jobs").unwrap();
        assert!(!Arc::ptr_eq(&q1, &q2));

        reset();
        assert!(global().is_empty());
        assert!(resolve::<Mailer>().unwrap_err().is_not_found());
    }
}
