//! # service-locator - Runtime Service Location for Rust
//!
//! A thread-safe container that maps *(abstract type, name)* pairs to
//! factories and builds instances on demand, resolving each factory's
//! parameters from the same container.
//!
//! ## Features
//!
//! - **Typed factories** - any `Fn(Arc<A>, Arc<B>, ..) -> Arc<T>` (or
//!   `-> Result<Arc<T>, E>`) is a factory; parameters are resolved for you
//! - **Trait objects** - bind and resolve `dyn Trait` directly
//! - **Named bindings** - several bindings per type, selected by name
//! - **Singleton / transient** lifetimes, **lazy / eager** construction
//! - **Deferred handles** - [`Lazy<T>`] parameters break dependency cycles
//! - **Concurrent** - `DashMap` registry, per-binding construct-once cells
//! - **Observable** - optional `tracing` events with JSON or pretty output
//!
//! ## Quick Start
//!
//! ```rust
//! use service_locator::prelude::*;
//!
//! struct Database { url: String }
//! struct UserService { db: Arc<Database> }
//!
//! let container = Container::new();
//!
//! container.bind(|| Arc::new(Database { url: "postgres://localhost".into() }), BindOptions::default())?;
//! container.bind(|db: Arc<Database>| Arc::new(UserService { db }), BindOptions::default())?;
//!
//! let users = container.resolve::<UserService>()?;
//! assert_eq!(users.db.url, "postgres://localhost");
//! # Ok::<(), DiError>(())
//! ```
//!
//! ## Lifetimes and Timing
//!
//! ```rust
//! use service_locator::prelude::*;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! static NEXT_ID: AtomicU64 = AtomicU64::new(0);
//!
//! struct Config { debug: bool }
//! struct RequestId(u64);
//!
//! let container = Container::new();
//!
//! // Singleton, built right now
//! container.bind(|| Arc::new(Config { debug: true }), BindOptions::new().eager())?;
//!
//! // Transient - new instance every time
//! container.bind_transient(|| Arc::new(RequestId(NEXT_ID.fetch_add(1, Ordering::SeqCst))))?;
//!
//! let a = container.resolve::<RequestId>()?;
//! let b = container.resolve::<RequestId>()?;
//! assert_ne!(a.0, b.0);
//! # Ok::<(), DiError>(())
//! ```
//!
//! ## Breaking Cycles
//!
//! Two services that need each other cannot both take the other as a plain
//! `Arc`. One side takes a [`Lazy`] handle and resolves it later:
//!
//! ```rust
//! use service_locator::prelude::*;
//!
//! struct Orders { customers: Lazy<Customers> }
//! struct Customers { orders: Arc<Orders> }
//!
//! let container = Container::new();
//! container.bind(|customers: Lazy<Customers>| Arc::new(Orders { customers }), BindOptions::default())?;
//! container.bind(|orders: Arc<Orders>| Arc::new(Customers { orders }), BindOptions::default())?;
//!
//! let orders = container.resolve::<Orders>()?;
//! let customers = orders.customers.resolve()?;
//! assert!(Arc::ptr_eq(&customers.orders, &orders));
//! # Ok::<(), DiError>(())
//! ```
//!
//! A concrete cycle without a `Lazy` handle is reported as
//! [`DiError::CircularDependency`] when resolved.

mod binding;
mod container;
mod error;
mod factory;
pub mod global;
mod guard;
mod key;
mod lazy;
#[cfg(feature = "logging")]
pub mod logging;
mod options;
mod storage;

pub use container::*;
pub use error::*;
pub use factory::*;
pub use key::*;
pub use lazy::*;
pub use options::*;

// Re-export tracing macros for convenience when logging feature is enabled
#[cfg(feature = "logging")]
pub use tracing::{debug, error, info, trace, warn};

// Re-export for convenience
pub use std::sync::Arc;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BindOptions, Container, DiError, Factory, Injectable, Lazy, Lifetime, Result, Timing,
    };
    pub use std::sync::Arc;
}
