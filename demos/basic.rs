//! Registering and resolving services
//!
//! ```bash
//! cargo run --example basic
//! ```

use service_locator::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

trait Database: Send + Sync {
    fn query(&self, sql: &str) -> String;
}

struct Postgres {
    url: String,
}

impl Database for Postgres {
    fn query(&self, sql: &str) -> String {
        format!("[{}] {sql}", self.url)
    }
}

struct UserService {
    db: Arc<dyn Database>,
}

impl UserService {
    fn find(&self, id: u32) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

struct RequestId(u64);

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(1);

fn main() -> Result<()> {
    let container = Container::new();

    // Bind the trait object; the factory names the abstract type
    container.bind(
        || -> Arc<dyn Database> { Arc::new(Postgres { url: "postgres://primary".into() }) },
        BindOptions::default(),
    )?;
    container.bind_named("replica", || -> Arc<dyn Database> {
        Arc::new(Postgres { url: "postgres://replica".into() })
    })?;

    // Parameters are resolved from the container
    container.bind(|db: Arc<dyn Database>| Arc::new(UserService { db }), BindOptions::default())?;

    // A fresh instance per resolve
    container.bind_transient(|| Arc::new(RequestId(NEXT_REQUEST.fetch_add(1, Ordering::SeqCst))))?;

    let users = container.resolve::<UserService>()?;
    println!("{}", users.find(7));

    let replica = container.resolve_named::<dyn Database>("replica")?;
    println!("{}", replica.query("SELECT 1"));

    for db in container.resolve_all::<dyn Database>()? {
        println!("{}", db.query("SELECT now()"));
    }

    let first = container.resolve::<RequestId>()?;
    let second = container.resolve::<RequestId>()?;
    println!("request ids: {} {}", first.0, second.0);

    // Unknown names never fall back to the default binding
    if let Err(err) = container.resolve_named::<dyn Database>("archive") {
        println!("error: {err}");
    }

    println!("{} bindings registered", container.len());
    Ok(())
}
