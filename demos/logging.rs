//! Example demonstrating logging capabilities
//!
//! Run with JSON logging (production):
//! ```bash
//! cargo run --example logging --features logging-json
//! ```
//!
//! Run with pretty logging (development), including lookups:
//! ```bash
//! RUST_LOG=service_locator=trace cargo run --example logging --features logging-pretty
//! ```

use service_locator::{BindOptions, Container, Lazy};
use std::sync::Arc;

#[allow(dead_code)]
struct Database {
    url: String,
}

#[allow(dead_code)]
struct UserService {
    db: Arc<Database>,
    audit: Lazy<AuditLog>,
}

#[derive(Debug)]
struct AuditLog;

fn main() {
    // JSON if logging-json is enabled, pretty otherwise
    service_locator::logging::init();

    println!("=== Service Locator Logging Demo ===\n");

    // logs: "Creating new service container"
    let container = Container::new();

    // logs: "Constructing eager binding", "Constructing singleton", "Registering binding"
    container
        .bind(
            || Arc::new(Database { url: "postgres://localhost/mydb".into() }),
            BindOptions::new().eager(),
        )
        .unwrap();

    // logs: "Registering binding"
    container
        .bind(
            |db: Arc<Database>, audit: Lazy<AuditLog>| Arc::new(UserService { db, audit }),
            BindOptions::default(),
        )
        .unwrap();

    // logs: "Rejecting factory that depends on its own output"
    let rejected = container.bind(
        |db: Arc<Database>| Arc::new(Database { url: db.url.clone() }),
        BindOptions::default(),
    );
    println!("  [App] self-dependent factory: {}", rejected.unwrap_err());

    // logs: "Resolving service", "Constructing singleton", "Returning cached singleton"
    let users = container.resolve::<UserService>().unwrap();

    // logs: "Service not found" (AuditLog was never bound)
    let err = users.audit.resolve().unwrap_err();
    println!("  [App] deferred audit log: {err}");

    // logs: "Registering binding", "Replaced existing binding"
    container
        .bind(
            || Arc::new(Database { url: "postgres://replica/mydb".into() }),
            BindOptions::default(),
        )
        .unwrap();

    // logs: "Container cleared"
    container.clear();

    println!("\n=== Demo Complete ===");
    println!("Tip: Use --features logging-json for production (JSON output)");
    println!("     Use --features logging-pretty for development (colorful output)");
}
