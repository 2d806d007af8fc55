#![no_main]

//! Fuzz target for concurrent container operations
//!
//! Several threads bind, resolve and clear on one container. Nothing may
//! panic or deadlock, and a shared lazy singleton must be built only once.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use service_locator::{BindOptions, Container};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

#[derive(Debug)]
struct SharedConfig {
    value: u32,
}

#[derive(Debug)]
struct Worker {
    _config: Arc<SharedConfig>,
    id: u64,
}

#[derive(Debug, Clone, Arbitrary)]
enum ThreadOp {
    ResolveConfig,
    ResolveWorker,
    ResolveAll,
    Bind(u64),
    BindNamed(u8, u64),
}

#[derive(Debug, Arbitrary)]
struct ConcurrentScenario {
    /// Clamped to 1-8
    thread_count: u8,
    ops: Vec<ThreadOp>,
    /// Run one extra thread that clears the container
    with_clear: bool,
}

fuzz_target!(|scenario: ConcurrentScenario| {
    let container = Container::new();
    let builds = Arc::new(AtomicUsize::new(0));
    let counted = builds.clone();

    container
        .bind(
            move || {
                counted.fetch_add(1, Ordering::SeqCst);
                Arc::new(SharedConfig { value: 42 })
            },
            BindOptions::default(),
        )
        .unwrap();

    let thread_count = (scenario.thread_count % 8).max(1) as usize;
    let ops = scenario.ops;

    thread::scope(|s| {
        for _ in 0..thread_count {
            let ops = ops.clone();
            let container = &container;
            s.spawn(move || {
                for op in ops.into_iter().take(50) {
                    match op {
                        ThreadOp::ResolveConfig => {
                            if let Ok(config) = container.resolve::<SharedConfig>() {
                                assert_eq!(config.value, 42);
                            }
                        }
                        ThreadOp::ResolveWorker => {
                            let _ = container.resolve::<Worker>();
                        }
                        ThreadOp::ResolveAll => {
                            let _ = container.resolve_all::<Worker>();
                        }
                        ThreadOp::Bind(id) => {
                            let _ = container.bind_transient(move |config: Arc<SharedConfig>| {
                                Arc::new(Worker { _config: config, id })
                            });
                        }
                        ThreadOp::BindNamed(name, id) => {
                            let _ = container.bind_named(
                                format!("w{}", name % 4),
                                move |config: Arc<SharedConfig>| {
                                    Arc::new(Worker { _config: config, id })
                                },
                            );
                        }
                    }
                }
            });
        }

        if scenario.with_clear {
            s.spawn(|| container.clear());
        }
    });

    if !scenario.with_clear {
        assert!(builds.load(Ordering::SeqCst) <= 1);
        if let Ok(worker) = container.resolve::<Worker>() {
            let _ = worker.id;
        }
    }
    let _ = container.len();
});
