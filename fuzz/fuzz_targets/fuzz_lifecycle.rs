#![no_main]

//! Fuzz target for binding lifecycles
//!
//! Exercises lazy and eager timing, singleton and transient lifetimes, and
//! deferred handles across rebinds and clears.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use service_locator::{BindOptions, Container, DiError, Lazy};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct Counted {
    instance_id: u64,
}

#[derive(Debug)]
struct Holder {
    counted: Lazy<Counted>,
}

#[derive(Debug, Arbitrary)]
enum LifecycleOp {
    BindSingleton { eager: bool },
    BindTransient { eager: bool },
    BindHolder,
    Resolve,
    ResolveMany(u8),
    ResolveThroughHolder,
    Clear,
    DropContainer,
}

#[derive(Clone, Copy, PartialEq)]
enum Bound {
    None,
    Singleton,
    Transient,
}

fuzz_target!(|ops: Vec<LifecycleOp>| {
    let builds = Arc::new(AtomicU64::new(0));
    let mut container = Some(Container::new());
    let mut bound = Bound::None;
    let mut holder: Option<Arc<Holder>> = None;

    for op in ops.into_iter().take(100) {
        let Some(c) = container.as_ref() else {
            // Handles outlive the container but must fail cleanly
            if let Some(h) = &holder {
                assert!(matches!(h.counted.resolve(), Err(DiError::ContainerDropped)));
            }
            continue;
        };

        match op {
            LifecycleOp::BindSingleton { eager } | LifecycleOp::BindTransient { eager } => {
                let transient = matches!(op, LifecycleOp::BindTransient { .. });
                let counter = builds.clone();
                let before = builds.load(Ordering::SeqCst);

                let mut options = BindOptions::new();
                if transient {
                    options = options.transient();
                }
                if eager {
                    options = options.eager();
                }

                c.bind(
                    move || {
                        Arc::new(Counted {
                            instance_id: counter.fetch_add(1, Ordering::SeqCst),
                        })
                    },
                    options,
                )
                .unwrap();

                // Eager runs exactly once inside bind, lazy not at all
                let expected = if eager { before + 1 } else { before };
                assert_eq!(builds.load(Ordering::SeqCst), expected);
                bound = if transient { Bound::Transient } else { Bound::Singleton };
            }
            LifecycleOp::BindHolder => {
                c.bind(|counted: Lazy<Counted>| Arc::new(Holder { counted }), BindOptions::default())
                    .unwrap();
                holder = c.resolve::<Holder>().ok();
            }
            LifecycleOp::Resolve => {
                let first = c.resolve::<Counted>();
                let second = c.resolve::<Counted>();
                match bound {
                    Bound::None => assert!(first.unwrap_err().is_not_found()),
                    Bound::Singleton => assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap())),
                    Bound::Transient => {
                        let (a, b) = (first.unwrap(), second.unwrap());
                        assert_ne!(a.instance_id, b.instance_id);
                    }
                }
            }
            LifecycleOp::ResolveMany(count) => {
                if bound == Bound::Transient {
                    let instances: Vec<Arc<Counted>> = (0..(count % 10).max(1))
                        .map(|_| c.resolve::<Counted>().unwrap())
                        .collect();
                    for (i, a) in instances.iter().enumerate() {
                        for b in &instances[i + 1..] {
                            assert!(!Arc::ptr_eq(a, b));
                        }
                    }
                }
            }
            LifecycleOp::ResolveThroughHolder => {
                if let Some(h) = &holder {
                    // Deferred handles see the current binding, not a snapshot
                    let via_handle = h.counted.resolve();
                    match bound {
                        Bound::None => assert!(via_handle.unwrap_err().is_not_found()),
                        Bound::Singleton => {
                            let direct = c.resolve::<Counted>().unwrap();
                            assert!(Arc::ptr_eq(&via_handle.unwrap(), &direct));
                        }
                        Bound::Transient => assert!(via_handle.is_ok()),
                    }
                }
            }
            LifecycleOp::Clear => {
                c.clear();
                bound = Bound::None;
            }
            LifecycleOp::DropContainer => {
                container = None;
            }
        }
    }
});
