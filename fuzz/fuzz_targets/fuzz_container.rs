#![no_main]

//! Fuzz target for registry operations
//!
//! Applies random bind / resolve / clear sequences and checks the registry
//! against a simple model of which (type, name) keys are bound.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use service_locator::{BindOptions, Container, DiError};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug)]
struct Payload {
    value: u32,
}

#[derive(Debug, Arbitrary)]
struct Binding {
    /// Picks one of a few names so collisions happen often
    name: u8,
    value: u32,
    transient: bool,
    eager: bool,
    fails: bool,
}

#[derive(Debug, Arbitrary)]
enum ContainerOp {
    Bind(Binding),
    Resolve(u8),
    ResolveAll,
    Contains(u8),
    Clear,
    Len,
}

fn name_of(index: u8) -> String {
    match index % 4 {
        0 => String::new(),
        n => format!("n{n}"),
    }
}

fuzz_target!(|ops: Vec<ContainerOp>| {
    let container = Container::new();
    // name -> (value, fails) of the binding currently stored
    let mut model: BTreeMap<String, (u32, bool)> = BTreeMap::new();

    for op in ops.into_iter().take(200) {
        match op {
            ContainerOp::Bind(binding) => {
                let name = name_of(binding.name);
                let (value, fails) = (binding.value, binding.fails);
                let mut options = BindOptions::new().named(name.clone());
                if binding.transient {
                    options = options.transient();
                }
                if binding.eager {
                    options = options.eager();
                }

                let result = container.bind(
                    move || -> Result<Arc<Payload>, String> {
                        if fails {
                            Err("refused".into())
                        } else {
                            Ok(Arc::new(Payload { value }))
                        }
                    },
                    options,
                );

                if binding.eager && fails {
                    // Eager failure leaves the previous binding in place
                    assert!(matches!(result, Err(DiError::CreationFailed { .. })));
                } else {
                    assert!(result.is_ok());
                    model.insert(name, (value, fails));
                }
            }
            ContainerOp::Resolve(index) => {
                let name = name_of(index);
                let result = container.resolve_named::<Payload>(&name);
                match model.get(&name) {
                    None => assert!(result.unwrap_err().is_not_found()),
                    Some((_, true)) => assert!(result.is_err()),
                    Some((value, false)) => assert_eq!(result.unwrap().value, *value),
                }
            }
            ContainerOp::ResolveAll => {
                let result = container.resolve_all::<Payload>();
                if model.values().any(|(_, fails)| *fails) {
                    assert!(result.is_err());
                } else {
                    let values: Vec<u32> = result.unwrap().iter().map(|p| p.value).collect();
                    let expected: Vec<u32> = model.values().map(|(v, _)| *v).collect();
                    assert_eq!(values, expected);
                }
            }
            ContainerOp::Contains(index) => {
                let name = name_of(index);
                assert_eq!(
                    container.contains_named::<Payload>(&name),
                    model.contains_key(&name)
                );
            }
            ContainerOp::Clear => {
                container.clear();
                model.clear();
            }
            ContainerOp::Len => {
                assert_eq!(container.len(), model.len());
                assert_eq!(container.is_empty(), model.is_empty());
            }
        }
    }
});
