//! Breaking a dependency cycle with `Lazy`
//!
//! `Orders` needs `Customers` and `Customers` needs `Orders`. `Orders` takes a
//! deferred handle, so resolving it never needs a `Customers` up front.
//!
//! ```bash
//! cargo run --example lazy
//! ```

use service_locator::prelude::*;

struct Orders {
    customers: Lazy<Customers>,
}

impl Orders {
    fn owner_of(&self, order: u32) -> Result<String> {
        let customers = self.customers.resolve()?;
        Ok(customers.name(order % 3))
    }
}

struct Customers {
    orders: Arc<Orders>,
}

impl Customers {
    fn name(&self, id: u32) -> String {
        ["ada", "grace", "linus"][id as usize].to_string()
    }
}

fn main() -> Result<()> {
    let container = Container::new();

    container.bind(
        |customers: Lazy<Customers>| {
            println!("building Orders");
            Arc::new(Orders { customers })
        },
        BindOptions::default(),
    )?;
    container.bind(
        |orders: Arc<Orders>| {
            println!("building Customers");
            Arc::new(Customers { orders })
        },
        BindOptions::default(),
    )?;

    let orders = container.resolve::<Orders>()?;
    println!("order 4 belongs to {}", orders.owner_of(4)?);

    let customers = orders.customers.resolve()?;
    println!("same Orders instance: {}", Arc::ptr_eq(&customers.orders, &orders));

    // Without the handle the cycle is reported, not looped
    #[derive(Debug)]
    struct Left(#[allow(dead_code)] Arc<Right>);
    #[derive(Debug)]
    struct Right(#[allow(dead_code)] Arc<Left>);
    container.bind(|r: Arc<Right>| Arc::new(Left(r)), BindOptions::default())?;
    container.bind(|l: Arc<Left>| Arc::new(Right(l)), BindOptions::default())?;
    println!("error: {}", container.resolve::<Left>().unwrap_err().root_cause());

    Ok(())
}
