use serde_json::Number;
use tokio::sync::Mutex;
use tracing::info;

use crate::models::product::{NewProduct, Product};

struct Inventory {
    items: Vec<Product>,
    next_id: i64,
}

/// Process-lifetime product storage.
///
/// The list and the id counter share one lock, so allocating an id and
/// appending the record happen together.
pub struct ProductCatalog {
    inventory: Mutex<Inventory>,
}

impl ProductCatalog {
    /// A catalog holding the initial inventory (ids 1 and 2).
    pub fn new() -> Self {
        Self::with_items(initial_inventory())
    }

    pub fn with_items(items: Vec<Product>) -> Self {
        let next_id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            inventory: Mutex::new(Inventory { items, next_id }),
        }
    }

    /// Showcase records first, then stored products in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        let inventory = self.inventory.lock().await;
        let mut all = showcase_products();
        all.extend(inventory.items.iter().cloned());
        all
    }

    pub async fn insert(&self, new: NewProduct) -> Product {
        let mut inventory = self.inventory.lock().await;
        let product = Product::from_new(inventory.next_id, new);
        inventory.next_id += 1;
        inventory.items.push(product.clone());
        info!(id = product.id, code = %product.code, "Product created");
        product
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Integral amounts render without a fraction, as JSON clients send them.
fn amount(value: f64) -> Number {
    if value.fract() == 0.0 {
        Number::from(value as i64)
    } else {
        Number::from_f64(value).unwrap_or_else(|| Number::from(0))
    }
}

fn product(id: i64, code: &str, name: &str, price: f64, cost: f64, note: &str) -> Product {
    Product {
        id,
        code: code.to_string(),
        name: name.to_string(),
        price: amount(price),
        cost: amount(cost),
        note: note.to_string(),
    }
}

fn initial_inventory() -> Vec<Product> {
    vec![
        product(1, "10001", "Blue ballpoint pen", 15.0, 8.5, "Horse brand pen"),
        product(2, "10002", "Hardcover notebook", 35.0, 20.0, "Lined pages"),
    ]
}

/// Fixed records prepended to every listing. Never stored.
pub fn showcase_products() -> Vec<Product> {
    vec![
        product(101, "55555", "Canvas tote bag", 120.0, 60.0, "Eco-friendly product"),
        product(102, "88888", "Stainless steel bottle", 250.0, 120.0, "Keeps drinks cold for hours"),
    ]
}
