//! Built-in sample tables shown by the dashboard.

use salesboard_core::{Collection, CollectionKind, QueryError, Record};

use crate::registry::CollectionRegistry;

/// Sample orders.
pub fn orders() -> Vec<Record> {
    vec![
        order("ORD-1001", "Metro Mart", "Ayesha Khan", 12500, 24)
            .with("status", "Delivered")
            .with("created", "2025-07-01T10:15:00"),
        order("ORD-1002", "City Corner Store", "Bilal Ahmed", 8400, 12)
            .with("status", "Processing")
            .with("created", "2025-07-03T14:30:00"),
        order("ORD-1003", "Green Valley Grocers", "Sara Malik", 5600, 8)
            .with("status", "Pending")
            .with("created", "2025-07-05T09:05:00"),
        order("ORD-1004", "Metro Mart", "Ayesha Khan", 21000, 40)
            .with("status", "Processing")
            .with("created", "2025-07-08T16:45:00"),
        order("ORD-1005", "Sunrise Superstore", "Usman Tariq", 3900, 6)
            .with("status", "Cancelled")
            .with("created", "2025-07-09T11:20:00"),
        order("ORD-1006", "City Corner Store", "Bilal Ahmed", 15750, 30)
            .with("status", "Delivered")
            .with("created", "2025-07-12T13:00:00"),
    ]
}

fn order(id: &str, outlet: &str, customer: &str, amount: u32, items: u32) -> Record {
    Record::new()
        .with("id", id)
        .with("outlet", outlet)
        .with("customer", customer)
        .with("amount", amount)
        .with("items", items)
}

/// Sample outlets.
pub fn outlets() -> Vec<Record> {
    vec![
        outlet("OUT-001", "Metro Mart", "Ayesha Khan", "12 Mall Road, Lahore")
            .with("sales", 45000)
            .with("performance", 92)
            .with("credit_limit", 100000)
            .with("outstanding", 25000)
            .with("status", "Active"),
        outlet("OUT-002", "City Corner Store", "Bilal Ahmed", "45 Jinnah Avenue, Islamabad")
            .with("sales", 38000)
            .with("performance", 85)
            .with("credit_limit", 75000)
            .with("outstanding", 41000)
            .with("status", "Active"),
        outlet("OUT-003", "Green Valley Grocers", "Sara Malik", "7 Canal View, Faisalabad")
            .with("sales", 32000)
            .with("performance", 78)
            .with("credit_limit", 60000)
            .with("outstanding", 12000)
            .with("status", "Active"),
        outlet("OUT-004", "Sunrise Superstore", "Usman Tariq", "88 Clifton Block 5, Karachi")
            .with("sales", 28000)
            .with("performance", 64)
            .with("credit_limit", 50000)
            .with("outstanding", 47500)
            .with("status", "Inactive"),
    ]
}

fn outlet(id: &str, name: &str, manager: &str, address: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("manager", manager)
        .with("address", address)
}

/// Sample promotions.
pub fn promotions() -> Vec<Record> {
    vec![
        promotion("PRM-001", "Summer Special", "Get 10% off on orders above Rs. 5,000")
            .with("discount", 10)
            .with("min_amount", 5000)
            .with("status", "Active"),
        promotion("PRM-002", "Bulk Purchase Discount", "5% off on orders with 100+ units")
            .with("discount", 5)
            .with("min_amount", 0)
            .with("status", "Active"),
        promotion("PRM-003", "New Outlet Bonus", "15% off for first-time orders")
            .with("discount", 15)
            .with("min_amount", 0)
            .with("status", "Active"),
        promotion(
            "PRM-004",
            "Festive Beverage Pack",
            "8% off on beverage bundles above Rs. 3,000",
        )
        .with("discount", 8)
        .with("min_amount", 3000)
        .with("status", "Scheduled"),
        promotion("PRM-005", "Spring Clearance", "12% off on selected snacks")
            .with("discount", 12)
            .with("min_amount", 1000)
            .with("status", "Expired"),
    ]
}

fn promotion(id: &str, title: &str, description: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("title", title)
        .with("description", description)
}

/// Sample products.
pub fn products() -> Vec<Record> {
    vec![
        product("PRD-001", "Pepsi 500ml", "Pepsi", "Beverages")
            .with("description", "Carbonated soft drink, 500ml bottle")
            .with("price", 80)
            .with("stock", 240),
        product("PRD-002", "Pepsi 1.5L", "Pepsi", "Beverages")
            .with("description", "Carbonated soft drink, family size")
            .with("price", 180)
            .with("stock", 120),
        product("PRD-003", "7UP 500ml", "7UP", "Beverages")
            .with("description", "Lemon-lime soft drink")
            .with("price", 80)
            .with("stock", 6),
        product("PRD-004", "Lays Classic 50g", "Lays", "Snacks")
            .with("description", "Salted potato chips")
            .with("price", 50)
            .with("stock", 310),
        product("PRD-005", "Aquafina 1.5L", "Aquafina", "Water")
            .with("description", "Purified drinking water")
            .with("price", 90)
            .with("stock", 8),
    ]
}

fn product(id: &str, name: &str, brand: &str, category: &str) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("brand", brand)
        .with("category", category)
        .with("active", true)
}

/// Records for a kind.
pub fn records(kind: CollectionKind) -> Vec<Record> {
    match kind {
        CollectionKind::Orders => orders(),
        CollectionKind::Outlets => outlets(),
        CollectionKind::Promotions => promotions(),
        CollectionKind::Products => products(),
    }
}

/// Validated sample collection for a kind.
pub fn collection(kind: CollectionKind) -> Result<Collection, QueryError> {
    Collection::builtin(kind, records(kind))
}

/// A registry holding every sample collection.
pub fn registry() -> Result<CollectionRegistry, QueryError> {
    let registry = CollectionRegistry::new();
    for kind in CollectionKind::ALL {
        registry.add(collection(kind)?)?;
    }
    Ok(registry)
}
