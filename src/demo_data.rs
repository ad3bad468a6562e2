//! Seeded demo company generator.
//!
//! Builds a small, connected delivery company with pending client demand
//! and stocked warehouses, ready to plan routes against. Generation is
//! deterministic for a given seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::company::{Company, CompanyError};

const MARKET_NAMES: [&str; 4] = [
    "Riverside Market",
    "Old Town Market",
    "Harbor Market",
    "Hilltop Market",
];

const WAREHOUSE_NAMES: [&str; 2] = ["North Warehouse", "South Warehouse"];

const SELLER_NAMES: [&str; 3] = ["Alice", "Boyan", "Carla"];

/// Generates the default demo company.
pub fn generate_demo_company() -> Result<Company, CompanyError> {
    generate_seeded_company(37)
}

/// Generates a demo company from an explicit seed.
///
/// The layout is a hub-and-spoke network: every market and warehouse is
/// connected to the headquarters, with a few randomized cross roads, so
/// the network is always connected. Each market queues one to three
/// clients; warehouses start at least half full.
pub fn generate_seeded_company(seed: u64) -> Result<Company, CompanyError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut company = Company::new("Demo Deliveries")?;
    company.add_site("Headquarters")?;

    for name in MARKET_NAMES {
        company.add_market(name)?;
        company.add_road("Headquarters", name, rng.gen_range(2.0..12.0))?;
        if let Some(market) = company.market_mut(name) {
            for _ in 0..rng.gen_range(1..=3) {
                market.add_client(rng.gen_range(1..=8))?;
            }
        }
    }

    for name in WAREHOUSE_NAMES {
        let capacity = rng.gen_range(40..=80);
        company.add_warehouse(name, capacity)?;
        company.add_road("Headquarters", name, rng.gen_range(2.0..12.0))?;
        let stock = rng.gen_range(capacity / 2..=capacity);
        if let Some(warehouse) = company.warehouse_mut(name) {
            warehouse.load_stock(stock)?;
        }
    }

    // Cross roads between neighboring markets and their nearest warehouse
    // give the shortest-path engine real alternatives to the hub.
    for pair in MARKET_NAMES.windows(2) {
        company.add_road(pair[0], pair[1], rng.gen_range(1.0..6.0))?;
    }
    company.add_road(MARKET_NAMES[0], WAREHOUSE_NAMES[0], rng.gen_range(1.0..4.0))?;
    company.add_road(MARKET_NAMES[3], WAREHOUSE_NAMES[1], rng.gen_range(1.0..4.0))?;

    for (i, name) in SELLER_NAMES.iter().enumerate() {
        let id = format!("S{}", i + 1);
        company.add_seller(&id, *name, rng.gen_range(10..=20))?;
        if let Some(seller) = company.seller_mut(&id) {
            for market in MARKET_NAMES.iter().skip(i % 2).step_by(2) {
                seller.add_market_to_visit(*market)?;
            }
        }
    }

    info!(
        markets = MARKET_NAMES.len(),
        warehouses = WAREHOUSE_NAMES.len(),
        sellers = SELLER_NAMES.len(),
        seed,
        "demo company generated"
    );
    Ok(company)
}
