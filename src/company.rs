//! Company aggregate: the delivery network plus the entities living on it.
//!
//! A [`Company`] owns one [`Network`] of [`Location`] vertices and the
//! markets, warehouses and sellers keyed to those locations by name. All
//! registration goes through the company so a location name always refers
//! to at most one vertex and at most one entity.

use tracing::info;

use crate::domain::{DomainError, Location, Market, Seller, Warehouse};
use crate::network::{Network, NetworkError, Path};
use crate::planner::{PlanError, RoutePlanner};

/// Error type for company operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CompanyError {
    /// An entity constraint was violated (blank name, bad amount, ...).
    Domain(DomainError),
    /// The operation needs at least one registered location.
    EmptyNetwork,
    /// Road distances must be positive.
    InvalidDistance(f64),
}

impl std::fmt::Display for CompanyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanyError::Domain(e) => e.fmt(f),
            CompanyError::EmptyNetwork => write!(f, "there are no locations"),
            CompanyError::InvalidDistance(d) => {
                write!(f, "road distance must be > 0, got {}", d)
            }
        }
    }
}

impl std::error::Error for CompanyError {}

impl From<DomainError> for CompanyError {
    fn from(e: DomainError) -> Self {
        CompanyError::Domain(e)
    }
}

impl From<NetworkError> for CompanyError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::NegativeWeight(w) => CompanyError::InvalidDistance(w),
        }
    }
}

impl From<PlanError> for CompanyError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::EmptyNetwork => CompanyError::EmptyNetwork,
            PlanError::Domain(e) => CompanyError::Domain(e),
        }
    }
}

/// A delivery company: its road network and the entities on it.
///
/// # Examples
///
/// ```
/// use delivery_routing::company::Company;
///
/// let mut company = Company::new("Acme Deliveries").unwrap();
/// company.add_site("HQ").unwrap();
/// company.add_market("Central Market").unwrap();
/// company.add_road("HQ", "Central Market", 4.0).unwrap();
///
/// assert_eq!(company.roads().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Company {
    name: String,
    network: Network<Location>,
    markets: Vec<Market>,
    warehouses: Vec<Warehouse>,
    sellers: Vec<Seller>,
}

impl Company {
    /// Creates a company with an empty network.
    pub fn new(name: impl Into<String>) -> Result<Self, CompanyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::BlankName.into());
        }
        Ok(Self {
            name,
            network: Network::new(),
            markets: Vec::new(),
            warehouses: Vec::new(),
            sellers: Vec::new(),
        })
    }

    /// The company's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The road network.
    pub fn network(&self) -> &Network<Location> {
        &self.network
    }

    /// Registered markets, in registration order.
    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Registered warehouses, in registration order.
    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    /// Registered sellers, in registration order.
    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    /// Registers a plain company site (no entity attached). Returns `false`
    /// when the name is already taken by any location.
    pub fn add_site(&mut self, name: impl Into<String>) -> Result<bool, CompanyError> {
        let location = Location::company(name)?;
        Ok(self.network.add_vertex(location))
    }

    /// Registers a market and its network location. Returns `false` when
    /// the name is already taken.
    pub fn add_market(&mut self, name: impl Into<String>) -> Result<bool, CompanyError> {
        let market = Market::new(name)?;
        let location = Location::market(market.name())?;
        if !self.network.add_vertex(location) {
            return Ok(false);
        }
        info!(market = market.name(), "market registered");
        self.markets.push(market);
        Ok(true)
    }

    /// Registers a warehouse and its network location. Returns `false` when
    /// the name is already taken.
    pub fn add_warehouse(
        &mut self,
        name: impl Into<String>,
        capacity: u32,
    ) -> Result<bool, CompanyError> {
        let warehouse = Warehouse::new(name, capacity)?;
        let location = Location::warehouse(warehouse.name())?;
        if !self.network.add_vertex(location) {
            return Ok(false);
        }
        info!(warehouse = warehouse.name(), capacity, "warehouse registered");
        self.warehouses.push(warehouse);
        Ok(true)
    }

    /// Unregisters a location of any kind, removing its vertex, its roads
    /// and its attached entity. Returns `false` when the name is unknown.
    pub fn remove_location(&mut self, name: &str) -> bool {
        let Ok(probe) = Location::company(name) else {
            return false;
        };
        if !self.network.remove_vertex(&probe) {
            return false;
        }
        self.markets.retain(|m| m.name() != name);
        self.warehouses.retain(|w| w.name() != name);
        true
    }

    /// Registers a seller. Returns `false` when the id is already taken.
    pub fn add_seller(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
    ) -> Result<bool, CompanyError> {
        let seller = Seller::new(id, name, capacity)?;
        if self.sellers.iter().any(|s| s.id() == seller.id()) {
            return Ok(false);
        }
        self.sellers.push(seller);
        Ok(true)
    }

    /// Unregisters a seller by id. Returns `false` when the id is unknown.
    pub fn remove_seller(&mut self, id: &str) -> bool {
        let before = self.sellers.len();
        self.sellers.retain(|s| s.id() != id);
        before != self.sellers.len()
    }

    /// Mutable access to a market by name.
    pub fn market_mut(&mut self, name: &str) -> Option<&mut Market> {
        self.markets.iter_mut().find(|m| m.name() == name)
    }

    /// Mutable access to a warehouse by name.
    pub fn warehouse_mut(&mut self, name: &str) -> Option<&mut Warehouse> {
        self.warehouses.iter_mut().find(|w| w.name() == name)
    }

    /// Mutable access to a seller by id.
    pub fn seller_mut(&mut self, id: &str) -> Option<&mut Seller> {
        self.sellers.iter_mut().find(|s| s.id() == id)
    }

    /// Builds a new road between two locations.
    ///
    /// Fails on an empty network or a non-positive distance. Returns
    /// `Ok(false)` when either endpoint is unknown or the road already
    /// exists.
    pub fn add_road(&mut self, from: &str, to: &str, distance: f64) -> Result<bool, CompanyError> {
        let (a, b) = self.road_endpoints(from, to, distance)?;
        if self.network.has_edge(&a, &b) {
            return Ok(false);
        }
        Ok(self.network.add_edge(&a, &b, distance)?)
    }

    /// Changes the distance of an existing road.
    ///
    /// Fails on an empty network or a non-positive distance. Returns
    /// `Ok(false)` when either endpoint is unknown or there is no road to
    /// update.
    pub fn set_road_distance(
        &mut self,
        from: &str,
        to: &str,
        distance: f64,
    ) -> Result<bool, CompanyError> {
        let (a, b) = self.road_endpoints(from, to, distance)?;
        if !self.network.has_edge(&a, &b) {
            return Ok(false);
        }
        Ok(self.network.add_edge(&a, &b, distance)?)
    }

    /// Demolishes a road. Fails on an empty network; returns `Ok(false)`
    /// when either endpoint is unknown or no road connects them.
    pub fn remove_road(&mut self, from: &str, to: &str) -> Result<bool, CompanyError> {
        if self.network.is_empty() {
            return Err(CompanyError::EmptyNetwork);
        }
        let a = Location::company(from)?;
        let b = Location::company(to)?;
        if !self.network.has_edge(&a, &b) {
            return Ok(false);
        }
        Ok(self.network.remove_edge(&a, &b))
    }

    /// Every road in the network, each undirected pair once.
    pub fn roads(&self) -> impl Iterator<Item = Path<Location>> + '_ {
        self.network.paths()
    }

    /// Plans the delivery route for the seller with `seller_id`, starting
    /// from the location named `start`.
    ///
    /// Seller load, market queues and warehouse stock are updated as the
    /// plan executes. An unknown start or seller id yields an empty route.
    pub fn route_for_seller(
        &mut self,
        start: &str,
        seller_id: &str,
    ) -> Result<Vec<Location>, CompanyError> {
        let Ok(probe) = Location::company(start) else {
            return Ok(Vec::new());
        };
        let Company {
            network,
            markets,
            warehouses,
            sellers,
            ..
        } = self;
        let Some(seller) = sellers.iter_mut().find(|s| s.id() == seller_id) else {
            return Ok(Vec::new());
        };
        let planner = RoutePlanner::new(network);
        Ok(planner.plan(&probe, seller, markets, warehouses)?)
    }

    /// Resolves and validates the endpoints for a road mutation.
    fn road_endpoints(
        &self,
        from: &str,
        to: &str,
        distance: f64,
    ) -> Result<(Location, Location), CompanyError> {
        if self.network.is_empty() {
            return Err(CompanyError::EmptyNetwork);
        }
        if distance <= 0.0 {
            return Err(CompanyError::InvalidDistance(distance));
        }
        let a = Location::company(from)?;
        let b = Location::company(to)?;
        Ok((a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_company() -> Company {
        let mut company = Company::new("Acme Deliveries").unwrap();
        company.add_site("HQ").unwrap();
        company.add_market("MarketA").unwrap();
        company.add_market("MarketB").unwrap();
        company.add_warehouse("Warehouse", 100).unwrap();
        company.add_road("HQ", "MarketA", 1.0).unwrap();
        company.add_road("MarketA", "Warehouse", 1.0).unwrap();
        company.add_road("Warehouse", "MarketB", 1.0).unwrap();
        company.add_seller("S1", "Alice", 10).unwrap();
        company
    }

    #[test]
    fn location_names_are_unique_across_kinds() {
        let mut company = sample_company();
        assert_eq!(company.add_market("HQ"), Ok(false));
        assert_eq!(company.add_warehouse("MarketA", 10), Ok(false));
        assert_eq!(company.add_site("Warehouse"), Ok(false));
        // Rejected registrations leave no orphan entity behind.
        assert_eq!(company.markets().len(), 2);
        assert_eq!(company.warehouses().len(), 1);
    }

    #[test]
    fn seller_ids_are_unique() {
        let mut company = sample_company();
        assert_eq!(company.add_seller("S1", "Bob", 5), Ok(false));
        assert_eq!(company.sellers().len(), 1);
        assert!(company.remove_seller("S1"));
        assert!(!company.remove_seller("S1"));
    }

    #[test]
    fn road_mutations_validate_state_and_distance() {
        let mut empty = Company::new("Empty Co").unwrap();
        assert_eq!(
            empty.add_road("A", "B", 1.0),
            Err(CompanyError::EmptyNetwork)
        );
        let mut company = sample_company();
        assert_eq!(
            company.add_road("HQ", "MarketB", 0.0),
            Err(CompanyError::InvalidDistance(0.0))
        );
        assert_eq!(
            company.add_road("HQ", "MarketB", -2.0),
            Err(CompanyError::InvalidDistance(-2.0))
        );
        assert_eq!(company.add_road("HQ", "Nowhere", 1.0), Ok(false));
        // Already connected.
        assert_eq!(company.add_road("HQ", "MarketA", 9.0), Ok(false));
    }

    #[test]
    fn set_road_distance_requires_an_existing_road() {
        let mut company = sample_company();
        assert_eq!(company.set_road_distance("HQ", "MarketB", 7.0), Ok(false));
        assert_eq!(company.set_road_distance("HQ", "MarketA", 7.0), Ok(true));
        let updated = company
            .roads()
            .find(|r| {
                (r.start.name() == "HQ" && r.destination.name() == "MarketA")
                    || (r.start.name() == "MarketA" && r.destination.name() == "HQ")
            })
            .unwrap();
        assert_eq!(updated.weight, 7.0);
    }

    #[test]
    fn remove_road_and_location() {
        let mut company = sample_company();
        assert_eq!(company.remove_road("HQ", "MarketA"), Ok(true));
        assert_eq!(company.remove_road("HQ", "MarketA"), Ok(false));
        assert!(company.remove_location("MarketB"));
        assert!(!company.remove_location("MarketB"));
        assert_eq!(company.markets().len(), 1);
        assert_eq!(company.roads().count(), 1); // MarketA - Warehouse
    }

    #[test]
    fn end_to_end_route_moves_goods() {
        let mut company = sample_company();
        company.market_mut("MarketA").unwrap().add_client(6).unwrap();
        company.market_mut("MarketB").unwrap().add_client(4).unwrap();
        company.warehouse_mut("Warehouse").unwrap().load_stock(50).unwrap();
        let seller = company.seller_mut("S1").unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        seller.add_market_to_visit("MarketB").unwrap();

        let route = company.route_for_seller("HQ", "S1").unwrap();
        let names: Vec<&str> = route.iter().map(|l| l.name()).collect();
        // Empty-handed at MarketA: detour to the warehouse, then onward.
        assert_eq!(
            names,
            vec!["MarketA", "Warehouse", "MarketA", "Warehouse", "MarketB"]
        );
        assert!(!company.markets()[0].has_clients());
        assert!(!company.markets()[1].has_clients());
        assert_eq!(company.warehouses()[0].stock(), 40);
        assert_eq!(company.sellers()[0].load(), 0);
    }

    #[test]
    fn unknown_start_or_seller_yields_empty_route() {
        let mut company = sample_company();
        assert_eq!(company.route_for_seller("Nowhere", "S1"), Ok(vec![]));
        assert_eq!(company.route_for_seller("HQ", "S9"), Ok(vec![]));
    }

    #[test]
    fn blank_company_name_rejected() {
        assert_eq!(
            Company::new("  ").unwrap_err(),
            CompanyError::Domain(DomainError::BlankName)
        );
    }
}
