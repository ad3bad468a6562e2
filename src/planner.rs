//! Capacity-constrained route planning over the delivery network.
//!
//! The planner walks a seller's market visit list in order, chaining
//! shortest-path legs between stops. Client demands are served from the
//! seller's load; when the load runs out mid-client, the planner inserts a
//! restock detour: a round trip to the stocked warehouse with the smallest
//! shortest-path weight from the current location. When every warehouse is
//! empty the route built so far is returned and the remaining demand stays
//! unserved.

use tracing::{debug, info};

use crate::domain::{DomainError, Location, LocationKind, Market, Seller, Warehouse};
use crate::network::Network;

/// Error type for route planning.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The network has no registered locations.
    EmptyNetwork,
    /// An entity mutation failed mid-plan; indicates inconsistent input
    /// state (e.g. a market reported clients it does not have).
    Domain(DomainError),
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::EmptyNetwork => write!(f, "there are no locations"),
            PlanError::Domain(e) => write!(f, "inconsistent entity state: {}", e),
        }
    }
}

impl std::error::Error for PlanError {}

impl From<DomainError> for PlanError {
    fn from(e: DomainError) -> Self {
        PlanError::Domain(e)
    }
}

/// Plans multi-stop delivery routes against a borrowed network.
///
/// The network is read-only during planning; seller, market and warehouse
/// state are mutated in place as goods move.
pub struct RoutePlanner<'a> {
    network: &'a Network<Location>,
}

impl<'a> RoutePlanner<'a> {
    /// Creates a planner over the given network.
    pub fn new(network: &'a Network<Location>) -> Self {
        Self { network }
    }

    /// Builds the ordered stop-by-stop route for `seller`, starting from
    /// `start`.
    ///
    /// Markets are visited in the seller's list order. Serving a client
    /// unloads goods from the seller; an uncovered remainder triggers a
    /// restock round trip to the nearest stocked warehouse. The returned
    /// sequence excludes the starting location itself.
    ///
    /// Returns an empty route when the start vertex is unknown or when any
    /// visit-list entry does not resolve to a market registered in the
    /// network (not-found outcomes, per the network's sentinel policy);
    /// fails with [`PlanError::EmptyNetwork`] when nothing is registered.
    pub fn plan(
        &self,
        start: &Location,
        seller: &mut Seller,
        markets: &mut [Market],
        warehouses: &mut [Warehouse],
    ) -> Result<Vec<Location>, PlanError> {
        if self.network.is_empty() {
            return Err(PlanError::EmptyNetwork);
        }
        let mut route = Vec::new();
        if self.find_location(start.name()).is_none() {
            return Ok(route);
        }

        // Resolve the whole visit list up front; one unknown market name
        // aborts the plan with an empty route.
        let mut stops: Vec<(usize, Location)> = Vec::new();
        for name in seller.markets_to_visit() {
            let Some(location) = self.find_location(name) else {
                return Ok(route);
            };
            let Some(index) = (location.kind() == LocationKind::Market)
                .then(|| markets.iter().position(|m| m.name() == name))
                .flatten()
            else {
                return Ok(route);
            };
            stops.push((index, location));
        }

        info!(seller = seller.id(), stops = stops.len(), "planning route");
        let mut current = start.clone();

        for (market_index, market_location) in stops {
            if markets[market_index].has_clients() {
                self.append_leg(&mut route, &current, &market_location);
                current = market_location;
            }
            while markets[market_index].has_clients() {
                let need = markets[market_index].peek_client_demand()?;
                let unloaded = unload_up_to(seller, need)?;
                let mut remaining = markets[market_index].serve_client(unloaded)?;
                while remaining > 0 {
                    let Some((warehouse_index, warehouse_location)) =
                        self.nearest_stocked_warehouse(&current, warehouses)
                    else {
                        // Inventory exhausted everywhere; the rest of the
                        // demand stays unserved.
                        info!(seller = seller.id(), "warehouses exhausted, ending route");
                        return Ok(route);
                    };
                    debug!(
                        warehouse = warehouses[warehouse_index].name(),
                        "restock detour"
                    );
                    self.append_leg(&mut route, &current, &warehouse_location);
                    self.append_leg(&mut route, &warehouse_location, &current);
                    restock(seller, &mut warehouses[warehouse_index])?;

                    let need = markets[market_index].peek_client_demand()?;
                    let unloaded = unload_up_to(seller, need)?;
                    remaining = markets[market_index].serve_client(unloaded)?;
                }
            }
        }
        info!(seller = seller.id(), stops = route.len(), "route planned");
        Ok(route)
    }

    /// Looks a location up by name among the network's vertices.
    fn find_location(&self, name: &str) -> Option<Location> {
        self.network
            .vertices()
            .find(|l| l.name() == name)
            .cloned()
    }

    /// Appends the shortest path between two stops, skipping the first
    /// element (the already-visited current location). An unreachable pair
    /// contributes nothing.
    fn append_leg(&self, route: &mut Vec<Location>, from: &Location, to: &Location) {
        let leg = self.network.shortest_path(from, to);
        debug!(
            from = from.name(),
            to = to.name(),
            stops = leg.len(),
            "leg"
        );
        route.extend(leg.into_iter().skip(1));
    }

    /// Index of the positive-stock warehouse with the minimum shortest-path
    /// weight from `from`; the first minimal candidate in slice order wins
    /// ties. Warehouses not registered in the network are skipped.
    fn nearest_stocked_warehouse(
        &self,
        from: &Location,
        warehouses: &[Warehouse],
    ) -> Option<(usize, Location)> {
        let mut best: Option<(usize, Location, f64)> = None;
        for (i, warehouse) in warehouses.iter().enumerate() {
            if warehouse.stock() == 0 {
                continue;
            }
            let Some(location) = self.find_location(warehouse.name()) else {
                continue;
            };
            let Some(weight) = self.network.shortest_path_weight(from, &location) else {
                continue;
            };
            match &best {
                Some((_, _, min)) if *min <= weight => {}
                _ => best = Some((i, location, weight)),
            }
        }
        best.map(|(i, location, _)| (i, location))
    }
}

/// Unloads up to `need` units from the seller, bounded by what it carries;
/// an empty-handed seller yields zero without error.
fn unload_up_to(seller: &mut Seller, need: u32) -> Result<u32, DomainError> {
    if seller.load() == 0 {
        return Ok(0);
    }
    seller.unload_goods(need)
}

/// Fills the seller's free capacity from the warehouse's stock.
fn restock(seller: &mut Seller, warehouse: &mut Warehouse) -> Result<(), DomainError> {
    let free = seller.free_capacity();
    if free == 0 {
        return Ok(());
    }
    let taken = warehouse.unload_stock(free)?;
    if taken > 0 {
        seller.load_goods(taken)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Market, Seller, Warehouse};

    /// Line network: HQ -1- MarketA -1- Warehouse -1- MarketB, plus a far
    /// warehouse hanging off HQ.
    ///
    /// ```text
    /// FarWh -5- HQ -1- MarketA -1- Warehouse -1- MarketB
    /// ```
    fn line_setup() -> (Network<Location>, Vec<Market>, Vec<Warehouse>) {
        let mut net = Network::new();
        let hq = Location::company("HQ").unwrap();
        let a = Location::market("MarketA").unwrap();
        let b = Location::market("MarketB").unwrap();
        let wh = Location::warehouse("Warehouse").unwrap();
        let far = Location::warehouse("FarWh").unwrap();
        for v in [&hq, &a, &b, &wh, &far] {
            net.add_vertex(v.clone());
        }
        net.add_edge(&far, &hq, 5.0).unwrap();
        net.add_edge(&hq, &a, 1.0).unwrap();
        net.add_edge(&a, &wh, 1.0).unwrap();
        net.add_edge(&wh, &b, 1.0).unwrap();
        let markets = vec![
            Market::new("MarketA").unwrap(),
            Market::new("MarketB").unwrap(),
        ];
        let warehouses = vec![
            Warehouse::new("FarWh", 100).unwrap(),
            Warehouse::new("Warehouse", 100).unwrap(),
        ];
        (net, markets, warehouses)
    }

    fn names(route: &[Location]) -> Vec<&str> {
        route.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn empty_network_is_invalid_state() {
        let net: Network<Location> = Network::new();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        let start = Location::company("HQ").unwrap();
        assert_eq!(
            planner.plan(&start, &mut seller, &mut [], &mut []),
            Err(PlanError::EmptyNetwork)
        );
    }

    #[test]
    fn unknown_start_yields_empty_route() {
        let (net, mut markets, mut warehouses) = line_setup();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        let start = Location::company("Nowhere").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn visit_list_entry_that_is_not_a_market_yields_empty_route() {
        let (net, mut markets, mut warehouses) = line_setup();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.add_market_to_visit("Warehouse").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn preloaded_seller_serves_without_detour() {
        let (net, mut markets, mut warehouses) = line_setup();
        markets[0].add_client(4).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.load_goods(10).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        assert_eq!(names(&route), vec!["MarketA"]);
        assert_eq!(seller.load(), 6);
        assert!(!markets[0].has_clients());
    }

    #[test]
    fn empty_handed_seller_takes_restock_detour() {
        let (net, mut markets, mut warehouses) = line_setup();
        markets[0].add_client(6).unwrap();
        warehouses[1].load_stock(50).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        // Leg to the market, then a round trip to the adjacent warehouse.
        assert_eq!(names(&route), vec!["MarketA", "Warehouse", "MarketA"]);
        assert!(!markets[0].has_clients());
        assert_eq!(warehouses[1].stock(), 40);
        assert_eq!(seller.load(), 4); // 10 loaded, 6 delivered
    }

    #[test]
    fn nearest_stocked_warehouse_wins_over_closer_empty_one() {
        let (net, mut markets, mut warehouses) = line_setup();
        markets[0].add_client(6).unwrap();
        // Adjacent warehouse is empty; only the far one has stock.
        warehouses[0].load_stock(50).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        assert_eq!(
            names(&route),
            vec!["MarketA", "HQ", "FarWh", "HQ", "MarketA"]
        );
        assert!(!markets[0].has_clients());
    }

    #[test]
    fn unreachable_stocked_warehouse_contributes_no_legs() {
        let (mut net, mut markets, mut warehouses) = line_setup();
        // An island warehouse with stock, not connected by any road; the
        // reachable warehouses are all empty.
        let island = Location::warehouse("IslandWh").unwrap();
        net.add_vertex(island);
        warehouses.push(Warehouse::new("IslandWh", 100).unwrap());
        warehouses[2].load_stock(50).unwrap();
        markets[0].add_client(6).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        // The island is the only stocked candidate, so it is picked even at
        // infinite distance; both detour legs are empty paths.
        assert_eq!(names(&route), vec!["MarketA"]);
        assert!(!markets[0].has_clients());
        assert_eq!(warehouses[2].stock(), 40);
    }

    #[test]
    fn exhausted_warehouses_end_the_route_early() {
        let (net, mut markets, mut warehouses) = line_setup();
        markets[0].add_client(30).unwrap();
        warehouses[1].load_stock(12).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        seller.add_market_to_visit("MarketB").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        // Two detours drain the warehouse (10 + 2), then planning stops
        // with demand still outstanding and MarketB never reached.
        assert_eq!(
            names(&route),
            vec![
                "MarketA", "Warehouse", "MarketA", "Warehouse", "MarketA"
            ]
        );
        assert_eq!(markets[0].peek_client_demand(), Ok(18));
        assert_eq!(warehouses[1].stock(), 0);
        assert!(markets[1].clients().next().is_none());
    }

    #[test]
    fn zero_demand_market_is_skipped_without_moving() {
        let (net, mut markets, mut warehouses) = line_setup();
        // MarketA has no clients, MarketB does.
        markets[1].add_client(3).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.load_goods(5).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        seller.add_market_to_visit("MarketB").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        // The leg to MarketB starts from HQ, not from MarketA.
        assert_eq!(names(&route), vec!["MarketA", "Warehouse", "MarketB"]);
        assert!(!markets[1].has_clients());
    }

    #[test]
    fn multi_client_queue_served_in_fifo_order() {
        let (net, mut markets, mut warehouses) = line_setup();
        markets[0].add_client(7).unwrap();
        markets[0].add_client(5).unwrap();
        warehouses[1].load_stock(100).unwrap();
        let planner = RoutePlanner::new(&net);
        let mut seller = Seller::new("S1", "Alice", 10).unwrap();
        seller.load_goods(10).unwrap();
        seller.add_market_to_visit("MarketA").unwrap();
        let start = Location::company("HQ").unwrap();
        let route = planner
            .plan(&start, &mut seller, &mut markets, &mut warehouses)
            .unwrap();
        // First client served from the load (7), second partially (3),
        // one detour covers the remaining 2.
        assert_eq!(names(&route), vec!["MarketA", "Warehouse", "MarketA"]);
        assert!(!markets[0].has_clients());
        assert_eq!(seller.load(), 8); // restocked 10, delivered 2
    }
}
