//! Domain model for company delivery planning.
//!
//! # Overview
//!
//! - [`Location`]: a named point in the delivery network, tagged with what
//!   stands there ([`LocationKind`])
//! - [`Market`]: a FIFO queue of outstanding client demands
//! - [`Warehouse`]: replenishment stock with a hard capacity
//! - [`Seller`]: carrying capacity, current load, and an ordered visit list
//!
//! # Design
//!
//! Locations are the network's vertex values; equality and hashing use the
//! name alone, so one name maps to exactly one vertex. All quantities are
//! `u32`: demand, stock and load can never go negative, and the load/stock
//! mutators clamp to the available amount and report what actually moved.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Validation error for entity construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Names and identifiers must be non-blank.
    BlankName,
    /// Capacities must be positive.
    InvalidCapacity,
    /// Amounts (demand, stock, load) must be positive.
    InvalidAmount,
    /// The market has no queued clients.
    NoClients,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::BlankName => write!(f, "name must not be blank"),
            DomainError::InvalidCapacity => write!(f, "capacity must be > 0"),
            DomainError::InvalidAmount => write!(f, "amount must be > 0"),
            DomainError::NoClients => write!(f, "there are no clients to serve"),
        }
    }
}

impl std::error::Error for DomainError {}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::BlankName);
    }
    Ok(())
}

/// What stands at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationKind {
    /// A company site (headquarters, depot).
    Company,
    /// A market with client demand.
    Market,
    /// A warehouse holding replenishment stock.
    Warehouse,
}

/// A named location registered in the delivery network.
///
/// Two locations are equal when their names are equal, regardless of kind;
/// the network enforces at most one vertex per name.
///
/// # Examples
///
/// ```
/// use delivery_routing::domain::{Location, LocationKind};
///
/// let hq = Location::company("Headquarters").unwrap();
/// assert_eq!(hq.kind(), LocationKind::Company);
///
/// // Blank names are rejected up front.
/// assert!(Location::market("  ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    name: String,
    kind: LocationKind,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Location {
    /// Creates a location of the given kind.
    pub fn new(name: impl Into<String>, kind: LocationKind) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, kind })
    }

    /// Creates a company site.
    pub fn company(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, LocationKind::Company)
    }

    /// Creates a market location.
    pub fn market(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, LocationKind::Market)
    }

    /// Creates a warehouse location.
    pub fn warehouse(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(name, LocationKind::Warehouse)
    }

    /// The location's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What stands here.
    pub fn kind(&self) -> LocationKind {
        self.kind
    }
}

/// A market holding a FIFO queue of outstanding client demands.
///
/// # Examples
///
/// ```
/// use delivery_routing::domain::Market;
///
/// let mut market = Market::new("Riverside Market").unwrap();
/// market.add_client(15).unwrap();
///
/// // A partial delivery leaves the remainder at the front of the queue.
/// assert_eq!(market.serve_client(10), Ok(5));
/// assert_eq!(market.peek_client_demand(), Ok(5));
/// assert_eq!(market.client_count(), 1);
///
/// // Covering the demand dequeues the client.
/// assert_eq!(market.serve_client(5), Ok(0));
/// assert!(!market.has_clients());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    name: String,
    clients: VecDeque<u32>,
}

impl Market {
    /// Creates a market with an empty client queue.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            clients: VecDeque::new(),
        })
    }

    /// The market's name; matches its network location.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueues a client demanding `needed_stock` units.
    pub fn add_client(&mut self, needed_stock: u32) -> Result<(), DomainError> {
        if needed_stock == 0 {
            return Err(DomainError::InvalidAmount);
        }
        self.clients.push_back(needed_stock);
        Ok(())
    }

    /// The front client's outstanding demand.
    pub fn peek_client_demand(&self) -> Result<u32, DomainError> {
        self.clients.front().copied().ok_or(DomainError::NoClients)
    }

    /// Serves the front client with `stock` units.
    ///
    /// A delivery covering the demand dequeues the client and returns 0; a
    /// partial delivery decrements the front demand in place and returns
    /// the remainder. Serving zero units is allowed (an empty-handed
    /// seller) and returns the full outstanding demand.
    pub fn serve_client(&mut self, stock: u32) -> Result<u32, DomainError> {
        let front = self.clients.front_mut().ok_or(DomainError::NoClients)?;
        if stock >= *front {
            self.clients.pop_front();
            return Ok(0);
        }
        *front -= stock;
        Ok(*front)
    }

    /// Returns true if any client is queued.
    pub fn has_clients(&self) -> bool {
        !self.clients.is_empty()
    }

    /// Number of queued clients.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Queued demands in FIFO order.
    pub fn clients(&self) -> impl Iterator<Item = u32> + '_ {
        self.clients.iter().copied()
    }
}

/// A warehouse with a hard capacity and current stock.
///
/// Invariant: `0 <= stock <= capacity`.
///
/// # Examples
///
/// ```
/// use delivery_routing::domain::Warehouse;
///
/// let mut warehouse = Warehouse::new("North Warehouse", 50).unwrap();
/// // Loading clamps to the free space.
/// assert_eq!(warehouse.load_stock(60), Ok(50));
/// assert_eq!(warehouse.stock(), 50);
/// assert_eq!(warehouse.unload_stock(80), Ok(50));
/// assert_eq!(warehouse.stock(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    name: String,
    capacity: u32,
    stock: u32,
}

impl Warehouse {
    /// Creates an empty warehouse with the given capacity.
    pub fn new(name: impl Into<String>, capacity: u32) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity);
        }
        Ok(Self {
            name,
            capacity,
            stock: 0,
        })
    }

    /// The warehouse's name; matches its network location.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum stock this warehouse can hold.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Units currently in stock.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Raises or lowers the capacity; it can never drop below the current
    /// stock.
    pub fn set_capacity(&mut self, capacity: u32) -> Result<(), DomainError> {
        if capacity == 0 || capacity < self.stock {
            return Err(DomainError::InvalidCapacity);
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Adds up to `stock` units, clamped to the free space. Returns the
    /// amount actually stored.
    pub fn load_stock(&mut self, stock: u32) -> Result<u32, DomainError> {
        if stock == 0 {
            return Err(DomainError::InvalidAmount);
        }
        let loaded = stock.min(self.capacity - self.stock);
        self.stock += loaded;
        Ok(loaded)
    }

    /// Removes up to `stock` units, clamped to the current stock. Returns
    /// the amount actually removed.
    pub fn unload_stock(&mut self, stock: u32) -> Result<u32, DomainError> {
        if stock == 0 {
            return Err(DomainError::InvalidAmount);
        }
        let unloaded = stock.min(self.stock);
        self.stock -= unloaded;
        Ok(unloaded)
    }
}

/// A seller with a carrying capacity, current load, and an ordered list of
/// markets to visit.
///
/// Invariant: `0 <= load <= capacity`.
///
/// # Examples
///
/// ```
/// use delivery_routing::domain::Seller;
///
/// let mut seller = Seller::new("S1", "Alice", 10).unwrap();
/// assert_eq!(seller.load_goods(15), Ok(10)); // clamped to capacity
/// assert_eq!(seller.unload_goods(3), Ok(3));
/// assert_eq!(seller.load(), 7);
///
/// seller.add_market_to_visit("Riverside Market").unwrap();
/// assert_eq!(seller.add_market_to_visit("Riverside Market"), Ok(false));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    id: String,
    name: String,
    capacity: u32,
    load: u32,
    markets_to_visit: Vec<String>,
}

impl Seller {
    /// Creates an unloaded seller.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capacity: u32,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let name = name.into();
        validate_name(&id)?;
        validate_name(&name)?;
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity);
        }
        Ok(Self {
            id,
            name,
            capacity,
            load: 0,
            markets_to_visit: Vec::new(),
        })
    }

    /// Unique seller identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum load the seller can carry.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Units currently carried.
    pub fn load(&self) -> u32 {
        self.load
    }

    /// Free carrying capacity.
    pub fn free_capacity(&self) -> u32 {
        self.capacity - self.load
    }

    /// Loads up to `weight` units, clamped to the free capacity. Returns
    /// the amount actually loaded.
    pub fn load_goods(&mut self, weight: u32) -> Result<u32, DomainError> {
        if weight == 0 {
            return Err(DomainError::InvalidAmount);
        }
        let loaded = weight.min(self.free_capacity());
        self.load += loaded;
        Ok(loaded)
    }

    /// Unloads up to `weight` units, clamped to the current load. Returns
    /// the amount actually unloaded.
    pub fn unload_goods(&mut self, weight: u32) -> Result<u32, DomainError> {
        if weight == 0 {
            return Err(DomainError::InvalidAmount);
        }
        let unloaded = weight.min(self.load);
        self.load -= unloaded;
        Ok(unloaded)
    }

    /// Appends a market name to the visit list. Returns `Ok(false)` when it
    /// is already listed.
    pub fn add_market_to_visit(&mut self, market: impl Into<String>) -> Result<bool, DomainError> {
        let market = market.into();
        validate_name(&market)?;
        if self.markets_to_visit.contains(&market) {
            return Ok(false);
        }
        self.markets_to_visit.push(market);
        Ok(true)
    }

    /// Drops a market name from the visit list. Returns `false` when it was
    /// not listed.
    pub fn remove_market_to_visit(&mut self, market: &str) -> bool {
        let before = self.markets_to_visit.len();
        self.markets_to_visit.retain(|m| m != market);
        before != self.markets_to_visit.len()
    }

    /// Market names in visit order.
    pub fn markets_to_visit(&self) -> impl Iterator<Item = &str> {
        self.markets_to_visit.iter().map(String::as_str)
    }
}
