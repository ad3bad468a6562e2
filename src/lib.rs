//! Company delivery routing over a weighted road network.
//!
//! Models a delivery company's road map as a dense-matrix network and
//! plans capacity-constrained seller routes across it.
//!
//! # Domain Model
//!
//! - [`Location`](domain::Location): Named point on the network, tagged by kind
//! - [`Market`](domain::Market): FIFO queue of outstanding client demands
//! - [`Warehouse`](domain::Warehouse): Replenishment stock with a hard capacity
//! - [`Seller`](domain::Seller): Carrying capacity, load and an ordered visit list
//! - [`Company`](company::Company): The aggregate tying network and entities together
//!
//! # Routing
//!
//! [`Network`](network::Network) runs a worklist shortest-path engine over
//! parallel adjacency and weight matrices; [`RoutePlanner`](planner::RoutePlanner)
//! chains shortest-path legs through a seller's markets, inserting restock
//! detours to the nearest stocked warehouse whenever the load runs out.

pub mod company;
pub mod demo_data;
pub mod domain;
pub mod dto;
pub mod graph;
pub mod network;
pub mod planner;

mod matrix;
