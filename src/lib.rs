//! # roadnet
//!
//! An in-memory urban road network engine: a weighted directed graph with
//! classic search algorithms, plus a chained-hash vehicle registry.
//!
//! ## Quick Start
//!
//! ### As a Shell
//!
//! ```bash
//! cargo install roadnet
//! roadnet --network red.txt --vehicles vehiculos.txt
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use roadnet::prelude::*;
//!
//! let mut net = RoadNetwork::new();
//! net.add_node(0, "Centro");
//! net.add_node(1, "Norte");
//! net.add_node(2, "Aeropuerto");
//! net.add_edge(0, 1, 1.0);
//! net.add_edge(1, 2, 2.0);
//!
//! // Shortest route by junction id
//! let route = net.shortest_path(0, 2).unwrap();
//! assert_eq!(route.distance, 3.0);
//!
//! // Traversals and analytics
//! let walk = net.breadth_first(0);
//! let clusters = net.components();
//! let ranking = net.degree_ranking();
//! # let _ = (walk, clusters, ranking);
//! ```
//!
//! ## Crate Structure
//!
//! roadnet is composed of two library crates behind this facade:
//!
//! - [`roadnet-core`](https://docs.rs/roadnet-core) - graph store, Dijkstra,
//!   BFS/DFS, components, degree ranking, vehicle registry
//! - [`roadnet-storage`](https://docs.rs/roadnet-storage) - delimited record
//!   codec and file persistence
//!
//! The engines are single-threaded, fully memory-resident and synchronous;
//! each instance is owned and mutated by exactly one caller.

// Re-export core types
pub use roadnet_core::{
    AdjacencyLink, AdjacencyRow, DegreeEntry, Error, Link, NodeId, RegistryStats, Result,
    RoadNetwork, Route, Traversal, Vehicle, VehicleRegistry,
};

// Re-export storage
pub use roadnet_storage::{
    load_network, load_vehicles, save_network, save_vehicles, LoadReport, Record,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_network, load_vehicles, save_network, save_vehicles, DegreeEntry, Error, LoadReport,
        NodeId, RegistryStats, Result, RoadNetwork, Route, Traversal, Vehicle, VehicleRegistry,
    };
}
