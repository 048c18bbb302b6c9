//! # roadnet Core
//!
//! Core library for the roadnet road network engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`RoadNetwork`] - weighted directed graph over dense junction ids
//! - [`Route`] / [`Traversal`] - Dijkstra shortest path, BFS and DFS walks
//! - [`DegreeEntry`] - degree-based bottleneck ranking
//! - [`VehicleRegistry`] - chained hash table keyed by vehicle identifier
//!
//! ## Example
//!
//! ```rust
//! use roadnet_core::{RoadNetwork, VehicleRegistry, Vehicle};
//!
//! // Build a small network
//! let mut net = RoadNetwork::new();
//! net.add_node(0, "Centro");
//! net.add_node(1, "Norte");
//! net.add_edge(0, 1, 2.5);
//!
//! // Route between junctions
//! let route = net.shortest_path(0, 1).unwrap();
//! assert_eq!(route.distance, 2.5);
//!
//! // Register a vehicle
//! let mut registry = VehicleRegistry::new();
//! registry.insert(Vehicle {
//!     id: "V1".into(),
//!     category: "private".into(),
//!     plate: "ABC-123".into(),
//!     origin: 0,
//!     destination: 1,
//!     entered_at: "08:30".into(),
//! });
//! assert!(registry.search("V1").is_some());
//! ```

pub mod degree;
pub mod error;
pub mod graph;
pub mod registry;
pub mod route;
pub mod traverse;

pub use degree::DegreeEntry;
pub use error::{Error, Result};
pub use graph::{AdjacencyLink, AdjacencyRow, Link, NodeId, RoadNetwork};
pub use registry::{RegistryStats, Vehicle, VehicleRegistry};
pub use route::Route;
pub use traverse::Traversal;
