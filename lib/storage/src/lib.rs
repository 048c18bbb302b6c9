//! # roadnet Storage
//!
//! Storage layer for the roadnet road network engine: the `;`-delimited
//! record codec and whole-file load/save for networks and vehicle
//! registries.
//!
//! Loads are applied record by record (malformed lines are skipped with a
//! warning rather than aborting the file) and saves are written to a temp
//! file and renamed into place.

pub mod codec;
pub mod persist;

pub use codec::{parse_line, Record};
pub use persist::{load_network, load_vehicles, save_network, save_vehicles, LoadReport};
