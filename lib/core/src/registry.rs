use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::NodeId;

/// A registered vehicle. Origin and destination are plain junction ids, not
/// live references; removing a junction from the network deliberately does
/// not cascade into the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub category: String,
    pub plate: String,
    pub origin: NodeId,
    pub destination: NodeId,
    pub entered_at: String,
}

/// Observational snapshot of the registry's bucket layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryStats {
    pub capacity: usize,
    pub len: usize,
    pub load_factor: f32,
    pub occupied_buckets: usize,
    pub occupancy: f32,
    pub longest_chain: usize,
}

/// Vehicle registry backed by a chained hash table.
///
/// The bucket count is fixed at construction; there is no rehashing, so the
/// load factor is unbounded and a pathological key distribution degrades
/// lookups to a linear chain scan. Chains preserve insertion order.
pub struct VehicleRegistry {
    buckets: Vec<Vec<(String, Vehicle)>>,
    len: usize,
}

impl VehicleRegistry {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A registry with a fixed bucket count. Capacity is clamped to at
    /// least one bucket.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buckets: vec![Vec::new(); capacity],
            len: 0,
        }
    }

    /// Polynomial rolling hash, `h = (h * 31 + byte) % capacity` over the
    /// key's bytes, seeded at 0.
    fn bucket_of(&self, key: &str) -> usize {
        key.bytes()
            .fold(0usize, |h, b| (h * 31 + usize::from(b)) % self.buckets.len())
    }

    /// Register a vehicle under its identifier. Re-registering an existing
    /// id replaces the record in place: last write wins, the live count is
    /// unchanged and the entry keeps its chain position.
    pub fn insert(&mut self, vehicle: Vehicle) {
        let idx = self.bucket_of(&vehicle.id);
        let bucket = &mut self.buckets[idx];

        if let Some(entry) = bucket.iter_mut().find(|(k, _)| *k == vehicle.id) {
            debug!(id = %vehicle.id, "re-registering vehicle, replacing record");
            entry.1 = vehicle;
            return;
        }

        bucket.push((vehicle.id.clone(), vehicle));
        self.len += 1;
    }

    /// Look up a vehicle by identifier.
    pub fn search(&self, key: &str) -> Option<&Vehicle> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Deregister a vehicle. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let idx = self.bucket_of(key);
        let bucket = &mut self.buckets[idx];
        if let Some(pos) = bucket.iter().position(|(k, _)| k == key) {
            bucket.remove(pos);
            self.len -= 1;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Vehicles in bucket-then-chain order. The order carries no meaning
    /// beyond being deterministic for a given insertion history.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.buckets.iter().flatten().map(|(_, v)| v)
    }

    pub fn stats(&self) -> RegistryStats {
        let capacity = self.buckets.len();
        let occupied_buckets = self.buckets.iter().filter(|b| !b.is_empty()).count();
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);

        RegistryStats {
            capacity,
            len: self.len,
            load_factor: self.len as f32 / capacity as f32,
            occupied_buckets,
            occupancy: occupied_buckets as f32 / capacity as f32,
            longest_chain,
        }
    }
}

impl Default for VehicleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, plate: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            category: "private".to_string(),
            plate: plate.to_string(),
            origin: 0,
            destination: 1,
            entered_at: "08:30".to_string(),
        }
    }

    #[test]
    fn test_insert_then_search() {
        let mut reg = VehicleRegistry::new();
        reg.insert(vehicle("V1", "ABC-123"));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.search("V1").unwrap().plate, "ABC-123");
        assert!(reg.search("V2").is_none());
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut reg = VehicleRegistry::new();
        reg.insert(vehicle("V1", "ABC-123"));
        reg.insert(vehicle("V1", "XYZ-999"));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.search("V1").unwrap().plate, "XYZ-999");
    }

    #[test]
    fn test_remove() {
        let mut reg = VehicleRegistry::new();
        reg.insert(vehicle("V1", "ABC-123"));
        assert!(reg.remove("V1"));
        assert!(!reg.remove("V1"));
        assert!(reg.search("V1").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_collisions_chain_in_one_bucket() {
        // Every key lands in the single bucket; the chain must still keep
        // the entries apart.
        let mut reg = VehicleRegistry::with_capacity(1);
        reg.insert(vehicle("V1", "A"));
        reg.insert(vehicle("V2", "B"));
        reg.insert(vehicle("V3", "C"));

        assert_eq!(reg.len(), 3);
        assert_eq!(reg.search("V2").unwrap().plate, "B");

        let stats = reg.stats();
        assert_eq!(stats.longest_chain, 3);
        assert_eq!(stats.occupied_buckets, 1);
        assert_eq!(stats.load_factor, 3.0);
    }

    #[test]
    fn test_stats_on_spread_keys() {
        let mut reg = VehicleRegistry::with_capacity(10);
        for i in 0..5 {
            reg.insert(vehicle(&format!("V{}", i), "P"));
        }
        let stats = reg.stats();
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.len, 5);
        assert!((stats.load_factor - 0.5).abs() < f32::EPSILON);
        assert!(stats.longest_chain >= 1);
        assert!(stats.occupied_buckets >= 1 && stats.occupied_buckets <= 5);
    }

    #[test]
    fn test_iteration_is_deterministic() {
        let mut a = VehicleRegistry::with_capacity(7);
        let mut b = VehicleRegistry::with_capacity(7);
        for i in 0..10 {
            a.insert(vehicle(&format!("V{}", i), "P"));
            b.insert(vehicle(&format!("V{}", i), "P"));
        }
        let ids_a: Vec<_> = a.iter().map(|v| v.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(ids_a.len(), 10);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let reg = VehicleRegistry::with_capacity(0);
        assert_eq!(reg.capacity(), 1);
    }
}
