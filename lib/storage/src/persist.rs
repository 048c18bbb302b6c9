use std::fs;
use std::path::Path;

use tracing::{info, warn};

use roadnet_core::{Result, RoadNetwork, VehicleRegistry};

use crate::codec::{self, Record};

/// Outcome of a load: how many records were applied and how many lines were
/// skipped as malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub applied: usize,
    pub skipped: usize,
}

/// Apply every parseable record in `path` to the network.
///
/// The file is read in full before anything is applied, so an unreadable
/// path leaves the network untouched. Records are applied in file order;
/// an edge whose endpoints have not been loaded yet is rejected by the
/// engine like any other out-of-range edge. Malformed lines are skipped
/// with a warning; vehicle records are ignored.
pub fn load_network<P: AsRef<Path>>(path: P, net: &mut RoadNetwork) -> Result<LoadReport> {
    let contents = fs::read_to_string(&path)?;
    let mut report = LoadReport::default();

    for line in contents.lines() {
        match codec::parse_line(line) {
            Ok(Some(Record::Node { id, name })) => {
                net.add_node(id, name);
                report.applied += 1;
            }
            Ok(Some(Record::Edge { from, to, weight })) => {
                net.add_edge(from, to, weight);
                report.applied += 1;
            }
            Ok(Some(Record::Vehicle(_))) | Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "skipping malformed line");
                report.skipped += 1;
            }
        }
    }

    info!(
        path = %path.as_ref().display(),
        applied = report.applied,
        skipped = report.skipped,
        "network loaded"
    );
    Ok(report)
}

/// Apply every vehicle record in `path` to the registry. Same contract as
/// [`load_network`]: whole-file read first, malformed lines skipped with a
/// warning, records of other kinds ignored.
pub fn load_vehicles<P: AsRef<Path>>(path: P, registry: &mut VehicleRegistry) -> Result<LoadReport> {
    let contents = fs::read_to_string(&path)?;
    let mut report = LoadReport::default();

    for line in contents.lines() {
        match codec::parse_line(line) {
            Ok(Some(Record::Vehicle(v))) => {
                registry.insert(v);
                report.applied += 1;
            }
            Ok(Some(_)) | Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "skipping malformed line");
                report.skipped += 1;
            }
        }
    }

    info!(
        path = %path.as_ref().display(),
        applied = report.applied,
        skipped = report.skipped,
        "vehicles loaded"
    );
    Ok(report)
}

/// Write the network to `path`: node lines in slot order skipping absent
/// slots, then edge lines in slot order with each adjacency list's order
/// preserved. The contents go to a sibling temp file first and are renamed
/// into place, so a failed save never truncates an existing file.
pub fn save_network<P: AsRef<Path>>(path: P, net: &RoadNetwork) -> Result<()> {
    let mut out = String::from("# nodes\n");
    for id in net.present_nodes() {
        let name = net.node_name(id).unwrap_or_default();
        out.push_str(&codec::format_node(id, name));
        out.push('\n');
    }
    out.push_str("# edges\n");
    for id in 0..net.capacity() {
        for link in net.links(id) {
            out.push_str(&codec::format_edge(id, link.target, link.weight));
            out.push('\n');
        }
    }

    write_atomically(path.as_ref(), &out)?;
    info!(path = %path.as_ref().display(), "network saved");
    Ok(())
}

/// Write the registry to `path` in bucket-then-chain order.
pub fn save_vehicles<P: AsRef<Path>>(path: P, registry: &VehicleRegistry) -> Result<()> {
    let mut out = String::from("# id;category;plate;origin;destination;entered\n");
    for v in registry.iter() {
        out.push_str(&codec::format_vehicle(v));
        out.push('\n');
    }

    write_atomically(path.as_ref(), &out)?;
    info!(path = %path.as_ref().display(), "vehicles saved");
    Ok(())
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let temp = path.with_extension("tmp");
    fs::write(&temp, contents)?;
    fs::rename(&temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadnet_core::Vehicle;

    fn sample_network() -> RoadNetwork {
        let mut net = RoadNetwork::new();
        net.add_node(0, "Centro");
        net.add_node(1, "Norte");
        net.add_node(3, "Sur");
        net.add_edge(0, 1, 1.5);
        net.add_edge(0, 3, 4.0);
        net.add_edge(1, 3, 2.0);
        net.add_edge(1, 3, 2.5);
        net
    }

    #[test]
    fn test_network_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.txt");

        let net = sample_network();
        save_network(&path, &net).unwrap();

        let mut restored = RoadNetwork::new();
        let report = load_network(&path, &mut restored).unwrap();
        assert_eq!(report.skipped, 0);
        // 3 nodes + 4 edges
        assert_eq!(report.applied, 7);

        assert_eq!(restored.node_count(), 3);
        assert_eq!(restored.resolve("Sur"), Some(3));
        assert!(!restored.is_present(2));
        // Adjacency order, parallel edges included, must survive.
        let links: Vec<_> = restored.links(1).iter().map(|l| (l.target, l.weight)).collect();
        assert_eq!(links, vec![(3, 2.0), (3, 2.5)]);
    }

    #[test]
    fn test_vehicle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vehiculos.txt");

        let mut registry = VehicleRegistry::new();
        registry.insert(Vehicle {
            id: "V1".into(),
            category: "transit".into(),
            plate: "BUS-042".into(),
            origin: 0,
            destination: 3,
            entered_at: "07:15".into(),
        });
        save_vehicles(&path, &registry).unwrap();

        let mut restored = VehicleRegistry::new();
        load_vehicles(&path, &mut restored).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.search("V1").unwrap().plate, "BUS-042");
    }

    #[test]
    fn test_unreadable_path_leaves_state_untouched() {
        let mut net = sample_network();
        let before = net.edge_count();
        let err = load_network("/no/such/file", &mut net);
        assert!(err.is_err());
        assert_eq!(net.edge_count(), before);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.txt");
        fs::write(
            &path,
            "N;0;Centro\nN;uno;Roto\nE;0;0;oops\n# fine\nE;0;0;1.0\n",
        )
        .unwrap();

        let mut net = RoadNetwork::new();
        let report = load_network(&path, &mut net).unwrap();
        assert_eq!(report.applied, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(net.node_count(), 1);
        assert_eq!(net.links(0).len(), 1);
    }

    #[test]
    fn test_network_loader_ignores_vehicle_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        fs::write(&path, "N;0;Centro\nV;V1;private;P;0;0;09:00\n").unwrap();

        let mut net = RoadNetwork::new();
        let report = load_network(&path, &mut net).unwrap();
        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_save_overwrites_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.txt");

        save_network(&path, &sample_network()).unwrap();
        let first = fs::read_to_string(&path).unwrap();

        save_network(&path, &sample_network()).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
        assert!(!path.with_extension("tmp").exists());
    }
}
