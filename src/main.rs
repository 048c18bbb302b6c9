use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use roadnet_core::{NodeId, RoadNetwork, Vehicle, VehicleRegistry};
use roadnet_storage as storage;

/// An in-memory urban road network engine
#[derive(Parser, Debug)]
#[command(name = "roadnet")]
#[command(about = "An in-memory urban road network engine", long_about = None)]
struct Args {
    /// Network file to load at startup
    #[arg(short, long)]
    network: Option<PathBuf>,

    /// Vehicle file to load at startup
    #[arg(short, long)]
    vehicles: Option<PathBuf>,

    /// Bucket count of the vehicle registry
    #[arg(long, default_value_t = 100)]
    table_size: usize,

    /// Print query results as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting roadnet v{}", env!("CARGO_PKG_VERSION"));

    let mut shell = Shell::new(VehicleRegistry::with_capacity(args.table_size), args.json);

    if let Some(path) = &args.network {
        storage::load_network(path, &mut shell.net)?;
    }
    if let Some(path) = &args.vehicles {
        storage::load_vehicles(path, &mut shell.registry)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if !shell.dispatch(line.trim()) {
            break;
        }
    }

    info!("Shutting down");
    Ok(())
}

/// Thin command dispatcher. Owns the two engines and hands them by reference
/// into the library's query/mutation functions; it never holds derived state
/// of its own.
struct Shell {
    net: RoadNetwork,
    registry: VehicleRegistry,
    json: bool,
}

impl Shell {
    fn new(registry: VehicleRegistry, json: bool) -> Self {
        Self {
            net: RoadNetwork::new(),
            registry,
            json,
        }
    }

    /// Handle one command line. Returns false when the session should end.
    fn dispatch(&mut self, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, rest)) = words.split_first() else {
            return true;
        };

        let outcome = match cmd {
            "quit" | "exit" => return false,
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "load" => self.load(rest),
            "save" => self.save(rest),
            "add-node" => self.add_node(rest),
            "remove-node" => self.remove_node(rest),
            "add-edge" => self.add_edge(rest),
            "remove-edge" => self.remove_edge(rest),
            "adjacency" => self.adjacency(),
            "route" => self.route(rest),
            "bfs" => self.traverse(rest, true),
            "dfs" => self.traverse(rest, false),
            "components" => self.components(),
            "bottlenecks" => self.bottlenecks(),
            "veh-add" => self.veh_add(rest),
            "veh-find" => self.veh_find(rest),
            "veh-remove" => self.veh_remove(rest),
            "hash-stats" => self.hash_stats(),
            other => {
                println!("unknown command '{}', try 'help'", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("error: {}", e);
        }
        true
    }

    fn resolve(&self, name: &str) -> anyhow::Result<NodeId> {
        self.net
            .resolve(name)
            .ok_or_else(|| anyhow::anyhow!("junction '{}' not found", name))
    }

    fn emit<T: serde::Serialize>(&self, value: &T, plain: impl FnOnce()) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            plain();
        }
        Ok(())
    }

    fn load(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [network, vehicles @ ..] = args else {
            anyhow::bail!("usage: load <network-file> [vehicle-file]");
        };
        let report = storage::load_network(network, &mut self.net)?;
        println!("loaded {} records ({} skipped)", report.applied, report.skipped);
        if let [vehicles] = vehicles {
            let report = storage::load_vehicles(vehicles, &mut self.registry)?;
            println!("loaded {} vehicles ({} skipped)", report.applied, report.skipped);
        }
        Ok(())
    }

    fn save(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [network, vehicles @ ..] = args else {
            anyhow::bail!("usage: save <network-file> [vehicle-file]");
        };
        storage::save_network(network, &self.net)?;
        if let [vehicles] = vehicles {
            storage::save_vehicles(vehicles, &self.registry)?;
        }
        println!("saved");
        Ok(())
    }

    fn add_node(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [id, name] = args else {
            anyhow::bail!("usage: add-node <id> <name>");
        };
        self.net.add_node(id.parse()?, *name);
        println!("junction added");
        Ok(())
    }

    fn remove_node(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [id] = args else {
            anyhow::bail!("usage: remove-node <id>");
        };
        self.net.remove_node(id.parse()?);
        println!("junction removed");
        Ok(())
    }

    fn add_edge(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [from, to, weight] = args else {
            anyhow::bail!("usage: add-edge <from> <to> <weight>");
        };
        if self.net.add_edge(from.parse()?, to.parse()?, weight.parse()?) {
            println!("road added");
        } else {
            println!("road rejected");
        }
        Ok(())
    }

    fn remove_edge(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [from, to] = args else {
            anyhow::bail!("usage: remove-edge <from> <to>");
        };
        self.net.remove_edge(from.parse()?, to.parse()?);
        println!("road removed");
        Ok(())
    }

    fn adjacency(&self) -> anyhow::Result<()> {
        let rows = self.net.adjacency();
        self.emit(&rows, || {
            for row in &rows {
                let links: Vec<String> = row
                    .links
                    .iter()
                    .map(|l| {
                        let name = l.target_name.as_deref().unwrap_or("?");
                        format!("-> {}({})", name, l.weight)
                    })
                    .collect();
                println!("{} ({}): {}", row.name, row.id, links.join(" "));
            }
        })
    }

    fn route(&self, args: &[&str]) -> anyhow::Result<()> {
        let [from, to] = args else {
            anyhow::bail!("usage: route <from-name> <to-name>");
        };
        let (s, t) = (self.resolve(from)?, self.resolve(to)?);
        match self.net.shortest_path(s, t) {
            Some(route) => self.emit(&route, || {
                let names: Vec<&str> =
                    route.nodes.iter().map(|&id| self.net.node_name(id).unwrap_or("?")).collect();
                println!(
                    "distance {:.2}: {} ({:?})",
                    route.distance,
                    names.join(" -> "),
                    route.elapsed
                );
            }),
            None => {
                println!("no route from {} to {}", from, to);
                Ok(())
            }
        }
    }

    fn traverse(&self, args: &[&str], breadth: bool) -> anyhow::Result<()> {
        let [start] = args else {
            anyhow::bail!("usage: {} <start-name>", if breadth { "bfs" } else { "dfs" });
        };
        let s = self.resolve(start)?;
        let walk = if breadth {
            self.net.breadth_first(s)
        } else {
            self.net.depth_first(s)
        };
        self.emit(&walk, || {
            let names: Vec<&str> =
                walk.order.iter().map(|&id| self.net.node_name(id).unwrap_or("?")).collect();
            println!(
                "visited {} junctions in {:?}: {}",
                walk.reached,
                walk.elapsed,
                names.join(" ")
            );
        })
    }

    fn components(&self) -> anyhow::Result<()> {
        let clusters = self.net.components();
        self.emit(&clusters, || {
            for (i, members) in clusters.iter().enumerate() {
                let names: Vec<&str> =
                    members.iter().map(|&id| self.net.node_name(id).unwrap_or("?")).collect();
                println!("component {}: {}", i + 1, names.join(" "));
            }
            println!("total: {}", clusters.len());
        })
    }

    fn bottlenecks(&self) -> anyhow::Result<()> {
        let ranking = self.net.degree_ranking();
        self.emit(&ranking, || {
            println!("{:<20} {:>6} {:>6} {:>6}", "junction", "total", "in", "out");
            for e in &ranking {
                println!(
                    "{:<20} {:>6} {:>6} {:>6}",
                    e.name, e.total, e.in_degree, e.out_degree
                );
            }
        })
    }

    fn veh_add(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [id, category, plate, origin, destination, entered_at] = args else {
            anyhow::bail!("usage: veh-add <id> <category> <plate> <origin> <destination> <entered>");
        };
        self.registry.insert(Vehicle {
            id: id.to_string(),
            category: category.to_string(),
            plate: plate.to_string(),
            origin: origin.parse()?,
            destination: destination.parse()?,
            entered_at: entered_at.to_string(),
        });
        println!("vehicle registered");
        Ok(())
    }

    fn veh_find(&self, args: &[&str]) -> anyhow::Result<()> {
        let [id] = args else {
            anyhow::bail!("usage: veh-find <id>");
        };
        match self.registry.search(id) {
            Some(v) => self.emit(v, || {
                println!(
                    "{}: {} plate {} from {} to {} entered {}",
                    v.id, v.category, v.plate, v.origin, v.destination, v.entered_at
                );
            }),
            None => {
                println!("vehicle '{}' not found", id);
                Ok(())
            }
        }
    }

    fn veh_remove(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let [id] = args else {
            anyhow::bail!("usage: veh-remove <id>");
        };
        if self.registry.remove(id) {
            println!("vehicle deregistered");
        } else {
            println!("vehicle '{}' not found", id);
        }
        Ok(())
    }

    fn hash_stats(&self) -> anyhow::Result<()> {
        let stats = self.registry.stats();
        self.emit(&stats, || {
            println!("capacity:        {}", stats.capacity);
            println!("registered:      {}", stats.len);
            println!("load factor:     {:.3}", stats.load_factor);
            println!(
                "occupied:        {} / {} ({:.1}%)",
                stats.occupied_buckets,
                stats.capacity,
                stats.occupancy * 100.0
            );
            println!("longest chain:   {}", stats.longest_chain);
        })
    }
}

const HELP: &str = "\
commands:
  load <network-file> [vehicle-file]    load records from disk
  save <network-file> [vehicle-file]    save records to disk
  add-node <id> <name>                  register a junction
  remove-node <id>                      tombstone a junction
  add-edge <from> <to> <weight>         add a directed road
  remove-edge <from> <to>               remove all roads from->to
  adjacency                             print the adjacency table
  route <from-name> <to-name>           Dijkstra shortest route
  bfs <start-name>                      breadth-first walk
  dfs <start-name>                      depth-first walk
  components                            forward-reachability clusters
  bottlenecks                           degree ranking
  veh-add <id> <cat> <plate> <o> <d> <t>  register a vehicle
  veh-find <id>                         look up a vehicle
  veh-remove <id>                       deregister a vehicle
  hash-stats                            registry bucket diagnostics
  quit                                  exit";
