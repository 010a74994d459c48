//! CLI entry point for the `graphctl` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use graph_engine::cli::commands;
use graph_engine::{GraphError, PathBudget};

#[derive(Parser)]
#[command(
    name = "graphctl",
    about = "Inspect, edit and analyse graphs stored as text files"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty graph file
    Create {
        /// Path to the graph file to create
        file: PathBuf,
        /// Direction: directed or undirected
        #[arg(long, default_value = "directed")]
        direction: String,
        /// Store edge weights
        #[arg(long)]
        weighted: bool,
    },
    /// Display information about a graph file
    Info {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Add a vertex
    AddVertex {
        /// Path to the graph file
        file: PathBuf,
        /// Vertex value (bool, integer, float or text)
        value: String,
    },
    /// Add an edge between two vertices
    AddEdge {
        /// Path to the graph file
        file: PathBuf,
        /// Source vertex index
        from: usize,
        /// Target vertex index
        to: usize,
        /// Edge weight
        #[arg(long, allow_hyphen_values = true)]
        weight: Option<f64>,
    },
    /// Remove a vertex and its edges
    RemoveVertex {
        /// Path to the graph file
        file: PathBuf,
        /// Vertex index
        index: usize,
    },
    /// Remove an edge by its index in the `edges` listing
    RemoveEdge {
        /// Path to the graph file
        file: PathBuf,
        /// Edge index
        index: usize,
    },
    /// List vertices
    Vertices {
        /// Path to the graph file
        file: PathBuf,
    },
    /// List stored edge records
    Edges {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Print the adjacency list
    Adjacency {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Change orientation or weighting without touching edges
    Retype {
        /// Path to the graph file
        file: PathBuf,
        /// Direction: directed or undirected
        #[arg(long)]
        direction: Option<String>,
        /// Weighted: true or false
        #[arg(long)]
        weighted: Option<bool>,
    },
    /// List vertices with a self-loop (directed graphs only)
    Knots {
        /// Path to the graph file
        file: PathBuf,
    },
    /// List vertices with a smaller in-degree than the given one
    DegreeBelow {
        /// Path to the graph file
        file: PathBuf,
        /// Reference vertex index
        index: usize,
    },
    /// Remove vertices with in-degree zero
    RemoveIsolated {
        /// Path to the graph file
        file: PathBuf,
        /// Only report what would be removed
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the cyclomatic number
    Cyclomatic {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Find a vertex reachable from two vertices by equal-length paths
    EqualPath {
        /// Path to the graph file
        file: PathBuf,
        /// First vertex index
        u: usize,
        /// Second vertex index
        v: usize,
        /// Longest simple path explored by the fallback search
        #[arg(long, default_value = "64")]
        max_depth: usize,
        /// Paths enumerated per start before giving up
        #[arg(long, default_value = "100000")]
        max_paths: usize,
    },
    /// Vertices reachable within N hops or a weighted distance (directed only)
    Reachable {
        /// Path to the graph file
        file: PathBuf,
        /// Start vertex index
        start: usize,
        /// Maximum number of hops
        #[arg(long, default_value = "1")]
        hops: usize,
        /// Maximum weighted distance; overrides --hops
        #[arg(long)]
        distance: Option<f64>,
    },
    /// Shortest distances from a vertex (Dijkstra)
    Dijkstra {
        /// Path to the graph file
        file: PathBuf,
        /// Start vertex index
        start: usize,
        /// Report only the path to this vertex index
        #[arg(long)]
        to: Option<usize>,
    },
    /// Shortest distances allowing negative weights (Bellman-Ford)
    BellmanFord {
        /// Path to the graph file
        file: PathBuf,
        /// Start vertex index
        start: usize,
    },
    /// All-pairs distance matrix (Floyd-Warshall)
    Floyd {
        /// Path to the graph file
        file: PathBuf,
    },
    /// Minimum spanning tree (Prim, undirected only)
    Mst {
        /// Path to the graph file
        file: PathBuf,
        /// Start vertex index
        #[arg(long)]
        start: Option<usize>,
        /// Try every start and keep the lightest spanning tree
        #[arg(long)]
        all_starts: bool,
    },
    /// Maximum flow and minimum cut (Edmonds-Karp)
    MaxFlow {
        /// Path to the graph file
        file: PathBuf,
        /// Source vertex index
        source: usize,
        /// Sink vertex index
        sink: usize,
    },
}

fn parse_direction(direction: &str) -> bool {
    match direction {
        "directed" => true,
        "undirected" => false,
        other => {
            eprintln!("Invalid direction: {} (expected directed or undirected)", other);
            process::exit(3);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let json = match cli.format.as_str() {
        "text" => false,
        "json" => true,
        other => {
            eprintln!("Invalid format: {} (expected text or json)", other);
            process::exit(3);
        }
    };

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    let result = match cli.command {
        Commands::Create {
            file,
            direction,
            weighted,
        } => commands::cmd_create(&file, parse_direction(&direction), weighted),
        Commands::Info { file } => commands::cmd_info(&file, json),
        Commands::AddVertex { file, value } => commands::cmd_add_vertex(&file, &value, json),
        Commands::AddEdge {
            file,
            from,
            to,
            weight,
        } => commands::cmd_add_edge(&file, from, to, weight, json),
        Commands::RemoveVertex { file, index } => commands::cmd_remove_vertex(&file, index, json),
        Commands::RemoveEdge { file, index } => commands::cmd_remove_edge(&file, index, json),
        Commands::Vertices { file } => commands::cmd_vertices(&file, json),
        Commands::Edges { file } => commands::cmd_edges(&file, json),
        Commands::Adjacency { file } => commands::cmd_adjacency(&file, json),
        Commands::Retype {
            file,
            direction,
            weighted,
        } => {
            let oriented = direction.as_deref().map(parse_direction);
            commands::cmd_retype(&file, oriented, weighted, json)
        }
        Commands::Knots { file } => commands::cmd_knots(&file, json),
        Commands::DegreeBelow { file, index } => commands::cmd_degree_below(&file, index, json),
        Commands::RemoveIsolated { file, dry_run } => {
            commands::cmd_remove_isolated(&file, dry_run, json)
        }
        Commands::Cyclomatic { file } => commands::cmd_cyclomatic(&file, json),
        Commands::EqualPath {
            file,
            u,
            v,
            max_depth,
            max_paths,
        } => {
            let budget = PathBudget {
                max_depth,
                max_paths,
            };
            commands::cmd_equal_path(&file, u, v, budget, json)
        }
        Commands::Reachable {
            file,
            start,
            hops,
            distance,
        } => commands::cmd_reachable(&file, start, Some(hops), distance, json),
        Commands::Dijkstra { file, start, to } => {
            commands::cmd_dijkstra(&file, start, to, json)
        }
        Commands::BellmanFord { file, start } => commands::cmd_bellman_ford(&file, start, json),
        Commands::Floyd { file } => commands::cmd_floyd(&file, json),
        Commands::Mst {
            file,
            start,
            all_starts,
        } => commands::cmd_mst(&file, start, all_starts, json),
        Commands::MaxFlow { file, source, sink } => {
            commands::cmd_max_flow(&file, source, sink, json)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            GraphError::Io(_) => 1,
            GraphError::Parse { .. } | GraphError::Format(_) => 2,
            GraphError::DuplicateVertex(_) => 3,
            GraphError::InvalidEndpoint(_)
            | GraphError::IndexOutOfRange { .. }
            | GraphError::EdgeNotFound(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
