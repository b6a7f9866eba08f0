use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dagraph::graph::{Graph, IterationOrder, Node};
use tracing_subscriber::EnvFilter;

/// Sample edge list used by the `demo` command. `2 -> 5 -> 2` closes a cycle.
const DEMO_EDGES: [(&str, &str); 7] = [
    ("2", "3"),
    ("3", "1"),
    ("4", "0"),
    ("4", "1"),
    ("5", "0"),
    ("5", "2"),
    ("2", "5"),
];
const DEMO_NODES: usize = 6;

#[derive(Parser)]
#[command(name = "dagraph")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Build a directed graph, detect cycles and print a topological order", long_about = None)]
struct Cli {
    /// Node order for traversals: insertion or lexical
    #[arg(short, long, global = true, default_value_t = IterationOrder::Insertion)]
    order: IterationOrder,

    /// Log graph mutations and traversal results
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sample graph and report its structure
    Demo,
    /// Build a graph from edges given on the command line
    Check {
        /// Edge in FROM:TO form (repeatable)
        #[arg(short, long = "edge", value_parser = parse_edge)]
        edges: Vec<(String, String)>,

        /// Extra node without edges (repeatable)
        #[arg(short, long = "node")]
        nodes: Vec<String>,
    },
    /// Show version information
    Version,
}

fn parse_edge(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("Invalid edge: '{}'. Expected FROM:TO", s)),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dagraph=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn demo_graph(order: IterationOrder) -> Result<Graph<usize>> {
    let nodes = (0..DEMO_NODES).map(|i| Node::new(i.to_string(), i));
    let mut graph = Graph::from_nodes(nodes).context("Failed to create graph")?;
    graph.set_order(order);

    for (from, to) in DEMO_EDGES {
        graph
            .add_edge(from, to)
            .with_context(|| format!("Error adding edge {} -> {}", from, to))?;
    }
    Ok(graph)
}

fn check_graph(
    edges: &[(String, String)],
    extra: &[String],
    order: IterationOrder,
) -> Result<Graph<()>> {
    let mut graph = Graph::with_order(order);
    let endpoints = edges.iter().flat_map(|(from, to)| [from, to]);
    for id in endpoints.chain(extra) {
        if !graph.contains(id) {
            graph.add_node(Node::new(id.as_str(), ()))?;
        }
    }

    for (from, to) in edges {
        graph
            .add_edge(from, to)
            .with_context(|| format!("Error adding edge {} -> {}", from, to))?;
    }
    Ok(graph)
}

fn report<V>(graph: &Graph<V>) {
    println!("Nodes and their connections:");
    for node in graph.get_all_nodes() {
        let targets: Vec<&str> = node.edges().map(|id| id.as_str()).collect();
        println!("  {} -> [{}]", node.id(), targets.join(", "));
    }

    match graph.topological_sort() {
        Ok(sorted) => {
            let order: Vec<&str> = sorted.iter().map(|node| node.id().as_str()).collect();
            println!("Topological order: {}", order.join(", "));
        }
        Err(err) => println!("Topological order: none ({})", err),
    }

    match graph.cycle() {
        Some(cycle) => println!("Has cycle: true ({})", cycle),
        None => println!("Has cycle: false"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Demo) => {
            let graph = demo_graph(cli.order)?;
            println!("Graph constructed with {} nodes.", graph.len());
            report(&graph);
        }
        Some(Commands::Check { edges, nodes }) => {
            let graph = check_graph(edges, nodes, cli.order)?;
            println!(
                "Graph constructed with {} nodes and {} edges.",
                graph.len(),
                graph.edge_count()
            );
            report(&graph);
        }
        Some(Commands::Version) => {
            println!("dagraph v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("dagraph - directed graph cycle and ordering checker");
            println!("Run 'dagraph demo' to inspect the sample graph");
            println!("Run 'dagraph check --edge a:b --edge b:c' to check your own edges");
            println!("Run 'dagraph --help' for more information");
        }
    }
    Ok(())
}
