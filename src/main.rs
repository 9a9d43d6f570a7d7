use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use graph_primer::{
    build_mst,
    graph::{generate::generate, mst::prim_mst},
    GeneratorConfig, Graph, MinHeap,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::{
    fmt::{Debug, Display},
    fs,
    hash::Hash,
    path::PathBuf,
};
use tracing::{debug, info};

/// Build random weighted graphs, find their minimum spanning forests and heap-sort keys.
#[derive(Debug, Parser)]
#[command(name = "graph-primer", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    /// Suppress info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Algorithm {
    #[default]
    Kruskal,
    Prim,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a random weighted graph
    Generate(GeneratorArgs),

    /// Compute the minimum spanning forest of a graph
    Mst {
        #[command(flatten)]
        generator: GeneratorArgs,

        /// Use the fixed lettered example graph instead of a random one
        #[arg(
            long,
            conflicts_with_all = ["config", "nodes", "probability", "min_weight", "max_weight", "seed"]
        )]
        demo: bool,

        #[arg(long, value_enum, default_value_t)]
        algorithm: Algorithm,
    },

    /// Sort keys by pushing them through a min-heap
    HeapSort {
        /// Keys to sort
        keys: Vec<i64>,

        /// Sort this many random keys in 1..=100 instead
        #[arg(long, conflicts_with = "keys")]
        random: Option<usize>,

        /// Seed for the random keys
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Args)]
struct GeneratorArgs {
    /// JSON file holding generator parameters; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of nodes
    #[arg(long)]
    nodes: Option<usize>,

    /// Probability of an edge between any two nodes
    #[arg(long)]
    probability: Option<f64>,

    /// Minimum edge weight (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    min_weight: Option<i64>,

    /// Maximum edge weight (inclusive)
    #[arg(long, allow_hyphen_values = true)]
    max_weight: Option<i64>,

    /// Seed for reproducible graphs
    #[arg(long)]
    seed: Option<u64>,
}

impl GeneratorArgs {
    fn config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };
        if let Some(nodes) = self.nodes {
            config.node_count = nodes;
        }
        if let Some(probability) = self.probability {
            config.edge_probability = probability;
        }
        if let Some(min_weight) = self.min_weight {
            config.min_weight = min_weight;
        }
        if let Some(max_weight) = self.max_weight {
            config.max_weight = max_weight;
        }
        Ok(config)
    }

    fn graph(&self) -> Result<Graph<usize>> {
        let config = self.config()?;
        debug!(?config, seed = ?self.seed, "Generating graph");
        Ok(generate(&config, &mut rng(self.seed))?)
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Undirected graph from a hand-drawn exercise, nodes `a` through `h`.
const LETTERED_EDGES: [(char, char, i64); 14] = [
    ('a', 'b', 5),
    ('a', 'c', 6),
    ('b', 'c', 1),
    ('c', 'd', 2),
    ('a', 'd', 4),
    ('b', 'd', 3),
    ('c', 'e', 7),
    ('d', 'e', 6),
    ('e', 'f', 4),
    ('c', 'f', 8),
    ('d', 'f', 7),
    ('e', 'g', 8),
    ('f', 'h', 9),
    ('g', 'h', 1),
];

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let result = match cli.command {
        Commands::Generate(generator) => generator
            .graph()
            .and_then(|graph| print_graph(&graph, cli.format)),
        Commands::Mst {
            demo: true,
            algorithm,
            ..
        } => Graph::from_edges(LETTERED_EDGES)
            .map_err(Into::into)
            .and_then(|graph| report_mst(&graph, algorithm, cli.format)),
        Commands::Mst {
            generator,
            algorithm,
            ..
        } => generator
            .graph()
            .and_then(|graph| report_mst(&graph, algorithm, cli.format)),
        Commands::HeapSort { keys, random, seed } => {
            let keys = match random {
                Some(count) => {
                    let mut rng = rng(seed);
                    (0..count).map(|_| rng.gen_range(1..=100)).collect()
                }
                None => keys,
            };
            report_heap_sort(keys, cli.format)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_graph<N>(graph: &Graph<N>, format: OutputFormat) -> Result<()>
where
    N: Copy + Ord + Hash + Debug + Display + Serialize,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(graph)?),
        OutputFormat::Text => {
            let nodes = graph
                .nodes()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            println!("nodes: {}", nodes.join(" "));
            for edge in graph.edges() {
                println!("{} -- {} ({})", edge.a, edge.b, edge.weight);
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct MstReport<'a, N: Eq + Hash> {
    graph: &'a Graph<N>,
    tree: &'a Graph<N>,
    total_weight: i64,
    components: usize,
}

fn report_mst<N>(graph: &Graph<N>, algorithm: Algorithm, format: OutputFormat) -> Result<()>
where
    N: Copy + Ord + Hash + Debug + Display + Serialize + Send + Sync,
{
    let tree = match algorithm {
        Algorithm::Kruskal => build_mst(graph),
        Algorithm::Prim => prim_mst(graph),
    };
    let report = MstReport {
        graph,
        tree: &tree,
        total_weight: tree
            .total_weight()
            .context("total weight of the spanning forest overflows i64")?,
        components: tree.connected_components(),
    };
    info!(
        "{:?} spanning forest: {} edges, {} component(s)",
        algorithm,
        tree.edge_count(),
        report.components
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("graph");
            print_graph(graph, format)?;
            println!("\nminimum spanning forest");
            print_graph(&tree, format)?;
            println!("\ntotal weight: {}", report.total_weight);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct HeapSortReport<'a> {
    inserted: &'a [i64],
    heap: &'a [i64],
    levels: Vec<&'a [i64]>,
    sorted: Vec<i64>,
}

fn report_heap_sort(keys: Vec<i64>, format: OutputFormat) -> Result<()> {
    let mut heap = MinHeap::with_capacity(keys.len());
    for &key in &keys {
        heap.insert(key);
        if let OutputFormat::Text = format {
            println!("inserted {}: heap = {:?}", key, heap.as_slice());
        }
    }
    let snapshot = heap.clone();
    let report = HeapSortReport {
        inserted: &keys,
        heap: snapshot.as_slice(),
        levels: snapshot.levels(),
        sorted: heap.into_sorted_vec(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("\nheap as a binary tree");
            for level in &report.levels {
                println!("  {:?}", level);
            }
            println!("\nsorted: {:?}", report.sorted);
        }
    }
    Ok(())
}
