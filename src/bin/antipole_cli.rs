use anyhow::{bail, Context, Result};
use antipole_index::core::indexing::vector::antipole::search::linear_scan_closest;
use antipole_index::{AntipoleTreeIndex, IndexConfig, VectorIndex};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::filter::LevelFilter;

// --- CLI Configuration ---
#[derive(Parser, Debug)]
#[clap(author, version, about = "Build an antipole tree and answer nearest-vector queries", long_about = None)]
struct Cli {
    /// TOML index configuration. Missing file or flag means defaults.
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured leaf threshold.
    #[clap(long, global = true)]
    min_leaf_size: Option<usize>,
    /// Log debug output from the index.
    #[clap(long, short, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Indexes a JSON array of vectors and prints the closest match of each probe.
    Query {
        /// JSON file holding `[[f32, ...], ...]` to index.
        #[clap(long)]
        vectors: PathBuf,
        /// JSON file holding the probe vectors, same layout.
        #[clap(long)]
        probes: PathBuf,
    },
    /// Indexes random vectors, times queries and checks them against a linear scan.
    Bench {
        #[clap(long, default_value_t = 10_000)]
        count: usize,
        #[clap(long, default_value_t = 64)]
        dimension: usize,
        #[clap(long, default_value_t = 1_000)]
        queries: usize,
        #[clap(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Serialize, Debug)]
struct QueryAnswer {
    probe: usize,
    closest: Option<usize>,
    squared_distance: Option<f32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = IndexConfig::load_or_default(cli.config.as_deref())
        .context("loading index configuration")?;
    if let Some(size) = cli.min_leaf_size {
        config.min_leaf_size = size;
        config.validate()?;
    }

    match cli.command {
        Commands::Query { vectors, probes } => run_query(config, &vectors, &probes),
        Commands::Bench { count, dimension, queries, seed } => {
            run_bench(config, count, dimension, queries, seed)
        }
    }
}

fn read_vectors(path: &Path) -> Result<Vec<Vec<f32>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading vectors from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing vectors in {}", path.display()))
}

fn run_query(config: IndexConfig, vectors_path: &Path, probes_path: &Path) -> Result<()> {
    let vectors = read_vectors(vectors_path)?;
    let probes = read_vectors(probes_path)?;

    let mut index = AntipoleTreeIndex::new("cli", config)?;
    index.build(vectors)?;

    let answers = probes
        .iter()
        .enumerate()
        .map(|(probe, vector)| {
            let found = index.closest_with_distance(vector)?;
            Ok(QueryAnswer {
                probe,
                closest: found.map(|(idx, _)| idx),
                squared_distance: found.map(|(_, dist)| dist),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{}", serde_json::to_string_pretty(&answers)?);
    Ok(())
}

fn run_bench(
    config: IndexConfig,
    count: usize,
    dimension: usize,
    queries: usize,
    seed: u64,
) -> Result<()> {
    if dimension == 0 {
        bail!("dimension must be greater than 0");
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut random_vectors = |n: usize| -> Vec<Vec<f32>> {
        (0..n).map(|_| (0..dimension).map(|_| rng.gen::<f32>()).collect()).collect()
    };
    let vectors = random_vectors(count);
    let probes = random_vectors(queries);

    let mut index = AntipoleTreeIndex::new("bench", config)?;
    let started = Instant::now();
    index.build(vectors)?;
    let build_time = started.elapsed();

    let started = Instant::now();
    let answers = index.closest_batch(&probes)?;
    let tree_time = started.elapsed();

    let started = Instant::now();
    let expected: Vec<Option<usize>> = probes
        .iter()
        .map(|probe| linear_scan_closest(index.store(), probe).map(|(idx, _)| idx))
        .collect();
    let scan_time = started.elapsed();

    let mismatches = answers.iter().zip(&expected).filter(|(a, b)| a != b).count();
    if let Some(stats) = index.stats() {
        println!(
            "tree: {} nodes, {} leaves, depth {}, largest leaf {}",
            stats.nodes, stats.leaves, stats.depth, stats.largest_leaf
        );
    }
    println!("build: {:?} for {} vectors of dimension {}", build_time, count, dimension);
    println!("tree queries: {:?} for {} probes (parallel)", tree_time, queries);
    println!("linear scan: {:?} for {} probes (sequential)", scan_time, queries);
    println!("mismatches against linear scan: {}", mismatches);

    if mismatches > 0 {
        bail!("{} queries disagreed with the linear scan", mismatches);
    }
    Ok(())
}
