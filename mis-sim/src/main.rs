//! mis-sim - synchronous MIS election and robot dispatch simulator
//!
//! - `run` - load a graph, elect the MIS, dispatch robots, write report
//! - `gen` - generate a random connected test graph

mod generator;
mod input;
mod report;

use clap::{Parser, Subcommand};
use mis_core::{assign_robots, random_starts, verify_mis, MisEngine, MovementSim};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mis-sim")]
#[command(about = "Distributed MIS election with robot dispatch")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full simulation on an input graph
    Run {
        /// Graph description file
        #[arg(short, long)]
        input: PathBuf,

        /// Report output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of robots (defaults to the elected set size)
        #[arg(short, long)]
        robots: Option<usize>,

        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also write a JSON summary
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Generate a random connected test graph
    Gen {
        /// Output file in the input format
        #[arg(short, long)]
        output: PathBuf,

        /// Node count (drawn from 1..=max-nodes when omitted)
        #[arg(short, long)]
        nodes: Option<usize>,

        /// Upper bound for the random node count
        #[arg(long, default_value = "100")]
        max_nodes: usize,

        /// Seed for reproducible generation
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run {
            input,
            output,
            robots,
            seed,
            json,
        } => {
            let graph = Arc::new(input::load_graph(&input)?);
            info!(
                nodes = graph.node_count(),
                "graph loaded from {}",
                input.display()
            );

            let mut engine = MisEngine::new(graph.clone());
            if let Some(seed) = seed {
                engine = engine.with_seed(seed);
            }
            let outcome = engine.compute().await?;

            let verified = verify_mis(&graph, &outcome.members);
            if !verified {
                warn!("computed set failed verification");
            }

            let robot_count = robots.unwrap_or(outcome.members.len());
            if robot_count > outcome.members.len() {
                return Err(format!(
                    "{} robots requested but only {} elected nodes are available",
                    robot_count,
                    outcome.members.len()
                )
                .into());
            }

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let starts = random_starts(graph.node_count(), robot_count, &mut rng);
            let robots = assign_robots(&graph, &outcome.members, &starts)?;
            info!(robots = robots.len(), "robots dispatched");

            let movement = MovementSim::new(&graph, robots, &outcome.members).run()?;

            let report = report::RunReport {
                rounds: outcome.rounds,
                mis: outcome.members.iter().copied().collect(),
                verified,
                max_hops: movement.ticks,
            };

            let file = std::fs::File::create(&output)?;
            report.write_text(std::io::BufWriter::new(file))?;
            info!("report written to {}", output.display());

            if let Some(json_path) = json {
                std::fs::write(&json_path, report.to_json()?)?;
                info!("summary written to {}", json_path.display());
            }

            println!("rounds:   {}", report.rounds);
            println!("mis size: {}", report.mis.len());
            println!("verified: {}", report.verified);
            println!("max hops: {}", report.max_hops);
        }

        Commands::Gen {
            output,
            nodes,
            max_nodes,
            seed,
        } => {
            let config = generator::GeneratorConfig {
                nodes,
                max_nodes,
                seed,
            };
            let (ids, matrix) = generator::generate(&config);
            generator::write_input(&output, &ids, &matrix)?;
            info!(
                nodes = ids.len(),
                "test graph written to {}",
                output.display()
            );
        }
    }

    Ok(())
}
