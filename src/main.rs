use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use retweet_network_analyzer::cluster::{self, to_community_map_with_threshold, MIN_COMMUNITY_SIZE};
use retweet_network_analyzer::config::{
    DEFAULT_CENTRAL_NODES, DEFAULT_ITERATIONS, DEFAULT_SEPARATOR, DEFAULT_TOP_N_HUBS,
};
use retweet_network_analyzer::data;
use retweet_network_analyzer::viz::{self, Highlight};
use retweet_network_analyzer::{storage, AnalysisError, CommunityDetector, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "retweet-network-analyzer",
    about = "Find hubs and communities in who-retweets-whom networks"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank users by retweet links (in + out)
    Hubs {
        #[clap(flatten)]
        input: InputArgs,

        /// Number of hubs to report
        #[clap(long, default_value_t = DEFAULT_TOP_N_HUBS)]
        top_n: usize,
    },

    /// Split the network into communities with Girvan-Newman
    Communities {
        #[clap(flatten)]
        input: InputArgs,

        /// Number of edge-removal steps
        #[clap(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Components with at most this many users are grouped as residual
        #[clap(long, default_value_t = MIN_COMMUNITY_SIZE)]
        min_community_size: usize,

        /// Central nodes reported per community
        #[clap(long, default_value_t = DEFAULT_CENTRAL_NODES)]
        central_nodes: usize,

        /// Log the members of every community
        #[clap(long)]
        print_communities: bool,

        /// Use the last partition reached if the graph runs out of edges early
        #[clap(long)]
        accept_partial: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory holding the *.csv edge files
    #[clap(long, default_value = "data")]
    input: PathBuf,

    /// Separator between the two users on each line
    #[clap(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// How many edge files to read (default: all)
    #[clap(long)]
    num_files: Option<usize>,

    /// Output directory for results
    #[clap(long, default_value = "results")]
    output_dir: PathBuf,

    /// Skip DOT and node table exports
    #[clap(long)]
    skip_viz: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = args.command.config();
    match &args.command {
        Command::Hubs { input, .. } => run_hubs(input, &config),
        Command::Communities {
            input,
            print_communities,
            accept_partial,
            ..
        } => run_communities(input, &config, *print_communities, *accept_partial),
    }
}

impl Command {
    /// Analysis configuration for this invocation
    fn config(&self) -> Config {
        match self {
            Command::Hubs { input, top_n } => Config {
                separator: input.separator.clone(),
                num_files: input.num_files,
                top_n_hubs: *top_n,
                ..Config::default()
            },
            Command::Communities {
                input,
                iterations,
                min_community_size,
                central_nodes,
                ..
            } => Config {
                separator: input.separator.clone(),
                num_files: input.num_files,
                iterations: *iterations,
                min_community_size: *min_community_size,
                central_nodes: *central_nodes,
                ..Config::default()
            },
        }
    }
}

fn prepare_output(dir: &Path) -> Result<()> {
    log::info!("Output: {}", dir.display());
    std::fs::create_dir_all(dir)?;
    Ok(())
}

fn run_hubs(input: &InputArgs, config: &Config) -> Result<()> {
    log::info!("Starting hub analysis of {}", input.input.display());
    prepare_output(&input.output_dir)?;

    let graph = data::build_directed_graph(&input.input, config)?;
    let hubs = cluster::top_hubs(&graph, config.top_n_hubs);

    for (user, connections) in &hubs {
        println!("User {} has {} retweet links", user, connections);
    }

    storage::save_hubs(&input.output_dir.join("hubs.json"), &hubs)?;

    if !input.skip_viz {
        viz::export_dot(&input.output_dir.join("hubs.dot"), &graph, Highlight::Hubs(&hubs))?;
    }

    log::info!("Analysis complete. Results saved to {}", input.output_dir.display());
    Ok(())
}

fn run_communities(
    input: &InputArgs,
    config: &Config,
    print_communities: bool,
    accept_partial: bool,
) -> Result<()> {
    log::info!("Starting community analysis of {}", input.input.display());
    prepare_output(&input.output_dir)?;

    let graph = data::build_community_graph(&input.input, config)?;

    let mut detector = CommunityDetector::new(&graph);
    let partition = match detector.run(config.iterations) {
        Ok(partition) => partition,
        Err(AnalysisError::ExhaustedPartitions { requested, completed }) if accept_partial => {
            log::warn!(
                "Graph ran out of edges after {} of {} steps, using last partition",
                completed,
                requested
            );
            match detector.last_partition() {
                Some(partition) => partition.clone(),
                None => graph.connected_components(),
            }
        }
        Err(err) => return Err(err.into()),
    };

    let map = to_community_map_with_threshold(&partition, config.min_community_size);
    let communities = cluster::summarize_communities(&graph, &partition, &map, config.central_nodes);

    log::info!(
        "Found {} communities in {} components",
        communities.len(),
        partition.len()
    );

    if print_communities {
        for (ix, component) in partition.iter().enumerate() {
            log::info!("Component {} ({} members): {:?}", ix, component.len(), component);
        }
    }

    storage::save_communities(&input.output_dir, &graph, &partition, &map, &communities)?;

    if !input.skip_viz {
        viz::export_dot(
            &input.output_dir.join("communities.dot"),
            &graph,
            Highlight::Communities(&map),
        )?;
        viz::export_node_table(&input.output_dir.join("nodes.csv"), &graph, &map)?;
    }

    log::info!("Analysis complete. Results saved to {}", input.output_dir.display());
    Ok(())
}
