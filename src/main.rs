use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Incremental build planning for interdependent source packages")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a dependency graph from manifests and write its snapshot
    Graph {
        /// Manifest set (YAML)
        #[arg(short, long)]
        manifests: PathBuf,
        /// Registry snapshot used to attach published candidates
        #[arg(short, long)]
        registry: Option<PathBuf>,
        /// Directory to write the snapshot to (defaults to graph_dir from config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Use this build stamp instead of minting one from the clock
        #[arg(long)]
        build_stamp: Option<String>,
    },
    /// Decide what to rebuild and emit the build plan as JSON
    Plan {
        /// Graph snapshot
        #[arg(short, long)]
        graph: PathBuf,
        /// Registry snapshot used to refresh published candidates
        #[arg(short, long)]
        registry: Option<PathBuf>,
        /// Only rebuild packages that changed themselves
        #[arg(long)]
        no_propagate: bool,
        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Root packages (all packages if omitted)
        packages: Vec<String>,
    },
    /// Print build layers for packages as JSON
    Order {
        /// Graph snapshot
        #[arg(short, long)]
        graph: PathBuf,
        /// Packages to order (all packages if omitted)
        packages: Vec<String>,
    },
    /// List system packages needed to build packages
    Install {
        /// Graph snapshot
        #[arg(short, long)]
        graph: PathBuf,
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// List published artifacts packages build against
    Sources {
        /// Graph snapshot
        #[arg(short, long)]
        graph: PathBuf,
        /// Registry snapshot used to refresh published candidates
        #[arg(short, long)]
        registry: Option<PathBuf>,
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Check that published artifacts pin versions that still exist
    Check {
        /// Graph snapshot or directory of snapshots (defaults to graph_dir from config)
        #[arg(short, long)]
        graph: Option<PathBuf>,
        /// Registry snapshot
        #[arg(short, long)]
        registry: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize tracing (stderr, so JSON on stdout stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = cli::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Graph {
            manifests,
            registry,
            output_dir,
            build_stamp,
        } => cli::graph::run(&config, manifests, registry, output_dir, build_stamp),
        Commands::Plan {
            graph,
            registry,
            no_propagate,
            output,
            packages,
        } => cli::plan::run(&config, graph, registry, packages, no_propagate, output),
        Commands::Order { graph, packages } => cli::order::run(&config, graph, packages),
        Commands::Install { graph, packages } => cli::depends::install(&config, graph, packages),
        Commands::Sources {
            graph,
            registry,
            packages,
        } => cli::depends::sources(&config, graph, registry, packages),
        Commands::Check { graph, registry } => cli::check::run(&config, graph, registry),
    });

    // Handle result and exit codes
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", arbor::core::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
