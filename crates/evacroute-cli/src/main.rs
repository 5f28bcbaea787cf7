use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evacroute_cli::commands::evacuate::{handle_evacuate_command, EvacuateCommandArgs};
use evacroute_cli::commands::nearest::handle_nearest_command;
use evacroute_cli::commands::nodes::{handle_nodes_command, handle_validate_command};
use evacroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use evacroute_cli::describe_error;
use evacroute_cli::output::OutputFormat;
use evacroute_cli::scenario::{parse_reading, Reading, Scenario};
use evacroute_lib::{sample_building, RankingPolicy, DEFAULT_MAX_ROUTES, DEFAULT_PATHS_PER_EXIT};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hazard-aware evacuation routing over the sample building")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text, env = "EVACROUTE_FORMAT")]
    format: OutputFormat,

    #[command(flatten)]
    hazards: HazardArgs,

    #[command(subcommand)]
    command: Command,
}

/// Hazard scenario flags applied before the query runs.
#[derive(Args, Debug, Default)]
struct HazardArgs {
    /// Force a node impassable (repeatable).
    #[arg(long = "block", value_name = "NODE", global = true)]
    block: Vec<String>,

    /// Force a node passable regardless of readings (repeatable).
    #[arg(long = "open", value_name = "NODE", global = true)]
    open: Vec<String>,

    /// Remove a node's passability override (repeatable).
    #[arg(long = "clear", value_name = "NODE", global = true)]
    clear: Vec<String>,

    /// Set a node's temperature, e.g. `--temp 1C=75` (repeatable).
    #[arg(long = "temp", value_name = "NODE=VALUE", value_parser = parse_reading, global = true)]
    temp: Vec<Reading>,

    /// Set a node's gas concentration, e.g. `--gas 2D=0.8` (repeatable).
    #[arg(long = "gas", value_name = "NODE=VALUE", value_parser = parse_reading, global = true)]
    gas: Vec<Reading>,

    /// Temperature threshold applied to every node.
    #[arg(long = "temp-threshold", value_name = "VALUE", global = true)]
    temp_threshold: Option<f64>,

    /// Gas concentration threshold applied to every node.
    #[arg(long = "gas-threshold", value_name = "VALUE", global = true)]
    gas_threshold: Option<f64>,
}

impl HazardArgs {
    fn to_scenario(&self) -> Scenario {
        Scenario {
            blocked: self.block.clone(),
            opened: self.open.clone(),
            cleared: self.clear.clone(),
            temperatures: self.temp.clone(),
            gas: self.gas.clone(),
            temperature_threshold: self.temp_threshold,
            gas_threshold: self.gas_threshold,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every node with its live readings and passability.
    Nodes,
    /// Check that every node has at least one neighbour.
    Validate,
    /// List the k shortest loop-free paths between two nodes.
    Route {
        /// Starting node id.
        #[arg(long = "from")]
        from: String,
        /// Destination node id.
        #[arg(long = "to")]
        to: String,
        /// Number of alternatives to list.
        #[arg(long = "k", default_value_t = 1)]
        k: usize,
    },
    /// Find the closest passable exit.
    Nearest {
        /// Starting node id.
        #[arg(long = "from")]
        from: String,
    },
    /// Rank escape routes to every passable exit.
    Evacuate {
        /// Starting node id.
        #[arg(long = "from")]
        from: String,
        /// Alternatives computed per exit.
        #[arg(long = "per-exit", default_value_t = DEFAULT_PATHS_PER_EXIT)]
        per_exit: usize,
        /// Routes kept in the answer (per exit with `--policy per-exit`).
        #[arg(long = "max-routes", default_value_t = DEFAULT_MAX_ROUTES)]
        max_routes: usize,
        /// How per-exit alternatives are merged.
        #[arg(long, value_enum, default_value_t = PolicyArg::GlobalTop)]
        policy: PolicyArg,
    },
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyArg {
    GlobalTop,
    PerExit,
}

impl From<PolicyArg> for RankingPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::GlobalTop => RankingPolicy::GlobalTop,
            PolicyArg::PerExit => RankingPolicy::PerExit,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut building = sample_building().context("failed to build the sample building")?;
    cli.hazards
        .to_scenario()
        .apply(&mut building)
        .context("failed to apply hazard scenario")?;

    match cli.command {
        Command::Nodes => handle_nodes_command(&building, cli.format),
        Command::Validate => handle_validate_command(&building, cli.format),
        Command::Route { from, to, k } => {
            handle_route_command(&building, cli.format, &RouteCommandArgs { from, to, k })
        }
        Command::Nearest { from } => handle_nearest_command(&building, cli.format, &from),
        Command::Evacuate {
            from,
            per_exit,
            max_routes,
            policy,
        } => handle_evacuate_command(
            &building,
            cli.format,
            &EvacuateCommandArgs {
                from,
                per_exit,
                max_routes,
                policy: policy.into(),
            },
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
