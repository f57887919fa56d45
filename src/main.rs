use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use support_lattice::{
    compare_strategies,
    decompose::{base_groups, format_widths, subdivision_levels},
    sweep_heights, tree_cost, PlannerConfig, Strategy, SupportPlanner,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "support-lattice",
    about = "Material cost of 45° tree supports for a span of W points at height H"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Total cost of supporting a span.
    Cost {
        /// Width in grid points.
        width: u64,
        /// Height in grid points.
        height: u64,
        /// Partitioning strategy (recursive or arithmetic).
        #[arg(long, default_value_t = Strategy::Recursive)]
        strategy: Strategy,
    },
    /// Cost of a single n-tree.
    Tree {
        /// Width in grid points.
        width: u64,
        /// Height in grid points.
        height: u64,
    },
    /// Split a span into n-trees.
    Partition {
        /// Width in grid points.
        width: u64,
        /// Height in grid points.
        height: u64,
        /// Partitioning strategy (recursive or arithmetic).
        #[arg(long, default_value_t = Strategy::Recursive)]
        strategy: Strategy,
    },
    /// Full plan: trees, stems, base groups and subdivision trace.
    Plan {
        /// Width in grid points.
        width: u64,
        /// Height in grid points.
        height: u64,
        /// Partitioning strategy (recursive or arithmetic).
        #[arg(long, default_value_t = Strategy::Recursive)]
        strategy: Strategy,
    },
    /// Compare both strategies, for one height or a range of heights.
    Compare {
        /// Width in grid points.
        width: u64,
        /// Lowest height to compare.
        #[arg(long, default_value_t = 2)]
        min_height: u64,
        /// Highest height to compare (defaults to --min-height).
        #[arg(long)]
        max_height: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Cost {
            width,
            height,
            strategy,
        } => run_cost(width, height, strategy)?,
        Commands::Tree { width, height } => {
            let cost = tree_cost(width, height)
                .with_context(|| format!("cannot cost a {width}-point tree at height {height}"))?;
            println!("{cost}");
        }
        Commands::Partition {
            width,
            height,
            strategy,
        } => {
            let partition = strategy
                .partition(width, height)
                .context("partitioning failed")?;
            println!("{partition}");
        }
        Commands::Plan {
            width,
            height,
            strategy,
        } => run_plan(width, height, strategy, cli.verbose)?,
        Commands::Compare {
            width,
            min_height,
            max_height,
        } => run_compare(width, min_height, max_height.unwrap_or(min_height))?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_cost(width: u64, height: u64, strategy: Strategy) -> Result<()> {
    let cost = match strategy {
        Strategy::Recursive => support_lattice::divide_and_cost(width, height),
        Strategy::Arithmetic => support_lattice::divide_and_cost_alt(width, height),
    }
    .with_context(|| format!("cannot cost span {width}x{height}"))?;

    println!("{cost}");
    Ok(())
}

fn run_plan(width: u64, height: u64, strategy: Strategy, verbose: bool) -> Result<()> {
    let config = PlannerConfig::default()
        .with_strategy(strategy)
        .with_verbose(verbose);
    let mut planner = SupportPlanner::new(config);
    let plan = planner
        .plan(width, height)
        .with_context(|| format!("cannot plan span {width}x{height}"))?;

    println!("{}", plan.report());

    let subgroups = plan
        .partition
        .iter()
        .map(|tree| base_groups(tree).map(format_widths))
        .collect::<Result<Vec<_>, _>>()
        .context("base-group decomposition failed")?;
    println!("\nSubgroups: {{{}}}", subgroups.join(","));

    println!("\nSubdivision process:");
    let levels = subdivision_levels(plan.partition.widths())
        .context("subdivision trace failed")?;
    for level in levels {
        println!("{}", format_widths(level));
    }

    Ok(())
}

fn run_compare(width: u64, min_height: u64, max_height: u64) -> Result<()> {
    if min_height == max_height {
        let comparison = compare_strategies(width, min_height)
            .with_context(|| format!("cannot compare strategies for {width}x{min_height}"))?;
        println!(
            "recursive={:.6} ({} trees)\tarithmetic={:.6} ({} trees)\tratio={:.6}\tpreferred={}",
            comparison.recursive_cost,
            comparison.recursive_trees,
            comparison.arithmetic_cost,
            comparison.arithmetic_trees,
            comparison.ratio(),
            comparison.preferred()
        );
        return Ok(());
    }

    let sweep = sweep_heights(width, min_height..=max_height)
        .with_context(|| format!("height sweep failed for width {width}"))?;
    for entry in &sweep.entries {
        println!("{}:{:.6}", entry.span.height, entry.ratio());
    }
    println!("Recursive worse: {}", sweep.recursive_worse_count());
    if let Some((height, ratio)) = sweep.min_ratio() {
        println!("Minimum: {ratio:.6} at height {height}");
    }

    Ok(())
}
