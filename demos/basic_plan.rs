//! Basic example: plan supports for a 60-point row at height 4.

use support_lattice::{compare_strategies, PlannerConfig, Strategy, SupportPlanner};

fn main() -> anyhow::Result<()> {
    let (width, height) = (60, 4);

    for strategy in Strategy::ALL {
        let mut planner = SupportPlanner::new(PlannerConfig::default().with_strategy(strategy));
        let plan = planner.plan(width, height)?;
        println!("{}\n", plan.report());
    }

    let comparison = compare_strategies(width, height)?;
    println!(
        "recursive / arithmetic = {:.6}, prefer {}",
        comparison.ratio(),
        comparison.preferred()
    );

    Ok(())
}
