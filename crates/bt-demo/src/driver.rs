//! Fixed-interval tick loop.
use anyhow::{Context, Result, bail};
use behavior_tree::{BehaviorTree, Status};
use tokio::time::{self, MissedTickBehavior};

use crate::config::DemoConfig;

/// Validates the tree once, then ticks it every `tick_interval` until the root
/// resolves or the tick budget is spent.
///
/// Returns the terminal status. `Error` and an exhausted budget are reported
/// as errors.
pub async fn run_to_completion<C>(
    label: &str,
    tree: &mut BehaviorTree<'_, C>,
    config: &DemoConfig,
) -> Result<Status> {
    tree.validate_tree()
        .with_context(|| format!("{label}: tree validation failed"))?;

    let mut interval = time::interval(config.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for _ in 0..config.max_ticks {
        interval.tick().await;

        let status = tree.tick();
        tracing::debug!(
            scenario = label,
            tick = tree.tick_count(),
            status = %status,
            "\n{}",
            tree.nodes().render(tree.root())
        );

        match status {
            Status::Running => continue,
            Status::Error => bail!(
                "{label}: tree reported a structural fault\n{}",
                tree.nodes().render(tree.root())
            ),
            terminal => return Ok(terminal),
        }
    }

    bail!(
        "{label}: root still running after {} ticks",
        config.max_ticks
    )
}
