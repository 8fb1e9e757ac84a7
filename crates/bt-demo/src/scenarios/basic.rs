//! Minimal tree: actions, a condition, a sequence and a selector.
//!
//! ```text
//! Root (Selector)
//! +-- Startup (Sequence)
//! |   +-- CheckSensor (Condition)
//! |   +-- InitHw (Action)
//! |   +-- StartApp (Action)
//! +-- Fallback (Action)
//! ```

use anyhow::Result;
use behavior_tree::{BehaviorTree, NodeArena, Status, builder};

use crate::config::DemoConfig;
use crate::driver;

#[derive(Debug, Default)]
struct AppContext {
    step: u32,
    sensor_ok: bool,
}

fn step(ctx: &mut AppContext, name: &str) -> Status {
    ctx.step += 1;
    println!("  [Action] {name} (step {})", ctx.step);
    Status::Success
}

pub async fn run(config: &DemoConfig) -> Result<()> {
    let mut arena = NodeArena::with_config(config.tree.clone());

    let check_sensor = builder::condition(&mut arena, "CheckSensor", |ctx: &mut AppContext| {
        println!(
            "  [Condition] CheckSensor: {}",
            if ctx.sensor_ok { "OK" } else { "FAIL" }
        );
        if ctx.sensor_ok {
            Status::Success
        } else {
            Status::Failure
        }
    });
    let init_hw = builder::action(&mut arena, "InitHw", |ctx| step(ctx, "InitHw"));
    let start_app = builder::action(&mut arena, "StartApp", |ctx| step(ctx, "StartApp"));
    let fallback = builder::action(&mut arena, "Fallback", |ctx| step(ctx, "Fallback"));

    let startup = builder::sequence(&mut arena, "Startup", &[check_sensor, init_hw, start_app])?;
    let root = builder::selector(&mut arena, "Root", &[startup, fallback])?;

    let mut ctx = AppContext {
        step: 0,
        sensor_ok: true,
    };
    let mut tree = BehaviorTree::new(&mut arena, root, &mut ctx);

    println!("=== Run 1: sensor OK ===");
    let result = driver::run_to_completion("basic", &mut tree, config).await?;
    println!("  Result: {result}\n");

    tree.reset();
    let ctx = tree.context_mut();
    ctx.step = 0;
    ctx.sensor_ok = false;

    println!("=== Run 2: sensor FAIL ===");
    let result = driver::run_to_completion("basic", &mut tree, config).await?;
    println!("  Result: {result}\n");

    println!("Total ticks: {}", tree.tick_count());
    Ok(())
}
