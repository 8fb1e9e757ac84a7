//! Guard AI: retreat when hurt, engage a visible enemy, otherwise patrol.
//!
//! ```text
//! Root (Selector)
//! +-- Retreat (Sequence)
//! |   +-- IsHealthLow (Condition)
//! |   +-- Heal (Action, 2 ticks)
//! +-- Engage (Sequence)
//! |   +-- EnemyVisible (Condition)
//! |   +-- Close (Parallel, RequireOne)
//! |   |   +-- Approach (Action, one step per tick)
//! |   |   +-- CallBackup (Action, 4 ticks)
//! |   +-- Attack (Action)
//! +-- Patrol (Sequence)
//!     +-- AreaClear (Inverter)
//!     |   +-- EnemyVisible (Condition)
//!     +-- MoveToWaypoint (Action, 2 ticks)
//!     +-- Scan (Action)
//! ```
//!
//! Each round ticks the tree until the root resolves; the world state carried
//! in the context decides which branch the next round takes.

use anyhow::Result;
use behavior_tree::{Behavior, BehaviorTree, Node, NodeArena, NodeId, NodeType, ParallelPolicy, Status, builder};
use clap::Parser;

use crate::config::DemoConfig;
use crate::driver;

/// Guard AI alternating between patrol, engagement and retreat
#[derive(Parser, Debug)]
pub struct PatrolArgs {
    /// Number of decisions to run
    #[arg(long, default_value_t = 8)]
    pub rounds: u32,
}

impl PatrolArgs {
    pub async fn execute(self, config: &DemoConfig) -> Result<()> {
        let mut arena = NodeArena::with_config(config.tree.clone());
        let root = build(&mut arena)?;

        let mut ctx = GuardContext::default();
        let mut tree = BehaviorTree::new(&mut arena, root, &mut ctx);

        for round in 1..=self.rounds {
            let result = driver::run_to_completion("patrol", &mut tree, config).await?;
            let guard = tree.context();
            println!(
                "Round {round}: {result} after {} ticks (hp {}/{}, enemy {})",
                tree.tick_count(),
                guard.hp,
                GuardContext::MAX_HP,
                guard
                    .enemy
                    .map(|enemy| format!("at {} with {} hp", enemy.distance, enemy.hp))
                    .unwrap_or_else(|| "none".to_owned())
            );
            print!("{}", tree.nodes().render(tree.root()));
            tracing::info!(round, status = %result, "decision resolved");
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    distance: u32,
    hp: i32,
}

#[derive(Debug)]
struct GuardContext {
    hp: i32,
    enemy: Option<Enemy>,
    scans: u32,
    backup_eta: u32,
}

impl GuardContext {
    const MAX_HP: i32 = 100;
}

impl Default for GuardContext {
    fn default() -> Self {
        Self {
            hp: Self::MAX_HP,
            enemy: None,
            scans: 0,
            backup_eta: 0,
        }
    }
}

/// Succeeds while health is below `threshold` of the maximum.
struct IsHealthLow {
    threshold: f32,
}

impl Behavior<GuardContext> for IsHealthLow {
    fn tick(&mut self, ctx: &mut GuardContext) -> Status {
        let ratio = ctx.hp as f32 / GuardContext::MAX_HP as f32;
        if ratio < self.threshold {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Walks to the next waypoint, `ticks_per_leg` ticks per leg.
struct MoveToWaypoint {
    route: &'static [&'static str],
    next: usize,
    progress: u32,
    ticks_per_leg: u32,
}

impl Behavior<GuardContext> for MoveToWaypoint {
    fn tick(&mut self, _ctx: &mut GuardContext) -> Status {
        self.progress += 1;
        if self.progress < self.ticks_per_leg {
            return Status::Running;
        }

        println!("  [Patrol] reached {}", self.route[self.next]);
        self.progress = 0;
        self.next = (self.next + 1) % self.route.len();
        Status::Success
    }
}

fn enemy_visible(arena: &mut NodeArena<GuardContext>) -> NodeId {
    builder::condition(arena, "EnemyVisible", |ctx: &mut GuardContext| {
        if ctx.enemy.is_some() {
            Status::Success
        } else {
            Status::Failure
        }
    })
}

fn build(arena: &mut NodeArena<GuardContext>) -> Result<NodeId> {
    // ===== retreat =====
    let is_health_low = arena.add(
        Node::new("IsHealthLow")
            .with_type(NodeType::Condition)
            .with_behavior(IsHealthLow { threshold: 0.3 }),
    );
    let heal = arena.add(
        Node::new("Heal")
            .with_on_enter(|_: &mut GuardContext| println!("  [Retreat] falling back to heal"))
            .with_tick({
                let mut elapsed = 0;
                move |ctx: &mut GuardContext| {
                    elapsed += 1;
                    if elapsed < 2 {
                        return Status::Running;
                    }
                    elapsed = 0;
                    ctx.hp = (ctx.hp + 40).min(GuardContext::MAX_HP);
                    Status::Success
                }
            }),
    );
    let retreat = builder::sequence(arena, "Retreat", &[is_health_low, heal])?;

    // ===== engage =====
    let visible = enemy_visible(arena);
    let approach = builder::action(arena, "Approach", |ctx: &mut GuardContext| {
        let Some(enemy) = ctx.enemy.as_mut() else {
            return Status::Failure;
        };
        if enemy.distance > 1 {
            enemy.distance -= 1;
            return Status::Running;
        }
        Status::Success
    });
    let call_backup = arena.add(
        Node::new("CallBackup")
            .with_on_enter(|ctx: &mut GuardContext| ctx.backup_eta = 4)
            .with_tick(|ctx: &mut GuardContext| {
                ctx.backup_eta = ctx.backup_eta.saturating_sub(1);
                if ctx.backup_eta == 0 {
                    println!("  [Engage] backup arrived");
                    Status::Success
                } else {
                    Status::Running
                }
            }),
    );
    let close = builder::parallel(arena, "Close", ParallelPolicy::RequireOne, &[approach, call_backup])?;
    let attack = builder::action(arena, "Attack", |ctx: &mut GuardContext| {
        let Some(enemy) = ctx.enemy.as_mut() else {
            return Status::Failure;
        };
        enemy.hp -= 25;
        ctx.hp -= 30;
        println!("  [Engage] strike, enemy hp {}", enemy.hp.max(0));
        if enemy.hp <= 0 {
            println!("  [Engage] enemy down");
            ctx.enemy = None;
        }
        Status::Success
    });
    let engage = builder::sequence(arena, "Engage", &[visible, close, attack])?;

    // ===== patrol =====
    let visible = enemy_visible(arena);
    let area_clear = builder::inverter(arena, "AreaClear", visible)?;
    let walk = arena.add(Node::new("MoveToWaypoint").with_behavior(MoveToWaypoint {
        route: &["gate", "tower", "well"],
        next: 0,
        progress: 0,
        ticks_per_leg: 2,
    }));
    let scan = builder::action(arena, "Scan", |ctx: &mut GuardContext| {
        ctx.scans += 1;
        if ctx.scans % 2 == 0 {
            println!("  [Patrol] enemy spotted");
            ctx.enemy = Some(Enemy { distance: 3, hp: 60 });
        }
        Status::Success
    });
    let patrol = builder::sequence(arena, "Patrol", &[area_clear, walk, scan])?;

    Ok(builder::selector(arena, "Root", &[retreat, engage, patrol])?)
}
