//! Device boot with real background work.
//!
//! ```text
//! Root (Sequence)
//! +-- CheckSystem (Condition)
//! +-- ParallelIo (Parallel, RequireAll)
//! |   +-- ReadFlash (Action, 150ms background task)
//! |   +-- ReadSensor (Action, 80ms background task)
//! |   +-- LoadNetwork (Action, 200ms background task, may fail)
//! +-- ProcessResults (Selector)
//!     +-- ProcessAll (Condition)
//!     +-- ProcessPartial (Action)
//! ```
//!
//! The I/O leaves spawn a tokio task from `on_enter` and poll its `oneshot`
//! receiver with `try_recv` on every tick, so the tick loop never waits on
//! them. Under `RequireAll` a failed network load fails the parallel node and
//! the whole boot; the selector fallback only runs when the parallel node is
//! configured with `RequireOne`.

use std::time::{Duration, Instant};

use anyhow::Result;
use behavior_tree::{BehaviorTree, Node, NodeArena, NodeId, NodeType, ParallelPolicy, Status, builder};
use clap::Parser;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::config::DemoConfig;
use crate::driver;

/// Device boot with I/O running on background tasks
#[derive(Parser, Debug)]
pub struct DeviceArgs {
    /// Make the network download time out
    #[arg(long)]
    pub network_fails: bool,

    /// Succeed the I/O stage once any read completes instead of all of them
    #[arg(long)]
    pub require_one: bool,
}

impl DeviceArgs {
    pub async fn execute(self, config: &DemoConfig) -> Result<()> {
        let policy = if self.require_one {
            ParallelPolicy::RequireOne
        } else {
            ParallelPolicy::RequireAll
        };

        let mut arena = NodeArena::with_config(config.tree.clone());
        let root = build(&mut arena, policy)?;

        let mut ctx = DeviceContext {
            system_ok: true,
            network_fails: self.network_fails,
            ..Default::default()
        };
        let mut tree = BehaviorTree::new(&mut arena, root, &mut ctx);

        println!("============================================================");
        println!(
            "  Device boot (network {}, ParallelIo {policy})",
            if self.network_fails { "fails" } else { "ok" }
        );
        println!("============================================================");

        let started = Instant::now();
        let result = driver::run_to_completion("async", &mut tree, config).await?;
        let elapsed = started.elapsed();

        let ticks = tree.tick_count();
        let ctx = tree.context();
        println!("------------------------------------------------------------");
        println!("  Result:          {result}");
        println!("  Total ticks:     {ticks}");
        println!("  Wall time:       {} ms", elapsed.as_millis());
        println!("  Completed ops:   {}", ctx.completed_ops);
        for io in Io::ALL {
            println!(
                "  {:<16} {}",
                format!("{}:", io.name()),
                io.job_ref(ctx).data.as_deref().unwrap_or("(none)")
            );
        }
        Ok(())
    }
}

/// One simulated background operation.
#[derive(Debug, Default)]
struct Job {
    pending: Option<oneshot::Receiver<Option<String>>>,
    data: Option<String>,
}

impl Job {
    fn start(&mut self, latency: Duration, output: Option<String>) {
        let (tx, rx) = oneshot::channel();
        self.pending = Some(rx);
        self.data = None;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let _ = tx.send(output);
        });
    }

    /// Non-blocking completion check.
    fn poll(&mut self) -> Status {
        let Some(rx) = self.pending.as_mut() else {
            // Ticked without on_enter having started the work.
            return Status::Error;
        };

        match rx.try_recv() {
            Err(TryRecvError::Empty) => Status::Running,
            Ok(Some(data)) => {
                self.pending = None;
                self.data = Some(data);
                Status::Success
            }
            Ok(None) | Err(TryRecvError::Closed) => {
                self.pending = None;
                Status::Failure
            }
        }
    }
}

#[derive(Debug, Default)]
struct DeviceContext {
    system_ok: bool,
    network_fails: bool,
    flash: Job,
    sensor: Job,
    network: Job,
    completed_ops: u32,
}

#[derive(Clone, Copy, Debug)]
enum Io {
    Flash,
    Sensor,
    Network,
}

impl Io {
    const ALL: [Io; 3] = [Io::Flash, Io::Sensor, Io::Network];

    fn name(self) -> &'static str {
        match self {
            Io::Flash => "ReadFlash",
            Io::Sensor => "ReadSensor",
            Io::Network => "LoadNetwork",
        }
    }

    fn latency(self) -> Duration {
        match self {
            Io::Flash => Duration::from_millis(150),
            Io::Sensor => Duration::from_millis(80),
            Io::Network => Duration::from_millis(200),
        }
    }

    fn job(self, ctx: &mut DeviceContext) -> &mut Job {
        match self {
            Io::Flash => &mut ctx.flash,
            Io::Sensor => &mut ctx.sensor,
            Io::Network => &mut ctx.network,
        }
    }

    fn job_ref(self, ctx: &DeviceContext) -> &Job {
        match self {
            Io::Flash => &ctx.flash,
            Io::Sensor => &ctx.sensor,
            Io::Network => &ctx.network,
        }
    }

    fn output(self, ctx: &DeviceContext) -> Option<String> {
        match self {
            Io::Flash => Some("flash_data_256kb".to_owned()),
            Io::Sensor => Some("sensor_calib_ok".to_owned()),
            Io::Network if ctx.network_fails => None,
            Io::Network => Some("network_config_v2".to_owned()),
        }
    }

    fn node(self) -> Node<DeviceContext> {
        Node::new(self.name())
            .with_on_enter(move |ctx: &mut DeviceContext| {
                println!("    [Async] {}: launching background task", self.name());
                let output = self.output(ctx);
                self.job(ctx).start(self.latency(), output);
            })
            .with_tick(move |ctx: &mut DeviceContext| {
                let status = self.job(ctx).poll();
                match status {
                    Status::Success => {
                        ctx.completed_ops += 1;
                        println!("    [Async] {}: done", self.name());
                    }
                    Status::Failure => println!("    [Async] {}: failed (timeout)", self.name()),
                    Status::Running => println!("    [Async] {}: still running...", self.name()),
                    Status::Error => println!("    [Async] {}: never started", self.name()),
                }
                status
            })
    }
}

fn build(arena: &mut NodeArena<DeviceContext>, policy: ParallelPolicy) -> Result<NodeId> {
    let check_system = builder::condition(arena, "CheckSystem", |ctx: &mut DeviceContext| {
        println!("    [Sync] CheckSystem: {}", if ctx.system_ok { "OK" } else { "FAIL" });
        if ctx.system_ok {
            Status::Success
        } else {
            Status::Failure
        }
    });

    let io: Vec<NodeId> = Io::ALL.iter().map(|io| arena.add(io.node())).collect();
    let parallel_io = builder::parallel(arena, "ParallelIo", policy, &io)?;

    let process_all = builder::condition(arena, "ProcessAll", |ctx: &mut DeviceContext| {
        let loaded = [&ctx.flash, &ctx.sensor, &ctx.network].map(|job| job.data.is_some());
        let all_ok = loaded.iter().all(|&ok| ok);
        println!(
            "    [Sync] ProcessAll: {} (flash={} sensor={} net={})",
            if all_ok { "OK" } else { "INCOMPLETE" },
            loaded[0],
            loaded[1],
            loaded[2]
        );
        if all_ok {
            Status::Success
        } else {
            Status::Failure
        }
    });
    let process_partial = arena.add(
        Node::new("ProcessPartial")
            .with_type(NodeType::Action)
            .with_tick(|ctx: &mut DeviceContext| {
                println!(
                    "    [Sync] ProcessPartial: fallback (flash={} sensor={})",
                    ctx.flash.data.is_some(),
                    ctx.sensor.data.is_some()
                );
                ctx.completed_ops += 1;
                Status::Success
            }),
    );
    let process = builder::selector(arena, "ProcessResults", &[process_all, process_partial])?;

    Ok(builder::sequence(
        arena,
        "Root",
        &[check_system, parallel_io, process],
    )?)
}
