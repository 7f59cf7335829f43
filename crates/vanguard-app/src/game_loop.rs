//! Game loop thread: drives the simulation engine from real time.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! arrive via `mpsc` channel. Each frame the clock runs the due ticks and the
//! resulting snapshot is stored in shared state for polling. Events are
//! forwarded to an optional channel as they are published.

use std::ops::ControlFlow;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{debug, info, trace};

use vanguard_core::events::SimEvent;
use vanguard_core::state::WorldSnapshot;
use vanguard_sim::{Scenario, SimClock, SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the console to use.
pub fn spawn_game_loop(
    config: SimConfig,
    scenario: Scenario,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    event_tx: Option<mpsc::Sender<SimEvent>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("vanguard-game-loop".into())
        .spawn(move || {
            run_game_loop(config, &scenario, cmd_rx, &latest_snapshot, event_tx);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    scenario: &Scenario,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
    event_tx: Option<mpsc::Sender<SimEvent>>,
) {
    let mut engine = SimulationEngine::from_scenario(config.clone(), scenario);
    if let Some(tx) = event_tx {
        engine.subscribe_all(move |event| {
            let _ = tx.send(event.clone());
        });
    }
    let mut clock = SimClock::new(&config);
    let frame_duration = clock.tick_duration();
    let started = Instant::now();
    let mut next_frame_time = started;
    info!(seed = config.seed, tick_rate = config.tick_rate, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(cmd) => {
                    if handle_command(&mut engine, &mut clock, cmd).is_break() {
                        info!("game loop shut down");
                        return;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Run due ticks and build one snapshot
        let frame = clock.frame(&mut engine, started.elapsed());
        if frame.ticks_run > 0 {
            trace!(ticks_run = frame.ticks_run, tick = frame.snapshot.time.tick, "frame");
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(frame.snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else {
            // Behind: the clock already caps catch-up, just realign
            next_frame_time = now;
        }
    }
}

/// Apply one loop command. `Break` means shut down.
pub fn handle_command(
    engine: &mut SimulationEngine,
    clock: &mut SimClock,
    command: GameLoopCommand,
) -> ControlFlow<()> {
    match command {
        GameLoopCommand::Player(cmd) => {
            if let Err(reason) = engine.apply(cmd) {
                debug!(%reason, "operator command rejected");
            }
        }
        GameLoopCommand::Pause => {
            clock.pause();
            info!(tick = engine.time().tick, "simulation paused");
        }
        GameLoopCommand::Resume => {
            clock.resume();
            info!(tick = engine.time().tick, "simulation resumed");
        }
        GameLoopCommand::Shutdown => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}
