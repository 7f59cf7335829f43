//! Application state shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use vanguard_core::commands::PlayerCommand;
use vanguard_core::events::SimEvent;
use vanguard_core::state::WorldSnapshot;
use vanguard_sim::{Scenario, SimConfig};

use crate::game_loop;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An operator command to apply to the simulation engine.
    Player(PlayerCommand),
    /// Stop advancing ticks. Real time keeps being tracked.
    Pause,
    Resume,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// The world itself never leaves the game loop thread; the console only sees
/// copies through `latest_snapshot`.
pub struct AppState {
    /// `None` until the game loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread once per frame.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the game loop. Fails if it is already running.
    pub fn start(
        &self,
        config: SimConfig,
        scenario: Scenario,
        event_tx: Option<mpsc::Sender<SimEvent>>,
    ) -> Result<(), String> {
        let mut running = self.running.lock().map_err(|e| e.to_string())?;
        if *running {
            return Err("Simulation already running".into());
        }

        let cmd_tx = game_loop::spawn_game_loop(
            config,
            scenario,
            self.latest_snapshot.clone(),
            event_tx,
        )
        .map_err(|e| format!("Failed to start game loop: {}", e))?;

        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        *tx_lock = Some(cmd_tx);
        *running = true;
        Ok(())
    }

    /// Forward a command to the game loop.
    pub fn send(&self, command: GameLoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {}", e)),
            None => Err("Simulation not started".into()),
        }
    }

    /// Latest snapshot, if the loop has produced one yet.
    pub fn snapshot(&self) -> Option<WorldSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(state.send(GameLoopCommand::Pause).is_err());
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_second_start_is_refused() {
        let state = AppState::new();
        state
            .start(SimConfig::default(), Scenario::skirmish(), None)
            .unwrap();
        assert!(*state.running.lock().unwrap());

        let second = state.start(SimConfig::default(), Scenario::skirmish(), None);
        assert_eq!(second, Err("Simulation already running".to_string()));

        state.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_send_after_start_reaches_channel() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        state.send(GameLoopCommand::Resume).unwrap();
        assert!(matches!(rx.try_recv(), Ok(GameLoopCommand::Resume)));
    }
}
