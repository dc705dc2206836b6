//! Lifecycle controller
//!
//! Owns the session state and everything around it: the RNG, frame timing,
//! best score persistence and haptics. The browser shell forwards input and
//! frame callbacks here; the simulation itself never touches the platform.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::best_score::BestScore;
use crate::consts::HAPTIC_PULSE_MS;
use crate::persistence::KeyValueStore;
use crate::platform::{FrameClock, Haptics, InputAction};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, TickInput};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    state: GameState,
    best: BestScore,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    haptics: Box<dyn Haptics>,
    rng: Pcg32,
    clock: FrameClock,
}

impl Game {
    /// Reads the best score and settings from `store` once, up front
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>, haptics: Box<dyn Haptics>) -> Self {
        let best = BestScore::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(),
            best,
            settings,
            store,
            haptics,
            rng: Pcg32::seed_from_u64(seed),
            clock: FrameClock::new(),
        }
    }

    /// Replace gameplay constants (takes effect immediately)
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.state.tuning = tuning;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.best.value
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply and persist new settings
    pub fn set_settings(&mut self, settings: Settings) {
        if settings == self.settings {
            return;
        }
        self.settings = settings;
        self.settings.save(self.store.as_mut());
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    /// Forget frame timing so a resumed page doesn't replay the time it was away
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    pub fn handle(&mut self, action: InputAction) {
        match action {
            InputAction::Jump => self.jump(),
            InputAction::Restart => {
                self.restart();
            }
        }
    }

    /// Flap, or start a run from the idle screen. Ignored after a crash.
    pub fn jump(&mut self) {
        sim::jump(&mut self.state, &mut self.rng);
        self.process_events();
    }

    /// GameOver -> Start. Returns false if not currently on the game over screen.
    pub fn restart(&mut self) -> bool {
        sim::restart(&mut self.state, &mut self.rng)
    }

    /// Display refresh callback: run however many fixed steps are due
    pub fn frame(&mut self, time_ms: f64) {
        let substeps = self.clock.advance(time_ms);
        let input = TickInput { time_ms };
        for _ in 0..substeps {
            sim::tick(&mut self.state, &input, &mut self.rng);
        }
        self.process_events();
    }

    /// Run exactly one fixed step, bypassing frame timing
    pub fn step(&mut self, time_ms: f64) {
        sim::tick(&mut self.state, &TickInput { time_ms }, &mut self.rng);
        self.process_events();
    }

    fn process_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => {}
                GameEvent::Scored { score } => log::debug!("Score: {}", score),
                GameEvent::Crashed { score, .. } => self.on_game_over(score),
            }
        }
    }

    fn on_game_over(&mut self, score: u64) {
        if self.settings.haptics {
            self.haptics.pulse(HAPTIC_PULSE_MS);
        }
        if self.best.record(score) {
            log::info!("New best score: {}", score);
            self.best.save(self.store.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_X;
    use crate::persistence::{MemoryStore, StorageError};
    use crate::platform::NullHaptics;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingHaptics {
        pulses: Rc<RefCell<Vec<u32>>>,
    }

    impl Haptics for RecordingHaptics {
        fn pulse(&self, duration_ms: u32) {
            self.pulses.borrow_mut().push(duration_ms);
        }
    }

    /// Storage that is always unavailable
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    fn store_with_best(best: u64) -> Box<dyn KeyValueStore> {
        let mut store = MemoryStore::new();
        store
            .set(BestScore::STORAGE_KEY, &best.to_string())
            .unwrap();
        Box::new(store)
    }

    /// Start a run, fake a score, then drop the player on the ground
    fn crash_with_score(game: &mut Game, score: u64) {
        game.jump();
        game.state_mut().score = score;
        game.state_mut().player.y = 595.0;
        game.step(0.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    fn stored_best(game: &Game) -> Option<String> {
        game.store().get(BestScore::STORAGE_KEY).unwrap()
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut game = Game::new(1, Box::new(MemoryStore::new()), Box::new(NullHaptics));
        assert_eq!(game.phase(), GamePhase::Start);

        // Restart is only valid from GameOver
        assert!(!game.restart());

        game.handle(InputAction::Jump);
        assert_eq!(game.phase(), GamePhase::Playing);

        crash_with_score(&mut game, 4);
        game.handle(InputAction::Jump);
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.handle(InputAction::Restart);
        assert_eq!(game.phase(), GamePhase::Start);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state().obstacles.len(), 1);
        assert!(game.state().particles.is_empty());
    }

    #[test]
    fn test_best_score_loaded_at_startup() {
        let game = Game::new(1, store_with_best(9), Box::new(NullHaptics));
        assert_eq!(game.best_score(), 9);
    }

    #[test]
    fn test_best_score_updates_only_when_beaten() {
        let mut game = Game::new(2, store_with_best(5), Box::new(NullHaptics));

        crash_with_score(&mut game, 3);
        assert_eq!(game.best_score(), 5);
        assert_eq!(stored_best(&game).as_deref(), Some("5"));

        game.restart();
        crash_with_score(&mut game, 5);
        assert_eq!(game.best_score(), 5);

        game.restart();
        crash_with_score(&mut game, 7);
        assert_eq!(game.best_score(), 7);
        assert_eq!(stored_best(&game).as_deref(), Some("7"));
    }

    #[test]
    fn test_haptic_pulse_on_game_over() {
        let haptics = RecordingHaptics::default();
        let mut game = Game::new(3, Box::new(MemoryStore::new()), Box::new(haptics.clone()));

        game.jump();
        game.jump();
        assert!(haptics.pulses.borrow().is_empty());

        crash_with_score(&mut game, 0);
        assert_eq!(*haptics.pulses.borrow(), vec![HAPTIC_PULSE_MS]);

        // Frozen frames do not buzz again
        game.step(0.0);
        assert_eq!(haptics.pulses.borrow().len(), 1);
    }

    #[test]
    fn test_coinciding_crashes_pulse_once() {
        let haptics = RecordingHaptics::default();
        let mut game = Game::new(8, store_with_best(0), Box::new(haptics.clone()));
        game.jump();
        game.state_mut().score = 3;
        // Clips the top segment and the ceiling in one step
        game.state_mut().obstacles = vec![sim::Obstacle::new(PLAYER_X - 20.0, 200.0)];
        game.state_mut().player.y = 20.0;
        game.state_mut().player.vel = -5.0;

        game.step(0.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(haptics.pulses.borrow().len(), 1);
        assert_eq!(game.best_score(), 3);
        assert_eq!(stored_best(&game).as_deref(), Some("3"));
    }

    #[test]
    fn test_haptics_setting_respected() {
        let haptics = RecordingHaptics::default();
        let mut game = Game::new(4, Box::new(MemoryStore::new()), Box::new(haptics.clone()));
        game.set_settings(Settings {
            haptics: false,
            ..Settings::default()
        });

        crash_with_score(&mut game, 1);
        assert!(haptics.pulses.borrow().is_empty());
    }

    #[test]
    fn test_broken_storage_never_interrupts_play() {
        let mut game = Game::new(5, Box::new(BrokenStore), Box::new(NullHaptics));
        assert_eq!(game.best_score(), 0);

        crash_with_score(&mut game, 2);
        // Kept in memory even though it could not be written
        assert_eq!(game.best_score(), 2);
        assert!(game.restart());
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut game = Game::new(6, Box::new(MemoryStore::new()), Box::new(NullHaptics));
        game.jump();
        let frame_ms = 1000.0 / 60.0;
        for i in 0..3 {
            game.frame(i as f64 * frame_ms);
        }
        assert_eq!(game.state().time_ticks, 3);
        // Three steps of gravity after the -7 impulse
        assert!((game.state().player.vel - (-5.8)).abs() < 1e-5);
    }

    #[test]
    fn test_reset_clock_skips_time_away() {
        let mut game = Game::new(9, Box::new(MemoryStore::new()), Box::new(NullHaptics));
        game.jump();
        game.frame(0.0);
        assert_eq!(game.state().time_ticks, 1);

        // Page comes back a minute later
        game.reset_clock();
        game.frame(60_000.0);
        assert_eq!(game.state().time_ticks, 2);
    }

    #[test]
    fn test_custom_tuning() {
        let tuning = Tuning {
            jump_impulse: -9.0,
            ..Tuning::default()
        };
        let mut game = Game::new(7, Box::new(MemoryStore::new()), Box::new(NullHaptics))
            .with_tuning(tuning);
        game.jump();
        assert_eq!(game.state().player.vel, -9.0);
    }
}
