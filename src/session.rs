//! Session controller.
//!
//! Owns the store together with its timer collaborators and drives the
//! minigame rounds whose rules live outside the store (music replay checking,
//! maze movement). All entry points take the current timestamp in ms so the
//! watchdog can be re-armed on stage changes and user activity.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::characters::CharacterId;
use crate::config::GameConfig;
use crate::maze::{self, Direction, Maze, MoveOutcome};
use crate::stage::Stage;
use crate::store::music::{self, SequenceCheck};
use crate::store::{Action, GameState, GameStore};
use crate::timers::{ActivitySignal, GameClock, InactivityWatchdog};

/// Progress through the five music levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusicRound {
    pub level: u32,
    /// A melody is out and the player's notes count.
    pub playing: bool,
    pub finished: bool,
}

impl Default for MusicRound {
    fn default() -> Self {
        Self { level: music::FIRST_LEVEL, playing: false, finished: false }
    }
}

/// What happened after a note was played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteResult {
    /// No melody in play; the note was not recorded.
    Ignored,
    Pending,
    Wrong,
    LevelCleared { next_level: u32 },
    Finished,
}

impl NoteResult {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteResult::Ignored => "ignored",
            NoteResult::Pending => "pending",
            NoteResult::Wrong => "wrong",
            NoteResult::LevelCleared { .. } => "level-cleared",
            NoteResult::Finished => "finished",
        }
    }
}

#[derive(Clone, Debug)]
struct MazeRun {
    maze: Maze,
    moves: u32,
    started_ms: f64,
    finished: bool,
}

pub struct Session {
    store: GameStore,
    clock: GameClock,
    watchdog: InactivityWatchdog,
    rng: StdRng,
    music: MusicRound,
    maze: Option<MazeRun>,
}

impl Session {
    pub fn new(config: &GameConfig, now: f64) -> Self {
        let store = GameStore::new(config.rng_seed);
        let stage = store.state().current_stage;
        let mut clock = GameClock::new(config.clock_interval_ms);
        clock.start(now);
        // Minigame helpers draw from their own stream so store shuffles stay reproducible.
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            clock,
            watchdog: InactivityWatchdog::new(config.inactivity_timeout_ms, stage, now),
            rng,
            music: MusicRound::default(),
            maze: None,
        }
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn watchdog(&self) -> &InactivityWatchdog {
        &self.watchdog
    }

    pub fn music_round(&self) -> MusicRound {
        self.music
    }

    /// Dispatch through the store. Leaving a stage or resetting the game
    /// discards the music and maze rounds.
    pub fn dispatch(&mut self, action: Action, now: f64) {
        let before = self.store.state().current_stage;
        let resets = matches!(action, Action::ResetGame);
        self.store.dispatch(action);
        let after = self.store.state().current_stage;
        if before != after {
            self.watchdog.on_stage_change(after, now);
        }
        if before != after || resets {
            self.music = MusicRound::default();
            self.maze = None;
        }
    }

    pub fn record_activity(&mut self, signal: ActivitySignal, now: f64) {
        tracing::trace!(%signal, "activity");
        self.watchdog.on_activity(signal, now);
    }

    /// Advance the game clock and poll the watchdog. Returns `true` if the
    /// session auto-returned to the intro.
    pub fn tick(&mut self, now: f64) -> bool {
        let ticks = self.clock.poll(now);
        if ticks > 0 {
            let seconds = self.store.state().game_time.saturating_add(ticks);
            tracing::trace!(seconds, "clock tick");
            self.dispatch(Action::UpdateGameTime(seconds), now);
        }

        let stage = self.store.state().current_stage;
        if stage.is_idle_exempt() || !self.watchdog.poll(now) {
            return false;
        }
        tracing::info!(%stage, "inactivity timeout, returning to intro");
        self.dispatch(Action::AutoReturnToMain, now);
        true
    }

    // --- Music ------------------------------------------------------------

    /// Generate and publish the melody for the current level. Empty once all
    /// levels are finished.
    pub fn start_music_level(&mut self, now: f64) -> Vec<CharacterId> {
        if self.music.finished {
            return Vec::new();
        }
        let sequence = music::generate_sequence(self.music.level, &mut self.rng);
        self.dispatch(Action::ResetPlayerSequence, now);
        self.dispatch(Action::SetMusicSequence(sequence.clone()), now);
        self.music.playing = true;
        sequence
    }

    /// Judge one note. Notes only count while a melody is in play; a wrong
    /// note ends the round until `restart_music`.
    pub fn play_note(&mut self, note: CharacterId, now: f64) -> NoteResult {
        if !self.music.playing {
            return NoteResult::Ignored;
        }
        self.dispatch(Action::AddPlayerNote(note), now);
        let state = self.store.state();
        match music::check_sequence(&state.music_sequence, &state.player_sequence) {
            SequenceCheck::Pending => NoteResult::Pending,
            SequenceCheck::Mismatch { index } => {
                tracing::debug!(index, level = self.music.level, "wrong note");
                self.music.playing = false;
                NoteResult::Wrong
            }
            SequenceCheck::Complete => {
                let level = self.music.level;
                self.music.playing = false;
                self.dispatch(Action::AddScore(music::level_points(level)), now);
                self.dispatch(Action::ResetPlayerSequence, now);
                if level >= music::MAX_LEVEL {
                    self.music.finished = true;
                    self.dispatch(Action::AddScore(music::COMPLETION_BONUS), now);
                    tracing::info!("music stage finished");
                    NoteResult::Finished
                } else {
                    self.music.level += 1;
                    NoteResult::LevelCleared { next_level: self.music.level }
                }
            }
        }
    }

    pub fn restart_music(&mut self, now: f64) {
        self.music = MusicRound::default();
        self.dispatch(Action::ResetPlayerSequence, now);
    }

    // --- Maze -------------------------------------------------------------

    /// Build a fresh maze and place the player on the start cell.
    pub fn start_maze(&mut self, now: f64) {
        self.maze = Some(MazeRun {
            maze: Maze::generate(&mut self.rng),
            moves: 0,
            started_ms: now,
            finished: false,
        });
        self.dispatch(Action::SetMazePosition(maze::MAZE_START), now);
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref().map(|run| &run.maze)
    }

    /// Try one step; `Blocked` when no maze is running or it is already solved.
    pub fn move_in_maze(&mut self, dir: Direction, now: f64) -> MoveOutcome {
        let Some(run) = self.maze.as_mut() else {
            return MoveOutcome::Blocked;
        };
        if run.finished {
            return MoveOutcome::Blocked;
        }
        let outcome = run.maze.step(self.store.state().maze_position, dir);
        let moves_before = run.moves;
        let elapsed_secs = ((now - run.started_ms).max(0.0) / 1000.0).floor() as u32;
        match outcome {
            MoveOutcome::Blocked => return outcome,
            MoveOutcome::Finished(_) => run.finished = true,
            _ => {}
        }
        run.moves += 1;

        match outcome {
            MoveOutcome::Moved(pos) => self.dispatch(Action::SetMazePosition(pos), now),
            MoveOutcome::HitObstacle(pos) => {
                self.dispatch(Action::AddScore(maze::OBSTACLE_PENALTY), now);
                self.dispatch(Action::SetMazePosition(pos), now);
            }
            MoveOutcome::Finished(pos) => {
                self.dispatch(Action::SetMazePosition(pos), now);
                let points = maze::finish_points(elapsed_secs, moves_before);
                tracing::info!(points, moves = moves_before + 1, "maze finished");
                self.dispatch(Action::AddScore(points), now);
            }
            MoveOutcome::Blocked => {}
        }
        outcome
    }

    pub fn current_stage(&self) -> Stage {
        self.store.state().current_stage
    }
}
