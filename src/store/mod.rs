//! Game progression store.
//!
//! A single authoritative `GameState` mutated only through the closed set of
//! transitions in [`Action`]. Every transition is total: payloads that do not
//! apply (unknown card id, redundant flip, advancing past victory) are no-ops.
//!
//! `GameStore` owns the state together with the RNG used for shuffles and the
//! listeners that observe each completed transition.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::characters::CharacterId;
use crate::stage::Stage;

pub mod memory;
pub mod music;

pub use memory::{FlipOutcome, MemoryCard, MemoryGame};

pub const INITIAL_LIVES: u8 = 3;
/// Bonus score granted per collected reward.
pub const REWARD_POINTS: i32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazePosition {
    pub x: i32,
    pub y: i32,
}

impl MazePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct GameState {
    pub current_stage: Stage,
    pub selected_character: Option<CharacterId>,
    pub score: i32,
    pub collected_rewards: u32,
    pub lives: u8,
    pub is_game_paused: bool,
    /// Stages reached by forward progression, first visit order.
    pub completed_stages: Vec<Stage>,
    pub memory_game: MemoryGame,
    pub music_sequence: Vec<CharacterId>,
    pub player_sequence: Vec<CharacterId>,
    pub maze_position: MazePosition,
    /// Seconds, driven by the external one-second clock.
    pub game_time: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_stage: Stage::Intro,
            selected_character: None,
            score: 0,
            collected_rewards: 0,
            lives: INITIAL_LIVES,
            is_game_paused: false,
            completed_stages: Vec::new(),
            memory_game: MemoryGame::default(),
            music_sequence: Vec::new(),
            player_sequence: Vec::new(),
            maze_position: MazePosition::default(),
            game_time: 0,
        }
    }
}

/// The store's whole write interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    AdvanceStage,
    SetStage(Stage),
    SelectCharacter(CharacterId),
    AddScore(i32),
    AddReward(u32),
    LoseLife,
    TogglePause,
    ResetGame,
    InitMemoryGame,
    FlipCard(u32),
    ResetFlippedCards,
    SetMusicSequence(Vec<CharacterId>),
    AddPlayerNote(CharacterId),
    ResetPlayerSequence,
    SetMazePosition(MazePosition),
    UpdateGameTime(u32),
    AutoReturnToMain,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AdvanceStage => "advanceStage",
            Action::SetStage(_) => "setStage",
            Action::SelectCharacter(_) => "selectCharacter",
            Action::AddScore(_) => "addScore",
            Action::AddReward(_) => "addReward",
            Action::LoseLife => "loseLife",
            Action::TogglePause => "togglePause",
            Action::ResetGame => "resetGame",
            Action::InitMemoryGame => "initMemoryGame",
            Action::FlipCard(_) => "flipCard",
            Action::ResetFlippedCards => "resetFlippedCards",
            Action::SetMusicSequence(_) => "setMusicSequence",
            Action::AddPlayerNote(_) => "addPlayerNote",
            Action::ResetPlayerSequence => "resetPlayerSequence",
            Action::SetMazePosition(_) => "setMazePosition",
            Action::UpdateGameTime(_) => "updateGameTime",
            Action::AutoReturnToMain => "autoReturnToMain",
        }
    }
}

impl GameState {
    /// Apply one transition. `rng` is only drawn from by `InitMemoryGame`.
    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) {
        match action {
            Action::AdvanceStage => self.advance_stage(),
            Action::SetStage(stage) => self.current_stage = stage,
            Action::SelectCharacter(id) => self.selected_character = Some(id),
            Action::AddScore(delta) => self.add_score(delta),
            Action::AddReward(count) => self.add_reward(count),
            Action::LoseLife => self.lives = self.lives.saturating_sub(1),
            Action::TogglePause => self.is_game_paused = !self.is_game_paused,
            Action::ResetGame => *self = GameState::default(),
            Action::InitMemoryGame => self.memory_game = MemoryGame::deal(rng),
            Action::FlipCard(id) => {
                self.flip_card(id);
            }
            Action::ResetFlippedCards => self.memory_game.reset_flipped(),
            Action::SetMusicSequence(sequence) => {
                self.music_sequence = sequence;
                self.player_sequence.clear();
            }
            Action::AddPlayerNote(note) => self.player_sequence.push(note),
            Action::ResetPlayerSequence => self.player_sequence.clear(),
            Action::SetMazePosition(pos) => self.maze_position = pos,
            Action::UpdateGameTime(seconds) => self.game_time = seconds,
            Action::AutoReturnToMain => self.auto_return_to_main(),
        }
    }

    fn advance_stage(&mut self) {
        let Some(next) = self.current_stage.next() else {
            return;
        };
        self.current_stage = next;
        if !self.completed_stages.contains(&next) {
            self.completed_stages.push(next);
        }
    }

    fn add_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta);
    }

    fn add_reward(&mut self, count: u32) {
        self.collected_rewards = self.collected_rewards.saturating_add(count);
        let bonus = i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(REWARD_POINTS);
        self.add_score(bonus);
    }

    /// Flip then settle the pair in the same step, awarding pair and completion points.
    fn flip_card(&mut self, id: u32) -> FlipOutcome {
        let outcome = self.memory_game.flip(id);
        self.add_score(outcome.points());
        outcome
    }

    /// Partial reset back to the intro. Lives and completed stages survive.
    fn auto_return_to_main(&mut self) {
        self.current_stage = Stage::Intro;
        self.selected_character = None;
        self.score = 0;
        self.game_time = 0;
        self.collected_rewards = 0;
        self.memory_game = MemoryGame::default();
        self.music_sequence.clear();
        self.player_sequence.clear();
    }
}

/// Handle returned by [`GameStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameState)>;

pub struct GameStore {
    state: GameState,
    rng: StdRng,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    revision: u64,
}

impl GameStore {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: GameState::default(),
            rng,
            listeners: Vec::new(),
            next_listener: 0,
            revision: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of transitions applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let before = self.state.current_stage;
        self.state.apply(action, &mut self.rng);
        self.revision += 1;

        let after = self.state.current_stage;
        tracing::debug!(
            action = name,
            stage = %after,
            score = self.state.score,
            revision = self.revision,
            "dispatched"
        );
        if before != after {
            tracing::info!(from = %before, to = %after, "stage changed");
        }

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    /// Register a listener called after every transition.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new(None)
    }
}
