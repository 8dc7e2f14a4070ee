//! Play session stages and their fixed linear order.

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// One discrete phase of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Stage {
    Intro,
    Character,
    Memory,
    Sorting,
    Puzzle,
    OddOne,
    Music,
    Maze,
    Collect,
    Victory,
}

/// Forward progression order. `advance_stage` walks this list and stops at `Victory`.
pub const STAGE_ORDER: [Stage; 10] = [
    Stage::Intro,
    Stage::Character,
    Stage::Memory,
    Stage::Sorting,
    Stage::Puzzle,
    Stage::OddOne,
    Stage::Music,
    Stage::Maze,
    Stage::Collect,
    Stage::Victory,
];

impl Stage {
    pub fn index(self) -> usize {
        // STAGE_ORDER mirrors declaration order
        self as usize
    }

    /// Next stage in the chain, `None` at `Victory`.
    pub fn next(self) -> Option<Stage> {
        STAGE_ORDER.get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Intro => "intro",
            Stage::Character => "character",
            Stage::Memory => "memory",
            Stage::Sorting => "sorting",
            Stage::Puzzle => "puzzle",
            Stage::OddOne => "odd-one",
            Stage::Music => "music",
            Stage::Maze => "maze",
            Stage::Collect => "collect",
            Stage::Victory => "victory",
        }
    }

    /// Stages where the inactivity watchdog stays disarmed.
    pub fn is_idle_exempt(self) -> bool {
        matches!(self, Stage::Intro | Stage::Character)
    }

    pub fn is_minigame(self) -> bool {
        !matches!(self, Stage::Intro | Stage::Character | Stage::Victory)
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Victory
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGE_ORDER
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| GameError::UnknownStage(s.to_string()))
    }
}
