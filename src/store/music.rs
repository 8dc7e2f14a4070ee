// Music-repeat helpers.
// The store only records the target melody and the player's replay; these helpers
// generate melodies and judge replays for the controller driving the round.
use rand::Rng;

use crate::characters::CharacterId;

pub const MUSIC_CHARACTERS: [CharacterId; 6] = [
    CharacterId::Barash,
    CharacterId::Krosh,
    CharacterId::Ezhik,
    CharacterId::Losyash,
    CharacterId::Sovunya,
    CharacterId::Nyusha,
];

pub const FIRST_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 5;
pub const LEVEL_POINTS: i32 = 25;
pub const COMPLETION_BONUS: i32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instrument {
    Piano,
    Drum,
    Flute,
    Guitar,
    Violin,
    Bell,
}

impl Instrument {
    pub fn as_str(self) -> &'static str {
        match self {
            Instrument::Piano => "piano",
            Instrument::Drum => "drum",
            Instrument::Flute => "flute",
            Instrument::Guitar => "guitar",
            Instrument::Violin => "violin",
            Instrument::Bell => "bell",
        }
    }
}

/// Instrument voiced by a music-stage character; `None` for characters not on the stage.
pub fn instrument_for(character: CharacterId) -> Option<Instrument> {
    Some(match character {
        CharacterId::Barash => Instrument::Piano,
        CharacterId::Krosh => Instrument::Drum,
        CharacterId::Ezhik => Instrument::Flute,
        CharacterId::Losyash => Instrument::Guitar,
        CharacterId::Sovunya => Instrument::Violin,
        CharacterId::Nyusha => Instrument::Bell,
        _ => return None,
    })
}

pub fn sequence_len(level: u32) -> usize {
    level as usize + 2
}

/// Random melody for `level`, notes drawn uniformly (repeats allowed).
pub fn generate_sequence<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<CharacterId> {
    (0..sequence_len(level))
        .map(|_| MUSIC_CHARACTERS[rng.gen_range(0..MUSIC_CHARACTERS.len())])
        .collect()
}

pub fn level_points(level: u32) -> i32 {
    i32::try_from(level).unwrap_or(i32::MAX).saturating_mul(LEVEL_POINTS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceCheck {
    /// Nothing played yet or a correct strict prefix.
    Pending,
    /// Note at `index` differs from the melody or runs past its end.
    Mismatch { index: usize },
    Complete,
}

/// Prefix-check the replay against the melody.
pub fn check_sequence(target: &[CharacterId], played: &[CharacterId]) -> SequenceCheck {
    if let Some(index) = played
        .iter()
        .enumerate()
        .position(|(i, note)| target.get(i) != Some(note))
    {
        return SequenceCheck::Mismatch { index };
    }
    if !target.is_empty() && played.len() == target.len() {
        SequenceCheck::Complete
    } else {
        SequenceCheck::Pending
    }
}
