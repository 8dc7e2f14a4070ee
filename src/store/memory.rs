// Memory-match board.
// Twelve cards, six character faces dealt twice. Pair resolution runs inside the
// same flip that turns the second card face-up.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::characters::CharacterId;

/// Faces used on the board, each dealt twice.
pub const MEMORY_FACES: [CharacterId; 6] = [
    CharacterId::Barash,
    CharacterId::Krosh,
    CharacterId::Ezhik,
    CharacterId::Losyash,
    CharacterId::Sovunya,
    CharacterId::Nyusha,
];

pub const MEMORY_PAIRS: u32 = MEMORY_FACES.len() as u32;
pub const PAIR_POINTS: i32 = 20;
pub const COMPLETION_BONUS: i32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MemoryCard {
    pub id: u32,
    pub character: CharacterId,
    pub is_flipped: bool,
    pub is_matched: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MemoryGame {
    pub cards: Vec<MemoryCard>,
    /// Face-up, unmatched card ids. Never longer than 2.
    pub flipped_cards: Vec<u32>,
    pub matched_pairs: u32,
    pub attempts: u32,
    pub is_game_complete: bool,
}

/// What a single flip did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Unknown id, card already up or matched, or two cards already showing.
    Ignored,
    /// First card of a pair turned up.
    Revealed,
    Matched,
    /// Matched the last pair.
    Completed,
    /// Two different faces are showing until `reset_flipped` runs.
    Mismatched,
}

impl FlipOutcome {
    /// Points the store awards for this outcome.
    pub fn points(self) -> i32 {
        match self {
            FlipOutcome::Matched => PAIR_POINTS,
            FlipOutcome::Completed => PAIR_POINTS + COMPLETION_BONUS,
            _ => 0,
        }
    }
}

impl MemoryGame {
    /// Deal a fresh shuffled board with zeroed counters.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<MemoryCard> = MEMORY_FACES
            .iter()
            .enumerate()
            .flat_map(|(i, &character)| {
                let base = i as u32 * 2;
                [base, base + 1].map(|id| MemoryCard {
                    id,
                    character,
                    is_flipped: false,
                    is_matched: false,
                })
            })
            .collect();
        cards.shuffle(rng);
        Self { cards, ..Self::default() }
    }

    pub fn card(&self, id: u32) -> Option<&MemoryCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    fn card_mut(&mut self, id: u32) -> Option<&mut MemoryCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn flip(&mut self, id: u32) -> FlipOutcome {
        if self.flipped_cards.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.card_mut(id) else {
            return FlipOutcome::Ignored;
        };
        if card.is_flipped || card.is_matched {
            return FlipOutcome::Ignored;
        }
        card.is_flipped = true;
        self.flipped_cards.push(id);

        if self.flipped_cards.len() == 2 {
            self.resolve_pair()
        } else {
            FlipOutcome::Revealed
        }
    }

    fn resolve_pair(&mut self) -> FlipOutcome {
        self.attempts += 1;
        let (first, second) = (self.flipped_cards[0], self.flipped_cards[1]);
        let same_face = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.character == b.character,
            _ => false,
        };
        if !same_face {
            return FlipOutcome::Mismatched;
        }

        for card in self.cards.iter_mut().filter(|c| c.id == first || c.id == second) {
            card.is_matched = true;
        }
        self.flipped_cards.clear();
        self.matched_pairs += 1;

        if self.matched_pairs == MEMORY_PAIRS {
            self.is_game_complete = true;
            FlipOutcome::Completed
        } else {
            FlipOutcome::Matched
        }
    }

    /// Turn face-down every showing card that is not matched. Idempotent.
    pub fn reset_flipped(&mut self) {
        let showing = std::mem::take(&mut self.flipped_cards);
        for id in showing {
            if let Some(card) = self.card_mut(id) {
                if !card.is_matched {
                    card.is_flipped = false;
                }
            }
        }
    }
}
