// Dataset invariants for the fixed character roster and stage chain.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use smeshariki_adventure::store::memory::MEMORY_FACES;
use smeshariki_adventure::store::music::{MUSIC_CHARACTERS, instrument_for};
use smeshariki_adventure::{CHARACTERS, CharacterId, STAGE_ORDER, Stage};

#[test]
fn roster_has_ten_unique_characters() {
    assert_eq!(CHARACTERS.len(), 10);
    let ids: HashSet<_> = CHARACTERS.iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 10, "duplicate id in CHARACTERS");
    let rewards: HashSet<_> = CHARACTERS.iter().map(|c| c.reward).collect();
    assert_eq!(rewards.len(), 10, "two characters share a reward kind");
}

#[test]
fn roster_colors_are_hex() {
    for c in CHARACTERS.iter() {
        assert!(!c.name.is_empty(), "empty name for {}", c.id);
        assert!(!c.description.is_empty(), "empty description for {}", c.id);
        assert_eq!(c.color.len(), 7, "color '{}' for {} is not #RRGGBB", c.color, c.id);
        assert!(c.color.starts_with('#'));
        assert!(c.color[1..].chars().all(|ch| ch.is_ascii_hexdigit()), "bad color '{}'", c.color);
    }
}

#[test]
fn character_ids_parse_back() {
    for id in CharacterId::ALL {
        assert_eq!(id.as_str().parse::<CharacterId>(), Ok(id));
    }
}

#[test]
fn minigame_faces_are_distinct_roster_members() {
    let faces: HashSet<_> = MEMORY_FACES.iter().collect();
    assert_eq!(faces.len(), 6);
    let voices: HashSet<_> = MUSIC_CHARACTERS.iter().collect();
    assert_eq!(voices.len(), 6);
    for c in MUSIC_CHARACTERS {
        assert!(instrument_for(c).is_some(), "{} has no instrument", c);
    }
}

#[test]
fn stage_chain_is_fixed() {
    let names: Vec<&str> = STAGE_ORDER.iter().map(|s| s.as_str()).collect();
    assert_eq!(
        names,
        [
            "intro",
            "character",
            "memory",
            "sorting",
            "puzzle",
            "odd-one",
            "music",
            "maze",
            "collect",
            "victory",
        ]
    );
    assert_eq!(STAGE_ORDER.first(), Some(&Stage::Intro));
    assert!(STAGE_ORDER.last().is_some_and(|s| s.is_terminal()));
}
