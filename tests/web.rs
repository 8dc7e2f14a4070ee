// Browser tests for the wasm handle. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use smeshariki_adventure::start_game;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn handle_drives_stages_and_memory() {
    let game = start_game(Some(r#"{"rngSeed": 3}"#.to_string())).unwrap();
    assert_eq!(game.current_stage(), "intro");
    game.advance_stage();
    game.select_character("krosh").unwrap();
    game.advance_stage();
    assert_eq!(game.current_stage(), "memory");

    game.init_memory_game();
    let snapshot = game.snapshot_json().unwrap();
    assert!(snapshot.contains("\"currentStage\":\"memory\""));
    assert!(snapshot.contains("\"selectedCharacter\":\"krosh\""));
}

#[wasm_bindgen_test]
fn unknown_names_are_rejected_at_the_boundary() {
    let game = start_game(None).unwrap();
    assert!(game.set_stage("boss-fight").is_err());
    assert!(game.select_character("cheburashka").is_err());
    assert!(game.move_in_maze("north").is_err());
    assert_eq!(game.current_stage(), "intro");
}

#[wasm_bindgen_test]
fn bad_config_fails_to_start() {
    assert!(start_game(Some(r#"{"inactivityTimeoutMs": 0}"#.to_string())).is_err());
}

#[wasm_bindgen_test]
fn notes_without_a_melody_are_ignored() {
    // re-running the start hook keeps the installed console subscriber
    smeshariki_adventure::wasm_start();
    let game = start_game(Some(r#"{"rngSeed": 5}"#.to_string())).unwrap();
    assert_eq!(game.play_note("krosh").unwrap(), "ignored");
    let melody = game.start_music_level();
    assert_eq!(melody.len(), 3);
    for note in &melody {
        game.play_note(note).unwrap();
    }
    assert_eq!(game.score(), 25);
    game.reset_game();
    assert_eq!(game.play_note(&melody[0]).unwrap(), "ignored");
    assert_eq!(game.score(), 0);
}
